//! Auth DTOs (phone number + OTP sign-in)

use serde::{Deserialize, Serialize};

/// Message the server returns on a successful OTP verification
pub const VERIFY_SUCCESS_MESSAGE: &str = "Success";

/// OTP request (`POST /login`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRequest {
    pub phone_number: String,
}

/// OTP verification (`POST /verify`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpVerifyRequest {
    pub phone_number: String,
    pub otp: String,
}

/// Response body of both auth endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AuthData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Session data returned by `/verify`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl AuthResponse {
    /// `/verify` reports success through `message`, not `success`
    pub fn is_verified(&self) -> bool {
        self.message.as_deref() == Some(VERIFY_SUCCESS_MESSAGE) && self.data.is_some()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.data.as_ref()?.access_token.as_deref()
    }
}
