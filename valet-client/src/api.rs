//! Typed valet API operations
//!
//! One method per endpoint under `/api/v1`. Errors are returned unchanged;
//! there is no retry or backoff.

use async_trait::async_trait;
use serde_json::Value;
use shared::{
    ApiResponse, AuthResponse, BulkDeleteRequest, EventPayload, OtpRequest, OtpVerifyRequest,
    ValetEvent,
};

use crate::http::{HttpClient, NetworkHttpClient};
use crate::{ClientConfig, ClientResult};

/// API path prefix
pub const API_PREFIX: &str = "api/v1";

/// Valet API operations
#[async_trait]
pub trait ValetApi: Send + Sync {
    /// `POST /addValetEvent`
    async fn create_event(&self, payload: &EventPayload) -> ClientResult<ApiResponse<Value>>;
    /// `GET /getAllValetEvents`
    async fn list_events(&self) -> ClientResult<ApiResponse<Vec<ValetEvent>>>;
    /// `DELETE /deleteValetEvent/{id}`
    async fn delete_event(&self, id: &str) -> ClientResult<ApiResponse<Value>>;
    /// `DELETE /deleteValetEvents` with `{"ids": [..]}`
    async fn delete_events(&self, ids: &[String]) -> ClientResult<ApiResponse<Value>>;
    /// `PUT /updateValetEvent/{id}`
    async fn update_event(
        &self,
        id: &str,
        payload: &EventPayload,
    ) -> ClientResult<ApiResponse<Value>>;
    /// `POST /login`, sends the OTP to `phone_number`
    async fn request_otp(&self, phone_number: &str) -> ClientResult<AuthResponse>;
    /// `POST /verify`
    async fn verify_otp(&self, phone_number: &str, otp: &str) -> ClientResult<AuthResponse>;

    /// Bearer token attached to requests
    fn token(&self) -> Option<&str>;
    fn set_token(&mut self, token: Option<String>);
}

/// Valet API client over the network transport
#[derive(Debug, Clone)]
pub struct ValetClient<H = NetworkHttpClient> {
    http: H,
}

impl ValetClient<NetworkHttpClient> {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            http: NetworkHttpClient::new(config)?,
        })
    }
}

impl<H: HttpClient> ValetClient<H> {
    /// Wrap an existing transport
    pub fn with_http(http: H) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &H {
        &self.http
    }
}

fn path(endpoint: &str) -> String {
    format!("{}/{}", API_PREFIX, endpoint)
}

#[async_trait]
impl<H: HttpClient> ValetApi for ValetClient<H> {
    async fn create_event(&self, payload: &EventPayload) -> ClientResult<ApiResponse<Value>> {
        tracing::info!(event_id = %payload.event_id, "Creating valet event");
        self.http.post(&path("addValetEvent"), payload).await
    }

    async fn list_events(&self) -> ClientResult<ApiResponse<Vec<ValetEvent>>> {
        self.http.get(&path("getAllValetEvents")).await
    }

    async fn delete_event(&self, id: &str) -> ClientResult<ApiResponse<Value>> {
        tracing::info!(id, "Deleting valet event");
        self.http
            .delete(&path(&format!("deleteValetEvent/{}", id)))
            .await
    }

    async fn delete_events(&self, ids: &[String]) -> ClientResult<ApiResponse<Value>> {
        tracing::info!(count = ids.len(), "Deleting valet events");
        let body = BulkDeleteRequest { ids: ids.to_vec() };
        self.http
            .delete_with_body(&path("deleteValetEvents"), &body)
            .await
    }

    async fn update_event(
        &self,
        id: &str,
        payload: &EventPayload,
    ) -> ClientResult<ApiResponse<Value>> {
        tracing::info!(id, event_id = %payload.event_id, "Updating valet event");
        self.http
            .put(&path(&format!("updateValetEvent/{}", id)), payload)
            .await
    }

    async fn request_otp(&self, phone_number: &str) -> ClientResult<AuthResponse> {
        let req = OtpRequest {
            phone_number: phone_number.to_string(),
        };
        self.http.post(&path("login"), &req).await
    }

    async fn verify_otp(&self, phone_number: &str, otp: &str) -> ClientResult<AuthResponse> {
        let req = OtpVerifyRequest {
            phone_number: phone_number.to_string(),
            otp: otp.to_string(),
        };
        self.http.post(&path("verify"), &req).await
    }

    fn token(&self) -> Option<&str> {
        self.http.token()
    }

    fn set_token(&mut self, token: Option<String>) {
        self.http.set_token(token);
    }
}
