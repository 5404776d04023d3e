//! In-memory valet API used by the console flow tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use shared::{ApiResponse, AuthResponse, ErrorBody, EventPayload, ValetEvent};
use shared::models::AuthData;
use valet_client::{ClientError, ClientResult, ValetApi};

pub const VALID_OTP: &str = "1234";
pub const ISSUED_TOKEN: &str = "token-abc";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Create(EventPayload),
    List,
    Delete(String),
    DeleteMany(Vec<String>),
    Update(String, EventPayload),
    RequestOtp(String),
    VerifyOtp(String, String),
}

#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<ApiCall>>,
    events: Mutex<Vec<ValetEvent>>,
    /// Transport/server errors returned by the next calls, in order
    failures: Mutex<VecDeque<ClientError>>,
    /// Next event mutation answers with this non-success status
    reject_status: Mutex<Option<u16>>,
    /// `/verify` answers "Success" without an access token
    omit_token: bool,
    next_id: Mutex<usize>,
    token: Option<String>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<ValetEvent>) -> Self {
        let api = Self::new();
        *api.events.lock().unwrap() = events;
        api
    }

    pub fn without_token() -> Self {
        Self {
            omit_token: true,
            ..Self::default()
        }
    }

    pub fn fail_next(&self, err: ClientError) {
        self.failures.lock().unwrap().push_back(err);
    }

    pub fn reject_next(&self, status: u16) {
        *self.reject_status.lock().unwrap() = Some(status);
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn events(&self) -> Vec<ValetEvent> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, call: ApiCall) -> ClientResult<()> {
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn rejection(&self) -> Option<ApiResponse<Value>> {
        self.reject_status
            .lock()
            .unwrap()
            .take()
            .map(|code| ApiResponse::status(code, "Operation failed"))
    }
}

/// Structured server error with a user-facing description
pub fn api_error(status: u16, description: &str) -> ClientError {
    ClientError::Api {
        status,
        body: ErrorBody {
            status,
            header: "Error".into(),
            description: description.into(),
            ..Default::default()
        },
    }
}

pub fn event(id: &str, event_id: &str, end: Option<DateTime<Utc>>) -> ValetEvent {
    ValetEvent {
        id: id.into(),
        event_id: event_id.into(),
        title: Some(format!("{event_id} title")),
        location: Some("Main Garage".into()),
        start_date: None,
        end_date: end,
        created_at: None,
    }
}

fn apply(event: &mut ValetEvent, payload: &EventPayload) {
    event.event_id = payload.event_id.clone();
    event.title = Some(payload.title.clone());
    event.location = Some(payload.location.clone());
    event.start_date = payload.start_date;
    event.end_date = Some(payload.end_date);
}

#[async_trait]
impl ValetApi for FakeApi {
    async fn create_event(&self, payload: &EventPayload) -> ClientResult<ApiResponse<Value>> {
        self.record(ApiCall::Create(payload.clone()))?;
        if let Some(resp) = self.rejection() {
            return Ok(resp);
        }
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            format!("srv-{}", *next)
        };
        let mut created = event(&id, &payload.event_id, None);
        apply(&mut created, payload);
        self.events.lock().unwrap().push(created);
        Ok(ApiResponse::ok(serde_json::to_value(payload)?))
    }

    async fn list_events(&self) -> ClientResult<ApiResponse<Vec<ValetEvent>>> {
        self.record(ApiCall::List)?;
        Ok(ApiResponse::ok(self.events()))
    }

    async fn delete_event(&self, id: &str) -> ClientResult<ApiResponse<Value>> {
        self.record(ApiCall::Delete(id.to_string()))?;
        if let Some(resp) = self.rejection() {
            return Ok(resp);
        }
        self.events.lock().unwrap().retain(|e| e.id != id);
        Ok(ApiResponse::ok(Value::Null))
    }

    async fn delete_events(&self, ids: &[String]) -> ClientResult<ApiResponse<Value>> {
        self.record(ApiCall::DeleteMany(ids.to_vec()))?;
        if let Some(resp) = self.rejection() {
            return Ok(resp);
        }
        self.events.lock().unwrap().retain(|e| !ids.contains(&e.id));
        Ok(ApiResponse::ok(Value::Null))
    }

    async fn update_event(
        &self,
        id: &str,
        payload: &EventPayload,
    ) -> ClientResult<ApiResponse<Value>> {
        self.record(ApiCall::Update(id.to_string(), payload.clone()))?;
        if let Some(resp) = self.rejection() {
            return Ok(resp);
        }
        let mut events = self.events.lock().unwrap();
        match events.iter_mut().find(|e| e.id == id) {
            Some(event) => {
                apply(event, payload);
                Ok(ApiResponse::ok(serde_json::to_value(payload)?))
            }
            None => Err(api_error(404, "Event not found")),
        }
    }

    async fn request_otp(&self, phone_number: &str) -> ClientResult<AuthResponse> {
        self.record(ApiCall::RequestOtp(phone_number.to_string()))?;
        Ok(AuthResponse {
            success: true,
            message: Some("OTP sent".into()),
            ..Default::default()
        })
    }

    async fn verify_otp(&self, phone_number: &str, otp: &str) -> ClientResult<AuthResponse> {
        self.record(ApiCall::VerifyOtp(phone_number.to_string(), otp.to_string()))?;
        if otp != VALID_OTP {
            return Ok(AuthResponse {
                success: false,
                message: Some("Failed".into()),
                error: Some("Invalid OTP".into()),
                ..Default::default()
            });
        }
        Ok(AuthResponse {
            success: true,
            message: Some("Success".into()),
            data: Some(AuthData {
                access_token: (!self.omit_token).then(|| ISSUED_TOKEN.to_string()),
                user_id: Some("user-1".into()),
            }),
            error: None,
        })
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }
}
