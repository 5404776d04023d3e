//! OTP sign-in controller
//!
//! entering phone -> awaiting code -> verified

use std::time::Duration;

use tokio::time::Instant;
use tracing::{info, warn};
use valet_client::{Session, SessionStore, ValetApi};

use crate::error::{ConsoleError, ConsoleResult};
use crate::messages;
use crate::validation::{FieldErrors, FormField, validate_otp, validate_sign_in};

/// Wait between OTP sends
pub const RESEND_COOLDOWN: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInState {
    EnteringPhone,
    /// OTP sent to `phone_number` (country code included)
    AwaitingCode { phone_number: String },
    Verified,
}

pub struct SignInController<A> {
    api: A,
    store: SessionStore,
    state: SignInState,
    cooldown_until: Option<Instant>,
}

impl<A: ValetApi> SignInController<A> {
    pub fn new(api: A, store: SessionStore) -> Self {
        Self {
            api,
            store,
            state: SignInState::EnteringPhone,
            cooldown_until: None,
        }
    }

    pub fn state(&self) -> &SignInState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Send an OTP to `country_code` + `national`. The state only advances
    /// when the server accepts the request.
    ///
    /// While a code is pending, a new request is held to the same cooldown
    /// as [`resend`](Self::resend).
    pub async fn request_otp(&mut self, country_code: &str, national: &str) -> ConsoleResult<()> {
        if matches!(self.state, SignInState::AwaitingCode { .. }) {
            self.check_cooldown()?;
        }
        let national = national.trim();
        let errors = validate_sign_in(country_code, national);
        if !errors.is_empty() {
            warn!(errors = %errors, "Sign-in form rejected");
            return Err(ConsoleError::Validation(errors));
        }

        let phone_number = format!("{country_code}{national}");
        let resp = self
            .api
            .request_otp(&phone_number)
            .await
            .map_err(ConsoleError::remote(messages::SUBMIT_FAILED))?;
        if !resp.success {
            warn!("OTP request refused");
            return Err(ConsoleError::Rejected(
                resp.error.unwrap_or_else(|| messages::OTP_SEND_FAILED.to_string()),
            ));
        }

        info!("OTP sent");
        self.state = SignInState::AwaitingCode { phone_number };
        self.start_cooldown();
        Ok(())
    }

    fn start_cooldown(&mut self) {
        self.cooldown_until = Some(Instant::now() + RESEND_COOLDOWN);
    }

    /// Time left before a resend is allowed
    pub fn resend_cooldown(&self) -> Duration {
        self.cooldown_until
            .map(|until| until.saturating_duration_since(Instant::now()))
            .unwrap_or(Duration::ZERO)
    }

    fn check_cooldown(&self) -> ConsoleResult<()> {
        let remaining = self.resend_cooldown();
        if remaining.is_zero() {
            return Ok(());
        }
        let secs = remaining.as_millis().div_ceil(1000) as u64;
        Err(ConsoleError::Cooldown(secs))
    }

    pub fn can_resend(&self) -> bool {
        matches!(self.state, SignInState::AwaitingCode { .. }) && self.resend_cooldown().is_zero()
    }

    /// Re-send the OTP to the same number and restart the cooldown
    pub async fn resend(&mut self) -> ConsoleResult<()> {
        let SignInState::AwaitingCode { phone_number } = &self.state else {
            return Err(ConsoleError::precondition(messages::OTP_NOT_REQUESTED));
        };
        self.check_cooldown()?;

        let resp = self
            .api
            .request_otp(phone_number)
            .await
            .map_err(ConsoleError::remote(messages::RETRY_LATER))?;
        if !resp.success {
            return Err(ConsoleError::Rejected(
                resp.error.unwrap_or_else(|| messages::OTP_RESEND_FAILED.to_string()),
            ));
        }

        info!("OTP resent");
        self.start_cooldown();
        Ok(())
    }

    /// Verify the code. On success the session is stored, the token is
    /// attached to the client and the controller is verified.
    pub async fn verify(&mut self, code: &str) -> ConsoleResult<Session> {
        let SignInState::AwaitingCode { phone_number } = &self.state else {
            return Err(ConsoleError::precondition(messages::OTP_NOT_REQUESTED));
        };
        let code = code.trim();
        if let Err(msg) = validate_otp(code) {
            let mut errors = FieldErrors::default();
            errors.insert(FormField::Otp, msg);
            return Err(ConsoleError::Validation(errors));
        }

        let resp = self
            .api
            .verify_otp(phone_number, code)
            .await
            .map_err(ConsoleError::remote(messages::SUBMIT_FAILED))?;
        if !resp.is_verified() {
            warn!("OTP verification failed");
            return Err(ConsoleError::Rejected(
                resp.error.unwrap_or_else(|| messages::OTP_INVALID.to_string()),
            ));
        }
        let token = resp
            .access_token()
            .ok_or_else(|| ConsoleError::precondition(messages::TOKEN_MISSING))?;

        let user_id = resp.data.as_ref().and_then(|d| d.user_id.clone());
        let session = Session::new(token, user_id);
        self.store.save(&session)?;
        self.api.set_token(Some(session.token.clone()));
        self.state = SignInState::Verified;
        self.cooldown_until = None;
        info!(path = %self.store.path().display(), "Signed in");
        Ok(session)
    }

    /// Drop the stored session and start over
    pub fn logout(&mut self) -> ConsoleResult<()> {
        if !self.store.exists() {
            info!("No stored session");
        }
        self.store.clear()?;
        self.api.set_token(None);
        self.state = SignInState::EnteringPhone;
        self.cooldown_until = None;
        info!("Signed out");
        Ok(())
    }
}
