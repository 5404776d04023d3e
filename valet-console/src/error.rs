//! Console error types
//!
//! Every failure is scoped to one operator action; [`ConsoleError::user_message`]
//! is the text shown for it.

use thiserror::Error;
use valet_client::ClientError;

use crate::messages;
use crate::validation::FieldErrors;

#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Inline field errors, raised before any network call
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Local precondition not met (no selection, expired event, wrong state)
    #[error("{0}")]
    Precondition(String),

    /// OTP resend attempted during the cooldown
    #[error("Resend available in {0}s")]
    Cooldown(u64),

    /// Transport or server error; `fallback` is shown when the server sent
    /// no structured description
    #[error("{fallback} ({source})")]
    Remote {
        fallback: &'static str,
        #[source]
        source: ClientError,
    },

    /// Server answered but reported failure in the body
    #[error("{0}")]
    Rejected(String),

    /// QR payload could not be encoded
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    /// Session file could not be written
    #[error("Session storage error: {0}")]
    Session(#[from] std::io::Error),
}

impl ConsoleError {
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    pub fn remote(fallback: &'static str) -> impl FnOnce(ClientError) -> Self {
        move |source| Self::Remote { fallback, source }
    }

    /// Text for the transient notification
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(errors) => errors.to_string(),
            Self::Precondition(msg) | Self::Rejected(msg) => msg.clone(),
            Self::Cooldown(secs) => format!("Resend in {secs}s"),
            Self::Remote { fallback, source } => source
                .description()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
            Self::Encode(_) => messages::RETRY_LATER.to_string(),
            Self::Session(_) => messages::SESSION_SAVE_FAILED.to_string(),
        }
    }

    /// Field errors when this is a validation failure
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;
