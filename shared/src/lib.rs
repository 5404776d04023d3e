//! Shared types for the Lockstop valet console
//!
//! Wire models, response envelopes and the QR payload shared between
//! `valet-client` and `valet-console`.

pub mod error;
pub mod models;
pub mod qr;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ErrorBody, ErrorEnvelope};
pub use models::{
    AuthData, AuthResponse, BulkDeleteRequest, EventPayload, OtpRequest, OtpVerifyRequest,
    ValetEvent,
};
pub use qr::QrPayload;
pub use response::{ApiResponse, ResponseStatus};
