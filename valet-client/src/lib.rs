//! Valet Client - HTTP client for the Lockstop valet API
//!
//! Provides typed calls against the `/api/v1` endpoints and the local
//! session store holding the bearer token.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod session;

pub use api::{ValetApi, ValetClient};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use session::{Session, SessionStore};

// Re-export shared types for convenience
pub use shared::{ApiResponse, AuthResponse, EventPayload, ValetEvent};
