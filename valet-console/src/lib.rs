//! Valet Console - operator console for Lockstop valet events
//!
//! Controllers behind the console views:
//! - [`SignInController`]: phone number + OTP sign-in
//! - [`EventForm`]: create/edit form with inline validation
//! - [`EventListController`]: event list, pagination, selection, delete, QR
//!
//! All remote calls go through [`valet_client::ValetApi`], so every
//! controller can be driven without a network.

pub mod config;
pub mod error;
pub mod form;
pub mod list;
pub mod logger;
pub mod messages;
pub mod sign_in;
pub mod validation;

pub use config::{Cli, Command, ConsoleConfig, EventArgs};
pub use error::{ConsoleError, ConsoleResult};
pub use form::{EventForm, EventFormValues, FormMode, FormState, SubmitOutcome};
pub use list::{EventListController, ListViewState, Modal, PAGE_SIZE};
pub use sign_in::{RESEND_COOLDOWN, SignInController, SignInState};
pub use validation::{FieldErrors, FormField};
