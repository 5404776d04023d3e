//! Console configuration
//!
//! Flags fall back to `VALET_*` environment variables, which may come from
//! a `.env` file loaded before parsing.

use std::path::PathBuf;

use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use valet_client::ClientConfig;
use valet_client::config::DEFAULT_TIMEOUT_SECS;

use crate::validation::DEFAULT_COUNTRY_CODE;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_SESSION_DIR: &str = ".valet";
pub const DEFAULT_TIMEZONE: &str = "America/Chicago";

#[derive(Debug, Parser)]
#[command(name = "valet-console")]
#[command(about = "Manage Lockstop valet events", long_about = None)]
pub struct Cli {
    /// Valet API base URL (without /api/v1)
    #[arg(long, global = true, env = "VALET_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Directory holding the session file
    #[arg(long, global = true, env = "VALET_SESSION_DIR", default_value = DEFAULT_SESSION_DIR)]
    pub session_dir: PathBuf,

    /// Business timezone for dates, times and QR payloads
    #[arg(long, global = true, env = "VALET_TIMEZONE", default_value = DEFAULT_TIMEZONE, value_parser = parse_timezone)]
    pub timezone: Tz,

    /// Directory for daily rotating log files
    #[arg(long, global = true, env = "VALET_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true, env = "VALET_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "VALET_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in with a phone number and OTP
    Login {
        /// Country calling code
        #[arg(long, default_value = DEFAULT_COUNTRY_CODE)]
        country_code: String,
        /// National number, digits only
        phone: String,
    },
    /// Remove the stored session
    Logout,
    /// List events
    List {
        /// Page to show (10 rows per page)
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Create an event and print its QR payload
    Create(EventArgs),
    /// Update an event by server id
    Update {
        id: String,
        #[command(flatten)]
        event: EventArgs,
    },
    /// Delete an event by server id
    Delete { id: String },
    /// Delete several events in one call
    DeleteMany {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Print the QR payload of an event
    Qr {
        id: String,
        /// Enable valet admin mode in the payload
        #[arg(long)]
        admin: bool,
    },
}

/// Event form fields; on update, omitted fields keep their current value
#[derive(Debug, Clone, Default, Args)]
pub struct EventArgs {
    #[arg(long)]
    pub event_id: Option<String>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    /// YYYY-MM-DD (local) or RFC 3339
    #[arg(long)]
    pub start_date: Option<String>,
    /// HH:MM
    #[arg(long)]
    pub start_time: Option<String>,
    /// YYYY-MM-DD (local) or RFC 3339
    #[arg(long)]
    pub end_date: Option<String>,
    /// HH:MM
    #[arg(long)]
    pub end_time: Option<String>,
}

fn parse_timezone(s: &str) -> Result<Tz, String> {
    s.parse::<Tz>()
        .map_err(|_| format!("unknown timezone: {s}"))
}

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub api_url: String,
    pub session_dir: PathBuf,
    pub timezone: Tz,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub timeout: u64,
}

impl ConsoleConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            api_url: cli.api_url.clone(),
            session_dir: cli.session_dir.clone(),
            timezone: cli.timezone,
            log_dir: cli.log_dir.clone(),
            log_level: cli.log_level.clone(),
            timeout: cli.timeout,
        }
    }

    /// Client configuration carrying `token`
    pub fn client_config(&self, token: Option<String>) -> ClientConfig {
        ClientConfig::new(&self.api_url)
            .with_optional_token(token)
            .with_timeout(self.timeout)
    }
}
