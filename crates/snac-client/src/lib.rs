//! Typed client for the host's SNAC commands.
//!
//! Every command lives under `{base_url}/command/snac/`. State-changing
//! commands are POSTed as forms and carry the host's CSRF token, fetched from
//! `command/core/get-csrf-token` right before each request. Host failures are
//! reported in the body (`{"code": "error"}` or `{"status": "error"}`) and
//! surface as [`ClientError::Server`].
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::{HostClient, decode_body};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{ClientError, Result};
pub use types::{
    ApiKeyResponse, EngineConfig, EnvironmentPreferences, HistoryEntry, Preferences,
    PreferencesUpdate, PreviewPreferences, PreviewResult, ProcessCode, ProcessResponse,
    StatusResponse, UploadPreferences, error_message, export_file_name,
};
