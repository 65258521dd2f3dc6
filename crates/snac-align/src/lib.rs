//! Schema alignment workflow: session, preview, persistence and the panel
//! state machine.
//!
//! # Architecture
//!
//! - [`SchemaModelProvider`] loads the host's field catalog once per session.
//! - [`AlignmentSession`] owns the working and saved mapping and keeps the
//!   warning list current.
//! - [`PreviewRequester`] tags each preview request so only the newest
//!   response is shown.
//! - [`PersistenceGateway`] saves and discards.
//! - [`AlignmentView`] ties them together behind `update(Message) -> Effect`.
//!
//! Host access goes through the [`HostBackend`] trait.
#![deny(unsafe_code)]

pub mod backend;
pub mod error;
pub mod jobs;
pub mod persistence;
pub mod preview;
pub mod provider;
pub mod session;
pub mod view;

pub use backend::HostBackend;
pub use error::{AlignError, Result};
pub use jobs::{ExportDocument, JobKind, check_job_preconditions, export, start_job};
pub use persistence::PersistenceGateway;
pub use preview::{PreviewPanel, PreviewRequester, PreviewTicket};
pub use provider::SchemaModelProvider;
pub use session::AlignmentSession;
pub use view::{AlignmentView, AlignmentViewModel, Effect, Message, Tab, ViewPhase, dispatch};
