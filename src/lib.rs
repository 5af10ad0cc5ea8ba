//! Streaming code-commenting client.
//!
//! Invariant: one request cycle at a time per [`RequestController`]. A cycle
//! owns the output surface from the moment it disables the trigger until it
//! re-enables it.
//!
//! # Public API Overview
//! - Drive a request with [`RequestController::cycle`] against any [`Surface`].
//! - Implement [`Transport`] to swap the HTTP client for another byte source.
//! - Use [`TerminalSurface`] and [`Session`] for a line-oriented terminal front end.
//! - Configure from the environment with [`EnvConfig`] and install logging with
//!   [`logging::init`].

pub mod commands;
pub mod config;
pub mod controller;
pub mod logging;
pub mod session;
pub mod surface;
pub mod terminal;
pub mod transport;

pub use crate::config::{ConfigError, EnvConfig};
pub use crate::controller::{
    CycleError, CycleOutcome, CyclePhase, RequestController, RequestState, EMPTY_INPUT_NOTICE,
    FAILURE_MESSAGE,
};
pub use crate::session::{Session, SessionAction};
pub use crate::surface::{BusyStateSink, InputSource, Notifier, OutputSink, Surface};
pub use crate::terminal::TerminalSurface;
pub use crate::transport::Transport;
