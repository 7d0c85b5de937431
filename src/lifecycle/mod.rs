//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Load entry file → Start reload sources → Listen
//!
//! Shutdown (shutdown.rs):
//!     SIGINT/SIGTERM → watch flag → HTTP server drains, reload supervisor exits
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//!     SIGHUP → Trigger entry file reload
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Reload errors after startup are never fatal

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{Shutdown, ShutdownListener};
pub use startup::Service;
