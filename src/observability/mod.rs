//! Observability subsystem.
//!
//! Structured logging only: every request decision and every reload outcome
//! is a `tracing` event with fields.

pub mod logging;

pub use logging::init_logging;
