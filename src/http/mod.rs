//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all route, trace layer)
//!     → classify.rs (method + path + config + table → Reply)
//!     → render.rs (Reply → status, headers, body)
//!     → Send to client
//! ```
//!
//! # Design Decisions
//! - Classification is a pure function so every branch is unit-testable
//! - Each request performs at most one store lookup
//! - Per-request problems always become a well-formed response

pub mod classify;
pub mod render;
pub mod server;

pub use classify::{classify, GoImport, Reply};
pub use server::{AppState, HttpServer};
