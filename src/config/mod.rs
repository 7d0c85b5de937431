//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! built-in defaults
//!     → optional TOML file (loader.rs)
//!     → SHRT_* environment overrides (loader.rs)
//!     → CLI overrides (main.rs)
//!     → validation.rs (semantic checks)
//!     → ShrtConfig (validated, immutable)
//!     → shared via Arc to the responder and reload supervisor
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; only the entry store reloads
//! - All fields have defaults to allow an empty or missing file
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{apply_env, env_lines, env_value, finish, load_config, ConfigError};
pub use schema::{Config, ListenerConfig, ObservabilityConfig, ReloadConfig, ShrtConfig};
pub use validation::{validate_config, ValidationError};
