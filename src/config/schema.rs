//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from a TOML file.

use serde::{Deserialize, Serialize};

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ShrtConfig {
    /// Values used to answer requests.
    pub site: Config,

    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Reload trigger settings.
    pub reload: ReloadConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Per-site values. All except `bare_rdr`, `db_path` and `doc_url` end up
/// in the go-import meta tag.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Host name this service answers for (import path prefix).
    pub srv_name: String,

    /// SCM (VCS) type, e.g. `git`.
    pub scm_type: String,

    /// Repository suffix, if the repository host requires one.
    pub suffix: String,

    /// Base of the repository host, e.g. `github.com/user`.
    pub rdr_name: String,

    /// Where requests for `/` redirect. Empty disables the redirect.
    pub bare_rdr: String,

    /// Path to the flat file.
    pub db_path: String,

    /// Documentation viewer linked from go-get responses.
    pub doc_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            srv_name: "example.com".to_string(),
            scm_type: "git".to_string(),
            suffix: ".git".to_string(),
            rdr_name: "github.com/user".to_string(),
            bare_rdr: String::new(),
            db_path: "shrt.db".to_string(),
            doc_url: "https://godoc.org".to_string(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "localhost:8080".to_string(),
        }
    }
}

/// Reload trigger configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ReloadConfig {
    /// Also reload when the flat file changes on disk.
    ///
    /// Change events are coalesced for a short quiet period before the file
    /// is read. A save that takes longer than that to write may still be
    /// picked up part-way; prefer editors that save atomically (write a
    /// temporary file, then rename), or use SIGHUP after saving.
    pub watch: bool,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
