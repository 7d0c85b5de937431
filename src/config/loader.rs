//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ShrtConfig;
use crate::config::validation::{validate_config, ValidationError};

pub const SHRT_SRVNAME: &str = "SHRT_SRVNAME";
pub const SHRT_SCMTYPE: &str = "SHRT_SCMTYPE";
pub const SHRT_SUFFIX: &str = "SHRT_SUFFIX";
pub const SHRT_RDRNAME: &str = "SHRT_RDRNAME";
pub const SHRT_BARERDR: &str = "SHRT_BARERDR";
pub const SHRT_DBPATH: &str = "SHRT_DBPATH";
pub const SHRT_LISTEN: &str = "SHRT_LISTEN";
pub const SHRT_LOG: &str = "SHRT_LOG";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, then apply `SHRT_*`
/// environment overrides.
///
/// Validation is left to the caller so CLI overrides can be applied first.
pub fn load_config(path: Option<&Path>) -> Result<ShrtConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => ShrtConfig::default(),
    };

    apply_env(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Overlay environment values onto `config`. Set-but-empty values count, so
/// `SHRT_BARERDR=` disables the bare redirect.
pub fn apply_env(config: &mut ShrtConfig, lookup: impl Fn(&str) -> Option<String>) {
    let site = &mut config.site;
    let fields: [(&str, &mut String); 8] = [
        (SHRT_SRVNAME, &mut site.srv_name),
        (SHRT_SCMTYPE, &mut site.scm_type),
        (SHRT_SUFFIX, &mut site.suffix),
        (SHRT_RDRNAME, &mut site.rdr_name),
        (SHRT_BARERDR, &mut site.bare_rdr),
        (SHRT_DBPATH, &mut site.db_path),
        (SHRT_LISTEN, &mut config.listener.bind_address),
        (SHRT_LOG, &mut config.observability.log_level),
    ];
    for (key, slot) in fields {
        if let Some(value) = lookup(key) {
            *slot = value;
        }
    }
}

/// Check a fully merged config.
pub fn finish(config: ShrtConfig) -> Result<ShrtConfig, ConfigError> {
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn env_pairs(config: &ShrtConfig) -> [(&'static str, &str); 8] {
    let site = &config.site;
    [
        (SHRT_SRVNAME, site.srv_name.as_str()),
        (SHRT_SCMTYPE, site.scm_type.as_str()),
        (SHRT_SUFFIX, site.suffix.as_str()),
        (SHRT_RDRNAME, site.rdr_name.as_str()),
        (SHRT_BARERDR, site.bare_rdr.as_str()),
        (SHRT_DBPATH, site.db_path.as_str()),
        (SHRT_LISTEN, config.listener.bind_address.as_str()),
        (SHRT_LOG, config.observability.log_level.as_str()),
    ]
}

/// Render the effective config as `SHRT_*` assignments.
pub fn env_lines(config: &ShrtConfig) -> Vec<String> {
    env_pairs(config)
        .iter()
        .map(|(key, value)| format!("{key}=\"{value}\""))
        .collect()
}

/// Effective value of one `SHRT_*` variable, `None` for unknown names.
pub fn env_value<'a>(config: &'a ShrtConfig, name: &str) -> Option<&'a str> {
    env_pairs(config)
        .into_iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}
