//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ShrtConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::ShrtConfig;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{field} is not an absolute URL: {value}")]
    BadUrl { field: &'static str, value: String },
}

pub fn validate_config(config: &ShrtConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let site = &config.site;

    let required = [
        ("site.srv_name", &site.srv_name),
        ("site.scm_type", &site.scm_type),
        ("site.db_path", &site.db_path),
        ("listener.bind_address", &config.listener.bind_address),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            errors.push(ValidationError::Empty(field));
        }
    }

    for (field, value) in [("site.bare_rdr", &site.bare_rdr), ("site.doc_url", &site.doc_url)] {
        if !value.is_empty() && Url::parse(value).is_err() {
            errors.push(ValidationError::BadUrl {
                field,
                value: value.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&ShrtConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ShrtConfig::default();
        config.site.srv_name.clear();
        config.site.db_path = "  ".into();
        config.site.bare_rdr = "docs.example.com".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::Empty("site.srv_name")));
        assert!(errors.contains(&ValidationError::Empty("site.db_path")));
        assert!(matches!(errors[2], ValidationError::BadUrl { field: "site.bare_rdr", .. }));
    }
}
