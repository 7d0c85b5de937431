//! Request classification.
//!
//! # Rules (first match wins)
//! - Non-GET → 405, no lookup
//! - `robots.txt` → fixed crawler policy
//! - Empty path with a bare redirect configured → 302
//! - Empty first segment before more path, `.` or `..` → 403
//! - Short-link key alone → 301; short-link key with trailing segments → 404
//! - Go-get entry or no entry → go-get document (any depth)

use axum::http::Method;

use crate::config::Config;
use crate::store::{EntryKind, Table};

/// The decided response, before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Robots,
    BareRedirect { location: String },
    ShortLink { location: String },
    GoGet(GoImport),
    NotFound,
    Forbidden,
    MethodNotAllowed,
}

/// Everything needed to render a go-get document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoImport {
    /// Host this service answers for.
    pub srv_name: String,
    /// First path segment.
    pub repo: String,
    pub scm_type: String,
    /// Repository root advertised to the toolchain.
    pub repo_root: String,
    /// Full path without the leading separator.
    pub doc_path: String,
    pub doc_url: String,
}

impl GoImport {
    /// `import-prefix vcs repo-root`
    pub fn meta_content(&self) -> String {
        format!("{}/{} {} {}", self.srv_name, self.repo, self.scm_type, self.repo_root)
    }

    /// Documentation viewer link for the requested import path.
    pub fn doc_link(&self) -> String {
        format!(
            "{}/{}/{}",
            self.doc_url.trim_end_matches('/'),
            self.srv_name,
            self.doc_path
        )
    }
}

pub fn classify(method: &Method, path: &str, config: &Config, table: &Table) -> Reply {
    if *method != Method::GET {
        return Reply::MethodNotAllowed;
    }

    let path = path.strip_prefix('/').unwrap_or(path);

    if path == "robots.txt" {
        return Reply::Robots;
    }

    if path.is_empty() && !config.bare_rdr.is_empty() {
        return Reply::BareRedirect {
            location: config.bare_rdr.clone(),
        };
    }

    let (key, trailing) = match path.split_once('/') {
        Some((key, _)) => (key, true),
        None => (path, false),
    };

    if (key.is_empty() && trailing) || key == "." || key == ".." {
        return Reply::Forbidden;
    }

    let repo_root = match table.get(key) {
        Some(entry) if entry.kind == EntryKind::ShortLink => {
            if trailing {
                return Reply::NotFound;
            }
            return Reply::ShortLink {
                location: entry.target,
            };
        }
        Some(entry) => entry.target,
        None => format!("{}/{}{}", config.rdr_name, key, config.suffix),
    };

    Reply::GoGet(GoImport {
        srv_name: config.srv_name.clone(),
        repo: key.to_string(),
        scm_type: config.scm_type.clone(),
        repo_root,
        doc_path: path.to_string(),
        doc_url: config.doc_url.clone(),
    })
}
