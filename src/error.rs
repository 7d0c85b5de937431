//! Error types shared across subsystems.

use std::path::PathBuf;
use thiserror::Error;

/// A flat file that could not be turned into a snapshot.
///
/// Every variant aborts the whole parse; no partial table is produced.
/// Line numbers are 1-based.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Line has no `=` or its value has no `:`.
    #[error("line {line_no}: invalid syntax: {line}")]
    InvalidSyntax { line_no: usize, line: String },

    /// Same key defined twice.
    #[error("line {line_no}: repeat key: {key}")]
    RepeatKey { line_no: usize, key: String },

    /// Type tag other than `shrtlnk` or `goget`.
    #[error("line {line_no}: unrecognized type: {tag}")]
    UnrecognizedType { line_no: usize, tag: String },

    #[error("line {line_no}: empty key")]
    EmptyKey { line_no: usize },

    /// Key contains a path separator and could never be looked up.
    #[error("line {line_no}: invalid key: {key}")]
    InvalidKey { line_no: usize, key: String },

    #[error("line {line_no}: empty target for key {key}")]
    EmptyTarget { line_no: usize, key: String },

    #[error("line {line_no}: not valid UTF-8")]
    NonUtf8 { line_no: usize },
}

/// Failure to produce a snapshot from the file on disk.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}
