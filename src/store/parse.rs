//! Flat-file parsing.
//!
//! # Format
//! One entry per line: `key = type : target`. The line is split on the
//! first `=`, the value on the first `:`. Whitespace around each field is
//! trimmed. There is no comment syntax and blank lines are rejected.
//!
//! # Design Decisions
//! - All-or-nothing: the first bad line aborts the parse
//! - Duplicate keys are an error, never a silent overwrite
//! - A trailing newline on the last line is optional; `\r\n` is accepted

use std::collections::hash_map::{Entry as Slot, HashMap};
use std::fs;
use std::path::Path;

use crate::error::{ParseError, StoreError};
use crate::store::entry::{Entry, EntryKind};
use crate::store::table::Snapshot;

/// Parse the contents of a flat file into a snapshot.
pub fn parse(contents: &[u8]) -> Result<Snapshot, ParseError> {
    if contents.is_empty() {
        return Ok(Snapshot::default());
    }

    let body = contents.strip_suffix(b"\n").unwrap_or(contents);
    let mut entries = HashMap::new();

    for (idx, raw) in body.split(|b| *b == b'\n').enumerate() {
        let line_no = idx + 1;
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let line = std::str::from_utf8(raw).map_err(|_| ParseError::NonUtf8 { line_no })?;

        let entry = parse_line(line, line_no)?;
        match entries.entry(entry.key.clone()) {
            Slot::Occupied(_) => {
                return Err(ParseError::RepeatKey {
                    line_no,
                    key: entry.key,
                })
            }
            Slot::Vacant(slot) => {
                slot.insert(entry);
            }
        }
    }

    Ok(Snapshot::from_map(entries))
}

fn parse_line(line: &str, line_no: usize) -> Result<Entry, ParseError> {
    let invalid = || ParseError::InvalidSyntax {
        line_no,
        line: line.to_string(),
    };

    let (key, value) = line.split_once('=').ok_or_else(invalid)?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ParseError::EmptyKey { line_no });
    }
    if key.contains('/') {
        return Err(ParseError::InvalidKey {
            line_no,
            key: key.to_string(),
        });
    }

    let (tag, target) = value.split_once(':').ok_or_else(invalid)?;
    let tag = tag.trim();
    let kind: EntryKind = tag.parse().map_err(|_| ParseError::UnrecognizedType {
        line_no,
        tag: tag.to_string(),
    })?;

    let target = target.trim();
    if target.is_empty() {
        return Err(ParseError::EmptyTarget {
            line_no,
            key: key.to_string(),
        });
    }

    Ok(Entry::new(key, kind, target))
}

/// Read the file at `path` from scratch and parse it.
///
/// The file handle is closed before returning.
pub fn load(path: &Path) -> Result<Snapshot, StoreError> {
    let contents = fs::read(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&contents).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_short_link() {
        let snap = parse(b"foo = shrtlnk : https://example.com/x").unwrap();
        let entry = snap.get("foo").unwrap();
        assert_eq!(entry.kind, EntryKind::ShortLink);
        assert_eq!(entry.target, "https://example.com/x");
        assert_eq!(snap.len(), 1);
    }

    #[test]
    fn test_parse_mixed_file() {
        let file = b"foo = shrtlnk : https://example.com/x\n\
                     tool=goget:https://git.example.com/tool.git\r\n\
                     \tbar\t=  shrtlnk  :  http://b.example  \n";
        let snap = parse(file).unwrap();
        assert_eq!(snap.len(), 3);
        assert_eq!(snap.get("tool").unwrap().kind, EntryKind::GoGet);
        assert_eq!(snap.get("tool").unwrap().target, "https://git.example.com/tool.git");
        assert_eq!(snap.get("bar").unwrap().target, "http://b.example");
    }

    #[test]
    fn test_splits_on_first_separators_only() {
        // Target URLs carry their own ':' and '='.
        let snap = parse(b"q = shrtlnk : https://example.com/?a=b").unwrap();
        assert_eq!(snap.get("q").unwrap().target, "https://example.com/?a=b");
    }

    #[test]
    fn test_empty_file_is_empty_snapshot() {
        let snap = parse(b"").unwrap();
        assert!(snap.is_empty());
    }

    #[test]
    fn test_missing_equals() {
        let err = parse(b"keynoequals").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidSyntax {
                line_no: 1,
                line: "keynoequals".into()
            }
        );
    }

    #[test]
    fn test_missing_colon() {
        let err = parse(b"a = shrtlnk").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidSyntax {
                line_no: 1,
                line: "a = shrtlnk".into()
            }
        );
    }

    #[test]
    fn test_colon_inside_target_splits_tag() {
        // Without a separating ':' the URL scheme's colon becomes the split point.
        let err = parse(b"a = shrtlnk https://x").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnrecognizedType {
                line_no: 1,
                tag: "shrtlnk https".into()
            }
        );
    }

    #[test]
    fn test_repeat_key() {
        let err = parse(b"a = shrtlnk : x\na = shrtlnk : x\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::RepeatKey {
                line_no: 2,
                key: "a".into()
            }
        );
    }

    #[test]
    fn test_unrecognized_type() {
        let err = parse(b"a = link : x").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnrecognizedType {
                line_no: 1,
                tag: "link".into()
            }
        );
    }

    #[test]
    fn test_blank_line_rejected() {
        let err = parse(b"a = shrtlnk : x\n\nb = goget : y\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidSyntax { line_no: 2, .. }));
    }

    #[test]
    fn test_key_shape() {
        assert_eq!(parse(b" = shrtlnk : x").unwrap_err(), ParseError::EmptyKey { line_no: 1 });
        assert!(matches!(
            parse(b"a/b = shrtlnk : x").unwrap_err(),
            ParseError::InvalidKey { .. }
        ));
        assert!(matches!(
            parse(b"a = goget :   ").unwrap_err(),
            ParseError::EmptyTarget { .. }
        ));
    }

    #[test]
    fn test_non_utf8_line() {
        let err = parse(b"a = shrtlnk : x\nb = shrtlnk : \xff\n").unwrap_err();
        assert_eq!(err, ParseError::NonUtf8 { line_no: 2 });
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "docs = shrtlnk : https://docs.example.com").unwrap();
        let snap = load(file.path()).unwrap();
        assert_eq!(snap.get("docs").unwrap().target, "https://docs.example.com");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("absent.db")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
