//! Store entry types.

use std::fmt;
use std::str::FromStr;

/// How an entry's target is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// `shrtlnk`: target is a redirect URL.
    ShortLink,
    /// `goget`: target is the repository root for the go-import tag.
    GoGet,
}

impl EntryKind {
    /// The tag used in the flat file.
    pub fn tag(self) -> &'static str {
        match self {
            EntryKind::ShortLink => "shrtlnk",
            EntryKind::GoGet => "goget",
        }
    }
}

impl FromStr for EntryKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shrtlnk" => Ok(EntryKind::ShortLink),
            "goget" => Ok(EntryKind::GoGet),
            _ => Err(()),
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A single flat-file line, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub kind: EntryKind,
    pub target: String,
}

impl Entry {
    pub fn new(key: impl Into<String>, kind: EntryKind, target: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind,
            target: target.into(),
        }
    }
}
