//! Entry store subsystem.
//!
//! # Data Flow
//! ```text
//! flat file (key = type : target)
//!     → parse.rs (line-by-line, all-or-nothing)
//!     → Snapshot (immutable HashMap<key, Entry>)
//!     → table.rs (ArcSwap<Snapshot>, shared via Arc)
//!
//! On reload:
//!     reload supervisor parses a candidate Snapshot off-lock
//!     → Table::replace swaps the pointer
//!     → later lookups observe the new Snapshot
//! ```
//!
//! # Design Decisions
//! - Snapshots are never mutated after parsing; reload replaces them whole
//! - A failed parse yields no Snapshot, so the serving one stays untouched
//! - Readers never block on a reload in progress

pub mod entry;
pub mod parse;
pub mod table;

pub use entry::{Entry, EntryKind};
pub use parse::{load, parse};
pub use table::{Snapshot, Table};
