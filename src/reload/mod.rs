//! Reload subsystem.
//!
//! # Data Flow
//! ```text
//! SIGHUP (lifecycle/signals.rs) ─┐
//! file change (watcher.rs) ──────┼→ ReloadHandle → mpsc → supervisor.rs
//! manual / tests ────────────────┘
//!
//! supervisor.rs:
//!     Idle → Parsing (blocking thread, no lock held)
//!          → Apply   (Table::replace)      → Idle
//!          → Discard (log, keep old table) → Idle
//! ```
//!
//! # Design Decisions
//! - Triggers are fire-and-forget and may arrive any number of times
//! - No retry timer: a failed reload waits for the next trigger
//! - One supervisor task, so reloads never overlap

pub mod supervisor;
pub mod watcher;

pub use supervisor::{ReloadHandle, ReloadTrigger, Reloader};
pub use watcher::FileWatcher;
