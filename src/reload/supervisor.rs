//! Reload supervisor.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::error::StoreError;
use crate::lifecycle::ShutdownListener;
use crate::store::{self, Table};

/// Quiet period after a file-change event before the file is read, so a
/// non-atomic save is not picked up half-written.
pub const WATCH_DEBOUNCE: Duration = Duration::from_millis(100);

/// What asked for a reload. Only used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadTrigger {
    Signal,
    FileChanged,
    Manual,
}

impl fmt::Display for ReloadTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReloadTrigger::Signal => "signal",
            ReloadTrigger::FileChanged => "file change",
            ReloadTrigger::Manual => "manual",
        })
    }
}

/// Cloneable sender side used by trigger sources.
#[derive(Debug, Clone)]
pub struct ReloadHandle {
    tx: mpsc::UnboundedSender<ReloadTrigger>,
}

impl ReloadHandle {
    /// Request a reload. Returns `false` once the supervisor has stopped.
    pub fn trigger(&self, trigger: ReloadTrigger) -> bool {
        self.tx.send(trigger).is_ok()
    }
}

/// Re-reads the flat file and swaps the result into the shared table.
#[derive(Debug, Clone)]
pub struct Reloader {
    table: Arc<Table>,
    path: PathBuf,
}

impl Reloader {
    pub fn new(table: Arc<Table>, path: impl Into<PathBuf>) -> Self {
        Self {
            table,
            path: path.into(),
        }
    }

    /// Reload synchronously.
    ///
    /// On success the new snapshot is live before this returns and the entry
    /// count is reported. On failure the serving snapshot is left untouched.
    pub fn reload_now(&self, trigger: ReloadTrigger) -> Result<usize, StoreError> {
        match store::load(&self.path) {
            Ok(snapshot) => {
                let count = snapshot.len();
                let previous = self.table.replace(snapshot);
                tracing::info!(
                    path = %self.path.display(),
                    %trigger,
                    entries = count,
                    previous_entries = previous.len(),
                    "Entry file reloaded"
                );
                Ok(count)
            }
            Err(e) => {
                tracing::error!(
                    path = %self.path.display(),
                    %trigger,
                    error = %e,
                    "Reload failed, keeping current entries"
                );
                Err(e)
            }
        }
    }

    /// Create the trigger channel for [`Reloader::run`].
    pub fn channel() -> (ReloadHandle, mpsc::UnboundedReceiver<ReloadTrigger>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ReloadHandle { tx }, rx)
    }

    /// Supervisor loop. Runs until shutdown or until every handle is dropped.
    pub async fn run(
        self,
        mut triggers: mpsc::UnboundedReceiver<ReloadTrigger>,
        mut shutdown: ShutdownListener,
    ) {
        tracing::info!(path = %self.path.display(), "Reload supervisor started");

        loop {
            let trigger = tokio::select! {
                trigger = triggers.recv() => match trigger {
                    Some(trigger) => trigger,
                    None => break,
                },
                _ = shutdown.recv() => break,
            };
            let trigger = tokio::select! {
                trigger = settle(trigger, &mut triggers) => trigger,
                _ = shutdown.recv() => break,
            };

            let this = self.clone();
            // Parse off the runtime; the swap itself is a pointer store.
            if let Err(e) = tokio::task::spawn_blocking(move || this.reload_now(trigger)).await {
                tracing::error!(error = %e, "Reload task panicked");
            }
        }

        tracing::info!("Reload supervisor stopped");
    }
}

/// Coalesce a burst of file-change events into one reload.
///
/// Other triggers pass straight through. After a file change, waits
/// [`WATCH_DEBOUNCE`] and drains whatever queued up meanwhile; one reload
/// covers them all.
async fn settle(
    first: ReloadTrigger,
    triggers: &mut mpsc::UnboundedReceiver<ReloadTrigger>,
) -> ReloadTrigger {
    if first != ReloadTrigger::FileChanged {
        return first;
    }

    tokio::time::sleep(WATCH_DEBOUNCE).await;
    let mut coalesced = 0usize;
    while triggers.try_recv().is_ok() {
        coalesced += 1;
    }
    if coalesced > 0 {
        tracing::debug!(coalesced, "Coalesced file change events");
    }
    first
}
