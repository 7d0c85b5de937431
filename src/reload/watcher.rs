//! Flat-file watcher for hot reload.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::reload::supervisor::{ReloadHandle, ReloadTrigger};

/// Watches the flat file and forwards changes as reload triggers.
///
/// The parent directory is watched so editors that save by renaming a
/// temporary file over the original are still noticed.
pub struct FileWatcher {
    path: PathBuf,
    handle: ReloadHandle,
}

impl FileWatcher {
    pub fn new(path: &Path, handle: ReloadHandle) -> Self {
        Self {
            path: path.to_path_buf(),
            handle,
        }
    }

    /// Start watching. The returned watcher must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let name: Option<OsString> = self.path.file_name().map(|n| n.to_os_string());
        let handle = self.handle.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    let relevant = event.kind.is_modify() || event.kind.is_create();
                    let ours = event
                        .paths
                        .iter()
                        .any(|p| p.file_name().map(|n| n.to_os_string()) == name);
                    if relevant && ours {
                        tracing::debug!(kind = ?event.kind, "Entry file change detected");
                        handle.trigger(ReloadTrigger::FileChanged);
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Entry file watcher started");
        Ok(watcher)
    }
}
