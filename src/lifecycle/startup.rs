//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the entry file once; failure here is fatal
//! - Start the reload supervisor and the optional file watcher
//! - Serve HTTP until shutdown, then stop the supervisor

use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::config::ShrtConfig;
use crate::error::StoreError;
use crate::http::HttpServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::reload::{FileWatcher, ReloadHandle, ReloadTrigger, Reloader};
use crate::store::{self, Table};

/// A loaded, ready-to-serve instance.
pub struct Service {
    config: ShrtConfig,
    table: Arc<Table>,
}

impl Service {
    /// Read the entry file for the first time.
    pub fn bootstrap(config: ShrtConfig) -> Result<Self, StoreError> {
        let path = PathBuf::from(&config.site.db_path);
        let snapshot = store::load(&path)?;

        tracing::info!(
            path = %path.display(),
            entries = snapshot.len(),
            "Entry file loaded"
        );

        Ok(Self {
            config,
            table: Arc::new(Table::new(snapshot)),
        })
    }

    pub fn config(&self) -> &ShrtConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires.
    ///
    /// The reload channel is created by the caller so trigger sources such
    /// as the SIGHUP listener can be installed before startup; triggers
    /// queued meanwhile are applied once the supervisor runs. A shutdown
    /// fired before this is called still stops it.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: Shutdown,
        handle: ReloadHandle,
        triggers: mpsc::UnboundedReceiver<ReloadTrigger>,
    ) -> std::io::Result<()> {
        let server_shutdown = shutdown.subscribe();
        let supervisor_shutdown = shutdown.subscribe();

        let path = PathBuf::from(&self.config.site.db_path);
        let supervisor = tokio::spawn(
            Reloader::new(self.table.clone(), &path).run(triggers, supervisor_shutdown),
        );

        let _watcher = if self.config.reload.watch {
            match FileWatcher::new(&path, handle).run() {
                Ok(w) => Some(w),
                Err(e) => {
                    tracing::warn!(error = %e, "File watcher unavailable, relying on SIGHUP");
                    None
                }
            }
        } else {
            None
        };

        let server = HttpServer::new(self.config.site.clone(), self.table.clone());
        let result = server.run(listener, server_shutdown).await;

        shutdown.trigger();
        if let Err(e) = supervisor.await {
            tracing::error!(error = %e, "Reload supervisor ended abnormally");
        }
        result
    }
}
