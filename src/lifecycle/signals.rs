//! OS signal handling.
//!
//! # Responsibilities
//! - SIGHUP → reload trigger (unix only)
//! - SIGINT/SIGTERM → graceful shutdown

use crate::lifecycle::shutdown::Shutdown;
use crate::reload::ReloadHandle;

/// Forward every SIGHUP to the reload supervisor until it stops listening.
#[cfg(unix)]
pub fn spawn_hangup_listener(handle: ReloadHandle) -> std::io::Result<tokio::task::JoinHandle<()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hup = signal(SignalKind::hangup())?;
    Ok(tokio::spawn(async move {
        while hup.recv().await.is_some() {
            tracing::info!("SIGHUP received, reloading entries");
            if !handle.trigger(crate::reload::ReloadTrigger::Signal) {
                break;
            }
        }
    }))
}

#[cfg(not(unix))]
pub fn spawn_hangup_listener(_handle: ReloadHandle) -> std::io::Result<tokio::task::JoinHandle<()>> {
    tracing::warn!("SIGHUP reload is not available on this platform");
    Ok(tokio::spawn(async {}))
}

/// Wait for Ctrl+C or SIGTERM, then trigger `shutdown`.
pub async fn wait_for_shutdown(shutdown: Shutdown) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
    shutdown.trigger();
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::reload::{ReloadTrigger, Reloader};
    use std::process::Command;
    use std::time::Duration;

    #[tokio::test]
    async fn test_sighup_without_service_becomes_trigger() {
        let (handle, mut rx) = Reloader::channel();
        let listener = spawn_hangup_listener(handle).unwrap();

        let status = Command::new("kill")
            .args(["-HUP", &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());

        let got = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert_eq!(got.unwrap(), Some(ReloadTrigger::Signal));
        listener.abort();
    }
}
