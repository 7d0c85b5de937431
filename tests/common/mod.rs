//! Shared utilities for integration tests.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use shrt::{ReloadHandle, Reloader, Service, ShrtConfig, Shutdown};
use tokio::net::TcpListener;

/// A running service on an ephemeral port.
pub struct TestService {
    pub addr: SocketAddr,
    pub reload: ReloadHandle,
    pub shutdown: Shutdown,
}

/// Write `entries` to `path` and boot a service on it.
pub async fn start_service(path: &Path, entries: &str, bare_rdr: &str) -> TestService {
    fs::write(path, entries).unwrap();
    let service = Service::bootstrap(test_config(path, bare_rdr)).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();

    let (reload, triggers) = Reloader::channel();
    let server_shutdown = shutdown.clone();
    let server_reload = reload.clone();
    tokio::spawn(async move {
        let _ = service
            .run(listener, server_shutdown, server_reload, triggers)
            .await;
    });

    TestService {
        addr,
        reload,
        shutdown,
    }
}

/// Config pointing at `path` with a fixed server name.
pub fn test_config(path: &Path, bare_rdr: &str) -> ShrtConfig {
    let mut config = ShrtConfig::default();
    config.site.db_path = path.to_string_lossy().into_owned();
    config.site.srv_name = "go.example.com".into();
    config.site.bare_rdr = bare_rdr.into();
    config
}

/// Client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

/// Poll `f` until it returns true or a few seconds pass.
#[allow(dead_code)]
pub async fn eventually<F, Fut>(mut f: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..100 {
        if f().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    false
}
