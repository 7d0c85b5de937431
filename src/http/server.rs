//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router with a single catch-all handler
//! - Wire up middleware (tracing)
//! - Bind server to listener with graceful shutdown
//! - Hand each request to the classifier and log the decision

use std::sync::Arc;

use axum::{
    extract::State,
    http::{Method, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::http::classify::{classify, Reply};
use crate::lifecycle::ShutdownListener;
use crate::store::Table;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<Table>,
    pub config: Arc<Config>,
}

/// HTTP server answering short-link and go-get requests.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(config: Config, table: Arc<Table>) -> Self {
        let state = AppState {
            table,
            config: Arc::new(config),
        };
        Self {
            router: Self::build_router(state),
        }
    }

    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", any(shrt_handler))
            .route("/{*path}", any(shrt_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// The router, for driving in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: ShutdownListener,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move { shutdown.recv().await })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn shrt_handler(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    let path = uri.path();
    let reply = classify(&method, path, &state.config, &state.table);

    match &reply {
        Reply::Robots => tracing::info!("incoming robot"),
        Reply::BareRedirect { .. } => tracing::info!("bare redirect for /"),
        Reply::ShortLink { location } => {
            tracing::info!(path = %path, location = %location, "shortlink request")
        }
        Reply::GoGet(import) => tracing::info!(repo = %import.repo, path = %path, "go-get request"),
        Reply::NotFound => tracing::info!(path = %path, "path elements following shortlink"),
        Reply::Forbidden => tracing::warn!(path = %path, "request path not allowed"),
        Reply::MethodNotAllowed => tracing::info!(method = %method, path = %path, "method not allowed"),
    }

    reply.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::parse;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn server(bare_rdr: &str) -> HttpServer {
        let table = Arc::new(Table::new(
            parse(b"foo = shrtlnk : https://example.com/x\n").unwrap(),
        ));
        let config = Config {
            bare_rdr: bare_rdr.to_string(),
            ..Config::default()
        };
        HttpServer::new(config, table)
    }

    async fn send(server: &HttpServer, method: Method, uri: &str) -> Response {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        server.router().oneshot(req).await.unwrap()
    }

    #[tokio::test]
    async fn test_short_link_route() {
        let res = send(&server(""), Method::GET, "/foo").await;
        assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(res.headers()[header::LOCATION], "https://example.com/x");
    }

    #[tokio::test]
    async fn test_root_redirect() {
        let res = send(&server("https://docs.example.com"), Method::GET, "/").await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(res.headers()[header::LOCATION], "https://docs.example.com");
    }

    #[tokio::test]
    async fn test_go_get_route() {
        let res = send(&server(""), Method::GET, "/unknown/pkg?go-get=1").await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("example.com/unknown git github.com/user/unknown.git"));
    }

    #[tokio::test]
    async fn test_post_rejected() {
        let res = send(&server(""), Method::POST, "/foo").await;
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_robots_route() {
        let res = send(&server(""), Method::GET, "/robots.txt").await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], crate::http::render::ROBOTS_TXT.as_bytes());
    }
}
