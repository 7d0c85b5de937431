//! Shrt: short links and go-get responses from a flat file.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod reload;
pub mod store;

pub use config::{Config, ShrtConfig};
pub use error::{ParseError, StoreError};
pub use http::HttpServer;
pub use lifecycle::{Service, Shutdown, ShutdownListener};
pub use reload::{ReloadHandle, ReloadTrigger, Reloader};
pub use store::{Entry, EntryKind, Snapshot, Table};
