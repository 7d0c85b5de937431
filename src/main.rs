//! Shrt (v0.1)
//!
//! A tiny URL redirection service that also answers go-get requests.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request         ┌──────────────────────────────────────────────┐
//!     ───────────────────────┼─▶ http::server ─▶ http::classify ─▶ render   │
//!                            │                        │                     │
//!                            │                        ▼ (one lookup)        │
//!                            │                   store::Table               │
//!                            │                        ▲ (pointer swap)      │
//!     SIGHUP / file change ──┼─▶ reload::supervisor ──┘                     │
//!                            │        └─▶ store::parse (off-lock)           │
//!                            └──────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use shrt::config::{env_lines, env_value, finish, load_config};
use shrt::lifecycle::signals::{spawn_hangup_listener, wait_for_shutdown};
use shrt::observability::init_logging;
use shrt::{store, Reloader, Service, Shutdown};

#[derive(Parser)]
#[command(name = "shrt")]
#[command(about = "Short links and go-get responses from a flat file", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, env = "SHRT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve HTTP requests
    Serve {
        /// Listen address, e.g. 127.0.0.1:8080
        #[arg(short, long)]
        listen: Option<String>,
        /// Path to the entry file
        #[arg(short, long)]
        db: Option<String>,
        /// Reload when the entry file changes on disk
        #[arg(short, long)]
        watch: bool,
    },
    /// Parse the entry file and report problems
    Check {
        /// Path to the entry file
        #[arg(short, long)]
        db: Option<String>,
    },
    /// Print the effective environment, or only the named variables
    Env {
        /// Variable names, e.g. SHRT_SRVNAME
        names: Vec<String>,
    },
    /// Print version information
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("shrt: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { listen, db, watch } => {
            if let Some(listen) = listen {
                config.listener.bind_address = listen;
            }
            if let Some(db) = db {
                config.site.db_path = db;
            }
            config.reload.watch |= watch;
            let config = finish(config)?;

            init_logging(&config.observability.log_level);
            tracing::info!("shrt v{} starting", env!("CARGO_PKG_VERSION"));

            tokio::runtime::Runtime::new()?.block_on(serve(config))
        }
        Commands::Check { db } => {
            if let Some(db) = db {
                config.site.db_path = db;
            }
            let snapshot = store::load(Path::new(&config.site.db_path))?;
            println!("{}: {} entries", config.site.db_path, snapshot.len());
            Ok(())
        }
        Commands::Env { names } if names.is_empty() => {
            for line in env_lines(&config) {
                println!("{line}");
            }
            Ok(())
        }
        Commands::Env { names } => {
            for name in &names {
                println!("{}", env_value(&config, name).unwrap_or_default());
            }
            Ok(())
        }
        Commands::Version => {
            println!("shrt version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn serve(config: shrt::ShrtConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        db_path = %config.site.db_path,
        srv_name = %config.site.srv_name,
        watch = config.reload.watch,
        "Configuration loaded"
    );

    // Signal handlers go in first: SIGHUP's default action would kill the
    // process, and reloads requested during startup are queued.
    let shutdown = Shutdown::new();
    tokio::spawn(wait_for_shutdown(shutdown.clone()));
    let (reload, triggers) = Reloader::channel();
    let hangup = spawn_hangup_listener(reload.clone())?;

    let service = Service::bootstrap(config)?;

    let listener = TcpListener::bind(&service.config().listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    service.run(listener, shutdown, reload, triggers).await?;
    hangup.abort();

    tracing::info!("Shutdown complete");
    Ok(())
}
