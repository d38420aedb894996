//! Lapurd server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request (?q=foo/bar)
//!     ─────────────▶ http server ──▶ Site::handle ──▶ PathRegistry::resolve
//!                     (axum)            │                    │
//!                                       │                    ▼
//!                                       │              router::call (component callback)
//!                                       ▼                    │
//!     Client Response ◀──────────── theme render_page ◀──────┘
//!
//!     config watcher ──▶ Site::build ──▶ atomic swap of the served site
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use lapurd::config::ConfigWatcher;
use lapurd::lifecycle::{signals, startup, Shutdown};
use lapurd::HttpServer;

#[derive(Parser)]
#[command(name = "lapurd")]
#[command(about = "Serve a Lapurd site", long_about = None)]
struct Args {
    /// Configuration file.
    #[arg(short, long, default_value = "lapurd.toml")]
    config: PathBuf,

    /// Rebuild the site when the configuration file changes.
    #[arg(short, long)]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = startup::load(&args.config)?;
    startup::init_observability(&config.observability);

    tracing::info!("lapurd v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.server.bind_address,
        application = %config.site.application,
        request_timeout_secs = config.server.request_timeout_secs,
        "Configuration loaded"
    );

    let site = startup::build_site(&config)?;

    // The watcher stops when dropped, so it lives until main returns.
    let (config_updates, _watcher) = if args.watch {
        let (watcher, updates) = ConfigWatcher::new(&args.config);
        (updates, Some(watcher.run()?))
    } else {
        let (_, updates) = mpsc::unbounded_channel();
        (updates, None)
    };

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(site, config);
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(server.run(listener, config_updates, server_shutdown));

    signals::wait_for_signal().await;
    shutdown.trigger();
    handle.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
