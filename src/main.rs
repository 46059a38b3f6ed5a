//! Server binary. Intentionally thin: argument parsing, tracing setup, and
//! wiring the router to a listener live here; everything else is in the
//! library.

use clap::Parser;
use solveit::http::{build_router, AppState};
use solveit::StorageConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "solveit", version)]
#[command(about = "Personal problem/solution tracker server", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "SOLVEIT_BIND", default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// Directory holding the JSON data files (defaults to the OS data dir)
    #[arg(long, env = "SOLVEIT_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();
    let args = Args::parse();

    let data_dir = args
        .data_dir
        .unwrap_or_else(StorageConfig::default_data_dir);
    let config = StorageConfig::new(&data_dir);
    info!(data_dir = %data_dir.display(), "opening storage");

    let state = AppState::new(&config).map_err(|e| format!("storage init failed: {e}"))?;
    let app = build_router(state);

    let listener = TcpListener::bind(args.bind)
        .await
        .map_err(|e| format!("bind {} failed: {e}", args.bind))?;
    info!("solveit listening on {}", args.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(|e| format!("server failed: {e}"))
}
