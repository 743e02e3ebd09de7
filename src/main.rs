//! Net pay API server.
//!
//! Loads a deduction schedule (the built-in one unless `--config` names a
//! directory containing `schedule.yaml`) and serves the calculation API.

use std::error::Error;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use paye_engine::api::{AppState, create_router};
use paye_engine::config::ConfigLoader;

/// Kenyan net pay calculator service.
#[derive(Debug, Parser)]
#[command(name = "paye-engine", version, about)]
struct Args {
    /// Directory containing schedule.yaml. Uses the built-in schedule when omitted.
    #[arg(short, long, value_name = "DIR")]
    config: Option<PathBuf>,

    /// Address to listen on.
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(long)]
    debug: bool,
}

/// Priority: RUST_LOG env var > --debug flag > "info".
fn init_tracing(debug: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.debug);

    let config = match &args.config {
        Some(dir) => ConfigLoader::load(dir)?,
        None => ConfigLoader::builtin(),
    };
    let metadata = config.metadata();
    info!(
        schedule = %metadata.name,
        effective_date = %metadata.effective_date,
        "Deduction schedule loaded"
    );

    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    info!(address = %args.bind, "paye-engine listening");
    axum::serve(listener, app).await?;

    Ok(())
}
