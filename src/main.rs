// Sage - AI tutoring backend
// Main entry point

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sage::config::load_config;
use sage::server::TutorServer;

#[derive(Parser)]
#[command(name = "sage", about = "AI tutoring backend", version)]
struct Cli {
    /// Bind address, e.g. 127.0.0.1:8080. Overrides config and BIND_ADDRESS.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; RUST_LOG overrides the default filter
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sage=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    // Load configuration once; everything downstream borrows it immutably
    let mut config = load_config()?;
    if let Some(bind) = cli.bind {
        config.bind_address = bind;
    }

    tracing::info!(
        llama_configured = config.llama.api_key.is_some(),
        mistral_configured = config.mistral.api_key.is_some(),
        timeout_ms = config.request_timeout_ms,
        env = ?config.app_env,
        "configuration loaded"
    );

    TutorServer::new(config)?.serve().await
}
