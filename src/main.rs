use anyhow::Result;
use clap::{Parser, Subcommand};
use tower_http::trace::TraceLayer;

/// mealboard - weekly meal planning frontend
#[derive(Parser)]
#[command(name = "mealboard")]
#[command(about = "Weekly meal planning and nutrition tracking", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Probe the REST backend and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = mealboard::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mealboard::observability::init_observability(
        "mealboard",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => serve_command(config, host, port).await,
        Commands::Check => check_command(config).await,
    }
}

#[tracing::instrument(skip(config))]
async fn serve_command(
    config: mealboard::config::Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting mealboard server...");

    // Use CLI overrides if provided, otherwise use config
    let host = host_override.unwrap_or_else(|| config.server.host.clone());
    let port = port_override.unwrap_or(config.server.port);

    tracing::info!(backend = %config.api.base_url, "Using REST backend");

    let app = mealboard::create_app(config)?.layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

#[tracing::instrument(skip(config))]
async fn check_command(config: mealboard::config::Config) -> Result<()> {
    let state = mealboard::AppState::new(config)?;

    if state.api.health().await {
        tracing::info!(backend = %state.api.base_url(), "Backend is reachable");
        Ok(())
    } else {
        anyhow::bail!("Backend at {} is not reachable", state.api.base_url())
    }
}
