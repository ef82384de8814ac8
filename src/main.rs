//! AI Gateway CLI - relay an LLM router's model catalog.

use ai_gateway::api::{create_router_with_state, AppState};
use ai_gateway::catalog::{render, CatalogClient};
use ai_gateway::config::{Config, LogVerbosity};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "ai-gateway")]
#[command(about = "Control-plane gateway for an LLM inference router")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gateway server
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Log verbosity level
        #[arg(short, long, value_enum)]
        log_level: Option<LogLevel>,

        /// Config file path
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,
    },

    /// Load the model catalog from a running gateway and print it
    Models {
        /// Gateway base URL (defaults to the configured local port)
        #[arg(short, long)]
        gateway: Option<String>,
    },

    /// Show current configuration
    Config {
        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum LogLevel {
    Minimal,
    Compact,
    Verbose,
}

impl From<LogLevel> for LogVerbosity {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Minimal => LogVerbosity::Minimal,
            LogLevel::Compact => LogVerbosity::Compact,
            LogLevel::Verbose => LogVerbosity::Verbose,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    Config::load_dotenv();

    match cli.command {
        Some(Commands::Serve { port, log_level, config }) => {
            run_server(port, log_level, config).await?;
        }
        Some(Commands::Models { gateway }) => {
            show_models(gateway).await?;
        }
        Some(Commands::Config { path }) => {
            show_config(path)?;
        }
        None => {
            run_server(None, None, None).await?;
        }
    }

    Ok(())
}

async fn run_server(
    port_override: Option<u16>,
    log_level: Option<LogLevel>,
    config_path: Option<std::path::PathBuf>,
) -> anyhow::Result<()> {
    let config = match config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let mut config = config.with_env_overrides();
    if let Some(port) = port_override {
        config.gateway.port = port;
    }
    if let Some(level) = log_level {
        config.app.log_verbosity = level.into();
    }
    let config = Arc::new(config);

    let ip = config
        .gateway
        .host
        .parse::<std::net::IpAddr>()
        .with_context(|| format!("Invalid gateway host '{}'", config.gateway.host))?;
    let addr = SocketAddr::from((ip, config.gateway.port));

    let state = AppState::from_config(&config).context("Failed to create upstream client")?;
    if !state.upstream.is_configured() {
        tracing::warn!("LITELLM_URL or LITELLM_MASTER_KEY not set; /api/models will fail");
    }

    let app = create_router_with_state(state);

    match config.app.log_verbosity {
        LogVerbosity::Minimal => {
            println!("ai-gateway:{}", config.gateway.port);
        }
        LogVerbosity::Compact => {
            println!("→ AI Gateway starting on http://{}", addr);
            println!("→ Models API: http://{}/api/models", addr);
        }
        LogVerbosity::Verbose => {
            println!("────────────────────────────────────────");
            println!("AI Gateway v{}", env!("CARGO_PKG_VERSION"));
            println!("────────────────────────────────────────");
            println!("Gateway:    http://{}", addr);
            println!("Health:     http://{}/health", addr);
            println!("Models:     http://{}/api/models", addr);
            println!(
                "Upstream:   {}",
                config.upstream.url.as_deref().unwrap_or("<not configured>")
            );
            println!("Auth:       {:?}", config.auth.mode);
            println!("────────────────────────────────────────");
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Backend running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("\nGateway stopped.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
}

async fn show_models(gateway: Option<String>) -> anyhow::Result<()> {
    let gateway = match gateway {
        Some(url) => url,
        None => {
            let config = Config::load()?.with_env_overrides();
            format!("http://127.0.0.1:{}", config.gateway.port)
        }
    };

    let client = CatalogClient::new(&gateway).context("Failed to create HTTP client")?;
    println!("{}", render(&client.mount().await));
    Ok(())
}

fn show_config(show_path: bool) -> anyhow::Result<()> {
    if show_path {
        println!("{}", Config::default_path().display());
        return Ok(());
    }

    let config = Config::load()?.with_env_overrides();
    println!("{}", toml::to_string_pretty(&config.redacted())?);
    Ok(())
}
