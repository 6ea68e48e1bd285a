use anyhow::Context;
use clap::{Parser, Subcommand};
use forecast_core::{Config, ForecastService, provider_from_config};
use forecast_server::{AppState, router};
use inquire::{Password, Text};
use std::{path::PathBuf, sync::Arc};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast-server", version, about = "Weather forecast proxy")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the forecast API.
    Serve {
        /// Address to listen on, e.g. "0.0.0.0:5000".
        #[arg(long)]
        bind: Option<String>,
    },

    /// Interactively set the shared token and provider API key.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Serve { bind } => {
                let mut config = load_config(self.config.as_deref())?;
                config.apply_env();
                if let Some(bind) = bind {
                    config.server.bind = bind;
                }
                serve(config).await
            }
            Command::Configure => configure(self.config),
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = config.bind_addr()?;

    if config.api_token.is_empty() {
        tracing::warn!("api_token is empty; any request with an empty token will be accepted");
    }

    let provider = provider_from_config(&config)?;
    let service = ForecastService::new(Arc::from(provider), config.api_token.clone());
    let app = router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, "forecast proxy listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated unexpectedly")?;

    tracing::info!("forecast proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}

fn configure(path: Option<PathBuf>) -> anyhow::Result<()> {
    let mut config = load_config(path.as_deref())?;

    config.api_token = Password::new("Shared API token callers must send:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API token")?;

    config.provider.api_key = Password::new("RapidAPI key for the forecast provider:")
        .without_confirmation()
        .prompt()
        .context("Failed to read provider API key")?;

    let current_bind = config.server.bind.clone();
    config.server.bind = Text::new("Listen address:")
        .with_default(&current_bind)
        .prompt()
        .context("Failed to read listen address")?;
    config.bind_addr()?;

    let saved_to = match path {
        Some(path) => {
            config.save_to(&path)?;
            path
        }
        None => config.save()?,
    };

    println!("Configuration saved to {}", saved_to.display());
    Ok(())
}
