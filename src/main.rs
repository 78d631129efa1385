use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use clap_serde_derive::ClapSerde;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::api::AppState;
use crate::config::Config;
use crate::engine::ProcessEngine;
use crate::telemetry::init_telemetry;

mod api;
mod config;
mod engine;
mod error;
mod extractors;
mod task;
mod telemetry;
#[cfg(test)]
mod testing;

const DEFAULT_CONFIG_FILE: &str = "TextTrace.toml";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, env, default_value = DEFAULT_CONFIG_FILE)]
    config_file: String,

    /// Configuration options
    #[command(flatten)]
    pub opt_config: <Config as ClapSerde>::Opt,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = match Config::from_toml(&args.config_file) {
        Ok(conf) => conf.merge(args.opt_config),
        // Only an absent default file is tolerated, a broken one is still reported
        Err(_)
            if args.config_file == DEFAULT_CONFIG_FILE
                && !Path::new(DEFAULT_CONFIG_FILE).exists() =>
        {
            Config::default().merge(args.opt_config)
        }
        Err(err) => return Err(err),
    };

    init_telemetry(config.otel_endpoint(), config.console_log)?;

    let engine = ProcessEngine::new(config.engine_path()).with_timeout(config.engine_timeout());
    if !engine.program().is_file() {
        warn!(
            "Computation engine {} not found, requests will fail until it is installed",
            engine.program().display()
        );
    }
    let static_dir = config.static_dir();
    if !static_dir.join("index.html").is_file() {
        warn!("No index.html in {}", static_dir.display());
    }

    let state = AppState {
        engine: Arc::new(engine),
    };
    let router = api::router(state, &static_dir, config.max_body_bytes);

    let address = format!("{}:{}", config.address, config.port);
    let listener = match TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(err) => exit_err!(1, "Failed to bind {}: {}", address, err),
    };
    info!(
        "Listening on {}",
        listener.local_addr().context("Listener has no local address")?
    );
    info!(
        "Engine: {}, timeout: {:?}",
        config.engine_path().display(),
        config.engine_timeout()
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

// In-flight engines are killed when their request futures are dropped.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down..."),
        Err(e) => error!("Failed to listen for shutdown signal: {}", e),
    }
}
