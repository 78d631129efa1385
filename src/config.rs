use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap_serde_derive::ClapSerde;

#[derive(ClapSerde, Debug)]
pub struct Config {
    /// The address the listener binds to
    #[default("0.0.0.0".to_string())]
    #[arg(short, long, env)]
    pub(crate) address: String,

    /// The port the listener binds to
    #[default(10000)]
    #[arg(short, long, env)]
    pub(crate) port: u16,

    /// Path to the computation engine executable
    #[default("./text_trace".to_string())]
    #[arg(short, long, env)]
    pub(crate) engine_path: String,

    /// Seconds an engine invocation may run before it is killed, 0 disables the limit
    #[default(0)]
    #[arg(long, env)]
    pub(crate) engine_timeout_secs: u64,

    /// Directory holding index.html and the front end assets
    #[default("static".to_string())]
    #[arg(long, env)]
    pub(crate) static_dir: String,

    /// Maximum accepted request body size in bytes
    #[default(10_000_000)]
    #[arg(long, env)]
    pub(crate) max_body_bytes: usize,

    /// OTLP collector endpoint, traces and metrics are only exported when set
    #[default(String::new())]
    #[arg(long, env)]
    pub(crate) otel_endpoint: String,

    /// Keep logging to the console while exporting to a collector
    #[default(false)]
    #[arg(long, env)]
    pub(crate) console_log: bool,
}

impl Config {
    pub fn from_toml(path: &str) -> Result<Self> {
        let str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {path}"))?;
        let opt: <Config as ClapSerde>::Opt = toml::from_str(&str)
            .with_context(|| format!("Failed to parse configuration file {path}"))?;
        Ok(Config::default().merge(opt))
    }

    pub(crate) fn engine_path(&self) -> PathBuf {
        PathBuf::from(&self.engine_path)
    }

    pub(crate) fn engine_timeout(&self) -> Option<Duration> {
        match self.engine_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub(crate) fn static_dir(&self) -> PathBuf {
        PathBuf::from(&self.static_dir)
    }

    pub(crate) fn otel_endpoint(&self) -> Option<&str> {
        Some(self.otel_endpoint.as_str()).filter(|endpoint| !endpoint.is_empty())
    }
}
