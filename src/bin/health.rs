//! Container health probe: exits non-zero unless the server's health endpoint answers with success.

use anyhow::{bail, Result};
use clap::Parser;
use reqwest::Url;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL of the health endpoint
    #[arg(env = "HEALTH_URL", default_value = "http://127.0.0.1:10000/health")]
    url: Url,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let response = reqwest::blocking::get(args.url.clone())?;
    if !response.status().is_success() {
        bail!("Health check against {} failed: {}", args.url, response.status());
    }

    Ok(())
}
