use anyhow::{Context, Result};
use clap::Parser;
use std::env;

/// Region assumed when the provider reports no location constraint and when
/// `AWS_REGION` is unset.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub endpoint_url: Option<String>,
    pub region: String,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "S3 bucket management tool service")]
pub struct Args {
    /// Host to bind to (overrides BUCKET_MANAGER_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides BUCKET_MANAGER_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Storage endpoint override for self-hosted providers (overrides AWS_ENDPOINT_URL_S3)
    #[arg(long)]
    pub endpoint_url: Option<String>,

    /// Region buckets are created in (overrides AWS_REGION)
    #[arg(long)]
    pub region: Option<String>,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig.
    pub fn from_env_and_args() -> Result<Self> {
        // Parse CLI once
        let args = Args::parse();

        // --- Environment fallback ---
        let env_host = env::var("BUCKET_MANAGER_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = match env::var("BUCKET_MANAGER_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing BUCKET_MANAGER_PORT value `{}`", value))?,
            Err(env::VarError::NotPresent) => 3000,
            Err(err) => return Err(err).context("reading BUCKET_MANAGER_PORT"),
        };
        let env_endpoint = env::var("AWS_ENDPOINT_URL_S3").ok();
        let env_region = env::var("AWS_REGION").unwrap_or_else(|_| DEFAULT_REGION.into());

        // --- Merge ---
        let cfg = Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            endpoint_url: args.endpoint_url.or(env_endpoint),
            region: args.region.unwrap_or(env_region),
        };

        Ok(cfg)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addr_joins_host_and_port() {
        let cfg = AppConfig {
            host: "127.0.0.1".into(),
            port: 9000,
            endpoint_url: None,
            region: DEFAULT_REGION.into(),
        };
        assert_eq!(cfg.addr(), "127.0.0.1:9000");
    }
}
