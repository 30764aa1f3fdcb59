use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;

use crate::constants::{ACCUWEATHER_API_BASE, DEFAULT_BIND_ADDR, DEFAULT_LANGUAGE, UNSPLASH_API_BASE};

#[derive(Debug, Parser)]
#[command(name = "weather-verdict")]
#[command(about = "City forecasts classified as good or bad weather")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub provider: ProviderConfig,

    /// Address the HTTP API listens on
    #[arg(long, env = "WEATHER_BIND", default_value = DEFAULT_BIND_ADDR, global = true)]
    pub bind: SocketAddr,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API (default)
    Serve,

    /// Run as an MCP server over stdio
    Mcp,
}

/// Upstream provider settings, read from flags or the environment
#[derive(Debug, Clone, Args)]
pub struct ProviderConfig {
    /// AccuWeather API key
    #[arg(long, env = "ACCUWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Language tag for provider responses
    #[arg(long, env = "WEATHER_LANGUAGE", default_value = DEFAULT_LANGUAGE)]
    pub language: String,

    #[arg(long, env = "ACCUWEATHER_BASE_URL", default_value = ACCUWEATHER_API_BASE)]
    pub accuweather_base_url: String,

    /// Unsplash access key; city photos are skipped without it
    #[arg(long, env = "UNSPLASH_ACCESS_KEY", hide_env_values = true)]
    pub unsplash_access_key: Option<String>,

    #[arg(long, env = "UNSPLASH_BASE_URL", default_value = UNSPLASH_API_BASE)]
    pub unsplash_base_url: String,
}

impl ProviderConfig {
    /// The AccuWeather key, which every forecast needs
    pub fn require_api_key(&self) -> Result<&str> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => bail!("ACCUWEATHER_API_KEY is not set (environment or .env file)"),
        }
    }

    pub fn photo_access_key(&self) -> Option<&str> {
        self.unsplash_access_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_is_an_error() {
        let cli = Cli::parse_from(["weather-verdict", "--api-key", "  ", "mcp"]);
        let err = cli.provider.require_api_key().unwrap_err();
        assert!(err.to_string().contains("ACCUWEATHER_API_KEY"));
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "weather-verdict",
            "--api-key",
            "secret",
            "--language",
            "en-us",
            "serve",
            "--bind",
            "0.0.0.0:9000",
        ]);

        assert_eq!(cli.provider.require_api_key().unwrap(), "secret");
        assert_eq!(cli.provider.language, "en-us");
        assert_eq!(cli.bind.port(), 9000);
        assert!(matches!(cli.command, Some(Command::Serve)));
    }

    #[test]
    fn test_blank_photo_key_disables_photos() {
        let cli = Cli::parse_from(["weather-verdict", "--unsplash-access-key", ""]);
        assert!(cli.provider.photo_access_key().is_none());
        assert!(cli.command.is_none());
    }
}
