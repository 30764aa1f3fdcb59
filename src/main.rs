mod classifier;
mod client;
mod config;
mod constants;
mod error;
mod formatters;
mod http;
mod mcp;
mod models;
mod photos;
mod service;

use anyhow::Result;
use clap::Parser;
use rmcp::ServiceExt;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::client::ForecastClient;
use crate::config::{Cli, Command, ProviderConfig};
use crate::mcp::WeatherTools;
use crate::photos::PhotoClient;
use crate::service::WeatherService;

fn build_service(provider: &ProviderConfig) -> Result<WeatherService> {
    let forecasts = ForecastClient::new(
        provider.accuweather_base_url.as_str(),
        provider.require_api_key()?,
        provider.language.as_str(),
    )?;

    let photos = match provider.photo_access_key() {
        Some(key) => Some(PhotoClient::new(provider.unsplash_base_url.as_str(), key)?),
        None => {
            tracing::info!("UNSPLASH_ACCESS_KEY not set, city photos disabled");
            None
        }
    };

    Ok(WeatherService::new(forecasts, photos))
}

async fn run_http(service: WeatherService, bind: SocketAddr) -> Result<()> {
    let app = http::create_router(service);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("HTTP API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Could not listen for shutdown signal: {}", e);
            }
        })
        .await?;
    Ok(())
}

async fn run_mcp(service: WeatherService) -> Result<()> {
    tracing::info!("Starting MCP weather server");

    let server = WeatherTools::new(service)
        .serve(rmcp::transport::stdio())
        .await?;
    server.waiting().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_verdict=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let service = build_service(&cli.provider)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => run_http(service, cli.bind).await?,
        Command::Mcp => run_mcp(service).await?,
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}
