use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use backtesting_api::{
    api, config,
    market::{provider::HistoryProvider, service::MarketService, yahoo::YahooProvider},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Load configuration
    let config = config::Config::from_env()?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_log_filter()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Market data provider
    let provider = YahooProvider::new()?;
    info!("Using {} market data provider", provider.id());
    let market_service = MarketService::new(Arc::new(provider))
        .with_timeout(config.provider_timeout);

    // Build our application with routes
    let app = api::router::create_router(&config, market_service).await?;

    // Run our application
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
