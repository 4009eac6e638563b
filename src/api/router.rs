use axum::{
  routing::get,
  http::StatusCode,
  Json, Router,
};
use http::HeaderValue;
use serde_json::json;
use tower_http::{
  compression::CompressionLayer,
  cors::{AllowHeaders, AllowMethods, CorsLayer},
  trace::TraceLayer,
};

use crate::{
  config::Config,
  error::AppError,
  market::{routes::market_routes, service::MarketService},
};

pub async fn create_router(config: &Config, market_service: MarketService) -> Result<Router, AppError> {
  // Setup CORS
  let cors = cors_layer(config)?;

  // Build the router
  let app = Router::new()
      .route("/", get(root))
      .nest("/api/market-data", market_routes(market_service))
      .layer(TraceLayer::new_for_http())
      .layer(CompressionLayer::new())
      .layer(cors);

  Ok(app)
}

fn cors_layer(config: &Config) -> Result<CorsLayer, AppError> {
  let origin = HeaderValue::from_str(&config.frontend_origin)
      .map_err(|_| AppError::ConfigError(format!("Invalid FRONTEND_ORIGIN: {}", config.frontend_origin)))?;

  // Wildcards are rejected alongside credentials, so mirror the preflight instead.
  Ok(CorsLayer::new()
      .allow_origin(origin)
      .allow_methods(AllowMethods::mirror_request())
      .allow_headers(AllowHeaders::mirror_request())
      .allow_credentials(true))
}

async fn root() -> (StatusCode, Json<serde_json::Value>) {
  (
      StatusCode::OK,
      Json(json!({
          "status": "ok",
          "message": "Backtesting API is running"
      })),
  )
}
