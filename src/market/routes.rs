use axum::{routing::get, Router};

use crate::market::{handler, service::MarketService};

pub fn market_routes(service: MarketService) -> Router {
  Router::new()
      .route("/:symbol", get(handler::get_market_data))
      .with_state(service)
}
