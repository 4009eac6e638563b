use axum::{
  extract::{
      rejection::{PathRejection, QueryRejection},
      Path, Query, State,
  },
  Json,
};
use tracing::{error, warn};

use crate::{
  error::AppError,
  market::{
      error::MarketDataError,
      model::{MarketDataQuery, Period, PricePoint},
      service::MarketService,
  },
};

pub async fn get_market_data(
  State(service): State<MarketService>,
  symbol: Result<Path<String>, PathRejection>,
  query: Result<Query<MarketDataQuery>, QueryRejection>,
) -> Result<Json<Vec<PricePoint>>, AppError> {
  let Path(symbol) = symbol.map_err(|e| AppError::ValidationError(e.body_text()))?;
  let Query(query) = query.map_err(|e| AppError::ValidationError(e.body_text()))?;

  let period = match query.period.as_deref() {
      Some(raw) => raw
          .parse::<Period>()
          .map_err(|e| AppError::ValidationError(e.to_string()))?,
      None => Period::default(),
  };

  let points = service
      .get_market_data(&symbol, period)
      .await
      .map_err(|e| {
          match &e {
              MarketDataError::NotFound(_) => warn!(%symbol, %period, "{}", e),
              MarketDataError::Provider(_) => {
                  error!(%symbol, %period, "market data request failed: {}", e)
              }
          }
          AppError::from(e)
      })?;

  Ok(Json(points))
}
