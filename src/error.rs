use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;
use thiserror::Error;

use crate::market::error::MarketDataError;

#[derive(Error, Debug)]
pub enum AppError {
  #[error("Validation error: {0}")]
  ValidationError(String),

  #[error("Config error: {0}")]
  ConfigError(String),

  #[error("Not found: {0}")]
  NotFoundError(String),

  #[error("Internal server error: {0}")]
  InternalError(String),
}

impl From<MarketDataError> for AppError {
  fn from(err: MarketDataError) -> Self {
      match err {
          MarketDataError::NotFound(_) => Self::NotFoundError(err.to_string()),
          MarketDataError::Provider(message) => Self::InternalError(message),
      }
  }
}

impl AppError {
  pub fn status(&self) -> StatusCode {
      match self {
          AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
          AppError::NotFoundError(_) => StatusCode::NOT_FOUND,
          AppError::ConfigError(_) | AppError::InternalError(_) => {
              StatusCode::INTERNAL_SERVER_ERROR
          }
      }
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
      let status = self.status();

      // The detail carries the bare message, clients match on it.
      let detail = match self {
          AppError::ValidationError(msg)
          | AppError::NotFoundError(msg)
          | AppError::InternalError(msg) => msg,
          AppError::ConfigError(_) => "A configuration error occurred".to_string(),
      };

      (status, Json(json!({ "detail": detail }))).into_response()
  }
}
