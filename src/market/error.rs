use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// The provider answered with an empty series.
    #[error("No data found for symbol {0}")]
    NotFound(String),

    /// Anything else. Displays as the provider's own message.
    #[error("{0}")]
    Provider(String),
}
