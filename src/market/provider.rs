use async_trait::async_trait;

use crate::market::{
    error::MarketDataError,
    model::{Bar, Period},
};

/// Source of historical daily bars.
///
/// Implementations return bars in the provider's own order and report an
/// empty series as `Ok(vec![])`; deciding what "no data" means for the API
/// is left to [`MarketService`](crate::market::service::MarketService).
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Short identifier used in logs, e.g. "YAHOO".
    fn id(&self) -> &'static str;

    async fn history(&self, symbol: &str, period: Period) -> Result<Vec<Bar>, MarketDataError>;
}
