use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::market::{
    error::MarketDataError,
    model::{Period, PricePoint},
    provider::HistoryProvider,
};

#[derive(Clone)]
pub struct MarketService {
    provider: Arc<dyn HistoryProvider>,
    timeout: Option<Duration>,
}

impl MarketService {
    pub fn new(provider: Arc<dyn HistoryProvider>) -> Self {
        Self {
            provider,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetches the bar series for `symbol` and reshapes it for charting.
    ///
    /// Rows keep the provider's order. An empty series is reported as
    /// [`MarketDataError::NotFound`].
    pub async fn get_market_data(
        &self,
        symbol: &str,
        period: Period,
    ) -> Result<Vec<PricePoint>, MarketDataError> {
        debug!(provider = self.provider.id(), %symbol, %period, "requesting history");

        let request = self.provider.history(symbol, period);
        let bars = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, request).await.map_err(|_| {
                warn!(%symbol, "provider did not answer within {:?}", limit);
                MarketDataError::Provider(format!(
                    "{} request timed out after {:?}",
                    self.provider.id(),
                    limit
                ))
            })??,
            None => request.await?,
        };

        if bars.is_empty() {
            return Err(MarketDataError::NotFound(symbol.to_string()));
        }

        info!(%symbol, %period, rows = bars.len(), "history fetched");

        Ok(bars.into_iter().map(PricePoint::from).collect())
    }
}
