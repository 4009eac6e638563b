use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{debug, warn};
use yahoo_finance_api as yahoo;

use crate::market::{
    error::MarketDataError,
    model::{Bar, Period},
    provider::HistoryProvider,
};

const DAILY_INTERVAL: &str = "1d";

pub struct YahooProvider {
    connector: yahoo::YahooConnector,
}

impl YahooProvider {
    pub fn new() -> Result<Self, MarketDataError> {
        let connector = yahoo::YahooConnector::new().map_err(|e| {
            MarketDataError::Provider(format!("Failed to initialize Yahoo connector: {}", e))
        })?;
        Ok(Self { connector })
    }
}

#[async_trait]
impl HistoryProvider for YahooProvider {
    fn id(&self) -> &'static str {
        "YAHOO"
    }

    async fn history(&self, symbol: &str, period: Period) -> Result<Vec<Bar>, MarketDataError> {
        debug!("Fetching {} history for {} from Yahoo", period, symbol);

        let response = match self
            .connector
            .get_quote_range(symbol, DAILY_INTERVAL, period.as_str())
            .await
        {
            Ok(response) => response,
            Err(e) if is_empty_series(&e) => return Ok(Vec::new()),
            Err(e) => return Err(MarketDataError::Provider(e.to_string())),
        };

        let quotes = match response.quotes() {
            Ok(quotes) => quotes,
            Err(e) if is_empty_series(&e) => return Ok(Vec::new()),
            Err(e) => return Err(MarketDataError::Provider(e.to_string())),
        };

        if quotes.is_empty() {
            return Ok(Vec::new());
        }

        let gmtoffset = response
            .metadata()
            .map_err(|e| MarketDataError::Provider(e.to_string()))?
            .gmtoffset;

        quotes
            .into_iter()
            .map(|quote| to_bar(&quote, i64::from(gmtoffset)))
            .collect()
    }
}

/// Unknown or delisted tickers come back as a chart error with code "Not Found".
fn is_empty_series(err: &yahoo::YahooError) -> bool {
    match err {
        yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult => true,
        yahoo::YahooError::ApiError(msg) => msg.code.as_deref() == Some("Not Found"),
        _ => false,
    }
}

/// Converts a raw Yahoo quote into a daily bar.
///
/// The UTC timestamp is shifted into the exchange's wall clock and truncated
/// to midnight. Prices are rescaled by `adjclose / close` so the series
/// reflects later splits and dividends; volume is left as reported.
fn to_bar(quote: &yahoo::Quote, gmtoffset: i64) -> Result<Bar, MarketDataError> {
    let date = local_date(quote.timestamp as i64, gmtoffset).ok_or_else(|| {
        MarketDataError::Provider(format!("Invalid timestamp: {}", quote.timestamp))
    })?;

    let ratio = if quote.close != 0.0 && quote.adjclose.is_finite() {
        quote.adjclose / quote.close
    } else {
        warn!("Unadjusted bar at {}: close={} adjclose={}", date, quote.close, quote.adjclose);
        1.0
    };

    Ok(Bar {
        date,
        open: quote.open * ratio,
        high: quote.high * ratio,
        low: quote.low * ratio,
        close: quote.close * ratio,
        volume: quote.volume,
    })
}

fn local_date(timestamp: i64, gmtoffset: i64) -> Option<NaiveDateTime> {
    let local = DateTime::<Utc>::from_timestamp(timestamp.checked_add(gmtoffset)?, 0)?.naive_utc();
    local.date().and_hms_opt(0, 0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn quote(timestamp: u64, close: f64, adjclose: f64) -> yahoo::Quote {
        yahoo::Quote {
            timestamp: timestamp as _,
            open: 100.0,
            high: 102.0,
            low: 98.0,
            volume: 1_000_000,
            close,
            adjclose,
        }
    }

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn shifts_into_exchange_day() {
        // 2024-01-02 14:30 UTC is the NYSE open, 09:30 New York time.
        let bar = to_bar(&quote(1_704_205_800, 100.0, 100.0), -5 * 3600).unwrap();
        assert_eq!(bar.date, midnight(2024, 1, 2));
    }

    #[test]
    fn offset_can_cross_midnight() {
        // 2024-01-02 23:00 UTC is already Jan 3rd in Tokyo.
        let bar = to_bar(&quote(1_704_236_400, 100.0, 100.0), 9 * 3600).unwrap();
        assert_eq!(bar.date, midnight(2024, 1, 3));
    }

    #[test]
    fn applies_adjustment_ratio() {
        let bar = to_bar(&quote(1_704_205_800, 100.0, 50.0), 0).unwrap();
        assert_eq!(bar.open, 50.0);
        assert_eq!(bar.high, 51.0);
        assert_eq!(bar.low, 49.0);
        assert_eq!(bar.close, 50.0);
        assert_eq!(bar.volume, 1_000_000);
    }

    #[test]
    fn zero_close_keeps_raw_prices() {
        let bar = to_bar(&quote(1_704_205_800, 0.0, 10.0), 0).unwrap();
        assert_eq!(bar.open, 100.0);
        assert_eq!(bar.close, 0.0);
    }

    #[test]
    fn empty_series_errors_are_recognised() {
        assert!(is_empty_series(&yahoo::YahooError::NoQuotes));
        assert!(is_empty_series(&yahoo::YahooError::NoResult));
    }

    fn api_error(code: &str) -> yahoo::YahooError {
        let msg = serde_json::from_value(serde_json::json!({
            "code": code,
            "description": "No data found, symbol may be delisted"
        }))
        .unwrap();
        yahoo::YahooError::ApiError(msg)
    }

    #[test]
    fn unknown_ticker_is_an_empty_series() {
        assert!(is_empty_series(&api_error("Not Found")));
    }

    #[test]
    fn other_api_errors_are_failures() {
        assert!(!is_empty_series(&api_error("Bad Request")));
    }
}
