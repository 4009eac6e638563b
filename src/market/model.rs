use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One provider row: a daily bar stamped with the exchange's local wall clock.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub date: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// A bar as the charting frontend consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: String,
    /// `date` read as UTC, in epoch milliseconds.
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl From<Bar> for PricePoint {
    fn from(bar: Bar) -> Self {
        Self {
            date: bar.date.format("%Y-%m-%dT%H:%M:%S").to_string(),
            timestamp: bar.date.and_utc().timestamp_millis(),
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MarketDataQuery {
    pub period: Option<String>,
}

/// Lookback window, using the provider's range vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    OneDay,
    FiveDays,
    OneMonth,
    ThreeMonths,
    SixMonths,
    #[default]
    OneYear,
    TwoYears,
    FiveYears,
    TenYears,
    YearToDate,
    Max,
}

impl Period {
    pub const ALL: [Period; 11] = [
        Period::OneDay,
        Period::FiveDays,
        Period::OneMonth,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::OneYear,
        Period::TwoYears,
        Period::FiveYears,
        Period::TenYears,
        Period::YearToDate,
        Period::Max,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::OneDay => "1d",
            Period::FiveDays => "5d",
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
            Period::FiveYears => "5y",
            Period::TenYears => "10y",
            Period::YearToDate => "ytd",
            Period::Max => "max",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPeriod(pub String);

impl fmt::Display for InvalidPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let accepted: Vec<&str> = Period::ALL.iter().map(Period::as_str).collect();
        write!(
            f,
            "Invalid period '{}', must be one of: {}",
            self.0,
            accepted.join(", ")
        )
    }
}

impl FromStr for Period {
    type Err = InvalidPeriod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::ALL
            .iter()
            .copied()
            .find(|period| period.as_str() == s)
            .ok_or_else(|| InvalidPeriod(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bar_on(y: i32, m: u32, d: u32) -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            open: 100.0,
            high: 101.5,
            low: 99.0,
            close: 100.5,
            volume: 1_000_000,
        }
    }

    #[test]
    fn price_point_from_bar() {
        let point = PricePoint::from(bar_on(2024, 1, 2));

        assert_eq!(point.date, "2024-01-02T00:00:00");
        assert_eq!(point.timestamp, 1_704_153_600_000);
        assert_eq!(point.open, 100.0);
        assert_eq!(point.high, 101.5);
        assert_eq!(point.low, 99.0);
        assert_eq!(point.close, 100.5);
        assert_eq!(point.volume, 1_000_000);
    }

    #[test]
    fn timestamp_is_date_in_millis() {
        let mut bar = bar_on(2023, 7, 14);
        bar.date = bar.date + chrono::Duration::hours(9) + chrono::Duration::minutes(30);
        let point = PricePoint::from(bar);

        let parsed = NaiveDateTime::parse_from_str(&point.date, "%Y-%m-%dT%H:%M:%S").unwrap();
        assert_eq!(point.timestamp, parsed.and_utc().timestamp() * 1000);
        assert_eq!(point.date, "2023-07-14T09:30:00");
    }

    #[test]
    fn price_point_json_shape() {
        let value = serde_json::to_value(PricePoint::from(bar_on(2024, 1, 2))).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "date": "2024-01-02T00:00:00",
                "timestamp": 1_704_153_600_000_i64,
                "open": 100.0,
                "high": 101.5,
                "low": 99.0,
                "close": 100.5,
                "volume": 1_000_000
            })
        );
    }

    #[test]
    fn period_defaults_to_one_year() {
        assert_eq!(Period::default(), Period::OneYear);
        assert_eq!(Period::default().as_str(), "1y");
    }

    #[test]
    fn period_parses_provider_vocabulary() {
        for period in Period::ALL {
            assert_eq!(period.as_str().parse::<Period>(), Ok(period));
        }
        assert_eq!("ytd".parse::<Period>(), Ok(Period::YearToDate));
    }

    #[test]
    fn period_rejects_unknown_values() {
        let err = "1week".parse::<Period>().unwrap_err();
        assert_eq!(err, InvalidPeriod("1week".to_string()));
        assert!(err.to_string().starts_with("Invalid period '1week'"));
        assert!(err.to_string().contains("5d, 1mo"));

        assert!("".parse::<Period>().is_err());
        assert!("1Y".parse::<Period>().is_err());
    }
}
