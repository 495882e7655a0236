//! OHLCV (Open, High, Low, Close, Volume) data types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MalformedBarError;

/// One period of market data as delivered by the upstream feed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Trading volume
    pub volume: f64,
}

impl Bar {
    /// Create a new bar.
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Average of open, high, low and close.
    #[inline]
    pub fn ohlc4(&self) -> f64 {
        (self.open + self.high + self.low + self.close) / 4.0
    }

    /// Get the timestamp as a DateTime, if it is representable.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    /// UTC calendar day the bar belongs to.
    pub fn utc_date(&self) -> Option<NaiveDate> {
        self.datetime().map(|dt| dt.date_naive())
    }

    /// Check the bar's own fields. Ordering against the previous bar is the
    /// caller's concern since a bar carries no history.
    pub fn validate(&self) -> Result<(), MalformedBarError> {
        let fields = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
            ("volume", self.volume),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(MalformedBarError::NonFinite { field, value });
            }
            if value < 0.0 {
                return Err(MalformedBarError::Negative { field, value });
            }
        }

        if self.high < self.low {
            return Err(MalformedBarError::InvertedRange {
                high: self.high,
                low: self.low,
            });
        }

        if self.datetime().is_none() {
            return Err(MalformedBarError::TimestampOutOfRange(self.timestamp));
        }

        Ok(())
    }
}

/// Synthetic smoothed candle derived from a raw bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeikinAshiBar {
    /// Timestamp of the source bar
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl HeikinAshiBar {
    /// Check if the synthetic candle is bullish (close > open).
    #[inline]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Check if the synthetic candle is bearish (close < open).
    #[inline]
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}
