//! Heikin-Ashi synthetic candles.

use hase_core::{Bar, HeikinAshiBar};

/// Heikin-Ashi transform.
///
/// `close = (open + high + low + close) / 4`
/// `open  = (prev_open + prev_close) / 2`, or the raw open on the first bar
/// `high  = max(high, open, close)` and `low = min(low, open, close)`
///
/// The only state is the previous synthetic open and close.
#[derive(Debug, Clone, Default)]
pub struct HeikinAshi {
    prev: Option<(f64, f64)>,
}

impl HeikinAshi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the synthetic candle for `bar`.
    pub fn update(&mut self, bar: &Bar) -> HeikinAshiBar {
        let close = bar.ohlc4();
        let open = match self.prev {
            Some((prev_open, prev_close)) => (prev_open + prev_close) / 2.0,
            None => bar.open,
        };
        let high = bar.high.max(open).max(close);
        let low = bar.low.min(open).min(close);

        self.prev = Some((open, close));

        HeikinAshiBar {
            timestamp: bar.timestamp,
            open,
            high,
            low,
            close,
        }
    }

    pub fn reset(&mut self) {
        self.prev = None;
    }
}
