//! Momentum indicators.

use hase_core::{IndicatorError, StreamingIndicator};
use serde::{Deserialize, Serialize};

use crate::check_period;
use crate::moving_average::Sma;
use crate::rolling::{RollingMax, RollingMin};

/// Guard added to the stochastic denominator so a flat RSI window yields 0
/// instead of a division by zero.
pub const STOCH_EPSILON: f64 = 1e-9;

/// Relative Strength Index (RSI) with Wilder's smoothing.
///
/// Average gain and loss are seeded with the simple mean of the first
/// `period` price changes, then smoothed with
/// `avg = (prev_avg * (period - 1) + value) / period`.
///
/// Degenerate averages do not divide by zero: zero average loss gives 100,
/// and zero average gain *and* loss (a flat market) gives the neutral 50.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    prev_price: Option<f64>,
    changes: usize,
    avg_gain: f64,
    avg_loss: f64,
    current: Option<f64>,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        check_period("RSI", period)?;
        Ok(Self {
            period,
            prev_price: None,
            changes: 0,
            avg_gain: 0.0,
            avg_loss: 0.0,
            current: None,
        })
    }

    fn from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            if avg_gain == 0.0 {
                50.0
            } else {
                100.0
            }
        } else {
            100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
        }
    }

    /// Smoothed average gain, once ready.
    pub fn avg_gain(&self) -> Option<f64> {
        self.current.map(|_| self.avg_gain)
    }

    /// Smoothed average loss, once ready.
    pub fn avg_loss(&self) -> Option<f64> {
        self.current.map(|_| self.avg_loss)
    }
}

impl StreamingIndicator for Rsi {
    type Output = f64;

    fn update(&mut self, price: f64) -> Option<f64> {
        let Some(prev) = self.prev_price.replace(price) else {
            return None;
        };

        let change = price - prev;
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);
        let period = self.period as f64;

        self.changes += 1;
        if self.changes <= self.period {
            // Accumulate the simple-average seed.
            self.avg_gain += gain / period;
            self.avg_loss += loss / period;
            if self.changes < self.period {
                return None;
            }
        } else {
            self.avg_gain = (self.avg_gain * (period - 1.0) + gain) / period;
            self.avg_loss = (self.avg_loss * (period - 1.0) + loss) / period;
        }

        self.current = Some(Self::from_averages(self.avg_gain, self.avg_loss));
        self.current
    }

    fn current(&self) -> Option<f64> {
        self.current
    }

    fn reset(&mut self) {
        self.prev_price = None;
        self.changes = 0;
        self.avg_gain = 0.0;
        self.avg_loss = 0.0;
        self.current = None;
    }

    /// Prices needed before the first reading (period changes + 1).
    fn period(&self) -> usize {
        self.period + 1
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// One bar of Stochastic RSI output. Each stage is `None` until it and
/// everything upstream of it are ready.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StochRsiOutput {
    /// Raw normalized RSI in [0, 1)
    pub stoch_rsi: Option<f64>,
    /// %K: SMA of the raw value
    pub k: Option<f64>,
    /// %D: SMA of %K
    pub d: Option<f64>,
}

/// Stochastic RSI composite.
///
/// Consumes an RSI series and normalizes each reading against the highest
/// and lowest RSI over the last `period` readings:
///
/// `stoch_rsi = (rsi - low) / (high - low + 1e-9)`
///
/// then smooths twice: `%K = SMA(stoch_rsi, smooth_k)` and
/// `%D = SMA(%K, smooth_d)`.
#[derive(Debug, Clone)]
pub struct StochRsi {
    highest: RollingMax,
    lowest: RollingMin,
    k: Sma,
    d: Sma,
    current: StochRsiOutput,
}

impl StochRsi {
    /// Create a new composite from the normalization window and the two
    /// smoothing periods.
    pub fn new(period: usize, smooth_k: usize, smooth_d: usize) -> Result<Self, IndicatorError> {
        Ok(Self {
            highest: RollingMax::new(period)?,
            lowest: RollingMin::new(period)?,
            k: Sma::new(smooth_k)?,
            d: Sma::new(smooth_d)?,
            current: StochRsiOutput::default(),
        })
    }

    /// Feed the next RSI reading.
    pub fn update(&mut self, rsi: f64) -> StochRsiOutput {
        let high = self.highest.update(rsi);
        let low = self.lowest.update(rsi);

        let stoch_rsi = match (high, low) {
            (Some(high), Some(low)) => Some((rsi - low) / (high - low + STOCH_EPSILON)),
            _ => None,
        };
        let k = stoch_rsi.and_then(|value| self.k.update(value));
        let d = k.and_then(|value| self.d.update(value));

        self.current = StochRsiOutput { stoch_rsi, k, d };
        self.current
    }

    /// Most recent output.
    pub fn current(&self) -> StochRsiOutput {
        self.current
    }

    /// Check if both %K and %D are available.
    pub fn is_ready(&self) -> bool {
        self.current.k.is_some() && self.current.d.is_some()
    }

    /// RSI readings needed before %D is first available.
    pub fn warmup(&self) -> usize {
        self.highest.period() + self.k.period() + self.d.period() - 2
    }

    /// Reset all stages.
    pub fn reset(&mut self) {
        self.highest.reset();
        self.lowest.reset();
        self.k.reset();
        self.d.reset();
        self.current = StochRsiOutput::default();
    }
}
