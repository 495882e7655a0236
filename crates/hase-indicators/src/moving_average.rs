//! Moving average indicators.

use hase_core::{IndicatorError, StreamingIndicator};

use crate::check_period;
use crate::rolling::RollingSum;

/// Simple Moving Average (SMA).
///
/// Calculates the arithmetic mean of the last N values.
#[derive(Debug, Clone)]
pub struct Sma {
    sum: RollingSum,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        check_period("SMA", period)?;
        Ok(Self {
            sum: RollingSum::new(period)?,
        })
    }
}

impl StreamingIndicator for Sma {
    type Output = f64;

    fn update(&mut self, value: f64) -> Option<f64> {
        let period = self.sum.period() as f64;
        self.sum.push(value).map(|sum| sum / period)
    }

    fn current(&self) -> Option<f64> {
        let period = self.sum.period() as f64;
        self.sum.current().map(|sum| sum / period)
    }

    fn reset(&mut self) {
        self.sum.reset();
    }

    fn period(&self) -> usize {
        self.sum.period()
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// Exponential Moving Average (EMA).
///
/// Gives more weight to recent prices using an exponential decay with
/// `alpha = 2 / (span + 1)`.
///
/// Behaviour:
///   bar 0  → value = price (first observation, no SMA seed)
///   bar 1+ → value = alpha·price + (1 − alpha)·prev
///
/// The EMA produces a value from the very first input. `is_warm()` reports
/// whether `span` inputs have been seen, for callers that want to know how
/// much history stands behind the number.
#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    alpha: f64,
    current: Option<f64>,
    count: usize,
}

impl Ema {
    /// Create a new EMA with the specified span.
    pub fn new(span: usize) -> Result<Self, IndicatorError> {
        check_period("EMA", span)?;
        Ok(Self {
            span,
            alpha: 2.0 / (span as f64 + 1.0),
            current: None,
            count: 0,
        })
    }

    /// Smoothing factor applied to each new value.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Configured span.
    pub fn span(&self) -> usize {
        self.span
    }

    /// Check if at least `span` values have been seen.
    pub fn is_warm(&self) -> bool {
        self.count >= self.span
    }
}

impl StreamingIndicator for Ema {
    type Output = f64;

    fn update(&mut self, value: f64) -> Option<f64> {
        let next = match self.current {
            None => value,
            Some(prev) => self.alpha * value + (1.0 - self.alpha) * prev,
        };
        self.current = Some(next);
        self.count += 1;
        self.current
    }

    fn current(&self) -> Option<f64> {
        self.current
    }

    fn reset(&mut self) {
        self.current = None;
        self.count = 0;
    }

    fn period(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        "EMA"
    }
}
