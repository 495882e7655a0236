//! Streaming technical indicators.
//!
//! Every indicator here is fed one bar at a time and keeps only the state it
//! needs for the next update:
//! - Rolling windows (sum, min, max) over the last N values
//! - Moving averages (SMA, EMA)
//! - Momentum indicators (Wilder RSI, Stochastic RSI composite)
//! - Crossover detection between two series
//! - Heikin-Ashi synthetic candles
//!
//! Nothing reads ahead: the output for bar t depends only on inputs up to t.

pub mod crossover;
pub mod heikin_ashi;
pub mod momentum;
pub mod moving_average;
pub mod rolling;

pub use crossover::{Cross, CrossOver};
pub use heikin_ashi::HeikinAshi;
pub use momentum::{Rsi, StochRsi, StochRsiOutput, STOCH_EPSILON};
pub use moving_average::{Ema, Sma};
pub use rolling::{RollingMax, RollingMin, RollingSum};

use hase_core::IndicatorError;

pub(crate) fn check_period(name: &str, period: usize) -> Result<(), IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidParameter(format!(
            "{name} period must be greater than 0"
        )));
    }
    Ok(())
}
