//! Strategy parameters.

use hase_core::ConfigError;
use serde::{Deserialize, Serialize};

/// Largest number of decimal places `rust_decimal` can hold.
const MAX_PRICE_PRECISION: u32 = 28;

/// What to do when the long and short conditions hold on the same bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    /// Stand aside
    #[default]
    None,
    /// Take the long entry
    Long,
    /// Take the short entry
    Short,
}

/// Which candle series drives the EMA and RSI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    /// Raw bar close
    #[default]
    Close,
    /// Heikin-Ashi synthetic close
    HeikinAshi,
}

/// Configuration for the EMA / Stochastic RSI bracket strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Trend filter EMA span
    pub ema_period: usize,
    /// Window for the RSI min/max normalization
    pub stoch_rsi_period: usize,
    /// RSI period
    pub rsi_period: usize,
    /// %K smoothing period
    pub stoch_smooth_k: usize,
    /// %D smoothing period
    pub stoch_smooth_d: usize,
    /// Take-profit distance as a fraction of entry
    pub take_profit: f64,
    /// Stop-loss distance as a fraction of entry
    pub stop_loss: f64,
    /// Long entries need %K below this
    pub oversold: f64,
    /// Short entries need %K above this
    pub overbought: f64,
    pub tie_break: TieBreak,
    pub price_source: PriceSource,
    /// Entry intents allowed per UTC day; unlimited when unset
    pub max_daily_trades: Option<u32>,
    /// Decimal places for stop and limit prices; unrounded when unset
    pub price_precision: Option<u32>,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            ema_period: 200,
            stoch_rsi_period: 14,
            rsi_period: 14,
            stoch_smooth_k: 3,
            stoch_smooth_d: 3,
            take_profit: 0.03,
            stop_loss: 0.015,
            oversold: 0.2,
            overbought: 0.8,
            tie_break: TieBreak::None,
            price_source: PriceSource::Close,
            max_daily_trades: None,
            price_precision: None,
        }
    }
}

impl StrategyConfig {
    /// Check every field. A pipeline is never built from a config that fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let periods = [
            ("ema_period", self.ema_period),
            ("stoch_rsi_period", self.stoch_rsi_period),
            ("rsi_period", self.rsi_period),
            ("stoch_smooth_k", self.stoch_smooth_k),
            ("stoch_smooth_d", self.stoch_smooth_d),
        ];
        for (field, period) in periods {
            if period == 0 {
                return Err(ConfigError::invalid(field, "period must be greater than 0"));
            }
        }

        if !self.take_profit.is_finite() || self.take_profit <= 0.0 {
            return Err(ConfigError::invalid(
                "take_profit",
                format!("must be a positive fraction, got {}", self.take_profit),
            ));
        }
        if !self.stop_loss.is_finite() || self.stop_loss <= 0.0 || self.stop_loss >= 1.0 {
            return Err(ConfigError::invalid(
                "stop_loss",
                format!("must be a fraction in (0, 1), got {}", self.stop_loss),
            ));
        }

        if !self.oversold.is_finite() || self.oversold < 0.0 {
            return Err(ConfigError::invalid(
                "oversold",
                format!("must be within [0, 1], got {}", self.oversold),
            ));
        }
        if !self.overbought.is_finite() || self.overbought > 1.0 {
            return Err(ConfigError::invalid(
                "overbought",
                format!("must be within [0, 1], got {}", self.overbought),
            ));
        }
        if self.oversold >= self.overbought {
            return Err(ConfigError::invalid(
                "oversold",
                "must be below overbought",
            ));
        }

        if self.max_daily_trades == Some(0) {
            return Err(ConfigError::invalid(
                "max_daily_trades",
                "must allow at least one trade; leave unset for no limit",
            ));
        }
        if let Some(precision) = self.price_precision {
            if precision > MAX_PRICE_PRECISION {
                return Err(ConfigError::invalid(
                    "price_precision",
                    format!("at most {MAX_PRICE_PRECISION} decimal places, got {precision}"),
                ));
            }
        }

        Ok(())
    }
}
