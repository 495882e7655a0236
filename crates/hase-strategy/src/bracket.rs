//! Stop-loss and take-profit pricing for bracket entries.

use hase_core::Direction;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::StrategyConfig;

/// Fixed-percent bracket around an entry price.
///
/// Long: stop below entry, limit above. Short: the mirror.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BracketPricer {
    take_profit: f64,
    stop_loss: f64,
    precision: Option<u32>,
}

impl BracketPricer {
    /// Create a pricer from take-profit and stop-loss fractions and an
    /// optional number of decimal places to round to.
    pub fn new(take_profit: f64, stop_loss: f64, precision: Option<u32>) -> Self {
        Self {
            take_profit,
            stop_loss,
            precision,
        }
    }

    pub fn from_config(config: &StrategyConfig) -> Self {
        Self::new(config.take_profit, config.stop_loss, config.price_precision)
    }

    /// Stop-loss trigger for an entry at `entry_price`.
    pub fn stop_price(&self, direction: Direction, entry_price: f64) -> f64 {
        let price = match direction {
            Direction::Long => entry_price * (1.0 - self.stop_loss),
            Direction::Short => entry_price * (1.0 + self.stop_loss),
        };
        self.round(price)
    }

    /// Take-profit limit for an entry at `entry_price`.
    pub fn limit_price(&self, direction: Direction, entry_price: f64) -> f64 {
        let price = match direction {
            Direction::Long => entry_price * (1.0 + self.take_profit),
            Direction::Short => entry_price * (1.0 - self.take_profit),
        };
        self.round(price)
    }

    fn round(&self, price: f64) -> f64 {
        let Some(dp) = self.precision else {
            return price;
        };
        Decimal::from_f64(price)
            .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|d| d.to_f64())
            .unwrap_or(price)
    }
}

impl Default for BracketPricer {
    fn default() -> Self {
        Self::from_config(&StrategyConfig::default())
    }
}
