//! Entry signal evaluation.

use hase_core::Direction;
use hase_indicators::Cross;
use serde::{Deserialize, Serialize};

use crate::config::{StrategyConfig, TieBreak};

/// Outcome of evaluating one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryDecision {
    #[default]
    None,
    EnterLong,
    EnterShort,
}

impl EntryDecision {
    /// Direction of the entry, if any.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            EntryDecision::None => None,
            EntryDecision::EnterLong => Some(Direction::Long),
            EntryDecision::EnterShort => Some(Direction::Short),
        }
    }
}

impl TieBreak {
    /// Decision taken when both entry conditions hold.
    pub fn resolve(&self) -> EntryDecision {
        match self {
            TieBreak::None => EntryDecision::None,
            TieBreak::Long => EntryDecision::EnterLong,
            TieBreak::Short => EntryDecision::EnterShort,
        }
    }
}

/// Indicator readings for one bar. `None` marks an indicator still warming up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalInputs {
    /// Close of the configured price series
    pub close: f64,
    pub ema: Option<f64>,
    pub k: Option<f64>,
    pub d: Option<f64>,
    /// %K crossing %D
    pub long_cross: Cross,
    /// %D crossing %K
    pub short_cross: Cross,
}

/// Combines the EMA trend filter, the %K/%D crosses and the %K thresholds.
///
/// Long: close above EMA, %K crosses above %D, %K below `oversold`.
/// Short: close below EMA, %D crosses above %K, %K above `overbought`.
#[derive(Debug, Clone, Copy)]
pub struct SignalEvaluator {
    oversold: f64,
    overbought: f64,
    tie_break: TieBreak,
}

impl SignalEvaluator {
    pub fn new(oversold: f64, overbought: f64, tie_break: TieBreak) -> Self {
        Self {
            oversold,
            overbought,
            tie_break,
        }
    }

    pub fn from_config(config: &StrategyConfig) -> Self {
        Self::new(config.oversold, config.overbought, config.tie_break)
    }

    /// Evaluate one bar. Unready inputs make both conditions false.
    pub fn evaluate(&self, inputs: &SignalInputs) -> EntryDecision {
        let (Some(ema), Some(k), Some(_)) = (inputs.ema, inputs.k, inputs.d) else {
            return EntryDecision::None;
        };

        let long = inputs.close > ema && inputs.long_cross == Cross::Up && k < self.oversold;
        let short = inputs.close < ema && inputs.short_cross == Cross::Up && k > self.overbought;

        match (long, short) {
            (true, false) => EntryDecision::EnterLong,
            (false, true) => EntryDecision::EnterShort,
            (true, true) => self.tie_break.resolve(),
            (false, false) => EntryDecision::None,
        }
    }
}

impl Default for SignalEvaluator {
    fn default() -> Self {
        Self::from_config(&StrategyConfig::default())
    }
}
