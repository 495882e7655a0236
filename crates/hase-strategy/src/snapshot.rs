//! Per-bar and cumulative views of the pipeline.

use hase_core::{Bar, BracketOrderIntent, HeikinAshiBar, Position, PositionStatus};
use hase_indicators::Cross;
use serde::{Deserialize, Serialize};

use crate::signal::EntryDecision;

/// Everything the pipeline computed for one accepted bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarSnapshot {
    pub bar: Bar,
    pub heikin_ashi: HeikinAshiBar,
    pub ema: Option<f64>,
    pub rsi: Option<f64>,
    pub stoch_rsi: Option<f64>,
    pub k: Option<f64>,
    pub d: Option<f64>,
    /// %K against %D
    pub long_cross: Cross,
    /// %D against %K
    pub short_cross: Cross,
    pub decision: EntryDecision,
    /// Intent emitted on this bar, if any
    pub intent: Option<BracketOrderIntent>,
    /// Position status after the bar was processed
    pub position: PositionStatus,
}

/// Pipeline state summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipelineState {
    pub bars_processed: u64,
    pub intents_emitted: u64,
    pub trades_closed: u64,
    /// Events waiting for the next bar
    pub pending_events: usize,
    /// EMA has seen at least `ema_period` bars
    pub ema_warm: bool,
    /// %K and %D are both available
    pub signal_ready: bool,
    pub halted: bool,
    pub position: Position,
}
