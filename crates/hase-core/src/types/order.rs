//! Bracket order intents and execution feedback.
//!
//! The pipeline never talks to an exchange. It emits a [`BracketOrderIntent`]
//! and learns what happened to it through [`ExecutionEvent`]s sent back by
//! whatever executes the orders.

use serde::{Deserialize, Serialize};

/// Direction of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    /// Get the sign for return calculations (+1 for long, -1 for short).
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Long => 1.0,
            Direction::Short => -1.0,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Long => write!(f, "LONG"),
            Direction::Short => write!(f, "SHORT"),
        }
    }
}

/// Market entry paired with a stop-loss and a take-profit leg.
///
/// Immutable once emitted. Filling either exit leg cancels the other; that
/// one-cancels-other behaviour belongs to the execution side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BracketOrderIntent {
    /// Sequence number, unique within one pipeline run
    pub id: u64,
    /// Timestamp of the bar that produced the intent
    pub timestamp: i64,
    pub direction: Direction,
    /// Reference entry price (close of the signalling bar)
    pub entry_price: f64,
    /// Stop-loss trigger price
    pub stop_price: f64,
    /// Take-profit limit price
    pub limit_price: f64,
}

/// Which exit leg of a bracket filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitLeg {
    StopLoss,
    TakeProfit,
}

impl std::fmt::Display for ExitLeg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExitLeg::StopLoss => write!(f, "STOP_LOSS"),
            ExitLeg::TakeProfit => write!(f, "TAKE_PROFIT"),
        }
    }
}

/// Feedback from the execution side about a previously emitted intent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExecutionEvent {
    /// The entry order filled; both exit legs are now live.
    EntryFilled { intent_id: u64, price: f64 },
    /// The entry order was rejected; no position exists.
    EntryRejected { intent_id: u64 },
    /// One exit leg filled and the other was cancelled.
    ExitFilled {
        intent_id: u64,
        leg: ExitLeg,
        price: f64,
    },
}

impl ExecutionEvent {
    /// Id of the intent this event refers to.
    pub fn intent_id(&self) -> u64 {
        match self {
            ExecutionEvent::EntryFilled { intent_id, .. }
            | ExecutionEvent::EntryRejected { intent_id }
            | ExecutionEvent::ExitFilled { intent_id, .. } => *intent_id,
        }
    }

    /// Reported fill price, for events that carry one.
    pub fn price(&self) -> Option<f64> {
        match self {
            ExecutionEvent::EntryFilled { price, .. } | ExecutionEvent::ExitFilled { price, .. } => {
                Some(*price)
            }
            ExecutionEvent::EntryRejected { .. } => None,
        }
    }

    /// Short label used in logs and errors.
    pub fn label(&self) -> &'static str {
        match self {
            ExecutionEvent::EntryFilled { .. } => "entry fill",
            ExecutionEvent::EntryRejected { .. } => "entry rejection",
            ExecutionEvent::ExitFilled { .. } => "exit fill",
        }
    }
}
