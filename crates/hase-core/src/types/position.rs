//! Position and closed-trade types.

use serde::{Deserialize, Serialize};

use super::{BracketOrderIntent, Direction, ExitLeg};

/// Side of the live position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    #[default]
    Flat,
    Long,
    Short,
}

impl From<Direction> for PositionSide {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Long => PositionSide::Long,
            Direction::Short => PositionSide::Short,
        }
    }
}

/// Lifecycle status of the live position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionStatus {
    /// No order outstanding, nothing held
    #[default]
    None,
    /// Bracket intent emitted, entry not yet confirmed
    PendingEntry,
    /// Entry filled, stop and limit legs live
    Open,
    /// An exit leg filled
    Closed,
}

impl std::fmt::Display for PositionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PositionStatus::None => write!(f, "none"),
            PositionStatus::PendingEntry => write!(f, "pending_entry"),
            PositionStatus::Open => write!(f, "open"),
            PositionStatus::Closed => write!(f, "closed"),
        }
    }
}

/// The single position tracked by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub side: PositionSide,
    /// Entry price; the reference close while pending, the fill price once open
    pub entry_price: f64,
    pub stop_price: f64,
    pub limit_price: f64,
    pub status: PositionStatus,
    /// Intent that created this position
    pub intent_id: Option<u64>,
}

impl Position {
    /// The empty position.
    pub fn flat() -> Self {
        Self::default()
    }

    /// A position awaiting confirmation of the given intent's entry.
    pub fn pending(intent: &BracketOrderIntent) -> Self {
        Self {
            side: intent.direction.into(),
            entry_price: intent.entry_price,
            stop_price: intent.stop_price,
            limit_price: intent.limit_price,
            status: PositionStatus::PendingEntry,
            intent_id: Some(intent.id),
        }
    }

    /// Check if nothing is held or outstanding.
    pub fn is_flat(&self) -> bool {
        self.status == PositionStatus::None
    }

    /// Check if this is a long position.
    pub fn is_long(&self) -> bool {
        self.side == PositionSide::Long
    }

    /// Check if this is a short position.
    pub fn is_short(&self) -> bool {
        self.side == PositionSide::Short
    }

    /// Direction of the position, if it has one.
    pub fn direction(&self) -> Option<Direction> {
        match self.side {
            PositionSide::Long => Some(Direction::Long),
            PositionSide::Short => Some(Direction::Short),
            PositionSide::Flat => None,
        }
    }
}

/// Record of a position that went through entry and exit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosedTrade {
    pub intent_id: u64,
    pub direction: Direction,
    pub entry_price: f64,
    pub exit_price: f64,
    pub exit_leg: ExitLeg,
    /// Signed return as a fraction of the entry price
    pub return_pct: f64,
}

impl ClosedTrade {
    pub fn new(
        intent_id: u64,
        direction: Direction,
        entry_price: f64,
        exit_price: f64,
        exit_leg: ExitLeg,
    ) -> Self {
        let return_pct = if entry_price != 0.0 {
            direction.sign() * (exit_price - entry_price) / entry_price
        } else {
            0.0
        };

        Self {
            intent_id,
            direction,
            entry_price,
            exit_price,
            exit_leg,
            return_pct,
        }
    }

    /// Check if the trade made money.
    pub fn is_win(&self) -> bool {
        self.return_pct > 0.0
    }
}
