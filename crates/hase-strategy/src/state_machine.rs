//! Single-position bracket order lifecycle.
//!
//! ```text
//! FLAT --decision--> PENDING_ENTRY --entry fill--> OPEN --exit fill--> CLOSED --> FLAT
//!                          |
//!                          +--rejection--> FLAT
//! ```

use hase_core::{
    BracketOrderIntent, ClosedTrade, ExecutionEvent, Position, PositionStatus, StateMachineError,
};
use tracing::{debug, info, warn};

use crate::bracket::BracketPricer;
use crate::signal::EntryDecision;

/// Owns the single live position and the intent that created it.
///
/// Decisions are acted on only while flat, so at most one intent is ever
/// outstanding. Execution events must refer to that intent and fit the
/// current status; anything else is reported as a [`StateMachineError`]
/// and leaves the position untouched.
#[derive(Debug, Clone)]
pub struct PositionStateMachine {
    pricer: BracketPricer,
    position: Position,
    next_id: u64,
    intents_emitted: u64,
    trades_closed: u64,
}

impl PositionStateMachine {
    pub fn new(pricer: BracketPricer) -> Self {
        Self {
            pricer,
            position: Position::flat(),
            next_id: 1,
            intents_emitted: 0,
            trades_closed: 0,
        }
    }

    /// The live position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Check if no position is held or pending.
    pub fn is_flat(&self) -> bool {
        self.position.is_flat()
    }

    pub fn intents_emitted(&self) -> u64 {
        self.intents_emitted
    }

    pub fn trades_closed(&self) -> u64 {
        self.trades_closed
    }

    /// Act on an entry decision for the bar closing at `close`.
    ///
    /// Returns the new intent when flat; decisions arriving while a position
    /// is pending or open are dropped.
    pub fn on_decision(
        &mut self,
        decision: EntryDecision,
        timestamp: i64,
        close: f64,
    ) -> Option<BracketOrderIntent> {
        let direction = decision.direction()?;

        if !self.is_flat() {
            debug!(
                ?decision,
                status = %self.position.status,
                "Ignoring entry signal while position is live"
            );
            return None;
        }

        let intent = BracketOrderIntent {
            id: self.next_id,
            timestamp,
            direction,
            entry_price: close,
            stop_price: self.pricer.stop_price(direction, close),
            limit_price: self.pricer.limit_price(direction, close),
        };
        self.next_id += 1;
        self.intents_emitted += 1;
        self.position = Position::pending(&intent);

        info!(
            intent_id = intent.id,
            %direction,
            entry = intent.entry_price,
            stop = intent.stop_price,
            limit = intent.limit_price,
            "Bracket order intent emitted"
        );

        Some(intent)
    }

    /// Apply execution feedback. Returns the closed trade when an exit leg
    /// fills.
    pub fn apply(
        &mut self,
        event: &ExecutionEvent,
    ) -> Result<Option<ClosedTrade>, StateMachineError> {
        if self.position.intent_id != Some(event.intent_id()) {
            return Err(StateMachineError::UnknownIntent {
                expected: self.position.intent_id,
                received: event.intent_id(),
            });
        }

        if let Some(price) = event.price() {
            if !price.is_finite() || price < 0.0 {
                return Err(StateMachineError::InvalidFillPrice {
                    intent_id: event.intent_id(),
                    price,
                });
            }
        }

        match (self.position.status, event) {
            (PositionStatus::PendingEntry, ExecutionEvent::EntryFilled { intent_id, price }) => {
                self.position.entry_price = *price;
                self.position.status = PositionStatus::Open;
                info!(intent_id, price, side = ?self.position.side, "Position opened");
                Ok(None)
            }
            (PositionStatus::PendingEntry, ExecutionEvent::EntryRejected { intent_id }) => {
                warn!(intent_id, "Entry rejected, back to flat");
                self.position = Position::flat();
                Ok(None)
            }
            (
                PositionStatus::Open,
                ExecutionEvent::ExitFilled {
                    intent_id,
                    leg,
                    price,
                },
            ) => {
                let Some(direction) = self.position.direction() else {
                    return Err(self.unexpected(event));
                };
                let trade = ClosedTrade::new(
                    *intent_id,
                    direction,
                    self.position.entry_price,
                    *price,
                    *leg,
                );
                self.position = Position::flat();
                self.trades_closed += 1;

                info!(
                    intent_id,
                    %leg,
                    exit = price,
                    return_pct = trade.return_pct,
                    status = %PositionStatus::Closed,
                    "Position closed"
                );
                Ok(Some(trade))
            }
            _ => Err(self.unexpected(event)),
        }
    }

    fn unexpected(&self, event: &ExecutionEvent) -> StateMachineError {
        StateMachineError::UnexpectedEvent {
            event: event.label(),
            state: self.position.status,
        }
    }
}

impl Default for PositionStateMachine {
    fn default() -> Self {
        Self::new(BracketPricer::default())
    }
}
