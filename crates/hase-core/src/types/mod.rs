//! Core data types for the signal pipeline.

mod bar;
mod order;
mod position;

pub use bar::{Bar, HeikinAshiBar};
pub use order::{BracketOrderIntent, Direction, ExecutionEvent, ExitLeg};
pub use position::{ClosedTrade, Position, PositionSide, PositionStatus};
