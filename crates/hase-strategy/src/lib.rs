//! Entry signals and the bracket-order lifecycle for a single instrument.
//!
//! [`Pipeline`] is the per-bar driver. It owns every indicator, the
//! [`SignalEvaluator`] and the [`PositionStateMachine`], and turns a stream
//! of bars into at most one [`hase_core::BracketOrderIntent`] per bar.

pub mod bracket;
pub mod config;
pub mod daily_limit;
pub mod pipeline;
pub mod signal;
pub mod snapshot;
pub mod state_machine;

pub use bracket::BracketPricer;
pub use config::{PriceSource, StrategyConfig, TieBreak};
pub use daily_limit::DailyTradeLimit;
pub use pipeline::Pipeline;
pub use signal::{EntryDecision, SignalEvaluator, SignalInputs};
pub use snapshot::{BarSnapshot, PipelineState};
pub use state_machine::PositionStateMachine;
