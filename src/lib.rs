//! Incremental Heikin-Ashi / Stochastic RSI / EMA signal pipeline with a
//! single-position bracket order lifecycle.
//!
//! Feed bars into a [`Pipeline`], forward any [`BracketOrderIntent`] it
//! returns to an executor, and report fills back as [`ExecutionEvent`]s.
//!
//! ```no_run
//! use hase::{Bar, Pipeline, StrategyConfig};
//!
//! let mut pipeline = Pipeline::new(StrategyConfig::default())?;
//! let bar = Bar::new(1_700_000_000_000, 100.0, 101.0, 99.5, 100.5, 1_200.0);
//! if let Some(intent) = pipeline.on_bar(&bar)? {
//!     println!("{} at {}", intent.direction, intent.entry_price);
//! }
//! # Ok::<(), hase::PipelineError>(())
//! ```

mod logging;

pub use logging::{setup_from_config, setup_logging};

pub use hase_config as config;
pub use hase_indicators as indicators;
pub use hase_strategy as strategy;

pub use hase_config::{load_config, load_config_str, AppConfig, SettingsError};
pub use hase_core::{
    Bar, BracketOrderIntent, ClosedTrade, ConfigError, Direction, ExecutionEvent, ExitLeg,
    HeikinAshiBar, MalformedBarError, PipelineError, PipelineResult, Position, PositionSide,
    PositionStatus, StateMachineError,
};
pub use hase_strategy::{
    BarSnapshot, EntryDecision, Pipeline, PipelineState, PriceSource, StrategyConfig, TieBreak,
};
