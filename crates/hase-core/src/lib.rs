//! Core types and traits for the signal pipeline.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar) and their validation
//! - Bracket order intents and execution feedback events
//! - The single live position and closed-trade records
//! - The streaming indicator trait shared by every scalar indicator

pub mod error;
pub mod traits;
pub mod types;

pub use error::{
    ConfigError, IndicatorError, MalformedBarError, PipelineError, PipelineResult,
    StateMachineError,
};
pub use traits::*;
pub use types::*;
