//! Error types for the signal pipeline.

use thiserror::Error;

use crate::types::PositionStatus;

/// Top-level pipeline error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("Malformed bar: {0}")]
    MalformedBar(#[from] MalformedBarError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Inconsistent execution feedback: {0}")]
    StateMachine(#[from] StateMachineError),

    #[error("Pipeline halted after inconsistent execution feedback")]
    Halted,
}

/// A bar that cannot be absorbed into indicator state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MalformedBarError {
    #[error("{field} is not finite ({value})")]
    NonFinite { field: &'static str, value: f64 },

    #[error("{field} is negative ({value})")]
    Negative { field: &'static str, value: f64 },

    #[error("high {high} is below low {low}")]
    InvertedRange { high: f64, low: f64 },

    #[error("timestamp {0} is outside the representable range")]
    TimestampOutOfRange(i64),

    #[error("timestamp {current} does not follow previous bar at {previous}")]
    NonIncreasingTimestamp { previous: i64, current: i64 },
}

/// Indicator construction errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Strategy configuration validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// Execution feedback that does not match any intent the pipeline emitted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateMachineError {
    #[error("event refers to intent {received}, live intent is {expected:?}")]
    UnknownIntent { expected: Option<u64>, received: u64 },

    #[error("{event} received while position is {state}")]
    UnexpectedEvent {
        event: &'static str,
        state: PositionStatus,
    },

    #[error("fill for intent {intent_id} reports unusable price {price}")]
    InvalidFillPrice { intent_id: u64, price: f64 },
}

/// Result type alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
