//! Core traits for the signal pipeline.

mod indicator;

pub use indicator::StreamingIndicator;
