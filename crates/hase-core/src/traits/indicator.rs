//! Indicator trait definitions.

/// Streaming indicator that maintains internal state.
///
/// Every scalar stage of the pipeline is fed one value per bar and answers
/// with `None` until it has seen enough history. A `None` is never a reading;
/// callers must not substitute a default for it.
pub trait StreamingIndicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Update the indicator with a new value.
    ///
    /// # Arguments
    /// * `value` - New input value
    ///
    /// # Returns
    /// The current indicator value, or None if not yet ready
    fn update(&mut self, value: f64) -> Option<Self::Output>;

    /// Get the current value without adding new data.
    fn current(&self) -> Option<Self::Output>;

    /// Reset the indicator state.
    fn reset(&mut self);

    /// Check if the indicator has enough data to produce values.
    fn is_ready(&self) -> bool {
        self.current().is_some()
    }

    /// Get the number of inputs required before the first output.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LastOf {
        period: usize,
        seen: usize,
        last: Option<f64>,
    }

    impl StreamingIndicator for LastOf {
        type Output = f64;

        fn update(&mut self, value: f64) -> Option<f64> {
            self.seen += 1;
            if self.seen >= self.period {
                self.last = Some(value);
            }
            self.last
        }

        fn current(&self) -> Option<f64> {
            self.last
        }

        fn reset(&mut self) {
            self.seen = 0;
            self.last = None;
        }

        fn period(&self) -> usize {
            self.period
        }

        fn name(&self) -> &str {
            "last"
        }
    }

    #[test]
    fn test_default_readiness() {
        let mut indicator = LastOf {
            period: 2,
            seen: 0,
            last: None,
        };

        assert!(indicator.update(1.0).is_none());
        assert!(!indicator.is_ready());
        assert_eq!(indicator.update(2.0), Some(2.0));
        assert!(indicator.is_ready());

        indicator.reset();
        assert!(!indicator.is_ready());
    }
}
