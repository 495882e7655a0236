//! Crossover detection between two series.

use serde::{Deserialize, Serialize};

/// Outcome of comparing two series on consecutive bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cross {
    #[default]
    None,
    /// `a` moved from at-or-below `b` to strictly above it
    Up,
    /// `a` moved from at-or-above `b` to strictly below it
    Down,
}

/// Detects the bar on which series `a` crosses series `b`.
///
/// Needs both series ready on two consecutive bars. A bar where either input
/// is missing clears the remembered pair, so the next ready bar never fires.
/// Each crossing is reported once, on the bar where the relation flips.
#[derive(Debug, Clone, Default)]
pub struct CrossOver {
    prev: Option<(f64, f64)>,
    current: Cross,
}

impl CrossOver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this bar's values of both series.
    pub fn update(&mut self, a: Option<f64>, b: Option<f64>) -> Cross {
        let (Some(a), Some(b)) = (a, b) else {
            self.prev = None;
            self.current = Cross::None;
            return self.current;
        };

        self.current = match self.prev {
            Some((prev_a, prev_b)) if prev_a <= prev_b && a > b => Cross::Up,
            Some((prev_a, prev_b)) if prev_a >= prev_b && a < b => Cross::Down,
            _ => Cross::None,
        };
        self.prev = Some((a, b));
        self.current
    }

    /// Result of the most recent update.
    pub fn current(&self) -> Cross {
        self.current
    }

    pub fn reset(&mut self) {
        self.prev = None;
        self.current = Cross::None;
    }
}
