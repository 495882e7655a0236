//! Fixed-window aggregates over the last N values.

use std::collections::VecDeque;

use hase_core::{IndicatorError, StreamingIndicator};

use crate::check_period;

/// Rolling sum over the last N values.
///
/// Keeps a ring buffer of the raw values and a cached sum that is adjusted
/// by `new - evicted` on every push. The cached sum is rebuilt from the
/// buffer each time the ring wraps so rounding error cannot accumulate
/// across more than one window.
#[derive(Debug, Clone)]
pub struct RollingSum {
    period: usize,
    buffer: Vec<f64>,
    head: usize,
    sum: f64,
}

impl RollingSum {
    /// Create a new rolling sum with the specified window.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        check_period("RollingSum", period)?;
        Ok(Self {
            period,
            buffer: Vec::with_capacity(period),
            head: 0,
            sum: 0.0,
        })
    }

    /// Push a value; returns the sum of the last N values once N have been seen.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        if self.buffer.len() < self.period {
            self.buffer.push(value);
            self.sum += value;
        } else {
            let evicted = std::mem::replace(&mut self.buffer[self.head], value);
            self.head = (self.head + 1) % self.period;
            if self.head == 0 {
                self.sum = self.buffer.iter().sum();
            } else {
                self.sum += value - evicted;
            }
        }
        self.current()
    }

    /// Number of values currently held.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if no values have been pushed.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl StreamingIndicator for RollingSum {
    type Output = f64;

    fn update(&mut self, value: f64) -> Option<f64> {
        self.push(value)
    }

    fn current(&self) -> Option<f64> {
        (self.buffer.len() == self.period).then_some(self.sum)
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.head = 0;
        self.sum = 0.0;
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "RollingSum"
    }
}

/// Monotonic deque shared by the min and max windows.
///
/// Entries are `(sequence, value)`. A new value evicts every entry at the
/// back that it dominates, so the front is always the extremum of the
/// window and each value is pushed and popped at most once.
#[derive(Debug, Clone)]
struct MonotonicWindow {
    period: usize,
    seen: u64,
    deque: VecDeque<(u64, f64)>,
}

impl MonotonicWindow {
    fn new(period: usize) -> Self {
        Self {
            period,
            seen: 0,
            deque: VecDeque::with_capacity(period),
        }
    }

    fn push(&mut self, value: f64, dominates: impl Fn(f64, f64) -> bool) -> Option<f64> {
        let seq = self.seen;
        self.seen += 1;

        while let Some(&(_, back)) = self.deque.back() {
            if dominates(value, back) {
                self.deque.pop_back();
            } else {
                break;
            }
        }
        self.deque.push_back((seq, value));

        // Drop the front once it has slid out of the window.
        let window_start = self.seen.saturating_sub(self.period as u64);
        while let Some(&(front_seq, _)) = self.deque.front() {
            if front_seq < window_start {
                self.deque.pop_front();
            } else {
                break;
            }
        }

        self.current()
    }

    fn current(&self) -> Option<f64> {
        if self.seen < self.period as u64 {
            return None;
        }
        self.deque.front().map(|&(_, value)| value)
    }

    fn reset(&mut self) {
        self.seen = 0;
        self.deque.clear();
    }
}

/// Rolling maximum (Highest) over the last N values.
#[derive(Debug, Clone)]
pub struct RollingMax {
    window: MonotonicWindow,
}

impl RollingMax {
    /// Create a new rolling maximum with the specified window.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        check_period("RollingMax", period)?;
        Ok(Self {
            window: MonotonicWindow::new(period),
        })
    }
}

impl StreamingIndicator for RollingMax {
    type Output = f64;

    fn update(&mut self, value: f64) -> Option<f64> {
        self.window.push(value, |new, old| new >= old)
    }

    fn current(&self) -> Option<f64> {
        self.window.current()
    }

    fn reset(&mut self) {
        self.window.reset();
    }

    fn period(&self) -> usize {
        self.window.period
    }

    fn name(&self) -> &str {
        "RollingMax"
    }
}

/// Rolling minimum (Lowest) over the last N values.
#[derive(Debug, Clone)]
pub struct RollingMin {
    window: MonotonicWindow,
}

impl RollingMin {
    /// Create a new rolling minimum with the specified window.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        check_period("RollingMin", period)?;
        Ok(Self {
            window: MonotonicWindow::new(period),
        })
    }
}

impl StreamingIndicator for RollingMin {
    type Output = f64;

    fn update(&mut self, value: f64) -> Option<f64> {
        self.window.push(value, |new, old| new <= old)
    }

    fn current(&self) -> Option<f64> {
        self.window.current()
    }

    fn reset(&mut self) {
        self.window.reset();
    }

    fn period(&self) -> usize {
        self.window.period
    }

    fn name(&self) -> &str {
        "RollingMin"
    }
}
