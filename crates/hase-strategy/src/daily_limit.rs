//! Per-day cap on entry intents.

use chrono::NaiveDate;

/// Counts entries per UTC calendar day and resets when the day changes.
#[derive(Debug, Clone, Default)]
pub struct DailyTradeLimit {
    limit: Option<u32>,
    day: Option<NaiveDate>,
    count: u32,
}

impl DailyTradeLimit {
    pub fn new(limit: Option<u32>) -> Self {
        Self {
            limit,
            day: None,
            count: 0,
        }
    }

    /// Check if another entry is allowed on `day`.
    pub fn allows(&self, day: NaiveDate) -> bool {
        match self.limit {
            None => true,
            Some(limit) => self.count_on(day) < limit,
        }
    }

    /// Record an entry on `day`.
    pub fn record(&mut self, day: NaiveDate) {
        if self.day != Some(day) {
            self.day = Some(day);
            self.count = 0;
        }
        self.count += 1;
    }

    /// Entries recorded on `day`.
    pub fn count_on(&self, day: NaiveDate) -> u32 {
        if self.day == Some(day) {
            self.count
        } else {
            0
        }
    }
}
