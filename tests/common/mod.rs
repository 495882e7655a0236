#![allow(dead_code)]

use hase::{Bar, BracketOrderIntent, Pipeline, PipelineResult};

/// 2024-01-01T00:00:00Z
pub const START_MS: i64 = 1_704_067_200_000;
pub const MINUTE_MS: i64 = 60_000;
pub const HOUR_MS: i64 = 3_600_000;

/// Bar with a one-point range around `close`.
pub fn bar(timestamp: i64, close: f64) -> Bar {
    Bar::new(timestamp, close, close + 1.0, close - 1.0, close, 1_000.0)
}

pub fn bars(closes: &[f64], spacing_ms: i64) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| bar(START_MS + i as i64 * spacing_ms, close))
        .collect()
}

fn walk(closes: &mut Vec<f64>, steps: usize, delta: f64) {
    for _ in 0..steps {
        let last = closes.last().copied().unwrap_or(100.0);
        closes.push(last + delta);
    }
}

/// 205 closes rising one point per bar from 100, a three-bar dip of two
/// points each, then rising again up to 220 bars. The long entry fires on
/// bar 208 at close 299.
pub fn rising_with_dip() -> Vec<f64> {
    let mut closes = vec![100.0];
    walk(&mut closes, 204, 1.0);
    walk(&mut closes, 3, -2.0);
    walk(&mut closes, 12, 1.0);
    closes
}

/// Mirror image: falling from 400, a three-bar bounce, then falling again.
/// The short entry fires on bar 209 at close 200.
pub fn falling_with_bounce() -> Vec<f64> {
    let mut closes = vec![400.0];
    walk(&mut closes, 204, -1.0);
    walk(&mut closes, 3, 2.0);
    walk(&mut closes, 12, -1.0);
    closes
}

/// Two dips: long signals on bar 208 (close 299) and bar 237 (close 319).
pub fn rising_with_two_dips() -> Vec<f64> {
    let mut closes = vec![100.0];
    walk(&mut closes, 204, 1.0);
    walk(&mut closes, 3, -2.0);
    walk(&mut closes, 25, 1.0);
    walk(&mut closes, 3, -2.0);
    walk(&mut closes, 8, 1.0);
    closes
}

/// Feed every bar, collecting `(bar index, intent)` pairs.
pub fn run(
    pipeline: &mut Pipeline,
    bars: &[Bar],
) -> PipelineResult<Vec<(usize, BracketOrderIntent)>> {
    let mut intents = Vec::new();
    for (i, bar) in bars.iter().enumerate() {
        if let Some(intent) = pipeline.on_bar(bar)? {
            intents.push((i, intent));
        }
    }
    Ok(intents)
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9 * b.abs().max(1.0)
}
