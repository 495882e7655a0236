mod common;

use anyhow::Result;
use common::*;
use hase::{
    Direction, EntryDecision, ExecutionEvent, ExitLeg, Pipeline, PositionStatus, PriceSource,
    StrategyConfig,
};

#[test]
fn long_entry_on_oversold_cross_above_ema() -> Result<()> {
    let mut pipeline = Pipeline::new(StrategyConfig::default())?;
    let intents = run(&mut pipeline, &bars(&rising_with_dip(), MINUTE_MS))?;

    assert_eq!(intents.len(), 1);
    let (index, intent) = intents[0];
    assert_eq!(index, 208);
    assert_eq!(intent.id, 1);
    assert_eq!(intent.direction, Direction::Long);
    assert_eq!(intent.entry_price, 299.0);
    assert!(approx(intent.stop_price, 299.0 * 0.985));
    assert!(approx(intent.limit_price, 299.0 * 1.03));

    let state = pipeline.state();
    assert_eq!(state.bars_processed, 220);
    assert!(state.ema_warm);
    assert_eq!(state.position.status, PositionStatus::PendingEntry);
    Ok(())
}

#[test]
fn short_entry_on_overbought_d_cross_below_ema() -> Result<()> {
    let mut pipeline = Pipeline::new(StrategyConfig::default())?;
    let intents = run(&mut pipeline, &bars(&falling_with_bounce(), MINUTE_MS))?;

    assert_eq!(intents.len(), 1);
    let (index, intent) = intents[0];
    assert_eq!(index, 209);
    assert_eq!(intent.direction, Direction::Short);
    assert_eq!(intent.entry_price, 200.0);
    assert!(approx(intent.stop_price, 200.0 * 1.015));
    assert!(approx(intent.limit_price, 200.0 * 0.97));
    Ok(())
}

#[test]
fn signal_bar_snapshot() -> Result<()> {
    let mut pipeline = Pipeline::new(StrategyConfig::default())?;
    let series = bars(&rising_with_dip(), MINUTE_MS);
    for bar in &series[..=208] {
        pipeline.on_bar(bar)?;
    }

    let snapshot = pipeline.last_snapshot().expect("snapshot after a bar");
    let (k, d, ema) = (snapshot.k.unwrap(), snapshot.d.unwrap(), snapshot.ema.unwrap());
    assert!(k > d);
    assert!(k < 0.2);
    assert!(snapshot.bar.close > ema);
    assert_eq!(snapshot.decision, EntryDecision::EnterLong);
    assert_eq!(snapshot.position, PositionStatus::PendingEntry);
    assert!(snapshot.intent.is_some());
    Ok(())
}

#[test]
fn second_signal_ignored_until_closed() -> Result<()> {
    let series = bars(&rising_with_two_dips(), MINUTE_MS);

    // Entry filled and still open when the second dip recovers.
    let mut pipeline = Pipeline::new(StrategyConfig::default())?;
    let mut intents = Vec::new();
    for (i, bar) in series.iter().enumerate() {
        if let Some(intent) = pipeline.on_bar(bar)? {
            intents.push(intent);
            pipeline.enqueue_event(ExecutionEvent::EntryFilled {
                intent_id: intent.id,
                price: intent.entry_price,
            })?;
        }
        if i == 236 {
            assert_eq!(pipeline.position().status, PositionStatus::Open);
        }
    }
    assert_eq!(intents.len(), 1);
    let snapshot = pipeline.last_snapshot().expect("snapshot");
    assert_eq!(snapshot.position, PositionStatus::Open);

    // Same bars, but the first position closes at its take-profit in between.
    let mut pipeline = Pipeline::new(StrategyConfig::default())?;
    let mut intents = Vec::new();
    for (i, bar) in series.iter().enumerate() {
        if let Some(intent) = pipeline.on_bar(bar)? {
            intents.push(intent);
            pipeline.apply_event(ExecutionEvent::EntryFilled {
                intent_id: intent.id,
                price: intent.entry_price,
            })?;
        }
        if i == 220 {
            let live = *pipeline.position();
            let trade = pipeline
                .apply_event(ExecutionEvent::ExitFilled {
                    intent_id: live.intent_id.expect("live intent"),
                    leg: ExitLeg::TakeProfit,
                    price: live.limit_price,
                })?
                .expect("closed trade");
            assert!(approx(trade.return_pct, 0.03));
            assert!(pipeline.position().is_flat());
        }
    }

    assert_eq!(intents.len(), 2);
    assert_eq!(intents[1].id, 2);
    assert_eq!(intents[1].entry_price, 319.0);
    assert_eq!(pipeline.closed_trades().len(), 1);
    Ok(())
}

#[test]
fn rejected_entry_frees_the_slot() -> Result<()> {
    let mut pipeline = Pipeline::new(StrategyConfig::default())?;
    let mut intents = Vec::new();
    for bar in bars(&rising_with_two_dips(), MINUTE_MS) {
        if let Some(intent) = pipeline.on_bar(&bar)? {
            intents.push(intent);
            pipeline.enqueue_event(ExecutionEvent::EntryRejected {
                intent_id: intent.id,
            })?;
        }
    }

    assert_eq!(intents.len(), 2);
    assert_eq!(pipeline.state().trades_closed, 0);
    Ok(())
}

#[test]
fn daily_trade_limit_by_utc_day() -> Result<()> {
    let config = StrategyConfig {
        max_daily_trades: Some(1),
        ..Default::default()
    };

    let reject_all = |spacing: i64| -> Result<usize> {
        let mut pipeline = Pipeline::new(config.clone())?;
        let mut count = 0;
        for bar in bars(&rising_with_two_dips(), spacing) {
            if let Some(intent) = pipeline.on_bar(&bar)? {
                count += 1;
                pipeline.apply_event(ExecutionEvent::EntryRejected {
                    intent_id: intent.id,
                })?;
            }
        }
        Ok(count)
    };

    // Minute bars: both signals fall on the same day.
    assert_eq!(reject_all(MINUTE_MS)?, 1);
    // Hourly bars: bar 208 is on Jan 9 and bar 237 on Jan 10.
    assert_eq!(reject_all(HOUR_MS)?, 2);
    Ok(())
}

#[test]
fn replay_is_deterministic() -> Result<()> {
    let mut closes = rising_with_two_dips();
    closes.extend(falling_with_bounce().iter().map(|c| c - 50.0));
    let series = bars(&closes, MINUTE_MS);

    let replay = || -> Result<Vec<_>> {
        let mut pipeline = Pipeline::new(StrategyConfig::default())?;
        let mut out = Vec::new();
        for bar in &series {
            if let Some(intent) = pipeline.on_bar(bar)? {
                out.push(intent);
                pipeline.apply_event(ExecutionEvent::EntryRejected {
                    intent_id: intent.id,
                })?;
            }
        }
        Ok(out)
    };

    let first = replay()?;
    let second = replay()?;
    assert!(!first.is_empty());
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.stop_price.to_bits(), b.stop_price.to_bits());
        assert_eq!(a.limit_price.to_bits(), b.limit_price.to_bits());
        assert_eq!(a.entry_price.to_bits(), b.entry_price.to_bits());
    }
    Ok(())
}

#[test]
fn heikin_ashi_price_source() -> Result<()> {
    let config = StrategyConfig {
        price_source: PriceSource::HeikinAshi,
        ..Default::default()
    };
    let mut pipeline = Pipeline::new(config)?;
    pipeline.on_bar(&hase::Bar::new(START_MS, 10.0, 12.0, 9.0, 11.0, 5.0))?;

    let snapshot = pipeline.last_snapshot().expect("snapshot");
    assert_eq!(snapshot.heikin_ashi.close, 10.5);
    // EMA seeds with the first value of the configured series.
    assert_eq!(snapshot.ema, Some(10.5));
    Ok(())
}

#[test]
fn rounded_bracket_prices() -> Result<()> {
    let config = StrategyConfig {
        price_precision: Some(1),
        ..Default::default()
    };
    let mut pipeline = Pipeline::new(config)?;
    let intents = run(&mut pipeline, &bars(&rising_with_dip(), MINUTE_MS))?;

    let (_, intent) = intents[0];
    // 299 * 0.985 = 294.515, 299 * 1.03 = 307.97
    assert!(approx(intent.stop_price, 294.5));
    assert!(approx(intent.limit_price, 308.0));
    Ok(())
}

#[test]
fn state_reports_as_json() -> Result<()> {
    let mut pipeline = Pipeline::new(StrategyConfig::default())?;
    run(&mut pipeline, &bars(&rising_with_dip(), MINUTE_MS))?;

    let json = serde_json::to_value(pipeline.state())?;
    assert_eq!(json["bars_processed"], 220);
    assert_eq!(json["intents_emitted"], 1);
    assert_eq!(json["signal_ready"], true);
    assert_eq!(json["position"]["status"], "pending_entry");
    assert_eq!(json["position"]["side"], "long");
    Ok(())
}
