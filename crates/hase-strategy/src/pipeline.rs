//! Per-bar driver wiring indicators, evaluator and state machine together.

use std::collections::VecDeque;

use hase_core::{
    Bar, BracketOrderIntent, ClosedTrade, ExecutionEvent, MalformedBarError, PipelineError,
    PipelineResult, Position, StreamingIndicator,
};
use hase_indicators::{CrossOver, Ema, HeikinAshi, Rsi, StochRsi, StochRsiOutput};
use tracing::{debug, error, info, warn};

use crate::bracket::BracketPricer;
use crate::config::{PriceSource, StrategyConfig};
use crate::daily_limit::DailyTradeLimit;
use crate::signal::{EntryDecision, SignalEvaluator, SignalInputs};
use crate::snapshot::{BarSnapshot, PipelineState};
use crate::state_machine::PositionStateMachine;

/// Bar-by-bar signal pipeline for one instrument.
///
/// Every indicator, the evaluator and the position state machine are owned
/// here and updated in a fixed order on each [`Pipeline::on_bar`] call.
/// Readings for a bar depend only on that bar and the ones before it.
///
/// A rejected bar leaves every indicator untouched. Execution feedback that
/// does not match the live intent halts the pipeline; from then on every call
/// returns [`PipelineError::Halted`].
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: StrategyConfig,
    heikin_ashi: HeikinAshi,
    ema: Ema,
    rsi: Rsi,
    stoch: StochRsi,
    /// %K crossing %D, for longs
    long_cross: CrossOver,
    /// %D crossing %K, for shorts
    short_cross: CrossOver,
    evaluator: SignalEvaluator,
    machine: PositionStateMachine,
    daily_limit: DailyTradeLimit,
    pending_events: VecDeque<ExecutionEvent>,
    closed_trades: Vec<ClosedTrade>,
    last_timestamp: Option<i64>,
    last_snapshot: Option<BarSnapshot>,
    bars_processed: u64,
    halted: bool,
}

impl Pipeline {
    /// Build a pipeline, validating the configuration first.
    pub fn new(config: StrategyConfig) -> PipelineResult<Self> {
        config.validate()?;

        Ok(Self {
            heikin_ashi: HeikinAshi::new(),
            ema: Ema::new(config.ema_period)?,
            rsi: Rsi::new(config.rsi_period)?,
            stoch: StochRsi::new(
                config.stoch_rsi_period,
                config.stoch_smooth_k,
                config.stoch_smooth_d,
            )?,
            long_cross: CrossOver::new(),
            short_cross: CrossOver::new(),
            evaluator: SignalEvaluator::from_config(&config),
            machine: PositionStateMachine::new(BracketPricer::from_config(&config)),
            daily_limit: DailyTradeLimit::new(config.max_daily_trades),
            pending_events: VecDeque::new(),
            closed_trades: Vec::new(),
            last_timestamp: None,
            last_snapshot: None,
            bars_processed: 0,
            halted: false,
            config,
        })
    }

    /// Process the next bar. Returns the bracket intent emitted on it, if any.
    pub fn on_bar(&mut self, bar: &Bar) -> PipelineResult<Option<BracketOrderIntent>> {
        if self.halted {
            return Err(PipelineError::Halted);
        }

        if let Err(err) = self.check_bar(bar) {
            warn!(timestamp = bar.timestamp, error = %err, "Rejected bar");
            return Err(err.into());
        }

        while let Some(event) = self.pending_events.pop_front() {
            self.apply_event(event)?;
        }

        self.last_timestamp = Some(bar.timestamp);
        self.bars_processed += 1;

        let heikin_ashi = self.heikin_ashi.update(bar);
        let price = match self.config.price_source {
            PriceSource::Close => bar.close,
            PriceSource::HeikinAshi => heikin_ashi.close,
        };

        let was_ready = self.stoch.is_ready();
        let ema = self.ema.update(price);
        let rsi = self.rsi.update(price);
        let stoch = match rsi {
            Some(value) => self.stoch.update(value),
            None => StochRsiOutput::default(),
        };
        if !was_ready && self.stoch.is_ready() {
            debug!(
                bars = self.bars_processed,
                warmup = self.stoch.warmup(),
                avg_gain = ?self.rsi.avg_gain(),
                avg_loss = ?self.rsi.avg_loss(),
                ema_warm = self.ema.is_warm(),
                "Stochastic RSI ready"
            );
        }

        let long_cross = self.long_cross.update(stoch.k, stoch.d);
        let short_cross = self.short_cross.update(stoch.d, stoch.k);

        let decision = self.evaluator.evaluate(&SignalInputs {
            close: price,
            ema,
            k: stoch.k,
            d: stoch.d,
            long_cross,
            short_cross,
        });

        let intent = self.enter(decision, bar);

        self.last_snapshot = Some(BarSnapshot {
            bar: *bar,
            heikin_ashi,
            ema,
            rsi,
            stoch_rsi: stoch.stoch_rsi,
            k: stoch.k,
            d: stoch.d,
            long_cross,
            short_cross,
            decision,
            intent,
            position: self.machine.position().status,
        });

        Ok(intent)
    }

    /// Apply execution feedback right away.
    ///
    /// Feedback that does not fit the live intent halts the pipeline.
    pub fn apply_event(&mut self, event: ExecutionEvent) -> PipelineResult<Option<ClosedTrade>> {
        if self.halted {
            return Err(PipelineError::Halted);
        }

        match self.machine.apply(&event) {
            Ok(trade) => {
                if let Some(trade) = trade {
                    self.closed_trades.push(trade);
                }
                Ok(trade)
            }
            Err(err) => {
                self.halted = true;
                self.pending_events.clear();
                error!(?event, error = %err, "Inconsistent execution feedback, halting");
                Err(err.into())
            }
        }
    }

    /// Queue execution feedback for the start of the next bar.
    pub fn enqueue_event(&mut self, event: ExecutionEvent) -> PipelineResult<()> {
        if self.halted {
            return Err(PipelineError::Halted);
        }
        self.pending_events.push_back(event);
        Ok(())
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    pub fn position(&self) -> &Position {
        self.machine.position()
    }

    /// Readings from the most recent accepted bar.
    pub fn last_snapshot(&self) -> Option<&BarSnapshot> {
        self.last_snapshot.as_ref()
    }

    /// Trades closed so far, oldest first.
    pub fn closed_trades(&self) -> &[ClosedTrade] {
        &self.closed_trades
    }

    /// Hand over the trades closed since the last call.
    ///
    /// The `trades_closed` counter in [`PipelineState`] is not reset.
    pub fn take_closed_trades(&mut self) -> Vec<ClosedTrade> {
        std::mem::take(&mut self.closed_trades)
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn state(&self) -> PipelineState {
        PipelineState {
            bars_processed: self.bars_processed,
            intents_emitted: self.machine.intents_emitted(),
            trades_closed: self.machine.trades_closed(),
            pending_events: self.pending_events.len(),
            ema_warm: self.ema.is_warm(),
            signal_ready: self.stoch.is_ready(),
            halted: self.halted,
            position: *self.machine.position(),
        }
    }

    fn check_bar(&self, bar: &Bar) -> Result<(), MalformedBarError> {
        bar.validate()?;
        match self.last_timestamp {
            Some(previous) if bar.timestamp <= previous => {
                Err(MalformedBarError::NonIncreasingTimestamp {
                    previous,
                    current: bar.timestamp,
                })
            }
            _ => Ok(()),
        }
    }

    fn enter(&mut self, decision: EntryDecision, bar: &Bar) -> Option<BracketOrderIntent> {
        if decision == EntryDecision::None {
            return None;
        }

        // validate() has already proved the timestamp representable.
        let day = bar.utc_date()?;
        if self.machine.is_flat() && !self.daily_limit.allows(day) {
            info!(
                ?decision,
                %day,
                trades = self.daily_limit.count_on(day),
                "Daily trade limit reached, skipping entry"
            );
            return None;
        }

        let intent = self.machine.on_decision(decision, bar.timestamp, bar.close)?;
        self.daily_limit.record(day);
        Some(intent)
    }
}
