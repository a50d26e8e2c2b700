//! Per-contract position state machine.
//!
//! `transition` advances a `PositionState` by one evaluated step. It applies,
//! in order:
//! 1. entry on a signal while flat, or reversal on an opposing signal when
//!    the strategy allows it (close and reopen at the same price);
//! 2. trailing-target maintenance on the open position, then a forced exit
//!    when the target has crossed the entry or a booked exit when price
//!    reaches the target;
//! 3. a row record of the post-transition state.
//!
//! The function has no side effects; trade events are returned for the
//! caller to forward to a diagnostic sink.

use crate::domain::indicator::IndicatorSnapshot;
use crate::domain::ledger::realized_pnl;
use crate::domain::position::{ClosedTrade, ExitReason, OpenPosition, PositionState, Side};
use crate::domain::record::RowRecord;
use crate::domain::signal::Signal;
use crate::domain::strategy::{StrategyConfig, DEFAULT_QUANTITY};

const REVERSAL_SUFFIX: &str = " (Reversal)";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepInput {
    pub index: usize,
    pub price: f64,
    pub snapshot: IndicatorSnapshot,
    pub signal: Signal,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TradeEvent {
    Opened {
        side: Side,
        price: f64,
        quantity: u32,
        profit_target: f64,
        reversal: bool,
        step_index: usize,
    },
    Closed(ClosedTrade),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: PositionState,
    /// At most one for a positive target percentage.
    pub closed_trades: Vec<ClosedTrade>,
    pub events: Vec<TradeEvent>,
    pub record: RowRecord,
}

pub fn transition(
    state: &PositionState,
    input: &StepInput,
    config: &StrategyConfig,
) -> Transition {
    let mut next = *state;
    let mut closed_trades = Vec::new();
    let mut events = Vec::new();
    let mut reversed = false;

    let entry_side = match input.signal {
        Signal::Bullish => Some(Side::Long),
        Signal::Bearish => Some(Side::Short),
        Signal::Neutral => None,
    };

    if let Some(side) = entry_side {
        match next.open {
            None => {
                events.push(open_position(&mut next, side, input, config, false));
            }
            Some(pos) if pos.side == side.opposite() && config.allow_reversal => {
                let trade = close_position(&mut next, pos, input, ExitReason::SignalReversal);
                events.push(TradeEvent::Closed(trade.clone()));
                closed_trades.push(trade);
                events.push(open_position(&mut next, side, input, config, true));
                reversed = true;
            }
            Some(_) => {}
        }
    }

    if let Some(pos) = next.open {
        let trailed = trail_target(pos, input.price, config);
        next.open = Some(trailed);
        if let Some(reason) = exit_reason(&trailed, input.price) {
            let trade = close_position(&mut next, trailed, input, reason);
            events.push(TradeEvent::Closed(trade.clone()));
            closed_trades.push(trade);
        }
    }

    let trade_signal = input.signal.label().map(|label| {
        if reversed {
            format!("{}{}", label, REVERSAL_SUFFIX)
        } else {
            label.to_string()
        }
    });
    let record = RowRecord::new(input.index, input.price, input.snapshot, trade_signal, &next);

    Transition {
        state: next,
        closed_trades,
        events,
        record,
    }
}

fn open_position(
    state: &mut PositionState,
    side: Side,
    input: &StepInput,
    config: &StrategyConfig,
    reversal: bool,
) -> TradeEvent {
    let quantity = *state.quantity.get_or_insert(DEFAULT_QUANTITY);
    let profit_target = match side {
        Side::Long => config.long_target(input.price),
        Side::Short => config.short_target(input.price),
    };
    state.open = Some(OpenPosition {
        side,
        entry_price: input.price,
        profit_target,
    });
    TradeEvent::Opened {
        side,
        price: input.price,
        quantity,
        profit_target,
        reversal,
        step_index: input.index,
    }
}

/// Close the open leg at the step price. Quantity is kept for the next entry.
fn close_position(
    state: &mut PositionState,
    pos: OpenPosition,
    input: &StepInput,
    reason: ExitReason,
) -> ClosedTrade {
    let quantity = state.quantity.unwrap_or(DEFAULT_QUANTITY);
    state.open = None;
    let pnl = realized_pnl(pos.side, pos.entry_price, input.price, quantity);
    state.total_pnl += pnl;
    ClosedTrade {
        side: pos.side,
        entry_price: pos.entry_price,
        exit_price: input.price,
        quantity,
        pnl,
        reason,
        step_index: input.index,
    }
}

/// Pull the target toward the entry by however far price has moved against
/// the position, measured from the untouched target.
fn trail_target(pos: OpenPosition, price: f64, config: &StrategyConfig) -> OpenPosition {
    let mut pos = pos;
    match pos.side {
        Side::Long if price < pos.entry_price => {
            let diff = pos.entry_price - price;
            let base = config.long_target(pos.entry_price);
            if base - pos.profit_target < diff {
                pos.profit_target = base - diff;
            }
        }
        Side::Short if price > pos.entry_price => {
            let diff = price - pos.entry_price;
            let base = config.short_target(pos.entry_price);
            if pos.profit_target - base < diff {
                pos.profit_target = base + diff;
            }
        }
        _ => {}
    }
    pos
}

fn exit_reason(pos: &OpenPosition, price: f64) -> Option<ExitReason> {
    match pos.side {
        Side::Long if pos.profit_target <= pos.entry_price => Some(ExitReason::ProfitTargetForced),
        Side::Long if price >= pos.profit_target => Some(ExitReason::ProfitTargetBooked),
        Side::Short if pos.profit_target >= pos.entry_price => Some(ExitReason::ProfitTargetForced),
        Side::Short if price <= pos.profit_target => Some(ExitReason::ProfitTargetBooked),
        _ => None,
    }
}
