//! Per-step diagnostic rows.

use crate::domain::indicator::IndicatorSnapshot;
use crate::domain::position::{PositionState, Side};

/// One evaluated step: the indicators read, the signal text, and the
/// position after the step's transitions.
#[derive(Debug, Clone, PartialEq)]
pub struct RowRecord {
    pub index: usize,
    pub price: f64,
    pub snapshot: IndicatorSnapshot,
    pub trade_signal: Option<String>,
    pub position: Option<Side>,
    pub entry_price: Option<f64>,
    pub target_price: Option<f64>,
    pub total_pnl: f64,
}

impl RowRecord {
    pub fn new(
        index: usize,
        price: f64,
        snapshot: IndicatorSnapshot,
        trade_signal: Option<String>,
        state: &PositionState,
    ) -> Self {
        Self {
            index,
            price,
            snapshot,
            trade_signal,
            position: state.side(),
            entry_price: state.open.map(|p| p.entry_price),
            target_price: state.open.map(|p| p.profit_target),
            total_pnl: state.total_pnl,
        }
    }

    pub fn rsi(&self) -> Option<f64> {
        defined(self.snapshot.rsi)
    }

    pub fn trend_ema(&self) -> Option<f64> {
        defined(self.snapshot.trend_ema)
    }
}

fn defined(v: f64) -> Option<f64> {
    if v.is_nan() { None } else { Some(v) }
}
