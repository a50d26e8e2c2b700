//! Realized PnL accounting and per-contract results.

use crate::domain::position::{ClosedTrade, PositionState, Side};
use crate::domain::record::RowRecord;

/// Characters of the table name kept in a contract id.
pub const TABLE_ID_CHARS: usize = 20;

/// PnL of a closed trade: long profits from a rise, short from a fall.
pub fn realized_pnl(side: Side, entry_price: f64, exit_price: f64, quantity: u32) -> f64 {
    match side {
        Side::Long => (exit_price - entry_price) * quantity as f64,
        Side::Short => (entry_price - exit_price) * quantity as f64,
    }
}

/// `{table}_{column}` with the table name trimmed and cut to 20 characters.
pub fn contract_id(table_name: &str, column: &str) -> String {
    let table: String = table_name.trim().chars().take(TABLE_ID_CHARS).collect();
    format!("{}_{}", table, column)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PnlLedger {
    total_pnl: f64,
    closed_trades: Vec<ClosedTrade>,
}

impl PnlLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, trade: ClosedTrade) {
        self.total_pnl += trade.pnl;
        self.closed_trades.push(trade);
    }

    pub fn total_pnl(&self) -> f64 {
        self.total_pnl
    }

    pub fn into_trades(self) -> Vec<ClosedTrade> {
        self.closed_trades
    }
}

/// Output of one contract run. `total_pnl` covers completed trades only; a
/// position still open at the end of the series is reported in
/// `final_state` and is not liquidated.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractResult {
    pub contract_id: String,
    pub total_pnl: f64,
    pub closed_trades: Vec<ClosedTrade>,
    pub row_records: Vec<RowRecord>,
    pub final_state: PositionState,
}

impl ContractResult {
    pub fn trade_count(&self) -> usize {
        self.closed_trades.len()
    }

    pub fn win_rate(&self) -> f64 {
        if self.closed_trades.is_empty() {
            return 0.0;
        }
        let wins = self.closed_trades.iter().filter(|t| t.pnl > 0.0).count();
        wins as f64 / self.closed_trades.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::position::ExitReason;
    use approx::assert_relative_eq;

    fn trade(side: Side, entry: f64, exit: f64) -> ClosedTrade {
        ClosedTrade {
            side,
            entry_price: entry,
            exit_price: exit,
            quantity: 75,
            pnl: realized_pnl(side, entry, exit, 75),
            reason: ExitReason::ProfitTargetBooked,
            step_index: 40,
        }
    }

    #[test]
    fn long_pnl_is_exit_minus_entry() {
        assert_relative_eq!(realized_pnl(Side::Long, 100.0, 101.0, 75), 75.0);
        assert_relative_eq!(realized_pnl(Side::Long, 100.0, 99.0, 75), -75.0);
    }

    #[test]
    fn short_pnl_is_entry_minus_exit() {
        assert_relative_eq!(realized_pnl(Side::Short, 100.0, 110.0, 75), -750.0);
        assert_relative_eq!(realized_pnl(Side::Short, 100.0, 99.5, 75), 37.5);
    }

    #[test]
    fn ledger_total_is_sum_of_trades() {
        let mut ledger = PnlLedger::new();
        ledger.record(trade(Side::Long, 100.0, 101.0));
        ledger.record(trade(Side::Short, 100.0, 110.0));
        ledger.record(trade(Side::Short, 50.0, 49.0));

        let total = ledger.total_pnl();
        let trades = ledger.into_trades();
        let sum: f64 = trades.iter().map(|t| t.pnl).sum();
        assert_relative_eq!(total, sum);
        assert_relative_eq!(total, 75.0 - 750.0 + 75.0);
        assert_eq!(trades.len(), 3);
    }

    #[test]
    fn empty_ledger() {
        let ledger = PnlLedger::new();
        assert_eq!(ledger.total_pnl(), 0.0);
        assert!(ledger.into_trades().is_empty());
    }

    #[test]
    fn contract_id_truncates_table_name() {
        assert_eq!(
            contract_id("  nifty_options_01022024_weekly ", "C48200"),
            "nifty_options_010220_C48200"
        );
        assert_eq!(contract_id("01022024", "P47800"), "01022024_P47800");
    }

    #[test]
    fn contract_id_counts_characters_not_bytes() {
        let id = contract_id("ééééééééééééééééééééééé", "C1");
        assert_eq!(id.chars().count(), TABLE_ID_CHARS + 3);
    }

    #[test]
    fn win_rate_counts_profitable_trades() {
        let result = ContractResult {
            contract_id: "t_C1".into(),
            total_pnl: 0.0,
            closed_trades: vec![
                trade(Side::Long, 100.0, 101.0),
                trade(Side::Long, 100.0, 99.0),
            ],
            row_records: Vec::new(),
            final_state: PositionState::default(),
        };
        assert_eq!(result.trade_count(), 2);
        assert_relative_eq!(result.win_rate(), 0.5);
    }
}
