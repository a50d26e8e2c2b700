//! DiagnosticSink that reports trade events through `tracing`.

use crate::domain::ledger::ContractResult;
use crate::domain::transition::TradeEvent;
use crate::ports::diagnostic_port::DiagnosticSink;

pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn trade_event(&self, contract_id: &str, event: &TradeEvent) {
        match event {
            TradeEvent::Opened {
                side,
                price,
                quantity,
                profit_target,
                reversal,
                step_index,
            } => tracing::info!(
                contract = contract_id,
                step = step_index,
                %side,
                price,
                quantity,
                profit_target,
                reversal,
                "position opened"
            ),
            TradeEvent::Closed(trade) => tracing::info!(
                contract = contract_id,
                step = trade.step_index,
                side = %trade.side,
                entry = trade.entry_price,
                exit = trade.exit_price,
                pnl = trade.pnl,
                reason = %trade.reason,
                "position closed"
            ),
        }
    }

    fn contract_finished(&self, result: &ContractResult) {
        tracing::info!(
            contract = %result.contract_id,
            total_pnl = result.total_pnl,
            trades = result.trade_count(),
            open = ?result.final_state.side(),
            "contract finished"
        );
    }
}
