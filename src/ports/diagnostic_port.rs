//! Diagnostic side channel for contract runs.
//!
//! Sinks observe trade events and finished contracts. They never feed back
//! into the computation, so swapping one sink for another cannot change a
//! result.

use crate::domain::ledger::ContractResult;
use crate::domain::transition::TradeEvent;

pub trait DiagnosticSink: Send + Sync {
    fn trade_event(&self, contract_id: &str, event: &TradeEvent);

    fn contract_finished(&self, _result: &ContractResult) {}
}

/// Discards everything.
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn trade_event(&self, _contract_id: &str, _event: &TradeEvent) {}
}
