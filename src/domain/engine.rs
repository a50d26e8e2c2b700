//! Contract runner: drives indicators, signals and the position state
//! machine over a price series.
//!
//! Contracts share no state. A batch is evaluated in parallel and the
//! results come back in input order.

use crate::domain::error::AlgoError;
use crate::domain::indicator::{compute_snapshots, IndicatorSnapshot};
use crate::domain::ledger::{contract_id, ContractResult, PnlLedger};
use crate::domain::position::PositionState;
use crate::domain::signal::detect_signal;
use crate::domain::strategy::{StrategyBook, StrategyConfig, WARMUP_STEPS};
use crate::domain::table::PriceTable;
use crate::domain::transition::{transition, StepInput};
use crate::ports::diagnostic_port::DiagnosticSink;
use rayon::prelude::*;

/// Run one contract from a flat position to the end of its series.
pub fn run_contract(
    table_name: &str,
    column: &str,
    prices: &[f64],
    config: &StrategyConfig,
    sink: &dyn DiagnosticSink,
) -> ContractResult {
    let id = contract_id(table_name, column);
    let snapshots = compute_snapshots(prices);
    let mut state = PositionState::default();
    let mut ledger = PnlLedger::new();
    let mut row_records = Vec::new();

    for index in WARMUP_STEPS..prices.len() {
        let Some(input) = step_input(prices, &snapshots, index, config) else {
            tracing::trace!(contract = %id, index, "step skipped");
            continue;
        };

        let step = transition(&state, &input, config);
        for event in &step.events {
            sink.trade_event(&id, event);
        }
        for trade in step.closed_trades {
            ledger.record(trade);
        }
        state = step.state;
        row_records.push(step.record);
    }

    let result = ContractResult {
        contract_id: id,
        total_pnl: ledger.total_pnl(),
        closed_trades: ledger.into_trades(),
        row_records,
        final_state: state,
    };
    sink.contract_finished(&result);
    result
}

/// `None` when the step cannot be evaluated: a non-finite price or an
/// undefined MACD on either side of the step.
fn step_input(
    prices: &[f64],
    snapshots: &[IndicatorSnapshot],
    index: usize,
    config: &StrategyConfig,
) -> Option<StepInput> {
    let price = *prices.get(index)?;
    if !price.is_finite() {
        return None;
    }
    let prev = snapshots.get(index.checked_sub(1)?)?;
    let curr = snapshots.get(index)?;
    if !(usable(prev) && usable(curr)) {
        return None;
    }
    Some(StepInput {
        index,
        price,
        snapshot: *curr,
        signal: detect_signal(prev, curr, price, config.use_trend_filter),
    })
}

fn usable(snapshot: &IndicatorSnapshot) -> bool {
    snapshot.macd.is_finite() && snapshot.macd_signal.is_finite()
}

/// Run every listed column of `table`. Columns are resolved up front, so a
/// missing or non-numeric column fails the batch before any evaluation.
pub fn run_contracts(
    table: &PriceTable,
    columns: &[String],
    book: &StrategyBook,
    sink: &dyn DiagnosticSink,
) -> Result<Vec<ContractResult>, AlgoError> {
    if columns.is_empty() {
        return Err(AlgoError::NoContracts);
    }

    let series = columns
        .iter()
        .map(|column| table.prices(column).map(|prices| (column.as_str(), prices)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(series
        .par_iter()
        .map(|(column, prices)| {
            run_contract(&table.name, column, prices, book.for_column(column), sink)
        })
        .collect())
}
