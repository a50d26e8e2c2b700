//! Table selection for a batch run.
//!
//! Each session table contributes at most one call and one put: the nearest
//! out-of-the-money strikes relative to the underlying price at the first
//! evaluated step.

use crate::domain::strategy::WARMUP_STEPS;
use crate::domain::table::{ContractKind, PriceTable};
use crate::ports::table_port::TablePort;

/// Tables shorter than this never reach an evaluated step.
pub const MIN_TABLE_ROWS: usize = WARMUP_STEPS;

/// Row whose underlying price decides which strikes are out of the money.
pub const BASE_PRICE_ROW: usize = WARMUP_STEPS - 1;

#[derive(Debug, Clone, PartialEq)]
pub struct ContractSelection {
    pub base_price: f64,
    pub call: Option<String>,
    pub put: Option<String>,
}

impl ContractSelection {
    /// Selected columns, call first.
    pub fn columns(&self) -> Vec<String> {
        self.call.iter().chain(self.put.iter()).cloned().collect()
    }
}

/// Lowest call strike strictly above `base_price` and highest put strike
/// strictly below it.
pub fn select_otm_contracts(table: &PriceTable, base_price: f64) -> ContractSelection {
    let call = table
        .strikes(ContractKind::Call)
        .into_iter()
        .filter(|(strike, _)| *strike as f64 > base_price)
        .min_by_key(|(strike, _)| *strike)
        .map(|(_, col)| col.to_string());
    let put = table
        .strikes(ContractKind::Put)
        .into_iter()
        .filter(|(strike, _)| (*strike as f64) < base_price)
        .max_by_key(|(strike, _)| *strike)
        .map(|(_, col)| col.to_string());
    ContractSelection {
        base_price,
        call,
        put,
    }
}

#[derive(Debug, Clone)]
pub struct SelectedTable {
    pub table: PriceTable,
    pub selection: ContractSelection,
}

#[derive(Debug, Clone)]
pub struct SkippedTable {
    pub name: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    LoadFailed(String),
    InsufficientRows { rows: usize },
    NoUnderlying,
    NoContracts,
}

pub struct TableSelectionResult {
    pub selected: Vec<SelectedTable>,
    pub skipped: Vec<SkippedTable>,
}

/// Load up to `max_tables` tables and pick their contracts. Tables that
/// cannot be used are skipped with a warning.
pub fn validate_tables(
    table_port: &dyn TablePort,
    names: Vec<String>,
    max_tables: usize,
) -> TableSelectionResult {
    let mut selected = Vec::new();
    let mut skipped = Vec::new();

    for name in names.into_iter().take(max_tables) {
        match check_table(table_port, &name) {
            Ok(sel) => selected.push(sel),
            Err(reason) => {
                tracing::warn!(table = %name, ?reason, "skipping table");
                skipped.push(SkippedTable { name, reason });
            }
        }
    }

    TableSelectionResult { selected, skipped }
}

fn check_table(table_port: &dyn TablePort, name: &str) -> Result<SelectedTable, SkipReason> {
    let table = table_port
        .load_table(name)
        .map_err(|e| SkipReason::LoadFailed(e.to_string()))?;

    if table.row_count < MIN_TABLE_ROWS {
        return Err(SkipReason::InsufficientRows {
            rows: table.row_count,
        });
    }

    let base_price = table
        .underlying_column()
        .and_then(|col| table.numeric.get(col))
        .and_then(|values| values.get(BASE_PRICE_ROW).copied())
        .filter(|p| p.is_finite())
        .ok_or(SkipReason::NoUnderlying)?;

    let selection = select_otm_contracts(&table, base_price);
    if selection.call.is_none() && selection.put.is_none() {
        return Err(SkipReason::NoContracts);
    }

    tracing::debug!(
        table = %name,
        base_price,
        call = ?selection.call,
        put = ?selection.put,
        "selected contracts"
    );
    Ok(SelectedTable { table, selection })
}
