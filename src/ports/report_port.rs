//! Report generation port trait.

use crate::domain::error::AlgoError;
use crate::domain::ledger::ContractResult;
use std::path::PathBuf;

/// Port for persisting contract results.
pub trait ReportPort {
    /// Write the `Contract,PnL` summary of a run and return its location.
    fn write_summary(&self, results: &[ContractResult]) -> Result<PathBuf, AlgoError>;

    /// Write the per-step rows of one contract. Returns `None` when the
    /// contract produced no rows.
    fn write_row_details(&self, result: &ContractResult) -> Result<Option<PathBuf>, AlgoError>;

    /// Write the closed trades of one contract. Returns `None` when there
    /// were none.
    fn write_trades(&self, result: &ContractResult) -> Result<Option<PathBuf>, AlgoError>;

    /// Default implementation: details and trades for every result, then the summary.
    fn write_all(&self, results: &[ContractResult]) -> Result<PathBuf, AlgoError> {
        for result in results {
            self.write_row_details(result)?;
            self.write_trades(result)?;
        }
        self.write_summary(results)
    }
}
