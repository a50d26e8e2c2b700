//! CSV report adapter implementing ReportPort.
//!
//! Writes into one output folder:
//! - `results_<YYYYmmdd_HHMMSS>.csv`: one `Contract,PnL` row per contract
//! - `<contract>_details.csv`: one row per evaluated step
//! - `<contract>_trades.csv`: one row per closed trade

use crate::domain::error::AlgoError;
use crate::domain::ledger::ContractResult;
use crate::domain::position::{ExitReason, Side};
use crate::domain::record::RowRecord;
use crate::ports::report_port::ReportPort;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const RUN_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

pub struct CsvReportAdapter {
    output_dir: PathBuf,
    run_stamp: String,
}

impl CsvReportAdapter {
    /// Reports stamped with the local time of construction.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        let run_stamp = chrono::Local::now().format(RUN_STAMP_FORMAT).to_string();
        Self::with_run_stamp(output_dir, run_stamp)
    }

    pub fn with_run_stamp(output_dir: impl Into<PathBuf>, run_stamp: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            run_stamp: run_stamp.into(),
        }
    }

    pub fn summary_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("results_{}.csv", self.run_stamp))
    }

    fn ensure_dir(&self) -> Result<(), AlgoError> {
        fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    fn write_rows<T: Serialize>(&self, path: &Path, rows: &[T]) -> Result<(), AlgoError> {
        self.ensure_dir()?;
        let mut writer = csv::Writer::from_path(path).map_err(|e| csv_error(path, e))?;
        for row in rows {
            writer.serialize(row).map_err(|e| csv_error(path, e))?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn csv_error(path: &Path, err: csv::Error) -> AlgoError {
    AlgoError::Data {
        reason: format!("failed to write {}: {}", path.display(), err),
    }
}

#[derive(Serialize)]
struct SummaryRow<'a> {
    #[serde(rename = "Contract")]
    contract: &'a str,
    #[serde(rename = "PnL")]
    pnl: f64,
}

#[derive(Serialize)]
struct DetailRow<'a> {
    contract: &'a str,
    index: usize,
    price: f64,
    ema12: Option<f64>,
    ema26: Option<f64>,
    ema200: Option<f64>,
    macd: Option<f64>,
    signal: Option<f64>,
    macd_hist: Option<f64>,
    rsi: Option<f64>,
    trade_signal: Option<&'a str>,
    position: Option<Side>,
    entry_price: Option<f64>,
    target_price: Option<f64>,
    total_pnl: f64,
}

impl<'a> DetailRow<'a> {
    fn new(contract: &'a str, rec: &'a RowRecord) -> Self {
        let s = &rec.snapshot;
        Self {
            contract,
            index: rec.index,
            price: rec.price,
            ema12: cell(s.ema_fast),
            ema26: cell(s.ema_slow),
            ema200: rec.trend_ema(),
            macd: cell(s.macd),
            signal: cell(s.macd_signal),
            macd_hist: cell(s.macd_hist),
            rsi: rec.rsi(),
            trade_signal: rec.trade_signal.as_deref(),
            position: rec.position,
            entry_price: rec.entry_price,
            target_price: rec.target_price,
            total_pnl: rec.total_pnl,
        }
    }
}

#[derive(Serialize)]
struct TradeRow<'a> {
    contract: &'a str,
    step_index: usize,
    side: Side,
    entry_price: f64,
    exit_price: f64,
    quantity: u32,
    pnl: f64,
    reason: ExitReason,
}

fn cell(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

impl ReportPort for CsvReportAdapter {
    fn write_summary(&self, results: &[ContractResult]) -> Result<PathBuf, AlgoError> {
        let rows: Vec<SummaryRow> = results
            .iter()
            .map(|r| SummaryRow {
                contract: &r.contract_id,
                pnl: r.total_pnl,
            })
            .collect();
        let path = self.summary_path();
        if rows.is_empty() {
            // serialize() never sees a row, so the header has to be written by hand
            self.ensure_dir()?;
            fs::write(&path, "Contract,PnL\n")?;
        } else {
            self.write_rows(&path, &rows)?;
        }
        tracing::info!(path = %path.display(), contracts = results.len(), "wrote summary");
        Ok(path)
    }

    fn write_row_details(&self, result: &ContractResult) -> Result<Option<PathBuf>, AlgoError> {
        if result.row_records.is_empty() {
            return Ok(None);
        }
        let rows: Vec<DetailRow> = result
            .row_records
            .iter()
            .map(|rec| DetailRow::new(&result.contract_id, rec))
            .collect();
        let path = self
            .output_dir
            .join(format!("{}_details.csv", result.contract_id));
        self.write_rows(&path, &rows)?;
        Ok(Some(path))
    }

    fn write_trades(&self, result: &ContractResult) -> Result<Option<PathBuf>, AlgoError> {
        if result.closed_trades.is_empty() {
            return Ok(None);
        }
        let rows: Vec<TradeRow> = result
            .closed_trades
            .iter()
            .map(|t| TradeRow {
                contract: &result.contract_id,
                step_index: t.step_index,
                side: t.side,
                entry_price: t.entry_price,
                exit_price: t.exit_price,
                quantity: t.quantity,
                pnl: t.pnl,
                reason: t.reason,
            })
            .collect();
        let path = self
            .output_dir
            .join(format!("{}_trades.csv", result.contract_id));
        self.write_rows(&path, &rows)?;
        Ok(Some(path))
    }
}
