#![allow(dead_code)]

use optalgo::domain::error::AlgoError;
use optalgo::domain::ledger::ContractResult;
use optalgo::domain::table::PriceTable;
use optalgo::domain::transition::TradeEvent;
use optalgo::ports::diagnostic_port::DiagnosticSink;
use optalgo::ports::table_port::TablePort;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

pub struct MockTablePort {
    pub tables: BTreeMap<String, PriceTable>,
    pub errors: BTreeMap<String, String>,
}

impl MockTablePort {
    pub fn new() -> Self {
        Self {
            tables: BTreeMap::new(),
            errors: BTreeMap::new(),
        }
    }

    pub fn with_table(mut self, table: PriceTable) -> Self {
        self.tables.insert(table.name.clone(), table);
        self
    }

    pub fn with_error(mut self, name: &str, reason: &str) -> Self {
        self.errors.insert(name.to_string(), reason.to_string());
        self
    }
}

impl TablePort for MockTablePort {
    fn list_tables(&self) -> Result<Vec<String>, AlgoError> {
        let mut names: Vec<String> = self
            .tables
            .keys()
            .chain(self.errors.keys())
            .cloned()
            .collect();
        names.sort();
        Ok(names)
    }

    fn load_table(&self, name: &str) -> Result<PriceTable, AlgoError> {
        if let Some(reason) = self.errors.get(name) {
            return Err(AlgoError::Data {
                reason: reason.clone(),
            });
        }
        self.tables
            .get(name)
            .cloned()
            .ok_or_else(|| AlgoError::TableNotFound {
                pattern: name.to_string(),
            })
    }
}

/// Sink that keeps everything it is told, for assertions.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<(String, TradeEvent)>>,
    pub finished: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn events_for(&self, contract_id: &str) -> Vec<TradeEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| id == contract_id)
            .map(|(_, e)| e.clone())
            .collect()
    }

    pub fn finished(&self) -> Vec<String> {
        self.finished.lock().unwrap().clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn trade_event(&self, contract_id: &str, event: &TradeEvent) {
        self.events
            .lock()
            .unwrap()
            .push((contract_id.to_string(), event.clone()));
    }

    fn contract_finished(&self, result: &ContractResult) {
        self.finished
            .lock()
            .unwrap()
            .push(result.contract_id.clone());
    }
}

/// Flat at 100 through index 204, then +0.5 per step.
pub fn flat_then_rising_220() -> Vec<f64> {
    (0..220)
        .map(|i| {
            if i <= 204 {
                100.0
            } else {
                100.0 + (i - 204) as f64 * 0.5
            }
        })
        .collect()
}

/// Deterministic bounded random walk starting at 100.
pub fn random_walk(seed: u64, len: usize) -> Vec<f64> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut price = 100.0;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let step = ((state >> 33) as f64 / (1u64 << 31) as f64 - 0.5) * 2.0;
            price = (price + step).max(1.0);
            price
        })
        .collect()
}

/// Session table with an underlying column and a strike ladder around 48000.
pub fn session_table(name: &str, rows: usize, call: Vec<f64>, put: Vec<f64>) -> PriceTable {
    PriceTable::new(name)
        .with_column("BANKNIFTY", vec![48000.0; rows])
        .with_column("C47900", vec![300.0; rows])
        .with_column("C48100", call)
        .with_column("P47900", put)
        .with_column("P48100", vec![260.0; rows])
}

/// Write a table to `<dir>/<name>.csv` with a leading text `time` column.
pub fn write_table_csv(dir: &Path, table: &PriceTable) {
    let mut headers = vec!["time".to_string()];
    headers.extend(table.columns.iter().cloned());

    let mut out = headers.join(",");
    out.push('\n');
    for row in 0..table.row_count {
        let mut cells = vec![format!("t{row}")];
        for column in &table.columns {
            let v = table.numeric[column][row];
            cells.push(format!("{v}"));
        }
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    fs::write(dir.join(format!("{}.csv", table.name)), out).unwrap();
}
