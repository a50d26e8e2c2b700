//! CSV price table adapter: one `<table>.csv` file per table in a directory.

use crate::domain::error::AlgoError;
use crate::domain::table::PriceTable;
use crate::ports::table_port::TablePort;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, name: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", name))
    }
}

impl TablePort for CsvAdapter {
    fn list_tables(&self) -> Result<Vec<String>, AlgoError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| AlgoError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut tables = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "csv") {
                if let Some(stem) = path.file_stem() {
                    tables.push(stem.to_string_lossy().into_owned());
                }
            }
        }

        tables.sort();
        Ok(tables)
    }

    fn load_table(&self, name: &str) -> Result<PriceTable, AlgoError> {
        let path = self.csv_path(name);
        if !path.is_file() {
            return Err(AlgoError::TableNotFound {
                pattern: name.to_string(),
            });
        }
        let content = fs::read_to_string(&path)?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| AlgoError::Data {
                reason: format!("CSV header error in {}: {}", path.display(), e),
            })?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut columns: Vec<Option<Vec<f64>>> = vec![Some(Vec::new()); headers.len()];
        let mut row_count = 0;

        for result in rdr.records() {
            let record = result.map_err(|e| AlgoError::Data {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;
            row_count += 1;

            for (i, column) in columns.iter_mut().enumerate() {
                match record.get(i).and_then(parse_cell) {
                    Some(v) => {
                        if let Some(values) = column {
                            values.push(v);
                        }
                    }
                    None => *column = None,
                }
            }
        }

        let numeric: HashMap<String, Vec<f64>> = headers
            .iter()
            .cloned()
            .zip(columns)
            .filter_map(|(header, values)| values.map(|v| (header, v)))
            .collect();

        tracing::debug!(
            table = name,
            rows = row_count,
            columns = headers.len(),
            numeric = numeric.len(),
            "loaded table"
        );

        Ok(PriceTable {
            name: name.to_string(),
            columns: headers,
            numeric,
            row_count,
        })
    }
}

/// Empty cells read as missing values (NaN); anything else must parse.
fn parse_cell(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Some(f64::NAN);
    }
    cell.parse().ok()
}
