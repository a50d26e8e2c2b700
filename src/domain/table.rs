//! Price tables: one intraday table per session, one column per series.
//!
//! Contract columns are named `C<strike>` for calls and `P<strike>` for puts.
//! Any other numeric column may carry the underlying index price.

use crate::domain::error::AlgoError;
use std::collections::HashMap;
use std::fmt;

/// Header names tried, in order, for the underlying price column.
pub const UNDERLYING_CANDIDATES: [&str; 6] = [
    "BANKNIFTY",
    "banknifty",
    "underlying",
    "spot",
    "base_price",
    "underlying_price",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractKind {
    Call,
    Put,
}

impl ContractKind {
    /// Classify a contract column and return its strike.
    pub fn from_column(name: &str) -> Option<(ContractKind, u32)> {
        let kind = match name.chars().next()? {
            'C' => ContractKind::Call,
            'P' => ContractKind::Put,
            _ => return None,
        };
        let digits = &name[1..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(|strike| (kind, strike))
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractKind::Call => write!(f, "call"),
            ContractKind::Put => write!(f, "put"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    pub name: String,
    /// Every header, in file order.
    pub columns: Vec<String>,
    /// Columns whose cells all parsed as numbers.
    pub numeric: HashMap<String, Vec<f64>>,
    pub row_count: usize,
}

impl PriceTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            numeric: HashMap::new(),
            row_count: 0,
        }
    }

    /// Builder used by adapters and tests; `values` must match `row_count`
    /// of earlier columns.
    pub fn with_column(mut self, column: &str, values: Vec<f64>) -> Self {
        self.row_count = self.row_count.max(values.len());
        self.columns.push(column.to_string());
        self.numeric.insert(column.to_string(), values);
        self
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn is_numeric(&self, column: &str) -> bool {
        self.numeric.contains_key(column)
    }

    /// Price series of a contract column.
    pub fn prices(&self, column: &str) -> Result<&[f64], AlgoError> {
        if !self.has_column(column) {
            return Err(AlgoError::ContractNotFound {
                contract: column.to_string(),
                table: self.name.clone(),
            });
        }
        self.numeric
            .get(column)
            .map(Vec::as_slice)
            .ok_or_else(|| AlgoError::NonNumeric {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }

    /// A well-known underlying header, else the first numeric column that
    /// does not look like a contract.
    pub fn underlying_column(&self) -> Option<&str> {
        if let Some(name) = UNDERLYING_CANDIDATES
            .iter()
            .copied()
            .find(|c| self.is_numeric(c))
        {
            return Some(name);
        }
        self.columns
            .iter()
            .find(|c| self.is_numeric(c) && !c.starts_with('C') && !c.starts_with('P'))
            .map(String::as_str)
    }

    /// Numeric contract columns of one kind with their strikes, in header
    /// order. A contract column with unparseable cells is not tradable.
    pub fn strikes(&self, kind: ContractKind) -> Vec<(u32, &str)> {
        self.columns
            .iter()
            .filter(|c| self.is_numeric(c))
            .filter_map(|c| match ContractKind::from_column(c) {
                Some((k, strike)) if k == kind => Some((strike, c.as_str())),
                _ => None,
            })
            .collect()
    }
}
