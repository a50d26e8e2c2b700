//! Price table access port trait.

use crate::domain::error::AlgoError;
use crate::domain::table::PriceTable;

pub trait TablePort {
    /// Table names, sorted.
    fn list_tables(&self) -> Result<Vec<String>, AlgoError>;

    fn load_table(&self, name: &str) -> Result<PriceTable, AlgoError>;

    /// First table (in sorted order) whose name contains `pattern`.
    fn find_table(&self, pattern: &str) -> Result<PriceTable, AlgoError> {
        let name = self
            .list_tables()?
            .into_iter()
            .find(|t| t.contains(pattern))
            .ok_or_else(|| AlgoError::TableNotFound {
                pattern: pattern.to_string(),
            })?;
        self.load_table(&name)
    }
}
