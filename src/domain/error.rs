//! Domain error types.

/// Top-level error type for optalgo.
#[derive(Debug, thiserror::Error)]
pub enum AlgoError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("no contracts provided")]
    NoContracts,

    #[error("no tables found in {location}")]
    NoTables { location: String },

    #[error("no table found matching {pattern}")]
    TableNotFound { pattern: String },

    #[error("contract {contract} not found in table {table}")]
    ContractNotFound { contract: String, table: String },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("column {column} in table {table} is not numeric")]
    NonNumeric { table: String, column: String },

    #[error("unknown trade side {0:?} (expected buy/long or sell/short)")]
    UnknownSide(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AlgoError {
    /// Process exit status for this error family.
    pub fn exit_status(&self) -> u8 {
        match self {
            AlgoError::Io(_) => 1,
            AlgoError::ConfigParse { .. }
            | AlgoError::ConfigMissing { .. }
            | AlgoError::ConfigInvalid { .. }
            | AlgoError::NoContracts => 2,
            AlgoError::NoTables { .. }
            | AlgoError::TableNotFound { .. }
            | AlgoError::Data { .. }
            | AlgoError::NonNumeric { .. } => 3,
            AlgoError::ContractNotFound { .. } | AlgoError::UnknownSide(_) => 4,
        }
    }
}

impl From<&AlgoError> for std::process::ExitCode {
    fn from(err: &AlgoError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
