//! Port traits for the I/O seams around the core.

pub mod config_port;
pub mod diagnostic_port;
pub mod report_port;
pub mod table_port;
