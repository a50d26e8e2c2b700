//! Core domain types and logic.

pub mod config_validation;
pub mod engine;
pub mod error;
pub mod indicator;
pub mod ledger;
pub mod position;
pub mod record;
pub mod signal;
pub mod strategy;
pub mod table;
pub mod transition;
pub mod universe;
