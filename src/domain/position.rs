//! Position and trade types for a single contract run.

use crate::domain::error::AlgoError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Long,
    Short,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Long => Side::Short,
            Side::Short => Side::Long,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Long => write!(f, "long"),
            Side::Short => write!(f, "short"),
        }
    }
}

/// Accepts the entry-type words (`buy`/`sell`) as well as `long`/`short`.
impl FromStr for Side {
    type Err = AlgoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" | "long" => Ok(Side::Long),
            "sell" | "short" => Ok(Side::Short),
            _ => Err(AlgoError::UnknownSide(s.to_string())),
        }
    }
}

/// The open leg of a position. A target exists exactly when a side is held.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpenPosition {
    pub side: Side,
    pub entry_price: f64,
    pub profit_target: f64,
}

/// Per-contract state carried from one step to the next.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionState {
    pub open: Option<OpenPosition>,
    /// Set on the first entry and kept for the rest of the run.
    pub quantity: Option<u32>,
    pub total_pnl: f64,
}

impl PositionState {
    pub fn side(&self) -> Option<Side> {
        self.open.map(|p| p.side)
    }

    pub fn is_flat(&self) -> bool {
        self.open.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    SignalReversal,
    ProfitTargetForced,
    ProfitTargetBooked,
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitReason::SignalReversal => write!(f, "signal_reversal"),
            ExitReason::ProfitTargetForced => write!(f, "profit_target_forced"),
            ExitReason::ProfitTargetBooked => write!(f, "profit_target_booked"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClosedTrade {
    pub side: Side,
    pub entry_price: f64,
    pub exit_price: f64,
    pub quantity: u32,
    pub pnl: f64,
    pub reason: ExitReason,
    pub step_index: usize,
}
