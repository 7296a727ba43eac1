//! TDS (tax deducted at source) sourcing policy types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Where the PAN for the TDS deduction comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TdsApplicable {
    #[default]
    #[serde(rename = "no")]
    No,
    #[serde(rename = "broker")]
    Broker,
    #[serde(rename = "lorryOwner")]
    LorryOwner,
    /// Deduct, with a manually entered PAN
    #[serde(rename = "yes")]
    Yes,
}

impl TdsApplicable {
    pub fn deducts(self) -> bool {
        !matches!(self, TdsApplicable::No)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TdsApplicable::No => "no",
            TdsApplicable::Broker => "broker",
            TdsApplicable::LorryOwner => "lorryOwner",
            TdsApplicable::Yes => "yes",
        }
    }
}

impl std::fmt::Display for TdsApplicable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TdsApplicable {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "no" | "none" => Ok(TdsApplicable::No),
            "broker" => Ok(TdsApplicable::Broker),
            "lorryOwner" | "lorry-owner" | "owner" => Ok(TdsApplicable::LorryOwner),
            "yes" | "manual" => Ok(TdsApplicable::Yes),
            other => Err(format!(
                "unknown TDS policy '{}' (expected no, broker, lorryOwner or yes)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PanSource {
    Broker,
    LorryOwner,
    Manual,
}

/// Non-blocking advisory shown next to the PAN field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TdsHint {
    /// The selected party has no PAN on record; it must be typed in
    PanRequired,
}

impl std::fmt::Display for TdsHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TdsHint::PanRequired => write!(f, "PAN not on record, please enter it manually"),
        }
    }
}

/// TDS section of the challan form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TdsState {
    pub applicable: TdsApplicable,
    /// Percentage, 0-100
    pub rate: Option<Decimal>,
    pub pan_number: String,
    pub pan_source: Option<PanSource>,
    pub pan_read_only: bool,
    pub hint: Option<TdsHint>,
}
