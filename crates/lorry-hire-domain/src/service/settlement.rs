//! Settlement calculation for a lorry hire challan
//!
//! Derivation order:
//! 1. `calculated_hire = rate x total_weight` (advisory only)
//! 2. `total_amount = lorry_hire + loading + unloading + diesel_advance + gst?`
//! 3. `tds_amount = lorry_hire x tds_rate / 100` when a TDS policy applies
//! 4. `balance_payable = total_amount - tds_amount - advance_paid`
//!
//! Any step that overflows `Decimal` yields zero for that amount.
//!
//! Nothing is rounded here. Use [`round_for_display`] or
//! [`Settlement::rounded`] at the presentation boundary only.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::model::TdsApplicable;

/// Decimal places shown to users
pub const DISPLAY_SCALE: u32 = 2;

/// Every input the settlement depends on, already coerced to numbers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettlementInputs {
    pub rate: Decimal,
    pub total_weight: Decimal,
    pub lorry_hire: Decimal,
    pub loading_charges: Decimal,
    pub unloading_charges: Decimal,
    pub diesel_advance: Decimal,
    pub gst_applicable: bool,
    pub gst_amount: Decimal,
    pub tds_applicable: TdsApplicable,
    pub tds_rate: Option<Decimal>,
    pub advance_paid: Decimal,
}

/// Derived monetary fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub calculated_hire: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_amount: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub tds_amount: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub balance_payable: Decimal,
}

impl Settlement {
    /// Copy with every field rounded for display
    pub fn rounded(&self) -> Self {
        Self {
            calculated_hire: round_for_display(self.calculated_hire),
            total_amount: round_for_display(self.total_amount),
            tds_amount: round_for_display(self.tds_amount),
            balance_payable: round_for_display(self.balance_payable),
        }
    }
}

pub fn calculate_hire(rate: Decimal, total_weight: Decimal) -> Decimal {
    rate.checked_mul(total_weight).unwrap_or(Decimal::ZERO)
}

/// TDS is levied on the hire alone, never on extra charges or GST
pub fn calculate_tds(
    lorry_hire: Decimal,
    policy: TdsApplicable,
    tds_rate: Option<Decimal>,
) -> Decimal {
    if !policy.deducts() {
        return Decimal::ZERO;
    }
    match tds_rate {
        Some(rate) => lorry_hire
            .checked_mul(rate)
            .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO),
        None => Decimal::ZERO,
    }
}

fn sum(values: &[Decimal]) -> Decimal {
    values
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))
        .unwrap_or(Decimal::ZERO)
}

pub fn calculate_settlement(inputs: &SettlementInputs) -> Settlement {
    let calculated_hire = calculate_hire(inputs.rate, inputs.total_weight);

    let gst = if inputs.gst_applicable {
        inputs.gst_amount
    } else {
        Decimal::ZERO
    };
    let total_amount = sum(&[
        inputs.lorry_hire,
        inputs.loading_charges,
        inputs.unloading_charges,
        inputs.diesel_advance,
        gst,
    ]);

    let tds_amount = calculate_tds(inputs.lorry_hire, inputs.tds_applicable, inputs.tds_rate);

    let balance_payable = total_amount
        .checked_sub(tds_amount)
        .and_then(|v| v.checked_sub(inputs.advance_paid))
        .unwrap_or(Decimal::ZERO);

    Settlement {
        calculated_hire,
        total_amount,
        tds_amount,
        balance_payable,
    }
}

/// Round half away from zero to two places
pub fn round_for_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}
