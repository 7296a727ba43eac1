//! Domain services
//!
//! Pure, synchronous computations. Nothing here performs I/O or returns errors;
//! degenerate input resolves to defined defaults.

pub mod aggregator;
pub mod coerce;
pub mod settlement;
pub mod tds_policy;

pub use aggregator::{compute_totals, SelectedConsignments, Totals};
pub use coerce::{coerce_amount, coerce_count};
pub use settlement::{
    calculate_hire, calculate_settlement, calculate_tds, round_for_display, Settlement,
    SettlementInputs,
};
pub use tds_policy::{apply_tds_policy, enter_pan, on_party_selected};
