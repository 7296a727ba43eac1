//! Everything that can happen to a challan form

use chrono::NaiveDate;

use lorry_hire_domain::model::{ConsignmentRecord, LorryHireChallan, Party, TdsApplicable};
use lorry_hire_types::EntityId;

use super::state::{MoneyField, TextField};

#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    SetText(TextField, String),
    SetChallanDate(Option<NaiveDate>),
    SetLorryHireDate(Option<NaiveDate>),
    /// Raw text as typed; coerced when totals are derived
    SetMoney(MoneyField, String),
    SetGstApplicable(bool),

    AddConsignment(ConsignmentRecord),
    RemoveConsignment(EntityId),

    SelectBroker(Option<Party>),
    SelectLorryOwner(Option<Party>),
    SetDestination(Option<EntityId>),

    SetTdsApplicable(TdsApplicable),
    /// Percentage text; blank clears the rate
    SetTdsRate(String),
    SetPan(String),

    /// Populate from a saved challan for editing; `today` fills missing dates
    Load {
        challan: Box<LorryHireChallan>,
        broker: Option<Party>,
        lorry_owner: Option<Party>,
        today: NaiveDate,
    },
    Reset {
        today: NaiveDate,
    },
}
