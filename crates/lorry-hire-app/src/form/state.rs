//! Challan form state

use chrono::NaiveDate;
use rust_decimal::Decimal;

use lorry_hire_domain::model::{Party, TdsState};
use lorry_hire_domain::service::{
    calculate_hire, calculate_settlement, coerce_amount, SelectedConsignments, Settlement,
    SettlementInputs, Totals,
};
use lorry_hire_types::EntityId;

/// Free-text header fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    ChallanNumber,
    VehicleNo,
    SlipNo,
    Remarks,
}

/// User-entered numeric fields, kept as typed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoneyField {
    Rate,
    LorryHire,
    LoadingCharges,
    UnloadingCharges,
    DieselAdvance,
    GstAmount,
    AdvancePaid,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoneyInputs {
    pub rate: String,
    pub lorry_hire: String,
    pub loading_charges: String,
    pub unloading_charges: String,
    pub diesel_advance: String,
    pub gst_amount: String,
    pub advance_paid: String,
}

impl MoneyInputs {
    pub fn get(&self, field: MoneyField) -> &str {
        match field {
            MoneyField::Rate => &self.rate,
            MoneyField::LorryHire => &self.lorry_hire,
            MoneyField::LoadingCharges => &self.loading_charges,
            MoneyField::UnloadingCharges => &self.unloading_charges,
            MoneyField::DieselAdvance => &self.diesel_advance,
            MoneyField::GstAmount => &self.gst_amount,
            MoneyField::AdvancePaid => &self.advance_paid,
        }
    }

    pub fn set(&mut self, field: MoneyField, value: String) {
        let slot = match field {
            MoneyField::Rate => &mut self.rate,
            MoneyField::LorryHire => &mut self.lorry_hire,
            MoneyField::LoadingCharges => &mut self.loading_charges,
            MoneyField::UnloadingCharges => &mut self.unloading_charges,
            MoneyField::DieselAdvance => &mut self.diesel_advance,
            MoneyField::GstAmount => &mut self.gst_amount,
            MoneyField::AdvancePaid => &mut self.advance_paid,
        };
        *slot = value;
    }

    pub fn amount(&self, field: MoneyField) -> Decimal {
        coerce_amount(self.get(field))
    }

    /// `None` for a blank field, so it can be left out of the payload
    pub fn optional_amount(&self, field: MoneyField) -> Option<Decimal> {
        let text = self.get(field);
        if text.trim().is_empty() {
            None
        } else {
            Some(coerce_amount(text))
        }
    }
}

/// One challan form session
///
/// `totals` and `settlement` are derived; they are rewritten by
/// [`FormState::derive`] at the end of every reduction and never set directly.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    /// Set when editing a saved challan
    pub editing_id: Option<EntityId>,

    pub challan_number: String,
    pub challan_date: Option<NaiveDate>,
    pub lorry_hire_date: Option<NaiveDate>,
    pub vehicle_no: String,
    pub slip_no: String,
    pub remarks: String,

    pub lorry_owner: Option<Party>,
    pub broker: Option<Party>,
    pub destination_id: Option<EntityId>,

    pub consignments: SelectedConsignments,
    pub inputs: MoneyInputs,
    pub gst_applicable: bool,
    pub tds: TdsState,

    /// The hire amount was typed in and no longer follows `calculated_hire`
    pub lorry_hire_overridden: bool,

    pub totals: Totals,
    pub settlement: Settlement,
}

impl FormState {
    /// Blank form dated `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            editing_id: None,
            challan_number: String::new(),
            challan_date: Some(today),
            lorry_hire_date: Some(today),
            vehicle_no: String::new(),
            slip_no: String::new(),
            remarks: String::new(),
            lorry_owner: None,
            broker: None,
            destination_id: None,
            consignments: SelectedConsignments::new(),
            inputs: MoneyInputs::default(),
            gst_applicable: false,
            tds: TdsState::default(),
            lorry_hire_overridden: false,
            totals: Totals::default(),
            settlement: Settlement::default(),
        }
        .derive()
    }

    pub fn is_edit(&self) -> bool {
        self.editing_id.is_some()
    }

    /// Hire amount that feeds the settlement and the payload
    pub fn effective_lorry_hire(&self) -> Decimal {
        if self.lorry_hire_overridden {
            self.inputs.amount(MoneyField::LorryHire)
        } else {
            calculate_hire(self.inputs.amount(MoneyField::Rate), self.totals.total_weight)
        }
    }

    pub fn settlement_inputs(&self) -> SettlementInputs {
        SettlementInputs {
            rate: self.inputs.amount(MoneyField::Rate),
            total_weight: self.totals.total_weight,
            lorry_hire: self.effective_lorry_hire(),
            loading_charges: self.inputs.amount(MoneyField::LoadingCharges),
            unloading_charges: self.inputs.amount(MoneyField::UnloadingCharges),
            diesel_advance: self.inputs.amount(MoneyField::DieselAdvance),
            gst_applicable: self.gst_applicable,
            gst_amount: self.inputs.amount(MoneyField::GstAmount),
            tds_applicable: self.tds.applicable,
            tds_rate: self.tds.rate,
            advance_paid: self.inputs.amount(MoneyField::AdvancePaid),
        }
    }

    /// Recompute totals first, then the settlement from those totals
    pub fn derive(mut self) -> Self {
        self.totals = self.consignments.totals();
        self.settlement = calculate_settlement(&self.settlement_inputs());
        self
    }
}
