//! Submit-time validation and payload assembly

use rust_decimal::Decimal;

use lorry_hire_domain::model::ChallanPayload;
use lorry_hire_types::SessionContext;

use super::state::{FormState, MoneyField};

/// Reasons a form cannot be submitted yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    MissingLorryOwner,
    MissingTdsRate,
    TdsRateOutOfRange,
    MissingPan,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationIssue::MissingLorryOwner => write!(f, "Lorry owner is required"),
            ValidationIssue::MissingTdsRate => write!(f, "TDS rate is required when TDS applies"),
            ValidationIssue::TdsRateOutOfRange => write!(f, "TDS rate must be between 0 and 100"),
            ValidationIssue::MissingPan => write!(f, "PAN is required when TDS applies"),
        }
    }
}

/// Empty when the form is ready to submit
pub fn validate_for_submit(state: &FormState) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if state.lorry_owner.is_none() {
        issues.push(ValidationIssue::MissingLorryOwner);
    }

    if state.tds.applicable.deducts() {
        match state.tds.rate {
            None => issues.push(ValidationIssue::MissingTdsRate),
            Some(rate) if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED => {
                issues.push(ValidationIssue::TdsRateOutOfRange)
            }
            Some(_) => {}
        }
        if state.tds.pan_number.trim().is_empty() {
            issues.push(ValidationIssue::MissingPan);
        }
    }

    issues
}

/// Body for create/update. Consignments go as ids; blank money inputs are left out.
///
/// An untouched hire follows the rate, so it is left out along with a blank rate.
pub fn build_payload(state: &FormState, ctx: &SessionContext) -> ChallanPayload {
    let inputs = &state.inputs;
    let deducts = state.tds.applicable.deducts();
    let pan = state.tds.pan_number.trim();

    ChallanPayload {
        challan_number: state.challan_number.trim().to_string(),
        challan_date: state.challan_date,
        lorry_hire_date: state.lorry_hire_date,
        vehicle_no: state.vehicle_no.trim().to_string(),
        slip_no: state.slip_no.trim().to_string(),
        remarks: state.remarks.clone(),

        lorry_owner_id: state.lorry_owner.as_ref().map(|p| p.id),
        broker_id: state.broker.as_ref().map(|p| p.id),
        destination_id: state.destination_id,

        total_packages: state.totals.total_packages,
        total_weight: state.totals.total_weight,
        rate: inputs.optional_amount(MoneyField::Rate),
        lorry_hire: if state.lorry_hire_overridden {
            inputs.optional_amount(MoneyField::LorryHire)
        } else {
            inputs
                .optional_amount(MoneyField::Rate)
                .map(|_| state.effective_lorry_hire())
        },
        advance_paid: inputs.optional_amount(MoneyField::AdvancePaid),
        loading_charges: inputs.optional_amount(MoneyField::LoadingCharges),
        unloading_charges: inputs.optional_amount(MoneyField::UnloadingCharges),
        diesel_advance: inputs.optional_amount(MoneyField::DieselAdvance),
        gst_applicable: state.gst_applicable,
        gst_amount: inputs.optional_amount(MoneyField::GstAmount),
        total_amount: state.settlement.total_amount,
        balance_payable: state.settlement.balance_payable,

        tds_applicable: state.tds.applicable,
        tds_percent: if deducts { state.tds.rate } else { None },
        pan_card_used: (deducts && !pan.is_empty()).then(|| pan.to_string()),
        tds_amount: state.settlement.tds_amount,

        consignment_ids: state.consignments.ids(),

        company_id: ctx.company_id,
        branch_id: ctx.branch_id,
        financial_year_id: ctx.financial_year_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::action::FormAction;
    use crate::form::reducer::reduce;
    use crate::form::state::TextField;
    use chrono::NaiveDate;
    use lorry_hire_domain::model::{
        ConsignmentRecord, ConsignmentSearchHit, Party, TdsApplicable,
    };
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn run(actions: Vec<FormAction>) -> FormState {
        let start = FormState::new(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());
        actions
            .into_iter()
            .fold(start, |state, action| reduce(&state, action))
    }

    fn owner(pan: Option<&str>) -> Party {
        Party {
            id: 7,
            name: "Rathod Transport".into(),
            pan_number: pan.map(str::to_string),
        }
    }

    #[test]
    fn test_owner_is_required() {
        let state = run(vec![]);
        assert_eq!(
            validate_for_submit(&state),
            vec![ValidationIssue::MissingLorryOwner]
        );
    }

    #[test]
    fn test_tds_requires_rate_and_pan() {
        let state = run(vec![
            FormAction::SelectLorryOwner(Some(owner(None))),
            FormAction::SetTdsApplicable(TdsApplicable::LorryOwner),
        ]);
        assert_eq!(
            validate_for_submit(&state),
            vec![ValidationIssue::MissingTdsRate, ValidationIssue::MissingPan]
        );

        let fixed = run(vec![
            FormAction::SelectLorryOwner(Some(owner(None))),
            FormAction::SetTdsApplicable(TdsApplicable::LorryOwner),
            FormAction::SetTdsRate("150".into()),
            FormAction::SetPan("abcde1234f".into()),
        ]);
        assert_eq!(
            validate_for_submit(&fixed),
            vec![ValidationIssue::TdsRateOutOfRange]
        );
    }

    #[test]
    fn test_no_tds_needs_only_owner() {
        let state = run(vec![FormAction::SelectLorryOwner(Some(owner(None)))]);
        assert!(validate_for_submit(&state).is_empty());
    }

    #[test]
    fn test_payload_shape() {
        let state = run(vec![
            FormAction::SetText(TextField::ChallanNumber, " LHC-1 ".into()),
            FormAction::AddConsignment(ConsignmentRecord::SearchHit(ConsignmentSearchHit {
                id: 17,
                packages: 40,
                charge_weight: Some(dec!(300)),
                ..Default::default()
            })),
            FormAction::AddConsignment(ConsignmentRecord::SearchHit(ConsignmentSearchHit {
                id: 18,
                packages: 20,
                charge_weight: Some(dec!(200)),
                ..Default::default()
            })),
            FormAction::SetMoney(MoneyField::Rate, "10".into()),
            FormAction::SetMoney(MoneyField::LoadingCharges, "200".into()),
            FormAction::SetMoney(MoneyField::AdvancePaid, "1000".into()),
            FormAction::SelectLorryOwner(Some(owner(Some("ABCDE1234F")))),
            FormAction::SetTdsApplicable(TdsApplicable::LorryOwner),
            FormAction::SetTdsRate("2".into()),
        ]);
        assert!(validate_for_submit(&state).is_empty());

        let payload = build_payload(&state, &SessionContext::new(1, 2, 3));
        assert_eq!(payload.challan_number, "LHC-1");
        assert_eq!(payload.consignment_ids, vec![17, 18]);
        assert_eq!(payload.lorry_hire, Some(dec!(5000)));
        assert_eq!(payload.unloading_charges, None);

        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(body["lorryOwnerId"], json!(7));
        assert_eq!(body["totalPackages"], json!(60));
        assert_eq!(body["totalAmount"], json!(5200.0));
        assert_eq!(body["tdsAmount"], json!(100.0));
        assert_eq!(body["balancePayable"], json!(4100.0));
        assert_eq!(body["tdsApplicable"], json!("lorryOwner"));
        assert_eq!(body["tdsPercent"], json!(2.0));
        assert_eq!(body["panCardUsed"], json!("ABCDE1234F"));
        assert_eq!(body["companyId"], json!(1));
        assert_eq!(body["financialYearId"], json!(3));
        assert!(body.get("unloadingCharges").is_none());
        assert!(body.get("gstAmount").is_none());
    }

    #[test]
    fn test_payload_omits_hire_without_rate() {
        let blank = run(vec![FormAction::SelectLorryOwner(Some(owner(None)))]);
        let payload = build_payload(&blank, &SessionContext::new(1, 2, 3));
        assert_eq!(payload.lorry_hire, None);
        assert_eq!(payload.rate, None);
        let body = serde_json::to_value(&payload).unwrap();
        assert!(body.get("lorryHire").is_none());

        let typed = run(vec![FormAction::SetMoney(MoneyField::LorryHire, "4500".into())]);
        let payload = build_payload(&typed, &SessionContext::new(1, 2, 3));
        assert_eq!(payload.lorry_hire, Some(dec!(4500)));
        assert_eq!(payload.rate, None);
    }

    #[test]
    fn test_payload_omits_tds_details_when_not_applicable() {
        let state = run(vec![
            FormAction::SetTdsApplicable(TdsApplicable::Yes),
            FormAction::SetPan("ABCDE1234F".into()),
            FormAction::SetTdsApplicable(TdsApplicable::No),
        ]);
        let payload = build_payload(&state, &SessionContext::new(1, 2, 3));
        assert_eq!(payload.tds_percent, None);
        assert_eq!(payload.pan_card_used, None);
        assert_eq!(payload.tds_amount, dec!(0));
    }
}
