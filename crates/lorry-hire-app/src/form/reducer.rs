//! Pure state transitions for the challan form

use lorry_hire_domain::model::{LorryHireChallan, Party, PartyKind};
use lorry_hire_domain::service::{
    apply_tds_policy, coerce_amount, enter_pan, on_party_selected, SelectedConsignments,
};

use super::action::FormAction;
use super::state::{FormState, MoneyField, MoneyInputs, TextField};

fn money_text(value: Option<rust_decimal::Decimal>) -> String {
    value.map(|v| v.normalize().to_string()).unwrap_or_default()
}

fn load_challan(
    today: chrono::NaiveDate,
    challan: LorryHireChallan,
    broker: Option<Party>,
    lorry_owner: Option<Party>,
) -> FormState {
    let mut state = FormState::new(today);

    state.editing_id = Some(challan.id);
    state.challan_number = challan.challan_number;
    state.challan_date = challan.challan_date.or(state.challan_date);
    state.lorry_hire_date = challan.lorry_hire_date.or(state.lorry_hire_date);
    state.vehicle_no = challan.vehicle_no;
    state.slip_no = challan.slip_no;
    state.remarks = challan.remarks;

    state.broker = broker.or(challan.broker);
    state.lorry_owner = lorry_owner.or(challan.lorry_owner);
    state.destination_id = challan
        .destination_id
        .or_else(|| challan.destination.as_ref().map(|d| d.id));

    state.consignments = SelectedConsignments::from_records(challan.consignments);

    state.inputs = MoneyInputs {
        rate: money_text(challan.rate),
        lorry_hire: money_text(challan.lorry_hire),
        loading_charges: money_text(challan.loading_charges),
        unloading_charges: money_text(challan.unloading_charges),
        diesel_advance: money_text(challan.diesel_advance),
        gst_amount: money_text(challan.gst_amount),
        advance_paid: money_text(challan.advance_paid),
    };
    state.lorry_hire_overridden = challan.lorry_hire.is_some();
    state.gst_applicable = challan.gst_applicable;

    let mut tds = state.tds.clone();
    tds.rate = challan.tds_percent;
    tds = apply_tds_policy(
        &tds,
        challan.tds_applicable,
        state.broker.as_ref(),
        state.lorry_owner.as_ref(),
    );
    if tds.pan_number.is_empty() {
        if let Some(pan) = challan.pan_card_used.as_deref() {
            tds = enter_pan(&tds, pan);
        }
    }
    state.tds = tds;

    state
}

/// Apply one action and re-derive totals and settlement
pub fn reduce(state: &FormState, action: FormAction) -> FormState {
    let mut next = state.clone();

    match action {
        FormAction::SetText(field, value) => match field {
            TextField::ChallanNumber => next.challan_number = value,
            TextField::VehicleNo => next.vehicle_no = value,
            TextField::SlipNo => next.slip_no = value,
            TextField::Remarks => next.remarks = value,
        },
        FormAction::SetChallanDate(date) => next.challan_date = date,
        FormAction::SetLorryHireDate(date) => next.lorry_hire_date = date,
        FormAction::SetMoney(field, value) => {
            if field == MoneyField::LorryHire {
                next.lorry_hire_overridden = !value.trim().is_empty();
            }
            next.inputs.set(field, value);
        }
        FormAction::SetGstApplicable(applicable) => next.gst_applicable = applicable,

        FormAction::AddConsignment(record) => {
            next.consignments.add(record);
        }
        FormAction::RemoveConsignment(id) => {
            next.consignments.remove(id);
        }

        FormAction::SelectBroker(party) => {
            next.tds = on_party_selected(&next.tds, PartyKind::Broker, party.as_ref());
            next.broker = party;
        }
        FormAction::SelectLorryOwner(party) => {
            next.tds = on_party_selected(&next.tds, PartyKind::LorryOwner, party.as_ref());
            next.lorry_owner = party;
        }
        FormAction::SetDestination(id) => next.destination_id = id,

        FormAction::SetTdsApplicable(policy) => {
            next.tds = apply_tds_policy(
                &next.tds,
                policy,
                next.broker.as_ref(),
                next.lorry_owner.as_ref(),
            );
        }
        FormAction::SetTdsRate(text) => {
            next.tds.rate = if text.trim().is_empty() {
                None
            } else {
                Some(coerce_amount(&text))
            };
        }
        FormAction::SetPan(pan) => next.tds = enter_pan(&next.tds, &pan),

        FormAction::Load {
            challan,
            broker,
            lorry_owner,
            today,
        } => next = load_challan(today, *challan, broker, lorry_owner),
        FormAction::Reset { today } => next = FormState::new(today),
    }

    next.derive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use lorry_hire_domain::model::{
        ConsignmentRecord, ConsignmentSearchHit, PanSource, TdsApplicable, TdsHint,
    };
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    fn hit(id: i64, packages: u64, weight: rust_decimal::Decimal) -> ConsignmentRecord {
        ConsignmentRecord::SearchHit(ConsignmentSearchHit {
            id,
            cn_number: format!("CN-{:04}", id),
            packages,
            charge_weight: Some(weight),
            ..Default::default()
        })
    }

    fn party(id: i64, pan: Option<&str>) -> Party {
        Party {
            id,
            name: format!("Party {}", id),
            pan_number: pan.map(str::to_string),
        }
    }

    fn run(actions: Vec<FormAction>) -> FormState {
        actions
            .into_iter()
            .fold(FormState::new(today()), |state, action| reduce(&state, action))
    }

    #[test]
    fn test_new_form_is_dated_today_and_zeroed() {
        let state = FormState::new(today());
        assert_eq!(state.challan_date, Some(today()));
        assert_eq!(state.lorry_hire_date, Some(today()));
        assert_eq!(state.totals.total_packages, 0);
        assert_eq!(state.settlement.balance_payable, dec!(0));
    }

    #[test]
    fn test_worked_example() {
        let state = run(vec![
            FormAction::AddConsignment(hit(1, 40, dec!(300))),
            FormAction::AddConsignment(hit(2, 20, dec!(200))),
            FormAction::SetMoney(MoneyField::Rate, "10".into()),
            FormAction::SetMoney(MoneyField::LoadingCharges, "200".into()),
            FormAction::SetMoney(MoneyField::AdvancePaid, "1000".into()),
            FormAction::SelectLorryOwner(Some(party(7, Some("ABCDE1234F")))),
            FormAction::SetTdsApplicable(TdsApplicable::LorryOwner),
            FormAction::SetTdsRate("2".into()),
        ]);

        assert_eq!(state.totals.total_packages, 60);
        assert_eq!(state.totals.total_weight, dec!(500));
        assert_eq!(state.settlement.calculated_hire, dec!(5000));
        assert_eq!(state.effective_lorry_hire(), dec!(5000));
        assert_eq!(state.settlement.total_amount, dec!(5200));
        assert_eq!(state.settlement.tds_amount, dec!(100));
        assert_eq!(state.settlement.balance_payable, dec!(4100));
        assert_eq!(state.tds.pan_number, "ABCDE1234F");
        assert!(state.tds.pan_read_only);
    }

    #[test]
    fn test_typed_hire_overrides_until_cleared() {
        let base = run(vec![
            FormAction::AddConsignment(hit(1, 10, dec!(100))),
            FormAction::SetMoney(MoneyField::Rate, "12".into()),
        ]);
        assert_eq!(base.effective_lorry_hire(), dec!(1200));

        let typed = reduce(&base, FormAction::SetMoney(MoneyField::LorryHire, "1000".into()));
        assert!(typed.lorry_hire_overridden);
        assert_eq!(typed.settlement.total_amount, dec!(1000));
        assert_eq!(typed.settlement.calculated_hire, dec!(1200));

        let cleared = reduce(&typed, FormAction::SetMoney(MoneyField::LorryHire, " ".into()));
        assert!(!cleared.lorry_hire_overridden);
        assert_eq!(cleared.settlement.total_amount, dec!(1200));
    }

    #[test]
    fn test_duplicate_and_remove_consignment() {
        let state = run(vec![
            FormAction::AddConsignment(hit(1, 40, dec!(300))),
            FormAction::AddConsignment(hit(1, 40, dec!(300))),
        ]);
        assert_eq!(state.consignments.len(), 1);
        assert_eq!(state.totals.total_packages, 40);

        let removed = reduce(&state, FormAction::RemoveConsignment(1));
        assert!(removed.consignments.is_empty());
        assert_eq!(removed.totals.total_weight, dec!(0));

        let missing = reduce(&removed, FormAction::RemoveConsignment(99));
        assert_eq!(missing.totals, removed.totals);
    }

    #[test]
    fn test_garbage_money_counts_as_zero() {
        let state = run(vec![
            FormAction::SetMoney(MoneyField::LorryHire, "5000".into()),
            FormAction::SetMoney(MoneyField::LoadingCharges, "abc".into()),
        ]);
        assert_eq!(state.settlement.total_amount, dec!(5000));
        assert_eq!(state.inputs.loading_charges, "abc");
    }

    #[test]
    fn test_gst_counts_only_when_applicable() {
        let state = run(vec![
            FormAction::SetMoney(MoneyField::LorryHire, "1000".into()),
            FormAction::SetMoney(MoneyField::GstAmount, "50".into()),
        ]);
        assert_eq!(state.settlement.total_amount, dec!(1000));
        let on = reduce(&state, FormAction::SetGstApplicable(true));
        assert_eq!(on.settlement.total_amount, dec!(1050));
    }

    #[test]
    fn test_broker_policy_without_pan_falls_back_to_manual() {
        let state = run(vec![
            FormAction::SelectBroker(Some(party(3, None))),
            FormAction::SetTdsApplicable(TdsApplicable::Broker),
        ]);
        assert_eq!(state.tds.pan_source, Some(PanSource::Manual));
        assert_eq!(state.tds.hint, Some(TdsHint::PanRequired));
        assert!(!state.tds.pan_read_only);

        let typed = reduce(&state, FormAction::SetPan("abcde1234f".into()));
        assert_eq!(typed.tds.pan_number, "ABCDE1234F");
        assert_eq!(typed.tds.hint, None);
    }

    #[test]
    fn test_reselecting_party_refreshes_pan() {
        let state = run(vec![
            FormAction::SelectBroker(Some(party(3, Some("AAAAA1111A")))),
            FormAction::SetTdsApplicable(TdsApplicable::Broker),
            FormAction::SelectBroker(Some(party(4, Some("BBBBB2222B")))),
        ]);
        assert_eq!(state.tds.pan_number, "BBBBB2222B");

        let owner_change = reduce(
            &state,
            FormAction::SelectLorryOwner(Some(party(7, Some("CCCCC3333C")))),
        );
        assert_eq!(owner_change.tds.pan_number, "BBBBB2222B");
    }

    #[test]
    fn test_policy_no_clears_rate_and_tds() {
        let state = run(vec![
            FormAction::SetMoney(MoneyField::LorryHire, "5000".into()),
            FormAction::SetTdsApplicable(TdsApplicable::Yes),
            FormAction::SetTdsRate("2".into()),
        ]);
        assert_eq!(state.settlement.tds_amount, dec!(100));

        let off = reduce(&state, FormAction::SetTdsApplicable(TdsApplicable::No));
        assert_eq!(off.tds.rate, None);
        assert_eq!(off.settlement.tds_amount, dec!(0));
        assert_eq!(off.settlement.balance_payable, dec!(5000));
    }

    #[test]
    fn test_load_populates_edit_form() {
        let challan = LorryHireChallan {
            id: 42,
            challan_number: "LHC-042".into(),
            rate: Some(dec!(10)),
            lorry_hire: Some(dec!(4800)),
            advance_paid: Some(dec!(800)),
            tds_applicable: TdsApplicable::Yes,
            tds_percent: Some(dec!(1)),
            pan_card_used: Some("ZZZZZ9999Z".into()),
            consignments: vec![hit(1, 40, dec!(300)), hit(2, 20, dec!(200))],
            ..Default::default()
        };

        let state = reduce(
            &FormState::new(today()),
            FormAction::Load {
                challan: Box::new(challan),
                broker: None,
                lorry_owner: None,
                today: today(),
            },
        );

        assert_eq!(state.editing_id, Some(42));
        assert!(state.lorry_hire_overridden);
        assert_eq!(state.inputs.rate, "10");
        assert_eq!(state.totals.total_weight, dec!(500));
        assert_eq!(state.effective_lorry_hire(), dec!(4800));
        assert_eq!(state.settlement.tds_amount, dec!(48));
        assert_eq!(state.settlement.balance_payable, dec!(3952));
        assert_eq!(state.tds.pan_number, "ZZZZZ9999Z");
        assert_eq!(state.challan_date, Some(today()));
    }

    #[test]
    fn test_load_dates_come_from_record_or_action() {
        let undated = reduce(&FormState::new(today()), FormAction::SetChallanDate(None));
        let hire_date = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();
        let challan = LorryHireChallan {
            id: 7,
            lorry_hire_date: Some(hire_date),
            ..Default::default()
        };

        let state = reduce(
            &undated,
            FormAction::Load {
                challan: Box::new(challan),
                broker: None,
                lorry_owner: None,
                today: today(),
            },
        );

        assert_eq!(state.challan_date, Some(today()));
        assert_eq!(state.lorry_hire_date, Some(hire_date));
    }

    #[test]
    fn test_reset_clears_everything() {
        let state = run(vec![
            FormAction::AddConsignment(hit(1, 40, dec!(300))),
            FormAction::SetText(TextField::VehicleNo, "GJ05AB1234".into()),
        ]);
        let reset = reduce(&state, FormAction::Reset { today: today() });
        assert_eq!(reset, FormState::new(today()));
    }
}
