//! TDS policy transitions
//!
//! Entering a policy resets the PAN fields and then fills them:
//! - `no`: rate cleared, no PAN
//! - `broker` / `lorryOwner`: PAN copied read-only from the selected party,
//!   or an editable blank PAN plus [`TdsHint::PanRequired`] when it has none
//! - `yes`: blank editable PAN regardless of the selected parties
//!
//! Both policy changes and party re-selection go through [`apply_tds_policy`],
//! so the two paths cannot drift apart.

use crate::model::{PanSource, Party, PartyKind, TdsApplicable, TdsHint, TdsState};

fn fill_from_party(state: &mut TdsState, party: Option<&Party>, source: PanSource) {
    match party.and_then(Party::pan) {
        Some(pan) => {
            state.pan_number = pan.to_string();
            state.pan_source = Some(source);
            state.pan_read_only = true;
        }
        None => {
            state.pan_source = Some(PanSource::Manual);
            state.hint = Some(TdsHint::PanRequired);
        }
    }
}

pub fn apply_tds_policy(
    state: &TdsState,
    policy: TdsApplicable,
    broker: Option<&Party>,
    lorry_owner: Option<&Party>,
) -> TdsState {
    let mut next = TdsState {
        applicable: policy,
        rate: state.rate,
        ..TdsState::default()
    };

    match policy {
        TdsApplicable::No => next.rate = None,
        TdsApplicable::Broker => fill_from_party(&mut next, broker, PanSource::Broker),
        TdsApplicable::LorryOwner => fill_from_party(&mut next, lorry_owner, PanSource::LorryOwner),
        TdsApplicable::Yes => next.pan_source = Some(PanSource::Manual),
    }

    next
}

/// Re-run the auto-fill after a broker or owner is (re)selected
///
/// Only matters when the active policy sources its PAN from that kind of
/// party; otherwise the state is returned unchanged.
pub fn on_party_selected(state: &TdsState, kind: PartyKind, party: Option<&Party>) -> TdsState {
    match (state.applicable, kind) {
        (TdsApplicable::Broker, PartyKind::Broker) => {
            apply_tds_policy(state, TdsApplicable::Broker, party, None)
        }
        (TdsApplicable::LorryOwner, PartyKind::LorryOwner) => {
            apply_tds_policy(state, TdsApplicable::LorryOwner, None, party)
        }
        _ => state.clone(),
    }
}

/// Manual PAN entry; ignored while the PAN is auto-filled
pub fn enter_pan(state: &TdsState, pan: &str) -> TdsState {
    if state.pan_read_only || !state.applicable.deducts() {
        return state.clone();
    }
    let pan = pan.trim().to_uppercase();
    TdsState {
        hint: if pan.is_empty() && state.pan_source == Some(PanSource::Manual) {
            state.hint
        } else {
            None
        },
        pan_number: pan,
        pan_source: Some(PanSource::Manual),
        ..state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn party(id: i64, pan: Option<&str>) -> Party {
        Party {
            id,
            name: format!("Party {}", id),
            pan_number: pan.map(str::to_string),
        }
    }

    fn with_rate() -> TdsState {
        TdsState {
            rate: Some(dec!(2)),
            ..TdsState::default()
        }
    }

    #[test]
    fn test_broker_with_pan_is_read_only() {
        let broker = party(1, Some("ABCDE1234F"));
        let next = apply_tds_policy(&with_rate(), TdsApplicable::Broker, Some(&broker), None);
        assert_eq!(next.pan_number, "ABCDE1234F");
        assert!(next.pan_read_only);
        assert_eq!(next.pan_source, Some(PanSource::Broker));
        assert_eq!(next.hint, None);
        assert_eq!(next.rate, Some(dec!(2)));
    }

    #[test]
    fn test_broker_without_pan_falls_back_to_manual() {
        let broker = party(1, None);
        let next = apply_tds_policy(&with_rate(), TdsApplicable::Broker, Some(&broker), None);
        assert_eq!(next.pan_number, "");
        assert!(!next.pan_read_only);
        assert_eq!(next.pan_source, Some(PanSource::Manual));
        assert_eq!(next.hint, Some(TdsHint::PanRequired));
    }

    #[test]
    fn test_no_broker_selected_falls_back_to_manual() {
        let next = apply_tds_policy(&TdsState::default(), TdsApplicable::Broker, None, None);
        assert_eq!(next.pan_source, Some(PanSource::Manual));
        assert_eq!(next.hint, Some(TdsHint::PanRequired));
    }

    #[test]
    fn test_owner_symmetric_to_broker() {
        let broker = party(1, Some("BROKR1111B"));
        let owner = party(2, Some("OWNER2222O"));
        let next = apply_tds_policy(
            &TdsState::default(),
            TdsApplicable::LorryOwner,
            Some(&broker),
            Some(&owner),
        );
        assert_eq!(next.pan_number, "OWNER2222O");
        assert_eq!(next.pan_source, Some(PanSource::LorryOwner));
        assert!(next.pan_read_only);
    }

    #[test]
    fn test_manual_policy_ignores_party_pan() {
        let broker = party(1, Some("ABCDE1234F"));
        let filled = apply_tds_policy(&TdsState::default(), TdsApplicable::Broker, Some(&broker), None);
        let next = apply_tds_policy(&filled, TdsApplicable::Yes, Some(&broker), None);
        assert_eq!(next.pan_number, "");
        assert!(!next.pan_read_only);
        assert_eq!(next.pan_source, Some(PanSource::Manual));
    }

    #[test]
    fn test_no_clears_rate_and_pan() {
        let broker = party(1, Some("ABCDE1234F"));
        let filled = apply_tds_policy(&with_rate(), TdsApplicable::Broker, Some(&broker), None);
        let next = apply_tds_policy(&filled, TdsApplicable::No, Some(&broker), None);
        assert_eq!(next, TdsState::default());
    }

    #[test]
    fn test_reselecting_broker_refills() {
        let first = party(1, Some("AAAAA1111A"));
        let second = party(2, None);
        let state = apply_tds_policy(&with_rate(), TdsApplicable::Broker, Some(&first), None);

        let next = on_party_selected(&state, PartyKind::Broker, Some(&second));
        assert_eq!(next.pan_number, "");
        assert!(!next.pan_read_only);
        assert_eq!(next.hint, Some(TdsHint::PanRequired));
        assert_eq!(next.rate, Some(dec!(2)));

        let back = on_party_selected(&next, PartyKind::Broker, Some(&first));
        assert_eq!(back.pan_number, "AAAAA1111A");
        assert!(back.pan_read_only);
    }

    #[test]
    fn test_selecting_other_kind_leaves_state() {
        let broker = party(1, Some("AAAAA1111A"));
        let state = apply_tds_policy(&TdsState::default(), TdsApplicable::Broker, Some(&broker), None);
        let owner = party(2, Some("OWNER2222O"));
        assert_eq!(on_party_selected(&state, PartyKind::LorryOwner, Some(&owner)), state);
    }

    #[test]
    fn test_enter_pan_only_when_editable() {
        let broker = party(1, Some("AAAAA1111A"));
        let locked = apply_tds_policy(&TdsState::default(), TdsApplicable::Broker, Some(&broker), None);
        assert_eq!(enter_pan(&locked, "ZZZZZ9999Z"), locked);

        let manual = apply_tds_policy(&TdsState::default(), TdsApplicable::Broker, None, None);
        let typed = enter_pan(&manual, " abcde1234f ");
        assert_eq!(typed.pan_number, "ABCDE1234F");
        assert_eq!(typed.hint, None);
    }
}
