//! Master data referenced by a challan: brokers, lorry owners, destinations

use serde::{Deserialize, Serialize};

use lorry_hire_types::EntityId;

use super::lenient;

/// Which side of the hire a party sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartyKind {
    Broker,
    LorryOwner,
}

impl std::fmt::Display for PartyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PartyKind::Broker => write!(f, "broker"),
            PartyKind::LorryOwner => write!(f, "lorry owner"),
        }
    }
}

/// Broker or lorry owner. Many real records carry no PAN.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub id: EntityId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    /// Lorry owners send `panNumber`, brokers send `panCard`
    #[serde(default, alias = "panCard")]
    pub pan_number: Option<String>,
}

impl Party {
    /// The PAN if one is actually recorded
    pub fn pan(&self) -> Option<&str> {
        self.pan_number
            .as_deref()
            .map(str::trim)
            .filter(|pan| !pan.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: EntityId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pan_absent_or_blank() {
        let json = r#"[{"id": 1, "name": "Sharma Roadlines"},
                       {"id": 2, "name": "Gupta", "panNumber": "  "},
                       {"id": 3, "name": "Mehta", "panNumber": null}]"#;
        let parties: Vec<Party> = serde_json::from_str(json).unwrap();
        assert!(parties.iter().all(|p| p.pan().is_none()));
    }

    #[test]
    fn test_broker_pan_card_field() {
        let json = r#"{"id": 3, "name": "Sharma", "panCard": "ABCDE1234F", "tdsPercentage": 1}"#;
        let broker: Party = serde_json::from_str(json).unwrap();
        assert_eq!(broker.pan(), Some("ABCDE1234F"));
    }

    #[test]
    fn test_pan_trimmed() {
        let party = Party {
            id: 9,
            name: "Rathod Transport".to_string(),
            pan_number: Some(" ABCDE1234F ".to_string()),
        };
        assert_eq!(party.pan(), Some("ABCDE1234F"));
    }
}
