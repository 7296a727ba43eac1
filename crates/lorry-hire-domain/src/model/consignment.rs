//! Consignment (CN) records
//!
//! A consignment reaches the challan form in one of two shapes: a flat search
//! hit from `/consignments/search`, or a relation row embedded in a persisted
//! challan. Both normalize into the canonical [`Consignment`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use lorry_hire_types::EntityId;

use super::lenient;

const UNKNOWN_UNIT: &str = "-";

/// Route endpoint reference (id and display name as the backend sends them)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationRef {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub name: Option<String>,
}

impl DestinationRef {
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_UNIT)
    }
}

/// Canonical consignment as held in the selected set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consignment {
    pub id: EntityId,
    pub cn_number: String,
    pub packages: u64,
    pub net_weight: Decimal,
    pub package_uom: String,
    pub rate_on: String,
    pub from_destination: DestinationRef,
    pub to_destination: DestinationRef,
}

/// Flat record returned by consignment search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsignmentSearchHit {
    pub id: EntityId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub cn_number: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub packages: u64,
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub charge_weight: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub net_weight: Option<Decimal>,
    #[serde(default)]
    pub package_uom: Option<String>,
    #[serde(default)]
    pub rate_on: Option<String>,
    #[serde(default)]
    pub from_destination: Option<DestinationRef>,
    #[serde(default)]
    pub to_destination: Option<DestinationRef>,
}

/// Consignment fields nested inside a challan relation row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsignmentDetail {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub cn_number: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub packages: u64,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub net_weight: Decimal,
    #[serde(default)]
    pub package_uom: Option<String>,
    #[serde(default)]
    pub rate_on: Option<String>,
    #[serde(default)]
    pub from_destination: Option<DestinationRef>,
    #[serde(default)]
    pub to_destination: Option<DestinationRef>,
}

/// Relation row `{ id, consignmentId?, consignment: {...} }` from a saved challan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedConsignment {
    pub id: EntityId,
    #[serde(default)]
    pub consignment_id: Option<EntityId>,
    pub consignment: ConsignmentDetail,
}

/// Either wire shape of a consignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConsignmentRecord {
    Persisted(PersistedConsignment),
    SearchHit(ConsignmentSearchHit),
}

fn unit_or_dash(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_UNIT.to_string())
}

impl ConsignmentRecord {
    /// Consignment identity used for de-duplication and submission
    ///
    /// A relation row's own `id` is only the last resort; `consignmentId` or
    /// the nested `consignment.id` name the consignment itself.
    pub fn id(&self) -> EntityId {
        match self {
            ConsignmentRecord::Persisted(row) => row
                .consignment_id
                .or(row.consignment.id)
                .unwrap_or(row.id),
            ConsignmentRecord::SearchHit(hit) => hit.id,
        }
    }

    pub fn normalize(self) -> Consignment {
        let id = self.id();
        match self {
            ConsignmentRecord::Persisted(row) => {
                let detail = row.consignment;
                Consignment {
                    id,
                    cn_number: detail.cn_number,
                    packages: detail.packages,
                    net_weight: detail.net_weight,
                    package_uom: unit_or_dash(detail.package_uom),
                    rate_on: unit_or_dash(detail.rate_on),
                    from_destination: detail.from_destination.unwrap_or_default(),
                    to_destination: detail.to_destination.unwrap_or_default(),
                }
            }
            ConsignmentRecord::SearchHit(hit) => Consignment {
                id,
                cn_number: hit.cn_number,
                packages: hit.packages,
                net_weight: hit.charge_weight.or(hit.net_weight).unwrap_or_default(),
                package_uom: unit_or_dash(hit.package_uom),
                rate_on: unit_or_dash(hit.rate_on),
                from_destination: hit.from_destination.unwrap_or_default(),
                to_destination: hit.to_destination.unwrap_or_default(),
            },
        }
    }
}

impl From<ConsignmentSearchHit> for ConsignmentRecord {
    fn from(hit: ConsignmentSearchHit) -> Self {
        ConsignmentRecord::SearchHit(hit)
    }
}

impl From<PersistedConsignment> for ConsignmentRecord {
    fn from(row: PersistedConsignment) -> Self {
        ConsignmentRecord::Persisted(row)
    }
}

impl From<ConsignmentRecord> for Consignment {
    fn from(record: ConsignmentRecord) -> Self {
        record.normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_search_hit_shape() {
        let json = r#"{
            "id": 17,
            "cnNumber": "CN-0017",
            "packages": 40,
            "chargeWeight": "1250.5",
            "packageUom": "BAGS",
            "fromDestination": {"id": 1, "name": "Surat"},
            "toDestination": {"id": 2, "name": "Pune"}
        }"#;
        let record: ConsignmentRecord = serde_json::from_str(json).unwrap();
        assert!(matches!(record, ConsignmentRecord::SearchHit(_)));
        assert_eq!(record.id(), 17);

        let cn = record.normalize();
        assert_eq!(cn.cn_number, "CN-0017");
        assert_eq!(cn.packages, 40);
        assert_eq!(cn.net_weight, dec!(1250.5));
        assert_eq!(cn.package_uom, "BAGS");
        assert_eq!(cn.rate_on, "-");
        assert_eq!(cn.to_destination.label(), "Pune");
    }

    #[test]
    fn test_search_hit_falls_back_to_net_weight() {
        let json = r#"{"id": 3, "cnNumber": "CN-3", "netWeight": 80}"#;
        let record: ConsignmentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.normalize().net_weight, dec!(80));
    }

    #[test]
    fn test_persisted_shape() {
        let json = r#"{
            "id": 901,
            "consignmentId": 17,
            "consignment": {
                "cnNumber": "CN-0017",
                "packages": "40",
                "netWeight": 1250.5,
                "packageUom": "BAGS",
                "rateOn": "KG",
                "fromDestination": null
            }
        }"#;
        let record: ConsignmentRecord = serde_json::from_str(json).unwrap();
        assert!(matches!(record, ConsignmentRecord::Persisted(_)));
        assert_eq!(record.id(), 17);

        let cn = record.normalize();
        assert_eq!(cn.packages, 40);
        assert_eq!(cn.net_weight, dec!(1250.5));
        assert_eq!(cn.rate_on, "KG");
        assert_eq!(cn.from_destination, DestinationRef::default());
    }

    #[test]
    fn test_persisted_uses_nested_consignment_id() {
        let json = r#"{
            "id": 901,
            "lorryHireId": 42,
            "consignment": {"id": 17, "cnNumber": "CN-17", "packages": 40, "netWeight": 1250}
        }"#;
        let record: ConsignmentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id(), 17);
        assert_eq!(record.normalize().id, 17);
    }

    #[test]
    fn test_persisted_consignment_id_wins_over_nested_id() {
        let json = r#"{"id": 901, "consignmentId": 17, "consignment": {"id": 99}}"#;
        let record: ConsignmentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id(), 17);
    }

    #[test]
    fn test_persisted_without_any_consignment_id_uses_row_id() {
        let json = r#"{"id": 5, "consignment": {"cnNumber": "CN-5"}}"#;
        let record: ConsignmentRecord = serde_json::from_str(json).unwrap();
        let cn = record.normalize();
        assert_eq!(cn.id, 5);
        assert_eq!(cn.packages, 0);
        assert_eq!(cn.net_weight, Decimal::ZERO);
        assert_eq!(cn.package_uom, "-");
    }
}
