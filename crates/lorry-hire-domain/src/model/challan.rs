//! Lorry hire challan records and the submission payload

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use lorry_hire_types::{EntityId, SessionContext};

use super::consignment::ConsignmentRecord;
use super::lenient;
use super::party::{Destination, Party};
use super::tds::TdsApplicable;

/// A challan as returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LorryHireChallan {
    pub id: EntityId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub challan_number: String,
    #[serde(default, deserialize_with = "lenient::date")]
    pub challan_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub lorry_hire_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub vehicle_no: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub slip_no: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub remarks: String,

    #[serde(default)]
    pub lorry_owner_id: Option<EntityId>,
    #[serde(default)]
    pub broker_id: Option<EntityId>,
    #[serde(default)]
    pub destination_id: Option<EntityId>,
    #[serde(default)]
    pub lorry_owner: Option<Party>,
    #[serde(default)]
    pub broker: Option<Party>,
    #[serde(default)]
    pub destination: Option<Destination>,

    #[serde(default, deserialize_with = "lenient::count")]
    pub total_packages: u64,
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub total_weight: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub rate: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub lorry_hire: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub advance_paid: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub balance_payable: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub loading_charges: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub unloading_charges: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub diesel_advance: Option<Decimal>,
    #[serde(default)]
    pub gst_applicable: bool,
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub gst_amount: Option<Decimal>,

    #[serde(default)]
    pub tds_applicable: TdsApplicable,
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub tds_percent: Option<Decimal>,
    #[serde(default)]
    pub pan_card_used: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub tds_amount: Option<Decimal>,

    #[serde(default)]
    pub consignments: Vec<ConsignmentRecord>,

    #[serde(default)]
    pub is_settled: bool,
    #[serde(default, deserialize_with = "lenient::date")]
    pub payment_date: Option<NaiveDate>,
}

impl LorryHireChallan {
    /// Owner id, whether sent flat or as an embedded relation
    pub fn owner_id(&self) -> Option<EntityId> {
        self.lorry_owner_id
            .or_else(|| self.lorry_owner.as_ref().map(|p| p.id))
    }

    pub fn broker_ref_id(&self) -> Option<EntityId> {
        self.broker_id.or_else(|| self.broker.as_ref().map(|p| p.id))
    }
}

/// Body of `POST /lorry-hire` and `PATCH /lorry-hire/{id}`
///
/// Consignments travel as ids only. TDS fields use the backend's names
/// (`tdsPercent`, `panCardUsed`). Blank money inputs are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallanPayload {
    pub challan_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challan_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lorry_hire_date: Option<NaiveDate>,
    pub vehicle_no: String,
    pub slip_no: String,
    pub remarks: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lorry_owner_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broker_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_id: Option<EntityId>,

    pub total_packages: u64,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_weight: Decimal,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub rate: Option<Decimal>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub lorry_hire: Option<Decimal>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub advance_paid: Option<Decimal>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub loading_charges: Option<Decimal>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub unloading_charges: Option<Decimal>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub diesel_advance: Option<Decimal>,
    pub gst_applicable: bool,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub gst_amount: Option<Decimal>,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_amount: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub balance_payable: Decimal,

    pub tds_applicable: TdsApplicable,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub tds_percent: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pan_card_used: Option<String>,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub tds_amount: Decimal,

    pub consignment_ids: Vec<EntityId>,

    pub company_id: EntityId,
    pub branch_id: EntityId,
    pub financial_year_id: EntityId,
}

/// Query parameters for `GET /lorry-hire`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallanFilter {
    pub company_id: EntityId,
    pub branch_id: EntityId,
    pub financial_year_id: EntityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challan_number: Option<String>,
}

impl ChallanFilter {
    pub fn for_context(ctx: &SessionContext) -> Self {
        Self {
            company_id: ctx.company_id,
            branch_id: ctx.branch_id,
            financial_year_id: ctx.financial_year_id,
            challan_number: None,
        }
    }

    /// Narrow to a challan number search; blank input means no filter
    pub fn with_challan_number(mut self, search: Option<&str>) -> Self {
        self.challan_number = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deserialize_backend_record() {
        let json = r#"{
            "id": 42,
            "challanNumber": "LHC-042",
            "challanDate": "2024-04-01T00:00:00.000Z",
            "vehicleNo": "GJ05AB1234",
            "lorryOwnerId": 7,
            "broker": {"id": 3, "name": "Sharma Roadlines", "panNumber": "ABCDE1234F"},
            "rate": "10",
            "lorryHire": 5000,
            "loadingCharges": null,
            "tdsApplicable": "broker",
            "tdsPercent": "2",
            "consignments": [
                {"id": 1, "consignmentId": 17, "consignment": {"cnNumber": "CN-17", "packages": 4, "netWeight": 500}}
            ]
        }"#;
        let challan: LorryHireChallan = serde_json::from_str(json).unwrap();
        assert_eq!(challan.challan_number, "LHC-042");
        assert_eq!(challan.challan_date, NaiveDate::from_ymd_opt(2024, 4, 1));
        assert_eq!(challan.owner_id(), Some(7));
        assert_eq!(challan.broker_ref_id(), Some(3));
        assert_eq!(challan.rate, Some(dec!(10)));
        assert_eq!(challan.lorry_hire, Some(dec!(5000)));
        assert_eq!(challan.loading_charges, None);
        assert_eq!(challan.tds_applicable, TdsApplicable::Broker);
        assert_eq!(challan.tds_percent, Some(dec!(2)));
        assert_eq!(challan.consignments.len(), 1);
        assert_eq!(challan.consignments[0].id(), 17);
    }

    #[test]
    fn test_payload_wire_names() {
        let payload = ChallanPayload {
            challan_number: "LHC-1".to_string(),
            lorry_hire: Some(dec!(5000)),
            total_weight: dec!(500.25),
            tds_applicable: TdsApplicable::Yes,
            tds_percent: Some(dec!(2)),
            pan_card_used: Some("ABCDE1234F".to_string()),
            tds_amount: dec!(100),
            consignment_ids: vec![17, 18],
            company_id: 1,
            branch_id: 2,
            financial_year_id: 3,
            ..Default::default()
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["lorryHire"], serde_json::json!(5000.0));
        assert_eq!(value["totalWeight"], serde_json::json!(500.25));
        assert_eq!(value["tdsApplicable"], "yes");
        assert_eq!(value["tdsPercent"], serde_json::json!(2.0));
        assert_eq!(value["panCardUsed"], "ABCDE1234F");
        assert_eq!(value["consignmentIds"], serde_json::json!([17, 18]));
        assert!(value.get("rate").is_none());
        assert!(value.get("tdsRate").is_none());
        assert!(value.get("panNumber").is_none());
    }

    #[test]
    fn test_filter_ignores_blank_search() {
        let ctx = SessionContext::new(1, 2, 3);
        let filter = ChallanFilter::for_context(&ctx).with_challan_number(Some("  "));
        assert_eq!(filter.challan_number, None);
        let filter = ChallanFilter::for_context(&ctx).with_challan_number(Some(" LHC-9 "));
        assert_eq!(filter.challan_number.as_deref(), Some("LHC-9"));
    }
}
