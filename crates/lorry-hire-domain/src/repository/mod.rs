//! Collaborator traits for the backend API
//!
//! The backend owns persistence, validation and id generation. These traits
//! describe the contracts the challan form depends on.

use async_trait::async_trait;
use chrono::NaiveDate;

use lorry_hire_types::{EntityId, Result, SessionContext};

use crate::model::{
    ChallanFilter, ChallanPayload, ConsignmentRecord, Destination, LorryHireChallan, Party,
};

/// Lorry hire challan records
#[async_trait]
pub trait ChallanRepository: Send + Sync {
    async fn create(&self, payload: &ChallanPayload) -> Result<LorryHireChallan>;

    async fn update(&self, id: EntityId, payload: &ChallanPayload) -> Result<LorryHireChallan>;

    /// `None` when the backend reports the record as missing
    async fn find_by_id(&self, id: EntityId) -> Result<Option<LorryHireChallan>>;

    async fn find_all(&self, filter: &ChallanFilter) -> Result<Vec<LorryHireChallan>>;

    async fn delete(&self, id: EntityId) -> Result<()>;

    async fn add_consignments(&self, id: EntityId, consignment_ids: &[EntityId]) -> Result<()>;

    async fn remove_consignment(&self, id: EntityId, consignment_id: EntityId) -> Result<()>;

    async fn settle(&self, id: EntityId, payment_date: NaiveDate) -> Result<()>;
}

/// Free-text consignment lookup scoped to company and financial year
#[async_trait]
pub trait ConsignmentSearch: Send + Sync {
    async fn search(&self, query: &str, ctx: &SessionContext) -> Result<Vec<ConsignmentRecord>>;
}

/// Broker, lorry owner and destination master data
#[async_trait]
pub trait PartyDirectory: Send + Sync {
    async fn brokers(&self, company_id: EntityId) -> Result<Vec<Party>>;

    async fn lorry_owners(&self, company_id: EntityId) -> Result<Vec<Party>>;

    async fn destinations(&self) -> Result<Vec<Destination>>;
}
