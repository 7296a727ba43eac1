//! `/lorry-hire` endpoints

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Method;
use serde::Serialize;

use lorry_hire_domain::model::{ChallanFilter, ChallanPayload, LorryHireChallan};
use lorry_hire_domain::repository::ChallanRepository;
use lorry_hire_types::{EntityId, Error, Result};

use super::ApiClient;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConsignmentIdsBody<'a> {
    consignment_ids: &'a [EntityId],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SettleBody {
    payment_date: NaiveDate,
}

#[async_trait]
impl ChallanRepository for ApiClient {
    async fn create(&self, payload: &ChallanPayload) -> Result<LorryHireChallan> {
        tracing::debug!(challan_number = %payload.challan_number, "creating lorry hire");
        let builder = self.request(Method::POST, "lorry-hire").json(payload);
        self.fetch_record(builder).await
    }

    async fn update(&self, id: EntityId, payload: &ChallanPayload) -> Result<LorryHireChallan> {
        tracing::debug!(id, "updating lorry hire");
        let builder = self
            .request(Method::PATCH, &format!("lorry-hire/{}", id))
            .json(payload);
        self.fetch_record(builder).await
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<LorryHireChallan>> {
        let builder = self.request(Method::GET, &format!("lorry-hire/{}", id));
        match self.fetch_record(builder).await {
            Ok(challan) => Ok(Some(challan)),
            Err(Error::Api(e)) if e.status() == Some(404) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn find_all(&self, filter: &ChallanFilter) -> Result<Vec<LorryHireChallan>> {
        let builder = self.request(Method::GET, "lorry-hire").query(filter);
        self.fetch_list(builder).await
    }

    async fn delete(&self, id: EntityId) -> Result<()> {
        let builder = self.request(Method::DELETE, &format!("lorry-hire/{}", id));
        self.send(builder).await?;
        Ok(())
    }

    async fn add_consignments(&self, id: EntityId, consignment_ids: &[EntityId]) -> Result<()> {
        let builder = self
            .request(Method::POST, &format!("lorry-hire/{}/consignments", id))
            .json(&ConsignmentIdsBody { consignment_ids });
        self.send(builder).await?;
        Ok(())
    }

    async fn remove_consignment(&self, id: EntityId, consignment_id: EntityId) -> Result<()> {
        let path = format!("lorry-hire/{}/consignments/{}", id, consignment_id);
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    async fn settle(&self, id: EntityId, payment_date: NaiveDate) -> Result<()> {
        let builder = self
            .request(Method::POST, &format!("lorry-hire/{}/settle", id))
            .json(&SettleBody { payment_date });
        self.send(builder).await?;
        Ok(())
    }
}
