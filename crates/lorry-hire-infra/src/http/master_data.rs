//! Consignment search and party master data endpoints

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;

use lorry_hire_domain::model::{ConsignmentRecord, Destination, Party};
use lorry_hire_domain::repository::{ConsignmentSearch, PartyDirectory};
use lorry_hire_types::{EntityId, Result, SessionContext};

use super::ApiClient;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchParams<'a> {
    query: &'a str,
    company_id: EntityId,
    financial_year_id: EntityId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompanyParams {
    company_id: EntityId,
}

#[async_trait]
impl ConsignmentSearch for ApiClient {
    async fn search(&self, query: &str, ctx: &SessionContext) -> Result<Vec<ConsignmentRecord>> {
        let params = SearchParams {
            query,
            company_id: ctx.company_id,
            financial_year_id: ctx.financial_year_id,
        };
        let builder = self
            .request(Method::GET, "consignments/search")
            .query(&params);
        self.fetch_list(builder).await
    }
}

#[async_trait]
impl PartyDirectory for ApiClient {
    async fn brokers(&self, company_id: EntityId) -> Result<Vec<Party>> {
        let builder = self
            .request(Method::GET, "brokers")
            .query(&CompanyParams { company_id });
        self.fetch_list(builder).await
    }

    async fn lorry_owners(&self, company_id: EntityId) -> Result<Vec<Party>> {
        let builder = self
            .request(Method::GET, "lorry-owners")
            .query(&CompanyParams { company_id });
        self.fetch_list(builder).await
    }

    async fn destinations(&self) -> Result<Vec<Destination>> {
        self.fetch_list(self.request(Method::GET, "destinations")).await
    }
}
