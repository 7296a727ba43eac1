//! Company / branch / financial-year context

use serde::{Deserialize, Serialize};

/// Backend identifier for master data and challan records
pub type EntityId = i64;

/// The active working context every query and submission is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    pub company_id: EntityId,
    pub branch_id: EntityId,
    pub financial_year_id: EntityId,
}

impl SessionContext {
    pub fn new(company_id: EntityId, branch_id: EntityId, financial_year_id: EntityId) -> Self {
        Self {
            company_id,
            branch_id,
            financial_year_id,
        }
    }
}

impl std::fmt::Display for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "company {} / branch {} / FY {}",
            self.company_id, self.branch_id, self.financial_year_id
        )
    }
}
