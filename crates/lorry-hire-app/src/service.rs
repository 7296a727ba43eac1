//! Challan form orchestration over the backend collaborators

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::OnceCell;

use lorry_hire_domain::model::{
    ChallanFilter, ConsignmentRecord, Destination, LorryHireChallan, Party,
};
use lorry_hire_domain::repository::{ChallanRepository, ConsignmentSearch, PartyDirectory};
use lorry_hire_types::{ApiError, EntityId, Error, SessionContext};

use crate::form::{build_payload, reduce, validate_for_submit, FormAction, FormState, ValidationIssue};
use crate::search::{meets_threshold, DebouncedSearch};

/// Failures surfaced to the form layer
#[derive(Debug, Error)]
pub enum FormServiceError {
    #[error("Lorry hire {0} not found")]
    NotFound(EntityId),

    #[error("Form is incomplete: {}", join_issues(.0))]
    Invalid(Vec<ValidationIssue>),

    /// The backend refused the request (4xx)
    #[error("Rejected by backend ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The backend could not be reached, failed, or answered with garbage
    #[error("Backend unavailable: {0}")]
    Unavailable(ApiError),

    #[error(transparent)]
    Other(Error),
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<Error> for FormServiceError {
    fn from(err: Error) -> Self {
        match err {
            Error::Api(ApiError::Status { status, message }) if status < 500 => {
                FormServiceError::Rejected { status, message }
            }
            Error::Api(api) => FormServiceError::Unavailable(api),
            other => FormServiceError::Other(other),
        }
    }
}

impl From<FormServiceError> for Error {
    fn from(err: FormServiceError) -> Self {
        match err {
            FormServiceError::NotFound(id) => Error::NotFound(format!("lorry hire {}", id)),
            FormServiceError::Invalid(issues) => Error::Validation(join_issues(&issues)),
            FormServiceError::Rejected { status, message } => {
                Error::Api(ApiError::Status { status, message })
            }
            FormServiceError::Unavailable(api) => Error::Api(api),
            FormServiceError::Other(err) => err,
        }
    }
}

pub type FormResult<T> = std::result::Result<T, FormServiceError>;

/// Master data needed to fill in a form
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyLists {
    pub brokers: Vec<Party>,
    pub lorry_owners: Vec<Party>,
    pub destinations: Vec<Destination>,
}

impl PartyLists {
    pub fn broker(&self, id: EntityId) -> Option<&Party> {
        self.brokers.iter().find(|p| p.id == id)
    }

    pub fn lorry_owner(&self, id: EntityId) -> Option<&Party> {
        self.lorry_owners.iter().find(|p| p.id == id)
    }
}

/// Form orchestrator for one company/branch/financial year
pub struct ChallanFormService<B: ?Sized> {
    backend: Arc<B>,
    ctx: SessionContext,
    min_chars: usize,
    debounce: Duration,
    parties: OnceCell<PartyLists>,
}

impl<B> ChallanFormService<B>
where
    B: ChallanRepository + ConsignmentSearch + PartyDirectory + ?Sized,
{
    pub fn new(backend: Arc<B>, ctx: SessionContext) -> Self {
        Self {
            backend,
            ctx,
            min_chars: 1,
            debounce: Duration::from_millis(300),
            parties: OnceCell::new(),
        }
    }

    pub fn with_search_settings(mut self, min_chars: usize, debounce: Duration) -> Self {
        self.min_chars = min_chars;
        self.debounce = debounce;
        self
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    pub fn new_form(&self, today: NaiveDate) -> FormState {
        FormState::new(today)
    }

    /// Brokers, lorry owners and destinations, fetched once per service
    pub async fn parties(&self) -> FormResult<&PartyLists> {
        self.parties
            .get_or_try_init(|| async {
                let company_id = self.ctx.company_id;
                let (brokers, lorry_owners, destinations) = tokio::try_join!(
                    self.backend.brokers(company_id),
                    self.backend.lorry_owners(company_id),
                    self.backend.destinations(),
                )?;
                tracing::debug!(
                    brokers = brokers.len(),
                    lorry_owners = lorry_owners.len(),
                    destinations = destinations.len(),
                    "loaded master data"
                );
                Ok::<_, FormServiceError>(PartyLists {
                    brokers,
                    lorry_owners,
                    destinations,
                })
            })
            .await
    }

    /// Saved challan as an edit form, with TDS state consistent with its parties
    pub async fn load_for_edit(&self, id: EntityId, today: NaiveDate) -> FormResult<FormState> {
        let challan = self
            .backend
            .find_by_id(id)
            .await?
            .ok_or(FormServiceError::NotFound(id))?;

        let parties = self.parties().await?;
        let broker = challan
            .broker_ref_id()
            .and_then(|bid| parties.broker(bid).cloned());
        let lorry_owner = challan
            .owner_id()
            .and_then(|oid| parties.lorry_owner(oid).cloned());

        let action = FormAction::Load {
            challan: Box::new(challan),
            broker,
            lorry_owner,
            today,
        };
        Ok(reduce(&FormState::new(today), action))
    }

    /// Immediate search; short queries return empty without calling the backend
    pub async fn search_consignments(&self, query: &str) -> FormResult<Vec<ConsignmentRecord>> {
        if !meets_threshold(query, self.min_chars) {
            return Ok(Vec::new());
        }
        Ok(self.backend.search(query.trim(), &self.ctx).await?)
    }

    pub fn debounced_search(&self) -> DebouncedSearch<B> {
        DebouncedSearch::new(
            Arc::clone(&self.backend),
            self.ctx,
            self.min_chars,
            self.debounce,
        )
    }

    /// Validate, then create or update depending on whether the form is editing
    pub async fn submit(&self, state: &FormState) -> FormResult<LorryHireChallan> {
        let issues = validate_for_submit(state);
        if !issues.is_empty() {
            return Err(FormServiceError::Invalid(issues));
        }

        let payload = build_payload(state, &self.ctx);
        let saved = match state.editing_id {
            Some(id) => self.backend.update(id, &payload).await?,
            None => self.backend.create(&payload).await?,
        };
        tracing::info!(
            id = saved.id,
            challan_number = %payload.challan_number,
            consignments = payload.consignment_ids.len(),
            updated = state.is_edit(),
            "lorry hire saved"
        );
        Ok(saved)
    }

    pub async fn list(&self, challan_number: Option<&str>) -> FormResult<Vec<LorryHireChallan>> {
        let filter = ChallanFilter::for_context(&self.ctx).with_challan_number(challan_number);
        Ok(self.backend.find_all(&filter).await?)
    }

    pub async fn get(&self, id: EntityId) -> FormResult<LorryHireChallan> {
        self.backend
            .find_by_id(id)
            .await?
            .ok_or(FormServiceError::NotFound(id))
    }

    pub async fn delete(&self, id: EntityId) -> FormResult<()> {
        self.backend.delete(id).await?;
        tracing::info!(id, "lorry hire deleted");
        Ok(())
    }

    pub async fn add_consignments(&self, id: EntityId, consignment_ids: &[EntityId]) -> FormResult<()> {
        if consignment_ids.is_empty() {
            return Ok(());
        }
        Ok(self.backend.add_consignments(id, consignment_ids).await?)
    }

    pub async fn remove_consignment(&self, id: EntityId, consignment_id: EntityId) -> FormResult<()> {
        Ok(self.backend.remove_consignment(id, consignment_id).await?)
    }

    pub async fn settle(&self, id: EntityId, payment_date: NaiveDate) -> FormResult<()> {
        self.backend.settle(id, payment_date).await?;
        tracing::info!(id, %payment_date, "lorry hire settled");
        Ok(())
    }
}
