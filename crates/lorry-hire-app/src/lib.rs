//! Application layer - configuration, challan form state, orchestration

pub mod config;
pub mod form;
pub mod repository;
pub mod search;
pub mod service;

pub use config::Config;
pub use form::{FormAction, FormState, FormStore};
pub use search::DebouncedSearch;
pub use service::{ChallanFormService, FormResult, FormServiceError, PartyLists};
