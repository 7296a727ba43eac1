//! Lorry hire challan domain: consignment aggregation, settlement math, TDS policy

pub mod model;
pub mod repository;
pub mod service;

pub use model::*;
pub use repository::{ChallanRepository, ConsignmentSearch, PartyDirectory};
