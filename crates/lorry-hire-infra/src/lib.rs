//! Infrastructure layer
//!
//! HTTP implementations of the domain collaborator traits.

pub mod http;

pub use http::ApiClient;
