//! Challan form: state, actions, reducer, store, submission

pub mod action;
pub mod reducer;
pub mod state;
pub mod store;
pub mod submit;

pub use action::FormAction;
pub use reducer::reduce;
pub use state::{FormState, MoneyField, MoneyInputs, TextField};
pub use store::FormStore;
pub use submit::{build_payload, validate_for_submit, ValidationIssue};
