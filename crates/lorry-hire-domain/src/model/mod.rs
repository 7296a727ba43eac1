//! Domain model types

pub mod challan;
pub mod consignment;
pub mod lenient;
pub mod party;
pub mod tds;

pub use challan::{ChallanFilter, ChallanPayload, LorryHireChallan};
pub use consignment::{
    Consignment, ConsignmentDetail, ConsignmentRecord, ConsignmentSearchHit, DestinationRef,
    PersistedConsignment,
};
pub use party::{Destination, Party, PartyKind};
pub use tds::{PanSource, TdsApplicable, TdsHint, TdsState};
