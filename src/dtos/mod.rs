//! DTOs module - Data Transfer Objects
//!
//! The DTOs separate the external (API) representation from the internal
//! entities. The invitation projection is the single place where contact
//! disclosure is decided.

pub mod invitation;
pub mod listing;
pub mod query;

// Re-exports to ease imports
pub use invitation::{
    CreateInvitationDTO, EnrichedInvitationDTO, ProfileCardDTO, UpdateInvitationDTO, strip_markup,
};
pub use listing::{InvitationCountsDTO, InvitationListDTO, PaginationDTO};
pub use query::ListInvitationsQuery;
