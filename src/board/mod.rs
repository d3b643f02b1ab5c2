//! Job board: job posts, applications, and business/individual profile cards.
//!
//! The store traits in [`repository`] stand in for the hosted database. The
//! [`service`] layer owns ownership checks and the application state machine,
//! and [`router`] maps each page to one service call rendered through [`views`].

pub mod domain;
pub mod format;
pub mod identity;
pub mod memory;
pub mod repository;
pub mod router;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{
    AccountId, Application, ApplicationId, ApplicationStatus, ApplicationSubmission,
    BusinessProfile, IndividualProfile, JobDraft, JobId, JobPost, SocialLinks,
};
pub use identity::{CurrentAccount, MaybeAccount, ACCOUNT_HEADER};
pub use memory::{BoardSnapshot, MemoryStore, SnapshotError};
pub use repository::{
    ApplicationRepository, BoardStore, JobRepository, ProfileRepository, RepositoryError,
};
pub use router::{board_router, BoardState};
pub use service::{BoardError, JobApplicants, JobBoardService, ListedJob};
