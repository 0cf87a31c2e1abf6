//! Domain logic for the scorecard approval workflow.
//!
//! Pure types and rules with no I/O. Persistence lives in `scorecard-db`,
//! the HTTP surface in `scorecard-api`.

pub mod dashboard;
pub mod error;
pub mod history;
pub mod identity;
pub mod roles;
pub mod scorecard;
pub mod status;
pub mod types;
pub mod validation;
pub mod workflow;
