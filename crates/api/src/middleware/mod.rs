//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Claims from a JWT Bearer token.
//! - [`auth::CurrentActor`] -- The token's actor, loaded live from the store.
//! - [`rbac::RequireAdmin`] -- Requires the `administrator` role.

pub mod auth;
pub mod rbac;
