pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod scorecard;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                      login (public)
/// /auth/me                         current actor
///
/// /admin/actors                    list, create (administrator only)
/// /admin/actors/{id}               get, update, delete
///
/// /scorecards                      list (scoped by role), create
/// /scorecards/{id}                 get, save draft
/// /scorecards/{id}/submit          submit for review
/// /scorecards/{id}/review          query, reject, approve
/// /scorecards/{id}/transition      move to an explicit status
/// /scorecards/{id}/history         audit trail
///
/// /dashboard                       status summary for the caller
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .nest("/scorecards", scorecard::router())
        .merge(dashboard::router())
}
