//! Route definitions for the `/scorecards` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::scorecard;
use crate::state::AppState;

/// Routes mounted at `/scorecards`.
///
/// ```text
/// GET    /                   -> list_scorecards
/// POST   /                   -> create_scorecard
/// GET    /{id}               -> get_scorecard
/// PUT    /{id}               -> save_draft
/// POST   /{id}/submit        -> submit_scorecard
/// POST   /{id}/review        -> review_scorecard
/// POST   /{id}/transition    -> transition_scorecard
/// GET    /{id}/history       -> get_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(scorecard::list_scorecards).post(scorecard::create_scorecard),
        )
        .route(
            "/{id}",
            get(scorecard::get_scorecard).put(scorecard::save_draft),
        )
        .route("/{id}/submit", post(scorecard::submit_scorecard))
        .route("/{id}/review", post(scorecard::review_scorecard))
        .route("/{id}/transition", post(scorecard::transition_scorecard))
        .route("/{id}/history", get(scorecard::get_history))
}
