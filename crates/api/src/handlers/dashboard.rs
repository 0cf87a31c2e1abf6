//! Handler for the caller's dashboard.

use axum::extract::State;
use axum::Json;
use scorecard_core::dashboard::StatusSummary;
use scorecard_core::identity::Actor;
use scorecard_core::workflow;
use serde::Serialize;

use crate::error::AppResult;
use crate::handlers::scorecard::{visible_documents, ScorecardSummary};
use crate::middleware::auth::CurrentActor;
use crate::response::DataResponse;
use crate::state::AppState;

/// Dashboard payload: who is asking, the status counts over what they can
/// see, and the scorecards waiting on them.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub actor: Actor,
    pub summary: StatusSummary,
    pub awaiting_action: Vec<ScorecardSummary>,
}

/// GET /api/v1/dashboard
pub async fn get_dashboard(
    CurrentActor(actor): CurrentActor,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardResponse>>> {
    let docs = visible_documents(&state, &actor).await?;
    let directory = state.store.directory().await?;

    let summary = StatusSummary::for_actor(actor.role, &docs);
    let awaiting_action = docs
        .iter()
        .filter(|doc| !workflow::available_actions(doc, &actor, &directory).is_empty())
        .map(ScorecardSummary::from)
        .collect();

    Ok(Json(DataResponse {
        data: DashboardResponse {
            actor,
            summary,
            awaiting_action,
        },
    }))
}
