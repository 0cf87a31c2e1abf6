//! Handlers for the `/scorecards` resource.
//!
//! Every mutation follows the same pattern: load the document, check the
//! caller's `version` against the stored one, apply owner edits and/or a
//! workflow transition, then save through the store (which re-checks the
//! version atomically).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use scorecard_core::error::CoreError;
use scorecard_core::history::HistoryEntry;
use scorecard_core::identity::{Actor, Directory};
use scorecard_core::roles::Role;
use scorecard_core::scorecard::{Perspective, Scorecard};
use scorecard_core::status::ScorecardStatus;
use scorecard_core::types::{Date, DbId};
use scorecard_core::validation::{total_weightage, validate_comment};
use scorecard_core::workflow::{self, ReviewAction, TransitionOutcome};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentActor;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /scorecards`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateScorecardRequest {
    /// Initial content. The default five-perspective template is used when absent.
    #[serde(default)]
    pub perspectives: Option<Vec<Perspective>>,
    /// Submit for manager review immediately after creating.
    #[serde(default)]
    pub submit: bool,
}

/// Request body for `PUT /scorecards/{id}` (save draft).
#[derive(Debug, Deserialize)]
pub struct SaveDraftRequest {
    pub version: u64,
    pub perspectives: Vec<Perspective>,
}

/// Request body for `POST /scorecards/{id}/submit`.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub version: u64,
    /// Optional final edits applied before submitting.
    #[serde(default)]
    pub perspectives: Option<Vec<Perspective>>,
}

/// Reviewer decisions accepted by `POST /scorecards/{id}/review`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    Query,
    Reject,
    Approve,
}

impl From<ReviewDecision> for ReviewAction {
    fn from(decision: ReviewDecision) -> Self {
        match decision {
            ReviewDecision::Query => ReviewAction::Query,
            ReviewDecision::Reject => ReviewAction::Reject,
            ReviewDecision::Approve => ReviewAction::Approve,
        }
    }
}

/// Request body for `POST /scorecards/{id}/review`.
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub action: ReviewDecision,
    pub version: u64,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Request body for `POST /scorecards/{id}/transition`.
#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub status: ScorecardStatus,
    pub version: u64,
    #[serde(default)]
    pub comment: Option<String>,
}

/// One row of the scorecard list.
#[derive(Debug, Serialize)]
pub struct ScorecardSummary {
    pub id: Option<DbId>,
    pub owner_id: DbId,
    pub owner_name: String,
    pub reporting_to: String,
    pub date: Date,
    pub status: ScorecardStatus,
    pub status_label: &'static str,
    pub total_weightage: u32,
    pub version: u64,
}

impl From<&Scorecard> for ScorecardSummary {
    fn from(doc: &Scorecard) -> Self {
        Self {
            id: doc.id(),
            owner_id: doc.owner().id,
            owner_name: doc.owner().name.clone(),
            reporting_to: doc.reporting_to().to_string(),
            date: doc.date(),
            status: doc.status(),
            status_label: doc.status().label(),
            total_weightage: total_weightage(doc),
            version: doc.version(),
        }
    }
}

/// Full document plus what the caller may do next.
#[derive(Debug, Serialize)]
pub struct ScorecardDetail {
    #[serde(flatten)]
    pub scorecard: Scorecard,
    pub status_label: &'static str,
    pub total_weightage: u32,
    pub available_actions: Vec<ReviewAction>,
}

impl ScorecardDetail {
    fn new(scorecard: Scorecard, actor: &Actor, directory: &Directory) -> Self {
        let available_actions = workflow::available_actions(&scorecard, actor, directory);
        Self {
            status_label: scorecard.status().label(),
            total_weightage: total_weightage(&scorecard),
            available_actions,
            scorecard,
        }
    }
}

/// Response for any request that ran a workflow transition.
#[derive(Debug, Serialize)]
pub struct TransitionResponse {
    pub transition: TransitionOutcome,
    pub scorecard: ScorecardDetail,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Documents `actor` is allowed to list: their own (Contributor), their
/// reports' (Manager), or all (Executive, Administrator).
pub(crate) async fn visible_documents(state: &AppState, actor: &Actor) -> AppResult<Vec<Scorecard>> {
    let docs = match actor.role {
        Role::Contributor => state.store.list_documents_by_owner(actor.id).await?,
        Role::Manager => state.store.list_documents_by_manager(actor.id).await?,
        Role::Executive | Role::Administrator => state.store.list_documents().await?,
    };
    Ok(docs)
}

/// Load a document the caller may see, along with the directory used to
/// authorize the request.
async fn load_visible(
    state: &AppState,
    actor: &Actor,
    id: DbId,
) -> AppResult<(Scorecard, Directory)> {
    let doc = state
        .store
        .get_document(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Scorecard",
            id,
        }))?;
    let directory = state.store.directory().await?;

    if !workflow::can_view(&doc, actor, &directory) {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Actor {} cannot view scorecard {id}",
            actor.id
        ))));
    }
    Ok((doc, directory))
}

/// Like [`load_visible`] but also rejects a stale `version`.
async fn load_for_update(
    state: &AppState,
    actor: &Actor,
    id: DbId,
    version: u64,
) -> AppResult<(Scorecard, Directory)> {
    let (doc, directory) = load_visible(state, actor, id).await?;
    if doc.version() != version {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Scorecard {id} has changed (your version {version}, current {})",
            doc.version()
        ))));
    }
    Ok((doc, directory))
}

fn check_comment(comment: Option<&str>) -> AppResult<()> {
    if let Some(comment) = comment {
        validate_comment(comment)?;
    }
    Ok(())
}

/// Save a transitioned document and build the response.
async fn commit(
    state: &AppState,
    actor: &Actor,
    directory: &Directory,
    id: DbId,
    doc: Scorecard,
    outcome: TransitionOutcome,
) -> AppResult<Json<DataResponse<TransitionResponse>>> {
    let saved = state.store.save_document(id, doc).await?;

    tracing::info!(
        actor_id = actor.id,
        scorecard_id = id,
        action = %outcome.action,
        from = ?outcome.from,
        to = ?outcome.to,
        version = saved.version(),
        "Scorecard transitioned"
    );

    Ok(Json(DataResponse {
        data: TransitionResponse {
            transition: outcome,
            scorecard: ScorecardDetail::new(saved, actor, directory),
        },
    }))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/scorecards
///
/// List the scorecards visible to the caller.
pub async fn list_scorecards(
    CurrentActor(actor): CurrentActor,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ScorecardSummary>>>> {
    let docs = visible_documents(&state, &actor).await?;
    let data = docs.iter().map(ScorecardSummary::from).collect();
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/scorecards
///
/// Open a new scorecard owned by the caller, who must be a Contributor.
pub async fn create_scorecard(
    CurrentActor(actor): CurrentActor,
    State(state): State<AppState>,
    Json(input): Json<CreateScorecardRequest>,
) -> AppResult<impl IntoResponse> {
    let directory = state.store.directory().await?;
    let manager = actor.manager_id.and_then(|id| directory.get(id));
    let now = chrono::Utc::now();

    let mut doc = match input.perspectives {
        Some(perspectives) => Scorecard::new(&actor, manager, perspectives, now)?,
        None => Scorecard::with_default_perspectives(&actor, manager, now)?,
    };
    if input.submit {
        workflow::transition_at(
            &mut doc,
            ScorecardStatus::PendingManagerApproval,
            &actor,
            &directory,
            None,
            now,
        )?;
    }

    let created = state.store.create_document(doc).await?;

    tracing::info!(
        actor_id = actor.id,
        scorecard_id = ?created.id(),
        status = ?created.status(),
        "Scorecard created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ScorecardDetail::new(created, &actor, &directory),
        }),
    ))
}

/// GET /api/v1/scorecards/{id}
pub async fn get_scorecard(
    CurrentActor(actor): CurrentActor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ScorecardDetail>>> {
    let (doc, directory) = load_visible(&state, &actor, id).await?;
    Ok(Json(DataResponse {
        data: ScorecardDetail::new(doc, &actor, &directory),
    }))
}

/// PUT /api/v1/scorecards/{id}
///
/// Replace the content and save as draft. A queried or rejected scorecard
/// returns to Draft.
pub async fn save_draft(
    CurrentActor(actor): CurrentActor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SaveDraftRequest>,
) -> AppResult<Json<DataResponse<TransitionResponse>>> {
    let (mut doc, directory) = load_for_update(&state, &actor, id, input.version).await?;

    doc.edit(&actor)?.replace_perspectives(input.perspectives)?;
    let outcome =
        workflow::apply_action(&mut doc, ReviewAction::SaveDraft, &actor, &directory, None)?;

    commit(&state, &actor, &directory, id, doc, outcome).await
}

/// POST /api/v1/scorecards/{id}/submit
///
/// Submit for manager review, optionally applying final edits first.
pub async fn submit_scorecard(
    CurrentActor(actor): CurrentActor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SubmitRequest>,
) -> AppResult<Json<DataResponse<TransitionResponse>>> {
    let (mut doc, directory) = load_for_update(&state, &actor, id, input.version).await?;

    if let Some(perspectives) = input.perspectives {
        doc.edit(&actor)?.replace_perspectives(perspectives)?;
    }
    let outcome =
        workflow::apply_action(&mut doc, ReviewAction::Submit, &actor, &directory, None)?;

    commit(&state, &actor, &directory, id, doc, outcome).await
}

/// POST /api/v1/scorecards/{id}/review
///
/// Query, reject or approve at the tier the scorecard is waiting on.
pub async fn review_scorecard(
    CurrentActor(actor): CurrentActor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReviewRequest>,
) -> AppResult<Json<DataResponse<TransitionResponse>>> {
    check_comment(input.comment.as_deref())?;
    let (mut doc, directory) = load_for_update(&state, &actor, id, input.version).await?;

    let outcome = workflow::apply_action(
        &mut doc,
        input.action.into(),
        &actor,
        &directory,
        input.comment.as_deref(),
    )?;

    commit(&state, &actor, &directory, id, doc, outcome).await
}

/// POST /api/v1/scorecards/{id}/transition
///
/// Request a move to an explicit target status.
pub async fn transition_scorecard(
    CurrentActor(actor): CurrentActor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<TransitionRequest>,
) -> AppResult<Json<DataResponse<TransitionResponse>>> {
    check_comment(input.comment.as_deref())?;
    let (mut doc, directory) = load_for_update(&state, &actor, id, input.version).await?;

    let outcome = workflow::transition(
        &mut doc,
        input.status,
        &actor,
        &directory,
        input.comment.as_deref(),
    )?;

    commit(&state, &actor, &directory, id, doc, outcome).await
}

/// GET /api/v1/scorecards/{id}/history
pub async fn get_history(
    CurrentActor(actor): CurrentActor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<HistoryEntry>>>> {
    let (doc, _) = load_visible(&state, &actor, id).await?;
    let data = doc.history().iter().cloned().collect();
    Ok(Json(DataResponse { data }))
}
