//! Handlers for the `/admin/actors` resource.
//!
//! All endpoints require the Administrator role via [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use scorecard_core::error::CoreError;
use scorecard_core::identity::{Actor, NewActor, ReportingLine};
use scorecard_core::types::DbId;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// An actor together with its derived direct reports.
#[derive(Debug, Serialize)]
pub struct ActorDetail {
    #[serde(flatten)]
    pub actor: Actor,
    pub report_ids: Vec<DbId>,
}

/// GET /api/v1/admin/actors
pub async fn list_actors(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Actor>>>> {
    let actors = state.store.list_actors().await?;
    Ok(Json(DataResponse { data: actors }))
}

/// POST /api/v1/admin/actors
pub async fn create_actor(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<NewActor>,
) -> AppResult<impl IntoResponse> {
    let actor = state.store.create_actor(input).await?;

    tracing::info!(
        admin_id = admin.0.id,
        actor_id = actor.id,
        role = %actor.role,
        "Admin created actor"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: actor })))
}

/// GET /api/v1/admin/actors/{id}
pub async fn get_actor(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ActorDetail>>> {
    let directory = state.store.directory().await?;
    let actor = directory.require(id)?.clone();
    let report_ids = directory.reports_of(id);
    Ok(Json(DataResponse {
        data: ActorDetail { actor, report_ids },
    }))
}

/// PUT /api/v1/admin/actors/{id}
///
/// Replace an actor's record. The body has the same shape as create.
pub async fn update_actor(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<NewActor>,
) -> AppResult<Json<DataResponse<Actor>>> {
    let actor = state.store.update_actor(input.into_actor(id)).await?;

    tracing::info!(admin_id = admin.0.id, actor_id = id, role = %actor.role, "Admin updated actor");

    Ok(Json(DataResponse { data: actor }))
}

/// DELETE /api/v1/admin/actors/{id}
///
/// Administrators cannot delete their own record.
pub async fn delete_actor(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if admin.0.id == id {
        return Err(AppError::Core(CoreError::Conflict(
            "Administrators cannot delete themselves".into(),
        )));
    }

    state.store.delete_actor(id).await?;

    tracing::info!(admin_id = admin.0.id, actor_id = id, "Admin deleted actor");

    Ok(StatusCode::NO_CONTENT)
}
