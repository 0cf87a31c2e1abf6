//! Handlers for the `/auth` resource.
//!
//! Login picks an existing actor by id and issues an access token for it.

use axum::extract::State;
use axum::Json;
use scorecard_core::error::CoreError;
use scorecard_core::identity::Actor;
use scorecard_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentActor;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub actor_id: DbId,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub actor: Actor,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Start a session as the given actor. Unknown ids are rejected with 401.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let actor = state.store.get_actor(input.actor_id).await?.ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized(format!(
            "Unknown actor {}",
            input.actor_id
        )))
    })?;

    let jwt = &state.config.jwt;
    let access_token = generate_access_token(actor.id, actor.role.as_str(), jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(actor_id = actor.id, role = %actor.role, "Actor logged in");

    Ok(Json(LoginResponse {
        access_token,
        expires_in: jwt.access_token_expiry_mins * 60,
        actor,
    }))
}

/// GET /api/v1/auth/me
pub async fn me(CurrentActor(actor): CurrentActor) -> Json<DataResponse<Actor>> {
    Json(DataResponse { data: actor })
}
