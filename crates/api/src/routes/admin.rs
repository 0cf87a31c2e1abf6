//! Route definitions for the `/admin` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the `administrator` role (enforced by handler extractors).
///
/// ```text
/// GET    /actors          -> list_actors
/// POST   /actors          -> create_actor
/// GET    /actors/{id}     -> get_actor
/// PUT    /actors/{id}     -> update_actor
/// DELETE /actors/{id}     -> delete_actor
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/actors", get(admin::list_actors).post(admin::create_actor))
        .route(
            "/actors/{id}",
            get(admin::get_actor)
                .put(admin::update_actor)
                .delete(admin::delete_actor),
        )
}
