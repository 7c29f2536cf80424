//! HTTP routes for profile endpoints.

use axum::{routing::get, Router};

use super::handlers::{
    create_profile, delete_profile, get_profile, get_profile_scale, list_profiles,
    list_templates, update_profile, ProfileHandlers,
};

/// Creates the profile router with all endpoints, to be nested under `/api`.
pub fn profile_routes(handlers: ProfileHandlers) -> Router {
    Router::new()
        .route("/profiles", get(list_profiles).post(create_profile))
        .route(
            "/profiles/:id",
            get(get_profile).put(update_profile).delete(delete_profile),
        )
        .route("/profiles/:id/scale", get(get_profile_scale))
        .route("/templates", get(list_templates))
        .with_state(handlers)
}
