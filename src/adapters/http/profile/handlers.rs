//! HTTP handlers for profile endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error, warn};

use crate::domain::analysis::{ScaleMapper, Scorer};
use crate::domain::decision::template_summaries;
use crate::domain::foundation::{ErrorCode, ProfileId, Timestamp};
use crate::ports::{ProfilePatch, ProfileStore, StoreError};

use super::dto::{CreateProfileRequest, ErrorResponse, MessageResponse, ScaleResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ProfileHandlers {
    store: Arc<dyn ProfileStore>,
}

impl ProfileHandlers {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/profiles - All profiles, starred first then most recent
pub async fn list_profiles(State(handlers): State<ProfileHandlers>) -> Response {
    match handlers.store.list().await {
        Ok(profiles) => (StatusCode::OK, Json(profiles)).into_response(),
        Err(e) => handle_store_error(e),
    }
}

/// POST /api/profiles - Create a profile
pub async fn create_profile(
    State(handlers): State<ProfileHandlers>,
    body: Result<Json<CreateProfileRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => return handle_rejection(rejection),
    };

    let profile = match req.into_profile(Timestamp::now()) {
        Ok(profile) => profile,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(e.to_string())))
                .into_response()
        }
    };

    match handlers.store.create(&profile).await {
        Ok(created) => {
            debug!(profile_id = %created.id, "Profile created");
            (StatusCode::CREATED, Json(created)).into_response()
        }
        Err(e) => handle_store_error(e),
    }
}

/// GET /api/profiles/:id - One profile
pub async fn get_profile(
    State(handlers): State<ProfileHandlers>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.store.find_by_id(&id).await {
        Ok(Some(profile)) => (StatusCode::OK, Json(profile)).into_response(),
        Ok(None) => handle_store_error(StoreError::NotFound(id)),
        Err(e) => handle_store_error(e),
    }
}

/// PUT /api/profiles/:id - Update the fields present in the body
pub async fn update_profile(
    State(handlers): State<ProfileHandlers>,
    Path(id): Path<String>,
    body: Result<Json<ProfilePatch>, JsonRejection>,
) -> Response {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let Json(patch) = match body {
        Ok(body) => body,
        Err(rejection) => return handle_rejection(rejection),
    };

    match handlers.store.update(&id, &patch).await {
        Ok(updated) => (StatusCode::OK, Json(updated)).into_response(),
        Err(e) => handle_store_error(e),
    }
}

/// DELETE /api/profiles/:id - Delete a profile
pub async fn delete_profile(
    State(handlers): State<ProfileHandlers>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.store.delete(&id).await {
        Ok(()) => {
            debug!(profile_id = %id, "Profile deleted");
            (
                StatusCode::OK,
                Json(MessageResponse::new("Profile deleted successfully")),
            )
                .into_response()
        }
        Err(e) => handle_store_error(e),
    }
}

/// GET /api/profiles/:id/scale - Scores and scale placement of a profile
pub async fn get_profile_scale(
    State(handlers): State<ProfileHandlers>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.store.find_by_id(&id).await {
        Ok(Some(profile)) => {
            let categories = Scorer::score_all(&profile.categories);
            let scale = ScaleMapper::map(&categories);
            (StatusCode::OK, Json(ScaleResponse { categories, scale })).into_response()
        }
        Ok(None) => handle_store_error(StoreError::NotFound(id)),
        Err(e) => handle_store_error(e),
    }
}

/// GET /api/templates - Template catalog
pub async fn list_templates() -> Response {
    (StatusCode::OK, Json(template_summaries())).into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn parse_id(raw: String) -> Result<ProfileId, Response> {
    ProfileId::parse(raw).map_err(|e| {
        (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(e.to_string()))).into_response()
    })
}

/// Oversized bodies and wrong content types keep their own status; every
/// other malformed body is a 400.
fn handle_rejection(rejection: JsonRejection) -> Response {
    let status = match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
        StatusCode::UNSUPPORTED_MEDIA_TYPE => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        _ => StatusCode::BAD_REQUEST,
    };
    (status, Json(ErrorResponse::bad_request(rejection.body_text()))).into_response()
}

fn handle_store_error(error: StoreError) -> Response {
    match error.code() {
        ErrorCode::ProfileNotFound => match &error {
            StoreError::NotFound(id) => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse::not_found(id))).into_response()
            }
            _ => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(ErrorCode::ProfileNotFound, error.to_string())),
            )
                .into_response(),
        },
        ErrorCode::ValidationFailed => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(error.to_string())),
        )
            .into_response(),
        ErrorCode::Conflict => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::new(ErrorCode::Conflict, error.to_string())),
        )
            .into_response(),
        ErrorCode::StoreUnavailable => {
            warn!(error = %error, "Profile store unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new(
                    ErrorCode::StoreUnavailable,
                    "Profile store is temporarily unavailable",
                )),
            )
                .into_response()
        }
        _ => {
            error!(error = %error, "Profile store error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("An unexpected error occurred")),
            )
                .into_response()
        }
    }
}
