//! REST surface the presentation layer drives the wizard through.
//!
//! Handlers translate HTTP into controller calls. The ones that submit do so
//! before they advance, mirroring the screens' confirm actions; a failed
//! submission maps to 502 and the client re-triggers it.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::capture::ImagePayload;
use crate::error::SessionError;
use crate::gateway::{IntegrationGateway, SubmissionRecord};
use crate::session::controller::OnboardingSession;
use crate::session::model::{CsatPatch, VehiclePatch, US_STATES};
use crate::session::phase::Phase;
use crate::session::store::SessionStore;

/// Shared state for the onboarding routes.
#[derive(Clone)]
pub struct OnboardingRouteState {
    pub store: Arc<SessionStore>,
    pub gateway: Arc<IntegrationGateway>,
}

/// What the presentation layer needs to render the current screen.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub session_id: Uuid,
    pub phase: Phase,
    pub step_group: u8,
    pub can_proceed: bool,
    pub vehicle: crate::session::model::VehicleData,
    pub csat: crate::session::model::CsatData,
    pub has_photo: bool,
}

impl From<&OnboardingSession> for SessionStatus {
    fn from(session: &OnboardingSession) -> Self {
        Self {
            session_id: session.id,
            phase: session.current_phase(),
            step_group: session.current_phase().step_group(),
            can_proceed: session.can_proceed(),
            vehicle: session.vehicle().clone(),
            csat: session.csat().clone(),
            has_photo: session.installation_photo().is_some(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct JumpRequest {
    phase: Phase,
}

/// Photo payload posted by the capture or file-fallback path.
#[derive(Debug, Deserialize)]
struct PhotoUploadRequest {
    image_base64: String,
    content_type: String,
}

#[derive(Debug, Serialize)]
struct PhotoUploadResponse {
    file_url: String,
}

fn error_body(message: impl Into<String>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "error": message.into() }))
}

fn not_found(err: SessionError) -> Response {
    (StatusCode::NOT_FOUND, error_body(err.to_string())).into_response()
}

// ── Session lifecycle ───────────────────────────────────────────────

/// POST /api/onboarding/sessions
///
/// Mount the wizard: create a session at the welcome screen.
async fn create_session(State(state): State<OnboardingRouteState>) -> impl IntoResponse {
    let id = state.store.create().await;
    match state.store.with_session(id, |s| SessionStatus::from(&*s)).await {
        Ok(status) => (StatusCode::CREATED, Json(status)).into_response(),
        Err(err) => not_found(err),
    }
}

/// GET /api/onboarding/sessions/{id}
async fn get_status(
    State(state): State<OnboardingRouteState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.store.with_session(id, |s| SessionStatus::from(&*s)).await {
        Ok(status) => Json(status).into_response(),
        Err(err) => not_found(err),
    }
}

/// DELETE /api/onboarding/sessions/{id}
///
/// Discard the session (completion or reload).
async fn delete_session(
    State(state): State<OnboardingRouteState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.store.remove(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => not_found(err),
    }
}

// ── Navigation ──────────────────────────────────────────────────────

/// POST /api/onboarding/sessions/{id}/advance
///
/// One step forward. Refused while the current screen's proceed gate is
/// closed; a no-op at the terminal phase.
async fn advance(
    State(state): State<OnboardingRouteState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let result = state
        .store
        .with_session(id, |s| {
            if !s.can_proceed() {
                return Err(format!("cannot proceed from {}", s.current_phase()));
            }
            s.next_phase();
            Ok(SessionStatus::from(&*s))
        })
        .await;

    match result {
        Ok(Ok(status)) => Json(status).into_response(),
        Ok(Err(message)) => (StatusCode::CONFLICT, error_body(message)).into_response(),
        Err(err) => not_found(err),
    }
}

/// POST /api/onboarding/sessions/{id}/back
///
/// One step backward; a no-op at the welcome screen. Never blocked — a
/// submission still in flight settles in the background.
async fn back(
    State(state): State<OnboardingRouteState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let result = state
        .store
        .with_session(id, |s| {
            s.prev_phase();
            SessionStatus::from(&*s)
        })
        .await;

    match result {
        Ok(status) => Json(status).into_response(),
        Err(err) => not_found(err),
    }
}

/// POST /api/onboarding/sessions/{id}/jump
///
/// Set the phase directly. Recovery/testing path.
async fn jump(
    State(state): State<OnboardingRouteState>,
    Path(id): Path<Uuid>,
    Json(request): Json<JumpRequest>,
) -> impl IntoResponse {
    let result = state
        .store
        .with_session(id, |s| {
            s.jump_to(request.phase);
            SessionStatus::from(&*s)
        })
        .await;

    match result {
        Ok(status) => Json(status).into_response(),
        Err(err) => not_found(err),
    }
}

// ── Data entry ──────────────────────────────────────────────────────

/// PUT /api/onboarding/sessions/{id}/vehicle
async fn update_vehicle(
    State(state): State<OnboardingRouteState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<VehiclePatch>,
) -> impl IntoResponse {
    let result = state
        .store
        .with_session(id, |s| {
            s.update_vehicle(patch);
            SessionStatus::from(&*s)
        })
        .await;

    match result {
        Ok(status) => Json(status).into_response(),
        Err(err) => not_found(err),
    }
}

/// POST /api/onboarding/sessions/{id}/vehicle/confirm
///
/// Log the confirmed vehicle to the record backend, then advance.
async fn confirm_vehicle(
    State(state): State<OnboardingRouteState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let record = match state
        .store
        .with_session(id, |s| SubmissionRecord::vehicle_confirmation(s.vehicle()))
        .await
    {
        Ok(record) => record,
        Err(err) => return not_found(err),
    };

    if let Err(err) = state.gateway.submit_record(&record).await {
        tracing::warn!(error = %err, "Vehicle confirmation submission failed");
        return (StatusCode::BAD_GATEWAY, error_body(err.to_string())).into_response();
    }

    match state
        .store
        .with_session(id, |s| {
            s.next_phase();
            SessionStatus::from(&*s)
        })
        .await
    {
        Ok(status) => Json(status).into_response(),
        Err(err) => not_found(err),
    }
}

/// POST /api/onboarding/sessions/{id}/photo
///
/// Store the installation photo, then upload it keyed by the plate. The
/// photo stays stored on upload failure so the user can just re-trigger.
async fn upload_photo(
    State(state): State<OnboardingRouteState>,
    Path(id): Path<Uuid>,
    Json(request): Json<PhotoUploadRequest>,
) -> impl IntoResponse {
    let bytes = match BASE64.decode(request.image_base64.as_bytes()) {
        Ok(bytes) => bytes,
        Err(err) => {
            return (
                StatusCode::BAD_REQUEST,
                error_body(format!("invalid image encoding: {err}")),
            )
                .into_response();
        }
    };
    let payload = ImagePayload::new(bytes, request.content_type);

    let plate = match state
        .store
        .with_session(id, |s| {
            s.update_installation_photo(payload.clone());
            s.vehicle()
                .license_plate
                .clone()
                .unwrap_or_else(|| "unknown".to_string())
        })
        .await
    {
        Ok(plate) => plate,
        Err(err) => return not_found(err),
    };

    match state.gateway.submit_image(&payload, &plate).await {
        Ok(file_url) => Json(PhotoUploadResponse { file_url }).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "Installation photo upload failed");
            (StatusCode::BAD_GATEWAY, error_body(err.to_string())).into_response()
        }
    }
}

/// POST /api/onboarding/sessions/{id}/csat
///
/// Merge the survey fields, log the survey row, then advance. Refused until
/// a rating has been picked.
async fn submit_csat(
    State(state): State<OnboardingRouteState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<CsatPatch>,
) -> impl IntoResponse {
    let record = match state
        .store
        .with_session(id, |s| {
            s.update_csat(patch);
            if !s.csat().is_complete() {
                return Err(());
            }
            Ok(SubmissionRecord::csat(s.vehicle(), s.csat()))
        })
        .await
    {
        Ok(Ok(record)) => record,
        Ok(Err(())) => {
            return (StatusCode::CONFLICT, error_body("a rating is required")).into_response();
        }
        Err(err) => return not_found(err),
    };

    if let Err(err) = state.gateway.submit_record(&record).await {
        tracing::warn!(error = %err, "Survey submission failed");
        return (StatusCode::BAD_GATEWAY, error_body(err.to_string())).into_response();
    }

    match state
        .store
        .with_session(id, |s| {
            s.next_phase();
            SessionStatus::from(&*s)
        })
        .await
    {
        Ok(status) => Json(status).into_response(),
        Err(err) => not_found(err),
    }
}

// ── Reference data ──────────────────────────────────────────────────

/// GET /api/onboarding/states
///
/// State codes for the license-entry selector.
async fn list_states() -> impl IntoResponse {
    Json(&US_STATES[..])
}

/// Build the onboarding REST routes.
pub fn onboarding_routes(state: OnboardingRouteState) -> Router {
    Router::new()
        .route("/api/onboarding/sessions", post(create_session))
        .route("/api/onboarding/sessions/{id}", get(get_status))
        .route("/api/onboarding/sessions/{id}", delete(delete_session))
        .route("/api/onboarding/sessions/{id}/advance", post(advance))
        .route("/api/onboarding/sessions/{id}/back", post(back))
        .route("/api/onboarding/sessions/{id}/jump", post(jump))
        .route("/api/onboarding/sessions/{id}/vehicle", put(update_vehicle))
        .route(
            "/api/onboarding/sessions/{id}/vehicle/confirm",
            post(confirm_vehicle),
        )
        .route("/api/onboarding/sessions/{id}/photo", post(upload_photo))
        .route("/api/onboarding/sessions/{id}/csat", post(submit_csat))
        .route("/api/onboarding/states", get(list_states))
        .with_state(state)
}
