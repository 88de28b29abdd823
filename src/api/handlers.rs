//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::info;

use crate::{
    scrum::{ScrumDraft, ScrumRecord},
    state::AppState,
    tasks::start_meeting,
    timer::{CardView, MeetingView},
};
use super::responses::{ApiError, HealthResponse, StatusResponse};

type ApiResult<T> = Result<T, ApiError>;

/// Handle GET /scrums - List scrum cards
pub async fn list_scrums_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<CardView>>> {
    Ok(Json(state.list_cards()?))
}

/// Handle POST /scrums - Create a scrum from a draft
pub async fn create_scrum_handler(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<ScrumDraft>,
) -> ApiResult<(StatusCode, Json<ScrumRecord>)> {
    let record = state.create_scrum(draft)?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Handle GET /scrums/:id - Fetch one scrum
pub async fn get_scrum_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> ApiResult<Json<ScrumRecord>> {
    Ok(Json(state.get_scrum(id)?))
}

/// Handle PUT /scrums/:id - Commit an edited draft
pub async fn update_scrum_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(draft): Json<ScrumDraft>,
) -> ApiResult<Json<ScrumRecord>> {
    Ok(Json(state.update_scrum(id, draft)?))
}

/// Handle DELETE /scrums/:id - Remove a scrum
pub async fn delete_scrum_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> ApiResult<StatusCode> {
    state.delete_scrum(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handle GET /scrums/:id/draft - Edit buffer for a scrum
pub async fn draft_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> ApiResult<Json<ScrumDraft>> {
    Ok(Json(state.draft_for(id)?))
}

/// Handle POST /scrums/:id/meeting - Start a meeting and its timer
pub async fn start_meeting_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> ApiResult<Json<MeetingView>> {
    let handle = start_meeting(Arc::clone(&state), id)?;
    info!("Meeting {} started for scrum {}", handle.meeting_id, id);
    Ok(Json(state.meeting_view()?))
}

/// Handle GET /meeting - Current meeting screen
pub async fn meeting_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<MeetingView>> {
    Ok(Json(state.meeting_view()?))
}

/// Handle POST /meeting/next - Skip to the next speaker
pub async fn next_speaker_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<MeetingView>> {
    Ok(Json(state.advance_speaker()?))
}

/// Handle POST /meeting/cancel - End the meeting early
pub async fn cancel_meeting_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<MeetingView>> {
    Ok(Json(state.cancel_meeting()?))
}

/// Handle GET /status - Return current server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<StatusResponse>> {
    let scrum_count = state.list_cards()?.len();

    Ok(Json(StatusResponse {
        scrum_count,
        meeting: state.meeting_snapshot(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
