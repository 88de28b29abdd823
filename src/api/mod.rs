//! HTTP API module
//! 
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/scrums", get(list_scrums_handler).post(create_scrum_handler))
        .route(
            "/scrums/:id",
            get(get_scrum_handler)
                .put(update_scrum_handler)
                .delete(delete_scrum_handler),
        )
        .route("/scrums/:id/draft", get(draft_handler))
        .route("/scrums/:id/meeting", post(start_meeting_handler))
        .route("/meeting", get(meeting_handler))
        .route("/meeting/next", post(next_speaker_handler))
        .route("/meeting/cancel", post(cancel_meeting_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
