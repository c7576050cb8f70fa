//! Emoji mapping routes.
//!
//! All routes are read-only and need no identifier: callers get either one
//! random mapping or the full listing.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use emojimovie_core::MappingView;
use log::debug;
use std::sync::Arc;

/// `GET /emojis`: one random `{emoji, unicode_seq, movie_name}`.
pub async fn random_mapping(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MappingView>, ApiError> {
    let view = state.random_view()?;
    debug!(
        "event=request module=server route=random status=ok movie_name={}",
        view.movie_name
    );
    Ok(Json(view))
}

/// `GET /emojis/all`: every mapping, in storage order.
pub async fn list_mappings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MappingView>>, ApiError> {
    let views = state.list_views()?;
    debug!(
        "event=request module=server route=list status=ok count={}",
        views.len()
    );
    Ok(Json(views))
}

/// `GET /emojis/random.txt`: `"<emoji> <movie_name>"` as plain text.
pub async fn random_mapping_text(State(state): State<Arc<AppState>>) -> (StatusCode, String) {
    match state.random_view() {
        Ok(view) => (StatusCode::OK, format!("{} {}", view.emoji, view.movie_name)),
        Err(err) => (err.status(), err.detail().to_string()),
    }
}
