use axum::{extract::State, response::IntoResponse, Json};

use super::AppState;

// ===== GET /api/settings =====

pub async fn get_settings(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.settings)
}
