//! Dashboard progress route.

use crate::error::Result;
use crate::models::ProgressStats;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/stats", get(get_stats))
}

async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Json<ProgressStats>> {
    let challenges = state.db.list_challenges().await?;
    Ok(Json(ProgressStats::from_challenges(&challenges)))
}
