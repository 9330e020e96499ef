// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Challenge CRUD routes and the per-challenge map scene.

use crate::error::{AppError, Result};
use crate::map::{render_scene, MapScene};
use crate::models::{Challenge, ChallengePatch, NewChallenge};
use crate::routes::{AppJson, MapQuery};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/challenges",
            get(list_challenges).post(create_challenge),
        )
        .route(
            "/api/challenges/{day}",
            get(get_challenge).patch(update_challenge),
        )
        .route("/api/challenges/{day}/map", get(get_challenge_map))
}

/// Parse the `{day}` path segment.
pub(crate) fn parse_day(raw: &str) -> Result<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| AppError::BadRequest(format!("Invalid day: {:?}", raw)))
}

/// List all challenges ordered by day.
async fn list_challenges(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Challenge>>> {
    let challenges = state.db.list_challenges().await?;
    tracing::debug!(count = challenges.len(), "Listed challenges");
    Ok(Json(challenges))
}

async fn create_challenge(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<NewChallenge>,
) -> Result<(StatusCode, Json<Challenge>)> {
    body.validate()?;

    let challenge = state.db.create_challenge(body).await?;
    tracing::info!(day = challenge.day, id = challenge.id, "Challenge created");

    Ok((StatusCode::CREATED, Json(challenge)))
}

async fn get_challenge(
    State(state): State<Arc<AppState>>,
    Path(day): Path<String>,
) -> Result<Json<Challenge>> {
    let day = parse_day(&day)?;
    tracing::debug!(day, "Challenge requested");

    let challenge = state
        .db
        .get_challenge(day)
        .await?
        .ok_or_else(|| AppError::challenge_not_found(day))?;
    Ok(Json(challenge))
}

/// Partial update. Used by the dashboard to toggle `completed`.
async fn update_challenge(
    State(state): State<Arc<AppState>>,
    Path(day): Path<String>,
    AppJson(patch): AppJson<ChallengePatch>,
) -> Result<Json<Challenge>> {
    let day = parse_day(&day)?;
    patch.validate()?;

    let challenge = state
        .db
        .update_challenge(day, patch)
        .await?
        .ok_or_else(|| AppError::challenge_not_found(day))?;

    tracing::info!(day, completed = challenge.completed, "Challenge updated");
    Ok(Json(challenge))
}

/// Map scene for the challenge's stored GeoJSON.
///
/// A challenge without (valid) GeoJSON yields a scene with no sources.
async fn get_challenge_map(
    State(state): State<Arc<AppState>>,
    Path(day): Path<String>,
    Query(query): Query<MapQuery>,
) -> Result<Json<MapScene>> {
    let day = parse_day(&day)?;
    let challenge = state
        .db
        .get_challenge(day)
        .await?
        .ok_or_else(|| AppError::challenge_not_found(day))?;

    let options = query.into_options(&state.config)?;
    Ok(Json(render_scene(options, challenge.geojson.as_ref())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_day() {
        assert_eq!(parse_day("7").unwrap(), 7);
        assert_eq!(parse_day(" 12 ").unwrap(), 12);
        assert!(matches!(parse_day("seven"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_day("1.5"), Err(AppError::BadRequest(_))));
    }
}
