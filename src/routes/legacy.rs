// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Legacy `task01` routes: the Danau Singkarak point table as GeoJSON.

use crate::error::Result;
use crate::map::{render_scene, MapScene};
use crate::models::point::points_to_collection;
use crate::routes::MapQuery;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use geojson::FeatureCollection;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/task01", get(get_points))
        .route("/api/task01/map", get(get_points_map))
}

async fn load_collection(state: &AppState) -> Result<FeatureCollection> {
    let points = state.db.list_points().await?;
    tracing::debug!(count = points.len(), "Loaded task01 points");
    Ok(points_to_collection(points))
}

async fn get_points(State(state): State<Arc<AppState>>) -> Result<Json<FeatureCollection>> {
    Ok(Json(load_collection(&state).await?))
}

async fn get_points_map(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MapQuery>,
) -> Result<Json<MapScene>> {
    let collection = load_collection(&state).await?;
    let geojson = serde_json::to_value(&collection).map_err(anyhow::Error::from)?;
    let options = query.into_options(&state.config)?;
    Ok(Json(render_scene(options, Some(&geojson))))
}
