// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod challenges;
pub mod legacy;
pub mod stats;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::map::MapOptions;
use crate::AppState;
use axum::extract::{FromRequest, Request, State};
use axum::http::{header, Method};
use axum::{middleware, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
    /// "postgres" or "memory"
    pub database: String,
}

/// Health check response
async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    let database = if state.db.is_in_memory() {
        "memory"
    } else {
        "postgres"
    };
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
        database: database.to_string(),
    })
}

/// `Json` extractor whose rejections answer with the `AppError` body.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = axum::extract::rejection::JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(AppJson(value))
    }
}

/// Camera overrides accepted by the map scene routes.
#[derive(Debug, Default, Deserialize)]
pub struct MapQuery {
    pub lon: Option<f64>,
    pub lat: Option<f64>,
    pub zoom: Option<f64>,
}

impl MapQuery {
    pub fn into_options(self, config: &Config) -> Result<MapOptions> {
        for (name, value) in [("lon", self.lon), ("lat", self.lat), ("zoom", self.zoom)] {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(AppError::BadRequest(format!(
                    "{} must be a finite number",
                    name
                )));
            }
        }

        let defaults = MapOptions::default();
        Ok(MapOptions {
            center: [
                self.lon.unwrap_or(defaults.center[0]),
                self.lat.unwrap_or(defaults.center[1]),
            ],
            zoom: self.zoom.unwrap_or(defaults.zoom),
            style_url: config.map_style_url.clone(),
        })
    }
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS layer - allow requests from frontend URL and localhost (for dev)
    let frontend_url = state.config.frontend_url.clone();
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::predicate(
            move |origin: &axum::http::HeaderValue, _request_parts: &axum::http::request::Parts| {
                let origin_str = origin.to_str().unwrap_or("");
                origin_str == frontend_url
                    || origin_str.starts_with("http://localhost")
                    || origin_str.starts_with("http://127.0.0.1")
            },
        ))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(health_check))
        .merge(challenges::routes())
        .merge(stats::routes())
        .merge(legacy::routes())
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_query_rejects_non_finite() {
        let config = Config::test_default();
        let query = MapQuery {
            lon: Some(f64::NAN),
            ..Default::default()
        };
        assert!(matches!(
            query.into_options(&config),
            Err(AppError::BadRequest(_))
        ));

        let query = MapQuery {
            zoom: Some(f64::INFINITY),
            ..Default::default()
        };
        assert!(matches!(
            query.into_options(&config),
            Err(AppError::BadRequest(_))
        ));

        let options = MapQuery {
            lon: Some(100.5),
            lat: Some(-0.7),
            zoom: None,
        }
        .into_options(&config)
        .unwrap();
        assert_eq!(options.center, [100.5, -0.7]);
        assert_eq!(options.zoom, MapOptions::default().zoom);
    }
}
