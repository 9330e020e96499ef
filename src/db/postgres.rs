// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! PostgreSQL/PostGIS backend.
//!
//! Provides typed operations for:
//! - Challenges (the 30 challenge days)
//! - Legacy point table `task01`, returned with GeoJSON geometry

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json as SqlJson;

use crate::db::seed::{self, SeedReport};
use crate::error::AppError;
use crate::models::{Challenge, ChallengePatch, NewChallenge, PointRecord};

const SCHEMA: &str = r#"
CREATE EXTENSION IF NOT EXISTS postgis;

CREATE TABLE IF NOT EXISTS challenges (
    id          SERIAL PRIMARY KEY,
    day         INTEGER NOT NULL UNIQUE,
    title       TEXT NOT NULL,
    description TEXT,
    type        TEXT NOT NULL,
    completed   BOOLEAN NOT NULL DEFAULT FALSE,
    geojson     JSONB,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS task01 (
    id         SERIAL PRIMARY KEY,
    name       TEXT NOT NULL UNIQUE,
    geom       geometry(Point, 4326) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
"#;

const CHALLENGE_COLUMNS: &str =
    "id, day, title, description, type, completed, geojson, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct ChallengeRow {
    id: i32,
    day: i32,
    title: String,
    description: Option<String>,
    #[sqlx(rename = "type")]
    kind: String,
    completed: bool,
    geojson: Option<SqlJson<Value>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ChallengeRow> for Challenge {
    fn from(row: ChallengeRow) -> Self {
        Self {
            id: row.id,
            day: row.day,
            title: row.title,
            description: row.description,
            kind: row.kind,
            completed: row.completed,
            geojson: row.geojson.map(|g| g.0),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PointRow {
    id: i32,
    name: String,
    geometry: SqlJson<Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Pooled PostgreSQL client.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Open the pool and check connectivity.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect(url)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to PostgreSQL: {}", e)))?;

        tracing::info!(max_connections, "Connected to PostgreSQL");
        Ok(Self { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("PostgreSQL pool closed");
    }

    /// Create the PostGIS extension and tables if they are missing.
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    // ─── Challenge Operations ────────────────────────────────────

    pub async fn list_challenges(&self) -> Result<Vec<Challenge>, AppError> {
        let rows: Vec<ChallengeRow> = sqlx::query_as(&format!(
            "SELECT {CHALLENGE_COLUMNS} FROM challenges ORDER BY day ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Challenge::from).collect())
    }

    pub async fn get_challenge(&self, day: i32) -> Result<Option<Challenge>, AppError> {
        let row: Option<ChallengeRow> = sqlx::query_as(&format!(
            "SELECT {CHALLENGE_COLUMNS} FROM challenges WHERE day = $1"
        ))
        .bind(day)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Challenge::from))
    }

    pub async fn create_challenge(&self, new: NewChallenge) -> Result<Challenge, AppError> {
        let row: ChallengeRow = sqlx::query_as(&format!(
            "INSERT INTO challenges (day, title, description, type, completed, geojson) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {CHALLENGE_COLUMNS}"
        ))
        .bind(new.day)
        .bind(new.title)
        .bind(new.description)
        .bind(new.kind)
        .bind(new.completed)
        .bind(new.geojson.map(SqlJson))
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    /// Apply the fields present in `patch`. `None` if the day does not exist.
    pub async fn update_challenge(
        &self,
        day: i32,
        patch: ChallengePatch,
    ) -> Result<Option<Challenge>, AppError> {
        let row: Option<ChallengeRow> = sqlx::query_as(&format!(
            "UPDATE challenges SET \
                 title = COALESCE($2, title), \
                 description = COALESCE($3, description), \
                 type = COALESCE($4, type), \
                 completed = COALESCE($5, completed), \
                 geojson = COALESCE($6, geojson), \
                 updated_at = NOW() \
             WHERE day = $1 \
             RETURNING {CHALLENGE_COLUMNS}"
        ))
        .bind(day)
        .bind(patch.title)
        .bind(patch.description)
        .bind(patch.kind)
        .bind(patch.completed)
        .bind(patch.geojson.map(SqlJson))
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Challenge::from))
    }

    // ─── Legacy Point Table ──────────────────────────────────────

    /// All `task01` rows. Rows whose geometry does not parse are skipped.
    pub async fn list_points(&self) -> Result<Vec<PointRecord>, AppError> {
        let rows: Vec<PointRow> = sqlx::query_as(
            "SELECT id, name, ST_AsGeoJSON(geom)::json AS geometry, created_at, updated_at \
             FROM task01 ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let points = rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value(row.geometry.0) {
                Ok(geometry) => Some(PointRecord {
                    id: row.id,
                    name: row.name,
                    geometry,
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                }),
                Err(e) => {
                    tracing::warn!(id = row.id, error = %e, "Skipping point with invalid geometry");
                    None
                }
            })
            .collect();
        Ok(points)
    }

    // ─── Seeding ─────────────────────────────────────────────────

    /// Insert the seed rows in one transaction, keeping any existing rows.
    pub async fn seed(&self) -> Result<SeedReport, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut report = SeedReport::default();

        for challenge in seed::challenges() {
            let result = sqlx::query(
                "INSERT INTO challenges (day, title, description, type) \
                 VALUES ($1, $2, $3, $4) \
                 ON CONFLICT (day) DO NOTHING",
            )
            .bind(challenge.day)
            .bind(challenge.title)
            .bind(challenge.description)
            .bind(challenge.kind)
            .execute(&mut *tx)
            .await?;
            report.challenges_inserted += result.rows_affected();
        }

        for (name, lon, lat) in seed::SINGKARAK_POINTS {
            let result = sqlx::query(
                "INSERT INTO task01 (name, geom) \
                 VALUES ($1, ST_SetSRID(ST_MakePoint($2, $3), 4326)) \
                 ON CONFLICT (name) DO NOTHING",
            )
            .bind(name)
            .bind(lon)
            .bind(lat)
            .execute(&mut *tx)
            .await?;
            report.points_inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(report)
    }
}
