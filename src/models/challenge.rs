// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Challenge model: one day of the 30-day map challenge.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// A stored challenge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Challenge {
    pub id: i32,
    /// Day number (1-30), unique
    pub day: i32,
    pub title: String,
    pub description: Option<String>,
    /// Free-form category label ("Points", "Lines", "Polygons", "Mixed", ...)
    #[serde(rename = "type")]
    pub kind: String,
    pub completed: bool,
    /// Stored GeoJSON payload, kept as raw JSON.
    /// Only the map renderer interprets it.
    #[cfg_attr(feature = "binding-generation", ts(type = "unknown"))]
    pub geojson: Option<Value>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub created_at: DateTime<Utc>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub updated_at: DateTime<Utc>,
}

impl Challenge {
    /// Build a challenge from a create request.
    pub fn from_new(id: i32, new: NewChallenge, now: DateTime<Utc>) -> Self {
        Self {
            id,
            day: new.day,
            title: new.title,
            description: new.description,
            kind: new.kind,
            completed: new.completed,
            geojson: new.geojson,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update. `updated_at` is always refreshed.
    pub fn apply(&mut self, patch: ChallengePatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(geojson) = patch.geojson {
            self.geojson = Some(geojson);
        }
        self.updated_at = now;
    }
}

/// Body of `POST /api/challenges`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewChallenge {
    #[validate(range(min = 1))]
    pub day: i32,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 50))]
    pub kind: String,
    #[serde(default)]
    pub completed: bool,
    pub geojson: Option<Value>,
}

/// Body of `PATCH /api/challenges/{day}`. Absent (or null) fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ChallengePatch {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 50))]
    pub kind: Option<String>,
    pub completed: Option<bool>,
    pub geojson: Option<Value>,
}

impl ChallengePatch {
    /// Patch that only sets the completed flag.
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }
}
