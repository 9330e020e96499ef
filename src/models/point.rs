// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Legacy spatial point records (the `task01` table).

use chrono::{DateTime, Utc};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject};

/// A named point stored in PostGIS.
#[derive(Debug, Clone)]
pub struct PointRecord {
    pub id: i32,
    pub name: String,
    /// Geometry as returned by `ST_AsGeoJSON`
    pub geometry: Geometry,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PointRecord {
    /// Feature carrying `id` and `name` as properties.
    pub fn into_feature(self) -> Feature {
        let mut properties = JsonObject::new();
        properties.insert("id".to_string(), self.id.into());
        properties.insert("name".to_string(), self.name.into());

        Feature {
            bbox: None,
            geometry: Some(self.geometry),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

/// Bundle point records into a single collection, preserving order.
pub fn points_to_collection(points: Vec<PointRecord>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: points.into_iter().map(PointRecord::into_feature).collect(),
        foreign_members: None,
    }
}
