// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Seed data: the 30 challenge days and the Danau Singkarak points.

use crate::models::NewChallenge;
use serde::Serialize;

/// `(day, title, description, type)`
pub const CHALLENGES: [(i32, &str, &str, &str); 30] = [
    (1, "Points", "Display point features on a map", "Points"),
    (2, "Lines", "Display line features on a map", "Lines"),
    (3, "Polygons", "Display polygon features on a map", "Polygons"),
    (4, "Hexagons", "Create hexagonal grids", "Polygons"),
    (5, "A map with data from OpenStreetMap", "Use OSM data", "Mixed"),
    (6, "Asia", "Map focused on Asia", "Polygons"),
    (7, "Navigation", "Routing and navigation", "Lines"),
    (8, "Africa", "Map focused on Africa", "Polygons"),
    (9, "AI only", "AI-generated map", "Mixed"),
    (10, "North America", "Map focused on North America", "Polygons"),
    (11, "Arctic", "Map of Arctic region", "Polygons"),
    (12, "Time and space", "Temporal-spatial visualization", "Mixed"),
    (13, "A new tool", "Try a new mapping tool", "Mixed"),
    (14, "A world map", "Global perspective map", "Polygons"),
    (15, "Data day: My data", "Personal dataset visualization", "Mixed"),
    (16, "Choropleth", "Thematic map with colored areas", "Polygons"),
    (17, "Collaborative map", "Multi-user mapping", "Mixed"),
    (18, "Climate", "Climate data visualization", "Mixed"),
    (19, "Typography", "Map labels and text styling", "Mixed"),
    (20, "OpenStreetMap", "Deep dive into OSM", "Mixed"),
    (21, "Conflict", "Conflict and crisis mapping", "Mixed"),
    (22, "Two colours", "Map with only two colors", "Mixed"),
    (23, "Memory", "Personal memory mapping", "Mixed"),
    (24, "Only circular shapes", "Circles and circular patterns", "Points"),
    (25, "Heat", "Heatmap visualization", "Points"),
    (26, "Map projections", "Explore different projections", "Polygons"),
    (27, "Micromapping", "Very detailed small-area mapping", "Mixed"),
    (28, "The Blue Planet", "Ocean and water features", "Polygons"),
    (29, "Overture", "Overture Maps data", "Mixed"),
    (30, "The final map", "Your capstone project", "Mixed"),
];

/// Points around Danau Singkarak for the legacy `task01` table: `(name, lon, lat)`.
pub const SINGKARAK_POINTS: [(&str, f64, f64); 10] = [
    ("Solok Viewpoint", 100.651, -0.784),
    ("Muaro Pingai", 100.611, -0.725),
    ("Saningbakar", 100.586, -0.676),
    ("Paninggahan", 100.568, -0.643),
    ("Singkarak Village", 100.533, -0.602),
    ("Malalo Riverside", 100.497, -0.645),
    ("Sumpur", 100.476, -0.701),
    ("Ombilin", 100.454, -0.764),
    ("Saniangbaka", 100.491, -0.823),
    ("Sumani", 100.545, -0.841),
];

/// The seed challenges as create requests.
pub fn challenges() -> impl Iterator<Item = NewChallenge> {
    CHALLENGES
        .iter()
        .map(|&(day, title, description, kind)| NewChallenge {
            day,
            title: title.to_string(),
            description: Some(description.to_string()),
            kind: kind.to_string(),
            completed: false,
            geojson: None,
        })
}

/// Rows inserted by a seeding run. Existing rows are never overwritten.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub challenges_inserted: u64,
    pub points_inserted: u64,
}
