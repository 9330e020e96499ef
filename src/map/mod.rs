// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map rendering: draws a GeoJSON feature collection on a map instance.
//!
//! The map itself is abstracted behind [`MapEngine`], which mirrors the small
//! part of the MapLibre GL API the dashboard uses (sources, layers, fitting the
//! camera, disposal). [`MapScene`] is the headless engine the server uses; it
//! records everything and serializes to JSON for the browser client.
//!
//! A render pass:
//! 1. registers (or updates) the single `geojson-data` source,
//! 2. adds the layers for the geometry type of the *first* feature,
//! 3. fits the camera to the bounding box of every coordinate.
//!
//! Mixed collections are styled by their first feature only; later features
//! still contribute to the bounding box.

pub mod bounds;
pub mod layers;
pub mod render;
pub mod scene;
pub mod view;

pub use bounds::{collection_bounds, LngLatBounds};
pub use layers::{GeometryKind, LayerKind, LayerSpec};
pub use render::{parse_collection, render_geojson};
pub use scene::{render_scene, MapScene};
pub use view::{MapOptions, MapView};

use geojson::FeatureCollection;

/// Name of the one data source every render pass writes to.
pub const SOURCE_ID: &str = "geojson-data";

/// Padding (pixels) applied when fitting the camera to the data.
pub const FIT_PADDING: u32 = 50;

/// Operations a map instance must support for rendering.
pub trait MapEngine {
    fn has_source(&self, id: &str) -> bool;

    /// Register a new GeoJSON source.
    fn add_source(&mut self, id: &str, data: &FeatureCollection);

    /// Replace the data of an existing source in place.
    fn set_source_data(&mut self, id: &str, data: &FeatureCollection);

    fn has_layer(&self, id: &str) -> bool;

    fn add_layer(&mut self, layer: LayerSpec);

    /// Animate the camera so `bounds` fills the view, less `padding` pixels.
    fn fit_bounds(&mut self, bounds: &LngLatBounds, padding: u32);

    /// Release the instance. Calling this twice is an error.
    fn remove(&mut self) -> Result<(), MapError>;
}

/// Map instance errors.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Map instance already removed")]
    AlreadyRemoved,
}
