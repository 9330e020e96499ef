//! Headless map engine that records the result of rendering.
//!
//! The serialized scene is what the browser client applies to its MapLibre
//! instance: the base style, the camera, the `geojson-data` source and the
//! layers drawn from it.

use geojson::FeatureCollection;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use super::{LayerSpec, LngLatBounds, MapEngine, MapError, MapOptions, MapView};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapScene {
    pub style: String,
    pub center: [f64; 2],
    pub zoom: f64,
    pub sources: BTreeMap<String, SceneSource>,
    pub layers: Vec<LayerSpec>,
    /// Set once the camera has been fitted to data.
    pub fit_bounds: Option<FitBounds>,
    #[serde(skip)]
    removed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneSource {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: FeatureCollection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitBounds {
    /// `[[west, south], [east, north]]`
    pub bounds: [[f64; 2]; 2],
    pub padding: u32,
}

impl MapScene {
    pub fn new(options: &MapOptions) -> Self {
        Self {
            style: options.style_url.clone(),
            center: options.center,
            zoom: options.zoom,
            sources: BTreeMap::new(),
            layers: Vec::new(),
            fit_bounds: None,
            removed: false,
        }
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }
}

impl MapEngine for MapScene {
    fn has_source(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    fn add_source(&mut self, id: &str, data: &FeatureCollection) {
        self.sources.insert(
            id.to_string(),
            SceneSource {
                kind: "geojson",
                data: data.clone(),
            },
        );
    }

    fn set_source_data(&mut self, id: &str, data: &FeatureCollection) {
        if let Some(source) = self.sources.get_mut(id) {
            source.data = data.clone();
        }
    }

    fn has_layer(&self, id: &str) -> bool {
        self.layers.iter().any(|l| l.id == id)
    }

    fn add_layer(&mut self, layer: LayerSpec) {
        self.layers.push(layer);
    }

    fn fit_bounds(&mut self, bounds: &LngLatBounds, padding: u32) {
        if let Some(bounds) = bounds.to_array() {
            self.fit_bounds = Some(FitBounds { bounds, padding });
        }
    }

    fn remove(&mut self) -> Result<(), MapError> {
        if self.removed {
            return Err(MapError::AlreadyRemoved);
        }
        self.removed = true;
        self.sources.clear();
        self.layers.clear();
        Ok(())
    }
}

/// Mount a scene, draw `geojson` on it once ready, and return the result.
pub fn render_scene(options: MapOptions, geojson: Option<&Value>) -> MapScene {
    let fallback = MapScene::new(&options);
    let mut view = MapView::mount(options, |options: &MapOptions| MapScene::new(options));
    view.on_load();
    view.set_geojson(geojson);
    let scene = view.map().cloned().unwrap_or(fallback);
    view.unmount();
    scene
}
