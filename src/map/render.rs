//! The rendering pass over a map engine.

use geojson::{Feature, FeatureCollection, GeoJson};
use serde_json::Value;

use super::{collection_bounds, GeometryKind, MapEngine, FIT_PADDING, SOURCE_ID};

/// Interpret raw JSON as a feature collection.
///
/// A lone Feature or Geometry is wrapped in a collection. Anything that is not
/// valid GeoJSON yields `None`.
pub fn parse_collection(value: &Value) -> Option<FeatureCollection> {
    match GeoJson::from_json_value(value.clone()) {
        Ok(GeoJson::FeatureCollection(collection)) => Some(collection),
        Ok(GeoJson::Feature(feature)) => Some(single(feature)),
        Ok(GeoJson::Geometry(geometry)) => Some(single(Feature::from(geometry))),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring malformed GeoJSON");
            None
        }
    }
}

fn single(feature: Feature) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: vec![feature],
        foreign_members: None,
    }
}

/// Draw `collection` on `map`.
///
/// Empty collections are skipped before anything is touched. Otherwise the
/// shared source is added or updated, the layers for the first feature's
/// geometry type are added if missing, and the camera is fitted when there is
/// at least one valid position.
pub fn render_geojson<M: MapEngine + ?Sized>(map: &mut M, collection: &FeatureCollection) {
    if collection.features.is_empty() {
        tracing::debug!("Empty feature collection, nothing to draw");
        return;
    }

    if map.has_source(SOURCE_ID) {
        map.set_source_data(SOURCE_ID, collection);
    } else {
        map.add_source(SOURCE_ID, collection);
    }

    let kind = collection.features[0]
        .geometry
        .as_ref()
        .and_then(|g| GeometryKind::of(&g.value));

    match kind {
        Some(kind) => {
            for layer in kind.layers() {
                if !map.has_layer(layer.id) {
                    map.add_layer(layer);
                }
            }
        }
        None => tracing::debug!("First feature has no drawable geometry, no layers added"),
    }

    let bounds = collection_bounds(collection);
    if !bounds.is_empty() {
        map.fit_bounds(&bounds, FIT_PADDING);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::layers::{
        LayerKind, LayerSpec, LINES_LAYER, POINTS_LAYER, POLYGONS_FILL_LAYER,
        POLYGONS_OUTLINE_LAYER,
    };
    use crate::map::{LngLatBounds, MapError};
    use serde_json::json;

    /// Engine that records every call.
    #[derive(Default)]
    struct RecordingMap {
        sources: Vec<(String, FeatureCollection)>,
        source_adds: usize,
        source_updates: usize,
        layers: Vec<LayerSpec>,
        fits: Vec<(LngLatBounds, u32)>,
    }

    impl MapEngine for RecordingMap {
        fn has_source(&self, id: &str) -> bool {
            self.sources.iter().any(|(s, _)| s == id)
        }

        fn add_source(&mut self, id: &str, data: &FeatureCollection) {
            self.source_adds += 1;
            self.sources.push((id.to_string(), data.clone()));
        }

        fn set_source_data(&mut self, id: &str, data: &FeatureCollection) {
            self.source_updates += 1;
            if let Some(entry) = self.sources.iter_mut().find(|(s, _)| s == id) {
                entry.1 = data.clone();
            }
        }

        fn has_layer(&self, id: &str) -> bool {
            self.layers.iter().any(|l| l.id == id)
        }

        fn add_layer(&mut self, layer: LayerSpec) {
            self.layers.push(layer);
        }

        fn fit_bounds(&mut self, bounds: &LngLatBounds, padding: u32) {
            self.fits.push((*bounds, padding));
        }

        fn remove(&mut self) -> Result<(), MapError> {
            Ok(())
        }
    }

    fn fc(value: Value) -> FeatureCollection {
        parse_collection(&value).expect("valid collection")
    }

    fn points(coords: &[[f64; 2]]) -> FeatureCollection {
        let features: Vec<Value> = coords
            .iter()
            .map(|c| {
                json!({
                    "type": "Feature",
                    "properties": {},
                    "geometry": {"type": "Point", "coordinates": c}
                })
            })
            .collect();
        fc(json!({"type": "FeatureCollection", "features": features}))
    }

    fn polygon() -> FeatureCollection {
        fc(json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"name": "square"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]
                }
            }]
        }))
    }

    #[test]
    fn test_point_adds_single_circle_layer() {
        let mut map = RecordingMap::default();
        render_geojson(&mut map, &points(&[[100.651, -0.784], [100.611, -0.725]]));

        assert_eq!(map.layers.len(), 1);
        assert_eq!(map.layers[0].id, POINTS_LAYER);
        assert_eq!(map.layers[0].kind, LayerKind::Circle);
        assert!(!map.has_layer(LINES_LAYER));
        assert!(!map.has_layer(POLYGONS_FILL_LAYER));

        assert_eq!(map.fits.len(), 1);
        let (bounds, padding) = map.fits[0];
        assert_eq!(padding, FIT_PADDING);
        assert_eq!(
            bounds.to_array(),
            Some([[100.611, -0.784], [100.651, -0.725]])
        );
    }

    #[test]
    fn test_polygon_adds_fill_and_outline() {
        let mut map = RecordingMap::default();
        render_geojson(&mut map, &polygon());

        let ids: Vec<&str> = map.layers.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![POLYGONS_FILL_LAYER, POLYGONS_OUTLINE_LAYER]);
        assert_eq!(map.layers[0].kind, LayerKind::Fill);
        assert_eq!(map.layers[1].kind, LayerKind::Line);
    }

    #[test]
    fn test_rerender_updates_source_without_duplicates() {
        let mut map = RecordingMap::default();
        render_geojson(&mut map, &points(&[[1.0, 1.0]]));
        let second = points(&[[2.0, 2.0], [3.0, 3.0]]);
        render_geojson(&mut map, &second);

        assert_eq!(map.sources.len(), 1);
        assert_eq!(map.source_adds, 1);
        assert_eq!(map.source_updates, 1);
        assert_eq!(map.sources[0].1, second);
        assert_eq!(map.layers.len(), 1);
        assert_eq!(map.fits.len(), 2);
    }

    #[test]
    fn test_empty_collection_touches_nothing() {
        let mut map = RecordingMap::default();
        render_geojson(
            &mut map,
            &fc(json!({"type": "FeatureCollection", "features": []})),
        );

        assert_eq!(map.source_adds + map.source_updates, 0);
        assert!(map.layers.is_empty());
        assert!(map.fits.is_empty());
    }

    #[test]
    fn test_first_feature_decides_style() {
        let mut map = RecordingMap::default();
        render_geojson(
            &mut map,
            &fc(json!({
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "properties": {},
                        "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]}
                    },
                    {
                        "type": "Feature",
                        "properties": {},
                        "geometry": {"type": "Point", "coordinates": [5.0, 5.0]}
                    }
                ]
            })),
        );

        let ids: Vec<&str> = map.layers.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![LINES_LAYER]);
        // The point still counts toward the camera fit.
        assert_eq!(map.fits[0].0.north_east(), Some([5.0, 5.0]));
    }

    #[test]
    fn test_unrecognized_first_geometry_adds_source_only() {
        let mut map = RecordingMap::default();
        render_geojson(
            &mut map,
            &fc(json!({
                "type": "FeatureCollection",
                "features": [{"type": "Feature", "properties": {}, "geometry": null}]
            })),
        );

        assert_eq!(map.source_adds, 1);
        assert!(map.layers.is_empty());
        assert!(map.fits.is_empty());
    }

    #[test]
    fn test_parse_collection_variants() {
        assert!(parse_collection(&json!(null)).is_none());
        assert!(parse_collection(&json!({"type": "FeatureCollection"})).is_none());
        assert!(parse_collection(&json!({"type": "Circle", "coordinates": [0, 0]})).is_none());

        let wrapped = parse_collection(&json!({"type": "Point", "coordinates": [1.0, 2.0]}))
            .expect("geometry is wrapped");
        assert_eq!(wrapped.features.len(), 1);

        let wrapped = parse_collection(&json!({
            "type": "Feature",
            "properties": null,
            "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}
        }))
        .expect("feature is wrapped");
        assert_eq!(wrapped.features.len(), 1);
    }
}
