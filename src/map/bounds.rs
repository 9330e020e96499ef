//! Bounding box accumulation over GeoJSON coordinates.

use geo::{coord, Rect};
use geojson::FeatureCollection;

/// A longitude/latitude box that starts empty and grows with [`extend`](Self::extend).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LngLatBounds(Option<Rect<f64>>);

impl LngLatBounds {
    pub fn new() -> Self {
        Self(None)
    }

    /// Grow the box to include `[lon, lat]`. Non-finite positions are ignored.
    pub fn extend(&mut self, lon: f64, lat: f64) {
        if !lon.is_finite() || !lat.is_finite() {
            return;
        }
        let point = coord! { x: lon, y: lat };
        self.0 = Some(match self.0 {
            None => Rect::new(point, point),
            Some(rect) => Rect::new(
                coord! { x: rect.min().x.min(lon), y: rect.min().y.min(lat) },
                coord! { x: rect.max().x.max(lon), y: rect.max().y.max(lat) },
            ),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn south_west(&self) -> Option<[f64; 2]> {
        self.0.map(|r| [r.min().x, r.min().y])
    }

    pub fn north_east(&self) -> Option<[f64; 2]> {
        self.0.map(|r| [r.max().x, r.max().y])
    }

    /// `[[west, south], [east, north]]`, the form `fitBounds` takes.
    pub fn to_array(&self) -> Option<[[f64; 2]; 2]> {
        Some([self.south_west()?, self.north_east()?])
    }
}

/// Bounding box of every position in every feature.
pub fn collection_bounds(collection: &FeatureCollection) -> LngLatBounds {
    let mut bounds = LngLatBounds::new();
    for feature in &collection.features {
        if let Some(geometry) = &feature.geometry {
            extend_with_value(&mut bounds, &geometry.value);
        }
    }
    bounds
}

fn extend_with_value(bounds: &mut LngLatBounds, value: &geojson::Value) {
    use geojson::Value as G;
    match value {
        G::Point(p) => extend_with_position(bounds, p),
        G::MultiPoint(points) | G::LineString(points) => {
            points.iter().for_each(|p| extend_with_position(bounds, p))
        }
        G::MultiLineString(rings) | G::Polygon(rings) => rings
            .iter()
            .flatten()
            .for_each(|p| extend_with_position(bounds, p)),
        G::MultiPolygon(polygons) => polygons
            .iter()
            .flatten()
            .flatten()
            .for_each(|p| extend_with_position(bounds, p)),
        G::GeometryCollection(geometries) => geometries
            .iter()
            .for_each(|g| extend_with_value(bounds, &g.value)),
    }
}

// Extra ordinates (altitude) are dropped; short positions are skipped.
fn extend_with_position(bounds: &mut LngLatBounds, position: &[f64]) {
    if let [lon, lat, ..] = position {
        bounds.extend(*lon, *lat);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collection(value: serde_json::Value) -> FeatureCollection {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_extend_tracks_min_max() {
        let mut bounds = LngLatBounds::new();
        assert!(bounds.is_empty());
        assert_eq!(bounds.to_array(), None);

        bounds.extend(100.5, -0.7);
        bounds.extend(100.6, -0.8);
        bounds.extend(f64::NAN, 10.0);

        assert_eq!(bounds.to_array(), Some([[100.5, -0.8], [100.6, -0.7]]));
    }

    #[test]
    fn test_nested_coordinates_are_flattened() {
        let fc = collection(json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {
                        "type": "MultiPolygon",
                        "coordinates": [[[[0.0, 0.0], [4.0, 0.0], [4.0, 3.0], [0.0, 0.0]]]]
                    }
                },
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {"type": "Point", "coordinates": [-2.0, 5.0, 120.0]}
                }
            ]
        }));

        let bounds = collection_bounds(&fc);
        assert_eq!(bounds.south_west(), Some([-2.0, 0.0]));
        assert_eq!(bounds.north_east(), Some([4.0, 5.0]));
    }

    #[test]
    fn test_missing_geometry_leaves_bounds_empty() {
        let fc = collection(json!({
            "type": "FeatureCollection",
            "features": [{"type": "Feature", "properties": {}, "geometry": null}]
        }));
        assert!(collection_bounds(&fc).is_empty());
    }

    #[test]
    fn test_geometry_collection_recurses() {
        let fc = collection(json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "GeometryCollection",
                    "geometries": [
                        {"type": "Point", "coordinates": [1.0, 1.0]},
                        {"type": "LineString", "coordinates": [[2.0, 2.0], [3.0, -1.0]]}
                    ]
                }
            }]
        }));
        assert_eq!(
            collection_bounds(&fc).to_array(),
            Some([[1.0, -1.0], [3.0, 2.0]])
        );
    }
}
