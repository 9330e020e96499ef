//! Geometry-type dispatch and the layer styles it selects.

use serde::Serialize;
use serde_json::{json, Value};

use super::SOURCE_ID;

pub const POINTS_LAYER: &str = "points";
pub const LINES_LAYER: &str = "lines";
pub const POLYGONS_FILL_LAYER: &str = "polygons-fill";
pub const POLYGONS_OUTLINE_LAYER: &str = "polygons-outline";

const PRIMARY_COLOR: &str = "#3b82f6";
const OUTLINE_COLOR: &str = "#1e40af";

/// Shape category used to pick a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Point,
    Line,
    Polygon,
}

impl GeometryKind {
    /// Category of a geometry. Collections have no single category.
    pub fn of(value: &geojson::Value) -> Option<Self> {
        use geojson::Value as G;
        match value {
            G::Point(_) | G::MultiPoint(_) => Some(GeometryKind::Point),
            G::LineString(_) | G::MultiLineString(_) => Some(GeometryKind::Line),
            G::Polygon(_) | G::MultiPolygon(_) => Some(GeometryKind::Polygon),
            G::GeometryCollection(_) => None,
        }
    }

    /// Layers drawn for this category, in the order they are added.
    pub fn layers(self) -> Vec<LayerSpec> {
        match self {
            GeometryKind::Point => vec![LayerSpec::new(
                POINTS_LAYER,
                LayerKind::Circle,
                json!({
                    "circle-radius": 6,
                    "circle-color": PRIMARY_COLOR,
                    "circle-stroke-width": 2,
                    "circle-stroke-color": "#ffffff",
                }),
            )],
            GeometryKind::Line => vec![LayerSpec::new(
                LINES_LAYER,
                LayerKind::Line,
                json!({
                    "line-color": PRIMARY_COLOR,
                    "line-width": 3,
                }),
            )],
            GeometryKind::Polygon => vec![
                LayerSpec::new(
                    POLYGONS_FILL_LAYER,
                    LayerKind::Fill,
                    json!({
                        "fill-color": PRIMARY_COLOR,
                        "fill-opacity": 0.5,
                    }),
                ),
                LayerSpec::new(
                    POLYGONS_OUTLINE_LAYER,
                    LayerKind::Line,
                    json!({
                        "line-color": OUTLINE_COLOR,
                        "line-width": 2,
                    }),
                ),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Circle,
    Line,
    Fill,
}

/// A style layer in MapLibre style-spec form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSpec {
    pub id: &'static str,
    #[serde(rename = "type")]
    pub kind: LayerKind,
    pub source: &'static str,
    pub paint: Value,
}

impl LayerSpec {
    fn new(id: &'static str, kind: LayerKind, paint: Value) -> Self {
        Self {
            id,
            kind,
            source: SOURCE_ID,
            paint,
        }
    }
}
