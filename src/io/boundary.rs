//! Administrative boundary outlines from a GeoJSON FeatureCollection.
//!
//! The boundary file is consumed read-only and rendered as unfilled strokes on
//! top of the base map; a failed load simply means no outlines are drawn.
use std::path::Path;

use serde::Deserialize;

use super::geotiff::DecodeError;

/// Stroke styling for boundary outlines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryStyle {
    pub color: [u8; 3],
    pub weight: f32,
    pub opacity: f32,
}

/// Black hairline at 60% opacity, never filled.
pub const BOUNDARY_STYLE: BoundaryStyle = BoundaryStyle {
    color: [0x00, 0x00, 0x00],
    weight: 1.2,
    opacity: 0.6,
};

/// Polyline outlines in (lat, lng) order, ready for the map layer.
#[derive(Debug, Clone, Default)]
pub struct BoundaryLayer {
    pub outlines: Vec<Vec<(f64, f64)>>,
}

#[derive(Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
}

// GeoJSON positions are [lng, lat, ...]; trailing altitude is ignored.
type Position = Vec<f64>;

#[derive(Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    #[serde(other)]
    Unsupported,
}

fn ring_to_outline(ring: &[Position]) -> Option<Vec<(f64, f64)>> {
    let outline: Vec<(f64, f64)> = ring
        .iter()
        .filter(|p| p.len() >= 2)
        .map(|p| (p[1], p[0]))
        .collect();
    (outline.len() >= 2).then_some(outline)
}

/// Parse a GeoJSON FeatureCollection into boundary outlines.
pub fn parse_boundary(json: &str) -> Result<BoundaryLayer, DecodeError> {
    let collection: FeatureCollection = serde_json::from_str(json)?;
    let mut outlines = Vec::new();
    for feature in &collection.features {
        match &feature.geometry {
            Some(Geometry::Polygon { coordinates }) => {
                outlines.extend(coordinates.iter().filter_map(|r| ring_to_outline(r)));
            }
            Some(Geometry::MultiPolygon { coordinates }) => {
                for polygon in coordinates {
                    outlines.extend(polygon.iter().filter_map(|r| ring_to_outline(r)));
                }
            }
            Some(Geometry::LineString { coordinates }) => {
                outlines.extend(ring_to_outline(coordinates));
            }
            Some(Geometry::MultiLineString { coordinates }) => {
                outlines.extend(coordinates.iter().filter_map(|r| ring_to_outline(r)));
            }
            Some(Geometry::Unsupported) | None => {}
        }
    }
    Ok(BoundaryLayer { outlines })
}

/// Load boundary outlines from a GeoJSON file.
pub fn load_boundary<P: AsRef<Path>>(path: P) -> Result<BoundaryLayer, DecodeError> {
    let json = std::fs::read_to_string(path)?;
    parse_boundary(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_polygon_outlines() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"N03_001": "東京都"},
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[139.0, 35.5], [139.5, 35.5], [139.5, 36.0], [139.0, 35.5]]]
                    }
                },
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {
                        "type": "MultiLineString",
                        "coordinates": [[[138.9, 35.6], [139.1, 35.7]]]
                    }
                }
            ]
        }"#;
        let layer = parse_boundary(json).expect("parse");
        assert_eq!(layer.outlines.len(), 2);
        // Positions flip from [lng, lat] to (lat, lng).
        assert_eq!(layer.outlines[0][0], (35.5, 139.0));
        assert_eq!(layer.outlines[1][1], (35.7, 139.1));
    }

    #[test]
    fn test_unsupported_geometry_is_skipped() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [139.0, 35.5]}},
                {"type": "Feature", "geometry": null}
            ]
        }"#;
        let layer = parse_boundary(json).expect("parse");
        assert!(layer.outlines.is_empty());
    }

    #[test]
    fn test_malformed_json_is_a_decode_error() {
        assert!(matches!(
            parse_boundary("not geojson"),
            Err(DecodeError::Json(_))
        ));
    }
}
