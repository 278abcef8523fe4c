//! Geographic placement of rendered overlays.
//!
//! A decoded raster carries a WGS84 bounding box; the map layer anchors the
//! rendered image between the box's south-west and north-east corners. The
//! pixel/geo mapping is linear and axis-aligned with no projection correction,
//! matching the image-overlay contract of the map widget.
use serde::{Deserialize, Serialize};

/// A geographic bounding box in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl GeoBounds {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Width of the box in degrees of longitude.
    pub fn width_deg(&self) -> f64 {
        self.east - self.west
    }

    /// Height of the box in degrees of latitude.
    pub fn height_deg(&self) -> f64 {
        self.north - self.south
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }

    /// True when every coordinate is a finite number.
    pub fn is_finite(&self) -> bool {
        self.west.is_finite()
            && self.south.is_finite()
            && self.east.is_finite()
            && self.north.is_finite()
    }

    /// Check if this box geographically overlaps another.
    pub fn intersects(&self, other: &GeoBounds) -> bool {
        self.west < other.east
            && self.east > other.west
            && self.south < other.north
            && self.north > other.south
    }

    pub fn contains_point(&self, lat: f64, lng: f64) -> bool {
        lng >= self.west && lng <= self.east && lat >= self.south && lat <= self.north
    }
}

/// Corner anchors for placing a rendered overlay on the map, as the map widget
/// expects them: (lat, lng) pairs for the south-west and north-east corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayAnchor {
    pub south_west: (f64, f64),
    pub north_east: (f64, f64),
}

impl OverlayAnchor {
    pub fn from_bounds(bounds: &GeoBounds) -> Self {
        Self {
            south_west: (bounds.south, bounds.west),
            north_east: (bounds.north, bounds.east),
        }
    }
}

/// Map a pixel coordinate to (lat, lng). `(0, 0)` is the raster's top-left
/// corner, so it maps to (north, west) and `(width, height)` to (south, east).
pub fn pixel_to_geo(x: f64, y: f64, width: u32, height: u32, bounds: &GeoBounds) -> (f64, f64) {
    let lng = bounds.west + (x / width as f64) * (bounds.east - bounds.west);
    let lat = bounds.north - (y / height as f64) * (bounds.north - bounds.south);
    (lat, lng)
}

/// Inverse of [`pixel_to_geo`]: map (lat, lng) to fractional pixel coordinates.
pub fn geo_to_pixel(lat: f64, lng: f64, width: u32, height: u32, bounds: &GeoBounds) -> (f64, f64) {
    let x = (lng - bounds.west) / (bounds.east - bounds.west) * width as f64;
    let y = (bounds.north - lat) / (bounds.north - bounds.south) * height as f64;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> GeoBounds {
        GeoBounds::new(138.5, 35.4, 140.0, 36.0)
    }

    #[test]
    fn test_pixel_to_geo_corners() {
        let b = bounds();
        assert_eq!(pixel_to_geo(0.0, 0.0, 100, 50, &b), (b.north, b.west));
        assert_eq!(pixel_to_geo(100.0, 50.0, 100, 50, &b), (b.south, b.east));
    }

    #[test]
    fn test_pixel_to_geo_center() {
        let b = bounds();
        let (lat, lng) = pixel_to_geo(50.0, 25.0, 100, 50, &b);
        let (clat, clng) = b.center();
        assert!((lat - clat).abs() < 1e-12);
        assert!((lng - clng).abs() < 1e-12);
    }

    #[test]
    fn test_geo_to_pixel_round_trip() {
        let b = bounds();
        let (lat, lng) = pixel_to_geo(37.0, 13.0, 100, 50, &b);
        let (x, y) = geo_to_pixel(lat, lng, 100, 50, &b);
        assert!((x - 37.0).abs() < 1e-9);
        assert!((y - 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_anchor_corners() {
        let b = bounds();
        let anchor = OverlayAnchor::from_bounds(&b);
        assert_eq!(anchor.south_west, (35.4, 138.5));
        assert_eq!(anchor.north_east, (36.0, 140.0));
    }

    #[test]
    fn test_intersects() {
        let b = bounds();
        assert!(b.intersects(&GeoBounds::new(139.0, 35.5, 141.0, 36.5)));
        assert!(!b.intersects(&GeoBounds::new(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_is_finite() {
        assert!(bounds().is_finite());
        assert!(!GeoBounds::new(f64::NAN, 35.4, 140.0, 36.0).is_finite());
        assert!(!GeoBounds::new(138.5, 35.4, f64::INFINITY, 36.0).is_finite());
    }
}
