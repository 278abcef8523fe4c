//! Runtime configuration: map coverage bounds, default view, and timeouts.
//! Every constant is overridable through a `CLIMAVIEW_*` environment variable
//! and falls back to the documented literal when unset or malformed.
use std::time::Duration;

use tracing::warn;

use crate::core::placement::GeoBounds;

fn env_f64(name: &str, fallback: f64) -> f64 {
    match std::env::var(name) {
        Ok(raw) => match raw.trim().parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                warn!("Ignoring malformed {}={:?}, using {}", name, raw, fallback);
                fallback
            }
        },
        Err(_) => fallback,
    }
}

fn env_i32(name: &str, fallback: i32) -> i32 {
    match std::env::var(name) {
        Ok(raw) => match raw.trim().parse::<i32>() {
            Ok(v) => v,
            Err(_) => {
                warn!("Ignoring malformed {}={:?}, using {}", name, raw, fallback);
                fallback
            }
        },
        Err(_) => fallback,
    }
}

/// Coverage area of the portal (Tokyo). Also the fallback substituted for
/// rasters whose own bounding box is missing, non-finite, or disjoint.
///
/// Env: `CLIMAVIEW_MAP_MIN_LNG`, `CLIMAVIEW_MAP_MIN_LAT`,
/// `CLIMAVIEW_MAP_MAX_LNG`, `CLIMAVIEW_MAP_MAX_LAT`.
pub fn coverage_bounds() -> GeoBounds {
    GeoBounds::new(
        env_f64("CLIMAVIEW_MAP_MIN_LNG", 138.56250919035112),
        env_f64("CLIMAVIEW_MAP_MIN_LAT", 35.44999973590558),
        env_f64("CLIMAVIEW_MAP_MAX_LNG", 139.96250301668013),
        env_f64("CLIMAVIEW_MAP_MAX_LAT", 36.00000102703388),
    )
}

/// Initial map center as (lat, lng).
///
/// Env: `CLIMAVIEW_DEFAULT_CENTER_LAT`, `CLIMAVIEW_DEFAULT_CENTER_LNG`.
pub fn default_center() -> (f64, f64) {
    (
        env_f64("CLIMAVIEW_DEFAULT_CENTER_LAT", 34.7178),
        env_f64("CLIMAVIEW_DEFAULT_CENTER_LNG", 139.5661),
    )
}

/// Env: `CLIMAVIEW_DEFAULT_ZOOM` (fallback 10).
pub fn default_zoom() -> i32 {
    env_i32("CLIMAVIEW_DEFAULT_ZOOM", 10)
}

/// Env: `CLIMAVIEW_MIN_ZOOM` (fallback 8).
pub fn min_zoom() -> i32 {
    env_i32("CLIMAVIEW_MIN_ZOOM", 8)
}

/// Env: `CLIMAVIEW_MAX_ZOOM` (fallback 15).
pub fn max_zoom() -> i32 {
    env_i32("CLIMAVIEW_MAX_ZOOM", 15)
}

/// Directory the viewer resolves raster and boundary assets from.
///
/// Env: `CLIMAVIEW_DATA_DIR` (fallback `data`).
pub fn data_dir() -> std::path::PathBuf {
    std::env::var("CLIMAVIEW_DATA_DIR")
        .unwrap_or_else(|_| "data".to_string())
        .into()
}

/// Bounded wait for geolocation acquisition before it is treated as a failure.
///
/// Env: `CLIMAVIEW_LOCATE_TIMEOUT_SECS` (fallback 10).
pub fn locate_timeout() -> Duration {
    let secs = env_f64("CLIMAVIEW_LOCATE_TIMEOUT_SECS", 10.0);
    Duration::from_secs_f64(secs.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var overrides are process-global, so the tests only pin the fallback
    // literals for variables no test environment sets.
    #[test]
    fn test_fallback_literals() {
        let b = coverage_bounds();
        assert!(b.west < b.east && b.south < b.north);
        assert!(min_zoom() <= default_zoom() && default_zoom() <= max_zoom());
        assert_eq!(locate_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_env_f64_malformed_falls_back() {
        // SAFETY: test-only mutation of a variable nothing else reads.
        unsafe { std::env::set_var("CLIMAVIEW_TEST_F64", "not-a-number") };
        assert_eq!(env_f64("CLIMAVIEW_TEST_F64", 1.5), 1.5);
        unsafe { std::env::set_var("CLIMAVIEW_TEST_F64", "2.25") };
        assert_eq!(env_f64("CLIMAVIEW_TEST_F64", 1.5), 2.25);
        unsafe { std::env::remove_var("CLIMAVIEW_TEST_F64") };
    }
}
