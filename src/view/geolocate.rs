//! Device positioning boundary.
//!
//! Where the position actually comes from (browser API, GPS daemon, a fixed
//! test coordinate) is host plumbing; the portal only needs one fix within a
//! bounded wait. Implement [`LocationProvider`] to wire a real source.
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A device position fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoFix {
    pub lat: f64,
    pub lng: f64,
    /// Estimated accuracy radius in meters, when the source reports one.
    pub accuracy: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Errors acquiring a position fix.
#[derive(Debug, Error)]
pub enum GeolocationError {
    #[error("Permission to access the device position was denied")]
    PermissionDenied,
    #[error("No position fix within {0:?}")]
    Timeout(Duration),
    #[error("Position unavailable: {0}")]
    Unavailable(String),
}

/// Source of device position fixes. `acquire` blocks for at most `timeout`.
pub trait LocationProvider {
    fn acquire(&self, timeout: Duration) -> Result<GeoFix, GeolocationError>;
}

/// Provider for hosts without positioning hardware; every acquisition fails.
#[derive(Debug, Default)]
pub struct NoLocationProvider;

impl LocationProvider for NoLocationProvider {
    fn acquire(&self, _timeout: Duration) -> Result<GeoFix, GeolocationError> {
        Err(GeolocationError::Unavailable(
            "no location provider configured".to_string(),
        ))
    }
}

/// Provider returning a fixed coordinate, stamped at acquisition time.
/// Useful for demos and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocationProvider {
    pub lat: f64,
    pub lng: f64,
}

impl LocationProvider for FixedLocationProvider {
    fn acquire(&self, _timeout: Duration) -> Result<GeoFix, GeolocationError> {
        Ok(GeoFix {
            lat: self.lat,
            lng: self.lng,
            accuracy: None,
            timestamp: Some(Utc::now()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_provider_always_fails() {
        let err = NoLocationProvider.acquire(Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, GeolocationError::Unavailable(_)));
    }

    #[test]
    fn test_fixed_provider_reports_its_coordinate() {
        let provider = FixedLocationProvider {
            lat: 35.6812,
            lng: 139.7671,
        };
        let fix = provider.acquire(Duration::from_secs(1)).expect("fix");
        assert_eq!((fix.lat, fix.lng), (35.6812, 139.7671));
        assert!(fix.timestamp.is_some());
    }
}
