//! Shared view state for the dual-panel map.
//!
//! One owned state object with a defined mutation surface, passed by reference
//! to both panel renderers. Every view mutation carries a [`ViewOrigin`] tag;
//! echoes of programmatic moves and manual moves made while the location lock
//! is held are rejected by a pure predicate instead of a timing flag.
use serde::{Deserialize, Serialize};

use crate::config;
use crate::types::{DisplayMode, Indicator, Model, Period, Scenario};
use crate::view::geolocate::GeoFix;

/// A map coordinate as (lat, lng) in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// One-shot request to drive both panels to a coordinate. Consumers must track
/// the last id they applied; ids increase monotonically per state object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanRequest {
    pub id: u64,
    pub center: GeoPoint,
    pub zoom: i32,
}

/// Who initiated a view change. Programmatic moves (sync propagation, pan
/// requests) must never be fed back into the shared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewOrigin {
    User,
    Programmatic,
}

/// Per-panel data selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelConfig {
    pub period: Period,
    pub scenario: Scenario,
    pub model: Model,
}

impl PanelConfig {
    /// Historical baseline selection (default for the left panel).
    pub fn baseline() -> Self {
        Self {
            period: Period::Y2010,
            scenario: Scenario::Baseline,
            model: Model::Baseline,
        }
    }

    /// Mid-century high-emission ensemble (default for the right panel).
    pub fn projection() -> Self {
        Self {
            period: Period::Y2050,
            scenario: Scenario::Ssp585,
            model: Model::Ensemble,
        }
    }

    /// Raster asset filename for this selection and indicator.
    pub fn tif_filename(&self, indicator: Indicator) -> String {
        format!(
            "{}_{}_{}_{}.tif",
            indicator.id(),
            self.scenario.id(),
            self.model.id(),
            self.period.id()
        )
    }
}

/// Which of a panel's selection fields are pinned (rendered non-interactive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelLocks {
    pub period: bool,
    pub scenario: bool,
    pub model: bool,
}

impl PanelLocks {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            period: true,
            scenario: true,
            model: true,
        }
    }
}

/// Shared map and selection state. Mutated only from the UI event loop.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub indicator: Indicator,
    pub display_mode: DisplayMode,
    comparison_mode: bool,
    pub left: PanelConfig,
    pub right: PanelConfig,
    pub sync_pan: bool,
    pub sync_zoom: bool,
    center: GeoPoint,
    zoom: i32,
    min_zoom: i32,
    max_zoom: i32,
    pan_request: Option<PanRequest>,
    last_location: Option<GeoFix>,
    location_locked: bool,
    layout_epoch: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        let (lat, lng) = config::default_center();
        Self {
            indicator: Indicator::TgMeanAnnual,
            display_mode: DisplayMode::Absolute,
            comparison_mode: false,
            left: PanelConfig::baseline(),
            right: PanelConfig::projection(),
            sync_pan: true,
            sync_zoom: true,
            center: GeoPoint::new(lat, lng),
            zoom: config::default_zoom(),
            min_zoom: config::min_zoom(),
            max_zoom: config::max_zoom(),
            pan_request: None,
            last_location: None,
            location_locked: false,
            layout_epoch: 0,
        }
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn zoom(&self) -> i32 {
        self.zoom
    }

    pub fn comparison_mode(&self) -> bool {
        self.comparison_mode
    }

    pub fn pan_request(&self) -> Option<PanRequest> {
        self.pan_request
    }

    pub fn last_location(&self) -> Option<&GeoFix> {
        self.last_location.as_ref()
    }

    pub fn is_location_locked(&self) -> bool {
        self.location_locked
    }

    /// Counter bumped whenever panel widths change; panels re-measure their
    /// rendering surface when they observe a new value.
    pub fn layout_epoch(&self) -> u64 {
        self.layout_epoch
    }

    pub fn set_indicator(&mut self, indicator: Indicator) {
        self.indicator = indicator;
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
    }

    /// Show/hide the second panel. Panel configs persist across toggles; the
    /// layout epoch is bumped so both panels re-measure.
    pub fn toggle_comparison_mode(&mut self) {
        self.comparison_mode = !self.comparison_mode;
        self.layout_epoch += 1;
    }

    pub fn toggle_sync_pan(&mut self) {
        self.sync_pan = !self.sync_pan;
    }

    pub fn toggle_sync_zoom(&mut self) {
        self.sync_zoom = !self.sync_zoom;
    }

    /// Feed a view change observed on one of the panels into the shared state.
    /// Returns whether the shared center/zoom were updated. Programmatic
    /// echoes never apply; manual moves are suppressed while the location
    /// lock is held so the lock is not immediately fought.
    pub fn report_view_change(&mut self, origin: ViewOrigin, center: GeoPoint, zoom: i32) -> bool {
        if origin == ViewOrigin::Programmatic {
            return false;
        }
        if self.location_locked {
            return false;
        }
        let mut applied = false;
        if self.sync_pan {
            self.center = center;
            applied = true;
        }
        if self.sync_zoom {
            self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
            applied = true;
        }
        applied
    }

    /// Queue a one-shot pan request driving both panels to `center` (and
    /// `zoom`, when given). Each request carries a fresh id and is applied at
    /// most once per consumer.
    pub fn request_pan_to(&mut self, center: GeoPoint, zoom: Option<i32>) {
        let next_zoom = zoom
            .map(|z| z.clamp(self.min_zoom, self.max_zoom))
            .unwrap_or(self.zoom);
        let next_id = self.pan_request.map(|r| r.id).unwrap_or(0) + 1;
        self.center = center;
        self.zoom = next_zoom;
        self.pan_request = Some(PanRequest {
            id: next_id,
            center,
            zoom: next_zoom,
        });
    }

    /// A position fix arrived: remember it, hold the lock, and re-center.
    pub fn location_acquired(&mut self, fix: GeoFix) {
        let center = GeoPoint::new(fix.lat, fix.lng);
        self.last_location = Some(fix);
        self.location_locked = true;
        self.request_pan_to(center, None);
    }

    /// Acquisition failed: clear the lock and surface no position.
    pub fn location_failed(&mut self) {
        self.last_location = None;
        self.location_locked = false;
    }

    /// Manual unlock; normal pan/zoom tracking resumes. The last fix is kept
    /// for the marker.
    pub fn unlock_location(&mut self) {
        self.location_locked = false;
    }
}
