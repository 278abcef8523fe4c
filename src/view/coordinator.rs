//! Dual-panel view coordinator: owns the shared state and both panel
//! controllers, enforces field locks, and runs the locate flow.
use tracing::{debug, info, warn};

use crate::config;
use crate::types::{Model, Period, Scenario};
use crate::view::geolocate::{GeoFix, GeolocationError, LocationProvider};
use crate::view::panel::{PanelController, PanelSide};
use crate::view::state::{GeoPoint, PanRequest, PanelConfig, PanelLocks, ViewOrigin, ViewState};

/// Coordinator over the shared [`ViewState`] and the two panels. The left
/// panel is pinned to the historical baseline; the right panel is freely
/// adjustable and only visible in comparison mode.
#[derive(Debug)]
pub struct ViewCoordinator {
    pub state: ViewState,
    left: PanelController,
    right: PanelController,
}

impl Default for ViewCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewCoordinator {
    pub fn new() -> Self {
        Self {
            state: ViewState::new(),
            left: PanelController::new(PanelSide::Left, PanelLocks::all()),
            right: PanelController::new(PanelSide::Right, PanelLocks::none()),
        }
    }

    pub fn panel(&self, side: PanelSide) -> &PanelController {
        match side {
            PanelSide::Left => &self.left,
            PanelSide::Right => &self.right,
        }
    }

    pub fn panel_mut(&mut self, side: PanelSide) -> &mut PanelController {
        match side {
            PanelSide::Left => &mut self.left,
            PanelSide::Right => &mut self.right,
        }
    }

    /// Panels currently shown: the right one only in comparison mode.
    pub fn visible_sides(&self) -> &'static [PanelSide] {
        if self.state.comparison_mode() {
            &[PanelSide::Left, PanelSide::Right]
        } else {
            &[PanelSide::Left]
        }
    }

    pub fn config(&self, side: PanelSide) -> PanelConfig {
        match side {
            PanelSide::Left => self.state.left,
            PanelSide::Right => self.state.right,
        }
    }

    fn config_mut(&mut self, side: PanelSide) -> &mut PanelConfig {
        match side {
            PanelSide::Left => &mut self.state.left,
            PanelSide::Right => &mut self.state.right,
        }
    }

    /// Set a panel's period unless the field is pinned. Returns whether the
    /// value changed.
    pub fn set_period(&mut self, side: PanelSide, period: Period) -> bool {
        if self.panel(side).locks.period {
            debug!("Ignoring period change on pinned {} panel", side);
            return false;
        }
        self.config_mut(side).period = period;
        true
    }

    pub fn set_scenario(&mut self, side: PanelSide, scenario: Scenario) -> bool {
        if self.panel(side).locks.scenario {
            debug!("Ignoring scenario change on pinned {} panel", side);
            return false;
        }
        self.config_mut(side).scenario = scenario;
        true
    }

    pub fn set_model(&mut self, side: PanelSide, model: Model) -> bool {
        if self.panel(side).locks.model {
            debug!("Ignoring model change on pinned {} panel", side);
            return false;
        }
        self.config_mut(side).model = model;
        true
    }

    /// A panel observed a view change (drag, scroll, or an echo of a
    /// programmatic move). Forwarded to the shared state, which decides
    /// whether it applies.
    pub fn handle_view_event(
        &mut self,
        side: PanelSide,
        origin: ViewOrigin,
        center: GeoPoint,
        zoom: i32,
    ) -> bool {
        let applied = self.state.report_view_change(origin, center, zoom);
        if applied {
            debug!(
                "View change from {} panel applied: center=({:.4}, {:.4}) zoom={}",
                side, center.lat, center.lng, zoom
            );
        }
        applied
    }

    /// Pending pan request for one panel, applied at most once (see
    /// [`PanelController::take_pan`]).
    pub fn take_pan(&mut self, side: PanelSide) -> Option<PanRequest> {
        let state = &self.state;
        match side {
            PanelSide::Left => self.left.take_pan(state),
            PanelSide::Right => self.right.take_pan(state),
        }
    }

    /// Whether one panel must re-measure its surface for the current layout.
    pub fn take_remeasure(&mut self, side: PanelSide) -> bool {
        let state = &self.state;
        match side {
            PanelSide::Left => self.left.take_remeasure(state),
            PanelSide::Right => self.right.take_remeasure(state),
        }
    }

    /// Acquire the device position and lock the view onto it. On failure the
    /// lock is cleared and the error is returned for the transient status UI.
    pub fn locate(&mut self, provider: &dyn LocationProvider) -> Result<GeoFix, GeolocationError> {
        match provider.acquire(config::locate_timeout()) {
            Ok(fix) => {
                info!(
                    "Position fix at ({:.5}, {:.5}), locking view",
                    fix.lat, fix.lng
                );
                self.state.location_acquired(fix);
                Ok(fix)
            }
            Err(err) => {
                warn!("Geolocation failed: {}", err);
                self.state.location_failed();
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::geolocate::{FixedLocationProvider, NoLocationProvider};

    #[test]
    fn test_left_panel_is_pinned_to_baseline() {
        let mut coordinator = ViewCoordinator::new();
        assert!(!coordinator.set_period(PanelSide::Left, Period::Y2090));
        assert!(!coordinator.set_scenario(PanelSide::Left, Scenario::Ssp585));
        assert!(!coordinator.set_model(PanelSide::Left, Model::Miroc6));
        assert_eq!(coordinator.config(PanelSide::Left), PanelConfig::baseline());

        assert!(coordinator.set_period(PanelSide::Right, Period::Y2090));
        assert_eq!(coordinator.config(PanelSide::Right).period, Period::Y2090);
    }

    #[test]
    fn test_visible_sides_follow_comparison_mode() {
        let mut coordinator = ViewCoordinator::new();
        assert_eq!(coordinator.visible_sides(), &[PanelSide::Left]);
        coordinator.state.toggle_comparison_mode();
        assert_eq!(
            coordinator.visible_sides(),
            &[PanelSide::Left, PanelSide::Right]
        );
    }

    #[test]
    fn test_locate_success_locks_and_pans() {
        let mut coordinator = ViewCoordinator::new();
        let provider = FixedLocationProvider {
            lat: 35.68,
            lng: 139.76,
        };
        coordinator.locate(&provider).expect("fix");
        assert!(coordinator.state.is_location_locked());
        let request = coordinator.take_pan(PanelSide::Left).expect("pan request");
        assert_eq!(request.center, GeoPoint::new(35.68, 139.76));
        assert!(coordinator.take_pan(PanelSide::Left).is_none());
        // The right panel tracks the same request independently.
        assert!(coordinator.take_pan(PanelSide::Right).is_some());
    }

    #[test]
    fn test_locate_failure_clears_lock() {
        let mut coordinator = ViewCoordinator::new();
        // Simulate a held lock from a previous fix.
        coordinator.state.location_acquired(GeoFix {
            lat: 35.0,
            lng: 139.0,
            accuracy: None,
            timestamp: None,
        });
        assert!(coordinator.locate(&NoLocationProvider).is_err());
        assert!(!coordinator.state.is_location_locked());
        assert!(coordinator.state.last_location().is_none());
    }
}
