//! Per-panel controller: local UI state, the overlay slot, and the cursors a
//! panel keeps against the shared state (pan request id, layout epoch, decode
//! generation).
use crate::core::rasterize::RenderedOverlay;
use crate::view::state::{PanRequest, PanelLocks, ViewState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelSide {
    Left,
    Right,
}

impl PanelSide {
    pub fn label(&self) -> &'static str {
        match self {
            PanelSide::Left => "left",
            PanelSide::Right => "right",
        }
    }
}

impl std::fmt::Display for PanelSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Capability to commit the result of one decode request. Captured when the
/// decode is issued; a ticket whose generation is no longer current is stale
/// and its result must be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeTicket {
    pub side: PanelSide,
    generation: u64,
}

/// Controller for one map panel.
#[derive(Debug)]
pub struct PanelController {
    pub side: PanelSide,
    /// Collapsed/expanded settings drawer; purely local, never shared.
    pub is_settings_open: bool,
    pub locks: PanelLocks,
    generation: u64,
    last_applied_pan: u64,
    seen_layout_epoch: u64,
    overlay: Option<RenderedOverlay>,
    /// Value range of the current raster, for the legend.
    pub data_range: Option<(f64, f64)>,
}

impl PanelController {
    pub fn new(side: PanelSide, locks: PanelLocks) -> Self {
        Self {
            side,
            is_settings_open: false,
            locks,
            generation: 0,
            last_applied_pan: 0,
            seen_layout_epoch: 0,
            overlay: None,
            data_range: None,
        }
    }

    /// Issue a new decode request. Any ticket from an earlier call becomes
    /// stale immediately; only the newest request may mutate the overlay.
    pub fn begin_decode(&mut self) -> DecodeTicket {
        self.generation += 1;
        DecodeTicket {
            side: self.side,
            generation: self.generation,
        }
    }

    /// Install the overlay produced for `ticket`. Returns false (and leaves
    /// the slot untouched) when the ticket is stale. The previous overlay is
    /// detached before the new one attaches.
    pub fn commit_overlay(
        &mut self,
        ticket: DecodeTicket,
        overlay: RenderedOverlay,
        data_range: Option<(f64, f64)>,
    ) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.overlay = None;
        self.overlay = Some(overlay);
        self.data_range = data_range;
        true
    }

    /// Drop the overlay (decode failure or file deselection); the panel
    /// degrades to the base map.
    pub fn clear_overlay(&mut self, ticket: DecodeTicket) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.overlay = None;
        self.data_range = None;
        true
    }

    pub fn overlay(&self) -> Option<&RenderedOverlay> {
        self.overlay.as_ref()
    }

    /// Pending pan request this panel has not applied yet, if any. Marks the
    /// request as applied for this panel; asking again returns `None` until a
    /// newer request is queued.
    pub fn take_pan(&mut self, state: &ViewState) -> Option<PanRequest> {
        let request = state.pan_request()?;
        if request.id <= self.last_applied_pan {
            return None;
        }
        self.last_applied_pan = request.id;
        Some(request)
    }

    /// True once per layout epoch change: the panel's width changed and its
    /// rendering surface must be re-measured.
    pub fn take_remeasure(&mut self, state: &ViewState) -> bool {
        let epoch = state.layout_epoch();
        if epoch == self.seen_layout_epoch {
            return false;
        }
        self.seen_layout_epoch = epoch;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::placement::GeoBounds;
    use crate::view::state::GeoPoint;

    fn overlay() -> RenderedOverlay {
        RenderedOverlay {
            pixels: vec![0, 0, 0, 255],
            width: 1,
            height: 1,
            bounds: GeoBounds::new(138.6, 35.5, 139.9, 36.0),
        }
    }

    #[test]
    fn test_stale_decode_is_discarded() {
        let mut panel = PanelController::new(PanelSide::Left, PanelLocks::none());
        let first = panel.begin_decode();
        let second = panel.begin_decode();

        // The older request completes late; its result must never apply.
        assert!(!panel.commit_overlay(first, overlay(), None));
        assert!(panel.overlay().is_none());

        assert!(panel.commit_overlay(second, overlay(), Some((1.0, 2.0))));
        assert!(panel.overlay().is_some());
        assert_eq!(panel.data_range, Some((1.0, 2.0)));
    }

    #[test]
    fn test_stale_clear_is_discarded_too() {
        let mut panel = PanelController::new(PanelSide::Right, PanelLocks::none());
        let first = panel.begin_decode();
        let second = panel.begin_decode();
        assert!(panel.commit_overlay(second, overlay(), None));
        assert!(!panel.clear_overlay(first));
        assert!(panel.overlay().is_some());
    }

    #[test]
    fn test_pan_request_applies_once_per_panel() {
        let mut state = ViewState::new();
        let mut panel = PanelController::new(PanelSide::Left, PanelLocks::none());

        assert!(panel.take_pan(&state).is_none());
        state.request_pan_to(GeoPoint::new(35.6, 139.7), Some(12));

        let request = panel.take_pan(&state).expect("first application");
        assert_eq!(request.center, GeoPoint::new(35.6, 139.7));
        // Same id again: must not move the view a second time.
        assert!(panel.take_pan(&state).is_none());

        state.request_pan_to(GeoPoint::new(35.7, 139.8), None);
        assert!(panel.take_pan(&state).is_some());
    }

    #[test]
    fn test_remeasure_fires_once_per_epoch() {
        let mut state = ViewState::new();
        let mut panel = PanelController::new(PanelSide::Left, PanelLocks::none());
        assert!(!panel.take_remeasure(&state));
        state.toggle_comparison_mode();
        assert!(panel.take_remeasure(&state));
        assert!(!panel.take_remeasure(&state));
    }
}
