//! Map view state machine: the shared [`state::ViewState`], the per-panel
//! [`panel::PanelController`]s, the [`coordinator::ViewCoordinator`] tying
//! them together, and the [`geolocate`] positioning boundary.
pub mod coordinator;
pub mod geolocate;
pub mod panel;
pub mod state;

pub use coordinator::ViewCoordinator;
pub use geolocate::{GeoFix, GeolocationError, LocationProvider};
pub use panel::{DecodeTicket, PanelController, PanelSide};
pub use state::{GeoPoint, PanRequest, PanelConfig, PanelLocks, ViewOrigin, ViewState};
