//! Background work for the viewer: raster decodes and geolocation run on
//! plain threads and report back over channels; results are only committed
//! from the UI loop after their ticket survives the staleness check.
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::time::Duration;

use tracing::debug;

use crate::api::{self, OverlayBundle};
use crate::types::Indicator;
use crate::view::geolocate::{GeoFix, LocationProvider};
use crate::view::panel::DecodeTicket;

/// Completion of one decode request. `result` carries the error text rather
/// than the error itself so outcomes stay `Send` without further bounds.
pub struct DecodeOutcome {
    pub ticket: DecodeTicket,
    pub path: PathBuf,
    pub result: Result<OverlayBundle, String>,
}

/// Decode `path` off the UI thread and deliver the outcome. The ticket was
/// captured when the request was issued; whoever drains the channel must
/// discard outcomes whose ticket has gone stale.
pub fn spawn_decode(
    path: PathBuf,
    indicator: Indicator,
    ticket: DecodeTicket,
    sender: Sender<DecodeOutcome>,
) {
    std::thread::spawn(move || {
        debug!("Decoding {:?} for {} panel", path, ticket.side);
        let result = api::load_overlay(&path, indicator).map_err(|e| e.to_string());
        // The UI may have shut down; a closed channel is fine.
        let _ = sender.send(DecodeOutcome {
            ticket,
            path,
            result,
        });
    });
}

/// Completion of one geolocation attempt.
pub struct LocateOutcome {
    pub result: Result<GeoFix, String>,
}

/// Acquire a position fix off the UI thread (the provider may block for the
/// full timeout).
pub fn spawn_locate(
    provider: Arc<dyn LocationProvider + Send + Sync>,
    timeout: Duration,
    sender: Sender<LocateOutcome>,
) {
    std::thread::spawn(move || {
        let result = provider.acquire(timeout).map_err(|e| e.to_string());
        let _ = sender.send(LocateOutcome { result });
    });
}
