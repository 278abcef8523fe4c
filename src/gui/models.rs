use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::sync::{Arc, Mutex};

use once_cell::sync::OnceCell;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry};

use crate::config;
use crate::gui::loader::{DecodeOutcome, LocateOutcome};
use crate::gui::logging::{GuiLogLayer, LogEntry};
use crate::io::boundary::BoundaryLayer;
use crate::types::Indicator;
use crate::view::coordinator::ViewCoordinator;
use crate::view::geolocate::{LocationProvider, NoLocationProvider};
use crate::view::panel::PanelSide;
use crate::view::state::GeoPoint;

static LOGGING_INIT: OnceCell<()> = OnceCell::new();

pub fn init_gui_logging() {
    LOGGING_INIT.get_or_init(|| {
        let gui_layer = GuiLogLayer::new();

        // Keep eframe/winit chatter out of the in-app log.
        let filter = EnvFilter::new("debug")
            .add_directive("eframe=info".parse().unwrap())
            .add_directive("winit=info".parse().unwrap())
            .add_directive("egui=info".parse().unwrap());

        let subscriber = Registry::default().with(gui_layer).with(filter);
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

/// Presentation state of one map panel: its viewport, the uploaded overlay
/// texture, and the raster it was last asked to show.
pub struct PanelView {
    pub center: GeoPoint,
    pub zoom: i32,
    pub texture: Option<eframe::egui::TextureHandle>,
    pub path_override: Option<PathBuf>,
    pub last_request: Option<(PathBuf, Indicator)>,
    pub loading: bool,
}

impl PanelView {
    fn new() -> Self {
        let (lat, lng) = config::default_center();
        Self {
            center: GeoPoint::new(lat, lng),
            zoom: config::default_zoom(),
            texture: None,
            path_override: None,
            last_request: None,
            loading: false,
        }
    }
}

pub struct PortalGui {
    pub coordinator: ViewCoordinator,
    pub boundary: Option<BoundaryLayer>,

    pub left_view: PanelView,
    pub right_view: PanelView,

    // Background decode plumbing
    pub decode_tx: Sender<DecodeOutcome>,
    pub decode_rx: Receiver<DecodeOutcome>,

    // Geolocation plumbing
    pub locate_tx: Sender<LocateOutcome>,
    pub locate_rx: Receiver<LocateOutcome>,
    pub locating: bool,
    pub location_provider: Arc<dyn LocationProvider + Send + Sync>,

    // Log panel state
    pub log_messages: Arc<Mutex<Vec<LogEntry>>>,
    pub min_log_level: Level,
    pub show_log: bool,
}

impl Default for PortalGui {
    fn default() -> Self {
        let (decode_tx, decode_rx) = channel();
        let (locate_tx, locate_rx) = channel();
        Self {
            coordinator: ViewCoordinator::new(),
            boundary: None,
            left_view: PanelView::new(),
            right_view: PanelView::new(),
            decode_tx,
            decode_rx,
            locate_tx,
            locate_rx,
            locating: false,
            location_provider: Arc::new(NoLocationProvider),
            log_messages: Arc::new(Mutex::new(Vec::new())),
            min_log_level: Level::INFO,
            show_log: false,
        }
    }
}

impl PortalGui {
    pub fn view(&self, side: PanelSide) -> &PanelView {
        match side {
            PanelSide::Left => &self.left_view,
            PanelSide::Right => &self.right_view,
        }
    }

    pub fn view_mut(&mut self, side: PanelSide) -> &mut PanelView {
        match side {
            PanelSide::Left => &mut self.left_view,
            PanelSide::Right => &mut self.right_view,
        }
    }

    /// The raster a panel should currently be showing: an explicit file pick
    /// wins over the selection-derived asset path.
    pub fn desired_asset(&self, side: PanelSide) -> PathBuf {
        if let Some(path) = &self.view(side).path_override {
            return path.clone();
        }
        let config = self.coordinator.config(side);
        crate::api::panel_asset_path(self.coordinator.state.indicator, &config)
    }

    pub fn pick_panel_file(&mut self, side: PanelSide) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("GeoTIFF rasters", &["tif", "tiff"])
            .pick_file()
        {
            info!("Selected raster for {} panel: {:?}", side, path);
            self.view_mut(side).path_override = Some(path);
        }
    }

    pub fn clear_panel_file(&mut self, side: PanelSide) {
        self.view_mut(side).path_override = None;
    }
}
