use eframe::egui;
use tracing::{debug, info, warn};

use super::components::*;
use super::models::{PortalGui, init_gui_logging};
use crate::api;
use crate::gui::loader::spawn_decode;
use crate::gui::logging::get_log_buffer;
use crate::view::panel::PanelSide;
use crate::view::state::ViewOrigin;

impl PortalGui {
    fn init_once(&mut self) {
        static INIT: std::sync::Once = std::sync::Once::new();
        INIT.call_once(|| {
            init_gui_logging();
            info!("CLIMAVIEW viewer starting");
        });
        if self.boundary.is_none() {
            self.boundary = Some(api::load_boundary_or_empty(api::boundary_asset_path()));
        }
    }

    /// Move completed background work into the panels. Stale decode results
    /// are discarded here, before they can touch any overlay.
    fn drain_channels(&mut self) {
        while let Ok(outcome) = self.decode_rx.try_recv() {
            let side = outcome.ticket.side;
            match outcome.result {
                Ok(bundle) => {
                    let committed = self.coordinator.panel_mut(side).commit_overlay(
                        outcome.ticket,
                        bundle.overlay,
                        bundle.data_range,
                    );
                    if committed {
                        info!("Overlay ready for {} panel: {:?}", side, outcome.path);
                        self.view_mut(side).texture = None;
                        self.view_mut(side).loading = false;
                    } else {
                        debug!("Discarding stale decode for {} panel", side);
                    }
                }
                Err(err) => {
                    warn!("Decode failed for {:?}: {}", outcome.path, err);
                    if self.coordinator.panel_mut(side).clear_overlay(outcome.ticket) {
                        self.view_mut(side).texture = None;
                        self.view_mut(side).loading = false;
                    }
                }
            }
        }

        while let Ok(outcome) = self.locate_rx.try_recv() {
            self.locating = false;
            match outcome.result {
                Ok(fix) => {
                    info!("Position fix at ({:.5}, {:.5})", fix.lat, fix.lng);
                    self.coordinator.state.location_acquired(fix);
                }
                Err(err) => {
                    warn!("Geolocation failed: {}", err);
                    self.coordinator.state.location_failed();
                }
            }
        }
    }

    /// Issue decodes for panels whose file selection or indicator changed.
    fn schedule_decodes(&mut self) {
        for &side in self.coordinator.visible_sides() {
            let desired = self.desired_asset(side);
            let indicator = self.coordinator.state.indicator;
            let current = (desired.clone(), indicator);
            if self.view(side).last_request.as_ref() == Some(&current) {
                continue;
            }
            let ticket = self.coordinator.panel_mut(side).begin_decode();
            self.view_mut(side).last_request = Some(current);
            self.view_mut(side).loading = true;
            spawn_decode(desired, indicator, ticket, self.decode_tx.clone());
        }
    }

    /// Apply pan requests and sync-follow to each visible panel's viewport.
    fn drive_viewports(&mut self) {
        for &side in self.coordinator.visible_sides() {
            if let Some(request) = self.coordinator.take_pan(side) {
                let view = self.view_mut(side);
                view.center = request.center;
                view.zoom = request.zoom;
                // The echo is tagged programmatic so the state rejects it.
                self.coordinator.handle_view_event(
                    side,
                    ViewOrigin::Programmatic,
                    request.center,
                    request.zoom,
                );
                continue;
            }
            let (center, zoom) = (self.coordinator.state.center(), self.coordinator.state.zoom());
            let sync_pan = self.coordinator.state.sync_pan;
            let sync_zoom = self.coordinator.state.sync_zoom;
            let view = self.view_mut(side);
            if sync_pan {
                view.center = center;
            }
            if sync_zoom {
                view.zoom = zoom;
            }
        }
        for side in [PanelSide::Left, PanelSide::Right] {
            if self.coordinator.take_remeasure(side) {
                // Width changed (comparison toggled): drop the texture so the
                // surface is rebuilt pixel-aligned on the next paint.
                self.view_mut(side).texture = None;
            }
        }
    }

    fn render_panel(&mut self, ui: &mut egui::Ui, side: PanelSide) {
        ui.vertical(|ui| {
            PanelSettingsComponent::render(ui, self, side);
            LegendComponent::render(ui, self, side);
            MapCanvasComponent::render(ui, self, side);
        });
    }
}

impl eframe::App for PortalGui {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.init_once();
        self.drain_channels();
        self.schedule_decodes();
        self.drive_viewports();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new("CLIMAVIEW")
                        .size(24.0)
                        .strong(),
                );
                ui.label(
                    egui::RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                        .size(10.0)
                        .weak(),
                );
                ui.label(
                    egui::RichText::new("東京の気候変動予測マップ")
                        .size(12.0)
                        .weak(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.toggle_value(&mut self.show_log, "ログ");
                });
            });
            ControlStripComponent::render(ui, self);
        });

        if self.show_log {
            egui::TopBottomPanel::bottom("log").show(ctx, |ui| {
                LogPanelComponent::render(ui, self);
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let sides = self.coordinator.visible_sides();
            if sides.len() == 1 {
                self.render_panel(ui, PanelSide::Left);
            } else {
                let panel_width = (ui.available_width() - 8.0) / 2.0;
                ui.horizontal(|ui| {
                    ui.allocate_ui(egui::vec2(panel_width, ui.available_height()), |ui| {
                        self.render_panel(ui, PanelSide::Left);
                    });
                    ui.separator();
                    ui.allocate_ui(egui::vec2(panel_width, ui.available_height()), |ui| {
                        self.render_panel(ui, PanelSide::Right);
                    });
                });
            }
        });

        // Pull fresh tracing events into the panel buffer and keep painting
        // while background work is pending.
        let mut has_new_logs = false;
        if let Ok(mut buf) = get_log_buffer().lock() {
            if !buf.is_empty() {
                if let Ok(mut logs) = self.log_messages.lock() {
                    logs.extend(buf.drain(..));
                    let len = logs.len();
                    if len > 1000 {
                        logs.drain(0..(len - 1000));
                    }
                    has_new_logs = true;
                }
            }
        }
        let busy = self.locating
            || self.left_view.loading
            || self.right_view.loading;
        if has_new_logs || busy {
            ctx.request_repaint();
        }
    }
}
