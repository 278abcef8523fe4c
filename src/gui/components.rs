use eframe::egui;

use crate::config;
use crate::core::colorscale::ColorRamp;
use crate::gui::loader::spawn_locate;
use crate::gui::logging::LogEntry;
use crate::gui::models::PortalGui;
use crate::io::boundary::BOUNDARY_STYLE;
use crate::types::{DisplayMode, Indicator, Model, Period, Scenario};
use crate::view::panel::PanelSide;
use crate::view::state::{GeoPoint, ViewOrigin};

fn pixels_per_degree(zoom: i32) -> f64 {
    256.0 * (1u64 << zoom.max(0) as u32) as f64 / 360.0
}

/// Top control strip: indicator, display mode, sync toggles, comparison mode,
/// locate.
pub struct ControlStripComponent;

impl ControlStripComponent {
    pub fn render(ui: &mut egui::Ui, gui: &mut PortalGui) {
        ui.horizontal_wrapped(|ui| {
            ui.label(egui::RichText::new("🌡 気候指標").strong());
            let indicator = gui.coordinator.state.indicator;
            egui::ComboBox::from_id_salt("indicator")
                .selected_text(indicator.label())
                .show_ui(ui, |ui| {
                    for ind in Indicator::ALL {
                        if ui.selectable_label(indicator == ind, ind.label()).clicked() {
                            gui.coordinator.state.set_indicator(ind);
                        }
                    }
                });

            ui.separator();

            ui.label(egui::RichText::new("📊 表示モード").strong());
            let mode = gui.coordinator.state.display_mode;
            for m in DisplayMode::ALL {
                if ui.selectable_label(mode == m, m.label()).clicked() {
                    gui.coordinator.state.set_display_mode(m);
                }
            }

            ui.separator();

            let mut sync_zoom = gui.coordinator.state.sync_zoom;
            if ui.checkbox(&mut sync_zoom, "🔗 ズーム同期").changed() {
                gui.coordinator.state.toggle_sync_zoom();
            }
            let mut sync_pan = gui.coordinator.state.sync_pan;
            if ui.checkbox(&mut sync_pan, "🔗 パン同期").changed() {
                gui.coordinator.state.toggle_sync_pan();
            }

            ui.separator();

            let mut comparison = gui.coordinator.state.comparison_mode();
            if ui.checkbox(&mut comparison, "比較モード").changed() {
                gui.coordinator.state.toggle_comparison_mode();
            }

            ui.separator();

            Self::render_locate(ui, gui);
        });
    }

    fn render_locate(ui: &mut egui::Ui, gui: &mut PortalGui) {
        if gui.locating {
            ui.spinner();
            ui.label("現在地を取得中…");
            return;
        }
        if gui.coordinator.state.is_location_locked() {
            if ui.button("🔓 追従解除").clicked() {
                gui.coordinator.state.unlock_location();
            }
        } else if ui.button("📍 現在地").clicked() {
            gui.locating = true;
            spawn_locate(
                gui.location_provider.clone(),
                config::locate_timeout(),
                gui.locate_tx.clone(),
            );
        }
    }
}

/// Per-panel header and collapsible settings drawer.
pub struct PanelSettingsComponent;

impl PanelSettingsComponent {
    pub fn render(ui: &mut egui::Ui, gui: &mut PortalGui, side: PanelSide) {
        let config = gui.coordinator.config(side);
        let locks = gui.coordinator.panel(side).locks;

        ui.horizontal(|ui| {
            let title = match side {
                PanelSide::Left => "左マップ",
                PanelSide::Right => "右マップ",
            };
            ui.label(egui::RichText::new(title).strong());
            ui.label(
                egui::RichText::new(format!(
                    "{} / {} / {}",
                    config.period.id(),
                    config.scenario.id(),
                    config.model.id()
                ))
                .weak(),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let open = gui.coordinator.panel(side).is_settings_open;
                if ui.selectable_label(open, "⚙").clicked() {
                    gui.coordinator.panel_mut(side).is_settings_open = !open;
                }
                if ui.button("📂").on_hover_text("ラスタファイルを選択").clicked() {
                    gui.pick_panel_file(side);
                }
                if gui.view(side).path_override.is_some() && ui.button("↩").clicked() {
                    gui.clear_panel_file(side);
                }
            });
        });

        if !gui.coordinator.panel(side).is_settings_open {
            return;
        }

        ui.horizontal_wrapped(|ui| {
            ui.add_enabled_ui(!locks.period, |ui| {
                egui::ComboBox::from_id_salt((side.label(), "period"))
                    .selected_text(config.period.label())
                    .show_ui(ui, |ui| {
                        for p in Period::ALL {
                            if ui.selectable_label(config.period == p, p.label()).clicked() {
                                gui.coordinator.set_period(side, p);
                            }
                        }
                    });
            });
            ui.add_enabled_ui(!locks.scenario, |ui| {
                egui::ComboBox::from_id_salt((side.label(), "scenario"))
                    .selected_text(config.scenario.label())
                    .show_ui(ui, |ui| {
                        for s in Scenario::ALL {
                            if ui
                                .selectable_label(config.scenario == s, s.label())
                                .clicked()
                            {
                                gui.coordinator.set_scenario(side, s);
                            }
                        }
                    });
            });
            ui.add_enabled_ui(!locks.model, |ui| {
                egui::ComboBox::from_id_salt((side.label(), "model"))
                    .selected_text(config.model.label())
                    .show_ui(ui, |ui| {
                        for m in Model::ALL {
                            if ui.selectable_label(config.model == m, m.label()).clicked() {
                                gui.coordinator.set_model(side, m);
                            }
                        }
                    });
            });
        });
    }
}

/// The map surface of one panel: base canvas, coverage outline, boundary
/// strokes, the overlay texture, the location marker, and pan/zoom input.
pub struct MapCanvasComponent;

impl MapCanvasComponent {
    pub fn render(ui: &mut egui::Ui, gui: &mut PortalGui, side: PanelSide) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        let center = gui.view(side).center;
        let zoom = gui.view(side).zoom;
        let ppd = pixels_per_degree(zoom);
        let to_screen = |lat: f64, lng: f64| {
            egui::pos2(
                rect.center().x + ((lng - center.lng) * ppd) as f32,
                rect.center().y + ((center.lat - lat) * ppd) as f32,
            )
        };

        // Base canvas with the coverage area outlined (tile plumbing is out of
        // scope; the flat canvas stands in for the base map).
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(229, 235, 238));
        let coverage = config::coverage_bounds();
        painter.rect_stroke(
            egui::Rect::from_two_pos(
                to_screen(coverage.north, coverage.west),
                to_screen(coverage.south, coverage.east),
            ),
            0.0,
            egui::Stroke::new(1.0, egui::Color32::from_gray(160)),
            egui::StrokeKind::Middle,
        );

        Self::upload_overlay_texture(ui, gui, side);

        if let Some(texture) = &gui.view(side).texture {
            if let Some(overlay) = gui.coordinator.panel(side).overlay() {
                let anchor = overlay.anchor();
                let overlay_rect = egui::Rect::from_two_pos(
                    to_screen(anchor.north_east.0, anchor.south_west.1),
                    to_screen(anchor.south_west.0, anchor.north_east.1),
                );
                painter.image(
                    texture.id(),
                    overlay_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
        }

        if let Some(boundary) = &gui.boundary {
            let stroke = egui::Stroke::new(
                BOUNDARY_STYLE.weight,
                egui::Color32::from_rgba_unmultiplied(
                    BOUNDARY_STYLE.color[0],
                    BOUNDARY_STYLE.color[1],
                    BOUNDARY_STYLE.color[2],
                    (BOUNDARY_STYLE.opacity * 255.0) as u8,
                ),
            );
            for outline in &boundary.outlines {
                let points: Vec<egui::Pos2> = outline
                    .iter()
                    .map(|&(lat, lng)| to_screen(lat, lng))
                    .collect();
                painter.add(egui::Shape::line(points, stroke));
            }
        }

        if let Some(fix) = gui.coordinator.state.last_location() {
            let pos = to_screen(fix.lat, fix.lng);
            painter.circle_filled(pos, 6.0, egui::Color32::from_rgb(0x1E, 0x88, 0xE5));
            painter.circle_stroke(pos, 6.0, egui::Stroke::new(2.0, egui::Color32::WHITE));
        }

        if gui.view(side).loading {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "読み込み中…",
                egui::FontId::proportional(16.0),
                egui::Color32::from_gray(90),
            );
        }

        Self::handle_input(ui, gui, side, &response, center, zoom, ppd);
    }

    fn upload_overlay_texture(ui: &egui::Ui, gui: &mut PortalGui, side: PanelSide) {
        if gui.view(side).texture.is_some() {
            return;
        }
        let image = gui.coordinator.panel(side).overlay().map(|overlay| {
            egui::ColorImage::from_rgba_unmultiplied(
                [overlay.width as usize, overlay.height as usize],
                &overlay.pixels,
            )
        });
        if let Some(image) = image {
            let texture = ui.ctx().load_texture(
                format!("overlay-{}", side),
                image,
                egui::TextureOptions::NEAREST,
            );
            gui.view_mut(side).texture = Some(texture);
        }
    }

    fn handle_input(
        ui: &egui::Ui,
        gui: &mut PortalGui,
        side: PanelSide,
        response: &egui::Response,
        center: GeoPoint,
        zoom: i32,
        ppd: f64,
    ) {
        if response.dragged() {
            let delta = response.drag_delta();
            let new_center = GeoPoint::new(
                center.lat + (delta.y as f64) / ppd,
                center.lng - (delta.x as f64) / ppd,
            );
            gui.view_mut(side).center = new_center;
            gui.coordinator
                .handle_view_event(side, ViewOrigin::User, new_center, zoom);
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let step = if scroll > 0.0 { 1 } else { -1 };
                let new_zoom = (zoom + step).clamp(config::min_zoom(), config::max_zoom());
                if new_zoom != zoom {
                    gui.view_mut(side).zoom = new_zoom;
                    let center = gui.view(side).center;
                    gui.coordinator
                        .handle_view_event(side, ViewOrigin::User, center, new_zoom);
                }
            }
        }
    }
}

/// Legend for the active indicator's ramp plus the panel's value range.
pub struct LegendComponent;

impl LegendComponent {
    pub fn render(ui: &mut egui::Ui, gui: &PortalGui, side: PanelSide) {
        let indicator = gui.coordinator.state.indicator;
        let ramp = indicator.ramp();
        let unit = indicator.unit();

        ui.horizontal_wrapped(|ui| {
            Self::swatches(ui, ramp, unit);
            if let Some((min, max)) = gui.coordinator.panel(side).data_range {
                ui.label(
                    egui::RichText::new(format!("実測 {:.1}〜{:.1}{}", min, max, unit)).weak(),
                );
            }
        });
    }

    fn swatches(ui: &mut egui::Ui, ramp: &ColorRamp, unit: &str) {
        for &(bound, [r, g, b]) in ramp.steps() {
            Self::swatch(ui, egui::Color32::from_rgb(r, g, b));
            ui.label(egui::RichText::new(format!("≤{}{}", bound, unit)).small());
        }
        let [r, g, b] = ramp.terminal();
        Self::swatch(ui, egui::Color32::from_rgb(r, g, b));
        ui.label(egui::RichText::new("超過").small());
    }

    fn swatch(ui: &mut egui::Ui, color: egui::Color32) {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
        ui.painter()
            .rect_filled(rect, 2.0, color);
    }
}

/// Collapsible log panel fed by the tracing layer.
pub struct LogPanelComponent;

impl LogPanelComponent {
    pub fn render(ui: &mut egui::Ui, gui: &mut PortalGui) {
        ui.horizontal(|ui| {
            ui.label("ログ");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.selectable_value(&mut gui.min_log_level, tracing::Level::ERROR, "ERROR");
                ui.selectable_value(&mut gui.min_log_level, tracing::Level::WARN, "WARN");
                ui.selectable_value(&mut gui.min_log_level, tracing::Level::INFO, "INFO");
                ui.selectable_value(&mut gui.min_log_level, tracing::Level::DEBUG, "DEBUG");
            });
        });

        egui::ScrollArea::vertical()
            .max_height(120.0)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if let Ok(logs) = gui.log_messages.lock() {
                    for entry in logs.iter().filter(|e| e.level <= gui.min_log_level) {
                        ui.label(Self::format_entry(entry));
                    }
                }
            });
    }

    fn format_entry(entry: &LogEntry) -> egui::RichText {
        let color = match entry.level {
            tracing::Level::ERROR => egui::Color32::from_rgb(255, 100, 100),
            tracing::Level::WARN => egui::Color32::from_rgb(255, 200, 100),
            tracing::Level::INFO => egui::Color32::from_rgb(100, 200, 255),
            _ => egui::Color32::from_gray(150),
        };
        egui::RichText::new(format!(
            "[{}] {} {}: {}",
            entry.timestamp, entry.level, entry.target, entry.message
        ))
        .color(color)
        .monospace()
        .small()
    }
}
