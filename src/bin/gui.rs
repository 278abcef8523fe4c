#[cfg(feature = "gui")]
use climaview::gui::models::PortalGui;
#[cfg(feature = "gui")]
use eframe::{NativeOptions, egui::ViewportBuilder};

#[cfg(feature = "gui")]
fn main() -> Result<(), eframe::Error> {
    let options = NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title("CLIMAVIEW")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "CLIMAVIEW",
        options,
        Box::new(|_cc| Ok(Box::new(PortalGui::default()))),
    )
}

#[cfg(not(feature = "gui"))]
fn main() {
    eprintln!("GUI feature is not enabled. Please build with --features gui");
    std::process::exit(1);
}
