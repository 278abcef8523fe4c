#![doc = r#"
CLIMAVIEW — a climate projection raster viewer for the Tokyo region.

This crate decodes gridded GeoTIFF climate indicators (temperature,
precipitation, heat-index day counts), classifies every pixel through discrete
color ramps, and composites the result into RGBA overlays anchored to WGS84
bounding boxes. It powers the CLIMAVIEW CLI renderer and the dual-panel
desktop viewer, and can be embedded in your own Rust applications.

Stability
---------
The public library API is experimental in initial releases. It is built on top
of the working viewer and CLI, but may evolve as the crate stabilizes.
Breaking changes can occur.

Quick start: render a raster to a PNG overlay
---------------------------------------------
```rust,no_run
use std::path::Path;
use climaview::{Indicator, RasterizeOptions, render_overlay_to_png};

fn main() -> climaview::Result<()> {
    let bundle = render_overlay_to_png(
        Path::new("data/tg_mean_annual_baseline_baseline_2010.tif"),
        Indicator::TgMeanAnnual,
        Path::new("/out/overlay.png"),
        RasterizeOptions::default(),
    )?;

    if let Some((min, max)) = bundle.data_range {
        println!("value range: {min:.1}..{max:.1}");
    }
    Ok(())
}
```

Decode and rasterize in-memory
------------------------------
```rust,no_run
use climaview::{decode_geotiff, rasterize, select_ramp};

fn main() -> climaview::Result<()> {
    let image = decode_geotiff("data/pr_total_annual_ssp585_ensemble_2050.tif")?;
    let overlay = rasterize(&image, select_ramp("pr_total_annual"));
    // `overlay.pixels` is RGBA, `overlay.anchor()` gives the map corners.
    Ok(())
}
```

Drive the dual-panel view state
-------------------------------
```rust
use climaview::view::{PanelSide, ViewCoordinator, ViewOrigin};
use climaview::view::state::GeoPoint;

let mut coordinator = ViewCoordinator::new();
coordinator.state.toggle_comparison_mode();

// A user drag on the left panel propagates through the shared state...
coordinator.handle_view_event(
    PanelSide::Left,
    ViewOrigin::User,
    GeoPoint::new(35.68, 139.76),
    12,
);
// ...and the echo of the programmatic follow-up move is rejected.
let applied = coordinator.handle_view_event(
    PanelSide::Right,
    ViewOrigin::Programmatic,
    GeoPoint::new(35.68, 139.76),
    12,
);
assert!(!applied);
```

Error handling
--------------
All public functions return `climaview::Result<T>`; match on
`climaview::Error` to handle specific cases, e.g. decode or render errors.
Decode and render failures are meant to be contained at the panel boundary:
the affected panel degrades to the base map with no overlay.

Feature flags
-------------
- `gui`: builds the desktop viewer module (on by default).
- `full`: enables a complete feature set for typical end-to-end workflows.

Useful modules
--------------
- [`api`] — high-level, ergonomic entry points.
- [`types`] — the closed enumerations the UI layer exposes.
- [`io`] — GeoTIFF raster decoding and GeoJSON boundary loading.
- [`core`] — color ramps, the pixel compositor, and overlay placement.
- [`view`] — the dual-panel view state machine.
- [`config`] — environment-overridable map constants.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod types;
pub mod view;

// GUI module (only available with gui feature)
#[cfg(feature = "gui")]
pub mod gui;

// Curated public API surface
// Types
pub use error::{Error, Result};
pub use types::{DisplayMode, Indicator, Model, Period, Scenario};

// Decoding
pub use io::boundary::{BOUNDARY_STYLE, BoundaryLayer, load_boundary};
pub use io::geotiff::{
    DecodeError, Palette, RasterImage, decode_geotiff, decode_geotiff_with_coverage,
};

// Rendering
pub use core::colorscale::{
    ColorRamp, DAYS_RAMP, PRECIPITATION_RAMP, RampFamily, TEMPERATURE_RAMP, select_ramp,
};
pub use core::placement::{GeoBounds, OverlayAnchor, geo_to_pixel, pixel_to_geo};
pub use core::rasterize::{
    LEGACY_SCALAR_OPACITY, NEAR_WHITE, RasterizeOptions, RenderError, RenderedOverlay, rasterize,
    rasterize_into, rasterize_with,
};

// High-level API re-exports
pub use api::{
    OverlayBundle, load_boundary_or_empty, load_overlay, load_overlay_with_options,
    panel_asset_path, render_overlay_to_png,
};
