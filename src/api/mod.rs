//! High-level, ergonomic library API: decode a raster, pick the indicator's
//! ramp, and rasterize into a map-ready overlay, in one call. Prefer these
//! entrypoints over the low-level `io`/`core` modules when embedding
//! CLIMAVIEW.
use std::path::{Path, PathBuf};

use tracing::info;

use crate::core::colorscale::select_ramp;
use crate::core::placement::GeoBounds;
use crate::core::rasterize::{RasterizeOptions, RenderedOverlay, rasterize_with};
use crate::error::Result;
use crate::io::geotiff::decode_geotiff_with_coverage;
use crate::types::Indicator;
use crate::view::state::PanelConfig;
use crate::{config, io};

/// A rendered overlay together with the legend inputs derived from its source
/// raster.
#[derive(Debug, Clone)]
pub struct OverlayBundle {
    pub overlay: RenderedOverlay,
    /// Min/max of the source values (single-band rasters only).
    pub data_range: Option<(f64, f64)>,
    pub indicator: Indicator,
}

/// Decode `path` and rasterize it under `indicator`'s color ramp, using the
/// configured coverage area as the bounds fallback.
pub fn load_overlay<P: AsRef<Path>>(path: P, indicator: Indicator) -> Result<OverlayBundle> {
    load_overlay_with_options(
        path,
        indicator,
        &config::coverage_bounds(),
        RasterizeOptions::default(),
    )
}

/// [`load_overlay`] with an explicit coverage area and rasterizer options.
pub fn load_overlay_with_options<P: AsRef<Path>>(
    path: P,
    indicator: Indicator,
    coverage: &GeoBounds,
    options: RasterizeOptions,
) -> Result<OverlayBundle> {
    let image = decode_geotiff_with_coverage(path, coverage)?;
    let data_range = image.data_range();
    let ramp = select_ramp(indicator.id());
    let overlay = rasterize_with(&image, ramp, options);
    Ok(OverlayBundle {
        overlay,
        data_range,
        indicator,
    })
}

/// Render a raster to an RGBA PNG file.
pub fn render_overlay_to_png<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    indicator: Indicator,
    output: Q,
    options: RasterizeOptions,
) -> Result<OverlayBundle> {
    let bundle = load_overlay_with_options(
        input,
        indicator,
        &config::coverage_bounds(),
        options,
    )?;
    let overlay = &bundle.overlay;
    let image =
        image::RgbaImage::from_raw(overlay.width, overlay.height, overlay.pixels.clone())
            .ok_or_else(|| crate::error::Error::external("overlay buffer size mismatch"))?;
    image.save(output.as_ref())?;
    info!(
        "Wrote {}x{} overlay to {:?}",
        overlay.width,
        overlay.height,
        output.as_ref()
    );
    Ok(bundle)
}

/// Resolve the raster asset a panel selection points at, under the configured
/// data directory.
pub fn panel_asset_path(indicator: Indicator, panel: &PanelConfig) -> PathBuf {
    config::data_dir().join(panel.tif_filename(indicator))
}

/// Boundary outline asset under the configured data directory.
pub fn boundary_asset_path() -> PathBuf {
    config::data_dir().join("boundary.geojson")
}

/// Load the boundary outlines, degrading to an empty layer with a log line on
/// failure; missing outlines are a cosmetic loss, not an error.
pub fn load_boundary_or_empty<P: AsRef<Path>>(path: P) -> io::BoundaryLayer {
    match io::load_boundary(path.as_ref()) {
        Ok(layer) => {
            info!(
                "Loaded {} boundary outlines from {:?}",
                layer.outlines.len(),
                path.as_ref()
            );
            layer
        }
        Err(err) => {
            tracing::warn!("Boundary load failed for {:?}: {}", path.as_ref(), err);
            io::BoundaryLayer::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::state::PanelConfig;

    #[test]
    fn test_panel_asset_path_uses_selection() {
        let path = panel_asset_path(Indicator::PrTotalAnnual, &PanelConfig::baseline());
        assert!(
            path.ends_with("pr_total_annual_baseline_baseline_2010.tif"),
            "unexpected path {:?}",
            path
        );
    }

    #[test]
    fn test_load_boundary_or_empty_swallows_errors() {
        let layer = load_boundary_or_empty("/no/such/boundary.geojson");
        assert!(layer.outlines.is_empty());
    }
}
