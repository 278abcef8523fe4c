//! Pixel compositor: walks a decoded raster and produces an RGBA overlay.
//!
//! Transparency policy, in order of precedence:
//! - a no-data sample (sentinel match or NaN) is fully transparent;
//! - palette rasters additionally treat the literal value 0 as no-data, even
//!   when the palette defines an entry at index 0 (existing portal behavior,
//!   kept deliberately);
//! - near-white pixels (every channel above [`NEAR_WHITE`]) are treated as the
//!   palette's blank sentinel and rendered transparent;
//! - everything else is opaque, except the single-band-no-palette path which
//!   historically rendered at a fixed partial opacity
//!   ([`LEGACY_SCALAR_OPACITY`], selectable via [`RasterizeOptions`]).
use thiserror::Error;

use crate::core::colorscale::ColorRamp;
use crate::core::placement::{GeoBounds, OverlayAnchor};
use crate::io::geotiff::RasterImage;

/// Channel threshold above which a pixel counts as near-white (0..255 scale).
pub const NEAR_WHITE: f64 = 250.0;

/// Opacity of the legacy single-band rendering mode.
pub const LEGACY_SCALAR_OPACITY: u8 = 200;

const OPAQUE: u8 = 255;

/// Errors producing the overlay image.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),
    #[error("Surface buffer holds {got} bytes, expected {expected}")]
    BufferSize { expected: usize, got: usize },
}

/// Knobs for the rasterizer. `scalar_opacity` applies only to the
/// single-band-no-palette path; palette and RGB paths are always opaque.
#[derive(Debug, Clone, Copy)]
pub struct RasterizeOptions {
    pub scalar_opacity: u8,
}

impl Default for RasterizeOptions {
    fn default() -> Self {
        Self {
            scalar_opacity: OPAQUE,
        }
    }
}

/// An RGBA pixel buffer anchored to the geographic box it covers.
#[derive(Debug, Clone)]
pub struct RenderedOverlay {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub bounds: GeoBounds,
}

impl RenderedOverlay {
    pub fn anchor(&self) -> OverlayAnchor {
        OverlayAnchor::from_bounds(&self.bounds)
    }

    /// RGBA of the pixel at (x, y), row-major.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }
}

fn clamp_channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Rescale a 16-bit palette channel to 8 bits.
fn palette_channel_to_u8(c: u16) -> u8 {
    (c as f64 / 65535.0 * 255.0).round() as u8
}

/// Render `image` into a caller-supplied RGBA buffer of exactly
/// `width * height * 4` bytes.
pub fn rasterize_into(
    image: &RasterImage,
    ramp: &ColorRamp,
    options: RasterizeOptions,
    out: &mut [u8],
) -> Result<(), RenderError> {
    let expected = image.width as usize * image.height as usize * 4;
    if out.len() != expected {
        return Err(RenderError::BufferSize {
            expected,
            got: out.len(),
        });
    }

    let pixel_count = image.width as usize * image.height as usize;
    let bands = image.bands_per_pixel;

    if bands >= 3 {
        for p in 0..pixel_count {
            let r = image.samples[p * bands];
            let g = image.samples[p * bands + 1];
            let b = image.samples[p * bands + 2];

            let is_no_data = match image.no_data {
                Some(nd) => r == nd && g == nd && b == nd,
                None => false,
            };
            let is_white = r > NEAR_WHITE && g > NEAR_WHITE && b > NEAR_WHITE;

            let alpha = if is_no_data || is_white {
                0
            } else if bands >= 4 {
                clamp_channel(image.samples[p * bands + 3])
            } else {
                OPAQUE
            };

            let i = p * 4;
            out[i] = clamp_channel(r);
            out[i + 1] = clamp_channel(g);
            out[i + 2] = clamp_channel(b);
            out[i + 3] = alpha;
        }
        return Ok(());
    }

    let palette = image.palette.as_ref();
    for p in 0..pixel_count {
        let value = image.samples[p];
        let i = p * 4;

        let is_no_data = value.is_nan()
            || image.no_data.is_some_and(|nd| value == nd)
            || (palette.is_some() && value == 0.0);
        if is_no_data {
            out[i..i + 4].copy_from_slice(&[0, 0, 0, 0]);
            continue;
        }

        match palette {
            Some(pal) => {
                let idx = value.floor();
                if idx < 0.0 || idx >= pal.len() as f64 {
                    out[i..i + 4].copy_from_slice(&[0, 0, 0, 0]);
                    continue;
                }
                let idx = idx as usize;
                let r = palette_channel_to_u8(pal.red[idx]);
                let g = palette_channel_to_u8(pal.green[idx]);
                let b = palette_channel_to_u8(pal.blue[idx]);
                if r as f64 > NEAR_WHITE && g as f64 > NEAR_WHITE && b as f64 > NEAR_WHITE {
                    out[i..i + 4].copy_from_slice(&[0, 0, 0, 0]);
                } else {
                    out[i..i + 4].copy_from_slice(&[r, g, b, OPAQUE]);
                }
            }
            None => {
                let [r, g, b] = ramp.pick(value);
                out[i..i + 4].copy_from_slice(&[r, g, b, options.scalar_opacity]);
            }
        }
    }
    Ok(())
}

/// Render `image` into a freshly allocated overlay anchored to its bounds.
pub fn rasterize(image: &RasterImage, ramp: &ColorRamp) -> RenderedOverlay {
    rasterize_with(image, ramp, RasterizeOptions::default())
}

pub fn rasterize_with(
    image: &RasterImage,
    ramp: &ColorRamp,
    options: RasterizeOptions,
) -> RenderedOverlay {
    let mut pixels = vec![0u8; image.width as usize * image.height as usize * 4];
    // Buffer is sized here, so the only failure mode cannot occur.
    rasterize_into(image, ramp, options, &mut pixels)
        .expect("freshly sized buffer matches the image");
    RenderedOverlay {
        pixels,
        width: image.width,
        height: image.height,
        bounds: image.bounds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::colorscale::{TEMPERATURE_RAMP, select_ramp};
    use crate::io::geotiff::{Palette, RasterImage};

    fn bounds() -> GeoBounds {
        GeoBounds::new(138.6, 35.5, 139.9, 36.0)
    }

    fn scalar_image(samples: Vec<f64>, width: u32, height: u32, no_data: Option<f64>) -> RasterImage {
        RasterImage {
            samples,
            width,
            height,
            bands_per_pixel: 1,
            no_data,
            palette: None,
            bounds: bounds(),
        }
    }

    fn grayscale_palette(entries: usize) -> Palette {
        // Index i maps to mid-gray except index 3, which is near-white.
        let ch: Vec<u16> = (0..entries)
            .map(|i| if i == 3 { 65535 } else { 30000 })
            .collect();
        Palette {
            red: ch.clone(),
            green: ch.clone(),
            blue: ch,
        }
    }

    #[test]
    fn test_scalar_no_data_and_nan_are_transparent() {
        let img = scalar_image(vec![f64::NAN, 5.0, 10.0, 10.0], 2, 2, Some(10.0));
        let overlay = rasterize(&img, &TEMPERATURE_RAMP);
        let alphas: Vec<u8> = (0..4).map(|p| overlay.pixels[p * 4 + 3]).collect();
        assert_eq!(alphas, vec![0, 255, 255, 0]);
        // Pixel 1 carries the ramp bucket for value 5 (below the first bound).
        assert_eq!(overlay.pixel(1, 0), [0x21, 0x66, 0xAC, 255]);
    }

    #[test]
    fn test_scalar_legacy_opacity() {
        let img = scalar_image(vec![16.5], 1, 1, None);
        let overlay = rasterize_with(
            &img,
            &TEMPERATURE_RAMP,
            RasterizeOptions {
                scalar_opacity: LEGACY_SCALAR_OPACITY,
            },
        );
        assert_eq!(overlay.pixel(0, 0), [0xFD, 0xDB, 0xC7, 200]);
    }

    #[test]
    fn test_palette_zero_is_always_transparent() {
        let mut img = scalar_image(vec![0.0, 1.0], 2, 1, None);
        img.palette = Some(grayscale_palette(8));
        let overlay = rasterize(&img, &TEMPERATURE_RAMP);
        // Index 0 exists in the palette but value 0 stays no-data.
        assert_eq!(overlay.pixel(0, 0), [0, 0, 0, 0]);
        // 30000 / 65535 * 255 rounds to 117.
        assert_eq!(overlay.pixel(1, 0), [117, 117, 117, 255]);
    }

    #[test]
    fn test_palette_index_is_floored_and_bounded() {
        let mut img = scalar_image(vec![1.9, 8.0, -2.5], 3, 1, None);
        img.palette = Some(grayscale_palette(8));
        let overlay = rasterize(&img, &TEMPERATURE_RAMP);
        // floor(1.9) = 1 stays in range.
        assert_eq!(overlay.pixel(0, 0)[3], 255);
        // floor(8.0) = 8 is one past the last entry.
        assert_eq!(overlay.pixel(1, 0), [0, 0, 0, 0]);
        assert_eq!(overlay.pixel(2, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_palette_near_white_entry_is_transparent() {
        let mut img = scalar_image(vec![3.0], 1, 1, None);
        img.palette = Some(grayscale_palette(8));
        let overlay = rasterize(&img, &TEMPERATURE_RAMP);
        assert_eq!(overlay.pixel(0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_rgb_white_and_sentinel_masking() {
        let img = RasterImage {
            // Pixels: near-white, sentinel triple, ordinary color.
            samples: vec![
                252.0, 251.0, 253.0, //
                7.0, 7.0, 7.0, //
                10.0, 200.0, 30.0,
            ],
            width: 3,
            height: 1,
            bands_per_pixel: 3,
            no_data: Some(7.0),
            palette: None,
            bounds: bounds(),
        };
        let overlay = rasterize(&img, &TEMPERATURE_RAMP);
        assert_eq!(overlay.pixel(0, 0)[3], 0);
        assert_eq!(overlay.pixel(1, 0)[3], 0);
        assert_eq!(overlay.pixel(2, 0), [10, 200, 30, 255]);
    }

    #[test]
    fn test_rgba_alpha_passes_through() {
        let img = RasterImage {
            samples: vec![10.0, 20.0, 30.0, 128.0],
            width: 1,
            height: 1,
            bands_per_pixel: 4,
            no_data: None,
            palette: None,
            bounds: bounds(),
        };
        let overlay = rasterize(&img, &TEMPERATURE_RAMP);
        assert_eq!(overlay.pixel(0, 0), [10, 20, 30, 128]);
    }

    #[test]
    fn test_rasterize_into_rejects_misfit_buffer() {
        let img = scalar_image(vec![1.0], 1, 1, None);
        let mut small = vec![0u8; 3];
        let err = rasterize_into(
            &img,
            select_ramp("tg_mean_annual"),
            RasterizeOptions::default(),
            &mut small,
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::BufferSize { expected: 4, got: 3 }));
    }
}
