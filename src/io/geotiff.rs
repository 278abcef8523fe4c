//! GeoTIFF reader: decodes the first image directory of a raster file into a
//! typed pixel buffer plus geographic bounds and band metadata.
//!
//! Bounds policy: a raster whose bounding box is absent, non-finite, or does
//! not overlap the configured coverage area is given the coverage bounds
//! instead of failing. The portal's data drops are occasionally exported with
//! broken georeferencing; substituting the coverage area keeps them viewable.
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use thiserror::Error;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;
use tracing::{debug, warn};

use crate::config;
use crate::core::placement::GeoBounds;

/// Errors encountered while decoding a raster file.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TIFF error: {0}")]
    Tiff(#[from] tiff::TiffError),
    #[error("GeoJSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported band count: {0} (expected 1, 3, or 4)")]
    UnsupportedBandCount(usize),
    #[error("Unsupported sample format: {0}")]
    UnsupportedSampleFormat(String),
    #[error("Dimension mismatch: expected {expected} samples, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

/// Indexed color table: three equal-length 16-bit channel arrays.
#[derive(Debug, Clone)]
pub struct Palette {
    pub red: Vec<u16>,
    pub green: Vec<u16>,
    pub blue: Vec<u16>,
}

impl Palette {
    /// Number of palette entries.
    pub fn len(&self) -> usize {
        self.red.len()
    }

    pub fn is_empty(&self) -> bool {
        self.red.is_empty()
    }
}

/// A decoded raster: interleaved samples plus geographic bounds and metadata.
/// Immutable once decoded; `samples.len() == width * height * bands_per_pixel`.
#[derive(Debug, Clone)]
pub struct RasterImage {
    /// Sample values interleaved by band, row-major.
    pub samples: Vec<f64>,
    pub width: u32,
    pub height: u32,
    /// 1 (scalar), 3 (RGB), or 4 (RGBA).
    pub bands_per_pixel: usize,
    /// No-data sentinel from the GDAL_NODATA tag, if present.
    pub no_data: Option<f64>,
    /// Color table, read only for single-band rasters.
    pub palette: Option<Palette>,
    /// WGS84 bounding box (possibly the coverage fallback).
    pub bounds: GeoBounds,
}

impl RasterImage {
    /// Min/max over finite, non-sentinel samples of a single-band raster.
    /// `None` for multi-band rasters or when no sample is valid.
    pub fn data_range(&self) -> Option<(f64, f64)> {
        if self.bands_per_pixel != 1 {
            return None;
        }
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in &self.samples {
            if v.is_nan() || self.no_data.is_some_and(|nd| v == nd) {
                continue;
            }
            if v < min {
                min = v;
            }
            if v > max {
                max = v;
            }
        }
        (min <= max).then_some((min, max))
    }
}

fn samples_to_f64(result: DecodingResult) -> Result<Vec<f64>, DecodeError> {
    Ok(match result {
        DecodingResult::U8(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U16(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U64(v) => v.into_iter().map(|s| s as f64).collect(),
        DecodingResult::I8(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I16(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I64(v) => v.into_iter().map(|s| s as f64).collect(),
        DecodingResult::F32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::F64(v) => v,
        _ => {
            return Err(DecodeError::UnsupportedSampleFormat(
                "sample type has no numeric conversion".to_string(),
            ));
        }
    })
}

fn read_f64_vec<R: std::io::Read + std::io::Seek>(
    decoder: &mut Decoder<R>,
    tag: Tag,
) -> Option<Vec<f64>> {
    decoder
        .find_tag(tag)
        .ok()
        .flatten()
        .and_then(|v| v.into_f64_vec().ok())
}

fn read_no_data<R: std::io::Read + std::io::Seek>(decoder: &mut Decoder<R>) -> Option<f64> {
    decoder
        .find_tag(Tag::GdalNodata)
        .ok()
        .flatten()
        .and_then(|v| v.into_string().ok())
        .and_then(|s| s.trim().trim_end_matches('\0').parse::<f64>().ok())
}

fn read_palette<R: std::io::Read + std::io::Seek>(decoder: &mut Decoder<R>) -> Option<Palette> {
    let raw = decoder
        .find_tag(Tag::ColorMap)
        .ok()
        .flatten()
        .and_then(|v| v.into_u16_vec().ok())?;
    if raw.is_empty() || raw.len() % 3 != 0 {
        warn!("Ignoring malformed color map with {} entries", raw.len());
        return None;
    }
    let third = raw.len() / 3;
    Some(Palette {
        red: raw[..third].to_vec(),
        green: raw[third..2 * third].to_vec(),
        blue: raw[2 * third..].to_vec(),
    })
}

/// Bounding box from the ModelTiepoint + ModelPixelScale tag pair, if both
/// are present and well-formed.
fn read_bounds<R: std::io::Read + std::io::Seek>(
    decoder: &mut Decoder<R>,
    width: u32,
    height: u32,
) -> Option<GeoBounds> {
    let scale = read_f64_vec(decoder, Tag::ModelPixelScaleTag)?;
    let tie = read_f64_vec(decoder, Tag::ModelTiepointTag)?;
    if scale.len() < 2 || tie.len() < 6 {
        return None;
    }
    let (sx, sy) = (scale[0], scale[1].abs());
    // Tiepoint maps raster (i, j) to model (x, y); anchor the full extent on it.
    let west = tie[3] - tie[0] * sx;
    let north = tie[4] + tie[1] * sy;
    Some(GeoBounds::new(
        west,
        north - sy * height as f64,
        west + sx * width as f64,
        north,
    ))
}

/// Decode a raster file against the portal's configured coverage area.
pub fn decode_geotiff<P: AsRef<Path>>(path: P) -> Result<RasterImage, DecodeError> {
    decode_geotiff_with_coverage(path, &config::coverage_bounds())
}

/// Decode a raster file, substituting `coverage` for missing/invalid/disjoint
/// bounding boxes. Each call re-decodes; there is no caching layer.
pub fn decode_geotiff_with_coverage<P: AsRef<Path>>(
    path: P,
    coverage: &GeoBounds,
) -> Result<RasterImage, DecodeError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut decoder = Decoder::new(BufReader::new(file))?;

    let (width, height) = decoder.dimensions()?;
    let bands_per_pixel = decoder
        .find_tag(Tag::SamplesPerPixel)
        .ok()
        .flatten()
        .and_then(|v| v.into_u16().ok())
        .unwrap_or(1) as usize;
    if !matches!(bands_per_pixel, 1 | 3 | 4) {
        return Err(DecodeError::UnsupportedBandCount(bands_per_pixel));
    }

    let no_data = read_no_data(&mut decoder);
    let palette = if bands_per_pixel == 1 {
        read_palette(&mut decoder)
    } else {
        None
    };

    let bounds = match read_bounds(&mut decoder, width, height) {
        Some(b) if b.is_finite() && b.intersects(coverage) => b,
        Some(b) => {
            debug!(
                "Raster bounds {:?} unusable for {:?}, substituting coverage area",
                b, path
            );
            *coverage
        }
        None => {
            debug!("Raster {:?} carries no bounds, substituting coverage area", path);
            *coverage
        }
    };

    let samples = samples_to_f64(decoder.read_image()?)?;
    let expected = width as usize * height as usize * bands_per_pixel;
    if samples.len() != expected {
        return Err(DecodeError::DimensionMismatch {
            expected,
            got: samples.len(),
        });
    }

    debug!(
        "Decoded {:?}: {}x{} bands={} no_data={:?} palette={} bounds={:?}",
        path,
        width,
        height,
        bands_per_pixel,
        no_data,
        palette.as_ref().map(|p| p.len()).unwrap_or(0),
        bounds
    );

    Ok(RasterImage {
        samples,
        width,
        height,
        bands_per_pixel,
        no_data,
        palette,
        bounds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Seek, Write};
    use tiff::encoder::{TiffEncoder, colortype};

    fn coverage() -> GeoBounds {
        GeoBounds::new(138.56, 35.45, 139.96, 36.0)
    }

    /// Write a single-band f32 GeoTIFF with optional geo tags and nodata.
    fn write_scalar_tiff(
        samples: &[f32],
        width: u32,
        height: u32,
        origin: Option<(f64, f64, f64, f64)>, // west, north, sx, sy
        no_data: Option<&str>,
    ) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        {
            let mut tiff = TiffEncoder::new(file.as_file_mut()).expect("encoder");
            let mut image = tiff
                .new_image::<colortype::Gray32Float>(width, height)
                .expect("image");
            if let Some((west, north, sx, sy)) = origin {
                image
                    .encoder()
                    .write_tag(Tag::ModelPixelScaleTag, &[sx, sy, 0.0][..])
                    .expect("scale tag");
                image
                    .encoder()
                    .write_tag(Tag::ModelTiepointTag, &[0.0, 0.0, 0.0, west, north, 0.0][..])
                    .expect("tiepoint tag");
            }
            if let Some(nd) = no_data {
                image
                    .encoder()
                    .write_tag(Tag::GdalNodata, nd)
                    .expect("nodata tag");
            }
            image.write_data(samples).expect("pixel data");
        }
        file.as_file_mut().flush().expect("flush");
        file.as_file_mut().rewind().expect("rewind");
        file
    }

    #[test]
    fn test_decode_scalar_with_bounds_and_nodata() {
        let file = write_scalar_tiff(
            &[1.0, 2.0, 3.0, 4.0],
            2,
            2,
            Some((139.0, 35.9, 0.1, 0.1)),
            Some("4"),
        );
        let img = decode_geotiff_with_coverage(file.path(), &coverage()).expect("decode");
        assert_eq!((img.width, img.height, img.bands_per_pixel), (2, 2, 1));
        assert_eq!(img.samples, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(img.no_data, Some(4.0));
        assert!(img.palette.is_none());
        let b = img.bounds;
        assert!((b.west - 139.0).abs() < 1e-9);
        assert!((b.north - 35.9).abs() < 1e-9);
        assert!((b.east - 139.2).abs() < 1e-9);
        assert!((b.south - 35.7).abs() < 1e-9);
    }

    #[test]
    fn test_missing_bounds_fall_back_to_coverage() {
        let file = write_scalar_tiff(&[1.0], 1, 1, None, None);
        let img = decode_geotiff_with_coverage(file.path(), &coverage()).expect("decode");
        assert_eq!(img.bounds, coverage());
        assert_eq!(img.no_data, None);
    }

    #[test]
    fn test_non_finite_bounds_fall_back_to_coverage() {
        let file = write_scalar_tiff(&[1.0], 1, 1, Some((f64::NAN, 35.9, 0.1, 0.1)), None);
        let img = decode_geotiff_with_coverage(file.path(), &coverage()).expect("decode");
        assert_eq!(img.bounds, coverage());
    }

    #[test]
    fn test_disjoint_bounds_fall_back_to_coverage() {
        // A raster georeferenced in the Atlantic cannot belong to the portal.
        let file = write_scalar_tiff(&[1.0, 2.0], 2, 1, Some((-30.0, 10.0, 0.5, 0.5)), None);
        let img = decode_geotiff_with_coverage(file.path(), &coverage()).expect("decode");
        assert_eq!(img.bounds, coverage());
    }

    #[test]
    fn test_palette_tag_is_read_for_single_band() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        {
            let mut tiff = TiffEncoder::new(file.as_file_mut()).expect("encoder");
            let mut image = tiff.new_image::<colortype::Gray8>(2, 1).expect("image");
            let cmap: Vec<u16> = vec![
                0, 65535, // red
                0, 30000, // green
                0, 10000, // blue
            ];
            image
                .encoder()
                .write_tag(Tag::ColorMap, &cmap[..])
                .expect("color map tag");
            image.write_data(&[0u8, 1u8]).expect("pixel data");
        }
        file.as_file_mut().flush().expect("flush");
        file.as_file_mut().rewind().expect("rewind");

        let img = decode_geotiff_with_coverage(file.path(), &coverage()).expect("decode");
        let palette = img.palette.expect("palette present");
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.red, vec![0, 65535]);
        assert_eq!(palette.green, vec![0, 30000]);
        assert_eq!(palette.blue, vec![0, 10000]);
    }

    #[test]
    fn test_unreachable_file_is_a_decode_error() {
        let err = decode_geotiff_with_coverage("/no/such/raster.tif", &coverage()).unwrap_err();
        assert!(matches!(err, DecodeError::Io(_)));
    }

    #[test]
    fn test_data_range_skips_invalid_samples() {
        let img = RasterImage {
            samples: vec![f64::NAN, 5.0, 12.0, 9.0],
            width: 2,
            height: 2,
            bands_per_pixel: 1,
            no_data: Some(12.0),
            palette: None,
            bounds: coverage(),
        };
        assert_eq!(img.data_range(), Some((5.0, 9.0)));

        let empty = RasterImage {
            samples: vec![f64::NAN],
            width: 1,
            height: 1,
            bands_per_pixel: 1,
            no_data: None,
            palette: None,
            bounds: coverage(),
        };
        assert_eq!(empty.data_range(), None);
    }
}
