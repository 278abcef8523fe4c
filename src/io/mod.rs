//! I/O layer for reading raster and vector assets.
//! Provides the `geotiff` raster decoder and the `boundary` GeoJSON loader.
pub mod geotiff;
pub use geotiff::{DecodeError, Palette, RasterImage, decode_geotiff, decode_geotiff_with_coverage};

pub mod boundary;
pub use boundary::{BOUNDARY_STYLE, BoundaryLayer, BoundaryStyle, load_boundary};
