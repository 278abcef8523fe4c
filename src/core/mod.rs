//! Core rendering building blocks: color ramps, the pixel compositor, and
//! geographic overlay placement. These are the primitives consumed by the
//! high-level `api` module and the viewer.
pub mod colorscale;
pub mod placement;
pub mod rasterize;
