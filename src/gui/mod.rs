//! Desktop viewer (feature `gui`): an eframe app hosting the dual-panel map,
//! the control strip, and the in-app log panel. Heavy work (raster decodes,
//! geolocation) runs on background threads via `loader`.
pub mod app;
pub mod components;
pub mod loader;
pub mod logging;
pub mod models;
