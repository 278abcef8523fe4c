//! Command Line Interface (CLI) layer for CLIMAVIEW.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for rendering raster overlays to
//! image files. It wires user-provided options to the underlying library
//! functionality exposed via `climaview::api`.
//!
//! If you are embedding CLIMAVIEW into another application, prefer using
//! the high-level `climaview::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
