use clap::Parser;
use std::path::PathBuf;

use climaview::Indicator;

#[derive(Parser)]
#[command(name = "climaview", version, about = "CLIMAVIEW CLI")]
pub struct CliArgs {
    /// Input GeoTIFF raster
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output PNG overlay
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Climate indicator the raster belongs to (selects the color ramp)
    #[arg(long, value_enum, default_value_t = Indicator::TgMeanAnnual)]
    pub indicator: Indicator,

    /// Render single-band rasters at the legacy partial opacity instead of
    /// fully opaque
    #[arg(long, default_value_t = false)]
    pub legacy_opacity: bool,

    /// Print the value range of the input raster and exit (no output written)
    #[arg(long, default_value_t = false)]
    pub range: bool,

    /// List the indicators, scenarios, periods, and models the portal exposes
    #[arg(long, default_value_t = false)]
    pub list: bool,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
