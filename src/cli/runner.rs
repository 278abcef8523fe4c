use tracing::info;

use climaview::core::rasterize::{LEGACY_SCALAR_OPACITY, RasterizeOptions};
use climaview::{DisplayMode, Indicator, Model, Period, Scenario};
use climaview::{decode_geotiff, render_overlay_to_png};

use super::args::CliArgs;
use super::errors::AppError;

fn print_enumerations() {
    println!("Indicators:");
    for ind in Indicator::ALL {
        let unit = ind.unit();
        if unit.is_empty() {
            println!("  {:<20} {}", ind.id(), ind.label());
        } else {
            println!("  {:<20} {} [{}]", ind.id(), ind.label(), unit);
        }
    }
    println!("Scenarios:");
    for s in Scenario::ALL {
        println!("  {:<20} {}", s.id(), s.label());
    }
    println!("Periods:");
    for p in Period::ALL {
        println!("  {:<20} {}", p.id(), p.label());
    }
    println!("Models:");
    for m in Model::ALL {
        println!("  {:<20} {}", m.id(), m.label());
    }
    println!("Display modes:");
    for d in DisplayMode::ALL {
        println!("  {:<20} {}", d.id(), d.label());
    }
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    if args.list {
        print_enumerations();
        return Ok(());
    }

    let input = args.input.ok_or(AppError::MissingArgument {
        arg: "--input".to_string(),
    })?;

    if args.range {
        let image = decode_geotiff(&input).map_err(AppError::from)?;
        match image.data_range() {
            Some((min, max)) => println!("{min} {max}"),
            None => println!("no valid samples"),
        }
        return Ok(());
    }

    let output = args.output.ok_or(AppError::MissingArgument {
        arg: "--output".to_string(),
    })?;

    let options = if args.legacy_opacity {
        RasterizeOptions {
            scalar_opacity: LEGACY_SCALAR_OPACITY,
        }
    } else {
        RasterizeOptions::default()
    };

    let bundle = render_overlay_to_png(&input, args.indicator, &output, options)?;
    if let Some((min, max)) = bundle.data_range {
        info!("Value range: {:.2}..{:.2} {}", min, max, args.indicator.unit());
    }
    info!("Successfully rendered: {:?} -> {:?}\n", input, output);

    Ok(())
}
