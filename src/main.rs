// Command line front end for the MRZ scanning core

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use image::GenericImageView;
use log::{debug, info};
use mrz_scanner::{
    models::{Orientation, QuickResult, Rect, ScannerConfig},
    processing::{CutoutLayout, ExposureEstimator, ImageProcessor, LineSanitizer, RegionMapper},
    utils::ScanError,
    validation::{ExpiryValidator, QuickMrzParser},
};

#[derive(Parser)]
#[command(name = "mrz-scanner", version, about = "Extract and validate passport MRZ data")]
struct Cli {
    /// JSON scanner configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse OCR text (one recognized line per line) and print the quick MRZ result
    Parse {
        /// Text file; reads stdin when omitted
        input: Option<PathBuf>,
        /// Print a readable report instead of JSON
        #[arg(long)]
        report: bool,
    },
    /// Crop the region under a normalized cutout out of a captured frame
    Crop {
        image: PathBuf,
        /// Normalized cutout as x,y,width,height
        #[arg(long)]
        cutout: Rect,
        #[arg(long, default_value = "portrait")]
        orientation: Orientation,
        /// Margin as a fraction of the crop height; overrides the config
        #[arg(long)]
        margin: Option<f64>,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Apply luminance based exposure correction and binarization
    Enhance {
        image: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Print the cutout rectangle and focus point for a view size
    Cutout {
        #[arg(long)]
        width: f64,
        #[arg(long)]
        height: f64,
    },
}

fn load_config(path: Option<&Path>) -> Result<ScannerConfig, ScanError> {
    match path {
        Some(path) => ScannerConfig::from_json_file(path),
        None => Ok(ScannerConfig::default()),
    }
}

fn read_input(input: Option<&Path>) -> Result<String, ScanError> {
    match input {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn print_report(result: &QuickResult) {
    println!("\n===============================================");
    println!("              MRZ QUICK SCAN REPORT");
    println!("===============================================\n");
    println!("  Passport Number: {}", result.passport_number());
    println!("  Date of Birth:   {}", result.birth_date());
    println!("  Date of Expiry:  {}", result.expiry_date());
    match ExpiryValidator::is_expired_now(result) {
        Some(true) => println!("  Status:          EXPIRED"),
        Some(false) => println!("  Status:          VALID"),
        None => println!("  Status:          UNKNOWN (expiry is not a calendar date)"),
    }
}

fn run(cli: Cli) -> Result<ExitCode, ScanError> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Parse { input, report } => {
            let text = read_input(input.as_deref())?;
            let result = LineSanitizer::sanitize(&text)
                .and_then(|lines| QuickMrzParser::find(lines.lines()));

            match result {
                Some(result) if report => print_report(&result),
                Some(result) => println!("{}", serde_json::to_string_pretty(&result)?),
                None => {
                    eprintln!("No valid MRZ found");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::Crop {
            image,
            cutout,
            orientation,
            margin,
            output,
        } => {
            let frame = ImageProcessor::open(&image)?;
            let mut region =
                RegionMapper::map_cutout_to_image(&cutout, orientation, frame.width(), frame.height());
            if let Some(margin) = margin.or(config.enlarge_margin) {
                region = RegionMapper::enlarge(&region, margin);
            }
            debug!("Mapped cutout {} to {:?}", cutout, region);

            let cropped = ImageProcessor::crop(&frame, &region).ok_or_else(|| {
                ScanError::InvalidInput(format!("cutout {} lies outside the image", cutout))
            })?;
            ImageProcessor::save(&cropped, &output)?;
            info!("Wrote {}x{} crop to {:?}", cropped.width(), cropped.height(), output);
        }
        Command::Enhance { image, output } => {
            let frame = ImageProcessor::open(&image)?;
            let luminance = ImageProcessor::average_luminance(&frame);
            let params = ExposureEstimator::estimate(luminance);
            let enhanced = ImageProcessor::enhance(&frame, &params, config.upscale_factor);
            enhanced.save(&output)?;
            println!("{}", serde_json::to_string_pretty(&params)?);
        }
        Command::Cutout { width, height } => {
            let rect = CutoutLayout::cutout_rect(&config.cutout, width, height);
            let (focus_x, focus_y) = CutoutLayout::relative_center(&config.cutout, width, height);
            println!("cutout: {}", rect);
            println!("focus:  {:.4},{:.4}", focus_x, focus_y);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
