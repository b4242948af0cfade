// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Quadscan — document detection and rectification from the command line.
//
// Entry point. Initialises logging, parses the subcommand, and reports
// failures as plain-English messages with a non-zero exit status.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use image::{DynamicImage, Rgb};
use serde::Serialize;

use quadscan_core::error::{QuadScanError, Result};
use quadscan_core::human_errors::humanize_error;
use quadscan_core::{DetectionConfig, Point, Quad};
use quadscan_detect::detect::ColorRange;
use quadscan_detect::{DocumentDetector, EdgeDetector};

#[derive(Parser)]
#[command(name = "quadscan")]
#[command(about = "Find documents photographed against a plain background and straighten them")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect every document and report its corners as JSON.
    Detect(DetectArgs),

    /// Rectify the most central document and save it as an image.
    Extract(ExtractArgs),

    /// Detect four-sided outlines from image edges, ignoring background colour.
    Edges(EdgesArgs),
}

#[derive(Debug, Clone, Args)]
struct SourceArgs {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// Background colour as `r,g,b` (0-255 each).
    #[arg(long, value_parser = parse_background)]
    background: Rgb<u8>,

    /// JSON file with detection settings; missing fields take defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
struct DetectArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Write the report here instead of standard output.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
struct ExtractArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output image path; the format follows the extension.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Debug, Clone, Args)]
struct EdgesArgs {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// Maximum number of outlines to report (0 for all).
    #[arg(long, default_value_t = 0)]
    max: usize,

    /// Write the report here instead of standard output.
    #[arg(long)]
    out: Option<PathBuf>,
}

// -- Reports ------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct DetectReport {
    width: u32,
    height: u32,
    background: [u8; 3],
    band: ColorRange,
    documents: Vec<DocumentEntry>,
}

#[derive(Debug, Serialize)]
struct EdgesReport {
    width: u32,
    height: u32,
    documents: Vec<DocumentEntry>,
}

#[derive(Debug, Serialize)]
struct DocumentEntry {
    corners: [Point; 4],
    /// `x0, y0, x1, y1, x2, y2, x3, y3`
    flat: [i32; 8],
    area: f64,
}

impl From<&Quad> for DocumentEntry {
    fn from(quad: &Quad) -> Self {
        Self {
            corners: quad.corners,
            flat: quad.to_flat(),
            area: quad.area(),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Detect(args) => run_detect(&args),
        Commands::Extract(args) => run_extract(&args),
        Commands::Edges(args) => run_edges(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "Command failed");
            let human = humanize_error(&e);
            eprintln!("error: {}", human.message);
            eprintln!("  {}", human.suggestion);
            ExitCode::FAILURE
        }
    }
}

// -- detect -------------------------------------------------------------------

fn run_detect(args: &DetectArgs) -> Result<()> {
    let detector = build_detector(args.source.config.as_deref())?;
    let image = load_image(&args.source.image)?;
    let quads = detector.detect_documents(&image, args.source.background)?;

    let report = DetectReport {
        width: image.width(),
        height: image.height(),
        background: args.source.background.0,
        band: ColorRange::new(
            args.source.background,
            detector.config().effective_color_tolerance(),
        ),
        documents: quads.iter().map(DocumentEntry::from).collect(),
    };
    write_report(&report, args.out.as_deref())
}

// -- extract ------------------------------------------------------------------

fn run_extract(args: &ExtractArgs) -> Result<()> {
    let detector = build_detector(args.source.config.as_deref())?;
    let image = load_image(&args.source.image)?;
    let (quad, page) = detector.extract_document_with_quad(&image, args.source.background)?;

    page.save(&args.out)
        .map_err(|e| QuadScanError::ImageError(e.to_string()))?;
    tracing::info!(
        out = %args.out.display(),
        corners = ?quad.corners,
        width = page.width(),
        height = page.height(),
        "Document written"
    );
    Ok(())
}

// -- edges --------------------------------------------------------------------

fn run_edges(args: &EdgesArgs) -> Result<()> {
    let image = load_image(&args.image)?;
    let quads = EdgeDetector::new().detect(&image, args.max)?;

    let report = EdgesReport {
        width: image.width(),
        height: image.height(),
        documents: quads.iter().map(DocumentEntry::from).collect(),
    };
    write_report(&report, args.out.as_deref())
}

// -- Helpers ------------------------------------------------------------------

fn build_detector(config: Option<&Path>) -> Result<DocumentDetector> {
    match config {
        Some(path) => DocumentDetector::with_config(DetectionConfig::from_json_file(path)?),
        None => Ok(DocumentDetector::new()),
    }
}

/// Decode `path` and normalise it to 8-bit RGB, the only layout the
/// detectors accept.
fn load_image(path: &Path) -> Result<DynamicImage> {
    let decoded = image::open(path)
        .map_err(|e| QuadScanError::ImageError(format!("{}: {e}", path.display())))?;
    Ok(match decoded {
        DynamicImage::ImageRgb8(_) => decoded,
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    })
}

fn write_report<T: Serialize>(report: &T, out: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    match out {
        Some(path) => {
            std::fs::write(path, json)?;
            tracing::info!(out = %path.display(), "Report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Parse `r,g,b` into a colour.
fn parse_background(value: &str) -> std::result::Result<Rgb<u8>, String> {
    let channels: Vec<&str> = value.split(',').map(str::trim).collect();
    let [r, g, b] = channels.as_slice() else {
        return Err(format!(
            "expected three comma-separated channels, got '{value}'"
        ));
    };
    let channel = |s: &str| {
        s.parse::<u8>()
            .map_err(|_| format!("channel '{s}' is not an integer in 0-255"))
    };
    Ok(Rgb([channel(r)?, channel(g)?, channel(b)?]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    /// 640x480 black frame with a white 200x150 page at (100, 100).
    fn page_on_black() -> RgbImage {
        let mut img = RgbImage::from_pixel(640, 480, Rgb([0, 0, 0]));
        for y in 100..250 {
            for x in 100..300 {
                img.put_pixel(x, y, Rgb([255, 255, 255]));
            }
        }
        img
    }

    fn source(image: PathBuf) -> SourceArgs {
        SourceArgs {
            image,
            background: Rgb([0, 0, 0]),
            config: None,
        }
    }

    #[test]
    fn background_parses_three_channels() {
        assert_eq!(parse_background("0,128,255"), Ok(Rgb([0, 128, 255])));
        assert_eq!(parse_background(" 12 , 34 ,56 "), Ok(Rgb([12, 34, 56])));
        assert!(parse_background("1,2").is_err());
        assert!(parse_background("1,2,3,4").is_err());
        assert!(parse_background("1,2,300").is_err());
        assert!(parse_background("red").is_err());
    }

    #[test]
    fn detect_writes_json_report() {
        let dir = tempfile::tempdir().expect("tempdir");
        let image_path = dir.path().join("frame.png");
        page_on_black().save(&image_path).expect("save fixture");
        let out = dir.path().join("report.json");

        run_detect(&DetectArgs {
            source: source(image_path),
            out: Some(out.clone()),
        })
        .expect("detect");

        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).expect("read report"))
                .expect("valid json");
        assert_eq!(report["width"], 640);
        assert_eq!(report["height"], 480);
        assert_eq!(report["band"]["upper"], serde_json::json!([50, 50, 50]));
        let documents = report["documents"].as_array().expect("documents");
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0]["flat"].as_array().map(Vec::len), Some(8));
    }

    #[test]
    fn extract_writes_rectified_image() {
        let dir = tempfile::tempdir().expect("tempdir");
        let image_path = dir.path().join("frame.png");
        page_on_black().save(&image_path).expect("save fixture");
        let out = dir.path().join("page.png");

        run_extract(&ExtractArgs {
            source: source(image_path),
            out: out.clone(),
        })
        .expect("extract");

        let page = image::open(&out).expect("open page");
        assert_eq!((page.width(), page.height()), (199, 149));
    }

    #[test]
    fn config_file_is_applied() {
        let dir = tempfile::tempdir().expect("tempdir");
        let image_path = dir.path().join("frame.png");
        page_on_black().save(&image_path).expect("save fixture");
        // The page perimeter (696px) is below 40% of the frame's (896px).
        let config_path = dir.path().join("quadscan.json");
        std::fs::write(&config_path, r#"{ "length_ratio_min": 0.4 }"#).expect("write config");

        let mut args = DetectArgs {
            source: source(image_path),
            out: Some(dir.path().join("report.json")),
        };
        args.source.config = Some(config_path);
        assert!(matches!(
            run_detect(&args),
            Err(QuadScanError::NoDocumentsFound)
        ));
    }

    #[test]
    fn grayscale_files_are_converted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let image_path = dir.path().join("gray.png");
        DynamicImage::ImageRgb8(page_on_black())
            .to_luma8()
            .save(&image_path)
            .expect("save fixture");

        let image = load_image(&image_path).expect("load");
        assert!(matches!(image, DynamicImage::ImageRgb8(_)));
    }

    #[test]
    fn missing_image_is_an_image_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_image(&dir.path().join("absent.png")).expect_err("missing file");
        assert!(matches!(err, QuadScanError::ImageError(_)));
    }

    #[test]
    fn edges_report_lists_outline() {
        let dir = tempfile::tempdir().expect("tempdir");
        let image_path = dir.path().join("frame.png");
        page_on_black().save(&image_path).expect("save fixture");
        let out = dir.path().join("edges.json");

        run_edges(&EdgesArgs {
            image: image_path,
            max: 1,
            out: Some(out.clone()),
        })
        .expect("edges");

        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).expect("read report"))
                .expect("valid json");
        assert_eq!(report["documents"].as_array().map(Vec::len), Some(1));
    }
}
