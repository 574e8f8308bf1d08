use std::{env, fs, path::PathBuf};

use image::{ImageReader, Rgba, RgbaImage};
use retrotarget::camera::{CameraModel, CameraTargetInfo};
use retrotarget::detector::Detection;
use retrotarget::{
    detect, DetectionContext, DetectorParams, DisplayMode, HsvBounds, TargetDetector, TargetsInfo,
};
use serde::{Deserialize, Serialize};

#[cfg(not(feature = "tracing"))]
use log::{info, warn, LevelFilter};

#[cfg(feature = "tracing")]
use tracing::{info, warn};

#[cfg(feature = "tracing")]
use retrotarget::core::init_tracing;
#[cfg(not(feature = "tracing"))]
use retrotarget::core::init_from_env;

#[derive(Debug, Deserialize)]
struct ExampleConfig {
    /// Frame to process; a synthetic two-target frame is used when absent.
    #[serde(default)]
    image_path: Option<String>,
    #[serde(default)]
    output_path: Option<String>,
    #[serde(default)]
    annotated_path: Option<String>,
    #[serde(default)]
    mode: DisplayMode,
    bounds: HsvBounds,
    #[serde(default)]
    detector: DetectorParams,
    #[serde(default)]
    camera: CameraModel,
}

#[derive(Debug, Serialize)]
struct ExampleReport {
    image_path: Option<String>,
    config_path: String,
    width: u32,
    height: u32,
    info: TargetsInfo,
    camera_targets: Vec<CameraTargetInfo>,
    detection: Detection,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(not(feature = "tracing"))]
    {
        let level = init_from_env(LevelFilter::Info)?;
        info!("Logger initialized at {level}");
    }

    #[cfg(feature = "tracing")]
    init_tracing(false);

    run()
}

#[cfg_attr(feature = "tracing", tracing::instrument(level = "info"))]
fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = parse_config_path();
    let cfg = load_config(&config_path)?;

    let img = match cfg.image_path.as_deref() {
        Some(path) => load_image(&PathBuf::from(path))?,
        None => {
            info!("no image_path, using a synthetic frame");
            synthetic_frame(cfg.camera.image_width, cfg.camera.image_height)
        }
    };

    let detector = TargetDetector::new(cfg.detector.clone());
    let mut ctx = DetectionContext::new();
    let out = detector
        .detect(&mut ctx, &detect::rgba_view(&img), &cfg.bounds, cfg.mode)
        .map_err(detect::DetectError::from)?;

    let info = TargetsInfo::from_targets(&out.detection.targets);
    if info.num_targets == 0 {
        warn!("no targets found");
    }
    let camera_targets = cfg.camera.target_infos(&info);
    for t in &camera_targets {
        info!("{}", serde_json::to_string(t)?);
    }

    if let (Some(path), Some(annotated)) = (cfg.annotated_path.as_deref(), &out.annotated) {
        write_annotated(path, annotated)?;
    }

    let report = ExampleReport {
        image_path: cfg.image_path.clone(),
        config_path: config_path.to_string_lossy().into_owned(),
        width: img.width(),
        height: img.height(),
        info,
        camera_targets,
        detection: out.detection,
    };

    write_report(cfg.output_path.as_deref(), report)
}

fn parse_config_path() -> PathBuf {
    env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("testdata/detect_targets_config.json"))
}

#[cfg_attr(feature = "tracing", tracing::instrument(level = "info", skip(path)))]
fn load_config(path: &PathBuf) -> Result<ExampleConfig, Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "info", skip(image_path))
)]
fn load_image(image_path: &PathBuf) -> Result<RgbaImage, Box<dyn std::error::Error>> {
    Ok(ImageReader::open(image_path)?.decode()?.to_rgba8())
}

/// Dark frame with two side-by-side green tape strips.
fn synthetic_frame(width: u32, height: u32) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(width, height, Rgba([20, 20, 30, 255]));
    let (cx, cy) = (width / 2, height / 2);
    let top = cy.saturating_sub(40);
    let strips = [(cx.saturating_sub(60), top), (cx + 30, top)];
    for (x0, y0) in strips {
        for y in y0..(y0 + 80).min(height) {
            for x in x0..(x0 + 30).min(width) {
                img.put_pixel(x, y, Rgba([40, 255, 60, 255]));
            }
        }
    }
    img
}

fn write_annotated(path: &str, img: &RgbaImage) -> Result<(), Box<dyn std::error::Error>> {
    let out_path = PathBuf::from(path);
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)?;
    }
    img.save(&out_path)?;
    println!("wrote annotated frame to {}", out_path.display());
    Ok(())
}

fn write_report(
    path: Option<&str>,
    report: ExampleReport,
) -> Result<(), Box<dyn std::error::Error>> {
    let out_path = path
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tmpdata/detect_targets_report.json"));
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&report)?;
    fs::write(&out_path, json)?;
    println!("wrote report JSON to {}", out_path.display());
    Ok(())
}
