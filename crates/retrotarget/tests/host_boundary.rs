use approx::assert_relative_eq;
use image::{Rgba, RgbaImage};
use retrotarget::camera::CameraModel;
use retrotarget::detect::{self, process_frame};
use retrotarget::{
    DetectionContext, DetectorParams, DisplayMode, HsvBounds, TargetDetector, TargetsInfo,
    MAX_REPORTED_TARGETS,
};

const GREEN: Rgba<u8> = Rgba([40, 255, 60, 255]);
const BACKGROUND: Rgba<u8> = Rgba([20, 20, 30, 255]);
const GREEN_BOUNDS: [i32; 6] = [50, 70, 100, 255, 100, 255];

fn paint(img: &mut RgbaImage, x0: u32, y0: u32, w: u32, h: u32) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            img.put_pixel(x, y, GREEN);
        }
    }
}

/// Five target pairs stacked vertically, tops at 10, 90, ..., 330.
fn five_target_frame() -> RgbaImage {
    let mut img = RgbaImage::from_pixel(200, 400, BACKGROUND);
    for row in 0..5 {
        let y = 10 + 80 * row;
        paint(&mut img, 40, y, 20, 50);
        paint(&mut img, 90, y, 20, 50);
    }
    img
}

fn green_bounds() -> HsvBounds {
    HsvBounds::new((50, 70), (100, 255), (100, 255))
}

#[test]
fn five_targets_are_capped_to_first_three() {
    let _ = env_logger::builder().is_test(true).try_init();
    let img = five_target_frame();
    let mut ctx = DetectionContext::new();
    let (info, annotated) = process_frame(
        &TargetDetector::default(),
        &mut ctx,
        img.width() as i32,
        img.height() as i32,
        img.as_raw(),
        DisplayMode::Targets as i32,
        GREEN_BOUNDS,
    );

    assert_eq!(info.num_targets as usize, MAX_REPORTED_TARGETS);
    let ys: Vec<_> = info.reported().iter().map(|t| t.centroid_y).collect();
    assert_eq!(ys, vec![35.0, 115.0, 195.0]);
    for t in info.reported() {
        assert_relative_eq!(t.centroid_x, 75.0);
        assert_relative_eq!(t.width, 70.0);
        assert_relative_eq!(t.height, 50.0);
        assert_relative_eq!(t.left_to_right_ratio, 1.0);
    }
    let annotated = annotated.expect("annotated frame");
    assert_eq!(annotated.dimensions(), img.dimensions());
}

#[test]
fn unknown_mode_falls_back_to_raw() {
    let img = five_target_frame();
    let mut ctx = DetectionContext::new();
    let (info, annotated) = process_frame(
        &TargetDetector::default(),
        &mut ctx,
        img.width() as i32,
        img.height() as i32,
        img.as_raw(),
        42,
        GREEN_BOUNDS,
    );
    assert_eq!(info.num_targets, 3);
    // raw mode leaves the frame untouched
    assert_eq!(annotated.expect("annotated").as_raw(), img.as_raw());
}

#[test]
fn out_of_range_bounds_are_clamped() {
    let img = five_target_frame();
    let mut ctx = DetectionContext::new();
    let (info, _) = process_frame(
        &TargetDetector::default(),
        &mut ctx,
        img.width() as i32,
        img.height() as i32,
        img.as_raw(),
        0,
        [50, 70, 100, 1000, 100, 300],
    );
    assert_eq!(info.num_targets, 3);
}

#[test]
fn bad_buffer_yields_empty_info() {
    let img = five_target_frame();
    let mut ctx = DetectionContext::new();
    let short = &img.as_raw()[..img.as_raw().len() - 4];
    let (info, annotated) = process_frame(
        &TargetDetector::default(),
        &mut ctx,
        img.width() as i32,
        img.height() as i32,
        short,
        DisplayMode::Targets as i32,
        GREEN_BOUNDS,
    );
    assert_eq!(info, TargetsInfo::default());
    assert!(annotated.is_none());
}

#[test]
fn borrowed_buffer_matches_owned_image() {
    let img = five_target_frame();
    let params = DetectorParams::default();
    let owned = detect::detect_targets(&img, &green_bounds(), DisplayMode::Thresh, params.clone())
        .expect("owned");
    let borrowed = detect::detect_targets_from_rgba_u8(
        img.width(),
        img.height(),
        img.as_raw(),
        &green_bounds(),
        DisplayMode::Thresh,
        params,
    )
    .expect("borrowed");
    assert_eq!(owned.detection, borrowed.detection);
    assert_eq!(owned.annotated, borrowed.annotated);
    assert_eq!(owned.detection.targets.len(), 5);
}

#[test]
fn camera_infos_follow_reported_targets() {
    let img = five_target_frame();
    let out = detect::detect_targets_default(&img, &green_bounds()).expect("detect");
    let info = TargetsInfo::from_targets(&out.detection.targets);

    let cam = CameraModel {
        image_width: img.width(),
        image_height: img.height(),
        ..CameraModel::default()
    };
    let infos = cam.target_infos(&info);
    assert_eq!(infos.len(), 3);
    // target centered at x=75 sits left of the 99.5 center column
    assert_relative_eq!(infos[0].y, 24.5 / 697.0);
    assert_relative_eq!(infos[0].z, (35.0 - 199.5) / 697.0);
    assert_relative_eq!(infos[0].x, 6329.113924 / 70.0);
}

#[test]
fn annotated_frame_survives_png_round_trip() {
    let img = five_target_frame();
    let out = detect::detect_targets(
        &img,
        &green_bounds(),
        DisplayMode::TargetsPlus,
        DetectorParams::default(),
    )
    .expect("detect");
    let annotated = out.annotated.expect("annotated");

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("annotated.png");
    annotated.save(&path).expect("save");
    let reloaded = image::open(&path).expect("open").to_rgba8();
    assert_eq!(reloaded, annotated);
}
