// src/ball_detection.rs
//
// Per-frame ball localization by color segmentation: HSV in-range mask for
// the ball's green, morphological cleanup, then the largest contour whose
// enclosing circle is plausibly ball-sized.

use crate::types::{BallDetection, DetectionConfig};
use anyhow::Result;
use opencv::{
    core::{self, Mat, Point, Point2f, Scalar, Vector},
    imgproc,
};
use tracing::debug;

/// Locate the ball in one frame.
///
/// Returns `None` when no contour is found, the largest contour has no mass,
/// or its enclosing-circle radius falls outside the accepted range. All of
/// these are recoverable per-frame misses.
pub fn locate_ball(frame: &Mat, config: &DetectionConfig) -> Result<Option<BallDetection>> {
    let mask = color_mask(frame, config)?;

    let mut contours: Vector<Vector<Point>> = Vector::new();
    imgproc::find_contours(
        &mask,
        &mut contours,
        imgproc::RETR_TREE,
        imgproc::CHAIN_APPROX_SIMPLE,
        Point::new(0, 0),
    )?;

    if contours.is_empty() {
        return Ok(None);
    }

    let contour = largest_contour(&contours)?;

    let mut center = Point2f::default();
    let mut radius = 0.0f32;
    imgproc::min_enclosing_circle(&contour, &mut center, &mut radius)?;

    if !radius_accepted(radius, config) {
        debug!("largest contour rejected, radius {:.1}px", radius);
        return Ok(None);
    }

    let moments = imgproc::moments(&contour, false)?;
    if moments.m00 == 0.0 {
        return Ok(None);
    }

    Ok(Some(BallDetection {
        centroid: (moments.m10 / moments.m00, moments.m01 / moments.m00),
        circle_center: (center.x, center.y),
        radius,
    }))
}

/// Build the binary ball mask: blur, HSV conversion, in-range, then
/// erode/dilate passes to drop small blobs.
fn color_mask(frame: &Mat, config: &DetectionConfig) -> Result<Mat> {
    let mut blurred = Mat::default();
    imgproc::gaussian_blur(
        frame,
        &mut blurred,
        core::Size::new(3, 3),
        0.0,
        0.0,
        core::BORDER_DEFAULT,
    )?;

    let mut hsv = Mat::default();
    imgproc::cvt_color(&blurred, &mut hsv, imgproc::COLOR_BGR2HSV, 0)?;

    let lower = Scalar::new(
        config.hsv_lower[0],
        config.hsv_lower[1],
        config.hsv_lower[2],
        0.0,
    );
    let upper = Scalar::new(
        config.hsv_upper[0],
        config.hsv_upper[1],
        config.hsv_upper[2],
        0.0,
    );

    let mut mask = Mat::default();
    core::in_range(&hsv, &lower, &upper, &mut mask)?;

    // Default 3x3 kernel
    let kernel = Mat::default();
    let border_value = imgproc::morphology_default_border_value()?;

    let mut eroded = Mat::default();
    imgproc::erode(
        &mask,
        &mut eroded,
        &kernel,
        Point::new(-1, -1),
        config.morph_iterations,
        core::BORDER_CONSTANT,
        border_value,
    )?;

    let mut cleaned = Mat::default();
    imgproc::dilate(
        &eroded,
        &mut cleaned,
        &kernel,
        Point::new(-1, -1),
        config.morph_iterations,
        core::BORDER_CONSTANT,
        border_value,
    )?;

    Ok(cleaned)
}

fn largest_contour(contours: &Vector<Vector<Point>>) -> Result<Vector<Point>> {
    let mut largest = contours.get(0)?;
    let mut max_area = imgproc::contour_area(&largest, false)?;

    for i in 1..contours.len() {
        let contour = contours.get(i)?;
        let area = imgproc::contour_area(&contour, false)?;
        if area > max_area {
            max_area = area;
            largest = contour;
        }
    }

    Ok(largest)
}

/// Radius gate, both bounds strictly excluded.
fn radius_accepted(radius: f32, config: &DetectionConfig) -> bool {
    radius > config.min_radius && radius < config.max_radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Config;

    fn detection_config() -> DetectionConfig {
        Config::default().detection
    }

    #[test]
    fn test_radius_gate_is_strictly_exclusive() {
        let config = detection_config();
        assert!(!radius_accepted(50.0, &config));
        assert!(!radius_accepted(350.0, &config));
        assert!(radius_accepted(50.1, &config));
        assert!(radius_accepted(349.9, &config));
        assert!(radius_accepted(200.0, &config));
    }

    #[test]
    fn test_radius_gate_rejects_noise_and_walls() {
        let config = detection_config();
        // A few stray pixels
        assert!(!radius_accepted(3.0, &config));
        // A contour spanning most of the frame
        assert!(!radius_accepted(900.0, &config));
    }

    #[test]
    fn test_locate_ball_on_synthetic_frame() {
        // Green disc on black: should come back roughly centered with a
        // roughly matching radius
        let mut frame =
            Mat::new_rows_cols_with_default(480, 640, core::CV_8UC3, Scalar::all(0.0)).unwrap();
        imgproc::circle(
            &mut frame,
            Point::new(320, 240),
            80,
            // Tennis-ball green in BGR
            Scalar::new(60.0, 220.0, 150.0, 0.0),
            -1,
            imgproc::LINE_8,
            0,
        )
        .unwrap();

        let detection = locate_ball(&frame, &detection_config()).unwrap();

        let detection = detection.expect("disc should be detected");
        assert!((detection.centroid.0 - 320.0).abs() < 5.0);
        assert!((detection.centroid.1 - 240.0).abs() < 5.0);
        assert!((detection.radius - 80.0).abs() < 10.0);
    }

    #[test]
    fn test_locate_ball_misses_on_empty_frame() {
        let frame =
            Mat::new_rows_cols_with_default(480, 640, core::CV_8UC3, Scalar::all(0.0)).unwrap();
        let detection = locate_ball(&frame, &detection_config()).unwrap();
        assert!(detection.is_none());
    }

    #[test]
    fn test_locate_ball_rejects_small_blob() {
        let mut frame =
            Mat::new_rows_cols_with_default(480, 640, core::CV_8UC3, Scalar::all(0.0)).unwrap();
        // 20px disc: survives morphology but fails the radius gate
        imgproc::circle(
            &mut frame,
            Point::new(100, 100),
            20,
            Scalar::new(60.0, 220.0, 150.0, 0.0),
            -1,
            imgproc::LINE_8,
            0,
        )
        .unwrap();

        let detection = locate_ball(&frame, &detection_config()).unwrap();
        assert!(detection.is_none());
    }
}
