// src/overlay.rs

use crate::region::RegionBoundaries;
use crate::types::{BallDetection, Region};
use anyhow::Result;
use opencv::{core, imgproc, prelude::*};

/// Draw the detection overlay: enclosing circle, centroid dot, and the region
/// caption (or the failure caption when the region came back undetermined).
pub fn draw_detection(frame: &mut Mat, detection: &BallDetection, region: Region) -> Result<()> {
    let center = core::Point::new(
        detection.circle_center.0 as i32,
        detection.circle_center.1 as i32,
    );

    // Enclosing circle in red
    imgproc::circle(
        frame,
        center,
        detection.radius as i32,
        core::Scalar::new(0.0, 0.0, 255.0, 0.0),
        2,
        imgproc::LINE_8,
        0,
    )?;

    // Centroid dot
    imgproc::circle(
        frame,
        core::Point::new(detection.centroid.0 as i32, detection.centroid.1 as i32),
        2,
        core::Scalar::new(0.0, 0.0, 0.0, 0.0),
        3,
        imgproc::LINE_8,
        0,
    )?;

    let caption = if region.is_determined() {
        format!("Current Region: {}", region)
    } else {
        "We were unable to locate the ball.".to_string()
    };
    draw_caption(frame, &caption)?;

    Ok(())
}

/// Draw the calibrated boundary lines across the frame, for step-mode review.
pub fn draw_boundaries(frame: &mut Mat, boundaries: &RegionBoundaries) -> Result<()> {
    let width = frame.cols();
    let color = core::Scalar::new(0.0, 0.0, 255.0, 0.0);

    for line in [&boundaries.negative, &boundaries.positive] {
        let p0 = core::Point::new(0, line.y_at(0.0) as i32);
        let p1 = core::Point::new(width, line.y_at(width as f64) as i32);
        imgproc::line(frame, p0, p1, color, 2, imgproc::LINE_8, 0)?;
    }

    Ok(())
}

fn draw_caption(frame: &mut Mat, text: &str) -> Result<()> {
    imgproc::put_text(
        frame,
        text,
        core::Point::new(100, 100),
        imgproc::FONT_HERSHEY_SIMPLEX,
        1.0,
        core::Scalar::new(0.0, 0.0, 0.0, 0.0),
        2,
        imgproc::LINE_8,
        false,
    )?;

    Ok(())
}
