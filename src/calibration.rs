// src/calibration.rs
//
// One-time boundary derivation from a reference frame. The court boundary
// lines are bright and span the frame, so a high brightness threshold plus
// Canny + probabilistic Hough finds segments along them; the bounding box of
// all segment endpoints then gives the two diagonals that partition the frame.

use crate::region::{BoundaryLine, RegionBoundaries};
use crate::types::CalibrationConfig;
use anyhow::{bail, Result};
use opencv::{
    core::{self, Mat, Vector},
    imgproc,
};
use tracing::{debug, info};

/// A detected line segment as endpoint pairs `(x0, y0, x1, y1)`.
pub type Segment = (i32, i32, i32, i32);

/// Derive the two region boundary lines from a reference frame.
///
/// Fails when the frame yields no usable segments; that is a fatal
/// configuration error for the run, not a per-frame miss. Pure with respect to
/// the frame contents, so calling it again on the same frame returns the same
/// boundaries.
pub fn derive(frame: &Mat, config: &CalibrationConfig) -> Result<RegionBoundaries> {
    let segments = detect_segments(frame, config)?;
    debug!("Hough returned {} line segments", segments.len());
    let boundaries = boundaries_from_segments(&segments)?;

    info!(
        "Negative boundary line: y = {:.4}x + {:.4}",
        boundaries.negative.slope, boundaries.negative.intercept
    );
    info!(
        "Positive boundary line: y = {:.4}x + {:.4}",
        boundaries.positive.slope, boundaries.positive.intercept
    );

    Ok(boundaries)
}

/// Threshold, edge-detect, and run the probabilistic Hough transform.
fn detect_segments(frame: &Mat, config: &CalibrationConfig) -> Result<Vec<Segment>> {
    let mut blurred = Mat::default();
    imgproc::gaussian_blur(
        frame,
        &mut blurred,
        core::Size::new(3, 3),
        0.0,
        0.0,
        core::BORDER_DEFAULT,
    )?;

    let mut gray = Mat::default();
    imgproc::cvt_color(&blurred, &mut gray, imgproc::COLOR_BGR2GRAY, 0)?;

    // Keep only the bright boundary lines; everything below the threshold
    // goes to zero
    let mut masked = Mat::default();
    imgproc::threshold(
        &gray,
        &mut masked,
        config.brightness_threshold,
        255.0,
        imgproc::THRESH_TOZERO,
    )?;

    let mut edges = Mat::default();
    imgproc::canny(&masked, &mut edges, config.canny_low, config.canny_high, 3, false)?;

    let mut lines: Vector<core::Vec4i> = Vector::new();
    imgproc::hough_lines_p(
        &edges,
        &mut lines,
        1.0,
        std::f64::consts::PI / 180.0,
        config.hough_threshold,
        config.hough_min_line_length,
        config.hough_max_line_gap,
    )?;

    Ok(lines
        .iter()
        .map(|l| (l[0], l[1], l[2], l[3]))
        .collect())
}

/// Fold segment endpoints into the two bounding-box diagonals.
///
/// The boundary lines run corner to corner, so the extreme endpoints over all
/// detected segments span them: the negative diagonal goes (minX,minY) to
/// (maxX,maxY), the positive one (minX,maxY) to (maxX,minY).
pub fn boundaries_from_segments(segments: &[Segment]) -> Result<RegionBoundaries> {
    if segments.is_empty() {
        bail!("no line segments detected in the calibration frame");
    }

    let min_x = segments.iter().map(|s| s.0).min().unwrap_or(0);
    let min_y = segments.iter().map(|s| s.1).min().unwrap_or(0);
    let max_x = segments.iter().map(|s| s.2).max().unwrap_or(0);
    let max_y = segments.iter().map(|s| s.3).max().unwrap_or(0);

    if max_x == min_x {
        bail!("detected segments are degenerate (zero horizontal extent)");
    }

    let (min_x, min_y, max_x, max_y) = (min_x as f64, min_y as f64, max_x as f64, max_y as f64);

    Ok(RegionBoundaries {
        negative: BoundaryLine::through((min_x, min_y), (max_x, max_y)),
        positive: BoundaryLine::through((min_x, max_y), (max_x, min_y)),
    })
}
