// src/types.rs

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub detection: DetectionConfig,
    pub calibration: CalibrationConfig,
    pub video: VideoConfig,
}

/// Ball segmentation parameters (HSV color bounds and the accepted ball size).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Lower HSV bound for the ball color (hue, saturation, value)
    pub hsv_lower: [f64; 3],
    /// Upper HSV bound for the ball color
    pub hsv_upper: [f64; 3],
    /// Minimum enclosing-circle radius in pixels, exclusive
    pub min_radius: f32,
    /// Maximum enclosing-circle radius in pixels, exclusive
    pub max_radius: f32,
    /// Erode/dilate passes applied to the color mask
    pub morph_iterations: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// Grayscale intensities below this are zeroed before edge detection
    pub brightness_threshold: f64,
    pub canny_low: f64,
    pub canny_high: f64,
    pub hough_threshold: i32,
    pub hough_min_line_length: f64,
    pub hough_max_line_gap: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    pub output_fps: f64,
    /// Four-character codec tag for the output container
    pub fourcc: String,
}

/// One ball candidate found in a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallDetection {
    /// Contour centroid from image moments
    pub centroid: (f64, f64),
    /// Minimum enclosing circle around the contour
    pub circle_center: (f32, f32),
    pub radius: f32,
}

/// Which of the four court regions a point falls in.
///
/// `Undetermined` is a defensive fallback only; the four region branches are
/// exhaustive for finite coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    One,
    Two,
    Three,
    Four,
    Undetermined,
}

impl Region {
    pub fn is_determined(&self) -> bool {
        !matches!(self, Region::Undetermined)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::One => write!(f, "1"),
            Region::Two => write!(f, "2"),
            Region::Three => write!(f, "3"),
            Region::Four => write!(f, "4"),
            Region::Undetermined => write!(f, "undetermined"),
        }
    }
}
