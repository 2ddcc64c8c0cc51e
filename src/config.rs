// src/config.rs

use crate::types::{CalibrationConfig, Config, DetectionConfig, VideoConfig};
use anyhow::Result;
use std::fs;
use std::path::Path;

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            detection: DetectionConfig {
                // HSV bounds for tennis-ball green
                hsv_lower: [29.0, 86.0, 6.0],
                hsv_upper: [64.0, 255.0, 255.0],
                min_radius: 50.0,
                max_radius: 350.0,
                morph_iterations: 2,
            },
            calibration: CalibrationConfig {
                // Court boundary lines are near-white, so a high global
                // threshold isolates them before edge detection
                brightness_threshold: 200.0,
                canny_low: 50.0,
                canny_high: 150.0,
                hough_threshold: 15,
                hough_min_line_length: 50.0,
                hough_max_line_gap: 120.0,
            },
            video: VideoConfig {
                output_fps: 20.0,
                fourcc: "mp4v".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_radius_gate() {
        let config = Config::default();
        assert_eq!(config.detection.min_radius, 50.0);
        assert_eq!(config.detection.max_radius, 350.0);
    }

    #[test]
    fn test_default_fourcc_is_four_chars() {
        let config = Config::default();
        assert_eq!(config.video.fourcc.len(), 4);
        assert_eq!(config.video.output_fps, 20.0);
    }

    #[test]
    fn test_roundtrip_through_yaml() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.detection.hsv_lower, config.detection.hsv_lower);
        assert_eq!(parsed.calibration.hough_threshold, 15);
    }
}
