// src/main.rs

mod ball_detection;
mod calibration;
mod config;
mod overlay;
mod region;
mod types;
mod video;

use anyhow::{Context, Result};
use clap::Parser;
use opencv::{highgui, prelude::*};
use region::RegionBoundaries;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use types::{Config, Region};
use video::VideoReader;

#[derive(Debug, Parser)]
#[command(name = "tennis-ball-tracker")]
#[command(about = "Track a tennis ball across four court regions in a recorded video")]
struct Args {
    /// Input video containing the rolling tennis ball
    #[arg(long, value_name = "PATH")]
    input_video: PathBuf,
    /// Step through the video frame by frame, waiting for a key press
    #[arg(short, long)]
    step: bool,
    /// Optional YAML config overriding the built-in detection parameters
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Output video path (default: <input stem>_tracked.avi)
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("tennis_ball_tracker=info")
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    run(&args, &config)
}

fn run(args: &Args, config: &Config) -> Result<()> {
    let mut reader = VideoReader::open(&args.input_video)?;

    let first_frame = reader
        .next()
        .transpose()?
        .context("video contains no frames")?;

    let boundaries = calibration::derive(&first_frame, &config.calibration)
        .context("boundary calibration failed on the first frame")?;

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input_video));
    let mut writer = video::open_writer(
        &output_path,
        &config.video.fourcc,
        config.video.output_fps,
        reader.width,
        reader.height,
    )?;

    let mut frame_index = 0usize;
    let mut hits = 0usize;
    let mut misses = 0usize;

    // The calibration frame is also the first frame of the output
    let mut pending = Some(first_frame);
    loop {
        let frame = match pending.take() {
            Some(frame) => frame,
            None => match reader.next().transpose()? {
                Some(frame) => frame,
                None => break,
            },
        };
        frame_index += 1;

        let (annotated, found) = process_frame(frame, config, &boundaries, frame_index, args.step)?;
        if found {
            hits += 1;
        } else {
            misses += 1;
        }

        writer.write(&annotated)?;
    }

    writer.release()?;
    if args.step {
        highgui::destroy_all_windows()?;
    }

    info!(
        "Done: {} frames processed, ball found in {}, missed in {}",
        frame_index, hits, misses
    );
    info!("Annotated video written to {}", output_path.display());

    Ok(())
}

/// Detect, classify, and annotate one frame. Returns the annotated frame and
/// whether the ball was located in it.
fn process_frame(
    mut frame: Mat,
    config: &Config,
    boundaries: &RegionBoundaries,
    frame_index: usize,
    step: bool,
) -> Result<(Mat, bool)> {
    let detection = ball_detection::locate_ball(&frame, &config.detection)?;

    let found = match detection {
        Some(detection) => {
            let (x, y) = detection.centroid;
            let region = boundaries.classify(x, y);
            match region {
                Region::Undetermined => {
                    // Unreachable for finite centroids; reaching it means the
                    // calibrated lines are degenerate
                    warn!(
                        "frame {}: centroid ({:.1}, {:.1}) could not be assigned a region",
                        frame_index, x, y
                    );
                }
                region => {
                    info!("frame {}: ball located in region {}", frame_index, region);
                }
            }
            overlay::draw_detection(&mut frame, &detection, region)?;
            true
        }
        None => {
            info!("frame {}: no tennis ball found", frame_index);
            false
        }
    };

    if step {
        overlay::draw_boundaries(&mut frame, boundaries)?;
        highgui::imshow("tennis-ball-tracker", &frame)?;
        highgui::wait_key(0)?;
    }

    Ok((frame, found))
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{}_tracked.avi", stem))
}
