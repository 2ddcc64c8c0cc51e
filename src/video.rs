// src/video.rs

use anyhow::{bail, Result};
use opencv::{
    core::{Mat, Size},
    prelude::*,
    videoio::{self, VideoCapture, VideoWriter},
};
use std::path::Path;
use tracing::info;

/// A finite, non-restartable pull sequence of decoded frames.
///
/// End-of-stream is a normal termination signal: `next` returns `None` once
/// the container is exhausted and the capture is released at that point (and
/// again on drop, which is a no-op the second time).
pub struct VideoReader {
    cap: VideoCapture,
    pub width: i32,
    pub height: i32,
    pub fps: f64,
    finished: bool,
}

impl VideoReader {
    pub fn open(path: &Path) -> Result<Self> {
        info!("Opening video: {}", path.display());

        let path_str = path
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("input path is not valid UTF-8: {:?}", path))?;
        let cap = VideoCapture::from_file(path_str, videoio::CAP_ANY)?;

        if !cap.is_opened()? {
            bail!("failed to open video file: {}", path.display());
        }

        let fps = cap.get(videoio::CAP_PROP_FPS)?;
        let width = cap.get(videoio::CAP_PROP_FRAME_WIDTH)? as i32;
        let height = cap.get(videoio::CAP_PROP_FRAME_HEIGHT)? as i32;
        let total_frames = cap.get(videoio::CAP_PROP_FRAME_COUNT)? as i64;

        info!(
            "Video properties: {}x{} @ {:.1} FPS, {} frames",
            width, height, fps, total_frames
        );

        Ok(Self {
            cap,
            width,
            height,
            fps,
            finished: false,
        })
    }

    fn read_frame(&mut self) -> Result<Option<Mat>> {
        if self.finished {
            return Ok(None);
        }

        let mut mat = Mat::default();
        if !self.cap.read(&mut mat)? || mat.empty() {
            self.finished = true;
            self.cap.release()?;
            return Ok(None);
        }

        Ok(Some(mat))
    }
}

impl Iterator for VideoReader {
    type Item = Result<Mat>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_frame().transpose()
    }
}

/// Create the annotated-output writer with the given codec tag and fixed fps,
/// matching the input frame size.
pub fn open_writer(path: &Path, fourcc: &str, fps: f64, width: i32, height: i32) -> Result<VideoWriter> {
    let tag: Vec<char> = fourcc.chars().collect();
    if tag.len() != 4 {
        bail!("codec tag must be exactly four characters, got {:?}", fourcc);
    }

    let path_str = path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("output path is not valid UTF-8: {:?}", path))?;

    info!("Output video: {}", path.display());

    let fourcc = VideoWriter::fourcc(tag[0], tag[1], tag[2], tag[3])?;
    let writer = VideoWriter::new(path_str, fourcc, fps, Size::new(width, height), true)?;

    if !writer.is_opened()? {
        bail!("failed to open video writer: {}", path.display());
    }

    Ok(writer)
}
