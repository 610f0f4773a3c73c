//! Camera or video-file frames with a small replay buffer

use crate::Result;
use anyhow::{Context, bail};
use opencv::{
    core::Mat,
    prelude::*,
    videoio::{self, VideoCapture, VideoCaptureTrait, VideoCaptureTraitConst},
};
use std::collections::VecDeque;
use std::path::PathBuf;

/// Where frames come from
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureSource {
    Camera(i32),
    File(PathBuf),
}

/// Frame source for the game loop.
///
/// Keeps the last `buffer_size` frames so a paused game keeps showing (and
/// sampling) the most recent one. Video files loop back to their first frame.
pub struct VideoFeed {
    capture: VideoCapture,
    source: CaptureSource,
    buffer: VecDeque<Mat>,
    buffer_size: usize,
    frame_count: i64,
    position: i64,
}

impl VideoFeed {
    pub fn open(source: CaptureSource, buffer_size: usize) -> Result<Self> {
        let capture = match &source {
            CaptureSource::Camera(index) => VideoCapture::new(*index, videoio::CAP_ANY)
                .with_context(|| format!("Failed to open camera {}", index))?,
            CaptureSource::File(path) => {
                let path_str = path.to_string_lossy();
                VideoCapture::from_file(&path_str, videoio::CAP_ANY)
                    .with_context(|| format!("Failed to open video file: {:?}", path))?
            }
        };

        if !capture.is_opened()? {
            bail!("Capture source {:?} could not be opened", source);
        }

        let frame_count = match source {
            CaptureSource::File(_) => VideoCaptureTraitConst::get(&capture, videoio::CAP_PROP_FRAME_COUNT)? as i64,
            CaptureSource::Camera(_) => 0,
        };

        log::info!("opened {:?} ({} frames)", source, frame_count);
        Ok(Self {
            capture,
            source,
            buffer: VecDeque::with_capacity(buffer_size.max(1)),
            buffer_size: buffer_size.max(1),
            frame_count,
            position: 0,
        })
    }

    pub fn source(&self) -> &CaptureSource {
        &self.source
    }

    /// Frame size as (width, height)
    pub fn dimensions(&self) -> Result<(i32, i32)> {
        let width = VideoCaptureTraitConst::get(&self.capture, videoio::CAP_PROP_FRAME_WIDTH)?;
        let height = VideoCaptureTraitConst::get(&self.capture, videoio::CAP_PROP_FRAME_HEIGHT)?;
        Ok((width as i32, height as i32))
    }

    /// Most recently acquired frame
    pub fn latest(&self) -> Option<&Mat> {
        self.buffer.back()
    }

    /// Next frame, or the latest buffered one while paused
    pub fn get_frame(&mut self, paused: bool) -> Result<Mat> {
        if paused {
            if let Some(frame) = self.latest() {
                return Ok(frame.clone());
            }
        }

        let frame = self.read_frame()?;
        self.buffer.push_back(frame.clone());
        while self.buffer.len() > self.buffer_size {
            self.buffer.pop_front();
        }
        Ok(frame)
    }

    fn read_frame(&mut self) -> Result<Mat> {
        let mut frame = Mat::default();
        let has_frame = self.capture.read(&mut frame).context("Failed to read frame")?;

        if !has_frame || frame.empty() {
            if matches!(self.source, CaptureSource::File(_)) && self.position > 0 {
                // some containers report a frame count past the real end
                self.rewind()?;
                return self.read_frame();
            }
            bail!("No frame available from {:?}", self.source);
        }

        self.position += 1;
        if self.frame_count > 0 && self.position >= self.frame_count {
            self.rewind()?;
        }
        Ok(frame)
    }

    fn rewind(&mut self) -> Result<()> {
        log::debug!("rewinding {:?}", self.source);
        self.position = 0;
        VideoCaptureTrait::set(&mut self.capture, videoio::CAP_PROP_POS_FRAMES, 0.0)
            .context("Failed to rewind video")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{CV_8UC3, Scalar, Size, Vec3b};
    use opencv::videoio::VideoWriter;
    use std::path::Path;

    // solid blue, green and red frames, one per index
    const CHANNEL_PER_FRAME: [usize; 3] = [0, 1, 2];

    fn write_clip(path: &Path) -> Result<()> {
        let fourcc = VideoWriter::fourcc('M', 'J', 'P', 'G')?;
        let mut writer = VideoWriter::new(&path.to_string_lossy(), fourcc, 10.0, Size::new(64, 48), true)?;
        for channel in CHANNEL_PER_FRAME {
            let mut color = [0.0; 3];
            color[channel] = 255.0;
            let frame = Mat::new_rows_cols_with_default(48, 64, CV_8UC3, Scalar::new(color[0], color[1], color[2], 0.0))?;
            writer.write(&frame)?;
        }
        writer.release()?;
        Ok(())
    }

    /// Index of the brightest channel at the frame centre
    fn dominant_channel(frame: &Mat) -> Result<usize> {
        let px = frame.at_2d::<Vec3b>(24, 32)?;
        let channel = (0..3).max_by_key(|&c| px[c]).unwrap_or(0);
        Ok(channel)
    }

    fn open_clip(name: &str, buffer_size: usize) -> Result<VideoFeed> {
        let path = std::env::temp_dir().join(name);
        write_clip(&path)?;
        VideoFeed::open(CaptureSource::File(path), buffer_size)
    }

    #[test]
    fn test_file_source_reports_frame_size() -> Result<()> {
        let feed = open_clip("float_along_feed_size.avi", 1)?;
        assert_eq!(feed.dimensions()?, (64, 48));
        assert!(matches!(feed.source(), CaptureSource::File(_)));
        assert!(feed.latest().is_none());
        Ok(())
    }

    #[test]
    fn test_paused_feed_repeats_latest_frame() -> Result<()> {
        let mut feed = open_clip("float_along_feed_pause.avi", 1)?;
        let first = feed.get_frame(false)?;
        assert_eq!(dominant_channel(&first)?, 0);

        for _ in 0..3 {
            let paused = feed.get_frame(true)?;
            assert_eq!(dominant_channel(&paused)?, 0);
        }

        let next = feed.get_frame(false)?;
        assert_eq!(dominant_channel(&next)?, 1);
        Ok(())
    }

    #[test]
    fn test_buffer_is_capped() -> Result<()> {
        let mut feed = open_clip("float_along_feed_buffer.avi", 2)?;
        for _ in 0..3 {
            feed.get_frame(false)?;
        }
        assert_eq!(feed.buffer.len(), 2);
        assert_eq!(dominant_channel(feed.latest().unwrap())?, 2);
        Ok(())
    }

    #[test]
    fn test_file_loops_after_last_frame() -> Result<()> {
        let mut feed = open_clip("float_along_feed_loop.avi", 1)?;
        let mut seen = Vec::new();
        for _ in 0..7 {
            seen.push(dominant_channel(&feed.get_frame(false)?)?);
        }
        assert_eq!(seen, vec![0, 1, 2, 0, 1, 2, 0]);
        Ok(())
    }
}
