use std::path::{Path, PathBuf};

use crate::{
    foundation::core::Fps,
    foundation::error::{IntroError, IntroResult},
};

/// One decoded video frame: straight-alpha sRGB RGBA8, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoFrame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub data: Vec<u8>,
}

/// Metadata known once a source has loaded.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct VideoInfo {
    /// Native width in pixels.
    pub width: u32,
    /// Native height in pixels.
    pub height: u32,
    /// Length in seconds.
    pub duration_secs: f64,
    /// Native frame rate.
    pub fps: Fps,
}

impl VideoInfo {
    /// Index of the frame shown at `time_secs`, clamped to the last frame.
    pub fn frame_index_at(&self, time_secs: f64) -> u64 {
        let last = self
            .fps
            .secs_to_frames_floor(self.duration_secs)
            .saturating_sub(1);
        self.fps.secs_to_frames_floor(time_secs.max(0.0)).min(last)
    }
}

/// A decodable video.
pub trait VideoSource: Send {
    /// Source metadata.
    fn info(&self) -> &VideoInfo;

    /// Decode the frame shown at `time_secs`.
    fn frame_at(&mut self, time_secs: f64) -> IntroResult<VideoFrame>;
}

/// Opens a [`VideoSource`] for a path. Runs off the session thread.
pub trait SourceLoader: Send + Sync {
    /// Open and probe `src`; the first frame must be decodable for this to succeed.
    fn open(&self, src: &Path) -> IntroResult<Box<dyn VideoSource>>;
}

/// A directory of still images played back at a fixed rate, in file-name order.
#[derive(Debug)]
pub struct FrameSequence {
    info: VideoInfo,
    frames: Vec<PathBuf>,
    cached: Option<(u64, VideoFrame)>,
}

impl FrameSequence {
    /// Scan `dir` for `png`/`jpg`/`jpeg` files.
    pub fn open(dir: &Path, fps: Fps) -> IntroResult<Self> {
        let mut frames = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_image = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| matches!(e.to_ascii_lowercase().as_str(), "png" | "jpg" | "jpeg"))
                .unwrap_or(false);
            if is_image {
                frames.push(path);
            }
        }
        frames.sort();
        let Some(first) = frames.first() else {
            return Err(IntroError::load(format!(
                "frame directory '{}' contains no images",
                dir.display()
            )));
        };

        let first = decode_image(first)?;
        let info = VideoInfo {
            width: first.width,
            height: first.height,
            duration_secs: fps.frames_to_secs(frames.len() as u64),
            fps,
        };
        Ok(Self {
            info,
            frames,
            cached: Some((0, first)),
        })
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false`: opening an empty directory fails.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl VideoSource for FrameSequence {
    fn info(&self) -> &VideoInfo {
        &self.info
    }

    fn frame_at(&mut self, time_secs: f64) -> IntroResult<VideoFrame> {
        let idx = self.info.frame_index_at(time_secs);
        if let Some((cached_idx, frame)) = &self.cached
            && *cached_idx == idx
        {
            return Ok(frame.clone());
        }
        let path = &self.frames[idx as usize];
        let frame = decode_image(path)?;
        self.cached = Some((idx, frame.clone()));
        Ok(frame)
    }
}

fn decode_image(path: &Path) -> IntroResult<VideoFrame> {
    let img = image::open(path)
        .map_err(|e| IntroError::load(format!("decode frame '{}': {e}", path.display())))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    Ok(VideoFrame {
        width,
        height,
        data: img.into_raw(),
    })
}

/// Loads [`FrameSequence`] directories.
#[derive(Clone, Copy, Debug)]
pub struct FrameSequenceLoader {
    /// Playback rate.
    pub fps: Fps,
}

impl SourceLoader for FrameSequenceLoader {
    fn open(&self, src: &Path) -> IntroResult<Box<dyn VideoSource>> {
        Ok(Box::new(FrameSequence::open(src, self.fps)?))
    }
}

/// Synthetic video: a moving gradient whose brightness ramps with time.
#[derive(Debug)]
pub struct TestPattern {
    info: VideoInfo,
}

impl TestPattern {
    /// Create a pattern with the given geometry and timing.
    pub fn new(width: u32, height: u32, duration_secs: f64, fps: Fps) -> IntroResult<Self> {
        if width == 0 || height == 0 {
            return Err(IntroError::validation("test pattern must be non-empty"));
        }
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(IntroError::validation(format!(
                "test pattern duration must be > 0, got {duration_secs}"
            )));
        }
        Ok(Self {
            info: VideoInfo {
                width,
                height,
                duration_secs,
                fps,
            },
        })
    }
}

impl VideoSource for TestPattern {
    fn info(&self) -> &VideoInfo {
        &self.info
    }

    fn frame_at(&mut self, time_secs: f64) -> IntroResult<VideoFrame> {
        let VideoInfo {
            width,
            height,
            duration_secs,
            ..
        } = self.info;
        let t = (time_secs / duration_secs).clamp(0.0, 1.0);
        let mut data = Vec::with_capacity((width as usize) * (height as usize) * 4);
        for y in 0..height {
            for x in 0..width {
                let fx = f64::from(x) / f64::from(width.max(2) - 1);
                let fy = f64::from(y) / f64::from(height.max(2) - 1);
                data.extend_from_slice(&[
                    (fx * 255.0) as u8,
                    (fy * 255.0) as u8,
                    (t * 255.0) as u8,
                    255,
                ]);
            }
        }
        Ok(VideoFrame {
            width,
            height,
            data,
        })
    }
}

/// Loads a [`TestPattern`] regardless of the requested path.
#[derive(Clone, Copy, Debug)]
pub struct TestPatternLoader {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Length in seconds.
    pub duration_secs: f64,
    /// Frame rate.
    pub fps: Fps,
}

impl SourceLoader for TestPatternLoader {
    fn open(&self, _src: &Path) -> IntroResult<Box<dyn VideoSource>> {
        Ok(Box::new(TestPattern::new(
            self.width,
            self.height,
            self.duration_secs,
            self.fps,
        )?))
    }
}

/// Directories load as frame sequences, files through `ffmpeg`.
#[derive(Clone, Copy, Debug)]
pub struct DefaultLoader {
    /// Rate used for frame-sequence directories.
    pub sequence_fps: Fps,
}

impl SourceLoader for DefaultLoader {
    fn open(&self, src: &Path) -> IntroResult<Box<dyn VideoSource>> {
        if src.is_dir() {
            return FrameSequenceLoader {
                fps: self.sequence_fps,
            }
            .open(src);
        }
        if !src.exists() {
            return Err(IntroError::load(format!(
                "video source '{}' does not exist",
                src.display()
            )));
        }
        crate::media::ffmpeg::FfmpegLoader.open(src)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/source.rs"]
mod tests;
