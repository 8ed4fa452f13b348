use std::path::{Path, PathBuf};

use crate::{
    foundation::error::{IntroError, IntroResult},
    render::backend::FrameRGBA,
};

/// Configuration provided to a [`FrameSink`] before the render loop starts.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkConfig {
    /// Drawing-buffer width at start, in pixels. Resizes may change later frames.
    pub width: u32,
    /// Drawing-buffer height at start, in pixels.
    pub height: u32,
    /// Effective pixel ratio.
    pub pixel_ratio: f64,
}

/// Consumer of rendered frames.
///
/// Ordering contract: `push_frame` is called with strictly increasing frame numbers.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> IntroResult<()>;
    /// Push one frame rendered at host time `time_secs`.
    fn push_frame(&mut self, idx: u64, time_secs: f64, frame: &FrameRGBA) -> IntroResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> IntroResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u64, f64, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Captured frames with their numbers and timestamps.
    pub fn frames(&self) -> &[(u64, f64, FrameRGBA)] {
        &self.frames
    }

    /// `true` once `end` was called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> IntroResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, time_secs: f64, frame: &FrameRGBA) -> IntroResult<()> {
        self.frames.push((idx, time_secs, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> IntroResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Writes every `every`-th frame as `frame_NNNNN.png` into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    every: u64,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    /// Sink writing into `dir` (created on `begin`), keeping one frame in `every`.
    pub fn new(dir: impl Into<PathBuf>, every: u64) -> IntroResult<Self> {
        if every == 0 {
            return Err(IntroError::validation("png sink stride must be >= 1"));
        }
        Ok(Self {
            dir: dir.into(),
            every,
            written: Vec::new(),
        })
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> IntroResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, _time_secs: f64, frame: &FrameRGBA) -> IntroResult<()> {
        if idx % self.every != 0 {
            return Ok(());
        }
        let path = self.dir.join(format!("frame_{idx:05}.png"));
        image::save_buffer_with_format(
            &path,
            &frame.data,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| IntroError::render(format!("write png '{}': {e}", path.display())))?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> IntroResult<()> {
        tracing::debug!(frames = self.written.len(), dir = %self.dir.display(), "png sequence done");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
