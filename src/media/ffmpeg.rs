use std::path::Path;
#[cfg(feature = "media-ffmpeg")]
use std::path::PathBuf;

#[cfg(feature = "media-ffmpeg")]
use crate::foundation::core::Fps;
#[cfg(feature = "media-ffmpeg")]
use crate::media::source::{VideoFrame, VideoInfo};
use crate::{
    foundation::error::{IntroError, IntroResult},
    media::source::{SourceLoader, VideoSource},
};

/// Opens video files through the `ffprobe`/`ffmpeg` command-line tools.
#[derive(Clone, Copy, Debug, Default)]
pub struct FfmpegLoader;

#[cfg(feature = "media-ffmpeg")]
impl SourceLoader for FfmpegLoader {
    fn open(&self, src: &Path) -> IntroResult<Box<dyn VideoSource>> {
        let info = probe(src)?;
        let mut source = FfmpegSource {
            path: src.to_path_buf(),
            info,
            cached: None,
        };
        // Fail the load, not the first rendered frame, when the stream is undecodable.
        source.frame_at(0.0)?;
        Ok(Box::new(source))
    }
}

#[cfg(not(feature = "media-ffmpeg"))]
impl SourceLoader for FfmpegLoader {
    fn open(&self, src: &Path) -> IntroResult<Box<dyn VideoSource>> {
        Err(IntroError::load(format!(
            "'{}': video files require the 'media-ffmpeg' feature",
            src.display()
        )))
    }
}

/// A video file decoded one frame at a time by seeking with `ffmpeg`.
#[cfg(feature = "media-ffmpeg")]
#[derive(Debug)]
pub struct FfmpegSource {
    path: PathBuf,
    info: VideoInfo,
    cached: Option<(u64, VideoFrame)>,
}

#[cfg(feature = "media-ffmpeg")]
impl VideoSource for FfmpegSource {
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

        let seek = self.info.fps.frames_to_secs(idx);
        let out = std::process::Command::new("ffmpeg")
            .args(["-v", "error", "-ss", &format!("{seek:.9}")])
            .arg("-i")
            .arg(&self.path)
            .args([
                "-frames:v",
                "1",
                "-f",
                "rawvideo",
                "-pix_fmt",
                "rgba",
                "pipe:1",
            ])
            .output()
            .map_err(|e| IntroError::load(format!("failed to run ffmpeg: {e}")))?;
        if !out.status.success() {
            return Err(IntroError::load(format!(
                "ffmpeg decode failed for '{}': {}",
                self.path.display(),
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }

        let expected = self.info.width as usize * self.info.height as usize * 4;
        if out.stdout.len() < expected {
            return Err(IntroError::load(format!(
                "ffmpeg returned {} bytes for '{}', expected {expected}",
                out.stdout.len(),
                self.path.display()
            )));
        }
        let mut data = out.stdout;
        data.truncate(expected);
        let frame = VideoFrame {
            width: self.info.width,
            height: self.info.height,
            data,
        };
        self.cached = Some((idx, frame.clone()));
        Ok(frame)
    }
}

#[cfg(feature = "media-ffmpeg")]
#[derive(serde::Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    avg_frame_rate: Option<String>,
    duration: Option<String>,
}

#[cfg(feature = "media-ffmpeg")]
#[derive(serde::Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

#[cfg(feature = "media-ffmpeg")]
#[derive(serde::Deserialize)]
struct ProbeOut {
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

#[cfg(feature = "media-ffmpeg")]
fn probe(path: &Path) -> IntroResult<VideoInfo> {
    let out = std::process::Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
        ])
        .arg(path)
        .output()
        .map_err(|e| IntroError::load(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(IntroError::load(format!(
            "ffprobe failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }
    video_info_from_json(&out.stdout)
}

/// Map `ffprobe -print_format json -show_streams -show_format` output to [`VideoInfo`].
///
/// Uses the first video stream; the stream duration wins over the container duration.
#[cfg(feature = "media-ffmpeg")]
fn video_info_from_json(json: &[u8]) -> IntroResult<VideoInfo> {
    let parsed: ProbeOut = serde_json::from_slice(json)
        .map_err(|e| IntroError::load(format!("ffprobe json parse failed: {e}")))?;
    let stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| IntroError::load("no video stream found"))?;
    let (Some(width), Some(height)) = (stream.width, stream.height) else {
        return Err(IntroError::load("missing video dimensions from ffprobe"));
    };
    if width == 0 || height == 0 {
        return Err(IntroError::load(format!(
            "ffprobe reported empty video {width}x{height}"
        )));
    }
    let fps = stream
        .avg_frame_rate
        .as_deref()
        .and_then(parse_rate)
        .ok_or_else(|| IntroError::load("missing video frame rate from ffprobe"))?;
    let duration_secs = stream
        .duration
        .as_deref()
        .or(parsed.format.as_ref().and_then(|f| f.duration.as_deref()))
        .and_then(|d| d.parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d > 0.0)
        .ok_or_else(|| IntroError::load("missing video duration from ffprobe"))?;

    Ok(VideoInfo {
        width,
        height,
        duration_secs,
        fps,
    })
}

/// Parse ffprobe's `"num/den"` rate notation.
#[cfg(feature = "media-ffmpeg")]
fn parse_rate(s: &str) -> Option<Fps> {
    let (num, den) = s.split_once('/')?;
    Fps::new(num.trim().parse().ok()?, den.trim().parse().ok()?).ok()
}

#[cfg(all(test, feature = "media-ffmpeg"))]
#[path = "../../tests/unit/media/ffmpeg.rs"]
mod tests;
