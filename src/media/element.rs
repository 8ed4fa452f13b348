use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::channel::oneshot;
use futures::future::{self, Either};

use crate::{
    foundation::error::{IntroError, IntroResult},
    media::source::{SourceLoader, VideoFrame, VideoInfo, VideoSource},
    platform::host::AutoplayPolicy,
};

/// How much of the resource is available, in increasing order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReadyState {
    /// Nothing known.
    HaveNothing,
    /// Duration and dimensions known.
    HaveMetadata,
    /// The frame at the current position is decoded.
    HaveCurrentData,
    /// Enough data to advance a little.
    HaveFutureData,
    /// Enough data to play through.
    HaveEnoughData,
}

/// Playback lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    /// No resource loaded yet (or loading failed).
    NotLoaded,
    /// First frame decoded, not playing.
    Loaded,
    /// Advancing with time.
    Playing,
    /// Reached the end of a non-looping resource.
    Ended,
}

/// Element attributes set before loading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MediaAttributes {
    /// No audio output.
    pub muted: bool,
    /// Play in place rather than fullscreen.
    pub plays_inline: bool,
    /// Start as soon as playable.
    pub autoplay: bool,
    /// Restart from zero at the end instead of ending.
    pub looping: bool,
    /// Not attached to the page; only its frames are used.
    pub offscreen: bool,
}

impl MediaAttributes {
    /// Muted, inline, autoplaying, non-looping, off-screen.
    pub fn intro() -> Self {
        Self {
            muted: true,
            plays_inline: true,
            autoplay: true,
            looping: false,
            offscreen: true,
        }
    }
}

/// Observable element events, queued in the order they occur.
#[derive(Clone, Debug, PartialEq)]
pub enum MediaEvent {
    /// First frame available.
    LoadedData,
    /// Playback started.
    Playing,
    /// Playback reached the end.
    Ended,
    /// Loading failed.
    Error(String),
}

struct PendingLoad {
    loaded: oneshot::Receiver<Box<dyn VideoSource>>,
    error: oneshot::Receiver<IntroError>,
}

/// One video resource with its playback position and most recently decoded frame.
pub struct MediaElement {
    src: PathBuf,
    /// Element attributes.
    pub attributes: MediaAttributes,
    state: PlaybackState,
    ready: ReadyState,
    current_time: f64,
    source: Option<Box<dyn VideoSource>>,
    info: Option<VideoInfo>,
    frame: Option<VideoFrame>,
    pending: Option<PendingLoad>,
    events: VecDeque<MediaEvent>,
}

impl std::fmt::Debug for MediaElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaElement")
            .field("src", &self.src)
            .field("attributes", &self.attributes)
            .field("state", &self.state)
            .field("ready", &self.ready)
            .field("current_time", &self.current_time)
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

impl MediaElement {
    /// Element for `src` with the given attributes. Nothing is loaded yet.
    pub fn new(src: impl Into<PathBuf>, attributes: MediaAttributes) -> Self {
        Self {
            src: src.into(),
            attributes,
            state: PlaybackState::NotLoaded,
            ready: ReadyState::HaveNothing,
            current_time: 0.0,
            source: None,
            info: None,
            frame: None,
            pending: None,
            events: VecDeque::new(),
        }
    }

    /// Source path.
    pub fn src(&self) -> &Path {
        &self.src
    }

    /// Playback state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Ready state.
    pub fn ready_state(&self) -> ReadyState {
        self.ready
    }

    /// Playback position in seconds.
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Length in seconds, once loaded.
    pub fn duration(&self) -> Option<f64> {
        self.info.as_ref().map(|i| i.duration_secs)
    }

    /// Source metadata, once loaded.
    pub fn info(&self) -> Option<&VideoInfo> {
        self.info.as_ref()
    }

    /// `true` when the frame at the current position is decoded.
    pub fn has_current_data(&self) -> bool {
        self.ready >= ReadyState::HaveCurrentData && self.frame.is_some()
    }

    /// Frame at the current position.
    pub fn current_frame(&self) -> Option<&VideoFrame> {
        self.frame.as_ref()
    }

    /// Drain queued events.
    pub fn poll_events(&mut self) -> Vec<MediaEvent> {
        self.events.drain(..).collect()
    }

    /// Start loading on a helper thread. Await [`Self::loaded_data`] for the outcome.
    #[tracing::instrument(skip(self, loader), fields(src = %self.src.display()))]
    pub fn load(&mut self, loader: Arc<dyn SourceLoader>) -> IntroResult<()> {
        if self.pending.is_some() || self.state != PlaybackState::NotLoaded {
            return Err(IntroError::load("media element is already loading or loaded"));
        }
        if self.src.as_os_str().is_empty() {
            return Err(IntroError::load("media element has no source"));
        }

        let (loaded_tx, loaded) = oneshot::channel();
        let (error_tx, error) = oneshot::channel();
        let src = self.src.clone();
        std::thread::Builder::new()
            .name("vidintro-loader".to_owned())
            .spawn(move || match loader.open(&src) {
                Ok(source) => {
                    let _ = loaded_tx.send(source);
                }
                Err(e) => {
                    let _ = error_tx.send(e);
                }
            })?;

        self.pending = Some(PendingLoad { loaded, error });
        tracing::debug!("load started");
        Ok(())
    }

    /// Resolve once the first frame is available, or fail with [`IntroError::Load`].
    pub async fn loaded_data(&mut self) -> IntroResult<&VideoInfo> {
        let pending = self
            .pending
            .take()
            .ok_or_else(|| IntroError::load("no load in progress"))?;

        let outcome = match future::select(pending.loaded, pending.error).await {
            Either::Left((Ok(source), _)) => Ok(source),
            Either::Right((Ok(err), _)) => Err(err),
            // One side was dropped unsent; the other carries the outcome.
            Either::Left((Err(oneshot::Canceled), error)) => Err(error
                .await
                .unwrap_or_else(|_| IntroError::load("loader exited without reporting"))),
            Either::Right((Err(oneshot::Canceled), loaded)) => loaded
                .await
                .map_err(|_| IntroError::load("loader exited without reporting")),
        };

        let mut source = match outcome {
            Ok(source) => source,
            Err(err) => return Err(self.fail(err)),
        };
        if let Err(err) = check_info(source.info()) {
            return Err(self.fail(err));
        }
        let frame = match source.frame_at(0.0) {
            Ok(frame) => frame,
            Err(err) => return Err(self.fail(err)),
        };

        self.info = Some(source.info().clone());
        self.source = Some(source);
        self.frame = Some(frame);
        self.current_time = 0.0;
        self.ready = ReadyState::HaveEnoughData;
        self.state = PlaybackState::Loaded;
        self.events.push_back(MediaEvent::LoadedData);
        self.info
            .as_ref()
            .ok_or_else(|| IntroError::load("source reported no metadata"))
    }

    fn fail(&mut self, err: IntroError) -> IntroError {
        let err = match err {
            e @ IntroError::Load(_) => e,
            other => IntroError::load(other.to_string()),
        };
        self.events.push_back(MediaEvent::Error(err.to_string()));
        self.ready = ReadyState::HaveNothing;
        err
    }

    /// Start playback if `policy` grants it.
    ///
    /// [`AutoplayPolicy::MutedOnly`] grants playback only to muted elements.
    pub async fn play(&mut self, policy: AutoplayPolicy) -> IntroResult<()> {
        match self.state {
            PlaybackState::Playing => return Ok(()),
            PlaybackState::NotLoaded => {
                return Err(IntroError::playback("play() requires loaded data"));
            }
            PlaybackState::Loaded | PlaybackState::Ended => {}
        }

        let granted = future::ready(policy.grants(self.attributes.muted)).await;
        if !granted {
            return Err(IntroError::playback(format!(
                "playback not allowed by autoplay policy {policy:?} (muted={})",
                self.attributes.muted
            )));
        }

        if self.state == PlaybackState::Ended {
            self.seek(0.0)?;
        }
        self.state = PlaybackState::Playing;
        self.events.push_back(MediaEvent::Playing);
        Ok(())
    }

    /// Advance a playing element by `dt` seconds and decode the frame at the new position.
    ///
    /// Reaching the end of a non-looping resource emits [`MediaEvent::Ended`] once and stops.
    pub fn advance(&mut self, dt: f64) -> IntroResult<()> {
        if self.state != PlaybackState::Playing {
            return Ok(());
        }
        let duration = self.duration().unwrap_or(0.0);
        let mut t = self.current_time + dt.max(0.0);
        if t >= duration {
            if self.attributes.looping && duration > 0.0 {
                t %= duration;
            } else {
                t = duration;
                self.state = PlaybackState::Ended;
                self.events.push_back(MediaEvent::Ended);
            }
        }
        self.seek(t)
    }

    /// Move the playback position, clamped to `[0, duration]`. Does not change the state.
    pub fn set_current_time(&mut self, t: f64) -> IntroResult<()> {
        if self.source.is_none() {
            return Err(IntroError::playback("cannot seek before data is loaded"));
        }
        if t.is_nan() {
            return Err(IntroError::playback("cannot seek to NaN"));
        }
        self.seek(t)
    }

    fn seek(&mut self, t: f64) -> IntroResult<()> {
        let duration = self.duration().unwrap_or(0.0);
        self.current_time = t.clamp(0.0, duration);
        if let Some(source) = self.source.as_mut() {
            self.frame = Some(source.frame_at(self.current_time)?);
        }
        Ok(())
    }
}

fn check_info(info: &VideoInfo) -> IntroResult<()> {
    if info.width == 0 || info.height == 0 {
        return Err(IntroError::load(format!(
            "source reported empty frames ({}x{})",
            info.width, info.height
        )));
    }
    if !info.duration_secs.is_finite() || info.duration_secs < 0.0 {
        return Err(IntroError::load(format!(
            "source reported invalid duration {}",
            info.duration_secs
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/media/element.rs"]
mod tests;
