//! Intro session: scene setup, video presentation, reveal, and the render loop.

use std::sync::Arc;

use crate::{
    config::IntroConfig,
    encode::sink::{FrameSink, SinkConfig},
    foundation::error::{IntroError, IntroResult},
    media::element::MediaEvent,
    media::source::SourceLoader,
    platform::host::{Host, HostEvent},
    platform::stop::StopHandle,
    presenter::{VideoPresenter, present_video},
    reveal::{ContentRegion, RevealTransition},
    scene::context::{SceneContext, create_scene_context},
};

/// Where a session is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntroPhase {
    /// Waiting for the video.
    Loading,
    /// Video playing, content hidden.
    Playing,
    /// Video ended, content revealed.
    Revealed,
    /// Setup failed; nothing further happens.
    Failed,
}

/// Summary of one render loop run.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct RunStats {
    /// Frames rendered.
    pub frames: u64,
    /// Host time of the last rendered frame.
    pub last_frame_time: f64,
    /// Host time at which the content reveal started.
    pub revealed_at: Option<f64>,
    /// Resize events applied.
    pub resizes: u64,
    /// Resize events that failed.
    pub failed_resizes: u64,
    /// `true` when the loop ended through its [`StopHandle`].
    pub stopped: bool,
}

/// One intro on one host.
pub struct IntroSession<H: Host> {
    host: H,
    cfg: IntroConfig,
    ctx: SceneContext,
    phase: IntroPhase,
    presenter: Option<VideoPresenter>,
    reveal: RevealTransition,
    region: ContentRegion,
    stop: StopHandle,
}

impl<H: Host> IntroSession<H> {
    /// Validate `cfg` and build the scene on `host`. The content region starts hidden.
    pub fn new(mut host: H, cfg: IntroConfig) -> IntroResult<Self> {
        cfg.validate()?;
        let ctx = create_scene_context(&mut host, &cfg.scene)?;
        let reveal = RevealTransition::new(&cfg.reveal)?;
        let region = ContentRegion::hidden(cfg.reveal.hidden);
        Ok(Self {
            host,
            cfg,
            ctx,
            phase: IntroPhase::Loading,
            presenter: None,
            reveal,
            region,
            stop: StopHandle::new(),
        })
    }

    /// Load and start the video. A failure is terminal: the phase becomes [`IntroPhase::Failed`].
    pub async fn start(&mut self, loader: Arc<dyn SourceLoader>) -> IntroResult<()> {
        if self.phase != IntroPhase::Loading {
            return Err(IntroError::playback(format!(
                "intro already started (phase {:?})",
                self.phase
            )));
        }
        match present_video(&mut self.ctx, &self.host, loader, &self.cfg).await {
            Ok(presenter) => {
                self.presenter = Some(presenter);
                self.phase = IntroPhase::Playing;
                tracing::info!(phase = ?self.phase, "intro playing");
                Ok(())
            }
            Err(e) => {
                self.phase = IntroPhase::Failed;
                tracing::error!(error = %e, "intro failed");
                Err(e)
            }
        }
    }

    /// Render one frame per host frame until the host stops scheduling frames or the
    /// [`StopHandle`] fires.
    ///
    /// Refuses to start unless the video is playing or the content is already revealed.
    pub fn run(&mut self, sink: &mut dyn FrameSink) -> IntroResult<RunStats> {
        if !matches!(self.phase, IntroPhase::Playing | IntroPhase::Revealed) {
            return Err(IntroError::playback("render loop requires a playing intro"));
        }
        let Some(presenter) = self.presenter.as_mut() else {
            return Err(IntroError::playback("render loop requires a playing intro"));
        };

        let (width, height) = self.ctx.renderer.drawing_buffer_size();
        sink.begin(SinkConfig {
            width,
            height,
            pixel_ratio: self.ctx.renderer.pixel_ratio(),
        })?;

        let mut stats = RunStats::default();
        let mut prev: Option<f64> = None;
        loop {
            if self.stop.is_stopped() {
                stats.stopped = true;
                break;
            }
            let Some(now) = self.host.next_frame() else {
                break;
            };

            for event in self.host.drain_events() {
                match event {
                    HostEvent::Resize(viewport) => {
                        match presenter.handle_resize(&mut self.ctx, viewport) {
                            Ok(()) => stats.resizes += 1,
                            Err(e) => {
                                stats.failed_resizes += 1;
                                tracing::warn!(error = %e, "resize failed");
                            }
                        }
                    }
                }
            }

            let dt = prev.map_or(0.0, |p| (now - p).max(0.0));
            prev = Some(now);
            for event in presenter.update(&mut self.ctx, now, dt)? {
                if event == MediaEvent::Ended
                    && presenter.handle_ended(&mut self.reveal, &mut self.region, now)?
                {
                    self.phase = IntroPhase::Revealed;
                    stats.revealed_at = Some(now);
                    tracing::info!(phase = ?self.phase, at = now, "content revealed");
                }
            }
            self.reveal.tick(&mut self.region, now);

            let frame = self.ctx.renderer.render(&self.ctx.scene, &self.ctx.camera)?;
            sink.push_frame(stats.frames, now, &frame)?;
            stats.frames += 1;
            stats.last_frame_time = now;
        }

        sink.end()?;
        tracing::info!(frames = stats.frames, stopped = stats.stopped, "render loop finished");
        Ok(stats)
    }

    /// Handle that stops [`Self::run`] at its next frame.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Current phase.
    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    /// Host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Host, mutably (to inject events between runs).
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Scene, camera and renderer.
    pub fn context(&self) -> &SceneContext {
        &self.ctx
    }

    /// Content overlay.
    pub fn region(&self) -> &ContentRegion {
        &self.region
    }

    /// Reveal animation.
    pub fn reveal(&self) -> &RevealTransition {
        &self.reveal
    }

    /// Video presenter, once playing.
    pub fn presenter(&self) -> Option<&VideoPresenter> {
        self.presenter.as_ref()
    }
}

/// Build a session on `host`, start it with `loader`, and run it into `sink`.
///
/// Errors are logged here before they are returned.
#[tracing::instrument(skip_all)]
pub fn run_intro<H: Host>(
    host: H,
    cfg: IntroConfig,
    loader: Arc<dyn SourceLoader>,
    sink: &mut dyn FrameSink,
) -> IntroResult<(IntroSession<H>, RunStats)> {
    let result = (|| -> IntroResult<_> {
        let mut session = IntroSession::new(host, cfg)?;
        pollster::block_on(session.start(loader))?;
        let stats = session.run(sink)?;
        Ok((session, stats))
    })();
    if let Err(e) = &result {
        tracing::error!(error = %e, "intro aborted");
    }
    result
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
