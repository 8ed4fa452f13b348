use crate::{
    foundation::core::Viewport,
    foundation::error::{IntroError, IntroResult},
    render::backend::SurfaceInfo,
};

/// Whether the host lets media start without a user gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoplayPolicy {
    /// Any element may autoplay.
    Allowed,
    /// Only muted elements may autoplay.
    #[default]
    MutedOnly,
    /// Nothing autoplays.
    Blocked,
}

impl AutoplayPolicy {
    /// `true` if an element with the given muted flag may start.
    pub fn grants(self, muted: bool) -> bool {
        match self {
            Self::Allowed => true,
            Self::MutedOnly => muted,
            Self::Blocked => false,
        }
    }
}

/// Notifications the host delivers between frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    /// The window changed size.
    Resize(Viewport),
}

/// The environment an intro runs in: a window with a drawing surface and a frame clock.
pub trait Host {
    /// Current window size and pixel density.
    fn viewport(&self) -> Viewport;

    /// Device pixel ratio of the display.
    fn device_pixel_ratio(&self) -> f64 {
        self.viewport().device_pixel_ratio
    }

    /// Autoplay rule for media elements.
    fn autoplay_policy(&self) -> AutoplayPolicy;

    /// Insert a renderer's output surface into the page.
    fn attach_surface(&mut self, surface: SurfaceInfo);

    /// Wait for the next display frame and return its timestamp in seconds.
    ///
    /// `None` means the page is going away and no more frames will be scheduled.
    fn next_frame(&mut self) -> Option<f64>;

    /// Events observed since the last call.
    fn drain_events(&mut self) -> Vec<HostEvent>;
}

/// Host without a display: a fixed frame clock, a frame budget, and scripted resizes.
#[derive(Clone, Debug)]
pub struct HeadlessHost {
    viewport: Viewport,
    autoplay: AutoplayPolicy,
    frame_duration: f64,
    max_frames: u64,
    frames_requested: u64,
    resizes: Vec<(u64, Viewport)>,
    pending: Vec<HostEvent>,
    surfaces: Vec<SurfaceInfo>,
}

impl HeadlessHost {
    /// Host with the given viewport, ticking at `fps` for at most `max_frames` frames.
    pub fn new(viewport: Viewport, fps: f64, max_frames: u64) -> IntroResult<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(IntroError::validation(format!(
                "headless host fps must be > 0, got {fps}"
            )));
        }
        Ok(Self {
            viewport,
            autoplay: AutoplayPolicy::default(),
            frame_duration: 1.0 / fps,
            max_frames,
            frames_requested: 0,
            resizes: Vec::new(),
            pending: Vec::new(),
            surfaces: Vec::new(),
        })
    }

    /// Replace the autoplay policy.
    pub fn with_autoplay(mut self, policy: AutoplayPolicy) -> Self {
        self.autoplay = policy;
        self
    }

    /// Resize the window to `viewport` just before frame `frame` is delivered.
    pub fn schedule_resize(&mut self, frame: u64, viewport: Viewport) {
        self.resizes.push((frame, viewport));
        self.resizes.sort_by_key(|(f, _)| *f);
    }

    /// Resize the window now.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.pending.push(HostEvent::Resize(viewport));
    }

    /// Frames handed out so far.
    pub fn frames_requested(&self) -> u64 {
        self.frames_requested
    }

    /// Surfaces attached so far.
    pub fn surfaces(&self) -> &[SurfaceInfo] {
        &self.surfaces
    }
}

impl Host for HeadlessHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn autoplay_policy(&self) -> AutoplayPolicy {
        self.autoplay
    }

    fn attach_surface(&mut self, surface: SurfaceInfo) {
        self.surfaces.push(surface);
    }

    fn next_frame(&mut self) -> Option<f64> {
        if self.frames_requested >= self.max_frames {
            return None;
        }
        let frame = self.frames_requested;
        while let Some(&(at, viewport)) = self.resizes.first() {
            if at > frame {
                break;
            }
            self.resizes.remove(0);
            self.resize(viewport);
        }
        self.frames_requested += 1;
        Some(frame as f64 * self.frame_duration)
    }

    fn drain_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/platform/host.rs"]
mod tests;
