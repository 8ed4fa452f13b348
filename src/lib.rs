//! vidintro plays a full-viewport video intro through a small 3D scene, then reveals the page
//! content with a staggered animation once the video ends.
//!
//! The page environment is abstracted behind [`Host`]; [`HeadlessHost`] runs the whole
//! lifecycle without a display. A session goes through:
//!
//! - [`create_scene_context`]: camera, [`CpuRenderer`], base lights
//! - [`present_video`]: load, play, and map the video onto a frustum-filling plane
//! - [`RevealTransition`]: fade and slide the hidden [`ContentRegion`] into place on `ended`
//! - [`IntroSession::run`]: render one frame per host frame into a [`FrameSink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod config;
pub(crate) mod encode;
pub(crate) mod media;
pub(crate) mod platform;
pub(crate) mod presenter;
pub(crate) mod render;
pub(crate) mod reveal;
pub(crate) mod scene;
pub(crate) mod session;

pub use crate::foundation::core::{Fps, Point3, Rgb, Vector3, Viewport};
pub use crate::foundation::error::{IntroError, IntroResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::timeline::{Lerp, Position, Timeline, Tween};
pub use crate::config::{
    CameraConfig, FadeConfig, HemisphereLightConfig, IntroConfig, LightConfig, MaterialConfig,
    PositionedLightConfig, PresenterConfig, RendererConfig, RevealConfig, RevealStep,
    SceneConfig, VideoConfig,
};
pub use crate::encode::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig};
pub use crate::media::element::{
    MediaAttributes, MediaElement, MediaEvent, PlaybackState, ReadyState,
};
pub use crate::media::ffmpeg::FfmpegLoader;
pub use crate::media::source::{
    DefaultLoader, FrameSequence, FrameSequenceLoader, SourceLoader, TestPattern,
    TestPatternLoader, VideoFrame, VideoInfo, VideoSource,
};
pub use crate::platform::host::{AutoplayPolicy, HeadlessHost, Host, HostEvent};
pub use crate::platform::stop::StopHandle;
pub use crate::presenter::{PlaneSize, VideoPresenter, plane_size, present_video};
pub use crate::render::backend::{
    FrameRGBA, RenderBackend, RendererSettings, SurfaceInfo, ToneMapping,
};
pub use crate::render::cpu::CpuRenderer;
pub use crate::reveal::{ContentElement, ContentRegion, ContentRole, RevealTransition, VisualState};
pub use crate::scene::camera::PerspectiveCamera;
pub use crate::scene::context::{SceneContext, create_scene_context};
pub use crate::scene::graph::Scene;
pub use crate::scene::light::Light;
pub use crate::scene::mesh::{GeometryId, Mesh, MeshId, PlaneGeometry, Side, VideoMaterial};
pub use crate::scene::texture::{ColorSpace, Filter, TextureId, VideoTexture};
pub use crate::session::{IntroPhase, IntroSession, RunStats, run_intro};
