//! Intro configuration.
//!
//! Every field has a default, so an empty JSON object (`{}`) is a complete configuration.

use std::{fs::File, io::BufReader, path::Path, path::PathBuf};

use crate::{
    animation::ease::Ease,
    animation::timeline::Position,
    foundation::core::{Fps, Rgb},
    foundation::error::{IntroError, IntroResult},
    render::backend::ToneMapping,
    reveal::{ContentRole, VisualState},
};

/// Top-level configuration for an intro session.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntroConfig {
    /// Video source and end-of-playback handling.
    pub video: VideoConfig,
    /// Camera, renderer and base lighting.
    pub scene: SceneConfig,
    /// Video plane material and supplemental lights.
    pub presenter: PresenterConfig,
    /// Content reveal animation.
    pub reveal: RevealConfig,
}

impl IntroConfig {
    /// Read and validate a JSON configuration file.
    pub fn from_json_path(path: &Path) -> IntroResult<Self> {
        let f = File::open(path).map_err(|e| {
            IntroError::validation(format!("open config '{}': {e}", path.display()))
        })?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            IntroError::validation(format!("parse config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> IntroResult<()> {
        self.video.validate()?;
        self.scene.validate()?;
        self.presenter.validate()?;
        self.reveal.validate()
    }
}

fn check(ok: bool, msg: impl FnOnce() -> String) -> IntroResult<()> {
    if ok {
        Ok(())
    } else {
        Err(IntroError::validation(msg()))
    }
}

/// Video source settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VideoConfig {
    /// Video file, or a directory of still frames.
    pub src: PathBuf,
    /// Frame rate assumed for frame-sequence directories.
    pub sequence_fps: Fps,
    /// Playback is pinned this many seconds before the end once it finishes.
    pub end_epsilon_secs: f64,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            src: PathBuf::from("Forest_new2_fox0001-0233.mkv"),
            sequence_fps: Fps { num: 24, den: 1 },
            end_epsilon_secs: 0.01,
        }
    }
}

impl VideoConfig {
    fn validate(&self) -> IntroResult<()> {
        Fps::new(self.sequence_fps.num, self.sequence_fps.den)?;
        check(
            self.end_epsilon_secs.is_finite() && self.end_epsilon_secs >= 0.0,
            || format!("video.end_epsilon_secs must be >= 0, got {}", self.end_epsilon_secs),
        )
    }
}

/// Camera, renderer and base lights.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Perspective camera.
    pub camera: CameraConfig,
    /// Output surface.
    pub renderer: RendererConfig,
    /// Background color as `0xRRGGBB`.
    pub background: u32,
    /// Ambient light.
    pub ambient: LightConfig,
    /// Directional light.
    pub directional: PositionedLightConfig,
    /// Optional hemisphere light.
    pub hemisphere: Option<HemisphereLightConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            renderer: RendererConfig::default(),
            background: 0x000000,
            ambient: LightConfig {
                color: 0xffffff,
                intensity: 1.0,
            },
            directional: PositionedLightConfig {
                color: 0xffffff,
                intensity: 1.2,
                position: [5.0, 5.0, 5.0],
            },
            hemisphere: Some(HemisphereLightConfig {
                sky: 0xffffff,
                ground: 0x444444,
                intensity: 0.6,
            }),
        }
    }
}

impl SceneConfig {
    fn validate(&self) -> IntroResult<()> {
        self.camera.validate()?;
        self.renderer.validate()?;
        self.ambient.validate("scene.ambient")?;
        check(self.directional.intensity >= 0.0, || {
            "scene.directional.intensity must be >= 0".to_owned()
        })?;
        if let Some(h) = &self.hemisphere {
            check(h.intensity >= 0.0, || {
                "scene.hemisphere.intensity must be >= 0".to_owned()
            })?;
        }
        Ok(())
    }
}

/// Perspective camera settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_deg: f64,
    /// Near clip plane.
    pub near: f64,
    /// Far clip plane.
    pub far: f64,
    /// Distance from the camera to the video plane.
    pub distance: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            distance: 5.0,
        }
    }
}

impl CameraConfig {
    fn validate(&self) -> IntroResult<()> {
        check(self.fov_deg > 0.0 && self.fov_deg < 180.0, || {
            format!("scene.camera.fov_deg must be in (0, 180), got {}", self.fov_deg)
        })?;
        check(self.near > 0.0 && self.far > self.near, || {
            format!(
                "scene.camera requires 0 < near < far, got near={} far={}",
                self.near, self.far
            )
        })?;
        check(
            self.distance > self.near && self.distance < self.far,
            || {
                format!(
                    "scene.camera.distance must lie between near and far, got {}",
                    self.distance
                )
            },
        )
    }
}

/// Output surface settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RendererConfig {
    /// Upper bound on the device pixel ratio used for the drawing buffer.
    pub max_pixel_ratio: f64,
    /// Exposure applied before tone mapping.
    pub exposure: f64,
    /// Tone mapping operator.
    pub tone_mapping: ToneMapping,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            max_pixel_ratio: 2.0,
            exposure: 2.0,
            tone_mapping: ToneMapping::AcesFilmic,
        }
    }
}

impl RendererConfig {
    fn validate(&self) -> IntroResult<()> {
        check(self.max_pixel_ratio > 0.0, || {
            format!(
                "scene.renderer.max_pixel_ratio must be > 0, got {}",
                self.max_pixel_ratio
            )
        })?;
        check(self.exposure.is_finite() && self.exposure >= 0.0, || {
            format!("scene.renderer.exposure must be >= 0, got {}", self.exposure)
        })
    }
}

/// Color + intensity.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LightConfig {
    /// Color as `0xRRGGBB`.
    pub color: u32,
    /// Intensity multiplier.
    pub intensity: f64,
}

impl LightConfig {
    fn validate(&self, what: &str) -> IntroResult<()> {
        check(self.intensity >= 0.0, || {
            format!("{what}.intensity must be >= 0")
        })
    }

    /// Linear color.
    pub fn rgb(&self) -> Rgb {
        Rgb::from_hex(self.color)
    }
}

/// Color + intensity + position.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PositionedLightConfig {
    /// Color as `0xRRGGBB`.
    pub color: u32,
    /// Intensity multiplier.
    pub intensity: f64,
    /// World-space position.
    pub position: [f64; 3],
}

/// Hemisphere light colors.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HemisphereLightConfig {
    /// Sky color as `0xRRGGBB`.
    pub sky: u32,
    /// Ground color as `0xRRGGBB`.
    pub ground: u32,
    /// Intensity multiplier.
    pub intensity: f64,
}

/// Video plane material and supplemental lighting.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PresenterConfig {
    /// Plane material.
    pub material: MaterialConfig,
    /// Point lights placed around the plane.
    pub point_lights: Vec<PositionedLightConfig>,
    /// Opacity fade-in of the plane once playback starts.
    pub fade_in: Option<FadeConfig>,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        let point = |x: f64, y: f64| PositionedLightConfig {
            color: 0xffffff,
            intensity: 1.5,
            position: [x, y, 5.0],
        };
        Self {
            material: MaterialConfig::default(),
            point_lights: vec![point(5.0, 5.0), point(-5.0, -5.0), point(5.0, -5.0)],
            fade_in: Some(FadeConfig {
                duration: 1.5,
                ease: Ease::OutCubic,
            }),
        }
    }
}

impl PresenterConfig {
    fn validate(&self) -> IntroResult<()> {
        self.material.validate()?;
        for (i, p) in self.point_lights.iter().enumerate() {
            check(p.intensity >= 0.0, || {
                format!("presenter.point_lights[{i}].intensity must be >= 0")
            })?;
        }
        if let Some(f) = &self.fade_in {
            check(f.duration.is_finite() && f.duration >= 0.0, || {
                format!("presenter.fade_in.duration must be >= 0, got {}", f.duration)
            })?;
        }
        Ok(())
    }
}

/// Video plane material constants.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MaterialConfig {
    /// Gray multiplier on the video color; above 1 counteracts compression darkening.
    pub color_gain: f64,
    /// Gray emissive color multiplied with the video.
    pub emissive: f64,
    /// Emissive intensity.
    pub emissive_intensity: f64,
    /// Draw both faces of the plane.
    pub double_sided: bool,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            color_gain: 1.4,
            emissive: 0.2,
            emissive_intensity: 0.4,
            double_sided: true,
        }
    }
}

impl MaterialConfig {
    fn validate(&self) -> IntroResult<()> {
        check(
            self.color_gain >= 0.0 && self.emissive >= 0.0 && self.emissive_intensity >= 0.0,
            || "presenter.material values must be >= 0".to_owned(),
        )
    }
}

/// A single-property fade.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FadeConfig {
    /// Seconds.
    pub duration: f64,
    /// Easing.
    pub ease: Ease,
}

/// Content reveal animation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Pose every element starts in.
    pub hidden: VisualState,
    /// One tween per element, in order.
    pub steps: Vec<RevealStep>,
    /// Opacity fade of the whole container, starting with the first step.
    pub container_fade: Option<FadeConfig>,
}

impl Default for RevealConfig {
    fn default() -> Self {
        let step = |role, duration, position| RevealStep {
            role,
            duration,
            position,
            ease: Ease::OutQuart,
        };
        Self {
            hidden: VisualState {
                opacity: 0.0,
                y_offset: 40.0,
                scale: 0.95,
            },
            steps: vec![
                step(ContentRole::Heading, 1.2, Position::AfterPrevious),
                step(ContentRole::Tagline, 1.0, Position::Overlap(0.7)),
                step(ContentRole::CallToAction, 0.8, Position::Overlap(0.5)),
            ],
            container_fade: Some(FadeConfig {
                duration: 1.0,
                ease: Ease::OutCubic,
            }),
        }
    }
}

impl RevealConfig {
    fn validate(&self) -> IntroResult<()> {
        check(self.hidden.opacity >= 0.0 && self.hidden.opacity <= 1.0, || {
            format!("reveal.hidden.opacity must be in [0, 1], got {}", self.hidden.opacity)
        })?;
        check(self.hidden.scale >= 0.0, || {
            format!("reveal.hidden.scale must be >= 0, got {}", self.hidden.scale)
        })?;
        for (i, s) in self.steps.iter().enumerate() {
            check(s.duration.is_finite() && s.duration >= 0.0, || {
                format!("reveal.steps[{i}].duration must be >= 0, got {}", s.duration)
            })?;
            check(
                !self.steps[..i].iter().any(|p| p.role == s.role),
                || format!("reveal.steps[{i}] repeats role {:?}", s.role),
            )?;
        }
        if let Some(f) = &self.container_fade {
            check(f.duration.is_finite() && f.duration >= 0.0, || {
                format!("reveal.container_fade.duration must be >= 0, got {}", f.duration)
            })?;
        }
        Ok(())
    }
}

/// One element's reveal tween.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RevealStep {
    /// Animated element.
    pub role: ContentRole,
    /// Seconds.
    pub duration: f64,
    /// Placement relative to the previous step.
    #[serde(default = "default_position")]
    pub position: Position,
    /// Easing.
    #[serde(default = "default_reveal_ease")]
    pub ease: Ease,
}

fn default_position() -> Position {
    Position::AfterPrevious
}

fn default_reveal_ease() -> Ease {
    Ease::OutQuart
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
