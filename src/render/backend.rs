use crate::{
    foundation::core::Viewport,
    foundation::error::IntroResult,
    scene::camera::PerspectiveCamera,
    scene::graph::Scene,
    scene::mesh::GeometryId,
};

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**. The scene background is opaque, so in practice alpha is
/// always 255.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA bytes of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }
}

/// Tone mapping operator applied to linear radiance before output encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneMapping {
    /// Clamp only.
    None,
    /// ACES filmic approximation.
    #[default]
    AcesFilmic,
}

/// Backend-agnostic output settings.
#[derive(Clone, Debug, PartialEq)]
pub struct RendererSettings {
    /// Upper bound on the device pixel ratio.
    pub max_pixel_ratio: f64,
    /// Exposure multiplier applied before tone mapping.
    pub exposure: f64,
    /// Tone mapping operator.
    pub tone_mapping: ToneMapping,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            max_pixel_ratio: 2.0,
            exposure: 1.0,
            tone_mapping: ToneMapping::AcesFilmic,
        }
    }
}

/// What a renderer hands to the host when its surface is attached to the page.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SurfaceInfo {
    /// Backend name.
    pub backend: &'static str,
    /// CSS-pixel size of the surface.
    pub css_width: u32,
    /// CSS-pixel height of the surface.
    pub css_height: u32,
    /// Effective pixel ratio of the drawing buffer.
    pub pixel_ratio: f64,
}

/// A renderer that draws a [`Scene`] through a [`PerspectiveCamera`] into a [`FrameRGBA`].
pub trait RenderBackend {
    /// Short backend name.
    fn name(&self) -> &'static str;

    /// Resize the output surface to `viewport` (CSS pixels + device pixel ratio).
    fn set_size(&mut self, viewport: Viewport);

    /// Effective pixel ratio: the viewport's device ratio capped by the settings.
    fn pixel_ratio(&self) -> f64;

    /// Physical size of the drawing buffer.
    fn drawing_buffer_size(&self) -> (u32, u32);

    /// Describe the output surface.
    fn surface_info(&self) -> SurfaceInfo;

    /// Draw one frame.
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> IntroResult<FrameRGBA>;

    /// Release any per-geometry resources cached for `id`.
    fn dispose_geometry(&mut self, id: GeometryId);

    /// Geometry ids with live cached resources.
    fn cached_geometries(&self) -> Vec<GeometryId>;
}
