use std::collections::BTreeMap;
use std::f64::consts::PI;

use kurbo::Rect;
use nalgebra::{Matrix3, Point3, Vector3};

use crate::{
    foundation::core::{Rgb, Viewport, linear_to_srgb},
    foundation::error::{IntroError, IntroResult},
    render::backend::{FrameRGBA, RenderBackend, RendererSettings, SurfaceInfo, ToneMapping},
    scene::camera::PerspectiveCamera,
    scene::graph::Scene,
    scene::mesh::{GeometryId, Mesh, Side},
    scene::texture::{TextureId, VideoTexture},
};

/// CPU raster backend for camera-facing textured planes.
///
/// Shading is Lambertian (diffuse = albedo / π · irradiance) plus emissive, followed by exposure,
/// tone mapping and sRGB encoding. Meshes are drawn in scene order with alpha blending.
#[derive(Debug)]
pub struct CpuRenderer {
    settings: RendererSettings,
    viewport: Viewport,
    geometries: BTreeMap<GeometryId, (f64, f64)>,
}

impl CpuRenderer {
    /// Create a renderer sized to `viewport`.
    pub fn new(settings: RendererSettings, viewport: Viewport) -> Self {
        Self {
            settings,
            viewport,
            geometries: BTreeMap::new(),
        }
    }

    /// Output settings.
    pub fn settings(&self) -> &RendererSettings {
        &self.settings
    }

    fn draw_mesh(
        &mut self,
        scene: &Scene,
        camera: &PerspectiveCamera,
        mesh: &Mesh,
        buf: &mut [Rgb],
        (w, h): (u32, u32),
    ) -> IntroResult<()> {
        let geom = mesh.geometry();
        self.geometries
            .entry(geom.id())
            .or_insert((geom.width(), geom.height()));

        let front_visible = camera.position.z > mesh.position.z;
        if !front_visible && mesh.material.side == Side::Front {
            return Ok(());
        }

        let half_w = geom.width() / 2.0;
        let half_h = geom.height() / 2.0;
        let top_left = Point3::new(
            mesh.position.x - half_w,
            mesh.position.y + half_h,
            mesh.position.z,
        );
        let bottom_right = Point3::new(
            mesh.position.x + half_w,
            mesh.position.y - half_h,
            mesh.position.z,
        );
        let (Some(a), Some(b)) = (camera.project(&top_left), camera.project(&bottom_right)) else {
            return Ok(());
        };

        let (fw, fh) = (f64::from(w), f64::from(h));
        let rect = Rect::new(
            (a.x + 1.0) * 0.5 * fw,
            (1.0 - a.y) * 0.5 * fh,
            (b.x + 1.0) * 0.5 * fw,
            (1.0 - b.y) * 0.5 * fh,
        )
        .abs();
        let clipped = rect.intersect(Rect::new(0.0, 0.0, fw, fh));
        if clipped.is_zero_area() || rect.width() <= 0.0 || rect.height() <= 0.0 {
            return Ok(());
        }

        let material = &mesh.material;
        let lookup = |id: TextureId| {
            scene.texture(id).ok_or_else(|| {
                IntroError::render(format!(
                    "mesh {:?} references missing texture {id:?}",
                    mesh.id()
                ))
            })
        };
        let map = material.map.map(lookup).transpose()?;
        let emissive_map = material.emissive_map.map(lookup).transpose()?;
        let normal = if front_visible {
            geom.normal()
        } else {
            -geom.normal()
        };
        let opacity = material.effective_opacity();
        let filter_for = |tex: &VideoTexture| {
            if rect.width() > f64::from(tex.width()) {
                tex.mag_filter
            } else {
                tex.min_filter
            }
        };

        let x_start = (clipped.x0 - 0.5).ceil().max(0.0) as u32;
        let x_end = ((clipped.x1 - 0.5).floor() as i64).min(i64::from(w) - 1);
        let y_start = (clipped.y0 - 0.5).ceil().max(0.0) as u32;
        let y_end = ((clipped.y1 - 0.5).floor() as i64).min(i64::from(h) - 1);
        if x_end < 0 || y_end < 0 {
            return Ok(());
        }

        for py in y_start..=(y_end as u32) {
            let v = ((f64::from(py) + 0.5 - rect.y0) / rect.height()).clamp(0.0, 1.0);
            for px in x_start..=(x_end as u32) {
                let mut u = ((f64::from(px) + 0.5 - rect.x0) / rect.width()).clamp(0.0, 1.0);
                let world = Point3::new(
                    top_left.x + u * geom.width(),
                    top_left.y - v * geom.height(),
                    top_left.z,
                );
                if !front_visible {
                    u = 1.0 - u;
                }

                let (mut albedo, mut alpha) = (material.color, opacity);
                if let Some(tex) = map {
                    let s = tex.sample(u, v, filter_for(tex));
                    albedo = albedo * Rgb::new(s[0], s[1], s[2]);
                    alpha *= s[3];
                }
                let mut emissive = material.emissive.scale(material.emissive_intensity);
                if let Some(tex) = emissive_map {
                    let s = tex.sample(u, v, filter_for(tex));
                    emissive = emissive * Rgb::new(s[0], s[1], s[2]);
                }

                let mut irradiance = Rgb::BLACK;
                for light in scene.lights() {
                    irradiance += light.irradiance(&world, &normal);
                }
                let radiance = albedo * irradiance.scale(1.0 / PI) + emissive;
                let color = self.tone_map(radiance.scale(self.settings.exposure));

                let dst = &mut buf[(py as usize) * (w as usize) + (px as usize)];
                *dst = dst.lerp(color, alpha.clamp(0.0, 1.0));
            }
        }
        Ok(())
    }

    fn tone_map(&self, c: Rgb) -> Rgb {
        match self.settings.tone_mapping {
            ToneMapping::None => Rgb::new(
                c.r.clamp(0.0, 1.0),
                c.g.clamp(0.0, 1.0),
                c.b.clamp(0.0, 1.0),
            ),
            ToneMapping::AcesFilmic => aces_filmic(c),
        }
    }
}

/// ACES filmic fit (sRGB → AP1 → RRT+ODT → sRGB), with the customary 1/0.6 pre-exposure.
pub(crate) fn aces_filmic(c: Rgb) -> Rgb {
    let input = Matrix3::new(
        0.59719, 0.35458, 0.04823, //
        0.07600, 0.90834, 0.01566, //
        0.02840, 0.13383, 0.83777,
    );
    let output = Matrix3::new(
        1.60475, -0.53108, -0.07367, //
        -0.10208, 1.10813, -0.00605, //
        -0.00327, -0.07276, 1.07602,
    );
    let rrt_odt = |v: f64| {
        let a = v * (v + 0.024_578_6) - 0.000_090_537;
        let b = v * (0.983_729 * v + 0.432_951) + 0.238_081;
        a / b
    };

    let v = input * (Vector3::new(c.r, c.g, c.b) / 0.6);
    let v = output * v.map(rrt_odt);
    Rgb::new(
        v.x.clamp(0.0, 1.0),
        v.y.clamp(0.0, 1.0),
        v.z.clamp(0.0, 1.0),
    )
}

impl RenderBackend for CpuRenderer {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn set_size(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn pixel_ratio(&self) -> f64 {
        self.viewport
            .device_pixel_ratio
            .min(self.settings.max_pixel_ratio)
    }

    fn drawing_buffer_size(&self) -> (u32, u32) {
        self.viewport.drawing_buffer(self.pixel_ratio())
    }

    fn surface_info(&self) -> SurfaceInfo {
        SurfaceInfo {
            backend: self.name(),
            css_width: self.viewport.width,
            css_height: self.viewport.height,
            pixel_ratio: self.pixel_ratio(),
        }
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> IntroResult<FrameRGBA> {
        let (w, h) = self.drawing_buffer_size();
        let mut buf = vec![scene.background; (w as usize) * (h as usize)];

        for mesh in scene.meshes() {
            self.draw_mesh(scene, camera, mesh, &mut buf, (w, h))?;
        }

        let mut data = Vec::with_capacity(buf.len() * 4);
        for c in &buf {
            data.extend_from_slice(&[encode(c.r), encode(c.g), encode(c.b), 255]);
        }
        Ok(FrameRGBA {
            width: w,
            height: h,
            data,
            premultiplied: true,
        })
    }

    fn dispose_geometry(&mut self, id: GeometryId) {
        if self.geometries.remove(&id).is_some() {
            tracing::debug!(?id, "disposed geometry");
        }
    }

    fn cached_geometries(&self) -> Vec<GeometryId> {
        self.geometries.keys().copied().collect()
    }
}

fn encode(c: f64) -> u8 {
    (linear_to_srgb(c) * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
