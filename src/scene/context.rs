use nalgebra::Point3;

use crate::{
    config::SceneConfig,
    foundation::core::{Rgb, Viewport},
    foundation::error::IntroResult,
    platform::host::Host,
    render::backend::{RenderBackend, RendererSettings},
    render::cpu::CpuRenderer,
    scene::camera::PerspectiveCamera,
    scene::graph::Scene,
    scene::light::Light,
};

/// Scene, camera and renderer for one session.
pub struct SceneContext {
    /// Scene graph.
    pub scene: Scene,
    /// Viewing camera.
    pub camera: PerspectiveCamera,
    /// Output renderer.
    pub renderer: Box<dyn RenderBackend>,
    /// Distance from the camera to the content plane.
    pub view_distance: f64,
}

impl std::fmt::Debug for SceneContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneContext")
            .field("scene", &self.scene)
            .field("camera", &self.camera)
            .field("renderer", &self.renderer.surface_info())
            .field("view_distance", &self.view_distance)
            .finish()
    }
}

impl SceneContext {
    /// Match the camera aspect and renderer size to a new viewport.
    pub fn resize(&mut self, viewport: Viewport) -> IntroResult<()> {
        self.camera.set_aspect(viewport.aspect())?;
        self.renderer.set_size(viewport);
        Ok(())
    }
}

/// Build the scene, camera and renderer for `host`'s viewport and attach the renderer's surface.
///
/// The camera sits on +Z at `cfg.camera.distance`, looking at the origin. The renderer uses the
/// host's pixel ratio capped at `cfg.renderer.max_pixel_ratio`.
#[tracing::instrument(skip(host, cfg))]
pub fn create_scene_context(host: &mut dyn Host, cfg: &SceneConfig) -> IntroResult<SceneContext> {
    let viewport = host.viewport();

    let mut camera = PerspectiveCamera::new(
        cfg.camera.fov_deg,
        viewport.aspect(),
        cfg.camera.near,
        cfg.camera.far,
    )?;
    camera.position = Point3::new(0.0, 0.0, cfg.camera.distance);

    let renderer = CpuRenderer::new(
        RendererSettings {
            max_pixel_ratio: cfg.renderer.max_pixel_ratio,
            exposure: cfg.renderer.exposure,
            tone_mapping: cfg.renderer.tone_mapping,
        },
        viewport,
    );

    let mut scene = Scene::new(Rgb::from_hex(cfg.background));
    scene.add_light(Light::Ambient {
        color: cfg.ambient.rgb(),
        intensity: cfg.ambient.intensity,
    });
    let [x, y, z] = cfg.directional.position;
    scene.add_light(Light::Directional {
        color: Rgb::from_hex(cfg.directional.color),
        intensity: cfg.directional.intensity,
        position: Point3::new(x, y, z),
    });
    if let Some(h) = &cfg.hemisphere {
        scene.add_light(Light::Hemisphere {
            sky: Rgb::from_hex(h.sky),
            ground: Rgb::from_hex(h.ground),
            intensity: h.intensity,
        });
    }

    let surface = renderer.surface_info();
    host.attach_surface(surface);
    tracing::info!(
        width = viewport.width,
        height = viewport.height,
        pixel_ratio = surface.pixel_ratio,
        fov_deg = camera.fov_deg(),
        near = camera.near(),
        far = camera.far(),
        lights = scene.lights().len(),
        "scene context ready"
    );

    Ok(SceneContext {
        scene,
        camera,
        renderer: Box::new(renderer),
        view_distance: cfg.camera.distance,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/scene/context.rs"]
mod tests;
