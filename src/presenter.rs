//! Video plane: loads the intro video, maps its frames onto a frustum-filling plane, and reacts
//! to playback end and window resizes.

use std::sync::Arc;

use nalgebra::Point3;

use crate::{
    animation::timeline::Tween,
    config::IntroConfig,
    foundation::core::{Rgb, Viewport},
    foundation::error::IntroResult,
    media::element::{MediaAttributes, MediaElement, MediaEvent},
    media::source::SourceLoader,
    platform::host::Host,
    reveal::{ContentRegion, RevealTransition},
    scene::camera::PerspectiveCamera,
    scene::context::SceneContext,
    scene::light::Light,
    scene::mesh::{MeshId, Side, VideoMaterial},
    scene::texture::TextureId,
};

/// World-space size of the video plane.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PlaneSize {
    /// Width in world units.
    pub width: f64,
    /// Height in world units.
    pub height: f64,
}

/// Size of a plane that exactly fills `camera`'s view at `distance`.
///
/// `height = 2 · distance · tan(fov / 2)` and `width = height · aspect`, so the plane's aspect
/// always equals the camera's.
pub fn plane_size(camera: &PerspectiveCamera, distance: f64) -> PlaneSize {
    PlaneSize {
        width: camera.visible_width_at(distance),
        height: camera.visible_height_at(distance),
    }
}

/// The playing video and the plane it is drawn on.
#[derive(Debug)]
pub struct VideoPresenter {
    media: MediaElement,
    mesh: MeshId,
    texture: TextureId,
    fade_in: Option<Tween<f64>>,
    fade_started_at: Option<f64>,
    end_epsilon: f64,
}

/// Load the configured video, start it, and add a textured, frustum-filling plane to the scene.
///
/// Fails with [`IntroError::Load`](crate::IntroError::Load) when the video cannot be loaded and
/// with [`IntroError::Playback`](crate::IntroError::Playback) when the host refuses playback. On
/// failure the scene is left untouched.
#[tracing::instrument(skip_all, fields(src = %cfg.video.src.display()))]
pub async fn present_video(
    ctx: &mut SceneContext,
    host: &dyn Host,
    loader: Arc<dyn SourceLoader>,
    cfg: &IntroConfig,
) -> IntroResult<VideoPresenter> {
    let mut media = MediaElement::new(cfg.video.src.clone(), MediaAttributes::intro());
    if let Err(e) = media.load(loader) {
        tracing::error!(error = %e, "video load could not start");
        return Err(e);
    }
    let info = match media.loaded_data().await {
        Ok(info) => info.clone(),
        Err(e) => {
            tracing::error!(error = %e, "video failed to load");
            return Err(e);
        }
    };
    tracing::info!(
        width = info.width,
        height = info.height,
        duration = info.duration_secs,
        "video loaded"
    );

    if let Err(e) = media.play(host.autoplay_policy()).await {
        tracing::error!(error = %e, "video playback refused");
        return Err(e);
    }

    let size = plane_size(&ctx.camera, ctx.view_distance);
    let texture = ctx.scene.add_video_texture(info.width, info.height)?;
    if let Some(frame) = media.current_frame() {
        let tex = ctx.scene.texture_mut(texture)?;
        tex.mark_needs_update();
        tex.upload(frame)?;
    }

    let m = &cfg.presenter.material;
    let fade_in = cfg.presenter.fade_in.as_ref().map(|f| Tween {
        from: 0.0,
        to: 1.0,
        duration: f.duration,
        ease: f.ease,
    });
    let material = VideoMaterial {
        color: Rgb::splat(m.color_gain),
        map: Some(texture),
        emissive: Rgb::splat(m.emissive),
        emissive_map: Some(texture),
        emissive_intensity: m.emissive_intensity,
        opacity: if fade_in.is_some() { 0.0 } else { 1.0 },
        transparent: true,
        side: if m.double_sided {
            Side::Double
        } else {
            Side::Front
        },
    };
    let geometry = ctx.scene.new_plane_geometry(size.width, size.height)?;
    let mesh = ctx.scene.add_mesh(geometry, material, Point3::origin());

    for p in &cfg.presenter.point_lights {
        let [x, y, z] = p.position;
        ctx.scene.add_light(Light::Point {
            color: Rgb::from_hex(p.color),
            intensity: p.intensity,
            position: Point3::new(x, y, z),
        });
    }

    tracing::info!(
        plane_width = size.width,
        plane_height = size.height,
        "video plane attached"
    );
    Ok(VideoPresenter {
        media,
        mesh,
        texture,
        fade_in,
        fade_started_at: None,
        end_epsilon: cfg.video.end_epsilon_secs,
    })
}

impl VideoPresenter {
    /// The playing media element.
    pub fn media(&self) -> &MediaElement {
        &self.media
    }

    /// Mesh carrying the video.
    pub fn mesh_id(&self) -> MeshId {
        self.mesh
    }

    /// Texture fed by the video.
    pub fn texture_id(&self) -> TextureId {
        self.texture
    }

    /// Advance playback by `dt`, update the fade-in and upload the current video frame.
    ///
    /// Returns the media events raised since the last call.
    pub fn update(
        &mut self,
        ctx: &mut SceneContext,
        now: f64,
        dt: f64,
    ) -> IntroResult<Vec<MediaEvent>> {
        self.media.advance(dt)?;

        if let Some(fade) = &self.fade_in {
            let start = *self.fade_started_at.get_or_insert(now);
            ctx.scene.mesh_mut(self.mesh)?.material.opacity = fade.sample(now - start);
        }

        if self.media.has_current_data()
            && let Some(frame) = self.media.current_frame()
        {
            let tex = ctx.scene.texture_mut(self.texture)?;
            tex.mark_needs_update();
            tex.upload(frame)?;
        }
        Ok(self.media.poll_events())
    }

    /// Reveal the content and pin playback just before the end.
    ///
    /// Returns `true` if this call started the reveal.
    pub fn handle_ended(
        &mut self,
        reveal: &mut RevealTransition,
        region: &mut ContentRegion,
        now: f64,
    ) -> IntroResult<bool> {
        let revealed = reveal.reveal(region, now);
        let duration = self.media.duration().unwrap_or(0.0);
        self.media
            .set_current_time((duration - self.end_epsilon).max(0.0))?;
        tracing::info!(
            position = self.media.current_time(),
            revealed,
            "video ended"
        );
        Ok(revealed)
    }

    /// Refit camera, renderer and plane to `viewport`, disposing the old plane geometry.
    pub fn handle_resize(&mut self, ctx: &mut SceneContext, viewport: Viewport) -> IntroResult<()> {
        ctx.resize(viewport)?;
        let size = plane_size(&ctx.camera, ctx.view_distance);
        let geometry = ctx.scene.new_plane_geometry(size.width, size.height)?;
        let old = ctx.scene.mesh_mut(self.mesh)?.replace_geometry(geometry);
        ctx.renderer.dispose_geometry(old.id());
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            plane_width = size.width,
            plane_height = size.height,
            "plane resized"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/presenter.rs"]
mod tests;
