use super::*;
use crate::config::RevealConfig;
use crate::foundation::core::Fps;
use crate::foundation::error::IntroError;
use crate::media::element::PlaybackState;
use crate::media::source::{TestPatternLoader, VideoSource};
use crate::platform::host::{AutoplayPolicy, HeadlessHost};
use crate::scene::context::create_scene_context;

struct FailingLoader;

impl SourceLoader for FailingLoader {
    fn open(&self, _src: &std::path::Path) -> IntroResult<Box<dyn VideoSource>> {
        Err(IntroError::load("decoder unavailable"))
    }
}

fn pattern(duration_secs: f64) -> Arc<dyn SourceLoader> {
    Arc::new(TestPatternLoader {
        width: 8,
        height: 4,
        duration_secs,
        fps: Fps::new(10, 1).unwrap(),
    })
}

fn setup(w: u32, h: u32, policy: AutoplayPolicy) -> (HeadlessHost, SceneContext) {
    let mut host = HeadlessHost::new(Viewport::new(w, h).unwrap(), 10.0, 100)
        .unwrap()
        .with_autoplay(policy);
    let ctx = create_scene_context(&mut host, &IntroConfig::default().scene).unwrap();
    (host, ctx)
}

fn present(
    ctx: &mut SceneContext,
    host: &HeadlessHost,
    loader: Arc<dyn SourceLoader>,
) -> IntroResult<VideoPresenter> {
    pollster::block_on(present_video(ctx, host, loader, &IntroConfig::default()))
}

#[test]
fn plane_fills_the_frustum() {
    let mut cam = PerspectiveCamera::new(60.0, 1920.0 / 1080.0, 0.1, 1000.0).unwrap();
    cam.position = Point3::new(0.0, 0.0, 5.0);
    let size = plane_size(&cam, 5.0);
    assert!((size.height - 5.773_502_7).abs() < 1e-6);
    assert!((size.width - 10.264_004_8).abs() < 1e-6);
    assert!((size.width / size.height - cam.aspect()).abs() < 1e-12);
}

#[test]
fn presenting_adds_plane_texture_and_point_lights() {
    let (host, mut ctx) = setup(160, 90, AutoplayPolicy::MutedOnly);
    let lights_before = ctx.scene.lights().len();
    let p = present(&mut ctx, &host, pattern(2.0)).unwrap();

    assert_eq!(p.media().state(), PlaybackState::Playing);
    assert_eq!(ctx.scene.lights().len(), lights_before + 3);

    let mesh = ctx.scene.mesh(p.mesh_id()).unwrap();
    assert_eq!(mesh.position, Point3::origin());
    assert_eq!(mesh.material.map, Some(p.texture_id()));
    assert_eq!(mesh.material.emissive_map, Some(p.texture_id()));
    assert_eq!(mesh.material.side, Side::Double);
    assert!(mesh.material.transparent);
    assert_eq!(mesh.material.opacity, 0.0);
    assert_eq!(mesh.material.color, Rgb::splat(1.4));

    let geom = mesh.geometry();
    let expected = plane_size(&ctx.camera, 5.0);
    assert!((geom.width() - expected.width).abs() < 1e-12);
    assert!((geom.width() / geom.height() - ctx.camera.aspect()).abs() < 1e-9);

    let tex = ctx.scene.texture(p.texture_id()).unwrap();
    assert_eq!((tex.width(), tex.height()), (8, 4));
    assert_eq!(tex.version(), 1);
}

#[test]
fn load_failure_leaves_the_scene_untouched() {
    let (host, mut ctx) = setup(16, 9, AutoplayPolicy::Allowed);
    let lights_before = ctx.scene.lights().len();
    let err = present(&mut ctx, &host, Arc::new(FailingLoader)).unwrap_err();
    assert!(matches!(err, IntroError::Load(_)));
    assert!(ctx.scene.meshes().is_empty());
    assert_eq!(ctx.scene.lights().len(), lights_before);
}

#[test]
fn blocked_autoplay_is_a_playback_error() {
    let (host, mut ctx) = setup(16, 9, AutoplayPolicy::Blocked);
    let err = present(&mut ctx, &host, pattern(1.0)).unwrap_err();
    assert!(matches!(err, IntroError::Playback(_)));
    assert!(ctx.scene.meshes().is_empty());
}

#[test]
fn update_fades_in_and_uploads_frames() {
    let (host, mut ctx) = setup(16, 9, AutoplayPolicy::Allowed);
    let mut p = present(&mut ctx, &host, pattern(5.0)).unwrap();

    p.update(&mut ctx, 0.0, 0.0).unwrap();
    let mesh = p.mesh_id();
    let opacity = |ctx: &SceneContext| ctx.scene.mesh(mesh).unwrap().material.opacity;
    assert_eq!(opacity(&ctx), 0.0);
    let v0 = ctx.scene.texture(p.texture_id()).unwrap().version();

    p.update(&mut ctx, 0.75, 0.75).unwrap();
    let mid = opacity(&ctx);
    assert!(mid > 0.5 && mid < 1.0, "{mid}");

    p.update(&mut ctx, 2.0, 1.25).unwrap();
    assert_eq!(opacity(&ctx), 1.0);
    assert_eq!(ctx.scene.texture(p.texture_id()).unwrap().version(), v0 + 2);
}

#[test]
fn ended_reveals_once_and_pins_before_the_end() {
    let (host, mut ctx) = setup(16, 9, AutoplayPolicy::Allowed);
    let mut p = present(&mut ctx, &host, pattern(1.0)).unwrap();
    let mut reveal = RevealTransition::new(&RevealConfig::default()).unwrap();
    let mut region = ContentRegion::hidden(RevealConfig::default().hidden);

    let events = p.update(&mut ctx, 1.5, 1.5).unwrap();
    assert!(events.contains(&MediaEvent::Ended));

    assert!(p.handle_ended(&mut reveal, &mut region, 1.5).unwrap());
    assert!(region.visible);
    assert!((p.media().current_time() - 0.99).abs() < 1e-12);

    assert!(!p.handle_ended(&mut reveal, &mut region, 1.6).unwrap());
    assert!(p.media().current_time() <= 1.0 - 0.01 + 1e-12);

    let events = p.update(&mut ctx, 2.0, 0.4).unwrap();
    assert!(!events.contains(&MediaEvent::Ended));
}

#[test]
fn resize_replaces_and_disposes_geometry() {
    let (host, mut ctx) = setup(100, 100, AutoplayPolicy::Allowed);
    let mut p = present(&mut ctx, &host, pattern(1.0)).unwrap();
    let old = ctx.scene.mesh(p.mesh_id()).unwrap().geometry().id();
    ctx.renderer.render(&ctx.scene, &ctx.camera).unwrap();
    assert_eq!(ctx.renderer.cached_geometries(), vec![old]);

    p.handle_resize(&mut ctx, Viewport::new(200, 50).unwrap())
        .unwrap();

    let geom = ctx.scene.mesh(p.mesh_id()).unwrap().geometry();
    assert_ne!(geom.id(), old);
    assert!((ctx.camera.aspect() - 4.0).abs() < 1e-12);
    assert!((geom.width() / geom.height() - 4.0).abs() < 1e-9);
    assert!(ctx.renderer.cached_geometries().is_empty());
}
