use super::*;
use crate::media::source::VideoFrame;
use crate::scene::light::Light;
use crate::scene::mesh::VideoMaterial;

fn camera(aspect: f64) -> PerspectiveCamera {
    let mut c = PerspectiveCamera::new(60.0, aspect, 0.1, 100.0).unwrap();
    c.position = Point3::new(0.0, 0.0, 5.0);
    c
}

fn renderer(w: u32, h: u32, dpr: f64) -> CpuRenderer {
    CpuRenderer::new(
        RendererSettings::default(),
        Viewport::with_pixel_ratio(w, h, dpr).unwrap(),
    )
}

fn lit_scene() -> Scene {
    let mut scene = Scene::new(Rgb::BLACK);
    scene.add_light(Light::Ambient {
        color: Rgb::WHITE,
        intensity: PI,
    });
    scene
}

fn white_texture(scene: &mut Scene) -> TextureId {
    let id = scene.add_video_texture(2, 2).unwrap();
    let tex = scene.texture_mut(id).unwrap();
    tex.mark_needs_update();
    tex.upload(&VideoFrame {
        width: 2,
        height: 2,
        data: vec![255; 16],
    })
    .unwrap();
    id
}

fn add_plane(scene: &mut Scene, cam: &PerspectiveCamera, fraction: f64, map: TextureId) {
    let h = cam.visible_height_at(5.0) * fraction;
    let w = h * cam.aspect();
    let geom = scene.new_plane_geometry(w, h).unwrap();
    let material = VideoMaterial {
        map: Some(map),
        ..VideoMaterial::default()
    };
    scene.add_mesh(geom, material, Point3::origin());
}

#[test]
fn empty_scene_is_background() {
    let mut r = renderer(8, 4, 1.0);
    let frame = r.render(&Scene::new(Rgb::BLACK), &camera(2.0)).unwrap();
    assert_eq!((frame.width, frame.height), (8, 4));
    assert!(frame.data.chunks(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn pixel_ratio_is_capped() {
    let r = renderer(10, 5, 3.0);
    assert_eq!(r.pixel_ratio(), 2.0);
    assert_eq!(r.drawing_buffer_size(), (20, 10));
    assert_eq!(r.surface_info().css_width, 10);
}

#[test]
fn frustum_sized_plane_covers_every_pixel() {
    let cam = camera(2.0);
    let mut scene = lit_scene();
    let tex = white_texture(&mut scene);
    add_plane(&mut scene, &cam, 1.0, tex);

    let frame = renderer(16, 8, 1.0).render(&scene, &cam).unwrap();
    for (x, y) in [(0, 0), (15, 0), (0, 7), (15, 7), (8, 4)] {
        let px = frame.pixel(x, y).unwrap();
        assert!(px[0] > 200, "pixel ({x},{y}) = {px:?}");
    }
}

#[test]
fn smaller_plane_leaves_corners_clear() {
    let cam = camera(2.0);
    let mut scene = lit_scene();
    let tex = white_texture(&mut scene);
    add_plane(&mut scene, &cam, 0.5, tex);

    let frame = renderer(16, 8, 1.0).render(&scene, &cam).unwrap();
    assert_eq!(frame.pixel(0, 0).unwrap(), [0, 0, 0, 255]);
    assert!(frame.pixel(8, 4).unwrap()[0] > 200);
}

#[test]
fn back_faces_are_culled_unless_double_sided() {
    let mut cam = camera(2.0);
    cam.position = Point3::new(0.0, 0.0, -5.0);
    let mut scene = lit_scene();
    let tex = white_texture(&mut scene);
    add_plane(&mut scene, &cam, 1.0, tex);

    // The camera faces -Z from behind the plane, so nothing in front of it.
    let frame = renderer(8, 4, 1.0).render(&scene, &cam).unwrap();
    assert_eq!(frame.pixel(4, 2).unwrap(), [0, 0, 0, 255]);
}

#[test]
fn zero_opacity_transparent_material_is_invisible() {
    let cam = camera(2.0);
    let mut scene = lit_scene();
    let tex = white_texture(&mut scene);
    let geom = scene.new_plane_geometry(10.0, 10.0).unwrap();
    scene.add_mesh(
        geom,
        VideoMaterial {
            map: Some(tex),
            transparent: true,
            opacity: 0.0,
            ..VideoMaterial::default()
        },
        Point3::origin(),
    );
    let frame = renderer(8, 4, 1.0).render(&scene, &cam).unwrap();
    assert_eq!(frame.pixel(4, 2).unwrap(), [0, 0, 0, 255]);
}

#[test]
fn rendering_caches_geometry_until_disposed() {
    let cam = camera(2.0);
    let mut scene = lit_scene();
    let tex = white_texture(&mut scene);
    add_plane(&mut scene, &cam, 1.0, tex);
    let id = scene.meshes()[0].geometry().id();

    let mut r = renderer(4, 2, 1.0);
    r.render(&scene, &cam).unwrap();
    assert_eq!(r.cached_geometries(), vec![id]);
    r.dispose_geometry(id);
    assert!(r.cached_geometries().is_empty());
}

#[test]
fn missing_texture_is_a_render_error() {
    let cam = camera(2.0);
    let mut scene = lit_scene();
    add_plane(&mut scene, &cam, 1.0, TextureId(404));
    let err = renderer(4, 2, 1.0).render(&scene, &cam).unwrap_err();
    assert!(matches!(err, IntroError::Render(_)));
}

#[test]
fn aces_is_monotonic_and_bounded() {
    let mut prev = -1.0;
    for i in 0..50 {
        let v = aces_filmic(Rgb::splat(f64::from(i) * 0.2)).g;
        assert!(v >= prev);
        assert!((0.0..=1.0).contains(&v));
        prev = v;
    }
    assert!(aces_filmic(Rgb::BLACK).r < 0.01);
    assert!(aces_filmic(Rgb::splat(100.0)).r > 0.95);
}
