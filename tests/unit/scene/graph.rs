use super::*;

#[test]
fn ids_are_never_reused() {
    let mut scene = Scene::new(Rgb::BLACK);
    let g1 = scene.new_plane_geometry(1.0, 1.0).unwrap();
    let g2 = scene.new_plane_geometry(1.0, 1.0).unwrap();
    assert_ne!(g1.id(), g2.id());
    let tex = scene.add_video_texture(4, 4).unwrap();
    let mesh = scene.add_mesh(g1, VideoMaterial::default(), Point3::origin());
    assert_ne!(tex.0, mesh.0);
}

#[test]
fn replace_geometry_detaches_the_old_one() {
    let mut scene = Scene::new(Rgb::BLACK);
    let g1 = scene.new_plane_geometry(2.0, 1.0).unwrap();
    let old_id = g1.id();
    let mesh = scene.add_mesh(g1, VideoMaterial::default(), Point3::origin());

    let g2 = scene.new_plane_geometry(4.0, 2.0).unwrap();
    let new_id = g2.id();
    let detached = scene.mesh_mut(mesh).unwrap().replace_geometry(g2);

    assert_eq!(detached.id(), old_id);
    let attached = scene.mesh(mesh).unwrap().geometry();
    assert_eq!(attached.id(), new_id);
    assert_eq!(attached.width(), 4.0);
}

#[test]
fn degenerate_planes_are_rejected() {
    let mut scene = Scene::new(Rgb::BLACK);
    assert!(scene.new_plane_geometry(0.0, 1.0).is_err());
    assert!(scene.new_plane_geometry(1.0, f64::NAN).is_err());
    assert!(scene.add_video_texture(0, 4).is_err());
}

#[test]
fn unknown_handles_error() {
    let mut scene = Scene::new(Rgb::BLACK);
    assert!(scene.mesh_mut(MeshId(99)).is_err());
    assert!(scene.texture_mut(TextureId(99)).is_err());
    assert!(scene.texture(TextureId(99)).is_none());
}

#[test]
fn lights_keep_insertion_order() {
    let mut scene = Scene::new(Rgb::BLACK);
    scene.add_light(Light::Ambient {
        color: Rgb::WHITE,
        intensity: 1.0,
    });
    scene.add_light(Light::Point {
        color: Rgb::WHITE,
        intensity: 1.5,
        position: Point3::new(5.0, 5.0, 5.0),
    });
    let kinds: Vec<_> = scene.lights().iter().map(Light::kind).collect();
    assert_eq!(kinds, ["ambient", "point"]);
}

#[test]
fn plane_geometry_faces_the_camera() {
    let mut scene = Scene::new(Rgb::BLACK);
    let g = scene.new_plane_geometry(2.0, 1.0).unwrap();
    assert_eq!(g.normal(), nalgebra::Vector3::z());
}
