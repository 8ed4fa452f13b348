use super::*;

#[test]
fn viewport_rejects_empty_dimensions() {
    assert!(Viewport::new(0, 10).is_err());
    assert!(Viewport::new(10, 0).is_err());
    assert!(Viewport::with_pixel_ratio(10, 10, 0.0).is_err());
    assert!(Viewport::with_pixel_ratio(10, 10, f64::NAN).is_err());
}

#[test]
fn viewport_aspect_and_drawing_buffer() {
    let vp = Viewport::with_pixel_ratio(1920, 1080, 2.0).unwrap();
    assert!((vp.aspect() - 16.0 / 9.0).abs() < 1e-12);
    assert_eq!(vp.drawing_buffer(2.0), (3840, 2160));
    assert_eq!(vp.drawing_buffer(1.5), (2880, 1620));
}

#[test]
fn fps_frames_secs_roundtrip_floor() {
    let fps = Fps::new(30000, 1001).unwrap();
    let secs = fps.frames_to_secs(123);
    assert_eq!(fps.secs_to_frames_floor(secs), 123);
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn srgb_transfer_roundtrips_midtones() {
    for v in [0.0, 0.02, 0.2, 0.5, 0.8, 1.0] {
        let back = linear_to_srgb(srgb_to_linear(v));
        assert!((back - v).abs() < 1e-9, "{v} -> {back}");
    }
}

#[test]
fn hex_decodes_to_linear() {
    assert_eq!(Rgb::from_hex(0xffffff), Rgb::WHITE);
    assert_eq!(Rgb::from_hex(0x000000), Rgb::BLACK);
    let gray = Rgb::from_hex(0x444444);
    assert!(gray.r > 0.05 && gray.r < 0.06);
    assert_eq!(gray.r, gray.b);
}
