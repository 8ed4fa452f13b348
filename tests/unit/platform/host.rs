use super::*;

fn vp(w: u32, h: u32) -> Viewport {
    Viewport::new(w, h).unwrap()
}

#[test]
fn autoplay_policy_grants() {
    assert!(AutoplayPolicy::Allowed.grants(false));
    assert!(AutoplayPolicy::MutedOnly.grants(true));
    assert!(!AutoplayPolicy::MutedOnly.grants(false));
    assert!(!AutoplayPolicy::Blocked.grants(true));
    assert_eq!(AutoplayPolicy::default(), AutoplayPolicy::MutedOnly);
}

#[test]
fn frame_clock_ticks_until_budget_runs_out() {
    let mut host = HeadlessHost::new(vp(4, 4), 4.0, 3).unwrap();
    assert_eq!(host.next_frame(), Some(0.0));
    assert_eq!(host.next_frame(), Some(0.25));
    assert_eq!(host.next_frame(), Some(0.5));
    assert_eq!(host.next_frame(), None);
    assert_eq!(host.frames_requested(), 3);
}

#[test]
fn scheduled_resizes_arrive_with_their_frame() {
    let mut host = HeadlessHost::new(vp(4, 4), 10.0, 10).unwrap();
    host.schedule_resize(2, vp(8, 2));
    host.schedule_resize(1, vp(6, 3));

    host.next_frame();
    assert!(host.drain_events().is_empty());
    host.next_frame();
    assert_eq!(host.drain_events(), vec![HostEvent::Resize(vp(6, 3))]);
    assert_eq!(host.viewport(), vp(6, 3));
    host.next_frame();
    assert_eq!(host.drain_events(), vec![HostEvent::Resize(vp(8, 2))]);
    assert!(host.drain_events().is_empty());
}

#[test]
fn attached_surfaces_are_recorded() {
    let mut host = HeadlessHost::new(vp(4, 4), 10.0, 1)
        .unwrap()
        .with_autoplay(AutoplayPolicy::Blocked);
    assert_eq!(host.autoplay_policy(), AutoplayPolicy::Blocked);
    host.attach_surface(SurfaceInfo {
        backend: "cpu",
        css_width: 4,
        css_height: 4,
        pixel_ratio: 1.0,
    });
    assert_eq!(host.surfaces().len(), 1);
    assert_eq!(host.device_pixel_ratio(), 1.0);
}

#[test]
fn zero_fps_is_rejected() {
    assert!(HeadlessHost::new(vp(4, 4), 0.0, 1).is_err());
}
