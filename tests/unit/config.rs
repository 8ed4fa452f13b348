use super::*;

#[test]
fn defaults_are_valid() {
    IntroConfig::default().validate().unwrap();
}

#[test]
fn empty_object_is_a_full_config() {
    let cfg: IntroConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg, IntroConfig::default());
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let cfg: IntroConfig = serde_json::from_str(
        r#"{
            "scene": { "camera": { "fov_deg": 60.0 } },
            "reveal": { "steps": [
                { "role": "heading", "duration": 1.0 },
                { "role": "tagline", "duration": 1.0, "position": "-=0.25", "ease": "power2.out" }
            ] }
        }"#,
    )
    .unwrap();
    cfg.validate().unwrap();
    assert_eq!(cfg.scene.camera.fov_deg, 60.0);
    assert_eq!(cfg.scene.camera.distance, 5.0);
    assert_eq!(cfg.reveal.steps.len(), 2);
    assert_eq!(cfg.reveal.steps[0].position, Position::AfterPrevious);
    assert_eq!(cfg.reveal.steps[1].position, Position::Overlap(0.25));
    assert_eq!(cfg.reveal.steps[1].ease, Ease::OutCubic);
}

#[test]
fn unknown_fields_are_rejected() {
    assert!(serde_json::from_str::<IntroConfig>(r#"{ "vidoe": {} }"#).is_err());
}

#[test]
fn out_of_range_values_fail_validation() {
    let mut cfg = IntroConfig::default();
    cfg.scene.camera.fov_deg = 190.0;
    assert!(cfg.validate().is_err());

    let mut cfg = IntroConfig::default();
    cfg.scene.camera.distance = 5000.0;
    assert!(cfg.validate().is_err());

    let mut cfg = IntroConfig::default();
    cfg.video.end_epsilon_secs = -1.0;
    assert!(cfg.validate().is_err());

    let mut cfg = IntroConfig::default();
    cfg.scene.renderer.max_pixel_ratio = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = IntroConfig::default();
    cfg.reveal.container_fade = Some(FadeConfig {
        duration: f64::NAN,
        ease: Ease::Linear,
    });
    assert!(cfg.validate().is_err());
}

#[test]
fn container_fade_can_be_disabled() {
    let cfg: IntroConfig =
        serde_json::from_str(r#"{ "reveal": { "container_fade": null } }"#).unwrap();
    cfg.validate().unwrap();
    assert_eq!(cfg.reveal.container_fade, None);
    assert_eq!(
        RevealConfig::default().container_fade,
        Some(FadeConfig {
            duration: 1.0,
            ease: Ease::OutCubic
        })
    );
}

#[test]
fn repeated_reveal_roles_fail_validation() {
    let mut cfg = IntroConfig::default();
    let first = cfg.reveal.steps[0].clone();
    cfg.reveal.steps.push(first);
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("repeats role"));
}

#[test]
fn default_reveal_matches_staggered_layout() {
    let steps = RevealConfig::default().steps;
    let roles: Vec<_> = steps.iter().map(|s| s.role).collect();
    assert_eq!(
        roles,
        [
            ContentRole::Heading,
            ContentRole::Tagline,
            ContentRole::CallToAction
        ]
    );
    assert_eq!(steps[1].position, Position::Overlap(0.7));
}

#[test]
fn missing_config_file_reports_path() {
    let err = IntroConfig::from_json_path(Path::new("does/not/exist.json")).unwrap_err();
    assert!(err.to_string().contains("does/not/exist.json"));
}
