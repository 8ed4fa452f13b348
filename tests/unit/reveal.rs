use super::*;

fn transition() -> RevealTransition {
    RevealTransition::new(&RevealConfig::default()).unwrap()
}

fn hidden_region() -> ContentRegion {
    ContentRegion::hidden(RevealConfig::default().hidden)
}

fn state(region: &ContentRegion, role: ContentRole) -> VisualState {
    region.element(role).unwrap().state
}

#[test]
fn region_starts_hidden() {
    let region = hidden_region();
    assert!(!region.visible);
    assert_eq!(region.opacity, 0.0);
    assert_eq!(region.elements.len(), 3);
    for el in &region.elements {
        assert_eq!(
            el.state,
            VisualState {
                opacity: 0.0,
                y_offset: 40.0,
                scale: 0.95
            }
        );
    }
}

#[test]
fn steps_are_staggered_with_overlap() {
    let t = transition();
    assert_eq!(t.start_of(ContentRole::Heading), Some(0.0));
    assert_eq!(t.end_of(ContentRole::Heading), Some(1.2));
    let tagline = t.start_of(ContentRole::Tagline).unwrap();
    assert!((tagline - 0.5).abs() < 1e-12);
    let cta = t.start_of(ContentRole::CallToAction).unwrap();
    assert!((cta - 1.0).abs() < 1e-12);
    assert!((t.end_of(ContentRole::CallToAction).unwrap() - 1.8).abs() < 1e-12);
}

#[test]
fn reveal_fires_once() {
    let mut t = transition();
    let mut region = hidden_region();
    assert!(!t.has_started());

    assert!(t.reveal(&mut region, 10.0));
    assert!(region.visible);
    assert_eq!(region.opacity, 0.0);

    t.tick(&mut region, 10.6);
    let snapshot = region.clone();
    assert!(!t.reveal(&mut region, 10.6));
    assert_eq!(region, snapshot);
    assert!(!t.reveal(&mut region, 20.0));
    assert_eq!(region, snapshot);
}

#[test]
fn tick_before_reveal_changes_nothing() {
    let t = transition();
    let mut region = hidden_region();
    t.tick(&mut region, 5.0);
    assert_eq!(region, hidden_region());
    assert!(!t.is_complete(100.0));
}

#[test]
fn elements_animate_to_rest() {
    let mut t = transition();
    let mut region = hidden_region();
    t.reveal(&mut region, 2.0);

    assert_eq!(state(&region, ContentRole::Heading).opacity, 0.0);

    t.tick(&mut region, 2.6);
    let heading = state(&region, ContentRole::Heading);
    assert!(heading.opacity > 0.5 && heading.opacity < 1.0);
    assert!(heading.y_offset > 0.0 && heading.y_offset < 40.0);
    assert!(state(&region, ContentRole::Tagline).opacity > 0.0);
    assert_eq!(state(&region, ContentRole::CallToAction).opacity, 0.0);

    t.tick(&mut region, 3.8);
    assert_eq!(state(&region, ContentRole::Heading), VisualState::RESTING);
    assert!(!t.is_complete(3.79));

    t.tick(&mut region, 4.0);
    assert!(t.is_complete(4.0));
    for role in ContentRole::ALL {
        assert_eq!(state(&region, role), VisualState::RESTING);
    }
}

#[test]
fn container_fades_in_after_reveal() {
    let mut t = transition();
    let mut region = hidden_region();
    t.reveal(&mut region, 10.0);

    t.tick(&mut region, 10.5);
    assert!(region.opacity > 0.0 && region.opacity < 1.0, "{}", region.opacity);

    t.tick(&mut region, 11.0);
    assert_eq!(region.opacity, 1.0);
}

#[test]
fn container_without_fade_shows_at_once() {
    let cfg = RevealConfig {
        container_fade: None,
        ..RevealConfig::default()
    };
    let mut t = RevealTransition::new(&cfg).unwrap();
    let mut region = hidden_region();
    t.reveal(&mut region, 0.0);
    assert_eq!(region.opacity, 1.0);

    let cfg = RevealConfig {
        container_fade: Some(crate::config::FadeConfig {
            duration: 0.0,
            ease: crate::animation::ease::Ease::Linear,
        }),
        ..RevealConfig::default()
    };
    let mut t = RevealTransition::new(&cfg).unwrap();
    let mut region = hidden_region();
    t.reveal(&mut region, 0.0);
    assert_eq!(region.opacity, 1.0);
}

#[test]
fn long_container_fade_delays_completion() {
    let cfg = RevealConfig {
        container_fade: Some(crate::config::FadeConfig {
            duration: 3.0,
            ease: crate::animation::ease::Ease::Linear,
        }),
        ..RevealConfig::default()
    };
    let mut t = RevealTransition::new(&cfg).unwrap();
    let mut region = hidden_region();
    t.reveal(&mut region, 0.0);
    assert!(!t.is_complete(2.0));
    t.tick(&mut region, 1.5);
    assert!((region.opacity - 0.5).abs() < 1e-12);
    assert!(t.is_complete(3.0));
}

#[test]
fn visual_state_lerps_componentwise() {
    let a = VisualState {
        opacity: 0.0,
        y_offset: 40.0,
        scale: 0.9,
    };
    let mid = VisualState::lerp(&a, &VisualState::RESTING, 0.5);
    assert_eq!(mid.opacity, 0.5);
    assert_eq!(mid.y_offset, 20.0);
    assert!((mid.scale - 0.95).abs() < 1e-12);
}
