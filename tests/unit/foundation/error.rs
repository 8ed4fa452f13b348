use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        IntroError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(IntroError::load("x").to_string().contains("load error:"));
    assert!(
        IntroError::playback("x")
            .to_string()
            .contains("playback error:")
    );
    assert!(IntroError::render("x").to_string().contains("render error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = IntroError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn io_errors_convert() {
    let err: IntroError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(err, IntroError::Io(_)));
    assert!(err.to_string().contains("gone"));
}

#[test]
fn only_load_and_playback_count_as_playback_failures() {
    assert!(IntroError::load("x").is_playback_failure());
    assert!(IntroError::playback("x").is_playback_failure());
    assert!(!IntroError::render("x").is_playback_failure());
    assert!(!IntroError::validation("x").is_playback_failure());
}
