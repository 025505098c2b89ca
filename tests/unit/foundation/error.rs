use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert_eq!(ShortsError::NoFacts.to_string(), "no trivia facts provided");
    assert!(
        ShortsError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ShortsError::render("x")
            .to_string()
            .starts_with("render error: failed to generate video:")
    );
    assert!(
        ShortsError::permission_denied("/tmp/out")
            .to_string()
            .contains("permission denied:")
    );
    assert!(
        ShortsError::OutputMissing {
            path: PathBuf::from("out.mp4")
        }
        .to_string()
        .contains("out.mp4")
    );
}

#[test]
fn permission_condition_is_distinguishable() {
    assert!(ShortsError::permission_denied("/x").is_permission_denied());
    assert!(!ShortsError::render("io").is_permission_denied());
    assert!(!ShortsError::NoFacts.is_permission_denied());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ShortsError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
