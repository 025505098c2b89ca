use super::*;

#[test]
fn missing_preferred_font_never_fails() {
    let cfg = ShortsConfig {
        font_path: Some("definitely/not/a/font.ttf".into()),
        ..ShortsConfig::default()
    };
    // Either a system face or an empty library; never a panic or error.
    let lib = FontLibrary::load(&cfg);
    if let Some(face) = lib.face() {
        assert!(!face.bytes.is_empty());
        assert!(face.origin.starts_with("system:"));
    }
}

#[test]
fn non_font_file_is_not_accepted_as_preferred() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bogus.ttf");
    std::fs::write(&path, b"not a font").unwrap();
    assert!(read_font_file(&path).is_none());
}

#[test]
fn empty_library_has_no_face() {
    assert!(FontLibrary::empty().face().is_none());
}
