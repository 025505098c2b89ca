use super::*;

fn clock(duration: f64) -> ClockAnimation {
    ClockAnimation::new(&ShortsConfig::default(), duration).unwrap()
}

#[test]
fn hand_spans_exactly_one_revolution() {
    let c = clock(1.0);
    assert_eq!(c.hand_angle(0.0), 0.0);
    assert!((c.hand_angle(0.5) - std::f64::consts::PI).abs() < 1e-12);
    let near_end = c.hand_angle(1.0 - 1e-9);
    assert!(near_end < TAU);
    assert!((TAU - near_end) < 1e-6);
}

#[test]
fn hand_starts_pointing_up() {
    let c = clock(2.0);
    let tip = c.hand_tip(0.0);
    // size 216, margin 10: hand length (108 - 10) * 0.8
    assert!((tip.x - 108.0).abs() < 1e-9);
    assert!((tip.y - (108.0 - 78.4)).abs() < 1e-9);
    let quarter = c.hand_tip(0.5);
    assert!((quarter.x - (108.0 + 78.4)).abs() < 1e-9);
    assert!((quarter.y - 108.0).abs() < 1e-9);
}

#[test]
fn frames_are_opaque_square_and_idempotent() {
    let c = clock(1.0);
    assert_eq!(c.size(), (216, 216));
    let a = c.frame_at(0.37).unwrap();
    let b = c.frame_at(0.37).unwrap();
    assert_eq!(a, b);
    assert!(a.is_opaque());
    assert_eq!((a.width, a.height), (216, 216));
}

#[test]
fn hand_moves_between_samples() {
    let c = clock(1.0);
    let start = c.frame_at(0.0).unwrap();
    let later = c.frame_at(0.25).unwrap();
    assert_ne!(start, later);
    // Center dot is lit, the corner stays background.
    assert_eq!(start.pixel(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(start.pixel(108, 108), Some([255, 223, 0, 255]));
}

#[test]
fn non_positive_duration_is_rejected() {
    assert!(ClockAnimation::new(&ShortsConfig::default(), 0.0).is_err());
    assert!(ClockAnimation::new(&ShortsConfig::default(), f64::NAN).is_err());
}
