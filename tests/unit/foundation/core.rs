use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn fps_rounds_segment_lengths_to_whole_frames() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.secs_to_frames_round(6.0), 180);
    assert_eq!(fps.secs_to_frames_round(1.0), 30);
    assert_eq!(fps.secs_to_frames_round(5.0 / 3.0), 50);
    assert!((fps.frames_to_secs(45) - 1.5).abs() < 1e-12);
}

#[test]
fn canvas_width_fraction_truncates_like_pixel_sizes() {
    let canvas = Canvas {
        width: 1080,
        height: 1920,
    };
    assert_eq!(canvas.width_fraction(0.2), 216);
    assert_eq!(canvas.width_fraction(0.3), 324);
    assert_eq!(canvas.width_fraction(0.0), 1);
}
