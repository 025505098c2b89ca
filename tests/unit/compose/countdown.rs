use super::*;
use crate::foundation::core::Canvas;
use crate::text::fonts::FontLibrary;

#[test]
fn five_ticks_descend_with_equal_lengths() {
    let ticks = plan_countdown(5.0, 5).unwrap();
    let numerals: Vec<u32> = ticks.iter().map(|t| t.numeral).collect();
    assert_eq!(numerals, vec![5, 4, 3, 2, 1]);
    for (i, t) in ticks.iter().enumerate() {
        assert_eq!(t.duration_secs, 1.0);
        assert_eq!(t.start_secs, i as f64);
    }
}

#[test]
fn uneven_split_is_an_equal_float_division() {
    let ticks = plan_countdown(4.0, 3).unwrap();
    assert_eq!(ticks.len(), 3);
    for t in &ticks {
        assert_eq!(t.duration_secs, 4.0 / 3.0);
    }
    let total: f64 = ticks.iter().map(|t| t.duration_secs).sum();
    assert!((total - 4.0).abs() < 1e-12);
}

#[test]
fn invalid_plans_are_rejected() {
    assert!(plan_countdown(5.0, 0).is_err());
    assert!(plan_countdown(0.0, 5).is_err());
}

#[test]
fn countdown_clip_has_one_child_per_tick() {
    let cfg = ShortsConfig {
        canvas: Canvas {
            width: 108,
            height: 192,
        },
        ..ShortsConfig::default()
    };
    let mut cards = TextCardRenderer::new(&cfg, &FontLibrary::empty());
    let clip = build_countdown(&cfg, &mut cards, 5.0).unwrap();
    assert_eq!(clip.children().len(), 5);
    assert!((clip.duration_secs() - 5.0).abs() < 1e-12);
    for child in clip.children() {
        assert_eq!(child.duration_secs(), 1.0);
    }

    // Clock overlay sits horizontally centered at 60% height: its center dot is lit.
    let frame = clip.frame_at(2.5).unwrap();
    let clock_size = 21u32; // 20% of 108
    let cx = (108 - clock_size) / 2 + clock_size / 2;
    let cy = (192.0 * 0.6) as u32 + clock_size / 2;
    assert_eq!(frame.pixel(cx, cy), Some([255, 223, 0, 255]));
}
