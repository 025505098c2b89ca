use super::*;

fn anim() -> BubbleAnimation {
    BubbleAnimation::new(&ShortsConfig::default())
}

#[test]
fn size_follows_canvas_fractions() {
    assert_eq!(anim().size(), (324, 216));
}

#[test]
fn phases_are_staggered_and_periodic() {
    let a = anim();
    let at0 = a.bubbles_at(0.0);
    assert_eq!(at0[0].alpha, 127);
    assert!(at0[1].alpha > at0[0].alpha);
    // Offset by π: the last bubble mirrors the first.
    assert!((i32::from(at0[3].alpha) - 127).abs() <= 1);

    let later = a.bubbles_at(1.0);
    for (x, y) in at0.iter().zip(later.iter()) {
        assert!((x.center.y - y.center.y).abs() <= 1.0);
        assert!((i32::from(x.alpha) - i32::from(y.alpha)).abs() <= 1);
    }
}

#[test]
fn vertical_bob_is_bounded() {
    let a = anim();
    for i in 0..40 {
        let t = f64::from(i) * 0.025;
        for (b, (_, y_ratio, _, _)) in a.bubbles_at(t).iter().zip(BUBBLES.iter()) {
            let base = (216.0 * y_ratio).trunc();
            assert!((b.center.y - base).abs() <= BOB_PX);
        }
    }
}

#[test]
fn frames_are_idempotent_and_opaque() {
    let a = anim();
    let f1 = a.frame_at(0.3).unwrap();
    let f2 = a.frame_at(0.3).unwrap();
    assert_eq!(f1, f2);
    assert!(f1.is_opaque());
    assert_ne!(f1, a.frame_at(0.55).unwrap());
}
