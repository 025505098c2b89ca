use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn premultiply_zeroes_transparent_pixels() {
    let mut px = vec![200u8, 100, 50, 0, 255, 0, 0, 128];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[0, 0, 0, 0]);
    assert_eq!(&px[4..], &[128, 0, 0, 128]);
}

#[test]
fn luma_spans_unit_range() {
    assert_eq!(luma01(0, 0, 0), 0.0);
    assert!((luma01(255, 255, 255) - 1.0).abs() < 1e-9);
}
