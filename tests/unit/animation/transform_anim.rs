use super::*;
use crate::transform::affine::{approx_eq, rotate, scale, translate};

#[test]
fn identity_to_quarter_turn_stays_rigid_at_midpoint() {
    let anim = TransformAnimation::new(Affine::IDENTITY, rotate(90.0));
    let mid = anim.value_at(0.5, 1.0, Ease::Linear);
    let d = qr_decompose(mid);
    assert!((d.angle - 45.0).abs() < 1e-9);
    assert!((d.scale_x - 1.0).abs() < 1e-9);
    assert!((d.scale_y - 1.0).abs() < 1e-9);
    assert!(d.skew_x.abs() < 1e-9);

    // Naive coefficient lerp would shrink the matrix to scale ~0.707.
    let [a, b, ..] = mid.as_coeffs();
    assert!(((a * a + b * b).sqrt() - 1.0).abs() < 1e-9);
}

#[test]
fn endpoints_match_inputs() {
    let start = translate(5.0, 5.0) * scale(2.0, 1.0);
    let end = translate(-3.0, 8.0) * rotate(120.0) * scale(0.5, 3.0);
    let anim = TransformAnimation::new(start, end);
    assert!(approx_eq(anim.value_at(0.0, 2.0, Ease::InOutCubic), start, 1e-9));
    assert!(approx_eq(anim.value_at(2.0, 2.0, Ease::InOutCubic), end, 1e-9));
    assert!(approx_eq(anim.value_at(2.0, 2.0, Ease::InSine), end, 1e-9));
}

#[test]
fn translation_is_eased_linearly_in_components() {
    let anim = TransformAnimation::new(translate(0.0, 0.0), translate(100.0, -50.0));
    let m = anim.value_at(1.0, 4.0, Ease::Linear);
    assert!(approx_eq(m, translate(25.0, -12.5), 1e-12));
}

#[test]
fn singular_end_keeps_start_for_undefined_components() {
    let anim = TransformAnimation::new(Affine::IDENTITY, scale(0.0, 0.0));
    assert_eq!(anim.by().scale_y, 0.0);
    let m = anim.value_at(1.0, 1.0, Ease::Linear);
    let [a, b, c, d, e, f] = m.as_coeffs();
    assert!(a.abs() < 1e-12 && b.abs() < 1e-12 && e == 0.0 && f == 0.0);
    assert!(c.abs() < 1e-12 && (d - 1.0).abs() < 1e-12);
}
