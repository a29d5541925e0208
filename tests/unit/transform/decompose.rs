use super::*;
use crate::transform::affine::approx_eq;

fn lcg(state: &mut u64) -> f64 {
    *state = state
        .wrapping_mul(6_364_136_223_846_793_005)
        .wrapping_add(1_442_695_040_888_963_407);
    ((*state >> 11) as f64) / ((1u64 << 53) as f64)
}

#[test]
fn identity_decomposes_to_identity() {
    assert_eq!(qr_decompose(Affine::IDENTITY), Decomposed::IDENTITY);
    assert_eq!(compose_matrix(&Decomposed::IDENTITY), Affine::IDENTITY);
}

#[test]
fn round_trip_reproduces_random_non_singular_matrices() {
    let mut state = 0x5eed_u64;
    let mut checked = 0;
    while checked < 200 {
        let coeffs: [f64; 6] = std::array::from_fn(|_| lcg(&mut state) * 20.0 - 10.0);
        let m = Affine::new(coeffs);
        if m.determinant().abs() < 1e-3 {
            continue;
        }
        let back = compose_matrix(&qr_decompose(m));
        assert!(approx_eq(m, back, 1e-9), "{m:?} != {back:?}");
        checked += 1;
    }
}

#[test]
fn pure_rotation_has_unit_scale() {
    let d = qr_decompose(crate::transform::affine::rotate(90.0));
    assert!((d.angle - 90.0).abs() < 1e-12);
    assert!((d.scale_x - 1.0).abs() < 1e-12);
    assert!((d.scale_y - 1.0).abs() < 1e-12);
    assert!(d.skew_x.abs() < 1e-12);
}

#[test]
fn mirrored_matrix_gets_negative_scale_y() {
    let d = qr_decompose(Affine::new([1.0, 0.0, 0.0, -2.0, 3.0, 4.0]));
    assert_eq!(d.scale_x, 1.0);
    assert_eq!(d.scale_y, -2.0);
    assert_eq!((d.translate_x, d.translate_y), (3.0, 4.0));
}

#[test]
fn delta_skips_non_finite_components() {
    let singular = qr_decompose(Affine::new([0.0, 0.0, 0.0, 0.0, 1.0, 2.0]));
    assert!(singular.get(Component::ScaleY).is_none());
    let delta = Decomposed::delta(&singular, &Decomposed::IDENTITY);
    assert_eq!(delta.scale_y, 0.0);
    assert_eq!(delta.translate_x, -1.0);
}
