use super::*;

#[test]
fn compose_applies_right_operand_first() {
    let m = compose(translate(10.0, 0.0), scale(2.0, 2.0));
    assert_eq!(m * Point::new(1.0, 1.0), Point::new(12.0, 2.0));
}

#[test]
fn compose_all_of_nothing_is_identity() {
    assert_eq!(compose_all(Vec::new()), Affine::IDENTITY);
}

#[test]
fn quarter_turns_are_exact() {
    assert_eq!(rotate(90.0).as_coeffs(), [0.0, 1.0, -1.0, 0.0, 0.0, 0.0]);
    assert_eq!(rotate(180.0).as_coeffs(), [-1.0, 0.0, 0.0, -1.0, 0.0, 0.0]);
    assert_eq!(rotate(-90.0).as_coeffs(), [0.0, -1.0, 1.0, 0.0, 0.0, 0.0]);
}

#[test]
fn rotate_about_center_matches_translate_rotate_translate_back() {
    let c = Point::new(5.0, 7.0);
    let expected = translate(5.0, 7.0) * rotate(30.0) * translate(-5.0, -7.0);
    assert!(approx_eq(rotate_about(30.0, c), expected, 1e-12));
    // The center is a fixed point.
    let p = rotate_about(30.0, c) * c;
    assert!((p.x - 5.0).abs() < 1e-12 && (p.y - 7.0).abs() < 1e-12);
}

#[test]
fn skews_use_tangent() {
    let [_, _, c, _, _, _] = skew_x(45.0).as_coeffs();
    assert!((c - 1.0).abs() < 1e-12);
    let [_, b, _, _, _, _] = skew_y(45.0).as_coeffs();
    assert!((b - 1.0).abs() < 1e-12);
}
