use super::*;
use crate::transform::affine::{approx_eq, rotate, scale, skew_x, translate};

#[test]
fn empty_whitespace_and_invalid_yield_identity() {
    assert_eq!(parse_transform_attribute(""), Affine::IDENTITY);
    assert_eq!(parse_transform_attribute("   \n\t "), Affine::IDENTITY);
    assert_eq!(parse_transform_attribute("wiggle(3)"), Affine::IDENTITY);
    assert_eq!(parse_transform_attribute("translate(10,20) bogus"), Affine::IDENTITY);
    assert_eq!(parse_transform_attribute("matrix(1 2 3)"), Affine::IDENTITY);
}

#[test]
fn translate_then_rotate_composes_in_textual_order() {
    let m = parse_transform_attribute("translate(10,20) rotate(45)");
    assert!(approx_eq(m, translate(10.0, 20.0) * rotate(45.0), 1e-12));
}

#[test]
fn single_scale_argument_is_uniform() {
    let m = parse_transform_attribute("scale(2)");
    assert_eq!(m.as_coeffs(), [2.0, 0.0, 0.0, 2.0, 0.0, 0.0]);
}

#[test]
fn translate_defaults_y_to_zero() {
    let m = parse_transform_attribute("translate(5)");
    assert_eq!(m.as_coeffs(), [1.0, 0.0, 0.0, 1.0, 5.0, 0.0]);
}

#[test]
fn rotate_with_center_pivots_around_it() {
    let m = parse_transform_attribute("rotate(90 10 10)");
    let p = m * Point::new(10.0, 10.0);
    assert!((p.x - 10.0).abs() < 1e-12 && (p.y - 10.0).abs() < 1e-12);
    let q = m * Point::new(20.0, 10.0);
    assert!((q.x - 10.0).abs() < 1e-12 && (q.y - 20.0).abs() < 1e-12);
}

#[test]
fn whitespace_and_commas_are_normalized() {
    let a = parse_transform_attribute("  translate( 1 , 2 )   scale( 3 )skewX( 10 ) ");
    let b = translate(1.0, 2.0) * scale(3.0, 3.0) * skew_x(10.0);
    assert!(approx_eq(a, b, 1e-12));
}

#[test]
fn matrix_and_exponents_are_read() {
    let m = parse_transform_attribute("matrix(1e0,0,0,-1,+2.5,-.5E1)");
    assert_eq!(m.as_coeffs(), [1.0, 0.0, 0.0, -1.0, 2.5, -5.0]);
}

#[test]
fn origin_accepts_space_or_comma() {
    assert_eq!(
        parse_transform_origin_attribute("10 20"),
        Some(Point::new(10.0, 20.0))
    );
    assert_eq!(
        parse_transform_origin_attribute("10,20"),
        Some(Point::new(10.0, 20.0))
    );
    assert_eq!(
        parse_transform_origin_attribute(" 0 , 20px "),
        Some(Point::new(0.0, 20.0))
    );
}

#[test]
fn origin_needs_two_numeric_tokens() {
    assert_eq!(parse_transform_origin_attribute("10"), None);
    assert_eq!(parse_transform_origin_attribute(""), None);
    assert_eq!(parse_transform_origin_attribute("left top"), None);
    assert_eq!(parse_transform_origin_attribute("10 top"), None);
}
