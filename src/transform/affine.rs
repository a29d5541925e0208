//! Affine transform helpers.
//!
//! Matrices use the SVG coefficient order `[a, b, c, d, e, f]`, which is also
//! [`kurbo::Affine`]'s. Composition is `a * b`: `b` is applied to a point first.

use crate::foundation::core::{Affine, Point};

#[inline]
pub fn compose(a: Affine, b: Affine) -> Affine {
    a * b
}

#[inline]
pub fn identity() -> Affine {
    Affine::IDENTITY
}

/// Multiply matrices in list order: `m[0] * m[1] * ... * m[n-1]`.
pub fn compose_all<I>(matrices: I) -> Affine
where
    I: IntoIterator<Item = Affine>,
{
    matrices.into_iter().fold(identity(), compose)
}

/// `(cos, sin)` of an angle in degrees, exact at multiples of a quarter turn.
pub fn cos_sin_deg(angle_deg: f64) -> (f64, f64) {
    if angle_deg % 90.0 == 0.0 {
        return match (angle_deg / 90.0).rem_euclid(4.0) as u8 {
            0 => (1.0, 0.0),
            1 => (0.0, 1.0),
            2 => (-1.0, 0.0),
            _ => (0.0, -1.0),
        };
    }
    let rad = angle_deg.to_radians();
    (rad.cos(), rad.sin())
}

pub fn translate(x: f64, y: f64) -> Affine {
    Affine::new([1.0, 0.0, 0.0, 1.0, x, y])
}

pub fn scale(x: f64, y: f64) -> Affine {
    Affine::new([x, 0.0, 0.0, y, 0.0, 0.0])
}

/// Rotation by `angle_deg` about `center`: `T(c) * R * T(-c)`.
pub fn rotate_about(angle_deg: f64, center: Point) -> Affine {
    let (cos, sin) = cos_sin_deg(angle_deg);
    let Point { x, y } = center;
    Affine::new([
        cos,
        sin,
        -sin,
        cos,
        x - (cos * x - sin * y),
        y - (sin * x + cos * y),
    ])
}

pub fn rotate(angle_deg: f64) -> Affine {
    rotate_about(angle_deg, Point::ORIGIN)
}

pub fn skew_x(angle_deg: f64) -> Affine {
    Affine::new([1.0, 0.0, angle_deg.to_radians().tan(), 1.0, 0.0, 0.0])
}

pub fn skew_y(angle_deg: f64) -> Affine {
    Affine::new([1.0, angle_deg.to_radians().tan(), 0.0, 1.0, 0.0, 0.0])
}

/// Approximate equality on all six coefficients.
pub fn approx_eq(a: Affine, b: Affine, eps: f64) -> bool {
    a.as_coeffs()
        .iter()
        .zip(b.as_coeffs().iter())
        .all(|(x, y)| (x - y).abs() <= eps)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/affine.rs"]
mod tests;
