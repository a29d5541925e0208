//! QR-style decomposition of affine matrices into animatable components.

use crate::foundation::core::Affine;
use crate::transform::affine::{compose, rotate, scale, skew_x, skew_y, translate};

/// Independent components of an affine matrix.
///
/// Angles are in degrees. `compose_matrix(&qr_decompose(m))` reproduces `m` for any
/// non-singular `m`; `skew_y` is always `0` out of [`qr_decompose`] but is honored by
/// [`compose_matrix`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Decomposed {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub skew_x: f64,
    pub skew_y: f64,
    pub angle: f64,
    #[serde(default)]
    pub flip_x: bool,
    #[serde(default)]
    pub flip_y: bool,
}

/// Component selector used by the transform animation to walk a decomposition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Component {
    TranslateX,
    TranslateY,
    ScaleX,
    ScaleY,
    SkewX,
    SkewY,
    Angle,
}

impl Component {
    pub const ALL: [Component; 7] = [
        Component::TranslateX,
        Component::TranslateY,
        Component::ScaleX,
        Component::ScaleY,
        Component::SkewX,
        Component::SkewY,
        Component::Angle,
    ];
}

impl Default for Decomposed {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Decomposed {
    pub const IDENTITY: Self = Self {
        translate_x: 0.0,
        translate_y: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
        skew_x: 0.0,
        skew_y: 0.0,
        angle: 0.0,
        flip_x: false,
        flip_y: false,
    };

    /// All-zero components, the neutral element for component-wise deltas.
    pub const ZERO: Self = Self {
        translate_x: 0.0,
        translate_y: 0.0,
        scale_x: 0.0,
        scale_y: 0.0,
        skew_x: 0.0,
        skew_y: 0.0,
        angle: 0.0,
        flip_x: false,
        flip_y: false,
    };

    /// Component value, `None` when it is not a finite number.
    pub fn get(&self, c: Component) -> Option<f64> {
        let v = match c {
            Component::TranslateX => self.translate_x,
            Component::TranslateY => self.translate_y,
            Component::ScaleX => self.scale_x,
            Component::ScaleY => self.scale_y,
            Component::SkewX => self.skew_x,
            Component::SkewY => self.skew_y,
            Component::Angle => self.angle,
        };
        v.is_finite().then_some(v)
    }

    pub fn set(&mut self, c: Component, v: f64) {
        let slot = match c {
            Component::TranslateX => &mut self.translate_x,
            Component::TranslateY => &mut self.translate_y,
            Component::ScaleX => &mut self.scale_x,
            Component::ScaleY => &mut self.scale_y,
            Component::SkewX => &mut self.skew_x,
            Component::SkewY => &mut self.skew_y,
            Component::Angle => &mut self.angle,
        };
        *slot = v;
    }

    /// Component-wise `to - from` for components finite on both sides.
    pub fn delta(from: &Self, to: &Self) -> Self {
        let mut out = Self::ZERO;
        for c in Component::ALL {
            if let (Some(a), Some(b)) = (from.get(c), to.get(c)) {
                out.set(c, b - a);
            }
        }
        out
    }
}

/// Decompose `m` as `translate * rotate * scale * skewX`.
///
/// Singular matrices (zero first column) produce non-finite scale/skew components.
pub fn qr_decompose(m: Affine) -> Decomposed {
    let [a, b, c, d, e, f] = m.as_coeffs();
    let angle = b.atan2(a);
    let denom = a * a + b * b;
    let scale_x = denom.sqrt();
    let scale_y = (a * d - c * b) / scale_x;
    let skew_x = (a * c + b * d).atan2(denom);
    Decomposed {
        translate_x: e,
        translate_y: f,
        scale_x,
        scale_y,
        skew_x: skew_x.to_degrees(),
        skew_y: 0.0,
        angle: angle.to_degrees(),
        flip_x: false,
        flip_y: false,
    }
}

/// Scale/flip/skew part of a decomposition: `S(flip * scale) * Kx * Ky`.
pub fn dimensions_matrix(d: &Decomposed) -> Affine {
    let sx = if d.flip_x { -d.scale_x } else { d.scale_x };
    let sy = if d.flip_y { -d.scale_y } else { d.scale_y };
    let mut m = scale(sx, sy);
    if d.skew_x != 0.0 {
        m = compose(m, skew_x(d.skew_x));
    }
    if d.skew_y != 0.0 {
        m = compose(m, skew_y(d.skew_y));
    }
    m
}

/// Inverse of [`qr_decompose`]: `T * R * S * Kx * Ky`.
pub fn compose_matrix(d: &Decomposed) -> Affine {
    let mut m = translate(d.translate_x, d.translate_y);
    if d.angle != 0.0 {
        m = compose(m, rotate(d.angle));
    }
    let dims = dimensions_matrix(d);
    if dims != Affine::IDENTITY {
        m = compose(m, dims);
    }
    m
}

#[cfg(test)]
#[path = "../../tests/unit/transform/decompose.rs"]
mod tests;
