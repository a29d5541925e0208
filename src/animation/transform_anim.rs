//! Interpolation of whole transform matrices through their decomposition.
//!
//! Lerping the six coefficients of a rotation produces a sheared, shrunken matrix halfway
//! through. Easing translate/scale/skew/angle separately keeps intermediate frames rigid.

use crate::animation::ease::Ease;
use crate::foundation::core::Affine;
use crate::transform::decompose::{Component, Decomposed, compose_matrix, qr_decompose};

#[derive(Clone, Debug, PartialEq)]
pub struct TransformAnimation {
    start: Affine,
    /// Component-wise difference between the end and start decompositions.
    by: Decomposed,
}

impl TransformAnimation {
    pub fn new(start: Affine, end: Affine) -> Self {
        let by = Decomposed::delta(&qr_decompose(start), &qr_decompose(end));
        Self { start, by }
    }

    pub fn start(&self) -> Affine {
        self.start
    }

    pub fn by(&self) -> &Decomposed {
        &self.by
    }

    /// Matrix at `elapsed` seconds into a `duration`-long animation.
    ///
    /// The start matrix is decomposed on every call. Components that are not finite on both
    /// sides (singular matrices) keep their start value.
    pub fn value_at(&self, elapsed: f64, duration: f64, easing: Ease) -> Affine {
        let from = qr_decompose(self.start);
        let mut current = from;
        for c in Component::ALL {
            if let (Some(start), Some(delta)) = (from.get(c), self.by.get(c)) {
                current.set(c, easing.interpolate(elapsed, start, delta, duration));
            }
        }
        compose_matrix(&current)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/transform_anim.rs"]
mod tests;
