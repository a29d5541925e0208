//! Objects whose properties can be driven by animation tasks.

use crate::animation::task::Interpolation;
use crate::animation::transform_anim::TransformAnimation;
use crate::foundation::core::Affine;
use crate::foundation::error::{SvgMotionError, SvgMotionResult};
use crate::scene::object::{ObjectKind, PropValue, SceneObject};
use crate::style::color::Color;

/// Properties interpolated as colors.
pub const COLOR_PROPERTIES: [&str; 3] = ["fill", "stroke", "backgroundColor"];

/// Canonical key of the whole-transform property.
pub const TRANSFORM_MATRIX_KEY: &str = "transformMatrix";

/// Property access used by the animation registry.
pub trait Animatable {
    /// Current value at a property name or dotted key path.
    fn animated_value(&self, key: &str) -> Option<PropValue>;

    /// Write a tick's value. Dotted paths are written through the same path; single keys go
    /// through the object's generic setter.
    fn apply_animated_value(&mut self, key: &str, value: PropValue) -> SvgMotionResult<()>;

    /// Hook run once a task completes, before its completion callback.
    fn animation_finished(&mut self);
}

impl Animatable for SceneObject {
    fn animated_value(&self, key: &str) -> Option<PropValue> {
        self.get_path(key)
    }

    fn apply_animated_value(&mut self, key: &str, value: PropValue) -> SvgMotionResult<()> {
        if key.contains('.') {
            self.set_path(key, value)
        } else {
            self.set(key, value)
        }
    }

    fn animation_finished(&mut self) {
        self.set_coords();
    }
}

impl SceneObject {
    /// Shapes are animatable; `<animate>` pseudo-objects are not.
    pub fn as_animatable_mut(&mut self) -> Option<&mut dyn Animatable> {
        match self.kind {
            ObjectKind::Shape { .. } => Some(self),
            ObjectKind::Animate(_) => None,
        }
    }

    pub fn is_animatable(&self) -> bool {
        matches!(self.kind, ObjectKind::Shape { .. })
    }
}

/// `transformMatrix` in any letter case.
pub fn is_transform_key(key: &str) -> bool {
    key.eq_ignore_ascii_case(TRANSFORM_MATRIX_KEY)
}

/// Last segment of a dotted key path.
pub fn leaf_property(key: &str) -> &str {
    key.rsplit('.').next().unwrap_or(key)
}

/// Pick the interpolation strategy for animating `key` from `start` to `end`.
///
/// Color properties interpolate colors, the transform key goes through
/// [`TransformAnimation`], everything else is numeric. A missing start value falls back to
/// transparent, identity or zero respectively.
pub fn interpolation_for(
    key: &str,
    start: Option<&PropValue>,
    end: &PropValue,
) -> SvgMotionResult<Interpolation> {
    if COLOR_PROPERTIES.contains(&leaf_property(key)) {
        let parse = |v: &PropValue| v.as_text().and_then(Color::parse);
        let end = parse(end).ok_or_else(|| {
            SvgMotionError::animation(format!("\"{key}\" end value {end:?} is not a color"))
        })?;
        let start = start.and_then(parse).unwrap_or(Color::TRANSPARENT);
        return Ok(Interpolation::Color { start, end });
    }

    if is_transform_key(key) {
        let end = end.as_matrix().ok_or_else(|| {
            SvgMotionError::animation(format!("\"{key}\" end value is not a matrix"))
        })?;
        let start = start
            .and_then(PropValue::as_matrix)
            .unwrap_or(Affine::IDENTITY);
        return Ok(Interpolation::Transform(TransformAnimation::new(start, end)));
    }

    match end {
        PropValue::List(end) => {
            let start = match start {
                Some(PropValue::List(s)) if s.len() == end.len() => s.clone(),
                Some(PropValue::List(s)) => {
                    return Err(SvgMotionError::animation(format!(
                        "\"{key}\" start has {} entries, end has {}",
                        s.len(),
                        end.len()
                    )));
                }
                _ => vec![0.0; end.len()],
            };
            let delta = start.iter().zip(end).map(|(s, e)| e - s).collect();
            Ok(Interpolation::List { start, delta })
        }
        other => {
            let end = other.as_number().ok_or_else(|| {
                SvgMotionError::animation(format!("\"{key}\" end value {other:?} is not numeric"))
            })?;
            let start = start.and_then(PropValue::as_number).unwrap_or(0.0);
            Ok(Interpolation::Number {
                start,
                delta: end - start,
            })
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/animatable.rs"]
mod tests;
