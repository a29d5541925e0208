//! Normalization of paint-related property values.

use std::collections::BTreeMap;

use crate::parser::animation_attrs::format_number;
use crate::parser::number::parse_float_prefix;
use crate::style::color::Color;

/// Property name to raw value, as read from markup.
pub type RawProps = BTreeMap<String, String>;

/// Turns raw paint values into the representation scene objects store.
///
/// Used when an animation value is not numeric, so that `values="red;blue"` ends up as
/// the same color strings an instantiated object carries.
pub trait PaintNormalizer {
    fn normalize(&self, props: RawProps) -> RawProps;
}

/// `fill`/`stroke` become `rgba(...)` with the matching `fillOpacity`/`strokeOpacity`
/// folded into alpha; `opacity` values are clamped to `0..=1`. `url(...)` paints and values
/// that are not colors pass through untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultPaintNormalizer;

impl DefaultPaintNormalizer {
    fn paint(value: &str, opacity: Option<f64>) -> Option<String> {
        if value.trim_start().starts_with("url(") {
            return None;
        }
        let mut color = Color::parse(value)?;
        if let Some(o) = opacity {
            color.a = ((color.a * o.clamp(0.0, 1.0)) * 100.0).round() / 100.0;
        }
        Some(color.to_rgba_string())
    }
}

impl PaintNormalizer for DefaultPaintNormalizer {
    fn normalize(&self, mut props: RawProps) -> RawProps {
        for (paint, opacity_key) in [("fill", "fillOpacity"), ("stroke", "strokeOpacity")] {
            let opacity = props.get(opacity_key).and_then(|v| parse_float_prefix(v));
            if let Some(value) = props.get_mut(paint)
                && let Some(normalized) = Self::paint(value, opacity)
            {
                *value = normalized;
            }
        }
        if let Some(value) = props.get_mut("opacity")
            && let Some(o) = parse_float_prefix(value)
        {
            *value = format_number(o.clamp(0.0, 1.0));
        }
        props
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/paint.rs"]
mod tests;
