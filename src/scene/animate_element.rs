//! `<animate>` directives carried as non-rendering scene objects.

use crate::parser::animation_attrs::{
    parse_attribute_name, parse_from_to_by_attribute, parse_values_attribute,
};
use crate::parser::dom::Element;
use crate::parser::number::{parse_clock_value, parse_float_prefix};

/// How many times a directive's value list plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatCount {
    Count(u32),
    Indefinite,
}

impl Default for RepeatCount {
    fn default() -> Self {
        Self::Count(1)
    }
}

impl RepeatCount {
    /// Parse `repeatCount`. Fractional counts round up; anything that is not a positive
    /// number or `indefinite` plays once.
    pub fn parse(value: Option<&str>) -> Self {
        let Some(value) = value.map(str::trim) else {
            return Self::default();
        };
        if value == "indefinite" {
            return Self::Indefinite;
        }
        match parse_float_prefix(value) {
            Some(n) if n.is_finite() && n > 0.0 => Self::Count(n.ceil().min(u32::MAX as f64) as u32),
            _ => Self::default(),
        }
    }
}

/// Timing and value metadata of one `<animate>` element.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimateElement {
    /// Property of the parent object, already mapped from the SVG attribute name.
    pub attribute_name: Option<String>,
    /// Keyframe values; synthesized from `from`/`to`/`by` when `values` is absent.
    pub values: Vec<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub by: Option<String>,
    /// Simple duration in seconds. `None` when `dur` is missing or unparsable.
    pub dur: Option<f64>,
    #[serde(default)]
    pub repeat_count: RepeatCount,
}

impl AnimateElement {
    /// Read the directive's attributes from its element.
    pub fn from_element(el: &Element<'_>) -> Self {
        let owned = |name: &str| el.non_empty_attribute(name).map(|v| v.trim().to_owned());
        let values = parse_values_attribute(el)
            .or_else(|| parse_from_to_by_attribute(el))
            .unwrap_or_default();
        Self {
            attribute_name: parse_attribute_name(el),
            values,
            from: owned("from"),
            to: owned("to"),
            by: owned("by"),
            dur: el.non_empty_attribute("dur").and_then(parse_clock_value),
            repeat_count: RepeatCount::parse(el.non_empty_attribute("repeatCount")),
        }
    }

    /// Duration of one step between consecutive values, if the directive can play.
    pub fn step_duration(&self) -> Option<f64> {
        let dur = self.dur.filter(|d| d.is_finite() && *d > 0.0)?;
        let steps = self.values.len().checked_sub(1).filter(|n| *n > 0)?;
        Some(dur / steps as f64)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/animate_element.rs"]
mod tests;
