//! Attribute parsers for `<animate>` elements.

use crate::parser::dom::Element;
use crate::parser::number::parse_float_prefix;

/// Map an SVG attribute name to the scene-object property it drives.
///
/// Names missing from the table pass through unchanged.
pub fn svg_to_property_name(name: &str) -> &str {
    match name {
        "cx" | "x" => "left",
        "cy" | "y" => "top",
        "r" => "radius",
        "display" | "visibility" => "visible",
        "transform" => "transformMatrix",
        "fill-opacity" => "fillOpacity",
        "fill-rule" => "fillRule",
        "font-family" => "fontFamily",
        "font-size" => "fontSize",
        "font-style" => "fontStyle",
        "font-weight" => "fontWeight",
        "letter-spacing" => "charSpacing",
        "paint-order" => "paintFirst",
        "stroke-dasharray" => "strokeDashArray",
        "stroke-dashoffset" => "strokeDashOffset",
        "stroke-linecap" => "strokeLineCap",
        "stroke-linejoin" => "strokeLineJoin",
        "stroke-miterlimit" => "strokeMiterLimit",
        "stroke-opacity" => "strokeOpacity",
        "stroke-width" => "strokeWidth",
        "text-decoration" => "textDecoration",
        "text-anchor" => "textAnchor",
        "opacity" => "opacity",
        "clip-path" => "clipPath",
        "clip-rule" => "clipRule",
        "vector-effect" => "strokeUniform",
        "image-rendering" => "imageSmoothing",
        other => other,
    }
}

/// `attributeName`, converted to a property name. `None` when the attribute is absent.
pub fn parse_attribute_name(el: &Element<'_>) -> Option<String> {
    let raw = el.non_empty_attribute("attributeName")?;
    Some(svg_to_property_name(raw.trim()).to_owned())
}

/// `values` split on `;`. Entries are trimmed and empty ones dropped; they stay strings
/// so that color and number values can be told apart later.
pub fn parse_values_attribute(el: &Element<'_>) -> Option<Vec<String>> {
    let raw = el.non_empty_attribute("values")?;
    let values: Vec<String> = raw
        .split(';')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .collect();
    (!values.is_empty()).then_some(values)
}

/// Two-value list synthesized from `from`/`to`/`by`.
///
/// Only consulted when `values` is absent. Needs `from` plus `to` or `by`; `to` wins over
/// `by`. A `from`/`by` pair with a non-numeric `from` yields `None`.
pub fn parse_from_to_by_attribute(el: &Element<'_>) -> Option<Vec<String>> {
    if el.non_empty_attribute("values").is_some() {
        return None;
    }
    let from = el.non_empty_attribute("from")?.trim();
    if let Some(to) = el.non_empty_attribute("to") {
        return Some(vec![from.to_owned(), to.trim().to_owned()]);
    }
    let by = el.non_empty_attribute("by").and_then(parse_float_prefix)?;
    let start = parse_float_prefix(from)?;
    Some(vec![from.to_owned(), format_number(start + by)])
}

/// Shortest decimal text for `v` (`20` rather than `20.0`).
pub(crate) fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parser/animation_attrs.rs"]
mod tests;
