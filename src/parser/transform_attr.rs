//! `transform` and `transform-origin` attribute parsing.
//!
//! <http://www.w3.org/TR/SVG/coords.html#TransformAttribute>

use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::core::{Affine, Point};
use crate::parser::number::{NUMBER, parse_float_prefix};
use crate::transform::affine;

fn transform_pattern() -> String {
    let p = format!("({NUMBER})");
    let skew_x = format!(r"(skewX)\({p}\)");
    let skew_y = format!(r"(skewY)\({p}\)");
    let rotate = format!(r"(rotate)\({p}(?: {p} {p})?\)");
    let scale = format!(r"(scale)\({p}(?: {p})?\)");
    let translate = format!(r"(translate)\({p}(?: {p})?\)");
    let matrix = format!(r"(matrix)\({p} {p} {p} {p} {p} {p}\)");
    format!("(?:{matrix}|{translate}|{rotate}|{scale}|{skew_x}|{skew_y})")
}

static RE_TRANSFORM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&transform_pattern()).expect("static regex"));

static RE_TRANSFORM_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\s*(?:(?:{})*)?\s*$", transform_pattern())).expect("static regex")
});

static RE_PAREN_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*([()])\s*").expect("static regex"));

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));

static RE_ORIGIN_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,]+").expect("static regex"));

/// Commas become spaces, whitespace runs collapse to one space, ends are trimmed.
pub fn cleanup_svg_attribute(value: &str) -> String {
    let no_commas = value.replace(',', " ");
    RE_WHITESPACE.replace_all(&no_commas, " ").trim().to_owned()
}

/// Parse a `transform` attribute into one matrix.
///
/// Operations compose in textual order: `"a() b()"` yields `A * B`. An empty value, or one
/// that does not match the transform-list grammar, yields the identity matrix.
pub fn parse_transform_attribute(value: &str) -> Affine {
    let cleaned = cleanup_svg_attribute(value);
    let cleaned = RE_PAREN_SPACE.replace_all(&cleaned, "$1");

    if cleaned.is_empty() || !RE_TRANSFORM_LIST.is_match(&cleaned) {
        return affine::identity();
    }

    let mut matrices = Vec::new();
    for caps in RE_TRANSFORM.captures_iter(&cleaned) {
        let mut groups = caps.iter().skip(1).flatten().map(|m| m.as_str());
        let Some(op) = groups.next() else {
            continue;
        };
        let args: Vec<f64> = groups.filter_map(|a| a.parse::<f64>().ok()).collect();
        if let Some(m) = operation_matrix(op, &args) {
            matrices.push(m);
        }
    }

    affine::compose_all(matrices)
}

fn operation_matrix(op: &str, args: &[f64]) -> Option<Affine> {
    let m = match (op, args) {
        ("translate", [x]) => affine::translate(*x, 0.0),
        ("translate", [x, y]) => affine::translate(*x, *y),
        ("rotate", [a]) => affine::rotate(*a),
        ("rotate", [a, cx, cy]) => affine::rotate_about(*a, Point::new(*cx, *cy)),
        ("scale", [s]) => affine::scale(*s, *s),
        ("scale", [x, y]) => affine::scale(*x, *y),
        ("skewX", [a]) => affine::skew_x(*a),
        ("skewY", [a]) => affine::skew_y(*a),
        ("matrix", [a, b, c, d, e, f]) => Affine::new([*a, *b, *c, *d, *e, *f]),
        _ => return None,
    };
    Some(m)
}

/// Parse a `transform-origin` attribute (`"x y"` or `"x,y"`).
///
/// Fewer than two tokens, or a non-numeric token among the first two, yields `None` and
/// the caller keeps its previous origin.
pub fn parse_transform_origin_attribute(value: &str) -> Option<Point> {
    let tokens: Vec<&str> = RE_ORIGIN_SEPARATORS
        .split(value.trim())
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.len() < 2 {
        return None;
    }
    let x = parse_float_prefix(tokens[0])?;
    let y = parse_float_prefix(tokens[1])?;
    Some(Point::new(x, y))
}

#[cfg(test)]
#[path = "../../tests/unit/parser/transform_attr.rs"]
mod tests;
