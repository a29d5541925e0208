//! Viewport (`viewBox`, `width`/`height`, `preserveAspectRatio`) transforms.

use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::core::Affine;
use crate::parser::dom::{Document, NodeId, local_tag};
use crate::parser::number::{NUMBER, parse_unit};
use crate::parser::transform_attr::parse_transform_attribute;

const DEFAULT_FONT_SIZE: f64 = 16.0;

static RE_VIEWBOX: LazyLock<Regex> = LazyLock::new(|| {
    let n = format!(r"({NUMBER})");
    Regex::new(&format!(r"^\s*{n}[\s,]+{n}[\s,]+{n}[\s,]+{n}\s*$")).expect("static regex")
});

/// Parsed `viewBox` rectangle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn parse(value: &str) -> Option<Self> {
        let caps = RE_VIEWBOX.captures(value)?;
        let n = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<f64>().ok());
        Some(Self {
            min_x: n(1)?,
            min_y: n(2)?,
            width: n(3)?,
            height: n(4)?,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    None,
    Min,
    Mid,
    Max,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeetOrSlice {
    Meet,
    Slice,
}

/// Parsed `preserveAspectRatio`. Defaults to `xMidYMid meet`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PreserveAspectRatio {
    pub align_x: Align,
    pub align_y: Align,
    pub meet_or_slice: MeetOrSlice,
}

impl Default for PreserveAspectRatio {
    fn default() -> Self {
        Self {
            align_x: Align::Mid,
            align_y: Align::Mid,
            meet_or_slice: MeetOrSlice::Meet,
        }
    }
}

/// `xMinYMid`-style alignment keyword.
fn parse_align_pair(token: &str) -> Option<(Align, Align)> {
    let parse_align = |s: &str| match s {
        "Min" => Some(Align::Min),
        "Mid" => Some(Align::Mid),
        "Max" => Some(Align::Max),
        _ => None,
    };
    let (x, y) = token.strip_prefix('x')?.split_once('Y')?;
    Some((parse_align(x)?, parse_align(y)?))
}

impl PreserveAspectRatio {
    pub fn parse(value: &str) -> Self {
        let mut out = Self::default();
        let mut tokens = value.split_whitespace();
        let Some(align) = tokens.next() else {
            return out;
        };
        if align == "none" {
            out.align_x = Align::None;
            out.align_y = Align::None;
        } else if let Some((x, y)) = parse_align_pair(align) {
            out.align_x = x;
            out.align_y = y;
        }
        if tokens.next() == Some("slice") {
            out.meet_or_slice = MeetOrSlice::Slice;
        }
        out
    }
}

/// Viewport description of an `<svg>`-like element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub view_box: Option<ViewBox>,
    /// Matrix mapping viewBox user space into the viewport; identity when none applies.
    pub transform: Affine,
}

impl Viewport {
    fn sized(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            view_box: None,
            transform: Affine::IDENTITY,
        }
    }
}

/// Compute the viewport of `id` and push the resulting matrix into the tree.
///
/// For an `<svg>` element the children move under a new `<g>` carrying the matrix; for any
/// other element the matrix is appended to its own `transform` and `x`/`y` are consumed.
pub fn apply_viewbox_transform(doc: &mut Document, id: NodeId) -> Viewport {
    let attr = |name: &str| doc.attribute(id, name).map(str::to_owned);
    let view_box = attr("viewBox").as_deref().and_then(ViewBox::parse);
    let width_attr = attr("width");
    let height_attr = attr("height");
    let x = attr("x")
        .and_then(|v| parse_unit(&v, DEFAULT_FONT_SIZE))
        .unwrap_or(0.0);
    let y = attr("y")
        .and_then(|v| parse_unit(&v, DEFAULT_FONT_SIZE))
        .unwrap_or(0.0);
    let nested = doc.parent(id).is_some();

    let dim = |v: &Option<String>| {
        v.as_deref()
            .filter(|s| !s.is_empty() && *s != "100%")
            .and_then(|s| parse_unit(s, DEFAULT_FONT_SIZE))
    };
    let (width, height) = (dim(&width_attr), dim(&height_attr));
    let missing_dims = width.is_none() || height.is_none();

    let Some(vb) = view_box else {
        let is_svg = local_tag(doc.tag(id)) == "svg";
        if (missing_dims || is_svg) && (x != 0.0 || y != 0.0) && nested {
            let own = doc.attribute(id, "transform").unwrap_or("").to_owned();
            doc.set_attribute(id, "transform", format!("{own} translate({x} {y})"));
            doc.remove_attribute(id, "x");
            doc.remove_attribute(id, "y");
        }
        return match (width, height) {
            (Some(w), Some(h)) => Viewport::sized(w, h),
            _ => Viewport::sized(0.0, 0.0),
        };
    };

    let (min_x, min_y) = (-vb.min_x, -vb.min_y);
    let (mut scale_x, mut scale_y) = (1.0, 1.0);
    let (out_w, out_h) = match (width, height) {
        (Some(w), Some(h)) if !missing_dims => {
            scale_x = w / vb.width;
            scale_y = h / vb.height;
            (w, h)
        }
        _ => (vb.width, vb.height),
    };

    let par = PreserveAspectRatio::parse(doc.attribute(id, "preserveAspectRatio").unwrap_or(""));
    let (mut width_diff, mut height_diff) = (0.0, 0.0);
    if par.align_x != Align::None {
        let s = match par.meet_or_slice {
            MeetOrSlice::Meet => f64::min(scale_x, scale_y),
            MeetOrSlice::Slice => f64::max(scale_x, scale_y),
        };
        scale_x = s;
        scale_y = s;
        width_diff = out_w - vb.width * s;
        height_diff = out_h - vb.height * s;
        match par.align_x {
            Align::Mid => width_diff /= 2.0,
            Align::Min => width_diff = 0.0,
            _ => {}
        }
        match par.align_y {
            Align::Mid => height_diff /= 2.0,
            Align::Min => height_diff = 0.0,
            _ => {}
        }
    }

    let mut viewport = Viewport {
        width: out_w,
        height: out_h,
        view_box: Some(vb),
        transform: Affine::IDENTITY,
    };

    if scale_x == 1.0 && scale_y == 1.0 && min_x == 0.0 && min_y == 0.0 && x == 0.0 && y == 0.0
    {
        return viewport;
    }

    let translate = if (x != 0.0 || y != 0.0) && nested {
        format!(" translate({x} {y}) ")
    } else {
        String::new()
    };
    let matrix = format!(
        "{translate} matrix({scale_x} 0 0 {scale_y} {} {}) ",
        min_x * scale_x + width_diff,
        min_y * scale_y + height_diff
    );
    viewport.transform = parse_transform_attribute(&matrix);

    if local_tag(doc.tag(id)) == "svg" {
        let wrapper = doc.wrap_children(id, "g");
        doc.set_attribute(wrapper, "transform", matrix);
    } else {
        let own = doc.attribute(id, "transform").unwrap_or("").to_owned();
        doc.remove_attribute(id, "x");
        doc.remove_attribute(id, "y");
        doc.set_attribute(id, "transform", format!("{own}{matrix}"));
    }
    viewport
}

#[cfg(test)]
#[path = "../../tests/unit/parser/viewbox.rs"]
mod tests;
