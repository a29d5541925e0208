//! Scene objects and their property model.

use std::collections::BTreeMap;

use crate::foundation::core::{Affine, ObjectId, Point, Rect, Vec2};
use crate::foundation::error::{SvgMotionError, SvgMotionResult};
use crate::parser::number::parse_float_prefix;
use crate::scene::animate_element::AnimateElement;
use crate::transform::affine::translate;
use crate::transform::decompose::{Decomposed, compose_matrix, qr_decompose};

/// Dynamically typed property value, addressed by property name or dotted key path.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Bool(bool),
    Number(f64),
    List(Vec<f64>),
    Text(String),
    Matrix(Affine),
    /// Nested properties, e.g. the `offsetX` under `shadow.offsetX`.
    Group(BTreeMap<String, PropValue>),
}

impl PropValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(t) => parse_float_prefix(t),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_matrix(&self) -> Option<Affine> {
        match self {
            Self::Matrix(m) => Some(*m),
            Self::List(v) if v.len() == 6 => {
                Some(Affine::new([v[0], v[1], v[2], v[3], v[4], v[5]]))
            }
            _ => None,
        }
    }
}

impl From<f64> for PropValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for PropValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for PropValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for PropValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Affine> for PropValue {
    fn from(v: Affine) -> Self {
        Self::Matrix(v)
    }
}

impl From<Vec<f64>> for PropValue {
    fn from(v: Vec<f64>) -> Self {
        Self::List(v)
    }
}

/// What an instantiated element is.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectKind {
    /// A drawable element, by local tag name.
    Shape { tag: String },
    /// A non-rendering `<animate>` directive.
    Animate(AnimateElement),
}

/// Resolved `clip-path="url(#id)"` reference.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClipPath {
    pub id: String,
    /// Drawable content of the `<clipPath>` element.
    pub shapes: Vec<SceneObject>,
    /// The `<clipPath>`'s own transform as authored.
    pub transform: Affine,
}

/// One instantiated SVG element.
///
/// Geometry (`left`, `top`, `width`, `height`) is in the object's local space. The local
/// transform is kept decomposed around `origin`, see [`SceneObject::own_matrix`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneObject {
    pub kind: ObjectKind,
    /// `id` of the source element, when it had one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: f64,
    pub opacity: f64,
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    pub origin: Point,
    pub translate: Vec2,
    pub angle: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub skew_x: f64,
    pub skew_y: f64,
    pub flip_x: bool,
    pub flip_y: bool,

    /// Structural parent in the owning scene graph.
    pub parent: Option<ObjectId>,
    /// Bounding box of the local geometry under [`SceneObject::own_matrix`].
    pub coords: Rect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip_path: Option<ClipPath>,
    /// Properties without a dedicated field.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, PropValue>,
}

impl SceneObject {
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            id: None,
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 0.0,
            fill: Some("rgb(0,0,0)".to_owned()),
            stroke: None,
            stroke_width: 1.0,
            opacity: 1.0,
            visible: true,
            text: None,
            origin: Point::ZERO,
            translate: Vec2::ZERO,
            angle: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            skew_x: 0.0,
            skew_y: 0.0,
            flip_x: false,
            flip_y: false,
            parent: None,
            coords: Rect::ZERO,
            clip_path: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn shape(tag: impl Into<String>) -> Self {
        Self::new(ObjectKind::Shape { tag: tag.into() })
    }

    pub fn animate(directive: AnimateElement) -> Self {
        let mut obj = Self::new(ObjectKind::Animate(directive));
        obj.fill = None;
        obj.visible = false;
        obj
    }

    pub fn as_animate(&self) -> Option<&AnimateElement> {
        match &self.kind {
            ObjectKind::Animate(a) => Some(a),
            ObjectKind::Shape { .. } => None,
        }
    }

    /// Transform components as a [`Decomposed`].
    pub fn decomposed(&self) -> Decomposed {
        Decomposed {
            translate_x: self.translate.x,
            translate_y: self.translate.y,
            scale_x: self.scale_x,
            scale_y: self.scale_y,
            skew_x: self.skew_x,
            skew_y: self.skew_y,
            angle: self.angle,
            flip_x: self.flip_x,
            flip_y: self.flip_y,
        }
    }

    /// Local transform: `T(origin) * compose(components) * T(-origin)`.
    pub fn own_matrix(&self) -> Affine {
        let o = self.origin.to_vec2();
        translate(o.x, o.y) * compose_matrix(&self.decomposed()) * translate(-o.x, -o.y)
    }

    /// Replace the transform components so that [`SceneObject::own_matrix`] equals `m`.
    ///
    /// The origin is kept; flips are folded into scale and angle.
    pub fn apply_transform_matrix(&mut self, m: Affine) {
        let o = self.origin.to_vec2();
        let d = qr_decompose(translate(-o.x, -o.y) * m * translate(o.x, o.y));
        self.translate = Vec2::new(d.translate_x, d.translate_y);
        self.angle = d.angle;
        self.scale_x = d.scale_x;
        self.scale_y = d.scale_y;
        self.skew_x = d.skew_x;
        self.skew_y = d.skew_y;
        self.flip_x = false;
        self.flip_y = false;
    }

    /// Recompute [`SceneObject::coords`] from geometry and transform.
    pub fn set_coords(&mut self) {
        let local = Rect::new(
            self.left,
            self.top,
            self.left + self.width,
            self.top + self.height,
        );
        self.coords = self.own_matrix().transform_rect_bbox(local);
    }

    /// Read a top-level property by name.
    pub fn get(&self, key: &str) -> Option<PropValue> {
        let num = |v: f64| Some(PropValue::Number(v));
        match key {
            "left" => num(self.left),
            "top" => num(self.top),
            "width" => num(self.width),
            "height" => num(self.height),
            "radius" => num(self.width / 2.0),
            "opacity" => num(self.opacity),
            "strokeWidth" => num(self.stroke_width),
            "angle" => num(self.angle),
            "scaleX" => num(self.scale_x),
            "scaleY" => num(self.scale_y),
            "skewX" => num(self.skew_x),
            "skewY" => num(self.skew_y),
            "originX" => num(self.origin.x),
            "originY" => num(self.origin.y),
            "translateX" => num(self.translate.x),
            "translateY" => num(self.translate.y),
            "flipX" => Some(PropValue::Bool(self.flip_x)),
            "flipY" => Some(PropValue::Bool(self.flip_y)),
            "visible" => Some(PropValue::Bool(self.visible)),
            "fill" => self.fill.clone().map(PropValue::Text),
            "stroke" => self.stroke.clone().map(PropValue::Text),
            "text" => self.text.clone().map(PropValue::Text),
            "transformMatrix" => Some(PropValue::Matrix(self.own_matrix())),
            _ => self.extra.get(key).cloned(),
        }
    }

    /// Write a top-level property by name. Derived state (size for `radius`, transform
    /// components for `transformMatrix`) is updated alongside.
    pub fn set(&mut self, key: &str, value: PropValue) -> SvgMotionResult<()> {
        let number = |value: &PropValue| {
            value.as_number().ok_or_else(|| {
                SvgMotionError::validation(format!("property \"{key}\" expects a number"))
            })
        };
        let flag = |value: &PropValue| match value {
            PropValue::Bool(b) => Ok(*b),
            PropValue::Number(n) => Ok(*n != 0.0),
            PropValue::Text(t) => Ok(!matches!(t.trim(), "" | "none" | "hidden" | "collapse" | "false")),
            _ => Err(SvgMotionError::validation(format!(
                "property \"{key}\" expects a boolean"
            ))),
        };
        let text = |value: PropValue| match value {
            PropValue::Text(t) => Ok(t),
            PropValue::Number(n) => Ok(n.to_string()),
            _ => Err(SvgMotionError::validation(format!(
                "property \"{key}\" expects text"
            ))),
        };

        match key {
            "left" => self.left = number(&value)?,
            "top" => self.top = number(&value)?,
            "width" => self.width = number(&value)?,
            "height" => self.height = number(&value)?,
            "radius" => {
                let r = number(&value)?;
                self.width = 2.0 * r;
                self.height = 2.0 * r;
            }
            "opacity" => self.opacity = number(&value)?,
            "strokeWidth" => self.stroke_width = number(&value)?,
            "angle" => self.angle = number(&value)?,
            "scaleX" => self.scale_x = number(&value)?,
            "scaleY" => self.scale_y = number(&value)?,
            "skewX" => self.skew_x = number(&value)?,
            "skewY" => self.skew_y = number(&value)?,
            "originX" => self.origin.x = number(&value)?,
            "originY" => self.origin.y = number(&value)?,
            "translateX" => self.translate.x = number(&value)?,
            "translateY" => self.translate.y = number(&value)?,
            "flipX" => self.flip_x = flag(&value)?,
            "flipY" => self.flip_y = flag(&value)?,
            "visible" => self.visible = flag(&value)?,
            "fill" => self.fill = Some(text(value)?),
            "stroke" => self.stroke = Some(text(value)?),
            "text" => self.text = Some(text(value)?),
            "transformMatrix" => {
                let m = value.as_matrix().ok_or_else(|| {
                    SvgMotionError::validation("property \"transformMatrix\" expects a matrix")
                })?;
                self.apply_transform_matrix(m);
            }
            _ => {
                self.extra.insert(key.to_owned(), value);
            }
        }
        Ok(())
    }

    /// Read a property by dotted key path (`"shadow.offsetX"`).
    pub fn get_path(&self, path: &str) -> Option<PropValue> {
        let mut segments = path.split('.');
        let mut current = self.get(segments.next()?)?;
        for segment in segments {
            current = match current {
                PropValue::Group(mut group) => group.remove(segment)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Write a property by dotted key path. Single-segment paths go through
    /// [`SceneObject::set`]; longer paths create intermediate groups as needed.
    pub fn set_path(&mut self, path: &str, value: PropValue) -> SvgMotionResult<()> {
        let Some((head, rest)) = path.split_once('.') else {
            return self.set(path, value);
        };
        let slot = self
            .extra
            .entry(head.to_owned())
            .or_insert_with(|| PropValue::Group(BTreeMap::new()));
        if set_in_group(slot, rest, value) {
            Ok(())
        } else {
            Err(SvgMotionError::validation(format!(
                "\"{path}\" does not address a nested property"
            )))
        }
    }
}

/// Returns `false` when a non-group value sits on the path.
fn set_in_group(slot: &mut PropValue, path: &str, value: PropValue) -> bool {
    let PropValue::Group(group) = slot else {
        return false;
    };
    match path.split_once('.') {
        None => {
            group.insert(path.to_owned(), value);
            true
        }
        Some((head, rest)) => {
            let next = group
                .entry(head.to_owned())
                .or_insert_with(|| PropValue::Group(BTreeMap::new()));
            set_in_group(next, rest, value)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/object.rs"]
mod tests;
