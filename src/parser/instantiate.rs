//! Turning filtered elements into scene objects.

use std::future::Future;

use kurbo::{BezPath, Shape};

use crate::foundation::core::{Affine, AbortSignal, Point, Rect};
use crate::parser::clip_paths::{ClipPathMap, url_reference};
use crate::parser::document::ParsedOptions;
use crate::parser::dom::{Document, NodeId, local_tag};
use crate::parser::number::{parse_float_prefix, parse_unit};
use crate::parser::transform_attr::{parse_transform_attribute, parse_transform_origin_attribute};
use crate::scene::animate_element::AnimateElement;
use crate::scene::object::{ClipPath, PropValue, SceneObject};
use crate::style::paint::{DefaultPaintNormalizer, PaintNormalizer, RawProps};
use crate::transform::affine::translate;

const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Everything an instantiator sees for one parse.
#[derive(Clone, Copy, Debug)]
pub struct InstantiateRequest<'a> {
    /// Elements to instantiate, in document order.
    pub elements: &'a [NodeId],
    pub options: &'a ParsedOptions,
    pub signal: Option<&'a AbortSignal>,
    pub document: &'a Document,
    pub clip_paths: &'a ClipPathMap,
}

/// Creates scene objects for a batch of elements.
///
/// The returned vector must line up with `request.elements`: entry `i` is the object for
/// element `i`, or `None` when that element could not be instantiated. The future may wait
/// on external resources; the parser awaits the whole batch before linking objects.
pub trait ElementInstantiator {
    fn instantiate(
        &self,
        request: InstantiateRequest<'_>,
    ) -> impl Future<Output = Vec<Option<SceneObject>>>;
}

/// Synchronous instantiator reading geometry, paint and transforms from attributes.
///
/// Elements it cannot represent (negative sizes, unparsable path data, images without a
/// source) come back as `None`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicInstantiator;

impl ElementInstantiator for BasicInstantiator {
    fn instantiate(
        &self,
        request: InstantiateRequest<'_>,
    ) -> impl Future<Output = Vec<Option<SceneObject>>> {
        let objects: Vec<Option<SceneObject>> = request
            .elements
            .iter()
            .map(|&node| self.instantiate_one(&request, node))
            .collect();
        std::future::ready(objects)
    }
}

/// Nearest value of an inheritable presentation attribute.
fn inherited<'a>(doc: &'a Document, node: NodeId, name: &str) -> Option<&'a str> {
    std::iter::once(node)
        .chain(doc.ancestors(node))
        .find_map(|n| {
            doc.attribute(n, name)
                .map(str::trim)
                .filter(|v| !v.is_empty() && *v != "inherit")
        })
}

/// `T(origin) * transform * T(-origin)` of one element, plus the origin.
fn local_transform(doc: &Document, node: NodeId) -> (Affine, Point) {
    let origin = doc
        .attribute(node, "transform-origin")
        .and_then(parse_transform_origin_attribute)
        .unwrap_or(Point::ZERO);
    let m = doc
        .attribute(node, "transform")
        .map(parse_transform_attribute)
        .unwrap_or(Affine::IDENTITY);
    (
        translate(origin.x, origin.y) * m * translate(-origin.x, -origin.y),
        origin,
    )
}

impl BasicInstantiator {
    fn instantiate_one(&self, request: &InstantiateRequest<'_>, node: NodeId) -> Option<SceneObject> {
        let doc = request.document;
        let tag = local_tag(doc.tag(node));
        if tag == "animate" {
            return Some(SceneObject::animate(AnimateElement::from_element(
                &doc.element(node),
            )));
        }

        let mut obj = self.build_shape(doc, node, request.options)?;
        let ancestors: Vec<NodeId> = doc.ancestors(node).collect();
        let inherited_matrix = ancestors
            .iter()
            .rev()
            .fold(Affine::IDENTITY, |m, a| m * local_transform(doc, *a).0);
        let (own, origin) = local_transform(doc, node);
        obj.origin = origin;
        obj.apply_transform_matrix(inherited_matrix * own);

        if let Some(value) = doc.attribute(node, "clip-path") {
            obj.clip_path = self.resolve_clip_path(request, value);
            if obj.clip_path.is_none() {
                tracing::debug!(node = node.0, clip_path = %value, "clip-path reference not resolved");
            }
        }
        obj.set_coords();
        Some(obj)
    }

    fn resolve_clip_path(&self, request: &InstantiateRequest<'_>, value: &str) -> Option<ClipPath> {
        let id = url_reference(value)?;
        let fragment = request.clip_paths.get(id)?;
        let doc = request.document;
        let shapes = fragment
            .elements
            .iter()
            .filter_map(|&n| {
                let mut shape = self.build_shape(doc, n, request.options)?;
                let (m, origin) = local_transform(doc, n);
                shape.origin = origin;
                shape.apply_transform_matrix(m);
                shape.set_coords();
                Some(shape)
            })
            .collect();
        Some(ClipPath {
            id: id.to_owned(),
            shapes,
            transform: parse_transform_attribute(&fragment.original_transform),
        })
    }

    /// Geometry and paint of a drawable element, without transforms.
    fn build_shape(&self, doc: &Document, node: NodeId, options: &ParsedOptions) -> Option<SceneObject> {
        let tag = local_tag(doc.tag(node));
        let font_size = inherited(doc, node, "font-size")
            .and_then(|v| parse_unit(v, DEFAULT_FONT_SIZE))
            .unwrap_or(DEFAULT_FONT_SIZE);
        let num = |name: &str| {
            doc.attribute(node, name)
                .and_then(|v| parse_unit(v, font_size))
                .unwrap_or(0.0)
        };

        let mut obj = SceneObject::shape(tag);
        let bounds = match tag {
            "rect" | "image" => {
                let (w, h) = (num("width"), num("height"));
                if w < 0.0 || h < 0.0 {
                    return None;
                }
                Rect::new(num("x"), num("y"), num("x") + w, num("y") + h)
            }
            "circle" => {
                let r = num("r");
                if r < 0.0 {
                    return None;
                }
                Rect::from_center_size((num("cx"), num("cy")), (2.0 * r, 2.0 * r))
            }
            "ellipse" => {
                let (rx, ry) = (num("rx"), num("ry"));
                if rx < 0.0 || ry < 0.0 {
                    return None;
                }
                Rect::from_center_size((num("cx"), num("cy")), (2.0 * rx, 2.0 * ry))
            }
            "line" => Rect::from_points((num("x1"), num("y1")), (num("x2"), num("y2"))),
            "polygon" | "polyline" => {
                let raw = doc.attribute(node, "points").unwrap_or("");
                let coords: Vec<f64> = raw
                    .split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|s| !s.is_empty())
                    .map_while(parse_float_prefix)
                    .collect();
                let mut points = coords.chunks_exact(2).map(|p| Point::new(p[0], p[1]));
                let first = points.next()?;
                points.fold(Rect::from_points(first, first), |r, p| r.union_pt(p))
            }
            "path" => {
                let d = doc.attribute(node, "d").unwrap_or("");
                let path = match BezPath::from_svg(d) {
                    Ok(path) => path,
                    Err(err) => {
                        tracing::debug!(node = node.0, error = %err, "unparsable path data");
                        return None;
                    }
                };
                obj.extra.insert("path".to_owned(), PropValue::Text(d.to_owned()));
                path.bounding_box()
            }
            "text" => {
                let text = doc.text(node).trim();
                obj.text = Some(text.to_owned());
                obj.extra.insert("fontSize".to_owned(), PropValue::Number(font_size));
                Rect::new(num("x"), num("y") - font_size, num("x"), num("y"))
            }
            _ => return None,
        };
        obj.left = bounds.x0;
        obj.top = bounds.y0;
        obj.width = bounds.width();
        obj.height = bounds.height();

        if tag == "image" {
            let src = doc
                .attribute(node, "xlink:href")
                .or_else(|| doc.attribute(node, "href"))
                .filter(|s| !s.trim().is_empty())?;
            obj.extra.insert("src".to_owned(), PropValue::Text(src.to_owned()));
            if let Some(policy) = options.cross_origin {
                obj.extra
                    .insert("crossOrigin".to_owned(), policy.as_str().into());
            }
        }

        self.apply_paint(doc, node, &mut obj);
        obj.id = doc.attribute(node, "id").map(str::to_owned);
        Some(obj)
    }

    fn apply_paint(&self, doc: &Document, node: NodeId, obj: &mut SceneObject) {
        let mut raw = RawProps::new();
        for (attr, prop) in [
            ("fill", "fill"),
            ("stroke", "stroke"),
            ("fill-opacity", "fillOpacity"),
            ("stroke-opacity", "strokeOpacity"),
        ] {
            if let Some(v) = inherited(doc, node, attr) {
                raw.insert(prop.to_owned(), v.to_owned());
            }
        }
        let paint = DefaultPaintNormalizer.normalize(raw);
        let pick = |key: &str, default: Option<&str>| match paint.get(key).map(String::as_str) {
            Some("none") => None,
            Some(v) => Some(v.to_owned()),
            None => default.map(str::to_owned),
        };
        obj.fill = pick("fill", Some("rgb(0,0,0)"));
        obj.stroke = pick("stroke", None);

        if let Some(w) = inherited(doc, node, "stroke-width").and_then(parse_float_prefix) {
            obj.stroke_width = w;
        }
        if let Some(o) = doc.attribute(node, "opacity").and_then(parse_float_prefix) {
            obj.opacity = o.clamp(0.0, 1.0);
        }
        let hidden = doc.attribute(node, "display").map(str::trim) == Some("none")
            || matches!(inherited(doc, node, "visibility"), Some("hidden" | "collapse"));
        obj.visible = !hidden;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parser/instantiate.rs"]
mod tests;
