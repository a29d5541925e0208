//! SVG document to scene graph.
//!
//! # Pipeline
//!
//! 1. inline `<use>` references
//! 2. collect descendants and apply viewport transforms top-down
//! 3. keep drawable elements outside non-rendering containers
//! 4. collect `<clipPath>` fragments
//! 5. instantiate the kept elements as one batch
//! 6. link each object to the object of its parent element
//! 7. start sequences for `<animate>` directives

use std::collections::HashMap;

use crate::animation::animatable::is_transform_key;
use crate::animation::registry::AnimationRegistry;
use crate::animation::sequencer::SequenceId;
use crate::foundation::core::{AbortSignal, CrossOrigin, ObjectId};
use crate::parser::clip_paths::collect_clip_paths;
use crate::parser::dom::{Document, Element, NodeId, local_tag};
use crate::parser::instantiate::{BasicInstantiator, ElementInstantiator, InstantiateRequest};
use crate::parser::number::parse_float_prefix;
use crate::parser::transform_attr::parse_transform_attribute;
use crate::parser::use_directives::{INSTANTIATED_BY_USE, parse_use_directives};
use crate::parser::viewbox::{Viewport, apply_viewbox_transform};
use crate::scene::animate_element::AnimateElement;
use crate::scene::graph::SceneGraph;
use crate::scene::object::{PropValue, SceneObject};
use crate::style::paint::{DefaultPaintNormalizer, PaintNormalizer, RawProps};

/// Tags that become scene objects.
pub const DRAWABLE_TAGS: [&str; 10] = [
    "path", "circle", "polygon", "polyline", "ellipse", "rect", "line", "image", "text", "animate",
];

/// Containers whose content is never rendered in place.
pub const INVALID_ANCESTOR_TAGS: [&str; 7] = [
    "pattern", "defs", "symbol", "metadata", "clipPath", "mask", "desc",
];

pub fn is_drawable_tag(tag: &str) -> bool {
    DRAWABLE_TAGS.contains(&local_tag(tag))
}

/// `true` when an ancestor is a non-rendering container that was not produced by `<use>`.
pub fn has_invalid_ancestor(doc: &Document, node: NodeId) -> bool {
    doc.ancestors(node).any(|a| {
        INVALID_ANCESTOR_TAGS.contains(&local_tag(doc.tag(a)))
            && doc.attribute(a, INSTANTIATED_BY_USE).is_none()
    })
}

/// Caller options for one parse.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ParseOptions {
    /// Policy forwarded to instantiators that fetch external resources.
    #[serde(default)]
    pub cross_origin: Option<CrossOrigin>,
    /// Checked once, on entry.
    #[serde(skip)]
    pub signal: Option<AbortSignal>,
}

/// Document-level options produced by a parse.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParsedOptions {
    /// Root viewport.
    pub viewport: Viewport,
    pub cross_origin: Option<CrossOrigin>,
}

/// Result of a parse.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SvgParsingOutput {
    /// Instantiated elements paired with their objects, in document order.
    pub scene: SceneGraph,
    /// `None` only for an aborted parse.
    pub options: Option<ParsedOptions>,
    /// Every element below the root after `<use>` inlining, kept or not.
    pub all_elements: Vec<NodeId>,
    /// Sequences started for `<animate>` directives.
    pub sequences: Vec<SequenceId>,
}

impl SvgParsingOutput {
    /// Objects aligned with [`SvgParsingOutput::elements`]; `None` marks a failed element.
    pub fn objects(&self) -> impl Iterator<Item = Option<&SceneObject>> + '_ {
        self.scene.slots().iter().map(|s| s.object.as_ref())
    }

    /// Elements that were handed to the instantiator.
    pub fn elements(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.scene.slots().iter().map(|s| s.element)
    }

    pub fn is_empty(&self) -> bool {
        self.scene.is_empty() && self.all_elements.is_empty()
    }
}

/// Per-object hook run after instantiation.
pub type Reviver<'a> = Box<dyn FnMut(Element<'_>, &mut SceneObject) + 'a>;

/// Document parser with pluggable instantiation, paint normalization and post-processing.
pub struct SvgParser<'a, I = BasicInstantiator> {
    instantiator: I,
    normalizer: Box<dyn PaintNormalizer + 'a>,
    reviver: Option<Reviver<'a>>,
}

impl Default for SvgParser<'_, BasicInstantiator> {
    fn default() -> Self {
        Self::new(BasicInstantiator)
    }
}

impl<'a, I: ElementInstantiator> SvgParser<'a, I> {
    pub fn new(instantiator: I) -> Self {
        Self {
            instantiator,
            normalizer: Box::new(DefaultPaintNormalizer),
            reviver: None,
        }
    }

    /// Normalizer applied to non-numeric `<animate>` values.
    pub fn with_normalizer(mut self, normalizer: impl PaintNormalizer + 'a) -> Self {
        self.normalizer = Box::new(normalizer);
        self
    }

    /// Called once per instantiated object with its source element.
    pub fn with_reviver(mut self, reviver: impl FnMut(Element<'_>, &mut SceneObject) + 'a) -> Self {
        self.reviver = Some(Box::new(reviver));
        self
    }

    /// Parse `doc` into a scene graph, rewriting the tree in place.
    ///
    /// Nothing in here fails: dangling references, bad attributes and failed instantiations
    /// shrink the result instead. An already aborted signal yields an empty output.
    #[tracing::instrument(skip(self, doc, registry, options))]
    pub async fn parse(
        &mut self,
        doc: &mut Document,
        registry: &mut AnimationRegistry,
        options: &ParseOptions,
    ) -> SvgParsingOutput {
        if options.signal.as_ref().is_some_and(AbortSignal::is_aborted) {
            tracing::debug!("parse aborted before start");
            return SvgParsingOutput::default();
        }

        parse_use_directives(doc);
        let root = doc.root();
        let all_elements = doc.descendants(root);
        let parsed_options = ParsedOptions {
            viewport: apply_viewbox_transform(doc, root),
            cross_origin: options.cross_origin,
        };

        let mut elements = Vec::new();
        for &node in &all_elements {
            apply_viewbox_transform(doc, node);
            if is_drawable_tag(doc.tag(node)) && !has_invalid_ancestor(doc, node) {
                elements.push(node);
            }
        }
        if elements.is_empty() {
            return SvgParsingOutput {
                options: Some(parsed_options),
                all_elements,
                ..SvgParsingOutput::default()
            };
        }

        let clip_paths = collect_clip_paths(doc, &all_elements);
        let doc: &Document = doc;
        let request = InstantiateRequest {
            elements: &elements,
            options: &parsed_options,
            signal: options.signal.as_ref(),
            document: doc,
            clip_paths: &clip_paths,
        };
        let mut objects = self.instantiator.instantiate(request).await;
        if objects.len() != elements.len() {
            tracing::warn!(
                expected = elements.len(),
                got = objects.len(),
                "instantiator returned a misaligned batch"
            );
            objects.resize_with(elements.len(), || None);
        }

        let mut scene = SceneGraph::new();
        for (node, mut object) in elements.iter().copied().zip(objects) {
            if let (Some(reviver), Some(obj)) = (self.reviver.as_mut(), object.as_mut()) {
                reviver(doc.element(node), obj);
            }
            scene.push(node, object);
        }
        link_parents(doc, &mut scene);

        let sequences = self.wire_animations(&mut scene, registry);
        tracing::debug!(
            elements = elements.len(),
            objects = scene.objects().count(),
            sequences = sequences.len(),
            "svg document parsed"
        );
        SvgParsingOutput {
            scene,
            options: Some(parsed_options),
            all_elements,
            sequences,
        }
    }

    /// Blocking wrapper around [`SvgParser::parse`].
    pub fn parse_blocking(
        &mut self,
        doc: &mut Document,
        registry: &mut AnimationRegistry,
        options: &ParseOptions,
    ) -> SvgParsingOutput {
        pollster::block_on(self.parse(doc, registry, options))
    }

    /// Normalize one directive value: numbers first, then paint, then transform lists.
    fn normalize_value(&self, key: &str, raw: &str) -> PropValue {
        if is_transform_key(key) {
            return PropValue::Matrix(parse_transform_attribute(raw));
        }
        if let Some(n) = parse_float_prefix(raw) {
            return PropValue::Number(n);
        }
        let mut props = RawProps::new();
        props.insert(key.to_owned(), raw.to_owned());
        let mut normalized = self.normalizer.normalize(props);
        PropValue::Text(normalized.remove(key).unwrap_or_else(|| raw.to_owned()))
    }

    fn wire_animations(
        &self,
        scene: &mut SceneGraph,
        registry: &mut AnimationRegistry,
    ) -> Vec<SequenceId> {
        let directives: Vec<(ObjectId, ObjectId, AnimateElement)> = scene
            .objects()
            .filter_map(|(id, obj)| Some((id, obj.parent?, obj.as_animate()?.clone())))
            .collect();

        let mut started = Vec::new();
        for (id, parent, directive) in directives {
            let Some(key) = directive.attribute_name.as_deref() else {
                tracing::debug!(object = id.0, "animate without attributeName skipped");
                continue;
            };
            if !scene.get(parent).is_some_and(SceneObject::is_animatable) {
                tracing::debug!(object = id.0, "animate parent is not animatable");
                continue;
            }
            let values: Vec<PropValue> = directive
                .values
                .iter()
                .map(|v| self.normalize_value(key, v))
                .collect();
            let Some(step) = directive.step_duration() else {
                tracing::debug!(object = id.0, values = values.len(), dur = ?directive.dur, "animate cannot play");
                continue;
            };
            match registry.start_sequence(scene, parent, key, values, step, directive.repeat_count) {
                Ok(seq) => started.push(seq),
                Err(err) => {
                    tracing::debug!(object = id.0, error = %err, "animate skipped");
                }
            }
        }
        started
    }
}

/// Point every object at the object of its parent element, when that parent was instantiated.
fn link_parents(doc: &Document, scene: &mut SceneGraph) {
    let index: HashMap<NodeId, ObjectId> = scene
        .slots()
        .iter()
        .enumerate()
        .map(|(i, s)| (s.element, ObjectId(i)))
        .collect();
    let links: Vec<Option<ObjectId>> = scene
        .slots()
        .iter()
        .map(|s| {
            doc.parent(s.element)
                .and_then(|p| index.get(&p).copied())
                .filter(|p| scene.get(*p).is_some())
        })
        .collect();
    for (slot, parent) in scene.slots_mut().iter_mut().zip(links) {
        if let Some(obj) = slot.object.as_mut() {
            obj.parent = parent;
        }
    }
}

/// Parse with [`BasicInstantiator`] and the default paint normalizer, blocking until done.
pub fn parse_svg_document(
    doc: &mut Document,
    registry: &mut AnimationRegistry,
    options: &ParseOptions,
) -> SvgParsingOutput {
    SvgParser::default().parse_blocking(doc, registry, options)
}

#[cfg(test)]
#[path = "../../tests/unit/parser/document.rs"]
mod tests;
