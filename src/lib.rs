//! svgmotion turns SVG documents into animatable scene graphs.
//!
//! # Pipeline overview
//!
//! 1. **Import**: markup -> [`Document`], an owned element arena ([`Document::parse_str`])
//! 2. **Parse**: `Document -> SvgParsingOutput` ([`SvgParser`], [`parse_svg_document`]): `<use>`
//!    inlining, viewport transforms, element filtering, batched instantiation, parent linking
//! 3. **Animate**: `<animate>` directives become keyframe sequences on an [`AnimationRegistry`],
//!    which the caller drives with [`AnimationRegistry::tick`]
//!
//! Transform attributes are parsed into [`Affine`] matrices. Whole-matrix animations interpolate
//! the decomposed components ([`Decomposed`]) instead of raw coefficients, so rotations stay
//! rigid halfway through.
//!
//! Parsing is best effort: bad attributes fall back to documented defaults, dangling references
//! are dropped, and elements that fail to instantiate leave an empty slot in the scene graph.
#![forbid(unsafe_code)]

mod animation;
mod foundation;
mod parser;
mod scene;
mod style;

/// Matrix helpers: primitive transforms, composition and decomposition.
pub mod transform;

pub use animation::animatable::{
    Animatable, COLOR_PROPERTIES, TRANSFORM_MATRIX_KEY, interpolation_for, is_transform_key,
};
pub use animation::ease::Ease;
pub use animation::registry::AnimationRegistry;
pub use animation::sequencer::{SequenceId, SequenceState, SequenceStep, Sequencer};
pub use animation::task::{
    AbortPredicate, AnimationCallback, AnimationOptions, AnimationTask, Interpolation, TaskId,
};
pub use animation::transform_anim::TransformAnimation;
pub use foundation::core::{AbortSignal, Affine, CrossOrigin, ObjectId, Point, Rect, Vec2};
pub use foundation::error::{SvgMotionError, SvgMotionResult};
pub use parser::animation_attrs::{
    parse_attribute_name, parse_from_to_by_attribute, parse_values_attribute,
    svg_to_property_name,
};
pub use parser::clip_paths::{ClipPathFragment, ClipPathMap, collect_clip_paths, url_reference};
pub use parser::document::{
    DRAWABLE_TAGS, INVALID_ANCESTOR_TAGS, ParseOptions, ParsedOptions, Reviver, SvgParser,
    SvgParsingOutput, has_invalid_ancestor, is_drawable_tag, parse_svg_document,
};
pub use parser::dom::{Document, Element, NodeId};
pub use parser::instantiate::{BasicInstantiator, ElementInstantiator, InstantiateRequest};
pub use parser::number::{parse_clock_value, parse_float_prefix, parse_unit};
pub use parser::transform_attr::{
    cleanup_svg_attribute, parse_transform_attribute, parse_transform_origin_attribute,
};
pub use parser::use_directives::{INSTANTIATED_BY_USE, parse_use_directives};
pub use parser::viewbox::{
    Align, MeetOrSlice, PreserveAspectRatio, ViewBox, Viewport, apply_viewbox_transform,
};
pub use scene::animate_element::{AnimateElement, RepeatCount};
pub use scene::graph::{SceneGraph, SceneSlot};
pub use scene::object::{ClipPath, ObjectKind, PropValue, SceneObject};
pub use style::color::Color;
pub use style::paint::{DefaultPaintNormalizer, PaintNormalizer, RawProps};
pub use transform::decompose::{Decomposed, compose_matrix, qr_decompose};
