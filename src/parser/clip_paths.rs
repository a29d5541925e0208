//! Named `<clipPath>` fragments.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::parser::dom::{Document, NodeId, local_tag};
use crate::parser::document::is_drawable_tag;

static RE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*url\(\s*['"]?#([^'")\s]+)['"]?\s*\)\s*$"#).expect("static regex"));

/// Id referenced by a `url(#id)` paint or clip value.
pub fn url_reference(value: &str) -> Option<&str> {
    RE_URL
        .captures(value)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// One `<clipPath>` element and its drawable descendants.
#[derive(Clone, Debug, PartialEq)]
pub struct ClipPathFragment {
    pub node: NodeId,
    /// The fragment's `transform` as authored, before any viewport rewriting.
    pub original_transform: String,
    pub elements: Vec<NodeId>,
}

/// Clip-path id to fragment. Captured over the whole document so references resolve
/// regardless of where the `<clipPath>` appears.
pub type ClipPathMap = BTreeMap<String, ClipPathFragment>;

/// Collect every `<clipPath>` among `descendants` that carries an `id`.
///
/// The authored transform is also stored on the node as `originalTransform`.
pub fn collect_clip_paths(doc: &mut Document, descendants: &[NodeId]) -> ClipPathMap {
    let mut out = ClipPathMap::new();
    for &node in descendants {
        if local_tag(doc.tag(node)) != "clipPath" {
            continue;
        }
        let original_transform = doc.attribute(node, "transform").unwrap_or("").to_owned();
        doc.set_attribute(node, "originalTransform", original_transform.clone());
        let Some(id) = doc.attribute(node, "id").map(str::to_owned) else {
            continue;
        };
        let elements = doc
            .descendants(node)
            .into_iter()
            .filter(|n| is_drawable_tag(doc.tag(*n)))
            .collect();
        out.entry(id).or_insert(ClipPathFragment {
            node,
            original_transform,
            elements,
        });
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/parser/clip_paths.rs"]
mod tests;
