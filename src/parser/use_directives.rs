//! `<use>` inlining.

use crate::parser::clip_paths::url_reference;
use crate::parser::dom::{Document, NodeId, local_tag};
use crate::parser::viewbox::apply_viewbox_transform;

/// Marker attribute set on clones produced from a `<use>`.
pub const INSTANTIATED_BY_USE: &str = "instantiated_by_use";

const SKIP_ATTRIBUTES: [&str; 5] = ["x", "y", "xlink:href", "href", "transform"];

fn parse_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (k, v) = decl.split_once(':')?;
            let (k, v) = (k.trim(), v.trim());
            (!k.is_empty() && !v.is_empty()).then(|| (k.to_owned(), v.to_owned()))
        })
        .collect()
}

/// Merge two inline styles; declarations in `winner` override `base`.
fn merge_styles(base: &str, winner: &str) -> String {
    let mut merged = parse_style(base);
    for (k, v) in parse_style(winner) {
        match merged.iter_mut().find(|(mk, _)| *mk == k) {
            Some((_, mv)) => *mv = v,
            None => merged.push((k, v)),
        }
    }
    merged
        .into_iter()
        .map(|(k, v)| format!("{k}:{v}"))
        .collect::<Vec<_>>()
        .join(";")
}

fn href_target(doc: &Document, use_el: NodeId) -> Option<NodeId> {
    let raw = doc
        .attribute(use_el, "xlink:href")
        .or_else(|| doc.attribute(use_el, "href"))?;
    let id = raw.trim().strip_prefix('#')?;
    if id.is_empty() {
        return None;
    }
    let target = doc.get_element_by_id(id)?;
    // A <use> may not reference itself or one of its ancestors.
    if target == use_el || doc.ancestors(use_el).any(|a| a == target) {
        return None;
    }
    Some(target)
}

/// Replace every attached `<use>` with a deep copy of the element it references.
///
/// The copy gets `transform = "<use transform> <original transform> translate(x, y)"`,
/// inherits `<use>` attributes it does not define itself, loses its `id` and is marked with
/// [`INSTANTIATED_BY_USE`]. A `<use>` whose reference cannot be resolved is removed; a
/// `clip-path` on the `<use>` that cannot be resolved is not carried over.
pub fn parse_use_directives(doc: &mut Document) {
    for use_el in doc.elements_by_tag("use") {
        if doc.parent(use_el).is_none() {
            continue;
        }
        let Some(target) = href_target(doc, use_el) else {
            tracing::debug!(node = use_el.0, "dropping <use> with unresolvable href");
            doc.detach(use_el);
            continue;
        };

        let original_attrs = doc.attributes(target).to_vec();
        let use_attrs = doc.attributes(use_el).to_vec();
        let use_attr = |name: &str| {
            use_attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        };
        let original_has = |name: &str| {
            original_attrs
                .iter()
                .any(|(k, v)| k == name && !v.is_empty())
        };
        let x = use_attr("x").unwrap_or("0");
        let y = use_attr("y").unwrap_or("0");
        let current_transform = format!(
            "{} {} translate({x}, {y})",
            use_attr("transform").unwrap_or(""),
            doc.attribute(target, "transform").unwrap_or("")
        );

        let mut clone = doc.deep_clone(target);
        apply_viewbox_transform(doc, clone);
        if local_tag(doc.tag(clone)) == "svg" {
            let group = doc.create_element("g");
            for (k, v) in &original_attrs {
                doc.set_attribute(group, k, v.clone());
            }
            for child in doc.children(clone).to_vec() {
                doc.append_child(group, child);
            }
            clone = group;
        }

        for (name, value) in &use_attrs {
            if value.is_empty() || SKIP_ATTRIBUTES.contains(&name.as_str()) {
                continue;
            }
            if name == "style" {
                let original_style = doc.attribute(clone, "style").unwrap_or("").to_owned();
                doc.set_attribute(clone, "style", merge_styles(value, &original_style));
                continue;
            }
            if name == "clip-path"
                && url_reference(value).is_none_or(|id| doc.get_element_by_id(id).is_none())
            {
                tracing::debug!(node = use_el.0, clip_path = %value, "ignoring unresolvable clip-path on <use>");
                continue;
            }
            if !original_has(name) {
                doc.set_attribute(clone, name, value.clone());
            }
        }

        doc.set_attribute(clone, "transform", current_transform);
        doc.set_attribute(clone, INSTANTIATED_BY_USE, "1");
        doc.remove_attribute(clone, "id");
        doc.replace_child(use_el, clone);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parser/use_directives.rs"]
mod tests;
