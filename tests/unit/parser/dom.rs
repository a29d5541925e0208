use super::*;

const SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">
  <g id="g1"><rect id="r1" width="10"/><!-- note --><text>hi</text></g>
  <use xlink:href="#r1"/>
</svg>"##;

#[test]
fn import_keeps_tags_attributes_and_text() {
    let doc = Document::parse_str(SVG).unwrap();
    let all = doc.descendants(doc.root());
    let tags: Vec<&str> = all.iter().map(|n| doc.tag(*n)).collect();
    assert_eq!(tags, ["g", "rect", "text", "use"]);
    assert_eq!(doc.attribute(all[1], "width"), Some("10"));
    assert_eq!(doc.attribute(all[3], "xlink:href"), Some("#r1"));
    assert_eq!(doc.text(all[2]), "hi");
}

#[test]
fn get_element_by_id_ignores_detached_nodes() {
    let mut doc = Document::parse_str(SVG).unwrap();
    let r1 = doc.get_element_by_id("r1").unwrap();
    doc.detach(r1);
    assert_eq!(doc.get_element_by_id("r1"), None);
    assert_eq!(doc.attribute(r1, "id"), Some("r1"));
}

#[test]
fn deep_clone_is_detached_and_independent() {
    let mut doc = Document::parse_str(SVG).unwrap();
    let g1 = doc.get_element_by_id("g1").unwrap();
    let copy = doc.deep_clone(g1);
    assert_eq!(doc.parent(copy), None);
    assert_eq!(doc.children(copy).len(), 2);
    let rect_copy = doc.children(copy)[0];
    doc.set_attribute(rect_copy, "width", "99");
    assert_eq!(doc.attribute(doc.children(g1)[0], "width"), Some("10"));
}

#[test]
fn replace_child_keeps_position() {
    let mut doc = Document::parse_str(SVG).unwrap();
    let root = doc.root();
    let first = doc.children(root)[0];
    let fresh = doc.create_element("circle");
    doc.replace_child(first, fresh);
    assert_eq!(doc.children(root)[0], fresh);
    assert_eq!(doc.parent(first), None);
}

#[test]
fn wrap_children_moves_everything_under_wrapper() {
    let mut doc = Document::parse_str(SVG).unwrap();
    let root = doc.root();
    let wrapper = doc.wrap_children(root, "g");
    assert_eq!(doc.children(root), &[wrapper]);
    assert_eq!(doc.children(wrapper).len(), 2);
    for c in doc.children(wrapper) {
        assert_eq!(doc.parent(*c), Some(wrapper));
    }
}

#[test]
fn svg_prefix_is_stripped_for_matching() {
    let mut doc = Document::new("svg");
    let r = doc.create_element("svg:rect");
    doc.append_child(doc.root(), r);
    assert_eq!(doc.element(r).tag(), "rect");
    assert_eq!(doc.elements_by_tag("rect"), vec![r]);
}
