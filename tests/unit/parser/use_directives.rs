use super::*;
use crate::parser::transform_attr::parse_transform_attribute;

fn doc(body: &str) -> Document {
    Document::parse_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">{body}</svg>"#
    ))
    .unwrap()
}

fn tags(d: &Document) -> Vec<String> {
    d.descendants(d.root())
        .iter()
        .map(|n| d.tag(*n).to_owned())
        .collect()
}

#[test]
fn missing_reference_drops_only_the_use() {
    let mut d = doc(r##"<rect width="10"/><use href="#missing" x="50"/><circle/>"##);
    parse_use_directives(&mut d);
    assert_eq!(tags(&d), ["rect", "circle"]);
}

#[test]
fn use_is_replaced_by_marked_clone_with_translate() {
    let mut d = doc(
        r##"<defs><rect id="r" width="5" transform="scale(2)"/></defs><use xlink:href="#r" x="3" y="4" fill="red"/>"##,
    );
    parse_use_directives(&mut d);
    let clone = d.children(d.root())[1];
    assert_eq!(d.tag(clone), "rect");
    assert_eq!(d.attribute(clone, "id"), None);
    assert_eq!(d.attribute(clone, INSTANTIATED_BY_USE), Some("1"));
    assert_eq!(d.attribute(clone, "fill"), Some("red"));
    assert_eq!(d.attribute(clone, "width"), Some("5"));
    let m = parse_transform_attribute(d.attribute(clone, "transform").unwrap());
    assert_eq!(m.as_coeffs(), [2.0, 0.0, 0.0, 2.0, 6.0, 8.0]);
    // The referenced original is untouched.
    let original = d.get_element_by_id("r").unwrap();
    assert_eq!(d.attribute(original, "fill"), None);
}

#[test]
fn original_attributes_win_over_use_attributes() {
    let mut d = doc(r##"<rect id="r" fill="blue"/><use href="#r" fill="red"/>"##);
    parse_use_directives(&mut d);
    let clone = d.children(d.root())[1];
    assert_eq!(d.attribute(clone, "fill"), Some("blue"));
}

#[test]
fn styles_are_merged_with_original_winning() {
    let mut d = doc(
        r##"<rect id="r" style="fill:blue"/><use href="#r" style="fill:red;stroke:green"/>"##,
    );
    parse_use_directives(&mut d);
    let clone = d.children(d.root())[1];
    assert_eq!(d.attribute(clone, "style"), Some("fill:blue;stroke:green"));
}

#[test]
fn unresolvable_clip_path_is_ignored_but_use_survives() {
    let mut d = doc(
        r##"<defs><path id="heart" d="M0 0"/></defs><use clip-path="url(#myClip)" href="#heart" fill="red"/>"##,
    );
    parse_use_directives(&mut d);
    let clone = d.children(d.root())[1];
    assert_eq!(d.tag(clone), "path");
    assert_eq!(d.attribute(clone, "clip-path"), None);
    assert_eq!(d.attribute(clone, "fill"), Some("red"));
}

#[test]
fn resolvable_clip_path_is_kept() {
    let mut d = doc(
        r##"<clipPath id="c"><rect/></clipPath><circle id="dot"/><use clip-path="url(#c)" href="#dot"/>"##,
    );
    parse_use_directives(&mut d);
    let clone = d.children(d.root())[2];
    assert_eq!(d.attribute(clone, "clip-path"), Some("url(#c)"));
}

#[test]
fn referenced_svg_becomes_group() {
    let mut d = doc(r##"<svg id="inner"><rect/></svg><use href="#inner"/>"##);
    parse_use_directives(&mut d);
    let clone = d.children(d.root())[1];
    assert_eq!(d.tag(clone), "g");
    assert_eq!(d.tag(d.children(clone)[0]), "rect");
}

#[test]
fn self_reference_is_dropped() {
    let mut d = doc(r##"<g id="loop"><use href="#loop"/></g>"##);
    parse_use_directives(&mut d);
    assert_eq!(tags(&d), ["g"]);
}
