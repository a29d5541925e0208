use super::*;
use crate::parser::dom::Document;

fn animate(attrs: &str) -> Document {
    Document::parse_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg"><animate {attrs}/></svg>"#
    ))
    .unwrap()
}

fn with_el<R>(doc: &Document, f: impl FnOnce(&Element<'_>) -> R) -> R {
    let id = doc.children(doc.root())[0];
    f(&doc.element(id))
}

#[test]
fn values_split_on_semicolons_and_stay_strings() {
    let doc = animate(r#"values="0; 10 ;red;""#);
    let values = with_el(&doc, parse_values_attribute).unwrap();
    assert_eq!(values, ["0", "10", "red"]);
}

#[test]
fn values_absent_yields_none() {
    let doc = animate(r#"from="1" to="2""#);
    assert_eq!(with_el(&doc, parse_values_attribute), None);
}

#[test]
fn attribute_names_map_through_table() {
    assert_eq!(svg_to_property_name("cx"), "left");
    assert_eq!(svg_to_property_name("y"), "top");
    assert_eq!(svg_to_property_name("stroke-width"), "strokeWidth");
    assert_eq!(svg_to_property_name("transform"), "transformMatrix");
    assert_eq!(svg_to_property_name("fill"), "fill");
    assert_eq!(svg_to_property_name("data-custom"), "data-custom");

    let doc = animate(r#"attributeName="x""#);
    assert_eq!(with_el(&doc, parse_attribute_name).as_deref(), Some("left"));
    let doc = animate(r#"dur="1""#);
    assert_eq!(with_el(&doc, parse_attribute_name), None);
}

#[test]
fn from_to_yields_two_values() {
    let doc = animate(r#"from="red" to="blue""#);
    assert_eq!(
        with_el(&doc, parse_from_to_by_attribute).unwrap(),
        ["red", "blue"]
    );
}

#[test]
fn from_by_adds_numerically() {
    let doc = animate(r#"from="10" by="5""#);
    assert_eq!(with_el(&doc, parse_from_to_by_attribute).unwrap(), ["10", "15"]);
    let doc = animate(r#"from="1.5" by="0.25""#);
    assert_eq!(with_el(&doc, parse_from_to_by_attribute).unwrap(), ["1.5", "1.75"]);
}

#[test]
fn from_by_with_non_numeric_from_fails_softly() {
    let doc = animate(r#"from="red" by="5""#);
    assert_eq!(with_el(&doc, parse_from_to_by_attribute), None);
}

#[test]
fn from_to_by_needs_from_and_yields_to_values() {
    let doc = animate(r#"to="5""#);
    assert_eq!(with_el(&doc, parse_from_to_by_attribute), None);
    let doc = animate(r#"from="5""#);
    assert_eq!(with_el(&doc, parse_from_to_by_attribute), None);
    let doc = animate(r#"values="1;2" from="0" to="3""#);
    assert_eq!(with_el(&doc, parse_from_to_by_attribute), None);
}
