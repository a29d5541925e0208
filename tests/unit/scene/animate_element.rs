use super::*;
use crate::parser::dom::Document;

fn directive(attrs: &str) -> AnimateElement {
    let doc = Document::parse_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg"><animate {attrs}/></svg>"#
    ))
    .unwrap();
    let node = doc.children(doc.root())[0];
    AnimateElement::from_element(&doc.element(node))
}

#[test]
fn reads_values_and_timing() {
    let a = directive(r#"attributeName="cx" values="0; 10 ;20" dur="2s" repeatCount="3""#);
    assert_eq!(a.attribute_name.as_deref(), Some("left"));
    assert_eq!(a.values, ["0", "10", "20"]);
    assert_eq!(a.dur, Some(2.0));
    assert_eq!(a.repeat_count, RepeatCount::Count(3));
    assert_eq!(a.step_duration(), Some(1.0));
}

#[test]
fn from_to_synthesizes_values() {
    let a = directive(r#"attributeName="opacity" from="0" by="0.5" dur="500ms""#);
    assert_eq!(a.values, ["0", "0.5"]);
    assert_eq!(a.from.as_deref(), Some("0"));
    assert_eq!(a.by.as_deref(), Some("0.5"));
    assert_eq!(a.dur, Some(0.5));
}

#[test]
fn repeat_count_edge_cases() {
    assert_eq!(RepeatCount::parse(None), RepeatCount::Count(1));
    assert_eq!(RepeatCount::parse(Some("indefinite")), RepeatCount::Indefinite);
    assert_eq!(RepeatCount::parse(Some("2.5")), RepeatCount::Count(3));
    assert_eq!(RepeatCount::parse(Some("0")), RepeatCount::Count(1));
    assert_eq!(RepeatCount::parse(Some("many")), RepeatCount::Count(1));
}

#[test]
fn unplayable_directives_have_no_step() {
    assert_eq!(directive(r#"attributeName="x" values="1" dur="1s""#).step_duration(), None);
    assert_eq!(directive(r#"attributeName="x" values="1;2""#).step_duration(), None);
    assert_eq!(directive(r#"attributeName="x" values="1;2" dur="0s""#).step_duration(), None);
}
