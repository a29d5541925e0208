use super::*;

#[test]
fn url_reference_accepts_quotes_and_spaces() {
    assert_eq!(url_reference("url(#clip1)"), Some("clip1"));
    assert_eq!(url_reference(" url( '#a-b' ) "), Some("a-b"));
    assert_eq!(url_reference("url(\"#q\")"), Some("q"));
    assert_eq!(url_reference("#clip1"), None);
    assert_eq!(url_reference("none"), None);
}

#[test]
fn clip_paths_keep_drawables_and_authored_transform() {
    let mut doc = Document::parse_str(
        r#"<svg xmlns="http://www.w3.org/2000/svg">
            <rect clip-path="url(#c)"/>
            <defs>
              <clipPath id="c" transform="scale(2)">
                <circle r="5"/><g><rect/></g><desc>x</desc>
              </clipPath>
            </defs>
            <clipPath><rect/></clipPath>
        </svg>"#,
    )
    .unwrap();
    let all = doc.descendants(doc.root());
    let map = collect_clip_paths(&mut doc, &all);
    assert_eq!(map.len(), 1);
    let frag = &map["c"];
    assert_eq!(frag.original_transform, "scale(2)");
    let tags: Vec<&str> = frag.elements.iter().map(|n| doc.tag(*n)).collect();
    assert_eq!(tags, ["circle", "rect"]);
    assert_eq!(doc.attribute(frag.node, "originalTransform"), Some("scale(2)"));
}
