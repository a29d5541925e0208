use super::*;
use crate::parser::clip_paths::collect_clip_paths;
use crate::parser::viewbox::Viewport;
use crate::scene::object::ObjectKind;
use crate::transform::affine::{approx_eq, rotate_about};

fn options() -> ParsedOptions {
    ParsedOptions {
        viewport: Viewport {
            width: 100.0,
            height: 100.0,
            view_box: None,
            transform: Affine::IDENTITY,
        },
        cross_origin: Some(crate::foundation::core::CrossOrigin::Anonymous),
    }
}

fn instantiate(svg: &str, tags: &[&str]) -> (Document, Vec<Option<SceneObject>>) {
    let mut doc = Document::parse_str(svg).unwrap();
    let all = doc.descendants(doc.root());
    let clip_paths = collect_clip_paths(&mut doc, &all);
    let elements: Vec<NodeId> = all
        .iter()
        .copied()
        .filter(|n| tags.contains(&doc.tag(*n)))
        .collect();
    let opts = options();
    let objects = pollster::block_on(BasicInstantiator.instantiate(InstantiateRequest {
        elements: &elements,
        options: &opts,
        signal: None,
        document: &doc,
        clip_paths: &clip_paths,
    }));
    assert_eq!(objects.len(), elements.len());
    (doc, objects)
}

#[test]
fn reads_basic_geometry() {
    let (_, objs) = instantiate(
        r#"<svg xmlns="http://www.w3.org/2000/svg">
            <rect id="r" x="1" y="2" width="3" height="4"/>
            <circle cx="10" cy="10" r="5"/>
            <ellipse cx="0" cy="0" rx="2" ry="1"/>
            <line x1="5" y1="9" x2="1" y2="3"/>
            <polygon points="0,0 10,0 10,5"/>
            <path d="M0 0 L20 10"/>
        </svg>"#,
        &["rect", "circle", "ellipse", "line", "polygon", "path"],
    );
    let boxes: Vec<(f64, f64, f64, f64)> = objs
        .iter()
        .map(|o| {
            let o = o.as_ref().unwrap();
            (o.left, o.top, o.width, o.height)
        })
        .collect();
    assert_eq!(
        boxes,
        [
            (1.0, 2.0, 3.0, 4.0),
            (5.0, 5.0, 10.0, 10.0),
            (-2.0, -1.0, 4.0, 2.0),
            (1.0, 3.0, 4.0, 6.0),
            (0.0, 0.0, 10.0, 5.0),
            (0.0, 0.0, 20.0, 10.0),
        ]
    );
    assert_eq!(objs[0].as_ref().unwrap().id.as_deref(), Some("r"));
}

#[test]
fn invalid_elements_leave_holes() {
    let (_, objs) = instantiate(
        r#"<svg xmlns="http://www.w3.org/2000/svg">
            <rect width="-1" height="4"/>
            <image width="10" height="10"/>
            <rect width="1" height="1"/>
        </svg>"#,
        &["rect", "image"],
    );
    assert!(objs[0].is_none());
    assert!(objs[1].is_none());
    assert!(objs[2].is_some());
}

#[test]
fn paint_is_inherited_and_normalized() {
    let (_, objs) = instantiate(
        r#"<svg xmlns="http://www.w3.org/2000/svg">
            <g fill="red" fill-opacity="0.5" stroke-width="3">
              <rect width="1" height="1" stroke="blue" opacity="0.25"/>
              <rect width="1" height="1" fill="none" visibility="hidden"/>
            </g>
        </svg>"#,
        &["rect"],
    );
    let a = objs[0].as_ref().unwrap();
    assert_eq!(a.fill.as_deref(), Some("rgba(255,0,0,0.5)"));
    assert_eq!(a.stroke.as_deref(), Some("rgba(0,0,255,1)"));
    assert_eq!(a.stroke_width, 3.0);
    assert_eq!(a.opacity, 0.25);
    let b = objs[1].as_ref().unwrap();
    assert_eq!(b.fill, None);
    assert!(!b.visible);
}

#[test]
fn transforms_compose_with_ancestors_and_origin() {
    let (_, objs) = instantiate(
        r#"<svg xmlns="http://www.w3.org/2000/svg">
            <g transform="translate(100, 0)">
              <rect width="10" height="10" transform="rotate(45)" transform-origin="5 5"/>
            </g>
        </svg>"#,
        &["rect"],
    );
    let rect = objs[0].as_ref().unwrap();
    assert_eq!(rect.origin, Point::new(5.0, 5.0));
    assert!((rect.angle - 45.0).abs() < 1e-9);
    let expected = translate(100.0, 0.0) * rotate_about(45.0, Point::new(5.0, 5.0));
    assert!(approx_eq(rect.own_matrix(), expected, 1e-9));
}

#[test]
fn clip_path_references_resolve() {
    let (_, objs) = instantiate(
        r#"<svg xmlns="http://www.w3.org/2000/svg">
            <clipPath id="c" transform="scale(2)"><circle r="4"/></clipPath>
            <rect width="1" height="1" clip-path="url(#c)"/>
            <rect width="1" height="1" clip-path="url(#missing)"/>
        </svg>"#,
        &["rect"],
    );
    let clip = objs[0].as_ref().unwrap().clip_path.as_ref().unwrap();
    assert_eq!(clip.id, "c");
    assert_eq!(clip.shapes.len(), 1);
    assert_eq!(clip.shapes[0].width, 8.0);
    assert_eq!(clip.transform.as_coeffs(), [2.0, 0.0, 0.0, 2.0, 0.0, 0.0]);
    assert!(objs[1].as_ref().unwrap().clip_path.is_none());
}

#[test]
fn animate_and_text_and_image() {
    let (_, objs) = instantiate(
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">
            <text x="0" y="20" font-size="10"> Hello </text>
            <image xlink:href="a.png" width="4" height="4"/>
            <animate attributeName="x" values="0;5" dur="1s"/>
        </svg>"#,
        &["text", "image", "animate"],
    );
    let text = objs[0].as_ref().unwrap();
    assert_eq!(text.text.as_deref(), Some("Hello"));
    assert_eq!(text.get("fontSize"), Some(PropValue::Number(10.0)));

    let image = objs[1].as_ref().unwrap();
    assert_eq!(image.get("src"), Some(PropValue::Text("a.png".to_owned())));
    assert_eq!(image.get("crossOrigin"), Some(PropValue::Text("anonymous".to_owned())));

    let ObjectKind::Animate(a) = &objs[2].as_ref().unwrap().kind else {
        panic!("expected an animate directive");
    };
    assert_eq!(a.attribute_name.as_deref(), Some("left"));
    assert_eq!(a.values, ["0", "5"]);
}
