//! Integration tests for document tree building.

use adfmd::error::Error;
use adfmd::parser::{parse_str, parse_value, ErrorMode, ParseOptions};
use adfmd::{Mark, MediaType, NodeKind};
use serde_json::{json, Value};

fn nested_quotes(depth: usize) -> Value {
    let mut node = json!({"type": "paragraph", "content": [{"type": "text", "text": "core"}]});
    for _ in 0..depth {
        node = json!({"type": "blockquote", "content": [node]});
    }
    json!({"content": [node]})
}

#[test]
fn test_parse_full_document() {
    let input = r#"{
        "version": 1,
        "type": "doc",
        "content": [
            {"type": "heading", "attrs": {"level": 3}, "content": [{"type": "text", "text": "Title"}]},
            {"type": "paragraph", "content": [
                {"type": "text", "text": "bold", "marks": [{"type": "strong"}]},
                {"type": "hardBreak"}
            ]},
            {"type": "media", "attrs": {"type": "file", "id": "m1", "alt": "pic"}}
        ]
    }"#;

    let doc = parse_str(input, &ParseOptions::default()).unwrap().unwrap();

    assert_eq!(doc.version, Some(1));
    assert_eq!(doc.roots().len(), 3);
    assert_eq!(doc.len(), 6);
    assert_eq!(doc.max_depth(), 1);

    let roots = doc.roots();
    assert_eq!(doc.kind(roots[0]), Some(&NodeKind::Heading { level: 3 }));

    let para_children = doc.children(roots[1]);
    assert_eq!(
        doc.kind(para_children[0]),
        Some(&NodeKind::marked_text("bold", vec![Mark::Strong]))
    );
    assert_eq!(doc.kind(para_children[1]), Some(&NodeKind::HardBreak));

    match doc.kind(roots[2]) {
        Some(NodeKind::Media(media)) => {
            assert_eq!(media.media_type, MediaType::File);
            assert_eq!(media.attachment_id(), Some("m1"));
            assert_eq!(media.alt.as_deref(), Some("pic"));
        }
        other => panic!("expected media, got {:?}", other),
    }
}

#[test]
fn test_children_follow_parents_in_arena() {
    let doc = parse_value(&nested_quotes(20), &ParseOptions::default())
        .unwrap()
        .unwrap();

    for (id, node) in doc.iter() {
        for child in &node.children {
            assert!(child.index() > id.index());
        }
    }
    assert_eq!(doc.max_depth(), 21);
}

#[test]
fn test_no_content_sequence() {
    let options = ParseOptions::default();
    assert!(parse_value(&json!({}), &options).unwrap().is_none());
    assert!(parse_value(&json!({"content": {}}), &options).unwrap().is_none());
    assert!(parse_value(&json!("text"), &options).unwrap().is_none());

    let empty = parse_value(&json!({"content": []}), &options).unwrap().unwrap();
    assert!(empty.is_empty());
}

#[test]
fn test_strict_rejects_malformed_nodes() {
    let input = json!({"content": [
        {"type": "paragraph", "content": [{"type": "text", "text": "a"}, 5]}
    ]});

    match parse_value(&input, &ParseOptions::default()) {
        Err(Error::MalformedNode { path, .. }) => assert_eq!(path, "content[0].content[1]"),
        other => panic!("expected malformed node error, got {:?}", other),
    }
}

#[test]
fn test_strict_rejects_non_array_content() {
    let input = json!({"content": [{"type": "paragraph", "content": "oops"}]});
    let result = parse_value(&input, &ParseOptions::default());
    assert!(matches!(result, Err(Error::MalformedNode { .. })));
}

#[test]
fn test_lenient_skips_malformed_nodes() {
    let input = json!({"content": [
        null,
        {"type": "paragraph", "content": "oops"},
        {"type": "rule"}
    ]});

    let options = ParseOptions::new().with_error_mode(ErrorMode::Lenient);
    let doc = parse_value(&input, &options).unwrap().unwrap();

    assert_eq!(doc.roots().len(), 2);
    assert_eq!(doc.skipped_count(), 2);
    assert_eq!(doc.kind(doc.roots()[1]), Some(&NodeKind::Rule));
}

#[test]
fn test_depth_limit() {
    let input = nested_quotes(10);

    let strict = ParseOptions::new().with_max_depth(5);
    assert!(matches!(
        parse_value(&input, &strict),
        Err(Error::DepthExceeded { depth: 6, max: 5 })
    ));

    let lenient = ParseOptions::new().lenient().with_max_depth(5);
    let doc = parse_value(&input, &lenient).unwrap().unwrap();
    assert_eq!(doc.len(), 6);
    assert_eq!(doc.max_depth(), 5);
    assert_eq!(doc.skipped_count(), 1);
}

#[test]
fn test_deep_value_within_limit() {
    let input = nested_quotes(400);
    let doc = parse_value(&input, &ParseOptions::default())
        .unwrap()
        .unwrap();
    assert_eq!(doc.len(), 402);
}

#[test]
fn test_kind_counts() {
    let input = json!({"content": [
        {"type": "bulletList", "content": [
            {"type": "listItem", "content": [{"type": "paragraph"}]},
            {"type": "listItem", "content": [{"type": "paragraph"}]}
        ]},
        {"type": "tableHeader"},
        {"type": "mystery"}
    ]});

    let doc = parse_value(&input, &ParseOptions::default()).unwrap().unwrap();
    let counts = doc.kind_counts();

    assert_eq!(counts.get("bulletList"), Some(&1));
    assert_eq!(counts.get("listItem"), Some(&2));
    assert_eq!(counts.get("paragraph"), Some(&2));
    assert_eq!(counts.get("tableHeader"), Some(&1));
    assert_eq!(counts.get("mystery"), Some(&1));
}

#[test]
fn test_document_serializes() {
    let doc = parse_value(
        &json!({"version": 1, "content": [{"type": "rule"}]}),
        &ParseOptions::default(),
    )
    .unwrap()
    .unwrap();

    let value = serde_json::to_value(&doc).unwrap();
    assert_eq!(value["version"], 1);
    assert_eq!(value["nodes"][0]["kind"]["type"], "rule");
    assert_eq!(value["roots"][0], 0);
}
