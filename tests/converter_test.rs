//! Integration tests for the top-level conversion API.

use adfmd::{
    to_markdown, to_markdown_str, to_markdown_with_options, ConvertOptions, Converter,
    ParseOptions, RenderOptions, CONVERSION_ERROR_SENTINEL,
};
use serde_json::{json, Value};

fn nested_lists(depth: usize) -> Value {
    let mut node = json!({"type": "paragraph", "content": [{"type": "text", "text": "leaf"}]});
    for _ in 0..depth {
        node = json!({"type": "bulletList", "content": [
            {"type": "listItem", "content": [
                {"type": "paragraph", "content": [{"type": "text", "text": "item"}]},
                node
            ]}
        ]});
    }
    json!({"content": [node]})
}

#[test]
fn test_empty_input_scenarios() {
    assert_eq!(to_markdown(&Value::Null), "");
    assert_eq!(to_markdown_str(""), "");
    assert_eq!(to_markdown_str("plain text"), "plain text");
    assert_eq!(to_markdown(&json!({"content": []})), "");
}

#[test]
fn test_malformed_json_string_passthrough() {
    assert_eq!(to_markdown_str("{not valid json"), "{not valid json");
    assert_eq!(to_markdown(&json!("{not valid json")), "{not valid json");
    assert_eq!(to_markdown_str("# Already markdown"), "# Already markdown");
}

#[test]
fn test_json_string_without_content() {
    assert_eq!(to_markdown_str(r#"{"version": 1}"#), "");
    assert_eq!(to_markdown_str("[1, 2]"), "");
}

#[test]
fn test_json_scalar_string_renders_empty() {
    for input in ["42", "true", "\"quoted\"", "null", " -1.5 "] {
        assert_eq!(to_markdown_str(input), "", "input: {}", input);
    }
    assert_eq!(to_markdown_str("42 is the answer"), "42 is the answer");
}

#[test]
fn test_primitive_coercion() {
    assert_eq!(to_markdown(&json!(42)), "42");
    assert_eq!(to_markdown(&json!(-0.5)), "-0.5");
    assert_eq!(to_markdown(&json!(true)), "true");
}

#[test]
fn test_malformed_nodes_degrade_by_default() {
    let input = json!({"content": [
        {"type": "paragraph", "content": [{"type": "text", "text": "fine"}]},
        {"type": "bulletList", "content": [["not", "a", "node"]]},
        {"type": "paragraph", "content": [{"type": "text", "text": "also fine"}, null]},
        {"type": "paragraph", "content": "oops"}
    ]});

    assert_eq!(to_markdown(&input), "fine\n\nalso fine");
    assert_eq!(
        Converter::new().strict().convert(&input),
        CONVERSION_ERROR_SENTINEL
    );
}

#[test]
fn test_deep_nesting_truncates_by_default() {
    let out = to_markdown(&nested_lists(300));

    // Text below the default depth limit of 512 is dropped.
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 255);
    assert_eq!(lines[0], "- item");
    assert_eq!(lines[254], format!("{}- item", "  ".repeat(254)));
    assert!(!out.contains("leaf"));
}

#[test]
fn test_deep_nesting_strict_yields_sentinel() {
    let input = nested_lists(300);
    assert_eq!(
        Converter::new().strict().convert(&input),
        CONVERSION_ERROR_SENTINEL
    );
}

#[test]
fn test_deep_nesting_custom_limit() {
    let input = nested_lists(300);
    let out = Converter::new().with_max_depth(8).convert(&input);

    // Depth 8 cuts the tree inside the fourth list level.
    assert_eq!(out, "- item\n  - item\n    - item");
    assert!(!out.contains("leaf"));
}

#[test]
fn test_nested_lists_within_limit() {
    let out = Converter::new().convert(&nested_lists(3));
    assert_eq!(out, "- item\n  - item\n    - item\n      leaf");
}

#[test]
fn test_json_string_beyond_reader_limit() {
    let input = nested_lists(300).to_string();
    assert_eq!(to_markdown_str(&input), CONVERSION_ERROR_SENTINEL);
}

#[test]
fn test_options_are_applied() {
    let input = json!({"content": [
        {"type": "heading", "attrs": {"level": 6}, "content": [{"type": "text", "text": "H"}]},
        {"type": "media", "attrs": {"type": "file", "id": "f1"}}
    ]});

    let options = ConvertOptions::new()
        .with_parse_options(ParseOptions::new().lenient())
        .with_render_options(
            RenderOptions::new()
                .with_max_heading(2)
                .with_attachment_scheme("https://files.example.com/"),
        );

    assert_eq!(
        to_markdown_with_options(&input, &options),
        "## H\n\n![Attachment: f1](https://files.example.com/f1)"
    );
}

#[test]
fn test_convert_with_stats() {
    let input = json!({"content": [
        {"type": "heading", "attrs": {"level": 1}, "content": [{"type": "text", "text": "Report"}]},
        {"type": "table", "content": [
            {"type": "tableRow", "content": [
                {"type": "tableCell", "content": [{"type": "paragraph", "content": [{"type": "text", "text": "x"}]}]}
            ]}
        ]},
        {"type": "codeBlock", "content": [{"type": "text", "text": "y"}]},
        {"type": "bulletList", "content": [
            {"type": "listItem", "content": [{"type": "paragraph", "content": [{"type": "text", "text": "z"}]}]}
        ]},
        {"type": "widget"}
    ]});

    let result = Converter::new().convert_with_stats(&input);
    let stats = &result.stats;

    assert_eq!(stats.heading_count, 1);
    assert_eq!(stats.table_count, 1);
    assert_eq!(stats.code_block_count, 1);
    assert_eq!(stats.list_item_count, 1);
    assert_eq!(stats.paragraph_count, 2);
    assert_eq!(stats.unknown_node_count, 1);
    assert_eq!(stats.node_count, 14);
    assert_eq!(result.content, "# Report\n\nx\n---\n\n```\ny\n```\n\n- z");
}

#[test]
fn test_convert_str_with_stats_passthrough() {
    let result = Converter::new().convert_str_with_stats("already rendered");
    assert_eq!(result.content, "already rendered");
    assert_eq!(result.stats.node_count, 0);
}

#[test]
fn test_converter_is_reusable() {
    let converter = Converter::new();
    let input = json!({"content": [{"type": "rule"}]});
    assert_eq!(converter.convert(&input), "---");
    assert_eq!(converter.convert(&input), "---");
    assert_eq!(converter.convert_str(&input.to_string()), "---");
}
