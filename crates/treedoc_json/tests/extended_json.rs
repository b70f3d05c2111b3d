use test_case::test_case;
use treedoc_core::{Document, NodeId, Scalar};
use treedoc_json::{parse, parse_all, parse_with_options, ParseError, ParseOptions};

fn map_value<'a>(document: &'a Document, node: NodeId, key: &str) -> &'a Scalar {
    let child = document
        .map_child(node, key)
        .unwrap_or_else(|| panic!("no child keyed `{key}`"));
    document.node(child).value().unwrap()
}

#[test]
fn comments_are_invisible_to_the_grammar() {
    // Comments sit at every structural decision point: ahead of keys,
    // values, separators, and the closing brace. (A comment on the same
    // line as a bare token would be consumed as part of the token, the
    // same way a comma would end it.)
    let source = r#"{ # leading note
        a: // before value
        1, /* between entries */ b: 2
        # before the close
    }"#;
    let document = parse(source).unwrap();
    let root = document.root();
    assert_eq!(map_value(&document, root, "a"), &Scalar::Int(1));
    assert_eq!(map_value(&document, root, "b"), &Scalar::Int(2));
}

#[test_case("# note"; "hash")]
#[test_case("// note"; "double slash")]
#[test_case("/* note */"; "block")]
fn each_comment_style_is_skipped(comment: &str) {
    let source = format!("{{a: {comment}\n 1}}");
    let document = parse(&source).unwrap();
    assert_eq!(map_value(&document, document.root(), "a"), &Scalar::Int(1));
}

#[test]
fn comment_only_input_is_an_empty_root() {
    let document = parse("# nothing here\n// or here\n/* at all */").unwrap();
    assert!(document.node(document.root()).is_map());
    assert!(document.children(document.root()).is_empty());
}

#[test]
fn continuous_strings_span_comments_and_lines() {
    let document = parse("\"multi\" // join\n  'line' `string`").unwrap();
    assert_eq!(
        document.node(document.root()).value(),
        Some(&Scalar::String("multilinestring".into()))
    );
}

#[test]
fn bare_scalars_are_inferred() {
    let document = parse("{a: true, b: null, c: -3, d: 1.5e2, e: hello world}").unwrap();
    let root = document.root();
    assert_eq!(map_value(&document, root, "a"), &Scalar::Bool(true));
    assert_eq!(map_value(&document, root, "b"), &Scalar::Null);
    assert_eq!(map_value(&document, root, "c"), &Scalar::Int(-3));
    assert_eq!(map_value(&document, root, "d"), &Scalar::Float(150.0));
    assert_eq!(
        map_value(&document, root, "e"),
        &Scalar::String("hello world".into())
    );
}

#[test]
fn quoted_values_bypass_inference() {
    let document = parse(r#"{a: "1", b: "true"}"#).unwrap();
    let root = document.root();
    assert_eq!(map_value(&document, root, "a"), &Scalar::String("1".into()));
    assert_eq!(
        map_value(&document, root, "b"),
        &Scalar::String("true".into())
    );
}

#[test]
fn duplicate_keys_are_kept_in_order() {
    let document = parse("{k:1,k:2}").unwrap();
    let root = document.root();
    let children = document.children(root);
    assert_eq!(children.len(), 2);
    assert_eq!(document.node(children[0]).value(), Some(&Scalar::Int(1)));
    assert_eq!(document.node(children[1]).value(), Some(&Scalar::Int(2)));
}

#[test]
fn id_registration_without_doc_id() {
    let document = parse(r#"{id:"x", name:"thing"}"#).unwrap();
    let root = document.root();
    // Without a batch ordinal the value is registered as-is and not
    // rewritten.
    assert_eq!(map_value(&document, root, "id"), &Scalar::String("x".into()));
    assert_eq!(document.node_by_id("x"), Some(root));
}

#[test]
fn id_and_reference_suffixed_with_doc_id() {
    let options = ParseOptions {
        doc_id: Some(0),
        ..ParseOptions::default()
    };
    let document = parse_with_options(r#"{id:"x",ref:"x"}"#, &options).unwrap();
    let root = document.root();
    assert_eq!(
        map_value(&document, root, "id"),
        &Scalar::String("x_0".into())
    );
    assert_eq!(
        map_value(&document, root, "ref"),
        &Scalar::String("x_0".into())
    );
    // The id points at the enclosing map node, not the id-valued child.
    assert_eq!(document.node_by_id("x_0"), Some(root));
    assert_eq!(document.node_by_id("x"), None);
}

#[test]
fn id_from_numeric_scalar_uses_canonical_rendering() {
    let options = ParseOptions {
        doc_id: Some(3),
        ..ParseOptions::default()
    };
    let document = parse_with_options("{id: 7}", &options).unwrap();
    let root = document.root();
    assert_eq!(
        map_value(&document, root, "id"),
        &Scalar::String("7_3".into())
    );
    assert_eq!(document.node_by_id("7_3"), Some(root));
}

#[test]
fn structured_id_values_are_not_registered() {
    // Only SIMPLE children participate in id/reference handling.
    let document = parse("{id:{inner:1}}").unwrap();
    assert_eq!(document.ids().count(), 0);
}

#[test]
fn custom_id_and_reference_keys() {
    let options = ParseOptions {
        id_key: "name".to_string(),
        reference_key: "target".to_string(),
        doc_id: Some(1),
        ..ParseOptions::default()
    };
    let document = parse_with_options(r#"{name:"n", target:"n", id:"plain"}"#, &options).unwrap();
    let root = document.root();
    assert_eq!(
        map_value(&document, root, "name"),
        &Scalar::String("n_1".into())
    );
    assert_eq!(
        map_value(&document, root, "target"),
        &Scalar::String("n_1".into())
    );
    // The conventional key is inert once renamed away.
    assert_eq!(
        map_value(&document, root, "id"),
        &Scalar::String("plain".into())
    );
    assert_eq!(document.node_by_id("n_1"), Some(root));
}

#[test]
fn parse_all_batches_documents_under_an_array_root() {
    let document = parse_all("{a:1},{b:2}", &ParseOptions::default()).unwrap();
    let root = document.root();
    assert!(document.node(root).is_array());
    let children = document.children(root);
    assert_eq!(children.len(), 2);
    assert!(document.node(children[0]).is_map());
    assert!(document.node(children[1]).is_map());
    assert_eq!(map_value(&document, children[0], "a"), &Scalar::Int(1));
    assert_eq!(map_value(&document, children[1], "b"), &Scalar::Int(2));
}

#[test]
fn parse_all_scopes_ids_per_document() {
    let document = parse_all(r#"{id:"x"} {id:"x", ref:"x"}"#, &ParseOptions::default()).unwrap();
    let root = document.root();
    let children = document.children(root);
    assert_eq!(children.len(), 2);
    assert_eq!(document.node_by_id("x_0"), Some(children[0]));
    assert_eq!(document.node_by_id("x_1"), Some(children[1]));
    assert_eq!(
        map_value(&document, children[1], "ref"),
        &Scalar::String("x_1".into())
    );
}

#[test]
fn parse_all_of_empty_input() {
    let document = parse_all("  \n , \n", &ParseOptions::default()).unwrap();
    assert!(document.node(document.root()).is_array());
    assert!(document.children(document.root()).is_empty());
}

#[test]
fn depth_limit_is_a_structured_error() {
    let options = ParseOptions {
        max_depth: 8,
        ..ParseOptions::default()
    };
    let deep = "[".repeat(64);
    let error = parse_with_options(&deep, &options).unwrap_err();
    match error {
        ParseError::DepthLimitExceeded { limit, .. } => assert_eq!(limit, 8),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn deeply_nested_input_within_the_limit_parses() {
    let source = format!("{}1{}", "[".repeat(64), "]".repeat(64));
    let document = parse(&source).unwrap();
    let mut node = document.root();
    for _ in 0..64 {
        assert!(document.node(node).is_array());
        node = document.child_at(node, 0).unwrap();
    }
    assert_eq!(document.node(node).value(), Some(&Scalar::Int(1)));
}

#[test]
fn errors_carry_positions() {
    let error = parse("{a:1,\n  \"b\" 2}").unwrap_err();
    let at = error.position();
    assert_eq!(at.line, 2);
    assert!(error.to_string().contains("line 2"));
}

#[test]
fn uri_is_carried_for_diagnostics() {
    let options = ParseOptions {
        uri: Some("config/example.tdoc".to_string()),
        ..ParseOptions::default()
    };
    let document = parse_with_options("{}", &options).unwrap();
    assert_eq!(document.uri(), Some("config/example.tdoc"));
}

fn assert_isomorphic(left: &Document, left_id: NodeId, right: &Document, right_id: NodeId) {
    let left_node = left.node(left_id);
    let right_node = right.node(right_id);
    assert_eq!(left_node.kind(), right_node.kind());
    assert_eq!(left_node.value(), right_node.value());
    let left_children = left.children(left_id);
    let right_children = right.children(right_id);
    assert_eq!(left_children.len(), right_children.len());
    for (a, b) in left_children.iter().zip(right_children) {
        assert_eq!(left.node(*a).key(), right.node(*b).key());
        assert_isomorphic(left, *a, right, *b);
    }
}

#[test]
fn reparsing_a_bookmark_span_is_isomorphic() {
    let source = "{a: {x: [1, 2, true], y: \"s\"}, b: [null, {k: v}]}";
    let document = parse(source).unwrap();
    for key in ["a", "b"] {
        let child = document.map_child(document.root(), key).unwrap();
        let span = document.text_span(child).unwrap();
        let reparsed = parse(span).unwrap();
        assert_isomorphic(&document, child, &reparsed, reparsed.root());
    }
}

#[test]
fn strict_json_agrees_with_serde_on_shape() {
    let source = r#"{"a": [1, 2.5, true, null], "b": {"c": "text"}}"#;
    let document = parse(source).unwrap();
    let value: serde_json::Value = serde_json::from_str(source).unwrap();

    let root = document.root();
    let a = document.map_child(root, "a").unwrap();
    assert_eq!(
        document.children(a).len(),
        value["a"].as_array().unwrap().len()
    );
    let first = document.child_at(a, 0).unwrap();
    assert_eq!(
        document.node(first).value().unwrap().as_int(),
        value["a"][0].as_i64()
    );
    let b = document.map_child(root, "b").unwrap();
    assert_eq!(
        map_value(&document, b, "c").as_str(),
        value["b"]["c"].as_str()
    );
}
