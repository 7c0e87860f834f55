use super::*;
use crate::parser::parse;

fn render_str(input: &str, bindings: &Bindings) -> String {
    let root = parse(input.as_bytes()).expect("Failed to parse");
    render(&root, bindings).expect("Failed to render")
}

#[test]
fn test_compact_round_trip() {
    let bindings = Bindings::new();
    for input in [
        "[[1,2,3],[1,2,3]]",
        "{\"name\":\"app\",\"port\":8080,\"debug\":false}",
        "[true,false,null]",
        "[]",
        "{}",
        "{\"a\":{\"b\":[{}]}}",
    ] {
        assert_eq!(render_str(input, &bindings), input);
    }
}

#[test]
fn test_whitespace_normalized() {
    let bindings = Bindings::new();
    assert_eq!(
        render_str("{ \"a\" : [ 1 , 2 ] }", &bindings),
        "{\"a\":[1,2]}"
    );
}

#[test]
fn test_number_formatting() {
    let bindings = Bindings::new();
    assert_eq!(render_str("[1.0, 0.5, -3, 1e3]", &bindings), "[1,0.5,-3,1000]");
}

#[test]
fn test_string_escapes_preserved() {
    // Escapes are never decoded, the raw span goes straight through
    let bindings = Bindings::new();
    assert_eq!(
        render_str(r#"{"path": "a\\b\"c"}"#, &bindings),
        r#"{"path":"a\\b\"c"}"#
    );
}

#[test]
fn test_unbound_placeholder_passes_through() {
    let bindings = Bindings::new();
    assert_eq!(
        render_str("{\"a\": ${missing}}", &bindings),
        "{\"a\":${missing}}"
    );
    assert_eq!(
        render_str("{\"k\": \"v${missing}\"}", &bindings),
        "{\"k\":\"v${missing}\"}"
    );
}

#[test]
fn test_embedded_placeholder_substitution() {
    let mut bindings = Bindings::new();
    bindings.bind("x", 1).unwrap();
    assert_eq!(render_str("{\"k\": \"v${x}\"}", &bindings), "{\"k\":\"v1\"}");
}

#[test]
fn test_embedded_string_binding_drops_encoder_quotes() {
    let mut bindings = Bindings::new();
    bindings.bind("host", "db1").unwrap();
    assert_eq!(
        render_str("\"http://${host}:5432\"", &bindings),
        "\"http://db1:5432\""
    );
}

#[test]
fn test_repeated_embedded_placeholder() {
    let mut bindings = Bindings::new();
    bindings.bind("x", "a").unwrap();
    assert_eq!(render_str("\"${x}-${x}\"", &bindings), "\"a-a\"");
}

#[test]
fn test_whole_value_array_binding() {
    let mut bindings = Bindings::new();
    bindings.bind("x", vec![1, 2, 3]).unwrap();
    assert_eq!(render_str("{\"k\": ${x}}", &bindings), "{\"k\":[1,2,3]}");
}

#[test]
fn test_whole_value_string_binding_keeps_quotes() {
    let mut bindings = Bindings::new();
    bindings.bind("name", "app").unwrap();
    let output = render_str("{\"k\": ${name}}", &bindings);
    assert_eq!(output, "{\"k\":\"app\"}");
    serde_json::from_str::<serde_json::Value>(&output).expect("output should be plain JSON");
}

#[test]
fn test_struct_binding() {
    #[derive(serde::Serialize)]
    struct Server {
        host: String,
        port: u16,
    }

    let mut bindings = Bindings::new();
    bindings
        .bind(
            "server",
            Server {
                host: "db1".into(),
                port: 5432,
            },
        )
        .unwrap();
    assert_eq!(
        render_str("{\"s\": ${server}}", &bindings),
        "{\"s\":{\"host\":\"db1\",\"port\":5432}}"
    );
}

#[test]
fn test_partial_then_full_resolution() {
    // A partially rendered document is itself a valid template
    let mut first = Bindings::new();
    first.bind("a", 1).unwrap();

    let pass_one = render_str("{\"a\": ${a}, \"b\": ${b}}", &first);
    assert_eq!(pass_one, "{\"a\":1,\"b\":${b}}");

    let mut second = Bindings::new();
    second.bind("b", 2).unwrap();
    assert_eq!(render_str(&pass_one, &second), "{\"a\":1,\"b\":2}");
}

#[test]
fn test_render_is_idempotent_without_bindings() {
    let bindings = Bindings::new();
    let once = render_str("{\"a\": ${x}, \"b\": [1, \"v${y}\"]}", &bindings);
    assert_eq!(render_str(&once, &bindings), once);
}

#[test]
fn test_pretty_output() {
    let bindings = Bindings::new();
    let root = parse(b"{\"a\": 1, \"b\": [1, 2], \"c\": {}}").expect("Failed to parse");
    let output = render_pretty(&root, &bindings).expect("Failed to render");
    let expected = "{\n    \"a\": 1,\n    \"b\": [\n        1,\n        2\n    ],\n    \"c\": {}\n}";
    assert_eq!(output, expected);
}

#[test]
fn test_pretty_primitive_root() {
    let bindings = Bindings::new();
    let root = parse(b"42").expect("Failed to parse");
    assert_eq!(render_pretty(&root, &bindings).expect("Failed to render"), "42");
}

#[test]
fn test_deeply_nested_render() {
    let depth = 10_000;
    let mut input = Vec::with_capacity(depth * 2);
    input.extend(std::iter::repeat_n(b'[', depth));
    input.extend(std::iter::repeat_n(b']', depth));

    let mut root = parse(&input).expect("Failed to parse deep nesting");
    let bindings = Bindings::new();
    let output = render(&root, &bindings).expect("Failed to render deep nesting");
    assert_eq!(output.as_bytes(), &input[..]);

    // Unwind iteratively so teardown does not recurse through 10k levels
    while let Node::Array(mut items) = root {
        match items.pop() {
            Some(inner) => root = inner,
            None => break,
        }
    }
}

#[test]
fn test_replace_all() {
    assert_eq!(replace_all(b"a${x}b${x}", b"${x}", b"1"), b"a1b1".to_vec());
    assert_eq!(replace_all(b"no match", b"${x}", b"1"), b"no match".to_vec());
}
