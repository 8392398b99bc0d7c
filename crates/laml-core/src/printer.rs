//! Prints value trees in the indented `key: value` notation.
//!
//! Used to embed worked examples and existing resources into prompts, so a
//! printed object reads the same way a response is expected to look.

use laml_proto::{Map, Value};

const INDENT: &str = "  ";

/// Prints `value` in LAML notation.
///
/// - text prints verbatim after `key: `, so multi-line text keeps its lines
/// - lists print as a comma-separated line
/// - objects print as `key:` followed by their entries indented two spaces
///
/// A bare text prints as itself and a bare list as its joined items. Lines
/// are joined with `\n` and there is no trailing newline.
pub fn print(value: &Value) -> String {
    match value {
        Value::Text(text) => text.clone(),
        Value::List(items) => items.join(", "),
        Value::Object(map) => {
            let mut lines = Vec::new();
            print_map(map, 0, &mut lines);
            lines.join("\n")
        }
    }
}

fn print_map(map: &Map, depth: usize, lines: &mut Vec<String>) {
    let indent = INDENT.repeat(depth);
    for (key, value) in map.iter() {
        match value {
            Value::Text(text) if text.is_empty() => lines.push(format!("{indent}{key}:")),
            Value::Text(text) => lines.push(format!("{indent}{key}: {text}")),
            Value::List(items) if items.is_empty() => lines.push(format!("{indent}{key}:")),
            Value::List(items) => lines.push(format!("{indent}{key}: {}", items.join(", "))),
            Value::Object(nested) => {
                lines.push(format!("{indent}{key}:"));
                print_map(nested, depth + 1, lines);
            }
        }
    }
}
