//! Renders a protocol into the instruction block embedded in prompts.
//!
//! Layout, one line per field in declaration order:
//! ```text
//! NAME: description (hint)
//!   NESTED: description
//! ```
//! Nested attributes are indented two spaces per level. Comments are
//! emitted verbatim at the current indentation. Lines are joined with `\n`
//! and the block has no trailing newline.

use crate::Protocol;
use laml_proto::{Field, FieldKind, FieldSpec, ItemKind, ListKind};

const INDENT: &str = "  ";

pub(crate) fn render(protocol: &Protocol) -> String {
    let mut lines = Vec::new();
    render_fields(protocol.fields(), 0, &mut lines);
    lines.join("\n")
}

fn render_fields(fields: &[FieldSpec], depth: usize, lines: &mut Vec<String>) {
    for spec in fields {
        match spec {
            FieldSpec::Comment(text) => push_block(lines, depth, text),
            FieldSpec::Field(field) => {
                push_block(lines, depth, &marker_line(field));
                render_fields(field.attributes(), depth + 1, lines);
            }
        }
    }
}

fn marker_line(field: &Field) -> String {
    let mut line = format!("{}:", field.name);
    if let Some(description) = &field.description {
        line.push(' ');
        line.push_str(description);
    }
    if let Some(hint) = format_hint(&field.kind) {
        line.push(' ');
        line.push_str(&hint);
    }
    line
}

fn format_hint(kind: &FieldKind) -> Option<String> {
    match kind {
        FieldKind::Text | FieldKind::Object { .. } => None,
        FieldKind::Constant { allowed_values } => {
            Some(format!("(one of: {})", allowed_values.join(" | ")))
        }
        FieldKind::InlineArray {
            item_kind: ItemKind::Text,
        } => Some("(comma-separated list)".to_string()),
        FieldKind::InlineArray {
            item_kind: ItemKind::Constant { allowed_values },
        } => Some(format!(
            "(comma-separated list, each one of: {})",
            allowed_values.join(" | ")
        )),
        FieldKind::List {
            kind: ListKind::Numbered,
        } => Some("(numbered list, one item per line: 1. ..., 2. ...)".to_string()),
        FieldKind::List {
            kind: ListKind::Bulleted,
        } => Some("(bulleted list, one item per line: - ...)".to_string()),
    }
}

/// Pushes every line of `text` at `depth`; an empty text yields a blank line.
fn push_block(lines: &mut Vec<String>, depth: usize, text: &str) {
    if text.is_empty() {
        lines.push(String::new());
        return;
    }
    let indent = INDENT.repeat(depth);
    for line in text.lines() {
        if line.is_empty() {
            lines.push(String::new());
        } else {
            lines.push(format!("{indent}{line}"));
        }
    }
}
