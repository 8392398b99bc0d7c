//! Response parsing.
//!
//! A response is scanned once for marker lines: a line that starts, after
//! optional spaces or tabs, with `NAME:` for any field name declared at any
//! depth of the protocol. Markers are then consumed in the order they appear
//! in the text:
//! - a leaf field's value runs from its marker to the next marker line
//! - an object's span runs until the next marker naming one of its siblings
//!   or an ancestor's sibling, and its attributes are parsed inside that span
//!
//! Names declared anywhere under an object take precedence inside its span,
//! once per declaration, so a nested `description` (at any depth) does not end
//! the object even when a top-level field is also called `description`. Once
//! those declarations are used up, a repeated name ends the span only if it
//! also names a sibling or an ancestor's sibling; otherwise it stays inside
//! and the later value wins.
//!
//! Inline arrays read a single line: the marker line, or the line after it
//! when the marker line is blank.

use crate::output::ParserOutput;
use crate::Protocol;
use laml_proto::{Field, FieldKind, FieldPath, FieldSpec, ItemKind, ListKind, Map, ParseError, Value};
use regex::Regex;
use std::collections::HashSet;
use std::ops::Range;
use std::sync::OnceLock;
use tracing::{debug, trace};

pub(crate) fn parse(protocol: &Protocol, raw: &str, strict: bool) -> Result<Value, ParseError> {
    let text = raw.replace("\r\n", "\n");
    let markers = find_markers(protocol.marker_names(), &text);
    debug!(markers = markers.len(), bytes = text.len(), "Scanned response for field markers");

    let preamble_end = markers.first().map_or(text.len(), |marker| marker.line_start);
    let preamble = text[..preamble_end].trim();
    if !preamble.is_empty() {
        if strict {
            return Err(ParseError::unrecognized(preamble));
        }
        debug!(bytes = preamble.len(), "Ignoring text before the first field marker");
    }

    let scan = Scan {
        text: &text,
        markers,
    };
    let mut output = ParserOutput::new();
    scan.parse_scope(
        protocol.fields(),
        0..scan.markers.len(),
        &[],
        &FieldPath::root(),
        &mut output,
    )?;
    Ok(output.result())
}

/// A marker line found in the response.
#[derive(Debug, Clone, Copy)]
struct Marker<'p> {
    name: &'p str,
    /// Byte offset of the start of the marker's line.
    line_start: usize,
    /// Byte offset just past the marker's colon.
    value_start: usize,
}

fn find_markers<'p>(names: &'p [String], text: &str) -> Vec<Marker<'p>> {
    let mut markers = Vec::new();
    let mut line_start = 0;

    for line in text.split_inclusive('\n') {
        let body = line.trim_start_matches([' ', '\t']);
        let indent = line.len() - body.len();
        let found = names.iter().find(|name| {
            body.strip_prefix(name.as_str())
                .is_some_and(|rest| rest.starts_with(':'))
        });
        if let Some(name) = found {
            markers.push(Marker {
                name,
                line_start,
                value_start: line_start + indent + name.len() + 1,
            });
        }
        line_start += line.len();
    }

    markers
}

struct Scan<'p, 't> {
    text: &'t str,
    markers: Vec<Marker<'p>>,
}

impl<'p> Scan<'p, '_> {
    /// Parses the markers in `range` against `fields`, writing under `path`.
    ///
    /// `outer` holds the names that end an enclosing object: the siblings of
    /// every ancestor.
    fn parse_scope(
        &self,
        fields: &[FieldSpec],
        range: Range<usize>,
        outer: &[&str],
        path: &FieldPath,
        output: &mut ParserOutput,
    ) -> Result<(), ParseError> {
        let own: Vec<&str> = fields.iter().filter_map(FieldSpec::name).collect();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut idx = range.start;

        while idx < range.end {
            let marker = self.markers[idx];
            let Some(field) = find_field(fields, marker.name) else {
                // Belongs to a deeper level whose parent marker is missing.
                trace!(field = marker.name, scope = %path, "Skipping marker outside its scope");
                idx += 1;
                continue;
            };
            seen.insert(field.name.as_str());
            let field_path = path.child(&field.name);

            let value = match &field.kind {
                FieldKind::Object { attributes } => {
                    let end = self.object_end(idx, range.end, attributes, &own, outer);
                    output.set(field_path.segments(), Value::Object(Map::new()));

                    let mut enclosing = own.clone();
                    enclosing.extend_from_slice(outer);
                    self.parse_scope(attributes, idx + 1..end, &enclosing, &field_path, output)?;

                    idx = end;
                    continue;
                }
                FieldKind::Text => Value::Text(self.capture(idx)),
                FieldKind::Constant { allowed_values } => {
                    let found = self.marker_line(idx).trim();
                    check_constant(&field_path, found, allowed_values)?;
                    Value::Text(found.to_string())
                }
                FieldKind::InlineArray { item_kind } => {
                    let captured = self.capture(idx);
                    let (line, rest) = captured.split_once('\n').unwrap_or((captured.as_str(), ""));
                    if !rest.trim().is_empty() {
                        trace!(field = %field_path, "Ignoring text after inline array line");
                    }
                    Value::List(parse_array(&field_path, line, item_kind)?)
                }
                FieldKind::List { kind } => {
                    Value::List(parse_list(&field_path, &self.capture(idx), *kind)?)
                }
            };

            trace!(field = %field_path, "Captured field");
            output.set(field_path.segments(), value);
            idx += 1;
        }

        for field in fields.iter().filter_map(FieldSpec::as_field) {
            if field.is_required() && !seen.contains(field.name.as_str()) {
                return Err(ParseError::MissingRequiredField {
                    path: path.child(&field.name),
                });
            }
        }

        Ok(())
    }

    /// Index of the first marker after `start` that closes the object
    /// opened at `start`, or `limit` if none does.
    fn object_end(
        &self,
        start: usize,
        limit: usize,
        attributes: &[FieldSpec],
        own: &[&str],
        outer: &[&str],
    ) -> usize {
        let mut unclaimed = Vec::new();
        collect_names(attributes, &mut unclaimed);

        for idx in start + 1..limit {
            let name = self.markers[idx].name;
            if let Some(pos) = unclaimed.iter().position(|candidate| *candidate == name) {
                unclaimed.swap_remove(pos);
                continue;
            }
            if own.contains(&name) || outer.contains(&name) {
                return idx;
            }
        }

        limit
    }

    /// Byte offset where the value of marker `idx` ends.
    fn value_end(&self, idx: usize) -> usize {
        self.markers
            .get(idx + 1)
            .map_or(self.text.len(), |next| next.line_start)
    }

    /// The rest of the marker's own line.
    fn marker_line(&self, idx: usize) -> &str {
        let rest = &self.text[self.markers[idx].value_start..self.value_end(idx)];
        rest.split('\n').next().unwrap_or("")
    }

    /// Everything between the marker and the next marker line.
    ///
    /// At most one space after the colon is dropped. When the marker's own
    /// line is blank the value starts on the following line. Trailing
    /// whitespace is trimmed; everything else is kept verbatim.
    fn capture(&self, idx: usize) -> String {
        let rest = &self.text[self.markers[idx].value_start..self.value_end(idx)];
        let rest = rest.strip_prefix(' ').unwrap_or(rest);
        let rest = match rest.split_once('\n') {
            Some((first, remainder)) if first.trim().is_empty() => remainder,
            _ => rest,
        };
        rest.trim_end().to_string()
    }
}

/// Every field name declared under `fields`, at any depth, once per declaration.
fn collect_names<'f>(fields: &'f [FieldSpec], names: &mut Vec<&'f str>) {
    for field in fields.iter().filter_map(FieldSpec::as_field) {
        names.push(&field.name);
        collect_names(field.attributes(), names);
    }
}

fn find_field<'f>(fields: &'f [FieldSpec], name: &str) -> Option<&'f Field> {
    fields
        .iter()
        .filter_map(FieldSpec::as_field)
        .find(|field| field.name == name)
}

fn check_constant(path: &FieldPath, found: &str, allowed_values: &[String]) -> Result<(), ParseError> {
    if allowed_values.iter().any(|allowed| allowed == found) {
        Ok(())
    } else {
        Err(ParseError::InvalidConstantValue {
            path: path.clone(),
            found: found.to_string(),
            allowed: allowed_values.to_vec(),
        })
    }
}

fn parse_array(path: &FieldPath, captured: &str, item_kind: &ItemKind) -> Result<Vec<String>, ParseError> {
    let items: Vec<String> = captured
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();

    if let ItemKind::Constant { allowed_values } = item_kind {
        for item in &items {
            check_constant(path, item, allowed_values)?;
        }
    }

    Ok(items)
}

fn numbered_item() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[ \t]*(\d+)\.(?:[ \t]+(.*))?$").expect("numbered item pattern is valid")
    })
}

fn bulleted_item() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[ \t]*[-*](?:[ \t]+(.*))?$").expect("bulleted item pattern is valid")
    })
}

/// An item start: its number (numbered lists only) and first line of text.
fn item_start(kind: ListKind, line: &str) -> Option<(Option<&str>, &str)> {
    match kind {
        ListKind::Numbered => numbered_item().captures(line).map(|caps| {
            let number = caps.get(1).map(|m| m.as_str());
            let text = caps.get(2).map_or("", |m| m.as_str());
            (number, text)
        }),
        ListKind::Bulleted => bulleted_item()
            .captures(line)
            .map(|caps| (None, caps.get(1).map_or("", |m| m.as_str()))),
    }
}

fn parse_list(path: &FieldPath, captured: &str, kind: ListKind) -> Result<Vec<String>, ParseError> {
    let mut items: Vec<Vec<&str>> = Vec::new();

    for line in captured.lines() {
        match item_start(kind, line) {
            Some((number, first)) => {
                if let Some(number) = number {
                    let expected = items.len() + 1;
                    if number.parse::<usize>().ok() != Some(expected) {
                        return Err(ParseError::MalformedListItem {
                            path: path.clone(),
                            reason: format!("expected item {expected}, found item {number}"),
                        });
                    }
                }
                items.push(vec![first]);
            }
            None => match items.last_mut() {
                Some(item) => item.push(line),
                None if line.trim().is_empty() => {}
                None => trace!(field = %path, "Ignoring text before the first list item"),
            },
        }
    }

    items
        .into_iter()
        .enumerate()
        .map(|(i, lines)| {
            let text = lines
                .iter()
                .map(|line| line.trim())
                .collect::<Vec<_>>()
                .join("\n")
                .trim()
                .to_string();
            if text.is_empty() {
                Err(ParseError::MalformedListItem {
                    path: path.clone(),
                    reason: format!("item {} is empty", i + 1),
                })
            } else {
                Ok(text)
            }
        })
        .collect()
}
