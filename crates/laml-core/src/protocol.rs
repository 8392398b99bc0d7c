//! The immutable protocol produced by [`Schema::build`](crate::Schema::build).

use crate::{parser, render};
use laml_proto::{Field, FieldSpec, ParseError, Value};

/// An immutable, ordered list of field specifications.
///
/// A protocol is built once and shared read-only; rendering and parsing
/// never mutate it, so it can be used from any number of threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Protocol {
    fields: Vec<FieldSpec>,
    /// Every field name at every depth, in first-declaration order.
    markers: Vec<String>,
}

impl Protocol {
    pub(crate) fn new(fields: Vec<FieldSpec>) -> Self {
        let mut markers = Vec::new();
        collect_markers(&fields, &mut markers);
        Self { fields, markers }
    }

    /// Returns the top-level field specifications in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Looks up a top-level field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .filter_map(FieldSpec::as_field)
            .find(|field| field.name == name)
    }

    /// Names recognized as `NAME:` markers when parsing.
    pub(crate) fn marker_names(&self) -> &[String] {
        &self.markers
    }

    /// Renders the instruction block describing the response format.
    ///
    /// The output depends only on the protocol, so it is safe to snapshot.
    pub fn render(&self) -> String {
        render::render(self)
    }

    /// Parses a raw model response.
    ///
    /// Text before the first recognized marker is ignored.
    pub fn parse(&self, raw: &str) -> Result<Value, ParseError> {
        parser::parse(self, raw, false)
    }

    /// Parses a raw model response, rejecting text before the first marker
    /// with [`ParseError::UnrecognizedTrailingContent`].
    pub fn parse_strict(&self, raw: &str) -> Result<Value, ParseError> {
        parser::parse(self, raw, true)
    }
}

fn collect_markers(fields: &[FieldSpec], markers: &mut Vec<String>) {
    for field in fields.iter().filter_map(FieldSpec::as_field) {
        if !markers.contains(&field.name) {
            markers.push(field.name.clone());
        }
        collect_markers(field.attributes(), markers);
    }
}
