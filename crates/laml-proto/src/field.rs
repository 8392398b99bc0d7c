//! Field specifications: the elements a protocol is declared from.

use serde::{Deserialize, Serialize};

/// One declared element of a protocol.
///
/// Comments are render-only annotations; they have no name and never
/// produce a value when parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSpec {
    /// A named field that is rendered and parsed.
    Field(Field),
    /// A standalone instructional line.
    Comment(String),
}

impl FieldSpec {
    /// Returns the field if this is not a comment.
    pub fn as_field(&self) -> Option<&Field> {
        match self {
            FieldSpec::Field(field) => Some(field),
            FieldSpec::Comment(_) => None,
        }
    }

    /// Returns the field name, or `None` for comments.
    pub fn name(&self) -> Option<&str> {
        self.as_field().map(|field| field.name.as_str())
    }
}

impl From<Field> for FieldSpec {
    fn from(field: Field) -> Self {
        FieldSpec::Field(field)
    }
}

/// A named field with its marker, description, presence and shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Marker name, written as `NAME:` in prompts and responses.
    pub name: String,

    /// Instruction text shown next to the marker.
    pub description: Option<String>,

    /// Optional fields may be absent from a response.
    pub is_optional: bool,

    /// The field's shape.
    pub kind: FieldKind,
}

impl Field {
    /// Creates a required field with no description.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            description: None,
            is_optional: false,
            kind,
        }
    }

    /// Sets the description. An empty description is treated as none.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = (!description.is_empty()).then_some(description);
        self
    }

    /// Marks the field optional.
    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    /// Returns true if a response must contain this field.
    pub fn is_required(&self) -> bool {
        !self.is_optional
    }

    /// Returns the nested attributes of an object field; empty otherwise.
    pub fn attributes(&self) -> &[FieldSpec] {
        match &self.kind {
            FieldKind::Object { attributes } => attributes,
            _ => &[],
        }
    }
}

/// The closed set of field shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, possibly spanning several lines.
    Text,
    /// One token out of an enumerated set.
    Constant { allowed_values: Vec<String> },
    /// A nested record.
    Object { attributes: Vec<FieldSpec> },
    /// Comma-separated items on one line.
    InlineArray { item_kind: ItemKind },
    /// One item per line.
    List { kind: ListKind },
}

impl FieldKind {
    /// Short lowercase name of the shape, used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Constant { .. } => "constant",
            FieldKind::Object { .. } => "object",
            FieldKind::InlineArray { .. } => "array",
            FieldKind::List { .. } => "list",
        }
    }
}

/// What each item of an inline array may contain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ItemKind {
    /// Any text without commas.
    #[default]
    Text,
    /// One token out of an enumerated set.
    Constant { allowed_values: Vec<String> },
}

/// How list items are introduced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    /// `1. first`, `2. second`, ... numbered from one without gaps.
    #[default]
    Numbered,
    /// `- first`, `- second` (`*` is accepted as well).
    Bulleted,
}
