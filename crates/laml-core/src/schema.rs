//! Schema builder for declaring protocols.
//!
//! ```
//! use laml_core::{ItemKind, Schema};
//!
//! let agent = Schema::new()
//!     .text("agent_type", "Agent type in snake_case.")
//!     .array("tools", ItemKind::Text, "Tools the agent may use.");
//!
//! let protocol = Schema::new()
//!     .comment("Respond in the following format.")
//!     .constant("RESPONSE_TYPE", ["CREATE", "SKIP"], "What to do.")
//!     .optional_object("RESPONSE_CREATE", "Only when RESPONSE_TYPE is CREATE.", agent)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(protocol.fields().len(), 3);
//! ```

use crate::Protocol;
use laml_proto::{Field, FieldKind, FieldPath, FieldSpec, ItemKind, ListKind, SchemaError};
use std::collections::HashSet;
use tracing::debug;

/// Append-only builder accumulating field specifications in call order.
///
/// Every method consumes the builder and returns it with one more element.
/// Nothing is validated until [`Schema::build`].
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a required free-text field.
    pub fn text(self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.field(Field::new(name, FieldKind::Text).with_description(description))
    }

    /// Appends an optional free-text field.
    pub fn optional_text(self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.field(
            Field::new(name, FieldKind::Text)
                .with_description(description)
                .optional(),
        )
    }

    /// Appends a required field restricted to `allowed_values`.
    pub fn constant<I, S>(
        self,
        name: impl Into<String>,
        allowed_values: I,
        description: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field(Field::new(name, constant_kind(allowed_values)).with_description(description))
    }

    /// Appends an optional field restricted to `allowed_values`.
    pub fn optional_constant<I, S>(
        self,
        name: impl Into<String>,
        allowed_values: I,
        description: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field(
            Field::new(name, constant_kind(allowed_values))
                .with_description(description)
                .optional(),
        )
    }

    /// Appends a required nested object built from `attributes`.
    pub fn object(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        attributes: Schema,
    ) -> Self {
        self.field(Field::new(name, attributes.into_object_kind()).with_description(description))
    }

    /// Appends an optional nested object.
    ///
    /// The description should say when the section is expected, e.g.
    /// "Only when RESPONSE_TYPE is CREATE".
    pub fn optional_object(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        attributes: Schema,
    ) -> Self {
        self.field(
            Field::new(name, attributes.into_object_kind())
                .with_description(description)
                .optional(),
        )
    }

    /// Appends a required comma-separated array.
    pub fn array(
        self,
        name: impl Into<String>,
        item_kind: ItemKind,
        description: impl Into<String>,
    ) -> Self {
        self.field(Field::new(name, FieldKind::InlineArray { item_kind }).with_description(description))
    }

    /// Appends an optional comma-separated array.
    pub fn optional_array(
        self,
        name: impl Into<String>,
        item_kind: ItemKind,
        description: impl Into<String>,
    ) -> Self {
        self.field(
            Field::new(name, FieldKind::InlineArray { item_kind })
                .with_description(description)
                .optional(),
        )
    }

    /// Appends a required one-item-per-line list.
    pub fn list(self, name: impl Into<String>, kind: ListKind, description: impl Into<String>) -> Self {
        self.field(Field::new(name, FieldKind::List { kind }).with_description(description))
    }

    /// Appends an optional one-item-per-line list.
    pub fn optional_list(
        self,
        name: impl Into<String>,
        kind: ListKind,
        description: impl Into<String>,
    ) -> Self {
        self.field(
            Field::new(name, FieldKind::List { kind })
                .with_description(description)
                .optional(),
        )
    }

    /// Appends a render-only instruction line.
    pub fn comment(mut self, text: impl Into<String>) -> Self {
        self.fields.push(FieldSpec::Comment(text.into()));
        self
    }

    /// Appends a fully specified field.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(FieldSpec::Field(field));
        self
    }

    /// Returns the number of elements appended so far, comments included.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validates the accumulated fields and freezes them into a protocol.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, walking fields in declaration order
    /// and descending into objects before moving on:
    /// - [`SchemaError::InvalidFieldName`] for empty names or names containing
    ///   whitespace, `:` or `.`
    /// - [`SchemaError::DuplicateFieldName`] for a name repeated at one level
    /// - [`SchemaError::EmptyAllowedValues`] / [`SchemaError::DuplicateAllowedValue`]
    ///   for constants and constant array items
    /// - [`SchemaError::EmptyObjectAttributes`] for objects without fields
    pub fn build(self) -> Result<Protocol, SchemaError> {
        validate_fields(&self.fields, &FieldPath::root())?;
        debug!(fields = self.fields.len(), "Protocol built");
        Ok(Protocol::new(self.fields))
    }

    pub(crate) fn into_object_kind(self) -> FieldKind {
        FieldKind::Object {
            attributes: self.fields,
        }
    }
}

fn constant_kind<I, S>(allowed_values: I) -> FieldKind
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    FieldKind::Constant {
        allowed_values: allowed_values.into_iter().map(Into::into).collect(),
    }
}

fn validate_fields(fields: &[FieldSpec], parent: &FieldPath) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();

    for field in fields.iter().filter_map(FieldSpec::as_field) {
        validate_name(&field.name)?;
        let path = parent.child(&field.name);

        if !seen.insert(field.name.as_str()) {
            return Err(SchemaError::DuplicateFieldName { path });
        }

        match &field.kind {
            FieldKind::Constant { allowed_values }
            | FieldKind::InlineArray {
                item_kind: ItemKind::Constant { allowed_values },
            } => validate_allowed_values(allowed_values, &path)?,
            FieldKind::Object { attributes } => {
                if !attributes.iter().any(|spec| spec.as_field().is_some()) {
                    return Err(SchemaError::EmptyObjectAttributes { path });
                }
                validate_fields(attributes, &path)?;
            }
            FieldKind::Text
            | FieldKind::InlineArray {
                item_kind: ItemKind::Text,
            }
            | FieldKind::List { .. } => {}
        }
    }

    Ok(())
}

fn validate_name(name: &str) -> Result<(), SchemaError> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name.chars().any(char::is_whitespace) {
        Some("name contains whitespace")
    } else if name.contains(':') {
        Some("name contains ':'")
    } else if name.contains('.') {
        Some("name contains '.'")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(SchemaError::InvalidFieldName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

fn validate_allowed_values(allowed_values: &[String], path: &FieldPath) -> Result<(), SchemaError> {
    if allowed_values.is_empty() {
        return Err(SchemaError::EmptyAllowedValues { path: path.clone() });
    }

    let mut seen = HashSet::new();
    for value in allowed_values {
        if !seen.insert(value.as_str()) {
            return Err(SchemaError::DuplicateAllowedValue {
                path: path.clone(),
                value: value.clone(),
            });
        }
    }

    Ok(())
}
