//! Schema documents.
//!
//! Protocols can be declared in YAML instead of code:
//!
//! ```yaml
//! name: triage
//! fields:
//!   - comment: Respond in exactly this format.
//!   - name: RESPONSE_TYPE
//!     type: constant
//!     values: [DIRECT_ANSWER, CLARIFICATION]
//!   - name: RESPONSE_DIRECT_ANSWER
//!     optional: true
//!     description: "Only when RESPONSE_TYPE is DIRECT_ANSWER: the answer."
//! ```
//!
//! A document is turned into a [`Protocol`] through the [`Schema`] builder, so
//! every build-time check applies to it as well.

use crate::{Protocol, Schema};
use laml_proto::{Field, FieldKind, FieldPath, ItemKind, ListKind, SchemaError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A protocol declared as data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Optional display name, used in logs and CLI output.
    #[serde(default)]
    pub name: Option<String>,

    /// Top-level entries in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldEntry>,
}

/// One entry of a field list: a field or a free-text comment line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldEntry {
    Comment(CommentEntry),
    Field(FieldConfig),
}

/// A `comment:` entry, rendered verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommentEntry {
    pub comment: String,
}

/// A single field declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,

    #[serde(rename = "type", default)]
    pub field_type: FieldType,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub optional: bool,

    /// Allowed values for `constant` fields, or for each item of an `array`.
    #[serde(default)]
    pub values: Vec<String>,

    /// Nested entries of an `object` field.
    #[serde(default)]
    pub attributes: Vec<FieldEntry>,

    /// Item style of a `list` field.
    #[serde(default)]
    pub style: ListKind,
}

/// The `type:` of a field declaration. Defaults to `text`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    #[default]
    Text,
    Constant,
    Object,
    Array,
    List,
}

impl SchemaDocument {
    /// Parses a YAML schema document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let document: Self = serde_yaml::from_str(yaml)?;
        debug!(
            name = document.name.as_deref().unwrap_or("<unnamed>"),
            entries = document.fields.len(),
            "Schema document loaded"
        );
        Ok(document)
    }

    /// Checks the document and returns non-fatal warnings.
    ///
    /// Errors are anything that would keep [`into_protocol`](Self::into_protocol)
    /// from succeeding.
    pub fn validate(&self) -> Result<Vec<ConfigWarning>, ConfigError> {
        self.to_schema()?.build()?;

        let mut warnings = Vec::new();
        collect_warnings(&self.fields, &FieldPath::root(), &mut warnings);

        let has_required = self
            .fields
            .iter()
            .any(|entry| matches!(entry, FieldEntry::Field(field) if !field.optional));
        if !has_required {
            warnings.push(ConfigWarning::NoRequiredFields);
        }

        Ok(warnings)
    }

    /// Converts the document into builder calls without building it.
    pub fn to_schema(&self) -> Result<Schema, ConfigError> {
        to_schema(&self.fields, &FieldPath::root())
    }

    /// Builds the protocol the document declares.
    pub fn into_protocol(self) -> Result<Protocol, ConfigError> {
        Ok(self.to_schema()?.build()?)
    }
}

fn to_schema(entries: &[FieldEntry], path: &FieldPath) -> Result<Schema, ConfigError> {
    let mut schema = Schema::new();
    for entry in entries {
        schema = match entry {
            FieldEntry::Comment(comment) => schema.comment(comment.comment.clone()),
            FieldEntry::Field(config) => schema.field(to_field(config, path)?),
        };
    }
    Ok(schema)
}

fn to_field(config: &FieldConfig, parent: &FieldPath) -> Result<Field, ConfigError> {
    let path = parent.child(&config.name);
    let invalid = |message: &str| ConfigError::Invalid {
        field: path.to_string(),
        message: message.to_string(),
    };

    if !config.values.is_empty()
        && matches!(
            config.field_type,
            FieldType::Text | FieldType::Object | FieldType::List
        )
    {
        return Err(invalid("`values` only applies to constant and array fields"));
    }
    if !config.attributes.is_empty() && config.field_type != FieldType::Object {
        return Err(invalid("`attributes` only applies to object fields"));
    }

    let kind = match config.field_type {
        FieldType::Text => FieldKind::Text,
        FieldType::Constant => FieldKind::Constant {
            allowed_values: config.values.clone(),
        },
        FieldType::Object => to_schema(&config.attributes, &path)?.into_object_kind(),
        FieldType::Array if config.values.is_empty() => FieldKind::InlineArray {
            item_kind: ItemKind::Text,
        },
        FieldType::Array => FieldKind::InlineArray {
            item_kind: ItemKind::Constant {
                allowed_values: config.values.clone(),
            },
        },
        FieldType::List => FieldKind::List { kind: config.style },
    };

    let mut field = Field::new(config.name.clone(), kind)
        .with_description(config.description.clone().unwrap_or_default());
    if config.optional {
        field = field.optional();
    }
    Ok(field)
}

fn collect_warnings(entries: &[FieldEntry], parent: &FieldPath, warnings: &mut Vec<ConfigWarning>) {
    for entry in entries {
        let FieldEntry::Field(field) = entry else {
            continue;
        };
        let path = parent.child(&field.name);

        let described = field
            .description
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty());
        if field.optional && !described {
            warnings.push(ConfigWarning::UnframedOptionalField {
                field: path.to_string(),
            });
        }

        if field.field_type != FieldType::List && field.style != ListKind::default() {
            warnings.push(ConfigWarning::IgnoredKey {
                field: path.to_string(),
                key: "style",
            });
        }

        collect_warnings(&field.attributes, &path, warnings);
    }
}

/// Non-fatal findings from [`SchemaDocument::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// An optional field whose description doesn't say when to emit it.
    UnframedOptionalField { field: String },
    /// A key that has no effect for the field's type.
    IgnoredKey { field: String, key: &'static str },
    /// Every top-level field is optional, so an empty response parses.
    NoRequiredFields,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::UnframedOptionalField { field } => write!(
                f,
                "Warning [{field}]: Optional field has no description telling the model when to include it"
            ),
            ConfigWarning::IgnoredKey { field, key } => {
                write!(f, "Warning [{field}]: Key ignored - `{key}` only applies to list fields")
            }
            ConfigWarning::NoRequiredFields => write!(
                f,
                "Warning [fields]: No required top-level fields, an empty response will parse"
            ),
        }
    }
}

/// Schema document errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid schema: {0}")]
    Schema(#[from] SchemaError),

    #[error("Invalid field '{field}': {message}")]
    Invalid { field: String, message: String },
}
