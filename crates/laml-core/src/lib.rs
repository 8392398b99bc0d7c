//! # laml-core
//!
//! The LAML protocol engine.
//!
//! A [`Protocol`] is declared once with the [`Schema`] builder and then used
//! in two directions:
//! - [`Protocol::render`] produces the instruction block describing the
//!   response format, for inclusion in a prompt
//! - [`Protocol::parse`] turns the model's raw response back into a
//!   [`Value`] tree, or a [`ParseError`] naming the offending field
//!
//! [`print`] renders any value tree in the same indented notation, for
//! embedding worked examples and existing resources into prompts.
//!
//! ```
//! use laml_core::Schema;
//!
//! let protocol = Schema::new()
//!     .text("SUMMARY", "One sentence summary.")
//!     .constant("MOOD", ["HAPPY", "SAD"], "Overall mood.")
//!     .build()
//!     .unwrap();
//!
//! let value = protocol.parse("SUMMARY: A fine day.\nMOOD: HAPPY").unwrap();
//! assert_eq!(value.text_at(&["MOOD"]), Some("HAPPY"));
//! ```

mod config;
mod output;
mod parser;
mod printer;
mod protocol;
pub mod protocols;
mod render;
mod schema;

pub use config::{
    CommentEntry, ConfigError, ConfigWarning, FieldConfig, FieldEntry, FieldType, SchemaDocument,
};
pub use laml_proto::{
    Field, FieldKind, FieldPath, FieldSpec, ItemKind, ListKind, Map, ParseError, SchemaError,
    Value,
};
pub use output::ParserOutput;
pub use printer::print;
pub use protocol::Protocol;
pub use schema::Schema;
