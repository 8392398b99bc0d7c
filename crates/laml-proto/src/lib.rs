//! # laml-proto
//!
//! Shared types and error definitions for LAML, the structured text protocol
//! used to describe and parse LLM responses.
//!
//! This crate provides the foundational abstractions used across all LAML
//! crates, including:
//! - The order-preserving [`Value`] tree produced by parsing
//! - [`FieldSpec`] definitions describing one schema element
//! - [`FieldPath`] for naming nested fields in diagnostics
//! - Build-time and parse-time error types

mod error;
mod field;
mod path;
mod value;

pub use error::{ParseError, SchemaError};
pub use field::{Field, FieldKind, FieldSpec, ItemKind, ListKind};
pub use path::FieldPath;
pub use value::{Map, Value};
