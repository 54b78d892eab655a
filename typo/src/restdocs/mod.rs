//! AsciiDoc documentation snippets
//!
//! Request and response bodies are flattened into path/type/description rows
//! and rendered as tables, one file per table, grouped by document identifier.

mod flattener;
mod generator;
mod templates;

pub use flattener::{FieldFlattener, FlattenedField};
pub use generator::{RestDocsGenerator, write_snippet};
pub use templates::{parameters_table, request_fields_table, response_fields_table};
