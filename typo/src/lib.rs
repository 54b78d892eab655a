//! # typo
//!
//! Typed API documentation for Rust services.
//!
//! Data types describe themselves through [`Describe`]. The resolver turns
//! those descriptors into a deduplicated, cycle-safe schema graph held in a
//! [`SchemaRegistry`], and two projections consume it: an OpenAPI 3.1 document
//! and AsciiDoc field tables for prose documentation.
//!
//! ```ignore
//! use typo::{ApiDocs, Describe};
//!
//! #[derive(Describe)]
//! struct User {
//!     id:    i64,
//!     email: Option<String>,
//! }
//!
//! let docs = ApiDocs::builder()
//!     .document("get-user", |doc| {
//!         doc.get("/users/{id}", |op| {
//!             op.path_parameter("id", |p| p.schema_type::<i64>())
//!                 .response_body::<User>(|r| r.description("The user"))
//!         })
//!     })
//!     .build()?;
//! docs.generate()?;
//! ```

extern crate self as typo;

mod api_docs;
pub mod config;
/// Naming, document, and output constants
pub mod constants;
pub mod descriptor;
pub mod dsl;
/// Error type and result alias
pub mod error;
pub mod model;
pub mod openapi;
pub mod resolver;
pub mod restdocs;
pub mod schema;

pub use api_docs::ApiDocs;
pub use config::{GeneratorConfig, OutputFormat};
pub use descriptor::{Describe, TypeDescriptor};
pub use error::{Error, Result};
pub use resolver::{SharedResolver, TypeResolver};
pub use schema::{FieldDescriptor, SchemaObject, SchemaRegistry};
pub use typo_macros::Describe;
