//! OpenAPI 3.1 output
//!
//! [`OpenApiGenerator`] projects resolved documents and the schema registry
//! into an [`OpenApiDocument`]; the writer functions encode it to disk.

mod converter;
mod document;
mod generator;
mod writer;

pub use converter::convert;
pub use document::{
    Components, Info, MediaType, OpenApiDocument, Operation, Parameter, PathItem, RequestBody,
    Response, WireDiscriminator, WireSchema,
};
pub use generator::OpenApiGenerator;
pub use writer::{to_json, to_yaml, write_json, write_yaml};
