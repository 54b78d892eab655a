//! Wire types of an OpenAPI 3.1 document
//!
//! Absent optional attributes are skipped on serialization, never written as
//! `null`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::model::ParameterLocation;

/// Root of a generated document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApiDocument {
    /// OpenAPI version
    pub openapi:    String,
    /// API metadata
    pub info:       Info,
    /// Path templates to their operations, in declaration order
    pub paths:      IndexMap<String, PathItem>,
    /// Registered schemas
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
}

/// API metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    /// API title
    pub title:       String,
    /// API version
    pub version:     String,
    /// Long description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Operations of one path template, one slot per method
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    /// `GET` operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get:    Option<Operation>,
    /// `POST` operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post:   Option<Operation>,
    /// `PUT` operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put:    Option<Operation>,
    /// `DELETE` operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    /// `PATCH` operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch:  Option<Operation>,
}

/// One operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Grouping tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags:         Vec<String>,
    /// One-line summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary:      Option<String>,
    /// Long description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description:  Option<String>,
    /// Unique operation id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Parameters in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters:   Vec<Parameter>,
    /// Request body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status code
    pub responses:    IndexMap<String, Response>,
    /// Set only when the operation is deprecated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated:   Option<bool>,
}

/// One parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name
    pub name:        String,
    /// Location
    #[serde(rename = "in")]
    pub location:    ParameterLocation,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether callers must supply it
    pub required:    bool,
    /// Value schema
    pub schema:      WireSchema,
    /// Example value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example:     Option<Value>,
}

/// Request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    /// Media type to body schema
    pub content:  IndexMap<String, MediaType>,
    /// Always `true` for documented bodies
    pub required: bool,
}

/// Body schema for one media type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    /// Body schema
    pub schema: WireSchema,
}

/// One response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Description
    pub description: String,
    /// Media type to body schema; absent for bodiless responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content:     Option<IndexMap<String, MediaType>>,
}

/// Reusable component tables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    /// Registered schemas in registration order
    pub schemas: IndexMap<String, WireSchema>,
}

/// Discriminator of a `oneOf`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDiscriminator {
    /// Selector property
    pub property_name: String,
    /// Variant name to reference path
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub mapping:       IndexMap<String, String>,
}

/// JSON Schema node as written to the document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSchema {
    /// Reference path (`#/components/schemas/User`)
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub ref_path:              Option<String>,
    /// Schema type (`string`, `object`, ...)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type:           Option<String>,
    /// Format tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format:                Option<String>,
    /// Title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title:                 Option<String>,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description:           Option<String>,
    /// Example
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example:               Option<Value>,
    /// Enumeration values
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values:           Option<Vec<String>>,
    /// Inclusive lower bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum:               Option<Number>,
    /// Inclusive upper bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum:               Option<Number>,
    /// Minimum length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length:            Option<u64>,
    /// Maximum length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length:            Option<u64>,
    /// Pattern
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern:               Option<String>,
    /// Array item schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items:                 Option<Box<WireSchema>>,
    /// Object properties in declaration order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties:            Option<IndexMap<String, WireSchema>>,
    /// Required property names in declaration order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required:              Option<Vec<String>>,
    /// Value schema of an open map
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<WireSchema>>,
    /// Alternatives of a composition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub one_of:                Option<Vec<WireSchema>>,
    /// Variant selector of a composition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator:         Option<WireDiscriminator>,
    /// Set only when the value may be null
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable:              Option<bool>,
    /// Set only when deprecated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated:            Option<bool>,
}
