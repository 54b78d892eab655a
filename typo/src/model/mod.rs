//! Resolved operation models
//!
//! These are what the builder surface produces and what the OpenAPI and
//! snippet generators consume. Every body schema in here has already been
//! resolved against the run's registry.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::constants::{DEFAULT_CONTENT_TYPE, DEFAULT_STATUS_CODE, DEFAULT_TITLE, DEFAULT_VERSION};
use crate::descriptor::TypeDescriptor;
use crate::schema::{FieldOverrides, SchemaObject};

/// HTTP method of a documented operation
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
    /// `PATCH`
    Patch,
}

/// Where a parameter is carried
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// Templated path segment
    Path,
    /// Query string
    Query,
    /// Request header
    Header,
}

impl ParameterLocation {
    /// Title of the documentation table for this group
    pub const fn table_title(self) -> &'static str {
        match self {
            Self::Path => "Path Parameters",
            Self::Query => "Query Parameters",
            Self::Header => "Header Parameters",
        }
    }

    /// Snippet file stem for this group
    pub const fn snippet_name(self) -> &'static str {
        match self {
            Self::Path => "path-parameters",
            Self::Query => "query-parameters",
            Self::Header => "header-parameters",
        }
    }
}

/// Title, version, and description of the documented API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiInfo {
    /// API title
    pub title:       String,
    /// API version
    pub version:     String,
    /// Optional long description
    pub description: Option<String>,
}

impl Default for ApiInfo {
    fn default() -> Self {
        Self {
            title:       DEFAULT_TITLE.to_string(),
            version:     DEFAULT_VERSION.to_string(),
            description: None,
        }
    }
}

impl ApiInfo {
    /// Set the title
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the version
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// One documented parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterModel {
    /// Parameter name
    pub name:        String,
    /// Where the parameter is carried
    pub location:    ParameterLocation,
    /// Human readable description
    pub description: Option<String>,
    /// Whether callers must supply it
    pub required:    bool,
    /// Value schema
    pub schema:      SchemaObject,
    /// Example value
    pub example:     Option<Value>,
}

/// Request body of an operation
#[derive(Debug, Clone)]
pub struct RequestModel {
    /// Declared body type
    pub descriptor:      TypeDescriptor,
    /// Resolved body schema
    pub schema:          SchemaObject,
    /// Overrides declared for the body
    pub field_overrides: FieldOverrides,
    /// Media type
    pub content_type:    String,
}

/// One response of an operation; bodiless responses carry no descriptor
#[derive(Debug, Clone)]
pub struct ResponseModel {
    /// HTTP status code
    pub status_code:     u16,
    /// Response description
    pub description:     Option<String>,
    /// Declared body type
    pub descriptor:      Option<TypeDescriptor>,
    /// Resolved body schema
    pub schema:          Option<SchemaObject>,
    /// Overrides declared for the body
    pub field_overrides: FieldOverrides,
    /// Media type
    pub content_type:    String,
}

impl ResponseModel {
    /// Response without a body
    pub fn bodiless(status_code: u16, description: impl Into<String>) -> Self {
        Self {
            status_code,
            description: Some(description.into()),
            descriptor: None,
            schema: None,
            field_overrides: FieldOverrides::new(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }

    /// Whether the response documents a body
    pub const fn has_body(&self) -> bool {
        self.schema.is_some()
    }
}

impl Default for ResponseModel {
    fn default() -> Self {
        Self {
            status_code:     DEFAULT_STATUS_CODE,
            description:     None,
            descriptor:      None,
            schema:          None,
            field_overrides: FieldOverrides::new(),
            content_type:    DEFAULT_CONTENT_TYPE.to_string(),
        }
    }
}

/// A documented HTTP operation
#[derive(Debug, Clone)]
pub struct OperationModel {
    /// HTTP method
    pub method:       HttpMethod,
    /// Path template
    pub path:         String,
    /// One-line summary
    pub summary:      Option<String>,
    /// Long description
    pub description:  Option<String>,
    /// Grouping tags
    pub tags:         Vec<String>,
    /// Unique operation id
    pub operation_id: Option<String>,
    /// Request body
    pub request:      Option<RequestModel>,
    /// Own responses followed by the applicable common responses
    pub responses:    Vec<ResponseModel>,
    /// Parameters in declaration order
    pub parameters:   Vec<ParameterModel>,
    /// Whether the operation is deprecated
    pub deprecated:   bool,
}

impl OperationModel {
    /// Parameters carried in `location`, in declaration order
    pub fn parameters_in(&self, location: ParameterLocation) -> Vec<&ParameterModel> {
        self.parameters
            .iter()
            .filter(|parameter| parameter.location == location)
            .collect()
    }
}

/// A named document holding exactly one operation
#[derive(Debug, Clone)]
pub struct DocumentModel {
    /// Identifier; also the snippet directory name
    pub identifier: String,
    /// The documented operation
    pub operation:  OperationModel,
}
