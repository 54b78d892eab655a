use std::collections::HashSet;

use serde_json::Value;

use super::body::{RequestBodyBuilder, ResponseBodyBuilder};
use crate::descriptor::{Describe, TypeDescriptor};
use crate::model::{HttpMethod, OperationModel, ParameterLocation, ParameterModel, ResponseModel};
use crate::resolver::TypeResolver;
use crate::schema::SchemaObject;

/// Declares one HTTP operation
#[derive(Debug, Clone)]
pub struct OperationBuilder {
    method:       HttpMethod,
    path:         String,
    summary:      Option<String>,
    description:  Option<String>,
    tags:         Vec<String>,
    operation_id: Option<String>,
    deprecated:   bool,
    request:      Option<RequestBodyBuilder>,
    responses:    Vec<ResponseBodyBuilder>,
    parameters:   Vec<ParameterBuilder>,
    excluded:     HashSet<u16>,
}

impl OperationBuilder {
    pub(crate) fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            summary: None,
            description: None,
            tags: Vec::new(),
            operation_id: None,
            deprecated: false,
            request: None,
            responses: Vec::new(),
            parameters: Vec::new(),
            excluded: HashSet::new(),
        }
    }

    /// One-line summary
    #[must_use]
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Long description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Grouping tags, replacing any set before
    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Unique operation id
    #[must_use]
    pub fn operation_id(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = Some(operation_id.into());
        self
    }

    /// Mark the operation deprecated
    #[must_use]
    pub const fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Request body of type `T`
    #[must_use]
    pub fn request_body<T: Describe + ?Sized>(
        mut self,
        f: impl FnOnce(RequestBodyBuilder) -> RequestBodyBuilder,
    ) -> Self {
        self.request = Some(f(RequestBodyBuilder::new(T::describe())));
        self
    }

    /// Response with a body of type `T`
    #[must_use]
    pub fn response_body<T: Describe + ?Sized>(
        mut self,
        f: impl FnOnce(ResponseBodyBuilder) -> ResponseBodyBuilder,
    ) -> Self {
        self.responses.push(f(ResponseBodyBuilder::new(Some(T::describe()))));
        self
    }

    /// Response without a body
    #[must_use]
    pub fn response(mut self, status_code: u16, description: impl Into<String>) -> Self {
        self.responses.push(
            ResponseBodyBuilder::new(None)
                .status_code(status_code)
                .description(description),
        );
        self
    }

    /// Templated path parameter; required unless set otherwise
    #[must_use]
    pub fn path_parameter(
        self,
        name: impl Into<String>,
        f: impl FnOnce(ParameterBuilder) -> ParameterBuilder,
    ) -> Self {
        self.parameter(ParameterLocation::Path, name, f)
    }

    /// Query string parameter; optional unless set otherwise
    #[must_use]
    pub fn query_parameter(
        self,
        name: impl Into<String>,
        f: impl FnOnce(ParameterBuilder) -> ParameterBuilder,
    ) -> Self {
        self.parameter(ParameterLocation::Query, name, f)
    }

    /// Header parameter; optional unless set otherwise
    #[must_use]
    pub fn header_parameter(
        self,
        name: impl Into<String>,
        f: impl FnOnce(ParameterBuilder) -> ParameterBuilder,
    ) -> Self {
        self.parameter(ParameterLocation::Header, name, f)
    }

    /// Leave out the common responses with these status codes
    #[must_use]
    pub fn exclude_common_responses(mut self, status_codes: impl IntoIterator<Item = u16>) -> Self {
        self.excluded.extend(status_codes);
        self
    }

    fn parameter(
        mut self,
        location: ParameterLocation,
        name: impl Into<String>,
        f: impl FnOnce(ParameterBuilder) -> ParameterBuilder,
    ) -> Self {
        self.parameters.push(f(ParameterBuilder::new(name, location)));
        self
    }

    /// Resolve every body and parameter, then append the applicable common responses
    pub(crate) fn resolve(self, resolver: &mut TypeResolver, common: &[ResponseModel]) -> OperationModel {
        let request = self.request.map(|request| request.resolve(resolver));
        let parameters = self
            .parameters
            .into_iter()
            .map(|parameter| parameter.resolve(resolver))
            .collect();

        let declared: HashSet<u16> = self
            .responses
            .iter()
            .map(ResponseBodyBuilder::declared_status)
            .collect();
        let mut responses: Vec<ResponseModel> = self
            .responses
            .into_iter()
            .map(|response| response.resolve(resolver))
            .collect();
        responses.extend(
            common
                .iter()
                .filter(|response| {
                    !declared.contains(&response.status_code)
                        && !self.excluded.contains(&response.status_code)
                })
                .cloned(),
        );

        OperationModel {
            method: self.method,
            path: self.path,
            summary: self.summary,
            description: self.description,
            tags: self.tags,
            operation_id: self.operation_id,
            request,
            responses,
            parameters,
            deprecated: self.deprecated,
        }
    }
}

#[derive(Debug, Clone)]
enum ParameterSchema {
    Explicit(SchemaObject),
    Typed(TypeDescriptor),
}

/// Declares one parameter; the schema is a plain string unless set
#[derive(Debug, Clone)]
pub struct ParameterBuilder {
    name:        String,
    location:    ParameterLocation,
    description: Option<String>,
    required:    bool,
    example:     Option<Value>,
    schema:      ParameterSchema,
}

impl ParameterBuilder {
    fn new(name: impl Into<String>, location: ParameterLocation) -> Self {
        Self {
            name: name.into(),
            location,
            description: None,
            required: location == ParameterLocation::Path,
            example: None,
            schema: ParameterSchema::Explicit(SchemaObject::string()),
        }
    }

    /// Parameter description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether callers must supply the parameter
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Example value
    #[must_use]
    pub fn example(mut self, example: impl Into<Value>) -> Self {
        self.example = Some(example.into());
        self
    }

    /// Use an explicit schema
    #[must_use]
    pub fn schema(mut self, schema: SchemaObject) -> Self {
        self.schema = ParameterSchema::Explicit(schema);
        self
    }

    /// Use the schema resolved from `T`
    #[must_use]
    pub fn schema_type<T: Describe + ?Sized>(mut self) -> Self {
        self.schema = ParameterSchema::Typed(T::describe());
        self
    }

    fn resolve(self, resolver: &mut TypeResolver) -> ParameterModel {
        let schema = match self.schema {
            ParameterSchema::Explicit(schema) => schema,
            ParameterSchema::Typed(descriptor) => resolver.resolve(&descriptor),
        };
        ParameterModel {
            name: self.name,
            location: self.location,
            description: self.description,
            required: self.required,
            schema,
            example: self.example,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, reason = "test code")]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::schema::SchemaKind;

    #[test]
    fn parameter_defaults_depend_on_location() {
        let mut resolver = TypeResolver::new();
        let operation = OperationBuilder::new(HttpMethod::Get, "/users/{id}")
            .path_parameter("id", |p| p.description("User id").schema_type::<i64>())
            .query_parameter("expand", |p| p)
            .header_parameter("X-Request-Id", |p| p.required(true).example("abc"))
            .resolve(&mut resolver, &[]);

        let [id, expand, request_id] = operation.parameters.as_slice() else {
            panic!("expected three parameters");
        };
        assert!(id.required);
        assert_eq!(id.schema.kind, SchemaKind::Integer);
        assert_eq!(id.schema.format.as_deref(), Some("int64"));
        assert!(!expand.required);
        assert_eq!(expand.schema.kind, SchemaKind::String);
        assert!(request_id.required);
        assert_eq!(request_id.example, Some(json!("abc")));
    }

    #[test]
    fn common_responses_follow_own_unless_shadowed_or_excluded() {
        let common = vec![
            ResponseModel::bodiless(400, "Bad Request"),
            ResponseModel::bodiless(404, "Not Found"),
            ResponseModel::bodiless(500, "Server Error"),
        ];
        let mut resolver = TypeResolver::new();
        let operation = OperationBuilder::new(HttpMethod::Delete, "/users/{id}")
            .response(204, "Deleted")
            .response(404, "No such user")
            .exclude_common_responses([500])
            .resolve(&mut resolver, &common);

        let statuses: Vec<(u16, &str)> = operation
            .responses
            .iter()
            .map(|r| (r.status_code, r.description.as_deref().unwrap_or_default()))
            .collect();
        assert_eq!(
            statuses,
            vec![(204, "Deleted"), (404, "No such user"), (400, "Bad Request")]
        );
    }

    #[test]
    fn metadata_is_carried_over() {
        let mut resolver = TypeResolver::new();
        let operation = OperationBuilder::new(HttpMethod::Patch, "/users/{id}")
            .summary("Patch user")
            .description("Partial update")
            .tags(["users", "admin"])
            .operation_id("patchUser")
            .deprecated()
            .resolve(&mut resolver, &[]);

        assert_eq!(operation.method, HttpMethod::Patch);
        assert_eq!(operation.tags, vec!["users".to_string(), "admin".to_string()]);
        assert_eq!(operation.operation_id.as_deref(), Some("patchUser"));
        assert!(operation.deprecated);
        assert!(operation.request.is_none());
    }
}
