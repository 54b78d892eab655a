//! Document models to OpenAPI document

use indexmap::IndexMap;

use super::converter::convert;
use super::document::{
    Components, Info, MediaType, OpenApiDocument, Operation, Parameter, PathItem, RequestBody,
    Response,
};
use crate::constants::{DEFAULT_RESPONSE_DESCRIPTION, DEFAULT_STATUS_CODE, OPENAPI_VERSION};
use crate::model::{ApiInfo, DocumentModel, HttpMethod, OperationModel};
use crate::schema::SchemaRegistry;

/// Builds an [`OpenApiDocument`] from resolved documents and their registry
#[derive(Debug, Clone, Copy)]
pub struct OpenApiGenerator<'a> {
    info:     &'a ApiInfo,
    registry: &'a SchemaRegistry,
}

impl<'a> OpenApiGenerator<'a> {
    /// Create a generator over `registry`
    pub const fn new(info: &'a ApiInfo, registry: &'a SchemaRegistry) -> Self {
        Self { info, registry }
    }

    /// Generate the document; paths keep the order documents were declared in
    pub fn generate(&self, documents: &[DocumentModel]) -> OpenApiDocument {
        let mut paths: IndexMap<String, PathItem> = IndexMap::new();
        for document in documents {
            let operation = &document.operation;
            let item = paths.entry(operation.path.clone()).or_default();
            let slot = match operation.method {
                HttpMethod::Get => &mut item.get,
                HttpMethod::Post => &mut item.post,
                HttpMethod::Put => &mut item.put,
                HttpMethod::Delete => &mut item.delete,
                HttpMethod::Patch => &mut item.patch,
            };
            *slot = Some(build_operation(operation));
        }

        let components = (!self.registry.is_empty()).then(|| Components {
            schemas: self
                .registry
                .entries()
                .iter()
                .map(|(name, schema)| (name.clone(), convert(schema)))
                .collect(),
        });

        OpenApiDocument {
            openapi: OPENAPI_VERSION.to_string(),
            info: Info {
                title:       self.info.title.clone(),
                version:     self.info.version.clone(),
                description: self.info.description.clone(),
            },
            paths,
            components,
        }
    }
}

fn build_operation(operation: &OperationModel) -> Operation {
    let parameters = operation
        .parameters
        .iter()
        .map(|parameter| Parameter {
            name:        parameter.name.clone(),
            location:    parameter.location,
            description: parameter.description.clone(),
            required:    parameter.required,
            schema:      convert(&parameter.schema),
            example:     parameter.example.clone(),
        })
        .collect();

    let request_body = operation.request.as_ref().map(|request| RequestBody {
        content:  IndexMap::from([(
            request.content_type.clone(),
            MediaType {
                schema: convert(&request.schema),
            },
        )]),
        required: true,
    });

    let mut responses = IndexMap::new();
    if operation.responses.is_empty() {
        responses.insert(
            DEFAULT_STATUS_CODE.to_string(),
            Response {
                description: DEFAULT_RESPONSE_DESCRIPTION.to_string(),
                content:     None,
            },
        );
    }
    for response in &operation.responses {
        responses.insert(
            response.status_code.to_string(),
            Response {
                description: response
                    .description
                    .clone()
                    .unwrap_or_else(|| DEFAULT_RESPONSE_DESCRIPTION.to_string()),
                content:     response.schema.as_ref().map(|schema| {
                    IndexMap::from([(
                        response.content_type.clone(),
                        MediaType {
                            schema: convert(schema),
                        },
                    )])
                }),
            },
        );
    }

    Operation {
        tags: operation.tags.clone(),
        summary: operation.summary.clone(),
        description: operation.description.clone(),
        operation_id: operation.operation_id.clone(),
        parameters,
        request_body,
        responses,
        deprecated: operation.deprecated.then_some(true),
    }
}
