//! Snippet files per document

use std::path::{Path, PathBuf};

use error_stack::Report;
use strum::IntoEnumIterator;
use tracing::{debug, info};

use super::flattener::FieldFlattener;
use super::templates;
use crate::constants::SNIPPET_EXTENSION;
use crate::error::{Error, Result};
use crate::model::{DocumentModel, ParameterLocation};
use crate::schema::SchemaRegistry;

const REQUEST_FIELDS_SNIPPET: &str = "request-fields";
const RESPONSE_FIELDS_SNIPPET: &str = "response-fields";

/// Writes the field and parameter tables of each document
#[derive(Debug, Clone, Copy)]
pub struct RestDocsGenerator<'a> {
    flattener: FieldFlattener<'a>,
}

impl<'a> RestDocsGenerator<'a> {
    /// Create a generator over the registry the documents were resolved into
    pub const fn new(registry: &'a SchemaRegistry) -> Self {
        Self {
            flattener: FieldFlattener::new(registry),
        }
    }

    /// Write every snippet under `snippet_dir/<identifier>/`, returning the written paths
    pub fn generate(&self, documents: &[DocumentModel], snippet_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for document in documents {
            for (name, content) in self.render(document) {
                if let Some(path) = write_snippet(snippet_dir, &document.identifier, &name, &content)? {
                    written.push(path);
                }
            }
        }
        info!(
            documents = documents.len(),
            snippets = written.len(),
            "Generated documentation snippets in {}",
            snippet_dir.display()
        );
        Ok(written)
    }

    /// Snippet name and content pairs for one document
    pub fn render(&self, document: &DocumentModel) -> Vec<(String, String)> {
        let operation = &document.operation;
        let mut snippets = Vec::new();

        if let Some(request) = &operation.request {
            let fields = self.flattener.flatten(&request.schema, &request.field_overrides);
            snippets.push((
                REQUEST_FIELDS_SNIPPET.to_string(),
                templates::request_fields_table(&fields),
            ));
        }

        let mut first_body = true;
        for response in &operation.responses {
            let Some(schema) = &response.schema else {
                continue;
            };
            let content = templates::response_fields_table(
                &self.flattener.flatten(schema, &response.field_overrides),
            );
            if first_body {
                snippets.push((RESPONSE_FIELDS_SNIPPET.to_string(), content.clone()));
                first_body = false;
            }
            snippets.push((
                format!("{RESPONSE_FIELDS_SNIPPET}-{}", response.status_code),
                content,
            ));
        }

        for location in ParameterLocation::iter() {
            let parameters = operation.parameters_in(location);
            if parameters.is_empty() {
                continue;
            }
            snippets.push((
                location.snippet_name().to_string(),
                templates::parameters_table(
                    location.table_title(),
                    &self.flattener.parameters(&parameters),
                ),
            ));
        }

        snippets
    }
}

/// Write one snippet; blank content is skipped and yields `None`
pub fn write_snippet(
    snippet_dir: &Path,
    identifier: &str,
    name: &str,
    content: &str,
) -> Result<Option<PathBuf>> {
    if content.trim().is_empty() {
        debug!(identifier, snippet = name, "Skipping empty snippet");
        return Ok(None);
    }

    let dir = snippet_dir.join(identifier);
    std::fs::create_dir_all(&dir)
        .map_err(|e| Report::new(Error::io_failed("create directory", &dir, e)))?;
    let path = dir.join(format!("{name}.{SNIPPET_EXTENSION}"));
    std::fs::write(&path, content).map_err(|e| Report::new(Error::io_failed("write", &path, e)))?;
    debug!(path = %path.display(), "Wrote snippet");
    Ok(Some(path))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, reason = "test code")]
mod tests {
    use super::*;
    use crate::descriptor::{AggregateDef, FieldDef, PrimitiveKind, TypeDescriptor};
    use crate::model::{HttpMethod, OperationModel, ParameterModel, RequestModel, ResponseModel};
    use crate::resolver::TypeResolver;
    use crate::schema::{FieldOverrides, SchemaObject};

    fn document(resolver: &mut TypeResolver) -> DocumentModel {
        let user = TypeDescriptor::aggregate(AggregateDef::new("app::User").fields(|| {
            vec![FieldDef::new("id", TypeDescriptor::primitive(PrimitiveKind::Int64))]
        }));
        let schema = resolver.resolve(&user);

        DocumentModel {
            identifier: "update-user".to_string(),
            operation:  OperationModel {
                method:       HttpMethod::Put,
                path:         "/users/{id}".to_string(),
                summary:      None,
                description:  None,
                tags:         Vec::new(),
                operation_id: None,
                request:      Some(RequestModel {
                    descriptor:      user.clone(),
                    schema:          schema.clone(),
                    field_overrides: FieldOverrides::new(),
                    content_type:    "application/json".to_string(),
                }),
                responses:    vec![
                    ResponseModel {
                        descriptor: Some(user),
                        schema: Some(schema),
                        ..ResponseModel::default()
                    },
                    ResponseModel::bodiless(404, "Not Found"),
                ],
                parameters:   vec![ParameterModel {
                    name:        "id".to_string(),
                    location:    ParameterLocation::Path,
                    description: Some("User id".to_string()),
                    required:    true,
                    schema:      SchemaObject::integer(),
                    example:     None,
                }],
                deprecated:   false,
            },
        }
    }

    #[test]
    fn renders_each_table_once() {
        let mut resolver = TypeResolver::new();
        let document = document(&mut resolver);
        let names: Vec<String> = RestDocsGenerator::new(resolver.registry())
            .render(&document)
            .into_iter()
            .map(|(name, _)| name)
            .collect();

        assert_eq!(
            names,
            vec!["request-fields", "response-fields", "response-fields-200", "path-parameters"]
        );
    }

    #[test]
    fn writes_snippet_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut resolver = TypeResolver::new();
        let document = document(&mut resolver);

        let written = RestDocsGenerator::new(resolver.registry())
            .generate(&[document], dir.path())
            .unwrap();

        assert_eq!(written.len(), 4);
        let request = std::fs::read_to_string(dir.path().join("update-user/request-fields.adoc")).unwrap();
        assert!(request.starts_with(".Request Fields\n"));
        assert!(request.contains("|`id`\n|`Integer`\n"));
        let parameters =
            std::fs::read_to_string(dir.path().join("update-user/path-parameters.adoc")).unwrap();
        assert!(parameters.contains("|`id`\n|User id\n|true\n"));
        assert!(!dir.path().join("update-user/query-parameters.adoc").exists());
    }

    #[test]
    fn blank_snippets_are_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_snippet(dir.path(), "empty", "request-fields", "  \n").unwrap();
        assert!(written.is_none());
        assert!(!dir.path().join("empty").exists());
    }
}
