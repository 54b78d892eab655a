//! Built documentation and its outputs

use tracing::info;

use crate::config::GeneratorConfig;
use crate::dsl::ApiDocsBuilder;
use crate::error::Result;
use crate::model::{ApiInfo, DocumentModel};
use crate::openapi::{self, OpenApiDocument, OpenApiGenerator};
use crate::restdocs::RestDocsGenerator;
use crate::schema::SchemaRegistry;

/// Resolved documents together with the registry their schemas live in
#[derive(Debug, Clone)]
pub struct ApiDocs {
    info:      ApiInfo,
    documents: Vec<DocumentModel>,
    config:    GeneratorConfig,
    registry:  SchemaRegistry,
}

impl ApiDocs {
    /// Start declaring documentation
    pub fn builder() -> ApiDocsBuilder {
        ApiDocsBuilder::default()
    }

    pub(crate) const fn new(
        info: ApiInfo,
        documents: Vec<DocumentModel>,
        config: GeneratorConfig,
        registry: SchemaRegistry,
    ) -> Self {
        Self {
            info,
            documents,
            config,
            registry,
        }
    }

    /// API metadata
    pub const fn info(&self) -> &ApiInfo {
        &self.info
    }

    /// Documents in declaration order
    pub fn documents(&self) -> &[DocumentModel] {
        &self.documents
    }

    /// Output configuration
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Every schema registered while building
    pub const fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// The OpenAPI document for all documents
    pub fn openapi(&self) -> OpenApiDocument {
        OpenApiGenerator::new(&self.info, &self.registry).generate(&self.documents)
    }

    /// The OpenAPI document as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        openapi::to_json(&self.openapi())
    }

    /// The OpenAPI document as YAML
    pub fn to_yaml(&self) -> Result<String> {
        openapi::to_yaml(&self.openapi())
    }

    /// Write the configured outputs: OpenAPI documents, then snippets if enabled
    pub fn generate(&self) -> Result<()> {
        let document = self.openapi();
        let output_dir = &self.config.output_dir;
        if self.config.format.writes_json() {
            openapi::write_json(&document, output_dir)?;
        }
        if self.config.format.writes_yaml() {
            openapi::write_yaml(&document, output_dir)?;
        }

        if self.config.generate_rest_docs {
            RestDocsGenerator::new(&self.registry).generate(&self.documents, &self.config.snippet_dir)?;
        }

        info!(
            format = %self.config.format,
            rest_docs = self.config.generate_rest_docs,
            "Generated API documentation for {} documents",
            self.documents.len()
        );
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, reason = "test code")]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn generate_honors_format_and_snippet_switch() {
        let dir = tempfile::tempdir().unwrap();
        let docs = ApiDocs::builder()
            .config(
                GeneratorConfig::default()
                    .output_dir(dir.path().join("docs"))
                    .snippet_dir(dir.path().join("snippets"))
                    .format(OutputFormat::Yaml)
                    .generate_rest_docs(false),
            )
            .document("ping", |doc| {
                doc.get("/ping", |op| op.query_parameter("verbose", |p| p))
            })
            .build()
            .unwrap();

        docs.generate().unwrap();

        assert!(dir.path().join("docs/openapi.yaml").exists());
        assert!(!dir.path().join("docs/openapi.json").exists());
        assert!(!dir.path().join("snippets").exists());
    }

    #[test]
    fn json_and_yaml_describe_the_same_document() {
        let docs = ApiDocs::builder()
            .info(|info| info.title("Pets").description("Pet store"))
            .document("list-pets", |doc| doc.get("/pets", |op| op.tags(["pets"])))
            .build()
            .unwrap();

        let from_json: serde_json::Value = serde_json::from_str(&docs.to_json().unwrap()).unwrap();
        let from_yaml: serde_json::Value = serde_yaml::from_str(&docs.to_yaml().unwrap()).unwrap();
        assert_eq!(from_json, from_yaml);
        assert_eq!(from_json["info"]["title"], "Pets");
        assert_eq!(from_json["paths"]["/pets"]["get"]["tags"][0], "pets");
    }
}
