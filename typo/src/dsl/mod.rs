//! Closure-driven builders assembling [`ApiDocs`]
//!
//! Builders only record declarations. [`ApiDocsBuilder::build`] resolves every
//! body and typed parameter through one fresh [`TypeResolver`], common
//! responses first and then each document in declaration order.
//!
//! ```ignore
//! let docs = ApiDocs::builder()
//!     .info(|info| info.title("Users").version("2.0.0"))
//!     .common_responses(|c| c.bodiless(500, "Server Error"))
//!     .document("create-user", |doc| {
//!         doc.post("/users", |op| {
//!             op.summary("Create user")
//!                 .request_body::<CreateUser>(|body| body.field("email", |f| f.format("email")))
//!                 .response_body::<User>(|response| response.status_code(201))
//!         })
//!     })
//!     .build()?;
//! ```

mod body;
mod field;
mod operation;

pub use body::{RequestBodyBuilder, ResponseBodyBuilder};
pub use field::FieldBuilder;
pub use operation::{OperationBuilder, ParameterBuilder};

use error_stack::Report;
use tracing::{debug, warn};

use crate::api_docs::ApiDocs;
use crate::config::GeneratorConfig;
use crate::descriptor::Describe;
use crate::error::{Error, Result};
use crate::model::{ApiInfo, DocumentModel, HttpMethod, ResponseModel};
use crate::resolver::TypeResolver;

/// Entry point returned by [`ApiDocs::builder`]
#[derive(Debug, Clone, Default)]
pub struct ApiDocsBuilder {
    info:             ApiInfo,
    config:           GeneratorConfig,
    common_responses: CommonResponsesBuilder,
    documents:        Vec<DocumentBuilder>,
}

impl ApiDocsBuilder {
    /// Title, version, and description
    #[must_use]
    pub fn info(mut self, f: impl FnOnce(ApiInfo) -> ApiInfo) -> Self {
        self.info = f(self.info);
        self
    }

    /// Output configuration
    #[must_use]
    pub fn config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Responses appended to every operation
    #[must_use]
    pub fn common_responses(
        mut self,
        f: impl FnOnce(CommonResponsesBuilder) -> CommonResponsesBuilder,
    ) -> Self {
        self.common_responses = f(self.common_responses);
        self
    }

    /// Declare a document holding one operation
    #[must_use]
    pub fn document(
        mut self,
        identifier: impl Into<String>,
        f: impl FnOnce(DocumentBuilder) -> DocumentBuilder,
    ) -> Self {
        self.documents.push(f(DocumentBuilder::new(identifier)));
        self
    }

    /// Resolve every declaration into [`ApiDocs`]
    pub fn build(self) -> Result<ApiDocs> {
        let mut resolver = TypeResolver::new();

        let common: Vec<ResponseModel> = self
            .common_responses
            .responses
            .into_iter()
            .map(|response| response.resolve(&mut resolver))
            .collect();

        let documents = self
            .documents
            .into_iter()
            .map(|document| document.resolve(&mut resolver, &common))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            documents = documents.len(),
            schemas = resolver.registry().len(),
            "Resolved API documentation"
        );
        Ok(ApiDocs::new(
            self.info,
            documents,
            self.config,
            resolver.into_registry(),
        ))
    }
}

/// Responses shared by every operation
#[derive(Debug, Clone, Default)]
pub struct CommonResponsesBuilder {
    responses: Vec<ResponseBodyBuilder>,
}

impl CommonResponsesBuilder {
    /// Response with a body of type `T` under `status_code`
    #[must_use]
    pub fn response<T: Describe + ?Sized>(
        mut self,
        status_code: u16,
        f: impl FnOnce(ResponseBodyBuilder) -> ResponseBodyBuilder,
    ) -> Self {
        self.responses.push(f(
            ResponseBodyBuilder::new(Some(T::describe())).status_code(status_code)
        ));
        self
    }

    /// Response without a body
    #[must_use]
    pub fn bodiless(mut self, status_code: u16, description: impl Into<String>) -> Self {
        self.responses.push(
            ResponseBodyBuilder::new(None)
                .status_code(status_code)
                .description(description),
        );
        self
    }
}

/// Declares the single operation of a document
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    identifier: String,
    operation:  Option<OperationBuilder>,
}

impl DocumentBuilder {
    fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            operation:  None,
        }
    }

    /// `GET` operation
    #[must_use]
    pub fn get(self, path: impl Into<String>, f: impl FnOnce(OperationBuilder) -> OperationBuilder) -> Self {
        self.operation(HttpMethod::Get, path, f)
    }

    /// `POST` operation
    #[must_use]
    pub fn post(self, path: impl Into<String>, f: impl FnOnce(OperationBuilder) -> OperationBuilder) -> Self {
        self.operation(HttpMethod::Post, path, f)
    }

    /// `PUT` operation
    #[must_use]
    pub fn put(self, path: impl Into<String>, f: impl FnOnce(OperationBuilder) -> OperationBuilder) -> Self {
        self.operation(HttpMethod::Put, path, f)
    }

    /// `DELETE` operation
    #[must_use]
    pub fn delete(
        self,
        path: impl Into<String>,
        f: impl FnOnce(OperationBuilder) -> OperationBuilder,
    ) -> Self {
        self.operation(HttpMethod::Delete, path, f)
    }

    /// `PATCH` operation
    #[must_use]
    pub fn patch(
        self,
        path: impl Into<String>,
        f: impl FnOnce(OperationBuilder) -> OperationBuilder,
    ) -> Self {
        self.operation(HttpMethod::Patch, path, f)
    }

    fn operation(
        mut self,
        method: HttpMethod,
        path: impl Into<String>,
        f: impl FnOnce(OperationBuilder) -> OperationBuilder,
    ) -> Self {
        if self.operation.is_some() {
            warn!(
                identifier = %self.identifier,
                method = %method,
                "Document already declares an operation - replacing it"
            );
        }
        self.operation = Some(f(OperationBuilder::new(method, path)));
        self
    }

    fn resolve(self, resolver: &mut TypeResolver, common: &[ResponseModel]) -> Result<DocumentModel> {
        if self.identifier.trim().is_empty() {
            return Err(Report::new(Error::missing("document identifier")));
        }
        if self.identifier.contains(['/', '\\']) {
            return Err(Report::new(Error::invalid(
                "document identifier",
                format!("'{}' must not contain path separators", self.identifier),
            )));
        }
        let Some(operation) = self.operation else {
            return Err(Report::new(Error::MissingOperation {
                identifier: self.identifier,
            }));
        };

        Ok(DocumentModel {
            identifier: self.identifier,
            operation:  operation.resolve(resolver, common),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, reason = "test code")]
mod tests {
    use super::*;
    use crate::descriptor::{AggregateDef, FieldDef, PrimitiveKind, TypeDescriptor};

    struct ErrorBody;

    impl Describe for ErrorBody {
        fn describe() -> TypeDescriptor {
            TypeDescriptor::aggregate(AggregateDef::new("api::ErrorBody").fields(|| {
                vec![FieldDef::new("message", TypeDescriptor::primitive(PrimitiveKind::String))]
            }))
        }
    }

    #[test]
    fn document_without_operation_fails_at_build() {
        let error = ApiDocs::builder()
            .document("empty", |doc| doc)
            .build()
            .unwrap_err();
        assert!(matches!(
            error.current_context(),
            Error::MissingOperation { identifier } if identifier == "empty"
        ));
    }

    #[test]
    fn identifiers_must_be_directory_names() {
        let blank = ApiDocs::builder()
            .document(" ", |doc| doc.get("/a", |op| op))
            .build()
            .unwrap_err();
        assert!(matches!(blank.current_context(), Error::InvalidArgument(_)));

        let nested = ApiDocs::builder()
            .document("a/b", |doc| doc.get("/a", |op| op))
            .build()
            .unwrap_err();
        assert!(matches!(nested.current_context(), Error::InvalidArgument(_)));
    }

    #[test]
    fn last_declared_operation_wins() {
        let docs = ApiDocs::builder()
            .document("user", |doc| {
                doc.get("/users/{id}", |op| op).delete("/users/{id}", |op| op)
            })
            .build()
            .unwrap();
        assert_eq!(docs.documents()[0].operation.method, HttpMethod::Delete);
    }

    #[test]
    fn common_responses_resolve_into_shared_registry() {
        let docs = ApiDocs::builder()
            .info(|info| info.title("Errors").version("0.1.0"))
            .common_responses(|c| {
                c.response::<ErrorBody>(400, |r| r.description("Bad Request"))
                    .bodiless(503, "Unavailable")
            })
            .document("ping", |doc| doc.get("/ping", |op| op.response(200, "pong")))
            .document("health", |doc| {
                doc.get("/health", |op| op.exclude_common_responses([503]))
            })
            .build()
            .unwrap();

        assert_eq!(docs.info().title, "Errors");
        assert_eq!(docs.registry().len(), 1);
        assert!(docs.registry().get("ErrorBody").is_some());

        let ping: Vec<u16> = docs.documents()[0]
            .operation
            .responses
            .iter()
            .map(|r| r.status_code)
            .collect();
        assert_eq!(ping, vec![200, 400, 503]);

        let health: Vec<u16> = docs.documents()[1]
            .operation
            .responses
            .iter()
            .map(|r| r.status_code)
            .collect();
        assert_eq!(health, vec![400]);
    }
}
