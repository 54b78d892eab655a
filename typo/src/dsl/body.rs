use super::field::FieldBuilder;
use crate::constants::{DEFAULT_CONTENT_TYPE, DEFAULT_STATUS_CODE};
use crate::descriptor::TypeDescriptor;
use crate::model::{RequestModel, ResponseModel};
use crate::resolver::TypeResolver;
use crate::schema::FieldOverrides;

/// Request body declaration; resolved when the docs are built
#[derive(Debug, Clone)]
pub struct RequestBodyBuilder {
    descriptor:      TypeDescriptor,
    field_overrides: FieldOverrides,
    content_type:    String,
}

impl RequestBodyBuilder {
    pub(crate) fn new(descriptor: TypeDescriptor) -> Self {
        Self {
            descriptor,
            field_overrides: FieldOverrides::new(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }

    /// Document the property at `path` (`name`, `address.city`, `items[].sku`)
    #[must_use]
    pub fn field(mut self, path: impl Into<String>, f: impl FnOnce(FieldBuilder) -> FieldBuilder) -> Self {
        let descriptor = f(FieldBuilder::new(path)).build();
        self.field_overrides.insert(descriptor.path.clone(), descriptor);
        self
    }

    /// Media type of the body
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub(crate) fn resolve(self, resolver: &mut TypeResolver) -> RequestModel {
        let resolved = resolver.resolve(&self.descriptor);
        let schema = resolver.apply_overrides(&resolved, &self.field_overrides);
        RequestModel {
            descriptor: self.descriptor,
            schema,
            field_overrides: self.field_overrides,
            content_type: self.content_type,
        }
    }
}

/// Response declaration; bodiless when no type is given
#[derive(Debug, Clone)]
pub struct ResponseBodyBuilder {
    status_code:     u16,
    description:     Option<String>,
    descriptor:      Option<TypeDescriptor>,
    field_overrides: FieldOverrides,
    content_type:    String,
}

impl ResponseBodyBuilder {
    pub(crate) fn new(descriptor: Option<TypeDescriptor>) -> Self {
        Self {
            status_code: DEFAULT_STATUS_CODE,
            description: None,
            descriptor,
            field_overrides: FieldOverrides::new(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }

    /// HTTP status code, `200` unless set
    #[must_use]
    pub const fn status_code(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    /// Response description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Document the property at `path`
    #[must_use]
    pub fn field(mut self, path: impl Into<String>, f: impl FnOnce(FieldBuilder) -> FieldBuilder) -> Self {
        let descriptor = f(FieldBuilder::new(path)).build();
        self.field_overrides.insert(descriptor.path.clone(), descriptor);
        self
    }

    /// Media type of the body
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub(crate) const fn declared_status(&self) -> u16 {
        self.status_code
    }

    pub(crate) fn resolve(self, resolver: &mut TypeResolver) -> ResponseModel {
        let schema = self.descriptor.as_ref().map(|descriptor| {
            let resolved = resolver.resolve(descriptor);
            resolver.apply_overrides(&resolved, &self.field_overrides)
        });
        ResponseModel {
            status_code: self.status_code,
            description: self.description,
            descriptor: self.descriptor,
            schema,
            field_overrides: self.field_overrides,
            content_type: self.content_type,
        }
    }
}
