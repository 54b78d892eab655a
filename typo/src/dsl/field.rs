use serde_json::{Number, Value};

use crate::schema::FieldDescriptor;

/// Documentation overrides for one body property
#[derive(Debug, Clone)]
pub struct FieldBuilder {
    descriptor: FieldDescriptor,
}

impl FieldBuilder {
    pub(crate) fn new(path: impl Into<String>) -> Self {
        Self {
            descriptor: FieldDescriptor::new(path),
        }
    }

    /// Property description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.descriptor.description = Some(description.into());
        self
    }

    /// Example value
    #[must_use]
    pub fn example(mut self, example: impl Into<Value>) -> Self {
        self.descriptor.example = Some(example.into());
        self
    }

    /// Format tag, replacing the one derived from the type
    #[must_use]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.descriptor.format = Some(format.into());
        self
    }

    /// Regular expression the value matches
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.descriptor.pattern = Some(pattern.into());
        self
    }

    /// Minimum string length
    #[must_use]
    pub const fn min_length(mut self, length: u64) -> Self {
        self.descriptor.min_length = Some(length);
        self
    }

    /// Maximum string length
    #[must_use]
    pub const fn max_length(mut self, length: u64) -> Self {
        self.descriptor.max_length = Some(length);
        self
    }

    /// Inclusive lower bound
    #[must_use]
    pub fn minimum(mut self, minimum: impl Into<Number>) -> Self {
        self.descriptor.minimum = Some(minimum.into());
        self
    }

    /// Inclusive upper bound
    #[must_use]
    pub fn maximum(mut self, maximum: impl Into<Number>) -> Self {
        self.descriptor.maximum = Some(maximum.into());
        self
    }

    /// Mark the property deprecated
    #[must_use]
    pub const fn deprecated(mut self) -> Self {
        self.descriptor.deprecated = true;
        self
    }

    pub(crate) fn build(self) -> FieldDescriptor {
        self.descriptor
    }
}
