use indexmap::IndexMap;
use serde_json::{Number, Value};

use super::SchemaObject;

/// Overrides keyed by property path (`name`, `address.city`, `items[].sku`)
pub type FieldOverrides = IndexMap<String, FieldDescriptor>;

/// Caller-supplied documentation for one property
///
/// Every attribute that is set replaces the resolved value; unset attributes
/// leave the resolved schema untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldDescriptor {
    /// Property name or dotted path
    pub path:        String,
    /// Description override
    pub description: Option<String>,
    /// Example override
    pub example:     Option<Value>,
    /// Format override
    pub format:      Option<String>,
    /// Pattern override
    pub pattern:     Option<String>,
    /// Minimum length override
    pub min_length:  Option<u64>,
    /// Maximum length override
    pub max_length:  Option<u64>,
    /// Minimum override
    pub minimum:     Option<Number>,
    /// Maximum override
    pub maximum:     Option<Number>,
    /// Marks the property deprecated
    pub deprecated:  bool,
}

impl FieldDescriptor {
    /// Create an empty override for `path`
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Whether the path addresses a property below the top level
    pub fn is_nested(&self) -> bool {
        self.path.contains('.') || self.path.contains("[]")
    }

    /// Merge the set attributes onto `schema`
    pub fn merge_into(&self, schema: &mut SchemaObject) {
        if let Some(description) = &self.description {
            schema.description = Some(description.clone());
        }
        if let Some(example) = &self.example {
            schema.example = Some(example.clone());
        }
        if let Some(format) = &self.format {
            schema.format = Some(format.clone());
        }
        if let Some(pattern) = &self.pattern {
            schema.pattern = Some(pattern.clone());
        }
        if let Some(min_length) = self.min_length {
            schema.min_length = Some(min_length);
        }
        if let Some(max_length) = self.max_length {
            schema.max_length = Some(max_length);
        }
        if let Some(minimum) = &self.minimum {
            schema.minimum = Some(minimum.clone());
        }
        if let Some(maximum) = &self.maximum {
            schema.maximum = Some(maximum.clone());
        }
        if self.deprecated {
            schema.deprecated = true;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, reason = "test code")]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn merge_replaces_only_specified_attributes() {
        let mut schema = SchemaObject::string().with_format("email");
        schema.description = Some("resolved".to_string());
        schema.max_length = Some(255);

        let descriptor = FieldDescriptor {
            description: Some("Primary contact".to_string()),
            example: Some(json!("a@b.io")),
            ..FieldDescriptor::new("email")
        };
        descriptor.merge_into(&mut schema);

        assert_eq!(schema.description.as_deref(), Some("Primary contact"));
        assert_eq!(schema.example, Some(json!("a@b.io")));
        assert_eq!(schema.format.as_deref(), Some("email"));
        assert_eq!(schema.max_length, Some(255));
        assert!(!schema.deprecated);
    }

    #[test]
    fn nested_paths_are_detected() {
        assert!(!FieldDescriptor::new("name").is_nested());
        assert!(FieldDescriptor::new("address.city").is_nested());
        assert!(FieldDescriptor::new("items[]").is_nested());
    }
}
