//! Schema model
//!
//! [`SchemaObject`] is the wire-independent schema tree the resolver builds.
//! The registry stores named aggregate bodies; everything else lives inline.

mod field_descriptor;
mod registry;

pub use field_descriptor::{FieldDescriptor, FieldOverrides};
use indexmap::{IndexMap, IndexSet};
pub use registry::SchemaRegistry;
use serde_json::{Number, Value};

/// Discriminator metadata carried by a composition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discriminator {
    /// Property whose value selects the variant
    pub property_name: String,
    /// Variant simple name to reference path
    pub mapping:       IndexMap<String, String>,
}

/// Shape of a schema node
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    /// Text leaf
    String,
    /// Integral leaf
    Integer,
    /// Floating or decimal leaf
    Number,
    /// `true` / `false`
    Boolean,
    /// Sequence of `items`
    Array {
        /// Element schema
        items: Box<SchemaObject>,
    },
    /// Structured object; an empty one stands for "any object"
    Object {
        /// Properties in declaration order
        properties: IndexMap<String, SchemaObject>,
        /// Names of non-nullable properties in declaration order
        required:   IndexSet<String>,
    },
    /// Open map whose values all share one schema
    Map {
        /// Schema of every value
        values: Box<SchemaObject>,
    },
    /// Pointer to a registered schema by name
    Reference {
        /// Registered name
        target: String,
    },
    /// Closed set of alternatives
    Composition {
        /// Alternatives in declaration order
        variants:      Vec<SchemaObject>,
        /// Variant selector, when the variants are named
        discriminator: Option<Discriminator>,
    },
}

impl SchemaKind {
    /// Lowercase wire name of the kind
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array { .. } => "array",
            Self::Object { .. } | Self::Map { .. } => "object",
            Self::Reference { .. } => "reference",
            Self::Composition { .. } => "composition",
        }
    }
}

/// A node of the schema tree
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaObject {
    /// Shape
    pub kind:        SchemaKind,
    /// Whether the value may be null at this use site
    pub nullable:    bool,
    /// Format tag (`int32`, `date-time`, ...)
    pub format:      Option<String>,
    /// Regular expression constraint
    pub pattern:     Option<String>,
    /// Minimum string length
    pub min_length:  Option<u64>,
    /// Maximum string length
    pub max_length:  Option<u64>,
    /// Inclusive lower bound
    pub minimum:     Option<Number>,
    /// Inclusive upper bound
    pub maximum:     Option<Number>,
    /// Allowed values of an enumeration
    pub enum_values: Option<Vec<String>>,
    /// Title; registered aggregates carry their base name
    pub title:       Option<String>,
    /// Human readable description
    pub description: Option<String>,
    /// Example value
    pub example:     Option<Value>,
    /// Whether the element is deprecated
    pub deprecated:  bool,
}

impl SchemaObject {
    /// Create a node of `kind` with no metadata
    pub const fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            nullable: false,
            format: None,
            pattern: None,
            min_length: None,
            max_length: None,
            minimum: None,
            maximum: None,
            enum_values: None,
            title: None,
            description: None,
            example: None,
            deprecated: false,
        }
    }

    /// Text leaf
    pub const fn string() -> Self {
        Self::new(SchemaKind::String)
    }

    /// Integral leaf
    pub const fn integer() -> Self {
        Self::new(SchemaKind::Integer)
    }

    /// Number leaf
    pub const fn number() -> Self {
        Self::new(SchemaKind::Number)
    }

    /// Boolean leaf
    pub const fn boolean() -> Self {
        Self::new(SchemaKind::Boolean)
    }

    /// Array of `items`
    pub fn array(items: Self) -> Self {
        Self::new(SchemaKind::Array {
            items: Box::new(items),
        })
    }

    /// Structured object
    pub const fn object(properties: IndexMap<String, Self>, required: IndexSet<String>) -> Self {
        Self::new(SchemaKind::Object {
            properties,
            required,
        })
    }

    /// Object with no declared properties; the degrade-to target of the resolver
    pub fn generic_object() -> Self {
        Self::object(IndexMap::new(), IndexSet::new())
    }

    /// Open map with `values`
    pub fn map(values: Self) -> Self {
        Self::new(SchemaKind::Map {
            values: Box::new(values),
        })
    }

    /// Reference to the registered schema `target`
    pub fn reference(target: impl Into<String>) -> Self {
        Self::new(SchemaKind::Reference {
            target: target.into(),
        })
    }

    /// Composition of `variants`
    pub const fn composition(variants: Vec<Self>, discriminator: Option<Discriminator>) -> Self {
        Self::new(SchemaKind::Composition {
            variants,
            discriminator,
        })
    }

    /// Set the format tag
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set the title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the enumeration values
    #[must_use]
    pub fn with_enum_values(mut self, values: Vec<String>) -> Self {
        self.enum_values = Some(values);
        self
    }

    /// Mark the node nullable
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Registered name this node points at, if it is a reference
    pub fn reference_target(&self) -> Option<&str> {
        match &self.kind {
            SchemaKind::Reference { target } => Some(target),
            _ => None,
        }
    }

    /// Declared properties, if this is a structured object
    pub const fn properties(&self) -> Option<&IndexMap<String, Self>> {
        match &self.kind {
            SchemaKind::Object { properties, .. } => Some(properties),
            _ => None,
        }
    }

    /// Mutable access to the declared properties
    pub const fn properties_mut(&mut self) -> Option<&mut IndexMap<String, Self>> {
        match &mut self.kind {
            SchemaKind::Object { properties, .. } => Some(properties),
            _ => None,
        }
    }

    /// Required property names, if this is a structured object
    pub const fn required(&self) -> Option<&IndexSet<String>> {
        match &self.kind {
            SchemaKind::Object { required, .. } => Some(required),
            _ => None,
        }
    }

    /// Element schema, if this is an array
    pub fn items(&self) -> Option<&Self> {
        match &self.kind {
            SchemaKind::Array { items } => Some(items),
            _ => None,
        }
    }

    /// Whether this is an object with at least one declared property
    pub fn has_properties(&self) -> bool {
        self.properties().is_some_and(|properties| !properties.is_empty())
    }
}
