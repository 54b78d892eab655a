//! Type descriptors
//!
//! A [`TypeDescriptor`] is the statically built description of a data type that
//! the resolver consumes. Descriptors are normally produced by
//! `#[derive(Describe)]`, but can be assembled by hand for types the caller
//! cannot annotate.

mod describe;
mod primitive;

use std::fmt;
use std::fmt::Write as _;
use std::sync::Arc;

pub use describe::Describe;
pub use primitive::PrimitiveKind;

/// Stable, comparable identity of a declared type
///
/// Derived descriptors use the fully-qualified Rust path
/// (e.g. `my_app::models::User`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeIdentity(String);

impl TypeIdentity {
    /// Create an identity from any string-like path
    pub fn new(identity: impl Into<String>) -> Self {
        Self(identity.into())
    }

    /// Get the underlying string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment: `my_app::models::User` returns `User`
    pub fn simple_name(&self) -> &str {
        self.0.rsplit("::").next().unwrap_or(&self.0)
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TypeIdentity {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TypeIdentity {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Instantiation key of a descriptor: identity plus the keys of its arguments
///
/// `Page<User>` and `Page<Order>` share an identity but not a key. The key is
/// what the registry and the cycle guard compare.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(String);

impl TypeKey {
    /// Get the underlying string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lazily produced field list of an aggregate
pub type FieldList = Arc<dyn Fn() -> Vec<FieldDef> + Send + Sync>;

/// Lazily produced variant list of a union
pub type VariantList = Arc<dyn Fn() -> Vec<TypeDescriptor> + Send + Sync>;

/// A named field of an aggregate
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Property name as it appears in the schema
    pub name:       String,
    /// Declared type of the field, possibly mentioning generic parameters
    pub descriptor: TypeDescriptor,
}

impl FieldDef {
    /// Create a field
    pub fn new(name: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            descriptor,
        }
    }
}

/// A record-like type with named fields in declaration order
///
/// Fields are produced on demand so that a type may mention itself without
/// the descriptor tree becoming infinite.
#[derive(Clone)]
pub struct AggregateDef {
    /// Stable identity
    pub identity:        TypeIdentity,
    /// Name the registered schema is derived from
    pub base_name:       String,
    /// Declared generic parameter slots, in order
    pub type_parameters: Vec<String>,
    fields:              FieldList,
}

impl AggregateDef {
    /// Create an aggregate with no fields whose base name is the identity's
    /// last segment
    pub fn new(identity: impl Into<TypeIdentity>) -> Self {
        let identity = identity.into();
        Self {
            base_name: identity.simple_name().to_string(),
            identity,
            type_parameters: Vec::new(),
            fields: Arc::new(Vec::new),
        }
    }

    /// Override the schema base name
    #[must_use]
    pub fn named(mut self, base_name: impl Into<String>) -> Self {
        self.base_name = base_name.into();
        self
    }

    /// Declare generic parameter slots
    #[must_use]
    pub fn type_parameters<I, S>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_parameters = parameters.into_iter().map(Into::into).collect();
        self
    }

    /// Set the field producer
    #[must_use]
    pub fn fields<F>(mut self, fields: F) -> Self
    where
        F: Fn() -> Vec<FieldDef> + Send + Sync + 'static,
    {
        self.fields = Arc::new(fields);
        self
    }

    /// Produce the declared fields
    pub fn field_list(&self) -> Vec<FieldDef> {
        (self.fields)()
    }
}

impl fmt::Debug for AggregateDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregateDef")
            .field("identity", &self.identity)
            .field("base_name", &self.base_name)
            .field("type_parameters", &self.type_parameters)
            .finish_non_exhaustive()
    }
}

/// A closed set of named constants
#[derive(Debug, Clone)]
pub struct EnumDef {
    /// Stable identity
    pub identity: TypeIdentity,
    /// Member names in declaration order
    pub values:   Vec<String>,
}

impl EnumDef {
    /// Create an enumeration
    pub fn new<I, S>(identity: impl Into<TypeIdentity>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            identity: identity.into(),
            values:   values.into_iter().map(Into::into).collect(),
        }
    }
}

/// A tagged sum type whose variants are aggregates
#[derive(Clone)]
pub struct UnionDef {
    /// Stable identity
    pub identity:        TypeIdentity,
    /// Name used when the union appears as a generic argument
    pub base_name:       String,
    /// Declared generic parameter slots, in order
    pub type_parameters: Vec<String>,
    variants:            VariantList,
}

impl UnionDef {
    /// Create a union with no variants
    pub fn new(identity: impl Into<TypeIdentity>) -> Self {
        let identity = identity.into();
        Self {
            base_name: identity.simple_name().to_string(),
            identity,
            type_parameters: Vec::new(),
            variants: Arc::new(Vec::new),
        }
    }

    /// Override the base name
    #[must_use]
    pub fn named(mut self, base_name: impl Into<String>) -> Self {
        self.base_name = base_name.into();
        self
    }

    /// Declare generic parameter slots
    #[must_use]
    pub fn type_parameters<I, S>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_parameters = parameters.into_iter().map(Into::into).collect();
        self
    }

    /// Set the variant producer
    #[must_use]
    pub fn variants<F>(mut self, variants: F) -> Self
    where
        F: Fn() -> Vec<TypeDescriptor> + Send + Sync + 'static,
    {
        self.variants = Arc::new(variants);
        self
    }

    /// Produce the declared variants
    pub fn variant_list(&self) -> Vec<TypeDescriptor> {
        (self.variants)()
    }
}

impl fmt::Debug for UnionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnionDef")
            .field("identity", &self.identity)
            .field("base_name", &self.base_name)
            .field("type_parameters", &self.type_parameters)
            .finish_non_exhaustive()
    }
}

/// What kind of type a descriptor stands for
#[derive(Debug, Clone)]
pub enum Classifier {
    /// Built-in scalar
    Primitive(PrimitiveKind),
    /// Record with named fields
    Aggregate(AggregateDef),
    /// Unsubstituted generic slot
    GenericParameter(String),
    /// Closed set of constants
    Enum(EnumDef),
    /// Tagged sum type
    Union(UnionDef),
    /// Ordered sequence or set
    Collection(Box<TypeDescriptor>),
    /// String-keyed map; only the value type is modeled
    Map(Box<TypeDescriptor>),
    /// A type with no statically known shape
    Opaque,
}

/// Statically built description of a data type
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    /// Shape of the type
    pub classifier:     Classifier,
    /// Whether a value of this type may be absent or null at the use site
    pub nullable:       bool,
    /// Concrete arguments for a parametrized aggregate or union
    pub type_arguments: Vec<TypeDescriptor>,
}

impl TypeDescriptor {
    /// Wrap a classifier as a non-null descriptor without arguments
    pub const fn new(classifier: Classifier) -> Self {
        Self {
            classifier,
            nullable: false,
            type_arguments: Vec::new(),
        }
    }

    /// Built-in scalar
    pub const fn primitive(kind: PrimitiveKind) -> Self {
        Self::new(Classifier::Primitive(kind))
    }

    /// Record type
    pub const fn aggregate(definition: AggregateDef) -> Self {
        Self::new(Classifier::Aggregate(definition))
    }

    /// Generic parameter slot
    pub fn generic(slot: impl Into<String>) -> Self {
        Self::new(Classifier::GenericParameter(slot.into()))
    }

    /// Enumeration
    pub const fn enumeration(definition: EnumDef) -> Self {
        Self::new(Classifier::Enum(definition))
    }

    /// Tagged union
    pub const fn union(definition: UnionDef) -> Self {
        Self::new(Classifier::Union(definition))
    }

    /// Sequence of `element`
    pub fn collection(element: Self) -> Self {
        Self::new(Classifier::Collection(Box::new(element)))
    }

    /// String-keyed map to `value`
    pub fn map(value: Self) -> Self {
        Self::new(Classifier::Map(Box::new(value)))
    }

    /// Shapeless value
    pub const fn opaque() -> Self {
        Self::new(Classifier::Opaque)
    }

    /// Mark the descriptor nullable
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Bind concrete type arguments
    #[must_use]
    pub fn with_type_arguments(mut self, arguments: Vec<Self>) -> Self {
        self.type_arguments = arguments;
        self
    }

    /// Instantiation key; the root's own nullability is not part of it
    pub fn type_key(&self) -> TypeKey {
        let mut key = String::new();
        self.write_key(&mut key);
        TypeKey(key)
    }

    fn write_key(&self, out: &mut String) {
        match &self.classifier {
            Classifier::Primitive(kind) => out.push_str(kind.as_ref()),
            Classifier::Aggregate(def) => out.push_str(def.identity.as_str()),
            Classifier::GenericParameter(slot) => {
                let _ = write!(out, "'{slot}");
            }
            Classifier::Enum(def) => out.push_str(def.identity.as_str()),
            Classifier::Union(def) => out.push_str(def.identity.as_str()),
            Classifier::Collection(element) => {
                out.push('[');
                element.write_argument_key(out);
                out.push(']');
            }
            Classifier::Map(value) => {
                out.push('{');
                value.write_argument_key(out);
                out.push('}');
            }
            Classifier::Opaque => out.push('*'),
        }
        if !self.type_arguments.is_empty() {
            out.push('<');
            for (index, argument) in self.type_arguments.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                argument.write_argument_key(out);
            }
            out.push('>');
        }
    }

    fn write_argument_key(&self, out: &mut String) {
        self.write_key(out);
        if self.nullable {
            out.push('?');
        }
    }
}
