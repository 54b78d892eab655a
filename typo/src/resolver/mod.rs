//! Type-to-schema resolution
//!
//! [`TypeResolver`] turns a [`TypeDescriptor`] into a [`SchemaObject`],
//! registering every aggregate it meets in its [`SchemaRegistry`] and
//! returning references to the registered bodies.
//!
//! Resolution is total: anything that cannot be represented degrades to a
//! generic object schema with a log entry instead of an error.

mod naming;
mod overrides;
mod primitive_knowledge;
mod resolution_context;
mod shared;

use indexmap::{IndexMap, IndexSet};
pub use naming::schema_name;
pub use overrides::{apply_nested, apply_overrides, apply_top_level};
pub use primitive_knowledge::{PRIMITIVE_KNOWLEDGE, leaf_schema};
use resolution_context::ResolutionContext;
pub use shared::SharedResolver;
use tracing::{debug, trace, warn};

use crate::constants::{DISCRIMINATOR_PROPERTY, SCHEMA_REF_PREFIX};
use crate::descriptor::{AggregateDef, Classifier, Describe, TypeDescriptor, TypeKey, UnionDef};
use crate::schema::{Discriminator, FieldOverrides, SchemaObject, SchemaRegistry};

/// Resolver owning the registry of one generation run
#[derive(Debug, Default)]
pub struct TypeResolver {
    /// Registered aggregate bodies
    registry:  SchemaRegistry,
    /// Aggregates currently being expanded along the active descent
    resolving: IndexSet<TypeKey>,
    /// Depth cutoffs hit so far; a body built while this grew is incomplete
    cutoffs:   usize,
}

impl TypeResolver {
    /// Create a resolver with an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver that continues populating `registry`
    pub fn with_registry(registry: SchemaRegistry) -> Self {
        Self {
            registry,
            ..Self::default()
        }
    }

    /// The registry populated so far
    pub const fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Mutable registry access, used by override application
    pub const fn registry_mut(&mut self) -> &mut SchemaRegistry {
        &mut self.registry
    }

    /// Consume the resolver, keeping its registry
    pub fn into_registry(self) -> SchemaRegistry {
        self.registry
    }

    /// Drop every registered schema
    pub fn clear(&mut self) {
        self.registry.clear();
        self.resolving.clear();
        self.cutoffs = 0;
    }

    /// Resolve `descriptor`, registering the aggregates it reaches
    pub fn resolve(&mut self, descriptor: &TypeDescriptor) -> SchemaObject {
        self.resolve_in(descriptor, &ResolutionContext::root())
    }

    /// Resolve the descriptor of `T`
    pub fn resolve_type<T: Describe + ?Sized>(&mut self) -> SchemaObject {
        self.resolve(&T::describe())
    }

    /// Merge `overrides` into a resolved body schema
    ///
    /// See [`apply_overrides`] for how paths are routed.
    pub fn apply_overrides(
        &mut self,
        schema: &SchemaObject,
        overrides: &FieldOverrides,
    ) -> SchemaObject {
        apply_overrides(&mut self.registry, schema, overrides)
    }

    fn resolve_in(&mut self, descriptor: &TypeDescriptor, context: &ResolutionContext) -> SchemaObject {
        if context.depth().exceeds_limit() {
            warn!(
                path = %context.path(),
                depth = context.depth().value(),
                "Resolution depth limit exceeded - using generic object"
            );
            self.cutoffs += 1;
            return with_nullability(SchemaObject::generic_object(), descriptor.nullable);
        }

        let descriptor = context.substitute(descriptor);
        let schema = match &descriptor.classifier {
            Classifier::Primitive(kind) => leaf_schema(*kind),
            Classifier::Aggregate(def) => self.resolve_aggregate(&descriptor, def, context),
            Classifier::GenericParameter(slot) => {
                debug!(
                    slot = %slot,
                    path = %context.path(),
                    "Unbound generic parameter - using generic object"
                );
                SchemaObject::generic_object()
            }
            Classifier::Enum(def) => SchemaObject::string().with_enum_values(def.values.clone()),
            Classifier::Union(def) => self.resolve_union(&descriptor, def, context),
            Classifier::Collection(element) => {
                SchemaObject::array(self.resolve_in(element, &context.descend("[]")))
            }
            Classifier::Map(value) => {
                SchemaObject::map(self.resolve_in(value, &context.descend("{}")))
            }
            Classifier::Opaque => SchemaObject::generic_object(),
        };

        // Nullability belongs to the use site. For aggregates the node marked
        // here is the reference, never the registered body.
        with_nullability(schema, descriptor.nullable)
    }

    fn resolve_aggregate(
        &mut self,
        descriptor: &TypeDescriptor,
        def: &AggregateDef,
        context: &ResolutionContext,
    ) -> SchemaObject {
        let key = descriptor.type_key();
        let name = schema_name(descriptor);

        if self.resolving.contains(&key) {
            trace!(schema_name = %name, path = %context.path(), "Cycle detected - referencing schema under construction");
            return SchemaRegistry::reference_for(&name);
        }
        if let Some(existing) = self.registry.name_for(&key) {
            return SchemaRegistry::reference_for(existing);
        }

        self.resolving.insert(key.clone());
        let cutoffs_before = self.cutoffs;
        let body_context = context.enter(&def.type_parameters, &descriptor.type_arguments);

        let mut properties = IndexMap::new();
        let mut required = IndexSet::new();
        for field in def.field_list() {
            let field_context = body_context.descend(&format!(".{}", field.name));
            let schema = self.resolve_in(&field.descriptor, &field_context);
            if !schema.nullable {
                required.insert(field.name.clone());
            }
            properties.insert(field.name, schema);
        }

        let body = SchemaObject::object(properties, required).with_title(def.base_name.clone());
        if self.cutoffs == cutoffs_before {
            self.registry.register(name.clone(), body, key.clone());
        } else {
            // Truncated by the depth limit: keep the reference valid, but let a
            // later complete resolution replace the body
            debug!(schema_name = %name, "Registering depth-truncated body without memoizing it");
            self.registry.register_provisional(name.clone(), body);
        }
        self.resolving.shift_remove(&key);

        SchemaRegistry::reference_for(&name)
    }

    fn resolve_union(
        &mut self,
        descriptor: &TypeDescriptor,
        def: &UnionDef,
        context: &ResolutionContext,
    ) -> SchemaObject {
        let body_context = context.enter(&def.type_parameters, &descriptor.type_arguments);

        let mut variants = Vec::new();
        let mut mapping = IndexMap::new();
        for variant in def.variant_list() {
            let variant_name = match &variant.classifier {
                Classifier::Aggregate(variant_def) => variant_def.base_name.clone(),
                _ => schema_name(&variant),
            };
            let schema = self.resolve_in(&variant, &body_context.descend(&format!("<{variant_name}>")));
            if let Some(target) = schema.reference_target() {
                mapping.insert(variant_name, format!("{SCHEMA_REF_PREFIX}{target}"));
            }
            variants.push(schema);
        }

        SchemaObject::composition(
            variants,
            Some(Discriminator {
                property_name: DISCRIMINATOR_PROPERTY.to_string(),
                mapping,
            }),
        )
    }
}

fn with_nullability(mut schema: SchemaObject, nullable: bool) -> SchemaObject {
    if nullable {
        schema.nullable = true;
    }
    schema
}
