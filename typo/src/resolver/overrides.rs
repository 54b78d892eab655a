//! Field-override application
//!
//! Overrides on a registered schema are written back into the registry, so
//! every body that references the same aggregate sees them. Two operations
//! returning the same type share their overrides.

use tracing::debug;

use crate::schema::{FieldDescriptor, FieldOverrides, SchemaObject, SchemaRegistry};

/// Suffix marking a path segment that descends through an array's items
const ARRAY_SEGMENT_SUFFIX: &str = "[]";

/// Merge single-segment overrides onto the top-level properties of `schema`
///
/// Pure: `schema` is not touched and the registry is not consulted. Nested
/// paths and paths naming unknown properties are skipped.
pub fn apply_top_level(schema: &SchemaObject, overrides: &FieldOverrides) -> SchemaObject {
    let mut result = schema.clone();
    if let Some(properties) = result.properties_mut() {
        for (path, descriptor) in overrides.iter().filter(|(_, descriptor)| !descriptor.is_nested()) {
            match properties.get_mut(path) {
                Some(property) => descriptor.merge_into(property),
                None => debug!(path = %path, "Override names no property - dropped"),
            }
        }
    }
    result
}

/// Apply every override to the registered schema `schema_name`, descending
/// through referenced properties for dotted paths
///
/// Mutates the registry entries in place.
pub fn apply_nested(registry: &mut SchemaRegistry, schema_name: &str, overrides: &FieldOverrides) {
    for (path, descriptor) in overrides {
        apply_path(registry, schema_name, path, descriptor);
    }
}

/// Apply `overrides` to a resolved body schema and return the schema to embed
///
/// A reference root routes every path into the registered body, so the
/// returned schema is the unchanged reference. An inline root takes
/// single-segment overrides itself and forwards dotted paths into the
/// registered schemas its properties point at.
pub fn apply_overrides(
    registry: &mut SchemaRegistry,
    schema: &SchemaObject,
    overrides: &FieldOverrides,
) -> SchemaObject {
    if overrides.is_empty() {
        return schema.clone();
    }
    if let Some(target) = schema.reference_target() {
        apply_nested(registry, target, overrides);
        return schema.clone();
    }

    let result = apply_top_level(schema, overrides);
    for (path, descriptor) in overrides.iter().filter(|(_, descriptor)| descriptor.is_nested()) {
        let Some((head, rest)) = path.split_once('.') else {
            debug!(path = %path, "Override path has no nested target - dropped");
            continue;
        };
        let (field, through_array) = parse_segment(head);
        match result
            .properties()
            .and_then(|properties| properties.get(field))
            .and_then(|property| nested_target(property, through_array))
        {
            Some(target) => {
                let target = target.to_string();
                apply_path(registry, &target, rest, descriptor);
            }
            None => debug!(path = %path, "Override path does not reach a registered schema - dropped"),
        }
    }
    result
}

fn apply_path(registry: &mut SchemaRegistry, schema_name: &str, path: &str, descriptor: &FieldDescriptor) {
    let Some(mut body) = registry.get(schema_name).cloned() else {
        debug!(schema_name = %schema_name, path = %path, "Override targets unregistered schema - dropped");
        return;
    };

    let (head, rest) = match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    };
    let (field, through_array) = parse_segment(head);

    let Some(property) = body.properties_mut().and_then(|properties| properties.get_mut(field)) else {
        debug!(schema_name = %schema_name, path = %path, "Override names no property - dropped");
        return;
    };

    match rest {
        None if !through_array => {
            descriptor.merge_into(property);
            registry.replace(schema_name, body);
        }
        Some(rest) => match nested_target(property, through_array) {
            Some(target) => {
                let target = target.to_string();
                apply_path(registry, &target, rest, descriptor);
            }
            None => debug!(
                schema_name = %schema_name,
                path = %path,
                "Override path does not reach a registered schema - dropped"
            ),
        },
        None => debug!(
            schema_name = %schema_name,
            path = %path,
            "Array segment without a field to override - dropped"
        ),
    }
}

/// Split `items[]` into (`items`, true) and `name` into (`name`, false)
fn parse_segment(segment: &str) -> (&str, bool) {
    segment
        .strip_suffix(ARRAY_SEGMENT_SUFFIX)
        .map_or((segment, false), |field| (field, true))
}

/// Registered name a property leads to, through its items when `through_array`
fn nested_target(property: &SchemaObject, through_array: bool) -> Option<&str> {
    if through_array {
        property.items().and_then(SchemaObject::reference_target)
    } else {
        property.reference_target()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, reason = "test code")]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::descriptor::{AggregateDef, FieldDef, PrimitiveKind, TypeDescriptor};
    use crate::resolver::TypeResolver;

    fn address() -> TypeDescriptor {
        TypeDescriptor::aggregate(AggregateDef::new("app::Address").fields(|| {
            vec![
                FieldDef::new("city", TypeDescriptor::primitive(PrimitiveKind::String)),
                FieldDef::new("zip", TypeDescriptor::primitive(PrimitiveKind::String)),
            ]
        }))
    }

    fn customer() -> TypeDescriptor {
        TypeDescriptor::aggregate(AggregateDef::new("app::Customer").fields(|| {
            vec![
                FieldDef::new("name", TypeDescriptor::primitive(PrimitiveKind::String)),
                FieldDef::new("age", TypeDescriptor::primitive(PrimitiveKind::Int32)),
                FieldDef::new("address", address()),
                FieldDef::new("previous", TypeDescriptor::collection(address())),
            ]
        }))
    }

    fn overrides(entries: Vec<FieldDescriptor>) -> FieldOverrides {
        entries
            .into_iter()
            .map(|descriptor| (descriptor.path.clone(), descriptor))
            .collect()
    }

    fn described(path: &str, description: &str) -> FieldDescriptor {
        FieldDescriptor {
            description: Some(description.to_string()),
            ..FieldDescriptor::new(path)
        }
    }

    #[test]
    fn top_level_merge_keeps_unspecified_attributes() {
        let mut resolver = TypeResolver::new();
        resolver.resolve(&customer());
        let body = resolver.registry().get("Customer").unwrap().clone();

        let merged = apply_top_level(
            &body,
            &overrides(vec![FieldDescriptor {
                example: Some(json!(42)),
                ..described("age", "Age in years")
            }]),
        );

        let age = &merged.properties().unwrap()["age"];
        assert_eq!(age.description.as_deref(), Some("Age in years"));
        assert_eq!(age.example, Some(json!(42)));
        assert_eq!(age.format.as_deref(), Some("int32"));
        assert!(body.properties().unwrap()["age"].description.is_none());
    }

    #[test]
    fn top_level_skips_unknown_and_nested_paths() {
        let mut resolver = TypeResolver::new();
        resolver.resolve(&customer());
        let body = resolver.registry().get("Customer").unwrap().clone();

        let merged = apply_top_level(
            &body,
            &overrides(vec![described("missing", "x"), described("address.city", "y")]),
        );

        assert_eq!(merged, body);
    }

    #[test]
    fn nested_override_mutates_shared_entry() {
        let mut resolver = TypeResolver::new();
        resolver.resolve(&customer());

        apply_nested(
            resolver.registry_mut(),
            "Customer",
            &overrides(vec![described("address.city", "City name")]),
        );

        let address = resolver.registry().get("Address").unwrap();
        assert_eq!(
            address.properties().unwrap()["city"].description.as_deref(),
            Some("City name")
        );
    }

    #[test]
    fn array_segment_descends_into_item_schema() {
        let mut resolver = TypeResolver::new();
        resolver.resolve(&customer());

        apply_nested(
            resolver.registry_mut(),
            "Customer",
            &overrides(vec![described("previous[].zip", "Postal code")]),
        );

        let address = resolver.registry().get("Address").unwrap();
        assert_eq!(
            address.properties().unwrap()["zip"].description.as_deref(),
            Some("Postal code")
        );
    }

    #[test]
    fn overrides_on_shared_types_are_visible_to_every_user() {
        let invoice = TypeDescriptor::aggregate(AggregateDef::new("app::Invoice").fields(|| {
            vec![FieldDef::new("billing", address())]
        }));

        let mut resolver = TypeResolver::new();
        let customer_schema = resolver.resolve(&customer());
        let invoice_schema = resolver.resolve(&invoice);

        resolver.apply_overrides(
            &customer_schema,
            &overrides(vec![described("address.city", "From customer")]),
        );
        resolver.apply_overrides(
            &invoice_schema,
            &overrides(vec![described("billing.zip", "From invoice")]),
        );

        let address = resolver.registry().get("Address").unwrap();
        let properties = address.properties().unwrap();
        assert_eq!(properties["city"].description.as_deref(), Some("From customer"));
        assert_eq!(properties["zip"].description.as_deref(), Some("From invoice"));
    }

    #[test]
    fn inline_root_uses_top_level_and_forwards_dotted_paths() {
        let mut resolver = TypeResolver::new();
        let customer_ref = resolver.resolve(&customer());

        let mut properties = indexmap::IndexMap::new();
        properties.insert("customer".to_string(), customer_ref);
        properties.insert("note".to_string(), SchemaObject::string());
        let inline = SchemaObject::object(properties, indexmap::IndexSet::new());

        let result = resolver.apply_overrides(
            &inline,
            &overrides(vec![described("note", "Free text"), described("customer.name", "Full name")]),
        );

        assert_eq!(
            result.properties().unwrap()["note"].description.as_deref(),
            Some("Free text")
        );
        let customer = resolver.registry().get("Customer").unwrap();
        assert_eq!(
            customer.properties().unwrap()["name"].description.as_deref(),
            Some("Full name")
        );
    }

    #[test]
    fn unknown_nested_paths_are_dropped() {
        let mut resolver = TypeResolver::new();
        resolver.resolve(&customer());
        let before = resolver.registry().entries().clone();

        apply_nested(
            resolver.registry_mut(),
            "Customer",
            &overrides(vec![described("name.first", "x"), described("ghost.city", "y")]),
        );
        apply_nested(resolver.registry_mut(), "Ghost", &overrides(vec![described("a", "b")]));

        assert_eq!(resolver.registry().entries(), &before);
    }
}
