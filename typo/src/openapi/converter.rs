//! Schema model to wire schema projection
//!
//! Stateless and total: every [`SchemaKind`] has exactly one projection.

use super::document::{WireDiscriminator, WireSchema};
use crate::constants::SCHEMA_REF_PREFIX;
use crate::schema::{SchemaKind, SchemaObject};

/// Project `schema` into its wire representation
pub fn convert(schema: &SchemaObject) -> WireSchema {
    let mut wire = WireSchema::default();

    match &schema.kind {
        SchemaKind::Reference { target } => {
            wire.ref_path = Some(format!("{SCHEMA_REF_PREFIX}{target}"));
            wire.description.clone_from(&schema.description);
            wire.nullable = schema.nullable.then_some(true);
            return wire;
        }
        SchemaKind::Composition {
            variants,
            discriminator,
        } => {
            wire.one_of = Some(variants.iter().map(convert).collect());
            wire.discriminator = discriminator.as_ref().map(|discriminator| WireDiscriminator {
                property_name: discriminator.property_name.clone(),
                mapping:       discriminator.mapping.clone(),
            });
        }
        SchemaKind::String => {
            wire.schema_type = Some(schema.kind.type_name().to_string());
            wire.pattern.clone_from(&schema.pattern);
            wire.min_length = schema.min_length;
            wire.max_length = schema.max_length;
            wire.enum_values.clone_from(&schema.enum_values);
        }
        SchemaKind::Integer | SchemaKind::Number => {
            wire.schema_type = Some(schema.kind.type_name().to_string());
            wire.minimum.clone_from(&schema.minimum);
            wire.maximum.clone_from(&schema.maximum);
        }
        SchemaKind::Boolean => {
            wire.schema_type = Some(schema.kind.type_name().to_string());
        }
        SchemaKind::Array { items } => {
            wire.schema_type = Some(schema.kind.type_name().to_string());
            wire.items = Some(Box::new(convert(items)));
        }
        SchemaKind::Object {
            properties,
            required,
        } => {
            wire.schema_type = Some(schema.kind.type_name().to_string());
            if !properties.is_empty() {
                wire.properties = Some(
                    properties
                        .iter()
                        .map(|(name, property)| (name.clone(), convert(property)))
                        .collect(),
                );
            }
            if !required.is_empty() {
                wire.required = Some(required.iter().cloned().collect());
            }
        }
        SchemaKind::Map { values } => {
            wire.schema_type = Some(schema.kind.type_name().to_string());
            wire.additional_properties = Some(Box::new(convert(values)));
        }
    }

    wire.format.clone_from(&schema.format);
    wire.title.clone_from(&schema.title);
    wire.description.clone_from(&schema.description);
    wire.example.clone_from(&schema.example);
    wire.nullable = schema.nullable.then_some(true);
    wire.deprecated = schema.deprecated.then_some(true);
    wire
}
