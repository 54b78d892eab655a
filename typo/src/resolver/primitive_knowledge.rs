//! Static primitive-to-schema table
//!
//! The single source of truth for how every [`PrimitiveKind`] is represented.
//! The table is exhaustive over the enum; the unit tests enforce that.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde_json::Number;
use tracing::warn;

use crate::descriptor::PrimitiveKind;
use crate::schema::SchemaObject;

/// Leaf schema of every primitive kind
pub static PRIMITIVE_KNOWLEDGE: LazyLock<HashMap<PrimitiveKind, SchemaObject>> =
    LazyLock::new(|| {
        let mut map = HashMap::new();

        // ===== Text =====
        map.insert(PrimitiveKind::String, SchemaObject::string());
        map.insert(PrimitiveKind::Char, {
            let mut schema = SchemaObject::string();
            schema.min_length = Some(1);
            schema.max_length = Some(1);
            schema
        });

        // ===== Integers =====
        map.insert(PrimitiveKind::Int8, SchemaObject::integer().with_format("int32"));
        map.insert(PrimitiveKind::Int16, SchemaObject::integer().with_format("int32"));
        map.insert(PrimitiveKind::Int32, SchemaObject::integer().with_format("int32"));
        map.insert(PrimitiveKind::Int64, SchemaObject::integer().with_format("int64"));
        map.insert(PrimitiveKind::Int128, SchemaObject::integer());
        map.insert(PrimitiveKind::UInt8, unsigned("int32"));
        map.insert(PrimitiveKind::UInt16, unsigned("int32"));
        map.insert(PrimitiveKind::UInt32, unsigned("int64"));
        map.insert(PrimitiveKind::UInt64, unsigned("int64"));
        map.insert(PrimitiveKind::UInt128, {
            let mut schema = SchemaObject::integer();
            schema.minimum = Some(Number::from(0_u8));
            schema
        });
        map.insert(PrimitiveKind::BigInteger, SchemaObject::integer());

        // ===== Numbers =====
        map.insert(PrimitiveKind::Float32, SchemaObject::number().with_format("float"));
        map.insert(PrimitiveKind::Float64, SchemaObject::number().with_format("double"));
        map.insert(PrimitiveKind::Decimal, SchemaObject::number());

        map.insert(PrimitiveKind::Boolean, SchemaObject::boolean());

        // ===== Temporal =====
        map.insert(PrimitiveKind::Date, SchemaObject::string().with_format("date"));
        map.insert(PrimitiveKind::Time, SchemaObject::string().with_format("time"));
        map.insert(PrimitiveKind::DateTime, SchemaObject::string().with_format("date-time"));
        map.insert(PrimitiveKind::Duration, SchemaObject::string().with_format("duration"));

        // ===== Identifiers =====
        map.insert(PrimitiveKind::Uuid, SchemaObject::string().with_format("uuid"));
        map.insert(PrimitiveKind::Uri, SchemaObject::string().with_format("uri"));
        map.insert(PrimitiveKind::Email, SchemaObject::string().with_format("email"));
        map.insert(PrimitiveKind::Binary, SchemaObject::string().with_format("binary"));

        map
    });

fn unsigned(format: &str) -> SchemaObject {
    let mut schema = SchemaObject::integer().with_format(format);
    schema.minimum = Some(Number::from(0_u8));
    schema
}

/// Leaf schema for `kind`, or a generic object if the table has no entry
pub fn leaf_schema(kind: PrimitiveKind) -> SchemaObject {
    PRIMITIVE_KNOWLEDGE.get(&kind).cloned().unwrap_or_else(|| {
        warn!(primitive = %kind, "No schema knowledge for primitive - using generic object");
        SchemaObject::generic_object()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, reason = "test code")]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::schema::SchemaKind;

    #[test]
    fn table_covers_every_kind() {
        for kind in PrimitiveKind::iter() {
            assert!(
                PRIMITIVE_KNOWLEDGE.contains_key(&kind),
                "missing schema knowledge for {kind}"
            );
        }
    }

    #[test]
    fn integer_kinds_are_integer_leaves() {
        for kind in PrimitiveKind::iter().filter(|kind| kind.is_integer()) {
            assert_eq!(leaf_schema(kind).kind, SchemaKind::Integer, "{kind}");
        }
    }

    #[test]
    fn canonical_formats() {
        assert_eq!(leaf_schema(PrimitiveKind::Int32).format.as_deref(), Some("int32"));
        assert_eq!(leaf_schema(PrimitiveKind::Int64).format.as_deref(), Some("int64"));
        assert_eq!(leaf_schema(PrimitiveKind::Float32).format.as_deref(), Some("float"));
        assert_eq!(leaf_schema(PrimitiveKind::Float64).format.as_deref(), Some("double"));
        assert_eq!(leaf_schema(PrimitiveKind::Date).format.as_deref(), Some("date"));
        assert_eq!(
            leaf_schema(PrimitiveKind::DateTime).format.as_deref(),
            Some("date-time")
        );
        assert_eq!(leaf_schema(PrimitiveKind::Uuid).format.as_deref(), Some("uuid"));
        assert_eq!(leaf_schema(PrimitiveKind::Uri).format.as_deref(), Some("uri"));
        assert_eq!(leaf_schema(PrimitiveKind::String).kind, SchemaKind::String);
        assert_eq!(leaf_schema(PrimitiveKind::Boolean).kind, SchemaKind::Boolean);
    }

    #[test]
    fn unsigned_kinds_have_zero_minimum() {
        assert_eq!(
            leaf_schema(PrimitiveKind::UInt8).minimum,
            Some(serde_json::Number::from(0))
        );
        assert!(leaf_schema(PrimitiveKind::Int8).minimum.is_none());
    }
}
