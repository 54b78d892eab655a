//! Resolved schemas to ordered field rows
//!
//! Rows come out depth first, parents before children, properties in
//! declaration order. Array traversal appends `[]` to the parent path.

use crate::model::ParameterModel;
use crate::schema::{FieldOverrides, SchemaKind, SchemaObject, SchemaRegistry};

const ARRAY_PATH_SUFFIX: &str = "[]";
const ENUM_LABEL: &str = "Enum";
const ONE_OF_LABEL: &str = "OneOf";
const OBJECT_LABEL: &str = "Object";

/// One row of a field table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenedField {
    /// Dotted path, `[]` marking array traversal
    pub path:        String,
    /// Human readable type label
    pub field_type:  String,
    /// Description, empty when none is known
    pub description: String,
    /// Whether the field may be absent or null
    pub optional:    bool,
}

/// Walks schemas against the registry they were resolved into
#[derive(Debug, Clone, Copy)]
pub struct FieldFlattener<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> FieldFlattener<'a> {
    /// Create a flattener over `registry`
    pub const fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Flatten `schema` into rows, taking descriptions from `overrides` first
    pub fn flatten(&self, schema: &SchemaObject, overrides: &FieldOverrides) -> Vec<FlattenedField> {
        let mut fields = Vec::new();
        let mut visiting = Vec::new();
        if let Some(target) = schema.reference_target() {
            visiting.push(target.to_string());
        }
        self.flatten_object(
            self.registry.dereference(schema),
            "",
            overrides,
            &mut visiting,
            &mut fields,
        );
        fields
    }

    /// Rows for one parameter group, in declaration order
    pub fn parameters(&self, parameters: &[&ParameterModel]) -> Vec<FlattenedField> {
        parameters
            .iter()
            .map(|parameter| FlattenedField {
                path:        parameter.name.clone(),
                field_type:  self.label(&parameter.schema),
                description: parameter.description.clone().unwrap_or_default(),
                optional:    !parameter.required,
            })
            .collect()
    }

    /// Type label of `schema` as shown in field tables
    pub fn label(&self, schema: &SchemaObject) -> String {
        let resolved = self.registry.dereference(schema);
        if resolved.enum_values.is_some() {
            return ENUM_LABEL.to_string();
        }
        match &resolved.kind {
            SchemaKind::Array { items } => format!("Array<{}>", self.label(items)),
            SchemaKind::Composition { .. } => ONE_OF_LABEL.to_string(),
            SchemaKind::Reference { .. } | SchemaKind::Map { .. } => OBJECT_LABEL.to_string(),
            kind => capitalize(kind.type_name()),
        }
    }

    fn flatten_object(
        &self,
        schema: &SchemaObject,
        prefix: &str,
        overrides: &FieldOverrides,
        visiting: &mut Vec<String>,
        fields: &mut Vec<FlattenedField>,
    ) {
        let (Some(properties), Some(required)) = (schema.properties(), schema.required()) else {
            return;
        };

        for (name, property) in properties {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}.{name}")
            };
            let resolved = self.registry.dereference(property);

            let description = overrides
                .get(&path)
                .and_then(|descriptor| descriptor.description.clone())
                .or_else(|| property.description.clone())
                .or_else(|| resolved.description.clone())
                .unwrap_or_default();

            fields.push(FlattenedField {
                path: path.clone(),
                field_type: self.label(property),
                description,
                optional: !required.contains(name) || property.nullable || resolved.nullable,
            });

            if resolved.has_properties() {
                self.descend(property, resolved, &path, overrides, visiting, fields);
            } else if let Some(items) = resolved.items() {
                let item = self.registry.dereference(items);
                if item.has_properties() {
                    let item_path = format!("{path}{ARRAY_PATH_SUFFIX}");
                    self.descend(items, item, &item_path, overrides, visiting, fields);
                }
            }
        }
    }

    /// Recurse into `resolved` unless its registered name is already on the path
    fn descend(
        &self,
        node: &SchemaObject,
        resolved: &SchemaObject,
        path: &str,
        overrides: &FieldOverrides,
        visiting: &mut Vec<String>,
        fields: &mut Vec<FlattenedField>,
    ) {
        match node.reference_target() {
            Some(target) if visiting.iter().any(|name| name == target) => {}
            Some(target) => {
                visiting.push(target.to_string());
                self.flatten_object(resolved, path, overrides, visiting, fields);
                visiting.pop();
            }
            None => self.flatten_object(resolved, path, overrides, visiting, fields),
        }
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, reason = "test code")]
mod tests {
    use super::*;
    use crate::descriptor::{AggregateDef, EnumDef, FieldDef, PrimitiveKind, TypeDescriptor};
    use crate::model::ParameterLocation;
    use crate::resolver::TypeResolver;
    use crate::schema::FieldDescriptor;

    fn string() -> TypeDescriptor {
        TypeDescriptor::primitive(PrimitiveKind::String)
    }

    fn user() -> TypeDescriptor {
        TypeDescriptor::aggregate(AggregateDef::new("app::User").fields(|| {
            vec![
                FieldDef::new("id", TypeDescriptor::primitive(PrimitiveKind::Int64)),
                FieldDef::new("name", string()),
                FieldDef::new("email", string().nullable()),
            ]
        }))
    }

    fn rows(fields: &[FlattenedField]) -> Vec<(&str, &str, bool)> {
        fields
            .iter()
            .map(|field| (field.path.as_str(), field.field_type.as_str(), field.optional))
            .collect()
    }

    #[test]
    fn flat_aggregate_keeps_declaration_order() {
        let mut resolver = TypeResolver::new();
        let schema = resolver.resolve(&user());
        let fields = FieldFlattener::new(resolver.registry()).flatten(&schema, &FieldOverrides::new());

        assert_eq!(
            rows(&fields),
            vec![
                ("id", "Integer", false),
                ("name", "String", false),
                ("email", "String", true),
            ]
        );
    }

    #[test]
    fn arrays_of_objects_use_bracket_paths() {
        let page = TypeDescriptor::aggregate(AggregateDef::new("app::UserList").fields(|| {
            vec![
                FieldDef::new("items", TypeDescriptor::collection(user())),
                FieldDef::new("tags", TypeDescriptor::collection(string())),
            ]
        }));
        let mut resolver = TypeResolver::new();
        let schema = resolver.resolve(&page);
        let fields = FieldFlattener::new(resolver.registry()).flatten(&schema, &FieldOverrides::new());

        assert_eq!(
            rows(&fields),
            vec![
                ("items", "Array<Object>", false),
                ("items[].id", "Integer", false),
                ("items[].name", "String", false),
                ("items[].email", "String", true),
                ("tags", "Array<String>", false),
            ]
        );
    }

    #[test]
    fn nested_objects_and_nullable_references() {
        let address = TypeDescriptor::aggregate(
            AggregateDef::new("app::Address")
                .fields(|| vec![FieldDef::new("city", TypeDescriptor::primitive(PrimitiveKind::String))]),
        );
        let status = TypeDescriptor::enumeration(EnumDef::new(
            "app::Status",
            vec!["ACTIVE".to_string(), "BLOCKED".to_string()],
        ));
        let customer = TypeDescriptor::aggregate(AggregateDef::new("app::Customer").fields(move || {
            vec![
                FieldDef::new("home", address.clone()),
                FieldDef::new("work", address.clone().nullable()),
                FieldDef::new("status", status.clone()),
            ]
        }));
        let mut resolver = TypeResolver::new();
        let schema = resolver.resolve(&customer);
        let fields = FieldFlattener::new(resolver.registry()).flatten(&schema, &FieldOverrides::new());

        assert_eq!(
            rows(&fields),
            vec![
                ("home", "Object", false),
                ("home.city", "String", false),
                ("work", "Object", true),
                ("work.city", "String", false),
                ("status", "Enum", false),
            ]
        );
    }

    #[test]
    fn override_descriptions_take_precedence() {
        let mut resolver = TypeResolver::new();
        let schema = resolver.resolve(&user());
        let mut overrides = FieldOverrides::new();
        let mut descriptor = FieldDescriptor::new("name");
        descriptor.description = Some("Display name".to_string());
        overrides.insert(descriptor.path.clone(), descriptor);

        let fields = FieldFlattener::new(resolver.registry()).flatten(&schema, &overrides);
        assert_eq!(fields[1].description, "Display name");
        assert_eq!(fields[0].description, "");
    }

    #[test]
    fn self_reference_is_listed_once() {
        fn node() -> TypeDescriptor {
            TypeDescriptor::aggregate(AggregateDef::new("app::TreeNode").fields(|| {
                vec![
                    FieldDef::new("value", TypeDescriptor::primitive(PrimitiveKind::String)),
                    FieldDef::new("children", TypeDescriptor::collection(node())),
                ]
            }))
        }
        let mut resolver = TypeResolver::new();
        let schema = resolver.resolve(&node());
        let fields = FieldFlattener::new(resolver.registry()).flatten(&schema, &FieldOverrides::new());

        assert_eq!(
            rows(&fields),
            vec![("value", "String", false), ("children", "Array<Object>", false)]
        );
    }

    #[test]
    fn labels_for_leaves() {
        let registry = SchemaRegistry::new();
        let flattener = FieldFlattener::new(&registry);
        assert_eq!(flattener.label(&SchemaObject::boolean()), "Boolean");
        assert_eq!(flattener.label(&SchemaObject::number()), "Number");
        assert_eq!(flattener.label(&SchemaObject::map(SchemaObject::string())), "Object");
        assert_eq!(flattener.label(&SchemaObject::reference("Missing")), "Object");
        assert_eq!(
            flattener.label(&SchemaObject::array(SchemaObject::array(SchemaObject::integer()))),
            "Array<Array<Integer>>"
        );
        assert_eq!(flattener.label(&SchemaObject::composition(Vec::new(), None)), "OneOf");
    }

    #[test]
    fn parameter_rows() {
        let registry = SchemaRegistry::new();
        let id = ParameterModel {
            name:        "id".to_string(),
            location:    ParameterLocation::Path,
            description: Some("User id".to_string()),
            required:    true,
            schema:      SchemaObject::integer().with_format("int64"),
            example:     None,
        };
        let fields = FieldFlattener::new(&registry).parameters(&[&id]);
        assert_eq!(
            fields,
            vec![FlattenedField {
                path:        "id".to_string(),
                field_type:  "Integer".to_string(),
                description: "User id".to_string(),
                optional:    false,
            }]
        );
    }
}
