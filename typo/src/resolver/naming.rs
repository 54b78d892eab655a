//! Registered-name derivation
//!
//! A parametrized aggregate is named by its base name followed by the names of
//! its arguments, joined with [`GENERIC_NAME_SEPARATOR`]:
//! `ApiResponse<Page<Vec<User>>>` becomes `ApiResponse_Page_List_User`.
//!
//! A nullable argument is a different instantiation and gets its own name:
//! `Wrapper<Option<User>>` becomes `Wrapper_Nullable_User`. The root's own
//! nullability belongs to the use site and never appears in the name.

use itertools::Itertools;

use crate::constants::{
    COLLECTION_BASE_NAME, GENERIC_NAME_SEPARATOR, MAP_BASE_NAME, NULLABLE_NAME_PREFIX,
    UNKNOWN_BASE_NAME,
};
use crate::descriptor::{Classifier, TypeDescriptor};

/// Name a descriptor is registered under, or appears as inside another name
pub fn schema_name(descriptor: &TypeDescriptor) -> String {
    let base = match &descriptor.classifier {
        Classifier::Primitive(kind) => kind.to_string(),
        Classifier::Aggregate(def) => def.base_name.clone(),
        Classifier::GenericParameter(slot) => slot.clone(),
        Classifier::Enum(def) => def.identity.simple_name().to_string(),
        Classifier::Union(def) => def.base_name.clone(),
        Classifier::Collection(element) => {
            return join(COLLECTION_BASE_NAME, std::slice::from_ref(element.as_ref()));
        }
        Classifier::Map(value) => {
            return join(MAP_BASE_NAME, std::slice::from_ref(value.as_ref()));
        }
        Classifier::Opaque => UNKNOWN_BASE_NAME.to_string(),
    };
    join(&base, &descriptor.type_arguments)
}

fn join(base: &str, arguments: &[TypeDescriptor]) -> String {
    std::iter::once(base.to_string())
        .chain(arguments.iter().map(argument_name))
        .join(GENERIC_NAME_SEPARATOR)
}

fn argument_name(argument: &TypeDescriptor) -> String {
    let name = schema_name(argument);
    if argument.nullable {
        format!("{NULLABLE_NAME_PREFIX}{GENERIC_NAME_SEPARATOR}{name}")
    } else {
        name
    }
}
