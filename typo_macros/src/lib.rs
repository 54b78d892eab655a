//! Procedural macros for typo

mod describe;
mod shared;

use proc_macro::TokenStream;

/// Derives `typo::Describe`, producing the type descriptor the schema resolver consumes.
///
/// # Example
///
/// ```ignore
/// #[derive(Describe)]
/// #[serde(rename_all = "camelCase")]
/// pub struct Page<T> {
///     items:       Vec<T>,
///     total_count: u64,
///     #[typo(skip)]
///     cursor:      Cursor,
/// }
///
/// #[derive(Describe)]
/// pub enum Shape {
///     Circle { radius: f64 },
///     Square { side: f64 },
/// }
/// ```
///
/// - Structs with named fields become aggregates with fields in declaration order
/// - Newtype structs describe as their inner type
/// - Enums whose variants are all units become string enumerations
/// - Enums with data become unions of one aggregate per variant; tuple fields are named
///   `0`, `1`, ...
/// - Type parameters become generic slots bound by the instantiation's arguments
///
/// Attributes: `#[typo(rename = "...")]` and `#[typo(rename_all = "...")]` on the type or a
/// variant, `#[typo(rename = "...")]` and `#[typo(skip)]` on a field or variant. The matching
/// `#[serde(...)]` attributes are honored when no `typo` attribute is given.
#[proc_macro_derive(Describe, attributes(typo))]
pub fn derive_describe(input: TokenStream) -> TokenStream {
    describe::derive_describe_impl(input)
}
