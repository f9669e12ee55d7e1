//! Procedural macros for `json_flatten`

mod flatten_schema;

use proc_macro::TokenStream;

/// Derives `json_flatten::FlattenSchema`, the declarative field table the schema index
/// is built from.
///
/// # Example
///
/// ```ignore
/// #[derive(Deserialize, FlattenSchema)]
/// struct Response {
///     #[flatten("second::third::forth::fifth::hello_here_i_am")]
///     #[serde(rename = "first")]
///     value: Flattened<bool>,
///
///     #[flatten(path = "where::beyond::the::sea")]
///     list: Flattened<Vec<i64>>,
///
///     id: u64,
/// }
/// ```
///
/// This will generate:
///
/// ```ignore
/// impl ::json_flatten::FlattenSchema for Response {
///     fn schema_descriptor() -> ::json_flatten::SchemaDescriptor {
///         ::json_flatten::SchemaDescriptor::new(::core::any::type_name::<Self>())
///             .field(
///                 ::json_flatten::FieldDescriptor::new("value")
///                     .wrapping::<bool>()
///                     .with_path("second::third::forth::fifth::hello_here_i_am"),
///             )
///             .field(
///                 ::json_flatten::FieldDescriptor::new("list")
///                     .wrapping::<Vec<i64>>()
///                     .with_path("where::beyond::the::sea"),
///             )
///             .field(::json_flatten::FieldDescriptor::new("id"))
///     }
/// }
/// ```
///
/// Every declared field is listed, in declaration order. A field is recorded as
/// wrapped when its type is written as `Flattened<T>`; a `#[flatten]` attribute on
/// any other type is accepted here and rejected when the index is built.
#[proc_macro_derive(FlattenSchema, attributes(flatten))]
pub fn derive_flatten_schema(input: TokenStream) -> TokenStream {
    flatten_schema::derive_flatten_schema_impl(input)
}
