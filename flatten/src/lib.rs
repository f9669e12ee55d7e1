//! # `json_flatten`
//!
//! Declarative path flattening for `serde_json` deserialization.
//!
//! Deeply nested JSON usually forces one wrapper struct per nesting level just to
//! reach a single value. Instead, declare the value's path on the field and let the
//! flattener walk it:
//!
//! ```
//! use json_flatten::{FlattenSchema, Flattened, Flattener, SchemaIndex};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, FlattenSchema)]
//! struct Response {
//!     #[flatten("second::third::forth::fifth::hello_here_i_am")]
//!     #[serde(rename = "first")]
//!     value: Flattened<bool>,
//! }
//!
//! let index = SchemaIndex::builder().root::<Response>().build()?;
//! let flattener = Flattener::new(index);
//!
//! let json = r#"{"first":{"second":{"third":{"forth":{"fifth":{"hello_here_i_am":true}}}}}}"#;
//! let response: Response = flattener.deserialize_str(json)?;
//! assert_eq!(response.value.get(), Some(&true));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The walk starts at the JSON value under the field's own key. Paths for the same
//! wrapped type are shared across all registered roots and tried in registration
//! order; the first one that reaches a non-null value wins.

extern crate self as json_flatten;

mod constants;
mod context;
mod error;
mod flattened;
mod flattener;
mod json_kind;
mod path_spec;
mod resolver;
mod schema;
mod schema_index;
mod type_key;

pub use constants::PATH_DELIMITER;
pub use context::{CustomDeserializers, DeserializeContext, SerdeContext};
pub use error::{Error, Result};
pub use flattened::Flattened;
pub use flattener::Flattener;
pub use json_flatten_macros::FlattenSchema;
pub use json_kind::JsonKind;
pub use path_spec::PathSpec;
pub use resolver::Lookup;
pub use schema::{FieldDescriptor, FlattenSchema, SchemaDescriptor};
pub use schema_index::{SchemaEntry, SchemaIndex, SchemaIndexBuilder};
pub use type_key::TypeKey;

#[cfg(test)]
mod tests {
    //! End-to-end behavior through `#[derive(FlattenSchema)]` and serde

    #![allow(clippy::expect_used, clippy::panic, reason = "test assertions")]

    use serde::Deserialize;

    use super::*;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn flattener_for(index: Result<SchemaIndex>) -> Flattener {
        init_tracing();
        Flattener::new(index.expect("valid roots"))
    }

    #[derive(Debug, Deserialize, FlattenSchema)]
    struct FlattenedSinglePrimitive {
        #[flatten("first_object::second_object")]
        i: Flattened<i64>,
    }

    #[derive(Debug, FlattenSchema)]
    #[allow(dead_code, reason = "only the declaration is inspected")]
    struct EmptyClass {}

    #[derive(Debug, FlattenSchema)]
    #[allow(dead_code, reason = "only the declaration is inspected")]
    struct NotWrappedClass {
        #[flatten("")]
        v: (),
    }

    #[derive(Debug, Deserialize, PartialEq, Eq)]
    struct SimpleType {
        some_long:   i64,
        some_string: String,
    }

    #[derive(Debug, Deserialize, FlattenSchema)]
    struct FlattenedMultiple {
        #[flatten("second::third::forth::fifth")]
        first:  Flattened<SimpleType>,
        #[flatten("fifth::forth::third::second")]
        second: Flattened<SimpleType>,
    }

    #[derive(Debug, Deserialize, FlattenSchema)]
    struct FlattenedSerializedName {
        #[flatten("second")]
        #[serde(rename = "serialized_name")]
        bool: Flattened<bool>,
    }

    #[derive(Debug, Deserialize, FlattenSchema)]
    struct FlattenedList {
        #[flatten(path = "where::beyond::the::sea")]
        #[serde(rename = "some")]
        list: Flattened<Vec<i64>>,
    }

    #[derive(Debug, Deserialize, FlattenSchema)]
    struct Mixed {
        id:      u32,
        #[flatten("meta::name")]
        name:    Flattened<String>,
        #[serde(default)]
        comment: Option<String>,
    }

    fn configuration_error(index: Result<SchemaIndex>) -> Error {
        index
            .expect_err("configuration must be rejected")
            .current_context()
            .clone()
    }

    #[test]
    fn test_no_classes_passed() {
        let error = configuration_error(SchemaIndex::builder().build());
        assert_eq!(error, Error::NoRootsSupplied);
    }

    #[test]
    fn test_class_without_fields() {
        let error = configuration_error(SchemaIndex::builder().root::<EmptyClass>().build());
        assert!(matches!(error, Error::UnenumerableDescriptor { descriptor } if descriptor.ends_with("EmptyClass")));
    }

    #[test]
    fn test_elements_not_wrapped() {
        let error = configuration_error(SchemaIndex::builder().root::<NotWrappedClass>().build());
        let Error::FieldNotWrapped { field, descriptor } = error else {
            panic!("expected FieldNotWrapped, got {error:?}");
        };
        assert_eq!(field, "v");
        assert!(descriptor.ends_with("NotWrappedClass"));
    }

    #[test]
    fn test_derived_descriptor() {
        let descriptor = SchemaDescriptor::of::<Mixed>();
        let fields: Vec<_> = descriptor
            .fields()
            .iter()
            .map(|field| (field.name(), field.wrapped_type(), field.flatten_path()))
            .collect();

        assert_eq!(
            fields,
            [
                ("id", None, None),
                ("name", Some(TypeKey::of::<String>()), Some("meta::name")),
                ("comment", None, None),
            ]
        );
    }

    #[test]
    fn test_flattened_primitive() {
        let flattener = flattener_for(
            SchemaIndex::builder()
                .root::<FlattenedSinglePrimitive>()
                .build(),
        );

        let json = r#"{ "i": { "first_object": { "second_object": 33 } } }"#;
        let root: FlattenedSinglePrimitive = flattener.deserialize_str(json).expect("valid");
        assert_eq!(root.i.get(), Some(&33));
    }

    #[test]
    fn test_flattened_primitive_null_along_the_way() {
        let flattener = flattener_for(
            SchemaIndex::builder()
                .root::<FlattenedSinglePrimitive>()
                .build(),
        );

        let json = r#"{ "i": { "first_object": null } }"#;
        let root: FlattenedSinglePrimitive = flattener.deserialize_str(json).expect("valid");
        assert!(!root.i.has_value());
    }

    #[test]
    fn test_with_custom_deserializer() {
        let index = SchemaIndex::builder()
            .root::<FlattenedSinglePrimitive>()
            .build()
            .expect("valid roots");
        let deserializers = CustomDeserializers::new().register(|value| {
            value
                .as_bool()
                .map(i64::from)
                .ok_or_else(|| serde::de::Error::custom("expected a boolean"))
        });
        let flattener = Flattener::with_deserializers(index, deserializers);

        let json = r#"{ "i": { "first_object": { "second_object": true } } }"#;
        let root: FlattenedSinglePrimitive = flattener.deserialize_str(json).expect("valid");
        assert_eq!(root.i.get(), Some(&1));
    }

    #[test]
    fn test_elements_of_one_type_different_paths() {
        let flattener = flattener_for(SchemaIndex::builder().root::<FlattenedMultiple>().build());

        let json = r#"{
            "first": { "second": { "third": { "forth": { "fifth": { "some_long": 99, "some_string": "first string ever" } } } } },
            "second": { "fifth": { "forth": { "third": { "second": { "some_long": 22, "some_string": "second string ever" } } } } }
        }"#;
        let multiple: FlattenedMultiple = flattener.deserialize_str(json).expect("valid");

        let first = multiple.first.get().expect("first resolves");
        assert_eq!(first.some_long, 99);
        assert_eq!(first.some_string, "first string ever");

        let second = multiple.second.get().expect("second resolves");
        assert_eq!(second.some_long, 22);
        assert_eq!(second.some_string, "second string ever");
    }

    #[test]
    fn test_serialized_name() {
        let flattener = flattener_for(
            SchemaIndex::builder()
                .root::<FlattenedSerializedName>()
                .build(),
        );

        let json = r#"{ "serialized_name": { "second": true } }"#;
        let root: FlattenedSerializedName = flattener.deserialize_str(json).expect("valid");
        assert_eq!(root.bool.get(), Some(&true));
    }

    #[test]
    fn test_list() {
        let flattener = flattener_for(SchemaIndex::builder().root::<FlattenedList>().build());

        let json = r#"{"some":{"where":{"beyond":{"the":{"sea":[0,1,2,3,4,5,6,7,8,9]}}}}}"#;
        let root: FlattenedList = flattener.deserialize_str(json).expect("valid");
        assert_eq!(root.list.get().map(Vec::len), Some(10));
    }

    #[test]
    fn test_type_mismatch_is_a_document_error() {
        let flattener = flattener_for(
            SchemaIndex::builder()
                .root::<FlattenedSinglePrimitive>()
                .build(),
        );

        let json = r#"{ "i": { "first_object": { "second_object": "33" } } }"#;
        let error = flattener
            .deserialize_str::<FlattenedSinglePrimitive>(json)
            .expect_err("a string is not an i64");
        assert!(error.is_data());
    }

    #[test]
    fn test_roots_share_paths_by_type() {
        let flattener = flattener_for(
            SchemaIndex::builder()
                .root::<Mixed>()
                .descriptor(SchemaDescriptor::new("Alias").field(
                    FieldDescriptor::new("title")
                        .wrapping::<String>()
                        .with_path("header::title"),
                ))
                .build(),
        );

        let json = r#"{ "id": 1, "name": { "header": { "title": "from alias path" } } }"#;
        let root: Mixed = flattener.deserialize_str(json).expect("valid");
        assert_eq!(root.id, 1);
        assert_eq!(
            root.name.get().map(String::as_str),
            Some("from alias path")
        );
        assert_eq!(root.comment, None);
    }

    #[test]
    fn test_missing_flattened_field_is_absent() {
        let flattener = flattener_for(SchemaIndex::builder().root::<Mixed>().build());

        let root: Mixed = flattener.deserialize_str(r#"{ "id": 2 }"#).expect("valid");
        assert!(!root.name.has_value());
    }
}
