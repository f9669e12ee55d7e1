//! `FlattenSchema` derive macro implementation
//!
//! Emits the declarative field table for a root struct. No validation of the table
//! happens here beyond attribute syntax: a `#[flatten]` attribute on a field that is
//! not `Flattened<T>` is recorded as unwrapped, and the index builder reports it.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{
    Attribute, Data, DeriveInput, Field, GenericArgument, LitStr, PathArguments, Type, TypePath,
    parse_macro_input, parse_quote,
};

/// Name of the wrapper type whose single generic argument is the wrapped value type
const WRAPPER_IDENT: &str = "Flattened";

/// Name of the field attribute carrying the path
const FLATTEN_ATTR: &str = "flatten";

/// Implementation of the `FlattenSchema` derive macro
pub fn derive_flatten_schema_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(mut input: DeriveInput) -> syn::Result<TokenStream2> {
    let Data::Struct(data_struct) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "FlattenSchema can only be derived for structs",
        ));
    };

    let fields = data_struct
        .fields
        .iter()
        .enumerate()
        .map(|(index, field)| field_descriptor(index, field))
        .collect::<syn::Result<Vec<_>>>()?;

    // `TypeKey::of::<T>()` needs `T: 'static`
    let type_params: Vec<_> = input
        .generics
        .type_params()
        .map(|param| param.ident.clone())
        .collect();
    let where_clause = input.generics.make_where_clause();
    for param in &type_params {
        where_clause.predicates.push(parse_quote!(#param: 'static));
    }

    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::json_flatten::FlattenSchema for #struct_name #ty_generics #where_clause {
            fn schema_descriptor() -> ::json_flatten::SchemaDescriptor {
                ::json_flatten::SchemaDescriptor::new(::core::any::type_name::<Self>())
                    #(.field(#fields))*
            }
        }
    })
}

/// Generate the `FieldDescriptor` expression for one field
fn field_descriptor(index: usize, field: &Field) -> syn::Result<TokenStream2> {
    let field_name = field
        .ident
        .as_ref()
        .map_or_else(|| index.to_string(), |ident| ident.unraw().to_string());

    let wrapping = flattened_inner(&field.ty).map(|inner| quote! { .wrapping::<#inner>() });

    let mut flatten_path = None;
    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident(FLATTEN_ATTR)) {
        if flatten_path.is_some() {
            return Err(syn::Error::new_spanned(
                attr,
                "duplicate #[flatten] attribute",
            ));
        }
        flatten_path = Some(parse_flatten_attr(attr)?);
    }
    let with_path = flatten_path.map(|path| quote! { .with_path(#path) });

    Ok(quote! {
        ::json_flatten::FieldDescriptor::new(#field_name) #wrapping #with_path
    })
}

/// Parse `#[flatten("a::b")]` or `#[flatten(path = "a::b")]`
fn parse_flatten_attr(attr: &Attribute) -> syn::Result<String> {
    if let Ok(path) = attr.parse_args::<LitStr>() {
        return Ok(path.value());
    }

    let mut path = None;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("path") {
            let value = meta.value()?;
            let s: LitStr = value.parse()?;
            path = Some(s.value());
            Ok(())
        } else {
            Err(meta.error("unsupported flatten attribute"))
        }
    })?;

    path.ok_or_else(|| {
        syn::Error::new_spanned(
            attr,
            "expected #[flatten(\"a::b\")] or #[flatten(path = \"a::b\")]",
        )
    })
}

/// The `T` of a field written as `Flattened<T>` (any path prefix)
fn flattened_inner(ty: &Type) -> Option<&Type> {
    match ty {
        Type::Group(group) => flattened_inner(&group.elem),
        Type::Paren(paren) => flattened_inner(&paren.elem),
        Type::Path(TypePath { qself: None, path }) => {
            let segment = path.segments.last()?;
            if segment.ident != WRAPPER_IDENT {
                return None;
            }
            let PathArguments::AngleBracketed(args) = &segment.arguments else {
                return None;
            };

            let mut types = args.args.iter().filter_map(|arg| match arg {
                GenericArgument::Type(inner) => Some(inner),
                _ => None,
            });
            let inner = types.next()?;
            types.next().is_none().then_some(inner)
        }
        _ => None,
    }
}
