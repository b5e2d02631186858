//! # TypeProto Derive
//!
//! Procedural macros for TypeProto.
//!
//! This crate provides `#[derive(Reflect)]`, which registers a struct or a
//! fieldless enum into a `typeproto_schema::TypeCatalog`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, Path, parse_macro_input};

/// Derives the `Reflect` trait for a struct or a fieldless enum.
///
/// Structs become message types, one field per named field. Enums become
/// enum types with one constant per variant.
///
/// # Attributes
/// - `#[proto(name = "...")]` on the type overrides its simple name
/// - `#[proto(package = "...")]` on the type overrides the qualifying
///   prefix, which defaults to the module path with `::` replaced by `.`
/// - `#[proto(rename = "...")]` on a field or variant overrides its name
/// - `#[proto(transient)]` on a field registers it as transient
/// - `#[proto(skip)]` on a field leaves it out entirely
/// - `#[proto(crate = "...")]` on the type sets the path of the schema
///   crate, `::typeproto_schema` by default
///
/// # Example
/// ```ignore
/// #[derive(Reflect)]
/// #[proto(package = "com.example")]
/// struct Person {
///     name: String,
///     #[proto(rename = "emailAddress")]
///     email: Option<String>,
///     friends: Vec<Person>,
///     #[proto(skip)]
///     cache: std::cell::Cell<u32>,
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(proto))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Reflect cannot be derived for generic types",
        ));
    }

    let options = TypeOptions::parse(&input.attrs)?;
    let krate = options
        .krate
        .unwrap_or_else(|| syn::parse_quote!(::typeproto_schema));
    let ident = &input.ident;
    let simple = options
        .name
        .unwrap_or_else(|| ident.unraw().to_string());
    let qualified = match options.package {
        Some(package) if package.is_empty() => quote! { ::std::string::String::from(#simple) },
        Some(package) => {
            let qualified = format!("{package}.{simple}");
            quote! { ::std::string::String::from(#qualified) }
        }
        None => quote! {
            ::std::format!("{}.{}", ::core::module_path!().replace("::", "."), #simple)
        },
    };

    let body = match &input.data {
        Data::Struct(data) => expand_struct(&krate, &data.fields, &qualified)?,
        Data::Enum(data) => {
            let mut constants = Vec::new();
            for variant in &data.variants {
                if !matches!(variant.fields, Fields::Unit) {
                    return Err(syn::Error::new_spanned(
                        variant,
                        "Reflect enums must only have unit variants",
                    ));
                }
                let field = FieldOptions::parse(&variant.attrs)?;
                constants.push(
                    field
                        .rename
                        .unwrap_or_else(|| variant.ident.unraw().to_string()),
                );
            }
            quote! {
                let id = catalog.add_enum(
                    #qualified,
                    ::std::vec::Vec::<&str>::from([#(#constants),*]),
                );
                catalog.bind_native(native, id);
            }
        }
        Data::Union(data) => {
            return Err(syn::Error::new_spanned(
                data.union_token,
                "Reflect cannot be derived for unions",
            ));
        }
    };

    Ok(quote! {
        impl #krate::Reflect for #ident {
            fn type_ref(
                catalog: &mut #krate::TypeCatalog,
            ) -> #krate::TypeRef {
                let native = ::core::any::TypeId::of::<Self>();
                if let ::core::option::Option::Some(id) = catalog.native(native) {
                    return #krate::TypeRef::plain(id);
                }
                #body
                #krate::TypeRef::plain(id)
            }
        }
    })
}

fn expand_struct(
    krate: &Path,
    fields: &Fields,
    qualified: &TokenStream2,
) -> syn::Result<TokenStream2> {
    let named = match fields {
        Fields::Named(named) => named.named.iter().collect::<Vec<_>>(),
        Fields::Unit => Vec::new(),
        Fields::Unnamed(unnamed) => {
            return Err(syn::Error::new_spanned(
                unnamed,
                "Reflect requires named fields",
            ));
        }
    };

    let mut registrations = Vec::new();
    for field in named {
        let options = FieldOptions::parse(&field.attrs)?;
        if options.skip {
            continue;
        }

        let name = match (options.rename, &field.ident) {
            (Some(rename), _) => rename,
            (None, Some(ident)) => ident.unraw().to_string(),
            (None, None) => continue,
        };
        let ty = &field.ty;
        let modifiers = if options.transient {
            quote! { #krate::Modifiers::transient() }
        } else {
            quote! { #krate::Modifiers::default() }
        };

        registrations.push(quote! {
            let field = <#ty as #krate::Reflect>::type_ref(catalog)
                .into_field(#name, #modifiers);
            if let ::core::option::Option::Some(def) = catalog.get_mut(id) {
                def.fields.push(field);
            }
        });
    }

    // Bind before visiting fields so self references resolve to this id.
    Ok(quote! {
        let id = catalog.add_message(#qualified);
        catalog.bind_native(native, id);
        #(#registrations)*
    })
}

/// Type-level `#[proto(...)]` options.
#[derive(Default)]
struct TypeOptions {
    krate: Option<Path>,
    name: Option<String>,
    package: Option<String>,
}

impl TypeOptions {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut options = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("proto")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    options.name = Some(meta.value()?.parse::<LitStr>()?.value());
                    Ok(())
                } else if meta.path.is_ident("crate") {
                    options.krate = Some(meta.value()?.parse::<LitStr>()?.parse::<Path>()?);
                    Ok(())
                } else if meta.path.is_ident("package") {
                    options.package = Some(meta.value()?.parse::<LitStr>()?.value());
                    Ok(())
                } else {
                    Err(meta.error("unsupported proto attribute on type"))
                }
            })?;
        }
        Ok(options)
    }
}

/// Field- and variant-level `#[proto(...)]` options.
#[derive(Default)]
struct FieldOptions {
    rename: Option<String>,
    transient: bool,
    skip: bool,
}

impl FieldOptions {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut options = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("proto")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    options.rename = Some(meta.value()?.parse::<LitStr>()?.value());
                    Ok(())
                } else if meta.path.is_ident("transient") {
                    options.transient = true;
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    options.skip = true;
                    Ok(())
                } else {
                    Err(meta.error("unsupported proto attribute on field"))
                }
            })?;
        }
        Ok(options)
    }
}
