//! Component and AssetKind derive macro implementation

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{DeriveInput, GenericArgument, PathArguments, Type};

use crate::parse::{parse_proxy, PropertyArgs, ProxyArgs};

/// Which proxy trait is being derived
#[derive(Clone, Copy)]
pub enum ProxyKind {
    Component,
    Asset,
}

impl ProxyKind {
    /// Name of the field holding the owning handle wrapper
    fn base_field(self) -> &'static str {
        match self {
            ProxyKind::Component => "entity",
            ProxyKind::Asset => "asset",
        }
    }

    fn derive_name(self) -> &'static str {
        match self {
            ProxyKind::Component => "Component",
            ProxyKind::Asset => "AssetKind",
        }
    }
}

/// Extract the inner type from `PhantomData<T>` if present, otherwise return the type as-is
fn extract_inner_type(ty: &Type) -> &Type {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            if segment.ident == "PhantomData" {
                if let PathArguments::AngleBracketed(args) = &segment.arguments {
                    if let Some(GenericArgument::Type(inner)) = args.args.first() {
                        return inner;
                    }
                }
            }
        }
    }
    ty
}

/// Check if a type is PhantomData
fn is_phantom_data(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            return segment.ident == "PhantomData";
        }
    }
    false
}

/// Generate the proxy implementation
pub fn derive_proxy(input: DeriveInput, kind: ProxyKind) -> TokenStream {
    match parse_proxy(&input) {
        Ok(args) => generate_impl(args, kind),
        Err(e) => e.write_errors(),
    }
}

fn generate_impl(args: ProxyArgs, kind: ProxyKind) -> TokenStream {
    let struct_name = &args.ident;
    let category_name = args.category_name();
    let base = kind.base_field();

    let fields = match &args.data {
        darling::ast::Data::Struct(fields) => &fields.fields,
        _ => {
            return syn::Error::new_spanned(
                &args.ident,
                format!("{} can only be derived for structs", kind.derive_name()),
            )
            .to_compile_error()
        }
    };

    if !fields.iter().any(|f| f.is_base_field(base)) {
        return syn::Error::new_spanned(
            &args.ident,
            format!(
                "{} requires a field named `{}`",
                kind.derive_name(),
                base
            ),
        )
        .to_compile_error();
    }

    let accessors: Vec<_> = fields
        .iter()
        .filter(|f| f.is_property())
        .map(|f| generate_accessors(f, kind))
        .collect();

    let trait_impl = generate_trait_impl(struct_name, &category_name, fields, kind);

    quote! {
        #trait_impl

        impl #struct_name {
            #(#accessors)*
        }
    }
}

fn generate_accessors(field: &PropertyArgs, kind: ProxyKind) -> TokenStream {
    let Some(field_ident) = field.ident.as_ref() else {
        return quote! {};
    };
    let Some(call) = field.call.as_ref() else {
        return quote! {};
    };
    let field_ty = extract_inner_type(&field.ty);
    let base = format_ident!("{}", kind.base_field());

    // Strip leading underscore from field name for getter/setter names
    let field_name_str = field_ident.to_string();
    let clean_name = field_name_str.strip_prefix('_').unwrap_or(&field_name_str);
    let getter_name = format_ident!("{}", clean_name);
    let setter_name = format_ident!("set_{}", clean_name);
    let getter_call = format_ident!("{}", call);
    let setter_call = format_ident!("set_{}", call);
    let setter_op = format!("set_{}", clean_name);

    let getter_doc = format!("Read `{}` through the bridge", clean_name);
    let setter_doc = format!("Write `{}` through the bridge", clean_name);

    let getter = quote! {
        #[doc = #getter_doc]
        #[inline]
        pub fn #getter_name(&self) -> ::nebula_core::BridgeResult<#field_ty> {
            self.#base.invoke(#clean_name, |host, handle| host.#getter_call(handle))
        }
    };

    let setter = if field.readonly {
        quote! {}
    } else {
        let arg = if field.by_ref {
            quote! { &value }
        } else {
            quote! { value }
        };

        quote! {
            #[doc = #setter_doc]
            #[inline]
            pub fn #setter_name(&self, value: #field_ty) -> ::nebula_core::BridgeResult<()> {
                self.#base.invoke(#setter_op, |host, handle| host.#setter_call(handle, #arg))
            }
        }
    };

    quote! {
        #getter
        #setter
    }
}

fn generate_trait_impl(
    struct_name: &syn::Ident,
    category_name: &str,
    fields: &[PropertyArgs],
    kind: ProxyKind,
) -> TokenStream {
    let base = format_ident!("{}", kind.base_field());

    // Every non-base field is a zero-sized marker
    let field_inits: Vec<_> = fields
        .iter()
        .filter(|f| !f.is_base_field(kind.base_field()))
        .filter_map(|f| {
            let ident = f.ident.as_ref()?;
            if is_phantom_data(&f.ty) {
                Some(quote! { #ident: ::std::marker::PhantomData })
            } else {
                Some(quote! { #ident: ::std::default::Default::default() })
            }
        })
        .collect();

    match kind {
        ProxyKind::Component => quote! {
            impl ::nebula_core::Category for #struct_name {
                const KIND: ::nebula_core::sdk::TypeKind = ::nebula_core::sdk::TypeKind::Component;
                const NAME: &'static str = #category_name;
            }

            impl ::nebula_core::Component for #struct_name {
                #[doc(hidden)]
                fn bind(entity: ::nebula_core::Entity) -> Self {
                    Self {
                        #base: entity,
                        #(#field_inits),*
                    }
                }

                fn entity(&self) -> &::nebula_core::Entity {
                    &self.#base
                }
            }
        },
        ProxyKind::Asset => quote! {
            impl ::nebula_core::Category for #struct_name {
                const KIND: ::nebula_core::sdk::TypeKind = ::nebula_core::sdk::TypeKind::Asset;
                const NAME: &'static str = #category_name;
            }

            impl ::nebula_core::AssetKind for #struct_name {
                #[doc(hidden)]
                fn bind(asset: ::nebula_core::Asset) -> Self {
                    Self {
                        #base: asset,
                        #(#field_inits),*
                    }
                }

                fn asset(&self) -> &::nebula_core::Asset {
                    &self.#base
                }
            }
        },
    }
}
