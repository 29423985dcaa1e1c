//! Attribute parsing for the proxy derive macros

use darling::{FromDeriveInput, FromField};
use syn::{DeriveInput, Ident, Type};

/// Parsed `#[component(...)]` / `#[asset(...)]` attributes on the struct
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(component, asset), supports(struct_named))]
pub struct ProxyArgs {
    /// Struct identifier
    pub ident: Ident,

    /// Struct fields
    pub data: darling::ast::Data<(), PropertyArgs>,

    /// Category name the host resolves (defaults to the struct name)
    #[darling(default)]
    pub name: Option<String>,
}

impl ProxyArgs {
    /// Category name passed to `resolve_type`
    pub fn category_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.ident.to_string())
    }
}

/// Parsed attributes on a field
#[derive(Debug, FromField)]
#[darling(attributes(component, asset))]
pub struct PropertyArgs {
    /// Field identifier
    pub ident: Option<Ident>,

    /// Field type
    pub ty: Type,

    /// Host call backing this property (e.g., "transform_translation")
    ///
    /// The setter call is the same name with a `set_` prefix. Fields
    /// without a call are not properties (e.g., the base handle field).
    pub call: Option<String>,

    /// Setter takes the payload by reference
    #[darling(default)]
    pub by_ref: bool,

    /// Don't generate a setter
    #[darling(default)]
    pub readonly: bool,
}

impl PropertyArgs {
    /// Check if this field is a forwarded property
    pub fn is_property(&self) -> bool {
        self.call.is_some()
    }

    /// Check if this is the proxy's base field (`entity` or `asset`)
    pub fn is_base_field(&self, base: &str) -> bool {
        self.ident.as_ref().map(|i| i == base).unwrap_or(false)
    }
}

/// Parse a DeriveInput into ProxyArgs
pub fn parse_proxy(input: &DeriveInput) -> darling::Result<ProxyArgs> {
    ProxyArgs::from_derive_input(input)
}
