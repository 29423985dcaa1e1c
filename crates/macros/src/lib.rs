//! Nebula Proc Macros
//!
//! This crate provides the proxy derives for the Nebula script bridge:
//!
//! - `#[derive(Component)]` - Component proxy bound to an entity
//! - `#[derive(AssetKind)]` - Asset proxy bound to an asset handle
//!
//! # Component Example
//!
//! ```ignore
//! use std::marker::PhantomData;
//! use nebula_core::Entity;
//! use nebula_macros::Component;
//! use nebula_sdk::Vector3;
//!
//! #[derive(Component)]
//! #[component(name = "TransformComponent")]
//! pub struct TransformComponent {
//!     entity: Entity,
//!
//!     #[component(call = "transform_translation", by_ref)]
//!     translation: PhantomData<Vector3>,
//!
//!     #[component(call = "transform_world_translation", readonly)]
//!     world_translation: PhantomData<Vector3>,
//! }
//!
//! // Generated methods forward every access to the host:
//! // - transform.translation() -> BridgeResult<Vector3>
//! // - transform.set_translation(v) -> calls host.set_transform_translation(e, &v)
//! // - transform.world_translation() -> BridgeResult<Vector3>
//! ```
//!
//! # Attributes
//!
//! ## Struct Attributes
//!
//! - `#[component(name = "...")]` / `#[asset(name = "...")]` - Optional. The
//!   category name the host resolves. Defaults to the struct name.
//!
//! ## Field Attributes
//!
//! - `call = "host_method"` - Mark as a property backed by `host_method`
//!   (getter) and `set_host_method` (setter).
//! - `by_ref` - Pass the payload to the setter by reference.
//! - `readonly` - Don't generate a setter.
//!
//! The struct must have a field named `entity` (components) or `asset`
//! (assets). Every other field must be `PhantomData` or `Default`.

mod parse;
mod proxy;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

use proxy::ProxyKind;

/// Derive macro for component proxies
///
/// Implements `nebula_core::Category` and `nebula_core::Component`, and
/// generates one getter (and setter unless `readonly`) per `call` field.
/// Accessors never cache: each one is a single host call using the owning
/// entity's handle.
#[proc_macro_derive(Component, attributes(component))]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    proxy::derive_proxy(input, ProxyKind::Component).into()
}

/// Derive macro for asset proxies
///
/// Implements `nebula_core::Category` and `nebula_core::AssetKind`, and
/// generates accessors the same way as `#[derive(Component)]`, keyed by the
/// asset handle.
#[proc_macro_derive(AssetKind, attributes(asset))]
pub fn derive_asset_kind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    proxy::derive_proxy(input, ProxyKind::Asset).into()
}
