//! Type Registry - category to token mapping for generic dispatch
//!
//! Generic operations such as `Entity::has_component::<C>()` never name a
//! category to the host directly. They look up the category's token here
//! and pass the token through the boundary unchanged.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 TypeRegistry (built at startup)             │
//! │   register_component::<C>() / register_asset::<A>()         │
//! │     TypeId -> Registration { kind, name, token: None }      │
//! └─────────────────────────────┬───────────────────────────────┘
//!                               │ resolve(host)
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 NativeHost::resolve_type(kind, name)        │
//! │     Some(token) -> stored; None -> warn, stays unresolved   │
//! └─────────────────────────────┬───────────────────────────────┘
//!                               │ token_of::<C>()
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │   Ok(token)  or  Err(UnregisteredType) at the first use     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The registry can be filled without a host via [`TypeRegistry::insert_token`],
//! which keeps it testable on its own.

use std::any::TypeId;

use dashmap::DashMap;
use tracing::{debug, trace, warn};

use nebula_engine::NativeHost;
use nebula_sdk::{TypeKind, TypeToken};

use crate::assets::{AssetKind, Font, Material, Prefab, Texture};
use crate::components::{
    BoxCollider2DComponent, CameraComponent, CircleCollider2DComponent, CircleRendererComponent,
    Component, Rigidbody2DComponent, ScriptComponent, SpriteRendererComponent,
    StringRendererComponent, TransformComponent,
};
use crate::error::{BridgeError, BridgeResult};

pub use nebula_engine::hash::{fnv1a_64, name_hash, token_for};

/// A component or asset category known to the registry
///
/// Implemented by `#[derive(Component)]` and `#[derive(AssetKind)]`.
pub trait Category: Sized + 'static {
    /// Which registry namespace the category lives in
    const KIND: TypeKind;

    /// Name the host resolves the category by
    const NAME: &'static str;
}

/// One registered category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub kind: TypeKind,
    pub name: &'static str,
    /// `None` until resolved by the host or inserted directly
    pub token: Option<TypeToken>,
}

/// Category registry keyed by Rust type
#[derive(Debug, Default)]
pub struct TypeRegistry {
    entries: DashMap<TypeId, Registration>,
    names: DashMap<TypeToken, &'static str>,
}

impl TypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in component and asset category
    pub fn with_builtin() -> Self {
        let registry = Self::new();
        registry
            .register_component::<TransformComponent>()
            .register_component::<CameraComponent>()
            .register_component::<ScriptComponent>()
            .register_component::<SpriteRendererComponent>()
            .register_component::<CircleRendererComponent>()
            .register_component::<StringRendererComponent>()
            .register_component::<Rigidbody2DComponent>()
            .register_component::<BoxCollider2DComponent>()
            .register_component::<CircleCollider2DComponent>()
            .register_asset::<Texture>()
            .register_asset::<Font>()
            .register_asset::<Material>()
            .register_asset::<Prefab>();
        registry
    }

    /// Register a category; registering twice keeps the first entry
    pub fn register<T: Category>(&self) -> &Self {
        self.entries.entry(TypeId::of::<T>()).or_insert_with(|| {
            debug!("Registered {} type {}", T::KIND, T::NAME);
            Registration {
                kind: T::KIND,
                name: T::NAME,
                token: None,
            }
        });
        self
    }

    /// Register a component category
    pub fn register_component<C: Component>(&self) -> &Self {
        self.register::<C>()
    }

    /// Register an asset category
    pub fn register_asset<A: AssetKind>(&self) -> &Self {
        self.register::<A>()
    }

    /// Register a category with a known token, bypassing the host
    pub fn insert_token<T: Category>(&self, token: TypeToken) -> &Self {
        self.entries.insert(
            TypeId::of::<T>(),
            Registration {
                kind: T::KIND,
                name: T::NAME,
                token: Some(token),
            },
        );
        self.names.insert(token, T::NAME);
        self
    }

    /// Ask the host for every unresolved token
    ///
    /// Returns the registrations the host did not recognise. They stay in
    /// the registry and fail at their first generic use.
    #[tracing::instrument(skip_all)]
    pub fn resolve(&self, host: &dyn NativeHost) -> Vec<Registration> {
        let mut unresolved = Vec::new();

        for mut entry in self.entries.iter_mut() {
            if entry.token.is_some() {
                continue;
            }

            match host.resolve_type(entry.kind, entry.name) {
                Some(token) if token.is_some() => {
                    debug!("Resolved {} {} -> {:?}", entry.kind, entry.name, token);
                    entry.token = Some(token);
                    self.names.insert(token, entry.name);
                }
                _ => {
                    warn!("Host does not recognise {} type {}", entry.kind, entry.name);
                    unresolved.push(entry.clone());
                }
            }
        }

        unresolved
    }

    /// Token for a category
    ///
    /// Fails with [`BridgeError::UnregisteredType`] when the category was
    /// never registered or the host did not resolve it.
    pub fn token_of<T: Category>(&self) -> BridgeResult<TypeToken> {
        match self.entries.get(&TypeId::of::<T>()).and_then(|e| e.token) {
            Some(token) => {
                trace!("Token cache hit: {} -> {:?}", T::NAME, token);
                Ok(token)
            }
            None => Err(BridgeError::UnregisteredType {
                kind: T::KIND,
                name: T::NAME,
            }),
        }
    }

    /// Category name for a resolved token
    pub fn name_of(&self, token: TypeToken) -> Option<&'static str> {
        self.names.get(&token).map(|n| *n)
    }

    /// Check if a category is registered (resolved or not)
    pub fn is_registered<T: Category>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Registrations the host has not resolved
    pub fn unresolved(&self) -> Vec<Registration> {
        self.entries
            .iter()
            .filter(|e| e.token.is_none())
            .map(|e| e.value().clone())
            .collect()
    }

    /// Number of registered categories
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
