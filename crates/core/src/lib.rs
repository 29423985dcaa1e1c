//! Nebula Core - Managed Side of the Script Bridge
//!
//! Gameplay scripts use this crate to observe and mutate state owned by a
//! native engine. Nothing here holds a native pointer: entities and assets
//! are handles, and every property access is one call through the host's
//! [`NativeHost`](engine::NativeHost) catalogue.
//!
//! # Overview
//!
//! - [`Bridge`] - A bound host plus the resolved type registry
//! - [`registry`] - Category to token mapping for generic dispatch
//! - [`entities`] - [`Entity`] proxy and [`Scene`] operations
//! - [`components`] - Component proxies (`TransformComponent`, ...)
//! - [`assets`] - Asset proxies and path interning
//! - [`scripting`] - Script instances, typed cross-script references, runtime
//! - [`input`] - Input, application, time and script log wrappers
//!
//! # Re-exports
//!
//! This crate re-exports the SDK and engine crates for convenience:
//! - [`sdk`] - Payload and handle types
//! - [`engine`] - Host contract and global binding

// Allow the crate to refer to itself as `nebula_core` for proc macro compatibility
extern crate self as nebula_core;

pub use nebula_engine as engine;
pub use nebula_sdk as sdk;

pub mod assets;
pub mod bridge;
pub mod components;
pub mod config;
pub mod entities;
pub mod error;
pub mod input;
pub mod logging;
pub mod registry;
pub mod scripting;

pub use assets::{Asset, AssetKind, Font, Material, Prefab, Texture};
pub use bridge::Bridge;
pub use components::{
    BoxCollider2DComponent, CameraComponent, CircleCollider2DComponent, CircleRendererComponent,
    Component, LayerMask, Rigidbody2DComponent, ScriptComponent, SpriteRendererComponent,
    StringRendererComponent, TransformComponent,
};
pub use entities::{Entity, Scene};
pub use error::{BridgeError, BridgeResult};
pub use input::{Application, Input, Time};
pub use registry::{Category, Registration, TypeRegistry};
pub use scripting::{
    Script, ScriptClassRegistry, ScriptContext, ScriptRef, ScriptRuntime, ScriptSlot, SharedState,
};

// Re-export config types
pub use config::{ConfigError, ConfigResult, CoreConfig, ScriptConfig};

pub use logging::init_logging;

// Re-export macros
pub use nebula_macros::{AssetKind, Component};
