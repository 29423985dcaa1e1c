//! nebula host - in-memory reference implementation of [`NativeHost`]
//!
//! [`MemoryHost`] keeps a small scene (entities with the built-in component
//! set, a parent/child hierarchy, interned assets and per-frame input
//! state) entirely in memory. It implements the whole boundary catalogue
//! and is what the managed side is tested against.
//!
//! ```ignore
//! use std::sync::Arc;
//! use nebula_core::Bridge;
//! use nebula_host::MemoryHost;
//!
//! let host = Arc::new(MemoryHost::new());
//! let bridge = Bridge::with_builtin(host.clone())?;
//! let player = bridge.scene().create_entity("Player")?;
//! host.step(1.0 / 60.0);
//! ```
//!
//! [`NativeHost`]: nebula_engine::NativeHost

mod assets;
mod host;
mod world;

pub use assets::AssetType;
pub use host::MemoryHost;
pub use world::ComponentKind;
