//! Script instances and the runtime that drives them
//!
//! A script is a Rust value attached to an entity. The native side stores
//! it as an opaque [`ScriptObject`] and hands it back on request, so one
//! script can reach another entity's script by handle.
//!
//! # Example
//!
//! ```ignore
//! use nebula_core::scripting::{Script, ScriptContext};
//!
//! #[derive(Default)]
//! struct Health { points: i32 }
//!
//! impl Script for Health {}
//!
//! #[derive(Default)]
//! struct Turret;
//!
//! impl Script for Turret {
//!     fn on_update(&mut self, ctx: &mut ScriptContext<'_>, _ts: f32) -> BridgeResult<()> {
//!         if let Some(player) = ctx.scene().find_entity_by_name("Player") {
//!             if let Some(health) = player.script_as::<Health>()? {
//!                 health.with_mut(|h| h.points -= 1);
//!             }
//!         }
//!         Ok(())
//!     }
//! }
//! ```
//!
//! [`ScriptObject`]: nebula_engine::ScriptObject

mod class;
mod context;
mod instance;
mod runtime;

pub use class::ScriptClassRegistry;
pub use context::{ScriptContext, SharedState};
pub use instance::{ScriptRef, ScriptSlot};
pub use runtime::ScriptRuntime;

use std::any::Any;

use crate::error::BridgeResult;

/// Upcast helper so `dyn Script` can be downcast to its concrete type
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Gameplay logic attached to an entity
///
/// All hooks run on the script-update step, one instance at a time.
pub trait Script: AsAny + Send {
    /// Called once, right after the instance is attached
    fn on_create(&mut self, _ctx: &mut ScriptContext<'_>) -> BridgeResult<()> {
        Ok(())
    }

    /// Called once per frame with the frame's timestep in seconds
    fn on_update(&mut self, _ctx: &mut ScriptContext<'_>, _ts: f32) -> BridgeResult<()> {
        Ok(())
    }

    /// Called when the runtime detaches the instance or shuts down
    fn on_destroy(&mut self, _ctx: &mut ScriptContext<'_>) -> BridgeResult<()> {
        Ok(())
    }
}
