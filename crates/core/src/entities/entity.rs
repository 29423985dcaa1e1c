//! Entity proxy
//!
//! An [`Entity`] is a handle plus the bridge it was obtained from. It caches
//! nothing: every accessor is one host call, so two reads separated by a
//! native mutation observe the new value.

use std::fmt;
use std::hash::{Hash, Hasher};

use tracing::{debug, trace};

use nebula_engine::{HostResult, NativeHost, ScriptObject};
use nebula_sdk::{EntityHandle, Vector3};

use crate::bridge::Bridge;
use crate::components::Component;
use crate::error::{BridgeError, BridgeResult};
use crate::scripting::{Script, ScriptRef, ScriptSlot};

/// Proxy for a native entity
///
/// Never wraps the sentinel handle: use [`Entity::from_handle`], which
/// returns `None` for it. Equality and hashing use the handle only, so two
/// independently built proxies for one entity compare equal.
#[derive(Clone)]
pub struct Entity {
    handle: EntityHandle,
    bridge: Bridge,
}

impl Entity {
    /// Wrap a handle returned by the host
    ///
    /// Returns `None` for the sentinel.
    pub fn from_handle(bridge: &Bridge, handle: EntityHandle) -> Option<Self> {
        handle.non_sentinel().map(|handle| Self {
            handle,
            bridge: bridge.clone(),
        })
    }

    #[inline]
    pub fn handle(&self) -> EntityHandle {
        self.handle
    }

    #[inline]
    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }

    /// Run one host call against this entity
    ///
    /// This is the single path every entity and component accessor takes.
    pub fn invoke<T>(
        &self,
        op: &'static str,
        call: impl FnOnce(&dyn NativeHost, EntityHandle) -> HostResult<T>,
    ) -> BridgeResult<T> {
        if self.bridge.traces_calls() {
            trace!(entity = %self.handle, op, "entity call");
        }
        call(self.bridge.host(), self.handle).map_err(BridgeError::from)
    }

    /// Wrap a handle the host returned for a related entity
    fn wrap(&self, handle: EntityHandle) -> Option<Entity> {
        Entity::from_handle(&self.bridge, handle)
    }

    /// Whether the host still considers this entity live
    pub fn is_valid(&self) -> bool {
        self.bridge.host().is_entity_valid(self.handle)
    }

    // ------------------------------------------------------------------
    // Generic component dispatch
    // ------------------------------------------------------------------

    /// Check if the entity has a component
    pub fn has_component<C: Component>(&self) -> BridgeResult<bool> {
        let token = self.bridge.token_of::<C>()?;
        self.invoke("has_component", |host, e| host.has_component(e, token))
    }

    /// Get a component proxy, or `None` if the entity lacks it
    pub fn get_component<C: Component>(&self) -> BridgeResult<Option<C>> {
        if self.has_component::<C>()? {
            Ok(Some(C::bind(self.clone())))
        } else {
            Ok(None)
        }
    }

    /// Get a component proxy, failing if the entity lacks it
    pub fn require_component<C: Component>(&self) -> BridgeResult<C> {
        self.get_component::<C>()?
            .ok_or(BridgeError::MissingComponent {
                entity: self.handle,
                component: C::NAME,
            })
    }

    /// Attach a component and return its proxy
    ///
    /// Adding a component that is already present leaves its data
    /// untouched and returns a proxy to it.
    pub fn add_component<C: Component>(&self) -> BridgeResult<C> {
        let token = self.bridge.token_of::<C>()?;
        if self.invoke("add_component", |host, e| host.add_component(e, token))? {
            debug!("Added {} to {}", C::NAME, self.handle);
            Ok(C::bind(self.clone()))
        } else {
            Err(BridgeError::MissingComponent {
                entity: self.handle,
                component: C::NAME,
            })
        }
    }

    // ------------------------------------------------------------------
    // Identity
    // ------------------------------------------------------------------

    pub fn name(&self) -> BridgeResult<String> {
        self.invoke("name", |host, e| host.entity_name(e))
    }

    pub fn set_name(&self, name: &str) -> BridgeResult<()> {
        self.invoke("set_name", |host, e| host.set_entity_name(e, name))
    }

    pub fn layer(&self) -> BridgeResult<u16> {
        self.invoke("layer", |host, e| host.entity_layer(e))
    }

    pub fn set_layer(&self, layer: u16) -> BridgeResult<()> {
        self.invoke("set_layer", |host, e| host.set_entity_layer(e, layer))
    }

    // ------------------------------------------------------------------
    // Transform shortcuts
    // ------------------------------------------------------------------

    pub fn translation(&self) -> BridgeResult<Vector3> {
        self.invoke("translation", |host, e| host.transform_translation(e))
    }

    pub fn set_translation(&self, value: Vector3) -> BridgeResult<()> {
        self.invoke("set_translation", |host, e| {
            host.set_transform_translation(e, &value)
        })
    }

    pub fn rotation(&self) -> BridgeResult<Vector3> {
        self.invoke("rotation", |host, e| host.transform_rotation(e))
    }

    pub fn set_rotation(&self, value: Vector3) -> BridgeResult<()> {
        self.invoke("set_rotation", |host, e| host.set_transform_rotation(e, &value))
    }

    pub fn scale(&self) -> BridgeResult<Vector3> {
        self.invoke("scale", |host, e| host.transform_scale(e))
    }

    pub fn set_scale(&self, value: Vector3) -> BridgeResult<()> {
        self.invoke("set_scale", |host, e| host.set_transform_scale(e, &value))
    }

    // ------------------------------------------------------------------
    // Hierarchy
    // ------------------------------------------------------------------

    /// Direct child with this name
    pub fn find_child_by_name(&self, name: &str) -> BridgeResult<Option<Entity>> {
        let child = self.invoke("find_child_by_name", |host, e| {
            host.find_child_by_name(e, name)
        })?;
        Ok(self.wrap(child))
    }

    /// Child at `index`, or `None` when out of range
    pub fn child(&self, index: usize) -> BridgeResult<Option<Entity>> {
        let child = self.invoke("child", |host, e| host.child(e, index))?;
        Ok(self.wrap(child))
    }

    pub fn child_count(&self) -> BridgeResult<usize> {
        self.invoke("child_count", |host, e| host.child_count(e))
    }

    /// All direct children, in host order
    pub fn children(&self) -> BridgeResult<Vec<Entity>> {
        let count = self.child_count()?;
        let mut children = Vec::with_capacity(count);
        for index in 0..count {
            if let Some(child) = self.child(index)? {
                children.push(child);
            }
        }
        Ok(children)
    }

    /// Parent entity, or `None` for roots
    pub fn parent(&self) -> BridgeResult<Option<Entity>> {
        let parent = self.invoke("parent", |host, e| host.parent(e))?;
        Ok(self.wrap(parent))
    }

    // ------------------------------------------------------------------
    // Script instance
    // ------------------------------------------------------------------

    /// Opaque script object attached to this entity
    pub fn script_instance(&self) -> BridgeResult<Option<ScriptObject>> {
        self.invoke("script_instance", |host, e| host.script_instance(e))
    }

    /// Typed reference to this entity's script
    ///
    /// `Ok(None)` when there is no script or it is not a `T`.
    pub fn script_as<T: Script>(&self) -> BridgeResult<Option<ScriptRef<T>>> {
        Ok(self
            .script_instance()?
            .and_then(ScriptSlot::from_object)
            .and_then(|slot| ScriptRef::new(self.clone(), slot)))
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Deep-copy this entity into a fresh one
    pub fn duplicate(&self) -> BridgeResult<Option<Entity>> {
        let copy = self.invoke("duplicate", |host, e| host.duplicate_entity(e))?;
        Ok(self.wrap(copy))
    }

    /// Destroy the native entity
    ///
    /// Consumes this proxy. Other proxies with the same handle stay
    /// constructible but every call through them fails.
    pub fn destroy(self) -> BridgeResult<()> {
        self.invoke("destroy", |host, e| host.destroy_entity(e))?;
        debug!("Destroyed {}", self.handle);
        Ok(())
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl Eq for Entity {}

impl Hash for Entity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.handle.hash(state);
    }
}

impl PartialEq<EntityHandle> for Entity {
    fn eq(&self, other: &EntityHandle) -> bool {
        self.handle == *other
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Entity").field(&self.handle).finish()
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.handle)
    }
}
