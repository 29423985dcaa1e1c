//! Scene-level entity operations

use tracing::debug;

use nebula_engine::HostError;
use nebula_sdk::EntityHandle;

use crate::assets::Prefab;
use crate::bridge::Bridge;
use crate::error::BridgeResult;

use super::Entity;

/// Entity lookup and lifecycle calls that are not tied to one entity
#[derive(Clone, Copy)]
pub struct Scene<'a> {
    bridge: &'a Bridge,
}

impl<'a> Scene<'a> {
    pub fn new(bridge: &'a Bridge) -> Self {
        Self { bridge }
    }

    /// First entity with this name
    pub fn find_entity_by_name(&self, name: &str) -> Option<Entity> {
        let handle = self.bridge.host().find_entity_by_name(name);
        Entity::from_handle(self.bridge, handle)
    }

    /// Wrap a raw handle, e.g. one stored by another script
    pub fn entity(&self, handle: EntityHandle) -> Option<Entity> {
        Entity::from_handle(self.bridge, handle)
    }

    /// Create an entity carrying only a transform
    pub fn create_entity(&self, name: &str) -> BridgeResult<Entity> {
        let handle = self.bridge.host().create_entity(name);
        debug!("Created entity {:?} -> {}", name, handle);
        Entity::from_handle(self.bridge, handle)
            .ok_or_else(|| HostError::InvalidEntity(handle).into())
    }

    /// Deep-copy an entity
    pub fn duplicate_entity(&self, entity: &Entity) -> BridgeResult<Option<Entity>> {
        entity.duplicate()
    }

    /// Destroy an entity
    pub fn destroy_entity(&self, entity: Entity) -> BridgeResult<()> {
        entity.destroy()
    }

    /// Spawn a prefab's entity tree
    pub fn instantiate(&self, prefab: &Prefab) -> BridgeResult<Option<Entity>> {
        prefab.instantiate()
    }
}

impl Bridge {
    /// Scene operations on this bridge
    pub fn scene(&self) -> Scene<'_> {
        Scene::new(self)
    }
}
