use nebula_macros::AssetKind;

use super::Asset;
use crate::entities::Entity;
use crate::error::BridgeResult;

/// Stored entity tree that can be spawned repeatedly
#[derive(AssetKind, Clone, Debug, PartialEq, Eq, Hash)]
#[asset(name = "Prefab")]
pub struct Prefab {
    asset: Asset,
}

impl Prefab {
    /// Spawn the prefab's root entity (and its children)
    pub fn instantiate(&self) -> BridgeResult<Option<Entity>> {
        let root = self
            .asset
            .invoke("instantiate", |host, a| host.prefab_instantiate(a))?;
        Ok(Entity::from_handle(self.asset.bridge(), root))
    }
}
