use nebula_macros::Component;

use crate::entities::Entity;
use crate::error::BridgeResult;

/// Names the script class the runtime instantiates for an entity
#[derive(Component, Clone, Debug, PartialEq, Eq, Hash)]
#[component(name = "ScriptComponent")]
pub struct ScriptComponent {
    entity: Entity,
}

impl ScriptComponent {
    pub fn class_name(&self) -> BridgeResult<String> {
        self.entity
            .invoke("class_name", |host, e| host.script_class_name(e))
    }

    pub fn set_class_name(&self, name: &str) -> BridgeResult<()> {
        self.entity
            .invoke("set_class_name", |host, e| host.set_script_class_name(e, name))
    }
}
