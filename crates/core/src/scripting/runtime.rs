//! Script runtime
//!
//! Owns every live script instance and drives their hooks from the
//! engine's script-update step. Instances update in the order they were
//! created; instances whose entity was destroyed natively are pruned
//! before each update.

use std::any::type_name;
use std::sync::Arc;

use tracing::{debug, info, warn};

use nebula_engine::ScriptObject;

use crate::bridge::Bridge;
use crate::components::ScriptComponent;
use crate::entities::Entity;
use crate::error::{BridgeError, BridgeResult};

use super::{Script, ScriptClassRegistry, ScriptContext, ScriptRef, ScriptSlot, SharedState};

struct Instance {
    entity: Entity,
    slot: Arc<ScriptSlot>,
}

/// Script instances for one scene
pub struct ScriptRuntime {
    bridge: Bridge,
    classes: ScriptClassRegistry,
    instances: Vec<Instance>,
    shared: SharedState,
}

impl ScriptRuntime {
    pub fn new(bridge: Bridge, classes: ScriptClassRegistry) -> Self {
        Self {
            bridge,
            classes,
            instances: Vec::new(),
            shared: SharedState::new(),
        }
    }

    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }

    pub fn classes(&self) -> &ScriptClassRegistry {
        &self.classes
    }

    pub fn shared(&self) -> &SharedState {
        &self.shared
    }

    pub fn shared_mut(&mut self) -> &mut SharedState {
        &mut self.shared
    }

    /// Number of live instances
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Check if the runtime holds an instance for this entity
    pub fn is_attached(&self, entity: &Entity) -> bool {
        self.position(entity).is_some()
    }

    fn position(&self, entity: &Entity) -> Option<usize> {
        self.instances.iter().position(|i| i.entity == *entity)
    }

    /// Create the script named by the entity's `ScriptComponent`
    ///
    /// Stores the instance on the native side and runs `on_create`. Does
    /// nothing if the entity already has an instance in this runtime.
    #[tracing::instrument(skip_all, fields(entity = %entity.handle()))]
    pub fn instantiate(&mut self, entity: &Entity) -> BridgeResult<()> {
        if self.is_attached(entity) {
            debug!("Script already instantiated");
            return Ok(());
        }

        let class_name = entity.require_component::<ScriptComponent>()?.class_name()?;
        let (type_id, script) = self
            .classes
            .create(&class_name)
            .ok_or_else(|| BridgeError::ScriptClassNotFound(class_name.clone()))?;

        let slot = Arc::new(ScriptSlot::new(class_name, type_id, script));
        let object: ScriptObject = slot.clone();
        entity.invoke("set_script_instance", |host, e| {
            host.set_script_instance(e, Some(object))
        })?;

        self.instances.push(Instance {
            entity: entity.clone(),
            slot: Arc::clone(&slot),
        });
        debug!("Instantiated {}", slot.class_name());

        let created = {
            let mut script = slot.lock();
            let mut ctx = ScriptContext::new(&self.bridge, entity, &mut self.shared);
            script.on_create(&mut ctx)
        };

        if created.is_err() {
            // Nothing may keep a script whose on_create failed
            self.instances.pop();
            if entity.is_valid() {
                entity.invoke("set_script_instance", |host, e| {
                    host.set_script_instance(e, None)
                })?;
            }
        }
        created
    }

    /// Attach a script of type `T` to an entity
    ///
    /// Adds a `ScriptComponent` naming `T`'s registered class, then
    /// instantiates it. Attaching `T` again returns the existing instance;
    /// an entity already running another class is left untouched.
    pub fn attach<T: Script>(&mut self, entity: &Entity) -> BridgeResult<ScriptRef<T>> {
        let name = self
            .classes
            .name_of::<T>()
            .ok_or_else(|| BridgeError::ScriptClassNotFound(type_name::<T>().to_owned()))?
            .to_owned();

        if let Some(index) = self.position(entity) {
            let slot = &self.instances[index].slot;
            if !slot.is::<T>() {
                return Err(BridgeError::ScriptAlreadyAttached {
                    entity: entity.handle(),
                    class_name: slot.class_name().to_owned(),
                });
            }
            return ScriptRef::new(entity.clone(), Arc::clone(slot))
                .ok_or(BridgeError::ScriptClassNotFound(name));
        }

        entity
            .add_component::<ScriptComponent>()?
            .set_class_name(&name)?;
        self.instantiate(entity)?;

        self.position(entity)
            .and_then(|index| {
                ScriptRef::new(entity.clone(), Arc::clone(&self.instances[index].slot))
            })
            .ok_or(BridgeError::ScriptClassNotFound(name))
    }

    /// Run `on_update` on every live instance
    ///
    /// Returns the number of instances updated. A failing hook is logged
    /// and does not stop the others.
    pub fn update(&mut self, ts: f32) -> usize {
        let host = self.bridge.host();
        self.instances.retain(|instance| {
            let alive = host.is_entity_valid(instance.entity.handle());
            if !alive {
                debug!(
                    "Pruning {} on destroyed {}",
                    instance.slot.class_name(),
                    instance.entity.handle()
                );
            }
            alive
        });

        let mut updated = 0;
        for instance in &self.instances {
            let mut script = instance.slot.lock();
            let mut ctx = ScriptContext::new(&self.bridge, &instance.entity, &mut self.shared);
            match script.on_update(&mut ctx, ts) {
                Ok(()) => updated += 1,
                Err(e) => warn!(
                    "{}.on_update failed on {}: {}",
                    instance.slot.class_name(),
                    instance.entity.handle(),
                    e
                ),
            }
        }
        updated
    }

    /// Run `on_destroy` and remove the entity's instance
    ///
    /// Returns `false` if the entity had no instance in this runtime.
    pub fn detach(&mut self, entity: &Entity) -> BridgeResult<bool> {
        let Some(index) = self.position(entity) else {
            return Ok(false);
        };
        let instance = self.instances.remove(index);
        self.destroy_instance(&instance)?;
        Ok(true)
    }

    /// The host slot is cleared even when `on_destroy` fails; its error is
    /// returned afterwards
    fn destroy_instance(&mut self, instance: &Instance) -> BridgeResult<()> {
        let destroyed = {
            let mut script = instance.slot.lock();
            let mut ctx = ScriptContext::new(&self.bridge, &instance.entity, &mut self.shared);
            script.on_destroy(&mut ctx)
        };

        if instance.entity.is_valid() {
            instance.entity.invoke("set_script_instance", |host, e| {
                host.set_script_instance(e, None)
            })?;
        }
        destroyed
    }

    /// Destroy every instance and clear shared state
    #[tracing::instrument(skip_all)]
    pub fn shutdown(&mut self) {
        let instances = std::mem::take(&mut self.instances);
        let count = instances.len();
        for instance in &instances {
            if let Err(e) = self.destroy_instance(instance) {
                warn!(
                    "{}.on_destroy failed on {}: {}",
                    instance.slot.class_name(),
                    instance.entity.handle(),
                    e
                );
            }
        }
        self.shared.clear();
        info!("Script runtime shut down ({} instances)", count);
    }
}

impl std::fmt::Debug for ScriptRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptRuntime")
            .field("instances", &self.instances.len())
            .field("classes", &self.classes)
            .finish()
    }
}
