//! Script instance storage and typed references

use std::any::TypeId;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use nebula_engine::ScriptObject;

use crate::entities::Entity;

use super::Script;

/// What the runtime hands the host as an entity's script object
pub struct ScriptSlot {
    class_name: String,
    type_id: TypeId,
    cell: Mutex<Box<dyn Script>>,
}

impl ScriptSlot {
    pub(crate) fn new(class_name: String, type_id: TypeId, script: Box<dyn Script>) -> Self {
        Self {
            class_name,
            type_id,
            cell: Mutex::new(script),
        }
    }

    /// Recover a slot from an opaque host object
    ///
    /// `None` if the object was not stored by a script runtime.
    pub fn from_object(object: ScriptObject) -> Option<Arc<ScriptSlot>> {
        object.downcast::<ScriptSlot>().ok()
    }

    /// Class name the instance was created from
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Check if the instance is a `T`
    pub fn is<T: Script>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Check if one of the instance's hooks is currently running
    pub fn is_busy(&self) -> bool {
        self.cell.is_locked()
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, Box<dyn Script>> {
        self.cell.lock()
    }

    pub(crate) fn try_lock(&self) -> Option<MutexGuard<'_, Box<dyn Script>>> {
        self.cell.try_lock()
    }
}

impl fmt::Debug for ScriptSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptSlot")
            .field("class_name", &self.class_name)
            .field("busy", &self.is_busy())
            .finish()
    }
}

/// Typed reference to another entity's script
///
/// Obtained from [`Entity::script_as`]. Access is scoped to a closure and
/// yields `None` while the target's own hooks are running (including when
/// a script reaches itself through its entity).
///
/// [`Entity::script_as`]: crate::Entity::script_as
pub struct ScriptRef<T: Script> {
    entity: Entity,
    slot: Arc<ScriptSlot>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Script> ScriptRef<T> {
    /// Checked construction; `None` if the slot does not hold a `T`
    pub(crate) fn new(entity: Entity, slot: Arc<ScriptSlot>) -> Option<Self> {
        slot.is::<T>().then(|| Self {
            entity,
            slot,
            _marker: PhantomData,
        })
    }

    /// The entity the script is attached to
    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn class_name(&self) -> &str {
        self.slot.class_name()
    }

    /// Read the script
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let guard = self.slot.try_lock()?;
        let script: &dyn Script = &**guard;
        script.as_any().downcast_ref::<T>().map(f)
    }

    /// Mutate the script
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut guard = self.slot.try_lock()?;
        let script: &mut dyn Script = &mut **guard;
        script.as_any_mut().downcast_mut::<T>().map(f)
    }
}

impl<T: Script> Clone for ScriptRef<T> {
    fn clone(&self) -> Self {
        Self {
            entity: self.entity.clone(),
            slot: Arc::clone(&self.slot),
            _marker: PhantomData,
        }
    }
}

impl<T: Script> fmt::Debug for ScriptRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptRef")
            .field("entity", &self.entity)
            .field("class_name", &self.slot.class_name)
            .finish()
    }
}
