//! Per-call script context and cross-instance shared state

use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::bridge::Bridge;
use crate::entities::{Entity, Scene};
use crate::input::{self, Application, Input, Time};

/// Typed values shared by every script in one runtime
///
/// Holds at most one value per type. Scripts that need to share state
/// (a score counter, the player entity) store it here instead of in
/// statics, so each runtime and each test starts clean.
#[derive(Default)]
pub struct SharedState {
    values: HashMap<TypeId, Box<dyn Any + Send>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, returning the previous one of the same type
    pub fn insert<T: Any + Send>(&mut self, value: T) -> Option<T> {
        self.values
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(|old| old.downcast::<T>().ok())
            .map(|old| *old)
    }

    pub fn get<T: Any + Send>(&self) -> Option<&T> {
        self.values
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref::<T>())
    }

    pub fn get_mut<T: Any + Send>(&mut self) -> Option<&mut T> {
        self.values
            .get_mut(&TypeId::of::<T>())
            .and_then(|v| v.downcast_mut::<T>())
    }

    /// Get the value of type `T`, inserting `T::default()` if absent
    pub fn get_or_default<T: Any + Send + Default>(&mut self) -> &mut T {
        self.get_or_insert_with(T::default)
    }

    pub fn get_or_insert_with<T: Any + Send>(&mut self, init: impl FnOnce() -> T) -> &mut T {
        let value = self
            .values
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(init()));
        match value.downcast_mut::<T>() {
            Some(value) => value,
            None => unreachable!("shared state entry keyed by a different type"),
        }
    }

    pub fn remove<T: Any + Send>(&mut self) -> Option<T> {
        self.values
            .remove(&TypeId::of::<T>())
            .and_then(|v| v.downcast::<T>().ok())
            .map(|v| *v)
    }

    pub fn contains<T: Any + Send>(&self) -> bool {
        self.values.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl std::fmt::Debug for SharedState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedState")
            .field("len", &self.values.len())
            .finish()
    }
}

/// What a script hook receives
pub struct ScriptContext<'a> {
    bridge: &'a Bridge,
    entity: &'a Entity,
    shared: &'a mut SharedState,
}

impl<'a> ScriptContext<'a> {
    pub fn new(bridge: &'a Bridge, entity: &'a Entity, shared: &'a mut SharedState) -> Self {
        Self {
            bridge,
            entity,
            shared,
        }
    }

    pub fn bridge(&self) -> &'a Bridge {
        self.bridge
    }

    /// The entity this script is attached to
    pub fn entity(&self) -> &'a Entity {
        self.entity
    }

    pub fn scene(&self) -> Scene<'a> {
        Scene::new(self.bridge)
    }

    pub fn input(&self) -> Input<'a> {
        Input::new(self.bridge)
    }

    pub fn time(&self) -> Time<'a> {
        Time::new(self.bridge)
    }

    pub fn application(&self) -> Application<'a> {
        Application::new(self.bridge)
    }

    /// Script log output
    pub fn debug(&self) -> input::Debug<'a> {
        input::Debug::new(self.bridge)
    }

    pub fn shared(&self) -> &SharedState {
        self.shared
    }

    pub fn shared_mut(&mut self) -> &mut SharedState {
        self.shared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Score(u32);

    #[derive(Debug, PartialEq)]
    struct Label(&'static str);

    #[test]
    fn test_insert_and_get() {
        let mut state = SharedState::new();
        assert!(state.insert(Score(1)).is_none());
        assert_eq!(state.insert(Score(2)), Some(Score(1)));
        assert_eq!(state.get::<Score>(), Some(&Score(2)));
        assert!(state.get::<Label>().is_none());
    }

    #[test]
    fn test_values_are_keyed_by_type() {
        let mut state = SharedState::new();
        state.insert(Score(7));
        state.insert(Label("boss"));
        assert_eq!(state.len(), 2);
        assert_eq!(state.remove::<Label>(), Some(Label("boss")));
        assert!(!state.contains::<Label>());
        assert!(state.contains::<Score>());
    }

    #[test]
    fn test_get_or_default() {
        let mut state = SharedState::new();
        state.get_or_default::<Score>().0 += 5;
        state.get_or_default::<Score>().0 += 5;
        assert_eq!(state.get::<Score>(), Some(&Score(10)));
    }
}
