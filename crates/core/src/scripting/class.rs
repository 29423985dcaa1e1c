//! Script class registry
//!
//! Maps the class name stored in a `ScriptComponent` to a factory for the
//! concrete script type.

use std::any::{type_name, TypeId};
use std::collections::HashMap;

use tracing::debug;

use super::Script;

type Factory = Box<dyn Fn() -> Box<dyn Script> + Send + Sync>;

struct ScriptClass {
    type_id: TypeId,
    factory: Factory,
}

/// Registered script classes keyed by name
#[derive(Default)]
pub struct ScriptClassRegistry {
    classes: HashMap<String, ScriptClass>,
}

impl ScriptClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` under `name`, constructed with `T::default()`
    pub fn register<T: Script + Default>(&mut self, name: &str) -> &mut Self {
        self.register_with(name, T::default)
    }

    /// Register `T` under `name` with a custom constructor
    ///
    /// Registering a name twice replaces the earlier class.
    pub fn register_with<T: Script>(
        &mut self,
        name: &str,
        factory: impl Fn() -> T + Send + Sync + 'static,
    ) -> &mut Self {
        debug!("Registered script class {} ({})", name, type_name::<T>());
        self.classes.insert(
            name.to_owned(),
            ScriptClass {
                type_id: TypeId::of::<T>(),
                factory: Box::new(move || Box::new(factory()) as Box<dyn Script>),
            },
        );
        self
    }

    /// Build a new instance of a class
    pub(crate) fn create(&self, name: &str) -> Option<(TypeId, Box<dyn Script>)> {
        self.classes
            .get(name)
            .map(|class| (class.type_id, (class.factory)()))
    }

    /// Name a type is registered under
    pub fn name_of<T: Script>(&self) -> Option<&str> {
        let id = TypeId::of::<T>();
        self.classes
            .iter()
            .find(|(_, class)| class.type_id == id)
            .map(|(name, _)| name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Registered class names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.classes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl std::fmt::Debug for ScriptClassRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptClassRegistry")
            .field("classes", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Player {
        speed: f32,
    }

    impl Script for Player {}

    struct Camera {
        distance: f32,
    }

    impl Script for Camera {}

    #[test]
    fn test_register_and_create() {
        let mut classes = ScriptClassRegistry::new();
        classes
            .register::<Player>("Sandbox.Player")
            .register_with("Sandbox.Camera", || Camera { distance: 12.0 });

        assert_eq!(classes.len(), 2);
        assert_eq!(classes.names(), vec!["Sandbox.Camera", "Sandbox.Player"]);

        let (id, script) = classes.create("Sandbox.Camera").unwrap();
        assert_eq!(id, TypeId::of::<Camera>());
        let camera = (*script).as_any().downcast_ref::<Camera>().unwrap();
        assert_eq!(camera.distance, 12.0);

        let (_, script) = classes.create("Sandbox.Player").unwrap();
        assert_eq!(
            (*script).as_any().downcast_ref::<Player>().map(|p| p.speed),
            Some(0.0)
        );
    }

    #[test]
    fn test_unknown_class() {
        let classes = ScriptClassRegistry::new();
        assert!(classes.create("Missing").is_none());
        assert!(!classes.contains("Missing"));
    }

    #[test]
    fn test_name_of() {
        let mut classes = ScriptClassRegistry::new();
        classes.register::<Player>("Sandbox.Player");
        assert_eq!(classes.name_of::<Player>(), Some("Sandbox.Player"));
        assert_eq!(classes.name_of::<Camera>(), None);
    }
}
