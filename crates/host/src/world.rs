//! Entity storage
//!
//! Entities live in a generational [`SlotMap`]; the handle given out to the
//! managed side is the slot key's FFI encoding, so a destroyed entity's
//! handle never aliases a later one.

use slotmap::{new_key_type, Key, KeyData, SlotMap};

use nebula_engine::ScriptObject;
use nebula_sdk::{AssetHandle, BodyType, Color, EntityHandle, Vector2, Vector3};

new_key_type! {
    /// Slot key for an entity record
    pub(crate) struct EntityKey;
}

/// Decode a handle into a slot key, rejecting the sentinel and any value
/// that is not a canonical key encoding
pub(crate) fn entity_key(handle: EntityHandle) -> Option<EntityKey> {
    let raw = handle.non_sentinel()?.raw();
    let key: EntityKey = KeyData::from_ffi(raw).into();
    (key.data().as_ffi() == raw).then_some(key)
}

pub(crate) fn entity_handle(key: EntityKey) -> EntityHandle {
    EntityHandle::from_raw(key.data().as_ffi())
}

/// Component categories a [`MemoryHost`](crate::MemoryHost) knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Transform,
    Camera,
    Script,
    SpriteRenderer,
    CircleRenderer,
    StringRenderer,
    Rigidbody2D,
    BoxCollider2D,
    CircleCollider2D,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 9] = [
        ComponentKind::Transform,
        ComponentKind::Camera,
        ComponentKind::Script,
        ComponentKind::SpriteRenderer,
        ComponentKind::CircleRenderer,
        ComponentKind::StringRenderer,
        ComponentKind::Rigidbody2D,
        ComponentKind::BoxCollider2D,
        ComponentKind::CircleCollider2D,
    ];

    /// Category name the managed side resolves
    pub const fn name(self) -> &'static str {
        match self {
            ComponentKind::Transform => "TransformComponent",
            ComponentKind::Camera => "CameraComponent",
            ComponentKind::Script => "ScriptComponent",
            ComponentKind::SpriteRenderer => "SpriteRendererComponent",
            ComponentKind::CircleRenderer => "CircleRendererComponent",
            ComponentKind::StringRenderer => "StringRendererComponent",
            ComponentKind::Rigidbody2D => "Rigidbody2DComponent",
            ComponentKind::BoxCollider2D => "BoxCollider2DComponent",
            ComponentKind::CircleCollider2D => "CircleCollider2DComponent",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Transform {
    pub translation: Vector3,
    pub rotation: Vector3,
    pub scale: Vector3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vector3::ZERO,
            rotation: Vector3::ZERO,
            scale: Vector3::ONE,
        }
    }
}

impl Transform {
    /// Place `local` inside this (parent world) transform
    ///
    /// Rotation about z is applied to the child's offset; rotations
    /// themselves add and scales multiply.
    pub fn compose(&self, local: &Transform) -> Transform {
        let offset = local.translation.scale_by(self.scale);
        let (sin, cos) = self.rotation.z.sin_cos();
        let rotated = Vector3::new(
            offset.x * cos - offset.y * sin,
            offset.x * sin + offset.y * cos,
            offset.z,
        );
        Transform {
            translation: self.translation + rotated,
            rotation: self.rotation + local.rotation,
            scale: self.scale.scale_by(local.scale),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Camera {
    pub primary: bool,
    pub fixed_aspect_ratio: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            primary: true,
            fixed_aspect_ratio: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ScriptData {
    pub class_name: String,
}

#[derive(Debug, Clone)]
pub(crate) struct SpriteRenderer {
    pub colour: Color,
    pub offset: Vector2,
    pub cell_size: Vector2,
    pub cell_number: Vector2,
    pub tiling: f32,
}

impl Default for SpriteRenderer {
    fn default() -> Self {
        Self {
            colour: Color::WHITE,
            offset: Vector2::ZERO,
            cell_size: Vector2::ONE,
            cell_number: Vector2::ONE,
            tiling: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CircleRenderer {
    pub colour: Color,
    pub radius: f32,
    pub thickness: f32,
    pub fade: f32,
}

impl Default for CircleRenderer {
    fn default() -> Self {
        Self {
            colour: Color::WHITE,
            radius: 0.5,
            thickness: 1.0,
            fade: 0.005,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct StringRenderer {
    pub text: String,
    pub colour: Color,
    pub font: AssetHandle,
    pub bold: bool,
    pub italic: bool,
    pub kerning: f32,
    pub line_spacing: f32,
}

impl Default for StringRenderer {
    fn default() -> Self {
        Self {
            text: String::new(),
            colour: Color::WHITE,
            font: AssetHandle::NONE,
            bold: false,
            italic: false,
            kerning: 0.0,
            line_spacing: 0.0,
        }
    }
}

/// Unit-mass body; only linear motion is simulated
#[derive(Debug, Clone)]
pub(crate) struct Rigidbody2D {
    pub body_type: BodyType,
    pub fixed_rotation: bool,
    pub linear_velocity: Vector2,
    pub force: Vector2,
    pub awake: bool,
}

impl Default for Rigidbody2D {
    fn default() -> Self {
        Self {
            body_type: BodyType::Static,
            fixed_rotation: false,
            linear_velocity: Vector2::ZERO,
            force: Vector2::ZERO,
            awake: true,
        }
    }
}

impl Rigidbody2D {
    /// Whether an applied impulse or force should act on this body
    ///
    /// A sleeping body ignores it unless `wake` is set.
    fn accepts(&mut self, wake: bool) -> bool {
        if self.body_type != BodyType::Dynamic {
            return false;
        }
        if !self.awake {
            if !wake {
                return false;
            }
            self.awake = true;
        }
        true
    }

    pub fn apply_impulse(&mut self, impulse: Vector2, wake: bool) {
        if self.accepts(wake) {
            self.linear_velocity = self.linear_velocity + impulse;
        }
    }

    pub fn apply_force(&mut self, force: Vector2, wake: bool) {
        if self.accepts(wake) {
            self.force = self.force + force;
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct BoxCollider2D {
    pub size: Vector2,
    pub offset: Vector2,
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
    pub threshold: f32,
    pub mask: u16,
}

impl Default for BoxCollider2D {
    fn default() -> Self {
        Self {
            size: Vector2::splat(0.5),
            offset: Vector2::ZERO,
            density: 1.0,
            friction: 0.5,
            restitution: 0.0,
            threshold: 0.5,
            mask: u16::MAX,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CircleCollider2D {
    pub radius: f32,
    pub offset: Vector2,
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
    pub threshold: f32,
    pub mask: u16,
}

impl Default for CircleCollider2D {
    fn default() -> Self {
        Self {
            radius: 0.5,
            offset: Vector2::ZERO,
            density: 1.0,
            friction: 0.5,
            restitution: 0.0,
            threshold: 0.5,
            mask: u16::MAX,
        }
    }
}

/// Everything stored for one entity
#[derive(Clone)]
pub(crate) struct EntityRecord {
    pub name: String,
    pub layer: u16,
    pub parent: Option<EntityKey>,
    pub children: Vec<EntityKey>,
    pub transform: Transform,
    pub camera: Option<Camera>,
    pub script: Option<ScriptData>,
    pub sprite_renderer: Option<SpriteRenderer>,
    pub circle_renderer: Option<CircleRenderer>,
    pub string_renderer: Option<StringRenderer>,
    pub rigidbody2d: Option<Rigidbody2D>,
    pub box_collider2d: Option<BoxCollider2D>,
    pub circle_collider2d: Option<CircleCollider2D>,
    pub script_instance: Option<ScriptObject>,
}

impl EntityRecord {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            layer: 1,
            parent: None,
            children: Vec::new(),
            transform: Transform::default(),
            camera: None,
            script: None,
            sprite_renderer: None,
            circle_renderer: None,
            string_renderer: None,
            rigidbody2d: None,
            box_collider2d: None,
            circle_collider2d: None,
            script_instance: None,
        }
    }

    pub fn has(&self, kind: ComponentKind) -> bool {
        match kind {
            ComponentKind::Transform => true,
            ComponentKind::Camera => self.camera.is_some(),
            ComponentKind::Script => self.script.is_some(),
            ComponentKind::SpriteRenderer => self.sprite_renderer.is_some(),
            ComponentKind::CircleRenderer => self.circle_renderer.is_some(),
            ComponentKind::StringRenderer => self.string_renderer.is_some(),
            ComponentKind::Rigidbody2D => self.rigidbody2d.is_some(),
            ComponentKind::BoxCollider2D => self.box_collider2d.is_some(),
            ComponentKind::CircleCollider2D => self.circle_collider2d.is_some(),
        }
    }

    /// Attach a default component; returns `false` if it was already there
    pub fn add(&mut self, kind: ComponentKind) -> bool {
        fn insert<T: Default>(slot: &mut Option<T>) -> bool {
            if slot.is_some() {
                return false;
            }
            *slot = Some(T::default());
            true
        }

        match kind {
            ComponentKind::Transform => false,
            ComponentKind::Camera => insert(&mut self.camera),
            ComponentKind::Script => insert(&mut self.script),
            ComponentKind::SpriteRenderer => insert(&mut self.sprite_renderer),
            ComponentKind::CircleRenderer => insert(&mut self.circle_renderer),
            ComponentKind::StringRenderer => insert(&mut self.string_renderer),
            ComponentKind::Rigidbody2D => insert(&mut self.rigidbody2d),
            ComponentKind::BoxCollider2D => insert(&mut self.box_collider2d),
            ComponentKind::CircleCollider2D => insert(&mut self.circle_collider2d),
        }
    }

    /// Component data only: no hierarchy links, no script instance
    fn detached(&self) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            script_instance: None,
            ..self.clone()
        }
    }
}

/// Detached copy of an entity subtree
///
/// Used for duplication and as the stored body of a prefab.
#[derive(Clone)]
pub(crate) struct EntityTemplate {
    record: EntityRecord,
    children: Vec<EntityTemplate>,
}

impl EntityTemplate {
    pub fn name(&self) -> &str {
        &self.record.name
    }
}

#[derive(Default)]
pub(crate) struct World {
    entities: SlotMap<EntityKey, EntityRecord>,
}

impl World {
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn spawn(&mut self, record: EntityRecord) -> EntityKey {
        self.entities.insert(record)
    }

    /// Slot key of a live entity
    pub fn key(&self, handle: EntityHandle) -> Option<EntityKey> {
        entity_key(handle).filter(|key| self.entities.contains_key(*key))
    }

    pub fn contains(&self, handle: EntityHandle) -> bool {
        self.key(handle).is_some()
    }

    pub fn get(&self, handle: EntityHandle) -> Option<&EntityRecord> {
        self.entities.get(entity_key(handle)?)
    }

    pub fn get_mut(&mut self, handle: EntityHandle) -> Option<&mut EntityRecord> {
        self.entities.get_mut(entity_key(handle)?)
    }

    pub fn record(&self, key: EntityKey) -> Option<&EntityRecord> {
        self.entities.get(key)
    }

    /// First live entity with this name, in slot order
    pub fn find_by_name(&self, name: &str) -> Option<EntityKey> {
        self.entities
            .iter()
            .find(|(_, record)| record.name == name)
            .map(|(key, _)| key)
    }

    fn is_ancestor(&self, ancestor: EntityKey, mut of: EntityKey) -> bool {
        while let Some(parent) = self.entities.get(of).and_then(|r| r.parent) {
            if parent == ancestor {
                return true;
            }
            of = parent;
        }
        false
    }

    /// Move `child` under `parent` (or to the root)
    ///
    /// Returns `false` without changing anything if that would create a
    /// cycle.
    pub fn set_parent(&mut self, child: EntityKey, parent: Option<EntityKey>) -> bool {
        if let Some(parent) = parent {
            if parent == child || self.is_ancestor(child, parent) {
                return false;
            }
        }

        let previous = self.entities.get(child).and_then(|r| r.parent);
        if let Some(old) = previous.and_then(|key| self.entities.get_mut(key)) {
            old.children.retain(|&c| c != child);
        }
        if let Some(new) = parent.and_then(|key| self.entities.get_mut(key)) {
            new.children.push(child);
        }
        if let Some(record) = self.entities.get_mut(child) {
            record.parent = parent;
        }
        true
    }

    /// Detached copy of the subtree rooted at `key`
    pub fn snapshot(&self, key: EntityKey) -> Option<EntityTemplate> {
        let record = self.entities.get(key)?;
        let children = record
            .children
            .iter()
            .filter_map(|&child| self.snapshot(child))
            .collect();
        Some(EntityTemplate {
            record: record.detached(),
            children,
        })
    }

    /// Spawn a template as fresh entities under `parent`
    pub fn instantiate(&mut self, template: &EntityTemplate, parent: Option<EntityKey>) -> EntityKey {
        let mut record = template.record.clone();
        record.parent = parent;
        let key = self.entities.insert(record);
        if let Some(parent) = parent.and_then(|p| self.entities.get_mut(p)) {
            parent.children.push(key);
        }
        for child in &template.children {
            self.instantiate(child, Some(key));
        }
        key
    }

    /// Deep-copy the subtree rooted at `key` as a sibling of it
    pub fn duplicate(&mut self, key: EntityKey) -> Option<EntityKey> {
        let template = self.snapshot(key)?;
        let parent = self.entities.get(key)?.parent;
        Some(self.instantiate(&template, parent))
    }

    /// Remove the subtree rooted at `key`
    ///
    /// The removed records are handed back so that script instances they
    /// hold can be dropped after the world lock is released.
    pub fn remove_subtree(&mut self, key: EntityKey) -> Vec<EntityRecord> {
        let parent = self.entities.get(key).and_then(|r| r.parent);
        if let Some(parent) = parent.and_then(|p| self.entities.get_mut(p)) {
            parent.children.retain(|&c| c != key);
        }

        let mut removed = Vec::new();
        let mut pending = vec![key];
        while let Some(next) = pending.pop() {
            if let Some(record) = self.entities.remove(next) {
                pending.extend(record.children.iter().copied());
                removed.push(record);
            }
        }
        removed
    }

    /// Transform of `key` composed with every ancestor's
    pub fn world_transform(&self, key: EntityKey) -> Option<Transform> {
        let mut chain = Vec::new();
        let mut current = Some(key);
        while let Some(k) = current {
            let record = self.entities.get(k)?;
            chain.push(record.transform);
            current = record.parent;
        }
        let root = chain.pop()?;
        Some(
            chain
                .iter()
                .rev()
                .fold(root, |world, local| world.compose(local)),
        )
    }

    /// Advance every rigid body by `dt` seconds
    ///
    /// Dynamic bodies integrate accumulated force into velocity; dynamic and
    /// kinematic bodies then move by their velocity. Accumulated forces are
    /// cleared.
    pub fn integrate(&mut self, dt: f32) {
        for record in self.entities.values_mut() {
            let Some(body) = record.rigidbody2d.as_mut() else {
                continue;
            };
            let force = std::mem::take(&mut body.force);
            match body.body_type {
                BodyType::Static => continue,
                BodyType::Dynamic if !body.awake => continue,
                BodyType::Dynamic => body.linear_velocity = body.linear_velocity + force * dt,
                BodyType::Kinematic => {}
            }
            let step = body.linear_velocity.extend(0.0) * dt;
            record.transform.translation = record.transform.translation + step;
        }
    }
}
