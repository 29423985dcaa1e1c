//! In-memory [`NativeHost`]

use std::collections::{HashMap, HashSet};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use nebula_engine::hash::token_for;
use nebula_engine::{HostError, HostResult, NativeHost, ScriptObject};
use nebula_sdk::{
    AssetHandle, BodyType, Color, EntityHandle, KeyCode, LogLevel, MouseCode, TypeKind,
    TypeToken, Vector2, Vector3, BRIDGE_API_VERSION,
};

use crate::assets::{AssetStore, AssetType};
use crate::world::{entity_handle, ComponentKind, EntityRecord, World};

/// Generate a getter/setter pair for one field of an optional component
///
/// `by_ref` setters take the payload by reference, `by_value` setters take
/// it by value.
macro_rules! component_properties {
    ($prefix:ident => $field:ident ($kind:ident) { $($mode:ident $prop:ident: $ty:ty),* $(,)? }) => {
        $( component_properties!(@property $prefix, $field, $kind, $mode $prop: $ty); )*
    };
    (@property $prefix:ident, $field:ident, $kind:ident, by_ref $prop:ident: $ty:ty) => {
        paste::paste! {
            fn [<$prefix _ $prop>](&self, entity: EntityHandle) -> HostResult<$ty> {
                self.read_component(entity, ComponentKind::$kind, |r| r.$field.as_ref(), |c| c.$prop)
            }

            fn [<set_ $prefix _ $prop>](&self, entity: EntityHandle, value: &$ty) -> HostResult<()> {
                self.write_component(entity, ComponentKind::$kind, |r| r.$field.as_mut(), |c| c.$prop = *value)
            }
        }
    };
    (@property $prefix:ident, $field:ident, $kind:ident, by_value $prop:ident: $ty:ty) => {
        paste::paste! {
            fn [<$prefix _ $prop>](&self, entity: EntityHandle) -> HostResult<$ty> {
                self.read_component(entity, ComponentKind::$kind, |r| r.$field.as_ref(), |c| c.$prop)
            }

            fn [<set_ $prefix _ $prop>](&self, entity: EntityHandle, value: $ty) -> HostResult<()> {
                self.write_component(entity, ComponentKind::$kind, |r| r.$field.as_mut(), |c| c.$prop = value)
            }
        }
    };
}

/// Per-frame input and timing state
#[derive(Debug)]
struct FrameState {
    delta_time: f32,
    window_size: Vector2,
    mouse_position: Vector2,
    keys: HashSet<KeyCode>,
    mouse_buttons: HashSet<MouseCode>,
    hovered: EntityHandle,
}

impl Default for FrameState {
    fn default() -> Self {
        Self {
            delta_time: 0.0,
            window_size: Vector2::new(1280.0, 720.0),
            mouse_position: Vector2::ZERO,
            keys: HashSet::new(),
            mouse_buttons: HashSet::new(),
            hovered: EntityHandle::NONE,
        }
    }
}

/// A complete native host backed by plain memory
///
/// Every boundary call is applied immediately under a lock. Besides the
/// [`NativeHost`] catalogue it exposes controls for driving a frame from
/// tests: input state, timing, hierarchy and prefab definitions.
pub struct MemoryHost {
    api_version: String,
    world: RwLock<World>,
    assets: AssetStore,
    component_tokens: HashMap<TypeToken, ComponentKind>,
    frame: RwLock<FrameState>,
    logs: Mutex<Vec<(LogLevel, String)>>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    pub fn new() -> Self {
        let component_tokens = ComponentKind::ALL
            .into_iter()
            .map(|kind| (token_for(TypeKind::Component, kind.name()), kind))
            .collect();

        Self {
            api_version: BRIDGE_API_VERSION.to_owned(),
            world: RwLock::new(World::default()),
            assets: AssetStore::default(),
            component_tokens,
            frame: RwLock::new(FrameState::default()),
            logs: Mutex::new(Vec::new()),
        }
    }

    /// Report a different catalogue revision
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Token this host mints for a component category
    pub fn component_token(&self, kind: ComponentKind) -> TypeToken {
        token_for(TypeKind::Component, kind.name())
    }

    /// Token this host mints for an asset category
    pub fn asset_token(&self, ty: AssetType) -> TypeToken {
        token_for(TypeKind::Asset, ty.name())
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.world.read().len()
    }

    /// Number of interned asset records
    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    /// Drain the script log lines written so far
    pub fn take_logs(&self) -> Vec<(LogLevel, String)> {
        std::mem::take(&mut *self.logs.lock())
    }

    pub fn set_delta_time(&self, seconds: f32) {
        self.frame.write().delta_time = seconds;
    }

    pub fn set_window_size(&self, size: Vector2) {
        self.frame.write().window_size = size;
    }

    pub fn set_mouse_position(&self, position: Vector2) {
        self.frame.write().mouse_position = position;
    }

    pub fn set_key_down(&self, key: KeyCode, down: bool) {
        let mut frame = self.frame.write();
        if down {
            frame.keys.insert(key);
        } else {
            frame.keys.remove(&key);
        }
    }

    pub fn set_mouse_button_down(&self, button: MouseCode, down: bool) {
        let mut frame = self.frame.write();
        if down {
            frame.mouse_buttons.insert(button);
        } else {
            frame.mouse_buttons.remove(&button);
        }
    }

    pub fn set_hovered_entity(&self, entity: EntityHandle) {
        self.frame.write().hovered = entity;
    }

    /// Start a frame of `dt` seconds
    ///
    /// Sets the delta time and advances rigid bodies.
    pub fn step(&self, dt: f32) {
        self.set_delta_time(dt);
        self.world.write().integrate(dt);
    }

    /// Reparent `child`; `None` makes it a root
    pub fn set_parent(&self, child: EntityHandle, parent: Option<EntityHandle>) -> HostResult<()> {
        let mut world = self.world.write();
        let child_key = world.key(child).ok_or(HostError::InvalidEntity(child))?;
        let parent_key = match parent {
            Some(handle) => Some(world.key(handle).ok_or(HostError::InvalidEntity(handle))?),
            None => None,
        };
        if world.set_parent(child_key, parent_key) {
            Ok(())
        } else {
            Err(HostError::NotSupported("parenting an entity under itself"))
        }
    }

    /// Store the subtree rooted at `source` as the body of a prefab asset
    ///
    /// Interns `path` if needed; the path must name a prefab.
    pub fn define_prefab(&self, path: &str, source: EntityHandle) -> HostResult<AssetHandle> {
        let template = {
            let world = self.world.read();
            let key = world.key(source).ok_or(HostError::InvalidEntity(source))?;
            world.snapshot(key).ok_or(HostError::InvalidEntity(source))?
        };

        let prefab = self.assets.intern(path)?;
        self.assets.write(prefab, |record| {
            record.prefab_mut()?.template = Some(template);
            Ok(())
        })?;
        debug!("Defined prefab {:?} from {}", path, source);
        Ok(prefab)
    }

    /// Set the bold and italic variants of a font
    pub fn set_font_variants(
        &self,
        font: AssetHandle,
        bold: AssetHandle,
        italic: AssetHandle,
    ) -> HostResult<()> {
        self.assets.expect_optional(bold, AssetType::Font)?;
        self.assets.expect_optional(italic, AssetType::Font)?;
        self.assets.write(font, |record| {
            let data = record.font_mut()?;
            data.bold = bold;
            data.italic = italic;
            Ok(())
        })
    }

    /// Put a rigid body to sleep or wake it
    pub fn set_body_awake(&self, entity: EntityHandle, awake: bool) -> HostResult<()> {
        self.write_component(
            entity,
            ComponentKind::Rigidbody2D,
            |r| r.rigidbody2d.as_mut(),
            |body| body.awake = awake,
        )
    }

    fn component_kind(&self, token: TypeToken) -> HostResult<ComponentKind> {
        self.component_tokens
            .get(&token)
            .copied()
            .ok_or(HostError::UnknownTypeToken(token))
    }

    fn read_entity<T>(
        &self,
        entity: EntityHandle,
        read: impl FnOnce(&EntityRecord) -> T,
    ) -> HostResult<T> {
        let world = self.world.read();
        world
            .get(entity)
            .map(read)
            .ok_or(HostError::InvalidEntity(entity))
    }

    fn write_entity<T>(
        &self,
        entity: EntityHandle,
        write: impl FnOnce(&mut EntityRecord) -> T,
    ) -> HostResult<T> {
        let mut world = self.world.write();
        world
            .get_mut(entity)
            .map(write)
            .ok_or(HostError::InvalidEntity(entity))
    }

    fn read_component<C, T>(
        &self,
        entity: EntityHandle,
        kind: ComponentKind,
        select: impl FnOnce(&EntityRecord) -> Option<&C>,
        read: impl FnOnce(&C) -> T,
    ) -> HostResult<T> {
        self.read_entity(entity, |record| select(record).map(read))?
            .ok_or(HostError::MissingComponent {
                entity,
                component: kind.name(),
            })
    }

    fn write_component<C, T>(
        &self,
        entity: EntityHandle,
        kind: ComponentKind,
        select: impl FnOnce(&mut EntityRecord) -> Option<&mut C>,
        write: impl FnOnce(&mut C) -> T,
    ) -> HostResult<T> {
        self.write_entity(entity, |record| select(record).map(write))?
            .ok_or(HostError::MissingComponent {
                entity,
                component: kind.name(),
            })
    }

    fn world_transform_of<T>(
        &self,
        entity: EntityHandle,
        read: impl FnOnce(&crate::world::Transform) -> T,
    ) -> HostResult<T> {
        let world = self.world.read();
        world
            .key(entity)
            .and_then(|key| world.world_transform(key))
            .map(|transform| read(&transform))
            .ok_or(HostError::InvalidEntity(entity))
    }
}

impl std::fmt::Debug for MemoryHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryHost")
            .field("api_version", &self.api_version)
            .field("entities", &self.entity_count())
            .field("assets", &self.asset_count())
            .finish()
    }
}

impl NativeHost for MemoryHost {
    fn api_version(&self) -> &str {
        &self.api_version
    }

    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Info => info!("[script] {}", message),
            LogLevel::Warn => warn!("[script] {}", message),
            LogLevel::Error => error!("[script] {}", message),
        }
        self.logs.lock().push((level, message.to_owned()));
    }

    fn resolve_type(&self, kind: TypeKind, name: &str) -> Option<TypeToken> {
        let known = match kind {
            TypeKind::Component => ComponentKind::from_name(name).is_some(),
            TypeKind::Asset => AssetType::from_name(name).is_some(),
        };
        known.then(|| token_for(kind, name))
    }

    fn is_entity_valid(&self, entity: EntityHandle) -> bool {
        self.world.read().contains(entity)
    }

    fn window_size(&self) -> Vector2 {
        self.frame.read().window_size
    }

    fn hovered_entity(&self) -> EntityHandle {
        let hovered = self.frame.read().hovered;
        if self.is_entity_valid(hovered) {
            hovered
        } else {
            EntityHandle::NONE
        }
    }

    fn delta_time(&self) -> f32 {
        self.frame.read().delta_time
    }

    fn is_key_down(&self, key: KeyCode) -> bool {
        self.frame.read().keys.contains(&key)
    }

    fn is_mouse_button_down(&self, button: MouseCode) -> bool {
        self.frame.read().mouse_buttons.contains(&button)
    }

    fn mouse_position(&self) -> Vector2 {
        self.frame.read().mouse_position
    }

    fn asset_get_or_create_handle(&self, path: &str) -> HostResult<AssetHandle> {
        self.assets.intern(path)
    }

    fn asset_handle_from_path(&self, path: &str) -> AssetHandle {
        self.assets.lookup(path)
    }

    fn asset_path_from_handle(&self, asset: AssetHandle) -> HostResult<String> {
        self.assets.read(asset, |record| Ok(record.path.clone()))
    }

    fn asset_type(&self, asset: AssetHandle) -> HostResult<TypeToken> {
        self.assets
            .read(asset, |record| Ok(token_for(TypeKind::Asset, record.ty.name())))
    }

    fn font_bold(&self, font: AssetHandle) -> HostResult<AssetHandle> {
        self.assets.read(font, |record| Ok(record.font()?.bold))
    }

    fn font_italic(&self, font: AssetHandle) -> HostResult<AssetHandle> {
        self.assets.read(font, |record| Ok(record.font()?.italic))
    }

    fn material_colour(&self, material: AssetHandle) -> HostResult<Color> {
        self.assets.read(material, |record| Ok(record.material()?.colour))
    }

    fn set_material_colour(&self, material: AssetHandle, colour: &Color) -> HostResult<()> {
        self.assets.write(material, |record| {
            record.material_mut()?.colour = *colour;
            Ok(())
        })
    }

    fn material_texture(&self, material: AssetHandle) -> HostResult<AssetHandle> {
        self.assets.read(material, |record| Ok(record.material()?.texture))
    }

    fn set_material_texture(
        &self,
        material: AssetHandle,
        texture: AssetHandle,
    ) -> HostResult<()> {
        self.assets.expect_optional(texture, AssetType::Texture)?;
        self.assets.write(material, |record| {
            record.material_mut()?.texture = texture;
            Ok(())
        })
    }

    fn material_tiling(&self, material: AssetHandle) -> HostResult<f32> {
        self.assets.read(material, |record| Ok(record.material()?.tiling))
    }

    fn set_material_tiling(&self, material: AssetHandle, tiling: f32) -> HostResult<()> {
        self.assets.write(material, |record| {
            record.material_mut()?.tiling = tiling;
            Ok(())
        })
    }

    fn prefab_instantiate(&self, prefab: AssetHandle) -> HostResult<EntityHandle> {
        let template = self
            .assets
            .read(prefab, |record| Ok(record.prefab()?.template.clone()))?;
        let Some(template) = template else {
            debug!("Prefab {} has no body", prefab);
            return Ok(EntityHandle::NONE);
        };

        let root = self.world.write().instantiate(&template, None);
        debug!("Instantiated prefab {} as {:?}", prefab, template.name());
        Ok(entity_handle(root))
    }

    fn find_entity_by_name(&self, name: &str) -> EntityHandle {
        self.world
            .read()
            .find_by_name(name)
            .map(entity_handle)
            .unwrap_or(EntityHandle::NONE)
    }

    fn create_entity(&self, name: &str) -> EntityHandle {
        let key = self.world.write().spawn(EntityRecord::new(name));
        entity_handle(key)
    }

    fn duplicate_entity(&self, entity: EntityHandle) -> HostResult<EntityHandle> {
        let mut world = self.world.write();
        let key = world.key(entity).ok_or(HostError::InvalidEntity(entity))?;
        world
            .duplicate(key)
            .map(entity_handle)
            .ok_or(HostError::InvalidEntity(entity))
    }

    fn destroy_entity(&self, entity: EntityHandle) -> HostResult<()> {
        let removed = {
            let mut world = self.world.write();
            let key = world.key(entity).ok_or(HostError::InvalidEntity(entity))?;
            world.remove_subtree(key)
        };
        debug!("Destroyed {} ({} entities)", entity, removed.len());
        // Script instances may re-enter the host when dropped
        drop(removed);
        Ok(())
    }

    fn has_component(&self, entity: EntityHandle, component: TypeToken) -> HostResult<bool> {
        let kind = self.component_kind(component)?;
        self.read_entity(entity, |record| record.has(kind))
    }

    fn add_component(&self, entity: EntityHandle, component: TypeToken) -> HostResult<bool> {
        let kind = self.component_kind(component)?;
        let added = self.write_entity(entity, |record| record.add(kind))?;
        if added {
            debug!("Added {} to {}", kind.name(), entity);
        }
        Ok(true)
    }

    fn entity_name(&self, entity: EntityHandle) -> HostResult<String> {
        self.read_entity(entity, |record| record.name.clone())
    }

    fn set_entity_name(&self, entity: EntityHandle, name: &str) -> HostResult<()> {
        self.write_entity(entity, |record| record.name = name.to_owned())
    }

    fn entity_layer(&self, entity: EntityHandle) -> HostResult<u16> {
        self.read_entity(entity, |record| record.layer)
    }

    fn set_entity_layer(&self, entity: EntityHandle, layer: u16) -> HostResult<()> {
        self.write_entity(entity, |record| record.layer = layer)
    }

    fn script_instance(&self, entity: EntityHandle) -> HostResult<Option<ScriptObject>> {
        self.read_entity(entity, |record| record.script_instance.clone())
    }

    fn set_script_instance(
        &self,
        entity: EntityHandle,
        instance: Option<ScriptObject>,
    ) -> HostResult<()> {
        let previous = self.write_entity(entity, |record| {
            std::mem::replace(&mut record.script_instance, instance)
        })?;
        // Dropped outside the world lock
        drop(previous);
        Ok(())
    }

    fn find_child_by_name(&self, entity: EntityHandle, name: &str) -> HostResult<EntityHandle> {
        let world = self.world.read();
        let record = world.get(entity).ok_or(HostError::InvalidEntity(entity))?;
        Ok(record
            .children
            .iter()
            .copied()
            .find(|&child| world.record(child).is_some_and(|c| c.name == name))
            .map(entity_handle)
            .unwrap_or(EntityHandle::NONE))
    }

    fn child(&self, entity: EntityHandle, index: usize) -> HostResult<EntityHandle> {
        self.read_entity(entity, |record| {
            record
                .children
                .get(index)
                .copied()
                .map(entity_handle)
                .unwrap_or(EntityHandle::NONE)
        })
    }

    fn child_count(&self, entity: EntityHandle) -> HostResult<usize> {
        self.read_entity(entity, |record| record.children.len())
    }

    fn parent(&self, entity: EntityHandle) -> HostResult<EntityHandle> {
        self.read_entity(entity, |record| {
            record.parent.map(entity_handle).unwrap_or(EntityHandle::NONE)
        })
    }

    fn transform_translation(&self, entity: EntityHandle) -> HostResult<Vector3> {
        self.read_entity(entity, |record| record.transform.translation)
    }

    fn set_transform_translation(&self, entity: EntityHandle, value: &Vector3) -> HostResult<()> {
        self.write_entity(entity, |record| record.transform.translation = *value)
    }

    fn transform_rotation(&self, entity: EntityHandle) -> HostResult<Vector3> {
        self.read_entity(entity, |record| record.transform.rotation)
    }

    fn set_transform_rotation(&self, entity: EntityHandle, value: &Vector3) -> HostResult<()> {
        self.write_entity(entity, |record| record.transform.rotation = *value)
    }

    fn transform_scale(&self, entity: EntityHandle) -> HostResult<Vector3> {
        self.read_entity(entity, |record| record.transform.scale)
    }

    fn set_transform_scale(&self, entity: EntityHandle, value: &Vector3) -> HostResult<()> {
        self.write_entity(entity, |record| record.transform.scale = *value)
    }

    fn transform_world_translation(&self, entity: EntityHandle) -> HostResult<Vector3> {
        self.world_transform_of(entity, |t| t.translation)
    }

    fn transform_world_rotation(&self, entity: EntityHandle) -> HostResult<Vector3> {
        self.world_transform_of(entity, |t| t.rotation)
    }

    fn transform_world_scale(&self, entity: EntityHandle) -> HostResult<Vector3> {
        self.world_transform_of(entity, |t| t.scale)
    }

    component_properties!(camera => camera (Camera) {
        by_value primary: bool,
        by_value fixed_aspect_ratio: bool,
    });

    fn script_class_name(&self, entity: EntityHandle) -> HostResult<String> {
        self.read_component(
            entity,
            ComponentKind::Script,
            |r| r.script.as_ref(),
            |c| c.class_name.clone(),
        )
    }

    fn set_script_class_name(&self, entity: EntityHandle, value: &str) -> HostResult<()> {
        self.write_component(
            entity,
            ComponentKind::Script,
            |r| r.script.as_mut(),
            |c| c.class_name = value.to_owned(),
        )
    }

    component_properties!(sprite_renderer => sprite_renderer (SpriteRenderer) {
        by_ref colour: Color,
        by_ref offset: Vector2,
        by_ref cell_size: Vector2,
        by_ref cell_number: Vector2,
        by_value tiling: f32,
    });

    component_properties!(circle_renderer => circle_renderer (CircleRenderer) {
        by_ref colour: Color,
        by_value radius: f32,
        by_value thickness: f32,
        by_value fade: f32,
    });

    fn string_renderer_text(&self, entity: EntityHandle) -> HostResult<String> {
        self.read_component(
            entity,
            ComponentKind::StringRenderer,
            |r| r.string_renderer.as_ref(),
            |c| c.text.clone(),
        )
    }

    fn set_string_renderer_text(&self, entity: EntityHandle, value: &str) -> HostResult<()> {
        self.write_component(
            entity,
            ComponentKind::StringRenderer,
            |r| r.string_renderer.as_mut(),
            |c| c.text = value.to_owned(),
        )
    }

    fn string_renderer_font(&self, entity: EntityHandle) -> HostResult<AssetHandle> {
        self.read_component(
            entity,
            ComponentKind::StringRenderer,
            |r| r.string_renderer.as_ref(),
            |c| c.font,
        )
    }

    fn set_string_renderer_font(&self, entity: EntityHandle, value: AssetHandle) -> HostResult<()> {
        self.assets.expect_optional(value, AssetType::Font)?;
        self.write_component(
            entity,
            ComponentKind::StringRenderer,
            |r| r.string_renderer.as_mut(),
            |c| c.font = value,
        )
    }

    component_properties!(string_renderer => string_renderer (StringRenderer) {
        by_ref colour: Color,
        by_value bold: bool,
        by_value italic: bool,
        by_value kerning: f32,
        by_value line_spacing: f32,
    });

    component_properties!(rigidbody2d => rigidbody2d (Rigidbody2D) {
        by_value body_type: BodyType,
        by_value fixed_rotation: bool,
    });

    fn rigidbody2d_apply_linear_impulse(
        &self,
        entity: EntityHandle,
        impulse: &Vector2,
        _point: &Vector2,
        wake: bool,
    ) -> HostResult<()> {
        self.rigidbody2d_apply_linear_impulse_to_center(entity, impulse, wake)
    }

    fn rigidbody2d_apply_linear_impulse_to_center(
        &self,
        entity: EntityHandle,
        impulse: &Vector2,
        wake: bool,
    ) -> HostResult<()> {
        self.write_component(
            entity,
            ComponentKind::Rigidbody2D,
            |r| r.rigidbody2d.as_mut(),
            |body| body.apply_impulse(*impulse, wake),
        )
    }

    fn rigidbody2d_apply_force(
        &self,
        entity: EntityHandle,
        force: &Vector2,
        _point: &Vector2,
        wake: bool,
    ) -> HostResult<()> {
        self.rigidbody2d_apply_force_to_center(entity, force, wake)
    }

    fn rigidbody2d_apply_force_to_center(
        &self,
        entity: EntityHandle,
        force: &Vector2,
        wake: bool,
    ) -> HostResult<()> {
        self.write_component(
            entity,
            ComponentKind::Rigidbody2D,
            |r| r.rigidbody2d.as_mut(),
            |body| body.apply_force(*force, wake),
        )
    }

    fn rigidbody2d_linear_velocity(&self, entity: EntityHandle) -> HostResult<Vector2> {
        self.read_component(
            entity,
            ComponentKind::Rigidbody2D,
            |r| r.rigidbody2d.as_ref(),
            |body| body.linear_velocity,
        )
    }

    component_properties!(box_collider2d => box_collider2d (BoxCollider2D) {
        by_ref size: Vector2,
        by_ref offset: Vector2,
        by_value density: f32,
        by_value friction: f32,
        by_value restitution: f32,
        by_value threshold: f32,
        by_value mask: u16,
    });

    component_properties!(circle_collider2d => circle_collider2d (CircleCollider2D) {
        by_value radius: f32,
        by_ref offset: Vector2,
        by_value density: f32,
        by_value friction: f32,
        by_value restitution: f32,
        by_value threshold: f32,
        by_value mask: u16,
    });
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn token(host: &MemoryHost, kind: ComponentKind) -> TypeToken {
        host.component_token(kind)
    }

    #[test]
    fn test_reports_current_api_version() {
        let host = MemoryHost::new();
        assert_eq!(host.api_version(), BRIDGE_API_VERSION);

        let old = MemoryHost::new().with_api_version("NebulaBridge001");
        assert_eq!(old.api_version(), "NebulaBridge001");
    }

    #[test]
    fn test_resolve_type() {
        let host = MemoryHost::new();
        let camera = host.resolve_type(TypeKind::Component, "CameraComponent");
        assert_eq!(camera, Some(token(&host, ComponentKind::Camera)));
        assert_eq!(
            host.resolve_type(TypeKind::Asset, "Texture"),
            Some(host.asset_token(AssetType::Texture))
        );
        assert_eq!(host.resolve_type(TypeKind::Component, "Texture"), None);
        assert_eq!(host.resolve_type(TypeKind::Component, "AudioSource"), None);
    }

    #[test]
    fn test_new_entity_has_only_transform() {
        let host = MemoryHost::new();
        let e = host.create_entity("Player");

        assert!(host.is_entity_valid(e));
        assert_eq!(host.entity_name(e).unwrap(), "Player");
        for kind in ComponentKind::ALL {
            let expected = kind == ComponentKind::Transform;
            assert_eq!(host.has_component(e, token(&host, kind)).unwrap(), expected);
        }
        assert_eq!(host.transform_scale(e).unwrap(), Vector3::ONE);
    }

    #[test]
    fn test_add_component_keeps_existing_data() {
        let host = MemoryHost::new();
        let e = host.create_entity("Cam");
        let camera = token(&host, ComponentKind::Camera);

        assert!(host.add_component(e, camera).unwrap());
        host.set_camera_primary(e, false).unwrap();
        assert!(host.add_component(e, camera).unwrap());
        assert!(!host.camera_primary(e).unwrap());
    }

    #[test]
    fn test_missing_component() {
        let host = MemoryHost::new();
        let e = host.create_entity("Bare");
        assert_eq!(
            host.circle_renderer_radius(e),
            Err(HostError::MissingComponent {
                entity: e,
                component: "CircleRendererComponent"
            })
        );
    }

    #[test]
    fn test_unknown_token() {
        let host = MemoryHost::new();
        let e = host.create_entity("e");
        let bogus = TypeToken::from_raw(42);
        assert_eq!(
            host.add_component(e, bogus),
            Err(HostError::UnknownTypeToken(bogus))
        );
    }

    #[test]
    fn test_destroyed_entity_fails_safely() {
        let host = MemoryHost::new();
        let e = host.create_entity("Doomed");
        host.destroy_entity(e).unwrap();

        assert!(!host.is_entity_valid(e));
        assert_eq!(host.entity_name(e), Err(HostError::InvalidEntity(e)));
        assert_eq!(host.transform_translation(e), Err(HostError::InvalidEntity(e)));
        assert_eq!(host.destroy_entity(e), Err(HostError::InvalidEntity(e)));
        assert_eq!(
            host.has_component(e, token(&host, ComponentKind::Transform)),
            Err(HostError::InvalidEntity(e))
        );
    }

    #[test]
    fn test_sentinel_entity_is_invalid() {
        let host = MemoryHost::new();
        assert!(!host.is_entity_valid(EntityHandle::NONE));
        assert_eq!(
            host.entity_layer(EntityHandle::NONE),
            Err(HostError::InvalidEntity(EntityHandle::NONE))
        );
    }

    #[test]
    fn test_find_entity_by_name() {
        let host = MemoryHost::new();
        let a = host.create_entity("Enemy");
        host.create_entity("Enemy");

        assert_eq!(host.find_entity_by_name("Enemy"), a);
        assert!(host.find_entity_by_name("Nobody").is_none());
    }

    #[test]
    fn test_hierarchy_queries() {
        let host = MemoryHost::new();
        let root = host.create_entity("Root");
        let arm = host.create_entity("Arm");
        let leg = host.create_entity("Leg");
        host.set_parent(arm, Some(root)).unwrap();
        host.set_parent(leg, Some(root)).unwrap();

        assert_eq!(host.child_count(root).unwrap(), 2);
        assert_eq!(host.child(root, 0).unwrap(), arm);
        assert!(host.child(root, 5).unwrap().is_none());
        assert_eq!(host.find_child_by_name(root, "Leg").unwrap(), leg);
        assert!(host.find_child_by_name(root, "Tail").unwrap().is_none());
        assert_eq!(host.parent(arm).unwrap(), root);
        assert!(host.parent(root).unwrap().is_none());

        assert!(matches!(
            host.set_parent(root, Some(arm)),
            Err(HostError::NotSupported(_))
        ));
    }

    #[test]
    fn test_duplicate_is_deep_and_independent() {
        let host = MemoryHost::new();
        let original = host.create_entity("Box");
        let sprite = token(&host, ComponentKind::SpriteRenderer);
        host.add_component(original, sprite).unwrap();
        let red = Color::rgb(1.0, 0.0, 0.0);
        host.set_sprite_renderer_colour(original, &red).unwrap();

        let copy = host.duplicate_entity(original).unwrap();
        assert_ne!(copy, original);
        assert_eq!(host.sprite_renderer_colour(copy).unwrap(), red);

        host.set_sprite_renderer_colour(copy, &Color::BLACK).unwrap();
        assert_eq!(host.sprite_renderer_colour(original).unwrap(), red);
    }

    #[test]
    fn test_duplicate_does_not_copy_script_instance() {
        let host = MemoryHost::new();
        let e = host.create_entity("Scripted");
        let object: ScriptObject = Arc::new(7_u32);
        host.set_script_instance(e, Some(object)).unwrap();

        let copy = host.duplicate_entity(e).unwrap();
        assert!(host.script_instance(copy).unwrap().is_none());
        assert!(host.script_instance(e).unwrap().is_some());
    }

    #[test]
    fn test_destroy_drops_script_instance() {
        let host = MemoryHost::new();
        let e = host.create_entity("Scripted");
        let object: ScriptObject = Arc::new(String::from("state"));
        let weak = Arc::downgrade(&object);
        host.set_script_instance(e, Some(object)).unwrap();

        host.destroy_entity(e).unwrap();
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_world_transform_follows_parent() {
        let host = MemoryHost::new();
        let parent = host.create_entity("Parent");
        let child = host.create_entity("Child");
        host.set_parent(child, Some(parent)).unwrap();

        host.set_transform_translation(parent, &Vector3::new(5.0, 0.0, 0.0))
            .unwrap();
        host.set_transform_translation(child, &Vector3::new(1.0, 1.0, 0.0))
            .unwrap();

        assert_eq!(
            host.transform_world_translation(child).unwrap(),
            Vector3::new(6.0, 1.0, 0.0)
        );
        assert_eq!(
            host.transform_translation(child).unwrap(),
            Vector3::new(1.0, 1.0, 0.0)
        );
    }

    #[test]
    fn test_rigidbody_impulse_and_step() {
        let host = MemoryHost::new();
        let e = host.create_entity("Ball");
        host.add_component(e, token(&host, ComponentKind::Rigidbody2D))
            .unwrap();
        host.set_rigidbody2d_body_type(e, BodyType::Dynamic).unwrap();

        host.rigidbody2d_apply_linear_impulse_to_center(e, &Vector2::new(2.0, 0.0), true)
            .unwrap();
        assert_eq!(
            host.rigidbody2d_linear_velocity(e).unwrap(),
            Vector2::new(2.0, 0.0)
        );

        host.step(0.5);
        assert_eq!(host.delta_time(), 0.5);
        assert_eq!(
            host.transform_translation(e).unwrap(),
            Vector3::new(1.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_sleeping_body_respects_wake_flag() {
        let host = MemoryHost::new();
        let e = host.create_entity("Crate");
        host.add_component(e, token(&host, ComponentKind::Rigidbody2D))
            .unwrap();
        host.set_rigidbody2d_body_type(e, BodyType::Dynamic).unwrap();
        host.set_body_awake(e, false).unwrap();

        host.rigidbody2d_apply_force_to_center(e, &Vector2::new(1.0, 0.0), false)
            .unwrap();
        host.step(1.0);
        assert_eq!(host.rigidbody2d_linear_velocity(e).unwrap(), Vector2::ZERO);

        host.rigidbody2d_apply_force(e, &Vector2::new(1.0, 0.0), &Vector2::ZERO, true)
            .unwrap();
        host.step(1.0);
        assert_eq!(
            host.rigidbody2d_linear_velocity(e).unwrap(),
            Vector2::new(1.0, 0.0)
        );
    }

    #[test]
    fn test_collider_defaults_and_mask() {
        let host = MemoryHost::new();
        let e = host.create_entity("Wall");
        host.add_component(e, token(&host, ComponentKind::BoxCollider2D))
            .unwrap();

        assert_eq!(host.box_collider2d_mask(e).unwrap(), u16::MAX);
        host.set_box_collider2d_mask(e, 0b101).unwrap();
        assert_eq!(host.box_collider2d_mask(e).unwrap(), 0b101);
        host.set_box_collider2d_size(e, &Vector2::new(2.0, 3.0)).unwrap();
        assert_eq!(host.box_collider2d_size(e).unwrap(), Vector2::new(2.0, 3.0));
    }

    #[test]
    fn test_asset_interning() {
        let host = MemoryHost::new();
        let a = host.asset_get_or_create_handle("textures/crate.png").unwrap();
        let b = host.asset_get_or_create_handle("textures/crate.png").unwrap();
        assert_eq!(a, b);
        assert_eq!(host.asset_count(), 1);
        assert_eq!(host.asset_path_from_handle(a).unwrap(), "textures/crate.png");
        assert_eq!(host.asset_type(a).unwrap(), host.asset_token(AssetType::Texture));
        assert_eq!(host.asset_handle_from_path("textures/crate.png"), a);
        assert!(host.asset_handle_from_path("textures/other.png").is_none());
        assert_eq!(host.asset_count(), 1);
    }

    #[test]
    fn test_material_properties() {
        let host = MemoryHost::new();
        let material = host.asset_get_or_create_handle("floor.nmat").unwrap();
        let texture = host.asset_get_or_create_handle("floor.png").unwrap();
        let font = host.asset_get_or_create_handle("mono.ttf").unwrap();

        assert_eq!(host.material_tiling(material).unwrap(), 1.0);
        host.set_material_tiling(material, 4.0).unwrap();
        assert_eq!(host.material_tiling(material).unwrap(), 4.0);

        host.set_material_texture(material, texture).unwrap();
        assert_eq!(host.material_texture(material).unwrap(), texture);
        assert!(matches!(
            host.set_material_texture(material, font),
            Err(HostError::WrongAssetType { .. })
        ));
        host.set_material_texture(material, AssetHandle::NONE).unwrap();
        assert!(host.material_texture(material).unwrap().is_none());

        assert!(matches!(
            host.material_colour(texture),
            Err(HostError::WrongAssetType { .. })
        ));
    }

    #[test]
    fn test_font_variants() {
        let host = MemoryHost::new();
        let regular = host.asset_get_or_create_handle("fonts/sans.ttf").unwrap();
        let bold = host.asset_get_or_create_handle("fonts/sans-bold.ttf").unwrap();

        assert!(host.font_bold(regular).unwrap().is_none());
        host.set_font_variants(regular, bold, AssetHandle::NONE)
            .unwrap();
        assert_eq!(host.font_bold(regular).unwrap(), bold);
        assert!(host.font_italic(regular).unwrap().is_none());
    }

    #[test]
    fn test_prefab_instantiate() {
        let host = MemoryHost::new();
        let source = host.create_entity("Enemy");
        let gun = host.create_entity("Gun");
        host.set_parent(gun, Some(source)).unwrap();
        host.set_entity_layer(source, 4).unwrap();

        let prefab = host.define_prefab("enemy.prefab", source).unwrap();
        host.destroy_entity(source).unwrap();

        let spawned = host.prefab_instantiate(prefab).unwrap();
        assert!(host.is_entity_valid(spawned));
        assert_eq!(host.entity_name(spawned).unwrap(), "Enemy");
        assert_eq!(host.entity_layer(spawned).unwrap(), 4);
        assert_eq!(host.child_count(spawned).unwrap(), 1);

        let again = host.prefab_instantiate(prefab).unwrap();
        assert_ne!(again, spawned);
    }

    #[test]
    fn test_empty_prefab_spawns_nothing() {
        let host = MemoryHost::new();
        let prefab = host.asset_get_or_create_handle("empty.prefab").unwrap();
        assert!(host.prefab_instantiate(prefab).unwrap().is_none());
        assert_eq!(host.entity_count(), 0);
    }

    #[test]
    fn test_input_state() {
        let host = MemoryHost::new();
        assert!(!host.is_key_down(KeyCode::SPACE));
        host.set_key_down(KeyCode::SPACE, true);
        assert!(host.is_key_down(KeyCode::SPACE));
        host.set_key_down(KeyCode::SPACE, false);
        assert!(!host.is_key_down(KeyCode::SPACE));

        host.set_mouse_button_down(MouseCode::LEFT, true);
        assert!(host.is_mouse_button_down(MouseCode::LEFT));
        assert!(!host.is_mouse_button_down(MouseCode::RIGHT));

        host.set_mouse_position(Vector2::new(3.0, 4.0));
        assert_eq!(host.mouse_position(), Vector2::new(3.0, 4.0));
    }

    #[test]
    fn test_hovered_entity_clears_when_destroyed() {
        let host = MemoryHost::new();
        let e = host.create_entity("Hover");
        host.set_hovered_entity(e);
        assert_eq!(host.hovered_entity(), e);

        host.destroy_entity(e).unwrap();
        assert!(host.hovered_entity().is_none());
    }

    #[test]
    fn test_log_records_lines() {
        let host = MemoryHost::new();
        host.log(LogLevel::Warn, "low health");
        host.log(LogLevel::Info, "spawned");

        let logs = host.take_logs();
        assert_eq!(
            logs,
            vec![
                (LogLevel::Warn, "low health".to_owned()),
                (LogLevel::Info, "spawned".to_owned()),
            ]
        );
        assert!(host.take_logs().is_empty());
    }
}
