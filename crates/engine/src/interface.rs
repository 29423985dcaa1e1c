//! The native host contract
//!
//! [`NativeHost`] is the complete, fixed catalogue of boundary calls. The
//! managed side observes and mutates engine state only through this trait:
//! it never holds a pointer into native storage, only the handles the host
//! hands out.
//!
//! # Conventions
//!
//! - Every call is synchronous and is applied before it returns.
//! - Getters return payloads by value; setters take vector and colour
//!   payloads by reference.
//! - Component calls fail with [`HostError::InvalidEntity`] for sentinel or
//!   destroyed handles and with [`HostError::MissingComponent`] when the
//!   entity lacks the component.
//! - Lookups that may find nothing return the sentinel handle rather than
//!   an error.
//!
//! [`HostError::InvalidEntity`]: crate::HostError::InvalidEntity
//! [`HostError::MissingComponent`]: crate::HostError::MissingComponent

use std::any::Any;
use std::sync::Arc;

use nebula_sdk::{
    AssetHandle, BodyType, Color, EntityHandle, KeyCode, LogLevel, MouseCode, TypeKind,
    TypeToken, Vector2, Vector3,
};

use crate::error::HostResult;

/// Opaque managed script instance stored on the native side
///
/// The host stores and returns it unchanged; only the managed side knows
/// its concrete type.
pub type ScriptObject = Arc<dyn Any + Send + Sync>;

/// Boundary call catalogue implemented by a native engine
pub trait NativeHost: Send + Sync {
    // ------------------------------------------------------------------
    // Core
    // ------------------------------------------------------------------

    /// Call catalogue revision this host implements
    fn api_version(&self) -> &str;

    /// Write a script log line
    fn log(&self, level: LogLevel, message: &str);

    /// Mint or look up the token for a component or asset category
    ///
    /// Returns `None` when the host has no such category.
    fn resolve_type(&self, kind: TypeKind, name: &str) -> Option<TypeToken>;

    /// Whether the handle refers to a live entity
    fn is_entity_valid(&self, entity: EntityHandle) -> bool;

    // ------------------------------------------------------------------
    // Application / Time / Input
    // ------------------------------------------------------------------

    fn window_size(&self) -> Vector2;

    /// Entity under the cursor in the viewport, or the sentinel
    fn hovered_entity(&self) -> EntityHandle;

    /// Seconds elapsed during the current frame
    fn delta_time(&self) -> f32;

    fn is_key_down(&self, key: KeyCode) -> bool;

    fn is_mouse_button_down(&self, button: MouseCode) -> bool;

    fn mouse_position(&self) -> Vector2;

    // ------------------------------------------------------------------
    // Asset
    // ------------------------------------------------------------------

    /// Intern `path`, creating the asset record on first use
    ///
    /// Calling this repeatedly with the same path must return the same
    /// handle and must not create duplicate records.
    fn asset_get_or_create_handle(&self, path: &str) -> HostResult<AssetHandle>;

    /// Look up an already interned path, or the sentinel
    fn asset_handle_from_path(&self, path: &str) -> AssetHandle;

    /// Path an asset was interned under, exactly as supplied
    fn asset_path_from_handle(&self, asset: AssetHandle) -> HostResult<String>;

    /// Category token of an asset
    fn asset_type(&self, asset: AssetHandle) -> HostResult<TypeToken>;

    // ------------------------------------------------------------------
    // Font / Material / Prefab
    // ------------------------------------------------------------------

    /// Bold variant of a font, or the sentinel if it has none
    fn font_bold(&self, font: AssetHandle) -> HostResult<AssetHandle>;

    /// Italic variant of a font, or the sentinel if it has none
    fn font_italic(&self, font: AssetHandle) -> HostResult<AssetHandle>;

    fn material_colour(&self, material: AssetHandle) -> HostResult<Color>;
    fn set_material_colour(&self, material: AssetHandle, colour: &Color) -> HostResult<()>;
    fn material_texture(&self, material: AssetHandle) -> HostResult<AssetHandle>;
    fn set_material_texture(&self, material: AssetHandle, texture: AssetHandle)
        -> HostResult<()>;
    fn material_tiling(&self, material: AssetHandle) -> HostResult<f32>;
    fn set_material_tiling(&self, material: AssetHandle, tiling: f32) -> HostResult<()>;

    /// Spawn the entity tree stored in a prefab asset
    fn prefab_instantiate(&self, prefab: AssetHandle) -> HostResult<EntityHandle>;

    // ------------------------------------------------------------------
    // Scene
    // ------------------------------------------------------------------

    /// First live entity with this name, or the sentinel
    fn find_entity_by_name(&self, name: &str) -> EntityHandle;

    /// Create an entity carrying only a transform
    fn create_entity(&self, name: &str) -> EntityHandle;

    /// Deep-copy an entity's component data into a fresh entity
    fn duplicate_entity(&self, entity: EntityHandle) -> HostResult<EntityHandle>;

    /// Destroy an entity; every later call with its handle fails
    fn destroy_entity(&self, entity: EntityHandle) -> HostResult<()>;

    // ------------------------------------------------------------------
    // Entity
    // ------------------------------------------------------------------

    fn has_component(&self, entity: EntityHandle, component: TypeToken) -> HostResult<bool>;

    /// Attach a default component; a no-op returning `true` if present
    fn add_component(&self, entity: EntityHandle, component: TypeToken) -> HostResult<bool>;

    fn entity_name(&self, entity: EntityHandle) -> HostResult<String>;
    fn set_entity_name(&self, entity: EntityHandle, name: &str) -> HostResult<()>;
    fn entity_layer(&self, entity: EntityHandle) -> HostResult<u16>;
    fn set_entity_layer(&self, entity: EntityHandle, layer: u16) -> HostResult<()>;

    /// Script object attached to the entity, if any
    fn script_instance(&self, entity: EntityHandle) -> HostResult<Option<ScriptObject>>;

    /// Attach (or with `None`, detach) the entity's script object
    fn set_script_instance(
        &self,
        entity: EntityHandle,
        instance: Option<ScriptObject>,
    ) -> HostResult<()>;

    /// Direct child with this name, or the sentinel
    fn find_child_by_name(&self, entity: EntityHandle, name: &str) -> HostResult<EntityHandle>;

    /// Child at `index`, or the sentinel when out of range
    fn child(&self, entity: EntityHandle, index: usize) -> HostResult<EntityHandle>;

    fn child_count(&self, entity: EntityHandle) -> HostResult<usize>;

    /// Parent entity, or the sentinel for roots
    fn parent(&self, entity: EntityHandle) -> HostResult<EntityHandle>;

    // ------------------------------------------------------------------
    // TransformComponent
    // ------------------------------------------------------------------

    fn transform_translation(&self, entity: EntityHandle) -> HostResult<Vector3>;
    fn set_transform_translation(&self, entity: EntityHandle, value: &Vector3) -> HostResult<()>;
    fn transform_rotation(&self, entity: EntityHandle) -> HostResult<Vector3>;
    fn set_transform_rotation(&self, entity: EntityHandle, value: &Vector3) -> HostResult<()>;
    fn transform_scale(&self, entity: EntityHandle) -> HostResult<Vector3>;
    fn set_transform_scale(&self, entity: EntityHandle, value: &Vector3) -> HostResult<()>;
    fn transform_world_translation(&self, entity: EntityHandle) -> HostResult<Vector3>;
    fn transform_world_rotation(&self, entity: EntityHandle) -> HostResult<Vector3>;
    fn transform_world_scale(&self, entity: EntityHandle) -> HostResult<Vector3>;

    // ------------------------------------------------------------------
    // CameraComponent
    // ------------------------------------------------------------------

    fn camera_primary(&self, entity: EntityHandle) -> HostResult<bool>;
    fn set_camera_primary(&self, entity: EntityHandle, value: bool) -> HostResult<()>;
    fn camera_fixed_aspect_ratio(&self, entity: EntityHandle) -> HostResult<bool>;
    fn set_camera_fixed_aspect_ratio(&self, entity: EntityHandle, value: bool) -> HostResult<()>;

    // ------------------------------------------------------------------
    // ScriptComponent
    // ------------------------------------------------------------------

    fn script_class_name(&self, entity: EntityHandle) -> HostResult<String>;
    fn set_script_class_name(&self, entity: EntityHandle, value: &str) -> HostResult<()>;

    // ------------------------------------------------------------------
    // SpriteRendererComponent
    // ------------------------------------------------------------------

    fn sprite_renderer_colour(&self, entity: EntityHandle) -> HostResult<Color>;
    fn set_sprite_renderer_colour(&self, entity: EntityHandle, value: &Color) -> HostResult<()>;
    fn sprite_renderer_offset(&self, entity: EntityHandle) -> HostResult<Vector2>;
    fn set_sprite_renderer_offset(&self, entity: EntityHandle, value: &Vector2)
        -> HostResult<()>;
    fn sprite_renderer_cell_size(&self, entity: EntityHandle) -> HostResult<Vector2>;
    fn set_sprite_renderer_cell_size(
        &self,
        entity: EntityHandle,
        value: &Vector2,
    ) -> HostResult<()>;
    fn sprite_renderer_cell_number(&self, entity: EntityHandle) -> HostResult<Vector2>;
    fn set_sprite_renderer_cell_number(
        &self,
        entity: EntityHandle,
        value: &Vector2,
    ) -> HostResult<()>;
    fn sprite_renderer_tiling(&self, entity: EntityHandle) -> HostResult<f32>;
    fn set_sprite_renderer_tiling(&self, entity: EntityHandle, value: f32) -> HostResult<()>;

    // ------------------------------------------------------------------
    // CircleRendererComponent
    // ------------------------------------------------------------------

    fn circle_renderer_colour(&self, entity: EntityHandle) -> HostResult<Color>;
    fn set_circle_renderer_colour(&self, entity: EntityHandle, value: &Color) -> HostResult<()>;
    fn circle_renderer_radius(&self, entity: EntityHandle) -> HostResult<f32>;
    fn set_circle_renderer_radius(&self, entity: EntityHandle, value: f32) -> HostResult<()>;
    fn circle_renderer_thickness(&self, entity: EntityHandle) -> HostResult<f32>;
    fn set_circle_renderer_thickness(&self, entity: EntityHandle, value: f32) -> HostResult<()>;
    fn circle_renderer_fade(&self, entity: EntityHandle) -> HostResult<f32>;
    fn set_circle_renderer_fade(&self, entity: EntityHandle, value: f32) -> HostResult<()>;

    // ------------------------------------------------------------------
    // StringRendererComponent
    // ------------------------------------------------------------------

    fn string_renderer_text(&self, entity: EntityHandle) -> HostResult<String>;
    fn set_string_renderer_text(&self, entity: EntityHandle, value: &str) -> HostResult<()>;
    fn string_renderer_colour(&self, entity: EntityHandle) -> HostResult<Color>;
    fn set_string_renderer_colour(&self, entity: EntityHandle, value: &Color) -> HostResult<()>;
    fn string_renderer_font(&self, entity: EntityHandle) -> HostResult<AssetHandle>;
    fn set_string_renderer_font(&self, entity: EntityHandle, value: AssetHandle)
        -> HostResult<()>;
    fn string_renderer_bold(&self, entity: EntityHandle) -> HostResult<bool>;
    fn set_string_renderer_bold(&self, entity: EntityHandle, value: bool) -> HostResult<()>;
    fn string_renderer_italic(&self, entity: EntityHandle) -> HostResult<bool>;
    fn set_string_renderer_italic(&self, entity: EntityHandle, value: bool) -> HostResult<()>;
    fn string_renderer_kerning(&self, entity: EntityHandle) -> HostResult<f32>;
    fn set_string_renderer_kerning(&self, entity: EntityHandle, value: f32) -> HostResult<()>;
    fn string_renderer_line_spacing(&self, entity: EntityHandle) -> HostResult<f32>;
    fn set_string_renderer_line_spacing(&self, entity: EntityHandle, value: f32)
        -> HostResult<()>;

    // ------------------------------------------------------------------
    // Rigidbody2DComponent
    // ------------------------------------------------------------------

    fn rigidbody2d_body_type(&self, entity: EntityHandle) -> HostResult<BodyType>;
    fn set_rigidbody2d_body_type(&self, entity: EntityHandle, value: BodyType)
        -> HostResult<()>;
    fn rigidbody2d_fixed_rotation(&self, entity: EntityHandle) -> HostResult<bool>;
    fn set_rigidbody2d_fixed_rotation(&self, entity: EntityHandle, value: bool)
        -> HostResult<()>;
    fn rigidbody2d_apply_linear_impulse(
        &self,
        entity: EntityHandle,
        impulse: &Vector2,
        point: &Vector2,
        wake: bool,
    ) -> HostResult<()>;
    fn rigidbody2d_apply_linear_impulse_to_center(
        &self,
        entity: EntityHandle,
        impulse: &Vector2,
        wake: bool,
    ) -> HostResult<()>;
    fn rigidbody2d_apply_force(
        &self,
        entity: EntityHandle,
        force: &Vector2,
        point: &Vector2,
        wake: bool,
    ) -> HostResult<()>;
    fn rigidbody2d_apply_force_to_center(
        &self,
        entity: EntityHandle,
        force: &Vector2,
        wake: bool,
    ) -> HostResult<()>;
    fn rigidbody2d_linear_velocity(&self, entity: EntityHandle) -> HostResult<Vector2>;

    // ------------------------------------------------------------------
    // BoxCollider2DComponent
    // ------------------------------------------------------------------

    fn box_collider2d_size(&self, entity: EntityHandle) -> HostResult<Vector2>;
    fn set_box_collider2d_size(&self, entity: EntityHandle, value: &Vector2) -> HostResult<()>;
    fn box_collider2d_offset(&self, entity: EntityHandle) -> HostResult<Vector2>;
    fn set_box_collider2d_offset(&self, entity: EntityHandle, value: &Vector2)
        -> HostResult<()>;
    fn box_collider2d_density(&self, entity: EntityHandle) -> HostResult<f32>;
    fn set_box_collider2d_density(&self, entity: EntityHandle, value: f32) -> HostResult<()>;
    fn box_collider2d_friction(&self, entity: EntityHandle) -> HostResult<f32>;
    fn set_box_collider2d_friction(&self, entity: EntityHandle, value: f32) -> HostResult<()>;
    fn box_collider2d_restitution(&self, entity: EntityHandle) -> HostResult<f32>;
    fn set_box_collider2d_restitution(&self, entity: EntityHandle, value: f32)
        -> HostResult<()>;
    fn box_collider2d_threshold(&self, entity: EntityHandle) -> HostResult<f32>;
    fn set_box_collider2d_threshold(&self, entity: EntityHandle, value: f32) -> HostResult<()>;
    fn box_collider2d_mask(&self, entity: EntityHandle) -> HostResult<u16>;
    fn set_box_collider2d_mask(&self, entity: EntityHandle, value: u16) -> HostResult<()>;

    // ------------------------------------------------------------------
    // CircleCollider2DComponent
    // ------------------------------------------------------------------

    fn circle_collider2d_radius(&self, entity: EntityHandle) -> HostResult<f32>;
    fn set_circle_collider2d_radius(&self, entity: EntityHandle, value: f32) -> HostResult<()>;
    fn circle_collider2d_offset(&self, entity: EntityHandle) -> HostResult<Vector2>;
    fn set_circle_collider2d_offset(&self, entity: EntityHandle, value: &Vector2)
        -> HostResult<()>;
    fn circle_collider2d_density(&self, entity: EntityHandle) -> HostResult<f32>;
    fn set_circle_collider2d_density(&self, entity: EntityHandle, value: f32) -> HostResult<()>;
    fn circle_collider2d_friction(&self, entity: EntityHandle) -> HostResult<f32>;
    fn set_circle_collider2d_friction(&self, entity: EntityHandle, value: f32)
        -> HostResult<()>;
    fn circle_collider2d_restitution(&self, entity: EntityHandle) -> HostResult<f32>;
    fn set_circle_collider2d_restitution(&self, entity: EntityHandle, value: f32)
        -> HostResult<()>;
    fn circle_collider2d_threshold(&self, entity: EntityHandle) -> HostResult<f32>;
    fn set_circle_collider2d_threshold(&self, entity: EntityHandle, value: f32)
        -> HostResult<()>;
    fn circle_collider2d_mask(&self, entity: EntityHandle) -> HostResult<u16>;
    fn set_circle_collider2d_mask(&self, entity: EntityHandle, value: u16) -> HostResult<()>;
}
