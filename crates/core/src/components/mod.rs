//! Component proxies
//!
//! A component has no handle of its own: it exists relative to an
//! (entity, category token) pair. A component proxy is that pair as a
//! value. It is only ever built by [`Entity::get_component`] after an
//! existence check, or by [`Entity::add_component`].
//!
//! # Defining a component
//!
//! ```ignore
//! use std::marker::PhantomData;
//! use nebula_core::{Component, Entity};
//!
//! #[derive(Component)]
//! #[component(name = "CircleRendererComponent")]
//! pub struct CircleRendererComponent {
//!     entity: Entity,
//!
//!     #[component(call = "circle_renderer_radius")]
//!     radius: PhantomData<f32>,
//! }
//! ```
//!
//! [`Entity::get_component`]: crate::Entity::get_component
//! [`Entity::add_component`]: crate::Entity::add_component

mod camera;
mod physics;
mod renderer;
mod script;
mod transform;

pub use camera::CameraComponent;
pub use physics::{
    BoxCollider2DComponent, CircleCollider2DComponent, LayerMask, Rigidbody2DComponent,
};
pub use renderer::{CircleRendererComponent, SpriteRendererComponent, StringRendererComponent};
pub use script::ScriptComponent;
pub use transform::TransformComponent;

use crate::entities::Entity;
use crate::registry::Category;

/// A component category whose proxies forward to an owning entity
///
/// Implemented by `#[derive(Component)]`.
pub trait Component: Category {
    /// Build a proxy for a component the entity is known to have
    #[doc(hidden)]
    fn bind(entity: Entity) -> Self;

    /// The owning entity
    fn entity(&self) -> &Entity;
}
