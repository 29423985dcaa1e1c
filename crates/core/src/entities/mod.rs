//! Entity proxies and scene operations
//!
//! # Example
//!
//! ```ignore
//! use nebula_core::{Bridge, components::SpriteRendererComponent};
//! use nebula_core::sdk::{Color, Vector3};
//!
//! let bullet = bridge.scene().create_entity("Bullet")?;
//! bullet.set_translation(Vector3::new(0.0, 1.0, 0.0))?;
//!
//! let sprite = bullet.add_component::<SpriteRendererComponent>()?;
//! sprite.set_colour(Color::rgb(1.0, 0.2, 0.2))?;
//!
//! // Components are gated behind an existence check
//! if let Some(sprite) = bullet.get_component::<SpriteRendererComponent>()? {
//!     println!("tiling: {}", sprite.tiling()?);
//! }
//! ```
//!
//! # Handles
//!
//! Proxies hold a handle, never native state. Dropping a proxy has no
//! effect on the native entity; only [`Entity::destroy`] ends its life.

mod entity;
mod scene;

pub use entity::Entity;
pub use scene::Scene;
