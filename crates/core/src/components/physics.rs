//! 2D physics body and colliders

use std::marker::PhantomData;

use bitflags::bitflags;

use nebula_macros::Component;
use nebula_sdk::{BodyType, Vector2};

use crate::entities::Entity;
use crate::error::BridgeResult;

bitflags! {
    /// Collision layers a collider interacts with
    ///
    /// The host stores the raw 16 bits; values outside the named layers
    /// round-trip unchanged.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LayerMask: u16 {
        const DEFAULT = 1 << 0;
        const PLAYER = 1 << 1;
        const ENEMY = 1 << 2;
        const PROJECTILE = 1 << 3;
        const ENVIRONMENT = 1 << 4;
        const TRIGGER = 1 << 5;
        const ALL = u16::MAX;
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        LayerMask::ALL
    }
}

#[derive(Component, Clone, Debug, PartialEq, Eq, Hash)]
#[component(name = "Rigidbody2DComponent")]
pub struct Rigidbody2DComponent {
    entity: Entity,

    #[component(call = "rigidbody2d_body_type")]
    body_type: PhantomData<BodyType>,

    #[component(call = "rigidbody2d_fixed_rotation")]
    fixed_rotation: PhantomData<bool>,

    #[component(call = "rigidbody2d_linear_velocity", readonly)]
    linear_velocity: PhantomData<Vector2>,
}

impl Rigidbody2DComponent {
    /// Apply an impulse at a world point
    pub fn apply_linear_impulse(
        &self,
        impulse: Vector2,
        point: Vector2,
        wake: bool,
    ) -> BridgeResult<()> {
        self.entity.invoke("apply_linear_impulse", |host, e| {
            host.rigidbody2d_apply_linear_impulse(e, &impulse, &point, wake)
        })
    }

    /// Apply an impulse at the centre of mass
    pub fn apply_linear_impulse_to_center(&self, impulse: Vector2, wake: bool) -> BridgeResult<()> {
        self.entity.invoke("apply_linear_impulse_to_center", |host, e| {
            host.rigidbody2d_apply_linear_impulse_to_center(e, &impulse, wake)
        })
    }

    /// Apply a force at a world point
    pub fn apply_force(&self, force: Vector2, point: Vector2, wake: bool) -> BridgeResult<()> {
        self.entity.invoke("apply_force", |host, e| {
            host.rigidbody2d_apply_force(e, &force, &point, wake)
        })
    }

    /// Apply a force at the centre of mass
    pub fn apply_force_to_center(&self, force: Vector2, wake: bool) -> BridgeResult<()> {
        self.entity.invoke("apply_force_to_center", |host, e| {
            host.rigidbody2d_apply_force_to_center(e, &force, wake)
        })
    }
}

#[derive(Component, Clone, Debug, PartialEq, Eq, Hash)]
#[component(name = "BoxCollider2DComponent")]
pub struct BoxCollider2DComponent {
    entity: Entity,

    /// Half extents
    #[component(call = "box_collider2d_size", by_ref)]
    size: PhantomData<Vector2>,

    #[component(call = "box_collider2d_offset", by_ref)]
    offset: PhantomData<Vector2>,

    #[component(call = "box_collider2d_density")]
    density: PhantomData<f32>,

    #[component(call = "box_collider2d_friction")]
    friction: PhantomData<f32>,

    #[component(call = "box_collider2d_restitution")]
    restitution: PhantomData<f32>,

    /// Restitution velocity threshold
    #[component(call = "box_collider2d_threshold")]
    threshold: PhantomData<f32>,
}

impl BoxCollider2DComponent {
    pub fn mask(&self) -> BridgeResult<LayerMask> {
        self.entity
            .invoke("mask", |host, e| host.box_collider2d_mask(e))
            .map(LayerMask::from_bits_retain)
    }

    pub fn set_mask(&self, mask: LayerMask) -> BridgeResult<()> {
        self.entity
            .invoke("set_mask", |host, e| host.set_box_collider2d_mask(e, mask.bits()))
    }
}

#[derive(Component, Clone, Debug, PartialEq, Eq, Hash)]
#[component(name = "CircleCollider2DComponent")]
pub struct CircleCollider2DComponent {
    entity: Entity,

    #[component(call = "circle_collider2d_radius")]
    radius: PhantomData<f32>,

    #[component(call = "circle_collider2d_offset", by_ref)]
    offset: PhantomData<Vector2>,

    #[component(call = "circle_collider2d_density")]
    density: PhantomData<f32>,

    #[component(call = "circle_collider2d_friction")]
    friction: PhantomData<f32>,

    #[component(call = "circle_collider2d_restitution")]
    restitution: PhantomData<f32>,

    #[component(call = "circle_collider2d_threshold")]
    threshold: PhantomData<f32>,
}

impl CircleCollider2DComponent {
    pub fn mask(&self) -> BridgeResult<LayerMask> {
        self.entity
            .invoke("mask", |host, e| host.circle_collider2d_mask(e))
            .map(LayerMask::from_bits_retain)
    }

    pub fn set_mask(&self, mask: LayerMask) -> BridgeResult<()> {
        self.entity.invoke("set_mask", |host, e| {
            host.set_circle_collider2d_mask(e, mask.bits())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_mask_keeps_unknown_bits() {
        let mask = LayerMask::from_bits_retain(0b1000_0000_0000_0011);
        assert!(mask.contains(LayerMask::DEFAULT | LayerMask::PLAYER));
        assert_eq!(mask.bits(), 0b1000_0000_0000_0011);
    }

    #[test]
    fn test_layer_mask_default_is_all() {
        assert_eq!(LayerMask::default().bits(), u16::MAX);
    }
}
