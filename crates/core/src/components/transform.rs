use std::marker::PhantomData;

use nebula_macros::Component;
use nebula_sdk::Vector3;

use crate::entities::Entity;

/// Position, rotation (Euler radians) and scale
///
/// Every entity carries one. The world-space getters compose the
/// transforms of all ancestors.
#[derive(Component, Clone, Debug, PartialEq, Eq, Hash)]
#[component(name = "TransformComponent")]
pub struct TransformComponent {
    entity: Entity,

    #[component(call = "transform_translation", by_ref)]
    translation: PhantomData<Vector3>,

    #[component(call = "transform_rotation", by_ref)]
    rotation: PhantomData<Vector3>,

    #[component(call = "transform_scale", by_ref)]
    scale: PhantomData<Vector3>,

    #[component(call = "transform_world_translation", readonly)]
    world_translation: PhantomData<Vector3>,

    #[component(call = "transform_world_rotation", readonly)]
    world_rotation: PhantomData<Vector3>,

    #[component(call = "transform_world_scale", readonly)]
    world_scale: PhantomData<Vector3>,
}
