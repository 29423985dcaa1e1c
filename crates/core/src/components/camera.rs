use std::marker::PhantomData;

use nebula_macros::Component;

use crate::entities::Entity;

#[derive(Component, Clone, Debug, PartialEq, Eq, Hash)]
#[component(name = "CameraComponent")]
pub struct CameraComponent {
    entity: Entity,

    /// Whether this camera renders the main view
    #[component(call = "camera_primary")]
    primary: PhantomData<bool>,

    #[component(call = "camera_fixed_aspect_ratio")]
    fixed_aspect_ratio: PhantomData<bool>,
}
