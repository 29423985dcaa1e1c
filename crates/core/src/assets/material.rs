use std::marker::PhantomData;

use nebula_macros::AssetKind;
use nebula_sdk::{AssetHandle, Color};

use super::{Asset, AssetKind, Texture};
use crate::error::BridgeResult;

/// Surface description shared by every renderer using it
///
/// Mutating a material affects every entity that references it.
#[derive(AssetKind, Clone, Debug, PartialEq, Eq, Hash)]
#[asset(name = "Material")]
pub struct Material {
    asset: Asset,

    #[asset(call = "material_colour", by_ref)]
    colour: PhantomData<Color>,

    #[asset(call = "material_tiling")]
    tiling: PhantomData<f32>,
}

impl Material {
    /// Texture sampled by this material, if any
    pub fn texture(&self) -> BridgeResult<Option<Texture>> {
        let handle = self.asset.invoke("texture", |host, a| host.material_texture(a))?;
        Texture::from_handle(self.asset.bridge(), handle)
    }

    pub fn set_texture(&self, texture: Option<&Texture>) -> BridgeResult<()> {
        let handle = texture.map(|t| t.handle()).unwrap_or(AssetHandle::NONE);
        self.asset
            .invoke("set_texture", |host, a| host.set_material_texture(a, handle))
    }
}
