//! Asset proxies
//!
//! Assets are referenced by source path. Loading a path interns it on the
//! native side, so repeated loads of one path anywhere in the program
//! collapse to one record and one handle.
//!
//! # Example
//!
//! ```ignore
//! use nebula_core::assets::{AssetKind, Texture};
//!
//! let a = Texture::load(&bridge, "textures/ship.png")?;
//! let b = Texture::load(&bridge, "textures/ship.png")?;
//! assert_eq!(a, b);
//! assert_eq!(a.path()?, "textures/ship.png");
//! ```
//!
//! Handles are only stable within one run; persist paths, not handles.

mod asset;
mod font;
mod material;
mod prefab;
mod texture;

pub use asset::Asset;
pub use font::Font;
pub use material::Material;
pub use prefab::Prefab;
pub use texture::Texture;

use nebula_engine::HostError;
use nebula_sdk::AssetHandle;

use crate::bridge::Bridge;
use crate::error::BridgeResult;
use crate::registry::Category;

/// An asset category whose proxies forward to an asset handle
///
/// Implemented by `#[derive(AssetKind)]`.
pub trait AssetKind: Category + Clone {
    /// Build a typed proxy for an asset already checked to be of this kind
    #[doc(hidden)]
    fn bind(asset: Asset) -> Self;

    /// The untyped asset
    fn asset(&self) -> &Asset;

    /// Intern `path` and check the asset is of this kind
    fn load(bridge: &Bridge, path: &str) -> BridgeResult<Self> {
        let asset = Asset::load(bridge, path)?;
        let handle = asset.handle();
        asset.cast::<Self>()?.ok_or_else(|| {
            HostError::WrongAssetType {
                asset: handle,
                expected: Self::NAME,
            }
            .into()
        })
    }

    /// Wrap a handle, checking its kind
    ///
    /// `Ok(None)` for the sentinel or an asset of another kind.
    fn from_handle(bridge: &Bridge, handle: AssetHandle) -> BridgeResult<Option<Self>> {
        match Asset::from_handle(bridge, handle) {
            Some(asset) => asset.cast::<Self>(),
            None => Ok(None),
        }
    }

    #[inline]
    fn handle(&self) -> AssetHandle {
        self.asset().handle()
    }

    /// The path this asset was interned under
    fn path(&self) -> BridgeResult<String> {
        self.asset().path()
    }
}
