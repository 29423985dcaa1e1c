use nebula_macros::AssetKind;

use super::Asset;

/// Image asset
#[derive(AssetKind, Clone, Debug, PartialEq, Eq, Hash)]
#[asset(name = "Texture")]
pub struct Texture {
    asset: Asset,
}
