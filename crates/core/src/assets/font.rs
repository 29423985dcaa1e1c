use nebula_macros::AssetKind;

use super::{Asset, AssetKind};
use crate::error::BridgeResult;

/// Font face asset
#[derive(AssetKind, Clone, Debug, PartialEq, Eq, Hash)]
#[asset(name = "Font")]
pub struct Font {
    asset: Asset,
}

impl Font {
    /// Bold variant, if the font family has one
    pub fn bold(&self) -> BridgeResult<Option<Font>> {
        let handle = self.asset.invoke("bold", |host, a| host.font_bold(a))?;
        Font::from_handle(self.asset.bridge(), handle)
    }

    /// Italic variant, if the font family has one
    pub fn italic(&self) -> BridgeResult<Option<Font>> {
        let handle = self.asset.invoke("italic", |host, a| host.font_italic(a))?;
        Font::from_handle(self.asset.bridge(), handle)
    }
}
