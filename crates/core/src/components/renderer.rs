//! 2D renderable components

use std::marker::PhantomData;

use nebula_macros::Component;
use nebula_sdk::{AssetHandle, Color, Vector2};

use crate::assets::{AssetKind, Font};
use crate::entities::Entity;
use crate::error::BridgeResult;

/// Textured quad, optionally cut from a sprite sheet
#[derive(Component, Clone, Debug, PartialEq, Eq, Hash)]
#[component(name = "SpriteRendererComponent")]
pub struct SpriteRendererComponent {
    entity: Entity,

    #[component(call = "sprite_renderer_colour", by_ref)]
    colour: PhantomData<Color>,

    /// Sheet offset of the cell, in cells
    #[component(call = "sprite_renderer_offset", by_ref)]
    offset: PhantomData<Vector2>,

    /// Size of one sheet cell, in pixels
    #[component(call = "sprite_renderer_cell_size", by_ref)]
    cell_size: PhantomData<Vector2>,

    /// Number of cells the sprite spans
    #[component(call = "sprite_renderer_cell_number", by_ref)]
    cell_number: PhantomData<Vector2>,

    #[component(call = "sprite_renderer_tiling")]
    tiling: PhantomData<f32>,
}

#[derive(Component, Clone, Debug, PartialEq, Eq, Hash)]
#[component(name = "CircleRendererComponent")]
pub struct CircleRendererComponent {
    entity: Entity,

    #[component(call = "circle_renderer_colour", by_ref)]
    colour: PhantomData<Color>,

    #[component(call = "circle_renderer_radius")]
    radius: PhantomData<f32>,

    /// 1.0 is a filled disc, smaller values draw a ring
    #[component(call = "circle_renderer_thickness")]
    thickness: PhantomData<f32>,

    #[component(call = "circle_renderer_fade")]
    fade: PhantomData<f32>,
}

/// Text drawn with a font asset
#[derive(Component, Clone, Debug, PartialEq, Eq, Hash)]
#[component(name = "StringRendererComponent")]
pub struct StringRendererComponent {
    entity: Entity,

    #[component(call = "string_renderer_colour", by_ref)]
    colour: PhantomData<Color>,

    #[component(call = "string_renderer_bold")]
    bold: PhantomData<bool>,

    #[component(call = "string_renderer_italic")]
    italic: PhantomData<bool>,

    #[component(call = "string_renderer_kerning")]
    kerning: PhantomData<f32>,

    #[component(call = "string_renderer_line_spacing")]
    line_spacing: PhantomData<f32>,
}

impl StringRendererComponent {
    pub fn text(&self) -> BridgeResult<String> {
        self.entity.invoke("text", |host, e| host.string_renderer_text(e))
    }

    pub fn set_text(&self, text: &str) -> BridgeResult<()> {
        self.entity
            .invoke("set_text", |host, e| host.set_string_renderer_text(e, text))
    }

    /// Font asset, or `None` if unset
    pub fn font(&self) -> BridgeResult<Option<Font>> {
        let handle = self.entity.invoke("font", |host, e| host.string_renderer_font(e))?;
        Font::from_handle(self.entity.bridge(), handle)
    }

    pub fn set_font(&self, font: Option<&Font>) -> BridgeResult<()> {
        let handle = font.map(|f| f.handle()).unwrap_or(AssetHandle::NONE);
        self.entity
            .invoke("set_font", |host, e| host.set_string_renderer_font(e, handle))
    }
}
