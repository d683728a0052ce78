//! Macroquad resource decoders
//!
//! Both need a live GL context, so they only run inside the app.

use super::Decode;
use crate::archive::ChunkKind;
use macroquad::prelude::*;

impl Decode for Texture2D {
    const KIND: ChunkKind = ChunkKind::Texture;

    fn decode(_name: &str, bytes: &[u8]) -> Result<Self, String> {
        let img = ::image::load_from_memory(bytes)
            .map_err(|e| format!("Failed to decode image: {}", e))?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();

        let width = u16::try_from(width).map_err(|_| format!("image too wide ({} px)", width))?;
        let height =
            u16::try_from(height).map_err(|_| format!("image too tall ({} px)", height))?;

        let texture = Texture2D::from_rgba8(width, height, rgba.as_raw());
        texture.set_filter(FilterMode::Nearest);
        Ok(texture)
    }
}

impl Decode for Font {
    const KIND: ChunkKind = ChunkKind::Font;

    fn decode(_name: &str, bytes: &[u8]) -> Result<Self, String> {
        load_ttf_font_from_bytes(bytes).map_err(|e| format!("Failed to load font: {}", e))
    }
}
