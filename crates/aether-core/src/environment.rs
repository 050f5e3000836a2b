//! Equirectangular environment map used for orb reflections.
//!
//! The source is a Radiance HDR image. It is tone-mapped to 8-bit RGBA on
//! the CPU so the renderer can sample it with a plain filterable texture.

use crate::constants::ENV_EXPOSURE;
use image::ImageFormat;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvironmentError {
    #[error("failed to decode environment map: {0}")]
    Decode(#[from] image::ImageError),
    #[error("environment map has no pixels")]
    Empty,
}

#[derive(Clone, Debug)]
pub struct EnvironmentMap {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8, `width * height * 4` bytes.
    pub rgba8: Vec<u8>,
}

/// Reinhard tone map of one linear channel to sRGB-ish 8 bit.
#[inline]
pub fn tone_map_channel(linear: f32, exposure: f32) -> u8 {
    let c = (linear.max(0.0) * exposure).min(f32::MAX);
    let mapped = c / (1.0 + c);
    (mapped.powf(1.0 / 2.2) * 255.0).round().clamp(0.0, 255.0) as u8
}

pub fn decode_hdr(bytes: &[u8]) -> Result<EnvironmentMap, EnvironmentError> {
    let img = image::load_from_memory_with_format(bytes, ImageFormat::Hdr)?.into_rgba32f();
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(EnvironmentError::Empty);
    }
    let mut rgba8 = Vec::with_capacity((width * height * 4) as usize);
    for px in img.pixels() {
        let [r, g, b, _] = px.0;
        rgba8.push(tone_map_channel(r, ENV_EXPOSURE));
        rgba8.push(tone_map_channel(g, ENV_EXPOSURE));
        rgba8.push(tone_map_channel(b, ENV_EXPOSURE));
        rgba8.push(255);
    }
    log::info!("[env] decoded {}x{} environment map", width, height);
    Ok(EnvironmentMap {
        width,
        height,
        rgba8,
    })
}
