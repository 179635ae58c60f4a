//! Sprite and frame processing utilities.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgb, RgbaImage};
use rand::Rng;

/// Alphabet the random tint colors are drawn from.
const HEX_DIGITS: &[u8] = b"ABCDEF0123456789";

/// Parse a `#RRGGBB` hex color (the leading `#` is optional).
pub fn parse_hex_color(hex: &str) -> Result<Rgb<u8>> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 {
        return Err(anyhow!("invalid hex color: {hex:?}"));
    }
    let value = u32::from_str_radix(digits, 16)
        .with_context(|| format!("invalid hex color: {hex:?}"))?;
    Ok(Rgb([
        (value >> 16) as u8,
        (value >> 8) as u8,
        value as u8,
    ]))
}

/// Draw a random `#RRGGBB` color string.
pub fn random_hex_color(rng: &mut impl Rng) -> String {
    let digits: String = (0..6)
        .map(|_| HEX_DIGITS[rng.gen_range(0..HEX_DIGITS.len())] as char)
        .collect();
    format!("#{digits}")
}

/// Recolor a sprite: grayscale the RGB channels, then modulate the gray value
/// with the target color. The alpha channel is preserved untouched.
pub fn tint(sprite: &RgbaImage, color: Rgb<u8>) -> RgbaImage {
    let mut tinted = sprite.clone();
    for pixel in tinted.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        // Rec. 601 luma.
        let gray = (0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b)) as u16;
        pixel.0 = [
            ((gray * u16::from(color.0[0])) / 255) as u8,
            ((gray * u16::from(color.0[1])) / 255) as u8,
            ((gray * u16::from(color.0[2])) / 255) as u8,
            a,
        ];
    }
    tinted
}

/// Scale a sprite to a square of the given side length.
pub fn resize_sprite(sprite: &RgbaImage, size: u32) -> RgbaImage {
    imageops::resize(sprite, size, size, FilterType::Triangle)
}

/// Cache a frame as a BMP for the Windows wallpaper API.
pub fn cache_bmp(frame: &RgbaImage) -> Result<PathBuf> {
    let cache_path = cache_file_path()?;
    // SystemParametersInfoW is most reliable with BMP input.
    let rgb = image::DynamicImage::ImageRgba8(frame.clone()).to_rgb8();
    rgb.save_with_format(&cache_path, ImageFormat::Bmp)
        .with_context(|| format!("failed to write {}", cache_path.display()))?;
    Ok(cache_path)
}

/// Resolve the cache path used to store the BMP wallpaper.
fn cache_file_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("dev", "wunderland", "wunderland")
        .ok_or_else(|| anyhow!("cannot determine cache directory"))?;
    let cache_dir = dirs.cache_dir();
    std::fs::create_dir_all(cache_dir)?;
    Ok(cache_dir.join("wunderland.bmp"))
}
