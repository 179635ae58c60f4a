//! Named artwork lookup in the local assets directory.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use image::RgbaImage;
use walkdir::WalkDir;

use crate::weather::WeatherCondition;

/// File name prefix for background artwork.
const BACKGROUND_PREFIX: &str = "wallpaper_";
/// File name prefix for weather overlay artwork.
const OVERLAY_PREFIX: &str = "overlay_wallpaper_";

/// Resolves named backgrounds, overlays, and sprites under one directory.
#[derive(Clone, Debug)]
pub struct AssetLibrary {
    root: PathBuf,
}

impl AssetLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Load the background painted for a weather condition.
    pub fn background(&self, condition: WeatherCondition) -> Result<RgbaImage> {
        self.load(&format!("{BACKGROUND_PREFIX}{}.png", condition.background()))
    }

    /// Load the full-frame overlay for a weather condition, when it has one.
    pub fn overlay(&self, condition: WeatherCondition) -> Result<Option<RgbaImage>> {
        match condition.overlay() {
            Some(name) => Ok(Some(self.load(&format!("{OVERLAY_PREFIX}{name}.png"))?)),
            None => Ok(None),
        }
    }

    /// Load a sprite by name (`{name}.png`).
    pub fn sprite(&self, name: &str) -> Result<RgbaImage> {
        self.load(&format!("{name}.png"))
    }

    /// List the sprite names available in the assets directory, sorted.
    ///
    /// Background and overlay artwork is excluded; everything else with a
    /// PNG extension counts as a sprite.
    pub fn sprite_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in WalkDir::new(&self.root).max_depth(1) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(OsStr::to_str) != Some("png") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(OsStr::to_str) else {
                continue;
            };
            if stem.starts_with(BACKGROUND_PREFIX) || stem.starts_with(OVERLAY_PREFIX) {
                continue;
            }
            names.push(stem.to_string());
        }
        names.sort();
        names.dedup();
        Ok(names)
    }

    fn load(&self, file: &str) -> Result<RgbaImage> {
        let path = self.root.join(file);
        if !path.exists() {
            return Err(anyhow!("missing asset: {}", path.display()));
        }
        open_rgba(&path)
    }
}

/// Open an image file and normalize it to RGBA.
pub fn open_rgba(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(img.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn write_png(dir: &Path, name: &str) {
        let img = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255]));
        img.save(dir.join(name)).unwrap();
    }

    fn temp_assets(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wunderland-assets-{tag}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn sprites_resolve_by_name() {
        let dir = temp_assets("sprite");
        write_png(&dir, "cow.png");
        let assets = AssetLibrary::new(&dir);
        assert_eq!(assets.sprite("cow").unwrap().width(), 2);
        assert!(assets.sprite("unicorn").is_err());
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn sprite_names_skip_backgrounds_and_overlays() {
        let dir = temp_assets("names");
        write_png(&dir, "cow.png");
        write_png(&dir, "pig.png");
        write_png(&dir, "wallpaper_sunny.png");
        write_png(&dir, "overlay_wallpaper_rainy.png");
        let assets = AssetLibrary::new(&dir);
        assert_eq!(assets.sprite_names().unwrap(), vec!["cow", "pig"]);
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn overlay_is_absent_for_clear_weather() {
        let dir = temp_assets("overlay");
        let assets = AssetLibrary::new(&dir);
        // Sunny has no overlay, so no file access happens at all.
        assert!(assets.overlay(WeatherCondition::Sunny).unwrap().is_none());
        assert!(assets.overlay(WeatherCondition::Rainy).is_err());
        std::fs::remove_dir_all(dir).unwrap();
    }
}
