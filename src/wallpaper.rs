//! Desktop wallpaper installation and Microsoft Teams background export.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::image_ops;

/// Dimensions Teams expects for background thumbnails.
const TEAMS_THUMB_SIZE: (u32, u32) = (280, 158);

/// Install a composed frame as the desktop wallpaper.
pub fn set_wallpaper(frame: &RgbaImage) -> Result<()> {
    let path = image_ops::cache_bmp(frame)?;
    install(&path)
}

#[cfg(windows)]
fn install(path: &std::path::Path) -> Result<()> {
    use std::ffi::OsStr;
    use std::os::windows::ffi::OsStrExt;

    use windows::Win32::UI::WindowsAndMessaging::{
        SystemParametersInfoW, SPIF_SENDCHANGE, SPIF_UPDATEINIFILE, SPI_SETDESKWALLPAPER,
    };

    let wide_path: Vec<u16> = OsStr::new(path)
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();
    unsafe {
        SystemParametersInfoW(
            SPI_SETDESKWALLPAPER,
            0,
            Some(wide_path.as_ptr() as *mut _),
            SPIF_UPDATEINIFILE | SPIF_SENDCHANGE,
        )
    }
    .map_err(|err| anyhow!("SystemParametersInfoW failed: {err}"))?;
    Ok(())
}

#[cfg(not(windows))]
fn install(_path: &std::path::Path) -> Result<()> {
    Err(anyhow!(
        "setting the desktop wallpaper is only supported on Windows"
    ))
}

/// Save a composed frame and its thumbnail into the Microsoft Teams custom
/// backgrounds directory.
pub fn save_teams_background(frame: &RgbaImage) -> Result<()> {
    let dir = teams_uploads_dir()?;
    let (thumb_w, thumb_h) = TEAMS_THUMB_SIZE;
    let thumb = imageops::resize(frame, thumb_w, thumb_h, FilterType::Triangle);

    let bg_path = dir.join("wunderland.png");
    frame
        .save(&bg_path)
        .with_context(|| format!("failed to write {}", bg_path.display()))?;
    let thumb_path = dir.join("wunderland_thumb.png");
    thumb
        .save(&thumb_path)
        .with_context(|| format!("failed to write {}", thumb_path.display()))?;
    Ok(())
}

/// Resolve the Teams custom background uploads directory.
fn teams_uploads_dir() -> Result<PathBuf> {
    let appdata = std::env::var_os("APPDATA")
        .ok_or_else(|| anyhow!("APPDATA is not set; Teams backgrounds require Windows"))?;
    let dir = PathBuf::from(appdata)
        .join("Microsoft")
        .join("Teams")
        .join("Backgrounds")
        .join("Uploads");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    Ok(dir)
}
