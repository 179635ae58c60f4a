//! Online collaborators: wttr.in weather lookup and the sprite service.
//!
//! Every fetch here is best-effort. Failures degrade to local fallbacks with
//! a warning; nothing in this module can abort a run.

use std::time::Duration;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::RgbaImage;
use log::warn;
use serde::Deserialize;

use crate::image_ops;
use crate::weather::{WeatherCondition, WeatherInput};

/// Weather provider, answering a single glyph for `?format=%c`.
const WTTR_URL: &str = "https://wttr.in";
/// Give up on any online collaborator after this long.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
/// Online sprites are normalized to this square dimension.
pub const ONLINE_SPRITE_SIZE: u32 = 164;

/// Resolve a weather input to a concrete condition, exactly once.
///
/// Lookup misses and provider failures fall back to the default condition;
/// weather resolution is never fatal.
pub fn resolve_weather(input: &WeatherInput, location: Option<&str>) -> WeatherCondition {
    match input {
        WeatherInput::Condition(condition) => *condition,
        WeatherInput::DisplayName(name) => {
            WeatherCondition::from_display_name(name).unwrap_or_else(|err| {
                let fallback = WeatherCondition::default();
                warn!("{err}; falling back to {}", fallback.display_name());
                fallback
            })
        }
        WeatherInput::Auto => current_weather(location).unwrap_or_else(|err| {
            let fallback = WeatherCondition::default();
            warn!(
                "weather lookup failed ({err}); falling back to {}",
                fallback.display_name()
            );
            fallback
        }),
    }
}

/// Ask wttr.in for the current weather, for the given location or the
/// caller's IP.
fn current_weather(location: Option<&str>) -> Result<WeatherCondition> {
    let url = match location {
        Some(location) => format!("{WTTR_URL}/{location}?format=%c"),
        None => format!("{WTTR_URL}/?format=%c"),
    };
    let body = ureq::get(&url)
        .timeout(FETCH_TIMEOUT)
        .call()
        .context("wttr.in request failed")?
        .into_string()
        .context("wttr.in response was not text")?;
    WeatherCondition::from_glyph(&body)
}

/// Wire format of the sprite service: a batch of base64-encoded PNGs.
#[derive(Debug, Deserialize)]
struct SpriteBatch {
    images: Vec<String>,
}

/// Fetch up to `count` sprites from the sprite service, normalized to
/// [`ONLINE_SPRITE_SIZE`].
///
/// Entries that fail to decode are skipped with a warning; the caller tops up
/// any shortfall from local artwork.
pub fn fetch_online_sprites(url: &str, count: usize) -> Result<Vec<RgbaImage>> {
    let batch: SpriteBatch = serde_json::from_reader(
        ureq::get(url)
            .query("count", &count.to_string())
            .timeout(FETCH_TIMEOUT)
            .call()
            .context("sprite service request failed")?
            .into_reader(),
    )
    .context("sprite service response was not a sprite batch")?;

    let mut sprites = Vec::new();
    for encoded in batch.images.iter().take(count) {
        match decode_sprite(encoded) {
            Ok(sprite) => sprites.push(sprite),
            Err(err) => warn!("skipping undecodable online sprite: {err}"),
        }
    }
    Ok(sprites)
}

fn decode_sprite(encoded: &str) -> Result<RgbaImage> {
    let bytes = BASE64
        .decode(encoded.trim())
        .context("invalid base64 payload")?;
    let sprite = image::load_from_memory(&bytes)
        .context("payload is not a decodable image")?
        .to_rgba8();
    Ok(image_ops::resize_sprite(&sprite, ONLINE_SPRITE_SIZE))
}
