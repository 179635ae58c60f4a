mod animation;
mod assets;
mod entity;
mod export;
mod image_ops;
mod online;
mod placement;
mod scene;
mod settings;
mod wallpaper;
mod weather;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use image::RgbaImage;
use log::{info, warn};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use crate::animation::FrameSequenceBuilder;
use crate::assets::AssetLibrary;
use crate::entity::Entity;
use crate::scene::Scene;
use crate::settings::AppSettings;
use crate::weather::WeatherInput;

/// Compose a weather-aware animated wallpaper populated by wandering cows.
#[derive(Parser, Debug)]
#[command(name = "wunderland", version)]
struct Args {
    /// Set the composed frame as the desktop wallpaper (Windows only)
    #[arg(short, long)]
    desktop: bool,

    /// Save the composed frame as a Microsoft Teams background
    #[arg(short, long)]
    teams: bool,

    /// Write the composed frame to a PNG file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write an animated ping-pong GIF to a file
    #[arg(short, long)]
    gif: Option<PathBuf>,

    /// How many cows populate the wunderland
    #[arg(short, long)]
    cows: Option<u32>,

    /// Weather override by display name (e.g. "Partly Cloudy"), skipping the
    /// online lookup
    #[arg(short, long)]
    weather: Option<String>,

    /// Location for the weather lookup (defaults to the current IP)
    #[arg(short, long)]
    location: Option<String>,

    /// Directory holding backgrounds, overlays, and sprites
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Sprite name to place (resolved as `{name}.png` in the assets dir)
    #[arg(short, long, default_value = "cow")]
    sprite: String,

    /// Fetch cow sprites from the online sprite service
    #[arg(long)]
    online: bool,

    /// Tint each cow with a random color
    #[arg(long)]
    colorize: bool,

    /// Seed for a reproducible scene
    #[arg(long)]
    seed: Option<u64>,

    /// Persist the cow count, location, and assets directory as defaults
    #[arg(long)]
    remember: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut settings = settings::load();

    if args.remember {
        if let Some(cows) = args.cows {
            settings.cow_count = cows;
        }
        if args.location.is_some() {
            settings.location = args.location.clone();
        }
        if let Some(assets) = &args.assets {
            settings.assets_dir = assets.to_string_lossy().to_string();
        }
        settings::save(&settings)?;
        info!("saved settings as defaults");
    }

    let input = match &args.weather {
        Some(name) => WeatherInput::DisplayName(name.clone()),
        None => WeatherInput::Auto,
    };
    let location = args.location.as_deref().or(settings.location.as_deref());
    let weather = online::resolve_weather(&input, location);

    let assets_dir = args
        .assets
        .clone()
        .unwrap_or_else(|| PathBuf::from(&settings.assets_dir));
    let assets = AssetLibrary::new(assets_dir);
    let background = assets.background(weather)?;
    let overlay = assets.overlay(weather)?;

    let rng = match args.seed {
        Some(seed) => ChaChaRng::seed_from_u64(seed),
        None => ChaChaRng::from_entropy(),
    };
    let mut scene = Scene::new(background, overlay, weather, rng);
    let (width, height) = scene.size();
    info!(
        "composed a {width}x{height} {} scene",
        scene.weather().display_name()
    );

    let cow_count = args.cows.unwrap_or(settings.cow_count) as usize;
    place_cows(&mut scene, &assets, &settings, cow_count, &args)?;
    info!("placed {cow_count} cows");

    if let Some(path) = &args.gif {
        let frame_count = settings.gif_frames as usize;
        let frame_delay = Duration::from_millis(settings.frame_delay_ms);
        let sequence = FrameSequenceBuilder::new(&mut scene).build(frame_count, frame_delay);
        export::save_gif(&sequence, path)?;
        info!("wrote {} frames to {}", sequence.frames.len(), path.display());
    }

    if args.desktop || args.teams || args.output.is_some() || args.gif.is_none() {
        let frame = scene.get_frame();
        deliver_frame(&frame, &args)?;
    }

    Ok(())
}

/// Populate the scene with cows, preferring online sprites when requested and
/// topping up from local artwork.
fn place_cows(
    scene: &mut Scene,
    assets: &AssetLibrary,
    settings: &AppSettings,
    count: usize,
    args: &Args,
) -> Result<()> {
    let mut online_sprites: Vec<RgbaImage> = Vec::new();
    if args.online {
        match &settings.sprite_service_url {
            Some(url) => match online::fetch_online_sprites(url, count) {
                Ok(batch) => online_sprites = batch,
                Err(err) => warn!("online sprites unavailable ({err}); using local artwork"),
            },
            None => warn!("no sprite service configured; using local artwork"),
        }
    }

    let local = assets.sprite(&args.sprite).with_context(|| {
        format!(
            "sprite {:?} not found; available sprites: {:?}",
            args.sprite,
            assets.sprite_names().unwrap_or_default()
        )
    })?;
    for index in 0..count {
        let sprite = online_sprites
            .get(index)
            .cloned()
            .unwrap_or_else(|| local.clone());
        let tint = if args.colorize {
            let hex = image_ops::random_hex_color(scene.rng_mut());
            Some(image_ops::parse_hex_color(&hex)?)
        } else {
            None
        };
        let position = scene.random_position(true);
        scene.add_entity(Entity::new(sprite, position, index % 2 == 0, tint));
    }
    Ok(())
}

/// Hand the static frame to every requested destination. With no destination
/// at all, drop a PNG in the working directory so running bare still produces
/// something to look at.
fn deliver_frame(frame: &RgbaImage, args: &Args) -> Result<()> {
    let mut delivered = false;
    if let Some(path) = &args.output {
        export::save_png(frame, path)?;
        info!("wrote {}", path.display());
        delivered = true;
    }
    if args.teams {
        wallpaper::save_teams_background(frame)?;
        info!("Microsoft Teams background saved");
        delivered = true;
    }
    if args.desktop {
        wallpaper::set_wallpaper(frame)?;
        info!("desktop wallpaper set");
        delivered = true;
    }
    if !delivered && args.gif.is_none() {
        let path = PathBuf::from("wunderland.png");
        export::save_png(frame, &path)?;
        info!("wrote {}", path.display());
    }
    Ok(())
}
