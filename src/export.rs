//! Persisting composed frames: static PNG and looping GIF.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};

use crate::animation::FrameSequence;

/// Write a single composed frame as a PNG.
pub fn save_png(frame: &RgbaImage, path: &Path) -> Result<()> {
    frame
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Encode a frame sequence as an infinitely looping GIF.
pub fn save_gif(sequence: &FrameSequence, path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut encoder = GifEncoder::new_with_speed(BufWriter::new(file), 10);
    encoder
        .set_repeat(Repeat::Infinite)
        .context("failed to mark GIF as looping")?;

    let delay = Delay::from_saturating_duration(sequence.frame_delay);
    for frame in &sequence.frames {
        encoder
            .encode_frame(Frame::from_parts(frame.clone(), 0, 0, delay))
            .context("failed to encode GIF frame")?;
    }
    Ok(())
}
