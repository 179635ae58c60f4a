//! Ping-pong frame sequences for animated export.

use std::time::Duration;

use image::RgbaImage;
use rand::Rng;

use crate::scene::Scene;

/// Simulated seconds between captured frames.
pub const FRAME_DELTA: f32 = 0.04;

/// Longest random head-start pause given to staggered entities, in seconds.
const STAGGER_SECONDS: f32 = 3.0;

/// An ordered run of rendered frames with a uniform display duration,
/// ready for a GIF encoder.
pub struct FrameSequence {
    pub frames: Vec<RgbaImage>,
    pub frame_delay: Duration,
}

/// Drives a scene through repeated animation steps and captures the frames.
pub struct FrameSequenceBuilder<'a> {
    scene: &'a mut Scene,
}

impl<'a> FrameSequenceBuilder<'a> {
    /// Wrap a scene and stagger the entities' initial pause timers so their
    /// motion is not perfectly synchronized: even-indexed entities start
    /// moving immediately, odd-indexed ones wait a random moment.
    pub fn new(scene: &'a mut Scene) -> Self {
        let count = scene.entities().len();
        let mut timeouts = Vec::with_capacity(count);
        for index in 0..count {
            let timeout = if index % 2 == 0 {
                0.0
            } else {
                scene.rng_mut().gen_range(0.0..STAGGER_SECONDS)
            };
            timeouts.push(timeout);
        }
        for (entity, timeout) in scene.entities_mut().iter_mut().zip(timeouts) {
            entity.timeout = timeout;
        }
        Self { scene }
    }

    /// Produce a seamless loop of `2 * (frame_count / 2)` frames: half the
    /// count stepped forward, then the same frames replayed in reverse. The
    /// reversed tail retraces the forward half exactly, so the loop boundary
    /// has no visible jump.
    pub fn build(&mut self, frame_count: usize, frame_delay: Duration) -> FrameSequence {
        let half = frame_count / 2;
        let mut frames = Vec::with_capacity(half * 2);

        for _ in 0..half {
            self.scene.step_all(FRAME_DELTA);
            frames.push(self.scene.get_frame());
        }

        let tail: Vec<RgbaImage> = frames.iter().rev().cloned().collect();
        frames.extend(tail);

        FrameSequence {
            frames,
            frame_delay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use crate::placement::Point;
    use crate::weather::WeatherCondition;
    use image::Rgba;
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    fn populated_scene() -> Scene {
        let background = RgbaImage::from_pixel(1920, 1080, Rgba([30, 60, 90, 255]));
        let mut scene = Scene::new(
            background,
            None,
            WeatherCondition::Sunny,
            ChaChaRng::seed_from_u64(5),
        );
        for index in 0..4 {
            let position = scene.random_position(true);
            let sprite = RgbaImage::from_pixel(8, 8, Rgba([255, 255, 255, 255]));
            scene.add_entity(Entity::new(sprite, position, index % 2 == 0, None));
        }
        scene
    }

    #[test]
    fn build_yields_an_even_frame_count() {
        let mut scene = populated_scene();
        let sequence =
            FrameSequenceBuilder::new(&mut scene).build(9, Duration::from_millis(40));
        assert_eq!(sequence.frames.len(), 8);
    }

    #[test]
    fn second_half_is_the_first_half_reversed() {
        let mut scene = populated_scene();
        let sequence =
            FrameSequenceBuilder::new(&mut scene).build(20, Duration::from_millis(40));
        assert_eq!(sequence.frames.len(), 20);

        let (forward, backward) = sequence.frames.split_at(10);
        for (a, b) in forward.iter().zip(backward.iter().rev()) {
            assert_eq!(a.as_raw(), b.as_raw());
        }
    }

    #[test]
    fn loop_boundary_frames_match_across_the_seam() {
        let mut scene = populated_scene();
        let sequence =
            FrameSequenceBuilder::new(&mut scene).build(12, Duration::from_millis(40));
        // Last frame equals the first captured frame, so wrapping around to
        // the start of the loop only re-shows adjacent motion states.
        let first = sequence.frames.first().unwrap();
        let last = sequence.frames.last().unwrap();
        assert_eq!(first.as_raw(), last.as_raw());
    }

    #[test]
    fn stagger_delays_only_odd_indexed_entities() {
        let mut scene = populated_scene();
        let _ = FrameSequenceBuilder::new(&mut scene);
        for (index, entity) in scene.entities().iter().enumerate() {
            if index % 2 == 0 {
                assert_eq!(entity.timeout, 0.0);
            } else {
                assert!(entity.timeout >= 0.0 && entity.timeout < 3.0);
            }
        }
    }

    #[test]
    fn animation_actually_changes_frames() {
        let mut scene = populated_scene();
        let sequence =
            FrameSequenceBuilder::new(&mut scene).build(40, Duration::from_millis(40));
        let first = sequence.frames.first().unwrap();
        let changed = sequence
            .frames
            .iter()
            .any(|frame| frame.as_raw() != first.as_raw());
        assert!(changed, "entities should visibly move across 20 steps");
    }
}
