//! A wandering sprite instance placed in the scene.

use image::imageops;
use image::{Rgb, RgbaImage};
use rand::Rng;

use crate::image_ops;
use crate::placement::{Padding, PlacementSolver, Point};

/// How far a replanned wander target may be from the current position.
const WANDER_RADIUS: f32 = 200.0;
/// Walking speed in background pixels per second.
const WALK_SPEED: f32 = 10.0;
/// Distance below which a target counts as reached.
const ARRIVAL_THRESHOLD: f32 = 10.0;
/// Pause duration drawn on arrival, in seconds.
const PAUSE_SECONDS: std::ops::Range<f32> = 5.0..20.0;

/// One animated sprite in the scene.
///
/// The entity owns its sprite image; mirrored and tinted copies are made at
/// construction so entities never share mutable pixels. The position is the
/// sprite's bottom-center pivot in background coordinates.
pub struct Entity {
    sprite: RgbaImage,
    pub position: Point,
    facing_right: bool,
    target: Option<Point>,
    /// Seconds left to pause before walking toward the target again.
    pub timeout: f32,
}

impl Entity {
    /// Place a new entity. Source artwork faces right; the sprite is mirrored
    /// here when `facing_right` is false, and recolored once when a tint is
    /// given.
    pub fn new(
        sprite: RgbaImage,
        position: Point,
        facing_right: bool,
        tint: Option<Rgb<u8>>,
    ) -> Self {
        let mut sprite = match tint {
            Some(color) => image_ops::tint(&sprite, color),
            None => sprite,
        };
        if !facing_right {
            sprite = imageops::flip_horizontal(&sprite);
        }
        Self {
            sprite,
            position,
            facing_right,
            target: None,
            timeout: 0.0,
        }
    }

    pub fn sprite(&self) -> &RgbaImage {
        &self.sprite
    }

    pub fn facing_right(&self) -> bool {
        self.facing_right
    }

    /// Mirror the sprite and flip the facing flag as one atomic pair.
    pub fn turn(&mut self) {
        self.sprite = imageops::flip_horizontal(&self.sprite);
        self.facing_right = !self.facing_right;
    }

    /// Advance the wander state machine by `delta` seconds.
    ///
    /// Without a target the entity plans one near itself and starts walking.
    /// With a running pause timer it only counts down. Otherwise it walks
    /// toward the target at a fixed speed, turning to face its direction of
    /// travel, and on arrival pauses for a random while before picking the
    /// next target.
    pub fn step(&mut self, delta: f32, solver: &PlacementSolver, rng: &mut impl Rng) {
        let Some(target) = self.target else {
            self.target = Some(self.plan_target(solver, rng));
            self.timeout = 0.0;
            return;
        };

        if self.timeout > 0.0 {
            self.timeout -= delta;
            return;
        }

        let distance = self.position.distance(target);
        if distance < ARRIVAL_THRESHOLD {
            // Covers the zero-distance case too; no direction to normalize.
            self.timeout = rng.gen_range(PAUSE_SECONDS);
            self.target = Some(self.plan_target(solver, rng));
            return;
        }

        let unit_x = (target.x - self.position.x) / distance;
        let unit_y = (target.y - self.position.y) / distance;
        self.position.x += unit_x * delta * WALK_SPEED;
        self.position.y += unit_y * delta * WALK_SPEED;

        if unit_x != 0.0 {
            let moving_right = unit_x > 0.0;
            if moving_right != self.facing_right {
                self.turn();
            }
        }
    }

    fn plan_target(&self, solver: &PlacementSolver, rng: &mut impl Rng) -> Point {
        solver.random_position(rng, true, Padding::ZERO, Some((self.position, WANDER_RADIUS)))
    }
}
