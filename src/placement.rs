//! Ground-curve placement of entities on the background.

use rand::Rng;

/// A position in background pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Per-side inset applied to the sampling window, in pixels.
#[derive(Clone, Copy, Debug, Default)]
pub struct Padding {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Padding {
    pub const ZERO: Padding = Padding {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };
}

/// Height of the terrain horizon at column `x`.
///
/// Tuned against the painted backgrounds; the constants are part of the look.
/// Everything above this y is sky, everything at or below it is ground.
pub fn ground_y(x: f32) -> f32 {
    (50.0 * (0.0021 * (x + 200.0)).sin() - 624.0).abs()
}

/// Samples positions on a background of fixed dimensions, keeping grounded
/// positions below the ground curve and airborne positions above it.
#[derive(Clone, Copy, Debug)]
pub struct PlacementSolver {
    width: u32,
    height: u32,
}

impl PlacementSolver {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Draw a random position, optionally within `radius` of an anchor point.
    ///
    /// Grounded positions satisfy `y >= ground_y(x)`, airborne positions
    /// `y < ground_y(x)`. When padding or the anchor radius leave no valid
    /// interval, the sample collapses to the ground-curve boundary instead of
    /// failing; a wallpaper must render under any configuration.
    pub fn random_position(
        &self,
        rng: &mut impl Rng,
        grounded: bool,
        padding: Padding,
        anchor: Option<(Point, f32)>,
    ) -> Point {
        let max_x = i64::from(self.width) - 1;
        let max_y = i64::from(self.height) - 1;

        let x = match anchor {
            Some((origin, radius)) => {
                let lo = ((origin.x - radius) as i64).max(i64::from(padding.left));
                let hi = ((origin.x + radius) as i64).min(max_x - i64::from(padding.right));
                sample(rng, lo, hi, lo).clamp(0, max_x)
            }
            None => {
                let lo = i64::from(padding.left);
                let hi = max_x - i64::from(padding.right);
                sample(rng, lo, hi, lo).clamp(0, max_x)
            }
        };

        // Integer bounds that keep the grounded/airborne guarantee even for a
        // fractional curve height.
        let curve = ground_y(x as f32);
        let ground_floor = curve.ceil() as i64;
        let sky_ceiling = curve.floor() as i64 - 1;

        let y = match (anchor, grounded) {
            (Some((origin, radius)), true) => {
                let lo = ((origin.y - radius) as i64).max(ground_floor + i64::from(padding.top));
                let hi = ((origin.y + radius) as i64).min(max_y - i64::from(padding.bottom));
                sample(rng, lo, hi, lo)
            }
            (Some((origin, radius)), false) => {
                let lo = ((origin.y - radius) as i64).max(i64::from(padding.top));
                let hi = ((origin.y + radius) as i64).min(sky_ceiling - i64::from(padding.bottom));
                sample(rng, lo, hi, hi)
            }
            (None, true) => {
                let lo = ground_floor + i64::from(padding.top);
                let hi = max_y - i64::from(padding.bottom);
                sample(rng, lo, hi, lo)
            }
            (None, false) => {
                let lo = i64::from(padding.top);
                let hi = sky_ceiling - i64::from(padding.bottom);
                sample(rng, lo, hi, hi)
            }
        };

        Point::new(x as f32, y as f32)
    }
}

/// Draw from `[lo, hi]`, collapsing an empty interval to the boundary point
/// dictated by the hard constraint.
fn sample(rng: &mut impl Rng, lo: i64, hi: i64, empty_fallback: i64) -> i64 {
    if lo > hi {
        empty_fallback
    } else {
        rng.gen_range(lo..=hi)
    }
}
