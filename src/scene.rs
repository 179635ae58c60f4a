//! The scene: background, weather, and the entities living in it.

use image::imageops;
use image::RgbaImage;
use rand_chacha::ChaChaRng;

use crate::entity::Entity;
use crate::placement::{Padding, PlacementSolver, Point};
use crate::weather::WeatherCondition;

/// A composed wunderland, owned by the caller for the duration of a run.
///
/// The scene owns the background, the optional weather overlay, and every
/// entity placed in it; there is no shared or global state. Rendering never
/// mutates the scene, stepping mutates only the entities.
pub struct Scene {
    background: RgbaImage,
    overlay: Option<RgbaImage>,
    weather: WeatherCondition,
    entities: Vec<Entity>,
    solver: PlacementSolver,
    rng: ChaChaRng,
}

impl Scene {
    pub fn new(
        background: RgbaImage,
        overlay: Option<RgbaImage>,
        weather: WeatherCondition,
        rng: ChaChaRng,
    ) -> Self {
        let solver = PlacementSolver::new(background.width(), background.height());
        Self {
            background,
            overlay,
            weather,
            entities: Vec::new(),
            solver,
            rng,
        }
    }

    pub fn weather(&self) -> WeatherCondition {
        self.weather
    }

    pub fn size(&self) -> (u32, u32) {
        (self.background.width(), self.background.height())
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn rng_mut(&mut self) -> &mut ChaChaRng {
        &mut self.rng
    }

    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Draw a random position on the background, on or above the ground.
    pub fn random_position(&mut self, grounded: bool) -> Point {
        self.solver
            .random_position(&mut self.rng, grounded, Padding::ZERO, None)
    }

    /// Advance every entity's motion state by `delta` seconds.
    ///
    /// Entities are independent; the update order does not matter.
    pub fn step_all(&mut self, delta: f32) {
        for entity in &mut self.entities {
            entity.step(delta, &self.solver, &mut self.rng);
        }
    }

    /// Composite one frame: background, entities back to front, then the
    /// weather overlay.
    pub fn get_frame(&self) -> RgbaImage {
        let mut frame = self.background.clone();

        for entity in self.paint_order() {
            let sprite = entity.sprite();
            // Bottom-center pivot: the entity position is where its feet are.
            let left = entity.position.x - sprite.width() as f32 / 2.0;
            let top = entity.position.y - sprite.height() as f32;
            imageops::overlay(&mut frame, sprite, left.round() as i64, top.round() as i64);
        }

        if let Some(overlay) = &self.overlay {
            imageops::overlay(&mut frame, overlay, 0, 0);
        }

        frame
    }

    /// Entities sorted by y ascending, so lower (closer) entities paint last.
    fn paint_order(&self) -> Vec<&Entity> {
        let mut order: Vec<&Entity> = self.entities.iter().collect();
        order.sort_by(|a, b| a.position.y.total_cmp(&b.position.y));
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use rand::SeedableRng;

    fn test_rng() -> ChaChaRng {
        ChaChaRng::seed_from_u64(1234)
    }

    fn dot_sprite(color: Rgba<u8>) -> RgbaImage {
        RgbaImage::from_pixel(1, 1, color)
    }

    #[test]
    fn empty_scene_renders_the_bare_background() {
        let background = RgbaImage::from_pixel(16, 16, Rgba([10, 20, 30, 255]));
        let scene = Scene::new(background.clone(), None, WeatherCondition::Sunny, test_rng());
        assert_eq!(scene.get_frame().as_raw(), background.as_raw());
    }

    #[test]
    fn empty_scene_with_overlay_renders_background_plus_overlay() {
        let background = RgbaImage::from_pixel(16, 16, Rgba([10, 20, 30, 255]));
        let overlay = RgbaImage::from_pixel(16, 16, Rgba([200, 0, 0, 128]));
        let scene = Scene::new(
            background.clone(),
            Some(overlay.clone()),
            WeatherCondition::Rainy,
            test_rng(),
        );

        let mut expected = background;
        imageops::overlay(&mut expected, &overlay, 0, 0);
        assert_eq!(scene.get_frame().as_raw(), expected.as_raw());
    }

    #[test]
    fn rendering_does_not_mutate_the_scene() {
        let background = RgbaImage::from_pixel(16, 16, Rgba([10, 20, 30, 255]));
        let mut scene = Scene::new(background, None, WeatherCondition::Sunny, test_rng());
        scene.add_entity(Entity::new(
            dot_sprite(Rgba([255, 255, 255, 255])),
            Point::new(8.0, 8.0),
            true,
            None,
        ));

        let first = scene.get_frame();
        let second = scene.get_frame();
        assert_eq!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn entities_paint_in_non_decreasing_y_order() {
        let background = RgbaImage::from_pixel(32, 32, Rgba([0, 0, 0, 255]));
        let mut scene = Scene::new(background, None, WeatherCondition::Sunny, test_rng());
        let ys = [20.0, 5.0, 31.0, 12.0, 5.0, 27.0];
        for (index, y) in ys.into_iter().enumerate() {
            scene.add_entity(Entity::new(
                dot_sprite(Rgba([255, 255, 255, 255])),
                Point::new(index as f32, y),
                index % 2 == 0,
                None,
            ));
        }

        let order = scene.paint_order();
        assert_eq!(order.len(), 6);
        for pair in order.windows(2) {
            assert!(pair[0].position.y <= pair[1].position.y);
        }
    }

    #[test]
    fn closer_entities_paint_over_farther_ones() {
        let background = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]));
        let mut scene = Scene::new(background, None, WeatherCondition::Sunny, test_rng());
        // The green dot covers pixel (4, 4); the taller red sprite stands
        // lower and covers (4, 4) and (4, 5), so it must paint on top.
        scene.add_entity(Entity::new(
            dot_sprite(Rgba([0, 255, 0, 255])),
            Point::new(4.0, 5.0),
            true,
            None,
        ));
        scene.add_entity(Entity::new(
            RgbaImage::from_pixel(1, 2, Rgba([255, 0, 0, 255])),
            Point::new(4.0, 6.0),
            true,
            None,
        ));

        let frame = scene.get_frame();
        assert_eq!(frame.get_pixel(4, 4).0, [255, 0, 0, 255]);
        assert_eq!(frame.get_pixel(4, 5).0, [255, 0, 0, 255]);
    }

    #[test]
    fn sprites_overhanging_the_edge_are_clipped() {
        let background = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]));
        let mut scene = Scene::new(background, None, WeatherCondition::Sunny, test_rng());
        let sprite = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        scene.add_entity(Entity::new(sprite, Point::new(0.0, 2.0), true, None));

        // Must not panic; the visible part lands in the top-left corner.
        let frame = scene.get_frame();
        assert_eq!(frame.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(frame.get_pixel(7, 7).0, [0, 0, 0, 255]);
    }

    #[test]
    fn step_all_moves_every_unpaused_entity_eventually() {
        let background = RgbaImage::from_pixel(1920, 1080, Rgba([0, 0, 0, 255]));
        let mut scene = Scene::new(background, None, WeatherCondition::Sunny, test_rng());
        for index in 0..3 {
            let position = scene.random_position(true);
            scene.add_entity(Entity::new(
                dot_sprite(Rgba([255, 255, 255, 255])),
                position,
                index % 2 == 0,
                None,
            ));
        }
        let before: Vec<Point> = scene.entities().iter().map(|e| e.position).collect();

        for _ in 0..50 {
            scene.step_all(0.1);
        }

        let moved = scene
            .entities()
            .iter()
            .zip(&before)
            .any(|(entity, start)| entity.position != *start);
        assert!(moved, "five simulated seconds should move someone");
    }
}
