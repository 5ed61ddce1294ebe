use std::ops::RangeInclusive;

use rand::Rng;

use super::Entity;
use crate::draw::{Renderer, SpriteKind};
use crate::geometry::{Position, Rect, Size};

/// Fall speeds, in pixels per tick, a meteorite may be given at spawn
pub const HAZARD_SPEED_RANGE: RangeInclusive<u32> = 2..=5;

/// A falling meteorite
#[derive(Debug, Clone, PartialEq)]
pub struct Hazard {
    pub position: Position,
    pub size: Size,
    pub fall_speed: f32,
    field_height: f32,
    alive: bool,
}

impl Hazard {
    pub fn new(position: Position, size: Size, fall_speed: f32, field_height: f32) -> Self {
        Self {
            position,
            size,
            fall_speed,
            field_height,
            alive: true,
        }
    }

    /// Spawns a meteorite just above the top edge at a random column with a
    /// random fall speed drawn from `speed_range`
    pub fn spawn<R: Rng>(
        rng: &mut R,
        field: Size,
        size: Size,
        speed_range: RangeInclusive<u32>,
    ) -> Self {
        let max_x = (field.width - size.width).max(0.0) as u32;
        let x = rng.random_range(0..=max_x) as f32;
        let fall_speed = rng.random_range(speed_range) as f32;
        Self::new(Position::new(x, -size.height), size, fall_speed, field.height)
    }

    /// True once the meteorite has fallen past the bottom edge
    pub fn is_off_screen(&self) -> bool {
        self.position.y > self.field_height
    }

    pub fn mark_destroyed(&mut self) {
        self.alive = false;
    }
}

impl Entity for Hazard {
    type Input = ();

    fn update(&mut self, _: ()) {
        if !self.alive {
            return;
        }
        self.position.y += self.fall_speed;
    }

    fn bounding_box(&self) -> Rect {
        Rect::from_parts(self.position, self.size)
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        if self.alive {
            renderer.draw_sprite(SpriteKind::Meteorite, self.position);
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}
