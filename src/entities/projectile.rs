use super::Entity;
use crate::draw::{Renderer, Rgb};
use crate::geometry::{Position, Rect, Size};

/// Pixels travelled upward per tick
pub const PROJECTILE_SPEED: f32 = 10.0;
pub const PROJECTILE_SIZE: Size = Size::new(5.0, 18.0);
pub const PROJECTILE_COLOR: Rgb = Rgb::YELLOW;

/// A cannon shot fired by the player craft
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub position: Position,
    pub speed: f32,
    pub size: Size,
}

impl Projectile {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            speed: PROJECTILE_SPEED,
            size: PROJECTILE_SIZE,
        }
    }

    /// True once the shot has left through the top edge
    pub fn is_off_screen(&self) -> bool {
        self.position.y < 0.0
    }
}

impl Entity for Projectile {
    type Input = ();

    fn update(&mut self, _: ()) {
        self.position.y -= self.speed;
    }

    fn bounding_box(&self) -> Rect {
        Rect::from_parts(self.position, self.size)
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        renderer.fill_rect(self.bounding_box(), PROJECTILE_COLOR);
    }
}
