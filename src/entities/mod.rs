mod hazard;
mod player;
mod projectile;

// Re-export all public types
pub use hazard::{HAZARD_SPEED_RANGE, Hazard};
pub use player::{
    CRAFT_SPEED, ControlState, FIRE_COOLDOWN, LEFT_CANNON, PlayerCraft, RIGHT_CANNON,
    SPAWN_BOTTOM_MARGIN,
};
pub use projectile::{PROJECTILE_COLOR, PROJECTILE_SIZE, PROJECTILE_SPEED, Projectile};

use crate::draw::Renderer;
use crate::geometry::Rect;

/// Capabilities shared by everything that lives on the playfield
pub trait Entity {
    /// What the entity consumes on each tick
    type Input;

    fn update(&mut self, input: Self::Input);

    fn bounding_box(&self) -> Rect;

    fn render(&self, renderer: &mut dyn Renderer);

    fn is_alive(&self) -> bool {
        true
    }

    fn overlaps<E: Entity + ?Sized>(&self, other: &E) -> bool {
        self.bounding_box().intersects(&other.bounding_box())
    }
}
