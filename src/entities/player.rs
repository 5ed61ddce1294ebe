use super::Entity;
use super::projectile::Projectile;
use crate::draw::{Renderer, SpriteKind};
use crate::geometry::{Position, Rect, Size};

/// Horizontal pixels moved per tick while a direction is held
pub const CRAFT_SPEED: f32 = 5.0;
/// Ticks between two volleys
pub const FIRE_COOLDOWN: u32 = 15;
/// Gap between the craft's bottom edge and the bottom of the playfield
pub const SPAWN_BOTTOM_MARGIN: f32 = 10.0;
/// Cannon muzzles as (fraction of craft width, vertical offset from the top edge)
pub const LEFT_CANNON: (f32, f32) = (0.2, 0.0);
pub const RIGHT_CANNON: (f32, f32) = (0.8, 20.0);

/// Held directional keys sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    pub left: bool,
    pub right: bool,
}

/// The ship steered by the player
#[derive(Debug, Clone)]
pub struct PlayerCraft {
    pub position: Position,
    pub size: Size,
    pub speed: f32,
    pub cooldown: u32,
    pub cooldown_reset: u32,
    field: Size,
    projectiles: Vec<Projectile>,
    alive: bool,
}

impl PlayerCraft {
    /// Creates a craft centred horizontally near the bottom of `field`
    pub fn new(field: Size, size: Size) -> Self {
        let x = ((field.width - size.width) / 2.0).floor();
        let y = field.height - size.height - SPAWN_BOTTOM_MARGIN;
        Self {
            position: Position::new(x, y),
            size,
            speed: CRAFT_SPEED,
            cooldown: 0,
            cooldown_reset: FIRE_COOLDOWN,
            field,
            projectiles: Vec::new(),
            alive: true,
        }
    }

    /// Largest x that keeps the whole craft on screen
    pub fn max_x(&self) -> f32 {
        (self.field.width - self.size.width).max(0.0)
    }

    pub fn can_fire(&self) -> bool {
        self.alive && self.cooldown == 0
    }

    /// Fires both cannons if the craft is alive and cooled down.
    /// Returns whether a volley left the ship.
    pub fn fire(&mut self) -> bool {
        if !self.can_fire() {
            return false;
        }

        for (fraction, dy) in [LEFT_CANNON, RIGHT_CANNON] {
            let muzzle = self.position.offset(self.size.width * fraction, dy);
            self.projectiles.push(Projectile::new(muzzle));
        }
        self.cooldown = self.cooldown_reset;
        true
    }

    pub fn mark_destroyed(&mut self) {
        self.alive = false;
    }

    /// Live shots in firing order
    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Keeps only the shots for which `keep` returns true. Each shot is
    /// visited exactly once, in firing order.
    pub fn retain_projectiles(&mut self, keep: impl FnMut(&Projectile) -> bool) {
        self.projectiles.retain(keep);
    }
}

impl Entity for PlayerCraft {
    type Input = ControlState;

    fn update(&mut self, controls: ControlState) {
        if !self.alive {
            return;
        }

        // Both directions apply independently; holding both cancels out
        let mut x = self.position.x;
        if controls.right {
            x += self.speed;
        }
        if controls.left {
            x -= self.speed;
        }
        self.position.x = x.clamp(0.0, self.max_x());

        if self.cooldown > 0 {
            self.cooldown -= 1;
        }

        for projectile in &mut self.projectiles {
            projectile.update(());
        }
        self.projectiles.retain(|p| !p.is_off_screen());
    }

    fn bounding_box(&self) -> Rect {
        Rect::from_parts(self.position, self.size)
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        if self.alive {
            renderer.draw_sprite(SpriteKind::Starship, self.position);
        }
        for projectile in &self.projectiles {
            projectile.render(renderer);
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}
