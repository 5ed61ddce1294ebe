use crate::entities::{Entity, Hazard, PlayerCraft};

/// Points awarded for each meteorite shot down
pub const POINTS_PER_HIT: u32 = 10;
/// Pixels the background scrolls per tick
pub const SCROLL_SPEED: f32 = 3.0;

/// Score, timers and collision resolution for one play session
#[derive(Debug, Clone)]
pub struct SessionController {
    score: u32,
    spawn_timer: u32,
    background_offset: f32,
    screen_height: f32,
}

impl SessionController {
    pub fn new(screen_height: f32) -> Self {
        Self {
            score: 0,
            spawn_timer: 0,
            background_offset: 0.0,
            screen_height,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn spawn_timer(&self) -> u32 {
        self.spawn_timer
    }

    /// How far the background has scrolled up, in `[0, screen_height)`
    pub fn background_offset(&self) -> f32 {
        self.background_offset
    }

    /// Zeroes score and spawn timer. The background keeps scrolling.
    pub fn reset(&mut self) {
        self.score = 0;
        self.spawn_timer = 0;
    }

    pub fn scroll_background(&mut self) {
        self.background_offset =
            (self.background_offset + SCROLL_SPEED).rem_euclid(self.screen_height);
    }

    /// Counts one tick. Returns true, and starts over from zero, once
    /// `threshold` ticks have accumulated.
    pub fn advance_spawn_timer(&mut self, threshold: u32) -> bool {
        self.spawn_timer += 1;
        if self.spawn_timer >= threshold {
            self.spawn_timer = 0;
            return true;
        }
        false
    }

    /// Resolves this tick's overlaps. Returns true when the craft was hit.
    ///
    /// Shots are checked first, in firing order: a shot destroys the first live
    /// meteorite it overlaps and is spent. Only meteorites that survive that
    /// pass can then collide with the craft.
    pub fn check_collisions(&mut self, craft: &mut PlayerCraft, hazards: &mut [Hazard]) -> bool {
        let score = &mut self.score;
        craft.retain_projectiles(|shot| {
            let Some(target) = hazards
                .iter_mut()
                .find(|hazard| hazard.is_alive() && shot.overlaps(&**hazard))
            else {
                return true;
            };
            target.mark_destroyed();
            *score = score.saturating_add(POINTS_PER_HIT);
            false
        });

        if !craft.is_alive() {
            return false;
        }
        let hit = hazards
            .iter()
            .any(|hazard| hazard.is_alive() && craft.overlaps(hazard));
        if hit {
            craft.mark_destroyed();
        }
        hit
    }
}
