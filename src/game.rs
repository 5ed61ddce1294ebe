use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::GameConfig;
use crate::draw::{Align, Renderer, Rgb, SpriteKind};
use crate::entities::{ControlState, Entity, HAZARD_SPEED_RANGE, Hazard, PlayerCraft};
use crate::geometry::{Position, Size};
use crate::input::InputAction;
use crate::session::SessionController;

/// Inset of the score label from the top-right corner
const SCORE_MARGIN: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Running,
    GameOver,
}

/// Hitbox sizes of the sprite-backed entities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntitySizes {
    pub craft: Size,
    pub hazard: Size,
}

/// Everything that changes while playing, advanced one tick at a time
pub struct Game {
    state: GameState,
    field: Size,
    sizes: EntitySizes,
    spawn_interval: u32,
    craft: PlayerCraft,
    hazards: Vec<Hazard>,
    session: SessionController,
    rng: StdRng,
}

impl Game {
    pub fn new(config: &GameConfig, sizes: EntitySizes, rng: StdRng) -> Self {
        let field = config.field();
        Self {
            state: GameState::Running,
            field,
            sizes,
            spawn_interval: config.spawn_interval,
            craft: PlayerCraft::new(field, sizes.craft),
            hazards: Vec::new(),
            session: SessionController::new(field.height),
            rng,
        }
    }

    /// A game whose meteorite stream is fully determined by `seed`
    pub fn with_seed(config: &GameConfig, sizes: EntitySizes, seed: u64) -> Self {
        Self::new(config, sizes, StdRng::seed_from_u64(seed))
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn craft(&self) -> &PlayerCraft {
        &self.craft
    }

    pub fn hazards(&self) -> &[Hazard] {
        &self.hazards
    }

    pub fn session(&self) -> &SessionController {
        &self.session
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    /// Handles a one-shot action. Quitting is the caller's business.
    pub fn apply(&mut self, action: InputAction) {
        match (action, self.state) {
            (InputAction::Fire, GameState::Running) => {
                self.craft.fire();
            }
            (InputAction::Restart, GameState::GameOver) => self.restart(),
            _ => {}
        }
    }

    /// Starts a fresh session: new craft, no meteorites, zero score
    pub fn restart(&mut self) {
        self.craft = PlayerCraft::new(self.field, self.sizes.craft);
        self.hazards.clear();
        self.session.reset();
        self.state = GameState::Running;
        info!("Game restarted");
    }

    /// Advances the world by one tick
    pub fn tick(&mut self, controls: ControlState) {
        self.session.scroll_background();

        if self.state != GameState::Running {
            return;
        }

        if self.session.advance_spawn_timer(self.spawn_interval) {
            self.spawn_hazard();
        }

        self.craft.update(controls);

        for hazard in &mut self.hazards {
            hazard.update(());
        }
        self.hazards
            .retain(|hazard| hazard.is_alive() && !hazard.is_off_screen());

        if self
            .session
            .check_collisions(&mut self.craft, &mut self.hazards)
        {
            self.state = GameState::GameOver;
            info!("Game over, final score {}", self.session.score());
        }
    }

    /// Appends a meteorite at a random column above the screen
    pub fn spawn_hazard(&mut self) {
        let hazard = Hazard::spawn(
            &mut self.rng,
            self.field,
            self.sizes.hazard,
            HAZARD_SPEED_RANGE,
        );
        debug!(
            "Spawned meteorite at x={} falling {} px/tick",
            hazard.position.x, hazard.fall_speed
        );
        self.hazards.push(hazard);
    }

    /// Issues the draw commands for the current frame
    pub fn render(&self, renderer: &mut dyn Renderer) {
        let offset = self.session.background_offset();
        renderer.draw_sprite(SpriteKind::Background, Position::new(0.0, -offset));
        renderer.draw_sprite(
            SpriteKind::Background,
            Position::new(0.0, self.field.height - offset),
        );

        self.craft.render(renderer);
        for hazard in &self.hazards {
            hazard.render(renderer);
        }

        renderer.draw_text(
            &format!("Score: {}", self.score()),
            Position::new(self.field.width - SCORE_MARGIN, SCORE_MARGIN),
            Align::Right,
            Rgb::WHITE,
        );

        if self.state == GameState::GameOver {
            self.render_game_over(renderer);
        }
    }

    fn render_game_over(&self, renderer: &mut dyn Renderer) {
        let center_x = self.field.width / 2.0;
        let center_y = self.field.height / 2.0;
        let lines = [
            ("GAME OVER!".to_string(), Rgb::RED, -50.0),
            (format!("Final score: {}", self.score()), Rgb::WHITE, 0.0),
            ("Press R to restart".to_string(), Rgb::WHITE, 50.0),
        ];
        for (text, color, dy) in lines {
            renderer.draw_text(
                &text,
                Position::new(center_x, center_y + dy),
                Align::Center,
                color,
            );
        }
    }
}
