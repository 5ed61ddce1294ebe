use color_eyre::Result;
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::{Duration, Instant};

use crate::game::Game;
use crate::input::{InputAction, InputManager};
use crate::renderer::GameRenderer;

/// Caps the loop at a fixed tick rate, like a game clock
pub struct FrameClock {
    interval: Duration,
    frame_start: Instant,
}

impl FrameClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            frame_start: Instant::now(),
        }
    }

    /// Time left in the current tick after `elapsed` has been spent
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.interval.saturating_sub(elapsed)
    }

    /// Sleeps out the rest of the tick and starts the next one
    pub fn wait(&mut self) {
        let remaining = self.remaining(self.frame_start.elapsed());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        self.frame_start = Instant::now();
    }
}

/// The main application which holds the state and logic of the application.
pub struct App {
    running: bool,
    game: Game,
    input_manager: InputManager,
    renderer: GameRenderer,
    clock: FrameClock,
}

impl App {
    pub fn new(
        game: Game,
        input_manager: InputManager,
        renderer: GameRenderer,
        tick_interval: Duration,
    ) -> Self {
        Self {
            running: true,
            game,
            input_manager,
            renderer,
            clock: FrameClock::new(tick_interval),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        while self.running {
            self.input_manager.poll_events()?;
            let actions = self.input_manager.take_actions();
            self.process_actions(&actions);
            if !self.running {
                break;
            }

            self.game.tick(self.input_manager.controls());
            self.input_manager.end_tick();

            terminal.draw(|frame| self.renderer.render(frame, &self.game))?;

            self.clock.wait();
        }
        info!("Quit with score {}", self.game.score());
        Ok(())
    }

    /// Process input actions and update game state accordingly
    fn process_actions(&mut self, actions: &[InputAction]) {
        for &action in actions {
            match action {
                InputAction::Quit => {
                    self.running = false;
                    return;
                }
                action => self.game.apply(action),
            }
        }
    }
}
