use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::entities::ControlState;

/// Represents semantic game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Fire,
    Restart,
    Quit,
}

/// Hold state of a single movement key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Hold {
    #[default]
    Released,
    /// Held until the terminal reports the release
    Held,
    /// Held for this many more ticks unless pressed again
    Expiring(u32),
}

impl Hold {
    fn is_down(self) -> bool {
        self != Hold::Released
    }

    fn tick(self) -> Self {
        match self {
            Hold::Expiring(ticks) if ticks > 1 => Hold::Expiring(ticks - 1),
            Hold::Expiring(_) => Hold::Released,
            other => other,
        }
    }
}

/// Tracks the state of keys that can be held down for continuous input
#[derive(Debug, Default)]
struct KeyState {
    left: Hold,
    right: Hold,
}

/// Manages input polling and translates raw key events into game actions
pub struct InputManager {
    key_state: KeyState,
    oneshot_actions: Vec<InputAction>,
    /// Whether the terminal sends key release events
    reports_release: bool,
    /// Fallback hold duration when it does not
    hold_ticks: u32,
}

impl InputManager {
    /// Creates a manager for a terminal that does (`reports_release`) or does
    /// not report key releases
    pub fn new(reports_release: bool, hold_ticks: u32) -> Self {
        Self {
            key_state: KeyState::default(),
            oneshot_actions: Vec::new(),
            reports_release,
            hold_ticks,
        }
    }

    /// Polls for all pending events without blocking.
    /// Should be called once per tick before reading actions.
    pub fn poll_events(&mut self) -> color_eyre::Result<()> {
        while event::poll(Duration::ZERO)? {
            self.handle_event(event::read()?);
        }
        Ok(())
    }

    /// Processes one terminal event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => self.handle_key_event(key_event),
            Event::FocusLost => {
                // Release events are lost together with focus
                self.key_state = KeyState::default();
            }
            _ => {}
        }
    }

    /// Processes a key event and updates key state and one-shot actions
    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event),
            // Without release events the terminal's auto-repeat keeps a key alive
            KeyEventKind::Repeat => self.handle_movement_press(key_event.code),
            KeyEventKind::Release => self.handle_key_release(key_event.code),
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent) {
        // Quit keys work in any state
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        match key_event.code {
            KeyCode::Char(' ') => self.oneshot_actions.push(InputAction::Fire),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.oneshot_actions.push(InputAction::Restart)
            }
            code => self.handle_movement_press(code),
        }
    }

    fn handle_movement_press(&mut self, code: KeyCode) {
        let hold = if self.reports_release {
            Hold::Held
        } else {
            Hold::Expiring(self.hold_ticks)
        };
        match code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = hold;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = hold;
            }
            _ => {}
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = Hold::Released;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = Hold::Released;
            }
            _ => {}
        }
    }

    /// Drains the one-shot actions gathered since the last call, in arrival order
    pub fn take_actions(&mut self) -> Vec<InputAction> {
        std::mem::take(&mut self.oneshot_actions)
    }

    /// Snapshot of the held movement keys
    pub fn controls(&self) -> ControlState {
        ControlState {
            left: self.key_state.left.is_down(),
            right: self.key_state.right.is_down(),
        }
    }

    /// Ages fallback holds; call once at the end of every tick
    pub fn end_tick(&mut self) {
        self.key_state.left = self.key_state.left.tick();
        self.key_state.right = self.key_state.right.tick();
    }
}
