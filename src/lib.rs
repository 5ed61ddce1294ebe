// Library exports for testing
pub use app::{App, FrameClock};
pub use assets::SpriteSheet;
pub use config::GameConfig;
pub use draw::{Align, Renderer, Rgb, SpriteKind};
pub use entities::{ControlState, Entity, Hazard, PlayerCraft, Projectile};
pub use game::{EntitySizes, Game, GameState};
pub use geometry::{Position, Rect, Size};
pub use input::{InputAction, InputManager};
pub use renderer::{Canvas, GameRenderer};
pub use session::SessionController;

pub mod app;
pub mod assets;
pub mod config;
pub mod draw;
pub mod entities;
pub mod game;
pub mod geometry;
pub mod input;
pub mod renderer;
pub mod session;
