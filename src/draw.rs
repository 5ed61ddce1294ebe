use crate::geometry::{Position, Rect};

/// 24-bit colour passed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
}

/// Horizontal anchoring of a text label relative to its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Bitmaps loaded once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Starship,
    Meteorite,
    Background,
}

/// Sink for draw commands issued by the game each frame.
///
/// Coordinates are world pixels with a top-left origin. Implementations own
/// every bit of rendering state; the game only describes what to draw.
pub trait Renderer {
    /// Blits a loaded bitmap with its top-left corner at `position`
    fn draw_sprite(&mut self, sprite: SpriteKind, position: Position);

    /// Fills an axis-aligned rectangle with a solid colour
    fn fill_rect(&mut self, rect: Rect, color: Rgb);

    /// Draws a line of text; `position.y` is the top of the text
    fn draw_text(&mut self, text: &str, position: Position, align: Align, color: Rgb);
}
