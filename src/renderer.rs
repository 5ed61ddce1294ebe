use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::assets::SpriteSheet;
use crate::draw::{Align, Renderer, Rgb, SpriteKind};
use crate::game::Game;
use crate::geometry::{self, Position, Size};

/// Pixels with less alpha than this are not drawn
const ALPHA_CUTOFF: u8 = 128;
/// Upper half block: foreground paints the top pixel, background the bottom one
const HALF_BLOCK: char = '▀';

impl From<Rgb> for Color {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        Color::Rgb(r, g, b)
    }
}

#[derive(Debug, Clone)]
struct Label {
    text: String,
    position: Position,
    align: Align,
    color: Rgb,
}

/// Pixel raster of the playfield scaled down to terminal resolution.
///
/// Each terminal cell shows two stacked pixels, so square world pixels stay
/// roughly square on screen. Text is kept aside and drawn as real terminal
/// characters on top of the pixels.
pub struct Canvas {
    sprites: SpriteSheet,
    world: Size,
    viewport: Rect,
    /// Canvas pixels per world pixel
    scale: f32,
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
    labels: Vec<Label>,
}

impl Canvas {
    pub fn new(sprites: SpriteSheet, world: Size) -> Self {
        Self {
            sprites,
            world,
            viewport: Rect::default(),
            scale: 0.0,
            width: 0,
            height: 0,
            pixels: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Cells the playfield occupies after the last `begin_frame`
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Clears the raster and fits the world, letterboxed and centred, into `area`
    pub fn begin_frame(&mut self, area: Rect) {
        let scale = (area.width as f32 / self.world.width)
            .min(area.height as f32 * 2.0 / self.world.height);
        let cols = ((self.world.width * scale).round() as u16).min(area.width);
        let rows = ((self.world.height * scale / 2.0).round() as u16).min(area.height);

        self.scale = scale;
        self.viewport = Rect {
            x: area.x + (area.width - cols) / 2,
            y: area.y + (area.height - rows) / 2,
            width: cols,
            height: rows,
        };
        self.width = cols as usize;
        self.height = rows as usize * 2;
        self.pixels.clear();
        self.pixels.resize(self.width * self.height, Rgb::BLACK);
        self.labels.clear();
    }

    /// Pixel columns and rows covered by `rect`, clipped to the raster.
    /// Anything with a non-zero area covers at least one pixel.
    fn pixel_bounds(&self, rect: geometry::Rect) -> Option<(usize, usize, usize, usize)> {
        let span = |start: f32, end: f32, limit: usize| {
            let first = (start * self.scale).floor() as i64;
            let last = ((end * self.scale).ceil() as i64).max(first + 1);
            let first = first.max(0);
            let last = last.min(limit as i64);
            (first < last).then_some((first as usize, last as usize))
        };
        if rect.is_empty() {
            return None;
        }
        let (x0, x1) = span(rect.x, rect.right(), self.width)?;
        let (y0, y1) = span(rect.y, rect.bottom(), self.height)?;
        Some((x0, y0, x1, y1))
    }

    fn cell_column(&self, x: f32) -> i64 {
        self.viewport.x as i64 + (x * self.scale).round() as i64
    }

    fn cell_row(&self, y: f32) -> i64 {
        self.viewport.y as i64 + (y * self.scale / 2.0).floor() as i64
    }
}

impl Renderer for Canvas {
    fn draw_sprite(&mut self, sprite: SpriteKind, position: Position) {
        let (src_width, src_height) = self.sprites.get(sprite).dimensions();
        if src_width == 0 || src_height == 0 {
            return;
        }
        let dest = geometry::Rect::new(
            position.x,
            position.y,
            src_width as f32,
            src_height as f32,
        );
        let Some((x0, y0, x1, y1)) = self.pixel_bounds(dest) else {
            return;
        };

        let image = self.sprites.get(sprite);
        for py in y0..y1 {
            let world_y = (py as f32 + 0.5) / self.scale;
            let src_y = ((world_y - position.y).floor().max(0.0) as u32).min(src_height - 1);
            for px in x0..x1 {
                let world_x = (px as f32 + 0.5) / self.scale;
                let src_x = ((world_x - position.x).floor().max(0.0) as u32).min(src_width - 1);
                let [r, g, b, a] = image.get_pixel(src_x, src_y).0;
                if a >= ALPHA_CUTOFF {
                    self.pixels[py * self.width + px] = Rgb(r, g, b);
                }
            }
        }
    }

    fn fill_rect(&mut self, rect: geometry::Rect, color: Rgb) {
        let Some((x0, y0, x1, y1)) = self.pixel_bounds(rect) else {
            return;
        };
        for py in y0..y1 {
            self.pixels[py * self.width + x0..py * self.width + x1].fill(color);
        }
    }

    fn draw_text(&mut self, text: &str, position: Position, align: Align, color: Rgb) {
        self.labels.push(Label {
            text: text.to_string(),
            position,
            align,
            color,
        });
    }
}

impl Widget for &Canvas {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        let view = self.viewport;
        for row in 0..view.height {
            let top_row = row as usize * 2;
            for col in 0..view.width {
                let top = self.pixels[top_row * self.width + col as usize];
                let bottom = self.pixels[(top_row + 1) * self.width + col as usize];
                if let Some(cell) = buf.cell_mut((view.x + col, view.y + row)) {
                    cell.set_char(HALF_BLOCK)
                        .set_fg(top.into())
                        .set_bg(bottom.into());
                }
            }
        }

        for label in &self.labels {
            let width = label.text.chars().count() as i64;
            let anchor = self.cell_column(label.position.x);
            let x = match label.align {
                Align::Left => anchor,
                Align::Center => anchor - width / 2,
                Align::Right => anchor - width,
            };
            let y = self.cell_row(label.position.y);
            let x = x.max(view.left() as i64);
            if y < view.top() as i64 || y >= view.bottom() as i64 || x >= view.right() as i64 {
                continue;
            }
            buf.set_stringn(
                x as u16,
                y as u16,
                &label.text,
                (view.right() as i64 - x) as usize,
                Style::default()
                    .fg(label.color.into())
                    .add_modifier(Modifier::BOLD),
            );
        }
    }
}

/// Handles all rendering responsibilities for the game
pub struct GameRenderer {
    canvas: Canvas,
}

impl GameRenderer {
    pub fn new(sprites: SpriteSheet, world: Size) -> Self {
        Self {
            canvas: Canvas::new(sprites, world),
        }
    }

    /// Draws the playfield, its side borders and the controls hint
    pub fn render(&mut self, frame: &mut Frame, game: &Game) {
        let [field_area, hint_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

        self.canvas
            .begin_frame(field_area.inner(Margin::new(1, 0)));
        game.render(&mut self.canvas);

        let viewport = self.canvas.viewport();
        let border_area = Rect {
            x: viewport.x.saturating_sub(1),
            width: viewport.width + 2,
            ..viewport
        }
        .intersection(field_area);
        frame.render_widget(
            Block::default()
                .borders(Borders::LEFT | Borders::RIGHT)
                .border_style(Style::default().fg(Color::DarkGray)),
            border_area,
        );
        frame.render_widget(&self.canvas, viewport);

        let controls = Line::from(vec![Span::styled(
            "[A/D/Arrows: Move] [Space: Fire] [R: Restart] [Esc/Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);
        frame.render_widget(Paragraph::new(controls).centered(), hint_area);
    }
}
