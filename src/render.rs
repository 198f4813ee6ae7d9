use crate::collision::Ending;
use crate::config::{Colors, Rgb};
use crate::game::{RunStatus, Scene};
use crate::grid::{Bounds, Cell};

/// Height of the score strip under the board, in pixels.
pub const HUD_HEIGHT: u32 = 32;

const TEXT_SCALE: u32 = 2;
const BANNER_SCALE: u32 = 5;

/// RGBA frame buffer with clipped drawing primitives.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        debug_assert_eq!(frame.len(), (width * height * 4) as usize);
        Self { frame, width, height }
    }

    pub fn clear(&mut self, c: Rgb) {
        for px in self.frame.chunks_exact_mut(4) {
            px.copy_from_slice(&[c.0, c.1, c.2, 255]);
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * self.width + x) * 4) as usize;
        [self.frame[idx], self.frame[idx + 1], self.frame[idx + 2], self.frame[idx + 3]]
    }

    pub fn blend_pixel(&mut self, x: u32, y: u32, c: Rgb, a: u8) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        let (ar, iar) = (a as u16, 255 - a as u16);
        for (i, src) in [c.0, c.1, c.2].into_iter().enumerate() {
            let dst = self.frame[idx + i] as u16;
            self.frame[idx + i] = ((src as u16 * ar + dst * iar) / 255) as u8;
        }
        self.frame[idx + 3] = 255;
    }

    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, c: Rgb, a: u8) {
        let x2 = (x + w).min(self.width);
        let y2 = (y + h).min(self.height);
        for py in y..y2 {
            for px in x..x2 {
                self.blend_pixel(px, py, c, a);
            }
        }
    }

    pub fn stroke_rect(&mut self, x: u32, y: u32, w: u32, h: u32, c: Rgb, a: u8) {
        if w == 0 || h == 0 || x >= self.width || y >= self.height {
            return;
        }
        let x2 = (x + w - 1).min(self.width - 1);
        let y2 = (y + h - 1).min(self.height - 1);
        for px in x..=x2 {
            self.blend_pixel(px, y, c, a);
            self.blend_pixel(px, y2, c, a);
        }
        for py in y..=y2 {
            self.blend_pixel(x, py, c, a);
            self.blend_pixel(x2, py, c, a);
        }
    }

    /// Draws `text` with its top-left corner at (x, y). Returns the advance.
    pub fn draw_text(&mut self, text: &str, x: u32, y: u32, scale: u32, c: Rgb) -> u32 {
        let mut cx = x;
        for ch in text.chars() {
            if let Some(rows) = glyph(ch) {
                for (ry, row) in rows.iter().enumerate() {
                    for rx in 0..5u32 {
                        if (row >> (4 - rx)) & 1 == 1 {
                            self.fill_rect(cx + rx * scale, y + ry as u32 * scale, scale, scale, c, 255);
                        }
                    }
                }
            }
            cx += GLYPH_ADVANCE * scale;
        }
        cx - x
    }

    pub fn draw_text_centered(&mut self, text: &str, cx: u32, cy: u32, scale: u32, c: Rgb) {
        let x = cx.saturating_sub(text_width(text, scale) / 2);
        let y = cy.saturating_sub(GLYPH_HEIGHT * scale / 2);
        self.draw_text(text, x, y, scale, c);
    }
}

/// Text overlaid on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    None,
    Title,
    Paused,
    Ended(Option<Ending>),
}

pub struct Renderer {
    colors: Colors,
    bounds: Bounds,
}

impl Renderer {
    pub fn new(colors: Colors, bounds: Bounds) -> Self {
        Self { colors, bounds }
    }

    /// Size of the whole surface: board plus score strip.
    pub fn surface_size(&self) -> (u32, u32) {
        (self.bounds.width as u32, self.bounds.height as u32 + HUD_HEIGHT)
    }

    pub fn draw(&self, canvas: &mut Canvas<'_>, scene: &Scene<'_>, banner: Banner) {
        let c = self.colors;
        let (width, board_h) = (self.bounds.width as u32, self.bounds.height as u32);

        canvas.clear(c.background);

        if let Some(food) = scene.food {
            self.fill_cell(canvas, food, c.food);
        }

        if scene.status != RunStatus::NotStarted {
            let unit = self.bounds.unit as u32;
            for cell in scene.snake.cells().filter(|cell| self.bounds.contains(*cell)) {
                self.fill_cell(canvas, cell, c.snake);
                canvas.stroke_rect(cell.x as u32, cell.y as u32, unit, unit, c.snake_border, 255);
            }
        }

        canvas.fill_rect(0, board_h, width, HUD_HEIGHT, c.hud, 255);
        let text_y = board_h + (HUD_HEIGHT - GLYPH_HEIGHT * TEXT_SCALE) / 2;
        canvas.draw_text(&format!("SCORE: {}", scene.score), 8, text_y, TEXT_SCALE, c.text);

        let (cx, cy) = (width / 2, board_h / 2);
        match banner {
            Banner::None => {}
            Banner::Title => {
                canvas.draw_text_centered("SNAKE", cx, cy.saturating_sub(40), BANNER_SCALE, c.text);
                canvas.draw_text_centered("PRESS ENTER TO START", cx, cy + 20, TEXT_SCALE, c.text);
            }
            Banner::Paused => canvas.draw_text_centered("PAUSED", cx, cy, BANNER_SCALE, c.text),
            Banner::Ended(ending) => {
                let title = if ending == Some(Ending::BoardFilled) { "YOU WIN" } else { "GAME OVER" };
                canvas.draw_text_centered(title, cx, cy, BANNER_SCALE, c.text);
                canvas.draw_text_centered("PRESS R TO RESET", cx, cy + 40, TEXT_SCALE, c.text);
            }
        }
    }

    fn fill_cell(&self, canvas: &mut Canvas<'_>, cell: Cell, color: Rgb) {
        let unit = self.bounds.unit as u32;
        canvas.fill_rect(cell.x as u32, cell.y as u32, unit, unit, color, 255);
    }
}

const GLYPH_HEIGHT: u32 = 7;
/// Five columns of ink plus one of spacing.
const GLYPH_ADVANCE: u32 = 6;

pub fn text_width(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * GLYPH_ADVANCE * scale
}

/// 5x7 bitmap, one byte per row, high bit on the left.
fn glyph(ch: char) -> Option<[u8; 7]> {
    Some(match ch.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b11110, 0b10001, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
        'E' => [0b11111, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01110],
        'H' => [0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001, 0b10001],
        'I' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b11111],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b10010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b11011, 0b10001],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ':' => [0b00000, 0b00100, 0b00000, 0b00000, 0b00100, 0b00000, 0b00000],
        _ => return None,
    })
}
