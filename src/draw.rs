// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the clue header, the canvas and the toolbar.
// 2) A crosshair that follows your mouse over the canvas.
// 3) A tiny 5x7 bitmap font for the clue, button labels and prompts.

use crate::canvas::Canvas;
use crate::error::Error;
use crate::input::CanvasRect;
use crate::palette::StrokeStyle;
use crate::session::Confirm;
use crate::types::FrameBuffer;
use crate::ui::{Action, Layout, Rect};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

pub const BACKGROUND: u32 = 0x00_E6_E6_E6;
pub const INK: u32 = 0x00_20_20_20;
pub const PAPER: u32 = 0x00_FF_FF_FF;
const DISABLED: u32 = 0x00_A0_A0_A0;
const HIGHLIGHT: u32 = 0x00_FF_CC_33;

pub struct Drawer {
    window: Window,
}

impl Drawer {
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }

    pub fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we'll exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Mouse position in window pixels, `None` once it leaves the window.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    /// Keys that went down since the last frame.
    pub fn keys_pressed(&self) -> Vec<Key> {
        self.window.get_keys_pressed(KeyRepeat::No)
    }
}

/// Blocks on a Y/N answer drawn over the last frame, like a browser `confirm()`.
pub struct WindowConfirm<'a> {
    pub drawer: &'a mut Drawer,
    pub screen: &'a FrameBuffer,
}

impl Confirm for WindowConfirm<'_> {
    fn confirm(&mut self, prompt: &str) -> bool {
        let mut frame = self.screen.clone();
        draw_prompt(&mut frame, prompt);
        while self.drawer.is_open() {
            if let Err(e) = self.drawer.present(&frame) {
                tracing::error!("prompt: {e}");
                return false;
            }
            for key in self.drawer.keys_pressed() {
                match key {
                    Key::Y => return true,
                    Key::N => return false,
                    _ => {}
                }
            }
        }
        false
    }
}

/* ---------- Composed screens ---------- */

/// Clue across the top, double-size.
pub fn draw_header(fb: &mut FrameBuffer, clue: &str) {
    draw_text_5x7_scaled(fb, crate::ui::MARGIN as i32, 10, clue, INK, 2);
}

/// Blend the canvas over white paper inside `rect`.
pub fn composite_canvas(fb: &mut FrameBuffer, rect: CanvasRect, canvas: &Canvas) {
    let cols = canvas.width().min(fb.width.saturating_sub(rect.x));
    let rows = canvas.height().min(fb.height.saturating_sub(rect.y));
    let src = canvas.pixels();
    for y in 0..rows {
        for x in 0..cols {
            let i = (y * canvas.width() + x) * 4;
            let a = src[i + 3] as u32;
            let over = |c: u8| (c as u32 * a + 255 * (255 - a)) / 255;
            let px = (over(src[i]) << 16) | (over(src[i + 1]) << 8) | over(src[i + 2]);
            fb.pixels[(rect.y + y) * fb.width + rect.x + x] = px;
        }
    }
}

/// Swatches, width slider and action buttons.
pub fn draw_toolbar(fb: &mut FrameBuffer, layout: &Layout, style: StrokeStyle, can_undo: bool, can_redo: bool) {
    for (color, rect) in &layout.swatches {
        fill_rect(fb, *rect, color.rgba().to_u32());
        let outline = if *color == style.color { HIGHLIGHT } else { INK };
        outline_rect(fb, *rect, outline);
        if *color == style.color {
            let inner = Rect { x: rect.x + 1, y: rect.y + 1, width: rect.width - 2, height: rect.height - 2 };
            outline_rect(fb, inner, HIGHLIGHT);
        }
    }

    let track = layout.slider;
    let mid = (track.y + track.height / 2) as i32;
    draw_line(fb, track.x as i32, mid, (track.x + track.width - 1) as i32, mid, INK);
    let knob = layout.slider_knob_x(style.width()) as i32;
    let radius = (style.width() as i32 / 2).clamp(2, track.height as i32 / 2 - 1);
    fill_disc(fb, knob, mid, radius, style.color.rgba().to_u32());
    draw_text_5x7(fb, track.x as i32, track.y as i32 - 9, &style.width().to_string(), INK);

    for (action, rect) in &layout.buttons {
        let enabled = match action {
            Action::Undo => can_undo,
            Action::Redo => can_redo,
            _ => true,
        };
        let ink = if enabled { INK } else { DISABLED };
        fill_rect(fb, *rect, PAPER);
        outline_rect(fb, *rect, ink);
        draw_text_5x7(fb, rect.x as i32 + 8, (rect.y + (rect.height - 7) / 2) as i32, action.label(), ink);
    }
}

/// Dim the frame and show a yes/no box in the middle.
pub fn draw_prompt(fb: &mut FrameBuffer, prompt: &str) {
    for px in &mut fb.pixels {
        *px = (*px >> 1) & 0x00_7F_7F_7F;
    }
    let mut lines: Vec<&str> = prompt.lines().collect();
    lines.push("");
    lines.push("Y = YES     N = NO");

    let text_w = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) * 6;
    let box_w = (text_w + 32).min(fb.width);
    let box_h = (lines.len() * 12 + 24).min(fb.height);
    let rect = Rect {
        x: (fb.width - box_w) / 2,
        y: (fb.height - box_h) / 2,
        width: box_w,
        height: box_h,
    };
    fill_rect(fb, rect, PAPER);
    outline_rect(fb, rect, INK);
    for (i, line) in lines.iter().enumerate() {
        draw_text_5x7(fb, rect.x as i32 + 16, (rect.y + 12 + i * 12) as i32, line, INK);
    }
}

/* ---------- Software drawing: pixels, lines, rects, crosshair ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Draw a thin line between (x0,y0) and (x1,y1) using Bresenham.
fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0) = (x0, y0);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

fn fill_rect(fb: &mut FrameBuffer, rect: Rect, color: u32) {
    for y in rect.y..(rect.y + rect.height).min(fb.height) {
        for x in rect.x..(rect.x + rect.width).min(fb.width) {
            fb.pixels[y * fb.width + x] = color;
        }
    }
}

fn outline_rect(fb: &mut FrameBuffer, rect: Rect, color: u32) {
    if rect.width == 0 || rect.height == 0 {
        return;
    }
    let (x0, y0) = (rect.x as i32, rect.y as i32);
    let (x1, y1) = ((rect.x + rect.width - 1) as i32, (rect.y + rect.height - 1) as i32);
    draw_line(fb, x0, y0, x1, y0, color);
    draw_line(fb, x0, y1, x1, y1, color);
    draw_line(fb, x0, y0, x0, y1, color);
    draw_line(fb, x1, y0, x1, y1, color);
}

fn fill_disc(fb: &mut FrameBuffer, cx: i32, cy: i32, radius: i32, color: u32) {
    for y in -radius..=radius {
        for x in -radius..=radius {
            if x * x + y * y <= radius * radius {
                put_pixel(fb, cx + x, cy + y, color);
            }
        }
    }
}

/// Draw a small crosshair centered at (cx,cy).
/// Visual: a "+" shape (with a tiny gap at the center) follows your mouse.
pub fn draw_crosshair(fb: &mut FrameBuffer, cx: i32, cy: i32, size: i32, color: u32) {
    draw_line(fb, cx - size, cy, cx - 2, cy, color);
    draw_line(fb, cx + 2, cy, cx + size, cy, color);
    draw_line(fb, cx, cy - size, cx, cy - 2, color);
    draw_line(fb, cx, cy + 2, cx, cy + size, color);
    put_pixel(fb, cx, cy, color);
}

/* ---------- 5x7 bitmap font (digits, A-Z, a little punctuation) ---------- */

/// Return a 5x7 glyph bitmap. Lowercase letters render as uppercase.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '?' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b00000,0b00100),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '=' => g!(0b00000,0b00000,0b11111,0b00000,0b11111,0b00000,0b00000),
        '\'' => g!(0b00100,0b00100,0b01000,0b00000,0b00000,0b00000,0b00000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y), each font pixel a `scale`×`scale` block.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32, scale: i32) {
    let Some(rows) = glyph5x7(ch) else { return };
    for (ry, rowbits) in rows.iter().enumerate() {
        for rx in 0..5 {
            if (rowbits & (1 << (4 - rx))) == 0 {
                continue;
            }
            for dy in 0..scale {
                for dx in 0..scale {
                    put_pixel(fb, x + (rx * scale + dx), y + (ry as i32 * scale + dy), color);
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs with 1-pixel spacing.
pub fn draw_text_5x7(fb: &mut FrameBuffer, x: i32, y: i32, text: &str, color: u32) {
    draw_text_5x7_scaled(fb, x, y, text, color, 1);
}

pub fn draw_text_5x7_scaled(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32, scale: i32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color, scale);
        x += 6 * scale;
    }
}
