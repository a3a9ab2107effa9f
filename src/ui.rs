// Window layout: clue header on top, canvas in the middle, toolbar below.
// Everything here is plain geometry so it can be tested without a window.

use crate::input::CanvasRect;
use crate::palette::{Color, MAX_STROKE_WIDTH, MIN_STROKE_WIDTH};

pub const MARGIN: usize = 16;
pub const HEADER_HEIGHT: usize = 36;
pub const TOOLBAR_HEIGHT: usize = 56;
pub const SWATCH_SIZE: usize = 28;
pub const SWATCH_GAP: usize = 6;
pub const SLIDER_WIDTH: usize = 160;
pub const BUTTON_HEIGHT: usize = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Undo,
    Redo,
    NewClue,
    Reset,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Undo, Action::Redo, Action::NewClue, Action::Reset];

    pub fn label(self) -> &'static str {
        match self {
            Action::Undo => "UNDO",
            Action::Redo => "REDO",
            Action::NewClue => "NEW CLUE",
            Action::Reset => "RESET",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn contains(&self, pos: (f32, f32)) -> bool {
        pos.0 >= self.x as f32
            && pos.1 >= self.y as f32
            && pos.0 < (self.x + self.width) as f32
            && pos.1 < (self.y + self.height) as f32
    }
}

/// Something clickable outside the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiTarget {
    Swatch(Color),
    Slider,
    Button(Action),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub width: usize,
    pub height: usize,
    pub canvas: CanvasRect,
    pub swatches: Vec<(Color, Rect)>,
    pub slider: Rect,
    pub buttons: Vec<(Action, Rect)>,
}

impl Layout {
    pub fn new(canvas_width: usize, canvas_height: usize) -> Self {
        let canvas = CanvasRect { x: MARGIN, y: HEADER_HEIGHT, width: canvas_width, height: canvas_height };
        let bar_y = canvas.y + canvas.height + (TOOLBAR_HEIGHT - SWATCH_SIZE) / 2;

        let mut x = MARGIN;
        let swatches = Color::ALL
            .iter()
            .map(|&color| {
                let rect = Rect { x, y: bar_y, width: SWATCH_SIZE, height: SWATCH_SIZE };
                x += SWATCH_SIZE + SWATCH_GAP;
                (color, rect)
            })
            .collect();

        x += SWATCH_GAP * 2;
        let slider = Rect { x, y: bar_y, width: SLIDER_WIDTH, height: SWATCH_SIZE };
        x += SLIDER_WIDTH + SWATCH_GAP * 3;

        let buttons = Action::ALL
            .iter()
            .map(|&action| {
                // 6px per glyph plus padding
                let width = action.label().len() * 6 + 16;
                let rect = Rect { x, y: bar_y, width, height: BUTTON_HEIGHT };
                x += width + SWATCH_GAP;
                (action, rect)
            })
            .collect();

        let width = (canvas.width + 2 * MARGIN).max(x + MARGIN);
        let height = canvas.y + canvas.height + TOOLBAR_HEIGHT;
        Self { width, height, canvas, swatches, slider, buttons }
    }

    pub fn hit(&self, pos: (f32, f32)) -> Option<UiTarget> {
        if let Some((color, _)) = self.swatches.iter().find(|(_, r)| r.contains(pos)) {
            return Some(UiTarget::Swatch(*color));
        }
        if self.slider.contains(pos) {
            return Some(UiTarget::Slider);
        }
        self.buttons
            .iter()
            .find(|(_, r)| r.contains(pos))
            .map(|(action, _)| UiTarget::Button(*action))
    }

    /// Stroke width for a pointer at window x over the slider track.
    pub fn slider_value(&self, x: f32) -> u32 {
        let t = ((x - self.slider.x as f32) / (self.slider.width.max(1) - 1).max(1) as f32).clamp(0.0, 1.0);
        let span = (MAX_STROKE_WIDTH - MIN_STROKE_WIDTH) as f32;
        MIN_STROKE_WIDTH + (t * span).round() as u32
    }

    /// Knob x position for a stroke width.
    pub fn slider_knob_x(&self, width: u32) -> usize {
        let span = (MAX_STROKE_WIDTH - MIN_STROKE_WIDTH) as f32;
        let t = (width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH) - MIN_STROKE_WIDTH) as f32 / span;
        self.slider.x + (t * (self.slider.width - 1) as f32).round() as usize
    }
}
