// One drawing surface and everything that happens on it: stroke capture,
// live smoothing, undo/redo and persistence.

use crate::canvas::Canvas;
use crate::clue::{random_clue, title_for};
use crate::error::Result;
use crate::history::{History, Undone};
use crate::input::{PointerEvent, StrokeCapture};
use crate::palette::{Color, StrokeStyle};
use crate::storage::{self, KeyValueStore};
use crate::types::Point;
use rand::Rng;

pub const NEW_CLUE_PROMPT: &str =
    "Are you sure you want to get a new clue?\nTHE CURRENT IMAGE AND HISTORY ARE NOT GOING TO BE SAVED";
pub const RESET_PROMPT: &str = "Are you sure you want to reset the drawing?\nTHE CURRENT IMAGE AND HISTORY ARE GOING TO BE LOST";

/// Yes/no gate in front of destructive actions.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Owns the canvas and everything that edits it.
///
/// Visual: the canvas shows `history`'s top entry, or the live stroke painted
/// over the raster captured at press time.
pub struct DrawingSession<S: KeyValueStore> {
    canvas: Canvas,
    capture: StrokeCapture,
    history: History,
    /// Applied to the next repaint, so a mid-stroke color change recolors
    /// the whole stroke.
    style: StrokeStyle,
    clue: String,
    store: S,
}

impl<S: KeyValueStore> DrawingSession<S> {
    /// Build the surface and bring back whatever the store holds.
    ///
    /// Restoring is finished before this returns: a stored image is blitted
    /// onto the canvas and seeds the undo stack, and a stored clue replaces
    /// the random one.
    pub fn open<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        style: StrokeStyle,
        store: S,
        rng: &mut R,
    ) -> Result<Self> {
        let restored = storage::restore(&store)?;
        let mut session = Self {
            canvas: Canvas::new(width, height),
            capture: StrokeCapture::default(),
            history: History::default(),
            style,
            clue: random_clue(rng).to_owned(),
            store,
        };

        if let Some(image) = restored.image {
            session.canvas.draw_image(&image);
            session.history.commit(session.canvas.snapshot());
            tracing::info!(width = image.width, height = image.height, "restored drawing");
        }
        if let Some(clue) = restored.clue {
            session.clue = clue;
        }
        tracing::info!(width, height, clue = %session.clue, "session ready");
        Ok(session)
    }

    /// Route one pointer event from the window.
    pub fn handle(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Press(p) => self.press(p),
            PointerEvent::Move(p) => self.move_to(p),
            PointerEvent::Release => self.release(),
            PointerEvent::Leave => self.leave(),
        }
    }

    /// Start a stroke on top of the current raster.
    pub fn press(&mut self, point: Point) {
        self.capture.press(point, self.canvas.snapshot());
    }

    /// Extend the stroke and repaint base + smoothed path.
    pub fn move_to(&mut self, point: Point) {
        if !self.capture.extend(point) {
            return;
        }
        // Visual: the previous frame of the stroke is wiped by the base.
        let Some(base) = self.capture.base() else { return };
        if let Err(e) = self.canvas.put_snapshot(base) {
            tracing::error!("cannot restore stroke base: {e}");
            return;
        }
        self.canvas
            .stroke_path(self.capture.points(), self.style.width(), self.style.color.rgba());
    }

    pub fn release(&mut self) {
        self.finish_stroke();
    }

    /// Pointer left the surface. Only matters mid-stroke.
    pub fn leave(&mut self) {
        self.finish_stroke();
    }

    /// Commit the on-screen raster as one undo entry and save it.
    fn finish_stroke(&mut self) {
        if !self.capture.finish() {
            return;
        }
        self.history.commit(self.canvas.snapshot());
        tracing::debug!(undo = self.history.undo_len(), "stroke committed");
        self.persist();
    }

    /// Step back one stroke. Returns false when there is nothing to undo or
    /// a stroke is still being drawn.
    pub fn undo(&mut self) -> bool {
        // The live stroke repaints from its own base, which would bring the
        // undone raster straight back on the next move.
        if self.capture.is_drawing() {
            return false;
        }
        let Some(undone) = self.history.undo() else {
            return false;
        };
        match undone {
            Undone::Repaint(snapshot) => {
                if let Err(e) = self.canvas.put_snapshot(snapshot) {
                    tracing::error!("undo repaint failed: {e}");
                }
            }
            Undone::Cleared => self.canvas.clear(),
        }
        tracing::debug!(undo = self.history.undo_len(), redo = self.history.redo_len(), "undo");
        // An emptied canvas is persisted too, so a reload matches the screen.
        self.persist();
        true
    }

    /// Re-apply the last undone stroke. Returns false when there is nothing to
    /// redo or a stroke is still being drawn.
    pub fn redo(&mut self) -> bool {
        if self.capture.is_drawing() {
            return false;
        }
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        if let Err(e) = self.canvas.put_snapshot(snapshot) {
            tracing::error!("redo repaint failed: {e}");
        }
        tracing::debug!(undo = self.history.undo_len(), redo = self.history.redo_len(), "redo");
        self.persist();
        true
    }

    /// Ask, then drop the drawing and its history and pick a fresh clue.
    pub fn refresh_clue<R: Rng + ?Sized>(&mut self, confirm: &mut dyn Confirm, rng: &mut R) -> bool {
        if !confirm.confirm(NEW_CLUE_PROMPT) {
            return false;
        }
        self.clue = random_clue(rng).to_owned();
        self.wipe();
        tracing::info!(clue = %self.clue, "new clue");
        true
    }

    /// Ask, then drop the drawing and its history. The clue stays.
    pub fn reset(&mut self, confirm: &mut dyn Confirm) -> bool {
        if !confirm.confirm(RESET_PROMPT) {
            return false;
        }
        self.wipe();
        tracing::info!("drawing reset");
        true
    }

    /// Blank canvas, empty stacks, stored state overwritten.
    fn wipe(&mut self) {
        self.capture.finish();
        self.history.clear_all();
        self.canvas.clear();
        self.persist();
    }

    /// Save failures are logged; the drawing on screen stays usable.
    fn persist(&mut self) {
        if let Err(e) = storage::save(&mut self.store, &self.canvas, &self.clue) {
            tracing::error!("failed to save drawing: {e}");
        }
    }

    pub fn select_color(&mut self, color: Color) {
        self.style.color = color;
    }

    pub fn set_stroke_width(&mut self, width: u32) {
        self.style.set_width(width);
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn clue(&self) -> &str {
        &self.clue
    }

    pub fn title(&self) -> String {
        title_for(&self.clue)
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_drawing(&self) -> bool {
        self.capture.is_drawing()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
