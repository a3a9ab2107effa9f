use crate::types::Snapshot;

/// What the canvas should show after an undo.
#[derive(Debug, PartialEq)]
pub enum Undone<'a> {
    /// Repaint from the new top of the undo stack.
    Repaint(&'a Snapshot),
    /// The undo stack drained; show an empty canvas.
    Cleared,
}

/// Linear undo/redo over committed raster states. Snapshots move between
/// the two stacks and are never shared.
///
/// Visual: the canvas always equals the top of `undo_stack`, or is blank
/// when it is empty.
#[derive(Debug, Default)]
pub struct History {
    /// Committed frames, newest last.
    undo_stack: Vec<Snapshot>,
    /// Frames taken back by undo, newest last.
    redo_stack: Vec<Snapshot>,
}

impl History {
    /// Record a finished stroke. Anything that was undone is gone for good.
    pub fn commit(&mut self, snapshot: Snapshot) {
        self.undo_stack.push(snapshot);
        self.redo_stack.clear();
    }

    /// Move the newest frame onto the redo stack. `None` when there is nothing
    /// to take back.
    pub fn undo(&mut self) -> Option<Undone<'_>> {
        let top = self.undo_stack.pop()?;
        self.redo_stack.push(top);
        Some(match self.undo_stack.last() {
            Some(snapshot) => Undone::Repaint(snapshot),
            None => Undone::Cleared,
        })
    }

    /// Bring the newest undone frame back and return it for repainting.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let restored = self.redo_stack.pop()?;
        self.undo_stack.push(restored);
        self.undo_stack.last()
    }

    /// Forget everything (new clue or reset).
    pub fn clear_all(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Most recently committed state.
    pub fn current(&self) -> Option<&Snapshot> {
        self.undo_stack.last()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }
}
