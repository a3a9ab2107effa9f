//! Draw The Clue: a freehand drawing game with a random clue, smoothed
//! strokes, raster undo/redo and a persisted canvas.

pub mod canvas;
pub mod clue;
pub mod config;
pub mod curve;
pub mod draw;
pub mod error;
pub mod history;
pub mod input;
pub mod logging;
pub mod palette;
pub mod session;
pub mod storage;
pub mod types;
pub mod ui;

pub use error::{Error, Result};
pub use session::{Confirm, DrawingSession};
