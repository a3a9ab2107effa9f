use crate::error::Result;
use crate::palette::{Color, DEFAULT_STROKE_WIDTH};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings read once at start-up. Every field falls back to its default
/// when missing from the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Size of the screen area the canvas is measured against.
    pub viewport: (u32, u32),
    /// Canvas width as a percentage of the viewport width.
    pub canvas_width_pct: u32,
    /// Canvas height as a percentage of the viewport height.
    pub canvas_height_pct: u32,
    /// Initial slider value.
    pub stroke_width: u32,
    pub color: Color,
    /// Where the drawing and clue are kept between runs.
    pub storage_path: PathBuf,
    /// When enabled the logger starts at debug level and honours `RUST_LOG`.
    pub debug_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            viewport: (1280, 800),
            canvas_width_pct: 70,
            canvas_height_pct: 60,
            stroke_width: DEFAULT_STROKE_WIDTH,
            color: Color::default(),
            storage_path: PathBuf::from("draw_the_clue.json"),
            debug_logging: false,
        }
    }
}

impl Config {
    /// Load from `path`. A missing or empty file gives the defaults; any other
    /// read failure is returned.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Pretty-printed so the file stays hand-editable.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Canvas size in pixels, computed once from the viewport. Never zero.
    pub fn canvas_size(&self) -> (usize, usize) {
        let scale = |total: u32, pct: u32| ((total as u64 * pct.min(100) as u64 / 100) as usize).max(1);
        (
            scale(self.viewport.0, self.canvas_width_pct),
            scale(self.viewport.1, self.canvas_height_pct),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn canvas_is_seventy_by_sixty_percent_of_viewport() {
        let config = Config { viewport: (1000, 500), ..Config::default() };
        assert_eq!(config.canvas_size(), (700, 300));
    }

    #[test]
    fn canvas_size_never_collapses_to_zero() {
        let config = Config { viewport: (0, 0), ..Config::default() };
        assert_eq!(config.canvas_size(), (1, 1));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn unreadable_path_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(Config::load(dir.path()), Err(crate::error::Error::Storage(_))));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "stroke_width": 12, "color": "violet" }"#).unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.stroke_width, 12);
        assert_eq!(config.color, Color::Violet);
        assert_eq!(config.viewport, (1280, 800));
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let config = Config { debug_logging: true, viewport: (640, 480), ..Config::default() };
        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
