// Local key/value persistence for the committed drawing and the active clue.
//
// Only the latest committed frame survives a restart; undo/redo history
// lives in memory.
// Visual: on the next launch the canvas opens showing that frame, titled
// with the saved clue.

use crate::canvas::Canvas;
use crate::error::{Error, Result};
use crate::types::Snapshot;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{ImageFormat, RgbaImage};
use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::PathBuf;

pub const IMAGE_KEY: &str = "image";
pub const CLUE_KEY: &str = "clue";

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// String-valued key/value storage.
///
/// Reads are served from memory; a failed write is the only interesting error.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
}

/// Volatile store, handy for tests and throwaway sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }
}

/// A JSON object on disk. Every write goes straight through to the file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open `path`; a missing or empty file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };
        // A file truncated to nothing reads the same as a fresh one.
        let entries = if content.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_json::from_str(&content)?
        };
        Ok(Self { path, entries })
    }

    /// Rewrite the whole file. Entries are few and small: one PNG and one clue.
    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(&self.entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_owned(), value);
        self.flush()
    }
}

/// Encode a raster as a PNG data URL.
pub fn encode_image(snapshot: &Snapshot) -> Result<String> {
    let image = RgbaImage::from_raw(snapshot.width as u32, snapshot.height as u32, snapshot.pixels.clone())
        .ok_or(Error::SizeMismatch {
            expected: (snapshot.width, snapshot.height),
            actual: (snapshot.pixels.len() / (4 * snapshot.height.max(1)), snapshot.height),
        })?;
    let mut png = Vec::new();
    image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(format!("{DATA_URL_PREFIX}{}", STANDARD.encode(png)))
}

/// Decode a PNG data URL back into a raster.
pub fn decode_image(data_url: &str) -> Result<Snapshot> {
    let payload = data_url
        .strip_prefix(DATA_URL_PREFIX)
        .ok_or_else(|| Error::DataUrl("expected a base64 PNG data url".into()))?;
    // Tolerate a trailing newline from hand-edited store files.
    let png = STANDARD.decode(payload.trim()).map_err(|e| Error::DataUrl(e.to_string()))?;
    let image = image::load_from_memory_with_format(&png, ImageFormat::Png)?.into_rgba8();
    let (w, h) = image.dimensions();
    Ok(Snapshot { width: w as usize, height: h as usize, pixels: image.into_raw() })
}

/// Write the current raster and clue.
pub fn save(store: &mut impl KeyValueStore, canvas: &Canvas, clue: &str) -> Result<()> {
    let image = encode_image(&canvas.snapshot())?;
    let bytes = image.len();
    store.set(IMAGE_KEY, image)?;
    store.set(CLUE_KEY, clue.to_owned())?;
    tracing::debug!(bytes, clue, "saved drawing");
    Ok(())
}

/// What a previous session left behind. Either part may be missing.
#[derive(Debug, Default, PartialEq)]
pub struct Restored {
    pub image: Option<Snapshot>,
    pub clue: Option<String>,
}

/// Read back the persisted state.
///
/// No stored image means nothing was ever committed, so the clue is not
/// restored either. An image that fails to decode is logged and skipped; its
/// clue still comes back.
pub fn restore(store: &impl KeyValueStore) -> Result<Restored> {
    let Some(data_url) = store.get(IMAGE_KEY)? else {
        return Ok(Restored::default());
    };
    let image = match decode_image(&data_url) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            tracing::warn!("ignoring stored image: {e}");
            None
        }
    };
    Ok(Restored { image, clue: store.get(CLUE_KEY)? })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Point, Rgba};
    use tempfile::tempdir;

    fn sample_canvas() -> Canvas {
        let mut canvas = Canvas::new(24, 16);
        canvas.stroke_path(
            &[Point::new(2.0, 2.0), Point::new(12.0, 4.0), Point::new(20.0, 14.0)],
            4,
            Rgba::opaque(0, 0, 255),
        );
        canvas
    }

    #[test]
    fn image_encoding_is_lossless() {
        let snap = sample_canvas().snapshot();
        let url = encode_image(&snap).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(decode_image(&url).unwrap(), snap);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(decode_image("hello"), Err(Error::DataUrl(_))));
        assert!(matches!(decode_image("data:image/png;base64,!!!"), Err(Error::DataUrl(_))));
        let not_png = format!("data:image/png;base64,{}", STANDARD.encode(b"nope"));
        assert!(matches!(decode_image(&not_png), Err(Error::Image(_))));
    }

    #[test]
    fn restore_from_empty_store_is_blank() {
        let restored = restore(&MemoryStore::default()).unwrap();
        assert_eq!(restored, Restored::default());
    }

    #[test]
    fn restore_treats_bad_image_as_absent_but_keeps_clue() {
        let mut store = MemoryStore::default();
        store.set(IMAGE_KEY, "data:text/plain,hi".into()).unwrap();
        store.set(CLUE_KEY, "Cat".into()).unwrap();
        let restored = restore(&store).unwrap();
        assert!(restored.image.is_none());
        assert_eq!(restored.clue.as_deref(), Some("Cat"));
    }

    #[test]
    fn clue_without_image_is_not_restored() {
        let mut store = MemoryStore::default();
        store.set(CLUE_KEY, "Cat".into()).unwrap();
        assert_eq!(restore(&store).unwrap(), Restored::default());
    }

    #[test]
    fn save_then_restore_is_pixel_identical() {
        let canvas = sample_canvas();
        let mut store = MemoryStore::default();
        save(&mut store, &canvas, "Wolf").unwrap();

        let restored = restore(&store).unwrap();
        assert_eq!(restored.image, Some(canvas.snapshot()));
        assert_eq!(restored.clue.as_deref(), Some("Wolf"));
    }

    #[test]
    fn json_file_store_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get(CLUE_KEY).unwrap(), None);
        store.set(CLUE_KEY, "Mouse".into()).unwrap();
        store.set("other", "x".into()).unwrap();
        store.set("other", "y".into()).unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get(CLUE_KEY).unwrap().as_deref(), Some("Mouse"));
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("y"));
    }

    #[test]
    fn json_file_store_rejects_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(JsonFileStore::open(&path), Err(Error::Json(_))));
    }
}
