// Every variant states *where* things went wrong.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("window init error: {0}")]
    WindowInit(String), // Creating the window failed
    #[error("window update error: {0}")]
    WindowUpdate(String), // Pushing the frame buffer failed
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("storage format error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),
    #[error("malformed data url: {0}")]
    DataUrl(String),
    #[error("raster size mismatch: expected {expected:?}, got {actual:?}")]
    SizeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
}

pub type Result<T> = std::result::Result<T, Error>;
