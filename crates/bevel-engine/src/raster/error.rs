use std::fmt;
use std::path::{Path, PathBuf};

/// Error returned by [`Image::save_png`](super::Image::save_png).
#[derive(Debug, Clone)]
pub struct ImageSaveError {
    pub path: PathBuf,
    pub message: String,
}

impl ImageSaveError {
    pub(crate) fn new(path: &Path, message: impl Into<String>) -> Self {
        Self { path: path.to_path_buf(), message: message.into() }
    }
}

impl fmt::Display for ImageSaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to save image to {}: {}", self.path.display(), self.message)
    }
}

impl std::error::Error for ImageSaveError {}
