use std::borrow::Cow;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::raster::{PixelBuffer, RasterError};
use crate::storage::{self, StorageError};

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("system clipboard is unavailable: {source}")]
    Unavailable {
        #[source]
        source: arboard::Error,
    },
    #[error("clipboard holds no image")]
    NoImage,
    #[error("clipboard {operation} failed: {source}")]
    Backend {
        operation: &'static str,
        #[source]
        source: arboard::Error,
    },
    #[error("clipboard image has invalid dimensions: {source}")]
    InvalidImage {
        #[source]
        source: RasterError,
    },
    #[error("failed to load image path from clipboard {path}: {source}")]
    PathImage {
        path: PathBuf,
        #[source]
        source: StorageError,
    },
}

pub type ClipboardResult<T> = std::result::Result<T, ClipboardError>;

pub trait ClipboardBackend {
    fn read_image(&self) -> ClipboardResult<PixelBuffer>;
    fn write_image(&self, image: &PixelBuffer) -> ClipboardResult<()>;
}

/// OS clipboard through `arboard`. A connection is opened per call.
#[derive(Debug, Default)]
pub struct SystemClipboard;

fn open_clipboard() -> ClipboardResult<arboard::Clipboard> {
    arboard::Clipboard::new().map_err(|source| ClipboardError::Unavailable { source })
}

/// Clipboard text naming an existing file, as left by file managers.
fn image_path_from_text(text: &str) -> Option<PathBuf> {
    let line = text.lines().next()?.trim().trim_matches('"');
    let line = line.strip_prefix("file://").unwrap_or(line);
    if line.is_empty() {
        return None;
    }
    let path = Path::new(line);
    path.is_file().then(|| path.to_path_buf())
}

fn buffer_from_image_data(data: &arboard::ImageData<'_>) -> ClipboardResult<PixelBuffer> {
    let width = u32::try_from(data.width).unwrap_or(u32::MAX);
    let height = u32::try_from(data.height).unwrap_or(u32::MAX);
    PixelBuffer::from_rgba_bytes(width, height, &data.bytes)
        .map_err(|source| ClipboardError::InvalidImage { source })
}

impl ClipboardBackend for SystemClipboard {
    fn read_image(&self) -> ClipboardResult<PixelBuffer> {
        let mut clipboard = open_clipboard()?;
        match clipboard.get_image() {
            Ok(data) => buffer_from_image_data(&data),
            Err(arboard::Error::ContentNotAvailable) => {
                let text = clipboard.get_text().map_err(|_| ClipboardError::NoImage)?;
                let path = image_path_from_text(&text).ok_or(ClipboardError::NoImage)?;
                tracing::debug!(?path, "clipboard text names an image file");
                storage::load_image(&path)
                    .map_err(|source| ClipboardError::PathImage { path, source })
            }
            Err(source) => Err(ClipboardError::Backend {
                operation: "read",
                source,
            }),
        }
    }

    fn write_image(&self, image: &PixelBuffer) -> ClipboardResult<()> {
        let mut clipboard = open_clipboard()?;
        clipboard
            .set_image(arboard::ImageData {
                width: image.width() as usize,
                height: image.height() as usize,
                bytes: Cow::Owned(image.to_rgba_bytes()),
            })
            .map_err(|source| ClipboardError::Backend {
                operation: "write",
                source,
            })
    }
}
