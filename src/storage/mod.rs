use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbaImage};
use thiserror::Error;

use crate::raster::{PixelBuffer, RasterError};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to encode image {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("io error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("decoded image is unusable: {source}")]
    InvalidImage {
        #[source]
        source: RasterError,
    },
    #[error("pixel data does not fit a {width}x{height} image")]
    BufferLayout { width: u32, height: u32 },
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

fn buffer_from_dynamic(image: DynamicImage) -> StorageResult<PixelBuffer> {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    PixelBuffer::from_rgba_bytes(width, height, rgba.as_raw())
        .map_err(|source| StorageError::InvalidImage { source })
}

/// Decodes any format the `image` crate recognizes into a pixel buffer.
pub fn load_image(path: &Path) -> StorageResult<PixelBuffer> {
    let image = image::open(path).map_err(|source| StorageError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let buffer = buffer_from_dynamic(image)?;
    tracing::debug!(
        ?path,
        width = buffer.width(),
        height = buffer.height(),
        "image loaded"
    );
    Ok(buffer)
}

/// Encodes `buffer` to `path`, picking the format from the extension.
///
/// Missing parent directories are created. JPEG drops the alpha channel.
pub fn save_image(buffer: &PixelBuffer, path: &Path) -> StorageResult<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StorageError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let (width, height) = (buffer.width(), buffer.height());
    let rgba = RgbaImage::from_raw(width, height, buffer.to_rgba_bytes())
        .ok_or(StorageError::BufferLayout { width, height })?;
    let encode_error = |source| StorageError::Encode {
        path: path.to_path_buf(),
        source,
    };
    match ImageFormat::from_path(path) {
        Ok(ImageFormat::Jpeg) => DynamicImage::ImageRgba8(rgba)
            .to_rgb8()
            .save(path)
            .map_err(encode_error)?,
        _ => rgba.save(path).map_err(encode_error)?,
    }
    tracing::debug!(?path, width, height, "image saved");
    Ok(())
}
