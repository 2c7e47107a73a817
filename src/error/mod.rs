use crate::clipboard::ClipboardError;
use crate::config::ConfigError;
use crate::raster::RasterError;
use crate::storage::StorageError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
    #[error(transparent)]
    Raster(#[from] RasterError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
