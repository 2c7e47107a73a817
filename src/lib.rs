pub mod cli;
pub mod clipboard;
pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod raster;
pub mod render;
pub mod storage;

pub use editor::ImageEditor;
pub use error::{AppError, AppResult};
