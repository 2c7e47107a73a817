//! Owned pixel storage, immutable snapshots and whole-buffer pixel transforms.

mod buffer;
mod ops;
mod snapshot;

pub use buffer::PixelBuffer;
pub use ops::RasterOp;
pub use snapshot::Snapshot;

use thiserror::Error;

pub type RasterResult<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    #[error("buffer dimensions must be non-zero, got {width}x{height}")]
    EmptyDimensions { width: u32, height: u32 },
    #[error("expected {expected} values for a {width}x{height} buffer, got {actual}")]
    LengthMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}
