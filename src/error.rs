//! Error type shared by the adapter and its hosts.

use crate::surface::SurfaceSize;

/// Errors reported by the adapter.
///
/// Every variant is a fault the supervising session has to see. Cancelled
/// prompts and the unimplemented clear operations are normal outcomes and
/// never show up here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The host has no rendering surface to paint into.
    #[error("rendering surface is not available: {0}")]
    MissingSurface(String),

    /// The adapter configuration cannot be used.
    #[error("invalid adapter configuration: {0}")]
    InvalidConfig(&'static str),

    /// The frame does not fit on the surface.
    #[error("surface of {available:?} cannot hold a {rows}x{columns} frame of {cell_size}-unit cells")]
    SurfaceTooSmall {
        /// Size the host reported, in device units.
        available: SurfaceSize,
        /// Frame rows (`dim_x`).
        rows: u16,
        /// Frame columns (`dim_y`).
        columns: u16,
        /// Device units per cell edge.
        cell_size: u32,
    },

    /// The frame buffer length is not `dim_x * dim_y`.
    #[error("frame buffer holds {actual} pixels, expected {expected}")]
    FrameLength {
        /// `dim_x * dim_y`.
        expected: usize,
        /// Length of the buffer that was passed.
        actual: usize,
    },

    /// The host input channel went away while a prompt was waiting on it.
    #[error("input channel closed")]
    InputClosed,

    /// Terminal I/O failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
