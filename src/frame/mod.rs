//! Frame module: what the engine hands over on every render call.
//!
//! - [`Rgb`]: true-color value painted onto the surface
//! - [`Pixel`]: one frame cell (color + cursor flag)
//! - [`grid_position`]: row-major index to grid coordinates

mod color;
mod pixel;

pub use color::Rgb;
pub use pixel::{grid_position, Pixel};
