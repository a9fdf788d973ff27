//! Pixel: one cell of a frame handed over by the engine.

use super::color::Rgb;

/// A single frame cell.
///
/// Produced by the engine for every frame and consumed once by
/// [`draw_camera`](crate::UserInterface::draw_camera); the adapter keeps no
/// reference to it after painting.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Hash)]
pub struct Pixel {
    /// Fill color of the cell.
    pub color: Rgb,
    /// Whether one of the engine's cursors sits on this cell.
    pub has_cursor: bool,
}

impl Pixel {
    /// Create a pixel without a cursor.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self {
            color: Rgb::new(r, g, b),
            has_cursor: false,
        }
    }

    /// Builder: set the cursor flag.
    #[inline]
    #[must_use]
    pub const fn with_cursor(mut self, has_cursor: bool) -> Self {
        self.has_cursor = has_cursor;
        self
    }
}

impl From<Rgb> for Pixel {
    #[inline]
    fn from(color: Rgb) -> Self {
        Self {
            color,
            has_cursor: false,
        }
    }
}

/// Map a row-major buffer index to its `(row, column)` grid position.
///
/// `dim_y` is the number of columns per row.
#[inline]
pub const fn grid_position(index: usize, dim_y: u16) -> (usize, usize) {
    let columns = dim_y as usize;
    (index / columns, index % columns)
}
