//! Grid-unit geometry exchanged with the engine.

/// A rectangular region of the engine's layout, in grid cells.
///
/// Every draw and clear call carries one. The adapter accepts it and does
/// not apply it: no offset, no clipping.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct Boundary {
    /// Column of the top-left corner.
    pub x: u16,
    /// Row of the top-left corner.
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Boundary {
    /// Create a new boundary.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }
}

/// Grid dimensions reported by [`get_size`](crate::UserInterface::get_size).
///
/// `rows` already includes the margin reserved for the status line.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct GridSize {
    /// Row count, including the status margin.
    pub rows: u16,
    /// Column count.
    pub columns: u16,
}

impl GridSize {
    /// Create a new grid size.
    #[inline]
    pub const fn new(rows: u16, columns: u16) -> Self {
        Self { rows, columns }
    }

    /// `[rows, columns]`, the order the engine expects.
    #[inline]
    pub const fn to_array(self) -> [u16; 2] {
        [self.rows, self.columns]
    }
}

impl From<GridSize> for [u16; 2] {
    fn from(size: GridSize) -> Self {
        size.to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_size_order() {
        let size = GridSize::new(16, 8);
        let pair: [u16; 2] = size.into();
        assert_eq!(pair, [16, 8]);
        assert_eq!(size.to_array(), pair);
    }
}
