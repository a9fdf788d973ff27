//! Layout module: geometry on both sides of the adapter.
//!
//! [`Rect`] is measured in surface device units, [`Boundary`] and
//! [`GridSize`] in engine grid cells.

mod boundary;
mod rect;

pub use boundary::{Boundary, GridSize};
pub use rect::Rect;
