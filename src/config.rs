//! Adapter configuration.

use crate::frame::Rgb;

/// Configuration for the [`Adapter`](crate::Adapter).
///
/// The defaults reproduce the fixed geometry engines are written against:
/// 10-unit cells, a 3-row status margin, and a white radius-3 cursor dot.
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    /// Device units per cell edge. Must be non-zero.
    pub cell_size: u32,
    /// Rows added to the reported grid height for the status line.
    pub status_margin: u16,
    /// Radius of the cursor overlay, in device units.
    pub cursor_radius: u32,
    /// Fill color of the cursor overlay.
    pub cursor_color: Rgb,
    /// Text color used by `draw_paragraph`.
    pub paragraph_color: Rgb,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            cell_size: 10,
            status_margin: 3,
            cursor_radius: 3,
            cursor_color: Rgb::WHITE,
            paragraph_color: Rgb::new(240, 240, 240),
        }
    }
}
