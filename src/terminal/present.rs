//! Presentation of a raster and a status row as ANSI output.
//!
//! Each terminal cell shows two vertically stacked samples of the raster
//! using the upper-half-block glyph: the foreground paints the top half, the
//! background the bottom half. Each sample is the box-filtered average of the
//! device units it covers.

use super::output::OutputBuffer;
use crate::frame::Rgb;
use crate::layout::Rect;
use crate::surface::RasterSurface;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const UPPER_HALF_BLOCK: char = '▀';

/// How many device units one terminal cell covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGeometry {
    /// Device units per terminal column.
    pub units_per_column: u32,
    /// Device units per terminal row.
    pub units_per_row: u32,
}

impl CellGeometry {
    /// Device-unit area covered by the terminal cell at (`column`, `row`).
    pub const fn area(&self, column: u16, row: u16) -> Rect {
        Rect::new(
            column as u32 * self.units_per_column,
            row as u32 * self.units_per_row,
            self.units_per_column,
            self.units_per_row,
        )
    }
}

/// Encode `rows` x `columns` terminal cells of `raster`, starting at the home
/// position.
///
/// Areas outside the raster show `background`.
pub fn encode_raster(
    raster: &RasterSurface,
    columns: u16,
    rows: u16,
    geometry: CellGeometry,
    background: Rgb,
    out: &mut OutputBuffer,
) {
    for row in 0..rows {
        out.move_to(0, row);
        for column in 0..columns {
            let area = geometry.area(column, row);
            let top_height = area.height / 2;
            let top = Rect::new(area.x, area.y, area.width, top_height);
            let bottom = Rect::new(area.x, area.y + top_height, area.width, area.height - top_height);

            out.pen(
                raster.average(top).unwrap_or(background),
                raster.average(bottom).unwrap_or(background),
            );
            out.glyph(UPPER_HALF_BLOCK);
        }
    }
    out.reset();
}

/// Encode one full-width status row holding `text`.
///
/// Returns the number of columns the text occupies. See [`encode_segments`].
pub fn encode_status(
    out: &mut OutputBuffer,
    row: u16,
    width: u16,
    text: &str,
    fg: Rgb,
    bg: Rgb,
) -> u16 {
    encode_segments(out, row, width, &[(text, fg)], bg)
}

/// Encode one full-width status row of colored segments, left to right.
///
/// Text beyond `width` columns is cut at a grapheme boundary; the rest of the
/// row is padded with `bg`. Control characters show as spaces. Returns the
/// number of columns the text occupies.
pub fn encode_segments<S: AsRef<str>>(
    out: &mut OutputBuffer,
    row: u16,
    width: u16,
    segments: &[(S, Rgb)],
    bg: Rgb,
) -> u16 {
    out.move_to(0, row);

    let limit = usize::from(width);
    let mut used = 0usize;
    'segments: for (text, fg) in segments {
        out.pen(*fg, bg);
        for grapheme in text.as_ref().graphemes(true) {
            let grapheme = if grapheme.chars().any(char::is_control) {
                " "
            } else {
                grapheme
            };
            let w = grapheme.width();
            if used + w > limit {
                break 'segments;
            }
            out.text(grapheme);
            used += w;
        }
    }
    out.pen(Rgb::WHITE, bg);
    for _ in used..limit {
        out.glyph(' ');
    }
    out.reset();

    u16::try_from(used).unwrap_or(width)
}
