//! The contract an editing engine drives its display through.

use crate::error::Result;
use crate::frame::{Pixel, Rgb};
use crate::input::Key;
use crate::layout::{Boundary, GridSize};

/// Severity of a message written with [`UserInterface::console_out`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogType {
    /// Neutral information.
    Info,
    /// A failed operation.
    Error,
    /// Something the user should look at.
    Warning,
    /// A completed operation.
    Success,
}

impl LogType {
    /// Text color for messages of this type.
    pub const fn color(self) -> Rgb {
        match self {
            Self::Info => Rgb::new(240, 240, 240),
            Self::Error => Rgb::new(255, 70, 70),
            Self::Warning => Rgb::new(70, 235, 235),
            Self::Success => Rgb::new(70, 255, 70),
        }
    }
}

/// Result of a clear request.
///
/// Erasure is not implemented yet; callers get an explicit marker instead of
/// a silent success.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// Nothing was erased.
    NotImplemented,
}

impl ClearOutcome {
    /// Whether the surface was actually erased.
    pub const fn erased(self) -> bool {
        match self {
            Self::NotImplemented => false,
        }
    }
}

/// Display and input operations an engine calls.
///
/// All calls are synchronous and made from a single thread of control.
/// Only [`console_in`](UserInterface::console_in) blocks.
pub trait UserInterface {
    /// Prepare for use. Idempotent.
    fn initialize(&mut self);

    /// End the session and ask the host to close. Must be the last call.
    fn finalize(&mut self);

    /// Whether the surface is ready for drawing.
    ///
    /// No staleness check is performed; this always answers `true`.
    fn refresh(&mut self) -> bool;

    /// The most recently pressed key, if one is held. Does not consume it.
    fn get_key(&self) -> Option<Key>;

    /// Current grid size, recomputed from the surface on every call.
    fn get_size(&mut self) -> Result<GridSize>;

    /// Paint a full frame of `dim_x` rows by `dim_y` columns.
    ///
    /// `buffer` is row-major and must hold exactly `dim_x * dim_y` pixels.
    /// `show_cursors` and `boundary` are accepted and currently ignored:
    /// cursor overlays are always drawn and nothing is offset or clipped.
    fn draw_camera(
        &mut self,
        dim_x: u16,
        dim_y: u16,
        buffer: &[Pixel],
        show_cursors: bool,
        boundary: &Boundary,
    ) -> Result<()>;

    /// Replace the status line text. `boundary` is ignored.
    fn draw_paragraph(&mut self, paragraph: &str, boundary: &Boundary) -> Result<()>;

    /// Replace the status line with colored segments, shown left to right.
    /// `boundary` is ignored.
    fn draw_statusline(&mut self, segments: &[(String, Rgb)], boundary: &Boundary) -> Result<()>;

    /// Ask the user for one line of text, blocking until submit or cancel.
    ///
    /// The key slot is reset to none before blocking. `discard_key` and
    /// `boundary` are accepted and currently ignored.
    fn console_in(
        &mut self,
        message: &str,
        discard_key: &Key,
        boundary: &Boundary,
    ) -> Result<Option<String>>;

    /// Show a message in the status line, colored by `log_type`.
    fn console_out(&mut self, message: &str, log_type: LogType, boundary: &Boundary)
        -> Result<()>;

    /// Erase a region. Not implemented.
    fn clear(&mut self, boundary: &Boundary) -> ClearOutcome;

    /// Erase the whole surface. Not implemented.
    fn clear_all(&mut self) -> ClearOutcome;
}
