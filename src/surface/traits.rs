//! Host capabilities the adapter paints and prompts through.

use crate::error::Result;
use crate::frame::Rgb;
use crate::input::KeyState;
use crate::layout::Rect;

/// Physical size of a rendering surface, in device units.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct SurfaceSize {
    /// Width in device units.
    pub width: u32,
    /// Height in device units.
    pub height: u32,
}

impl SurfaceSize {
    /// Create a new surface size.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A rectangular pixel-rendering surface.
///
/// Paint operations clip to the surface; they never fail. Hosts that buffer
/// paint operations make them visible in [`present`](Surface::present).
pub trait Surface {
    /// Query the current physical size.
    ///
    /// Called on every size negotiation; implementations must not cache a
    /// stale value across host resizes.
    fn size(&mut self) -> Result<SurfaceSize>;

    /// Fill `rect` with an opaque color.
    fn fill_rect(&mut self, rect: Rect, color: Rgb);

    /// Fill the disc of `radius` centred on (`cx`, `cy`).
    fn fill_circle(&mut self, cx: u32, cy: u32, radius: u32, color: Rgb);

    /// Make everything painted so far visible.
    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A one-line status/message region.
pub trait StatusLine {
    /// Replace the whole region content with `text`.
    fn show_status(&mut self, text: &str, color: Rgb) -> Result<()>;

    /// Replace the whole region content with colored segments, left to right.
    fn show_segments(&mut self, segments: &[(String, Rgb)]) -> Result<()>;
}

/// The host's native blocking line prompt.
pub trait Prompt {
    /// Show `message` and block until the user submits a line or cancels.
    ///
    /// Cancellation is `Ok(None)`.
    fn read_line(&mut self, message: &str) -> Result<Option<String>>;
}

/// Everything an adapter needs from its host.
pub trait Host: Surface + StatusLine + Prompt {
    /// Wire the host's key-press/key-release dispatch to `keys`.
    ///
    /// Called once, while the adapter is constructed. A host that cannot
    /// start its input dispatch reports it here.
    fn attach_keys(&mut self, keys: KeyState) -> Result<()>;

    /// Ask the host to tear down its window/session.
    fn request_close(&mut self);
}
