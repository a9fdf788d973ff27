//! HeadlessHost: an in-memory host.
//!
//! Paints into a [`RasterSurface`], keeps the status text in a string,
//! answers prompts from a script, and records every paint operation so
//! callers can check exactly what was drawn where.

use super::raster::RasterSurface;
use super::traits::{Host, Prompt, StatusLine, Surface, SurfaceSize};
use crate::error::{Error, Result};
use crate::frame::Rgb;
use crate::input::{Key, KeyState};
use crate::layout::Rect;
use std::collections::VecDeque;

/// One primitive paint operation, as received by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintOp {
    /// An opaque rectangle fill.
    Rect {
        /// Filled area.
        rect: Rect,
        /// Fill color.
        color: Rgb,
    },
    /// A filled disc.
    Circle {
        /// Centre x.
        cx: u32,
        /// Centre y.
        cy: u32,
        /// Radius.
        radius: u32,
        /// Fill color.
        color: Rgb,
    },
}

/// A host that lives entirely in memory.
#[derive(Debug)]
pub struct HeadlessHost {
    /// `None` models a host environment without a rendering surface.
    raster: Option<RasterSurface>,
    ops: Vec<PaintOp>,
    presents: usize,
    status: String,
    status_color: Rgb,
    segments: Vec<(String, Rgb)>,
    answers: VecDeque<Option<String>>,
    prompts: Vec<String>,
    /// Slot value observed at the moment each prompt opened.
    slot_at_prompt: Vec<Option<Key>>,
    keys: Option<KeyState>,
    closed: bool,
}

impl HeadlessHost {
    /// Create a host with a black surface of the given device size.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_surface(Some(RasterSurface::new(width, height)))
    }

    /// Create a host that has no rendering surface at all.
    pub fn without_surface() -> Self {
        Self::with_surface(None)
    }

    fn with_surface(raster: Option<RasterSurface>) -> Self {
        Self {
            raster,
            ops: Vec::new(),
            presents: 0,
            status: String::new(),
            status_color: Rgb::WHITE,
            segments: Vec::new(),
            answers: VecDeque::new(),
            prompts: Vec::new(),
            slot_at_prompt: Vec::new(),
            keys: None,
            closed: false,
        }
    }

    /// Resize the surface, as a host window resize would.
    pub fn resize(&mut self, width: u32, height: u32) {
        if let Some(raster) = self.raster.as_mut() {
            raster.resize(width, height);
        }
    }

    /// Queue the answer for the next prompt (`None` = user cancels).
    pub fn push_answer(&mut self, answer: Option<&str>) {
        self.answers.push_back(answer.map(str::to_string));
    }

    /// Dispatch a key-press notification to the attached key state.
    ///
    /// Returns `false` if no key state is attached yet.
    pub fn press(&self, key: Key) -> bool {
        let Some(keys) = self.keys.as_ref() else {
            return false;
        };
        keys.press(key);
        true
    }

    /// Dispatch a key-release notification to the attached key state.
    pub fn release(&self, key: Key) -> bool {
        let Some(keys) = self.keys.as_ref() else {
            return false;
        };
        keys.release(key);
        true
    }

    /// The surface raster, if the host has one.
    pub const fn raster(&self) -> Option<&RasterSurface> {
        self.raster.as_ref()
    }

    /// Paint operations received so far.
    pub fn ops(&self) -> &[PaintOp] {
        &self.ops
    }

    /// Drain the recorded paint operations.
    pub fn take_ops(&mut self) -> Vec<PaintOp> {
        std::mem::take(&mut self.ops)
    }

    /// How many times the surface was presented.
    pub const fn presents(&self) -> usize {
        self.presents
    }

    /// Current status text.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Color of the current status text, or of its first segment.
    pub const fn status_color(&self) -> Rgb {
        self.status_color
    }

    /// The current status line as colored segments.
    pub fn status_segments(&self) -> &[(String, Rgb)] {
        &self.segments
    }

    /// Messages of every prompt opened so far.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Key slot value seen when each prompt opened.
    pub fn slot_at_prompt(&self) -> &[Option<Key>] {
        &self.slot_at_prompt
    }

    /// Whether the key state has been attached.
    pub const fn is_attached(&self) -> bool {
        self.keys.is_some()
    }

    /// Whether close was requested.
    pub const fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Surface for HeadlessHost {
    fn size(&mut self) -> Result<SurfaceSize> {
        self.raster
            .as_mut()
            .ok_or_else(|| Error::MissingSurface("headless host has no raster".to_string()))?
            .size()
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.ops.push(PaintOp::Rect { rect, color });
        if let Some(raster) = self.raster.as_mut() {
            raster.fill_rect(rect, color);
        }
    }

    fn fill_circle(&mut self, cx: u32, cy: u32, radius: u32, color: Rgb) {
        self.ops.push(PaintOp::Circle { cx, cy, radius, color });
        if let Some(raster) = self.raster.as_mut() {
            raster.fill_circle(cx, cy, radius, color);
        }
    }

    fn present(&mut self) -> Result<()> {
        self.presents += 1;
        Ok(())
    }
}

impl StatusLine for HeadlessHost {
    fn show_status(&mut self, text: &str, color: Rgb) -> Result<()> {
        self.show_segments(&[(text.to_string(), color)])
    }

    fn show_segments(&mut self, segments: &[(String, Rgb)]) -> Result<()> {
        self.status = segments.iter().map(|(text, _)| text.as_str()).collect();
        self.status_color = segments.first().map_or(Rgb::WHITE, |(_, color)| *color);
        segments.clone_into(&mut self.segments);
        Ok(())
    }
}

impl Prompt for HeadlessHost {
    fn read_line(&mut self, message: &str) -> Result<Option<String>> {
        self.prompts.push(message.to_string());
        self.slot_at_prompt
            .push(self.keys.as_ref().and_then(KeyState::current));
        // An exhausted script behaves like a user dismissing the prompt.
        Ok(self.answers.pop_front().flatten())
    }
}

impl Host for HeadlessHost {
    fn attach_keys(&mut self, keys: KeyState) -> Result<()> {
        self.keys = Some(keys);
        Ok(())
    }

    fn request_close(&mut self) {
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_and_paints() {
        let mut host = HeadlessHost::new(20, 20);
        host.fill_rect(Rect::square(0, 0, 10), Rgb::RED);
        host.fill_circle(5, 5, 3, Rgb::WHITE);

        assert_eq!(host.ops().len(), 2);
        let raster = host.raster().unwrap();
        assert_eq!(raster.get(0, 0), Some(Rgb::RED));
        assert_eq!(raster.get(5, 5), Some(Rgb::WHITE));
        assert_eq!(host.take_ops().len(), 2);
        assert!(host.ops().is_empty());
    }

    #[test]
    fn test_missing_surface() {
        let mut host = HeadlessHost::without_surface();
        assert!(matches!(host.size(), Err(Error::MissingSurface(_))));
    }

    #[test]
    fn test_scripted_prompt() {
        let mut host = HeadlessHost::new(10, 10);
        host.push_answer(Some("blue"));
        host.push_answer(None);

        assert_eq!(host.read_line("color: ").unwrap().as_deref(), Some("blue"));
        assert_eq!(host.read_line("again: ").unwrap(), None);
        assert_eq!(host.read_line("script done: ").unwrap(), None);
        assert_eq!(host.prompts(), ["color: ", "again: ", "script done: "]);
    }

    #[test]
    fn test_key_dispatch_needs_attach() {
        let mut host = HeadlessHost::new(10, 10);
        assert!(!host.press(Key::char('a')));

        let keys = KeyState::new();
        host.attach_keys(keys.clone()).unwrap();
        assert!(host.press(Key::char('a')));
        assert_eq!(keys.current(), Some(Key::char('a')));
        assert!(host.release(Key::char('a')));
        assert_eq!(keys.current(), None);
    }
}
