//! Adapter: translates engine draw/input calls into host operations.
//!
//! The adapter owns its [`KeyState`] and hands a clone to the host when it is
//! constructed; from then on the host's key handlers and the engine's polls
//! meet in that state. Draw calls are rasterized onto the host surface
//! immediately, with no retained frame and no diffing.
//!
//! ```text
//!  host key events ──▶ KeyState ◀── get_key / console_in ── engine
//!                                                              │
//!  host surface ◀── fill_rect / fill_circle ◀── draw_camera ───┘
//! ```

use crate::config::AdapterConfig;
use crate::error::{Error, Result};
use crate::frame::{grid_position, Pixel, Rgb};
use crate::input::{Key, KeyState};
use crate::interface::{ClearOutcome, LogType, UserInterface};
use crate::layout::{Boundary, GridSize, Rect};
use crate::surface::Host;
use log::{debug, info, warn};

/// The display/input adapter.
#[derive(Debug)]
pub struct Adapter<H: Host> {
    host: H,
    keys: KeyState,
    config: AdapterConfig,
}

impl<H: Host> Adapter<H> {
    /// Create an adapter with default configuration.
    ///
    /// # Errors
    ///
    /// Fails if the host cannot report a rendering surface.
    pub fn new(host: H) -> Result<Self> {
        Self::with_config(host, AdapterConfig::default())
    }

    /// Create an adapter with custom configuration.
    ///
    /// Registers the key handlers with the host.
    ///
    /// # Errors
    ///
    /// Fails if `config.cell_size` is 0, if the host cannot report a
    /// rendering surface, or if it cannot start its key dispatch.
    pub fn with_config(mut host: H, config: AdapterConfig) -> Result<Self> {
        if config.cell_size == 0 {
            return Err(Error::InvalidConfig("cell size must be non-zero"));
        }

        let size = host.size()?;
        debug!("adapter attached to a {}x{} surface", size.width, size.height);

        let keys = KeyState::new();
        host.attach_keys(keys.clone())?;

        Ok(Self { host, keys, config })
    }

    /// The adapter's key state.
    pub const fn keys(&self) -> &KeyState {
        &self.keys
    }

    /// The adapter's configuration.
    pub const fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Get a reference to the host.
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Get a mutable reference to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Give the host back.
    pub fn into_host(self) -> H {
        self.host
    }
}

fn saturate(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

impl<H: Host> UserInterface for Adapter<H> {
    fn initialize(&mut self) {
        info!("initialize");
    }

    fn finalize(&mut self) {
        info!("finalize");
        self.host.request_close();
    }

    fn refresh(&mut self) -> bool {
        true
    }

    fn get_key(&self) -> Option<Key> {
        let key = self.keys.current();
        debug!("get_key -> {key:?}");
        key
    }

    fn get_size(&mut self) -> Result<GridSize> {
        let surface = self.host.size()?;
        let cell = self.config.cell_size;
        let rows = (surface.height / cell).saturating_add(u32::from(self.config.status_margin));
        let size = GridSize::new(saturate(rows), saturate(surface.width / cell));
        debug!("get_size {surface:?} -> {size:?}");
        Ok(size)
    }

    fn draw_camera(
        &mut self,
        dim_x: u16,
        dim_y: u16,
        buffer: &[Pixel],
        _show_cursors: bool,
        _boundary: &Boundary,
    ) -> Result<()> {
        let expected = usize::from(dim_x) * usize::from(dim_y);
        if buffer.len() != expected {
            return Err(Error::FrameLength {
                expected,
                actual: buffer.len(),
            });
        }

        let cell = self.config.cell_size;
        let available = self.host.size()?;
        let fits = |cells: u16, units: u32| {
            u32::from(cells)
                .checked_mul(cell)
                .is_some_and(|needed| needed <= units)
        };
        if !fits(dim_y, available.width) || !fits(dim_x, available.height) {
            return Err(Error::SurfaceTooSmall {
                available,
                rows: dim_x,
                columns: dim_y,
                cell_size: cell,
            });
        }

        debug!("draw_camera {dim_x}x{dim_y}");
        let half = cell / 2;
        for (index, pixel) in buffer.iter().enumerate() {
            let (row, col) = grid_position(index, dim_y);
            // In range: the frame was checked to fit on the surface above.
            #[allow(clippy::cast_possible_truncation)]
            let (x, y) = (col as u32 * cell, row as u32 * cell);

            self.host.fill_rect(Rect::square(x, y, cell), pixel.color);
            if pixel.has_cursor {
                self.host.fill_circle(
                    x + half,
                    y + half,
                    self.config.cursor_radius,
                    self.config.cursor_color,
                );
            }
        }

        self.host.present()
    }

    fn draw_paragraph(&mut self, paragraph: &str, _boundary: &Boundary) -> Result<()> {
        debug!("draw_paragraph {paragraph:?}");
        self.host.show_status(paragraph, self.config.paragraph_color)
    }

    fn draw_statusline(&mut self, segments: &[(String, Rgb)], _boundary: &Boundary) -> Result<()> {
        debug!("draw_statusline {} segments", segments.len());
        self.host.show_segments(segments)
    }

    fn console_in(
        &mut self,
        message: &str,
        _discard_key: &Key,
        _boundary: &Boundary,
    ) -> Result<Option<String>> {
        debug!("console_in {message:?}");
        self.keys.clear();
        self.host.read_line(message)
    }

    fn console_out(
        &mut self,
        message: &str,
        log_type: LogType,
        _boundary: &Boundary,
    ) -> Result<()> {
        debug!("console_out {log_type:?} {message:?}");
        self.host.show_status(message, log_type.color())
    }

    fn clear(&mut self, boundary: &Boundary) -> ClearOutcome {
        warn!("clear {boundary:?}: erasure not implemented");
        ClearOutcome::NotImplemented
    }

    fn clear_all(&mut self) -> ClearOutcome {
        warn!("clear_all: erasure not implemented");
        ClearOutcome::NotImplemented
    }
}
