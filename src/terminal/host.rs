//! Terminal host: renders the raster into a crossterm terminal.

use super::editor::LineEditor;
use super::input::InputActor;
use super::output::OutputBuffer;
use super::present::{encode_raster, encode_segments, encode_status, CellGeometry};
use super::prompt::{encode_prompt, run_prompt, PromptKeys};
use crate::error::{Error, Result};
use crate::frame::Rgb;
use crate::input::{Key, KeyCode, KeyState};
use crate::layout::Rect;
use crate::surface::{Host, Prompt, RasterSurface, StatusLine, Surface, SurfaceSize};
use crossbeam_channel::{bounded, Receiver};
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, info};
use std::io::{self, Stdout};
use std::time::Duration;

/// Configuration for the terminal host.
#[derive(Debug, Clone)]
pub struct TerminalConfig {
    /// Input poll timeout.
    pub input_poll_timeout: Duration,
    /// Whether to use alternate screen buffer.
    pub alternate_screen: bool,
    /// Device units covered by one terminal column.
    pub units_per_column: u32,
    /// Device units covered by one terminal row.
    pub units_per_row: u32,
    /// Terminal rows reserved below the canvas for the status line.
    pub status_rows: u16,
    /// Delay after which a press is released when the terminal cannot
    /// report key releases.
    pub synthetic_release: Duration,
    /// Key that cancels a prompt.
    pub cancel_key: Key,
    /// Key that submits a prompt.
    pub submit_key: Key,
    /// Status line background.
    pub status_bg: Rgb,
    /// Prompt message color.
    pub prompt_fg: Rgb,
    /// Prompt input color.
    pub input_fg: Rgb,
    /// Color shown where the canvas has no pixels.
    pub background: Rgb,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            input_poll_timeout: Duration::from_millis(10),
            alternate_screen: true,
            units_per_column: 5,
            units_per_row: 10,
            status_rows: 1,
            synthetic_release: Duration::from_millis(150),
            cancel_key: Key::plain(KeyCode::Esc),
            submit_key: Key::plain(KeyCode::Enter),
            status_bg: Rgb::new(40, 40, 40),
            prompt_fg: Rgb::new(0, 255, 255),
            input_fg: Rgb::WHITE,
            background: Rgb::BLACK,
        }
    }
}

impl TerminalConfig {
    /// Keys that end a prompt.
    pub const fn prompt_keys(&self) -> PromptKeys {
        PromptKeys {
            submit: self.submit_key,
            cancel: self.cancel_key,
        }
    }

    const fn geometry(&self) -> CellGeometry {
        CellGeometry {
            units_per_column: self.units_per_column,
            units_per_row: self.units_per_row,
        }
    }

    /// Canvas size in device units for a terminal of `columns` x `rows`.
    pub const fn canvas_size(&self, columns: u16, rows: u16) -> SurfaceSize {
        SurfaceSize::new(
            columns as u32 * self.units_per_column,
            rows.saturating_sub(self.status_rows) as u32 * self.units_per_row,
        )
    }
}

/// A host backed by the controlling terminal.
///
/// The canvas occupies every row above the status line. Key events are read
/// on an [`InputActor`] thread once the adapter attaches its key state.
/// Dropping the host restores the terminal.
#[derive(Debug)]
pub struct TerminalHost {
    config: TerminalConfig,
    raster: RasterSurface,
    output: OutputBuffer,
    stdout: Stdout,
    columns: u16,
    rows: u16,
    /// Presses forwarded by the input actor; the actor holds the only sender.
    key_rx: Option<Receiver<Key>>,
    input_actor: Option<InputActor>,
    keys: Option<KeyState>,
    enhanced_keys: bool,
    active: bool,
}

impl TerminalHost {
    /// Take over the terminal with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(TerminalConfig::default())
    }

    /// Take over the terminal: raw mode, alternate screen, hidden cursor.
    pub fn with_config(config: TerminalConfig) -> Result<Self> {
        let (columns, rows) = terminal::size()?;
        let canvas = config.canvas_size(columns, rows);

        terminal::enable_raw_mode()?;

        let mut host = Self {
            raster: RasterSurface::with_background(canvas.width, canvas.height, config.background),
            config,
            output: OutputBuffer::new(),
            stdout: io::stdout(),
            columns,
            rows,
            key_rx: None,
            input_actor: None,
            keys: None,
            enhanced_keys: false,
            active: true,
        };

        if host.config.alternate_screen {
            execute!(host.stdout, EnterAlternateScreen)?;
        }
        execute!(host.stdout, cursor::Hide)?;
        host.output.clear_screen();
        host.flush()?;

        if matches!(terminal::supports_keyboard_enhancement(), Ok(true)) {
            execute!(
                host.stdout,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )?;
            host.enhanced_keys = true;
        }

        info!(
            "terminal host started ({columns}x{rows}, key releases {})",
            if host.enhanced_keys { "reported" } else { "synthesized" }
        );
        Ok(host)
    }

    /// Get the configuration.
    pub const fn config(&self) -> &TerminalConfig {
        &self.config
    }

    /// The canvas as last painted.
    pub const fn raster(&self) -> &RasterSurface {
        &self.raster
    }

    /// Whether the terminal reports key releases itself.
    pub const fn reports_key_releases(&self) -> bool {
        self.enhanced_keys
    }

    const fn status_row(&self) -> u16 {
        self.rows.saturating_sub(1)
    }

    const fn canvas_rows(&self) -> u16 {
        self.rows.saturating_sub(self.config.status_rows)
    }

    fn flush(&mut self) -> Result<()> {
        self.output.flush_to(&mut self.stdout)?;
        self.output.clear();
        Ok(())
    }

    fn draw_prompt(&mut self, message: &str, editor: &LineEditor) -> Result<()> {
        let row = self.status_row();
        encode_prompt(&mut self.output, row, self.columns, message, editor, &self.config);
        self.flush()
    }

    fn finish_prompt(&mut self) -> Result<()> {
        let row = self.status_row();
        self.output.cursor_visible(false);
        encode_status(&mut self.output, row, self.columns, "", self.config.input_fg, self.config.status_bg);
        self.flush()
    }

    fn restore(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        self.key_rx = None;
        if let Some(actor) = self.input_actor.take() {
            actor.join();
        }
        if self.enhanced_keys {
            let _ = execute!(self.stdout, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(self.stdout, cursor::Show);
        if self.config.alternate_screen {
            let _ = execute!(self.stdout, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
        info!("terminal restored");
    }
}

impl Surface for TerminalHost {
    fn size(&mut self) -> Result<SurfaceSize> {
        let (columns, rows) = terminal::size()?;
        if (columns, rows) != (self.columns, self.rows) {
            debug!("terminal resized to {columns}x{rows}");
            self.columns = columns;
            self.rows = rows;
        }
        let canvas = self.config.canvas_size(columns, rows);
        self.raster.resize(canvas.width, canvas.height);
        Ok(canvas)
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.raster.fill_rect(rect, color);
    }

    fn fill_circle(&mut self, cx: u32, cy: u32, radius: u32, color: Rgb) {
        self.raster.fill_circle(cx, cy, radius, color);
    }

    fn present(&mut self) -> Result<()> {
        let geometry = self.config.geometry();
        encode_raster(
            &self.raster,
            self.columns,
            self.canvas_rows(),
            geometry,
            self.config.background,
            &mut self.output,
        );
        self.flush()
    }
}

impl StatusLine for TerminalHost {
    fn show_status(&mut self, text: &str, color: Rgb) -> Result<()> {
        if self.rows == 0 {
            return Ok(());
        }
        let row = self.status_row();
        encode_status(&mut self.output, row, self.columns, text, color, self.config.status_bg);
        self.flush()
    }

    fn show_segments(&mut self, segments: &[(String, Rgb)]) -> Result<()> {
        if self.rows == 0 {
            return Ok(());
        }
        let row = self.status_row();
        encode_segments(&mut self.output, row, self.columns, segments, self.config.status_bg);
        self.flush()
    }
}

impl Prompt for TerminalHost {
    fn read_line(&mut self, message: &str) -> Result<Option<String>> {
        let Some(input) = self.key_rx.clone() else {
            return Err(Error::InputClosed);
        };
        let slot = self.keys.clone();
        let keys = self.config.prompt_keys();

        let answer = run_prompt(&input, slot.as_ref(), keys, |editor| {
            self.draw_prompt(message, editor)
        });
        self.finish_prompt()?;
        answer
    }
}

impl Host for TerminalHost {
    fn attach_keys(&mut self, keys: KeyState) -> Result<()> {
        if let Some(actor) = self.input_actor.take() {
            actor.join();
        }
        let synthetic_release = (!self.enhanced_keys).then_some(self.config.synthetic_release);
        let (key_tx, key_rx) = bounded::<Key>(64);
        let actor = InputActor::spawn(
            keys.clone(),
            key_tx,
            self.config.input_poll_timeout,
            synthetic_release,
        )?;
        self.input_actor = Some(actor);
        self.key_rx = Some(key_rx);
        self.keys = Some(keys);
        Ok(())
    }

    fn request_close(&mut self) {
        self.restore();
    }
}

impl Drop for TerminalHost {
    fn drop(&mut self) {
        self.restore();
    }
}
