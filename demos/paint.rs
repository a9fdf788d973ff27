//! Paint Demo: a tiny editing engine driving the terminal host.
//!
//! Demonstrates:
//! - Size negotiation and full-frame `draw_camera` calls
//! - Polling the key slot with `get_key`
//! - Blocking prompts with `console_in` and messages with `console_out`
//!
//! Keyboard:
//!   h/j/k/l, arrows → Move cursor
//!   Space           → Paint with the current color
//!   x               → Erase
//!   :               → Command prompt (`color R G B`, `fill`, `q`)
//!   q               → Exit
//!
//! Logs go to `paint.log` in the current directory.

use pixel_adapter::{
    Adapter, Boundary, Key, KeyCode, LogType, Pixel, Rgb, TerminalHost, UserInterface,
};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::thread;
use std::time::Duration;

const CANVAS_ROWS: u16 = 16;
const CANVAS_COLUMNS: u16 = 24;
const TICK: Duration = Duration::from_millis(16);

struct Canvas {
    pixels: Vec<Rgb>,
    cursor: (u16, u16),
    color: Rgb,
}

impl Canvas {
    fn new() -> Self {
        Self {
            pixels: vec![Rgb::new(20, 20, 30); usize::from(CANVAS_ROWS) * usize::from(CANVAS_COLUMNS)],
            cursor: (0, 0),
            color: Rgb::new(255, 100, 50),
        }
    }

    fn index(&self) -> usize {
        usize::from(self.cursor.0) * usize::from(CANVAS_COLUMNS) + usize::from(self.cursor.1)
    }

    fn move_by(&mut self, rows: i32, columns: i32) {
        let row = (i32::from(self.cursor.0) + rows).clamp(0, i32::from(CANVAS_ROWS) - 1);
        let column = (i32::from(self.cursor.1) + columns).clamp(0, i32::from(CANVAS_COLUMNS) - 1);
        self.cursor = (row as u16, column as u16);
    }

    fn frame(&self) -> Vec<Pixel> {
        let cursor = self.index();
        self.pixels
            .iter()
            .enumerate()
            .map(|(i, &color)| Pixel::from(color).with_cursor(i == cursor))
            .collect()
    }
}

enum Command {
    Continue,
    Quit,
}

fn run_command(line: &str, canvas: &mut Canvas) -> (Command, String, LogType) {
    let mut words = line.split_whitespace();
    match words.next() {
        Some("q" | "quit") => (Command::Quit, String::new(), LogType::Info),
        Some("fill") => {
            let color = canvas.color;
            canvas.pixels.fill(color);
            (Command::Continue, "filled".to_string(), LogType::Success)
        }
        Some("color") => {
            let channels: Vec<u8> = words.filter_map(|w| w.parse().ok()).collect();
            if let [r, g, b] = channels[..] {
                canvas.color = Rgb::new(r, g, b);
                (Command::Continue, format!("color {r} {g} {b}"), LogType::Success)
            } else {
                (Command::Continue, "usage: color R G B".to_string(), LogType::Warning)
            }
        }
        Some(other) => (Command::Continue, format!("unknown command: {other}"), LogType::Error),
        None => (Command::Continue, String::new(), LogType::Info),
    }
}

fn main() -> pixel_adapter::Result<()> {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("paint.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let mut ui = Adapter::new(TerminalHost::new()?)?;
    ui.initialize();

    let mut canvas = Canvas::new();
    let mut last_key: Option<Key> = None;
    let mut status_dirty = true;

    loop {
        let size = ui.get_size()?;
        let boundary = Boundary::new(0, 0, CANVAS_COLUMNS, CANVAS_ROWS);
        let status = Boundary::new(0, size.rows.saturating_sub(1), size.columns, 1);

        // Only act on a key once per press; the slot holds it until release.
        let key = ui.get_key();
        if key != last_key {
            if let Some(key) = key {
                status_dirty = true;
                match key.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Char('h') | KeyCode::Left => canvas.move_by(0, -1),
                    KeyCode::Char('l') | KeyCode::Right => canvas.move_by(0, 1),
                    KeyCode::Char('k') | KeyCode::Up => canvas.move_by(-1, 0),
                    KeyCode::Char('j') | KeyCode::Down => canvas.move_by(1, 0),
                    KeyCode::Char(' ') => {
                        let index = canvas.index();
                        canvas.pixels[index] = canvas.color;
                    }
                    KeyCode::Char('x') => {
                        let index = canvas.index();
                        canvas.pixels[index] = Rgb::new(20, 20, 30);
                    }
                    KeyCode::Char(':') => {
                        let answer = ui.console_in(":", &Key::plain(KeyCode::Esc), &status)?;
                        if let Some(line) = answer {
                            let (command, message, log_type) = run_command(&line, &mut canvas);
                            if matches!(command, Command::Quit) {
                                break;
                            }
                            ui.console_out(&message, log_type, &status)?;
                            status_dirty = false;
                        }
                    }
                    _ => {}
                }
            }
            last_key = ui.get_key();
        }

        if status_dirty {
            let segments = [
                (format!(" {}:{} ", canvas.cursor.0, canvas.cursor.1), Rgb::WHITE),
                (format!(" #{:06x} ", canvas.color.to_u32()), canvas.color),
                (" : command  q quit".to_string(), Rgb::new(140, 140, 140)),
            ];
            ui.draw_statusline(&segments, &status)?;
            status_dirty = false;
        }

        if ui.refresh() {
            let frame = canvas.frame();
            if let Err(e) = ui.draw_camera(CANVAS_ROWS, CANVAS_COLUMNS, &frame, true, &boundary) {
                ui.console_out(&e.to_string(), LogType::Error, &status)?;
            }
        }
        thread::sleep(TICK);
    }

    ui.finalize();
    Ok(())
}
