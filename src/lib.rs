//! # Pixel Adapter
//!
//! Display and input boundary between a pixel-art editing engine and the
//! surface it is shown on.
//!
//! The engine drives an [`Adapter`] through the [`UserInterface`] trait: it
//! asks for the grid size, hands over whole frames of [`Pixel`]s, polls the
//! last pressed key and opens blocking text prompts. The adapter translates
//! those calls into paint operations on a [`Host`].
//!
//! ## Core Concepts
//!
//! - **Hosts**: anything implementing [`Surface`], [`StatusLine`] and
//!   [`Prompt`]. [`HeadlessHost`] records into memory, [`TerminalHost`]
//!   renders into a crossterm terminal
//! - **Key slot**: a per-adapter [`KeyState`] written by the host's input
//!   dispatch and read by the engine, never queued
//! - **Full repaint**: every frame repaints every addressed cell
//!
//! ## Example
//!
//! ```rust
//! use pixel_adapter::{Adapter, Boundary, HeadlessHost, Pixel, UserInterface};
//!
//! let mut ui = Adapter::new(HeadlessHost::new(80, 130)).unwrap();
//! assert_eq!(ui.get_size().unwrap().to_array(), [16, 8]);
//!
//! let frame = [Pixel::new(255, 0, 0), Pixel::new(0, 255, 0).with_cursor(true)];
//! ui.draw_camera(1, 2, &frame, false, &Boundary::new(0, 0, 2, 1)).unwrap();
//! assert_eq!(ui.host().ops().len(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod adapter;
pub mod config;
pub mod error;
pub mod frame;
pub mod input;
pub mod interface;
pub mod layout;
pub mod surface;
pub mod terminal;

// Re-exports for convenience
pub use adapter::Adapter;
pub use config::AdapterConfig;
pub use error::{Error, Result};
pub use frame::{grid_position, Pixel, Rgb};
pub use input::{Key, KeyCode, KeyModifiers, KeyState, ParseKeyError};
pub use interface::{ClearOutcome, LogType, UserInterface};
pub use layout::{Boundary, GridSize, Rect};
pub use surface::{HeadlessHost, Host, PaintOp, Prompt, RasterSurface, StatusLine, Surface, SurfaceSize};
pub use terminal::{TerminalConfig, TerminalHost};
