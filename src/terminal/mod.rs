//! Terminal host: the adapter rendered into a crossterm terminal.
//!
//! - [`TerminalHost`]: raw-mode terminal session implementing [`Host`](crate::surface::Host)
//! - [`InputActor`]: key polling thread feeding the adapter's key state
//! - [`OutputBuffer`]: batched ANSI output
//! - [`LineEditor`], [`run_prompt`]: line editing for prompts

mod editor;
mod host;
mod input;
mod output;
mod present;
mod prompt;

pub use editor::LineEditor;
pub use host::{TerminalConfig, TerminalHost};
pub use input::{convert_key, InputActor, ReleaseTracker};
pub use output::OutputBuffer;
pub use present::{encode_raster, encode_segments, encode_status, CellGeometry};
pub use prompt::{encode_prompt, run_prompt, PromptKeys};
