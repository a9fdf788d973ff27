//! Surface module: the host side of the adapter.
//!
//! - [`Surface`], [`StatusLine`], [`Prompt`], [`Host`]: capabilities a host
//!   provides
//! - [`RasterSurface`]: an in-memory RGB canvas
//! - [`HeadlessHost`]: a complete in-memory host built on the raster

mod headless;
mod raster;
mod traits;

pub use headless::{HeadlessHost, PaintOp};
pub use raster::RasterSurface;
pub use traits::{Host, Prompt, StatusLine, Surface, SurfaceSize};
