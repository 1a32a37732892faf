//! Border rendering onto drawing surfaces.
//!
//! [`border::draw_border`] is the entry point. It draws onto any [`surface::Surface`]:
//! [`raster::RasterSurface`] for pixels, [`recording::RecordingSurface`] for inspecting the exact
//! geometry.

/// The pattern dispatch and per-pattern drawing routines.
pub mod border;
/// Pattern identifiers.
pub mod pattern;
/// `tiny-skia` raster surface.
pub mod raster;
/// Command-recording surface for tests and debugging.
pub mod recording;
/// The drawing-surface abstraction.
pub mod surface;
