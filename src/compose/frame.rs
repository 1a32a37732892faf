use crate::catalog::BorderPreset;
use crate::foundation::color::Color;
use crate::foundation::core::{BezPath, FrameShape, Point, Rect};
use crate::foundation::error::{CircleFxError, CircleFxResult};
use crate::foundation::rng::Entropy;
use crate::geometry::{circle_path, rect_path};
use crate::render::border::{DrawRequest, draw_border};
use crate::render::pattern::PatternKind;
use crate::render::raster::RasterSurface;
use crate::render::surface::Surface;
use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// Photo clip inset as a fraction of the output size (40px at 1024).
pub const CLIP_INSET_FRACTION: f64 = 40.0 / 1024.0;

/// Border parameters shared by every frame of one export.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BorderStyle {
    /// Pattern to draw.
    pub pattern: PatternKind,
    /// Main color.
    pub primary: Color,
    /// Accent color.
    #[serde(default)]
    pub secondary: Option<Color>,
    /// Completion fraction for `progress`.
    #[serde(default = "default_progress")]
    pub progress: f64,
    /// Frame outline for both the clip and the border.
    #[serde(default)]
    pub shape: FrameShape,
}

fn default_progress() -> f64 {
    1.0
}

impl BorderStyle {
    /// Style with no accent color, full progress and a circular frame.
    pub fn new(pattern: PatternKind, primary: Color) -> Self {
        Self {
            pattern,
            primary,
            secondary: None,
            progress: 1.0,
            shape: FrameShape::Circle,
        }
    }

    /// Style taken from a catalog preset.
    pub fn from_preset(preset: &BorderPreset, progress: f64, shape: FrameShape) -> Self {
        Self {
            pattern: preset.pattern,
            primary: preset.color,
            secondary: preset.secondary_color,
            progress,
            shape,
        }
    }

    /// Override the primary color.
    pub fn with_primary(mut self, primary: Color) -> Self {
        self.primary = primary;
        self
    }

    /// Set the frame shape.
    pub fn with_shape(mut self, shape: FrameShape) -> Self {
        self.shape = shape;
        self
    }

    /// Set the completion fraction.
    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = progress;
        self
    }

    /// Render request at `size`.
    pub fn request(&self, size: f64) -> DrawRequest {
        DrawRequest::new(self.pattern, self.primary, size)
            .with_secondary(self.secondary)
            .with_progress(self.progress)
            .with_shape(self.shape)
    }
}

/// Region the source photo is clipped to.
pub fn clip_path(shape: FrameShape, size: f64) -> BezPath {
    let inset = size * CLIP_INSET_FRACTION;
    match shape {
        FrameShape::Circle => circle_path(Point::new(size / 2.0, size / 2.0), size / 2.0 - inset),
        FrameShape::Square => rect_path(Rect::new(inset, inset, size - inset, size - inset)),
    }
}

/// Destination rect that scales a `width x height` image to cover a `size` square, centered.
pub fn cover_rect(width: u32, height: u32, size: f64) -> Rect {
    let (w, h) = (f64::from(width), f64::from(height));
    let scale = (size / w).max(size / h);
    let (dw, dh) = (w * scale, h * scale);
    let x = (size - dw) / 2.0;
    let y = (size - dh) / 2.0;
    Rect::new(x, y, x + dw, y + dh)
}

/// Centered square crop with the edge of the shorter dimension.
pub fn center_square_crop(frame: &RgbaImage) -> RgbaImage {
    let (w, h) = frame.dimensions();
    let edge = w.min(h);
    let x = (w - edge) / 2;
    let y = (h - edge) / 2;
    image::imageops::crop_imm(frame, x, y, edge, edge).to_image()
}

/// Draw `source` clipped to the style's shape, then the border.
pub fn compose_onto(
    surface: &mut dyn Surface,
    source: Option<&RgbaImage>,
    style: &BorderStyle,
    size: f64,
    entropy: &mut dyn Entropy,
) {
    if let Some(src) = source.filter(|s| s.width() > 0 && s.height() > 0) {
        surface.save();
        surface.clip(&clip_path(style.shape, size));
        surface.draw_image(src, cover_rect(src.width(), src.height(), size));
        surface.restore();
    }
    draw_border(surface, &style.request(size), entropy);
}

/// Compose a still export: `source` covers the clipped frame, the border sits on top, and the
/// area outside the clip stays transparent.
///
/// `None` (a source that failed to load) yields the border alone.
pub fn compose_still(
    source: Option<&RgbaImage>,
    style: &BorderStyle,
    size: u32,
    entropy: &mut dyn Entropy,
) -> CircleFxResult<RgbaImage> {
    let mut surface = RasterSurface::square(size)?;
    surface.clear();
    compose_onto(&mut surface, source, style, f64::from(size), entropy);
    Ok(surface.to_rgba_image())
}

/// Compose one animation frame: center-crop `frame` to a square, scale it to `size`, clip and
/// draw the border.
pub fn compose_video_frame(
    frame: &RgbaImage,
    style: &BorderStyle,
    size: u32,
    entropy: &mut dyn Entropy,
) -> CircleFxResult<RgbaImage> {
    if frame.width() == 0 || frame.height() == 0 {
        return Err(CircleFxError::media("video frame has zero width or height"));
    }
    let square = center_square_crop(frame);
    compose_still(Some(&square), style, size, entropy)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/frame.rs"]
mod tests;
