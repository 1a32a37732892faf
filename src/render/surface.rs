use crate::foundation::color::Color;
use crate::foundation::core::{Affine, BezPath, Point, Rect};
use image::RgbaImage;
use smallvec::{SmallVec, smallvec};

/// One color stop of a gradient brush.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient in `[0, 1]`.
    pub offset: f64,
    /// Color at `offset`.
    pub color: Color,
}

impl GradientStop {
    /// Build a stop.
    pub fn new(offset: f64, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Paint source for strokes and fills.
///
/// Gradient coordinates are in the same user space as the path being painted.
#[derive(Clone, Debug, PartialEq)]
pub enum Brush {
    /// Flat color.
    Solid(Color),
    /// Linear gradient between two points, padded beyond the ends.
    Linear {
        /// Point mapped to offset 0.
        start: Point,
        /// Point mapped to offset 1.
        end: Point,
        /// Color stops in ascending offset order.
        stops: SmallVec<[GradientStop; 2]>,
    },
    /// Radial gradient between two concentric circles.
    Radial {
        /// Shared center of both circles.
        center: Point,
        /// Radius mapped to offset 0.
        inner_radius: f64,
        /// Radius mapped to offset 1.
        outer_radius: f64,
        /// Color stops in ascending offset order.
        stops: SmallVec<[GradientStop; 2]>,
    },
}

impl Brush {
    /// Two-stop linear gradient.
    pub fn linear(start: Point, end: Point, from: Color, to: Color) -> Self {
        Self::Linear {
            start,
            end,
            stops: smallvec![GradientStop::new(0.0, from), GradientStop::new(1.0, to)],
        }
    }

    /// Two-stop concentric radial gradient.
    pub fn radial(
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
        from: Color,
        to: Color,
    ) -> Self {
        Self::Radial {
            center,
            inner_radius,
            outer_radius,
            stops: smallvec![GradientStop::new(0.0, from), GradientStop::new(1.0, to)],
        }
    }

    /// The color when this is a [`Brush::Solid`].
    pub fn solid_color(&self) -> Option<Color> {
        match self {
            Self::Solid(c) => Some(*c),
            _ => None,
        }
    }
}

impl From<Color> for Brush {
    fn from(c: Color) -> Self {
        Self::Solid(c)
    }
}

/// Stroke geometry. Caps and joins are always round.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Line width in user units.
    pub width: f64,
    /// Alternating on/off lengths; `None` strokes solid.
    pub dash: Option<SmallVec<[f64; 2]>>,
}

impl StrokeStyle {
    /// Solid stroke of `width`.
    pub fn solid(width: f64) -> Self {
        Self { width, dash: None }
    }

    /// Dashed stroke of `width` with one on/off pair.
    pub fn dashed(width: f64, on: f64, off: f64) -> Self {
        Self {
            width,
            dash: Some(smallvec![on, off]),
        }
    }
}

/// A 2D drawing target the border renderer writes into.
///
/// Mirrors the subset of an immediate-mode canvas the patterns need: a save/restore stack that
/// covers the transform and the clip, path stroking and filling with solid or gradient brushes,
/// and image blits for compositing source photos. Implementations own their pixels (or commands);
/// callers read results back through the concrete type.
pub trait Surface {
    /// Surface dimensions in device pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Push the current transform and clip.
    fn save(&mut self);

    /// Pop the most recently saved transform and clip. Unbalanced calls are ignored.
    fn restore(&mut self);

    /// Post-multiply the current transform (`current * transform`).
    fn concat(&mut self, transform: Affine);

    /// Current user-to-device transform.
    fn transform(&self) -> Affine;

    /// Stroke `path` with `brush`.
    fn stroke(&mut self, path: &BezPath, brush: &Brush, style: &StrokeStyle);

    /// Fill `path` (non-zero winding) with `brush`.
    fn fill(&mut self, path: &BezPath, brush: &Brush);

    /// Intersect the current clip with `path`.
    fn clip(&mut self, path: &BezPath);

    /// Draw `image` stretched into `dst` (user space).
    fn draw_image(&mut self, image: &RgbaImage, dst: Rect);

    /// Reset every pixel (or recorded command) to transparent. Transform and clip are untouched.
    fn clear(&mut self);
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
