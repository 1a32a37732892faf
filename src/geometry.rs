//! Shape-aware coordinates shared by every border pattern.
//!
//! All distances here are derived from the logical canvas `size`, so a pattern drawn at 64px and
//! at 1024px differs only by a uniform scale.

use crate::foundation::core::{BezPath, FrameShape, Point, Rect, Vec2};
use kurbo::ParamCurveArclen;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Border margin as a fraction of the canvas size.
pub const MARGIN_FRACTION: f64 = 0.035;

/// Per-call constants derived from the canvas size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorderGeometry {
    /// Logical canvas edge length.
    pub size: f64,
    /// Canvas center (`size / 2` on both axes).
    pub center: Point,
    /// `size * MARGIN_FRACTION`.
    pub margin: f64,
    /// Nominal ring radius, `size / 2 - margin`.
    pub radius: f64,
    /// Square frame origin on both axes (equal to `margin`).
    pub rect_pos: f64,
    /// Square frame edge, `size - 2 * margin`.
    pub rect_size: f64,
}

impl BorderGeometry {
    /// Derive the geometry for a square canvas of edge `size`.
    pub fn new(size: f64) -> Self {
        let margin = size * MARGIN_FRACTION;
        Self {
            size,
            center: Point::new(size / 2.0, size / 2.0),
            margin,
            radius: size / 2.0 - margin,
            rect_pos: margin,
            rect_size: size - margin * 2.0,
        }
    }

    /// `size * fraction`.
    pub fn frac(&self, fraction: f64) -> f64 {
        self.size * fraction
    }

    /// [`point_on_shape`] around this canvas' center.
    pub fn point_on(&self, shape: FrameShape, angle: f64, distance: f64) -> Point {
        point_on_shape(self.center, angle, distance, shape)
    }

    /// The square frame shrunk by `inset` on every side (negative grows it).
    pub fn frame_rect(&self, inset: f64) -> Rect {
        Rect::new(
            self.rect_pos + inset,
            self.rect_pos + inset,
            self.rect_pos + self.rect_size - inset,
            self.rect_pos + self.rect_size - inset,
        )
    }

    /// Closed frame outline: a circle of `radius - inset`, or [`Self::frame_rect`].
    pub fn outline(&self, shape: FrameShape, inset: f64) -> BezPath {
        match shape {
            FrameShape::Circle => circle_path(self.center, self.radius - inset),
            FrameShape::Square => rect_path(self.frame_rect(inset)),
        }
    }

    /// Length of the uninset outline.
    pub fn perimeter(&self, shape: FrameShape) -> f64 {
        match shape {
            FrameShape::Circle => TAU * self.radius,
            FrameShape::Square => self.rect_size * 4.0,
        }
    }
}

/// Place a point `distance` away from `center` along `angle` (radians, y-down, clockwise).
///
/// For [`FrameShape::Square`] the ray is projected onto the boundary of a square of half-width
/// `distance`, so the same angular parameter addresses both rings. Axis-aligned angles land on
/// edge midpoints.
pub fn point_on_shape(center: Point, angle: f64, distance: f64, shape: FrameShape) -> Point {
    let (sin, cos) = angle.sin_cos();
    let offset = match shape {
        FrameShape::Circle => Vec2::new(cos * distance, sin * distance),
        FrameShape::Square => {
            let abs_cos = cos.abs();
            let abs_sin = sin.abs();
            if abs_cos > abs_sin {
                let x = if cos > 0.0 { distance } else { -distance };
                Vec2::new(x, distance * sin / abs_cos)
            } else {
                let y = if sin > 0.0 { distance } else { -distance };
                Vec2::new(distance * cos / abs_sin, y)
            }
        }
    };
    center + offset
}

/// Append a circular arc as cubic segments, starting a new subpath at its first point.
///
/// The arc is split into quarter-turn (or shorter) pieces; the piece count depends only on
/// `sweep`, never on the radius, which keeps arcs exactly scale-invariant.
pub fn append_arc(path: &mut BezPath, center: Point, radius: f64, start: f64, sweep: f64) {
    let pieces = (sweep.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
    let step = sweep / pieces as f64;
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    let at = |theta: f64| center + Vec2::new(theta.cos() * radius, theta.sin() * radius);
    let tangent = |theta: f64| Vec2::new(-theta.sin() * radius, theta.cos() * radius);

    path.move_to(at(start));
    for i in 0..pieces {
        let a0 = start + step * i as f64;
        let a1 = a0 + step;
        let p0 = at(a0);
        let p3 = at(a1);
        path.curve_to(p0 + tangent(a0) * k, p3 - tangent(a1) * k, p3);
    }
}

/// Open arc path.
pub fn arc_path(center: Point, radius: f64, start: f64, sweep: f64) -> BezPath {
    let mut path = BezPath::new();
    append_arc(&mut path, center, radius, start, sweep);
    path
}

/// Closed full circle starting at angle 0.
pub fn circle_path(center: Point, radius: f64) -> BezPath {
    let mut path = arc_path(center, radius, 0.0, TAU);
    path.close_path();
    path
}

/// Closed rectangle traced clockwise from its top-left corner.
pub fn rect_path(rect: Rect) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((rect.x0, rect.y0));
    path.line_to((rect.x1, rect.y0));
    path.line_to((rect.x1, rect.y1));
    path.line_to((rect.x0, rect.y1));
    path.close_path();
    path
}

/// Polyline through `points`, optionally closed.
pub fn polyline(points: impl IntoIterator<Item = Point>, closed: bool) -> BezPath {
    let mut path = BezPath::new();
    for (i, p) in points.into_iter().enumerate() {
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    if closed && !path.elements().is_empty() {
        path.close_path();
    }
    path
}

/// Clamp to `[0, 1]`, mapping NaN to 0.
pub fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Partial square outline covering `progress` of the perimeter.
///
/// The walk starts at the top edge midpoint and runs clockwise: top-right corner, right edge,
/// bottom edge, left edge, then along the top edge back toward the start. `progress` is clamped
/// to `[0, 1]`; zero yields a zero-length stub at the start point.
pub fn square_progress_path(geom: &BorderGeometry, progress: f64) -> BezPath {
    let edge = geom.rect_size;
    let left = geom.rect_pos;
    let top = geom.rect_pos;
    let right = left + edge;
    let bottom = top + edge;
    let perimeter = edge * 4.0;
    let target = perimeter * clamp_unit(progress);

    let mut path = BezPath::new();
    path.move_to((geom.center.x, top));

    let mut current;
    if target > edge / 2.0 {
        path.line_to((right, top));
        current = edge / 2.0;
    } else {
        path.line_to((geom.center.x + target, top));
        current = target;
    }

    // right edge, downward
    if target > current + edge {
        path.line_to((right, bottom));
        current += edge;
    } else if target > current {
        path.line_to((right, top + (target - current)));
        current = target;
    }

    // bottom edge, leftward
    if target > current + edge {
        path.line_to((left, bottom));
        current += edge;
    } else if target > current {
        path.line_to((right - (target - current), bottom));
        current = target;
    }

    // left edge, upward
    if target > current + edge {
        path.line_to((left, top));
        current += edge;
    } else if target > current {
        path.line_to((left, bottom - (target - current)));
        current = target;
    }

    // top edge, back toward the start
    if target > current && current < perimeter {
        path.line_to((left + (target - current), top));
    }

    path
}

/// Total arc length of every segment in `path`.
pub fn path_length(path: &BezPath) -> f64 {
    path.segments().map(|seg| seg.arclen(1e-7)).sum()
}

#[cfg(test)]
#[path = "../tests/unit/geometry/geometry.rs"]
mod tests;
