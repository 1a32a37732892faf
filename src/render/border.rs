//! The 25 procedural border patterns.
//!
//! Every length below is a fraction of the request `size`; the renderer holds no state between
//! calls and never fails. Degenerate input (non-positive or non-finite size) draws nothing.

use crate::foundation::color::Color;
use crate::foundation::core::{Affine, BezPath, FrameShape, Point, Rect};
use crate::foundation::rng::Entropy;
use crate::geometry::{
    BorderGeometry, arc_path, circle_path, clamp_unit, polyline, rect_path, square_progress_path,
};
use crate::render::pattern::PatternKind;
use crate::render::surface::{Brush, StrokeStyle, Surface};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};

/// Everything one border render needs apart from the surface and the entropy source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawRequest {
    /// Pattern to draw.
    pub pattern: PatternKind,
    /// Main stroke/fill color.
    pub primary: Color,
    /// Accent color for `gradient-ring` and `glitch`.
    #[serde(default)]
    pub secondary: Option<Color>,
    /// Logical canvas edge length.
    pub size: f64,
    /// Completion fraction for `progress`; clamped to `[0, 1]`.
    #[serde(default = "default_progress")]
    pub progress: f64,
    /// Frame outline the border follows.
    #[serde(default)]
    pub shape: FrameShape,
}

fn default_progress() -> f64 {
    1.0
}

impl DrawRequest {
    /// Request with no secondary color, full progress and a circular frame.
    pub fn new(pattern: PatternKind, primary: Color, size: f64) -> Self {
        Self {
            pattern,
            primary,
            secondary: None,
            size,
            progress: 1.0,
            shape: FrameShape::Circle,
        }
    }

    /// Set the accent color.
    pub fn with_secondary(mut self, secondary: Option<Color>) -> Self {
        self.secondary = secondary;
        self
    }

    /// Set the completion fraction.
    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = progress;
        self
    }

    /// Set the frame shape.
    pub fn with_shape(mut self, shape: FrameShape) -> Self {
        self.shape = shape;
        self
    }
}

/// Draw `req` onto `surface`.
///
/// Only `barcode` and `glitch` read from `entropy`; every other pattern produces identical
/// drawing calls for identical requests. The surface transform and clip are restored on return.
pub fn draw_border(surface: &mut dyn Surface, req: &DrawRequest, entropy: &mut dyn Entropy) {
    if !(req.size.is_finite() && req.size > 0.0) {
        tracing::debug!(
            size = req.size,
            pattern = %req.pattern,
            "skipping border with degenerate size"
        );
        return;
    }

    surface.save();
    let mut pen = Pen {
        surface: &mut *surface,
        g: BorderGeometry::new(req.size),
        shape: req.shape,
        color: req.primary,
    };

    match req.pattern {
        PatternKind::Minimal => pen.outline_stroke(0.0, 0.025),
        PatternKind::RingGlow => ring_glow(&mut pen),
        PatternKind::NeonPulse => neon_pulse(&mut pen),
        PatternKind::Progress => progress(&mut pen, req.progress),
        PatternKind::Zigzag => zigzag(&mut pen),
        PatternKind::Tech => tech(&mut pen),
        PatternKind::Dots => dots(&mut pen),
        PatternKind::Double => double(&mut pen),
        PatternKind::FancyStars => fancy_stars(&mut pen),
        PatternKind::Ornate => ornate(&mut pen),
        PatternKind::GradientRing => gradient_ring(&mut pen, req.secondary),
        PatternKind::DashedRing => dashed_ring(&mut pen),
        PatternKind::TripleRing => triple_ring(&mut pen),
        PatternKind::SquareDots => square_dots(&mut pen),
        PatternKind::SunRays => sun_rays(&mut pen),
        PatternKind::Barcode => barcode(&mut pen, entropy),
        PatternKind::Circuit => circuit(&mut pen),
        PatternKind::Dna => dna(&mut pen),
        PatternKind::WaveDouble => wave_double(&mut pen),
        PatternKind::Glitch => glitch(&mut pen, req.secondary, entropy),
        PatternKind::Pixel => pixel(&mut pen),
        PatternKind::Shards => shards(&mut pen),
        PatternKind::Vignette => vignette(&mut pen),
        PatternKind::Flower => flower(&mut pen),
        PatternKind::HexGrid => hex_grid(&mut pen),
    }

    surface.restore();
}

/// Draw a border identified by its string tag.
///
/// `template` supplies colors, size, progress and shape; its `pattern` is replaced by `tag`.
/// Returns `false` (after logging a warning) when the tag is unknown, in which case nothing is
/// drawn.
pub fn draw_border_tag(
    surface: &mut dyn Surface,
    tag: &str,
    template: &DrawRequest,
    entropy: &mut dyn Entropy,
) -> bool {
    let Some(pattern) = PatternKind::from_tag(tag) else {
        tracing::warn!(tag, "unknown border pattern; nothing drawn");
        return false;
    };
    let req = DrawRequest {
        pattern,
        ..template.clone()
    };
    draw_border(surface, &req, entropy);
    true
}

struct Pen<'a> {
    surface: &'a mut dyn Surface,
    g: BorderGeometry,
    shape: FrameShape,
    color: Color,
}

impl Pen<'_> {
    fn f(&self, fraction: f64) -> f64 {
        self.g.frac(fraction)
    }

    fn at(&self, angle: f64, distance: f64) -> Point {
        self.g.point_on(self.shape, angle, distance)
    }

    fn stroke(&mut self, path: &BezPath, brush: impl Into<Brush>, width_frac: f64) {
        let style = StrokeStyle::solid(self.f(width_frac));
        self.surface.stroke(path, &brush.into(), &style);
    }

    fn fill(&mut self, path: &BezPath, brush: impl Into<Brush>) {
        self.surface.fill(path, &brush.into());
    }

    fn outline(&self, inset_frac: f64) -> BezPath {
        self.g.outline(self.shape, self.f(inset_frac))
    }

    fn outline_stroke(&mut self, inset_frac: f64, width_frac: f64) {
        let path = self.outline(inset_frac);
        self.stroke(&path, self.color, width_frac);
    }

    /// Run `draw` with the origin moved to `origin` and rotated by `angle`.
    fn local(&mut self, origin: Point, angle: f64, draw: impl FnOnce(&mut Self)) {
        self.surface.save();
        self.surface
            .concat(Affine::translate(origin.to_vec2()) * Affine::rotate(angle));
        draw(self);
        self.surface.restore();
    }

    /// Ring through `samples + 1` points at angle `i / samples * 2π`, radius from `r(i, angle)`.
    fn modulated_ring(
        &self,
        samples: usize,
        closed: bool,
        r: impl Fn(usize, f64) -> f64,
    ) -> BezPath {
        polyline(
            (0..=samples).map(|i| {
                let angle = i as f64 / samples as f64 * TAU;
                self.at(angle, r(i, angle))
            }),
            closed,
        )
    }
}

fn anchors(count: usize) -> impl Iterator<Item = (usize, f64)> {
    (0..count).map(move |i| (i, i as f64 / count as f64 * TAU))
}

fn ring_glow(pen: &mut Pen<'_>) {
    pen.outline_stroke(0.0, 0.04);
    let path = pen.outline(0.0);
    pen.stroke(&path, Color::WHITE, 0.01);
}

fn neon_pulse(pen: &mut Pen<'_>) {
    pen.outline_stroke(0.0, 0.025);
    let halo = pen.outline(-0.015);
    pen.stroke(&halo, pen.color.scale_alpha(0.3), 0.015);
}

fn progress(pen: &mut Pen<'_>, progress: f64) {
    let track = pen.outline(0.0);
    pen.stroke(&track, Color::WHITE.with_alpha(0.1), 0.03);

    let p = clamp_unit(progress);
    if p == 0.0 {
        // A zero-length stroke would still paint a round cap.
        return;
    }
    let arc = match pen.shape {
        FrameShape::Circle => arc_path(pen.g.center, pen.g.radius, -FRAC_PI_2, TAU * p),
        FrameShape::Square => square_progress_path(&pen.g, p),
    };
    pen.stroke(&arc, pen.color, 0.03);
}

fn zigzag(pen: &mut Pen<'_>) {
    let (radius, amp) = (pen.g.radius, pen.f(0.015));
    let path = pen.modulated_ring(60, true, |i, _| {
        if i % 2 == 0 { radius + amp } else { radius - amp }
    });
    pen.stroke(&path, pen.color, 0.015);
}

fn tech(pen: &mut Pen<'_>) {
    match pen.shape {
        FrameShape::Circle => {
            let r = pen.g.radius + pen.f(0.01);
            for (_, start) in anchors(8) {
                let arc = arc_path(pen.g.center, r, start, TAU / 12.0);
                pen.stroke(&arc, pen.color, 0.02);
            }
        }
        FrameShape::Square => {
            let leg = pen.g.rect_size * 0.2;
            let lo = pen.g.rect_pos;
            let hi = lo + pen.g.rect_size;
            let brackets = [
                [(hi - leg, lo), (hi, lo), (hi, lo + leg)],
                [(hi, hi - leg), (hi, hi), (hi - leg, hi)],
                [(lo + leg, hi), (lo, hi), (lo, hi - leg)],
                [(lo, lo + leg), (lo, lo), (lo + leg, lo)],
            ];
            for corner in brackets {
                let path = polyline(corner.map(Point::from), false);
                pen.stroke(&path, pen.color, 0.02);
            }
        }
    }
    let inner = pen.outline(0.01);
    pen.stroke(&inner, Color::WHITE.with_alpha(0.2), 0.005);
}

fn dots(pen: &mut Pen<'_>) {
    let r = pen.f(0.01);
    for (_, angle) in anchors(40) {
        let dot = circle_path(pen.at(angle, pen.g.radius), r);
        pen.fill(&dot, pen.color);
    }
}

fn double(pen: &mut Pen<'_>) {
    pen.outline_stroke(0.0, 0.015);
    let inset = match pen.shape {
        FrameShape::Circle => 0.02,
        FrameShape::Square => 0.015,
    };
    pen.outline_stroke(inset, 0.008);
}

fn star_path(outer: f64, inner: f64) -> BezPath {
    let vertex = |deg: f64, r: f64| {
        let (sin, cos) = deg.to_radians().sin_cos();
        Point::new(cos * r, sin * r)
    };
    polyline(
        (0..5).flat_map(|j| {
            let base = f64::from(j) * 72.0;
            [vertex(18.0 + base, outer), vertex(54.0 + base, inner)]
        }),
        true,
    )
}

fn fancy_stars(pen: &mut Pen<'_>) {
    let star = star_path(pen.f(0.02), pen.f(0.01));
    for (_, angle) in anchors(8) {
        let origin = pen.at(angle, pen.g.radius);
        pen.local(origin, angle, |pen| pen.fill(&star, pen.color));
    }
    let dash = pen.f(0.025);
    let style = StrokeStyle::dashed(pen.f(0.005), dash, dash);
    let outline = pen.outline(0.0);
    pen.surface.stroke(&outline, &Brush::Solid(pen.color), &style);
}

fn ornate(pen: &mut Pen<'_>) {
    let (radius, amp) = (pen.g.radius, pen.f(0.02));
    let path = pen.modulated_ring(120, true, |_, angle| radius + (angle * 12.0).sin() * amp);
    pen.stroke(&path, pen.color, 0.015);
}

fn gradient_ring(pen: &mut Pen<'_>, secondary: Option<Color>) {
    let size = pen.g.size;
    let brush = Brush::linear(
        Point::ZERO,
        Point::new(size, size),
        pen.color,
        secondary.unwrap_or(Color::WHITE),
    );
    let path = pen.outline(0.0);
    pen.stroke(&path, brush, 0.04);
}

fn dashed_ring(pen: &mut Pen<'_>) {
    let style = StrokeStyle::dashed(pen.f(0.025), pen.f(0.035), pen.f(0.025));
    let path = pen.outline(0.0);
    pen.surface.stroke(&path, &Brush::Solid(pen.color), &style);
}

fn triple_ring(pen: &mut Pen<'_>) {
    for i in 0..3 {
        pen.outline_stroke(f64::from(i) * 0.015, 0.015);
    }
}

fn square_dots(pen: &mut Pen<'_>) {
    let half = pen.f(0.008);
    let square = rect_path(Rect::new(-half, -half, half, half));
    for (_, angle) in anchors(24) {
        let origin = pen.at(angle, pen.g.radius);
        pen.local(origin, angle, |pen| pen.fill(&square, pen.color));
    }
}

fn radial_ticks(
    pen: &mut Pen<'_>,
    count: usize,
    width_frac: f64,
    mut half_len: impl FnMut() -> f64,
) {
    for (_, angle) in anchors(count) {
        let h = half_len();
        let tick = polyline(
            [pen.at(angle, pen.g.radius - h), pen.at(angle, pen.g.radius + h)],
            false,
        );
        pen.stroke(&tick, pen.color, width_frac);
    }
}

fn sun_rays(pen: &mut Pen<'_>) {
    let h = pen.f(0.025);
    radial_ticks(pen, 36, 0.015, || h);
}

fn barcode(pen: &mut Pen<'_>, entropy: &mut dyn Entropy) {
    let (long, short) = (pen.f(0.035), pen.f(0.012));
    radial_ticks(pen, 100, 0.005, || {
        let h = if entropy.next_f64() > 0.5 { long } else { short };
        h / 2.0
    });
}

fn circuit(pen: &mut Pen<'_>) {
    pen.outline_stroke(0.0, 0.005);
    let nodes: Vec<Point> = match pen.shape {
        FrameShape::Circle => anchors(8).map(|(_, a)| pen.at(a, pen.g.radius)).collect(),
        FrameShape::Square => {
            let lo = pen.g.rect_pos;
            let hi = lo + pen.g.rect_size;
            let mid = pen.g.center.x;
            vec![
                Point::new(lo, lo),
                Point::new(mid, lo),
                Point::new(hi, lo),
                Point::new(hi, mid),
                Point::new(hi, hi),
                Point::new(mid, hi),
                Point::new(lo, hi),
                Point::new(lo, mid),
            ]
        }
    };
    let r = pen.f(0.015);
    for node in nodes {
        pen.fill(&circle_path(node, r), pen.color);
    }
}

fn dna(pen: &mut Pen<'_>) {
    let (amp, r) = (pen.f(0.02), pen.f(0.005));
    for (i, angle) in anchors(40) {
        let offset = (i as f64 * 0.5).sin() * amp;
        let dot = circle_path(pen.at(angle, pen.g.radius + offset), r);
        pen.fill(&dot, pen.color);
    }
}

fn wave_double(pen: &mut Pen<'_>) {
    let (step, amp) = (pen.f(0.025), pen.f(0.012));
    for j in 0..2 {
        let base = pen.g.radius - f64::from(j) * step;
        let path = pen.modulated_ring(100, false, |_, angle| base + (angle * 10.0).sin() * amp);
        pen.stroke(&path, pen.color, 0.015);
    }
}

fn glitch(pen: &mut Pen<'_>, secondary: Option<Color>, entropy: &mut dyn Entropy) {
    let (span, half) = (pen.f(0.01), pen.f(0.005));
    let outline = pen.outline(0.0);
    for pass in 0..3 {
        let dx = entropy.next_f64() * span - half;
        let dy = entropy.next_f64() * span - half;
        let color = if pass == 0 {
            pen.color
        } else {
            secondary.unwrap_or(Color::CYAN)
        };
        pen.surface.save();
        pen.surface.concat(Affine::translate((dx, dy)));
        pen.stroke(&outline, color, 0.015);
        pen.surface.restore();
    }
}

fn pixel(pen: &mut Pen<'_>) {
    let edge = pen.f(0.015);
    for (_, angle) in anchors(32) {
        let p = pen.at(angle, pen.g.radius);
        let square = rect_path(Rect::from_center_size(p, (edge, edge)));
        pen.fill(&square, pen.color);
    }
}

fn shards(pen: &mut Pen<'_>) {
    let (tip, half_base) = (pen.f(0.025), pen.f(0.012));
    let shard = polyline(
        [
            Point::new(0.0, -tip),
            Point::new(half_base, tip),
            Point::new(-half_base, tip),
        ],
        true,
    );
    for (_, angle) in anchors(16) {
        let origin = pen.at(angle, pen.g.radius);
        pen.local(origin, angle + FRAC_PI_2, |pen| pen.fill(&shard, pen.color));
    }
}

fn vignette(pen: &mut Pen<'_>) {
    let spread = pen.f(0.05);
    let brush = Brush::radial(
        pen.g.center,
        pen.g.radius - spread,
        pen.g.radius + spread,
        Color::TRANSPARENT,
        pen.color,
    );
    let area = pen.outline(-0.025);
    pen.fill(&area, brush);
}

fn flower(pen: &mut Pen<'_>) {
    let (radius, amp) = (pen.g.radius, pen.f(0.035));
    // One sample per degree; `modulated_ring` spaces samples by `2π / 360`.
    let path = pen.modulated_ring(360, false, |_, angle| {
        radius + (angle * 4.0).sin().abs() * amp
    });
    pen.stroke(&path, pen.color, 0.02);
}

fn hex_grid(pen: &mut Pen<'_>) {
    let r = pen.f(0.02);
    let hex = polyline(
        anchors(6).map(|(_, a)| {
            let (sin, cos) = a.sin_cos();
            Point::new(cos * r, sin * r)
        }),
        true,
    );
    for (_, angle) in anchors(12) {
        let origin = pen.at(angle, pen.g.radius);
        pen.local(origin, angle, |pen| pen.stroke(&hex, pen.color, 0.015));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/border.rs"]
mod tests;
