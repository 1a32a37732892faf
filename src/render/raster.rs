use crate::foundation::color::Color;
use crate::foundation::core::{Affine, BezPath, Rect};
use crate::foundation::error::{CircleFxError, CircleFxResult};
use crate::media::decode::premultiply_rgba8_in_place;
use crate::render::surface::{Brush, GradientStop, StrokeStyle, Surface};
use image::RgbaImage;
use kurbo::PathEl;
use tiny_skia::{
    FillRule, FilterQuality, IntSize, LineCap, LineJoin, LinearGradient, Mask, Paint, PathBuilder,
    Pixmap, PixmapPaint, RadialGradient, Shader, SpreadMode, Stroke, StrokeDash, Transform,
};

#[derive(Clone)]
struct DrawState {
    transform: Affine,
    clip: Option<Mask>,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            clip: None,
        }
    }
}

/// Anti-aliased raster [`Surface`] backed by a `tiny-skia` pixmap.
///
/// Pixels are stored premultiplied; [`RasterSurface::to_rgba_image`] converts back to straight
/// alpha for encoding.
pub struct RasterSurface {
    pixmap: Pixmap,
    state: DrawState,
    stack: Vec<DrawState>,
}

impl RasterSurface {
    /// Allocate a transparent `width x height` surface.
    pub fn new(width: u32, height: u32) -> CircleFxResult<Self> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            CircleFxError::render(format!("failed to allocate {width}x{height} surface"))
        })?;
        Ok(Self {
            pixmap,
            state: DrawState::default(),
            stack: Vec::new(),
        })
    }

    /// Allocate a transparent square surface.
    pub fn square(size: u32) -> CircleFxResult<Self> {
        Self::new(size, size)
    }

    /// Surface width in pixels.
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Surface height in pixels.
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight-alpha RGBA8 at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        // `Pixmap::pixel` only bounds-checks the flat index.
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Raw premultiplied RGBA8 bytes, row-major.
    pub fn premultiplied_data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Fill every pixel with `color`, ignoring transform and clip.
    pub fn fill_all(&mut self, color: Color) {
        self.pixmap.fill(sk_color(color));
    }

    /// Straight-alpha copy of the pixels.
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            image::Rgba(self.pixel(x, y).unwrap_or([0, 0, 0, 0]))
        })
    }
}

impl Surface for RasterSurface {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn concat(&mut self, transform: Affine) {
        self.state.transform *= transform;
    }

    fn transform(&self) -> Affine {
        self.state.transform
    }

    fn stroke(&mut self, path: &BezPath, brush: &Brush, style: &StrokeStyle) {
        if !(style.width.is_finite() && style.width > 0.0) {
            return;
        }
        let (Some(path), Some(paint)) = (sk_path(path), sk_paint(brush)) else {
            return;
        };
        let stroke = sk_stroke(style);
        self.pixmap.stroke_path(
            &path,
            &paint,
            &stroke,
            sk_transform(self.state.transform),
            self.state.clip.as_ref(),
        );
    }

    fn fill(&mut self, path: &BezPath, brush: &Brush) {
        let (Some(path), Some(paint)) = (sk_path(path), sk_paint(brush)) else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &paint,
            FillRule::Winding,
            sk_transform(self.state.transform),
            self.state.clip.as_ref(),
        );
    }

    fn clip(&mut self, path: &BezPath) {
        let ts = sk_transform(self.state.transform);
        let sk = sk_path(path);
        if let Some(mask) = self.state.clip.as_mut() {
            match sk {
                Some(p) => mask.intersect_path(&p, FillRule::Winding, true, ts),
                None => mask.clear(),
            }
            return;
        }
        // An empty clip path hides everything, same as an all-zero mask.
        let Some(mut mask) = Mask::new(self.width(), self.height()) else {
            return;
        };
        if let Some(p) = sk {
            mask.fill_path(&p, FillRule::Winding, true, ts);
        }
        self.state.clip = Some(mask);
    }

    fn draw_image(&mut self, image: &RgbaImage, dst: Rect) {
        let (w, h) = image.dimensions();
        if w == 0 || h == 0 || dst.width() <= 0.0 || dst.height() <= 0.0 {
            return;
        }
        let Some(src) = pixmap_from_rgba(image) else {
            return;
        };
        let placement = Affine::translate((dst.x0, dst.y0))
            * Affine::scale_non_uniform(dst.width() / f64::from(w), dst.height() / f64::from(h));
        let paint = PixmapPaint {
            quality: FilterQuality::Bicubic,
            ..PixmapPaint::default()
        };
        self.pixmap.draw_pixmap(
            0,
            0,
            src.as_ref(),
            &paint,
            sk_transform(self.state.transform * placement),
            self.state.clip.as_ref(),
        );
    }

    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }
}

fn sk_transform(a: Affine) -> Transform {
    let [sx, ky, kx, sy, tx, ty] = a.as_coeffs();
    Transform::from_row(
        sx as f32, ky as f32, kx as f32, sy as f32, tx as f32, ty as f32,
    )
}

fn sk_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                pb.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32)
            }
            PathEl::CurveTo(p1, p2, p3) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

fn sk_color(c: Color) -> tiny_skia::Color {
    let [r, g, b, a] = c.to_rgba8();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

fn sk_stops(stops: &[GradientStop], remap: impl Fn(f64) -> f64) -> Vec<tiny_skia::GradientStop> {
    stops
        .iter()
        .map(|s| {
            let offset = remap(s.offset.clamp(0.0, 1.0)) as f32;
            tiny_skia::GradientStop::new(offset, sk_color(s.color))
        })
        .collect()
}

fn sk_shader(brush: &Brush) -> Option<Shader<'static>> {
    match brush {
        Brush::Solid(c) => Some(Shader::SolidColor(sk_color(*c))),
        Brush::Linear { start, end, stops } => {
            let fallback = stops.last().map(|s| Shader::SolidColor(sk_color(s.color)));
            LinearGradient::new(
                tiny_skia::Point::from_xy(start.x as f32, start.y as f32),
                tiny_skia::Point::from_xy(end.x as f32, end.y as f32),
                sk_stops(stops, |t| t),
                SpreadMode::Pad,
                Transform::identity(),
            )
            .or(fallback)
        }
        Brush::Radial {
            center,
            inner_radius,
            outer_radius,
            stops,
        } => {
            if !(*outer_radius > 0.0) {
                return None;
            }
            // Concentric two-radius gradient expressed as a single-radius one: offset 0 moves
            // out to `inner / outer`, and padding covers the disc inside the inner circle.
            let t0 = (inner_radius / outer_radius).clamp(0.0, 1.0);
            let c = tiny_skia::Point::from_xy(center.x as f32, center.y as f32);
            let fallback = stops.last().map(|s| Shader::SolidColor(sk_color(s.color)));
            RadialGradient::new(
                c,
                c,
                *outer_radius as f32,
                sk_stops(stops, |t| t0 + t * (1.0 - t0)),
                SpreadMode::Pad,
                Transform::identity(),
            )
            .or(fallback)
        }
    }
}

fn sk_paint(brush: &Brush) -> Option<Paint<'static>> {
    Some(Paint {
        shader: sk_shader(brush)?,
        anti_alias: true,
        ..Paint::default()
    })
}

fn sk_stroke(style: &StrokeStyle) -> Stroke {
    Stroke {
        width: style.width as f32,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        dash: style
            .dash
            .as_ref()
            .and_then(|d| StrokeDash::new(d.iter().map(|v| *v as f32).collect(), 0.0)),
        ..Stroke::default()
    }
}

fn pixmap_from_rgba(image: &RgbaImage) -> Option<Pixmap> {
    let size = IntSize::from_wh(image.width(), image.height())?;
    let mut data = image.as_raw().clone();
    premultiply_rgba8_in_place(&mut data);
    Pixmap::from_vec(data, size)
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
