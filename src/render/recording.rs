use crate::foundation::core::{Affine, BezPath, Point, Rect};
use crate::render::surface::{Brush, StrokeStyle, Surface};
use image::RgbaImage;

/// One recorded drawing call, with the transform that was current when it was issued.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// [`Surface::stroke`].
    Stroke {
        /// Path in user space.
        path: BezPath,
        /// Paint source.
        brush: Brush,
        /// Stroke geometry in user units.
        style: StrokeStyle,
        /// User-to-device transform.
        transform: Affine,
        /// Number of clip paths active at the time of the call.
        clip_depth: usize,
    },
    /// [`Surface::fill`].
    Fill {
        /// Path in user space.
        path: BezPath,
        /// Paint source.
        brush: Brush,
        /// User-to-device transform.
        transform: Affine,
        /// Number of clip paths active at the time of the call.
        clip_depth: usize,
    },
    /// [`Surface::clip`].
    Clip {
        /// Clip path in user space.
        path: BezPath,
        /// User-to-device transform.
        transform: Affine,
    },
    /// [`Surface::draw_image`].
    Image {
        /// Source width in pixels.
        width: u32,
        /// Source height in pixels.
        height: u32,
        /// Destination rectangle in user space.
        dst: Rect,
        /// User-to-device transform.
        transform: Affine,
    },
}

impl DrawCommand {
    /// Re-express the command in device space, then apply `post` (e.g. a `1 / size` scale).
    ///
    /// The returned command carries an identity transform. Stroke widths, dash lengths and
    /// gradient radii are scaled by the uniform scale factor of the combined transform.
    pub fn to_device(&self, post: Affine) -> DrawCommand {
        match self {
            Self::Stroke {
                path,
                brush,
                style,
                transform,
                clip_depth,
            } => {
                let t = post * *transform;
                let k = uniform_scale(t);
                Self::Stroke {
                    path: t * path.clone(),
                    brush: map_brush(brush, t),
                    style: StrokeStyle {
                        width: style.width * k,
                        dash: style
                            .dash
                            .as_ref()
                            .map(|d| d.iter().map(|v| v * k).collect()),
                    },
                    transform: Affine::IDENTITY,
                    clip_depth: *clip_depth,
                }
            }
            Self::Fill {
                path,
                brush,
                transform,
                clip_depth,
            } => {
                let t = post * *transform;
                Self::Fill {
                    path: t * path.clone(),
                    brush: map_brush(brush, t),
                    transform: Affine::IDENTITY,
                    clip_depth: *clip_depth,
                }
            }
            Self::Clip { path, transform } => Self::Clip {
                path: post * *transform * path.clone(),
                transform: Affine::IDENTITY,
            },
            Self::Image {
                width,
                height,
                dst,
                transform,
            } => Self::Image {
                width: *width,
                height: *height,
                dst: (post * *transform).transform_rect_bbox(*dst),
                transform: Affine::IDENTITY,
            },
        }
    }

    /// The recorded path, if the command has one.
    pub fn path(&self) -> Option<&BezPath> {
        match self {
            Self::Stroke { path, .. } | Self::Fill { path, .. } | Self::Clip { path, .. } => {
                Some(path)
            }
            Self::Image { .. } => None,
        }
    }

    /// The recorded brush, if the command paints.
    pub fn brush(&self) -> Option<&Brush> {
        match self {
            Self::Stroke { brush, .. } | Self::Fill { brush, .. } => Some(brush),
            _ => None,
        }
    }
}

fn uniform_scale(t: Affine) -> f64 {
    t.determinant().abs().sqrt()
}

fn map_brush(brush: &Brush, t: Affine) -> Brush {
    let map = |p: Point| t * p;
    match brush {
        Brush::Solid(c) => Brush::Solid(*c),
        Brush::Linear { start, end, stops } => Brush::Linear {
            start: map(*start),
            end: map(*end),
            stops: stops.clone(),
        },
        Brush::Radial {
            center,
            inner_radius,
            outer_radius,
            stops,
        } => {
            let k = uniform_scale(t);
            Brush::Radial {
                center: map(*center),
                inner_radius: inner_radius * k,
                outer_radius: outer_radius * k,
                stops: stops.clone(),
            }
        }
    }
}

#[derive(Clone, Copy)]
struct RecordState {
    transform: Affine,
    clip_depth: usize,
}

/// [`Surface`] that records drawing calls instead of rasterizing them.
///
/// Useful in tests: the command list exposes exact geometry, which pixel comparisons cannot.
pub struct RecordingSurface {
    width: u32,
    height: u32,
    state: RecordState,
    stack: Vec<RecordState>,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Empty recorder reporting `width x height`.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            state: RecordState {
                transform: Affine::IDENTITY,
                clip_depth: 0,
            },
            stack: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Borrow the recorded commands in call order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the recorder empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Current save-stack depth.
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }
}

impl Surface for RecordingSurface {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn save(&mut self) {
        self.stack.push(self.state);
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
        self.commands.push(DrawCommand::Stroke {
            path: path.clone(),
            brush: brush.clone(),
            style: style.clone(),
            transform: self.state.transform,
            clip_depth: self.state.clip_depth,
        });
    }

    fn fill(&mut self, path: &BezPath, brush: &Brush) {
        self.commands.push(DrawCommand::Fill {
            path: path.clone(),
            brush: brush.clone(),
            transform: self.state.transform,
            clip_depth: self.state.clip_depth,
        });
    }

    fn clip(&mut self, path: &BezPath) {
        self.commands.push(DrawCommand::Clip {
            path: path.clone(),
            transform: self.state.transform,
        });
        self.state.clip_depth += 1;
    }

    fn draw_image(&mut self, image: &RgbaImage, dst: Rect) {
        self.commands.push(DrawCommand::Image {
            width: image.width(),
            height: image.height(),
            dst,
            transform: self.state.transform,
        });
    }

    fn clear(&mut self) {
        self.commands.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
