//! circlefx draws procedural decorative borders around avatar-style frames.
//!
//! The core is [`draw_border`]: given a [`DrawRequest`] (pattern, colors, canvas size, progress
//! and frame shape) it draws one of 25 patterns onto any [`Surface`]. Output is a uniform scale of
//! the canvas size, so the same call serves a 64px preview and a 1024px export.
//!
//! Around the core:
//!
//! - [`catalog`] lists the built-in presets in two tiers
//! - [`compose`] clips a photo or video frame to the shape and layers the border on top
//! - [`encode`] writes PNG stills and looping GIFs through a [`FrameSink`]
//! - [`media`] decodes source images and samples video through `ffmpeg`
//! - [`config`] holds [`ExportSettings`]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

/// Built-in border presets.
pub mod catalog;
/// Still and animated export composition.
pub mod compose;
/// Export settings.
pub mod config;
/// Output encoders.
pub mod encode;
/// Shape-aware geometry shared by every pattern.
pub mod geometry;
/// Source image and video decoding.
pub mod media;
/// Border patterns and drawing surfaces.
pub mod render;

pub use crate::foundation::color::Color;
pub use crate::foundation::core::{Affine, BezPath, FrameShape, Point, Rect, Vec2};
pub use crate::foundation::error::{CircleFxError, CircleFxResult};
pub use crate::foundation::rng::{Entropy, Rng64};

pub use crate::catalog::{BorderPreset, Tier, all_presets, preset_by_id};
pub use crate::compose::frame::{BorderStyle, compose_still, compose_video_frame};
pub use crate::compose::pipeline::{AnimationOpts, AnimationStats, export_animation, export_still};
pub use crate::compose::sampler::{CancelToken, SampleOpts, VideoFrameSource, sample_frames};
pub use crate::compose::sheet::{SheetOpts, render_preset_sheet};
pub use crate::config::ExportSettings;
pub use crate::encode::gif::GifSink;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::geometry::{BorderGeometry, point_on_shape};
pub use crate::render::border::{DrawRequest, draw_border, draw_border_tag};
pub use crate::render::pattern::PatternKind;
pub use crate::render::raster::RasterSurface;
pub use crate::render::recording::{DrawCommand, RecordingSurface};
pub use crate::render::surface::{Brush, GradientStop, StrokeStyle, Surface};
