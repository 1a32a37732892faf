//! Composite frame building: a source bitmap clipped to the frame shape with a border on top.
//!
//! - [`frame`] builds single stills and video frames.
//! - [`sampler`] drives the ordered seek/capture sequence over a video source.
//! - [`pipeline`] runs sampling, composition and encoding for an animated export.
//! - [`sheet`] renders every preset into one contact sheet.

/// Still and video-frame composition.
pub mod frame;
/// Animated export orchestration.
pub mod pipeline;
/// Video frame sampling with cancellation.
pub mod sampler;
/// Preset contact sheets.
pub mod sheet;
