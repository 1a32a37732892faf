//! Encoding sinks.
//!
//! Sinks consume composed frames in sample order and are driven by
//! [`export_animation`](crate::compose::pipeline::export_animation).

/// Animated GIF output through the `image` crate.
pub mod gif;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
/// Still PNG output.
pub mod still;
