//! Source media: still images decoded with `image`, video frames through system `ffmpeg`.

/// Still-image decoding.
pub mod decode;
/// `ffprobe`/`ffmpeg` video frame source.
pub mod video;
