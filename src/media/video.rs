use crate::compose::sampler::VideoFrameSource;
use crate::foundation::error::{CircleFxError, CircleFxResult};
use image::RgbaImage;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
/// Basic metadata about a source video file.
pub struct VideoSourceInfo {
    /// Source path used for probing/decoding.
    #[cfg_attr(not(feature = "media-ffmpeg"), allow(dead_code))]
    pub source_path: PathBuf,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Container duration in seconds.
    pub duration_secs: f64,
}

/// Probe source video metadata through `ffprobe`.
#[cfg(feature = "media-ffmpeg")]
pub fn probe_video(source_path: &Path) -> CircleFxResult<VideoSourceInfo> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        streams: Vec<ProbeStream>,
        format: Option<ProbeFormat>,
    }

    let out = std::process::Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
        ])
        .arg(source_path)
        .output()
        .map_err(|e| CircleFxError::media(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(CircleFxError::media(format!(
            "ffprobe failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| CircleFxError::media(format!("ffprobe json parse failed: {e}")))?;
    let video_stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| CircleFxError::media("no video stream found"))?;
    let width = video_stream
        .width
        .ok_or_else(|| CircleFxError::media("missing video width from ffprobe"))?;
    let height = video_stream
        .height
        .ok_or_else(|| CircleFxError::media("missing video height from ffprobe"))?;
    let duration_secs = parsed
        .format
        .as_ref()
        .and_then(|f| f.duration.as_deref())
        .or(video_stream.duration.as_deref())
        .and_then(|d| d.trim().parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d >= 0.0)
        .ok_or_else(|| CircleFxError::media("missing video duration from ffprobe"))?;

    Ok(VideoSourceInfo {
        source_path: source_path.to_path_buf(),
        width,
        height,
        duration_secs,
    })
}

#[cfg(not(feature = "media-ffmpeg"))]
/// Probe source video metadata through `ffprobe`.
///
/// Returns an error when `media-ffmpeg` feature is disabled.
pub fn probe_video(_source_path: &Path) -> CircleFxResult<VideoSourceInfo> {
    Err(CircleFxError::media(
        "video sources require the 'media-ffmpeg' feature",
    ))
}

#[cfg(feature = "media-ffmpeg")]
/// Decode the RGBA frame shown at `time_sec`.
pub fn decode_video_frame(source: &VideoSourceInfo, time_sec: f64) -> CircleFxResult<RgbaImage> {
    let out = std::process::Command::new("ffmpeg")
        .args(["-v", "error", "-ss", &format!("{time_sec:.6}")])
        .arg("-i")
        .arg(&source.source_path)
        .args([
            "-frames:v",
            "1",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "pipe:1",
        ])
        .output()
        .map_err(|e| CircleFxError::media(format!("failed to run ffmpeg for video decode: {e}")))?;

    if !out.status.success() {
        return Err(CircleFxError::media(format!(
            "ffmpeg video decode failed for '{}' at {time_sec:.3}s: {}",
            source.source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let expected_len = source.width as usize * source.height as usize * 4;
    if expected_len == 0 {
        return Err(CircleFxError::media(
            "decoded video frame size is zero (invalid source dimensions)",
        ));
    }
    if out.stdout.len() < expected_len {
        return Err(CircleFxError::media(format!(
            "ffmpeg returned {} bytes at {time_sec:.3}s, expected {expected_len}",
            out.stdout.len()
        )));
    }

    let mut bytes = out.stdout;
    bytes.truncate(expected_len);
    RgbaImage::from_raw(source.width, source.height, bytes)
        .ok_or_else(|| CircleFxError::media("decoded frame buffer does not match dimensions"))
}

#[cfg(not(feature = "media-ffmpeg"))]
/// Decode the RGBA frame shown at `time_sec`.
///
/// Returns an error when `media-ffmpeg` feature is disabled.
pub fn decode_video_frame(_source: &VideoSourceInfo, _time_sec: f64) -> CircleFxResult<RgbaImage> {
    Err(CircleFxError::media(
        "video sources require the 'media-ffmpeg' feature",
    ))
}

/// [`VideoFrameSource`] that decodes one frame per capture with system `ffmpeg`.
///
/// Seeking only records the position; each capture runs a fresh `ffmpeg -ss` decode, so a capture
/// always reflects the most recent seek.
pub struct FfmpegVideoSource {
    info: VideoSourceInfo,
    position: Option<f64>,
}

impl FfmpegVideoSource {
    /// Probe `path` and prepare a source positioned nowhere.
    pub fn open(path: &Path) -> CircleFxResult<Self> {
        let info = probe_video(path)?;
        if !is_ffmpeg_on_path() {
            return Err(CircleFxError::media(
                "'ffmpeg' was not found on PATH",
            ));
        }
        tracing::debug!(
            path = %path.display(),
            width = info.width,
            height = info.height,
            duration = info.duration_secs,
            "opened video source"
        );
        Ok(Self {
            info,
            position: None,
        })
    }
}

impl VideoFrameSource for FfmpegVideoSource {
    fn duration_secs(&self) -> f64 {
        self.info.duration_secs
    }

    fn seek(&mut self, time_sec: f64) -> CircleFxResult<()> {
        if !time_sec.is_finite() || time_sec < 0.0 {
            return Err(CircleFxError::validation(format!(
                "seek time must be finite and non-negative, got {time_sec}"
            )));
        }
        self.position = Some(time_sec.min(self.info.duration_secs));
        Ok(())
    }

    fn capture(&mut self) -> CircleFxResult<RgbaImage> {
        let t = self
            .position
            .ok_or_else(|| CircleFxError::validation("capture called before seek"))?;
        decode_video_frame(&self.info, t)
    }
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/media/video.rs"]
mod tests;
