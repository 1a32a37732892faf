use crate::compose::frame::{BorderStyle, compose_still, compose_video_frame};
use crate::compose::sampler::{
    CancelToken, FrameSampler, SampleOpts, SampledFrame, VideoFrameSource,
};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::encode::still::write_png;
use crate::foundation::error::{CircleFxError, CircleFxResult};
use crate::foundation::rng::{Entropy, Rng64};
use crate::media::decode::load_source_image;
use image::RgbaImage;
use rayon::prelude::*;
use std::path::Path;

/// Controls for an animated export.
#[derive(Clone, Debug)]
pub struct AnimationOpts {
    /// Output edge length in pixels.
    pub size: u32,
    /// Which source frames to capture.
    pub sample: SampleOpts,
    /// Display time of each output frame.
    pub frame_delay_ms: u32,
    /// Compose captured frames on a rayon pool.
    pub parallel: bool,
    /// Pool size when `parallel`; `None` uses rayon's default.
    pub threads: Option<usize>,
    /// Seed for the random patterns; `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for AnimationOpts {
    fn default() -> Self {
        Self {
            size: 512,
            sample: SampleOpts::default(),
            frame_delay_ms: 100,
            parallel: false,
            threads: None,
            seed: None,
        }
    }
}

/// Frame accounting for one animated export.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimationStats {
    /// Timestamps planned.
    pub frames_requested: u32,
    /// Frames captured, composed and pushed.
    pub frames_captured: u32,
    /// Timestamps whose seek or capture failed.
    pub frames_skipped: u32,
}

/// Sample `source`, compose every captured frame with `style`, and push the result to `sink`.
///
/// Sampling is sequential. Composition runs on a rayon pool when `opts.parallel` is set; each
/// frame gets its own entropy stream keyed by its sample index, so parallel and sequential runs
/// with the same seed produce identical frames. The sink sees nothing unless every frame is
/// ready: a cancelled run returns [`CircleFxError::Cancelled`] without calling `begin`.
#[tracing::instrument(
    skip_all,
    fields(size = opts.size, frames = opts.sample.frame_count, parallel = opts.parallel)
)]
pub fn export_animation(
    source: &mut dyn VideoFrameSource,
    style: &BorderStyle,
    opts: &AnimationOpts,
    cancel: &CancelToken,
    sink: &mut dyn FrameSink,
) -> CircleFxResult<AnimationStats> {
    if opts.size == 0 {
        return Err(CircleFxError::validation("animation size must be >= 1"));
    }
    if opts.sample.frame_count == 0 {
        return Err(CircleFxError::validation("frame_count must be >= 1"));
    }
    let pool = if opts.parallel {
        Some(build_thread_pool(opts.threads)?)
    } else {
        None
    };

    let mut sampler = FrameSampler::new(source, &opts.sample, cancel.clone());
    let mut captured = Vec::new();
    for frame in sampler.by_ref() {
        captured.push(frame?);
    }
    let skipped = sampler.skipped();
    if captured.is_empty() {
        return Err(CircleFxError::media("no video frames could be captured"));
    }
    cancel.check()?;

    let seed = opts.seed.unwrap_or_else(|| Rng64::from_clock().next_u64());
    let composed = match &pool {
        Some(pool) => pool.install(|| {
            captured
                .par_iter()
                .map(|f| compose_sampled(f, style, opts.size, seed))
                .collect::<CircleFxResult<Vec<_>>>()
        })?,
        None => captured
            .iter()
            .map(|f| compose_sampled(f, style, opts.size, seed))
            .collect::<CircleFxResult<Vec<_>>>()?,
    };
    cancel.check()?;

    let frames_captured = composed.len() as u32;
    sink.begin(SinkConfig {
        width: opts.size,
        height: opts.size,
        frame_delay_ms: opts.frame_delay_ms,
        frame_count: frames_captured,
    })?;
    for (idx, image) in &composed {
        sink.push_frame(*idx, image)?;
    }
    sink.end()?;

    let stats = AnimationStats {
        frames_requested: opts.sample.frame_count,
        frames_captured,
        frames_skipped: skipped,
    };
    tracing::info!(
        captured = stats.frames_captured,
        skipped = stats.frames_skipped,
        "animation exported"
    );
    Ok(stats)
}

fn compose_sampled(
    frame: &SampledFrame,
    style: &BorderStyle,
    size: u32,
    seed: u64,
) -> CircleFxResult<(u32, RgbaImage)> {
    let mut entropy = Rng64::for_index(seed, u64::from(frame.index));
    let image = compose_video_frame(&frame.image, style, size, &mut entropy)?;
    tracing::debug!(index = frame.index, t = frame.timestamp, "composed frame");
    Ok((frame.index, image))
}

/// Compose a still from the image at `source_path` and write it as PNG to `out`.
///
/// An unreadable source is logged and replaced by a border-only render.
#[tracing::instrument(skip_all, fields(size = size, out = %out.display()))]
pub fn export_still(
    source_path: Option<&Path>,
    style: &BorderStyle,
    size: u32,
    out: &Path,
    entropy: &mut dyn Entropy,
) -> CircleFxResult<()> {
    if size == 0 {
        return Err(CircleFxError::validation("still size must be >= 1"));
    }
    let source = source_path.and_then(load_source_image);
    let image = compose_still(source.as_ref(), style, size, entropy)?;
    write_png(out, &image)?;
    tracing::info!(with_source = source.is_some(), "still exported");
    Ok(())
}

pub(crate) fn build_thread_pool(threads: Option<usize>) -> CircleFxResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(CircleFxError::validation("'threads' must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| CircleFxError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/pipeline.rs"]
mod tests;
