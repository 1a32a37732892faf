use crate::foundation::error::{CircleFxError, CircleFxResult};
use image::RgbaImage;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A seekable source of video frames with a single decode position.
///
/// The protocol is strictly sequential: `seek` returns once the frame at that time is ready, and
/// the following `capture` snapshots it. Implementations need not be thread-safe.
pub trait VideoFrameSource {
    /// Total duration in seconds.
    fn duration_secs(&self) -> f64;
    /// Move the decode position to `time_sec` and wait until the frame there is ready.
    fn seek(&mut self, time_sec: f64) -> CircleFxResult<()>;
    /// Snapshot the frame at the current position.
    fn capture(&mut self) -> CircleFxResult<RgbaImage>;
}

/// Shared cancellation flag.
///
/// Clones observe the same flag; cancel from any thread.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A token that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// `true` once [`Self::cancel`] has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// `Err(Cancelled)` when cancelled.
    pub fn check(&self) -> CircleFxResult<()> {
        if self.is_cancelled() {
            Err(CircleFxError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Frame sampling controls.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleOpts {
    /// Number of timestamps to sample.
    pub frame_count: u32,
    /// Only the first `max_duration_secs` of the source are sampled.
    pub max_duration_secs: f64,
    /// Give up after this many failed frames in a row. `0` never gives up.
    pub max_consecutive_failures: u32,
}

impl Default for SampleOpts {
    fn default() -> Self {
        Self {
            frame_count: 12,
            max_duration_secs: 3.0,
            max_consecutive_failures: 3,
        }
    }
}

/// One captured frame.
#[derive(Clone, Debug)]
pub struct SampledFrame {
    /// Position in the timestamp sequence (not the count of successful captures).
    pub index: u32,
    /// Source time in seconds.
    pub timestamp: f64,
    /// Captured pixels.
    pub image: RgbaImage,
}

/// Evenly spaced sample times: `t_i = i * min(duration, max_duration) / frame_count`.
///
/// A 4 s source with the defaults yields `0.0, 0.25, ..., 2.75`. Non-finite or negative
/// durations sample time zero repeatedly.
pub fn sample_timestamps(duration: f64, frame_count: u32, max_duration: f64) -> Vec<f64> {
    if frame_count == 0 {
        return Vec::new();
    }
    let span = if duration.is_finite() && duration > 0.0 {
        duration.min(max_duration.max(0.0))
    } else {
        0.0
    };
    let interval = span / f64::from(frame_count);
    (0..frame_count).map(|i| f64::from(i) * interval).collect()
}

/// Iterator over the ordered seek → capture sequence.
///
/// Yields `Ok` for each captured frame. Failed seeks or captures are logged and skipped; after
/// `max_consecutive_failures` failures in a row the iterator yields one `Err` and stops.
/// Cancellation is checked before every seek and capture and ends the sequence with
/// `Err(Cancelled)`.
pub struct FrameSampler<'a, S: VideoFrameSource + ?Sized> {
    source: &'a mut S,
    timestamps: Vec<f64>,
    next: usize,
    cancel: CancelToken,
    max_failures: u32,
    failures_in_row: u32,
    skipped: u32,
    done: bool,
}

impl<'a, S: VideoFrameSource + ?Sized> FrameSampler<'a, S> {
    /// Plan the timestamps for `source` under `opts`.
    pub fn new(source: &'a mut S, opts: &SampleOpts, cancel: CancelToken) -> Self {
        let timestamps = sample_timestamps(
            source.duration_secs(),
            opts.frame_count,
            opts.max_duration_secs,
        );
        Self {
            source,
            timestamps,
            next: 0,
            cancel,
            max_failures: opts.max_consecutive_failures,
            failures_in_row: 0,
            skipped: 0,
            done: false,
        }
    }

    /// Planned timestamps.
    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    /// Frames skipped so far.
    pub fn skipped(&self) -> u32 {
        self.skipped
    }

    fn capture_at(&mut self, t: f64) -> CircleFxResult<RgbaImage> {
        self.cancel.check()?;
        self.source.seek(t)?;
        self.cancel.check()?;
        self.source.capture()
    }
}

impl<S: VideoFrameSource + ?Sized> Iterator for FrameSampler<'_, S> {
    type Item = CircleFxResult<SampledFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done && self.next < self.timestamps.len() {
            let index = self.next;
            let t = self.timestamps[index];
            self.next += 1;

            match self.capture_at(t) {
                Ok(image) => {
                    self.failures_in_row = 0;
                    tracing::debug!(index, t, "captured frame");
                    return Some(Ok(SampledFrame {
                        index: index as u32,
                        timestamp: t,
                        image,
                    }));
                }
                Err(err) if err.is_cancelled() => {
                    self.done = true;
                    return Some(Err(err));
                }
                Err(err) => {
                    self.failures_in_row += 1;
                    self.skipped += 1;
                    tracing::warn!(index, t, error = %err, "skipping frame");
                    if self.max_failures > 0 && self.failures_in_row >= self.max_failures {
                        self.done = true;
                        return Some(Err(CircleFxError::media(format!(
                            "aborting after {} consecutive frame failures (last at {t:.3}s): {err}",
                            self.failures_in_row
                        ))));
                    }
                }
            }
        }
        None
    }
}

/// Run the whole sampling sequence and collect the captured frames in timestamp order.
///
/// Errors when cancelled, when the failure limit is hit, or when no frame could be captured.
#[tracing::instrument(level = "debug", skip_all, fields(frames = opts.frame_count))]
pub fn sample_frames<S: VideoFrameSource + ?Sized>(
    source: &mut S,
    opts: &SampleOpts,
    cancel: &CancelToken,
) -> CircleFxResult<Vec<SampledFrame>> {
    if opts.frame_count == 0 {
        return Err(CircleFxError::validation("frame_count must be >= 1"));
    }
    let sampler = FrameSampler::new(source, opts, cancel.clone());
    let frames = sampler.collect::<CircleFxResult<Vec<_>>>()?;
    if frames.is_empty() {
        return Err(CircleFxError::media("no video frames could be captured"));
    }
    Ok(frames)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/sampler.rs"]
mod tests;
