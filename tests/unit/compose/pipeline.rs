use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::color::Color;
use crate::foundation::core::FrameShape;
use crate::render::pattern::PatternKind;

struct FakeVideo {
    duration: f64,
    position: f64,
    seeks: usize,
    failing_captures: Vec<usize>,
    captures: usize,
    cancel_on_seek: Option<(usize, CancelToken)>,
}

impl FakeVideo {
    fn new(duration: f64) -> Self {
        Self {
            duration,
            position: 0.0,
            seeks: 0,
            failing_captures: Vec::new(),
            captures: 0,
            cancel_on_seek: None,
        }
    }
}

impl VideoFrameSource for FakeVideo {
    fn duration_secs(&self) -> f64 {
        self.duration
    }

    fn seek(&mut self, time_sec: f64) -> CircleFxResult<()> {
        if let Some((at, token)) = &self.cancel_on_seek
            && *at == self.seeks
        {
            token.cancel();
        }
        self.seeks += 1;
        self.position = time_sec;
        Ok(())
    }

    fn capture(&mut self) -> CircleFxResult<RgbaImage> {
        let n = self.captures;
        self.captures += 1;
        if self.failing_captures.contains(&n) {
            return Err(CircleFxError::media("decoder stalled"));
        }
        let v = (self.position * 50.0) as u8;
        Ok(RgbaImage::from_pixel(40, 24, image::Rgba([v, 80, 160, 255])))
    }
}

fn opts(size: u32) -> AnimationOpts {
    AnimationOpts {
        size,
        seed: Some(7),
        ..AnimationOpts::default()
    }
}

fn style() -> BorderStyle {
    BorderStyle::new(PatternKind::Glitch, Color::hex(0x22D3EE)).with_shape(FrameShape::Square)
}

#[test]
fn exports_twelve_ordered_frames() {
    let mut src = FakeVideo::new(4.0);
    let mut sink = InMemorySink::new();
    let stats = export_animation(&mut src, &style(), &opts(32), &CancelToken::new(), &mut sink)
        .unwrap();

    assert_eq!(
        stats,
        AnimationStats {
            frames_requested: 12,
            frames_captured: 12,
            frames_skipped: 0
        }
    );
    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height, cfg.frame_delay_ms), (32, 32, 100));
    assert_eq!(cfg.frame_count, 12);
    let idx: Vec<u32> = sink.frames().iter().map(|(i, _)| *i).collect();
    assert_eq!(idx, (0..12).collect::<Vec<_>>());
    assert!(sink.frames().iter().all(|(_, f)| f.dimensions() == (32, 32)));
    assert!(sink.is_finished());
}

#[test]
fn parallel_matches_sequential_for_a_fixed_seed() {
    let mut seq_sink = InMemorySink::new();
    export_animation(
        &mut FakeVideo::new(2.0),
        &style(),
        &opts(24),
        &CancelToken::new(),
        &mut seq_sink,
    )
    .unwrap();

    let par_opts = AnimationOpts {
        parallel: true,
        threads: Some(2),
        ..opts(24)
    };
    let mut par_sink = InMemorySink::new();
    export_animation(
        &mut FakeVideo::new(2.0),
        &style(),
        &par_opts,
        &CancelToken::new(),
        &mut par_sink,
    )
    .unwrap();

    assert_eq!(seq_sink.frames(), par_sink.frames());
}

#[test]
fn cancelled_run_never_touches_the_sink() {
    let cancel = CancelToken::new();
    let mut src = FakeVideo::new(4.0);
    src.cancel_on_seek = Some((5, cancel.clone()));
    let mut sink = InMemorySink::new();

    let err = export_animation(&mut src, &style(), &opts(16), &cancel, &mut sink).unwrap_err();
    assert!(err.is_cancelled());
    assert!(sink.config().is_none());
    assert!(sink.frames().is_empty());
    assert_eq!(src.captures, 5);
}

#[test]
fn failed_captures_are_skipped_but_order_is_kept() {
    let mut src = FakeVideo::new(4.0);
    src.failing_captures = vec![2, 7];
    let mut sink = InMemorySink::new();
    let stats =
        export_animation(&mut src, &style(), &opts(16), &CancelToken::new(), &mut sink).unwrap();

    assert_eq!(stats.frames_captured, 10);
    assert_eq!(stats.frames_skipped, 2);
    let idx: Vec<u32> = sink.frames().iter().map(|(i, _)| *i).collect();
    assert_eq!(idx, vec![0, 1, 3, 4, 5, 6, 8, 9, 10, 11]);
}

#[test]
fn consecutive_failures_abort_before_sink() {
    let mut src = FakeVideo::new(4.0);
    src.failing_captures = vec![4, 5, 6];
    let mut sink = InMemorySink::new();
    let err = export_animation(&mut src, &style(), &opts(16), &CancelToken::new(), &mut sink)
        .unwrap_err();
    assert!(matches!(err, CircleFxError::Media(_)));
    assert!(sink.config().is_none());
}

#[test]
fn invalid_options_are_rejected() {
    let mut sink = InMemorySink::new();
    let zero_size = export_animation(
        &mut FakeVideo::new(1.0),
        &style(),
        &opts(0),
        &CancelToken::new(),
        &mut sink,
    );
    assert!(matches!(zero_size, Err(CircleFxError::Validation(_))));

    let zero_threads = AnimationOpts {
        parallel: true,
        threads: Some(0),
        ..opts(8)
    };
    let res = export_animation(
        &mut FakeVideo::new(1.0),
        &style(),
        &zero_threads,
        &CancelToken::new(),
        &mut sink,
    );
    assert!(matches!(res, Err(CircleFxError::Validation(_))));
}

#[test]
fn still_export_falls_back_to_border_only() {
    let dir = std::env::temp_dir().join(format!("circlefx-pipeline-{}", std::process::id()));
    let out = dir.join("still.png");
    let missing = dir.join("does-not-exist.jpg");
    let mut rng = Rng64::new(1);

    export_still(
        Some(&missing),
        &BorderStyle::new(PatternKind::Minimal, Color::hex(0x3B82F6)),
        64,
        &out,
        &mut rng,
    )
    .unwrap();

    let img = image::open(&out).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (64, 64));
    assert_eq!(img.get_pixel(32, 32).0[3], 0);
    assert!(img.pixels().any(|p| p.0[3] > 0));
    std::fs::remove_dir_all(&dir).unwrap();
}
