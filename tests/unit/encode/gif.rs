use super::*;
use image::AnimationDecoder;
use image::codecs::gif::GifDecoder;
use std::io::{self, Cursor, Write};

fn cfg(frame_count: u32) -> SinkConfig {
    SinkConfig {
        width: 8,
        height: 8,
        frame_delay_ms: 100,
        frame_count,
    }
}

#[test]
fn writes_looping_gif_with_delays() {
    let mut buf = Vec::new();
    {
        let mut sink = GifSink::new(&mut buf);
        sink.begin(cfg(3)).unwrap();
        for i in 0..3u32 {
            let img = RgbaImage::from_pixel(8, 8, image::Rgba([(i * 80) as u8, 0, 0, 255]));
            sink.push_frame(i, &img).unwrap();
        }
        sink.end().unwrap();
        assert_eq!(sink.frames_written(), 3);
    }
    assert_eq!(&buf[..6], b"GIF89a");

    let decoder = GifDecoder::new(Cursor::new(&buf)).unwrap();
    let frames = decoder.into_frames().collect_frames().unwrap();
    assert_eq!(frames.len(), 3);
    for f in &frames {
        let (num, den) = f.delay().numer_denom_ms();
        assert_eq!(num / den, 100);
        assert_eq!(f.buffer().dimensions(), (8, 8));
    }
}

#[test]
fn rejects_out_of_order_and_mismatched_frames() {
    let mut buf = Vec::new();
    let mut sink = GifSink::new(&mut buf);
    sink.begin(cfg(2)).unwrap();
    let img = RgbaImage::new(8, 8);
    sink.push_frame(1, &img).unwrap();
    assert!(sink.push_frame(1, &img).is_err());
    assert!(sink.push_frame(2, &RgbaImage::new(4, 4)).is_err());
}

#[test]
fn push_before_begin_and_empty_end_fail() {
    let mut buf = Vec::new();
    let mut sink = GifSink::new(&mut buf);
    assert!(sink.push_frame(0, &RgbaImage::new(8, 8)).is_err());
    sink.begin(cfg(1)).unwrap();
    assert!(sink.end().is_err());
}

#[test]
fn zero_sized_config_is_rejected() {
    let mut sink = GifSink::new(Vec::new());
    let err = sink
        .begin(SinkConfig {
            width: 0,
            ..cfg(1)
        })
        .unwrap_err();
    assert!(matches!(err, CircleFxError::Validation(_)));
}

struct FullDisk;

impl Write for FullDisk {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::StorageFull, "no space left"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn final_write_failure_is_reported() {
    let mut sink = GifSink::new(FullDisk);
    sink.begin(cfg(1)).unwrap();
    sink.push_frame(0, &RgbaImage::new(8, 8)).unwrap();
    let err = sink.end().unwrap_err();
    assert!(matches!(err, CircleFxError::Encode(_)));
    assert!(err.to_string().contains("no space left"));
}

#[test]
fn file_is_created_only_when_finished() {
    let dir = std::env::temp_dir().join(format!("circlefx-gif-{}", std::process::id()));
    let path = dir.join("nested").join("out.gif");

    let mut abandoned = GifSink::create(&path).unwrap();
    abandoned.begin(cfg(1)).unwrap();
    abandoned.push_frame(0, &RgbaImage::new(8, 8)).unwrap();
    drop(abandoned);
    assert!(!path.exists());

    let mut sink = GifSink::create(&path).unwrap();
    sink.begin(cfg(1)).unwrap();
    sink.push_frame(0, &RgbaImage::new(8, 8)).unwrap();
    sink.end().unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..6], b"GIF89a");
    assert!(sink.end().is_err());

    std::fs::remove_dir_all(&dir).unwrap();
}
