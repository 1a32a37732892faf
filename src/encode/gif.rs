use crate::encode::sink::{FrameSink, SinkConfig};
use crate::encode::still::ensure_parent_dir;
use crate::foundation::error::{CircleFxError, CircleFxResult};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// NeuQuant sampling speed passed to the encoder (1 = best quality, 30 = fastest).
const GIF_SPEED: i32 = 10;

/// Sink that encodes frames into an infinitely looping GIF.
///
/// Frames are validated as they arrive and encoded in [`FrameSink::end`]. The finished bytes reach
/// the writer in one `write_all` + `flush`, so nothing is written for an export that never ends.
pub struct GifSink<W: Write + Send> {
    writer: W,
    cfg: Option<SinkConfig>,
    frames: Vec<Frame>,
    last_idx: Option<u32>,
    finished: bool,
}

impl<W: Write + Send> GifSink<W> {
    /// Sink writing into `writer` once finished.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            cfg: None,
            frames: Vec::new(),
            last_idx: None,
            finished: false,
        }
    }

    /// Frames accepted so far.
    pub fn frames_written(&self) -> u32 {
        self.frames.len() as u32
    }

    fn encode(&self) -> CircleFxResult<Vec<u8>> {
        let mut bytes = Vec::new();
        {
            let mut encoder = GifEncoder::new_with_speed(&mut bytes, GIF_SPEED);
            encoder
                .set_repeat(Repeat::Infinite)
                .map_err(|e| CircleFxError::encode(format!("gif repeat setup failed: {e}")))?;
            for (i, frame) in self.frames.iter().enumerate() {
                encoder.encode_frame(frame.clone()).map_err(|e| {
                    CircleFxError::encode(format!("gif frame {i} encode failed: {e}"))
                })?;
            }
            // The trailer is written when the encoder drops.
        }
        Ok(bytes)
    }
}

impl GifSink<DeferredFile> {
    /// Sink writing to `path`, creating parent directories.
    ///
    /// The file itself is only created when the finished GIF is written.
    pub fn create(path: &Path) -> CircleFxResult<Self> {
        ensure_parent_dir(path)?;
        Ok(Self::new(DeferredFile::new(path)))
    }
}

impl<W: Write + Send> FrameSink for GifSink<W> {
    fn begin(&mut self, cfg: SinkConfig) -> CircleFxResult<()> {
        if self.cfg.is_some() || self.finished {
            return Err(CircleFxError::encode("gif sink already started"));
        }
        if cfg.width == 0 || cfg.height == 0 {
            return Err(CircleFxError::validation(
                "gif sink width/height must be non-zero",
            ));
        }
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(CircleFxError::validation(format!(
                "gif frames are limited to 65535px, got {}x{}",
                cfg.width, cfg.height
            )));
        }
        self.frames = Vec::with_capacity(cfg.frame_count as usize);
        self.last_idx = None;
        self.cfg = Some(cfg);
        Ok(())
    }

    fn push_frame(&mut self, idx: u32, frame: &RgbaImage) -> CircleFxResult<()> {
        if self.finished {
            return Err(CircleFxError::encode("gif sink already finished"));
        }
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| CircleFxError::encode("gif sink not started"))?;
        if let Some(last) = self.last_idx
            && idx <= last
        {
            return Err(CircleFxError::validation(format!(
                "frames must be pushed in increasing order (got {idx} after {last})"
            )));
        }
        if frame.dimensions() != (cfg.width, cfg.height) {
            return Err(CircleFxError::validation(format!(
                "frame {idx} is {}x{}, expected {}x{}",
                frame.width(),
                frame.height(),
                cfg.width,
                cfg.height
            )));
        }
        let delay = Delay::from_numer_denom_ms(cfg.frame_delay_ms, 1);
        self.frames.push(Frame::from_parts(frame.clone(), 0, 0, delay));
        self.last_idx = Some(idx);
        Ok(())
    }

    fn end(&mut self) -> CircleFxResult<()> {
        if self.finished {
            return Err(CircleFxError::encode("gif sink already finished"));
        }
        if self.frames.is_empty() {
            return Err(CircleFxError::encode("gif sink received no frames"));
        }
        let bytes = self.encode()?;
        self.writer
            .write_all(&bytes)
            .and_then(|()| self.writer.flush())
            .map_err(|e| CircleFxError::encode(format!("gif write failed: {e}")))?;

        self.finished = true;
        tracing::debug!(bytes = bytes.len(), "gif finished");
        Ok(())
    }
}

/// File writer that creates its file on the first write.
#[derive(Debug)]
pub struct DeferredFile {
    path: PathBuf,
    file: Option<BufWriter<File>>,
}

impl DeferredFile {
    /// Writer targeting `path`; nothing touches the filesystem yet.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            file: None,
        }
    }

    /// Whether the file has been created.
    pub fn is_created(&self) -> bool {
        self.file.is_some()
    }

    fn file_mut(&mut self) -> io::Result<&mut BufWriter<File>> {
        if self.file.is_none() {
            let file = File::create(&self.path).map_err(|e| {
                io::Error::new(e.kind(), format!("create '{}': {e}", self.path.display()))
            })?;
            self.file = Some(BufWriter::new(file));
        }
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::other("deferred file missing after create"))
    }
}

impl Write for DeferredFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file_mut()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(f) => f.flush(),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
