use crate::foundation::error::{CircleFxError, CircleFxResult};
use anyhow::Context;
use image::RgbaImage;
use std::path::Path;

/// Decode an encoded image (PNG, JPEG, GIF, ...) into straight-alpha RGBA8.
pub fn decode_source_image(bytes: &[u8]) -> CircleFxResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode source image from memory")?;
    let rgba = dyn_img.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(CircleFxError::media("source image has zero width or height"));
    }
    Ok(rgba)
}

/// Read and decode the image at `path`.
pub fn read_source_image(path: &Path) -> CircleFxResult<RgbaImage> {
    let bytes = std::fs::read(path).map_err(|e| {
        CircleFxError::media(format!("failed to read '{}': {e}", path.display()))
    })?;
    decode_source_image(&bytes)
}

/// Like [`read_source_image`], but a failure is logged and reported as `None`.
///
/// Still export treats an unreadable source as "no photo" and renders the border alone.
pub fn load_source_image(path: &Path) -> Option<RgbaImage> {
    match read_source_image(path) {
        Ok(img) => Some(img),
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "source image unavailable; rendering border only"
            );
            None
        }
    }
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/decode.rs"]
mod tests;
