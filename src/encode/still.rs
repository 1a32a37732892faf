use crate::foundation::error::{CircleFxError, CircleFxResult};
use anyhow::Context as _;
use image::RgbaImage;
use std::path::Path;

/// Write `image` as an RGBA PNG, creating parent directories.
pub fn write_png(path: &Path, image: &RgbaImage) -> CircleFxResult<()> {
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        image.as_raw(),
        image.width(),
        image.height(),
        image::ExtendedColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| CircleFxError::encode(format!("failed to write '{}': {e}", path.display())))
}

/// Encode `image` as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> CircleFxResult<Vec<u8>> {
    let mut buf = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| CircleFxError::encode(format!("png encode failed: {e}")))?;
    Ok(buf)
}

/// Create the parent directory of `path` if needed.
pub fn ensure_parent_dir(path: &Path) -> CircleFxResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/still.rs"]
mod tests;
