use crate::catalog::BorderPreset;
use crate::compose::pipeline::build_thread_pool;
use crate::foundation::core::FrameShape;
use crate::foundation::error::{CircleFxError, CircleFxResult};
use crate::foundation::rng::Rng64;
use crate::render::border::draw_border;
use crate::render::raster::RasterSurface;
use image::RgbaImage;
use rayon::prelude::*;

/// Layout and rendering controls for a preset contact sheet.
#[derive(Clone, Debug)]
pub struct SheetOpts {
    /// Edge length of one cell in pixels.
    pub cell_size: u32,
    /// Cells per row.
    pub columns: u32,
    /// Progress value handed to every preset.
    pub progress: f64,
    /// Frame shape for every cell.
    pub shape: FrameShape,
    /// Render cells on a rayon pool.
    pub parallel: bool,
    /// Pool size when `parallel`.
    pub threads: Option<usize>,
    /// Seed for the random patterns.
    pub seed: u64,
}

impl Default for SheetOpts {
    fn default() -> Self {
        Self {
            cell_size: 128,
            columns: 6,
            progress: 0.75,
            shape: FrameShape::Circle,
            parallel: true,
            threads: None,
            seed: 0,
        }
    }
}

/// Render `presets` into a grid, row-major in the given order, on a transparent background.
#[tracing::instrument(skip_all, fields(count = presets.len(), cell = opts.cell_size))]
pub fn render_preset_sheet(
    presets: &[&BorderPreset],
    opts: &SheetOpts,
) -> CircleFxResult<RgbaImage> {
    if presets.is_empty() {
        return Err(CircleFxError::validation("preset sheet needs at least one preset"));
    }
    if opts.cell_size == 0 || opts.columns == 0 {
        return Err(CircleFxError::validation(
            "sheet cell_size and columns must be >= 1",
        ));
    }

    let render_cell = |(i, preset): (usize, &&BorderPreset)| -> CircleFxResult<RgbaImage> {
        let mut surface = RasterSurface::square(opts.cell_size)?;
        let req = preset.draw_request(f64::from(opts.cell_size), opts.progress, opts.shape);
        draw_border(&mut surface, &req, &mut Rng64::for_index(opts.seed, i as u64));
        Ok(surface.to_rgba_image())
    };

    let cells = if opts.parallel {
        let pool = build_thread_pool(opts.threads)?;
        pool.install(|| {
            presets
                .par_iter()
                .enumerate()
                .map(render_cell)
                .collect::<CircleFxResult<Vec<_>>>()
        })?
    } else {
        presets
            .iter()
            .enumerate()
            .map(render_cell)
            .collect::<CircleFxResult<Vec<_>>>()?
    };

    let columns = opts.columns.min(cells.len() as u32);
    let rows = (cells.len() as u32).div_ceil(columns);
    let mut sheet = RgbaImage::new(columns * opts.cell_size, rows * opts.cell_size);
    for (i, cell) in cells.iter().enumerate() {
        let i = i as u32;
        let x = (i % columns) * opts.cell_size;
        let y = (i / columns) * opts.cell_size;
        image::imageops::replace(&mut sheet, cell, i64::from(x), i64::from(y));
    }
    tracing::debug!(columns, rows, "preset sheet rendered");
    Ok(sheet)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/sheet.rs"]
mod tests;
