use crate::buffer::{self, PixelBuffer};
use crate::error::ProcessingError;
use image::imageops::{self, FilterType};

/// Interpolation used for every resize. Nearest-neighbour blocks up badly
/// past 2x, so only a windowed-sinc filter is used here.
const FILTER: FilterType = FilterType::Lanczos3;

/// Output size for a `source` frame scaled toward a `target` box.
///
/// Sources that already cover the box (or any source when `upscale` is off)
/// keep their size. Otherwise the frame is fitted by width, falling back to
/// fitting by height when the width fit would overflow the box.
pub fn fit_dimensions(source: (u32, u32), target: (u32, u32), upscale: bool) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;

    if !upscale || (src_w >= tgt_w && src_h >= tgt_h) {
        return source;
    }
    if src_w == 0 || src_h == 0 || tgt_w == 0 || tgt_h == 0 {
        return source;
    }

    let aspect = src_w as f64 / src_h as f64;

    let fit_height = (tgt_w as f64 / aspect).round() as u32;
    let (width, height) = if fit_height > tgt_h {
        let fit_width = (tgt_h as f64 * aspect).round() as u32;
        (fit_width.min(tgt_w), tgt_h)
    } else {
        (tgt_w, fit_height)
    };

    (width.max(1), height.max(1))
}

/// Resize `buffer` toward `target`, preserving its aspect ratio
pub fn resample(
    buffer: PixelBuffer,
    target: (u32, u32),
    upscale: bool,
) -> Result<PixelBuffer, ProcessingError> {
    let source = buffer.dimensions();
    let (width, height) = fit_dimensions(source, target, upscale);

    if (width, height) == source {
        return Ok(buffer);
    }

    buffer::check_dimensions(width, height)?;
    // vertical pass output: source width at the new height, f32 samples
    buffer::check_dimensions(source.0, height)?;

    tracing::debug!(
        "Resampling {}x{} -> {}x{} (target {}x{})",
        source.0,
        source.1,
        width,
        height,
        target.0,
        target.1
    );

    let image = buffer.into_rgba_image()?;
    let resized = imageops::resize(&image, width, height, FILTER);
    Ok(PixelBuffer::from_rgba_image(resized))
}
