use crate::buffer::PixelBuffer;
use crate::error::ProcessingError;
use imageproc::filter::filter3x3;
use serde::Serialize;

/// 3x3 sharpening presets. Both kernels sum to 1 so flat regions pass through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SharpenKernel {
    /// Laplacian sharpen, centre 5 and -1 neighbours
    Strong,
    /// Softer variant that keeps gradients smooth on large upscales
    Gentle,
}

impl SharpenKernel {
    /// Row-major kernel weights
    pub fn weights(&self) -> [f32; 9] {
        match self {
            Self::Strong => [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0],
            Self::Gentle => [0.0, -0.3, 0.0, -0.3, 2.2, -0.3, 0.0, -0.3, 0.0],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Gentle => "gentle",
        }
    }
}

/// Convolve the RGB channels with `kernel`.
///
/// The filter reads from its own copy of the frame, so every output sees
/// unmodified neighbours; that copy is dropped when the call returns. Sums
/// are kept in f32 and rounded once on write-back. The outermost ring of
/// pixels and every alpha sample keep their input values.
pub fn sharpen(buffer: &mut PixelBuffer, kernel: &SharpenKernel) -> Result<(), ProcessingError> {
    let (width, height) = buffer.dimensions();
    if width < 3 || height < 3 {
        return Ok(());
    }

    let image = buffer.try_clone()?.into_rgba_image()?;
    let filtered = filter3x3::<_, f32, f32>(&image, &kernel.weights());

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let sums = filtered.get_pixel(x, y).0;
            let mut pixel = buffer.pixel(x, y);
            for (sample, sum) in pixel.iter_mut().zip(sums).take(3) {
                *sample = sum.round().clamp(0.0, 255.0) as u8;
            }
            buffer.put_pixel(x, y, pixel);
        }
    }

    Ok(())
}
