use crate::buffer::{PixelBuffer, CHANNELS};
use serde::Serialize;

/// Mid-grey pivot for the contrast stretch
const CONTRAST_PIVOT: f32 = 128.0;

/// Mean luminance under which a frame is brightened harder
const DIM_LUMINANCE: f64 = 100.0;
/// Luminance window in which a frame gets the stronger contrast stretch
const MID_LUMINANCE: (f64, f64) = (50.0, 200.0);

/// Brightness, contrast and optional saturation factors for one pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorAdjustment {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: Option<f32>,
}

impl ColorAdjustment {
    /// Factors that leave every pixel unchanged
    pub fn identity() -> Self {
        Self {
            brightness: 1.0,
            contrast: 1.0,
            saturation: None,
        }
    }

    /// Factors picked from a frame's luminance statistics
    pub fn adaptive(analysis: &ColorAnalysis) -> Self {
        Self {
            brightness: if analysis.needs_brightness_boost { 1.2 } else { 1.05 },
            contrast: if analysis.needs_contrast_boost { 1.15 } else { 1.1 },
            saturation: None,
        }
    }
}

/// Luminance summary of a frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorAnalysis {
    pub average_luminance: f64,
    pub needs_brightness_boost: bool,
    pub needs_contrast_boost: bool,
}

/// Mean Rec.601 luminance of the frame and the boosts it calls for
pub fn analyze_colors(buffer: &PixelBuffer) -> ColorAnalysis {
    let mut total = 0.0f64;
    let mut count = 0usize;
    for px in buffer.samples().chunks_exact(CHANNELS) {
        total += 0.299 * px[0] as f64 + 0.587 * px[1] as f64 + 0.114 * px[2] as f64;
        count += 1;
    }
    let average_luminance = if count == 0 { 0.0 } else { total / count as f64 };

    ColorAnalysis {
        average_luminance,
        needs_brightness_boost: average_luminance < DIM_LUMINANCE,
        needs_contrast_boost: average_luminance > MID_LUMINANCE.0
            && average_luminance < MID_LUMINANCE.1,
    }
}

/// Apply brightness, then contrast, then saturation to every pixel in place.
///
/// Each stage works on the clamped output of the previous one and everything
/// stays in floating point until the final write. Alpha is never touched.
pub fn adjust_colors(buffer: &mut PixelBuffer, adjustment: &ColorAdjustment) {
    for px in buffer.samples_mut().chunks_exact_mut(CHANNELS) {
        let mut rgb = [px[0] as f32, px[1] as f32, px[2] as f32];

        for v in rgb.iter_mut() {
            *v = (*v * adjustment.brightness).clamp(0.0, 255.0);
        }
        for v in rgb.iter_mut() {
            *v = ((*v - CONTRAST_PIVOT) * adjustment.contrast + CONTRAST_PIVOT).clamp(0.0, 255.0);
        }
        if let Some(factor) = adjustment.saturation {
            rgb = boost_saturation(rgb, factor);
        }

        px[0] = to_channel(rgb[0]);
        px[1] = to_channel(rgb[1]);
        px[2] = to_channel(rgb[2]);
    }
}

#[inline]
fn to_channel(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Scale HSL saturation by `factor` (capped at 1.0) keeping hue and lightness.
/// Channels are on the 0-255 scale.
fn boost_saturation([r, g, b]: [f32; 3], factor: f32) -> [f32; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    if delta == 0.0 {
        return [r, g, b];
    }

    let sum = max + min;
    let lightness = sum / 2.0;
    let saturation = if lightness > 127.5 {
        delta / (510.0 - sum)
    } else {
        delta / sum
    };
    let saturation = (saturation * factor).min(1.0);

    let hue = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    let chroma = (255.0 - (2.0 * lightness - 255.0).abs()) * saturation;
    let x = chroma * (1.0 - ((hue % 2.0) - 1.0).abs());
    let m = lightness - chroma / 2.0;

    let (r1, g1, b1) = match hue as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    [
        (r1 + m).clamp(0.0, 255.0),
        (g1 + m).clamp(0.0, 255.0),
        (b1 + m).clamp(0.0, 255.0),
    ]
}
