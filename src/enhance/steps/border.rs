use crate::buffer::{PixelBuffer, Rectangle};

/// Channel value at or below which a pixel counts as border
pub const DEFAULT_THRESHOLD: u8 = 30;

/// Find the region left after stripping letterbox and pillarbox bars.
///
/// Rows are swept from the top and bottom first; the column sweeps then only
/// look at the rows between those bars so a letterboxed frame does not count
/// as pillarboxed too. Every sweep stops at the first line with a bright pixel.
///
/// When the whole image is dark the returned rectangle has zero area; callers
/// fall back to the full frame.
pub fn detect_borders(buffer: &PixelBuffer, threshold: u8) -> Rectangle {
    let (width, height) = buffer.dimensions();

    let top = (0..height)
        .take_while(|&y| row_is_dark(buffer, y, threshold))
        .count() as u32;
    let bottom = (0..height)
        .rev()
        .take_while(|&y| row_is_dark(buffer, y, threshold))
        .count() as u32;

    let rows = top..height.saturating_sub(bottom);

    let left = (0..width)
        .take_while(|&x| column_is_dark(buffer, x, rows.clone(), threshold))
        .count() as u32;
    let right = (0..width)
        .rev()
        .take_while(|&x| column_is_dark(buffer, x, rows.clone(), threshold))
        .count() as u32;

    Rectangle {
        x: left.min(width),
        y: top.min(height),
        width: width.saturating_sub(left.saturating_add(right)),
        height: height.saturating_sub(top.saturating_add(bottom)),
    }
}

#[inline]
fn is_dark(buffer: &PixelBuffer, x: u32, y: u32, threshold: u8) -> bool {
    let i = buffer.offset(x, y);
    let s = buffer.samples();
    s[i] <= threshold && s[i + 1] <= threshold && s[i + 2] <= threshold
}

fn row_is_dark(buffer: &PixelBuffer, y: u32, threshold: u8) -> bool {
    (0..buffer.width()).all(|x| is_dark(buffer, x, y, threshold))
}

fn column_is_dark(
    buffer: &PixelBuffer,
    x: u32,
    rows: std::ops::Range<u32>,
    threshold: u8,
) -> bool {
    rows.into_iter().all(|y| is_dark(buffer, x, y, threshold))
}
