//! Bridge to the `image` crate for turning encoded bytes into
//! [`PixelBuffer`]s and back. The processing steps never see encoded data.

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::error::ProcessingError;
use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, RgbImage};

/// Decode any format the `image` crate recognises into RGBA8
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer, ProcessingError> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| ProcessingError::DecodeFailure(e.to_string()))?;
    Ok(PixelBuffer::from_rgba_image(image.to_rgba8()))
}

/// Guess the container format from magic bytes, if recognised
pub fn sniff_format(bytes: &[u8]) -> Option<ImageFormat> {
    image::guess_format(bytes).ok()
}

/// Encode as baseline JPEG at `quality` (1-100). Alpha is dropped.
pub fn encode_jpeg(buffer: &PixelBuffer, quality: u8) -> Result<Vec<u8>, ProcessingError> {
    let (width, height) = buffer.dimensions();
    if width == 0 || height == 0 {
        return Err(ProcessingError::EncodeFailure(format!(
            "cannot encode an empty {}x{} image",
            width, height
        )));
    }

    let rgb: Vec<u8> = buffer
        .samples()
        .chunks_exact(CHANNELS)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
    let rgb = RgbImage::from_raw(width, height, rgb).ok_or_else(|| {
        ProcessingError::EncodeFailure("RGB sample count does not match dimensions".to_string())
    })?;

    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100));
    rgb.write_with_encoder(encoder)
        .map_err(|e| ProcessingError::EncodeFailure(e.to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, ProcessingError::DecodeFailure(_)));
    }

    #[test]
    fn test_encoded_jpeg_decodes_with_same_dimensions() {
        let buffer = PixelBuffer::filled(48, 27, [200, 120, 40, 255]).unwrap();
        let jpeg = encode_jpeg(&buffer, 92).unwrap();
        assert_eq!(sniff_format(&jpeg), Some(ImageFormat::Jpeg));

        let decoded = decode(&jpeg).unwrap();
        assert_eq!(decoded.dimensions(), (48, 27));
        let [r, g, b, a] = decoded.pixel(20, 10);
        assert!((r as i32 - 200).abs() <= 4);
        assert!((g as i32 - 120).abs() <= 4);
        assert!((b as i32 - 40).abs() <= 4);
        assert_eq!(a, 255);
    }

    #[test]
    fn test_encode_rejects_empty_buffer() {
        let buffer = PixelBuffer::new(0, 10).unwrap();
        assert!(matches!(
            encode_jpeg(&buffer, 90),
            Err(ProcessingError::EncodeFailure(_))
        ));
    }
}
