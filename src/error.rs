use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessingError {
    #[error("Failed to decode source image: {0}")]
    DecodeFailure(String),

    /// Border detection found nothing but border. Recovered inside the pipeline
    /// by keeping the full frame.
    #[error("Crop region has zero area")]
    DegenerateCrop,

    #[error("Crop region {x},{y} {width}x{height} exceeds {source_width}x{source_height} source")]
    CropOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        source_width: u32,
        source_height: u32,
    },

    #[error("Invalid pixel buffer: expected {expected} samples, got {actual}")]
    InvalidBuffer { expected: usize, actual: usize },

    #[error("Could not allocate a {width}x{height} pixel buffer")]
    AllocationFailure { width: u32, height: u32 },

    #[error("Failed to encode image: {0}")]
    EncodeFailure(String),

    #[error("Processing cancelled before this variant started")]
    Cancelled,
}

impl ProcessingError {
    /// Short machine-readable code, used in the manifest
    pub fn code(&self) -> &'static str {
        match self {
            ProcessingError::DecodeFailure(_) => "DECODE_FAILURE",
            ProcessingError::DegenerateCrop => "DEGENERATE_CROP",
            ProcessingError::CropOutOfBounds { .. } => "CROP_OUT_OF_BOUNDS",
            ProcessingError::InvalidBuffer { .. } => "INVALID_BUFFER",
            ProcessingError::AllocationFailure { .. } => "ALLOCATION_FAILURE",
            ProcessingError::EncodeFailure(_) => "ENCODE_FAILURE",
            ProcessingError::Cancelled => "CANCELLED",
        }
    }
}
