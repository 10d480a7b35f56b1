//! Multi-variant enhancement pipeline
//!
//! Crops letterbox bars, fits each variant to its target box and applies the
//! colour and sharpening passes selected by an [`EnhancementProfile`].

pub mod pipeline;
pub mod profile;
pub mod steps;

pub use pipeline::{
    BatchEntry, CancelFlag, Manifest, ManifestEntry, Pipeline, ProcessedVariant, RunReport,
    RunStats, StepTiming, VariantOutput, VariantStatus,
};
pub use profile::{EnhancementProfile, Preset};
pub use steps::color::{ColorAdjustment, ColorAnalysis};
pub use steps::sharpen::SharpenKernel;
