//! Letterbox removal and enhancement for multi-resolution thumbnail variants.
//!
//! A decoded frame goes through border detection, aspect-fit resampling,
//! colour correction and 3x3 sharpening once per requested variant. Each
//! variant works on its own copy of the source, and a failing variant never
//! stops the rest of the run.
//!
//! ```no_run
//! use thumbnail_enhancer::{codec, variant, CancelFlag, Pipeline, Preset};
//!
//! let bytes = std::fs::read("frame.jpg").unwrap();
//! let source = codec::decode(&bytes).unwrap();
//! let pipeline = Pipeline::new(Preset::Pro.profile());
//! let report = pipeline.run(
//!     &source,
//!     &variant::default_ladder(),
//!     |fraction, message| println!("{:.0}% {}", fraction * 100.0, message),
//!     &CancelFlag::new(),
//! );
//! println!("{}", serde_json::to_string_pretty(&report.manifest()).unwrap());
//! ```

pub mod buffer;
pub mod codec;
pub mod enhance;
pub mod error;
pub mod source;
pub mod variant;

pub use buffer::{PixelBuffer, Rectangle};
pub use enhance::{
    CancelFlag, EnhancementProfile, Manifest, Pipeline, Preset, RunReport, VariantOutput,
};
pub use error::ProcessingError;
pub use source::{EncodedSource, FnSource, VariantSource};
pub use variant::{Tier, VariantSpec};
