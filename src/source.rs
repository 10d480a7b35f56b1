use crate::buffer::PixelBuffer;
use crate::codec;
use crate::error::ProcessingError;
use crate::variant::VariantSpec;

/// Supplies a fresh, independently owned frame for each variant
pub trait VariantSource {
    /// Short description for logs
    fn describe(&self) -> String;

    /// Produce the starting frame for `variant`. Every call must return a
    /// buffer no other variant shares.
    fn load(&self, variant: &VariantSpec) -> Result<PixelBuffer, ProcessingError>;
}

/// An already decoded frame: every variant gets its own copy
impl VariantSource for PixelBuffer {
    fn describe(&self) -> String {
        format!("decoded {}x{} frame", self.width(), self.height())
    }

    fn load(&self, _variant: &VariantSpec) -> Result<PixelBuffer, ProcessingError> {
        self.try_clone()
    }
}

/// Encoded image bytes, decoded again for every variant
#[derive(Debug, Clone)]
pub struct EncodedSource {
    bytes: Vec<u8>,
}

impl EncodedSource {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl VariantSource for EncodedSource {
    fn describe(&self) -> String {
        let format = codec::sniff_format(&self.bytes)
            .map(|f| format!("{:?}", f))
            .unwrap_or_else(|| "unknown".to_string());
        format!("{} bytes of {} data", self.bytes.len(), format)
    }

    fn load(&self, _variant: &VariantSpec) -> Result<PixelBuffer, ProcessingError> {
        codec::decode(&self.bytes)
    }
}

/// Adapts a closure into a [`VariantSource`], e.g. to pick a different
/// upstream rendition per variant
pub struct FnSource<F> {
    name: String,
    loader: F,
}

impl<F> FnSource<F>
where
    F: Fn(&VariantSpec) -> Result<PixelBuffer, ProcessingError>,
{
    pub fn new(name: impl Into<String>, loader: F) -> Self {
        Self {
            name: name.into(),
            loader,
        }
    }
}

impl<F> VariantSource for FnSource<F>
where
    F: Fn(&VariantSpec) -> Result<PixelBuffer, ProcessingError>,
{
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn load(&self, variant: &VariantSpec) -> Result<PixelBuffer, ProcessingError> {
        (self.loader)(variant)
    }
}
