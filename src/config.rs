use crate::Args;
use anyhow::Context;
use std::path::PathBuf;
use thumbnail_enhancer::{variant, EnhancementProfile, Preset, VariantSpec};

/// Run configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub threshold: u8,
    pub enhancement_enabled: bool,
    pub preset: Preset,
    pub variants_path: Option<PathBuf>,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            input: args.input,
            output_dir: args.output_dir,
            threshold: args.threshold,
            enhancement_enabled: !args.no_enhance,
            preset: args.profile,
            variants_path: args.variants,
        }
    }
}

impl Config {
    /// Profile for this run; disabling enhancement forces the plain profile
    pub fn profile(&self) -> EnhancementProfile {
        if self.enhancement_enabled {
            self.preset.profile()
        } else {
            Preset::Plain.profile()
        }
    }

    /// Ordered variant list from `--variants`, or the default ladder
    pub fn load_variants(&self) -> anyhow::Result<Vec<VariantSpec>> {
        let Some(path) = &self.variants_path else {
            return Ok(variant::default_ladder());
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read variant list {}", path.display()))?;
        let variants: Vec<VariantSpec> = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid variant list {}", path.display()))?;
        Ok(variants)
    }
}
