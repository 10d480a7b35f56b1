use super::steps::color::ColorAdjustment;
use super::steps::sharpen::SharpenKernel;
use crate::variant::Tier;
use serde::Serialize;
use std::borrow::Cow;

/// Named enhancement presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Decode and hand over untouched
    Plain,
    /// Border removal only, no resampling or colour work
    Standard,
    /// Border removal, upscale, strong colour boost and strong sharpen
    #[default]
    Pro,
    /// Border removal, upscale, mild colour boost and gentle sharpen
    Clarity,
    /// Like Pro but with brightness/contrast picked from each frame's luminance
    Adaptive,
    /// Pro for pro-tier variants, Standard for the rest
    Tiered,
}

impl Preset {
    /// Parse from a command-line or config string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "plain" | "none" => Some(Self::Plain),
            "standard" | "basic" => Some(Self::Standard),
            "pro" => Some(Self::Pro),
            "clarity" | "gentle" => Some(Self::Clarity),
            "adaptive" => Some(Self::Adaptive),
            "tiered" | "mixed" => Some(Self::Tiered),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Standard => "standard",
            Self::Pro => "pro",
            Self::Clarity => "clarity",
            Self::Adaptive => "adaptive",
            Self::Tiered => "tiered",
        }
    }

    pub fn profile(&self) -> EnhancementProfile {
        EnhancementProfile::from(*self)
    }
}

/// Which passes run for a batch and how strong they are
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnhancementProfile {
    pub name: String,
    pub remove_border: bool,
    pub resample: bool,
    pub adjust_color: bool,
    pub sharpen: bool,
    pub brightness_factor: f32,
    pub contrast_factor: f32,
    pub saturation_factor: Option<f32>,
    pub kernel: SharpenKernel,
    /// Replace the fixed factors with ones derived from each frame
    pub adaptive_color: bool,
    /// Ignore the switches above and pick a profile from each variant's tier
    pub per_tier: bool,
}

impl EnhancementProfile {
    /// Fixed colour factors of this profile
    pub fn color_adjustment(&self) -> ColorAdjustment {
        ColorAdjustment {
            brightness: self.brightness_factor,
            contrast: self.contrast_factor,
            saturation: self.saturation_factor,
        }
    }

    /// True when no pass would touch the pixels
    pub fn is_passthrough(&self) -> bool {
        !(self.per_tier
            || self.remove_border
            || self.resample
            || self.adjust_color
            || self.sharpen)
    }

    /// Profile that actually applies to a variant of `tier`
    pub fn for_tier(&self, tier: Tier) -> Cow<'_, EnhancementProfile> {
        if !self.per_tier {
            return Cow::Borrowed(self);
        }
        match tier {
            Tier::Pro => Cow::Owned(Preset::Pro.profile()),
            Tier::Standard => Cow::Owned(Preset::Standard.profile()),
        }
    }
}

impl Default for EnhancementProfile {
    fn default() -> Self {
        Preset::default().profile()
    }
}

impl From<Preset> for EnhancementProfile {
    fn from(preset: Preset) -> Self {
        let name = preset.as_str().to_string();
        match preset {
            Preset::Plain => Self {
                name,
                remove_border: false,
                resample: false,
                adjust_color: false,
                sharpen: false,
                brightness_factor: 1.0,
                contrast_factor: 1.0,
                saturation_factor: None,
                kernel: SharpenKernel::Strong,
                adaptive_color: false,
                per_tier: false,
            },
            Preset::Standard => Self {
                name,
                remove_border: true,
                ..Self::from(Preset::Plain)
            },
            Preset::Pro => Self {
                name,
                remove_border: true,
                resample: true,
                adjust_color: true,
                sharpen: true,
                brightness_factor: 1.1,
                contrast_factor: 1.15,
                saturation_factor: Some(1.2),
                kernel: SharpenKernel::Strong,
                adaptive_color: false,
                per_tier: false,
            },
            Preset::Clarity => Self {
                name,
                brightness_factor: 1.05,
                contrast_factor: 1.08,
                saturation_factor: None,
                kernel: SharpenKernel::Gentle,
                ..Self::from(Preset::Pro)
            },
            Preset::Adaptive => Self {
                name,
                saturation_factor: None,
                adaptive_color: true,
                ..Self::from(Preset::Pro)
            },
            Preset::Tiered => Self {
                name,
                per_tier: true,
                ..Self::from(Preset::Pro)
            },
        }
    }
}
