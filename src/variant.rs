use serde::{Deserialize, Serialize};

/// Quality class of an output variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Standard,
    Pro,
}

impl Tier {
    /// JPEG quality the encoder should use for this tier
    pub fn jpeg_quality(&self) -> u8 {
        match self {
            Self::Standard => 92,
            Self::Pro => 98,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Pro => "pro",
        }
    }
}

/// One requested output resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSpec {
    pub label: String,
    pub target_width: u32,
    pub target_height: u32,
    #[serde(default)]
    pub tier: Tier,
    #[serde(default = "default_remove_border")]
    pub remove_border: bool,
}

fn default_remove_border() -> bool {
    true
}

impl VariantSpec {
    pub fn new(
        label: impl Into<String>,
        target_width: u32,
        target_height: u32,
        tier: Tier,
    ) -> Self {
        Self {
            label: label.into(),
            target_width,
            target_height,
            tier,
            remove_border: true,
        }
    }

    pub fn with_remove_border(mut self, remove_border: bool) -> Self {
        self.remove_border = remove_border;
        self
    }

    pub fn target(&self) -> (u32, u32) {
        (self.target_width, self.target_height)
    }

    /// File-name friendly form of the label ("Full HD 1080p" -> "full-hd-1080p")
    pub fn slug(&self) -> String {
        let mut slug = String::with_capacity(self.label.len());
        for c in self.label.chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c.to_ascii_lowercase());
            } else if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        }
        while slug.ends_with('-') {
            slug.pop();
        }
        if slug.is_empty() {
            slug.push_str("variant");
        }
        slug
    }
}

/// The standard resolution ladder, largest first
pub fn default_ladder() -> Vec<VariantSpec> {
    vec![
        VariantSpec::new("8K Ultra Pro", 7680, 4320, Tier::Pro),
        VariantSpec::new("5K Pro", 5120, 2880, Tier::Pro),
        VariantSpec::new("4K Ultra HD", 3840, 2160, Tier::Pro),
        VariantSpec::new("2K QHD", 2560, 1440, Tier::Standard),
        VariantSpec::new("Full HD 1080p", 1920, 1080, Tier::Standard),
        VariantSpec::new("HD 720p", 1280, 720, Tier::Standard),
        VariantSpec::new("SD 480p", 640, 480, Tier::Standard),
        VariantSpec::new("Standard 360p", 480, 360, Tier::Standard),
        VariantSpec::new("Low 240p", 320, 240, Tier::Standard),
        VariantSpec::new("Minimum 144p", 256, 144, Tier::Standard),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ladder_is_ordered_largest_first() {
        let ladder = default_ladder();
        assert_eq!(ladder.len(), 10);
        assert_eq!(ladder[0].target(), (7680, 4320));
        assert_eq!(ladder[9].target(), (256, 144));
        assert!(ladder
            .windows(2)
            .all(|w| w[0].target_width >= w[1].target_width));
        assert_eq!(ladder.iter().filter(|v| v.tier == Tier::Pro).count(), 3);
    }

    #[test]
    fn test_slug() {
        assert_eq!(
            VariantSpec::new("Full HD 1080p", 1, 1, Tier::Standard).slug(),
            "full-hd-1080p"
        );
        assert_eq!(
            VariantSpec::new("  8K Ultra/Pro! ", 1, 1, Tier::Pro).slug(),
            "8k-ultra-pro"
        );
        assert_eq!(VariantSpec::new("***", 1, 1, Tier::Pro).slug(), "variant");
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let spec: VariantSpec =
            serde_json::from_str(r#"{"label":"Tiny","target_width":64,"target_height":36}"#)
                .unwrap();
        assert_eq!(spec.tier, Tier::Standard);
        assert!(spec.remove_border);

        let spec: VariantSpec = serde_json::from_str(
            r#"{
                "label": "4K",
                "target_width": 3840,
                "target_height": 2160,
                "tier": "pro",
                "remove_border": false
            }"#,
        )
        .unwrap();
        assert_eq!(spec.tier, Tier::Pro);
        assert!(!spec.remove_border);
    }

    #[test]
    fn test_tier_quality() {
        assert!(Tier::Pro.jpeg_quality() > Tier::Standard.jpeg_quality());
    }
}
