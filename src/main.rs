use clap::Parser;
use std::path::PathBuf;
use thumbnail_enhancer::Preset;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod config;

#[derive(Parser, Debug)]
#[command(name = "thumbnail-enhancer")]
#[command(about = "Crop letterbox bars and build enhanced resolution variants of an image")]
#[command(version)]
pub struct Args {
    /// Source image (JPEG, PNG, WebP, ...)
    pub input: PathBuf,

    /// Directory for the variant JPEGs and manifest.json
    #[arg(short, long, env = "THUMB_OUTPUT_DIR", default_value = "variants")]
    pub output_dir: PathBuf,

    /// Enhancement profile (plain, standard, pro, clarity, adaptive, tiered)
    #[arg(long, env = "THUMB_PROFILE", default_value = "pro", value_parser = parse_preset)]
    pub profile: Preset,

    /// Channel value at or below which a pixel counts as black bar
    #[arg(long, env = "THUMB_THRESHOLD", default_value = "30")]
    pub threshold: u8,

    /// Skip every enhancement pass and write the variants as decoded
    #[arg(long, env = "THUMB_NO_ENHANCE")]
    pub no_enhance: bool,

    /// JSON file with the ordered variant list (defaults to the 144p-8K ladder)
    #[arg(long, env = "THUMB_VARIANTS")]
    pub variants: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

fn parse_preset(s: &str) -> Result<Preset, String> {
    Preset::from_str(s).ok_or_else(|| {
        format!(
            "unknown profile '{}' (expected plain, standard, pro, clarity, adaptive or tiered)",
            s
        )
    })
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = config::Config::from(args);

    tracing::info!("Starting thumbnail-enhancer v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Profile '{}', border threshold {}",
        config.profile().name,
        config.threshold
    );

    app::run(config)
}
