use crate::config::Config;
use anyhow::Context;
use std::collections::HashSet;
use std::time::Instant;
use thumbnail_enhancer::enhance::{Manifest, ManifestEntry};
use thumbnail_enhancer::{codec, CancelFlag, EncodedSource, Pipeline, ProcessingError};

/// Name of the run summary written next to the images
pub const MANIFEST_FILE: &str = "manifest.json";

/// Decode the input, run every variant and write JPEGs plus the manifest
pub fn run(config: Config) -> anyhow::Result<()> {
    let start = Instant::now();

    let bytes = std::fs::read(&config.input)
        .with_context(|| format!("Failed to read input image {}", config.input.display()))?;
    let variants = config.load_variants()?;
    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    let profile = config.profile();
    let source = EncodedSource::new(bytes);
    let pipeline = Pipeline::new(profile).with_threshold(config.threshold);
    let cancel = CancelFlag::new();

    let mut entries = Vec::with_capacity(variants.len());
    let mut file_names = HashSet::new();
    pipeline.run_each(
        &source,
        &variants,
        |fraction, message| tracing::info!("[{:>3.0}%] {}", fraction * 100.0, message),
        &cancel,
        |output| {
            let mut entry = ManifestEntry::from(&output);
            if let Ok(processed) = output.result {
                let file_name = claim_file_name(&output.spec.slug(), &mut file_names);
                let quality = output.spec.tier.jpeg_quality();
                let written = codec::encode_jpeg(&processed.buffer, quality).and_then(|jpeg| {
                    std::fs::write(config.output_dir.join(&file_name), jpeg)
                        .map_err(|e| ProcessingError::EncodeFailure(e.to_string()))
                });
                match written {
                    Ok(()) => entry.file = Some(file_name),
                    Err(e) => {
                        tracing::warn!("{}: could not write output: {}", output.spec.label, e);
                        entry.mark_failed(&e);
                    }
                }
            }
            entries.push(entry);
        },
    );

    let manifest = Manifest::new(
        &pipeline.profile().name,
        pipeline.threshold(),
        entries,
        start.elapsed().as_millis() as u64,
    );
    let manifest_path = config.output_dir.join(MANIFEST_FILE);
    let json = serde_json::to_string_pretty(&manifest)?;
    std::fs::write(&manifest_path, json)
        .with_context(|| format!("Failed to write {}", manifest_path.display()))?;

    tracing::info!(
        "Wrote {} of {} variants to {}",
        manifest.succeeded,
        manifest.total,
        config.output_dir.display()
    );

    Ok(())
}

/// `<slug>.jpg`, or `<slug>-2.jpg`, `<slug>-3.jpg`, ... when an earlier
/// variant of the run already wrote that name
fn claim_file_name(slug: &str, taken: &mut HashSet<String>) -> String {
    let mut name = format!("{}.jpg", slug);
    let mut n = 2;
    while !taken.insert(name.clone()) {
        name = format!("{}-{}.jpg", slug, n);
        n += 1;
    }
    name
}
