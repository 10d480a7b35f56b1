use super::profile::EnhancementProfile;
use super::steps::{border, color, resample, sharpen};
use crate::buffer::{PixelBuffer, Rectangle};
use crate::error::ProcessingError;
use crate::source::VariantSource;
use crate::variant::{Tier, VariantSpec};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Timing information for a single enhancement pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepTiming {
    pub name: String,
    pub time_ms: u64,
}

/// Shared stop request, checked between variants only so no buffer is ever
/// left half-filtered
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A variant that made it through every pass
#[derive(Debug, Clone)]
pub struct ProcessedVariant {
    /// Final pixels, ready for the encoder
    pub buffer: PixelBuffer,
    /// Name of the profile whose passes ran
    pub profile: String,
    /// Dimensions of the frame the source produced
    pub source_dimensions: (u32, u32),
    /// Region kept after border removal (full frame when nothing was cropped)
    pub crop: Rectangle,
    /// Passes that ran, in order
    pub steps: Vec<StepTiming>,
    pub total_time_ms: u64,
}

/// Outcome for one requested variant
#[derive(Debug, Clone)]
pub struct VariantOutput {
    pub spec: VariantSpec,
    pub result: Result<ProcessedVariant, ProcessingError>,
}

impl VariantOutput {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Everything a run produced, one output per requested variant, in order
#[derive(Debug, Clone)]
pub struct RunReport {
    pub profile: EnhancementProfile,
    pub threshold: u8,
    pub outputs: Vec<VariantOutput>,
    pub total_time_ms: u64,
}

impl RunReport {
    pub fn succeeded(&self) -> usize {
        self.outputs.iter().filter(|o| o.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outputs.len() - self.succeeded()
    }

    /// Serializable summary of the run
    pub fn manifest(&self) -> Manifest {
        Manifest::new(
            &self.profile.name,
            self.threshold,
            self.outputs.iter().map(ManifestEntry::from).collect(),
            self.total_time_ms,
        )
    }
}

/// Counters returned by [`Pipeline::run_each`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub succeeded: usize,
    pub failed: usize,
    pub total_time_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantStatus {
    Ok,
    Failed,
}

/// Per-run record of which passes each variant received
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub profile: String,
    /// Border darkness cutoff the run used
    pub threshold: u8,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub total_time_ms: u64,
    pub variants: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManifestEntry {
    pub label: String,
    pub tier: Tier,
    pub target_width: u32,
    pub target_height: u32,
    pub status: VariantStatus,
    /// Profile applied to this variant; differs from the run's when tiered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop: Option<Rectangle>,
    pub passes: Vec<StepTiming>,
    /// Where the encoder wrote this variant, when it was written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl Manifest {
    pub fn new(
        profile: &str,
        threshold: u8,
        variants: Vec<ManifestEntry>,
        total_time_ms: u64,
    ) -> Self {
        let mut manifest = Self {
            profile: profile.to_string(),
            threshold,
            total: variants.len(),
            succeeded: 0,
            failed: 0,
            total_time_ms,
            variants,
        };
        manifest.recount();
        manifest
    }

    /// Refresh the counters after entries were changed
    pub fn recount(&mut self) {
        self.total = self.variants.len();
        self.succeeded = self
            .variants
            .iter()
            .filter(|v| v.status == VariantStatus::Ok)
            .count();
        self.failed = self.total - self.succeeded;
    }
}

impl ManifestEntry {
    /// Downgrade an entry after a failure outside the pipeline (e.g. encoding)
    pub fn mark_failed(&mut self, error: &ProcessingError) {
        self.status = VariantStatus::Failed;
        self.error = Some(error.to_string());
        self.error_code = Some(error.code().to_string());
        self.file = None;
    }
}

impl From<&VariantOutput> for ManifestEntry {
    fn from(output: &VariantOutput) -> Self {
        let spec = &output.spec;
        let mut entry = ManifestEntry {
            label: spec.label.clone(),
            tier: spec.tier,
            target_width: spec.target_width,
            target_height: spec.target_height,
            status: VariantStatus::Ok,
            profile: None,
            width: None,
            height: None,
            crop: None,
            passes: Vec::new(),
            file: None,
            error: None,
            error_code: None,
        };
        match &output.result {
            Ok(processed) => {
                entry.profile = Some(processed.profile.clone());
                entry.width = Some(processed.buffer.width());
                entry.height = Some(processed.buffer.height());
                entry.crop = Some(processed.crop);
                entry.passes = processed.steps.clone();
            }
            Err(e) => entry.mark_failed(e),
        }
        entry
    }
}

/// Report for one named source of a batch
#[derive(Debug, Clone)]
pub struct BatchEntry {
    pub name: String,
    pub report: RunReport,
}

/// Runs border removal, resampling, colour adjustment and sharpening over an
/// ordered list of variants
pub struct Pipeline {
    profile: EnhancementProfile,
    threshold: u8,
}

impl Pipeline {
    pub fn new(profile: EnhancementProfile) -> Self {
        Self {
            profile,
            threshold: border::DEFAULT_THRESHOLD,
        }
    }

    /// Darkness cutoff for border detection
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn profile(&self) -> &EnhancementProfile {
        &self.profile
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Process every variant in order and collect the outputs.
    ///
    /// `progress` receives 0.0 before the first variant, `done / total` after
    /// each one, and 1.0 at the end. A failing variant is recorded and the
    /// run moves on; once `cancel` is set, the variants not yet started are
    /// recorded as [`ProcessingError::Cancelled`]. This never fails as a
    /// whole: inspect the returned report.
    pub fn run<P>(
        &self,
        source: &dyn VariantSource,
        variants: &[VariantSpec],
        progress: P,
        cancel: &CancelFlag,
    ) -> RunReport
    where
        P: FnMut(f32, &str),
    {
        let mut outputs = Vec::with_capacity(variants.len());
        let stats = self.run_each(source, variants, progress, cancel, |output| {
            outputs.push(output)
        });

        RunReport {
            profile: self.profile.clone(),
            threshold: self.threshold,
            outputs,
            total_time_ms: stats.total_time_ms,
        }
    }

    /// Like [`Pipeline::run`], but hands each output to `sink` as soon as it
    /// is finished so the caller can encode and drop it before the next
    /// variant starts.
    pub fn run_each<P, S>(
        &self,
        source: &dyn VariantSource,
        variants: &[VariantSpec],
        mut progress: P,
        cancel: &CancelFlag,
        mut sink: S,
    ) -> RunStats
    where
        P: FnMut(f32, &str),
        S: FnMut(VariantOutput),
    {
        let start = Instant::now();
        let total = variants.len();
        let mut stats = RunStats::default();

        tracing::info!(
            "Processing {} variants with '{}' profile from {}",
            total,
            self.profile.name,
            source.describe()
        );
        progress(0.0, &format!("Preparing {} variants", total));

        for (i, variant) in variants.iter().enumerate() {
            let result = if cancel.is_cancelled() {
                Err(ProcessingError::Cancelled)
            } else {
                self.process_variant(source, variant)
            };

            let message = match &result {
                Ok(processed) => {
                    stats.succeeded += 1;
                    tracing::info!(
                        "{}: {}x{} in {}ms",
                        variant.label,
                        processed.buffer.width(),
                        processed.buffer.height(),
                        processed.total_time_ms
                    );
                    format!("Processed {}", variant.label)
                }
                Err(ProcessingError::Cancelled) => {
                    stats.failed += 1;
                    tracing::debug!("{}: skipped after cancellation", variant.label);
                    format!("Skipped {}", variant.label)
                }
                Err(e) => {
                    stats.failed += 1;
                    tracing::warn!("{} failed: {}", variant.label, e);
                    format!("Failed {}: {}", variant.label, e)
                }
            };

            sink(VariantOutput {
                spec: variant.clone(),
                result,
            });
            progress((i + 1) as f32 / total as f32, &message);
        }

        stats.total_time_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            "Run finished: {} succeeded, {} failed in {}ms",
            stats.succeeded,
            stats.failed,
            stats.total_time_ms
        );

        let summary = if stats.failed == 0 {
            "All variants processed".to_string()
        } else {
            format!(
                "Processed {} of {} variants ({} failed)",
                stats.succeeded, total, stats.failed
            )
        };
        progress(1.0, &summary);

        stats
    }

    /// Run the same variant list over several sources, one report each.
    /// Progress is spread evenly across the sources.
    pub fn run_batch<'a, I, P>(
        &self,
        sources: I,
        variants: &[VariantSpec],
        mut progress: P,
        cancel: &CancelFlag,
    ) -> Vec<BatchEntry>
    where
        I: IntoIterator<Item = (&'a str, &'a dyn VariantSource)>,
        P: FnMut(f32, &str),
    {
        let sources: Vec<_> = sources.into_iter().collect();
        let count = sources.len().max(1) as f32;

        let entries: Vec<BatchEntry> = sources
            .into_iter()
            .enumerate()
            .map(|(i, (name, source))| {
                let report = self.run(
                    source,
                    variants,
                    |fraction, message| {
                        progress((i as f32 + fraction) / count, &format!("{}: {}", name, message))
                    },
                    cancel,
                );
                BatchEntry {
                    name: name.to_string(),
                    report,
                }
            })
            .collect();

        if entries.is_empty() {
            progress(1.0, "No sources to process");
        }
        entries
    }

    /// Run every enabled pass for one variant on a fresh frame from `source`
    pub fn process_variant(
        &self,
        source: &dyn VariantSource,
        variant: &VariantSpec,
    ) -> Result<ProcessedVariant, ProcessingError> {
        let start = Instant::now();
        let mut steps = Vec::new();
        let profile = self.profile.for_tier(variant.tier);
        if self.profile.per_tier {
            tracing::debug!(
                "{}: {} tier, using '{}' profile",
                variant.label,
                variant.tier.as_str(),
                profile.name
            );
        }

        let mut buffer = source.load(variant)?;
        let source_dimensions = buffer.dimensions();
        let mut crop = buffer.full_rect();

        if variant.remove_border && profile.remove_border {
            let (cropped, region) = self.run_step("remove_border", &mut steps, || {
                self.remove_border(&buffer)
            })?;
            if let Some(cropped) = cropped {
                buffer = cropped;
                crop = region;
            }
        }

        if profile.resample {
            buffer = self.run_step("resample", &mut steps, || {
                resample::resample(buffer, variant.target(), true)
            })?;
        }

        if profile.adjust_color {
            self.run_step("adjust_color", &mut steps, || {
                let adjustment = if profile.adaptive_color {
                    let analysis = color::analyze_colors(&buffer);
                    tracing::debug!(
                        "{}: mean luminance {:.1}",
                        variant.label,
                        analysis.average_luminance
                    );
                    color::ColorAdjustment::adaptive(&analysis)
                } else {
                    profile.color_adjustment()
                };
                color::adjust_colors(&mut buffer, &adjustment);
                Ok(())
            })?;
        }

        if profile.sharpen {
            self.run_step("sharpen", &mut steps, || {
                tracing::debug!("{}: {} sharpen", variant.label, profile.kernel.as_str());
                sharpen::sharpen(&mut buffer, &profile.kernel)
            })?;
        }

        Ok(ProcessedVariant {
            buffer,
            profile: profile.name.clone(),
            source_dimensions,
            crop,
            steps,
            total_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Detect and cut away dark bars. Returns `None` when the frame should be
    /// kept whole, either because there are no bars or because the whole
    /// frame looked like border.
    fn remove_border(
        &self,
        buffer: &PixelBuffer,
    ) -> Result<(Option<PixelBuffer>, Rectangle), ProcessingError> {
        let region = border::detect_borders(buffer, self.threshold);
        if region == buffer.full_rect() {
            return Ok((None, region));
        }

        match buffer.crop(&region) {
            Ok(cropped) => {
                tracing::debug!(
                    "Cropped borders {}x{} -> {}x{} at ({}, {})",
                    buffer.width(),
                    buffer.height(),
                    region.width,
                    region.height,
                    region.x,
                    region.y
                );
                Ok((Some(cropped), region))
            }
            Err(ProcessingError::DegenerateCrop) => {
                tracing::debug!("Frame is entirely border, keeping full image");
                Ok((None, buffer.full_rect()))
            }
            Err(e) => Err(e),
        }
    }

    fn run_step<T, F>(
        &self,
        name: &str,
        timings: &mut Vec<StepTiming>,
        step_fn: F,
    ) -> Result<T, ProcessingError>
    where
        F: FnOnce() -> Result<T, ProcessingError>,
    {
        let step_start = Instant::now();
        let result = step_fn()?;
        timings.push(StepTiming {
            name: name.to_string(),
            time_ms: step_start.elapsed().as_millis() as u64,
        });
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enhance::profile::Preset;
    use crate::source::FnSource;
    use std::cell::Cell;

    fn letterboxed(width: u32, height: u32, band: u32) -> PixelBuffer {
        let mut buffer = PixelBuffer::filled(width, height, [120, 100, 80, 255]).unwrap();
        for y in (0..band).chain(height - band..height) {
            for x in 0..width {
                buffer.put_pixel(x, y, [0, 0, 0, 255]);
            }
        }
        buffer
    }

    fn step_names(processed: &ProcessedVariant) -> Vec<&str> {
        processed.steps.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_pro_runs_every_pass_in_order() {
        let pipeline = Pipeline::new(Preset::Pro.profile());
        let source = letterboxed(64, 36, 4);
        let variant = VariantSpec::new("HD", 128, 72, Tier::Pro);

        let processed = pipeline.process_variant(&source, &variant).unwrap();

        assert_eq!(
            step_names(&processed),
            vec!["remove_border", "resample", "adjust_color", "sharpen"]
        );
        assert_eq!(processed.source_dimensions, (64, 36));
        assert_eq!(
            processed.crop,
            Rectangle {
                x: 0,
                y: 4,
                width: 64,
                height: 28
            }
        );
        // 64x28 fitted by width into 128x72
        assert_eq!(processed.buffer.dimensions(), (128, 56));
    }

    #[test]
    fn test_variant_can_opt_out_of_border_removal() {
        let pipeline = Pipeline::new(Preset::Standard.profile());
        let source = letterboxed(64, 36, 4);
        let variant = VariantSpec::new("keep", 64, 36, Tier::Standard).with_remove_border(false);

        let processed = pipeline.process_variant(&source, &variant).unwrap();
        assert!(processed.steps.is_empty());
        assert_eq!(processed.buffer, source);
    }

    #[test]
    fn test_plain_profile_hands_back_source() {
        let pipeline = Pipeline::new(Preset::Plain.profile());
        let source = letterboxed(32, 18, 2);
        let variant = VariantSpec::new("raw", 1920, 1080, Tier::Pro);

        let processed = pipeline.process_variant(&source, &variant).unwrap();
        assert!(processed.steps.is_empty());
        assert_eq!(processed.buffer, source);
    }

    #[test]
    fn test_all_dark_frame_keeps_full_image() {
        let pipeline = Pipeline::new(Preset::Standard.profile());
        let source = PixelBuffer::filled(40, 20, [3, 3, 3, 255]).unwrap();
        let variant = VariantSpec::new("dark", 40, 20, Tier::Standard);

        let processed = pipeline.process_variant(&source, &variant).unwrap();
        assert_eq!(processed.buffer.dimensions(), (40, 20));
        assert_eq!(processed.crop, Rectangle::full(40, 20));
        assert_eq!(step_names(&processed), vec!["remove_border"]);
    }

    #[test]
    fn test_threshold_is_configurable() {
        let mut source = PixelBuffer::filled(10, 10, [200, 200, 200, 255]).unwrap();
        for x in 0..10 {
            source.put_pixel(x, 0, [40, 40, 40, 255]);
        }
        let variant = VariantSpec::new("t", 10, 10, Tier::Standard);

        let default = Pipeline::new(Preset::Standard.profile());
        let processed = default.process_variant(&source, &variant).unwrap();
        assert_eq!(processed.buffer.height(), 10);

        let loose = Pipeline::new(Preset::Standard.profile()).with_threshold(45);
        let processed = loose.process_variant(&source, &variant).unwrap();
        assert_eq!(processed.buffer.height(), 9);
    }

    #[test]
    fn test_failure_is_isolated_and_progress_completes() {
        let pipeline = Pipeline::new(Preset::Pro.profile());
        let source = FnSource::new("flaky", |variant: &VariantSpec| {
            if variant.label == "broken" {
                Err(ProcessingError::DecodeFailure("corrupt".to_string()))
            } else {
                PixelBuffer::filled(16, 9, [90, 90, 90, 255])
            }
        });
        let variants = vec![
            VariantSpec::new("first", 32, 18, Tier::Pro),
            VariantSpec::new("broken", 32, 18, Tier::Pro),
            VariantSpec::new("last", 32, 18, Tier::Standard),
        ];

        let mut calls = Vec::new();
        let report = pipeline.run(
            &source,
            &variants,
            |fraction, message| calls.push((fraction, message.to_string())),
            &CancelFlag::new(),
        );

        assert_eq!(report.outputs.len(), 3);
        assert_eq!(report.failed(), 1);
        assert!(report.outputs[0].is_ok());
        assert!(!report.outputs[1].is_ok());
        assert!(report.outputs[2].is_ok());

        let fractions: Vec<f32> = calls.iter().map(|(f, _)| *f).collect();
        assert_eq!(fractions.len(), 5);
        assert_eq!(fractions[0], 0.0);
        assert_eq!(*fractions.last().unwrap(), 1.0);
        assert!(fractions.windows(2).all(|w| w[0] <= w[1]));
        assert!(calls[2].1.contains("broken"));

        let manifest = report.manifest();
        assert_eq!(manifest.variants[1].status, VariantStatus::Failed);
        assert_eq!(manifest.variants[1].error_code.as_deref(), Some("DECODE_FAILURE"));
        assert_eq!(manifest.variants[0].passes.len(), 4);
    }

    #[test]
    fn test_cancel_between_variants() {
        let pipeline = Pipeline::new(Preset::Standard.profile());
        let cancel = CancelFlag::new();
        let loads = Cell::new(0);
        let source = FnSource::new("counting", |_: &VariantSpec| {
            loads.set(loads.get() + 1);
            if loads.get() == 2 {
                cancel.cancel();
            }
            PixelBuffer::filled(8, 8, [50, 60, 70, 255])
        });
        let variants: Vec<VariantSpec> = (0..4)
            .map(|i| VariantSpec::new(format!("v{}", i), 8, 8, Tier::Standard))
            .collect();

        let mut last = 0.0;
        let report = pipeline.run(&source, &variants, |f, _| last = f, &cancel);

        assert_eq!(loads.get(), 2);
        assert_eq!(report.outputs.len(), 4);
        assert_eq!(report.succeeded(), 2);
        assert!(matches!(
            report.outputs[2].result,
            Err(ProcessingError::Cancelled)
        ));
        assert_eq!(last, 1.0);
    }

    #[test]
    fn test_empty_variant_list_still_reports_completion() {
        let pipeline = Pipeline::new(Preset::Pro.profile());
        let source = PixelBuffer::filled(4, 4, [1, 1, 1, 255]).unwrap();
        let mut calls = Vec::new();
        let report = pipeline.run(&source, &[], |f, _| calls.push(f), &CancelFlag::new());
        assert!(report.outputs.is_empty());
        assert_eq!(calls, vec![0.0, 1.0]);
    }

    #[test]
    fn test_run_batch_reports_each_source() {
        let pipeline = Pipeline::new(Preset::Standard.profile());
        let good = letterboxed(20, 10, 2);
        let bad = FnSource::new("bad", |_: &VariantSpec| {
            Err(ProcessingError::DecodeFailure("404".to_string()))
        });
        let variants = vec![VariantSpec::new("only", 20, 10, Tier::Standard)];

        let mut fractions = Vec::new();
        let entries = pipeline.run_batch(
            [
                ("good", &good as &dyn VariantSource),
                ("bad", &bad as &dyn VariantSource),
            ],
            &variants,
            |f, _| fractions.push(f),
            &CancelFlag::new(),
        );

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "good");
        assert_eq!(entries[0].report.succeeded(), 1);
        assert_eq!(entries[1].report.failed(), 1);
        assert!(fractions.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*fractions.last().unwrap(), 1.0);
    }

    #[test]
    fn test_run_each_streams_outputs_in_order() {
        let pipeline = Pipeline::new(Preset::Clarity.profile());
        let source = letterboxed(48, 30, 3);
        let variants = vec![
            VariantSpec::new("small", 24, 12, Tier::Standard),
            VariantSpec::new("large", 96, 54, Tier::Pro),
        ];

        let mut seen = Vec::new();
        let stats = pipeline.run_each(&source, &variants, |_, _| {}, &CancelFlag::new(), |output| {
            seen.push((output.spec.label.clone(), output.result.map(|p| p.buffer.dimensions())))
        });

        assert_eq!(stats.succeeded, 2);
        assert_eq!(stats.failed, 0);
        // 48x24 after cropping: already covers 24x12, fitted by width into 96x54
        assert_eq!(
            seen,
            vec![
                ("small".to_string(), Ok((48, 24))),
                ("large".to_string(), Ok((96, 48))),
            ]
        );
    }

    #[test]
    fn test_oversized_variant_fails_alone() {
        let pipeline = Pipeline::new(Preset::Pro.profile());
        let source = PixelBuffer::filled(4, 2, [120, 100, 80, 255]).unwrap();
        let variants = vec![
            VariantSpec::new("huge", 1_000_000, 1_000_000, Tier::Pro),
            VariantSpec::new("after", 8, 4, Tier::Standard),
        ];

        let report = pipeline.run(&source, &variants, |_, _| {}, &CancelFlag::new());

        assert_eq!(report.outputs.len(), 2);
        assert_eq!(report.failed(), 1);
        assert!(matches!(
            report.outputs[0].result,
            Err(ProcessingError::AllocationFailure { .. })
        ));
        let after = report.outputs[1].result.as_ref().unwrap();
        assert_eq!(after.buffer.dimensions(), (8, 4));

        let manifest = report.manifest();
        assert_eq!(
            manifest.variants[0].error_code.as_deref(),
            Some("ALLOCATION_FAILURE")
        );
    }

    #[test]
    fn test_tiered_profile_mixes_passes_within_one_run() {
        let pipeline = Pipeline::new(Preset::Tiered.profile()).with_threshold(20);
        let source = letterboxed(64, 36, 4);
        let variants = vec![
            VariantSpec::new("4K", 128, 72, Tier::Pro),
            VariantSpec::new("SD", 128, 72, Tier::Standard),
        ];

        let report = pipeline.run(&source, &variants, |_, _| {}, &CancelFlag::new());
        assert_eq!(report.failed(), 0);

        let pro = report.outputs[0].result.as_ref().unwrap();
        assert_eq!(
            step_names(pro),
            vec!["remove_border", "resample", "adjust_color", "sharpen"]
        );
        assert_eq!(pro.buffer.dimensions(), (128, 56));

        let standard = report.outputs[1].result.as_ref().unwrap();
        assert_eq!(step_names(standard), vec!["remove_border"]);
        assert_eq!(standard.buffer.dimensions(), (64, 28));
        // cropped, but otherwise untouched
        assert_eq!(standard.buffer.pixel(10, 10), [120, 100, 80, 255]);

        let manifest = report.manifest();
        assert_eq!(manifest.profile, "tiered");
        assert_eq!(manifest.threshold, 20);
        assert_eq!(manifest.variants[0].profile.as_deref(), Some("pro"));
        assert_eq!(manifest.variants[1].profile.as_deref(), Some("standard"));
    }
}
