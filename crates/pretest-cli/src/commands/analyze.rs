//! Analyze command - score creatives and emit reports.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, ValueEnum};
use pretest_adapters::{ArtifactStore, FsCreativeSource, TesseractOcr};
use pretest_core::{
    analysis::heatmap, compute_scores, AnalysisConfig, Analyzer, CreativeSource, MetricsSummary,
    NullOcr, OcrEngine, OcrWord, Placement, PretestReport, ProgressEvent, ResultOutput,
    ScoringConfig, Verdict,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonOutput, ProgressBar};

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
}

/// Hardcoded default values.
mod defaults {
    pub const OUTPUT_DIR: &str = "pretest_out";
}

/// Shared arguments for creative analysis.
#[derive(Args, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct AnalyzeArgs {
    /// Files or directories to analyze
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Placement geometry: feed, story or square
    #[arg(long, value_name = "PLACEMENT")]
    pub placement: Option<String>,

    /// Directory for raw copies and heatmaps
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Expected creative width; mismatches are logged, not rejected
    #[arg(long, value_name = "PX")]
    pub expected_width: Option<u32>,

    /// Expected creative height; mismatches are logged, not rejected
    #[arg(long, value_name = "PX")]
    pub expected_height: Option<u32>,

    /// Disable OCR and CTA detection
    #[arg(long)]
    pub no_ocr: bool,

    /// Tesseract language selection, e.g. "deu+eng"
    #[arg(long, value_name = "LANGS")]
    pub languages: Option<String>,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Merged config (populated by `with_config`, not from CLI).
    #[arg(skip)]
    config: Option<AppConfig>,
}

impl AnalyzeArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    ///
    /// For boolean flags: an explicit CLI flag always wins. Config can
    /// enable/disable only when the CLI flag wasn't set.
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        // Recursive: config applies only if CLI --recursive not passed
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }

        // OCR: CLI --no-ocr takes precedence, then config, then default (enabled)
        if !args.no_ocr {
            if let Some(enabled) = config.ocr.enabled {
                args.no_ocr = !enabled;
            }
        }

        // Strings and paths: CLI > config
        args.placement = args
            .placement
            .or_else(|| config.general.placement.clone());
        args.output_dir = args
            .output_dir
            .or_else(|| config.general.output_dir.clone());
        args.languages = args.languages.or_else(|| config.ocr.languages.clone());

        // Output format: CLI > config (accessor provides fallback)
        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "json" => Some(OutputFormat::Json),
                    "jsonl" => Some(OutputFormat::Jsonl),
                    _ => None,
                });
        }

        // Boolean output options: CLI flag wins, then config
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        // Store config so run() can access CTA and scoring settings
        args.config = Some(config.clone());

        args
    }

    /// Get placement with fallback to feed geometry.
    fn placement(&self) -> Placement {
        self.placement
            .as_deref()
            .map_or(Placement::Feed, Placement::parse_lossy)
    }

    /// Get output directory with fallback to the hardcoded default.
    fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(defaults::OUTPUT_DIR))
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Jsonl)
    }

    /// Build the analysis configuration from merged settings.
    fn analysis_config(&self) -> AnalysisConfig {
        let mut config = AnalysisConfig::default();
        if let Some(app) = self.config.as_ref() {
            if let Some(keywords) = app.cta.keywords.clone() {
                config.cta_keywords = keywords;
            }
            if let Some(ratio) = app.cta.pad_ratio {
                config.cta_pad_ratio = ratio;
            }
        }
        config
    }

    /// Build the scoring configuration from merged settings.
    fn scoring_config(&self) -> ScoringConfig {
        let mut config = ScoringConfig::default();
        if let Some(app) = self.config.as_ref() {
            if let Some(t) = app.scoring.go_threshold {
                config.go_threshold = t;
            }
            if let Some(t) = app.scoring.improve_threshold {
                config.improve_threshold = t;
            }
        }
        config
    }
}

/// Result of running the analyze command.
#[allow(dead_code)] // Fields exposed for programmatic use
pub struct AnalyzeResult {
    /// Number of creatives processed.
    pub processed: usize,
    /// Number of creatives skipped.
    pub skipped: usize,
    /// Number of STOP verdicts.
    pub stops: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// OCR wrapper that degrades failures to an empty word list.
///
/// A broken tesseract install should cost the text metrics of one
/// creative, not the whole batch.
struct LenientOcr<E> {
    inner: E,
}

impl<E: OcrEngine> OcrEngine for LenientOcr<E> {
    fn recognize(&self, image: &image::DynamicImage) -> Result<Vec<OcrWord>> {
        match self.inner.recognize(image) {
            Ok(words) => Ok(words),
            Err(e) => {
                warn!("OCR failed, continuing without text metrics: {e:#}");
                Ok(Vec::new())
            }
        }
    }
}

/// Run the analyze command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &AnalyzeArgs) -> Result<AnalyzeResult> {
    info!("Running analyze command on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    // Initialize creative source
    let source = FsCreativeSource::new(args.paths.clone(), args.recursive);
    let total = source.count_hint();

    // Determine if we should show progress
    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress_bar = ProgressBar::new(total.map(|t| t as u64), args.quiet, show_progress);

    // Initialize output adapter and artifact store
    let output = JsonOutput::stdout(args.pretty);
    let store = ArtifactStore::open(&args.output_dir())?;

    // Select OCR engine
    let null_ocr = NullOcr;
    let tesseract;
    let ocr: &dyn OcrEngine = if args.no_ocr {
        debug!("OCR disabled by flag");
        &null_ocr
    } else if TesseractOcr::is_available() {
        let languages = args.languages.as_deref().unwrap_or("deu+eng");
        tesseract = LenientOcr {
            inner: TesseractOcr::with_languages(languages),
        };
        &tesseract
    } else {
        warn!("tesseract not found on PATH, text metrics will be empty");
        &null_ocr
    };

    let analyzer = Analyzer::with_config(ocr, args.analysis_config());
    let scoring = args.scoring_config();

    process_creatives(&source, &analyzer, &scoring, &store, &output, &progress_bar, args)
}

/// Process creatives through the analysis pipeline and scoring engine.
#[allow(clippy::too_many_lines)]
fn process_creatives(
    source: &FsCreativeSource,
    analyzer: &Analyzer,
    scoring: &ScoringConfig,
    store: &ArtifactStore,
    output: &JsonOutput,
    progress: &ProgressBar,
    args: &AnalyzeArgs,
) -> Result<AnalyzeResult> {
    use pretest_core::ProgressSink;

    let total = source.count_hint();
    let placement = args.placement();
    let mut processed = 0usize;
    let mut skipped = 0usize;
    let mut stops = 0usize;
    let mut all_reports: Vec<PretestReport> = Vec::new();

    for (index, creative_result) in source.creatives().enumerate() {
        let creative = match creative_result {
            Ok(c) => c,
            Err(e) => {
                // Note: error message contains the path via anyhow context
                progress.on_event(ProgressEvent::Skipped {
                    path: format!("creative {index}"),
                    reason: e.to_string(),
                });
                skipped += 1;
                continue;
            }
        };

        let path = creative.path.clone();

        progress.on_event(ProgressEvent::Started {
            path: path.clone(),
            index,
            total,
        });

        if let (Some(w), Some(h)) = (args.expected_width, args.expected_height) {
            if creative.width != w || creative.height != h {
                debug!(
                    "{path}: dimensions {}x{} differ from expected {w}x{h}",
                    creative.width, creative.height
                );
            }
        }

        let creative_id = Uuid::new_v4().to_string();

        let raw_path = match store.persist_raw(&creative_id, Path::new(&path)) {
            Ok(p) => Some(p),
            Err(e) => {
                warn!("Could not persist raw copy for {path}: {e:#}");
                None
            }
        };

        let analysis = match analyzer.analyze(&creative, placement) {
            Ok(a) => a,
            Err(e) => {
                progress.on_event(ProgressEvent::Skipped {
                    path: path.clone(),
                    reason: e.to_string(),
                });
                skipped += 1;
                continue;
            }
        };

        let heatmap_path = raw_path.as_deref().and_then(|raw| {
            let rendered = heatmap::render(&analysis.saliency);
            match store.persist_heatmap(raw, &rendered) {
                Ok(p) => Some(p.to_string_lossy().into_owned()),
                Err(e) => {
                    warn!("Could not persist heatmap for {path}: {e:#}");
                    None
                }
            }
        });

        let (scores, verdict) = compute_scores(&analysis.metrics, scoring);
        if verdict == Verdict::Stop {
            stops += 1;
        }

        let report = PretestReport {
            creative_id,
            path,
            timestamp: iso_timestamp(),
            format: format!("{}x{}", creative.width, creative.height),
            scores,
            metrics: MetricsSummary::from(&analysis.metrics),
            heatmap_path,
            status: verdict,
        };

        progress.on_event(ProgressEvent::Completed {
            report: report.clone(),
        });

        // Output based on format
        match args.format() {
            OutputFormat::Jsonl => {
                output.write(&report)?;
            }
            OutputFormat::Json => {
                all_reports.push(report);
            }
        }

        processed += 1;
    }

    // For JSON format, output all reports as array via adapter
    if matches!(args.format(), OutputFormat::Json) {
        output.write_array(&all_reports)?;
    }

    output.flush()?;

    progress.on_event(ProgressEvent::Finished { processed, skipped });

    // A batch where nothing could be analyzed is a failed run, not a pass
    if processed == 0 && skipped > 0 {
        anyhow::bail!("all {skipped} creatives failed to load or analyze");
    }

    let exit_code = if stops > 0 {
        ExitCode::StopFound
    } else {
        ExitCode::Success
    };

    Ok(AnalyzeResult {
        processed,
        skipped,
        stops,
        exit_code,
    })
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
