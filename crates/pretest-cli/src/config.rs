//! Configuration file support for pretest.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/pretest/config.toml` (lowest priority)
//! - Project-local: `.pretest.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// OCR settings.
    pub ocr: OcrConfig,
    /// CTA detection settings.
    pub cta: CtaConfig,
    /// Scoring thresholds.
    pub scoring: ScoringSection,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
    /// Default placement: "feed", "story" or "square".
    pub placement: Option<String>,
    /// Artifact output directory.
    pub output_dir: Option<PathBuf>,
}

/// OCR configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Enable/disable OCR.
    pub enabled: Option<bool>,
    /// Tesseract language selection, e.g. "deu+eng".
    pub languages: Option<String>,
}

/// CTA detection configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct CtaConfig {
    /// Keyword list; replaces the built-in list when set.
    pub keywords: Option<Vec<String>>,
    /// Box padding as a fraction of the longer side (0.0-1.0).
    pub pad_ratio: Option<f64>,
}

/// Scoring threshold configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringSection {
    /// Composite score at or above which the verdict is GO (0-100).
    pub go_threshold: Option<f64>,
    /// Composite score at or above which the verdict is IMPROVE (0-100).
    pub improve_threshold: Option<f64>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/pretest/config.toml`
    /// 2. Project-local: `.pretest.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        // Load XDG config (lowest priority)
        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        // Load project-local config (higher priority, merged)
        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        // Validate merged config
        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        if let Some(r) = self.cta.pad_ratio {
            if !(0.0..=1.0).contains(&r) {
                return Err(format!("cta.pad_ratio must be 0.0-1.0, got {r}"));
            }
        }
        if let Some(t) = self.scoring.go_threshold {
            if !(0.0..=100.0).contains(&t) {
                return Err(format!("scoring.go_threshold must be 0-100, got {t}"));
            }
        }
        if let Some(t) = self.scoring.improve_threshold {
            if !(0.0..=100.0).contains(&t) {
                return Err(format!("scoring.improve_threshold must be 0-100, got {t}"));
            }
        }
        if let (Some(go), Some(improve)) =
            (self.scoring.go_threshold, self.scoring.improve_threshold)
        {
            if improve > go {
                return Err(format!(
                    "scoring.improve_threshold ({improve}) must not exceed go_threshold ({go})"
                ));
            }
        }
        if let Some(ref keywords) = self.cta.keywords {
            if keywords.iter().any(|k| k.trim().is_empty()) {
                return Err("cta.keywords must not contain empty entries".to_string());
            }
        }

        // Output format validation
        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                return Err(format!("output.format must be 'json' or 'jsonl', got '{f}'"));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // General
        self.general.recursive = other.general.recursive.or(self.general.recursive);
        self.general.placement = other
            .general
            .placement
            .or_else(|| self.general.placement.take());
        self.general.output_dir = other
            .general
            .output_dir
            .or_else(|| self.general.output_dir.take());

        // OCR
        self.ocr.enabled = other.ocr.enabled.or(self.ocr.enabled);
        self.ocr.languages = other.ocr.languages.or_else(|| self.ocr.languages.take());

        // CTA
        self.cta.keywords = other.cta.keywords.or_else(|| self.cta.keywords.take());
        self.cta.pad_ratio = other.cta.pad_ratio.or(self.cta.pad_ratio);

        // Scoring
        self.scoring.go_threshold = other.scoring.go_threshold.or(self.scoring.go_threshold);
        self.scoring.improve_threshold = other
            .scoring
            .improve_threshold
            .or(self.scoring.improve_threshold);

        // Output
        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pretest").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.pretest.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".pretest.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
