//! Main analysis API.
//!
//! The entry point is the [`Analyzer`] struct, configured with an
//! [`AnalyzerConfig`], along with the [`analyze`] convenience function.
//!
//! # Example
//!
//! ```rust
//! use proscore_core::{Metadata, analyze};
//!
//! let html = "<h1>Hello</h1><p>Short posts are easy to read. They are also quick to write.</p>";
//! let metadata = Metadata::new("Hello", "A short greeting.", "hello");
//!
//! let report = analyze(html, &metadata, "en");
//! assert!(report.overall_score <= 100);
//! println!("{}", report.to_json_pretty().unwrap());
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::evaluate::evaluate;
use crate::extract::{LinkClassifier, extract_content};
use crate::language::LanguageTable;
use crate::metadata::{AnalysisInput, Metadata};
use crate::parse::Document;
use crate::preprocess::PreprocessConfig;
use crate::report::AnalysisResult;
use crate::rules::{Rules, RulesTable};
use crate::scoring::{DEFAULT_IMPORTANT_MARKER, calculate_scores, rank_improvements};
use crate::stats::compute_statistics;
use crate::{ProscoreError, Result};

/// Configuration for the [`Analyzer`].
///
/// # Example
///
/// ```rust
/// use proscore_core::{AnalyzerConfig, Rules};
///
/// let config = AnalyzerConfig::builder()
///     .site_base_url("https://blog.example.com")
///     .important_marker("[!] ")
///     .default_rules(Rules { content_length_min: 600, ..Rules::default() })
///     .build();
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Thresholds, with optional per-language overrides.
    pub rules: RulesTable,

    /// Base URL of the site; links containing it count as internal
    /// (default: none, so only root-relative links are internal).
    pub site_base_url: Option<String>,

    /// Prefix for high-impact improvements (default: `"[ÖNEMLİ] "`).
    pub important_marker: String,

    /// Markup removed before text extraction (default: everything invisible).
    pub preprocess: PreprocessConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            rules: RulesTable::default(),
            site_base_url: None,
            important_marker: DEFAULT_IMPORTANT_MARKER.to_string(),
            preprocess: PreprocessConfig::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Creates a new builder for AnalyzerConfig.
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder::new()
    }

    /// Parses and validates a JSON configuration document.
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`ProscoreError::ConfigError`] for malformed JSON or
    /// inconsistent thresholds, and [`ProscoreError::InvalidUrl`] if
    /// `site_base_url` is not an absolute URL.
    ///
    /// # Example
    ///
    /// ```rust
    /// use proscore_core::{AnalyzerConfig, LanguageCode};
    ///
    /// let config = AnalyzerConfig::from_json(r#"{
    ///     "site_base_url": "https://blog.example.com",
    ///     "rules": { "by_language": { "de": { "readability_flesch_min": 50.0 } } }
    /// }"#).unwrap();
    ///
    /// assert_eq!(config.rules.for_language(LanguageCode::De).readability_flesch_min, 50.0);
    /// assert_eq!(config.important_marker, "[ÖNEMLİ] ");
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| ProscoreError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ProscoreError::FileNotFound`] if `path` does not exist,
    /// [`ProscoreError::Io`] if it cannot be read, and the errors of
    /// [`AnalyzerConfig::from_json`] otherwise.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ProscoreError::FileNotFound(path.to_path_buf()));
        }

        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Checks the base URL and every threshold row.
    pub fn validate(&self) -> Result<()> {
        if let Some(base) = &self.site_base_url
            && !base.trim().is_empty()
        {
            Url::parse(base.trim()).map_err(|e| ProscoreError::InvalidUrl(format!("{}: {}", base, e)))?;
        }

        self.rules.validate()
    }
}

/// Builder for AnalyzerConfig.
pub struct AnalyzerConfigBuilder {
    config: AnalyzerConfig,
}

impl AnalyzerConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: AnalyzerConfig::default() }
    }

    /// Sets the whole thresholds table.
    pub fn rules(mut self, rules: RulesTable) -> Self {
        self.config.rules = rules;
        self
    }

    /// Sets the thresholds used when a language has no override.
    pub fn default_rules(mut self, rules: Rules) -> Self {
        self.config.rules.default = rules;
        self
    }

    /// Sets the site base URL used for link classification.
    pub fn site_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.site_base_url = Some(url.into());
        self
    }

    /// Sets the prefix for high-impact improvements.
    pub fn important_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.important_marker = marker.into();
        self
    }

    /// Sets the preprocessing options.
    pub fn preprocess(mut self, preprocess: PreprocessConfig) -> Self {
        self.config.preprocess = preprocess;
        self
    }

    /// Builds the config.
    pub fn build(self) -> AnalyzerConfig {
        self.config
    }
}

impl Default for AnalyzerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Main entry point for content analysis.
///
/// An analyzer holds only immutable data, so one instance can be shared
/// across threads and reused for any number of documents.
///
/// # Example
///
/// ```rust
/// use proscore_core::{AnalysisInput, Analyzer, AnalyzerConfig, CheckId, CheckScore, Metadata};
///
/// let config = AnalyzerConfig::builder().site_base_url("https://blog.example.com").build();
/// let analyzer = Analyzer::with_config(config);
///
/// let html = r#"<h1>Title</h1><p>See <a href="https://blog.example.com/a">one</a>
///     and <a href="/b">two</a>.</p>"#;
/// let input = AnalysisInput::new(html, Metadata::default(), "tr");
/// let report = analyzer.analyze(&input);
///
/// assert_eq!(report.content_stats.internal_links, 2);
/// assert_eq!(report.check(CheckId::InternalLinks).unwrap().score, CheckScore::Good);
/// ```
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalyzerConfig,
    languages: Arc<LanguageTable>,
    links: LinkClassifier,
}

impl Analyzer {
    /// Creates an analyzer with default configuration and the builtin
    /// language table.
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    /// Creates an analyzer with a custom configuration.
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self::with_config_and_languages(config, LanguageTable::builtin())
    }

    /// Creates an analyzer with a custom configuration and language table.
    pub fn with_config_and_languages(config: AnalyzerConfig, languages: impl Into<Arc<LanguageTable>>) -> Self {
        let links = LinkClassifier::new(config.site_base_url.as_deref());
        Self { config, languages: languages.into(), links }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn languages(&self) -> &LanguageTable {
        &self.languages
    }

    /// Analyzes one document.
    ///
    /// Never fails: unknown languages fall back to English, malformed HTML is
    /// repaired by the parser and empty content yields zero statistics.
    #[tracing::instrument(skip_all, fields(language = %input.language, html_len = input.html.len()))]
    pub fn analyze(&self, input: &AnalysisInput) -> AnalysisResult {
        let doc = Document::parse_with_preprocessing(&input.html, &self.config.preprocess);
        self.analyze_document(&doc, &input.metadata, &input.language)
    }

    /// Analyzes a full HTML page, taking metadata from its head.
    ///
    /// See [`Metadata::from_document`] for where each field comes from.
    pub fn analyze_page(&self, html: &str, language: &str) -> AnalysisResult {
        let metadata = Metadata::from_document(&Document::parse(html));
        self.analyze(&AnalysisInput::new(html, metadata, language))
    }

    fn analyze_document(&self, doc: &Document, metadata: &Metadata, language: &str) -> AnalysisResult {
        let (resolved_language, language_rules) = self.languages.resolve(language);
        let rules = self.config.rules.for_language(resolved_language);

        let content = extract_content(doc, &self.links);
        let content_stats = compute_statistics(&content.text, language_rules, &content.structure);

        let evaluation = evaluate(&content_stats, metadata, rules);
        let scores = calculate_scores(&evaluation);
        let improvements = rank_improvements(&evaluation, &self.config.important_marker);

        tracing::debug!(
            resolved = %resolved_language,
            words = content_stats.word_count,
            overall = scores.overall,
            readability = scores.readability,
            seo = scores.seo,
            "analysis complete"
        );

        AnalysisResult {
            overall_score: scores.overall,
            readability_score: scores.readability,
            seo_score: scores.seo,
            content_stats,
            readability_checks: evaluation.readability,
            seo_checks: evaluation.seo,
            improvements,
            language: language.to_string(),
            resolved_language,
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function for one-off analysis with defaults.
///
/// # Example
///
/// ```rust
/// use proscore_core::{LanguageCode, Metadata, analyze};
///
/// let report = analyze("", &Metadata::default(), "xx");
/// assert_eq!(report.language, "xx");
/// assert_eq!(report.resolved_language, LanguageCode::En);
/// assert_eq!(report.content_stats.word_count, 0);
/// ```
pub fn analyze(html: &str, metadata: &Metadata, language: &str) -> AnalysisResult {
    Analyzer::new().analyze(&AnalysisInput::new(html, metadata.clone(), language))
}
