//! The analysis report.
//!
//! [`AnalysisResult`] is the complete, immutable outcome of one
//! [`crate::Analyzer::analyze`] call: the three scores, the statistics they
//! were derived from, both check lists and the ranked improvements.

use serde::Serialize;

use crate::checks::{AnalysisCheck, CheckId, CheckScore};
use crate::language::LanguageCode;
use crate::stats::ContentStatistics;
use crate::{ProscoreError, Result};

/// Readability and SEO report for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Mean of the readability and SEO scores, 0 to 100.
    pub overall_score: u8,

    /// Weighted score of the readability checks, 0 to 100.
    pub readability_score: u8,

    /// Weighted score of the SEO checks, 0 to 100.
    pub seo_score: u8,

    pub content_stats: ContentStatistics,

    pub readability_checks: Vec<AnalysisCheck>,

    pub seo_checks: Vec<AnalysisCheck>,

    /// First suggestion of every failing check, most important first.
    pub improvements: Vec<String>,

    /// Language code exactly as requested.
    pub language: String,

    /// Language whose rules were applied.
    pub resolved_language: LanguageCode,
}

impl AnalysisResult {
    /// All checks, readability first.
    pub fn checks(&self) -> impl Iterator<Item = &AnalysisCheck> {
        self.readability_checks.iter().chain(&self.seo_checks)
    }

    /// Looks up a check by id.
    pub fn check(&self, id: CheckId) -> Option<&AnalysisCheck> {
        self.checks().find(|check| check.id == id)
    }

    /// Checks graded bad, in report order.
    pub fn failing_checks(&self) -> impl Iterator<Item = &AnalysisCheck> {
        self.checks().filter(|check| check.score == CheckScore::Bad)
    }

    /// Whether the requested language had no rules of its own.
    pub fn used_fallback_language(&self) -> bool {
        LanguageCode::from_code(&self.language) != Some(self.resolved_language)
    }

    /// Gets the report as a JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| ProscoreError::Serialization(e.to_string()))
    }

    /// Gets the report as compact JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ProscoreError::Serialization(e.to_string()))
    }

    /// Gets the report as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ProscoreError::Serialization(e.to_string()))
    }
}
