//! Numeric thresholds the rule evaluator checks against.
//!
//! [`Rules`] carries the reference values through its `Default` impl.
//! [`RulesTable`] adds optional per-language overrides; a language without
//! an override uses the default row.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::language::LanguageCode;
use crate::{ProscoreError, Result};

/// Inclusive character-count range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthRange {
    pub min: usize,
    pub max: usize,
}

impl LengthRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: usize) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Thresholds for every readability and SEO check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// SEO title length in characters (default: 55..=70).
    pub title_length: LengthRange,
    /// Meta description length in characters (default: 120..=160).
    pub meta_description_length: LengthRange,
    /// Minimum word count (default: 300).
    pub content_length_min: usize,
    /// Maximum slug length in characters (default: 75).
    pub slug_max: usize,
    /// Minimum Flesch Reading Ease (default: 65).
    pub readability_flesch_min: f64,
    /// Maximum average words per paragraph (default: 150).
    pub paragraph_max_length: f64,
    /// Maximum average words per sentence (default: 20).
    pub sentence_max_length: f64,
    /// Maximum share of passive sentences (default: 10).
    pub passive_voice_max_percentage: f64,
    /// Minimum share of sentences with a transition word (default: 30).
    pub transition_words_min_percentage: f64,
    /// Minimum internal link count (default: 2).
    pub internal_links_min: usize,
    /// Minimum external link count (default: 1).
    pub external_links_min: usize,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            title_length: LengthRange::new(55, 70),
            meta_description_length: LengthRange::new(120, 160),
            content_length_min: 300,
            slug_max: 75,
            readability_flesch_min: 65.0,
            paragraph_max_length: 150.0,
            sentence_max_length: 20.0,
            passive_voice_max_percentage: 10.0,
            transition_words_min_percentage: 30.0,
            internal_links_min: 2,
            external_links_min: 1,
        }
    }
}

impl Rules {
    /// Rejects inverted ranges and negative or non-finite limits.
    ///
    /// # Errors
    ///
    /// Returns [`ProscoreError::ConfigError`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        for (name, range) in [("title_length", self.title_length), ("meta_description_length", self.meta_description_length)] {
            if range.min > range.max {
                return Err(ProscoreError::ConfigError(format!(
                    "{}: min ({}) exceeds max ({})",
                    name, range.min, range.max
                )));
            }
        }

        for (name, value) in [
            ("readability_flesch_min", self.readability_flesch_min),
            ("paragraph_max_length", self.paragraph_max_length),
            ("sentence_max_length", self.sentence_max_length),
            ("passive_voice_max_percentage", self.passive_voice_max_percentage),
            ("transition_words_min_percentage", self.transition_words_min_percentage),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ProscoreError::ConfigError(format!(
                    "{}: expected a non-negative number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

/// Default thresholds plus per-language overrides.
///
/// # Example
///
/// ```rust
/// use proscore_core::{LanguageCode, Rules, RulesTable};
///
/// let german = Rules { readability_flesch_min: 50.0, ..Rules::default() };
/// let table = RulesTable::default().with_override(LanguageCode::De, german);
///
/// assert_eq!(table.for_language(LanguageCode::De).readability_flesch_min, 50.0);
/// assert_eq!(table.for_language(LanguageCode::En).readability_flesch_min, 65.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesTable {
    pub default: Rules,
    pub by_language: BTreeMap<LanguageCode, Rules>,
}

impl RulesTable {
    pub fn new(default: Rules) -> Self {
        Self { default, by_language: BTreeMap::new() }
    }

    /// Adds or replaces the thresholds used for `code`.
    pub fn with_override(mut self, code: LanguageCode, rules: Rules) -> Self {
        self.by_language.insert(code, rules);
        self
    }

    /// Thresholds for `code`, falling back to the default row.
    pub fn for_language(&self, code: LanguageCode) -> &Rules {
        self.by_language.get(&code).unwrap_or(&self.default)
    }

    /// Validates the default row and every override.
    pub fn validate(&self) -> Result<()> {
        self.default.validate()?;
        for (code, rules) in &self.by_language {
            rules
                .validate()
                .map_err(|e| ProscoreError::ConfigError(format!("override for {}: {}", code, e)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_values() {
        let rules = Rules::default();
        assert_eq!(rules.title_length, LengthRange::new(55, 70));
        assert_eq!(rules.meta_description_length, LengthRange::new(120, 160));
        assert_eq!(rules.content_length_min, 300);
        assert_eq!(rules.slug_max, 75);
        assert_eq!(rules.readability_flesch_min, 65.0);
        assert_eq!(rules.paragraph_max_length, 150.0);
        assert_eq!(rules.sentence_max_length, 20.0);
        assert_eq!(rules.passive_voice_max_percentage, 10.0);
        assert_eq!(rules.transition_words_min_percentage, 30.0);
        assert_eq!(rules.internal_links_min, 2);
        assert_eq!(rules.external_links_min, 1);
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_range_is_inclusive() {
        let range = LengthRange::new(55, 70);
        assert!(range.contains(55));
        assert!(range.contains(70));
        assert!(!range.contains(54));
        assert!(!range.contains(71));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let rules: Rules = serde_json::from_str(r#"{ "content_length_min": 600 }"#).unwrap();
        assert_eq!(rules.content_length_min, 600);
        assert_eq!(rules.slug_max, 75);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let rules = Rules { title_length: LengthRange::new(80, 60), ..Default::default() };
        let err = rules.validate().unwrap_err();
        assert!(err.to_string().contains("title_length"));
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let rules = Rules { sentence_max_length: -1.0, ..Default::default() };
        assert!(matches!(rules.validate(), Err(ProscoreError::ConfigError(_))));
    }

    #[test]
    fn test_override_lookup() {
        let french = Rules { sentence_max_length: 25.0, ..Default::default() };
        let table = RulesTable::default().with_override(LanguageCode::Fr, french);

        assert_eq!(table.for_language(LanguageCode::Fr).sentence_max_length, 25.0);
        assert_eq!(table.for_language(LanguageCode::Tr).sentence_max_length, 20.0);
    }

    #[test]
    fn test_table_from_json() {
        let json = r#"{
            "by_language": {
                "tr": { "readability_flesch_min": 50.0 }
            }
        }"#;
        let table: RulesTable = serde_json::from_str(json).unwrap();

        assert_eq!(table.default, Rules::default());
        let tr = table.for_language(LanguageCode::Tr);
        assert_eq!(tr.readability_flesch_min, 50.0);
        assert_eq!(tr.content_length_min, 300);
    }

    #[test]
    fn test_invalid_override_names_language() {
        let bad = Rules { meta_description_length: LengthRange::new(200, 100), ..Default::default() };
        let table = RulesTable::default().with_override(LanguageCode::De, bad);
        let err = table.validate().unwrap_err();
        assert!(err.to_string().contains("de"));
    }
}
