//! Check outcome types shared by the evaluator and the score aggregator.

use std::fmt;

use serde::Serialize;

/// Stable identifier of a readability or SEO check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckId {
    FleschReadingEase,
    SentenceLength,
    ParagraphLength,
    PassiveVoice,
    TransitionWords,
    HeadingDistribution,
    TitleLength,
    MetaDescriptionLength,
    H1Count,
    ContentLength,
    SlugLength,
    ImageAltTags,
    InternalLinks,
    ExternalLinks,
}

impl CheckId {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckId::FleschReadingEase => "flesch-reading-ease",
            CheckId::SentenceLength => "sentence-length",
            CheckId::ParagraphLength => "paragraph-length",
            CheckId::PassiveVoice => "passive-voice",
            CheckId::TransitionWords => "transition-words",
            CheckId::HeadingDistribution => "heading-distribution",
            CheckId::TitleLength => "title-length",
            CheckId::MetaDescriptionLength => "meta-description-length",
            CheckId::H1Count => "h1-count",
            CheckId::ContentLength => "content-length",
            CheckId::SlugLength => "slug-length",
            CheckId::ImageAltTags => "image-alt-tags",
            CheckId::InternalLinks => "internal-links",
            CheckId::ExternalLinks => "external-links",
        }
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grade assigned to a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckScore {
    Good,
    Ok,
    Bad,
    /// The measurement is undefined for this input; excluded from scoring.
    Na,
}

impl CheckScore {
    /// Points contributed to a category score, `None` for [`CheckScore::Na`].
    pub fn points(&self) -> Option<u32> {
        match self {
            CheckScore::Good => Some(100),
            CheckScore::Ok => Some(70),
            CheckScore::Bad => Some(30),
            CheckScore::Na => None,
        }
    }

    /// Grades a value where larger is better.
    pub fn at_least(value: f64, good: f64, ok: f64) -> Self {
        if value >= good {
            CheckScore::Good
        } else if value >= ok {
            CheckScore::Ok
        } else {
            CheckScore::Bad
        }
    }

    /// Grades a value where smaller is better.
    pub fn at_most(value: f64, good: f64, ok: f64) -> Self {
        if value <= good {
            CheckScore::Good
        } else if value <= ok {
            CheckScore::Ok
        } else {
            CheckScore::Bad
        }
    }
}

/// Fixed weight tier of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    /// Tiers from most to least important.
    pub const RANKED: [Impact; 3] = [Impact::High, Impact::Medium, Impact::Low];

    pub fn weight(&self) -> u32 {
        match self {
            Impact::High => 3,
            Impact::Medium => 2,
            Impact::Low => 1,
        }
    }
}

/// One evaluated rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisCheck {
    pub id: CheckId,
    pub score: CheckScore,
    pub impact: Impact,
    /// Short summary including the measured value.
    pub text: String,
    /// What the check measures.
    pub description: String,
    /// Remediation steps in priority order; empty unless the score is bad.
    pub suggestions: Vec<String>,
}

impl AnalysisCheck {
    pub fn new(
        id: CheckId, score: CheckScore, impact: Impact, text: impl Into<String>, description: impl Into<String>,
    ) -> Self {
        Self { id, score, impact, text: text.into(), description: description.into(), suggestions: Vec::new() }
    }

    /// Attaches suggestions, which are kept only for a bad score.
    pub fn with_suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.score == CheckScore::Bad {
            self.suggestions = suggestions.into_iter().map(Into::into).collect();
        }
        self
    }

    pub fn is_bad(&self) -> bool {
        self.score == CheckScore::Bad
    }
}
