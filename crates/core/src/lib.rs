pub mod analyzer;
pub mod checks;
pub mod error;
pub mod evaluate;
pub mod extract;
pub mod language;
pub mod metadata;
pub mod parse;
pub mod preprocess;
pub mod report;
pub mod rules;
pub mod scoring;
pub mod stats;

pub use analyzer::{Analyzer, AnalyzerConfig, AnalyzerConfigBuilder, analyze};
pub use checks::{AnalysisCheck, CheckId, CheckScore, Impact};
pub use error::{ProscoreError, Result};
pub use evaluate::{Evaluation, evaluate};
pub use extract::{ExtractedContent, LinkClassifier, LinkKind, StructuralCounts, extract, extract_content};
pub use language::{FleschCoefficients, LanguageCode, LanguageRules, LanguageTable, SyllableStrategy};
pub use metadata::{AnalysisInput, Metadata};
pub use parse::Document;
pub use preprocess::{PreprocessConfig, preprocess_html};
pub use report::AnalysisResult;
pub use rules::{LengthRange, Rules, RulesTable};
pub use scoring::{DEFAULT_IMPORTANT_MARKER, Scores, calculate_scores, category_score, rank_improvements};
pub use stats::{ContentStatistics, compute_statistics, count_syllables, flesch_reading_ease};
