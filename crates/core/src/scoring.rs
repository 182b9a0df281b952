use crate::checks::{AnalysisCheck, Impact};
use crate::evaluate::Evaluation;

/// Marker placed before high-impact improvements.
pub const DEFAULT_IMPORTANT_MARKER: &str = "[ÖNEMLİ] ";

/// Category and overall scores, each in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scores {
    pub overall: u8,
    pub readability: u8,
    pub seo: u8,
}

/// Weighted mean of check points, rounded half away from zero.
///
/// Each check contributes `weight × points`, where weight is 3, 2 or 1 for
/// high, medium and low impact and points are 100, 70 or 30 for good, ok
/// and bad. `na` checks are left out of both sums. Returns 0 when nothing
/// contributed.
pub fn category_score(checks: &[AnalysisCheck]) -> u8 {
    let (weighted, total_weight) = checks
        .iter()
        .filter_map(|check| check.score.points().map(|points| (check.impact.weight(), points)))
        .fold((0u32, 0u32), |(sum, weights), (weight, points)| (sum + weight * points, weights + weight));

    if total_weight == 0 {
        return 0;
    }

    to_percent(weighted as f64 / total_weight as f64)
}

/// Mean of the two category scores.
pub fn overall_score(readability: u8, seo: u8) -> u8 {
    to_percent((readability as f64 + seo as f64) / 2.0)
}

/// Scores all three figures for an evaluation.
pub fn calculate_scores(evaluation: &Evaluation) -> Scores {
    let readability = category_score(&evaluation.readability);
    let seo = category_score(&evaluation.seo);
    Scores { overall: overall_score(readability, seo), readability, seo }
}

/// Ranks the first suggestion of every bad check.
///
/// Readability checks come before SEO checks; the combined list is then
/// stably partitioned by impact (high, medium, low) so check order survives
/// inside each tier. High-impact entries are prefixed with `important_marker`.
pub fn rank_improvements(evaluation: &Evaluation, important_marker: &str) -> Vec<String> {
    let bad: Vec<&AnalysisCheck> = evaluation
        .readability
        .iter()
        .chain(&evaluation.seo)
        .filter(|check| check.is_bad())
        .collect();

    Impact::RANKED
        .into_iter()
        .flat_map(|tier| {
            bad.iter()
                .filter(move |check| check.impact == tier)
                .filter_map(move |check| {
                    let first = check.suggestions.first()?;
                    Some(if tier == Impact::High { format!("{}{}", important_marker, first) } else { first.clone() })
                })
        })
        .collect()
}

fn to_percent(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
