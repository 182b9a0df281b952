//! Rule evaluation: statistics and metadata in, ordered checks out.
//!
//! Each rule measures one quantity, grades it against thresholds from
//! [`Rules`] and carries a fixed impact tier. Bucket labels such as
//! "easy to read" are decided here and nowhere else.

use crate::checks::{AnalysisCheck, CheckId, CheckScore, Impact};
use crate::metadata::Metadata;
use crate::rules::{LengthRange, Rules};
use crate::stats::ContentStatistics;

/// Checks produced for one document, in fixed order.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub readability: Vec<AnalysisCheck>,
    pub seo: Vec<AnalysisCheck>,
}

/// Runs every readability and SEO rule.
pub fn evaluate(stats: &ContentStatistics, metadata: &Metadata, rules: &Rules) -> Evaluation {
    Evaluation { readability: readability_checks(stats, rules), seo: seo_checks(stats, metadata, rules) }
}

/// Readability checks in report order.
pub fn readability_checks(stats: &ContentStatistics, rules: &Rules) -> Vec<AnalysisCheck> {
    vec![
        flesch_reading_ease(stats, rules),
        sentence_length(stats, rules),
        paragraph_length(stats, rules),
        passive_voice(stats, rules),
        transition_words(stats, rules),
        heading_distribution(stats),
    ]
}

/// SEO checks in report order.
pub fn seo_checks(stats: &ContentStatistics, metadata: &Metadata, rules: &Rules) -> Vec<AnalysisCheck> {
    vec![
        title_length(&metadata.title, rules.title_length),
        meta_description_length(&metadata.description, rules.meta_description_length),
        h1_count(stats),
        content_length(stats, rules),
        slug_length(&metadata.slug, rules.slug_max),
        image_alt_tags(stats),
        internal_links(stats, rules),
        external_links(stats, rules),
    ]
}

fn grade_label(score: CheckScore) -> &'static str {
    match score {
        CheckScore::Good => "good",
        CheckScore::Ok => "needs improvement",
        CheckScore::Bad => "poor",
        CheckScore::Na => "not applicable",
    }
}

/// Conventional Flesch bands; the formula is open-ended on both sides.
fn flesch_label(value: f64) -> &'static str {
    match value {
        v if v >= 90.0 => "very easy to read",
        v if v >= 80.0 => "easy to read",
        v if v >= 70.0 => "fairly easy to read",
        v if v >= 60.0 => "plain language",
        v if v >= 50.0 => "fairly difficult to read",
        v if v >= 30.0 => "difficult to read",
        _ => "very difficult to read",
    }
}

fn flesch_reading_ease(stats: &ContentStatistics, rules: &Rules) -> AnalysisCheck {
    let value = stats.flesch_reading_ease;
    let min = rules.readability_flesch_min;
    let score = CheckScore::at_least(value, min, 0.8 * min);

    AnalysisCheck::new(
        CheckId::FleschReadingEase,
        score,
        Impact::High,
        format!("Flesch Reading Ease: {:.1} ({})", value, flesch_label(value)),
        format!("Estimates how easy the text is to read from sentence and word length. Aim for {:.0} or higher.", min),
    )
    .with_suggestions([
        "Use shorter sentences and simpler words to make the text easier to read.",
        "Replace long words with shorter everyday alternatives.",
        "Split complex ideas across several sentences.",
    ])
}

fn sentence_length(stats: &ContentStatistics, rules: &Rules) -> AnalysisCheck {
    let value = stats.average_sentence_length;
    let max = rules.sentence_max_length;
    let score = CheckScore::at_most(value, max, 1.2 * max);

    AnalysisCheck::new(
        CheckId::SentenceLength,
        score,
        Impact::Medium,
        format!("Average sentence length: {:.1} words ({})", value, grade_label(score)),
        format!("Long sentences are harder to follow. Keep the average at {:.0} words or fewer.", max),
    )
    .with_suggestions([
        format!("Shorten sentences to an average of {:.0} words or fewer.", max),
        "Break long sentences at conjunctions into two sentences.".to_string(),
    ])
}

fn paragraph_length(stats: &ContentStatistics, rules: &Rules) -> AnalysisCheck {
    let max = rules.paragraph_max_length;
    let description =
        format!("Short paragraphs make content easier to scan. Keep paragraphs at {:.0} words or fewer on average.", max);

    if stats.paragraph_count == 0 {
        return AnalysisCheck::new(
            CheckId::ParagraphLength,
            CheckScore::Na,
            Impact::Medium,
            "Average paragraph length: no paragraphs found",
            description,
        );
    }

    let value = stats.word_count as f64 / stats.paragraph_count as f64;
    let score = CheckScore::at_most(value, max, 1.2 * max);

    AnalysisCheck::new(
        CheckId::ParagraphLength,
        score,
        Impact::Medium,
        format!("Average paragraph length: {:.1} words ({})", value, grade_label(score)),
        description,
    )
    .with_suggestions([
        format!("Split long paragraphs so each stays under {:.0} words.", max),
        "Give each paragraph a single main idea.".to_string(),
    ])
}

fn passive_voice(stats: &ContentStatistics, rules: &Rules) -> AnalysisCheck {
    let value = stats.passive_voice_percentage;
    let max = rules.passive_voice_max_percentage;
    let score = CheckScore::at_most(value, max, 1.5 * max);

    AnalysisCheck::new(
        CheckId::PassiveVoice,
        score,
        Impact::Low,
        format!("Passive voice: {:.1}% of sentences ({})", value, grade_label(score)),
        format!(
            "Active sentences are more direct. Keep passive sentences at {:.0}% or less. Detection is approximate.",
            max
        ),
    )
    .with_suggestions([
        "Rewrite passive sentences in the active voice.",
        "Name who performs the action at the start of the sentence.",
    ])
}

fn transition_words(stats: &ContentStatistics, rules: &Rules) -> AnalysisCheck {
    let value = stats.transition_words_percentage;
    let min = rules.transition_words_min_percentage;
    let score = CheckScore::at_least(value, min, 0.7 * min);

    AnalysisCheck::new(
        CheckId::TransitionWords,
        score,
        Impact::Medium,
        format!("Transition words: {:.1}% of sentences ({})", value, grade_label(score)),
        format!("Transition words connect ideas. Use them in at least {:.0}% of sentences.", min),
    )
    .with_suggestions([
        "Connect sentences with transition words such as \"however\", \"therefore\" or \"for example\".",
        "Signal the order of steps with words like \"first\", \"then\" and \"finally\".",
    ])
}

fn heading_distribution(stats: &ContentStatistics) -> AnalysisCheck {
    let h1 = stats.headings(1);
    let h2 = stats.headings(2);
    let score = if h1 == 1 && h2 > 0 {
        CheckScore::Good
    } else if h1 > 0 {
        CheckScore::Ok
    } else {
        CheckScore::Bad
    };

    AnalysisCheck::new(
        CheckId::HeadingDistribution,
        score,
        Impact::Medium,
        format!("Headings: {} H1, {} H2 ({})", h1, h2, grade_label(score)),
        "A single H1 followed by H2 subheadings gives the content a clear structure.",
    )
    .with_suggestions([
        "Add one H1 heading for the main title.",
        "Divide the content into sections with H2 subheadings.",
    ])
}

/// Shared ladder for title and description lengths.
fn length_score(length: usize, range: LengthRange) -> CheckScore {
    if range.contains(length) {
        CheckScore::Good
    } else if length > 0 {
        CheckScore::Ok
    } else {
        CheckScore::Bad
    }
}

fn title_length(title: &str, range: LengthRange) -> AnalysisCheck {
    let length = title.chars().count();
    let score = length_score(length, range);

    AnalysisCheck::new(
        CheckId::TitleLength,
        score,
        Impact::High,
        format!("SEO title length: {} characters ({})", length, grade_label(score)),
        format!(
            "Search results show about {} to {} characters of a title.",
            range.min, range.max
        ),
    )
    .with_suggestions([
        format!("Lengthen the SEO title to between {} and {} characters.", range.min, range.max),
        "Put the main keyword near the start of the title.".to_string(),
    ])
}

fn meta_description_length(description: &str, range: LengthRange) -> AnalysisCheck {
    let length = description.chars().count();
    let score = length_score(length, range);

    AnalysisCheck::new(
        CheckId::MetaDescriptionLength,
        score,
        Impact::High,
        format!("Meta description length: {} characters ({})", length, grade_label(score)),
        format!(
            "The meta description is the snippet under the title in search results. Aim for {} to {} characters.",
            range.min, range.max
        ),
    )
    .with_suggestions([
        format!("Write a meta description of {} to {} characters.", range.min, range.max),
        "Summarize what the reader gains from the post.".to_string(),
    ])
}

fn h1_count(stats: &ContentStatistics) -> AnalysisCheck {
    let h1 = stats.headings(1);
    let score = match h1 {
        1 => CheckScore::Good,
        0 => CheckScore::Bad,
        _ => CheckScore::Ok,
    };

    AnalysisCheck::new(
        CheckId::H1Count,
        score,
        Impact::High,
        format!("H1 headings: {} ({})", h1, grade_label(score)),
        "A page should have exactly one H1 heading naming its topic.",
    )
    .with_suggestions(["Add one H1 heading that states the topic of the post."])
}

fn content_length(stats: &ContentStatistics, rules: &Rules) -> AnalysisCheck {
    let words = stats.word_count;
    let min = rules.content_length_min;
    let score = CheckScore::at_least(words as f64, min as f64, 0.7 * min as f64);

    AnalysisCheck::new(
        CheckId::ContentLength,
        score,
        Impact::High,
        format!("Content length: {} words ({})", words, grade_label(score)),
        format!("Longer posts tend to rank better. Write at least {} words.", min),
    )
    .with_suggestions([
        format!("Expand the content to at least {} words.", min),
        "Cover the topic in more depth with examples and explanations.".to_string(),
    ])
}

fn slug_length(slug: &str, max: usize) -> AnalysisCheck {
    let length = slug.chars().count();
    let score = match length {
        0 => CheckScore::Bad,
        n if n <= max => CheckScore::Good,
        _ => CheckScore::Ok,
    };

    AnalysisCheck::new(
        CheckId::SlugLength,
        score,
        Impact::Low,
        format!("URL slug length: {} characters ({})", length, grade_label(score)),
        format!("Short, descriptive slugs are easier to read and share. Keep it to {} characters or fewer.", max),
    )
    .with_suggestions(["Set a short, descriptive URL slug with the main keyword."])
}

fn image_alt_tags(stats: &ContentStatistics) -> AnalysisCheck {
    let missing = stats.images_without_alt;
    let tolerated = (stats.images_with_alt / 5).max(1);
    let score = match missing {
        0 => CheckScore::Good,
        n if n <= tolerated => CheckScore::Ok,
        _ => CheckScore::Bad,
    };

    AnalysisCheck::new(
        CheckId::ImageAltTags,
        score,
        Impact::Medium,
        format!(
            "Images without alt text: {} of {} ({})",
            missing,
            stats.images_with_alt + missing,
            grade_label(score)
        ),
        "Alt text describes images to screen readers and search engines.",
    )
    .with_suggestions([
        format!("Add descriptive alt text to the {} images missing it.", missing),
        "Describe what each image shows in a short phrase.".to_string(),
    ])
}

fn internal_links(stats: &ContentStatistics, rules: &Rules) -> AnalysisCheck {
    let count = stats.internal_links;
    let min = rules.internal_links_min;
    let score = link_score(count, min);

    AnalysisCheck::new(
        CheckId::InternalLinks,
        score,
        Impact::Medium,
        format!("Internal links: {} ({})", count, grade_label(score)),
        format!("Links to other posts on this site help readers and crawlers. Add at least {}.", min),
    )
    .with_suggestions([format!("Link to at least {} related posts on this site.", min)])
}

fn external_links(stats: &ContentStatistics, rules: &Rules) -> AnalysisCheck {
    let count = stats.external_links;
    let min = rules.external_links_min;
    let score = link_score(count, min);

    AnalysisCheck::new(
        CheckId::ExternalLinks,
        score,
        Impact::Low,
        format!("External links: {} ({})", count, grade_label(score)),
        format!("Citing outside sources adds credibility. Add at least {}.", min),
    )
    .with_suggestions([format!("Cite at least {} authoritative external source.", min)])
}

fn link_score(count: usize, min: usize) -> CheckScore {
    if count >= min {
        CheckScore::Good
    } else if count > 0 {
        CheckScore::Ok
    } else {
        CheckScore::Bad
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::StructuralCounts;
    use crate::language::{LanguageCode, LanguageTable};
    use crate::stats::compute_statistics;
    use rstest::rstest;

    fn stats() -> ContentStatistics {
        let table = LanguageTable::builtin();
        let rules = table.get(LanguageCode::En).unwrap();
        compute_statistics("", rules, &StructuralCounts::default())
    }

    fn find(checks: &[AnalysisCheck], id: CheckId) -> &AnalysisCheck {
        checks.iter().find(|c| c.id == id).unwrap()
    }

    #[test]
    fn test_check_order() {
        let eval = evaluate(&stats(), &Metadata::default(), &Rules::default());
        let readability: Vec<_> = eval.readability.iter().map(|c| c.id.as_str()).collect();
        let seo: Vec<_> = eval.seo.iter().map(|c| c.id.as_str()).collect();

        assert_eq!(
            readability,
            vec![
                "flesch-reading-ease",
                "sentence-length",
                "paragraph-length",
                "passive-voice",
                "transition-words",
                "heading-distribution"
            ]
        );
        assert_eq!(
            seo,
            vec![
                "title-length",
                "meta-description-length",
                "h1-count",
                "content-length",
                "slug-length",
                "image-alt-tags",
                "internal-links",
                "external-links"
            ]
        );
    }

    #[test]
    fn test_impacts_are_fixed() {
        let eval = evaluate(&stats(), &Metadata::default(), &Rules::default());
        let impacts: Vec<_> = eval.readability.iter().chain(&eval.seo).map(|c| c.impact).collect();
        assert_eq!(
            impacts,
            vec![
                Impact::High,
                Impact::Medium,
                Impact::Medium,
                Impact::Low,
                Impact::Medium,
                Impact::Medium,
                Impact::High,
                Impact::High,
                Impact::High,
                Impact::High,
                Impact::Low,
                Impact::Medium,
                Impact::Medium,
                Impact::Low
            ]
        );
    }

    #[test]
    fn test_suggestions_only_on_bad() {
        let eval = evaluate(&stats(), &Metadata::new("t", "", "s"), &Rules::default());
        for check in eval.readability.iter().chain(&eval.seo) {
            if check.score == CheckScore::Bad {
                assert!(!check.suggestions.is_empty(), "{} has no suggestions", check.id);
                assert!(check.suggestions.len() <= 3);
            } else {
                assert!(check.suggestions.is_empty(), "{} has suggestions", check.id);
            }
        }
    }

    #[rstest]
    #[case(70.0, CheckScore::Good)]
    #[case(65.0, CheckScore::Good)]
    #[case(55.0, CheckScore::Ok)]
    #[case(40.0, CheckScore::Bad)]
    #[case(-20.0, CheckScore::Bad)]
    fn test_flesch_ladder(#[case] value: f64, #[case] expected: CheckScore) {
        let stats = ContentStatistics { flesch_reading_ease: value, ..stats() };
        let check = flesch_reading_ease(&stats, &Rules::default());
        assert_eq!(check.score, expected);
        assert!(check.text.contains(&format!("{:.1}", value)));
    }

    #[test]
    fn test_flesch_labels() {
        assert_eq!(flesch_label(120.0), "very easy to read");
        assert_eq!(flesch_label(82.0), "easy to read");
        assert_eq!(flesch_label(45.0), "difficult to read");
        assert_eq!(flesch_label(-10.0), "very difficult to read");
    }

    #[rstest]
    #[case(18.0, CheckScore::Good)]
    #[case(23.5, CheckScore::Ok)]
    #[case(25.0, CheckScore::Bad)]
    fn test_sentence_length_ladder(#[case] value: f64, #[case] expected: CheckScore) {
        let stats = ContentStatistics { average_sentence_length: value, ..stats() };
        assert_eq!(sentence_length(&stats, &Rules::default()).score, expected);
    }

    #[test]
    fn test_paragraph_length_without_paragraphs_is_na() {
        let stats = ContentStatistics { word_count: 500, paragraph_count: 0, ..stats() };
        let check = paragraph_length(&stats, &Rules::default());
        assert_eq!(check.score, CheckScore::Na);
        assert!(check.suggestions.is_empty());
    }

    #[rstest]
    #[case(600, 4, CheckScore::Good)]
    #[case(850, 5, CheckScore::Ok)]
    #[case(1000, 5, CheckScore::Bad)]
    fn test_paragraph_length_ladder(#[case] words: usize, #[case] paragraphs: usize, #[case] expected: CheckScore) {
        let stats = ContentStatistics { word_count: words, paragraph_count: paragraphs, ..stats() };
        assert_eq!(paragraph_length(&stats, &Rules::default()).score, expected);
    }

    #[rstest]
    #[case(10.0, CheckScore::Good)]
    #[case(15.0, CheckScore::Ok)]
    #[case(15.1, CheckScore::Bad)]
    fn test_passive_voice_ladder(#[case] value: f64, #[case] expected: CheckScore) {
        let stats = ContentStatistics { passive_voice_percentage: value, ..stats() };
        assert_eq!(passive_voice(&stats, &Rules::default()).score, expected);
    }

    #[rstest]
    #[case(30.0, CheckScore::Good)]
    #[case(22.0, CheckScore::Ok)]
    #[case(20.0, CheckScore::Bad)]
    fn test_transition_words_ladder(#[case] value: f64, #[case] expected: CheckScore) {
        let stats = ContentStatistics { transition_words_percentage: value, ..stats() };
        assert_eq!(transition_words(&stats, &Rules::default()).score, expected);
    }

    #[rstest]
    #[case(1, 2, CheckScore::Good)]
    #[case(1, 0, CheckScore::Ok)]
    #[case(2, 3, CheckScore::Ok)]
    #[case(0, 3, CheckScore::Bad)]
    fn test_heading_distribution(#[case] h1: usize, #[case] h2: usize, #[case] expected: CheckScore) {
        let mut stats = stats();
        stats.heading_counts.insert(1, h1);
        stats.heading_counts.insert(2, h2);
        assert_eq!(heading_distribution(&stats).score, expected);
    }

    #[rstest]
    #[case(0, CheckScore::Bad)]
    #[case(10, CheckScore::Ok)]
    #[case(55, CheckScore::Good)]
    #[case(70, CheckScore::Good)]
    #[case(71, CheckScore::Ok)]
    fn test_title_length_ladder(#[case] length: usize, #[case] expected: CheckScore) {
        let title = "x".repeat(length);
        assert_eq!(title_length(&title, Rules::default().title_length).score, expected);
    }

    #[test]
    fn test_empty_title_suggests_lengthening() {
        let check = title_length("", Rules::default().title_length);
        assert_eq!(check.score, CheckScore::Bad);
        assert!(check.suggestions[0].starts_with("Lengthen the SEO title"));
    }

    #[test]
    fn test_lengths_count_characters_not_bytes() {
        // 60 characters, 120 bytes.
        let title = "ğ".repeat(60);
        let check = title_length(&title, Rules::default().title_length);
        assert_eq!(check.score, CheckScore::Good);
        assert!(check.text.contains("60 characters"));
    }

    #[rstest]
    #[case(0, CheckScore::Bad)]
    #[case(1, CheckScore::Good)]
    #[case(2, CheckScore::Ok)]
    fn test_h1_count(#[case] h1: usize, #[case] expected: CheckScore) {
        let mut stats = stats();
        stats.heading_counts.insert(1, h1);
        assert_eq!(h1_count(&stats).score, expected);
    }

    #[rstest]
    #[case(300, CheckScore::Good)]
    #[case(5_000, CheckScore::Good)]
    #[case(211, CheckScore::Ok)]
    #[case(209, CheckScore::Bad)]
    #[case(0, CheckScore::Bad)]
    fn test_content_length_ladder(#[case] words: usize, #[case] expected: CheckScore) {
        let stats = ContentStatistics { word_count: words, ..stats() };
        assert_eq!(content_length(&stats, &Rules::default()).score, expected);
    }

    #[rstest]
    #[case("", CheckScore::Bad)]
    #[case("short-slug", CheckScore::Good)]
    #[case(&"a".repeat(75), CheckScore::Good)]
    #[case(&"a".repeat(76), CheckScore::Ok)]
    fn test_slug_length_ladder(#[case] slug: &str, #[case] expected: CheckScore) {
        assert_eq!(slug_length(slug, 75).score, expected);
    }

    #[rstest]
    #[case(10, 0, CheckScore::Good)]
    #[case(0, 1, CheckScore::Ok)]
    #[case(10, 2, CheckScore::Ok)]
    #[case(10, 3, CheckScore::Bad)]
    #[case(0, 2, CheckScore::Bad)]
    fn test_image_alt_tags(#[case] with_alt: usize, #[case] without_alt: usize, #[case] expected: CheckScore) {
        let stats = ContentStatistics { images_with_alt: with_alt, images_without_alt: without_alt, ..stats() };
        assert_eq!(image_alt_tags(&stats).score, expected);
    }

    #[rstest]
    #[case(3, 1, CheckScore::Good, CheckScore::Good)]
    #[case(1, 0, CheckScore::Ok, CheckScore::Bad)]
    #[case(0, 2, CheckScore::Bad, CheckScore::Good)]
    fn test_link_checks(
        #[case] internal: usize, #[case] external: usize, #[case] expected_internal: CheckScore,
        #[case] expected_external: CheckScore,
    ) {
        let stats = ContentStatistics { internal_links: internal, external_links: external, ..stats() };
        assert_eq!(internal_links(&stats, &Rules::default()).score, expected_internal);
        assert_eq!(external_links(&stats, &Rules::default()).score, expected_external);
    }

    #[test]
    fn test_custom_rules_change_grades() {
        let stats = ContentStatistics { word_count: 250, ..stats() };
        let strict = Rules { content_length_min: 1_000, ..Rules::default() };
        assert_eq!(content_length(&stats, &Rules::default()).score, CheckScore::Ok);
        assert_eq!(content_length(&stats, &strict).score, CheckScore::Bad);
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let stats = ContentStatistics { word_count: 420, paragraph_count: 3, flesch_reading_ease: 58.2, ..stats() };
        let metadata = Metadata::new("A title", "A description", "a-slug");
        let first = evaluate(&stats, &metadata, &Rules::default());
        let second = evaluate(&stats, &metadata, &Rules::default());
        assert_eq!(first, second);
    }
}
