//! Text statistics: counts, syllables, heuristic voice and cohesion ratios,
//! and the Flesch Reading Ease score.
//!
//! All ratios are guarded: a zero denominator yields `0.0`, never NaN or
//! infinity.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::extract::StructuralCounts;
use crate::language::{FleschCoefficients, LanguageRules, SyllableStrategy};

static SENTENCE_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());

const WORDS_PER_MINUTE: f64 = 200.0;

const DEFAULT_VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];
const TURKISH_VOWELS: &[char] = &['a', 'e', 'ı', 'i', 'o', 'ö', 'u', 'ü'];

/// Statistics for one analyzed document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentStatistics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub heading_counts: BTreeMap<u8, usize>,
    pub images_with_alt: usize,
    pub images_without_alt: usize,
    pub images_with_empty_alt: usize,
    pub internal_links: usize,
    pub external_links: usize,
    /// Words per sentence.
    pub average_sentence_length: f64,
    pub syllable_count: usize,
    /// Share of sentences matching the passive-voice pattern, 0 to 100.
    pub passive_voice_percentage: f64,
    /// Share of sentences containing a transition word, 0 to 100.
    pub transition_words_percentage: f64,
    /// Not clamped; very easy or very hard text can fall outside 0 to 100.
    pub flesch_reading_ease: f64,
    pub character_count: usize,
    pub reading_time_minutes: f64,
}

impl ContentStatistics {
    /// Number of headings at `level` (1 through 6).
    pub fn headings(&self, level: u8) -> usize {
        self.heading_counts.get(&level).copied().unwrap_or(0)
    }
}

/// Splits text into words on runs of whitespace.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Splits text into sentences on runs of `.`, `!` and `?`.
///
/// Fragments that are empty after trimming are dropped, so trailing
/// punctuation does not produce a phantom sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_BOUNDARY
        .split(text)
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .collect()
}

/// Estimates the syllables in a single word. Non-empty words count at least one.
pub fn count_syllables(word: &str, strategy: SyllableStrategy) -> usize {
    if word.is_empty() {
        return 0;
    }

    let count = match strategy {
        SyllableStrategy::VowelGroupCount => count_vowel_groups(word),
        SyllableStrategy::TurkishVowelAdjusted => count_turkish_syllables(word),
    };

    count.max(1)
}

fn count_vowel_groups(word: &str) -> usize {
    let mut groups = 0;
    let mut in_group = false;

    for c in word.chars().flat_map(char::to_lowercase) {
        let vowel = DEFAULT_VOWELS.contains(&c);
        if vowel && !in_group {
            groups += 1;
        }
        in_group = vowel;
    }

    groups
}

fn count_turkish_syllables(word: &str) -> usize {
    let chars: Vec<char> = turkish_lowercase(word).chars().collect();
    let vowels = chars.iter().filter(|c| TURKISH_VOWELS.contains(c)).count();
    let adjacent_pairs = chars
        .windows(2)
        .filter(|pair| TURKISH_VOWELS.contains(&pair[0]) && TURKISH_VOWELS.contains(&pair[1]))
        .count();

    let adjusted = vowels as f64 - 0.5 * adjacent_pairs as f64;
    adjusted.round().max(0.0) as usize
}

/// Lowercases with Turkish casing: `I` becomes dotless `ı` and `İ` becomes `i`.
fn turkish_lowercase(word: &str) -> String {
    let mut lowered = String::with_capacity(word.len());
    for c in word.chars() {
        match c {
            'I' => lowered.push('ı'),
            'İ' => lowered.push('i'),
            other => lowered.extend(other.to_lowercase()),
        }
    }
    lowered
}

/// Flesch Reading Ease with the given coefficients.
///
/// Returns `0.0` when any count is zero.
pub fn flesch_reading_ease(words: usize, sentences: usize, syllables: usize, flesch: &FleschCoefficients) -> f64 {
    if words == 0 || sentences == 0 || syllables == 0 {
        return 0.0;
    }

    let syllables_per_word = syllables as f64 / words as f64;
    let words_per_sentence = words as f64 / sentences as f64;

    flesch.base - flesch.syllable_weight * syllables_per_word - flesch.sentence_weight * words_per_sentence
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 { 0.0 } else { 100.0 * part as f64 / whole as f64 }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 { 0.0 } else { numerator as f64 / denominator as f64 }
}

/// Percentage of sentences matching `pattern` anywhere.
///
/// This is a pattern heuristic, not a grammatical analysis; it both misses
/// and over-reports passive constructions.
pub fn passive_voice_percentage(sentences: &[&str], pattern: &Regex) -> f64 {
    let passive = sentences.iter().filter(|s| pattern.is_match(s)).count();
    percentage(passive, sentences.len())
}

/// Percentage of sentences matching at least one transition pattern.
pub fn transition_words_percentage(sentences: &[&str], patterns: &[Regex]) -> f64 {
    let with_transition = sentences
        .iter()
        .filter(|s| patterns.iter().any(|re| re.is_match(s)))
        .count();
    percentage(with_transition, sentences.len())
}

/// Computes the full statistics record for extracted text.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn compute_statistics(text: &str, rules: &LanguageRules, structure: &StructuralCounts) -> ContentStatistics {
    let words = split_words(text);
    let sentences = split_sentences(text);

    let word_count = words.len();
    let sentence_count = sentences.len();
    let syllable_count = words.iter().map(|w| count_syllables(w, rules.syllables)).sum();

    ContentStatistics {
        word_count,
        sentence_count,
        paragraph_count: structure.paragraph_count,
        heading_counts: structure.heading_counts.clone(),
        images_with_alt: structure.images_with_alt,
        images_without_alt: structure.images_without_alt,
        images_with_empty_alt: structure.images_with_empty_alt,
        internal_links: structure.internal_links,
        external_links: structure.external_links,
        average_sentence_length: ratio(word_count, sentence_count),
        syllable_count,
        passive_voice_percentage: passive_voice_percentage(&sentences, &rules.passive_voice),
        transition_words_percentage: transition_words_percentage(&sentences, &rules.transition_words),
        flesch_reading_ease: flesch_reading_ease(word_count, sentence_count, syllable_count, &rules.flesch),
        character_count: text.chars().count(),
        reading_time_minutes: word_count as f64 / WORDS_PER_MINUTE,
    }
}
