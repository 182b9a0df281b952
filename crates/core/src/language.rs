//! Per-language readability rules.
//!
//! Each supported language has one row in a closed table: Flesch
//! coefficients, a passive-voice pattern, a list of transition-word patterns
//! and the syllable counting strategy. Adding a language means adding a
//! [`LanguageCode`] variant and a row to `BUILTIN_ROWS`; the statistics code
//! never branches on the language itself.
//!
//! Passive-voice and transition patterns are plain regular expressions and
//! only approximate the grammar they look for. They are kept stable on
//! purpose so scores stay comparable across releases.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{ProscoreError, Result};

/// Languages with a dedicated rule row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    Tr,
    En,
    Ar,
    De,
    Fr,
    Ru,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 6] =
        [LanguageCode::Tr, LanguageCode::En, LanguageCode::Ar, LanguageCode::De, LanguageCode::Fr, LanguageCode::Ru];

    /// The two-letter code.
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::Tr => "tr",
            LanguageCode::En => "en",
            LanguageCode::Ar => "ar",
            LanguageCode::De => "de",
            LanguageCode::Fr => "fr",
            LanguageCode::Ru => "ru",
        }
    }

    /// Lenient lookup used by analysis.
    ///
    /// Case-insensitive, and a region subtag is ignored, so `en-US` and
    /// `TR_tr` resolve to `en` and `tr`. Returns `None` for anything else.
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = code.trim().split(['-', '_']).next().unwrap_or_default();
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str().eq_ignore_ascii_case(primary))
    }
}

impl FromStr for LanguageCode {
    type Err = ProscoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s).ok_or_else(|| ProscoreError::UnknownLanguage(s.to_string()))
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coefficients of a Flesch-style reading ease formula:
/// `base - syllable_weight * (syllables / words) - sentence_weight * (words / sentences)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FleschCoefficients {
    pub base: f64,
    pub syllable_weight: f64,
    pub sentence_weight: f64,
}

impl FleschCoefficients {
    pub const fn new(base: f64, syllable_weight: f64, sentence_weight: f64) -> Self {
        Self { base, syllable_weight, sentence_weight }
    }
}

/// How syllables are estimated for a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyllableStrategy {
    /// One syllable per run of `[aeiouy]`.
    VowelGroupCount,
    /// Turkish vowels counted individually, with a half-syllable discount
    /// for each adjacent vowel pair.
    TurkishVowelAdjusted,
}

/// Compiled rules for one language.
#[derive(Debug, Clone)]
pub struct LanguageRules {
    pub flesch: FleschCoefficients,
    pub passive_voice: Regex,
    pub transition_words: Vec<Regex>,
    pub syllables: SyllableStrategy,
}

impl LanguageRules {
    /// Compiles a rule row from pattern sources.
    ///
    /// # Errors
    ///
    /// Returns [`ProscoreError::InvalidPattern`] if any pattern fails to compile.
    pub fn new(
        flesch: FleschCoefficients, passive_voice: &str, transition_words: &[&str], syllables: SyllableStrategy,
    ) -> Result<Self> {
        let passive_voice = Regex::new(passive_voice)?;
        let transition_words = transition_words
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { flesch, passive_voice, transition_words, syllables })
    }
}

struct BuiltinRow {
    code: LanguageCode,
    flesch: FleschCoefficients,
    passive_voice: &'static str,
    transition_words: &'static [&'static str],
    syllables: SyllableStrategy,
}

// Coefficients are reproduced as published by each formula's source
// (Ateşman for Turkish, Amstad for German, Kandel-Moles for French,
// Oborneva for Russian); Arabic reuses the English triple.
const BUILTIN_ROWS: [BuiltinRow; 6] = [
    BuiltinRow {
        code: LanguageCode::Tr,
        flesch: FleschCoefficients::new(198.825, 40.175, 2.610),
        passive_voice: r"(?i)\b\w+(ıl|il|ul|ül|ın|in|un|ün)(dı|di|du|dü|tı|ti|tu|tü|mış|miş|muş|müş|ır|ir|ur|ür|ıyor|iyor|uyor|üyor|acak|ecek|malı|meli|abilir|ebilir)\w*\b",
        transition_words: &[
            r"(?i)\b(ancak|fakat|ama|lakin|oysa|halbuki|buna rağmen|yine de|aksine|öte yandan|bununla birlikte)\b",
            r"(?i)\b(ayrıca|üstelik|dahası|bunun yanı sıra|ek olarak|aynı şekilde|benzer şekilde|hem de)\b",
            r"(?i)\b(bu nedenle|bu yüzden|bu sebeple|bundan dolayı|dolayısıyla|sonuç olarak|çünkü|böylece)\b",
            r"(?i)\b([iİ]lk olarak|öncelikle|[iİ]kinci olarak|daha sonra|ardından|son olarak|en sonunda)\b",
            r"(?i)\b(örneğin|mesela|özellikle|kısacası|özetle|başka bir deyişle|aslında|yani)\b",
        ],
        syllables: SyllableStrategy::TurkishVowelAdjusted,
    },
    BuiltinRow {
        code: LanguageCode::En,
        flesch: FleschCoefficients::new(206.835, 84.6, 1.015),
        passive_voice: r"(?i)\b(am|is|are|was|were|be|been|being|get|gets|got|gotten)\s+(\w+ed|\w+en|made|done|built|sent|seen|known|given|taken|written|shown|told|found|held|kept|left|lost|paid|said|sold|thought|brought|bought|caught|taught)\b",
        transition_words: &[
            r"(?i)\b(however|but|yet|nevertheless|nonetheless|although|though|whereas|instead|on the other hand|in contrast|conversely)\b",
            r"(?i)\b(also|furthermore|moreover|additionally|in addition|besides|likewise|similarly)\b",
            r"(?i)\b(therefore|thus|hence|consequently|as a result|because|accordingly|so that)\b",
            r"(?i)\b(first|firstly|second|secondly|next|then|finally|lastly|afterwards|meanwhile|subsequently)\b",
            r"(?i)\b(for example|for instance|such as|in particular|specifically|in conclusion|in summary|to sum up|in other words|in fact|indeed)\b",
        ],
        syllables: SyllableStrategy::VowelGroupCount,
    },
    BuiltinRow {
        code: LanguageCode::Ar,
        flesch: FleschCoefficients::new(206.835, 84.6, 1.015),
        passive_voice: r"\b[وف]?(تم|تمت|يتم|تتم|سيتم|جرى|يجري)\b",
        transition_words: &[
            r"\b[وف]?(لكن|غير أن|إلا أن|بينما|مع ذلك|على الرغم|بالرغم)\b",
            r"\b[وف]?(أيضا|أيضاً|بالإضافة|علاوة على ذلك|كذلك|فضلا عن)\b",
            r"\b[وف]?(لذلك|لذا|بالتالي|نتيجة لذلك|لأن|إذن)\b",
            r"\b[وف]?(أولا|أولاً|ثانيا|ثانياً|ثم|أخيرا|أخيراً|بعد ذلك)\b",
            r"\b[وف]?(مثلا|مثلاً|على سبيل المثال|خاصة|باختصار|في الختام|بعبارة أخرى)\b",
        ],
        syllables: SyllableStrategy::VowelGroupCount,
    },
    BuiltinRow {
        code: LanguageCode::De,
        flesch: FleschCoefficients::new(180.0, 58.5, 1.0),
        passive_voice: r"(?i)\b(wird|werden|wurde|wurden|wirst|werdet)\b.*\b(ge\w+(t|en)|\w+iert)\b|\bworden\b",
        transition_words: &[
            r"(?i)\b(aber|jedoch|dennoch|trotzdem|allerdings|hingegen|stattdessen|obwohl|andererseits|im gegensatz)\b",
            r"(?i)\b(außerdem|zudem|darüber hinaus|ebenso|ebenfalls|zusätzlich|weiterhin)\b",
            r"(?i)\b(deshalb|deswegen|daher|darum|folglich|somit|weil|infolgedessen)\b",
            r"(?i)\b(zuerst|erstens|zweitens|dann|danach|anschließend|schließlich|zuletzt|zunächst)\b",
            r"(?i)\b(zum beispiel|beispielsweise|insbesondere|zusammenfassend|kurz gesagt|nämlich|tatsächlich)\b",
        ],
        syllables: SyllableStrategy::VowelGroupCount,
    },
    BuiltinRow {
        code: LanguageCode::Fr,
        flesch: FleschCoefficients::new(207.0, 73.6, 1.015),
        passive_voice: r"(?i)\b(est|sont|était|étaient|été|sera|seront|serait|seraient|fut|furent|soit|soient)\s+(\w+\s+)?\w+(é|ée|és|ées|is|ise|ises|ite|ites|u|ue|us|ues)\b",
        transition_words: &[
            r"(?i)\b(mais|cependant|pourtant|toutefois|néanmoins|en revanche|par contre|au contraire|bien que|alors que)\b",
            r"(?i)\b(de plus|en outre|également|aussi|par ailleurs|de même)\b",
            r"(?i)\b(donc|ainsi|par conséquent|c['’]est pourquoi|parce que|puisque|en effet|car)\b",
            r"(?i)\b(d['’]abord|premièrement|deuxièmement|ensuite|puis|enfin|finalement|pour finir)\b",
            r"(?i)\b(par exemple|notamment|en particulier|en conclusion|en résumé|bref|autrement dit)\b",
        ],
        syllables: SyllableStrategy::VowelGroupCount,
    },
    BuiltinRow {
        code: LanguageCode::Ru,
        flesch: FleschCoefficients::new(206.835, 60.1, 1.3),
        passive_voice: r"(?i)\b\w{3,}(ан|ян|ен|ён)(а|о|ы)?\b|\b\w+(ется|ются|ится|ятся)\b",
        transition_words: &[
            r"(?i)\b(но|однако|тем не менее|зато|хотя|впрочем|напротив|с другой стороны|несмотря на)\b",
            r"(?i)\b(также|кроме того|более того|к тому же|помимо этого)\b",
            r"(?i)\b(поэтому|следовательно|таким образом|в результате|потому что|так как|итак)\b",
            r"(?i)\b(во-первых|во-вторых|в-третьих|сначала|затем|потом|наконец|в конце концов)\b",
            r"(?i)\b(например|в частности|в заключение|иными словами|то есть|в целом)\b",
        ],
        syllables: SyllableStrategy::VowelGroupCount,
    },
];

static BUILTIN: LazyLock<Arc<LanguageTable>> = LazyLock::new(|| {
    Arc::new(LanguageTable::compile_builtin().expect("builtin language patterns are valid"))
});

/// Lookup table from [`LanguageCode`] to [`LanguageRules`].
///
/// The English row is always present, so [`LanguageTable::resolve`] is total.
#[derive(Debug, Clone)]
pub struct LanguageTable {
    english: LanguageRules,
    rows: HashMap<LanguageCode, LanguageRules>,
}

impl LanguageTable {
    /// Creates a table holding only the English row.
    pub fn new(english: LanguageRules) -> Self {
        Self { english, rows: HashMap::new() }
    }

    /// The shared builtin table, compiled on first use.
    pub fn builtin() -> Arc<LanguageTable> {
        Arc::clone(&BUILTIN)
    }

    fn compile_builtin() -> Result<Self> {
        let mut english = None;
        let mut rows = HashMap::new();

        for row in &BUILTIN_ROWS {
            let rules = LanguageRules::new(row.flesch, row.passive_voice, row.transition_words, row.syllables)?;
            if row.code == LanguageCode::En {
                english = Some(rules);
            } else {
                rows.insert(row.code, rules);
            }
        }

        let english = english.ok_or_else(|| ProscoreError::ConfigError("builtin table has no English row".into()))?;
        Ok(Self { english, rows })
    }

    /// Adds or replaces the row for `code`.
    pub fn with_rules(mut self, code: LanguageCode, rules: LanguageRules) -> Self {
        if code == LanguageCode::En {
            self.english = rules;
        } else {
            self.rows.insert(code, rules);
        }
        self
    }

    /// Gets the row for `code` if the table has one.
    pub fn get(&self, code: LanguageCode) -> Option<&LanguageRules> {
        match code {
            LanguageCode::En => Some(&self.english),
            _ => self.rows.get(&code),
        }
    }

    /// Whether the table has a row for `code`.
    pub fn contains(&self, code: LanguageCode) -> bool {
        self.get(code).is_some()
    }

    /// Resolves a caller-supplied language code to the rules that apply.
    ///
    /// Unknown codes, and known codes without a row in this table, fall back
    /// to English. The returned code names the row actually used.
    pub fn resolve(&self, requested: &str) -> (LanguageCode, &LanguageRules) {
        if let Some(code) = LanguageCode::from_code(requested)
            && let Some(rules) = self.get(code)
        {
            return (code, rules);
        }

        tracing::debug!(requested, "no rules for language, falling back to en");
        (LanguageCode::En, &self.english)
    }
}
