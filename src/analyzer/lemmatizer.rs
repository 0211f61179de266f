use std::borrow::Cow;
use std::fmt;

use rust_stemmers::{Algorithm, Stemmer};

/// Reduces a lowercase token to a canonical form.
pub trait Lemmatizer: Send + Sync {
    fn lemmatize<'a>(&self, token: &'a str) -> Cow<'a, str>;
}

/// Irregular plurals that suffix rules would mangle.
const IRREGULAR: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("analyses", "analysis"),
    ("theses", "thesis"),
    ("crises", "crisis"),
    ("hypotheses", "hypothesis"),
    ("diagnoses", "diagnosis"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("indices", "index"),
    ("appendices", "appendix"),
    ("curricula", "curriculum"),
    ("syllabi", "syllabus"),
    ("alumni", "alumnus"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("selves", "self"),
    ("series", "series"),
    ("species", "species"),
    ("news", "news"),
];

/// Suffix rules tried in order: (suffix, replacement).
const NOUN_RULES: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("ies", "y"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
];

/// Endings of singular nouns that merely look plural.
const KEEP_ENDINGS: &[&str] = &["ss", "us", "is"];

/// Rule-based English noun lemmatizer.
///
/// Maps plural nouns to their singular ("studies" -> "study",
/// "approaches" -> "approach", "ethics" -> "ethic") using an irregular table
/// and a fixed list of suffix rules. Words of three letters or fewer and
/// non-alphabetic tokens are returned untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleLemmatizer;

impl RuleLemmatizer {
    pub fn new() -> Self {
        RuleLemmatizer
    }
}

impl Lemmatizer for RuleLemmatizer {
    fn lemmatize<'a>(&self, token: &'a str) -> Cow<'a, str> {
        if let Some((_, lemma)) = IRREGULAR.iter().find(|(plural, _)| *plural == token) {
            return Cow::Owned((*lemma).to_string());
        }
        if token.chars().count() <= 3 || !token.chars().all(char::is_alphabetic) {
            return Cow::Borrowed(token);
        }
        for (suffix, replacement) in NOUN_RULES {
            if let Some(stem) = token.strip_suffix(suffix) {
                return Cow::Owned(format!("{stem}{replacement}"));
            }
        }
        if KEEP_ENDINGS.iter().any(|ending| token.ends_with(ending)) {
            return Cow::Borrowed(token);
        }
        match token.strip_suffix('s') {
            Some(stem) => Cow::Borrowed(stem),
            None => Cow::Borrowed(token),
        }
    }
}

/// English Snowball stemmer used as a lemmatizer.
///
/// Stems are coarser than lemmas ("studies" -> "studi") but the mapping is
/// just as deterministic.
pub struct SnowballLemmatizer {
    stemmer: Stemmer,
}

impl SnowballLemmatizer {
    pub fn new() -> Self {
        Self { stemmer: Stemmer::create(Algorithm::English) }
    }
}

impl Default for SnowballLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SnowballLemmatizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowballLemmatizer").finish_non_exhaustive()
    }
}

impl Lemmatizer for SnowballLemmatizer {
    fn lemmatize<'a>(&self, token: &'a str) -> Cow<'a, str> {
        self.stemmer.stem(token)
    }
}
