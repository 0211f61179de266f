//! Text normalization: raw text in, ordered duplicate-free keyword list out.
pub mod lemmatizer;
pub mod stopwords;
pub mod tokenizer;

use std::ops::Deref;

use serde::{Deserialize, Serialize};

pub use lemmatizer::{Lemmatizer, RuleLemmatizer, SnowballLemmatizer};
pub use stopwords::StopWords;
pub use tokenizer::{Tokenizer, UnicodeTokenizer};

/// Normalized terms of one text, in order of first occurrence, no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeywordList {
    terms: Vec<String>,
}

impl KeywordList {
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Append a term unless it is already present.
    /// Returns whether the term was added.
    pub fn push(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if self.contains(&term) {
            return false;
        }
        self.terms.push(term);
        true
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.iter().any(|t| t == term)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.terms
    }

    pub fn into_vec(self) -> Vec<String> {
        self.terms
    }
}

impl Deref for KeywordList {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.terms
    }
}

impl AsRef<[String]> for KeywordList {
    fn as_ref(&self) -> &[String] {
        &self.terms
    }
}

impl<S: Into<String>> FromIterator<S> for KeywordList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = KeywordList::new();
        for term in iter {
            list.push(term);
        }
        list
    }
}

impl<'a> IntoIterator for &'a KeywordList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

/// Turns raw text into keyword lists.
///
/// Two entry points share one stopword set and the alphabetic-only rule so
/// that terms stay comparable across query modalities:
/// - [`Normalizer::keywords`] for long-form text (tokenize, lowercase,
///   lemmatize, filter)
/// - [`Normalizer::title_keywords`] for short titles (tokenize, lowercase,
///   filter; no lemmatization)
#[derive(Debug, Clone)]
pub struct Normalizer<T = UnicodeTokenizer, L = RuleLemmatizer> {
    tokenizer: T,
    lemmatizer: L,
    stopwords: StopWords,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::with_parts(UnicodeTokenizer, RuleLemmatizer, StopWords::new())
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, L> Normalizer<T, L>
where
    T: Tokenizer,
    L: Lemmatizer,
{
    pub fn with_parts(tokenizer: T, lemmatizer: L, stopwords: StopWords) -> Self {
        Self { tokenizer, lemmatizer, stopwords }
    }

    pub fn stopwords(&self) -> &StopWords {
        &self.stopwords
    }

    pub fn stopwords_mut(&mut self) -> &mut StopWords {
        &mut self.stopwords
    }

    /// Keywords of long-form text (a call description or an abstract).
    pub fn keywords(&self, text: &str) -> KeywordList {
        let mut list = KeywordList::new();
        for token in self.tokenizer.tokenize(text) {
            let lower = token.to_lowercase();
            let lemma = self.lemmatizer.lemmatize(&lower);
            if self.is_keyword(&lemma) && !list.contains(&lemma) {
                list.terms.push(lemma.into_owned());
            }
        }
        list
    }

    /// Keywords of a title. Tokens are not lemmatized.
    pub fn title_keywords(&self, text: &str) -> KeywordList {
        let mut list = KeywordList::new();
        for token in self.tokenizer.tokenize(text) {
            let lower = token.to_lowercase();
            if self.is_keyword(&lower) {
                list.push(lower);
            }
        }
        list
    }

    /// Lowercased tokens of a query string. Neither lemmatized nor filtered,
    /// so punctuation is dropped but every word is kept.
    pub fn terms(&self, text: &str) -> Vec<String> {
        self.tokenizer
            .tokenize(text)
            .into_iter()
            .map(str::to_lowercase)
            .collect()
    }

    #[inline]
    fn is_keyword(&self, term: &str) -> bool {
        !term.is_empty() && term.chars().all(char::is_alphabetic) && !self.stopwords.contains(term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_form_text_is_lemmatized_and_filtered() {
        let normalizer = Normalizer::new();
        let keywords = normalizer.keywords(
            "We welcome studies on Privacy and data ethics. Privacy matters; deadline: May 1, 2024!",
        );
        assert_eq!(keywords.as_slice(), ["privacy", "data", "ethic", "matter", "may"]);
    }

    #[test]
    fn title_path_skips_lemmatization() {
        let normalizer = Normalizer::new();
        let keywords = normalizer.title_keywords("The Ethics of Data Poems");
        assert_eq!(keywords.as_slice(), ["ethics", "data", "poems"]);
    }

    #[test]
    fn non_alphabetic_tokens_are_dropped() {
        let normalizer = Normalizer::new();
        let keywords = normalizer.keywords("post-war don't 1984 covid19 café");
        assert_eq!(keywords.as_slice(), ["café"]);
    }

    #[test]
    fn empty_text_gives_empty_list() {
        let normalizer = Normalizer::new();
        assert!(normalizer.keywords("").is_empty());
        assert!(normalizer.keywords("   \n").is_empty());
        assert!(normalizer.title_keywords("the and of").is_empty());
    }

    #[test]
    fn normalization_is_deterministic() {
        let normalizer = Normalizer::new();
        let text = "Sonnets, forms and poetry; poetry of forms.";
        assert_eq!(normalizer.keywords(text), normalizer.keywords(text));
        assert_eq!(normalizer.keywords(text).as_slice(), ["sonnet", "form", "poetry"]);
    }

    #[test]
    fn custom_stopwords_apply_to_both_paths() {
        let mut normalizer = Normalizer::new();
        normalizer.stopwords_mut().extend(["poetry"]);
        assert!(normalizer.keywords("Poetry and sonnets").as_slice() == ["sonnet"]);
        assert!(normalizer.title_keywords("Poetry and Sonnets").as_slice() == ["sonnets"]);
    }

    #[test]
    fn query_terms_drop_punctuation_only() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.terms("Privacy, (data)."), ["privacy", "data"]);
        assert_eq!(normalizer.terms("The Sonnets"), ["the", "sonnets"]);
        assert!(normalizer.terms(" ,;. ").is_empty());
    }

    #[test]
    fn keyword_list_deduplicates() {
        let list: KeywordList = ["a", "b", "a", "c", "b"].into_iter().collect();
        assert_eq!(list.as_slice(), ["a", "b", "c"]);
    }
}
