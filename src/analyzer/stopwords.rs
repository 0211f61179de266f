use std::collections::HashSet;

/// General English function words.
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours", "yourself",
    "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself", "it", "its", "itself",
    "they", "them", "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because", "as",
    "until", "while", "of", "at", "by", "for", "with", "about", "against", "between", "into", "through",
    "during", "before", "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off",
    "over", "under", "again", "further", "then", "once", "here", "there", "when", "where", "why", "how",
    "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
    "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will", "just", "don", "should",
    "now",
];

/// Words that occur in nearly every call for papers and carry no topic.
/// `ha` is what the lemmatizer leaves of "has".
pub const DOMAIN_STOPWORDS: &[&str] = &[
    "journal", "publish", "deadline", "open", "access", "submission", "scope", "article", "papers",
    "please", "abstract", "submit", "word", "literature", "new", "ha", "study", "panel", "question",
    "work", "include", "also", "proposal", "submitted", "topic", "welcome", "limited", "various",
    "theme", "send", "address", "author", "conference",
];

/// Stopword set shared by every normalization path.
/// Entries are stored lowercase; lookups are case-insensitive.
#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<Box<str>>,
}

impl StopWords {
    /// English and domain lists combined.
    pub fn new() -> Self {
        Self::from_words(ENGLISH_STOPWORDS.iter().chain(DOMAIN_STOPWORDS))
    }

    pub fn empty() -> Self {
        Self { words: HashSet::new() }
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::empty();
        set.extend(words);
        set
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase().into_boxed_str()));
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        if word.chars().any(char::is_uppercase) {
            self.words.contains(word.to_lowercase().as_str())
        } else {
            self.words.contains(word)
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::new()
    }
}
