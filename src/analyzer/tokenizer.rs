use unicode_segmentation::UnicodeSegmentation;

/// Splits raw text into word-like tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Tokenizer over Unicode word boundaries (UAX #29).
///
/// Punctuation and whitespace are dropped. Contractions ("don't") come out
/// whole from the segmentation itself, and words joined by a single hyphen
/// with no surrounding space ("well-known") are glued back into one token.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeTokenizer;

impl UnicodeTokenizer {
    pub fn new() -> Self {
        UnicodeTokenizer
    }
}

impl Tokenizer for UnicodeTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut tokens = Vec::new();
        // byte span of the token being built
        let mut span: Option<(usize, usize)> = None;
        // end offset of a hyphen directly following `span`
        let mut hyphen_end: Option<usize> = None;

        for (idx, segment) in text.split_word_bound_indices() {
            let end = idx + segment.len();
            if is_wordlike(segment) {
                match (span, hyphen_end) {
                    (Some((start, _)), Some(h)) if h == idx => span = Some((start, end)),
                    _ => {
                        if let Some((s, e)) = span.replace((idx, end)) {
                            tokens.push(&text[s..e]);
                        }
                    }
                }
                hyphen_end = None;
            } else if is_hyphen(segment)
                && hyphen_end.is_none()
                && matches!(span, Some((_, e)) if e == idx)
            {
                hyphen_end = Some(end);
            } else {
                if let Some((s, e)) = span.take() {
                    tokens.push(&text[s..e]);
                }
                hyphen_end = None;
            }
        }
        if let Some((s, e)) = span {
            tokens.push(&text[s..e]);
        }
        tokens
    }
}

#[inline]
fn is_wordlike(segment: &str) -> bool {
    segment.chars().any(char::is_alphanumeric)
}

#[inline]
fn is_hyphen(segment: &str) -> bool {
    segment == "-" || segment == "\u{2010}"
}
