//! Human-readable reasons attached to each recommendation.

use crate::analyzer::KeywordList;

pub const NO_INFORMATION: &str = "No information about this recommendation is available.";

/// Explain a keyword-list match by the query keywords the document shares.
///
/// Keywords are compared lowercased against the document's keyword list and
/// echoed in the caller's spelling, in query order.
pub fn keyword_explanation<S>(keywords: &[S], doc_keywords: &KeywordList) -> String
where
    S: AsRef<str>,
{
    let mut shared: Vec<&str> = Vec::new();
    for keyword in keywords {
        let keyword = keyword.as_ref().trim();
        if doc_keywords.contains(&keyword.to_lowercase()) && !shared.contains(&keyword) {
            shared.push(keyword);
        }
    }
    match shared.as_slice() {
        [] => NO_INFORMATION.to_string(),
        [only] => format!("Based on your search for keyword {only}."),
        [init @ .., last] => format!(
            "Based on your search for keywords {} and {last}.",
            init.join(", ")
        ),
    }
}

/// Explain an abstract match by quoting its first `words` words.
pub fn abstract_explanation(text: &str, words: usize) -> String {
    let preview: Vec<&str> = text.split_whitespace().take(words).collect();
    format!("Based on the abstract beginning \"{}...\"", preview.join(" "))
}

/// Explain a title match by quoting the title verbatim.
pub fn title_explanation(title: &str) -> String {
    format!("Based on the title \"{title}\".")
}
