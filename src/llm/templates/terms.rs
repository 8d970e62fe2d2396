use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

pub const MAX_KEY_TERMS: usize = 10;
const MIN_TERM_LEN: usize = 4;

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "is", "are", "was", "were", "be", "been", "being", "have", "has",
        "had", "do", "does", "did", "will", "would", "could", "should", "may", "might", "must",
        "shall", "can", "need", "dare", "ought", "used", "to", "of", "in", "for", "on", "with",
        "at", "by", "from", "as", "into", "through", "during", "before", "after", "above",
        "below", "between", "under", "again", "further", "then", "once", "here", "there",
        "when", "where", "why", "how", "all", "each", "few", "more", "most", "other", "some",
        "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "just",
        "and", "but", "if", "or", "because", "until", "while", "this", "that", "these", "those",
        "it",
    ]
    .into_iter()
    .collect()
});

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Most frequent content words of `text`, at most [`MAX_KEY_TERMS`].
///
/// Ties keep the order in which the words first appear.
pub fn extract_key_terms(text: &str) -> Vec<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for word in normalized.split_whitespace() {
        if word.len() < MIN_TERM_LEN || is_stop_word(word) {
            continue;
        }
        match index.get(word) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(word, counts.len());
                counts.push((word, 1));
            }
        }
    }

    // stable: equal counts stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .take(MAX_KEY_TERMS)
        .map(|(word, _)| word.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_words_only_yield_nothing() {
        assert!(extract_key_terms("the a an is are").is_empty());
        assert!(extract_key_terms("").is_empty());
        assert!(extract_key_terms("   \n\t ").is_empty());
    }

    #[test]
    fn test_frequency_ranking() {
        let terms = extract_key_terms(
            "A function in JavaScript. JavaScript runs in browsers. Learn JavaScript today.",
        );
        let js = terms.iter().position(|t| t == "javascript").unwrap();
        let func = terms.iter().position(|t| t == "function").unwrap();
        assert_eq!(js, 0);
        assert!(js < func);
    }

    #[test]
    fn test_ties_keep_first_occurrence_order() {
        let terms = extract_key_terms("zebra apple mango apple zebra mango");
        assert_eq!(terms, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_short_tokens_and_punctuation() {
        let terms = extract_key_terms("Rust's cat ran: ownership, borrowing & lifetimes!");
        assert_eq!(terms, vec!["rust", "ownership", "borrowing", "lifetimes"]);
        assert!(!terms.iter().any(|t| t == "cat" || t == "ran"));
    }

    #[test]
    fn test_stop_words_longer_than_three_are_removed() {
        let terms = extract_key_terms("should would could through variables");
        assert_eq!(terms, vec!["variables"]);
    }

    #[test]
    fn test_caps_at_ten_terms() {
        let text = "alpha bravo charlie delta echoes foxtrot golf hotel india juliet kilo lima";
        let terms = extract_key_terms(text);
        assert_eq!(terms.len(), MAX_KEY_TERMS);
        assert_eq!(terms[0], "alpha");
        assert!(!terms.iter().any(|t| t == "lima"));
    }
}
