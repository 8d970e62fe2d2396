use once_cell::sync::Lazy;
use regex::Regex;

pub const EMPTY_CONTENT_SUMMARY: &str = "No content available to summarize.";
const MIN_SENTENCE_CHARS: usize = 20;
const MAX_KEY_POINTS: usize = 5;
const TRUNCATE_CHARS: usize = 200;

static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

/// Sentences longer than 20 characters, in document order.
pub fn meaningful_sentences(content: &str) -> Vec<&str> {
    SENTENCE_BREAK
        .split(content)
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .collect()
}

/// Bullet-point summary built from the first sentences of the lesson.
pub fn generate_template_summary(content: &str) -> String {
    if content.trim().is_empty() {
        return EMPTY_CONTENT_SUMMARY.to_string();
    }

    let sentences = meaningful_sentences(content);

    if sentences.is_empty() {
        let head: String = content.chars().take(TRUNCATE_CHARS).collect();
        let ellipsis = if content.chars().count() > TRUNCATE_CHARS {
            "..."
        } else {
            ""
        };
        return format!("Summary: {head}{ellipsis}");
    }

    let mut lines = vec!["## Key Points".to_string(), String::new()];
    lines.extend(
        sentences
            .iter()
            .take(MAX_KEY_POINTS)
            .map(|point| format!("• {point}")),
    );
    lines.push(String::new());
    lines.push(format!(
        "_This summary was generated using template-based extraction from {} sentences._",
        sentences.len()
    ));

    lines.join("\n")
}
