//! Turns free-form model output into quiz questions.
//!
//! JSON arrays are read field by field with defaults; anything that is not
//! JSON falls back to a numbered-list heuristic. Parsing never fails, bad
//! input just produces fewer questions.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::templates::quiz::{GeneratedQuestion, OPTIONS_PER_QUESTION, QUESTIONS_PER_QUIZ};

static NUMBERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\.\s+").unwrap());
static OPTION_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^[a-d]\)\s*").unwrap());

fn placeholder_options() -> Vec<String> {
    ["A", "B", "C", "D"].iter().map(|s| (*s).to_string()).collect()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn question_from_json(index: usize, item: &Value) -> GeneratedQuestion {
    let question = item
        .get("question")
        .filter(|v| is_truthy(v))
        .map(value_to_text)
        .unwrap_or_else(|| format!("Question {}", index + 1));

    let options = match item.get("options") {
        Some(Value::Array(values)) => values
            .iter()
            .take(OPTIONS_PER_QUESTION)
            .map(value_to_text)
            .collect(),
        _ => placeholder_options(),
    };

    let correct_index = item
        .get("correctIndex")
        .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
        .map(|i| i.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
        .unwrap_or(0);

    GeneratedQuestion {
        question,
        options,
        correct_index,
    }
}

fn parse_numbered_list(response: &str) -> Vec<GeneratedQuestion> {
    NUMBERED_ITEM
        .split(response)
        .filter(|block| !block.trim().is_empty())
        .take(QUESTIONS_PER_QUIZ)
        .filter_map(|block| {
            let lines: Vec<&str> = block.split('\n').filter(|l| !l.trim().is_empty()).collect();
            if lines.len() < 2 {
                return None;
            }
            let options: Vec<String> = lines[1..]
                .iter()
                .take(OPTIONS_PER_QUESTION)
                .map(|line| OPTION_LETTER.replace(line, "").trim().to_string())
                .collect();

            Some(GeneratedQuestion {
                question: lines[0].trim().to_string(),
                options: if options.len() >= OPTIONS_PER_QUESTION {
                    options
                } else {
                    placeholder_options()
                },
                correct_index: 0,
            })
        })
        .collect()
}

pub fn parse_ai_quiz_response(response: &str) -> Vec<GeneratedQuestion> {
    match serde_json::from_str::<Value>(response) {
        Ok(Value::Array(items)) => items
            .iter()
            .take(QUESTIONS_PER_QUIZ)
            .enumerate()
            .map(|(i, item)| question_from_json(i, item))
            .collect(),
        // valid JSON of any other shape carries no questions
        Ok(_) => Vec::new(),
        Err(_) => parse_numbered_list(response),
    }
}
