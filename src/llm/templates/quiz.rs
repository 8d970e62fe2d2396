use serde::{Deserialize, Serialize};

use super::terms::extract_key_terms;

pub const QUESTIONS_PER_QUIZ: usize = 5;
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Multiple-choice question proposed by a generator, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: i32,
}

/// One row of the template table. Both builders receive `(term, lesson_title)`.
struct QuestionTemplate {
    question: fn(&str, &str) -> String,
    options: fn(&str, &str) -> [String; OPTIONS_PER_QUESTION],
    correct_index: i32,
}

static QUESTION_TEMPLATES: [QuestionTemplate; 5] = [
    QuestionTemplate {
        question: |term, _| format!("What is the main concept related to \"{term}\" in this lesson?"),
        options: |term, _| {
            [
                format!("Understanding and applying {term} effectively"),
                format!("Ignoring {term} completely"),
                format!("{term} is not relevant to this topic"),
                format!("{term} should be avoided"),
            ]
        },
        correct_index: 0,
    },
    QuestionTemplate {
        question: |term, _| format!("Which statement best describes \"{term}\"?"),
        options: |term, _| {
            [
                format!("{term} is a key concept covered in this lesson"),
                format!("{term} is unrelated to the lesson content"),
                format!("{term} is only mentioned briefly without importance"),
                format!("{term} contradicts the main lesson objectives"),
            ]
        },
        correct_index: 0,
    },
    QuestionTemplate {
        question: |term, _| format!("Why is \"{term}\" important in this context?"),
        options: |_, _| {
            [
                "It helps understand the core concepts of the lesson".to_string(),
                "It is not important at all".to_string(),
                "It only applies to advanced users".to_string(),
                "It was mentioned by mistake".to_string(),
            ]
        },
        correct_index: 0,
    },
    QuestionTemplate {
        question: |_, title| format!("What is the primary focus of \"{title}\"?"),
        options: |_, title| {
            [
                format!("Teaching the concepts and skills outlined in {title}"),
                "Providing entertainment without educational value".to_string(),
                "Testing prior knowledge only".to_string(),
                "Reviewing unrelated topics".to_string(),
            ]
        },
        correct_index: 0,
    },
    QuestionTemplate {
        question: |term, _| format!("How should you approach learning about \"{term}\"?"),
        options: |term, _| {
            [
                format!("Study the material carefully and practice applying {term}"),
                "Skip this section entirely".to_string(),
                "Only memorize without understanding".to_string(),
                format!("Assume you already know everything about {term}"),
            ]
        },
        correct_index: 0,
    },
];

static GENERIC_QUESTIONS: [(&str, [&str; OPTIONS_PER_QUESTION]); 2] = [
    (
        "What should you do after completing this lesson?",
        [
            "Review the key concepts and practice what you learned",
            "Immediately forget everything",
            "Skip to the next lesson without review",
            "Assume you have mastered everything",
        ],
    ),
    (
        "How can you best retain the information from this lesson?",
        [
            "Take notes and review them regularly",
            "Never look at the material again",
            "Only read once quickly",
            "Avoid practicing the concepts",
        ],
    ),
];

/// Deterministic comprehension quiz built from the lesson's key terms.
///
/// The affirmative option is always listed first, so `correct_index` is 0.
pub fn generate_template_quiz(content: &str, lesson_title: &str) -> Vec<GeneratedQuestion> {
    let key_terms = extract_key_terms(content);
    let term_questions = QUESTIONS_PER_QUIZ
        .min(key_terms.len())
        .min(QUESTION_TEMPLATES.len());

    let mut questions: Vec<GeneratedQuestion> = QUESTION_TEMPLATES
        .iter()
        .take(term_questions)
        .enumerate()
        .map(|(i, template)| {
            let term = key_terms.get(i).map(String::as_str).unwrap_or(lesson_title);
            GeneratedQuestion {
                question: (template.question)(term, lesson_title),
                options: Vec::from((template.options)(term, lesson_title)),
                correct_index: template.correct_index,
            }
        })
        .collect();

    // generic question i fills slot 3 + i; sparser quizzes stay short
    while questions.len() < QUESTIONS_PER_QUIZ {
        let Some((question, options)) = questions
            .len()
            .checked_sub(3)
            .and_then(|i| GENERIC_QUESTIONS.get(i))
        else {
            break;
        };
        questions.push(GeneratedQuestion {
            question: (*question).to_string(),
            options: options.iter().map(|o| (*o).to_string()).collect(),
            correct_index: 0,
        });
    }

    questions
}
