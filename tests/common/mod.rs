#![allow(dead_code)]

use chrono::Utc;
use learnserver::learn::types::{Course, CreateQuizQuestionRequest, CreateQuizRequest, Lesson};
use learnserver::learn::InMemoryLearnStore;
use uuid::Uuid;

pub const LESSON_CONTENT: &str = "JavaScript is a programming language used for web development. \
    It allows developers to create interactive websites. Variables store data values. \
    Functions are reusable blocks of code. Objects contain properties and methods.";

pub struct Seeded {
    pub store: InMemoryLearnStore,
    pub instructor_id: Uuid,
    pub course_id: Uuid,
    pub lesson_id: Uuid,
}

/// One instructor, one course, one lesson.
pub async fn seeded_store() -> Seeded {
    let store = InMemoryLearnStore::new();
    let instructor_id = Uuid::new_v4();
    let course_id = Uuid::new_v4();
    let lesson_id = Uuid::new_v4();

    store
        .insert_course(Course {
            id: course_id,
            instructor_id,
            title: "Web Basics".to_string(),
            created_at: Utc::now(),
        })
        .await;
    store
        .insert_lesson(Lesson {
            id: lesson_id,
            course_id,
            title: "Introduction to JavaScript".to_string(),
            content: LESSON_CONTENT.to_string(),
            lesson_order: 1,
            created_at: Utc::now(),
        })
        .await;

    Seeded {
        store,
        instructor_id,
        course_id,
        lesson_id,
    }
}

pub fn question(order: i32, correct_index: i32) -> CreateQuizQuestionRequest {
    CreateQuizQuestionRequest {
        question: format!("Question {order}?"),
        options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
        correct_index,
        order,
    }
}

/// Two questions deliberately sent out of order: order 2 expects 1, order 1 expects 0.
pub fn two_question_quiz(lesson_id: Uuid) -> CreateQuizRequest {
    CreateQuizRequest {
        lesson_id,
        questions: vec![question(2, 1), question(1, 0)],
    }
}
