diesel::table! {
    learn_courses (id) {
        id -> Uuid,
        instructor_id -> Uuid,
        title -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    learn_lessons (id) {
        id -> Uuid,
        course_id -> Uuid,
        title -> Text,
        content -> Text,
        lesson_order -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    learn_quizzes (id) {
        id -> Uuid,
        lesson_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    learn_quiz_questions (id) {
        id -> Uuid,
        quiz_id -> Uuid,
        question -> Text,
        options -> Text,
        correct_index -> Int4,
        question_order -> Int4,
    }
}

diesel::table! {
    learn_quiz_results (id) {
        id -> Uuid,
        user_id -> Uuid,
        quiz_id -> Uuid,
        score -> Int4,
        total_questions -> Int4,
        answers -> Text,
        submitted_at -> Timestamptz,
    }
}

diesel::table! {
    learn_summary_cache (id) {
        id -> Uuid,
        lesson_id -> Uuid,
        summary -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(learn_lessons -> learn_courses (course_id));
diesel::joinable!(learn_quizzes -> learn_lessons (lesson_id));
diesel::joinable!(learn_quiz_questions -> learn_quizzes (quiz_id));
diesel::joinable!(learn_quiz_results -> learn_quizzes (quiz_id));
diesel::joinable!(learn_summary_cache -> learn_lessons (lesson_id));

diesel::allow_tables_to_appear_in_same_query!(
    learn_courses,
    learn_lessons,
    learn_quizzes,
    learn_quiz_questions,
    learn_quiz_results,
    learn_summary_cache,
);
