//! Deterministic generation used whenever no language model is available.

pub mod quiz;
pub mod summary;
pub mod terms;

pub use quiz::{generate_template_quiz, GeneratedQuestion};
pub use summary::generate_template_summary;
pub use terms::extract_key_terms;
