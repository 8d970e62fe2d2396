pub mod api_router;
pub mod core;
pub mod learn;
pub mod llm;
pub mod web;
