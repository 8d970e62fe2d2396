pub mod auth;
pub mod extract;

pub use auth::{AuthenticatedUser, Role};
pub use extract::ApiJson;
