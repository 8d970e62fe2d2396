#[cfg(feature = "postgres")]
pub mod schema;
pub mod state;
#[cfg(feature = "postgres")]
pub mod utils;
