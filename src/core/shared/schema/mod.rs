pub mod learn;
pub use self::learn::*;
