//! API request handlers.

pub mod health;
pub mod todos;

pub use health::*;
pub use todos::*;
