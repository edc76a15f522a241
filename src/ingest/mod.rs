pub mod error;
pub mod loader;
pub mod source;
