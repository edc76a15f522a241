pub mod aggregate;
pub mod bucket;
pub mod error;
pub mod join;
pub mod schema;
