pub mod decompose;
pub mod granularity;
pub mod layout;
pub mod period;
