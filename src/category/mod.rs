pub mod label;
pub mod normalizer;
pub mod rules;
pub mod words;
