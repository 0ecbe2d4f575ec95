//! Knowledge-base tests
//!
//! - Loading assets from strings and files
//! - Version/platform filtering of the index
//! - Inheritance walks and plural normalization

pub mod tests_loading;
