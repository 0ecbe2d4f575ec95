//! Parser tests
//!
//! - Grammar coverage over preprocessed keyword forms
//! - `P of T` / `T -> P` mirror forms
//! - Error codes and ranges for rejected input

pub mod tests_errors;
pub mod tests_grammar;
