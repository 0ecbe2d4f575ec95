//! IDE layer tests
//!
//! - Cursor prediction with parenthesis recovery
//! - Completion items for the type at the cursor
//! - AnalysisHost snapshots

pub mod tests_completion;
pub mod tests_predict;
