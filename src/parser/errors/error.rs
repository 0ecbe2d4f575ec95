//! Enhanced syntax error types
//!
//! Provides rich error information including:
//! - Error codes for categorization
//! - Hints/suggestions for fixes
//! - Related source locations

use thiserror::Error;

use super::codes::ErrorCode;
use super::context::ParseContext;
use crate::base::{TextRange, TextSize};

/// Related location information for an error
///
/// Used to point to related source locations, e.g.,
/// "opened here" pointing to an unclosed `(`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    /// Description of this related location
    pub message: String,
    /// Source range
    pub range: TextRange,
}

impl RelatedInfo {
    /// Create a new related info
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// A malformed expression.
///
/// `range` is a byte range in the keyword-preprocessed text, which is what
/// the lexer sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct SyntaxError {
    /// Human-readable error message
    pub message: String,
    /// Source location
    pub range: TextRange,
    /// Categorized error code
    pub code: ErrorCode,
    /// Optional suggestion for fixing the error
    pub hint: Option<String>,
    /// Related source locations
    pub related: Vec<RelatedInfo>,
}

impl SyntaxError {
    /// Create a builder for more complex error construction
    pub fn builder(code: ErrorCode) -> SyntaxErrorBuilder {
        SyntaxErrorBuilder::new(code)
    }
}

/// Builder for creating complex syntax errors
pub struct SyntaxErrorBuilder {
    code: ErrorCode,
    message: Option<String>,
    range: Option<TextRange>,
    hint: Option<String>,
    related: Vec<RelatedInfo>,
}

impl SyntaxErrorBuilder {
    /// Create a new builder with an error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: None,
            range: None,
            hint: None,
            related: vec![],
        }
    }

    /// Set the error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the source range
    pub fn range(mut self, range: TextRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Add a hint
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Add related information
    pub fn related(mut self, message: impl Into<String>, range: TextRange) -> Self {
        self.related.push(RelatedInfo::new(message, range));
        self
    }

    /// Build the syntax error, falling back to the code's default message
    /// and an empty range at offset 0.
    pub fn build(self) -> SyntaxError {
        SyntaxError {
            message: self
                .message
                .unwrap_or_else(|| self.code.default_message().to_string()),
            range: self
                .range
                .unwrap_or_else(|| TextRange::empty(TextSize::new(0))),
            code: self.code,
            hint: self.hint,
            related: self.related,
        }
    }
}

/// Build an "unexpected X in <context>, expected Y" error.
pub fn format_context_error(
    found: &str,
    context: ParseContext,
    code: ErrorCode,
    range: TextRange,
) -> SyntaxError {
    let message = format!(
        "unexpected {} {}, expected {}",
        found,
        context.description(),
        context.expected_description()
    );

    SyntaxError::builder(code).message(message).range(range).build()
}
