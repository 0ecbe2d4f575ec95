//! Error code definitions for parser diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid tokens)
//! - E02xx: Structural errors (parentheses)
//! - E04xx: Expression errors
//! - E09xx: Generic/fallback errors

use std::fmt;

/// Error codes for parser diagnostics
///
/// Each error code represents a specific category of parse error,
/// enabling filtering and editor integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors (invalid tokens)
    // =========================================================================
    /// Invalid or unexpected character in source
    E0101,
    /// Unterminated string literal
    E0102,
    /// `$`-prefixed word that is not a known keyword
    E0103,

    // =========================================================================
    // E02xx: Structural errors (parentheses)
    // =========================================================================
    /// Unclosed parenthesis `(`
    E0203,
    /// Unexpected closing delimiter
    E0205,

    // =========================================================================
    // E04xx: Expression errors
    // =========================================================================
    /// Expression nested too deeply
    E0401,
    /// Missing operand after an operator
    E0402,
    /// Relation operators do not chain
    E0403,
    /// Expected expression
    E0406,
    /// Missing `then` in conditional
    E0407,
    /// Missing `else` in conditional
    E0408,
    /// Missing type name after `as`
    E0409,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Unexpected token
    E0901,
}

impl ErrorCode {
    /// Get the string representation of the error code (e.g., "E0203")
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexical
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0103 => "E0103",
            // Structural
            Self::E0203 => "E0203",
            Self::E0205 => "E0205",
            // Expression
            Self::E0401 => "E0401",
            Self::E0402 => "E0402",
            Self::E0403 => "E0403",
            Self::E0406 => "E0406",
            Self::E0407 => "E0407",
            Self::E0408 => "E0408",
            Self::E0409 => "E0409",
            // Generic
            Self::E0901 => "E0901",
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            // Lexical
            Self::E0101 => "invalid character",
            Self::E0102 => "unterminated string literal",
            Self::E0103 => "unknown keyword",
            // Structural
            Self::E0203 => "unclosed parenthesis",
            Self::E0205 => "unexpected closing delimiter",
            // Expression
            Self::E0401 => "expression nested too deeply",
            Self::E0402 => "missing operand",
            Self::E0403 => "chained relation",
            Self::E0406 => "expected expression",
            Self::E0407 => "missing 'then' keyword",
            Self::E0408 => "missing 'else' keyword",
            Self::E0409 => "missing cast type",
            // Generic
            Self::E0901 => "unexpected token",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
