//! Parse context tracking for context-aware error messages
//!
//! The parser keeps a stack of contexts so an error can say where in the
//! expression it happened ("in whose filter") and what would have fit.

/// Represents the current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseContext {
    /// The whole expression
    TopLevel,
    /// Inside `( ... )`
    Parenthesized,
    /// Between `if` and `then`
    Condition,
    /// A branch of `if ... then ... else ...`
    Branch,
    /// The predicate after `whose`
    WhoseFilter,
    /// The parameter following a phrase (`file "x"`)
    PhraseArgument,
    /// After `of`, `->`, `'s`, `.` or `its`
    PropertyChain,
    /// The right-hand side of an operator
    Operand,
}

impl ParseContext {
    /// Get a human-readable description of this context for error messages
    pub fn description(&self) -> &'static str {
        match self {
            Self::TopLevel => "at top level",
            Self::Parenthesized => "in parentheses",
            Self::Condition => "in if condition",
            Self::Branch => "in conditional branch",
            Self::WhoseFilter => "in whose filter",
            Self::PhraseArgument => "in phrase argument",
            Self::PropertyChain => "in property chain",
            Self::Operand => "in operand",
        }
    }

    /// Get a description of what tokens are expected in this context
    pub fn expected_description(&self) -> &'static str {
        match self {
            Self::TopLevel | Self::Parenthesized | Self::Condition | Self::Branch | Self::Operand => {
                "an expression"
            }
            Self::WhoseFilter => "a parenthesized filter",
            Self::PhraseArgument => "a string, number, `it` or parenthesized argument",
            Self::PropertyChain => "a property name",
        }
    }
}
