//! Relevance expression parser
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Keyword preprocessor → multi-word keywords become `$single-words`
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind, words merged into phrases
//!     ↓
//! Parser → syntax::Ast (arena of nodes)
//!     ↓
//! Scope pass → scope / direct_access on every node
//! ```
//!
//! [`compile`] runs the whole pipeline. Errors are reported, never
//! recovered from; retrying with patched input is the prediction engine's
//! job.

pub mod errors;
pub mod keywords;
mod lexer;
#[allow(clippy::module_inception)]
mod parser;
mod syntax_kind;

pub use errors::{ErrorCode, ParseContext, RelatedInfo, SyntaxError};
pub use keywords::preprocess;
pub use lexer::{Lexer, Token, tokenize};
pub use parser::parse;
pub use syntax_kind::SyntaxKind;

use crate::syntax::Ast;

/// Compile a Relevance expression into a scoped [`Ast`].
///
/// Error ranges refer to the preprocessed text.
pub fn compile(text: &str) -> Result<Ast, SyntaxError> {
    let preprocessed = preprocess(text);
    let mut ast = parse(&preprocessed)?;
    ast.configure_scopes();
    Ok(ast)
}
