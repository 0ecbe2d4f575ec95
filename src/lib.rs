//! # relevance-base
//!
//! Compiler and static type resolver for Relevance expressions, the
//! English-like inventory query language (`names of files whose (size of it
//! > 0) of folder "c:"`). Drives property completion: given partial text and
//! a cursor offset, find the type at the cursor and list what can follow it.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide        → prediction, completion items, AnalysisHost snapshots
//!   ↓
//! hir        → RelDataType, per-node type resolution
//!   ↓
//! knowledge  → fact model, asset loading, filtered lookup index
//!   ↓
//! parser     → keyword preprocessor, logos lexer, recursive-descent parser
//!   ↓
//! syntax     → AST arena, scope propagation
//!   ↓
//! base       → Name, TextRange, reserved type names
//! ```

// ============================================================================
// MODULES (dependency order: base → syntax → parser → knowledge → hir → ide)
// ============================================================================

/// Foundation types: Name, TextRange, reserved type names
pub mod base;

/// Syntax: AST node arena and scope propagation
pub mod syntax;

/// Parser: keyword preprocessor, logos lexer, recursive-descent parser
pub mod parser;

/// Knowledge base: types, properties, and the lookup index
pub mod knowledge;

/// High-level IR: static result types
pub mod hir;

/// IDE features: prediction and completion
pub mod ide;

// Re-export commonly needed items
pub use base::{Name, TextRange, TextSize};
pub use hir::{RelDataType, TypeError, resolve_type};
pub use ide::{Analysis, AnalysisHost, CompletionItem, Prediction, completions, predict};
pub use knowledge::{IndexFilter, KnowledgeBase, KnowledgeIndex};
pub use parser::{SyntaxError, compile};
pub use syntax::{Ast, NodeId, NodeKind};
