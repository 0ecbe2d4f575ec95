//! Expression syntax tree.
//!
//! - [`Ast`] - arena of [`Node`]s addressed by [`NodeId`]
//! - [`NodeKind`] - the closed set of expression forms
//! - [`Ast::configure_scopes`] - the scope/direct-access pass run after parsing

mod ast;
mod scope;

pub use ast::{
    Ast, BinaryOperator, Node, NodeDisplay, NodeId, NodeKind, Preorder, UnaryOperator,
};
