//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use once_cell::sync::Lazy;
use relevance::hir::{RelDataType, TypeError, resolve_type};
use relevance::knowledge::{IndexFilter, KnowledgeBase, KnowledgeIndex};
use relevance::syntax::{Ast, NodeId, NodeKind};

/// A small catalog: filesystem objects under `world`, processes without a
/// parent, and a registry that only exists from 9.0 on Windows.
pub const KNOWLEDGE_JSON: &str = include_str!("knowledge.json");

static SHARED_INDEX: Lazy<Arc<KnowledgeIndex>> = Lazy::new(|| knowledge_base().snapshot());

/// A fresh knowledge base over the fixture, unfiltered.
pub fn knowledge_base() -> KnowledgeBase {
    KnowledgeBase::from_json_str(KNOWLEDGE_JSON).expect("fixture knowledge base should load")
}

/// The unfiltered fixture index, shared across tests.
pub fn index() -> Arc<KnowledgeIndex> {
    SHARED_INDEX.clone()
}

/// The fixture index for one version/platform.
pub fn filtered_index(version: Option<&str>, platform: Option<&str>) -> Arc<KnowledgeIndex> {
    let kb = knowledge_base();
    kb.build_index(&IndexFilter::new(version, platform));
    kb.snapshot()
}

pub fn compile(text: &str) -> Ast {
    relevance::compile(text).unwrap_or_else(|e| panic!("failed to compile {text:?}: {e}"))
}

/// Type of the whole expression against the shared index.
pub fn type_of(text: &str) -> Result<RelDataType, TypeError> {
    let ast = compile(text);
    resolve_type(&ast, ast.root(), &index())
}

/// First phrase node named `name`, in source order.
pub fn find_phrase(ast: &Ast, name: &str) -> NodeId {
    ast.ids()
        .filter(|id| matches!(ast.kind(*id), NodeKind::Phrase { name: n, .. } if n == name))
        .min_by_key(|id| ast.node(*id).range.start())
        .unwrap_or_else(|| panic!("no phrase {name:?} in {}", ast.display(ast.root())))
}

/// First node of the given tag, in source order.
pub fn find_kind(ast: &Ast, tag: &str) -> NodeId {
    ast.ids()
        .filter(|id| ast.kind(*id).tag() == tag)
        .min_by_key(|id| ast.node(*id).range.start())
        .unwrap_or_else(|| panic!("no {tag} node in {}", ast.display(ast.root())))
}
