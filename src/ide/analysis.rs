//! AnalysisHost and Analysis - state management for editor queries.
//!
//! The `AnalysisHost` owns the knowledge base and hands out `Analysis`
//! snapshots. A snapshot holds one index `Arc`, so every query made through
//! it sees the same facts even if the host rebuilds its index meanwhile.
//!
//! ## Usage
//!
//! ```ignore
//! let host = AnalysisHost::new(KnowledgeBase::from_path("relevance.json")?);
//! host.set_filter(&IndexFilter::new(Some("9.0"), Some("win")));
//!
//! let analysis = host.analysis();
//! let items = analysis.completions("names of files whose (", 22);
//! ```

use std::sync::Arc;

use thiserror::Error;

use super::completion::{CompletionItem, completions_for};
use super::predict::{PredictOptions, Prediction, predict_with};
use crate::hir::{RelDataType, TypeError, TypeResolver};
use crate::knowledge::{IndexFilter, KnowledgeBase, KnowledgeIndex, PropertyFact};
use crate::parser::{SyntaxError, compile};
use crate::syntax::Ast;

/// Why a whole expression could not be typed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Type(#[from] TypeError),
}

/// Owns the knowledge base for the editor layer.
#[derive(Debug, Default)]
pub struct AnalysisHost {
    kb: KnowledgeBase,
    options: PredictOptions,
}

impl AnalysisHost {
    pub fn new(kb: KnowledgeBase) -> Self {
        Self {
            kb,
            options: PredictOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PredictOptions) -> Self {
        self.options = options;
        self
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Rebuild the index for another version/platform. Snapshots taken
    /// earlier keep answering from the old index.
    pub fn set_filter(&self, filter: &IndexFilter) {
        self.kb.build_index(filter);
    }

    /// Get a snapshot for querying.
    pub fn analysis(&self) -> Analysis {
        Analysis {
            index: self.kb.snapshot(),
            options: self.options.clone(),
        }
    }
}

/// Read-only view over one index snapshot.
#[derive(Debug, Clone)]
pub struct Analysis {
    index: Arc<KnowledgeIndex>,
    options: PredictOptions,
}

impl Analysis {
    pub fn index(&self) -> &KnowledgeIndex {
        &self.index
    }

    pub fn compile(&self, text: &str) -> Result<Ast, SyntaxError> {
        compile(text)
    }

    /// Type of the whole expression.
    pub fn type_of(&self, text: &str) -> Result<RelDataType, AnalysisError> {
        let ast = compile(text)?;
        Ok(TypeResolver::new(&ast, &self.index).resolve_root()?)
    }

    pub fn predict(&self, text: &str, offset: usize) -> Prediction {
        predict_with(text, offset, &self.options)
    }

    /// Type of whatever the cursor at `offset` refers to.
    pub fn type_at(&self, text: &str, offset: usize) -> Option<RelDataType> {
        self.predict(text, offset).marked_type(&self.index)?.ok()
    }

    pub fn completions(&self, text: &str, offset: usize) -> Vec<CompletionItem> {
        completions_for(&self.index, &self.predict(text, offset))
    }

    /// Every property reachable on `type_name`, own properties first.
    pub fn properties_of(&self, type_name: &str) -> Vec<Arc<PropertyFact>> {
        RelDataType::named(type_name).properties(&self.index)
    }
}
