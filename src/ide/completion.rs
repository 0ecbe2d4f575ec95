//! Property completion at a cursor offset.

use std::fmt::Write as _;
use std::sync::Arc;

use rustc_hash::FxHashSet;

use super::predict::{Prediction, predict};
use crate::knowledge::{KnowledgeIndex, PropertyFact};

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionKind {
    /// A property of the value under the cursor.
    Property,
    /// A world-level creation function.
    Creation,
}

impl CompletionKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Property => 10, // Property
            CompletionKind::Creation => 3,  // Function
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug)]
pub struct CompletionItem {
    /// The text shown in the list.
    pub label: Arc<str>,
    /// The kind of completion.
    pub kind: CompletionKind,
    /// Result type of the property.
    pub detail: Option<Arc<str>>,
    /// Documentation (shown in popup).
    pub documentation: Option<Arc<str>>,
    /// Snippet to insert; `$0` marks the final cursor position.
    pub insert_text: Option<Arc<str>>,
    /// Sort priority (lower = higher priority).
    pub sort_priority: u32,
}

impl CompletionItem {
    pub fn new(label: impl Into<Arc<str>>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            documentation: None,
            insert_text: None,
            sort_priority: 100,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<Arc<str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_documentation(mut self, doc: impl Into<Arc<str>>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    pub fn with_insert_text(mut self, text: impl Into<Arc<str>>) -> Self {
        self.insert_text = Some(text.into());
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.sort_priority = priority;
        self
    }

    /// Build an item from a fact. Facts without a singular phrase are not
    /// offered.
    pub fn from_fact(fact: &PropertyFact) -> Option<Self> {
        fact.singular_phrase.as_ref()?;
        let kind = if fact.is_creation() {
            CompletionKind::Creation
        } else {
            CompletionKind::Property
        };
        Some(
            Self::new(completion_label(fact), kind)
                .with_detail(fact.result_type.as_str())
                .with_insert_text(completion_snippet(fact))
                .with_documentation(completion_documentation(fact)),
        )
    }
}

/// The key without its `of <Owner>` suffix.
pub fn completion_label(fact: &PropertyFact) -> &str {
    let key = fact.index_key();
    key.split(" of ").next().unwrap_or(key)
}

/// Plural phrase followed by a parameter placeholder.
pub fn completion_snippet(fact: &PropertyFact) -> String {
    let phrase = fact
        .plural_phrase
        .as_ref()
        .or(fact.singular_phrase.as_ref())
        .map(|p| p.as_str())
        .unwrap_or_else(|| completion_label(fact));
    let params = fact.parameter_types();
    match params.as_slice() {
        [] => phrase.to_string(),
        ["string"] => format!("{phrase} \"$0\""),
        [_] => format!("{phrase} $0"),
        _ => format!("{phrase} ($0, )"),
    }
}

fn completion_documentation(fact: &PropertyFact) -> String {
    let mut doc = String::new();
    if let Some(description) = &fact.description {
        doc.push_str(description);
        doc.push_str("\n\n");
    }
    if let Some(plural) = &fact.plural_phrase {
        let _ = writeln!(doc, "Plural: {plural}");
    }
    let _ = writeln!(doc, "Return type: {}", fact.result_type);
    for (version, platforms) in &fact.availability {
        let _ = writeln!(doc, "{version}: {}", platforms.join(", "));
    }
    doc.trim_end().to_string()
}

/// Completion suggestions for the cursor at byte `offset` of `text`.
///
/// Returns nothing when the text cannot be compiled even after closing
/// parentheses.
pub fn completions(index: &KnowledgeIndex, text: &str, offset: usize) -> Vec<CompletionItem> {
    completions_for(index, &predict(text, offset))
}

/// Completion suggestions for an existing prediction.
///
/// Items follow lookup order: own properties first, then inherited ones.
/// A label already offered by a nearer type is not repeated.
pub fn completions_for(index: &KnowledgeIndex, prediction: &Prediction) -> Vec<CompletionItem> {
    let Some(Ok(ty)) = prediction.marked_type(index) else {
        return Vec::new();
    };

    let mut seen = FxHashSet::default();
    ty.properties(index)
        .iter()
        .filter_map(|fact| CompletionItem::from_fact(fact))
        .filter(|item| seen.insert(item.label.clone()))
        .enumerate()
        .map(|(position, item)| item.with_priority(position as u32))
        .collect()
}
