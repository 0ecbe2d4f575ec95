//! Cursor-driven prediction.
//!
//! A `?` marker is spliced in at the cursor, the text is compiled, and on a
//! syntax error a `)` is appended and compilation retried. The marker node
//! of the first tree that compiles is what completion asks about.

use tracing::debug;

use crate::hir::{RelDataType, TypeError, resolve_type};
use crate::knowledge::KnowledgeIndex;
use crate::parser::compile;
use crate::syntax::{Ast, NodeId, NodeKind};

/// Character spliced in at the cursor.
pub const CURSOR_MARKER: char = '?';

/// Tuning for [`predict_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictOptions {
    /// Total compile attempts, the first one included.
    pub max_attempts: usize,
    /// Characters the marker may be spliced next to.
    pub boundaries: &'static [char],
}

impl Default for PredictOptions {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            boundaries: &[' ', '.', '(', ')'],
        }
    }
}

/// What the cursor marker stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkedNode {
    /// A property access on the marker's scope.
    Node(NodeId),
    /// A root-level reference: anything created from the world fits.
    World { scope: Option<NodeId> },
}

/// Outcome of one prediction.
#[derive(Debug, Clone)]
pub struct Prediction {
    /// Text of the last compile attempt.
    pub candidate: String,
    /// Number of compile attempts made.
    pub attempts: usize,
    /// The first tree that compiled, if any.
    pub tree: Option<Ast>,
    /// The `?` node spliced in at the cursor.
    pub marker: Option<NodeId>,
}

impl Prediction {
    /// No candidate compiled; callers should offer no completions.
    pub fn is_empty(&self) -> bool {
        self.tree.is_none()
    }

    pub fn marked(&self) -> Option<MarkedNode> {
        let tree = self.tree.as_ref()?;
        let marker = self.marker?;
        if tree.is_direct_access(marker) {
            Some(MarkedNode::Node(marker))
        } else {
            Some(MarkedNode::World {
                scope: tree.scope(marker),
            })
        }
    }

    /// Resolved type of the marked node.
    pub fn marked_type(&self, index: &KnowledgeIndex) -> Option<Result<RelDataType, TypeError>> {
        let tree = self.tree.as_ref()?;
        match self.marked()? {
            MarkedNode::Node(id) => Some(resolve_type(tree, id, index)),
            MarkedNode::World { .. } => Some(Ok(RelDataType::world())),
        }
    }

    /// Innermost whose-filter containing the marker.
    pub fn enclosing_filter(&self) -> Option<NodeId> {
        let tree = self.tree.as_ref()?;
        let parents = tree.parents();
        let mut child = self.marker?;
        while let Some(parent) = parents[child.index()] {
            if let NodeKind::Whose { filter, .. } = tree.kind(parent) {
                if *filter == child {
                    return Some(child);
                }
            }
            child = parent;
        }
        None
    }

    /// Resolved type of [`enclosing_filter`](Self::enclosing_filter).
    pub fn enclosing_filter_type(
        &self,
        index: &KnowledgeIndex,
    ) -> Option<Result<RelDataType, TypeError>> {
        let tree = self.tree.as_ref()?;
        let filter = self.enclosing_filter()?;
        Some(resolve_type(tree, filter, index))
    }
}

/// [`predict_with`] using default options.
pub fn predict(text: &str, offset: usize) -> Prediction {
    predict_with(text, offset, &PredictOptions::default())
}

/// Predict what the expression at byte `offset` of `text` refers to.
///
/// Never fails: when no attempt compiles the prediction is empty.
pub fn predict_with(text: &str, offset: usize, options: &PredictOptions) -> Prediction {
    let (mut candidate, marker_ordinal) = splice_marker(text, offset, options.boundaries);
    let mut attempts = 0;

    while attempts < options.max_attempts {
        attempts += 1;
        debug!(attempt = attempts, candidate = %candidate, "compiling prediction candidate");
        match compile(&candidate) {
            Ok(tree) => {
                let marker = tree.type_hints().get(marker_ordinal).copied();
                return Prediction {
                    candidate,
                    attempts,
                    tree: Some(tree),
                    marker,
                };
            }
            Err(err) => {
                debug!(attempt = attempts, error = %err, "candidate rejected, closing a parenthesis");
                candidate.push(')');
            }
        }
    }

    debug!(attempts, "no prediction available");
    Prediction {
        candidate,
        attempts,
        tree: None,
        marker: None,
    }
}

/// Splice the cursor marker into `text` at the boundaries around `offset`.
///
/// The word under the cursor is cut out: the text before the cursor is
/// trimmed back to the last boundary and the text after it forward to the
/// next one. Also returns how many markers precede the spliced one.
pub fn splice_marker(text: &str, offset: usize, boundaries: &[char]) -> (String, usize) {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    let (pre, post) = text.split_at(offset);

    let pre = pre
        .char_indices()
        .rev()
        .find(|(_, ch)| boundaries.contains(ch))
        .map(|(i, ch)| &pre[..i + ch.len_utf8()])
        .unwrap_or("");
    let post = post
        .find(|ch: char| boundaries.contains(&ch))
        .map(|i| &post[i..])
        .unwrap_or("");

    let mut candidate = String::with_capacity(pre.len() + post.len() + 1);
    candidate.push_str(pre);
    candidate.push(CURSOR_MARKER);
    candidate.push_str(post);
    (candidate, markers_outside_strings(pre))
}

fn markers_outside_strings(text: &str) -> usize {
    let mut in_string = false;
    let mut count = 0;
    for ch in text.chars() {
        match ch {
            '"' => in_string = !in_string,
            CURSOR_MARKER if !in_string => count += 1,
            _ => {}
        }
    }
    count
}
