//! Arena-allocated AST for one compiled expression.
//!
//! Nodes live in a flat `Vec` owned by [`Ast`] and refer to each other by
//! [`NodeId`]. Children are fixed at construction; only `scope` and
//! `direct_access` are written afterwards, by the scope pass.

use std::fmt;

use crate::base::{Name, TextRange};

// ============================================================================
// Node identity
// ============================================================================

/// Index of a node inside its [`Ast`].
///
/// Only meaningful for the tree that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    /// Position of this node in allocation order.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// ============================================================================
// Operators
// ============================================================================

/// Prefix operators. All of them resolve to `boolean`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Exists,
    NotExists,
    Not,
    Negate,
}

impl UnaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exists => "exists",
            Self::NotExists => "not exists",
            Self::Not => "not",
            Self::Negate => "-",
        }
    }
}

/// Infix operators.
///
/// Relations keep their cleaned-up spelling (`is not equal to`, `>=`, ...)
/// since the language has many synonyms for the same comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Relation(Name),
    And,
    Or,
    Plus,
    Minus,
    Times,
    Divide,
    Mod,
    Concat,
}

impl BinaryOperator {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Relation(op) => op.as_str(),
            Self::And => "and",
            Self::Or => "or",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Times => "*",
            Self::Divide => "/",
            Self::Mod => "mod",
            Self::Concat => "&",
        }
    }

    /// Relations and logical connectives produce booleans.
    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Relation(_) | Self::And | Self::Or)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Nodes
// ============================================================================

/// The closed set of expression forms.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Contents of a double-quoted literal, without the quotes.
    String { value: Name },
    /// Digits as written.
    Number { value: Name },
    It,
    /// Property or creation name, optionally applied to a parameter.
    Phrase { name: Name, params: Option<NodeId> },
    /// `prop of source`, `source -> prop`, `its prop`.
    Property { prop: NodeId, source: NodeId },
    Whose { source: NodeId, filter: NodeId },
    Parens { content: NodeId },
    Cast { source: NodeId, target: Name },
    Unary { op: UnaryOperator, operand: NodeId },
    Binary { op: BinaryOperator, left: NodeId, right: NodeId },
    Tuple { items: Vec<NodeId> },
    Collection { items: Vec<NodeId> },
    If { condition: NodeId, then_branch: NodeId, else_branch: NodeId },
    /// The cursor marker `?`.
    TypeHint,
}

impl NodeKind {
    /// Lower-case tag used by the S-expression rendering.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::String { .. } => "string",
            Self::Number { .. } => "number",
            Self::It => "it",
            Self::Phrase { .. } => "phrase",
            Self::Property { .. } => "property",
            Self::Whose { .. } => "whose",
            Self::Parens { .. } => "parens",
            Self::Cast { .. } => "cast",
            Self::Unary { .. } => "unary",
            Self::Binary { .. } => "binary",
            Self::Tuple { .. } => "tuple",
            Self::Collection { .. } => "collection",
            Self::If { .. } => "if",
            Self::TypeHint => "type-hint",
        }
    }

    /// Child nodes, in traversal order.
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            Self::String { .. } | Self::Number { .. } | Self::It | Self::TypeHint => Vec::new(),
            Self::Phrase { params, .. } => params.iter().copied().collect(),
            Self::Property { prop, source } => vec![*prop, *source],
            Self::Whose { source, filter } => vec![*source, *filter],
            Self::Parens { content } => vec![*content],
            Self::Cast { source, .. } => vec![*source],
            Self::Unary { operand, .. } => vec![*operand],
            Self::Binary { left, right, .. } => vec![*left, *right],
            Self::Tuple { items } | Self::Collection { items } => items.clone(),
            Self::If {
                condition,
                then_branch,
                else_branch,
            } => vec![*condition, *then_branch, *else_branch],
        }
    }
}

/// A node plus the two fields assigned by [`Ast::configure_scopes`].
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    /// Range in the preprocessed text.
    pub range: TextRange,
    /// Node whose type supplies the implicit receiver for this subtree.
    pub scope: Option<NodeId>,
    /// True when this node is a property access on `scope`.
    pub direct_access: bool,
}

impl Node {
    pub fn new(kind: NodeKind, range: TextRange) -> Self {
        Self {
            kind,
            range,
            scope: None,
            direct_access: false,
        }
    }
}

// ============================================================================
// Tree
// ============================================================================

/// A compiled expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Ast {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Ast {
    pub(crate) fn from_parts(nodes: Vec<Node>, root: NodeId) -> Self {
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The node behind `id`.
    ///
    /// `id` must come from this tree; ids from another tree panic when they
    /// are out of range. Use [`Ast::get`] for ids of unknown origin.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn scope(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).scope
    }

    pub fn is_direct_access(&self, id: NodeId) -> bool {
        self.node(id).direct_access
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node ids in allocation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId::from_index)
    }

    /// Declared children of a node, in traversal order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id).kind.children()
    }

    /// Pre-order walk from the root.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            ast: self,
            stack: vec![self.root],
        }
    }

    /// Parent of every node, indexed by [`NodeId::index`]. The root has none.
    pub fn parents(&self) -> Vec<Option<NodeId>> {
        let mut parents = vec![None; self.nodes.len()];
        for id in self.preorder() {
            for child in self.children(id) {
                parents[child.index()] = Some(id);
            }
        }
        parents
    }

    /// Every `?` marker, in source order.
    pub fn type_hints(&self) -> Vec<NodeId> {
        let mut hints: Vec<NodeId> = self
            .ids()
            .filter(|id| matches!(self.kind(*id), NodeKind::TypeHint))
            .collect();
        hints.sort_by_key(|id| self.node(*id).range.start());
        hints
    }

    /// Render a subtree back to Relevance text.
    pub fn display(&self, id: NodeId) -> NodeDisplay<'_> {
        NodeDisplay { ast: self, id }
    }

    /// Render a subtree as an S-expression of node kinds and names.
    ///
    /// Ranges and ids are left out, so two trees with the same shape render
    /// identically regardless of how they were spelled.
    pub fn sexpr(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_sexpr(id, &mut out);
        out
    }

    /// Structural equality of the two roots, ignoring ranges.
    pub fn same_shape(&self, other: &Ast) -> bool {
        self.sexpr(self.root) == other.sexpr(other.root)
    }

    fn write_sexpr(&self, id: NodeId, out: &mut String) {
        let kind = self.kind(id);
        out.push('(');
        out.push_str(kind.tag());
        match kind {
            NodeKind::String { value } => {
                out.push_str(&format!(" {value:?}"));
            }
            NodeKind::Number { value } => {
                out.push(' ');
                out.push_str(value);
            }
            NodeKind::Phrase { name, .. } => {
                out.push_str(&format!(" {:?}", name.as_str()));
            }
            NodeKind::Cast { target, .. } => {
                out.push_str(&format!(" {:?}", target.as_str()));
            }
            NodeKind::Unary { op, .. } => {
                out.push_str(&format!(" {:?}", op.as_str()));
            }
            NodeKind::Binary { op, .. } => {
                out.push_str(&format!(" {:?}", op.as_str()));
            }
            _ => {}
        }
        for child in self.children(id) {
            out.push(' ');
            self.write_sexpr(child, out);
        }
        out.push(')');
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.display(self.root).fmt(f)
    }
}

/// Iterator returned by [`Ast::preorder`].
pub struct Preorder<'a> {
    ast: &'a Ast,
    stack: Vec<NodeId>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.ast.children(id).into_iter().rev());
        Some(id)
    }
}

/// Canonical text of one subtree; see [`Ast::display`].
pub struct NodeDisplay<'a> {
    ast: &'a Ast,
    id: NodeId,
}

impl NodeDisplay<'_> {
    fn child(&self, id: NodeId) -> Self {
        Self { ast: self.ast, id }
    }

    fn write_list(&self, f: &mut fmt::Formatter<'_>, items: &[NodeId], sep: &str) -> fmt::Result {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                f.write_str(sep)?;
            }
            write!(f, "{}", self.child(*item))?;
        }
        Ok(())
    }
}

impl fmt::Display for NodeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ast.kind(self.id) {
            NodeKind::String { value } => write!(f, "\"{value}\""),
            NodeKind::Number { value } => f.write_str(value),
            NodeKind::It => f.write_str("it"),
            NodeKind::Phrase { name, params: None } => f.write_str(name),
            NodeKind::Phrase {
                name,
                params: Some(params),
            } => write!(f, "{name} {}", self.child(*params)),
            NodeKind::Property { prop, source } => {
                write!(f, "{} of {}", self.child(*prop), self.child(*source))
            }
            NodeKind::Whose { source, filter } => {
                write!(f, "{} whose {}", self.child(*source), self.child(*filter))
            }
            NodeKind::Parens { content } => write!(f, "({})", self.child(*content)),
            NodeKind::Cast { source, target } => write!(f, "{} as {target}", self.child(*source)),
            NodeKind::Unary {
                op: UnaryOperator::Negate,
                operand,
            } => write!(f, "-{}", self.child(*operand)),
            NodeKind::Unary { op, operand } => write!(f, "{} {}", op.as_str(), self.child(*operand)),
            NodeKind::Binary { op, left, right } => {
                write!(f, "{} {op} {}", self.child(*left), self.child(*right))
            }
            NodeKind::Tuple { items } => self.write_list(f, items, ", "),
            NodeKind::Collection { items } => self.write_list(f, items, "; "),
            NodeKind::If {
                condition,
                then_branch,
                else_branch,
            } => write!(
                f,
                "if {} then {} else {}",
                self.child(*condition),
                self.child(*then_branch),
                self.child(*else_branch)
            ),
            NodeKind::TypeHint => f.write_str("?"),
        }
    }
}
