//! Type resolution - the result type of any node in a scoped AST.
//!
//! Resolution is on demand and uncached: every call walks the nodes it
//! needs and consults the knowledge index.
//!
//! ## Rules by node kind
//!
//! | Node | Type |
//! |------|------|
//! | string / number literal | `string` / `number` |
//! | `it` | type of its scope |
//! | phrase | property of the scope's type if direct, else creation function, else property of the scope's type |
//! | property | property of the source's type |
//! | whose, parens | type of the inner expression |
//! | cast | the target type name |
//! | unary | `boolean` |
//! | relation, `and`, `or` | `boolean` |
//! | arithmetic | [`RelDataType::Unsupported`] |
//! | tuple | tuple of item types |
//! | collection | first item's type |
//! | if | `then` branch type |
//! | `?` | scope's type if direct, else `world` |

use super::TypeError;
use super::types::RelDataType;
use crate::base::Name;
use crate::base::constants::TUPLE_ITEM_PHRASE;
use crate::knowledge::KnowledgeIndex;
use crate::syntax::{Ast, NodeId, NodeKind};

/// Resolve the type of node `id`.
pub fn resolve_type(
    ast: &Ast,
    id: NodeId,
    index: &KnowledgeIndex,
) -> Result<RelDataType, TypeError> {
    TypeResolver::new(ast, index).resolve(id)
}

/// Resolves node types of one tree against one index snapshot.
pub struct TypeResolver<'a> {
    ast: &'a Ast,
    index: &'a KnowledgeIndex,
}

impl<'a> TypeResolver<'a> {
    pub fn new(ast: &'a Ast, index: &'a KnowledgeIndex) -> Self {
        Self { ast, index }
    }

    /// Type of the whole expression.
    pub fn resolve_root(&self) -> Result<RelDataType, TypeError> {
        self.resolve(self.ast.root())
    }

    pub fn resolve(&self, id: NodeId) -> Result<RelDataType, TypeError> {
        let node = self.ast.node(id);
        match &node.kind {
            NodeKind::String { .. } => Ok(RelDataType::string()),
            NodeKind::Number { .. } => Ok(RelDataType::number()),
            NodeKind::It => self.resolve_scope(id),
            NodeKind::TypeHint if node.direct_access => self.resolve_scope(id),
            NodeKind::TypeHint => Ok(RelDataType::world()),
            NodeKind::Phrase { name, params } => self.resolve_phrase(id, name, *params),
            NodeKind::Property { prop, source } => self.resolve_property(*prop, *source),
            NodeKind::Whose { source, .. } => self.resolve(*source),
            NodeKind::Parens { content } => self.resolve(*content),
            NodeKind::Cast { target, .. } => Ok(RelDataType::Named(target.clone())),
            // Negation included: `-x` is typed as boolean like `not x`.
            NodeKind::Unary { .. } => Ok(RelDataType::boolean()),
            NodeKind::Binary { op, .. } if op.is_boolean() => Ok(RelDataType::boolean()),
            NodeKind::Binary { op, .. } => Ok(RelDataType::Unsupported {
                operator: Name::new(op.as_str()),
            }),
            NodeKind::Tuple { items } => items
                .iter()
                .map(|item| self.resolve(*item))
                .collect::<Result<Vec<_>, _>>()
                .map(RelDataType::Tuple),
            NodeKind::Collection { items } => match items.first() {
                Some(first) => self.resolve(*first),
                None => Ok(RelDataType::Tuple(Vec::new())),
            },
            NodeKind::If { then_branch, .. } => self.resolve(*then_branch),
        }
    }

    fn resolve_scope(&self, id: NodeId) -> Result<RelDataType, TypeError> {
        match self.ast.scope(id) {
            Some(scope) => self.resolve(scope),
            None => Err(TypeError::UnboundIt),
        }
    }

    fn resolve_phrase(
        &self,
        id: NodeId,
        name: &str,
        params: Option<NodeId>,
    ) -> Result<RelDataType, TypeError> {
        let name = name.to_lowercase();
        if name == "true" || name == "false" {
            return Ok(RelDataType::boolean());
        }
        let params = self.param_type(params)?;

        if self.ast.is_direct_access(id) {
            let owner = self.resolve_scope(id)?;
            return owner.prop_type(self.index, &name, params.as_deref());
        }

        match self.index.get_creation_data_type(&name, params.as_deref()) {
            Ok(fact) => Ok(RelDataType::Named(fact.result_type.clone())),
            // A bare property inside a filter reads from the filtered value.
            Err(err) => match self.ast.scope(id) {
                Some(scope) => self
                    .resolve(scope)
                    .and_then(|owner| owner.prop_type(self.index, &name, params.as_deref()))
                    .map_err(|_| err.into()),
                None => Err(err.into()),
            },
        }
    }

    fn resolve_property(&self, prop: NodeId, source: NodeId) -> Result<RelDataType, TypeError> {
        let NodeKind::Phrase { name, params } = self.ast.kind(prop) else {
            return self.resolve(prop);
        };
        let owner = self.resolve(source)?;
        if let Some(item) = self.tuple_item(&owner, name, *params)? {
            return Ok(item);
        }
        let params = self.param_type(*params)?;
        owner.prop_type(self.index, &name.to_lowercase(), params.as_deref())
    }

    /// `item N of <tuple>` with a literal `N`.
    fn tuple_item(
        &self,
        owner: &RelDataType,
        name: &str,
        params: Option<NodeId>,
    ) -> Result<Option<RelDataType>, TypeError> {
        let RelDataType::Tuple(items) = owner else {
            return Ok(None);
        };
        if !name.eq_ignore_ascii_case(TUPLE_ITEM_PHRASE) {
            return Ok(None);
        }
        let Some(NodeKind::Number { value }) = params.map(|p| self.ast.kind(p)) else {
            return Ok(None);
        };
        let Ok(index) = value.parse::<usize>() else {
            return Ok(None);
        };
        items
            .get(index)
            .cloned()
            .map(Some)
            .ok_or(TypeError::TupleIndexOutOfRange {
                index,
                len: items.len(),
            })
    }

    /// Type of a phrase argument as it appears in fact keys.
    fn param_type(&self, params: Option<NodeId>) -> Result<Option<String>, TypeError> {
        params
            .map(|p| self.resolve(p).map(|ty| ty.to_string()))
            .transpose()
    }
}
