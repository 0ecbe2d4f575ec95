//! High-level IR (HIR) - static typing of compiled expressions.
//!
//! ## Key Types
//!
//! - [`RelDataType`]: The type an expression evaluates to
//! - [`TypeResolver`]: Per-node resolution against a knowledge index
//! - [`TypeError`]: Why a node has no type
//!
//! ## Resolution Layers
//!
//! ```text
//! compile(text)             ← Ast with scope / direct_access
//!     │
//!     ▼
//! resolve_type(ast, node)   ← walks scopes, asks the index
//!     │
//!     ▼
//! KnowledgeIndex            ← key lookups along the type-parent chain
//! ```

mod resolve;
mod types;

use thiserror::Error;

use crate::base::Name;
use crate::knowledge::LookupError;

pub use resolve::{TypeResolver, resolve_type};
pub use types::RelDataType;

/// Why a node could not be typed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// A property was requested on an arithmetic result.
    #[error("operator '{operator}' has no result type")]
    UnsupportedOperator { operator: Name },

    /// `it` outside any filter or property chain.
    #[error("'it' has no enclosing scope")]
    UnboundIt,

    #[error("tuple has {len} items, no item {index}")]
    TupleIndexOutOfRange { index: usize, len: usize },
}
