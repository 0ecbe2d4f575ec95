//! Static result types.

use std::fmt;
use std::sync::Arc;

use super::TypeError;
use crate::base::Name;
use crate::base::constants::{BOOLEAN_TYPE, NUMBER_TYPE, STRING_TYPE, WORLD_TYPE};
use crate::knowledge::{KnowledgeIndex, PropertyFact};

/// The type an expression evaluates to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RelDataType {
    /// A type from the knowledge base, or one of the literal types.
    Named(Name),
    /// `(a, b, ...)`; arity is not checked anywhere.
    Tuple(Vec<RelDataType>),
    /// Result of an operator without a typing rule (arithmetic).
    Unsupported { operator: Name },
}

impl RelDataType {
    pub fn named(name: impl Into<Name>) -> Self {
        Self::Named(name.into())
    }

    pub fn world() -> Self {
        Self::named(WORLD_TYPE)
    }

    pub fn boolean() -> Self {
        Self::named(BOOLEAN_TYPE)
    }

    pub fn string() -> Self {
        Self::named(STRING_TYPE)
    }

    pub fn number() -> Self {
        Self::named(NUMBER_TYPE)
    }

    /// The type name, for named types only.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn is_world(&self) -> bool {
        self.name() == Some(WORLD_TYPE)
    }

    /// Type of property `prop` applied to `params` on a value of this type.
    pub fn prop_type(
        &self,
        index: &KnowledgeIndex,
        prop: &str,
        params: Option<&str>,
    ) -> Result<RelDataType, TypeError> {
        let owner = self.owner_name()?;
        let fact = index.get_prop_type(&owner, prop, params)?;
        Ok(Self::Named(fact.result_type.clone()))
    }

    /// Every property accessible on a value of this type, own properties
    /// before inherited ones. Tuples and unsupported results have none.
    pub fn properties(&self, index: &KnowledgeIndex) -> Vec<Arc<PropertyFact>> {
        match self {
            Self::Named(name) => index.get_all_prop_type(name),
            Self::Tuple(_) | Self::Unsupported { .. } => Vec::new(),
        }
    }

    fn owner_name(&self) -> Result<Name, TypeError> {
        match self {
            Self::Named(name) => Ok(name.clone()),
            Self::Tuple(_) => Ok(Name::new(self.to_string())),
            Self::Unsupported { operator } => Err(TypeError::UnsupportedOperator {
                operator: operator.clone(),
            }),
        }
    }
}

impl fmt::Display for RelDataType {
    /// Tuples render as `(a, b)`, the spelling used inside fact keys.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Tuple(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
            Self::Unsupported { operator } => write!(f, "<unsupported {operator}>"),
        }
    }
}
