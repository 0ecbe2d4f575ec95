//! Serialized knowledge-base facts.
//!
//! The asset is a JSON document with a `types` map and a `properties` map.
//! Map order is preserved so type buckets list facts in document order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::base::Name;
use crate::base::constants::PROPERTY_FACT_KIND;

/// Version string to the platforms a fact is available on at that version.
pub type Availability = IndexMap<Name, Vec<Name>>;

/// The whole knowledge-base document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeAsset {
    #[serde(default)]
    pub types: IndexMap<Name, TypeFact>,
    #[serde(default)]
    pub properties: IndexMap<Name, PropertyFact>,
}

impl KnowledgeAsset {
    /// Fill in names and keys left out of the document from their map keys.
    pub(crate) fn normalize(mut self) -> Self {
        for (name, fact) in &mut self.types {
            if fact.name.is_empty() {
                fact.name = name.clone();
            }
        }
        for (key, fact) in &mut self.properties {
            if fact.key.is_empty() {
                fact.key = key.clone();
            }
        }
        self
    }
}

/// A type and its place in the single-inheritance chain.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeFact {
    #[serde(default)]
    pub name: Name,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Name>,
    #[serde(default)]
    pub availability: Availability,
}

/// A property of a type, or a world-level creation function when
/// `direct_object_type` is absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFact {
    /// Composite key, e.g. `file <string> of <folder>: file`.
    #[serde(default)]
    pub key: Name,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<Name>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub singular_phrase: Option<Name>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural_phrase: Option<Name>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direct_object_type: Option<Name>,
    pub result_type: Name,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PropertyFact {
    /// The lookup key: everything before the first `:`, trimmed.
    pub fn index_key(&self) -> &str {
        self.key.split(':').next().unwrap_or_default().trim()
    }

    /// Only property facts take part in lookups; other kinds (operators,
    /// casts) are catalogued but not indexed.
    pub fn is_property(&self) -> bool {
        self.kind
            .as_deref()
            .is_none_or(|kind| kind == PROPERTY_FACT_KIND)
    }

    /// World-level creation function rather than a property of a type.
    pub fn is_creation(&self) -> bool {
        self.direct_object_type.is_none()
    }

    /// The parameter type inside `<...>` before any ` of <Owner>` suffix.
    pub fn parameter_types(&self) -> Vec<&str> {
        let key = self.index_key();
        let head = key.split(" of <").next().unwrap_or(key);
        let Some(open) = head.find('<') else {
            return Vec::new();
        };
        let inner = head[open + 1..].trim_end_matches('>');
        let inner = inner
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .unwrap_or(inner);
        inner.split(',').map(str::trim).filter(|s| !s.is_empty()).collect()
    }
}
