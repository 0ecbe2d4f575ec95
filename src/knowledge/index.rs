//! The derived lookup index over a [`KnowledgeAsset`].
//!
//! Built in one pass and never mutated afterwards. Rebuilding with another
//! filter produces a new index; see [`KnowledgeBase`](super::KnowledgeBase).

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;
use tracing::{info, trace, warn};

use super::facts::{Availability, KnowledgeAsset, PropertyFact};
use super::version::IndexFilter;
use crate::base::Name;
use crate::base::constants::WORLD_TYPE;

/// A knowledge-base lookup that found nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The whole parent chain of `owner` was searched.
    #[error("no property '{}' on type '{owner}'", display_phrase(.property, .params.as_deref()))]
    PropertyNotFound {
        owner: Name,
        property: Name,
        params: Option<Name>,
    },
    #[error("no creation function '{}'", display_phrase(.name, .params.as_deref()))]
    CreationNotFound { name: Name, params: Option<Name> },
}

fn display_phrase(name: &str, params: Option<&str>) -> String {
    match params {
        Some(params) => format!("{name} <{params}>"),
        None => name.to_string(),
    }
}

/// Where a property fact is filed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Bucket {
    /// Facts without a direct object type.
    World,
    Type(Name),
}

/// Read-only lookup structures for one filter.
#[derive(Debug, Default)]
pub struct KnowledgeIndex {
    filter: IndexFilter,
    keys: FxHashMap<Name, Arc<PropertyFact>>,
    buckets: FxHashMap<Bucket, Vec<Arc<PropertyFact>>>,
    singulars: FxHashMap<Name, Name>,
    parents: FxHashMap<Name, Name>,
    platforms: IndexMap<Name, Vec<Name>>,
}

impl KnowledgeIndex {
    /// Index every fact of `asset` that `filter` admits.
    pub fn build(asset: &KnowledgeAsset, filter: &IndexFilter) -> Self {
        let mut index = Self {
            filter: filter.clone(),
            ..Self::default()
        };

        for fact in asset.types.values() {
            index.catalog_platforms(&fact.availability);
            if !filter.admits(&fact.availability) {
                continue;
            }
            if let Some(parent) = &fact.parent {
                index.parents.insert(fact.name.clone(), parent.clone());
            }
        }

        for fact in asset.properties.values() {
            index.catalog_platforms(&fact.availability);
            if !filter.admits(&fact.availability) {
                continue;
            }
            if let (Some(singular), Some(plural)) = (&fact.singular_phrase, &fact.plural_phrase) {
                index.singulars.insert(plural.clone(), singular.clone());
            }
            if !fact.is_property() {
                continue;
            }
            let fact = Arc::new(fact.clone());
            index.keys.insert(Name::new(fact.index_key()), fact.clone());
            let bucket = match &fact.direct_object_type {
                Some(owner) => Bucket::Type(owner.clone()),
                None => Bucket::World,
            };
            index.buckets.entry(bucket).or_default().push(fact);
        }

        info!(
            types = index.parents.len(),
            properties = index.keys.len(),
            plurals = index.singulars.len(),
            version = ?filter.version,
            platform = ?filter.platform,
            "built knowledge index"
        );
        index
    }

    fn catalog_platforms(&mut self, availability: &Availability) {
        for (version, platforms) in availability {
            for platform in platforms {
                let versions = self.platforms.entry(platform.clone()).or_default();
                if !versions.contains(version) {
                    versions.push(version.clone());
                }
            }
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn filter(&self) -> &IndexFilter {
        &self.filter
    }

    /// Number of indexed property facts.
    pub fn property_count(&self) -> usize {
        self.keys.len()
    }

    pub fn get(&self, key: &str) -> Option<&Arc<PropertyFact>> {
        self.keys.get(key)
    }

    /// Every platform mentioned anywhere in the asset, with the versions that
    /// mention it, regardless of the active filter.
    pub fn available_platforms(&self) -> &IndexMap<Name, Vec<Name>> {
        &self.platforms
    }

    /// Singular form of a phrase; phrases without a plural mapping are
    /// returned unchanged.
    pub fn singular<'a>(&'a self, phrase: &'a str) -> &'a str {
        self.singulars
            .get(phrase)
            .map(Name::as_str)
            .unwrap_or(phrase)
    }

    /// Declared parent of a type, or the type itself at a root.
    pub fn parent<'a>(&'a self, type_name: &'a str) -> &'a str {
        self.parents
            .get(type_name)
            .map(Name::as_str)
            .unwrap_or(type_name)
    }

    /// `type_name` followed by its ancestors, stopping at a root or at the
    /// first repeated type.
    pub fn ancestry<'a>(&'a self, type_name: &'a str) -> Vec<&'a str> {
        let mut chain = vec![type_name];
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        seen.insert(type_name);
        let mut current = type_name;
        loop {
            let parent = self.parent(current);
            if parent == current {
                break;
            }
            if !seen.insert(parent) {
                warn!(type_name, parent, "cycle in type parents");
                break;
            }
            chain.push(parent);
            current = parent;
        }
        chain
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Property `property` (applied to `params`) of `owner` or of the
    /// nearest ancestor declaring it.
    pub fn get_prop_type(
        &self,
        owner: &str,
        property: &str,
        params: Option<&str>,
    ) -> Result<Arc<PropertyFact>, LookupError> {
        let property = self.singular(property);
        let params = params.map(|p| self.singular(p));
        for type_name in self.ancestry(self.singular(owner)) {
            let key = lookup_key(property, params, Some(type_name));
            trace!(key = %key, "property lookup");
            if let Some(fact) = self.keys.get(key.as_str()) {
                return Ok(fact.clone());
            }
        }
        Err(LookupError::PropertyNotFound {
            owner: Name::new(owner),
            property: Name::new(property),
            params: params.map(Name::new),
        })
    }

    /// World-level creation function `name` (applied to `params`).
    pub fn get_creation_data_type(
        &self,
        name: &str,
        params: Option<&str>,
    ) -> Result<Arc<PropertyFact>, LookupError> {
        let name = self.singular(name);
        let params = params.map(|p| self.singular(p));
        let key = lookup_key(name, params, None);
        trace!(key = %key, "creation lookup");
        self.keys
            .get(key.as_str())
            .cloned()
            .ok_or_else(|| LookupError::CreationNotFound {
                name: Name::new(name),
                params: params.map(Name::new),
            })
    }

    /// Every property available on `type_name`, own properties first, then
    /// each ancestor's in order. `"world"` yields the creation functions.
    pub fn get_all_prop_type(&self, type_name: &str) -> Vec<Arc<PropertyFact>> {
        if type_name == WORLD_TYPE {
            return self.bucket(&Bucket::World).to_vec();
        }
        self.ancestry(self.singular(type_name))
            .into_iter()
            .flat_map(|ty| self.bucket(&Bucket::Type(Name::new(ty))).iter().cloned())
            .collect()
    }

    fn bucket(&self, bucket: &Bucket) -> &[Arc<PropertyFact>] {
        self.buckets.get(bucket).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// `name [<params>] [of <owner>]`
pub fn lookup_key(name: &str, params: Option<&str>, owner: Option<&str>) -> String {
    let mut key = String::from(name);
    if let Some(params) = params {
        key.push_str(" <");
        key.push_str(params);
        key.push('>');
    }
    if let Some(owner) = owner {
        key.push_str(" of <");
        key.push_str(owner);
        key.push('>');
    }
    key
}
