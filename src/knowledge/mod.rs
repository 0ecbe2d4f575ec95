//! Type knowledge base.
//!
//! - [`KnowledgeAsset`] - the serialized catalog of types and properties
//! - [`KnowledgeIndex`] - lookups derived from the asset for one [`IndexFilter`]
//! - [`KnowledgeBase`] - owns the asset and the current index snapshot
//!
//! ## Snapshots
//!
//! ```text
//! build_index(filter) ──► KnowledgeIndex::build ──► swap Arc under write lock
//!                                                       │
//! snapshot() ◄──────────── clone Arc under read lock ◄──┘
//! ```
//!
//! Readers keep the `Arc` they got for as long as they need it; a rebuild
//! never touches an index someone is reading.

mod facts;
mod index;
mod version;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

pub use facts::{Availability, KnowledgeAsset, PropertyFact, TypeFact};
pub use index::{KnowledgeIndex, LookupError, lookup_key};
pub use version::{IndexFilter, compare_versions};

/// Failure to load a knowledge-base asset.
#[derive(Debug, Error)]
pub enum KnowledgeBaseError {
    #[error("invalid knowledge base: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot read knowledge base {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Facts plus the index currently answering queries.
#[derive(Debug)]
pub struct KnowledgeBase {
    asset: KnowledgeAsset,
    index: RwLock<Arc<KnowledgeIndex>>,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new(KnowledgeAsset::default())
    }
}

impl KnowledgeBase {
    /// Take ownership of `asset` and index all of it.
    pub fn new(asset: KnowledgeAsset) -> Self {
        let asset = asset.normalize();
        let index = KnowledgeIndex::build(&asset, &IndexFilter::all());
        Self {
            asset,
            index: RwLock::new(Arc::new(index)),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, KnowledgeBaseError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, KnowledgeBaseError> {
        Ok(Self::new(serde_json::from_reader(reader)?))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, KnowledgeBaseError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| KnowledgeBaseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn asset(&self) -> &KnowledgeAsset {
        &self.asset
    }

    /// Replace the index with one built for `filter`.
    ///
    /// The new index is built before the write lock is taken.
    pub fn build_index(&self, filter: &IndexFilter) {
        let index = Arc::new(KnowledgeIndex::build(&self.asset, filter));
        *self.index.write() = index;
    }

    /// The index as of now.
    pub fn snapshot(&self) -> Arc<KnowledgeIndex> {
        self.index.read().clone()
    }
}
