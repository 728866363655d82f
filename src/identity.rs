//! Node identity from reading text.
//!
//! ## Guarantee
//!
//! Equal strings always map to equal ids. Unequal strings are **expected**,
//! not guaranteed, to map to unequal ids under the hashed schemes: `xxh64`
//! and `polynomial31` are fast non-cryptographic hashes and a large enough
//! vocabulary can collide. Use [`IdentityScheme::Interned`] when exact
//! identity matters more than ids that are stable across inputs.
//!
//! [`IdentityTable`] sits in front of whichever scheme is configured and
//! reports collisions with `tracing::warn!` instead of hiding them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use xxhash_rust::xxh64::xxh64;

use crate::types::NodeId;

/// Maps a reading text to a node id.
///
/// Implementations must be deterministic for the lifetime of the hasher.
/// Distinct texts are expected, but not guaranteed, to map to distinct ids.
pub trait IdentityHasher {
    /// Id for `text`.
    fn id_of(&mut self, text: &str) -> NodeId;
}

/// Available identity schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityScheme {
    /// xxh64 of the UTF-8 bytes, seed 0.
    #[default]
    Xxh64,
    /// 31-multiplier polynomial over UTF-16 code units, folded to 31 bits.
    ///
    /// Produces the ids used by the browser viewer's exports.
    Polynomial31,
    /// Exact string table, ids assigned in first-seen order.
    Interned,
}

impl IdentityScheme {
    /// Parse scheme from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "xxh64" => Some(Self::Xxh64),
            "polynomial31" => Some(Self::Polynomial31),
            "interned" => Some(Self::Interned),
            _ => None,
        }
    }

    /// Create a fresh hasher for this scheme.
    pub fn hasher(&self) -> Box<dyn IdentityHasher> {
        match self {
            Self::Xxh64 => Box::new(Xxh64Hasher),
            Self::Polynomial31 => Box::new(Polynomial31Hasher),
            Self::Interned => Box::new(InternedHasher::default()),
        }
    }
}

impl fmt::Display for IdentityScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xxh64 => write!(f, "xxh64"),
            Self::Polynomial31 => write!(f, "polynomial31"),
            Self::Interned => write!(f, "interned"),
        }
    }
}

/// xxh64 text hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct Xxh64Hasher;

impl IdentityHasher for Xxh64Hasher {
    fn id_of(&mut self, text: &str) -> NodeId {
        NodeId::new(xxh64(text.as_bytes(), 0))
    }
}

/// Compute the 31-bit polynomial hash of `text`.
///
/// Each step computes `h * 31 + unit` with 32-bit two's-complement
/// wrapping and takes the absolute value, so the result is always in
/// `0..=2^31`.
pub fn polynomial31(text: &str) -> u64 {
    text.encode_utf16().fold(0i64, |h, unit| {
        let shifted = ((h as u32 as i32).wrapping_shl(5)) as i64;
        let folded = (shifted - h + unit as i64) as i32;
        (folded as i64).abs()
    }) as u64
}

/// Polynomial text hash compatible with earlier exports.
#[derive(Debug, Clone, Copy, Default)]
pub struct Polynomial31Hasher;

impl IdentityHasher for Polynomial31Hasher {
    fn id_of(&mut self, text: &str) -> NodeId {
        NodeId::new(polynomial31(text))
    }
}

/// Exact identity: sequential ids per distinct text.
#[derive(Debug, Clone, Default)]
pub struct InternedHasher {
    ids: HashMap<String, NodeId>,
}

impl IdentityHasher for InternedHasher {
    fn id_of(&mut self, text: &str) -> NodeId {
        if let Some(id) = self.ids.get(text) {
            return *id;
        }
        let id = NodeId::new(self.ids.len() as u64);
        self.ids.insert(text.to_string(), id);
        id
    }
}

/// A collision observed by the [`IdentityTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    /// The shared id.
    pub id: NodeId,
    /// Text that first claimed the id.
    pub first: String,
    /// Later text mapping to the same id.
    pub other: String,
}

/// Memoizing front for an [`IdentityHasher`] that records the first text
/// seen for every id.
pub struct IdentityTable {
    hasher: Box<dyn IdentityHasher>,
    by_text: HashMap<String, NodeId>,
    by_id: HashMap<NodeId, String>,
    collisions: Vec<Collision>,
}

impl IdentityTable {
    /// Create a table for a scheme.
    pub fn new(scheme: IdentityScheme) -> Self {
        Self::with_hasher(scheme.hasher())
    }

    /// Create a table around a custom hasher.
    pub fn with_hasher(hasher: Box<dyn IdentityHasher>) -> Self {
        Self {
            hasher,
            by_text: HashMap::new(),
            by_id: HashMap::new(),
            collisions: Vec::new(),
        }
    }

    /// Id for `text`, logging a warning the first time a different text
    /// maps onto an id already claimed.
    pub fn id_of(&mut self, text: &str) -> NodeId {
        if let Some(id) = self.by_text.get(text) {
            return *id;
        }

        let id = self.hasher.id_of(text);
        match self.by_id.get(&id) {
            Some(first) => {
                tracing::warn!(
                    id = %id,
                    first = %first,
                    other = %text,
                    "identity collision: distinct readings share a node"
                );
                self.collisions.push(Collision {
                    id,
                    first: first.clone(),
                    other: text.to_string(),
                });
            }
            None => {
                self.by_id.insert(id, text.to_string());
            }
        }
        self.by_text.insert(text.to_string(), id);
        id
    }

    /// Text that first claimed `id`.
    pub fn text_of(&self, id: NodeId) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    /// Collisions seen so far.
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Number of distinct texts seen.
    pub fn len(&self) -> usize {
        self.by_text.len()
    }

    /// True when no text has been seen.
    pub fn is_empty(&self) -> bool {
        self.by_text.is_empty()
    }
}

impl fmt::Debug for IdentityTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityTable")
            .field("texts", &self.by_text.len())
            .field("collisions", &self.collisions.len())
            .finish()
    }
}
