//! Node types for the collation graph.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::link::LinkIndex;

/// Identity of a reading node.
///
/// Derived from the reading text by the configured identity scheme, so the
/// same text always yields the same id within a run. Implements `Ord` for
/// deterministic ordering in highlight sets and exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    /// Create a NodeId from a raw integer.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw integer.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// A distinct reading in the collation.
///
/// `neighbors` and `incident_links` stay empty until adjacency indexing.
/// Both are undirected views over directed links and are not deduplicated:
/// a node joined to the same neighbor by two links lists it twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Identity derived from `text`.
    pub id: NodeId,
    /// The reading text.
    pub text: String,
    /// Witness cells carrying this text at the level where the node was first built.
    pub occurrence_count: usize,
    /// Level (column) where this text was last encountered.
    pub level: usize,
    /// Adjacent node ids, one entry per incident link endpoint.
    pub neighbors: Vec<NodeId>,
    /// Indices of links touching this node.
    pub incident_links: Vec<LinkIndex>,
}

impl Node {
    /// Create a node with empty adjacency.
    pub fn new(id: NodeId, text: impl Into<String>, occurrence_count: usize, level: usize) -> Self {
        Self {
            id,
            text: text.into(),
            occurrence_count,
            level,
            neighbors: Vec::new(),
            incident_links: Vec::new(),
        }
    }

    /// Number of incident links (self-loops count twice).
    pub fn degree(&self) -> usize {
        self.incident_links.len()
    }
}
