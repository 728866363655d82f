//! Link types for the collation graph.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::node::NodeId;

/// Position of a link in the graph's link arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkIndex(usize);

impl LinkIndex {
    /// Create a link index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the arena position.
    pub fn get(&self) -> usize {
        self.0
    }
}

impl fmt::Display for LinkIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Unordered key over the two endpoints of a link.
///
/// `A→B` and `B→A` produce the same key; the smaller id is always stored first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodePairId {
    low: NodeId,
    high: NodeId,
}

impl NodePairId {
    /// Build the canonical key for two endpoints in either order.
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Smaller-or-equal endpoint.
    pub fn low(&self) -> NodeId {
        self.low
    }

    /// Larger-or-equal endpoint.
    pub fn high(&self) -> NodeId {
        self.high
    }

    /// True when both endpoints are the same node.
    pub fn is_self_loop(&self) -> bool {
        self.low == self.high
    }
}

impl fmt::Display for NodePairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.low, self.high)
    }
}

impl Serialize for NodePairId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A witness-specific transition between two consecutive readings.
///
/// Links are never deduplicated. Two witnesses producing the same transition
/// yield two links sharing `node_pair_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    /// Witness-scoped identifier, `"{siglum}:{level}"` of the source cell.
    pub id: String,
    /// Witness siglum that produced this link.
    pub siglum: String,
    /// Witness colour.
    pub colour: String,
    /// Source reading.
    pub source: NodeId,
    /// Target reading.
    pub target: NodeId,
    /// Canonical unordered endpoint key.
    pub node_pair_id: NodePairId,
    /// Arc bend in [-1, 1]. `None` renders straight.
    pub curvature: Option<f64>,
}

impl Link {
    /// Create a straight link for a witness transition starting at `level`.
    pub fn new(
        siglum: impl Into<String>,
        colour: impl Into<String>,
        level: usize,
        source: NodeId,
        target: NodeId,
    ) -> Self {
        let siglum = siglum.into();
        Self {
            id: format!("{}:{}", siglum, level),
            siglum,
            colour: colour.into(),
            source,
            target,
            node_pair_id: NodePairId::new(source, target),
            curvature: None,
        }
    }

    /// True when source and target are the same node.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// The endpoint opposite `node`, if `node` is an endpoint.
    pub fn other_end(&self, node: NodeId) -> Option<NodeId> {
        if node == self.source {
            Some(self.target)
        } else if node == self.target {
            Some(self.source)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_pair_id_is_unordered() {
        let a = NodeId::new(7);
        let b = NodeId::new(3);

        assert_eq!(NodePairId::new(a, b), NodePairId::new(b, a));
        assert_eq!(NodePairId::new(a, b).low(), b);
        assert_eq!(NodePairId::new(a, b).to_string(), "3_7");
    }

    #[test]
    fn test_link_id_is_witness_scoped() {
        let link = Link::new("W1", "#fff", 12, NodeId::new(1), NodeId::new(2));
        assert_eq!(link.id, "W1:12");
        assert!(link.curvature.is_none());
        assert!(!link.is_self_loop());
    }

    #[test]
    fn test_other_end() {
        let link = Link::new("W1", "#fff", 0, NodeId::new(1), NodeId::new(2));
        assert_eq!(link.other_end(NodeId::new(1)), Some(NodeId::new(2)));
        assert_eq!(link.other_end(NodeId::new(2)), Some(NodeId::new(1)));
        assert_eq!(link.other_end(NodeId::new(9)), None);
    }
}
