//! Adjacency indexing.
//!
//! Every link is recorded on both endpoints: each endpoint lists the other as
//! a neighbor and lists the link as incident. Nothing is deduplicated, so a
//! self-loop lists its own node twice and itself twice.

use crate::graph::{CurvedGraph, GraphModel, IntegrityError};

/// Fills node adjacency and seals the graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdjacencyIndexer;

impl AdjacencyIndexer {
    /// Create an indexer.
    pub fn new() -> Self {
        Self
    }

    /// Index adjacency and return the final model.
    pub fn index(&self, graph: CurvedGraph) -> Result<GraphModel, IntegrityError> {
        let CurvedGraph {
            mut arena,
            collisions,
            stats,
        } = graph;

        let endpoints: Vec<_> = arena
            .indexed_links()
            .map(|(index, link)| (index, link.id.clone(), link.source, link.target))
            .collect();

        for (index, link_id, source, target) in endpoints {
            for id in [source, target] {
                if !arena.contains_node(id) {
                    return Err(IntegrityError::MissingEndpoint { link: link_id, id });
                }
            }
            for (end, other) in [(source, target), (target, source)] {
                if let Some(node) = arena.node_mut(end) {
                    node.neighbors.push(other);
                    node.incident_links.push(index);
                }
            }
        }

        tracing::debug!(
            nodes = arena.node_count(),
            links = arena.link_count(),
            "adjacency indexed"
        );

        Ok(GraphModel::from_parts(arena, collisions, stats))
    }
}
