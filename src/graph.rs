//! Graph arena and the build phase snapshots.
//!
//! The graph is built in three sequential phases, each consuming the previous
//! snapshot by value:
//!
//! ```text
//! GraphBuilder → BuiltGraph → CurvatureAssigner → CurvedGraph → AdjacencyIndexer → GraphModel
//! ```
//!
//! Nodes and links live in arenas. Adjacency is stored as `NodeId` and
//! `LinkIndex` values, never as references between nodes and links.

use std::collections::BTreeMap;
use std::ops::Deref;

use crate::canonical::canonical_hash_hex;
use crate::export::{LinkExport, NodeExport};
use crate::identity::Collision;
use crate::types::{Link, LinkIndex, Node, NodeId};

/// Integrity failures detected while building the graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntegrityError {
    /// A link endpoint was produced from a reading that has no node.
    #[error("Link {link} references reading {text:?} (id {id}) absent from the node set")]
    UnknownReading {
        /// Link id.
        link: String,
        /// Endpoint id.
        id: NodeId,
        /// Reading text that produced the id.
        text: String,
    },
    /// A link endpoint id is absent from the node set.
    #[error("Link {link} references node {id} absent from the node set")]
    MissingEndpoint {
        /// Link id.
        link: String,
        /// Endpoint id.
        id: NodeId,
    },
    /// An endpoint does not list the other endpoint or the link after indexing.
    #[error("Adjacency of link {link} is not symmetric")]
    AsymmetricAdjacency {
        /// Link id.
        link: String,
    },
}

/// Node and link storage shared by all phases.
#[derive(Debug, Clone, Default)]
pub struct GraphArena {
    nodes: Vec<Node>,
    slots: BTreeMap<NodeId, usize>,
    links: Vec<Link>,
    sigla: Vec<String>,
}

impl GraphArena {
    pub(crate) fn new(sigla: Vec<String>) -> Self {
        Self {
            sigla,
            ..Self::default()
        }
    }

    /// All nodes in construction order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All links in construction order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Witness sigla in row order.
    pub fn sigla(&self) -> &[String] {
        &self.sigla
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(&id).map(|&slot| &self.nodes[slot])
    }

    /// Look up a link by arena index.
    pub fn link(&self, index: LinkIndex) -> Option<&Link> {
        self.links.get(index.get())
    }

    /// Find a link by its witness-scoped id.
    pub fn link_by_id(&self, id: &str) -> Option<(LinkIndex, &Link)> {
        self.indexed_links().find(|(_, l)| l.id == id)
    }

    /// Iterate links with their arena indices.
    pub fn indexed_links(&self) -> impl Iterator<Item = (LinkIndex, &Link)> {
        self.links
            .iter()
            .enumerate()
            .map(|(i, l)| (LinkIndex::new(i), l))
    }

    /// True when a node with `id` exists.
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of links.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        match self.slots.get(&id) {
            Some(&slot) => self.nodes.get_mut(slot),
            None => None,
        }
    }

    pub(crate) fn insert_node(&mut self, node: Node) {
        self.slots.insert(node.id, self.nodes.len());
        self.nodes.push(node);
    }

    pub(crate) fn push_link(&mut self, link: Link) -> LinkIndex {
        self.links.push(link);
        LinkIndex::new(self.links.len() - 1)
    }

    pub(crate) fn links_mut(&mut self) -> &mut [Link] {
        &mut self.links
    }
}

/// Phase 1: nodes and straight links.
#[derive(Debug, Clone)]
pub struct BuiltGraph {
    pub(crate) arena: GraphArena,
    pub(crate) collisions: Vec<Collision>,
}

impl BuiltGraph {
    /// Identity collisions observed while building.
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }
}

impl Deref for BuiltGraph {
    type Target = GraphArena;

    fn deref(&self) -> &GraphArena {
        &self.arena
    }
}

/// Counts from the curvature pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CurvatureStats {
    /// Self-loop groups (every one receives curvature).
    pub self_loop_groups: usize,
    /// Cross groups with more than one link.
    pub parallel_groups: usize,
    /// Links left straight.
    pub straight_links: usize,
}

/// Phase 2: links carry curvature.
#[derive(Debug, Clone)]
pub struct CurvedGraph {
    pub(crate) arena: GraphArena,
    pub(crate) collisions: Vec<Collision>,
    pub(crate) stats: CurvatureStats,
}

impl CurvedGraph {
    /// Curvature pass counts.
    pub fn stats(&self) -> CurvatureStats {
        self.stats
    }
}

impl Deref for CurvedGraph {
    type Target = GraphArena;

    fn deref(&self) -> &GraphArena {
        &self.arena
    }
}

/// Final immutable graph handed to the renderer.
#[derive(Debug, Clone)]
pub struct GraphModel {
    arena: GraphArena,
    collisions: Vec<Collision>,
    stats: CurvatureStats,
}

impl GraphModel {
    pub(crate) fn from_parts(arena: GraphArena, collisions: Vec<Collision>, stats: CurvatureStats) -> Self {
        Self {
            arena,
            collisions,
            stats,
        }
    }

    /// Identity collisions observed while building.
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Curvature pass counts.
    pub fn curvature_stats(&self) -> CurvatureStats {
        self.stats
    }

    /// Neighbors of `id` (empty for unknown ids).
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.neighbors.as_slice()).unwrap_or(&[])
    }

    /// Incident link indices of `id` (empty for unknown ids).
    pub fn incident_links(&self, id: NodeId) -> &[LinkIndex] {
        self.node(id)
            .map(|n| n.incident_links.as_slice())
            .unwrap_or(&[])
    }

    /// Links produced by the witness `siglum`, in construction order.
    pub fn links_for_siglum<'a>(
        &'a self,
        siglum: &'a str,
    ) -> impl Iterator<Item = (LinkIndex, &'a Link)> + 'a {
        self.indexed_links().filter(move |(_, l)| l.siglum == siglum)
    }

    /// Re-check that every link is listed symmetrically on both endpoints.
    pub fn check_adjacency(&self) -> Result<(), IntegrityError> {
        for (index, link) in self.indexed_links() {
            for (end, other) in [(link.source, link.target), (link.target, link.source)] {
                let node = self.node(end).ok_or_else(|| IntegrityError::MissingEndpoint {
                    link: link.id.clone(),
                    id: end,
                })?;
                if !node.neighbors.contains(&other) || !node.incident_links.contains(&index) {
                    return Err(IntegrityError::AsymmetricAdjacency {
                        link: link.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Renderer-facing node records.
    pub fn node_exports(&self) -> Vec<NodeExport> {
        self.nodes()
            .iter()
            .map(|node| NodeExport::from_node(node, &self.arena))
            .collect()
    }

    /// Renderer-facing link records.
    pub fn link_exports(&self) -> Vec<LinkExport> {
        self.links().iter().map(LinkExport::from).collect()
    }

    /// Deterministic fingerprint over the exported nodes and links.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        canonical_hash_hex(&(self.node_exports(), self.link_exports()))
    }
}

impl Deref for GraphModel {
    type Target = GraphArena;

    fn deref(&self) -> &GraphArena {
        &self.arena
    }
}
