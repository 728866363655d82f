//! Hover-driven highlight sets.
//!
//! The renderer reports hover events through [`HoverHandler`] and reads the
//! resulting [`Highlight`] each frame. Every event recomputes both sets from
//! scratch. Empty sets mean "no filter, show everything".

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::graph::GraphModel;
use crate::types::{LinkIndex, NodeId};

/// Error type for hover events naming entities outside the graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InteractionError {
    /// Hovered node id is not in the graph.
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),
    /// Hovered link index is not in the graph.
    #[error("Unknown link: {0}")]
    UnknownLink(LinkIndex),
}

/// Highlighted nodes and links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlight {
    /// Highlighted node ids.
    pub nodes: BTreeSet<NodeId>,
    /// Highlighted link indices.
    pub links: BTreeSet<LinkIndex>,
}

impl Highlight {
    /// True when nothing is highlighted.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }

    /// Empty both sets.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.links.clear();
    }
}

/// Highlight for a hovered node: the node, its neighbors, its incident links.
pub fn node_highlight(graph: &GraphModel, id: NodeId) -> Result<Highlight, InteractionError> {
    let node = graph.node(id).ok_or(InteractionError::UnknownNode(id))?;
    let mut highlight = Highlight::default();

    highlight.nodes.insert(node.id);
    highlight.nodes.extend(node.neighbors.iter().copied());
    highlight.links.extend(node.incident_links.iter().copied());
    Ok(highlight)
}

/// Highlight for a hovered link: the whole path of its witness.
///
/// Includes every link sharing the siglum, both endpoints of the hovered
/// link, and every node with an incident link sharing the siglum.
pub fn link_highlight(graph: &GraphModel, index: LinkIndex) -> Result<Highlight, InteractionError> {
    let link = graph.link(index).ok_or(InteractionError::UnknownLink(index))?;
    let mut highlight = Highlight::default();

    highlight.links.insert(index);
    highlight
        .links
        .extend(graph.links_for_siglum(&link.siglum).map(|(i, _)| i));

    highlight.nodes.insert(link.source);
    highlight.nodes.insert(link.target);
    for node in graph.nodes() {
        let on_path = node.incident_links.iter().any(|i| {
            graph
                .link(*i)
                .map(|other| other.siglum == link.siglum)
                .unwrap_or(false)
        });
        if on_path {
            highlight.nodes.insert(node.id);
        }
    }
    Ok(highlight)
}

/// Hover callbacks invoked by the renderer.
pub trait HoverHandler {
    /// Error type for hover events.
    type Error;

    /// A node gained hover, or hover left all nodes (`None`).
    fn on_node_hover(&mut self, node: Option<NodeId>) -> Result<(), Self::Error>;

    /// A link gained hover, or hover left all links (`None`).
    fn on_link_hover(&mut self, link: Option<LinkIndex>) -> Result<(), Self::Error>;
}

/// What the pointer is currently over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hovered {
    /// A node.
    Node(NodeId),
    /// A link.
    Link(LinkIndex),
}

/// Highlight state owned by the interaction layer.
#[derive(Debug, Clone)]
pub struct InteractionState {
    graph: Arc<GraphModel>,
    hovered: Option<Hovered>,
    highlight: Highlight,
}

impl InteractionState {
    /// Create state over a finished graph with nothing highlighted.
    pub fn new(graph: Arc<GraphModel>) -> Self {
        Self {
            graph,
            hovered: None,
            highlight: Highlight::default(),
        }
    }

    /// The graph being explored.
    pub fn graph(&self) -> &GraphModel {
        &self.graph
    }

    /// Current highlight sets.
    pub fn highlight(&self) -> &Highlight {
        &self.highlight
    }

    /// Entity under the pointer, if any.
    pub fn hovered(&self) -> Option<Hovered> {
        self.hovered
    }

    /// True when any highlight filter is active.
    pub fn has_active_highlight(&self) -> bool {
        !self.highlight.is_empty()
    }

    /// True when `id` is highlighted.
    pub fn is_node_highlighted(&self, id: NodeId) -> bool {
        self.highlight.nodes.contains(&id)
    }

    /// True when `index` is highlighted.
    pub fn is_link_highlighted(&self, index: LinkIndex) -> bool {
        self.highlight.links.contains(&index)
    }

    fn reset(&mut self) {
        self.hovered = None;
        self.highlight.clear();
    }
}

impl HoverHandler for InteractionState {
    type Error = InteractionError;

    fn on_node_hover(&mut self, node: Option<NodeId>) -> Result<(), InteractionError> {
        self.reset();
        if let Some(id) = node {
            self.highlight = node_highlight(&self.graph, id)?;
            self.hovered = Some(Hovered::Node(id));
        }
        Ok(())
    }

    fn on_link_hover(&mut self, link: Option<LinkIndex>) -> Result<(), InteractionError> {
        self.reset();
        if let Some(index) = link {
            self.highlight = link_highlight(&self.graph, index)?;
            self.hovered = Some(Hovered::Link(index));
        }
        Ok(())
    }
}
