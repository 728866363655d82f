//! Renderer-facing export document.
//!
//! The renderer consumes plain records: node ids as integers, links by their
//! witness-scoped id, and keys in camelCase. `curvature` is omitted for
//! straight links.

use serde::Serialize;

use crate::config::GraphConfig;
use crate::graph::{GraphArena, GraphModel};
use crate::types::{Link, Node};

/// A node as seen by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeExport {
    /// Node id.
    pub id: u64,
    /// Reading text.
    pub text: String,
    /// Occurrence count at the first level.
    pub occurrence_count: usize,
    /// Level.
    pub level: usize,
    /// Neighbor node ids.
    pub neighbors: Vec<u64>,
    /// Incident link ids.
    pub incident_links: Vec<String>,
}

impl NodeExport {
    pub(crate) fn from_node(node: &Node, arena: &GraphArena) -> Self {
        Self {
            id: node.id.as_u64(),
            text: node.text.clone(),
            occurrence_count: node.occurrence_count,
            level: node.level,
            neighbors: node.neighbors.iter().map(|n| n.as_u64()).collect(),
            incident_links: node
                .incident_links
                .iter()
                .filter_map(|i| arena.link(*i))
                .map(|l| l.id.clone())
                .collect(),
        }
    }
}

/// A link as seen by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkExport {
    /// Witness-scoped id.
    pub id: String,
    /// Witness siglum.
    pub siglum: String,
    /// Witness colour.
    pub colour: String,
    /// Source node id.
    pub source: u64,
    /// Target node id.
    pub target: u64,
    /// Unordered endpoint key.
    pub node_pair_id: String,
    /// Arc bend, absent for straight links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curvature: Option<f64>,
}

impl From<&Link> for LinkExport {
    fn from(link: &Link) -> Self {
        Self {
            id: link.id.clone(),
            siglum: link.siglum.clone(),
            colour: link.colour.clone(),
            source: link.source.as_u64(),
            target: link.target.as_u64(),
            node_pair_id: link.node_pair_id.to_string(),
            curvature: link.curvature,
        }
    }
}

/// The complete export document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphExport {
    /// Export schema version.
    pub schema_version: String,
    /// Hash of the build config.
    pub config_hash: String,
    /// Hash of `nodes` and `links`.
    pub fingerprint: String,
    /// Witness sigla in row order.
    pub sigla: Vec<String>,
    /// Nodes.
    pub nodes: Vec<NodeExport>,
    /// Links.
    pub links: Vec<LinkExport>,
}

impl GraphExport {
    /// Build the export for a model built with `config`.
    pub fn new(model: &GraphModel, config: &GraphConfig) -> Result<Self, serde_json::Error> {
        Ok(Self {
            schema_version: crate::GRAPH_SCHEMA_VERSION.to_string(),
            config_hash: config.config_hash()?,
            fingerprint: model.fingerprint()?,
            sigla: model.sigla().to_vec(),
            nodes: model.node_exports(),
            links: model.link_exports(),
        })
    }

    /// Serialize as pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::IdentityScheme;
    use crate::pipeline::Pipeline;

    #[test]
    fn test_export_shape() {
        let config = GraphConfig::default().with_identity(IdentityScheme::Interned);
        let model = Pipeline::new(config.clone())
            .unwrap()
            .build_rows(vec![vec!["W1", "cat", "dog"], vec!["W2", "cat", "dog"]])
            .unwrap();
        let export = GraphExport::new(&model, &config).unwrap();
        let json: serde_json::Value = serde_json::from_str(&export.to_json_pretty().unwrap()).unwrap();

        assert_eq!(json["schemaVersion"], crate::GRAPH_SCHEMA_VERSION);
        assert_eq!(json["nodes"][0]["occurrenceCount"], 2);
        assert_eq!(json["nodes"][0]["incidentLinks"][0], "W1:0");
        assert_eq!(json["links"][0]["nodePairId"], "0_1");
        assert_eq!(json["links"][1]["curvature"], 0.1);
        assert_eq!(json["links"][0]["colour"], "#a6cee3");
    }

    #[test]
    fn test_straight_links_omit_curvature() {
        let config = GraphConfig::default();
        let model = Pipeline::new(config.clone())
            .unwrap()
            .build_rows(vec![vec!["W1", "a", "b"]])
            .unwrap();
        let json = serde_json::to_value(GraphExport::new(&model, &config).unwrap()).unwrap();

        assert!(json["links"][0].get("curvature").is_none());
    }
}
