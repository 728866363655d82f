//! Graph construction from a loaded collation.
//!
//! ## Links
//!
//! Each witness contributes one link per readable cell that has a readable
//! successor. Gaps are bridged: the successor is the nearest following cell
//! with a reading. The last readable cell has no outgoing link.
//!
//! ## Nodes
//!
//! One node per distinct text, visited level by level in tally order. Ids are
//! global, so a text recurring at a later level lands on the existing node:
//! the node keeps the occurrence count of its first level and takes the
//! later level.

use crate::graph::{BuiltGraph, GraphArena, IntegrityError};
use crate::identity::{IdentityScheme, IdentityTable};
use crate::loader::Collation;
use crate::types::{Link, Node};

/// Builds nodes and links from a [`Collation`].
#[derive(Debug)]
pub struct GraphBuilder {
    table: IdentityTable,
}

impl GraphBuilder {
    /// Create a builder for an identity scheme.
    pub fn new(scheme: IdentityScheme) -> Self {
        Self::with_table(IdentityTable::new(scheme))
    }

    /// Create a builder around an existing identity table.
    pub fn with_table(table: IdentityTable) -> Self {
        Self { table }
    }

    /// Build the node set and link list.
    ///
    /// Fails if a link endpoint has no node, which a consistent collation
    /// never produces.
    pub fn build(mut self, collation: &Collation) -> Result<BuiltGraph, IntegrityError> {
        let sigla = collation.witnesses.iter().map(|w| w.siglum.clone()).collect();
        let mut arena = GraphArena::new(sigla);

        for (level, tally) in collation.levels.iter().enumerate() {
            for (text, count) in tally.iter() {
                let id = self.table.id_of(text);
                match arena.node_mut(id) {
                    Some(node) => node.level = level,
                    None => arena.insert_node(Node::new(id, text, count, level)),
                }
            }
        }

        for witness in &collation.witnesses {
            for level in 0..witness.len().saturating_sub(1) {
                let Some(current) = witness.reading(level) else {
                    continue;
                };
                let Some((_, next)) = witness.next_reading(level) else {
                    continue;
                };

                let source = self.table.id_of(current);
                let target = self.table.id_of(next);
                let link = Link::new(&witness.siglum, &witness.colour, level, source, target);

                for (id, text) in [(source, current), (target, next)] {
                    if !arena.contains_node(id) {
                        return Err(IntegrityError::UnknownReading {
                            link: link.id,
                            id,
                            text: text.to_string(),
                        });
                    }
                }
                arena.push_link(link);
            }
        }

        tracing::debug!(
            nodes = arena.node_count(),
            links = arena.link_count(),
            collisions = self.table.collisions().len(),
            "graph built"
        );

        Ok(BuiltGraph {
            arena,
            collisions: self.table.collisions().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GraphConfig;
    use crate::identity::IdentityHasher;
    use crate::loader::CollationLoader;
    use crate::types::{LevelTally, NodeId, Witness};

    fn collation(rows: Vec<Vec<&str>>) -> Collation {
        CollationLoader::new(&GraphConfig::default()).load(rows).unwrap()
    }

    fn build(rows: Vec<Vec<&str>>) -> BuiltGraph {
        GraphBuilder::new(IdentityScheme::Interned)
            .build(&collation(rows))
            .unwrap()
    }

    fn text_pairs(graph: &BuiltGraph) -> Vec<(String, String, String)> {
        graph
            .links()
            .iter()
            .map(|l| {
                (
                    l.siglum.clone(),
                    graph.node(l.source).unwrap().text.clone(),
                    graph.node(l.target).unwrap().text.clone(),
                )
            })
            .collect()
    }

    #[test]
    fn test_gap_bridging() {
        let graph = build(vec![
            vec!["W1", "the", "quick", "fox"],
            vec!["W2", "the", "", "fox"],
        ]);

        let pairs = text_pairs(&graph);
        let expected = vec![
            ("W1".into(), "the".into(), "quick".into()),
            ("W1".into(), "quick".into(), "fox".into()),
            ("W2".into(), "the".into(), "fox".into()),
        ];
        assert_eq!(pairs, expected);

        let counts: Vec<_> = graph
            .nodes()
            .iter()
            .map(|n| (n.text.as_str(), n.occurrence_count))
            .collect();
        assert_eq!(counts, vec![("the", 2), ("quick", 1), ("fox", 2)]);
    }

    #[test]
    fn test_trailing_and_leading_gaps() {
        let graph = build(vec![vec!["W1", "", "a", "", "b", "", ""]]);

        assert_eq!(graph.link_count(), 1);
        assert_eq!(graph.links()[0].id, "W1:1");
    }

    #[test]
    fn test_all_gap_witness_has_no_links() {
        let graph = build(vec![vec!["W1", "a", "b"], vec!["W2", "", ""]]);
        assert!(graph.links().iter().all(|l| l.siglum == "W1"));
    }

    #[test]
    fn test_links_are_not_deduplicated() {
        let graph = build(vec![vec!["W1", "cat", "dog"], vec!["W2", "cat", "dog"]]);

        assert_eq!(graph.link_count(), 2);
        assert_eq!(graph.links()[0].node_pair_id, graph.links()[1].node_pair_id);
        assert_ne!(graph.links()[0].id, graph.links()[1].id);
    }

    #[test]
    fn test_repeated_reading_is_self_loop() {
        let graph = build(vec![vec!["W1", "very", "very"]]);

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.link_count(), 1);
        assert!(graph.links()[0].is_self_loop());
    }

    #[test]
    fn test_cross_level_text_collapses() {
        let graph = build(vec![
            vec!["W1", "and", "then", "and"],
            vec!["W2", "and", "so", "x"],
        ]);

        let and = graph.nodes().iter().find(|n| n.text == "and").unwrap();
        assert_eq!(graph.nodes().iter().filter(|n| n.text == "and").count(), 1);
        assert_eq!(and.occurrence_count, 2);
        assert_eq!(and.level, 2);
    }

    #[test]
    fn test_node_levels() {
        let graph = build(vec![vec!["W1", "a", "b", "c"]]);
        let levels: Vec<_> = graph.nodes().iter().map(|n| n.level).collect();
        assert_eq!(levels, vec![0, 1, 2]);
    }

    struct Constant;

    impl IdentityHasher for Constant {
        fn id_of(&mut self, _text: &str) -> NodeId {
            NodeId::new(1)
        }
    }

    #[test]
    fn test_collisions_are_reported() {
        let table = IdentityTable::with_hasher(Box::new(Constant));
        let graph = GraphBuilder::with_table(table)
            .build(&collation(vec![vec!["W1", "a", "b"]]))
            .unwrap();

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.collisions().len(), 1);
        assert!(graph.links()[0].is_self_loop());
    }

    #[test]
    fn test_inconsistent_collation_is_rejected() {
        // Tally that omits a reading the witness carries.
        let collation = Collation {
            witnesses: vec![Witness::new(
                "W1",
                "#000",
                vec![Some("a".to_string()), Some("b".to_string())],
            )],
            levels: {
                let mut t = LevelTally::new();
                t.record("a");
                vec![t, LevelTally::new()]
            },
        };

        let err = GraphBuilder::new(IdentityScheme::Xxh64)
            .build(&collation)
            .unwrap_err();
        assert!(matches!(err, IntegrityError::UnknownReading { ref text, .. } if text == "b"));
    }
}
