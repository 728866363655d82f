//! Curvature assignment for parallel links and self-loops.
//!
//! Links are grouped by [`NodePairId`] in insertion order and split into two
//! families.
//!
//! ## Self-loops
//!
//! A group of `n` loops on one node: the last gets `self_loop_max`, the
//! others are spaced evenly from `spread` up to (excluding) `self_loop_max`.
//! A lone loop still gets `self_loop_max`.
//!
//! ## Cross links
//!
//! Only groups with more than one link bend. The last link is the reference
//! and gets `spread`; link `i` gets `-spread + i * 2 * spread / (n - 1)`,
//! negated when its source differs from the reference's source. Curvature is
//! relative to link direction, so the flip makes opposite-direction links bow
//! to opposite sides. A zero (straight) member is never negated.

use std::collections::HashMap;

use crate::config::CurvatureConfig;
use crate::graph::{BuiltGraph, CurvatureStats, CurvedGraph};
use crate::types::{Link, LinkIndex, NodePairId};

/// Links grouped by endpoint pair, each family in first-seen group order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkGroups {
    /// Self-loop groups.
    pub self_loops: Vec<(NodePairId, Vec<LinkIndex>)>,
    /// Groups between two distinct nodes.
    pub cross: Vec<(NodePairId, Vec<LinkIndex>)>,
}

impl LinkGroups {
    /// Group links by `node_pair_id`, keeping insertion order within groups.
    pub fn from_links(links: &[Link]) -> Self {
        let mut groups = Self::default();
        let mut loop_slots: HashMap<NodePairId, usize> = HashMap::new();
        let mut cross_slots: HashMap<NodePairId, usize> = HashMap::new();

        for (i, link) in links.iter().enumerate() {
            let (family, slots) = if link.is_self_loop() {
                (&mut groups.self_loops, &mut loop_slots)
            } else {
                (&mut groups.cross, &mut cross_slots)
            };
            let slot = *slots.entry(link.node_pair_id).or_insert_with(|| {
                family.push((link.node_pair_id, Vec::new()));
                family.len() - 1
            });
            family[slot].1.push(LinkIndex::new(i));
        }

        groups
    }
}

/// Curvatures for a self-loop group of size `n`, in group order.
pub fn self_loop_curvatures(n: usize, spread: f64, max: f64) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let last = n - 1;
    let delta = if last > 0 { (max - spread) / last as f64 } else { 0.0 };
    let mut values: Vec<f64> = (0..last).map(|i| spread + i as f64 * delta).collect();
    values.push(max);
    values
}

/// Unflipped curvatures for a cross group of size `n > 1`, in group order.
///
/// Returns an empty vector for `n < 2`; such groups stay straight.
pub fn cross_curvatures(n: usize, spread: f64) -> Vec<f64> {
    if n < 2 {
        return Vec::new();
    }
    let last = n - 1;
    let delta = 2.0 * spread / last as f64;
    let mut values: Vec<f64> = (0..last).map(|i| -spread + i as f64 * delta).collect();
    values.push(spread);
    values
}

/// Assigns link curvature.
#[derive(Debug, Clone)]
pub struct CurvatureAssigner {
    spread: f64,
    self_loop_max: f64,
}

impl CurvatureAssigner {
    /// Create an assigner from config.
    pub fn new(config: &CurvatureConfig) -> Self {
        Self {
            spread: config.spread,
            self_loop_max: config.self_loop_max,
        }
    }

    /// Assign curvature to every self-loop and every parallel cross link.
    pub fn assign(&self, graph: BuiltGraph) -> CurvedGraph {
        let BuiltGraph {
            mut arena,
            collisions,
        } = graph;
        let groups = LinkGroups::from_links(arena.links());
        let links = arena.links_mut();
        let mut stats = CurvatureStats::default();

        for (_, members) in &groups.self_loops {
            let values = self_loop_curvatures(members.len(), self.spread, self.self_loop_max);
            for (index, value) in members.iter().zip(values) {
                links[index.get()].curvature = Some(value);
            }
            stats.self_loop_groups += 1;
        }

        for (_, members) in &groups.cross {
            let Some(reference) = members.last() else {
                continue;
            };
            if members.len() < 2 {
                stats.straight_links += 1;
                continue;
            }
            let reference_source = links[reference.get()].source;
            let values = cross_curvatures(members.len(), self.spread);
            for (index, value) in members.iter().zip(values) {
                let link = &mut links[index.get()];
                let value = if link.source != reference_source && value != 0.0 {
                    -value
                } else {
                    value
                };
                link.curvature = Some(value);
            }
            stats.parallel_groups += 1;
        }

        tracing::debug!(
            self_loop_groups = stats.self_loop_groups,
            parallel_groups = stats.parallel_groups,
            straight_links = stats.straight_links,
            "curvature assigned"
        );

        CurvedGraph {
            arena,
            collisions,
            stats,
        }
    }
}

impl Default for CurvatureAssigner {
    fn default() -> Self {
        Self::new(&CurvatureConfig::default())
    }
}
