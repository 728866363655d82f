//! # collation-graph
//!
//! Deterministic variant graphs from textual collations.
//!
//! A collation table holds one row per witness and one column per alignment
//! level. This crate turns it into a graph for interactive exploration:
//! nodes are distinct readings, links are witness-specific transitions
//! between consecutive readings, and parallel links are separated by a
//! curvature value.
//!
//! ## Architecture
//!
//! ```text
//! rows → CollationLoader → GraphBuilder → CurvatureAssigner → AdjacencyIndexer → GraphModel
//!                               ↓                                                   ↓
//!                         IdentityTable                                   InteractionState
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Same rows + same config → identical `GraphModel::fingerprint`
//! - Link order is witness order, then level order
//! - Node order is level order, then first-seen order within a level
//! - Highlight sets are ordered (`BTreeSet`)
//!
//! ## Identity
//!
//! Node ids come from a fast non-cryptographic hash by default. Distinct
//! readings are expected, not guaranteed, to get distinct ids; collisions are
//! logged and listed on the model. Select [`IdentityScheme::Interned`] for
//! exact identity.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod identity;
pub mod config;
pub mod canonical;
pub mod source;
pub mod loader;
pub mod graph;
pub mod builder;
pub mod curvature;
pub mod adjacency;
pub mod interaction;
pub mod export;
pub mod pipeline;

// Re-exports
pub use types::{Witness, LevelTally, Node, NodeId, Link, LinkIndex, NodePairId};
pub use identity::{
    IdentityHasher, IdentityScheme, IdentityTable, Collision,
    Xxh64Hasher, Polynomial31Hasher, InternedHasher, polynomial31,
};
pub use config::{GraphConfig, CurvatureConfig, ConfigError, DEFAULT_PALETTE};
pub use canonical::{to_canonical_bytes, canonical_hash, canonical_hash_hex};
pub use source::{parse_delimited, read_rows, SourceError};
pub use loader::{Collation, CollationLoader, LoadError};
pub use graph::{GraphArena, BuiltGraph, CurvedGraph, GraphModel, CurvatureStats, IntegrityError};
pub use builder::GraphBuilder;
pub use curvature::{CurvatureAssigner, LinkGroups, self_loop_curvatures, cross_curvatures};
pub use adjacency::AdjacencyIndexer;
pub use interaction::{
    HoverHandler, InteractionState, InteractionError, Highlight, Hovered,
    node_highlight, link_highlight,
};
pub use export::{GraphExport, NodeExport, LinkExport};
pub use pipeline::{Pipeline, BuildError};

/// Schema version of the export document.
/// Increment on breaking changes to any exported type.
pub const GRAPH_SCHEMA_VERSION: &str = "1.0.0";
