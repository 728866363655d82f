//! Core types for the collation graph.

pub mod witness;
pub mod node;
pub mod link;

pub use witness::{Witness, LevelTally};
pub use node::{Node, NodeId};
pub use link::{Link, LinkIndex, NodePairId};
