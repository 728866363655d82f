//! Build pipeline.
//!
//! Runs the phases in order and stops at the first failure; no partial graph
//! is ever returned.
//!
//! ```text
//! rows → CollationLoader → GraphBuilder → CurvatureAssigner → AdjacencyIndexer → GraphModel
//! ```

use std::path::Path;

use crate::adjacency::AdjacencyIndexer;
use crate::builder::GraphBuilder;
use crate::config::{ConfigError, GraphConfig};
use crate::curvature::CurvatureAssigner;
use crate::graph::{GraphModel, IntegrityError};
use crate::loader::{CollationLoader, LoadError};
use crate::source::{self, SourceError};

/// Error type for building a graph.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Invalid configuration.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    /// Input could not be read.
    #[error("Load failure: {0}")]
    Source(#[from] SourceError),
    /// Rows do not form a rectangular collation.
    #[error("Shape failure: {0}")]
    Shape(#[from] LoadError),
    /// The graph is internally inconsistent.
    #[error("Integrity failure: {0}")]
    Integrity(#[from] IntegrityError),
}

/// Runs load → build → curvature → adjacency with one config.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: GraphConfig,
}

impl Pipeline {
    /// Create a pipeline, validating `config`.
    pub fn new(config: GraphConfig) -> Result<Self, BuildError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The config in use.
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Build from a delimited file.
    pub fn build_file(&self, path: impl AsRef<Path>) -> Result<GraphModel, BuildError> {
        let rows = source::read_rows(path, self.config.delimiter)?;
        self.build_rows(rows)
    }

    /// Build from delimited text.
    pub fn build_text(&self, text: &str) -> Result<GraphModel, BuildError> {
        let rows = source::parse_delimited(text, self.config.delimiter)?;
        self.build_rows(rows)
    }

    /// Build from rows of strings.
    pub fn build_rows<R, S>(&self, rows: R) -> Result<GraphModel, BuildError>
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let span = tracing::info_span!("build_graph", identity = %self.config.identity);
        let _enter = span.enter();

        let collation = CollationLoader::new(&self.config).load(rows)?;
        let built = GraphBuilder::new(self.config.identity).build(&collation)?;
        let curved = CurvatureAssigner::new(&self.config.curvature).assign(built);
        let model = AdjacencyIndexer::new().index(curved)?;
        model.check_adjacency()?;

        let stats = model.curvature_stats();
        tracing::info!(
            witnesses = collation.witnesses.len(),
            levels = collation.level_count(),
            nodes = model.node_count(),
            links = model.link_count(),
            self_loop_groups = stats.self_loop_groups,
            parallel_groups = stats.parallel_groups,
            collisions = model.collisions().len(),
            "collation graph ready"
        );

        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = GraphConfig::default();
        config.palette.clear();
        assert!(matches!(Pipeline::new(config), Err(BuildError::Config(_))));
    }

    #[test]
    fn test_build_text_with_custom_delimiter() {
        let pipeline = Pipeline::new(GraphConfig::default().with_delimiter(';')).unwrap();
        let model = pipeline.build_text("W1;a;b\nW2;a;c\n").unwrap();

        assert_eq!(model.node_count(), 3);
        assert_eq!(model.link_count(), 2);
        assert_eq!(model.sigla(), &["W1".to_string(), "W2".to_string()]);
    }

    #[test]
    fn test_ragged_text_is_shape_failure() {
        let pipeline = Pipeline::new(GraphConfig::default()).unwrap();
        let err = pipeline.build_text("W1,a,b\nW2,a\n").unwrap_err();
        assert!(matches!(err, BuildError::Shape(LoadError::RaggedRow { row: 1, .. })));
    }

    #[test]
    fn test_missing_file_is_load_failure() {
        let pipeline = Pipeline::new(GraphConfig::default()).unwrap();
        let err = pipeline.build_file("/nonexistent/collation.csv").unwrap_err();
        assert!(matches!(err, BuildError::Source(SourceError::Io { .. })));
    }
}
