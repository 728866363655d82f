//! Build configuration.
//!
//! All fields default, so an empty JSON object `{}` is a valid config.
//! `config_hash` is computed over the canonical JSON form and is carried in
//! the export so two exports can be compared for the same build settings.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::canonical::canonical_hash_hex;
use crate::identity::IdentityScheme;

/// Qualitative nine-colour palette assigned to witnesses in row order.
pub const DEFAULT_PALETTE: [&str; 9] = [
    "#a6cee3", "#1f78b4", "#b2df8a", "#33a02c", "#fb9a99", "#e31a1c", "#fdbf6f", "#ff7f00",
    "#cab2d6",
];

/// Error type for configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Palette has no colours.
    #[error("Palette must contain at least one colour")]
    EmptyPalette,
    /// Curvature spread outside (0, 1).
    #[error("Curvature spread must be in (0, 1), got {0}")]
    InvalidSpread(f64),
    /// Self-loop ceiling not above the spread or above 1.
    #[error("Self-loop curvature max must be in (spread, 1], got {max} with spread {spread}")]
    InvalidSelfLoopMax {
        /// Configured ceiling.
        max: f64,
        /// Configured spread.
        spread: f64,
    },
    /// Config file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// Config path.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Config file is not valid JSON for this schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Curvature constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurvatureConfig {
    /// Magnitude bound for parallel cross links, and the lowest self-loop bend.
    pub spread: f64,
    /// Bend of the last self-loop in a group.
    pub self_loop_max: f64,
}

impl Default for CurvatureConfig {
    fn default() -> Self {
        Self {
            spread: 0.1,
            self_loop_max: 1.0,
        }
    }
}

/// Graph build configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// How reading texts become node ids.
    pub identity: IdentityScheme,
    /// Witness colours, assigned by row index modulo length.
    pub palette: Vec<String>,
    /// Curvature constants.
    pub curvature: CurvatureConfig,
    /// Field delimiter for delimited input.
    pub delimiter: char,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            identity: IdentityScheme::default(),
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            curvature: CurvatureConfig::default(),
            delimiter: ',',
        }
    }
}

impl GraphConfig {
    /// Load a config from a JSON file and validate it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Parse a config from JSON and validate it.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Builder: set the identity scheme.
    pub fn with_identity(mut self, identity: IdentityScheme) -> Self {
        self.identity = identity;
        self
    }

    /// Builder: set the input delimiter.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Check invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        let spread = self.curvature.spread;
        if !(spread > 0.0 && spread < 1.0) {
            return Err(ConfigError::InvalidSpread(spread));
        }
        let max = self.curvature.self_loop_max;
        if !(max > spread && max <= 1.0) {
            return Err(ConfigError::InvalidSelfLoopMax { max, spread });
        }
        Ok(())
    }

    /// Colour for the witness at `index`.
    pub fn colour_for(&self, index: usize) -> &str {
        if self.palette.is_empty() {
            return DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()];
        }
        &self.palette[index % self.palette.len()]
    }

    /// Canonical hash of these settings.
    pub fn config_hash(&self) -> Result<String, serde_json::Error> {
        canonical_hash_hex(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let config = GraphConfig::from_json("{}").unwrap();
        assert_eq!(config, GraphConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let config =
            GraphConfig::from_json(r#"{"identity": "interned", "curvature": {"spread": 0.2}}"#).unwrap();
        assert_eq!(config.identity, IdentityScheme::Interned);
        assert_eq!(config.curvature.spread, 0.2);
        assert_eq!(config.curvature.self_loop_max, 1.0);
        assert_eq!(config.delimiter, ',');
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = GraphConfig::default();
        config.palette.clear();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyPalette)));

        let mut config = GraphConfig::default();
        config.curvature.spread = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidSpread(_))));

        let mut config = GraphConfig::default();
        config.curvature.self_loop_max = 0.05;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidSelfLoopMax { .. })));
    }

    #[test]
    fn test_palette_wraps() {
        let config = GraphConfig::default();
        assert_eq!(config.colour_for(0), "#a6cee3");
        assert_eq!(config.colour_for(9), "#a6cee3");
        assert_eq!(config.colour_for(10), "#1f78b4");
    }

    #[test]
    fn test_config_hash_tracks_changes() {
        let base = GraphConfig::default();
        let other = GraphConfig::default().with_identity(IdentityScheme::Interned);

        assert_eq!(base.config_hash().unwrap(), GraphConfig::default().config_hash().unwrap());
        assert_ne!(base.config_hash().unwrap(), other.config_hash().unwrap());
    }
}
