//! Collation loader.
//!
//! Turns rows of strings into witnesses and per-level reading tallies.
//! Row layout: `row[0]` is the siglum, `row[1..]` are reading cells, and an
//! empty string is a gap. Every row must carry the same number of cells and
//! a siglum no earlier row uses, since link ids are scoped by siglum.

use std::collections::BTreeMap;

use crate::config::GraphConfig;
use crate::types::{LevelTally, Witness};

/// Error type for loading rows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// A row has no cells at all.
    #[error("Row {row} has no siglum")]
    MissingSiglum {
        /// 0-based row index.
        row: usize,
    },
    /// A row's cell count differs from the first row's.
    #[error("Row {row} has {found} reading cells, expected {expected}")]
    RaggedRow {
        /// 0-based row index.
        row: usize,
        /// Cell count of row 0.
        expected: usize,
        /// Cell count of this row.
        found: usize,
    },
    /// A row reuses the siglum of an earlier row.
    #[error("Row {row} repeats siglum {siglum:?} from row {first}")]
    DuplicateSiglum {
        /// 0-based row index.
        row: usize,
        /// Row that first used the siglum.
        first: usize,
        /// The repeated siglum.
        siglum: String,
    },
}

/// Loaded collation: witnesses plus distinct readings per level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collation {
    /// Witnesses in row order.
    pub witnesses: Vec<Witness>,
    /// One tally per level.
    pub levels: Vec<LevelTally>,
}

impl Collation {
    /// Number of levels (reading columns).
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Sigla in row order.
    pub fn sigla(&self) -> Vec<&str> {
        self.witnesses.iter().map(|w| w.siglum.as_str()).collect()
    }
}

/// Loads rows into a [`Collation`].
#[derive(Debug, Clone)]
pub struct CollationLoader<'a> {
    config: &'a GraphConfig,
}

impl<'a> CollationLoader<'a> {
    /// Create a loader using `config` for witness colours.
    pub fn new(config: &'a GraphConfig) -> Self {
        Self { config }
    }

    /// Load rows.
    ///
    /// An empty row list yields an empty collation.
    pub fn load<R, S>(&self, rows: R) -> Result<Collation, LoadError>
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut witnesses: Vec<Witness> = Vec::new();
        let mut expected: Option<usize> = None;
        let mut seen: BTreeMap<String, usize> = BTreeMap::new();

        for (row, cells) in rows.into_iter().enumerate() {
            let mut cells = cells.into_iter().map(Into::<String>::into);
            let siglum = cells.next().ok_or(LoadError::MissingSiglum { row })?;
            if let Some(&first) = seen.get(&siglum) {
                return Err(LoadError::DuplicateSiglum { row, first, siglum });
            }
            seen.insert(siglum.clone(), row);
            let readings: Vec<Option<String>> = cells
                .map(|cell| if cell.is_empty() { None } else { Some(cell) })
                .collect();

            let width = *expected.get_or_insert(readings.len());
            if width != readings.len() {
                return Err(LoadError::RaggedRow {
                    row,
                    expected: width,
                    found: readings.len(),
                });
            }

            let colour = self.config.colour_for(row).to_string();
            witnesses.push(Witness::new(siglum, colour, readings));
        }

        let level_count = expected.unwrap_or(0);
        let mut levels = vec![LevelTally::new(); level_count];
        for (n, tally) in levels.iter_mut().enumerate() {
            for witness in &witnesses {
                if let Some(text) = witness.reading(n) {
                    tally.record(text);
                }
            }
        }

        tracing::debug!(
            witnesses = witnesses.len(),
            levels = level_count,
            "collation loaded"
        );

        Ok(Collation { witnesses, levels })
    }
}
