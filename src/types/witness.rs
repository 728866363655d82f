//! Witness types: one aligned row of the collation.

use serde::{Deserialize, Serialize};

/// A textual witness: its siglum and one cell per level.
///
/// A cell is `None` for a gap (the witness has no reading at that level).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Witness {
    /// Short identifying code.
    pub siglum: String,
    /// Colour tag carried onto every link this witness produces.
    pub colour: String,
    /// Ordered cells, one per level.
    pub cells: Vec<Option<String>>,
}

impl Witness {
    /// Create a witness.
    pub fn new(siglum: impl Into<String>, colour: impl Into<String>, cells: Vec<Option<String>>) -> Self {
        Self {
            siglum: siglum.into(),
            colour: colour.into(),
            cells,
        }
    }

    /// Reading at `level`, or `None` for a gap or out-of-range level.
    pub fn reading(&self, level: usize) -> Option<&str> {
        self.cells.get(level).and_then(|c| c.as_deref())
    }

    /// Nearest level after `level` carrying a reading, skipping gaps.
    pub fn next_reading(&self, level: usize) -> Option<(usize, &str)> {
        self.cells
            .iter()
            .enumerate()
            .skip(level + 1)
            .find_map(|(n, cell)| cell.as_deref().map(|text| (n, text)))
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the witness has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Distinct readings at one level with their occurrence counts.
///
/// Entries keep first-seen order across witnesses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTally {
    entries: Vec<(String, usize)>,
}

impl LevelTally {
    /// Create an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `text`.
    pub fn record(&mut self, text: &str) {
        match self.entries.iter_mut().find(|(t, _)| t == text) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((text.to_string(), 1)),
        }
    }

    /// Occurrence count for `text`, zero if unseen.
    pub fn count(&self, text: &str) -> usize {
        self.entries
            .iter()
            .find(|(t, _)| t == text)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    /// Iterate (text, count) in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(t, c)| (t.as_str(), *c))
    }

    /// Number of distinct readings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no witness has a reading at this level.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(raw: &[&str]) -> Vec<Option<String>> {
        raw.iter()
            .map(|s| if s.is_empty() { None } else { Some(s.to_string()) })
            .collect()
    }

    #[test]
    fn test_next_reading_skips_gaps() {
        let w = Witness::new("W", "#000", cells(&["a", "", "", "b", ""]));

        assert_eq!(w.next_reading(0), Some((3, "b")));
        assert_eq!(w.next_reading(3), None);
        assert_eq!(w.reading(1), None);
        assert_eq!(w.reading(9), None);
    }

    #[test]
    fn test_tally_keeps_first_seen_order() {
        let mut tally = LevelTally::new();
        tally.record("fox");
        tally.record("dog");
        tally.record("fox");

        let entries: Vec<_> = tally.iter().collect();
        assert_eq!(entries, vec![("fox", 2), ("dog", 1)]);
        assert_eq!(tally.count("cat"), 0);
    }
}
