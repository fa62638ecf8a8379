//! Ordered rank vocabulary used to place taxa on a tree

use std::collections::HashSet;

use crate::domain::error::DomainError;

/// Ranks of the built-in taxonomy, most specific first (NCBI based).
pub const DEFAULT_TAXONOMY: [&str; 22] = [
    "subspecies",
    "species",
    "subgenus",
    "genus",
    "tribe",
    "subfamily",
    "family",
    "superfamily",
    "parvorder",
    "infraorder",
    "suborder",
    "order",
    "superorder",
    "parvclass",
    "infraclass",
    "subclass",
    "class",
    "superclass",
    "subphylum",
    "phylum",
    "kingdom",
    "superkingdom",
];

/// Ranks considered when preferring the lowest resolved rank, most specific first.
pub const MAJOR_RANKS: [&str; 11] = [
    "species",
    "genus",
    "family",
    "order",
    "superorder",
    "class",
    "superclass",
    "subphylum",
    "phylum",
    "kingdom",
    "superkingdom",
];

/// An ordered rank vocabulary; a rank's level is its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    ranks: Vec<String>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self {
            ranks: DEFAULT_TAXONOMY.iter().map(|r| r.to_string()).collect(),
        }
    }
}

impl Taxonomy {
    pub fn new<I, S>(ranks: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ranks: Vec<String> = ranks.into_iter().map(Into::into).collect();
        if ranks.is_empty() {
            return Err(DomainError::EmptyTaxonomy);
        }
        let mut seen = HashSet::new();
        for rank in &ranks {
            if !seen.insert(rank.as_str()) {
                return Err(DomainError::DuplicateRank(rank.clone()));
            }
        }
        Ok(Self { ranks })
    }

    pub fn ranks(&self) -> &[String] {
        &self.ranks
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn rank(&self, level: usize) -> Option<&str> {
        self.ranks.get(level).map(String::as_str)
    }

    pub fn position(&self, rank: &str) -> Option<usize> {
        self.ranks.iter().position(|r| r == rank)
    }

    pub fn contains(&self, rank: &str) -> bool {
        self.position(rank).is_some()
    }

    /// Level of `rank` in this taxonomy.
    ///
    /// A rank missing from a custom taxonomy maps to the nearest rank that is
    /// present, searching the default vocabulary outwards (+1, -1, +2, -2, ...).
    pub fn level(&self, rank: &str) -> Result<usize, DomainError> {
        if let Some(level) = self.position(rank) {
            return Ok(level);
        }
        let anchor = DEFAULT_TAXONOMY
            .iter()
            .position(|r| *r == rank)
            .ok_or_else(|| DomainError::UnknownRank(rank.to_string()))?;
        for step in 1..=DEFAULT_TAXONOMY.len() {
            let above = anchor + step;
            let below = anchor.checked_sub(step);
            for candidate in [Some(above), below].into_iter().flatten() {
                if let Some(level) = DEFAULT_TAXONOMY
                    .get(candidate)
                    .and_then(|r| self.position(r))
                {
                    return Ok(level);
                }
            }
        }
        Err(DomainError::UnknownRank(rank.to_string()))
    }
}
