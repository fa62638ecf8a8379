//! Taxonomic dictionary: lineages projected onto a taxonomy and grouped by rank.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, instrument};

use crate::domain::arena::{NodeId, TaxArena, TaxRef};
use crate::domain::error::DomainError;
use crate::domain::taxonomy::Taxonomy;

/// Taxonomic information held for one ident.
#[derive(Debug, Clone)]
pub struct TaxEntry {
    /// Lineage names, one slot per taxonomy rank; `""` where unnamed
    pub lineage: Vec<String>,
    /// Cell of this ident in the dictionary's arena
    pub node: NodeId,
    /// Most inclusive lineage name not shared with any other ident
    pub cident: Option<String>,
    /// The ident's own (most specific) rank label
    pub rank: String,
    /// Lineage value at the ident's own level
    pub lineage_ident: String,
    /// Caller supplied data slots
    pub extras: BTreeMap<String, String>,
}

/// Idents sharing one lineage value at a given rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clade {
    pub members: Vec<NodeId>,
    /// Shared lineage value, `""` for the singleton groups of unnamed slots
    pub label: String,
}

/// Holds and returns taxonomic information for a batch of idents.
#[derive(Debug)]
pub struct TaxonomicDictionary {
    taxonomy: Taxonomy,
    /// Idents in construction order
    order: Vec<String>,
    entries: BTreeMap<String, TaxEntry>,
    arena: TaxArena,
    /// One list of clades per taxonomy level
    hierarchy: Vec<Vec<Clade>>,
}

impl TaxonomicDictionary {
    /// Build the dictionary from parallel lists.
    ///
    /// * `idents` - unique names of the taxonomic entities (e.g. query names)
    /// * `ranks` - rank labels of each lineage (e.g. classification path ranks)
    /// * `lineages` - lineage names or ids, aligned with `ranks`
    #[instrument(level = "debug", skip_all, fields(n = idents.len()))]
    pub fn new<S: AsRef<str>>(
        idents: &[S],
        ranks: &[Vec<S>],
        lineages: &[Vec<S>],
        taxonomy: Taxonomy,
    ) -> Result<Self, DomainError> {
        if idents.len() != ranks.len() || idents.len() != lineages.len() {
            return Err(DomainError::LengthMismatch {
                idents: idents.len(),
                ranks: ranks.len(),
                lineages: lineages.len(),
            });
        }

        let mut dict = Self {
            taxonomy,
            order: Vec::with_capacity(idents.len()),
            entries: BTreeMap::new(),
            arena: TaxArena::new(),
            hierarchy: Vec::new(),
        };

        for ((ident, ident_ranks), ident_lineage) in idents.iter().zip(ranks).zip(lineages) {
            let ident = ident.as_ref();
            if ident_ranks.len() != ident_lineage.len() {
                return Err(DomainError::MisalignedLineage {
                    ident: ident.to_string(),
                    ranks: ident_ranks.len(),
                    lineage: ident_lineage.len(),
                });
            }
            if dict.entries.contains_key(ident) {
                return Err(DomainError::DuplicateIdent(ident.to_string()));
            }

            let rank = ident_ranks
                .iter()
                .map(AsRef::as_ref)
                .rev()
                .find(|r| !r.is_empty())
                .ok_or_else(|| DomainError::MissingRanks(ident.to_string()))?
                .to_string();
            let level = dict.taxonomy.level(&rank)?;

            let lineage: Vec<String> = dict
                .taxonomy
                .ranks()
                .iter()
                .map(|slot| {
                    ident_ranks
                        .iter()
                        .position(|r| r.as_ref() == slot)
                        .map(|i| ident_lineage[i].as_ref().to_string())
                        .unwrap_or_default()
                })
                .collect();

            let node = dict.arena.insert(TaxRef::new(ident, rank.clone(), level));
            dict.order.push(ident.to_string());
            dict.entries.insert(
                ident.to_string(),
                TaxEntry {
                    lineage_ident: lineage[level].clone(),
                    lineage,
                    node,
                    cident: None,
                    rank,
                    extras: BTreeMap::new(),
                },
            );
        }

        dict.build_hierarchy()?;
        dict.contextualise();
        debug!(
            "dictionary: {} idents over {} ranks",
            dict.entries.len(),
            dict.taxonomy.len()
        );
        Ok(dict)
    }

    /// Pairs of node and lineage value at `level`, sorted by ident.
    pub fn slice(&self, level: usize) -> Result<Vec<(NodeId, String)>, DomainError> {
        if level >= self.taxonomy.len() {
            return Err(DomainError::LevelOutOfRange {
                level,
                len: self.taxonomy.len(),
            });
        }
        Ok(self
            .entries
            .values()
            .map(|entry| (entry.node, entry.lineage[level].clone()))
            .collect())
    }

    /// Group a slice by shared lineage value.
    ///
    /// Entries are taken from the back; each named value collects every other
    /// entry with the same value (in order) followed by the taken entry itself.
    pub fn group(mut slice: Vec<(NodeId, String)>) -> Vec<Clade> {
        let mut clades = Vec::new();
        while let Some((node, label)) = slice.pop() {
            if label.is_empty() {
                clades.push(Clade {
                    members: vec![node],
                    label,
                });
                continue;
            }
            let (same, rest): (Vec<_>, Vec<_>) =
                slice.into_iter().partition(|(_, other)| *other == label);
            slice = rest;
            let mut members: Vec<NodeId> = same.into_iter().map(|(id, _)| id).collect();
            members.push(node);
            clades.push(Clade { members, label });
        }
        clades
    }

    fn build_hierarchy(&mut self) -> Result<(), DomainError> {
        let mut hierarchy = Vec::with_capacity(self.taxonomy.len());
        for level in 0..self.taxonomy.len() {
            hierarchy.push(Self::group(self.slice(level)?));
        }
        self.hierarchy = hierarchy;
        Ok(())
    }

    /// Assign cidents walking from the most general rank downwards.
    fn contextualise(&mut self) {
        let idents: HashMap<NodeId, String> = self
            .entries
            .iter()
            .map(|(ident, entry)| (entry.node, ident.clone()))
            .collect();
        let mut seen = HashSet::new();

        for clades in self.hierarchy.iter().rev() {
            for clade in clades {
                if clade.label.is_empty() || clade.members.len() != 1 {
                    continue;
                }
                let node = clade.members[0];
                if !seen.insert(node) {
                    continue;
                }
                if let Some(entry) = idents.get(&node).and_then(|i| self.entries.get_mut(i)) {
                    entry.cident = Some(clade.label.clone());
                }
            }
        }
    }

    /// Attach a named data slot; `values` follow the ident construction order.
    pub fn attach_extra<S: AsRef<str>>(
        &mut self,
        name: &str,
        values: &[S],
    ) -> Result<(), DomainError> {
        if values.len() != self.order.len() {
            return Err(DomainError::ExtraSlotLength {
                name: name.to_string(),
                found: values.len(),
                expected: self.order.len(),
            });
        }
        for (ident, value) in self.order.iter().zip(values) {
            if let Some(entry) = self.entries.get_mut(ident) {
                entry
                    .extras
                    .insert(name.to_string(), value.as_ref().to_string());
            }
        }
        Ok(())
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, ident: &str) -> Option<&TaxEntry> {
        self.entries.get(ident)
    }

    /// Entries sorted by ident.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TaxEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn cident(&self, ident: &str) -> Option<&str> {
        self.entries.get(ident)?.cident.as_deref()
    }

    pub fn taxref(&self, ident: &str) -> Option<&TaxRef> {
        self.arena.get(self.entries.get(ident)?.node)
    }

    pub fn node(&self, id: NodeId) -> Option<&TaxRef> {
        self.arena.get(id)
    }

    /// Clades at `rank`, or `None` if the rank is not in the taxonomy.
    pub fn hierarchy(&self, rank: &str) -> Option<&[Clade]> {
        let level = self.taxonomy.position(rank)?;
        self.hierarchy.get(level).map(Vec::as_slice)
    }

    /// Named lineage of every ident as `(rank, name)` pairs, most general first.
    pub fn lineage_paths(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.entries
            .iter()
            .map(|(ident, entry)| {
                let path = self
                    .taxonomy
                    .ranks()
                    .iter()
                    .zip(&entry.lineage)
                    .rev()
                    .filter(|(_, name)| !name.is_empty())
                    .map(|(rank, name)| (rank.clone(), name.clone()))
                    .collect();
                (ident.clone(), path)
            })
            .collect()
    }

    /// Split borrow used by tree assembly.
    pub(crate) fn assembly_parts(&mut self) -> (&Taxonomy, &[Vec<Clade>], &mut TaxArena) {
        (&self.taxonomy, &self.hierarchy, &mut self.arena)
    }
}
