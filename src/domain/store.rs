//! Per-term candidate storage

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, instrument};

use crate::domain::entities::{CandidateMatch, QueryTerm, ResponseRecord};
use crate::domain::field::{Field, FieldValue, LineageSource};

/// Selects terms by candidate count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountPredicate {
    /// Fewer than `n` candidates
    Fewer(usize),
    /// More than `n` candidates
    More(usize),
}

impl CountPredicate {
    fn matches(self, count: usize) -> bool {
        match self {
            CountPredicate::Fewer(n) => count < n,
            CountPredicate::More(n) => count > n,
        }
    }
}

/// Parallel lists ready for [`crate::domain::TaxonomicDictionary::new`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineageTable {
    pub idents: Vec<String>,
    pub ranks: Vec<Vec<String>>,
    pub lineages: Vec<Vec<String>>,
}

/// Map from queried term to its candidate matches.
///
/// Terms are fixed at construction; their lists are emptied, never removed.
#[derive(Debug, Clone, Default)]
pub struct ResolutionStore {
    entries: BTreeMap<String, Vec<CandidateMatch>>,
    group_filter: BTreeSet<String>,
}

fn accepts(group_filter: &BTreeSet<String>, candidate: &CandidateMatch) -> bool {
    group_filter.is_empty() || candidate.belongs_to_any(group_filter)
}

impl ResolutionStore {
    pub fn new(terms: &[QueryTerm], group_filter: BTreeSet<String>) -> Self {
        Self {
            entries: terms
                .iter()
                .map(|t| (t.as_str().to_string(), Vec::new()))
                .collect(),
            group_filter,
        }
    }

    pub fn group_filter(&self) -> &BTreeSet<String> {
        &self.group_filter
    }

    /// Whether `record` carries a candidate that [`add`](Self::add) would keep.
    pub fn accepts(&self, record: &ResponseRecord) -> bool {
        record
            .candidates()
            .iter()
            .any(|c| accepts(&self.group_filter, c))
    }

    /// Append the filtered candidates of each record to its term.
    #[instrument(level = "debug", skip_all, fields(records = records.len()))]
    pub fn add(&mut self, records: &[ResponseRecord]) {
        for record in records {
            let Some(list) = self.entries.get_mut(&record.term) else {
                debug!("skipping result for unknown term {:?}", record.term);
                continue;
            };
            list.extend(
                record
                    .candidates()
                    .iter()
                    .filter(|c| accepts(&self.group_filter, c))
                    .cloned(),
            );
        }
    }

    /// Assign each record's candidates to its term; no results empties the term.
    #[instrument(level = "debug", skip_all, fields(records = records.len()))]
    pub fn replace(&mut self, records: &[ResponseRecord]) {
        for record in records {
            match self.entries.get_mut(&record.term) {
                Some(list) => *list = record.candidates().to_vec(),
                None => debug!("skipping replacement for unknown term {:?}", record.term),
            }
        }
    }

    pub fn terms_where(&self, predicate: CountPredicate) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, list)| predicate.matches(list.len()))
            .map(|(term, _)| term.clone())
            .collect()
    }

    pub fn unresolved(&self) -> Vec<String> {
        self.terms_where(CountPredicate::Fewer(1))
    }

    pub fn get(&self, term: &str) -> Option<&[CandidateMatch]> {
        self.entries.get(term).map(Vec::as_slice)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.entries.contains_key(term)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Terms with their candidates, in store order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[CandidateMatch])> {
        self.entries.iter().map(|(t, l)| (t.as_str(), l.as_slice()))
    }

    fn resolved(&self) -> impl Iterator<Item = (&str, &CandidateMatch)> {
        self.entries
            .iter()
            .filter_map(|(term, list)| list.first().map(|c| (term.as_str(), c)))
    }

    /// One value per resolved term, from its first candidate.
    pub fn retrieve(&self, field: Field) -> Vec<FieldValue> {
        self.resolved()
            .map(|(term, candidate)| field.extract(term, candidate))
            .collect()
    }

    /// Idents, ranks and lineages of every resolved term.
    pub fn lineage_table(&self, source: LineageSource) -> LineageTable {
        fn path(value: FieldValue) -> Vec<String> {
            match value {
                FieldValue::Path(p) => p,
                _ => Vec::new(),
            }
        }

        let mut table = LineageTable::default();
        for (term, candidate) in self.resolved() {
            table.idents.push(term.to_string());
            table
                .ranks
                .push(path(Field::ClassificationPathRanks.extract(term, candidate)));
            table
                .lineages
                .push(path(source.field().extract(term, candidate)));
        }
        table
    }
}
