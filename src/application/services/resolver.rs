//! Multi-round name resolution
//!
//! ```text
//! round 1: all terms      -> primary source          -> stored
//! round 2: round-1 misses -> every other source      -> alternate names only
//! round 3: alternates, else genus tokens -> primary   -> stored under the original term
//! ```
//! A term whose alternates all miss in round 3 is retried with its genus.
//! Terms left with several candidates are then reduced by the [`Disambiguator`].

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::Arc;

use itertools::Itertools;
use tracing::{debug, info, instrument, warn};

use crate::application::services::QueryService;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    CandidateMatch, CountPredicate, DataSource, Disambiguator, QueryTerm, ResolutionStore,
    ResponseRecord,
};
use crate::infrastructure::traits::FileSystem;

/// Search rounds before the engine stops escalating.
pub const MAX_ROUNDS: u32 = 3;

/// Options of one resolution run.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Title of the primary data source
    pub datasource: String,
    pub group_filter: BTreeSet<String>,
    pub prefer_lowest_rank: bool,
    /// Where raw round results go; `None` writes nothing
    pub output_dir: Option<PathBuf>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            datasource: "NCBI".into(),
            group_filter: BTreeSet::new(),
            prefer_lowest_rank: false,
            output_dir: None,
        }
    }
}

/// Counts describing a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionSummary {
    pub terms: usize,
    pub resolved: usize,
    pub unresolved: usize,
    /// Terms reduced by disambiguation
    pub disambiguated: usize,
    pub rounds: u32,
}

/// Outcome of [`ResolutionEngine::run`].
#[derive(Debug)]
pub struct Resolution {
    pub store: ResolutionStore,
    pub summary: ResolutionSummary,
}

/// Names queried in round 3 and the supplied terms they stand for.
#[derive(Debug, Default)]
struct Rekey {
    queries: Vec<String>,
    originals: BTreeMap<String, Vec<String>>,
}

impl Rekey {
    fn push(&mut self, query: &str, original: &str) {
        let originals = self.originals.entry(query.to_string()).or_default();
        if originals.is_empty() {
            self.queries.push(query.to_string());
        }
        if !originals.iter().any(|o| o == original) {
            originals.push(original.to_string());
        }
    }

    /// Canonical names differing from the supplied term.
    fn alternates(records: &[ResponseRecord]) -> Self {
        let mut rekey = Self::default();
        for record in records {
            for name in record
                .candidates()
                .iter()
                .filter_map(|c| c.canonical_form.as_deref())
                .filter(|name| *name != record.term)
                .unique()
            {
                rekey.push(name, &record.term);
            }
        }
        rekey
    }

    /// Whether some query stands for `original`.
    fn covers(&self, original: &str) -> bool {
        self.originals.values().flatten().any(|o| o == original)
    }

    /// Query the genus of each term.
    fn add_genera(&mut self, terms: &[&QueryTerm]) {
        for term in terms {
            self.push(term.genus(), term.as_str());
        }
    }

    fn genera(terms: &[&QueryTerm]) -> Self {
        let mut rekey = Self::default();
        rekey.add_genera(terms);
        rekey
    }

    fn restore(&self, records: &[ResponseRecord]) -> Vec<ResponseRecord> {
        records
            .iter()
            .flat_map(|record| {
                let originals = self.originals.get(&record.term).cloned().unwrap_or_default();
                if originals.is_empty() {
                    debug!("no supplied term for round-3 name {:?}", record.term);
                }
                originals.into_iter().map(move |term| ResponseRecord {
                    term,
                    results: record.results.clone(),
                })
            })
            .collect()
    }
}

/// Orchestrates search escalation and disambiguation over a [`ResolutionStore`].
pub struct ResolutionEngine {
    query: QueryService,
    fs: Arc<dyn FileSystem>,
    options: EngineOptions,
}

impl ResolutionEngine {
    pub fn new(query: QueryService, fs: Arc<dyn FileSystem>, options: EngineOptions) -> Self {
        Self { query, fs, options }
    }

    /// Split the service's sources into the primary id and all other ids.
    fn partition_sources(&self, sources: &[DataSource]) -> ApplicationResult<(u32, Vec<u32>)> {
        let primary = sources
            .iter()
            .find(|ds| ds.title == self.options.datasource)
            .ok_or_else(|| ApplicationError::UnknownDataSource {
                title: self.options.datasource.clone(),
                available: sources.iter().map(|ds| ds.title.as_str()).join(", "),
            })?
            .id;
        let others = sources
            .iter()
            .map(|ds| ds.id)
            .filter(|id| *id != primary)
            .collect();
        Ok((primary, others))
    }

    /// Persist a round's raw response; failures are only logged.
    fn write_artifact(&self, round: u32, records: &[ResponseRecord]) {
        let Some(dir) = &self.options.output_dir else {
            return;
        };
        let path = dir.join(format!("{round}_raw_results.json"));
        let written = serde_json::to_string_pretty(records)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                self.fs
                    .create_dir_all(dir)
                    .and_then(|_| self.fs.write(&path, &json))
                    .map_err(|e| e.to_string())
            });
        match written {
            Ok(()) => debug!("wrote {}", path.display()),
            Err(e) => warn!("cannot write {}: {}", path.display(), e),
        }
    }

    /// Search every other source one at a time, merging candidates per term.
    fn search_other_sources(&self, terms: &[String], others: &[u32]) -> Vec<ResponseRecord> {
        let mut combined: BTreeMap<&str, Vec<CandidateMatch>> =
            terms.iter().map(|t| (t.as_str(), Vec::new())).collect();
        for &id in others {
            for record in self.query.query(terms, &[id]) {
                if let Some(list) = combined.get_mut(record.term.as_str()) {
                    list.extend(record.candidates().iter().cloned());
                }
            }
        }
        terms
            .iter()
            .map(|term| match combined.remove(term.as_str()) {
                Some(list) if !list.is_empty() => ResponseRecord::matched(term.as_str(), list),
                _ => ResponseRecord::unmatched(term.as_str()),
            })
            .collect()
    }

    /// Resolve `terms`, returning the final store.
    #[instrument(level = "debug", skip_all, fields(terms = terms.len(), datasource = %self.options.datasource))]
    pub fn run(&self, terms: &[QueryTerm]) -> ApplicationResult<Resolution> {
        if terms.is_empty() {
            return Err(ApplicationError::NoTerms);
        }
        let sources = self.query.data_sources()?;
        let (primary, others) = self.partition_sources(&sources)?;

        let mut store = ResolutionStore::new(terms, self.options.group_filter.clone());
        let all: Vec<String> = terms.iter().map(|t| t.as_str().to_string()).collect();

        info!("Searching [{}] ...", self.options.datasource);
        let records = self.query.query(&all, &[primary]);
        self.write_artifact(1, &records);
        store.add(&records);
        let mut rounds = 1;

        let missing = store.unresolved();
        if !missing.is_empty() {
            info!("Searching other datasources for [{}] names ...", missing.len());
            let records = self.search_other_sources(&missing, &others);
            self.write_artifact(2, &records);

            let alternates = Rekey::alternates(&records);
            let (keyed, bare): (Vec<&QueryTerm>, Vec<&QueryTerm>) = terms
                .iter()
                .filter(|t| missing.iter().any(|m| m == t.as_str()))
                .unique()
                .partition(|t| alternates.covers(t.as_str()));
            let mut rekey = alternates;
            rekey.add_genera(&bare);

            info!(
                "Searching [{}] with [{}] alternate and [{}] genus names ...",
                self.options.datasource,
                keyed.len(),
                bare.len()
            );
            let mut raw = self.query.query(&rekey.queries, &[primary]);
            let mut restored = rekey.restore(&raw);

            let stranded: Vec<&QueryTerm> = keyed
                .into_iter()
                .filter(|t| {
                    !restored
                        .iter()
                        .any(|r| r.term == t.as_str() && store.accepts(r))
                })
                .collect();
            if !stranded.is_empty() {
                debug!("alternates failed for [{}] names, trying genus names", stranded.len());
                let fallback = Rekey::genera(&stranded);
                let records = self.query.query(&fallback.queries, &[primary]);
                restored.extend(fallback.restore(&records));
                raw.extend(records);
            }
            self.write_artifact(3, &raw);
            store.add(&restored);
            rounds = MAX_ROUNDS;
        }

        let ambiguous = store.terms_where(CountPredicate::More(1));
        if !ambiguous.is_empty() {
            info!("Choosing best records to return ...");
            let sieve = Disambiguator::new(
                self.options.group_filter.clone(),
                self.options.prefer_lowest_rank,
            );
            let reduced: Vec<ResponseRecord> = ambiguous
                .iter()
                .map(|term| {
                    let candidates = store.get(term).map(<[_]>::to_vec).unwrap_or_default();
                    let kept = sieve.sieve(candidates);
                    if kept.is_empty() {
                        ResponseRecord::unmatched(term.as_str())
                    } else {
                        ResponseRecord::matched(term.as_str(), kept)
                    }
                })
                .collect();
            store.replace(&reduced);
        }

        let unresolved = store.unresolved().len();
        let summary = ResolutionSummary {
            terms: store.len(),
            resolved: store.len() - unresolved,
            unresolved,
            disambiguated: ambiguous.len(),
            rounds,
        };
        info!(
            "resolved {} of {} names in {} rounds",
            summary.resolved, summary.terms, summary.rounds
        );
        Ok(Resolution { store, summary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alt(name: &str) -> CandidateMatch {
        CandidateMatch {
            name_string: name.to_string(),
            canonical_form: Some(name.to_string()),
            score: 1.0,
            classification_path: String::new(),
            classification_path_ranks: String::new(),
            classification_path_ids: String::new(),
            data_source_id: 11,
            data_source_title: "GBIF".into(),
            match_type: 1,
            prescore: String::new(),
            taxon_id: String::new(),
            gni_uuid: String::new(),
        }
    }

    #[test]
    fn given_other_source_records_when_collecting_alternates_then_skips_same_name() {
        let records = vec![
            ResponseRecord::matched("A b", vec![alt("A b"), alt("A bis"), alt("A bis")]),
            ResponseRecord::unmatched("C d"),
        ];
        let rekey = Rekey::alternates(&records);
        assert_eq!(rekey.queries, vec!["A bis"]);
        assert_eq!(rekey.originals["A bis"], vec!["A b"]);
    }

    fn query_terms(names: &[&str]) -> Vec<QueryTerm> {
        names
            .iter()
            .filter_map(|n| QueryTerm::parse(n).unwrap())
            .collect()
    }

    #[test]
    fn given_shared_genus_when_rekeying_then_restores_every_original() {
        let terms = query_terms(&["Homo sapiens", "Homo erectus"]);
        let rekey = Rekey::genera(&terms.iter().collect::<Vec<_>>());
        assert_eq!(rekey.queries, vec!["Homo"]);

        let restored = rekey.restore(&[ResponseRecord::matched("Homo", vec![alt("Homo")])]);
        let terms: Vec<_> = restored.iter().map(|r| r.term.as_str()).collect();
        assert_eq!(terms, vec!["Homo sapiens", "Homo erectus"]);
    }

    #[test]
    fn given_padded_term_when_rekeying_by_genus_then_uses_first_token() {
        let terms = query_terms(&["  Homo   sapiens "]);
        let rekey = Rekey::genera(&terms.iter().collect::<Vec<_>>());
        assert_eq!(rekey.queries, vec!["Homo"]);
        assert_eq!(rekey.originals["Homo"], vec!["Homo   sapiens"]);
    }

    #[test]
    fn given_alternates_for_some_terms_when_adding_genera_then_covers_all() {
        let records = vec![
            ResponseRecord::matched("A b", vec![alt("A bis")]),
            ResponseRecord::unmatched("C d"),
        ];
        let mut rekey = Rekey::alternates(&records);
        assert!(rekey.covers("A b"));
        assert!(!rekey.covers("C d"));

        let bare = query_terms(&["C d"]);
        rekey.add_genera(&bare.iter().collect::<Vec<_>>());
        assert_eq!(rekey.queries, vec!["A bis", "C"]);
        assert!(rekey.covers("C d"));
    }
}
