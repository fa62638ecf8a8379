//! Shared helpers for integration tests

#![allow(dead_code)]

pub mod fixture;

use std::sync::atomic::{AtomicU32, Ordering};

use taxres::domain::{CandidateMatch, DataSource, ResponseRecord};
use taxres::infrastructure::traits::{BatchQueryClient, TransportError};
use taxres::infrastructure::ReplayClient;

pub const NCBI: u32 = 4;
pub const GBIF: u32 = 11;

pub fn sources() -> Vec<DataSource> {
    vec![
        DataSource {
            id: NCBI,
            title: "NCBI".into(),
        },
        DataSource {
            id: GBIF,
            title: "GBIF".into(),
        },
    ]
}

/// Candidate placed under `genus` in a small animal lineage.
pub fn candidate(name: &str, source: u32, score: f64) -> CandidateMatch {
    let genus = name.split_whitespace().next().unwrap_or(name);
    let species = name.split_whitespace().count() > 1;
    let (path, ranks, ids) = if species {
        (
            format!("|Metazoa|Chordata|Fam{genus}|{genus}|{name}"),
            "|kingdom|phylum|family|genus|species".to_string(),
            "|33208|7711|100|101|102".to_string(),
        )
    } else {
        (
            format!("|Metazoa|Chordata|Fam{genus}|{genus}"),
            "|kingdom|phylum|family|genus".to_string(),
            "|33208|7711|100|101".to_string(),
        )
    };
    CandidateMatch {
        name_string: name.to_string(),
        canonical_form: Some(name.to_string()),
        score,
        classification_path: path,
        classification_path_ranks: ranks,
        classification_path_ids: ids,
        data_source_id: source,
        data_source_title: if source == NCBI { "NCBI" } else { "GBIF" }.to_string(),
        match_type: 1,
        prescore: "3|0|0".to_string(),
        taxon_id: "102".to_string(),
        gni_uuid: String::new(),
    }
}

/// Client failing the first `failures` queries, then answering from `inner`.
pub struct FlakyClient {
    pub inner: ReplayClient,
    pub failures: u32,
    pub calls: AtomicU32,
}

impl FlakyClient {
    pub fn new(inner: ReplayClient, failures: u32) -> Self {
        Self {
            inner,
            failures,
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl BatchQueryClient for FlakyClient {
    fn data_sources(&self) -> Result<Vec<DataSource>, TransportError> {
        self.inner.data_sources()
    }

    fn query(
        &self,
        terms: &[String],
        data_source_ids: &[u32],
    ) -> Result<Vec<ResponseRecord>, TransportError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            return Err(TransportError::Unavailable(format!("call {call}")));
        }
        self.inner.query(terms, data_source_ids)
    }
}
