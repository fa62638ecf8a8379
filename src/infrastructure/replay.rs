//! Offline resolution client answering from recorded responses.
//!
//! Document format:
//!
//! ```text
//! {
//!   "data_sources": [{"id": 4, "title": "NCBI"}],
//!   "records": {"4": [{"supplied_name_string": "Homo sapiens", "results": [...]}]}
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::{CandidateMatch, DataSource, ResponseRecord};
use crate::infrastructure::error::{InfraError, InfraResult};
use crate::infrastructure::traits::{BatchQueryClient, FileSystem, TransportError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ReplayDocument {
    #[serde(default)]
    data_sources: Vec<DataSource>,
    #[serde(default)]
    records: BTreeMap<String, Vec<ResponseRecord>>,
}

/// [`BatchQueryClient`] backed by a recorded response document.
#[derive(Debug, Clone, Default)]
pub struct ReplayClient {
    data_sources: Vec<DataSource>,
    /// data source id -> term -> candidates
    records: BTreeMap<u32, BTreeMap<String, Vec<CandidateMatch>>>,
}

impl ReplayClient {
    pub fn new(data_sources: Vec<DataSource>) -> Self {
        Self {
            data_sources,
            records: BTreeMap::new(),
        }
    }

    /// Record the candidates `source` returns for `term`.
    pub fn with_record(
        mut self,
        source: u32,
        term: impl Into<String>,
        candidates: Vec<CandidateMatch>,
    ) -> Self {
        self.records
            .entry(source)
            .or_default()
            .entry(term.into())
            .or_default()
            .extend(candidates);
        self
    }

    pub fn from_json(json: &str) -> InfraResult<Self> {
        let doc: ReplayDocument =
            serde_json::from_str(json).map_err(|e| InfraError::Replay(e.to_string()))?;
        let mut client = Self::new(doc.data_sources);
        for (source, records) in doc.records {
            let id: u32 = source
                .parse()
                .map_err(|_| InfraError::Replay(format!("invalid data source id: {source}")))?;
            for record in records {
                let candidates = record.candidates().to_vec();
                client = client.with_record(id, record.term, candidates);
            }
        }
        Ok(client)
    }

    #[instrument(level = "debug", skip(fs))]
    pub fn from_path(fs: &dyn FileSystem, path: &Path) -> InfraResult<Self> {
        let json = fs
            .read_to_string(path)
            .map_err(|e| InfraError::io(format!("read responses {}", path.display()), e))?;
        let client = Self::from_json(&json)?;
        debug!(
            "loaded {} data sources, {} recorded sources",
            client.data_sources.len(),
            client.records.len()
        );
        Ok(client)
    }
}

impl BatchQueryClient for ReplayClient {
    fn data_sources(&self) -> Result<Vec<DataSource>, TransportError> {
        Ok(self.data_sources.clone())
    }

    fn query(
        &self,
        terms: &[String],
        data_source_ids: &[u32],
    ) -> Result<Vec<ResponseRecord>, TransportError> {
        Ok(terms
            .iter()
            .map(|term| {
                let candidates: Vec<CandidateMatch> = data_source_ids
                    .iter()
                    .filter_map(|id| self.records.get(id)?.get(term))
                    .flatten()
                    .cloned()
                    .collect();
                if candidates.is_empty() {
                    ResponseRecord::unmatched(term.as_str())
                } else {
                    ResponseRecord::matched(term.as_str(), candidates)
                }
            })
            .collect())
    }
}
