//! Domain entities: core data structures

use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Separator used by the resolution service inside classification paths
/// and between names of one batch request.
pub const PATH_SEPARATOR: char = '|';

/// A normalized input name, ready to be submitted for resolution.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryTerm(String);

impl QueryTerm {
    /// Trim and validate a raw name.
    ///
    /// Returns `Ok(None)` for blank input. Names carrying control characters or
    /// the batch separator cannot be sent to the service and are rejected.
    pub fn parse(raw: &str) -> Result<Option<Self>, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        if trimmed
            .chars()
            .any(|c| c.is_control() || c == PATH_SEPARATOR)
        {
            return Err(DomainError::Encoding(trimmed.to_string()));
        }
        Ok(Some(Self(trimmed.to_string())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First whitespace-delimited token, i.e. the genus of a binomial.
    pub fn genus(&self) -> &str {
        self.0.split_whitespace().next().unwrap_or(&self.0)
    }
}

impl fmt::Display for QueryTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for QueryTerm {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize raw names: trim, drop blanks, reject unencodable names and
/// collapse duplicates keeping first-seen order.
pub fn normalize_terms<I, S>(raw: I) -> Result<Vec<QueryTerm>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut terms = Vec::new();
    for name in raw {
        if let Some(term) = QueryTerm::parse(name.as_ref())? {
            terms.push(term);
        }
    }
    Ok(terms.into_iter().unique().collect())
}

/// One candidate returned by the resolution service for a queried name.
///
/// Field names follow the service's JSON representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMatch {
    #[serde(default)]
    pub name_string: String,
    #[serde(default)]
    pub canonical_form: Option<String>,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub classification_path: String,
    #[serde(default)]
    pub classification_path_ranks: String,
    #[serde(default)]
    pub classification_path_ids: String,
    #[serde(default)]
    pub data_source_id: u32,
    #[serde(default)]
    pub data_source_title: String,
    #[serde(default)]
    pub match_type: u32,
    #[serde(default)]
    pub prescore: String,
    #[serde(default)]
    pub taxon_id: String,
    #[serde(default)]
    pub gni_uuid: String,
}

impl CandidateMatch {
    pub fn path_ranks(&self) -> impl Iterator<Item = &str> {
        self.classification_path_ranks.split(PATH_SEPARATOR)
    }

    pub fn path_ids(&self) -> impl Iterator<Item = &str> {
        self.classification_path_ids.split(PATH_SEPARATOR)
    }

    /// True if any id on the classification path is one of `groups`.
    pub fn belongs_to_any(&self, groups: &BTreeSet<String>) -> bool {
        self.path_ids().any(|id| groups.contains(id))
    }
}

/// Per-term result object as returned by the service.
///
/// A missing `results` array means the term had no match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    #[serde(rename = "supplied_name_string")]
    pub term: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<CandidateMatch>>,
}

impl ResponseRecord {
    pub fn unmatched(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            results: None,
        }
    }

    pub fn matched(term: impl Into<String>, results: Vec<CandidateMatch>) -> Self {
        Self {
            term: term.into(),
            results: Some(results),
        }
    }

    pub fn candidates(&self) -> &[CandidateMatch] {
        self.results.as_deref().unwrap_or(&[])
    }
}

/// A data source known to the resolution service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSource {
    pub id: u32,
    pub title: String,
}
