//! Retrievable fields of a resolved term

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{CandidateMatch, PATH_SEPARATOR};
use crate::domain::error::DomainError;

/// A column of the resolution results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    QueryName,
    ClassificationPath,
    DataSourceTitle,
    MatchType,
    Score,
    ClassificationPathRanks,
    NameString,
    CanonicalForm,
    ClassificationPathIds,
    Prescore,
    DataSourceId,
    TaxonId,
    GniUuid,
}

impl Field {
    /// All fields in output column order.
    pub const ALL: [Field; 13] = [
        Field::QueryName,
        Field::ClassificationPath,
        Field::DataSourceTitle,
        Field::MatchType,
        Field::Score,
        Field::ClassificationPathRanks,
        Field::NameString,
        Field::CanonicalForm,
        Field::ClassificationPathIds,
        Field::Prescore,
        Field::DataSourceId,
        Field::TaxonId,
        Field::GniUuid,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::QueryName => "query_name",
            Field::ClassificationPath => "classification_path",
            Field::DataSourceTitle => "data_source_title",
            Field::MatchType => "match_type",
            Field::Score => "score",
            Field::ClassificationPathRanks => "classification_path_ranks",
            Field::NameString => "name_string",
            Field::CanonicalForm => "canonical_form",
            Field::ClassificationPathIds => "classification_path_ids",
            Field::Prescore => "prescore",
            Field::DataSourceId => "data_source_id",
            Field::TaxonId => "taxon_id",
            Field::GniUuid => "gni_uuid",
        }
    }

    /// Value of this field for `term` resolved to `candidate`.
    ///
    /// Path fields drop the service's leading root element.
    pub fn extract(self, term: &str, candidate: &CandidateMatch) -> FieldValue {
        fn path(raw: &str) -> FieldValue {
            FieldValue::Path(raw.split(PATH_SEPARATOR).skip(1).map(str::to_string).collect())
        }
        match self {
            Field::QueryName => FieldValue::Text(term.to_string()),
            Field::ClassificationPath => path(&candidate.classification_path),
            Field::ClassificationPathRanks => path(&candidate.classification_path_ranks),
            Field::ClassificationPathIds => path(&candidate.classification_path_ids),
            Field::DataSourceTitle => FieldValue::Text(candidate.data_source_title.clone()),
            Field::MatchType => FieldValue::Integer(candidate.match_type),
            Field::Score => FieldValue::Score(candidate.score),
            Field::NameString => FieldValue::Text(candidate.name_string.clone()),
            Field::CanonicalForm => candidate
                .canonical_form
                .clone()
                .map_or(FieldValue::Missing, FieldValue::Text),
            Field::Prescore => FieldValue::Text(candidate.prescore.clone()),
            Field::DataSourceId => FieldValue::Integer(candidate.data_source_id),
            Field::TaxonId => FieldValue::Text(candidate.taxon_id.clone()),
            Field::GniUuid => FieldValue::Text(candidate.gni_uuid.clone()),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| DomainError::UnknownField {
                name: s.to_string(),
                valid: Field::ALL.map(Field::name).join(", "),
            })
    }
}

/// A retrieved value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(u32),
    Score(f64),
    Path(Vec<String>),
    Missing,
}

impl FieldValue {
    pub fn as_path(&self) -> Option<&[String]> {
        match self {
            FieldValue::Path(p) => Some(p),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(n) => write!(f, "{n}"),
            FieldValue::Score(s) => write!(f, "{s:?}"),
            FieldValue::Path(p) => f.write_str(&p.join("|")),
            FieldValue::Missing => f.write_str("NA"),
        }
    }
}

/// Which path feeds the lineages of a taxonomic dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineageSource {
    #[default]
    Names,
    Ids,
}

impl LineageSource {
    pub fn field(self) -> Field {
        match self {
            LineageSource::Names => Field::ClassificationPath,
            LineageSource::Ids => Field::ClassificationPathIds,
        }
    }
}

impl FromStr for LineageSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "names" => Ok(LineageSource::Names),
            "ids" => Ok(LineageSource::Ids),
            other => Err(format!("unknown lineage source: {other} (expected names or ids)")),
        }
    }
}
