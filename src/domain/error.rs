//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the resolution and aggregation rules.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("term cannot be encoded for transport: {0:?}")]
    Encoding(String),

    #[error("unknown retrieval field: {name} (valid fields: {valid})")]
    UnknownField { name: String, valid: String },

    #[error("rank not recognised by taxonomy: {0:?}")]
    UnknownRank(String),

    #[error("taxonomy has no ranks")]
    EmptyTaxonomy,

    #[error("rank listed twice in taxonomy: {0}")]
    DuplicateRank(String),

    #[error("level {level} out of range for taxonomy of {len} ranks")]
    LevelOutOfRange { level: usize, len: usize },

    #[error("input length mismatch: {idents} idents, {ranks} rank lists, {lineages} lineages")]
    LengthMismatch {
        idents: usize,
        ranks: usize,
        lineages: usize,
    },

    #[error("ranks and lineage differ in length for {ident}: {ranks} vs {lineage}")]
    MisalignedLineage {
        ident: String,
        ranks: usize,
        lineage: usize,
    },

    #[error("no rank labels for {0}")]
    MissingRanks(String),

    #[error("ident listed twice: {0}")]
    DuplicateIdent(String),

    #[error("extra slot {name} has {found} values, expected {expected}")]
    ExtraSlotLength {
        name: String,
        found: usize,
        expected: usize,
    },

    #[error("no taxa left to assemble into a tree")]
    EmptyTree,
}
