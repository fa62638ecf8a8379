//! Domain layer: entities and resolution logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod dictionary;
pub mod disambiguate;
pub mod entities;
pub mod error;
pub mod field;
pub mod store;
pub mod taxonomy;
pub mod tree;

pub use arena::{NodeId, TaxArena, TaxRef};
pub use dictionary::{Clade, TaxEntry, TaxonomicDictionary};
pub use disambiguate::Disambiguator;
pub use entities::*;
pub use error::DomainError;
pub use field::{Field, FieldValue, LineageSource};
pub use store::{CountPredicate, LineageTable, ResolutionStore};
pub use taxonomy::{Taxonomy, DEFAULT_TAXONOMY, MAJOR_RANKS};
pub use tree::{newick_safe, string_clade, tax_tree};
