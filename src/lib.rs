//! Taxonomic name resolution: resolve free-text names against a batch name
//! resolution service and assemble the matches into a Newick tree.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
