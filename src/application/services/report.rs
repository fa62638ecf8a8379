//! Result files: search table, unresolved list and tree

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationResult, OutputContext};
use crate::domain::{CandidateMatch, Field, ResolutionStore};
use crate::infrastructure::traits::FileSystem;

pub const RESULTS_FILE: &str = "search_results.csv";
pub const UNRESOLVED_FILE: &str = "unresolved.txt";
pub const TREE_FILE: &str = "tree.tre";

/// Placeholder for every column of an unresolved term.
pub const NO_MATCH: &str = "NA";

/// Files written by [`ReportService::write_results`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub results: PathBuf,
    /// Only present if some term stayed unresolved
    pub unresolved: Option<PathBuf>,
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Raw service value of `field`, paths unsplit.
fn raw_value(field: Field, term: &str, candidate: &CandidateMatch) -> String {
    match field {
        Field::QueryName => term.to_string(),
        Field::ClassificationPath => candidate.classification_path.clone(),
        Field::ClassificationPathRanks => candidate.classification_path_ranks.clone(),
        Field::ClassificationPathIds => candidate.classification_path_ids.clone(),
        Field::CanonicalForm => candidate.canonical_form.clone().unwrap_or_default(),
        other => other.extract(term, candidate).to_string(),
    }
}

pub fn csv_header() -> String {
    Field::ALL.map(Field::name).join(",")
}

/// One table row; `None` gives the no-match row.
pub fn csv_row(term: &str, candidate: Option<&CandidateMatch>) -> String {
    Field::ALL
        .iter()
        .map(|&field| match (field, candidate) {
            (Field::QueryName, _) => csv_field(term),
            (_, None) => NO_MATCH.to_string(),
            (field, Some(c)) => csv_field(&raw_value(field, term, c)),
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Writes result files into an output directory.
pub struct ReportService {
    fs: Arc<dyn FileSystem>,
}

impl ReportService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Write `search_results.csv` and, if needed, `unresolved.txt`.
    #[instrument(level = "debug", skip(self, store))]
    pub fn write_results(&self, store: &ResolutionStore, dir: &Path) -> ApplicationResult<ReportPaths> {
        self.fs
            .create_dir_all(dir)
            .output_context("create output directory", dir)?;

        let mut table = csv_header();
        table.push('\n');
        for (term, candidates) in store.iter() {
            table.push_str(&csv_row(term, candidates.first()));
            table.push('\n');
        }
        let results = dir.join(RESULTS_FILE);
        self.fs
            .write(&results, &table)
            .output_context("write results", &results)?;
        debug!("wrote {} rows to {}", store.len(), results.display());

        let unresolved = store.unresolved();
        let unresolved_path = if unresolved.is_empty() {
            None
        } else {
            let path = dir.join(UNRESOLVED_FILE);
            let mut content = unresolved.join("\n");
            content.push('\n');
            self.fs
                .write(&path, &content)
                .output_context("write unresolved names", &path)?;
            Some(path)
        };

        Ok(ReportPaths {
            results,
            unresolved: unresolved_path,
        })
    }

    /// Write the Newick string to `tree.tre`.
    pub fn write_tree(&self, tree: &str, dir: &Path) -> ApplicationResult<PathBuf> {
        let path = dir.join(TREE_FILE);
        self.fs
            .ensure_parent(&path)
            .output_context("create output directory", dir)?;
        self.fs
            .write(&path, &format!("{tree}\n"))
            .output_context("write tree", &path)?;
        Ok(path)
    }
}
