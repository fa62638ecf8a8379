//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, BatchQueryClient)
//! but are themselves concrete structs, not traits.

mod query;
mod report;
mod resolver;
mod tree;

pub use query::{QueryService, RetryPolicy};
pub use report::{
    csv_header, csv_row, ReportPaths, ReportService, NO_MATCH, RESULTS_FILE, TREE_FILE,
    UNRESOLVED_FILE,
};
pub use resolver::{EngineOptions, Resolution, ResolutionEngine, ResolutionSummary, MAX_ROUNDS};
pub use tree::{TaxonomicTree, TreeService};
