//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::services::{
    EngineOptions, QueryService, ReportService, ResolutionEngine, TreeService,
};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::infrastructure::replay::ReplayClient;
use crate::infrastructure::traits::{BatchQueryClient, FileSystem, RealFileSystem};
use crate::infrastructure::InfraResult;

/// Container holding application settings and I/O dependencies.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Base for relative paths
    pub work_dir: PathBuf,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings, work_dir: PathBuf) -> Self {
        Self::with_deps(settings, work_dir, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, work_dir: PathBuf, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            settings: Arc::new(settings),
            fs,
            work_dir,
        }
    }

    /// Resolve `path` against the work directory.
    pub fn path(&self, path: &Path) -> PathBuf {
        self.work_dir.join(path)
    }

    /// Client answering from a recorded response document.
    pub fn replay_client(&self, responses: &Path) -> InfraResult<Arc<dyn BatchQueryClient>> {
        let client = ReplayClient::from_path(self.fs.as_ref(), &self.path(responses))?;
        Ok(Arc::new(client))
    }

    pub fn query_service(&self, client: Arc<dyn BatchQueryClient>) -> QueryService {
        QueryService::new(client, &self.settings.query)
    }

    /// Engine configured from settings, writing raw results to `output_dir`.
    pub fn engine(
        &self,
        client: Arc<dyn BatchQueryClient>,
        output_dir: Option<PathBuf>,
    ) -> ResolutionEngine {
        let options = EngineOptions {
            datasource: self.settings.datasource.clone(),
            group_filter: self.settings.group_filter(),
            prefer_lowest_rank: self.settings.lowrank,
            output_dir,
        };
        ResolutionEngine::new(self.query_service(client), Arc::clone(&self.fs), options)
    }

    pub fn report_service(&self) -> ReportService {
        ReportService::new(Arc::clone(&self.fs))
    }

    pub fn tree_service(&self) -> ApplicationResult<TreeService> {
        Ok(TreeService::new(
            self.settings.taxonomy()?,
            self.settings.lineage,
        ))
    }
}
