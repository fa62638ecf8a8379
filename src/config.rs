//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/taxres/taxres.toml`
//! 3. Local config: `<work_dir>/taxres.toml`
//! 4. Environment variables: `TAXRES_*` prefix

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{LineageSource, Taxonomy, DEFAULT_TAXONOMY};

/// Name of the local and global config files.
pub const CONFIG_FILE_NAME: &str = "taxres.toml";

/// Remote query behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QuerySettings {
    /// Names per request
    pub chunk_size: usize,
    /// Attempts per request before giving up
    pub max_attempts: u32,
    /// Fixed pause between attempts
    pub retry_wait_secs: u64,
    /// Query chunks concurrently
    pub parallel: bool,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            chunk_size: 100,
            max_attempts: 6,
            retry_wait_secs: 600,
            parallel: false,
        }
    }
}

impl QuerySettings {
    pub fn retry_wait(&self) -> Duration {
        Duration::from_secs(self.retry_wait_secs)
    }
}

/// Raw query settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawQuerySettings {
    pub chunk_size: Option<usize>,
    pub max_attempts: Option<u32>,
    pub retry_wait_secs: Option<u64>,
    pub parallel: Option<bool>,
}

impl QuerySettings {
    fn merge(&self, overlay: &RawQuerySettings) -> Self {
        Self {
            chunk_size: overlay.chunk_size.unwrap_or(self.chunk_size),
            max_attempts: overlay.max_attempts.unwrap_or(self.max_attempts),
            retry_wait_secs: overlay.retry_wait_secs.unwrap_or(self.retry_wait_secs),
            parallel: overlay.parallel.unwrap_or(self.parallel),
        }
    }
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub datasource: Option<String>,
    pub taxon_ids: Option<Vec<String>>,
    pub lowrank: Option<bool>,
    pub taxonomy: Option<Vec<String>>,
    pub output_dir: Option<PathBuf>,
    pub lineage: Option<LineageSource>,
    #[serde(default)]
    pub query: RawQuerySettings,
}

/// Unified configuration for taxres.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Title of the primary data source
    pub datasource: String,
    /// Taxonomic group ids restricting accepted matches
    pub taxon_ids: Vec<String>,
    /// Prefer matches resolved to the lowest rank
    pub lowrank: bool,
    /// Rank vocabulary, most specific first
    pub taxonomy: Vec<String>,
    /// Directory receiving result files
    pub output_dir: PathBuf,
    /// Lineage used for tree building
    pub lineage: LineageSource,
    pub query: QuerySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            datasource: "NCBI".into(),
            taxon_ids: vec![],
            lowrank: false,
            taxonomy: DEFAULT_TAXONOMY.iter().map(|r| r.to_string()).collect(),
            output_dir: PathBuf::from("resolved_names"),
            lineage: LineageSource::Names,
            query: QuerySettings::default(),
        }
    }
}

/// Get the XDG config directory for taxres.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "taxres").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Get the path to the local config file in a work directory.
pub fn local_config_path(work_dir: &Path) -> PathBuf {
    work_dir.join(CONFIG_FILE_NAME)
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Group filter as a set.
    pub fn group_filter(&self) -> BTreeSet<String> {
        self.taxon_ids.iter().cloned().collect()
    }

    /// Validated rank vocabulary.
    pub fn taxonomy(&self) -> Result<Taxonomy, ApplicationError> {
        Ok(Taxonomy::new(self.taxonomy.iter().cloned())?)
    }

    /// Expand shell variables and tilde in path-like fields.
    ///
    /// Handles `~`, `$VAR`, and `${VAR}` syntax; unknown variables are left as is.
    fn expand_paths(&mut self) {
        let raw = self.output_dir.to_string_lossy().to_string();
        if let Ok(expanded) = shellexpand::full(&raw) {
            self.output_dir = PathBuf::from(expanded.as_ref());
        }
    }

    /// Overlay a config file onto self.
    ///
    /// Scalars: overlay wins if specified. Arrays replace entirely, taxonomy
    /// order is significant and group ids are an explicit selection.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            datasource: overlay
                .datasource
                .clone()
                .unwrap_or_else(|| self.datasource.clone()),
            taxon_ids: overlay
                .taxon_ids
                .clone()
                .unwrap_or_else(|| self.taxon_ids.clone()),
            lowrank: overlay.lowrank.unwrap_or(self.lowrank),
            taxonomy: overlay
                .taxonomy
                .clone()
                .unwrap_or_else(|| self.taxonomy.clone()),
            output_dir: overlay
                .output_dir
                .clone()
                .unwrap_or_else(|| self.output_dir.clone()),
            lineage: overlay.lineage.unwrap_or(self.lineage),
            query: self.query.merge(&overlay.query),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `work_dir` - Optional work directory holding a local `taxres.toml`
    pub fn load(work_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_with(global_config_path().as_deref(), work_dir)
    }

    /// Load settings from an explicit global config path.
    pub fn load_with(
        global_path: Option<&Path>,
        work_dir: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_path {
            if global_path.exists() {
                let raw = load_raw_settings(global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(work_dir) = work_dir {
            let local_path = local_config_path(work_dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        // reject a bad taxonomy before any query is sent
        current.taxonomy()?;
        Ok(current)
    }

    /// Apply TAXRES_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("TAXRES")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("taxon_ids")
                .with_list_parse_key("taxonomy")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("datasource") {
            settings.datasource = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("taxon_ids") {
            settings.taxon_ids = val;
        }
        if let Ok(val) = config.get_bool("lowrank") {
            settings.lowrank = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("taxonomy") {
            settings.taxonomy = val;
        }
        if let Ok(val) = config.get_string("output_dir") {
            settings.output_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("lineage") {
            settings.lineage = val
                .parse()
                .map_err(|message| ApplicationError::Config { message })?;
        }
        if let Ok(val) = config.get::<usize>("query.chunk_size") {
            settings.query.chunk_size = val;
        }
        if let Ok(val) = config.get::<u32>("query.max_attempts") {
            settings.query.max_attempts = val;
        }
        if let Ok(val) = config.get::<u64>("query.retry_wait_secs") {
            settings.query.retry_wait_secs = val;
        }
        if let Ok(val) = config.get_bool("query.parallel") {
            settings.query.parallel = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# taxres configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/taxres/taxres.toml
#   Local:  <work_dir>/taxres.toml
#   Env:    TAXRES_* environment variables (TAXRES_QUERY__CHUNK_SIZE=50)
#
# Arrays given in a later layer replace earlier ones.

# Primary data source title
# datasource = "NCBI"

# Only accept matches inside these taxonomic groups (ids of the primary source)
# taxon_ids = ["40674"]

# Prefer matches resolved to the lowest rank
# lowrank = false

# Rank vocabulary for tree building, most specific first
# taxonomy = ["species", "genus", "family", "order", "class", "phylum", "kingdom"]

# Directory receiving search_results.csv, unresolved.txt and tree.tre
# output_dir = "resolved_names"

# Lineage used for tree building: "names" or "ids"
# lineage = "names"

[query]
# Names per request
# chunk_size = 100

# Attempts per request and pause between them
# max_attempts = 6
# retry_wait_secs = 600

# Query chunks concurrently
# parallel = false
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
