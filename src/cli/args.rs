//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

/// Resolve taxonomic names and build taxonomic trees
#[derive(Parser, Debug)]
#[command(name = "taxres")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Work directory holding taxres.toml and relative paths (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub work_dir: Option<PathBuf>,

    /// Print author and version
    #[arg(long)]
    pub info: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options shared by every command that resolves names.
#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// File with one name per line
    #[arg(value_hint = ValueHint::FilePath)]
    pub names: PathBuf,

    /// Primary data source title (default from config: NCBI)
    #[arg(long)]
    pub datasource: Option<String>,

    /// Only accept matches inside this taxonomic group id (repeatable)
    #[arg(long = "taxon-id")]
    pub taxon_ids: Vec<String>,

    /// Prefer matches resolved to the lowest rank
    #[arg(long)]
    pub lowrank: bool,

    /// Recorded service responses (JSON) to resolve against
    #[arg(long, env = "TAXRES_RESPONSES", value_hint = ValueHint::FilePath)]
    pub responses: Option<PathBuf>,

    /// Output directory (default from config: resolved_names)
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub out_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve names and write search_results.csv and unresolved.txt
    Resolve {
        #[command(flatten)]
        args: ResolveArgs,

        /// Also write tree.tre
        #[arg(long)]
        tree: bool,
    },

    /// Resolve names and print their taxonomic tree
    Tree {
        #[command(flatten)]
        args: ResolveArgs,

        /// Draw the lineage hierarchy
        #[arg(long)]
        show: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
