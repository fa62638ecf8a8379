//! Command implementations

use std::io;
use std::path::PathBuf;

use chrono::Local;
use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, info, instrument};

use crate::application::services::{Resolution, ResolutionSummary};
use crate::cli::args::{Cli, Commands, ConfigCommands, ResolveArgs};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{normalize_terms, QueryTerm};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Dispatch a parsed command line.
pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Resolve { args, tree }) => cmd_resolve(container, args, *tree),
        Some(Commands::Tree { args, show }) => cmd_tree(container, args, *show),
        Some(Commands::Config { command }) => cmd_config(container, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

/// Container with command line overrides applied to its settings.
fn with_overrides(container: &ServiceContainer, args: &ResolveArgs) -> ServiceContainer {
    let mut settings = Settings::clone(&container.settings);
    if let Some(datasource) = &args.datasource {
        settings.datasource = datasource.clone();
    }
    if !args.taxon_ids.is_empty() {
        settings.taxon_ids = args.taxon_ids.clone();
    }
    settings.lowrank |= args.lowrank;
    if let Some(out_dir) = &args.out_dir {
        settings.output_dir = out_dir.clone();
    }
    ServiceContainer::with_deps(settings, container.work_dir.clone(), container.fs.clone())
}

fn read_terms(container: &ServiceContainer, args: &ResolveArgs) -> CliResult<Vec<QueryTerm>> {
    let path = container.path(&args.names);
    let content = container
        .fs
        .read_to_string(&path)
        .map_err(|e| InfraError::io(format!("read names {}", path.display()), e))?;
    let terms = normalize_terms(content.lines())?;
    info!(
        "Found [{}] taxon names to search in input file ({} unique)",
        content.lines().filter(|l| !l.trim().is_empty()).count(),
        terms.len()
    );
    Ok(terms)
}

fn resolve(
    container: &ServiceContainer,
    args: &ResolveArgs,
    output_dir: Option<PathBuf>,
) -> CliResult<Resolution> {
    let responses = args.responses.as_ref().ok_or_else(|| {
        CliError::Usage(
            "no response source: pass --responses <file> or set TAXRES_RESPONSES".into(),
        )
    })?;
    let terms = read_terms(container, args)?;
    let client = container.replay_client(responses)?;
    let engine = container.engine(client, output_dir);
    Ok(engine.run(&terms)?)
}

fn print_summary(summary: &ResolutionSummary) {
    output::success(&format!(
        "resolved {} of {} names ({} rounds)",
        summary.resolved, summary.terms, summary.rounds
    ));
    if summary.disambiguated > 0 {
        output::detail(&format!("{} names had several matches", summary.disambiguated));
    }
    if summary.unresolved > 0 {
        output::failure(&format!("{} names unresolved", summary.unresolved));
    }
}

#[instrument(level = "debug", skip(container))]
fn cmd_resolve(container: &ServiceContainer, args: &ResolveArgs, tree: bool) -> CliResult<()> {
    let container = with_overrides(container, args);
    let out_dir = container.path(&container.settings.output_dir);

    let started = Local::now();
    info!("---- start {} ----", started.format("%Y-%m-%d %H:%M:%S"));
    output::header(&format!("Resolving names against {}", container.settings.datasource));

    let resolution = resolve(&container, args, Some(out_dir.clone()))?;
    let paths = container
        .report_service()
        .write_results(&resolution.store, &out_dir)?;
    output::action("Results", &paths.results.display());
    if let Some(unresolved) = &paths.unresolved {
        output::action("Unresolved", &unresolved.display());
    }

    if tree {
        if resolution.summary.resolved == 0 {
            output::warning("no resolved names, skipping tree");
        } else {
            let built = container.tree_service()?.build(&resolution.store)?;
            let path = container.report_service().write_tree(&built.newick, &out_dir)?;
            output::action("Tree", &path.display());
        }
    }

    print_summary(&resolution.summary);
    let finished = Local::now();
    info!(
        "---- end {} ({}s) ----",
        finished.format("%Y-%m-%d %H:%M:%S"),
        (finished - started).num_seconds()
    );
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn cmd_tree(container: &ServiceContainer, args: &ResolveArgs, show: bool) -> CliResult<()> {
    let container = with_overrides(container, args);
    let resolution = resolve(&container, args, None)?;
    if resolution.summary.resolved == 0 {
        return Err(CliError::Usage("no names could be resolved".into()));
    }
    let built = container.tree_service()?.build(&resolution.store)?;
    debug!("tree: {}", built.newick);

    if show {
        output::info(&output::lineage_tree(&built.dictionary.lineage_paths()));
    }
    output::info(&built.newick);
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".into())
                })?
            } else {
                local_config_path(&container.work_dir)
            };
            if container.fs.exists(&path) {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            container
                .fs
                .ensure_parent(&path)
                .and_then(|_| container.fs.write(&path, &Settings::template()))
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("created {}", path.display()));
            Ok(())
        }
        ConfigCommands::Path => {
            let global = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(unavailable)".into());
            output::action("global", &global);
            output::action("local", &local_config_path(&container.work_dir).display());
            Ok(())
        }
    }
}
