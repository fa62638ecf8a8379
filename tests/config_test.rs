//! Integration tests for Settings config loading with layered merge semantics.
//!
//! Merge Semantics:
//! - Defaults → Global → Local: scalars override when given, arrays REPLACE
//! - Any → Env vars: REPLACE (explicit user override)
//!
//! Note: These tests pass an explicit global path inside a temp directory,
//! so the user's real global config never takes part.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use taxres::application::ApplicationError;
use taxres::config::{local_config_path, Settings, CONFIG_FILE_NAME};
use taxres::domain::LineageSource;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn given_no_config_files_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    let settings = Settings::load_with(Some(&missing), Some(dir.path())).expect("load settings");

    assert_eq!(settings.datasource, "NCBI");
    assert!(settings.taxon_ids.is_empty());
    assert_eq!(settings.lineage, LineageSource::Names);
    assert_eq!(settings.taxonomy().unwrap().len(), 22);
}

/// Local config overrides global scalars; untouched global values survive.
#[test]
fn given_global_and_local_config_when_load_then_local_wins() {
    let global_dir = TempDir::new().unwrap();
    let work_dir = TempDir::new().unwrap();

    let global = write(
        &global_dir,
        CONFIG_FILE_NAME,
        r#"
datasource = "GBIF"
taxon_ids = ["40674"]

[query]
chunk_size = 50
"#,
    );
    write(
        &work_dir,
        CONFIG_FILE_NAME,
        r#"
datasource = "NCBI"
lowrank = true
lineage = "ids"

[query]
parallel = true
"#,
    );

    let settings = Settings::load_with(Some(&global), Some(work_dir.path())).unwrap();

    assert_eq!(settings.datasource, "NCBI");
    assert_eq!(settings.taxon_ids, vec!["40674"]);
    assert!(settings.lowrank);
    assert_eq!(settings.lineage, LineageSource::Ids);
    assert_eq!(settings.query.chunk_size, 50, "global value survives");
    assert!(settings.query.parallel);
    assert_eq!(settings.query.max_attempts, 6, "default survives");
}

/// Arrays are explicit selections: a later layer replaces, never unions.
#[test]
fn given_taxonomy_in_both_layers_when_load_then_local_replaces() {
    let global_dir = TempDir::new().unwrap();
    let work_dir = TempDir::new().unwrap();

    let global = write(
        &global_dir,
        CONFIG_FILE_NAME,
        r#"taxonomy = ["species", "genus", "family", "order"]"#,
    );
    write(
        &work_dir,
        CONFIG_FILE_NAME,
        r#"taxonomy = ["species", "family", "superkingdom"]"#,
    );

    let settings = Settings::load_with(Some(&global), Some(work_dir.path())).unwrap();

    assert_eq!(settings.taxonomy, vec!["species", "family", "superkingdom"]);
    assert_eq!(settings.taxonomy().unwrap().len(), 3);
}

#[test]
fn given_duplicate_rank_in_taxonomy_when_load_then_config_rejected() {
    let work_dir = TempDir::new().unwrap();
    write(
        &work_dir,
        CONFIG_FILE_NAME,
        r#"taxonomy = ["species", "genus", "species"]"#,
    );

    let err = Settings::load_with(None, Some(work_dir.path())).unwrap_err();
    assert!(matches!(err, ApplicationError::Domain(_)), "got {err:?}");
}

#[test]
fn given_invalid_toml_when_load_then_config_error_names_file() {
    let work_dir = TempDir::new().unwrap();
    write(&work_dir, CONFIG_FILE_NAME, "datasource = [unterminated");

    let err = Settings::load_with(None, Some(work_dir.path())).unwrap_err();
    match err {
        ApplicationError::Config { message } => {
            assert!(message.contains(CONFIG_FILE_NAME), "message: {message}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn given_settings_when_rendered_as_toml_then_loadable_again() {
    let work_dir = TempDir::new().unwrap();
    let settings = Settings {
        datasource: "GBIF".into(),
        taxon_ids: vec!["7742".into()],
        ..Settings::default()
    };
    fs::write(local_config_path(work_dir.path()), settings.to_toml().unwrap()).unwrap();

    let loaded = Settings::load_with(None, Some(work_dir.path())).unwrap();
    assert_eq!(loaded, settings);
}
