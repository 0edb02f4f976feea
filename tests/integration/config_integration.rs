//! Integration tests for layered configuration loading

use super::test_utils::ENV_MUTEX;
use auxgen::config::{global_config_path, ConfigLoader};
use auxgen::types::ToolReference;
use std::path::PathBuf;
use tempfile::TempDir;

/// Run `f` with XDG_CONFIG_HOME pointed at `config_home`, restoring it afterwards.
fn with_config_home<F, R>(config_home: &std::path::Path, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let original = std::env::var("XDG_CONFIG_HOME").ok();
    std::env::set_var("XDG_CONFIG_HOME", config_home);

    let result = f();

    if let Some(orig) = original {
        std::env::set_var("XDG_CONFIG_HOME", orig);
    } else {
        std::env::remove_var("XDG_CONFIG_HOME");
    }
    result
}

#[test]
fn test_global_config_path_uses_xdg_config_home() {
    let temp = TempDir::new().unwrap();
    let path = with_config_home(temp.path(), global_config_path);
    assert_eq!(path, Some(temp.path().join("auxgen").join("config.toml")));
}

#[test]
fn test_workspace_file_overrides_global_file() {
    let temp = TempDir::new().unwrap();
    let config_home = temp.path().join("config");
    let workspace = temp.path().join("ws");
    std::fs::create_dir_all(config_home.join("auxgen")).unwrap();
    std::fs::create_dir_all(&workspace).unwrap();

    std::fs::write(
        config_home.join("auxgen").join("config.toml"),
        r#"
[generate]
jobs = 3
timeout_secs = 120
launcher = ["go", "run", "-mod=mod"]
"#,
    )
    .unwrap();
    std::fs::write(
        workspace.join("auxgen.toml"),
        r#"
[generate]
jobs = 1
enable = ["abort_only_contract"]
"#,
    )
    .unwrap();

    let config = with_config_home(&config_home, || ConfigLoader::load(&workspace)).unwrap();
    assert_eq!(config.generate.jobs, 1, "workspace file should win");
    assert_eq!(config.generate.timeout_secs, Some(120));
    assert_eq!(config.generate.launcher, vec!["go", "run", "-mod=mod"]);
    assert_eq!(config.generate.workdir, PathBuf::from("go-util"));

    let table = config.directive_table().unwrap();
    assert_eq!(table.enabled_tasks().count(), 5);
}

#[test]
fn test_load_without_any_files_uses_builtin_table() {
    let temp = TempDir::new().unwrap();
    let config = with_config_home(&temp.path().join("empty"), || ConfigLoader::load(temp.path()))
        .unwrap();
    assert!(config.tasks.is_empty());
    assert!(config.validate().is_ok());
    assert_eq!(config.directive_table().unwrap().enabled_tasks().count(), 4);
}

#[test]
fn test_explicit_file_replaces_task_table() {
    let temp = TempDir::new().unwrap();
    let config_file = temp.path().join("custom.toml");
    std::fs::write(
        &config_file,
        r#"
[generate]
workdir = "/opt/aux/go-util"

[[tasks]]
name = "critbit_u64"
group = "critbit"
tool = { remote = "github.com/fardream/gen-move-container", version = "v0.3.0" }
args = ["critbit", "-o", "../sources/critbit_u64.move", "-p", "aux", "-m", "critbit_u64"]
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    let table = config.directive_table().unwrap();
    assert_eq!(table.len(), 1);
    let task = table.get("critbit_u64").unwrap();
    assert_eq!(
        task.tool,
        ToolReference::remote("github.com/fardream/gen-move-container", "v0.3.0")
    );
    assert_eq!(task.output_path(), Some(PathBuf::from("../sources/critbit_u64.move")));
    assert_eq!(
        config.generate.resolve_workdir(temp.path()),
        PathBuf::from("/opt/aux/go-util")
    );
}

#[test]
fn test_missing_explicit_file_is_error() {
    let temp = TempDir::new().unwrap();
    assert!(ConfigLoader::load_from_file(&temp.path().join("absent.toml")).is_err());
}

#[test]
fn test_invalid_config_value_is_error() {
    let temp = TempDir::new().unwrap();
    let config_file = temp.path().join("bad.toml");
    std::fs::write(&config_file, "[generate]\njobs = \"many\"\n").unwrap();
    assert!(ConfigLoader::load_from_file(&config_file).is_err());
}
