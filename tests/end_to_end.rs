#![cfg(unix)]

use std::sync::Arc;

use gloc::config::build_exclude_set;
use gloc::coordinator::Coordinator;
use gloc::discover::discover;
use gloc::exec::RealExecutorBackend;
use gloc::fs::RealFileSystem;
use gloc::types::{CommandSpec, DiscoveryMode, OutputPolicy};
use gloc_test_utils::builders::RepoTreeBuilder;
use gloc_test_utils::sink::{FixedProbe, SharedBuffer};
use gloc_test_utils::{init_tracing, with_timeout};

type TestResult = anyhow::Result<()>;

#[tokio::test]
async fn real_commands_run_in_each_discovered_repo() -> TestResult {
    init_tracing();
    let tree = RepoTreeBuilder::new()?
        .repo("alpha")?
        .repo("beta")?
        .repo("gamma")?
        .dir("skipped")?
        .build();

    let excludes = build_exclude_set(&[])?;
    let dirs = discover(&RealFileSystem, tree.path(), DiscoveryMode::GitChildren, &excludes)?;
    assert_eq!(dirs.len(), 3);

    let out = SharedBuffer::new();
    let policy = OutputPolicy {
        show_output: true,
        ignore_empty: false,
        ignore_errors: true,
    };
    let coordinator = Coordinator::new(
        Arc::new(RealExecutorBackend::new()),
        10,
        policy,
        out.clone(),
        FixedProbe::width(80),
    )?;

    // Fails only in `beta`.
    let command = CommandSpec::shell(
        r#"name=$(basename "$PWD"); echo "in $name"; test "$name" != beta"#,
    )?;
    let report = with_timeout(coordinator.run(dirs, command)).await?;

    assert_eq!(report.total, 3);
    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failed, 1);

    let lines = out.record_lines();
    assert!(lines.contains(&" ✔ alpha ".to_string()));
    assert!(lines.contains(&" ✔ gamma ".to_string()));
    assert!(lines.contains(&" ✖ beta ".to_string()));
    assert!(lines.contains(&"in alpha".to_string()));
    assert!(lines.contains(&"in gamma".to_string()));
    assert!(!lines.contains(&"in beta".to_string()));
    Ok(())
}

#[tokio::test]
async fn all_dirs_mode_runs_in_non_repositories_too() -> TestResult {
    init_tracing();
    let tree = RepoTreeBuilder::new()?.dir("one")?.dir("two")?.build();

    let excludes = build_exclude_set(&[])?;
    let dirs = discover(&RealFileSystem, tree.path(), DiscoveryMode::AllDirs, &excludes)?;

    let out = SharedBuffer::new();
    let coordinator = Coordinator::new(
        Arc::new(RealExecutorBackend::new()),
        1,
        OutputPolicy::default(),
        out.clone(),
        FixedProbe::width(80),
    )?;
    let report = with_timeout(coordinator.run(dirs, CommandSpec::shell("touch ran")?)).await?;

    assert!(report.all_succeeded());
    assert!(tree.path().join("one/ran").exists());
    assert!(tree.path().join("two/ran").exists());

    let mut lines = out.record_lines();
    lines.sort();
    assert_eq!(lines, vec!["✔ one", "✔ two"]);
    Ok(())
}
