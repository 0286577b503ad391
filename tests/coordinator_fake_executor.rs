use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use gloc::coordinator::Coordinator;
use gloc::engine::RunReport;
use gloc::types::{CommandSpec, OutputPolicy};
use gloc_test_utils::fake_executor::FakeExecutor;
use gloc_test_utils::sink::{FixedProbe, SharedBuffer};
use gloc_test_utils::{init_tracing, with_timeout};

fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(|n| PathBuf::from("/work").join(n)).collect()
}

async fn run_with(
    executor: FakeExecutor,
    workers: usize,
    policy: OutputPolicy,
    probe: FixedProbe,
    names: &[&str],
) -> (RunReport, SharedBuffer) {
    init_tracing();
    let out = SharedBuffer::new();
    let coordinator =
        Coordinator::new(Arc::new(executor), workers, policy, out.clone(), probe).unwrap();
    let report = with_timeout(coordinator.run(paths(names), CommandSpec::shell("git fetch").unwrap()))
        .await
        .unwrap();
    (report, out)
}

fn count(lines: &[String], prefix: &str) -> usize {
    lines.iter().filter(|l| l.starts_with(prefix)).count()
}

#[tokio::test]
async fn all_successes_produce_one_marker_per_directory() {
    let (report, out) = run_with(
        FakeExecutor::new(),
        10,
        OutputPolicy::default(),
        FixedProbe::width(80),
        &["alpha", "beta", "gamma"],
    )
    .await;

    assert_eq!(
        report,
        RunReport {
            total: 3,
            succeeded: 3,
            failed: 0
        }
    );
    assert!(report.all_succeeded());

    let mut lines = out.record_lines();
    lines.sort();
    assert_eq!(lines, vec!["✔ alpha", "✔ beta", "✔ gamma"]);
}

#[tokio::test]
async fn one_failure_is_reported_inline() {
    let (report, out) = run_with(
        FakeExecutor::new().failing("beta"),
        10,
        OutputPolicy::default(),
        FixedProbe::width(80),
        &["alpha", "beta", "gamma"],
    )
    .await;

    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failed, 1);
    assert!(!report.all_succeeded());

    let lines = out.record_lines();
    assert_eq!(count(&lines, "✔ "), 2);
    assert_eq!(lines.iter().filter(|l| *l == "✖ beta").count(), 1);
}

#[tokio::test]
async fn ignore_errors_hides_failure_text_but_keeps_marker() {
    let executor = FakeExecutor::new()
        .failing("beta")
        .with_output("alpha", "alpha says hi")
        .with_output("beta", "beta exploded")
        .with_output("gamma", "gamma says hi");
    let policy = OutputPolicy {
        show_output: true,
        ignore_empty: false,
        ignore_errors: true,
    };

    let (_, out) = run_with(executor, 10, policy, FixedProbe::width(80), &["alpha", "beta", "gamma"]).await;

    let lines = out.record_lines();
    assert!(lines.contains(&" ✖ beta ".to_string()));
    assert!(lines.contains(&"alpha says hi".to_string()));
    assert!(lines.contains(&"gamma says hi".to_string()));
    assert!(!out.contents().contains("beta exploded"));
}

#[tokio::test]
async fn summary_is_redrawn_between_events_but_not_after_the_last() {
    // One worker keeps completions in a predictable one-by-one rhythm.
    let (_, out) = run_with(
        FakeExecutor::new().with_delay(Duration::from_millis(5)),
        1,
        OutputPolicy::default(),
        FixedProbe::width(80),
        &["alpha", "beta", "gamma"],
    )
    .await;

    let raw = out.contents();
    assert!(raw.contains("1| "), "missing first summary in {raw:?}");
    assert!(raw.contains("2| "), "missing second summary in {raw:?}");
    assert!(!raw.contains("3| "));
    assert!(raw.ends_with('\n'), "run must end on a record line: {raw:?}");
}

#[tokio::test]
async fn unavailable_terminal_size_falls_back_to_fifty_columns() {
    // Any summary naming one of these is longer than 50 characters.
    let (_, out) = run_with(
        FakeExecutor::new().with_delay(Duration::from_millis(5)),
        1,
        OutputPolicy::default(),
        FixedProbe::unavailable(),
        &[
            "a-very-long-repository-name-that-keeps-going-and-going",
            "another-very-long-repository-name-that-keeps-going-on",
            "yet-another-very-long-repository-name-that-goes-on-and-on",
        ],
    )
    .await;

    let raw = out.contents();
    assert!(raw.contains(" ..."), "expected a truncated summary in {raw:?}");
    for piece in raw.split("\x1b[2K") {
        let summary = piece.rsplit('\n').next().unwrap_or("");
        assert!(summary.chars().count() <= 50, "summary too wide: {summary:?}");
    }
}

#[tokio::test]
async fn tiny_terminal_draws_no_summary() {
    let (_, out) = run_with(
        FakeExecutor::new(),
        2,
        OutputPolicy::default(),
        FixedProbe::width(4),
        &["alpha", "beta", "gamma"],
    )
    .await;

    assert!(!out.contents().contains("| "));
}

#[tokio::test]
async fn empty_directory_list_runs_nothing() {
    let executor = Arc::new(FakeExecutor::new());
    let out = SharedBuffer::new();
    let coordinator = Coordinator::new(
        Arc::clone(&executor),
        10,
        OutputPolicy::default(),
        out.clone(),
        FixedProbe::width(80),
    )
    .unwrap();

    let report = coordinator
        .run(Vec::new(), CommandSpec::shell("true").unwrap())
        .await
        .unwrap();

    assert_eq!(report, RunReport::default());
    assert!(executor.executed().is_empty());
    assert!(out.contents().is_empty());
}

#[tokio::test]
async fn results_are_the_same_for_any_worker_count() {
    let names = ["a", "b", "c", "d", "e", "f", "g"];
    for workers in [1usize, 2, 7, 50] {
        let (report, out) = run_with(
            FakeExecutor::new(),
            workers,
            OutputPolicy::default(),
            FixedProbe::width(80),
            &names,
        )
        .await;
        assert_eq!(report.succeeded, names.len());
        assert_eq!(report.failed, 0);
        assert_eq!(count(&out.record_lines(), "✔ "), names.len());
    }
}
