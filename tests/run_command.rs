#![cfg(unix)]

use std::path::Path;

use gloc::exec::run_command;
use gloc::types::CommandSpec;
use gloc_test_utils::{init_tracing, with_timeout};

#[tokio::test]
async fn successful_command_captures_stdout() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();

    let spec = CommandSpec::shell("echo hello").unwrap();
    let event = with_timeout(run_command(dir.path(), &spec)).await;

    assert!(event.succeeded);
    assert_eq!(event.output, "hello\n");
    assert_eq!(event.path, dir.path());
}

#[tokio::test]
async fn command_runs_inside_the_task_directory() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("marker.txt"), "here").unwrap();

    let spec = CommandSpec::shell("cat marker.txt").unwrap();
    let event = with_timeout(run_command(dir.path(), &spec)).await;

    assert!(event.succeeded);
    assert_eq!(event.output, "here");
}

#[tokio::test]
async fn non_zero_exit_is_a_failure_with_combined_output() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();

    let spec = CommandSpec::shell("echo out; echo err >&2; exit 3").unwrap();
    let event = with_timeout(run_command(dir.path(), &spec)).await;

    assert!(!event.succeeded);
    assert!(event.output.contains("out\n"));
    assert!(event.output.contains("err\n"));
}

#[tokio::test]
async fn shell_commands_keep_quoted_arguments_together() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();

    let spec = CommandSpec::shell("printf '%s|' 'a b' c").unwrap();
    let event = with_timeout(run_command(dir.path(), &spec)).await;

    assert!(event.succeeded);
    assert_eq!(event.output, "a b|c|");
}

#[tokio::test]
async fn split_commands_run_without_a_shell() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();

    let spec = CommandSpec::split_on_spaces("echo one  two").unwrap();
    assert_eq!(
        spec,
        CommandSpec::Argv(vec!["echo".into(), "one".into(), "two".into()])
    );

    let event = with_timeout(run_command(dir.path(), &spec)).await;
    assert!(event.succeeded);
    assert_eq!(event.output, "one two\n");
}

#[tokio::test]
async fn missing_program_is_a_task_failure_not_an_error() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();

    let spec = CommandSpec::argv(["definitely-not-a-real-program-gloc"]).unwrap();
    let event = with_timeout(run_command(dir.path(), &spec)).await;

    assert!(!event.succeeded);
    assert!(event.output.contains("spawning"));
}

#[tokio::test]
async fn vanished_directory_is_a_task_failure() {
    init_tracing();
    let missing = Path::new("/definitely/not/a/real/dir/for/gloc");

    let spec = CommandSpec::shell("true").unwrap();
    let event = with_timeout(run_command(missing, &spec)).await;

    assert!(!event.succeeded);
    assert_eq!(event.path, missing);
}

#[tokio::test]
async fn non_utf8_output_marks_the_task_failed() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();

    let spec = CommandSpec::shell("printf 'ok\\377\\n'").unwrap();
    let event = with_timeout(run_command(dir.path(), &spec)).await;

    assert!(!event.succeeded);
    assert!(event.output.starts_with("ok"));
}

#[test]
fn blank_commands_are_rejected() {
    assert!(CommandSpec::shell("   ").is_err());
    assert!(CommandSpec::split_on_spaces("   ").is_err());
    assert!(CommandSpec::argv(Vec::<String>::new()).is_err());
}
