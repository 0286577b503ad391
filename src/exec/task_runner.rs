// src/exec/task_runner.rs

//! Individual task process runner.

use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::CompletionEvent;
use crate::types::CommandSpec;

/// Run `spec` inside `dir` and report the outcome.
///
/// Never fails: a command that cannot be spawned or waited on is reported
/// as a failed event carrying the error text, so sibling tasks are not
/// affected. Output that is not valid UTF-8 also counts as a failure.
pub async fn run_command(dir: &Path, spec: &CommandSpec) -> CompletionEvent {
    match run_command_inner(dir, spec).await {
        Ok((success, bytes)) => match String::from_utf8(bytes) {
            Ok(output) => CompletionEvent {
                path: dir.to_path_buf(),
                succeeded: success,
                output,
            },
            Err(err) => {
                warn!(dir = %dir.display(), "command produced non-UTF-8 output");
                CompletionEvent::failure(dir, String::from_utf8_lossy(err.as_bytes()))
            }
        },
        Err(err) => {
            warn!(dir = %dir.display(), error = %err, "task execution error");
            CompletionEvent::failure(dir, format!("{err:#}"))
        }
    }
}

async fn run_command_inner(dir: &Path, spec: &CommandSpec) -> Result<(bool, Vec<u8>)> {
    info!(dir = %dir.display(), cmd = %spec, "starting task process");

    let mut cmd = build_command(spec);
    cmd.current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning `{spec}` in {}", dir.display()))?;

    // stdout and stderr are merged line by line in arrival order.
    let (line_tx, line_rx) = mpsc::unbounded_channel::<Vec<u8>>();
    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(pump_lines(stdout, line_tx.clone()));
    }
    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(pump_lines(stderr, line_tx.clone()));
    }
    drop(line_tx);

    let (status, output) = tokio::join!(child.wait(), collect_lines(line_rx));
    let status =
        status.with_context(|| format!("waiting for `{spec}` in {}", dir.display()))?;

    info!(
        dir = %dir.display(),
        exit_code = status.code().unwrap_or(-1),
        success = status.success(),
        "task process exited"
    );

    Ok((status.success(), output))
}

fn build_command(spec: &CommandSpec) -> Command {
    match spec {
        CommandSpec::Shell(line) if cfg!(windows) => {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(line);
            c
        }
        CommandSpec::Shell(line) => {
            let mut c = Command::new("sh");
            c.arg("-c").arg(line);
            c
        }
        CommandSpec::Argv(parts) => {
            // An empty argv fails at spawn time like any missing program.
            let (program, args) = parts.split_first().map_or(("", &[][..]), |(p, a)| (p.as_str(), a));
            let mut c = Command::new(program);
            c.args(args);
            c
        }
    }
}

async fn pump_lines<R>(stream: R, tx: mpsc::UnboundedSender<Vec<u8>>)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(stream);
    loop {
        let mut line = Vec::new();
        match reader.read_until(b'\n', &mut line).await {
            Ok(0) => break,
            Ok(_) => {
                if tx.send(line).is_err() {
                    break;
                }
            }
            Err(err) => {
                debug!(error = %err, "error reading task output; stopping");
                break;
            }
        }
    }
}

async fn collect_lines(mut rx: mpsc::UnboundedReceiver<Vec<u8>>) -> Vec<u8> {
    let mut output = Vec::new();
    while let Some(line) = rx.recv().await {
        output.extend_from_slice(&line);
    }
    output
}
