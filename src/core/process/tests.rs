// gitsig-rs: Git signature status classifier
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::builder::ProcessBuilder;
use crate::error::{ProcessError, SigError};

fn git() -> ProcessBuilder {
    ProcessBuilder::which("git").expect("git should be installed for tests")
}

fn sleep_for(seconds: &str) -> ProcessBuilder {
    ProcessBuilder::which("sleep")
        .expect("sleep should be installed for tests")
        .arg(seconds)
}

#[tokio::test]
async fn test_process_captures_stdout() {
    let output = git()
        .arg("--version")
        .run_with_cancellation(CancellationToken::new())
        .await
        .expect("git --version should succeed");

    assert_eq!(output.exit_code(), 0);
    assert!(!output.is_interrupted());
    let (stdout, _) = output.into_streams();
    assert!(stdout.starts_with("git version"));
}

#[tokio::test]
async fn test_process_keeps_trailing_newline() {
    let output = git()
        .arg("--version")
        .run_with_cancellation(CancellationToken::new())
        .await
        .expect("git --version should succeed");

    let (stdout, _) = output.into_streams();
    assert!(stdout.ends_with('\n'), "output must not be trimmed");
}

#[tokio::test]
async fn test_process_failure_returns_exit_code_and_stderr() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let output = git()
        .args(["rev-parse", "--verify", "HEAD"])
        .cwd(temp.path())
        .env("LC_ALL", "C")
        .env("GIT_CEILING_DIRECTORIES", temp.path().display().to_string())
        .run_with_cancellation(CancellationToken::new())
        .await
        .expect("a non-zero exit is still output");

    assert_ne!(output.exit_code(), 0);
    let (_, stderr) = output.into_streams();
    assert!(stderr.contains("not a git repository"), "stderr: {stderr}");
}

#[tokio::test]
async fn test_process_cancelled_before_spawn() {
    let token = CancellationToken::new();
    token.cancel();

    let output = git()
        .arg("--version")
        .run_with_cancellation(token)
        .await
        .expect("pre-cancelled run should not error");

    assert!(output.is_interrupted());
    assert_eq!(output.exit_code(), -1);
}

#[tokio::test]
async fn test_process_cancelled_while_running() {
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        canceller.cancel();
    });

    let started = std::time::Instant::now();
    let output = sleep_for("5")
        .run_with_cancellation(token)
        .await
        .expect("cancellation is reported through the output");

    assert!(output.is_interrupted());
    assert!(started.elapsed() < Duration::from_secs(4), "child was not killed");
}

#[tokio::test]
async fn test_process_timeout_is_reported() {
    let started = std::time::Instant::now();
    let result = sleep_for("5")
        .timeout(Duration::from_millis(100))
        .run_with_cancellation(CancellationToken::new())
        .await;

    assert!(
        matches!(
            result,
            Err(SigError::Process(ref e)) if matches!(**e, ProcessError::Timeout { .. })
        ),
        "expected a timeout, got {result:?}"
    );
    assert!(started.elapsed() < Duration::from_secs(4), "child was not killed");
}

#[tokio::test]
async fn test_process_within_timeout_completes() {
    let output = git()
        .arg("--version")
        .timeout(Duration::from_secs(30))
        .run_with_cancellation(CancellationToken::new())
        .await
        .expect("git --version finishes well within the timeout");

    assert_eq!(output.exit_code(), 0);
}

#[test]
fn test_which_missing_executable() {
    let err = ProcessBuilder::which("definitely-not-a-real-binary-gitsig").unwrap_err();
    assert!(matches!(err, ProcessError::ExecutableNotFound { .. }));
}

#[test]
fn test_which_caches_result() {
    let first = ProcessBuilder::find("git");
    let second = ProcessBuilder::find("git");
    assert_eq!(first, second);
}
