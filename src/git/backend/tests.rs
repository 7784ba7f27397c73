// gitsig-rs: Git signature status classifier
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{GitRunner, ShellBackend};
use crate::config::types::GitConfig;
use crate::error::{GitError, ProcessError, SigError};
use std::collections::BTreeMap;
use std::time::Duration;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

#[tokio::test]
async fn test_shell_backend_reports_failure_without_error() {
    let temp = temp_dir();
    let backend = ShellBackend::builder().repo_path(temp.path()).build();

    let output = backend
        .run_git(&["rev-parse", "--verify", "HEAD"])
        .await
        .expect("a failing git command is still a completed run");

    assert!(!output.success());
    assert!(output.stderr().contains("not a git repository"));
}

#[tokio::test]
async fn test_shell_backend_passes_config_pairs() {
    let temp = temp_dir();
    let backend = ShellBackend::builder()
        .repo_path(temp.path())
        .config(BTreeMap::from([(
            "gitsig.marker".to_string(),
            "hello".to_string(),
        )]))
        .build();

    let output = backend
        .run_git(&["config", "--get", "gitsig.marker"])
        .await
        .expect("git config should run");

    assert_eq!(output.stdout(), "hello\n");
}

#[tokio::test]
async fn test_shell_backend_missing_executable() {
    let temp = temp_dir();
    let backend = ShellBackend::builder()
        .repo_path(temp.path())
        .executable("gitsig-no-such-git")
        .build();

    let err = backend.run_git(&["--version"]).await.unwrap_err();
    assert!(matches!(
        err,
        SigError::Process(ref e) if matches!(**e, ProcessError::ExecutableNotFound { .. })
    ));
}

#[tokio::test]
async fn test_shell_backend_cancelled() {
    let temp = temp_dir();
    let backend = ShellBackend::builder().repo_path(temp.path()).build();
    backend.cancellation().cancel();

    let err = backend.run_git(&["--version"]).await.unwrap_err();
    assert!(matches!(
        err,
        SigError::Git(ref e) if matches!(**e, GitError::Interrupted { .. })
    ));
}

#[tokio::test]
async fn test_shell_backend_cancelled_while_running() {
    let temp = temp_dir();
    let backend = ShellBackend::builder()
        .repo_path(temp.path())
        .config(BTreeMap::from([(
            "alias.nap".to_string(),
            "!sleep 5".to_string(),
        )]))
        .build();

    let token = backend.cancellation();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        token.cancel();
    });

    let started = std::time::Instant::now();
    let err = backend.run_git(&["nap"]).await.unwrap_err();
    assert!(matches!(
        err,
        SigError::Git(ref e) if matches!(**e, GitError::Interrupted { .. })
    ));
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn test_shell_backend_timeout() {
    let temp = temp_dir();
    let backend = ShellBackend::builder()
        .repo_path(temp.path())
        .timeout(Duration::from_millis(100))
        .config(BTreeMap::from([(
            "alias.nap".to_string(),
            "!sleep 5".to_string(),
        )]))
        .build();

    let err = backend.run_git(&["nap"]).await.unwrap_err();
    assert!(matches!(
        err,
        SigError::Process(ref e) if matches!(**e, ProcessError::Timeout { .. })
    ));
}

#[test]
fn test_shell_backend_from_config() {
    let temp = temp_dir();
    let config = GitConfig {
        timeout_secs: 0,
        ..GitConfig::default()
    };
    let backend = ShellBackend::from_config(&config, temp.path());
    assert_eq!(backend.repo_path(), temp.path());
    assert!(backend.timeout.is_none());
}
