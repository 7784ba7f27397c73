// gitsig-rs: Git signature status classifier
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::parse::{StatusLine, parse_status_lines};
use super::{CommitStatus, GpgController, SignerInfo, TagStatus, signer_from_status};
use crate::error::{GitError, SigError, SigResult};
use crate::git::backend::{GitOutput, GitRunner};
use crate::git::refs::GitRef;
use crate::git::revision::GitRevision;
use std::sync::{Arc, Mutex};

const COMMIT: &str = "0123456789abcdef0123456789abcdef01234567";

type Responder = Box<dyn Fn(&[&str]) -> GitOutput + Send + Sync>;

/// Records every invocation and answers with a canned output.
struct FakeRunner {
    calls: Arc<Mutex<Vec<Vec<String>>>>,
    respond: Responder,
}

impl FakeRunner {
    fn new(respond: impl Fn(&[&str]) -> GitOutput + Send + Sync + 'static) -> Self {
        Self {
            calls: Arc::default(),
            respond: Box::new(respond),
        }
    }

    /// Answers `verify-tag --raw <name>` with `<name>` on stderr.
    fn echo_tag_name() -> Self {
        Self::new(|args| GitOutput::new(0, "", args.last().copied().unwrap_or_default()))
    }

    fn calls(&self) -> Arc<Mutex<Vec<Vec<String>>>> {
        Arc::clone(&self.calls)
    }
}

impl GitRunner for FakeRunner {
    async fn run_git(&self, args: &[&str]) -> SigResult<GitOutput> {
        self.calls
            .lock()
            .unwrap()
            .push(args.iter().map(ToString::to_string).collect());
        Ok((self.respond)(args))
    }
}

fn revision(ref_names: &[&str]) -> GitRevision {
    GitRevision::new(
        COMMIT,
        ref_names.iter().map(|n| GitRef::new(COMMIT, *n)).collect(),
    )
}

fn assert_invalid_revision(err: &SigError) {
    assert!(matches!(err, SigError::InvalidArgument(message) if message.contains("'revision'")));
}

// ============================================================================
// Classification
// ============================================================================

#[test]
fn test_commit_status_codes() {
    let cases = [
        ("G", CommitStatus::GoodSignature),
        ("B", CommitStatus::SignatureError),
        ("U", CommitStatus::SignatureError),
        ("X", CommitStatus::SignatureError),
        ("Y", CommitStatus::SignatureError),
        ("R", CommitStatus::SignatureError),
        ("E", CommitStatus::MissingPublicKey),
        ("N", CommitStatus::NoSignature),
        ("", CommitStatus::NoSignature),
        ("Q", CommitStatus::NoSignature),
        ("g", CommitStatus::NoSignature),
    ];
    for (code, expected) in cases {
        assert_eq!(CommitStatus::from_code(code), expected, "code {code:?}");
    }
}

#[test]
fn test_commit_status_uses_first_character() {
    assert_eq!(CommitStatus::from_code("G\n"), CommitStatus::GoodSignature);
    assert_eq!(CommitStatus::from_code("EG"), CommitStatus::MissingPublicKey);
}

#[test]
fn test_tag_status_from_verify_output() {
    let good = "[GNUPG:] NEWSIG\n[GNUPG:] GOODSIG 1234ABCD Jane <jane@example.com>\n\
                [GNUPG:] VALIDSIG AAAA 2026-01-01 0 0 4 0 1 10 00 BBBB\n";
    assert_eq!(TagStatus::from_verify_output(good), TagStatus::OneGood);

    assert_eq!(
        TagStatus::from_verify_output("error: no signature found\n"),
        TagStatus::TagNotSigned
    );
    assert_eq!(
        TagStatus::from_verify_output("[GNUPG:] ERRSIG 1234ABCD 1 10 00 0 9\n[GNUPG:] NO_PUBKEY 1234ABCD\n"),
        TagStatus::NoPubKey
    );
}

#[test]
fn test_tag_status_needs_both_good_markers() {
    assert_eq!(
        TagStatus::from_verify_output("[GNUPG:] GOODSIG 1234ABCD Jane\n"),
        TagStatus::Unknown
    );
    assert_eq!(
        TagStatus::from_verify_output("[GNUPG:] BADSIG 1234ABCD Jane\n"),
        TagStatus::Unknown
    );
    assert_eq!(TagStatus::from_verify_output(""), TagStatus::Unknown);
}

#[test]
fn test_status_display() {
    assert_eq!(CommitStatus::MissingPublicKey.to_string(), "missing public key");
    assert_eq!(TagStatus::Many.to_string(), "multiple tags");
    assert_eq!(
        serde_json::to_string(&TagStatus::TagNotSigned).unwrap(),
        "\"tag_not_signed\""
    );
}

// ============================================================================
// GnuPG status lines
// ============================================================================

#[test]
fn test_parse_status_lines_skips_noise() {
    let output = "gpg: Signature made Mon\r\n[GNUPG:] NEWSIG\r\n[GNUPG:] TRUST_UNDEFINED 0 pgp\n";
    let lines: Vec<_> = parse_status_lines(output).collect();
    assert_eq!(
        lines,
        vec![
            StatusLine {
                keyword: "NEWSIG",
                args: ""
            },
            StatusLine {
                keyword: "TRUST_UNDEFINED",
                args: "0 pgp"
            },
        ]
    );
}

#[test]
fn test_signer_from_good_signature() {
    let output = "[GNUPG:] GOODSIG 1234ABCD5678EF00 Jane Doe <jane@example.com>\n\
                  [GNUPG:] VALIDSIG SUBKEYFPR 2026-01-01 1767225600 0 4 0 1 10 00 PRIMARYFPR\n";
    let signer = signer_from_status(output).unwrap();
    assert_eq!(
        signer,
        SignerInfo {
            key_id: Some("1234ABCD5678EF00".to_string()),
            user_id: Some("Jane Doe <jane@example.com>".to_string()),
            fingerprint: Some("PRIMARYFPR".to_string()),
        }
    );
}

#[test]
fn test_signer_from_missing_key() {
    let output = "[GNUPG:] ERRSIG 1234ABCD5678EF00 1 10 00 1767225600 9 -\n\
                  [GNUPG:] NO_PUBKEY 1234ABCD5678EF00\n";
    let signer = signer_from_status(output).unwrap();
    assert_eq!(signer.key_id.as_deref(), Some("1234ABCD5678EF00"));
    assert!(signer.user_id.is_none());
    assert!(signer.fingerprint.is_none());
}

#[test]
fn test_signer_absent() {
    assert!(signer_from_status("error: no signature found\n").is_none());
    assert!(signer_from_status("").is_none());
}

// ============================================================================
// Controller
// ============================================================================

#[tokio::test]
async fn test_commit_status_runs_log() {
    let runner = FakeRunner::new(|_| GitOutput::new(0, "G", ""));
    let calls = runner.calls();
    let controller = GpgController::with_runner(runner);

    let status = controller
        .commit_signature_status(Some(&revision(&[])))
        .await
        .unwrap();

    assert_eq!(status, CommitStatus::GoodSignature);
    assert_eq!(
        *calls.lock().unwrap(),
        vec![vec![
            "log",
            "-1",
            "--no-show-signature",
            "--pretty=format:%G?",
            COMMIT
        ]]
    );
}

#[tokio::test]
async fn test_commit_status_empty_output() {
    let controller = GpgController::with_runner(FakeRunner::new(|_| GitOutput::new(0, "", "")));
    let status = controller
        .commit_signature_status(Some(&revision(&[])))
        .await
        .unwrap();
    assert_eq!(status, CommitStatus::NoSignature);
}

#[tokio::test]
async fn test_commit_verification_message_runs_log() {
    let runner = FakeRunner::new(|_| GitOutput::new(0, "", ""));
    let calls = runner.calls();
    let controller = GpgController::with_runner(runner);

    controller
        .commit_verification_message(Some(&revision(&[])))
        .await
        .unwrap();

    assert_eq!(
        *calls.lock().unwrap(),
        vec![vec![
            "log",
            "-1",
            "--no-show-signature",
            "--pretty=format:%GG",
            COMMIT
        ]]
    );
}

#[tokio::test]
async fn test_commit_verification_message_is_verbatim() {
    let text = "gpg: Signature made Mon\r\ngpg: Good signature from \"Jane\"\n\n";
    let controller = GpgController::with_runner(FakeRunner::new(move |_| GitOutput::new(0, text, "")));

    let message = controller
        .commit_verification_message(Some(&revision(&[])))
        .await
        .unwrap();
    assert_eq!(message, text);
}

#[tokio::test]
async fn test_tag_status_without_tags_runs_nothing() {
    let runner = FakeRunner::echo_tag_name();
    let calls = runner.calls();
    let controller = GpgController::with_runner(runner);

    let rev = revision(&["refs/heads/main", "refs/tags/light"]);
    let status = controller.tag_status(Some(&rev)).await.unwrap();

    assert_eq!(status, TagStatus::NoTag);
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_tag_status_many_runs_nothing() {
    let runner = FakeRunner::echo_tag_name();
    let calls = runner.calls();
    let controller = GpgController::with_runner(runner);

    let rev = revision(&["refs/tags/FirstTag^{}", "refs/tags/SecondTag^{}"]);
    let status = controller.tag_status(Some(&rev)).await.unwrap();

    assert_eq!(status, TagStatus::Many);
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_tag_status_single_tag() {
    let runner = FakeRunner::new(|_| GitOutput::new(1, "", "error: no signature found\n"));
    let calls = runner.calls();
    let controller = GpgController::with_runner(runner);

    let rev = revision(&["refs/tags/v1.0", "refs/tags/v1.0^{}"]);
    let status = controller.tag_status(Some(&rev)).await.unwrap();

    assert_eq!(status, TagStatus::TagNotSigned);
    assert_eq!(
        *calls.lock().unwrap(),
        vec![vec!["verify-tag", "--raw", "v1.0"]]
    );
}

#[tokio::test]
async fn test_tag_status_ignores_refs_outside_tags() {
    let runner = FakeRunner::new(|_| GitOutput::new(1, "", "error: no signature found\n"));
    let calls = runner.calls();
    let controller = GpgController::with_runner(runner);

    let rev = revision(&["refs/tags/v1^{}", "refs/original/refs/tags/v1^{}"]);
    let status = controller.tag_status(Some(&rev)).await.unwrap();

    assert_eq!(status, TagStatus::TagNotSigned);
    assert_eq!(*calls.lock().unwrap(), vec![vec!["verify-tag", "--raw", "v1"]]);
}

#[tokio::test]
async fn test_tag_status_backup_refs_only() {
    let runner = FakeRunner::echo_tag_name();
    let calls = runner.calls();
    let controller = GpgController::with_runner(runner);

    let rev = revision(&["refs/original/refs/tags/v1^{}"]);
    assert_eq!(
        controller.tag_status(Some(&rev)).await.unwrap(),
        TagStatus::NoTag
    );
    assert_eq!(
        controller.tag_verify_message(Some(&rev)).await.unwrap(),
        ""
    );
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_tag_status_unrecognised_output() {
    let controller = GpgController::with_runner(FakeRunner::echo_tag_name());
    let rev = revision(&["refs/tags/v1.0^{}"]);
    assert_eq!(
        controller.tag_status(Some(&rev)).await.unwrap(),
        TagStatus::Unknown
    );
}

#[tokio::test]
async fn test_tag_verify_message_no_tags() {
    let runner = FakeRunner::echo_tag_name();
    let calls = runner.calls();
    let controller = GpgController::with_runner(runner);

    let message = controller
        .tag_verify_message(Some(&revision(&["refs/heads/main"])))
        .await
        .unwrap();

    assert_eq!(message, "");
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_tag_verify_message_single_tag() {
    let controller = GpgController::with_runner(FakeRunner::echo_tag_name());
    let message = controller
        .tag_verify_message(Some(&revision(&["refs/tags/TagName^{}"])))
        .await
        .unwrap();
    assert_eq!(message, "TagName");
}

#[tokio::test]
async fn test_tag_verify_message_many_tags() {
    let runner = FakeRunner::echo_tag_name();
    let calls = runner.calls();
    let controller = GpgController::with_runner(runner);

    let rev = revision(&["refs/tags/FirstTag^{}", "refs/tags/SecondTag^{}"]);
    let message = controller.tag_verify_message(Some(&rev)).await.unwrap();

    assert_eq!(
        message,
        "FirstTag\r\nFirstTag\r\n\r\nSecondTag\r\nSecondTag\r\n\r\n"
    );
    assert_eq!(
        *calls.lock().unwrap(),
        vec![
            vec!["verify-tag", "--raw", "FirstTag"],
            vec!["verify-tag", "--raw", "SecondTag"],
        ]
    );
}

#[tokio::test]
async fn test_missing_revision_is_rejected() {
    let runner = FakeRunner::echo_tag_name();
    let calls = runner.calls();
    let controller = GpgController::with_runner(runner);

    assert_invalid_revision(&controller.commit_signature_status(None).await.unwrap_err());
    assert_invalid_revision(&controller.commit_verification_message(None).await.unwrap_err());
    assert_invalid_revision(&controller.tag_status(None).await.unwrap_err());
    assert_invalid_revision(&controller.tag_verify_message(None).await.unwrap_err());
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unbound_controller() {
    let controller: GpgController<FakeRunner> = GpgController::new();
    assert!(!controller.is_bound());

    let err = controller
        .commit_signature_status(Some(&revision(&[])))
        .await
        .unwrap_err();
    assert!(matches!(err, SigError::Git(ref e) if matches!(**e, GitError::NotBound)));

    // Zero tags never touches the runner, so an unbound controller still answers.
    assert_eq!(
        controller.tag_status(Some(&revision(&[]))).await.unwrap(),
        TagStatus::NoTag
    );
}

#[tokio::test]
async fn test_bind_once() {
    let controller = GpgController::new();
    assert!(
        controller
            .bind(FakeRunner::new(|_| GitOutput::new(0, "E", "")))
            .is_ok()
    );
    assert!(controller.bind(FakeRunner::echo_tag_name()).is_err());

    let status = controller
        .commit_signature_status(Some(&revision(&[])))
        .await
        .unwrap();
    assert_eq!(status, CommitStatus::MissingPublicKey);
}
