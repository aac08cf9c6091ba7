use super::*;
use crate::commit::CommitHeaders;
use crate::testing::{failure, MockRepository};

const ID: &str = "0123456789abcdef0123456789abcdef01234567";

fn record(signed: bool) -> CommitRecord {
    CommitRecord {
        id: ID.to_string(),
        headers: CommitHeaders {
            gpgsig: signed,
            ..CommitHeaders::default()
        },
        message: Vec::new(),
    }
}

fn context(skip_gpg: bool) -> CheckContext {
    CheckContext {
        now: 1_700_000_000,
        clock_drift_tolerance: 0,
        skip_gpg,
    }
}

#[test]
fn test_unsigned_commit_is_not_verified() {
    let repository = MockRepository::new();

    let outcome = check_signature(&record(false), &context(false), &repository);

    assert!(outcome.is_ok());
    assert!(repository.verified.lock().unwrap().is_empty());
}

#[test]
fn test_good_signature_passes() {
    let repository = MockRepository::new();

    let outcome = check_signature(&record(true), &context(false), &repository);

    assert!(outcome.is_ok());
    assert_eq!(*repository.verified.lock().unwrap(), vec![ID.to_string()]);
}

#[test]
fn test_bad_signature_is_an_error() {
    let repository = MockRepository::new()
        .with_verify_output(ID, failure("gpg: Can't check signature: No public key"));

    let outcome = check_signature(&record(true), &context(false), &repository);

    assert_eq!(outcome.errors, vec!["cannot verify gpg-sig: exit status: 1"]);
}

#[test]
fn test_skipped_verification_ignores_bad_signature() {
    let repository = MockRepository::new().with_verify_output(ID, failure(""));

    let outcome = check_signature(&record(true), &context(true), &repository);

    assert!(outcome.is_ok());
    assert!(repository.verified.lock().unwrap().is_empty());
}
