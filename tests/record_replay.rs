//! Record-replay round trip through the binary.
//!
//! 1. List a fixture with `DIRENTS_RECORD` set, capturing a cassette.
//! 2. Delete the fixture.
//! 3. Replay with `DIRENTS_REPLAY` and assert identical output.

use std::path::Path;
use std::process::{Command, Output};

use dirents::cassette::format::{Cassette, Method, Outcome};

fn run_with_env(args: &[&str], var: &str, value: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dirents"))
        .args(args)
        .env_remove("DIRENTS_RECORD")
        .env_remove("DIRENTS_REPLAY")
        .env_remove("DIRENTS_FORMAT")
        .env(var, value)
        .output()
        .expect("failed to run dirents binary")
}

#[test]
fn recorded_listing_replays_after_fixture_is_gone() {
    let work = tempfile::tempdir().unwrap();
    let fixture = work.path().join("fixture");
    std::fs::create_dir_all(fixture.join("dir1")).unwrap();
    std::fs::write(fixture.join("file3"), "").unwrap();
    let cassette = work.path().join("cassettes").join("session.yaml");
    let fixture_arg = fixture.to_str().unwrap();

    // --- Record ---
    let recorded = run_with_env(&["list", fixture_arg, "--sort"], "DIRENTS_RECORD", &cassette);
    assert!(recorded.status.success());
    assert!(String::from_utf8_lossy(&recorded.stderr).contains("Recording saved to"));

    let saved = Cassette::load(&cassette).unwrap();
    assert_eq!(saved.interactions.len(), 1);
    assert_eq!(saved.interactions[0].method, Method::ReadDirents);
    assert!(matches!(
        &saved.interactions[0].outcome,
        Outcome::Entries { entries } if entries.len() == 2
    ));

    std::fs::remove_dir_all(&fixture).unwrap();

    // --- Replay, twice for determinism ---
    for _ in 0..2 {
        let replayed =
            run_with_env(&["list", fixture_arg, "--sort"], "DIRENTS_REPLAY", &cassette);
        assert!(replayed.status.success(), "{}", String::from_utf8_lossy(&replayed.stderr));
        assert_eq!(replayed.stdout, recorded.stdout);
    }
}

#[test]
fn recorded_failure_replays_as_same_error() {
    let work = tempfile::tempdir().unwrap();
    let missing = work.path().join("missing");
    let cassette = work.path().join("failure.yaml");
    let missing_arg = missing.to_str().unwrap();

    let recorded = run_with_env(&["names", missing_arg], "DIRENTS_RECORD", &cassette);
    assert!(!recorded.status.success());
    assert!(cassette.exists(), "cassette should be saved even when the command fails");

    let replayed = run_with_env(&["names", missing_arg], "DIRENTS_REPLAY", &cassette);
    assert!(!replayed.status.success());
    let stderr = String::from_utf8_lossy(&replayed.stderr);
    assert!(stderr.contains("not found"), "{stderr}");
}

#[test]
fn replaying_an_unrecorded_directory_fails() {
    let work = tempfile::tempdir().unwrap();
    let cassette = work.path().join("empty.yaml");
    let yaml = "name: empty\nrecorded_at: 2025-03-15T14:30:00Z\ninteractions: []\n";
    std::fs::write(&cassette, yaml).unwrap();

    let output = run_with_env(&["list", "/anywhere"], "DIRENTS_REPLAY", &cassette);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no ReadDirents recorded"));
}

#[test]
fn unwritable_cassette_does_not_hide_listing_error() {
    let work = tempfile::tempdir().unwrap();
    let blocker = work.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    // The cassette's parent is a regular file, so saving fails.
    let cassette = blocker.join("session.yaml");
    let missing = work.path().join("missing");

    let output = run_with_env(&["list", missing.to_str().unwrap()], "DIRENTS_RECORD", &cassette);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"), "{stderr}");
    assert!(stderr.contains("Failed to write cassette"), "{stderr}");
}

#[test]
fn unwritable_cassette_fails_a_successful_listing() {
    let work = tempfile::tempdir().unwrap();
    let blocker = work.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let cassette = blocker.join("session.yaml");

    let output =
        run_with_env(&["names", work.path().to_str().unwrap()], "DIRENTS_RECORD", &cassette);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to write cassette"), "{stderr}");
}
