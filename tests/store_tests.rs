// Integration tests for the vault store
// These run every operation against a real file in a temporary directory

use credvault::codec::{CodecError, LineCodec};
use credvault::error::{Field, ValidationError};
use credvault::parser::FormatError;
use credvault::{StrengthTier, UpdateOutcome, VaultConfig, VaultError, VaultStore};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

fn setup() -> (TempDir, PathBuf, VaultStore) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vault.txt");
    let store = VaultStore::open(&path).unwrap();
    (dir, path, store)
}

fn file_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

// ============================================================================
// add / list_all
// ============================================================================

#[test]
fn test_add_then_list_shows_one_masked_entry() {
    let (_dir, path, store) = setup();

    store.add("example.com", "alice", "hunter2").unwrap();
    let entries = store.list_all().unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].website, "example.com");
    assert_eq!(entries[0].username, "alice");
    assert_eq!(entries[0].masked_password, "*******");

    let raw = fs::read_to_string(&path).unwrap();
    assert!(!raw.contains("hunter2"));
    assert!(raw.ends_with('\n'));
    assert_eq!(raw.lines().count(), 1);
}

#[test]
fn test_list_preserves_insertion_order_and_duplicates() {
    let (_dir, _path, store) = setup();

    store.add("b.com", "u1", "p1").unwrap();
    store.add("a.com", "u2", "p2").unwrap();
    store.add("b.com", "u3", "p3").unwrap();

    let websites: Vec<_> = store
        .list_all()
        .unwrap()
        .into_iter()
        .map(|e| e.website)
        .collect();
    assert_eq!(websites, vec!["b.com", "a.com", "b.com"]);
}

#[test]
fn test_list_on_missing_file_is_empty() {
    let (_dir, path, store) = setup();
    assert!(store.list_all().unwrap().is_empty());
    assert!(store.search("example.com").unwrap().is_empty());
    assert!(!path.exists());
}

#[test]
fn test_reads_lines_written_by_other_tools() {
    let (_dir, path, store) = setup();
    // base64("example.com||alice||hunter2")
    fs::write(&path, "ZXhhbXBsZS5jb218fGFsaWNlfHxodW50ZXIy\n").unwrap();

    let entries = store.list_all().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].username, "alice");
    assert_eq!(entries[0].masked_password.len(), 7);
}

#[test]
fn test_add_repairs_missing_trailing_newline() {
    let (_dir, path, store) = setup();
    fs::write(&path, "ZXhhbXBsZS5jb218fGFsaWNlfHxodW50ZXIy").unwrap();

    store.add("example.org", "bob", "pw").unwrap();

    assert_eq!(file_lines(&path).len(), 2);
    assert_eq!(store.list_all().unwrap().len(), 2);
}

#[test]
fn test_add_rejects_delimiter_in_field() {
    let (_dir, path, store) = setup();

    let err = store.add("example.com", "alice", "pa||ss").unwrap_err();
    assert!(matches!(
        err,
        VaultError::Validation(ValidationError::ContainsDelimiter {
            field: Field::Password,
            ..
        })
    ));
    assert!(!path.exists());
}

// ============================================================================
// Corruption
// ============================================================================

#[test]
fn test_wrong_field_count_fails_listing() {
    let (_dir, path, store) = setup();
    store.add("example.com", "alice", "hunter2").unwrap();

    let bad = LineCodec::new().encode("only||two");
    let mut content = fs::read_to_string(&path).unwrap();
    content.push_str(&bad);
    content.push('\n');
    fs::write(&path, content).unwrap();

    let err = store.list_all().unwrap_err();
    assert!(err.is_corruption());
    match err {
        VaultError::Format { line, source } => {
            assert_eq!(line, 2);
            assert_eq!(
                source,
                FormatError::FieldCount {
                    expected: 3,
                    found: 2
                }
            );
        }
        other => panic!("expected format error, got {other:?}"),
    }
}

#[test]
fn test_undecodable_line_fails_listing() {
    let (_dir, path, store) = setup();
    fs::write(&path, "this is not base64!\n").unwrap();

    let err = store.list_all().unwrap_err();
    assert!(matches!(err, VaultError::Codec { line: 1, .. }));
}

#[test]
fn test_non_utf8_line_is_reported_as_corruption() {
    let (_dir, path, store) = setup();
    store.add("example.com", "alice", "hunter2").unwrap();

    let mut content = fs::read(&path).unwrap();
    content.extend_from_slice(b"\xff\xfe\n");
    fs::write(&path, &content).unwrap();

    let err = store.list_all().unwrap_err();
    assert!(err.is_corruption());
    match err {
        VaultError::Codec { line, source } => {
            assert_eq!(line, 2);
            assert!(matches!(source, CodecError::InvalidLineUtf8(_)));
        }
        other => panic!("expected codec error, got {other:?}"),
    }

    assert!(store.update_password("example.com", "NewPass1!").is_err());
    assert_eq!(fs::read(&path).unwrap(), content);
}

#[test]
fn test_corruption_blocks_update_without_writing() {
    let (_dir, path, store) = setup();
    store.add("example.com", "alice", "hunter2").unwrap();
    let mut content = fs::read_to_string(&path).unwrap();
    content.push_str("@@@\n");
    fs::write(&path, &content).unwrap();

    assert!(store.update_password("example.com", "NewPass1!").is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), content);
}

#[test]
fn test_blank_lines_are_ignored() {
    let (_dir, path, store) = setup();
    fs::write(
        &path,
        "ZXhhbXBsZS5jb218fGFsaWNlfHxodW50ZXIy\n\n   \nZXhhbXBsZS5jb218fGFsaWNlfHxodW50ZXIy\n",
    )
    .unwrap();

    assert_eq!(store.list_all().unwrap().len(), 2);
}

// ============================================================================
// update_password
// ============================================================================

#[test]
fn test_update_matches_case_insensitively_and_preserves_others() {
    let (_dir, path, store) = setup();
    store.add("first.org", "u1", "one").unwrap();
    store.add("example.com", "alice", "hunter2").unwrap();
    store.add("last.net", "u3", "three").unwrap();
    let before = file_lines(&path);

    let outcome = store.update_password("Example.com", "NewPass1!").unwrap();
    assert_eq!(
        outcome,
        UpdateOutcome::Updated {
            matched: 1,
            strength: StrengthTier::VeryStrong
        }
    );

    let after = file_lines(&path);
    assert_eq!(after.len(), 3);
    assert_eq!(after[0], before[0]);
    assert_ne!(after[1], before[1]);
    assert_eq!(after[2], before[2]);

    let found = store.search("example.com").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].username, "alice");
    assert_eq!(found[0].masked_password, "*********");
    assert!(!fs::read_to_string(&path).unwrap().contains("NewPass1!"));
}

#[test]
fn test_update_applies_to_every_match() {
    let (_dir, _path, store) = setup();
    store.add("example.com", "alice", "a").unwrap();
    store.add("other.com", "carol", "c").unwrap();
    store.add("EXAMPLE.COM", "bob", "bb").unwrap();

    let outcome = store.update_password("example.com", "longer-password").unwrap();
    assert!(matches!(outcome, UpdateOutcome::Updated { matched: 2, .. }));

    let entries = store.list_all().unwrap();
    let masks: Vec<_> = entries.iter().map(|e| e.masked_password.len()).collect();
    assert_eq!(masks, vec![15, 1, 15]);
    // Stored website spelling is kept.
    assert_eq!(entries[2].website, "EXAMPLE.COM");
}

#[test]
fn test_update_keeps_crlf_endings_of_untouched_lines() {
    let (_dir, path, store) = setup();
    let codec = LineCodec::new();
    let first = codec.encode("first.org||u1||one");
    let target = codec.encode("example.com||alice||hunter2");
    let last = codec.encode("last.net||u3||three");
    fs::write(&path, format!("{first}\r\n{target}\r\n{last}\r\n")).unwrap();

    let outcome = store.update_password("example.com", "changed").unwrap();
    assert!(matches!(outcome, UpdateOutcome::Updated { matched: 1, .. }));

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.starts_with(&format!("{first}\r\n")));
    assert!(raw.ends_with(&format!("{last}\r\n")));
    assert_eq!(store.list_all().unwrap().len(), 3);
    assert_eq!(store.search("example.com").unwrap()[0].masked_password, "*******");
}

#[test]
fn test_update_not_found_leaves_file_identical() {
    let (_dir, path, store) = setup();
    store.add("example.com", "alice", "hunter2").unwrap();
    let before = fs::read(&path).unwrap();

    let outcome = store.update_password("nosuch.com", "x").unwrap();
    assert_eq!(outcome, UpdateOutcome::NotFound);
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_update_on_missing_vault_is_not_found() {
    let (_dir, path, store) = setup();
    assert_eq!(
        store.update_password("example.com", "pw").unwrap(),
        UpdateOutcome::NotFound
    );
    assert!(!path.exists());
}

#[test]
fn test_update_rejects_empty_password() {
    let (_dir, path, store) = setup();
    store.add("example.com", "alice", "hunter2").unwrap();
    let before = fs::read(&path).unwrap();

    let err = store.update_password("example.com", "").unwrap_err();
    assert!(matches!(
        err,
        VaultError::Validation(ValidationError::EmptyField(Field::Password))
    ));
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_update_leaves_no_temp_files_behind() {
    let (dir, _path, store) = setup();
    store.add("example.com", "alice", "hunter2").unwrap();
    store.update_password("example.com", "changed").unwrap();

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

// ============================================================================
// search
// ============================================================================

#[test]
fn test_search_is_exact_and_read_only() {
    let (_dir, path, store) = setup();
    store.add("example.com", "alice", "hunter2").unwrap();
    store.add("example.com.evil", "mallory", "x").unwrap();
    let before = fs::read(&path).unwrap();

    let found = store.search("EXAMPLE.com").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].username, "alice");
    assert_eq!(fs::read(&path).unwrap(), before);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_custom_delimiter_and_mask() {
    let dir = tempdir().unwrap();
    let config = VaultConfig::new(dir.path().join("creds.txt"))
        .with_delimiter("::")
        .with_mask_char('#');
    let store = VaultStore::new(config).unwrap();

    store.add("example.com", "a||b", "pw").unwrap();
    let entries = store.list_all().unwrap();
    assert_eq!(entries[0].username, "a||b");
    assert_eq!(entries[0].masked_password, "##");
}

// ============================================================================
// Concurrent writers
// ============================================================================

#[test]
fn test_concurrent_writers_do_not_lose_records() {
    const WRITERS: usize = 6;
    const ROUNDS: usize = 15;

    let (_dir, path, store) = setup();
    store.add("shared.com", "seed", "seed").unwrap();

    let handles: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let path = path.clone();
            std::thread::spawn(move || {
                // Each writer has its own store and so its own lock handle.
                let store = VaultStore::open(&path).unwrap();
                for round in 0..ROUNDS {
                    store
                        .add(&format!("site{writer}.com"), "user", &format!("pw{round}"))
                        .unwrap();
                    store
                        .update_password("shared.com", &format!("w{writer}r{round}"))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let entries = store.list_all().unwrap();
    assert_eq!(entries.len(), 1 + WRITERS * ROUNDS);
    assert_eq!(file_lines(&path).len(), 1 + WRITERS * ROUNDS);
    for writer in 0..WRITERS {
        let found = store.search(&format!("site{writer}.com")).unwrap();
        assert_eq!(found.len(), ROUNDS);
    }
}
