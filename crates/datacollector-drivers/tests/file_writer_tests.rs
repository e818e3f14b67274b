#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use datacollector_core::{attr, with_app_name, App, Driver, Entry, Level, TRANSACTION_ENDED_MESSAGE};
use datacollector_drivers::{Encoding, FileWriter};
use tempfile::TempDir;

fn info_entry(message: &str) -> Entry {
    Entry::new(Level::Info, "Rotation", message, vec![], None)
}

/// Files in `dir` whose names start with `<base>.`
fn rotated_siblings(dir: &Path, base: &str) -> Vec<PathBuf> {
    let prefix = format!("{}.", base);
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with(&prefix))
                .unwrap_or(false)
        })
        .collect()
}

#[test]
fn test_creates_file_and_appends_plain_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plain.log");
    let writer = FileWriter::open(&path).unwrap();

    writer.record_log(&info_entry("first")).unwrap();
    writer.record_log(&info_entry("second")).unwrap();
    writer.close().unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("message:first"));
    assert!(lines[1].contains("message:second"));
    assert_eq!(writer.path(), path.as_path());
}

#[test]
fn test_existing_content_is_kept() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("existing.log");
    fs::write(&path, "earlier line\n").unwrap();

    let writer = FileWriter::open(&path).unwrap();
    writer.record_log(&info_entry("later")).unwrap();
    writer.close().unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("earlier line\n"));
    assert!(content.contains("message:later"));
}

#[test]
fn test_error_entry_is_flushed_immediately() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("flush.log");
    let writer = FileWriter::open(&path).unwrap();

    writer.record_log(&info_entry("buffered")).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "", "INFO stays buffered");

    writer
        .record_log(&Entry::new(Level::Error, "Rotation", "boom", vec![], None))
        .unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("message:buffered"));
    assert!(content.contains("level:ERROR"));
}

#[test]
fn test_explicit_flush_writes_buffer() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("explicit.log");
    let writer = FileWriter::open(&path).unwrap();

    writer.record_log(&info_entry("pending")).unwrap();
    writer.flush().unwrap();

    assert!(fs::read_to_string(&path).unwrap().contains("message:pending"));
}

#[test]
fn test_rotation_moves_prior_content_aside() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rotate.log");
    let writer = FileWriter::open_with_limit(&path, 64).unwrap();

    // One plain line is longer than the limit, so the second record rotates.
    writer.record_log(&info_entry("before rotation")).unwrap();
    assert!(rotated_siblings(dir.path(), "rotate.log").is_empty());

    writer.record_log(&info_entry("after rotation")).unwrap();
    writer.flush().unwrap();

    let siblings = rotated_siblings(dir.path(), "rotate.log");
    assert_eq!(siblings.len(), 1);
    let suffix = siblings[0]
        .extension()
        .and_then(|e| e.to_str())
        .unwrap()
        .to_string();
    assert!(suffix.chars().all(|c| c.is_ascii_digit()), "suffix {}", suffix);

    let old = fs::read_to_string(&siblings[0]).unwrap();
    assert!(old.contains("message:before rotation"));
    assert!(!old.contains("after rotation"));

    let fresh = fs::read_to_string(&path).unwrap();
    assert_eq!(fresh.lines().count(), 1);
    assert!(fresh.contains("message:after rotation"));
}

#[test]
fn test_failed_rotation_still_records_entries() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    let writer = FileWriter::open_with_limit(&path, 64).unwrap();

    writer.record_log(&info_entry("before")).unwrap();
    writer.flush().unwrap();
    // With the file gone the next rotation cannot rename it.
    fs::remove_file(&path).unwrap();

    for i in 0..3 {
        writer
            .record_log(&Entry::new(
                Level::Error,
                "Rotation",
                format!("kept-{}", i),
                vec![],
                None,
            ))
            .unwrap();
    }

    let mut all = fs::read_to_string(&path).unwrap();
    for sibling in rotated_siblings(dir.path(), "app.log") {
        all.push_str(&fs::read_to_string(sibling).unwrap());
    }
    for i in 0..3 {
        let message = format!("message:kept-{},", i);
        assert_eq!(all.matches(&message).count(), 1, "{} written once", message);
    }
}

#[test]
fn test_rotations_in_one_second_keep_every_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("burst.log");
    let writer = FileWriter::open_with_limit(&path, 1).unwrap();

    for i in 0..4 {
        writer.record_log(&info_entry(&format!("burst-{}", i))).unwrap();
    }
    writer.close().unwrap();

    let siblings = rotated_siblings(dir.path(), "burst.log");
    assert_eq!(siblings.len(), 3);
    let mut all = fs::read_to_string(&path).unwrap();
    for sibling in siblings {
        all.push_str(&fs::read_to_string(sibling).unwrap());
    }
    for i in 0..4 {
        assert!(all.contains(&format!("message:burst-{},", i)));
    }
}

#[test]
fn test_no_rotation_below_limit() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("small.log");
    let writer = FileWriter::open(&path).unwrap();

    for i in 0..100 {
        writer.record_log(&info_entry(&format!("m{}", i))).unwrap();
    }
    writer.close().unwrap();

    assert!(rotated_siblings(dir.path(), "small.log").is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 100);
}

#[test]
fn test_json_encoding_writes_pretty_objects() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("json.log");
    let writer = FileWriter::open(&path).unwrap();
    writer.set_encoding("json").unwrap();
    assert_eq!(writer.encoding(), Encoding::Json);

    writer
        .record_log(&Entry::new(
            Level::Warning,
            "Json",
            "careful",
            vec![attr("retries", 3)],
            None,
        ))
        .unwrap();
    writer.close().unwrap();

    let value: serde_json::Value =
        serde_json::from_str(fs::read_to_string(&path).unwrap().trim_end()).unwrap();
    assert_eq!(value["level"], "WARNING");
    assert_eq!(value["attributes"][0]["value"], 3);
    assert!(value.get("transaction_id").is_none());
}

#[test]
fn test_unknown_encoding_keeps_previous() {
    let dir = TempDir::new().unwrap();
    let writer = FileWriter::open(dir.path().join("enc.log")).unwrap();

    assert!(writer.set_encoding("yaml").is_err());
    assert_eq!(writer.encoding(), Encoding::Plain);
}

#[test]
fn test_open_in_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let err = FileWriter::open(dir.path().join("missing").join("app.log")).unwrap_err();

    assert_eq!(err.code(), "ERR_IO");
    assert!(err.path().unwrap().ends_with("app.log"));
}

#[test]
fn test_app_and_transaction_through_file_writer() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    let writer = Arc::new(FileWriter::open(&path).unwrap());
    let app = App::new(writer.clone(), [with_app_name("Example")]).unwrap();

    app.debug("Application started", &[attr("userID", "12345")]);
    let txn = app.start_transaction(&[]).unwrap();
    txn.debug("Transaction started", &[attr("database_name", "products")]);
    txn.end();
    txn.info("Attempting to write to a finished transaction", &[]);
    writer.close().unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("attributes:[{userID 12345}]"));
    assert!(lines[1].ends_with(&format!("transaction_id:{}", txn.id())));
    assert!(lines[2].contains("level:ERROR, app_name:Data Collector"));
    assert!(lines[2].contains(TRANSACTION_ENDED_MESSAGE));
    assert!(!lines[2].contains("transaction_id"));
}

#[test]
fn test_concurrent_writers_produce_whole_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("concurrent.log");
    let writer = Arc::new(FileWriter::open(&path).unwrap());
    let app = App::new(writer.clone(), []).unwrap();

    std::thread::scope(|s| {
        for worker in 0..10 {
            let app = &app;
            s.spawn(move || {
                for _ in 0..20 {
                    app.debug("Concurrent log message", &[attr("worker", worker)]);
                }
            });
        }
    });
    writer.close().unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 200);
    assert!(content.lines().all(|l| l.starts_with("time:")));
}
