use super::{LogLevel, LogWriter};
use std::{
    fs,
    path::PathBuf,
    thread,
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};

fn temp_path(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("snaptui_log_{name}_{nanos}"))
}

fn wait_for_contents(path: &PathBuf, needle: &str) -> String {
    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        let contents = fs::read_to_string(path).unwrap_or_default();
        if contents.contains(needle) || Instant::now() >= deadline {
            return contents;
        }
        thread::sleep(Duration::from_millis(10));
    }
}

#[test]
fn flush_writes_queued_lines_in_order() {
    let dir = temp_path("order");
    let path = dir.join("nested").join("snaptui.log");
    let writer = LogWriter::to_file(path.clone());

    writer.write(LogLevel::Info, "batch started").expect("write info");
    writer.write(LogLevel::Debug, "exporting db1").expect("write debug");
    writer.flush().expect("flush");

    let contents = fs::read_to_string(&path).expect("read log");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("[INFO] batch started"));
    assert!(lines[1].ends_with("[DEBUG] exporting db1"));

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn error_lines_reach_disk_without_explicit_flush() {
    let dir = temp_path("urgent");
    let path = dir.join("snaptui.log");
    let writer = LogWriter::to_file(path.clone());

    writer.write(LogLevel::Error, "pg_dump failed for db7").expect("write error");

    let contents = wait_for_contents(&path, "db7");
    assert!(contents.contains("[ERROR] pg_dump failed for db7"));

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn flush_before_first_write_creates_nothing() {
    let dir = temp_path("idle");
    let path = dir.join("snaptui.log");
    let writer = LogWriter::to_file(path.clone());

    writer.flush().expect("flush without writer");
    assert!(!path.exists());
}

#[test]
fn unwritable_destination_is_reported_by_write() {
    let blocker = temp_path("blocker");
    fs::write(&blocker, b"not a directory").expect("create blocker file");
    let writer = LogWriter::to_file(blocker.join("snaptui.log"));

    assert!(writer.write(LogLevel::Info, "lost").is_err());

    let _ = fs::remove_file(blocker);
}

#[cfg(unix)]
#[test]
fn log_directory_and_file_are_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = temp_path("perms");
    let log_dir = dir.join("logs");
    let path = log_dir.join("snaptui.log");
    let writer = LogWriter::to_file(path.clone());

    writer.write(LogLevel::Info, "hello").expect("write");
    writer.flush().expect("flush");

    let dir_mode = fs::metadata(&log_dir).expect("dir metadata").permissions().mode() & 0o777;
    let file_mode = fs::metadata(&path).expect("file metadata").permissions().mode() & 0o777;
    assert_eq!(dir_mode, 0o700);
    assert_eq!(file_mode, 0o600);

    let _ = fs::remove_dir_all(dir);
}
