//! Runs in its own process because `init_tracing` installs the global subscriber.

use configuration::{Logging, init_tracing};
use tempfile::tempdir;

#[test]
fn log_directory_receives_timestamped_lines() {
    let dir = tempdir().unwrap();
    let settings = Logging {
        level: "info".to_string(),
        directory: Some(dir.path().to_path_buf()),
    };

    let guard = init_tracing(&settings).unwrap();
    assert!(guard.is_some());
    tracing::warn!("variance is not finite");
    drop(guard);

    let log_file = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .find(|path| path.is_file())
        .expect("a rolling log file");
    let contents = std::fs::read_to_string(log_file).unwrap();

    let line = contents
        .lines()
        .find(|line| line.contains("variance is not finite"))
        .expect("the event was written");
    assert!(!line.contains("<unknown time>"));
    assert!(line.starts_with(|c: char| c.is_ascii_digit()));
}
