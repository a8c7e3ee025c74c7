//! End-to-end tests for the command file loop

use std::fs;
use std::sync::Arc;

use cmdwatch::logging::{MemorySink, Severity};
use cmdwatch::watcher::{ChangeEvent, ChangeLoop, CycleResult};
use cmdwatch::{Interpreter, LocalFs, OperationExecutor, PathGuard};
use tempfile::TempDir;
use tokio::sync::mpsc;

struct Harness {
    temp_dir: TempDir,
    change_loop: ChangeLoop<LocalFs, Arc<MemorySink>>,
    sink: Arc<MemorySink>,
}

impl Harness {
    fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let sink = Arc::new(MemorySink::new());
        let executor =
            OperationExecutor::new(PathGuard::new(temp_dir.path()).unwrap(), LocalFs::new());
        let interpreter = Interpreter::new(executor, sink.clone());
        let change_loop = ChangeLoop::new(temp_dir.path().join("command.txt"), interpreter, 0);

        Self {
            temp_dir,
            change_loop,
            sink,
        }
    }

    async fn write(&mut self, command: &str) -> CycleResult {
        fs::write(self.change_loop.command_file(), command).unwrap();
        self.change_loop.on_change().await
    }
}

#[tokio::test]
async fn test_create_then_delete() {
    let mut harness = Harness::new();

    assert_eq!(
        harness.write("create a file ./a.txt").await,
        CycleResult::Executed
    );
    assert!(harness.temp_dir.path().join("a.txt").exists());

    assert_eq!(
        harness.write("delete the file ./a.txt").await,
        CycleResult::Executed
    );
    assert!(!harness.temp_dir.path().join("a.txt").exists());

    // One line per command
    assert_eq!(harness.sink.len(), 2);
    assert_eq!(harness.sink.count(Severity::Success), 2);
}

#[tokio::test]
async fn test_repeated_notifications_execute_once() {
    let mut harness = Harness::new();

    harness
        .write("add to the file log.txt this content: entry;")
        .await;
    for _ in 0..3 {
        assert_eq!(
            harness.change_loop.on_change().await,
            CycleResult::Duplicate
        );
    }

    assert_eq!(
        fs::read_to_string(harness.temp_dir.path().join("log.txt")).unwrap(),
        "entry;"
    );
    assert_eq!(harness.sink.len(), 1);
}

#[tokio::test]
async fn test_append_accumulates_distinct_commands() {
    let mut harness = Harness::new();

    harness.write("add to the file out.txt this content: a").await;
    harness.write("add to the file out.txt this content: b").await;

    assert_eq!(
        fs::read_to_string(harness.temp_dir.path().join("out.txt")).unwrap(),
        "ab"
    );
}

#[tokio::test]
async fn test_create_twice_warns_once() {
    let mut harness = Harness::new();

    harness.write("create a file twice.txt").await;
    // Identical text would be suppressed as a duplicate, so vary it.
    harness.write("create a file ./twice.txt").await;

    assert_eq!(harness.sink.count(Severity::Success), 1);
    assert_eq!(harness.sink.count(Severity::Warn), 1);
    assert!(
        fs::read(harness.temp_dir.path().join("twice.txt"))
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_rename_conflict_leaves_both_files() {
    let mut harness = Harness::new();
    let root = harness.temp_dir.path().to_path_buf();
    fs::write(root.join("old.txt"), "old").unwrap();
    fs::write(root.join("new.txt"), "new").unwrap();

    harness.write("rename the file old.txt to new.txt").await;

    assert_eq!(fs::read_to_string(root.join("old.txt")).unwrap(), "old");
    assert_eq!(fs::read_to_string(root.join("new.txt")).unwrap(), "new");
    assert_eq!(harness.sink.count(Severity::Warn), 1);
}

#[tokio::test]
async fn test_malformed_rename_does_nothing() {
    let mut harness = Harness::new();
    let root = harness.temp_dir.path().to_path_buf();
    fs::write(root.join("a.txt"), "a").unwrap();

    assert_eq!(
        harness.write("rename the file ./a.txt ./b.txt").await,
        CycleResult::Rejected
    );
    assert!(root.join("a.txt").exists());
    assert!(!root.join("b.txt").exists());
    assert_eq!(harness.sink.count(Severity::Error), 1);
}

#[tokio::test]
async fn test_copy_then_read() {
    let mut harness = Harness::new();
    let root = harness.temp_dir.path().to_path_buf();
    fs::write(root.join("src.txt"), "payload").unwrap();

    harness.write("copy the file src.txt to backup/src.txt").await;
    harness.write("read the file backup/src.txt").await;

    let records = harness.sink.records();
    assert_eq!(records.len(), 2);
    assert!(records[1].message.ends_with("payload"));
}

#[tokio::test]
async fn test_list_defaults_to_sandbox_root() {
    let mut harness = Harness::new();
    let root = harness.temp_dir.path().to_path_buf();
    fs::create_dir(root.join("docs")).unwrap();
    fs::write(root.join("readme.txt"), "hi").unwrap();

    harness.write("list the directory").await;

    let records = harness.sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].severity, Severity::Success);
    assert!(records[0].message.contains("[DIR] docs"));
    assert!(records[0].message.contains("[FILE] readme.txt"));
    // The command file itself lives in the sandbox root
    assert!(records[0].message.contains("[FILE] command.txt"));
}

#[tokio::test]
async fn test_traversal_to_sibling_is_rejected() {
    let mut harness = Harness::new();
    let root = harness.temp_dir.path().to_path_buf();
    let sibling = format!("{}-other/x.txt", root.display());

    harness.write(&format!("create a file {sibling}")).await;

    assert_eq!(harness.sink.count(Severity::Error), 1);
    assert!(!std::path::Path::new(&sibling).exists());
}

#[tokio::test]
async fn test_run_drops_notifications_during_processing() {
    let harness = Harness::new();
    fs::write(
        harness.change_loop.command_file(),
        "add to the file once.txt this content: x",
    )
    .unwrap();

    let (tx, rx) = mpsc::channel(8);
    let producer = tokio::spawn(async move {
        for _ in 0..8 {
            if tx.send(ChangeEvent).await.is_err() {
                break;
            }
        }
    });

    harness.change_loop.run(rx).await.unwrap();
    producer.await.unwrap();

    assert_eq!(
        fs::read_to_string(harness.temp_dir.path().join("once.txt")).unwrap(),
        "x"
    );
    assert_eq!(harness.sink.len(), 1);
}
