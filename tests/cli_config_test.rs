use std::process::Command;
use tempfile::TempDir;

fn cmdwatch(dir: &TempDir) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_cmdwatch"));
    command.current_dir(dir.path()).env_remove("RUST_LOG");
    command
}

#[test]
fn test_init_command() {
    let temp_dir = TempDir::new().unwrap();

    let output = cmdwatch(&temp_dir)
        .arg("init")
        .output()
        .expect("Failed to run init command");

    assert!(output.status.success());

    let config_path = temp_dir.path().join(".cmdwatch/settings.toml");
    assert!(config_path.exists());

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("version = 1"));
    assert!(content.contains("command_file = \"command.txt\""));
    assert!(content.contains("[watch]"));

    // A second init without --force refuses to overwrite
    let output = cmdwatch(&temp_dir).arg("init").output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_config_command() {
    let temp_dir = TempDir::new().unwrap();

    let config_dir = temp_dir.path().join(".cmdwatch");
    std::fs::create_dir_all(&config_dir).unwrap();
    let config_content = r#"
version = 2
command_file = "inbox.txt"

[watch]
settle_ms = 250
"#;
    std::fs::write(config_dir.join("settings.toml"), config_content).unwrap();

    let output = cmdwatch(&temp_dir)
        .arg("config")
        .output()
        .expect("Failed to run config command");

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("version = 2"));
    assert!(stdout.contains("command_file = \"inbox.txt\""));
    assert!(stdout.contains("settle_ms = 250"));
}

#[test]
fn test_env_overrides_config_file() {
    let temp_dir = TempDir::new().unwrap();

    let config_dir = temp_dir.path().join(".cmdwatch");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("settings.toml"),
        "[watch]\nsettle_ms = 250\n",
    )
    .unwrap();

    let output = cmdwatch(&temp_dir)
        .arg("config")
        .env("CMDWATCH_WATCH__SETTLE_MS", "7")
        .env("CMDWATCH_COMMAND_FILE", "from-env.txt")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("settle_ms = 7"));
    assert!(stdout.contains("command_file = \"from-env.txt\""));
}

#[test]
fn test_run_executes_one_command() {
    let temp_dir = TempDir::new().unwrap();

    let output = cmdwatch(&temp_dir)
        .args(["run", "create", "a", "file", "notes/todo.txt"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(temp_dir.path().join("notes/todo.txt").is_file());

    let output = cmdwatch(&temp_dir)
        .args(["run", "add to the file notes/todo.txt this content: milk"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        std::fs::read_to_string(temp_dir.path().join("notes/todo.txt")).unwrap(),
        "milk"
    );
}

#[test]
fn test_run_fails_on_unknown_and_escaping_commands() {
    let temp_dir = TempDir::new().unwrap();

    let output = cmdwatch(&temp_dir)
        .args(["run", "make", "a", "file", "x"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let output = cmdwatch(&temp_dir)
        .args(["run", "create a file ../escaped.txt"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(!temp_dir.path().parent().unwrap().join("escaped.txt").exists());
}

#[test]
fn test_verbs_command() {
    let temp_dir = TempDir::new().unwrap();

    let output = cmdwatch(&temp_dir).arg("verbs").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("create a file <path>"));
    assert!(stdout.contains("file info <path>"));
}
