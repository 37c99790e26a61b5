//! CLI smoke tests: basic binary behavior.

use std::io::Write;
use std::process::{Command, Stdio};

fn cli_bin(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_companion"));
    cmd.current_dir(dir.path())
        .env_remove("OPENAI_API_KEY")
        .env_remove("LLM_PROVIDER")
        .env_remove("LLM_MODEL");
    cmd
}

#[test]
fn test_help_flag() {
    let dir = tempfile::tempdir().unwrap();
    let output = cli_bin(&dir).arg("--help").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"), "Expected usage info in --help output");
    assert!(stdout.contains("--memory-file"));
}

#[test]
fn test_version_flag() {
    let dir = tempfile::tempdir().unwrap();
    let output = cli_bin(&dir).arg("--version").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("companion"), "Expected binary name in --version output");
}

#[test]
fn test_missing_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let output = cli_bin(&dir)
        .arg("--config")
        .arg(dir.path().join("nonexistent.toml"))
        .arg("--provider")
        .arg("mock")
        .stdin(Stdio::null())
        .output()
        .expect("failed to run");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("AI Companion Alex is ready to chat!"));
}

#[test]
fn test_malformed_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("companion.toml");
    std::fs::write(&config, "[llm\nmodel = ").unwrap();
    let output = cli_bin(&dir)
        .arg("--config")
        .arg(&config)
        .arg("--provider")
        .arg("mock")
        .stdin(Stdio::null())
        .output()
        .expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ready to chat"));
    assert!(stdout.contains("Goodbye!"));
}

#[test]
fn test_missing_api_key_blocks_startup() {
    let dir = tempfile::tempdir().unwrap();
    let output = cli_bin(&dir)
        .arg("--provider")
        .arg("openai")
        .stdin(Stdio::null())
        .output()
        .expect("failed to run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Please set your OpenAI API key"));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("ready to chat"));
}

#[test]
fn test_placeholder_api_key_blocks_startup() {
    let dir = tempfile::tempdir().unwrap();
    let output = cli_bin(&dir)
        .arg("--provider")
        .arg("openai")
        .env("OPENAI_API_KEY", "sk-your-openai-api-key-here")
        .stdin(Stdio::null())
        .output()
        .expect("failed to run");
    assert!(!output.status.success());
}

#[test]
fn test_mock_session_runs_commands_and_exits() {
    let dir = tempfile::tempdir().unwrap();
    let mut child = cli_bin(&dir)
        .arg("--provider")
        .arg("mock")
        .arg("--memory-file")
        .arg(dir.path().join("ltm.json"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"\n/help\nhello there\n/exit\n")
        .unwrap();
    let output = child.wait_with_output().expect("failed to wait");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("AI Companion Alex is ready to chat!"));
    assert!(stdout.contains("Available commands:"));
    assert!(stdout.contains("Alex: (Mock gpt-3.5-turbo Response) I received your prompt."));
    assert!(stdout.contains("Goodbye! Have a great day!"));
}

#[test]
fn test_end_of_input_says_goodbye() {
    let dir = tempfile::tempdir().unwrap();
    let output = cli_bin(&dir)
        .arg("--provider")
        .arg("mock")
        .stdin(Stdio::null())
        .output()
        .expect("failed to run");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Goodbye!"));
}
