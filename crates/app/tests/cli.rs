//! Runs the `santa` binary end to end

mod common;

use std::fs;
use std::process::Command;

fn santa(dir: &std::path::Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_santa"));
    command.current_dir(dir).env_remove("RUST_LOG");
    command
}

#[test]
fn test_demo_prints_pairs() {
    let dir = common::workspace();
    let output = santa(dir.path())
        .args(["draw", "--demo", "--in", "in"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let pairs: Vec<(String, String)> = stdout
        .lines()
        .map(|line| {
            let (giver, recipient) = line.split_once(" -> ").unwrap();
            (giver.to_string(), recipient.to_string())
        })
        .collect();
    assert_eq!(pairs.len(), 3);
    common::assert_valid_pairs(&pairs);
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_native_draw_writes_archive() {
    let dir = common::workspace();
    let output = santa(dir.path())
        .args(["draw", "--encryptor", "native", "--strategy", "cyclic"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        common::read_archive(&dir.path().join("out/results.zip")).len(),
        2 + common::PARTICIPANTS.len()
    );
}

#[test]
fn test_config_file_is_picked_up() {
    let dir = common::workspace();
    fs::write(
        dir.path().join("santa.toml"),
        "output = \"sealed.zip\"\nencryptor = \"native\"\nstrategy = \"cyclic\"\n",
    )
    .unwrap();

    let output = santa(dir.path()).arg("draw").output().unwrap();

    assert!(output.status.success());
    assert!(dir.path().join("sealed.zip").is_file());
}

#[test]
fn test_missing_input_exits_nonzero() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = santa(dir.path())
        .args(["draw", "--demo", "--in", "nowhere"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(!output.stderr.is_empty());
}

#[test]
fn test_missing_config_exits_nonzero() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = santa(dir.path())
        .args(["--config", "absent.toml", "version"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_version() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = santa(dir.path()).arg("version").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with(concat!("santa ", env!("CARGO_PKG_VERSION"))));
}
