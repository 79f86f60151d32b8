//! Integration tests for the probe executables
//!
//! These run the built binaries the way a harness would and check only the
//! observable contract: verdict lines on stdout and the exit status.
//! The resource probe starves the host until killed, so its test is marked
//! with #[ignore] and can be run with:
//!   cargo test -- --ignored

use nix::sys::signal::Signal;
use std::io::Read;
use std::os::unix::process::ExitStatusExt;
use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

fn verdicts(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter(|l| l.starts_with("SUCCESS:") || l.starts_with("BLOCKED:"))
        .map(str::to_string)
        .collect()
}

/// Run a probe that never exits on its own, kill it after `budget`, and
/// return what it printed.
fn run_with_budget(bin: &str, budget: Duration) -> (String, std::process::ExitStatus) {
    let mut child = Command::new(bin)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn probe");

    thread::sleep(budget);
    child.kill().expect("kill probe");
    let status = child.wait().expect("reap probe");

    let mut stdout = String::new();
    child
        .stdout
        .take()
        .expect("piped stdout")
        .read_to_string(&mut stdout)
        .expect("read stdout");
    (stdout, status)
}

#[test]
fn test_filesystem_probe_without_home_does_not_crash() {
    let output: Output = Command::new(env!("CARGO_BIN_EXE_file_reading"))
        .env_remove("HOME")
        .output()
        .expect("run file_reading");

    assert!(output.status.success());
    let lines = verdicts(&output.stdout);
    assert_eq!(lines.len(), 2, "{:?}", lines);
    assert!(lines[1].starts_with("BLOCKED:"));
    assert!(lines[1].contains("target unavailable"));
}

#[test]
fn test_filesystem_probe_reads_home_config() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join(".bashrc"), "a\nb\nc\nd\ne\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_file_reading"))
        .env("HOME", home.path())
        .output()
        .expect("run file_reading");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let after: Vec<&str> = stdout
        .lines()
        .skip_while(|l| !l.ends_with(".bashrc:"))
        .collect();
    assert!(after[0].starts_with("SUCCESS: Could read"));
    assert_eq!(&after[1..], ["a", "b", "c"]);
}

#[test]
fn test_network_probe_emits_exactly_one_verdict() {
    let output = Command::new(env!("CARGO_BIN_EXE_network"))
        .output()
        .expect("run network");

    assert!(output.status.success());
    let lines = verdicts(&output.stdout);
    assert_eq!(lines.len(), 1, "{:?}", lines);
    assert!(lines[0].contains("8.8.8.8") || lines[0].contains("socket"));
}

#[test]
fn test_fault_probe_dies_by_segfault() {
    let output = Command::new(env!("CARGO_BIN_EXE_segfault"))
        .output()
        .expect("run segfault");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), None);
    assert_eq!(output.status.signal(), Some(Signal::SIGSEGV as i32));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("About to cause a segmentation fault..."));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("never be printed"));
}

#[test]
fn test_longevity_probe_can_be_cut_short() {
    let (stdout, status) = run_with_budget(
        env!("CARGO_BIN_EXE_process"),
        Duration::from_millis(2500),
    );

    assert_eq!(status.signal(), Some(Signal::SIGKILL as i32));
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "Starting long-running process...");
    assert_eq!(lines[1], "Running for 0 seconds...");
    assert!(lines.len() <= 5);
    assert!(!stdout.contains("Successfully ran"));
}

#[test]
#[ignore]
fn test_resource_probe_starts_all_workers() {
    let (stdout, status) = run_with_budget(
        env!("CARGO_BIN_EXE_resources"),
        Duration::from_secs(5),
    );

    assert!(!status.success());
    assert!(stdout.contains("Attempting to allocate 1GB of memory..."));
    let started = stdout
        .lines()
        .filter(|l| l.starts_with("Started CPU thread") || l.starts_with("BLOCKED: Could not start thread"))
        .count();
    assert_eq!(started, 4);
}
