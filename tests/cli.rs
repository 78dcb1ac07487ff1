//! End-to-end tests for the flatten binary

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn run_flatten(dir: &Path, args: &[&str]) -> (String, bool) {
    let binary = env!("CARGO_BIN_EXE_flatten");
    let output = Command::new(binary)
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run flatten");

    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stderr, output.status.success())
}

fn create_sample_tree() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let input = temp.path().join("in");
    fs::create_dir_all(input.join("sub")).unwrap();
    fs::write(input.join("a.txt"), "0123456789").unwrap();
    fs::write(input.join("sub/b.txt"), "01234567890123456789").unwrap();
    fs::write(input.join("sub/c.LOG"), vec![b'x'; 3000]).unwrap();
    temp
}

#[test]
fn test_flatten_everything() {
    let temp = create_sample_tree();

    let (stderr, success) = run_flatten(temp.path(), &["in", "out"]);
    assert!(success, "flatten should succeed: {stderr}");
    assert!(temp.path().join("out/a.txt").is_file());
    assert!(temp.path().join("out/b.txt").is_file());
    assert!(temp.path().join("out/c.LOG").is_file());
    assert!(stderr.contains("Linked 3 files"), "summary: {stderr}");
    assert!(stderr.contains("flatten complete"), "info logs: {stderr}");
    assert!(!stderr.contains("DEBUG"), "no debug logs by default: {stderr}");
}

#[test]
fn test_verbose_logs_each_link() {
    let temp = create_sample_tree();

    let (stderr, success) = run_flatten(temp.path(), &["-v", "in", "out"]);
    assert!(success, "{stderr}");
    assert!(stderr.contains("DEBUG"), "debug logs: {stderr}");
}

#[test]
fn test_filetype_flag() {
    let temp = create_sample_tree();

    let (stderr, success) = run_flatten(temp.path(), &["-t", "log", "in", "out"]);
    assert!(success, "{stderr}");
    assert!(temp.path().join("out/c.LOG").is_file());
    assert!(!temp.path().join("out/a.txt").exists());
}

#[test]
fn test_size_flags() {
    let temp = create_sample_tree();

    let (stderr, success) = run_flatten(temp.path(), &["--minsize", "15", "-M", "2kb", "in", "out"]);
    assert!(success, "{stderr}");
    assert!(temp.path().join("out/b.txt").is_file());
    assert!(!temp.path().join("out/a.txt").exists());
    assert!(!temp.path().join("out/c.LOG").exists());
}

#[test]
fn test_decimal_flag() {
    let temp = create_sample_tree();
    // 2950 bytes: above 2.9k decimal (2900), below 2.9k binary (2970).
    fs::write(temp.path().join("in/d.bin"), vec![b'y'; 2950]).unwrap();

    let (stderr, success) = run_flatten(temp.path(), &["--decimal", "-m", "2.9k", "in", "out"]);
    assert!(success, "{stderr}");
    assert!(temp.path().join("out/d.bin").is_file());
    assert!(temp.path().join("out/c.LOG").is_file());
    assert!(!temp.path().join("out/b.txt").exists());

    let (stderr, success) = run_flatten(temp.path(), &["-m", "2.9k", "in", "binary"]);
    assert!(success, "{stderr}");
    assert!(!temp.path().join("binary/d.bin").exists());
    assert!(temp.path().join("binary/c.LOG").is_file());
}

#[test]
fn test_bad_size_fails_before_touching_disk() {
    let temp = create_sample_tree();

    let (stderr, success) = run_flatten(temp.path(), &["-m", "5x", "in", "out"]);
    assert!(!success);
    assert!(stderr.contains("Invalid --minsize"), "{stderr}");
    assert!(stderr.contains("Not a valid size spec"), "{stderr}");
    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_inverted_range_is_rejected() {
    let temp = create_sample_tree();

    let (stderr, success) = run_flatten(temp.path(), &["-m", "2k", "-M", "1k", "in", "out"]);
    assert!(!success);
    assert!(stderr.contains("Invalid configuration"), "{stderr}");
}

#[test]
fn test_collision_reports_error() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("in");
    fs::create_dir_all(input.join("sub1")).unwrap();
    fs::create_dir_all(input.join("sub2")).unwrap();
    fs::write(input.join("sub1/x.dat"), "1").unwrap();
    fs::write(input.join("sub2/x.dat"), "2").unwrap();

    let (stderr, success) = run_flatten(temp.path(), &["in", "out"]);
    assert!(!success);
    assert!(stderr.contains("Destination already exists"), "{stderr}");
    assert!(temp.path().join("out/x.dat").is_file());
}

#[test]
fn test_missing_arguments() {
    let temp = TempDir::new().unwrap();

    let (_stderr, success) = run_flatten(temp.path(), &["in"]);
    assert!(!success);
}
