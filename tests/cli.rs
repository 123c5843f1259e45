//! Integration tests for the fuzzy-washer binary

use std::process::Command;

fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_fuzzy-washer"))
        .args(args)
        .env_remove("FUZZY_WASHER_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_no_arguments() {
    let (stdout, stderr, code) = run_cli(&[]);

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Usage"), "stderr: {stderr}");
}

#[test]
fn test_missing_operands() {
    let (stdout, stderr, code) = run_cli(&["infer"]);

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(!stderr.is_empty());

    let (_stdout, stderr, code) = run_cli(&["infer", "0.25"]);

    assert_eq!(code, 1);
    assert!(!stderr.is_empty());
}

#[test]
fn test_help_is_not_an_error() {
    let (stdout, _stderr, code) = run_cli(&["--help"]);

    assert_eq!(code, 0);
    assert!(stdout.contains("infer"));
}

#[test]
fn test_infer() {
    let (stdout, stderr, code) = run_cli(&["infer", "0.25", "4.0"]);

    assert_eq!(code, 0, "stderr: {stderr}");
    assert_eq!(
        stdout,
        "debug run: infer(0.25, 4.0)\nret value: ([0.0, 1.0, 0.0, 0.0], [0.0, 40.0, 0.0, 0.0])\n"
    );
}

#[test]
fn test_wash_echoes_floats() {
    let (stdout, _stderr, code) = run_cli(&["wash", "0.25", "4"]);

    assert_eq!(code, 0);
    assert_eq!(stdout, "debug run: wash(0.25, 4.0)\nret value: 42.0\n");
}

#[test]
fn test_all_rules_silent() {
    let (stdout, stderr, code) = run_cli(&["temperature", "--strengths", "0,0,0,0", "--outputs", "0,0,0,0"]);

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(
        stderr.contains("division by zero: every rule antecedent has zero strength"),
        "stderr: {stderr}"
    );
}

#[test]
fn test_non_finite_strength() {
    let (stdout, stderr, code) = run_cli(&["temperature", "--strengths", "NaN", "--outputs", "1"]);

    assert_eq!(code, 1);
    assert!(!stdout.contains("NaN"));
    assert!(stderr.contains("not a finite number"), "stderr: {stderr}");
}

#[test]
fn test_config_file() {
    let config = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/washer.toml");
    let (stdout, stderr, code) = run_cli(&["--config", config, "wash", "2.5", "11"]);

    assert_eq!(code, 0, "stderr: {stderr}");
    assert_eq!(stdout, "debug run: wash(2.5, 11.0)\nret value: 90.0\n");

    let (_stdout, stderr, code) = run_cli(&["--config", "/nonexistent/washer.toml", "wash", "1", "1"]);

    assert_eq!(code, 1);
    assert!(stderr.contains("failed to read config"), "stderr: {stderr}");
}
