//! CLI entry-point behavior: exit codes, output modes, file collection.
#![allow(clippy::unwrap_used)]

use pystylint::entry_point::run_with_args_to;
use std::fs;
use std::path::Path;

fn run(args: Vec<String>) -> (i32, String) {
    let mut out = Vec::new();
    let code = run_with_args_to(args, &mut out).unwrap();
    (code, String::from_utf8(out).unwrap())
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_clean_file_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("clean.py");
    write_file(&file, "def f(x):\n    return x\n");

    let (code, output) = run(vec![file.display().to_string()]);
    assert_eq!(code, 0);
    assert!(output.is_empty());
}

#[test]
fn test_violations_exit_one_and_print_lines() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("bad.py");
    write_file(&file, "eval('1')\n");

    let (code, output) = run(vec![file.display().to_string()]);
    assert_eq!(code, 1);
    assert!(output.contains("E1001"));
    assert!(output.contains(":1:1:"));
}

#[test]
fn test_quiet_stops_after_first_violation() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("bad.py");
    write_file(&file, "eval('1')\nexec('2')\n");

    let (code, output) = run(vec!["--quiet".to_owned(), file.display().to_string()]);
    assert_eq!(code, 1);
    assert_eq!(output.lines().count(), 1);
}

#[test]
fn test_directory_walk_checks_nested_files() {
    let dir = tempfile::tempdir().unwrap();
    write_file(&dir.path().join("pkg/mod.py"), "f = lambda: 1\n");
    write_file(&dir.path().join("notes.txt"), "eval('ignored')\n");

    let (code, output) = run(vec![dir.path().display().to_string()]);
    assert_eq!(code, 1);
    assert!(output.contains("E1003"));
    assert!(!output.contains("notes.txt"));
}

#[test]
fn test_select_limits_rules() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("bad.py");
    write_file(&file, "f = lambda: eval('1')\n");

    let (code, output) = run(vec![
        "--select".to_owned(),
        "E1003".to_owned(),
        file.display().to_string(),
    ]);
    assert_eq!(code, 1);
    assert!(output.contains("E1003"));
    assert!(!output.contains("E1001"));
}

#[test]
fn test_json_output_is_parseable() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("bad.py");
    write_file(&file, "def f(x=[]):\n    pass\n");

    let (code, output) = run(vec!["--json".to_owned(), file.display().to_string()]);
    assert_eq!(code, 1);
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    let records = parsed.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["code"], "E1006");
    assert_eq!(records[0]["line"], 1);
}

#[test]
fn test_syntax_error_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("broken.py");
    write_file(&file, "def broken(:\n");

    let (code, _) = run(vec![file.display().to_string()]);
    assert_eq!(code, 2);
}

#[test]
fn test_list_rules_prints_catalog() {
    let (code, output) = run(vec!["--list-rules".to_owned()]);
    assert_eq!(code, 0);
    for expected in ["E1001", "E1002", "E1003", "E1004", "E1005", "E1006"] {
        assert!(output.contains(expected));
    }
}

#[test]
fn test_config_file_is_honored() {
    let dir = tempfile::tempdir().unwrap();
    write_file(
        &dir.path().join(".pystylint.toml"),
        "[pystylint]\nignore = [\"E1003\"]\n",
    );
    write_file(&dir.path().join("mod.py"), "f = lambda: 1\n");

    let (code, output) = run(vec![dir.path().display().to_string()]);
    assert_eq!(code, 0);
    assert!(output.is_empty());
}
