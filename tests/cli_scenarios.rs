use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    fs::write(path, content).unwrap();
}

fn run_in(root: &Path) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("include-graph").unwrap();
    cmd.current_dir(root).arg("--root").arg(root).arg("--no-wait");
    cmd.assert()
}

fn graph_text(root: &Path) -> String {
    fs::read_to_string(root.join("_graph.txt")).unwrap()
}

#[test]
fn single_header_without_includes() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("a.h"), "#pragma once\nint a();\nint b();\n");

    run_in(root)
        .success()
        .stdout(predicate::str::contains("\na\n"))
        .stdout(predicate::str::contains("Header length: 3"))
        .stdout(predicate::str::contains("Source length: 0"))
        .stdout(predicate::str::contains("Template length: 0"))
        .stdout(predicate::str::contains("Combined: 3"));

    assert_eq!(graph_text(root), "a\n");
}

#[test]
fn source_including_header_yields_one_edge() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("a.h"), "int a();\n");
    write_file(&root.join("b.cpp"), "#include \"a.h\"\nint main() { return a(); }\n");

    run_in(root).success().stdout(predicate::str::contains("Combined: 3"));

    let text = graph_text(root);
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines.contains(&"a"));
    assert!(lines.contains(&"b"));
    let edges: Vec<&&str> = lines.iter().filter(|l| l.contains(' ')).collect();
    assert_eq!(edges, vec![&"a b"]);
}

#[test]
fn ignored_file_is_referenced_but_not_scanned() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("include/memtrace.h"), "#include \"secret.h\"\n");
    write_file(&root.join("src/main.cpp"), "#include \"memtrace.h\"\n#include \"game.h\"\n");
    write_file(&root.join("include/game.h"), "void run();\n");

    run_in(root).success().stdout(predicate::str::contains("memtrace").not());

    let text = graph_text(root);
    assert_eq!(text, "game\nmain\nmemtrace main\ngame main\n");
    assert!(!text.contains("secret"));
}

#[test]
fn comment_mentioning_include_creates_spurious_edge() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("src/b.cpp"), "// see \"foo.h\" include note\nint x;\n");

    run_in(root).success();
    assert_eq!(graph_text(root), "b\nfoo b\n");

    // directive mode only accepts real #include lines
    let mut cmd = Command::cargo_bin("include-graph").unwrap();
    cmd.current_dir(root).arg("--root").arg(root).arg("--no-wait").arg("--mode").arg("directive");
    cmd.assert().success();
    assert_eq!(graph_text(root), "b\n");
}

#[test]
fn malformed_include_fails_the_run() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("src/bad.c"), "#include \"half.h\nint x;\n");

    run_in(root)
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Scan failed"))
        .stderr(predicate::str::contains("bad.c:1"));
    assert!(!root.join("_graph.txt").exists());

    let mut cmd = Command::cargo_bin("include-graph").unwrap();
    cmd.current_dir(root)
        .arg("--root")
        .arg(root)
        .arg("--no-wait")
        .arg("--on-malformed")
        .arg("skip");
    cmd.assert().success();
    assert_eq!(graph_text(root), "bad\n");
}

#[test]
fn two_runs_are_byte_identical() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("include/core.h"), "#include \"colors.h\"\n");
    write_file(&root.join("include/colors.h"), "#define RED 1\n");
    write_file(&root.join("src/core.cpp"), "#include \"core.h\"\n#include \"renderer.h\"\n");
    write_file(&root.join("src/renderer.cpp"), "#include \"renderer.h\"\n#include \"Core.h\"\n");

    run_in(root).success();
    let first = fs::read(root.join("_graph.txt")).unwrap();
    run_in(root).success();
    let second = fs::read(root.join("_graph.txt")).unwrap();
    assert_eq!(first, second);

    let text = String::from_utf8(first).unwrap();
    for line in text.lines().filter(|l| l.contains(' ')) {
        let (dep, dependent) = line.split_once(' ').unwrap();
        assert!(!dep.is_empty() && !dependent.is_empty());
        assert_ne!(dep, dependent);
    }
}

#[test]
fn output_goes_to_working_directory() {
    let project = tempdir().unwrap();
    let cwd = tempdir().unwrap();
    write_file(&project.path().join("include/x.h"), "");

    let mut cmd = Command::cargo_bin("include-graph").unwrap();
    cmd.current_dir(cwd.path()).arg("--root").arg(project.path()).arg("--no-wait");
    cmd.assert().success();

    assert!(cwd.path().join("_graph.txt").exists());
    assert!(!project.path().join("_graph.txt").exists());
}

#[test]
fn waits_for_a_line_on_stdin() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("a.h"), "");

    let mut cmd = assert_cmd::Command::cargo_bin("include-graph").unwrap();
    cmd.current_dir(root).arg("--root").arg(root).write_stdin("\n");
    cmd.assert().success().stdout(predicate::str::contains("Combined: 0"));
}

#[test]
fn quiet_mode_prints_nothing() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("a.h"), "x\n");

    let mut cmd = Command::cargo_bin("include-graph").unwrap();
    cmd.current_dir(root).arg("-q").arg("--root").arg(root).arg("--no-wait");
    cmd.assert().success().stdout(predicate::str::is_empty());
    assert_eq!(graph_text(root), "a\n");
}
