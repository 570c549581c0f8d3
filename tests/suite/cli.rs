//! The `projkit` binary, run as a child process.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use crate::common::Project;

fn projkit(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_projkit"))
        .args(args)
        .current_dir(cwd)
        .env_remove("PROJKIT_LOG_LEVEL")
        .env_remove("RUST_LOG")
        .output()
        .expect("run projkit")
}

fn stdout(output: &Output) -> String {
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn root_prints_project_root() {
    let project = Project::new();
    let nested = project.subdir("src/bin");

    let out = stdout(&projkit(&nested, &["root"]));
    assert_eq!(out.trim_end(), project.root.display().to_string());
}

#[test]
fn root_accepts_custom_markers() {
    let project = Project::new();
    let pkg = project.subdir("pkg");
    fs::write(pkg.join("package.json"), "{}").unwrap();
    let start = project.subdir("pkg/lib");

    let out = stdout(&projkit(
        &project.root,
        &["root", "--start", start.to_str().unwrap(), "--marker", "package.json"],
    ));
    assert_eq!(out.trim_end(), pkg.display().to_string());
}

#[test]
fn sanitize_prints_relative_or_basename() {
    let project = Project::new();
    let file = project.subdir("src").join("lib.rs");
    fs::write(&file, "").unwrap();
    let outside = tempfile::NamedTempFile::new().unwrap();
    let outside_name = outside.path().file_name().unwrap().to_string_lossy().into_owned();

    let inside = stdout(&projkit(&project.root, &["sanitize", file.to_str().unwrap()]));
    let other = stdout(&projkit(
        &project.root,
        &["sanitize", outside.path().to_str().unwrap()],
    ));

    assert_eq!(inside.trim_end().replace('\\', "/"), "src/lib.rs");
    assert_eq!(other.trim_end(), outside_name);
}

#[test]
fn diagnostics_prints_three_facts() {
    let project = Project::new();

    let out = stdout(&projkit(&project.root, &["diagnostics"]));
    let keys: Vec<&str> = out
        .lines()
        .filter_map(|line| line.split_once('=').map(|(key, _)| key))
        .collect();
    assert_eq!(keys, ["shell", "os", "python"]);
}

#[test]
fn demo_writes_header_and_levels() {
    let project = Project::new();
    fs::write(
        project.root.join("projkit.toml"),
        concat!(
            "[project]\nname = \"from-config\"\n\n",
            "[logging]\nlevel = \"warning\"\nfile = \"logs/demo.log\"\n",
        ),
    )
    .unwrap();
    let work = project.subdir("work");

    stdout(&projkit(&work, &["demo", "--level", "debug"]));

    let content = project.read("logs/demo.log");
    assert!(content.contains("| INFO | from-config | project=from-config"));
    assert!(content.contains("cwd=work"));
    assert!(content.contains("| DEBUG | from-config | sample DEBUG message"));
    assert!(content.contains("| CRITICAL | from-config | sample CRITICAL message"));
}

#[test]
fn demo_honors_config_level_without_flag() {
    let project = Project::new();
    fs::write(
        project.root.join("projkit.toml"),
        "[logging]\nlevel = \"error\"\n",
    )
    .unwrap();

    stdout(&projkit(&project.root, &["demo", "--name", "quiet"]));

    let content = project.read("project.log");
    assert!(!content.contains("RUN START"));
    assert!(content.contains("| ERROR | quiet | sample ERROR message"));
    assert!(!content.contains("sample WARNING message"));
}
