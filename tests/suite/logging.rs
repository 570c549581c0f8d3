//! Process-wide loggers and the run header, end to end.
//!
//! The global registry lives for the whole test binary, so every test uses a
//! logger name of its own.

use std::fs;

use projkit_logger::{
    LoggerOptions, RUN_START_MARKER, SinkKind, get_logger, get_logger_with, log_header,
};
use projkit_types::Level;

use crate::common::{CwdGuard, Project};

#[test]
fn header_lands_in_root_log_file() {
    let project = Project::new();
    let here = project.subdir("work/here");
    let _cwd = CwdGuard::enter(&here);

    let logger = get_logger_with("proj", &LoggerOptions::new("INFO", "p.log")).unwrap();
    log_header(&logger, "proj");
    logger.flush();

    let content = project.read("p.log");
    assert!(content.contains("project=proj"));
    assert!(content.contains("cwd=work/here"));
    assert!(content.contains("repo_dir=sample-project"));
    assert!(!content.contains(project.root.to_string_lossy().as_ref()));
    assert!(!here.join("p.log").exists());
}

#[test]
fn header_keys_appear_in_order() {
    let project = Project::new();
    let _cwd = CwdGuard::enter(&project.root);

    let logger = get_logger_with("ordered", &LoggerOptions::new("INFO", "ordered.log")).unwrap();
    log_header(&logger, "ordered");

    let content = project.read("ordered.log");
    let messages: Vec<&str> = content
        .lines()
        .filter_map(|line| line.splitn(4, " | ").nth(3))
        .collect();
    let keys: Vec<&str> = messages
        .iter()
        .skip(1)
        .filter_map(|msg| msg.split_once('=').map(|(key, _)| key))
        .collect();

    assert_eq!(messages[0], RUN_START_MARKER);
    assert_eq!(
        keys,
        ["project", "repo_dir", "python", "os", "shell", "cwd", "github_actions"]
    );
    assert!(content.lines().all(|line| line.contains(" | INFO | ordered | ")));
}

#[test]
fn header_hides_home_directory() {
    let Some((project, home)) = Project::under_home() else {
        return;
    };
    let _cwd = CwdGuard::enter(&project.subdir("docs"));

    let logger = get_logger_with("private", &LoggerOptions::new("INFO", "private.log")).unwrap();
    log_header(&logger, "private");

    let content = project.read("private.log");
    assert!(project.root.starts_with(&home));
    assert!(!content.contains(home.to_string_lossy().as_ref()));
    assert!(content.contains("cwd=docs"));
}

#[test]
fn header_lines_never_carry_the_root_prefix() {
    let project = Project::new();
    let _cwd = CwdGuard::enter(&project.subdir("a/b"));

    let logger = get_logger_with("prefix", &LoggerOptions::new("INFO", "prefix.log")).unwrap();
    log_header(&logger, "prefix");

    let parent = project.root.parent().unwrap().to_string_lossy().into_owned();
    let content = project.read("prefix.log");
    assert_eq!(content.lines().count(), 8);
    for line in content.lines() {
        assert!(!line.contains(&parent), "{line}");
    }
}

#[cfg(unix)]
#[test]
fn header_omits_hostname() {
    let Some(hostname) = crate::common::hostname().filter(|name| name.len() >= 4) else {
        return;
    };
    let project = Project::new();
    let _cwd = CwdGuard::enter(&project.root);

    let logger = get_logger_with("no-host", &LoggerOptions::new("INFO", "host.log")).unwrap();
    log_header(&logger, "no-host");

    let content = project.read("host.log");
    assert!(content.contains("os="));
    assert!(!content.contains(&hostname), "hostname {hostname} leaked");
}

#[test]
fn repeated_get_logger_keeps_two_sinks() {
    let project = Project::new();
    let _cwd = CwdGuard::enter(&project.root);

    let first = get_logger("idempotent").unwrap();
    let second = get_logger_with(
        "idempotent",
        &LoggerOptions::new("DEBUG", "elsewhere/other.log"),
    )
    .unwrap();

    assert_eq!(first, second);
    assert_eq!(second.sink_kinds(), vec![SinkKind::Console, SinkKind::File]);
    assert_eq!(second.level(), Level::Debug);
    assert_eq!(second.log_file(), Some(project.root.join("project.log")));
    assert!(!project.root.join("elsewhere").join("other.log").exists());
    assert!(!second.propagates());
}

#[test]
fn level_change_applies_to_both_sinks() {
    let project = Project::new();
    let _cwd = CwdGuard::enter(&project.root);

    let logger = get_logger_with("relevel", &LoggerOptions::new("ERROR", "relevel.log")).unwrap();
    logger.warning("too quiet");
    get_logger_with("relevel", &LoggerOptions::new("WARNING", "relevel.log")).unwrap();
    logger.warning("loud enough");

    let content = project.read("relevel.log");
    assert!(!content.contains("too quiet"));
    assert!(content.contains("| WARNING | relevel | loud enough"));
}

#[test]
fn file_in_missing_subdirectory_is_created() {
    let project = Project::new();
    let _cwd = CwdGuard::enter(&project.root);

    let logger =
        get_logger_with("nested-file", &LoggerOptions::new("INFO", "logs/run/app.log")).unwrap();
    logger.info("created");

    let content = fs::read_to_string(project.root.join("logs/run/app.log")).unwrap();
    assert!(content.contains("| INFO | nested-file | created"));
}
