// tests/config_and_exclude.rs

mod common;
use crate::common::{p, t};

use std::io;
use std::path::Path;
use std::time::Duration;

use clap::Parser;

use watchrun::cli::{CliArgs, LogLevel};
use watchrun::config::validate::validate_with_fs;
use watchrun::config::RawSettings;
use watchrun::display::DisplayMode;
use watchrun::errors::WatchrunError;
use watchrun::exec::CommandLine;
use watchrun::fs::mock::MockFileSystem;
use watchrun::logging::resolve_level;
use watchrun::watch::ExcludeFilter;

fn raw(command: &[&str]) -> RawSettings {
    RawSettings {
        terminal_only: false,
        exclude: String::new(),
        root: p("proj"),
        delay_ms: 200,
        command: command.iter().map(|s| s.to_string()).collect(),
    }
}

fn project() -> MockFileSystem {
    let fs = MockFileSystem::new();
    fs.add_file("proj/main.go", t(1));
    fs
}

#[test]
fn empty_exclude_pattern_matches_nothing() {
    let filter = ExcludeFilter::new("").unwrap();
    assert!(!filter.is_active());
    assert!(!filter.matches(Path::new("anything/at/all.log")));
}

#[test]
fn exclude_pattern_is_searched_anywhere_in_the_path() {
    let filter = ExcludeFilter::new(r"\.log$").unwrap();
    assert!(filter.is_active());
    assert!(filter.matches(Path::new("./c.log")));
    assert!(filter.matches(Path::new("deep/dir/c.log")));
    assert!(!filter.matches(Path::new("./c.log.txt")));

    let target = ExcludeFilter::new("target").unwrap();
    assert!(target.matches(Path::new("./target/debug/app")));
    assert!(!target.matches(Path::new("./src/main.rs")));
}

#[test]
fn invalid_exclude_pattern_is_rejected() {
    match ExcludeFilter::new("(unclosed") {
        Err(WatchrunError::InvalidExcludePattern { pattern, .. }) => {
            assert_eq!(pattern, "(unclosed")
        }
        other => panic!("expected InvalidExcludePattern, got {other:?}"),
    }
}

#[test]
fn valid_settings_are_accepted() {
    let fs = project();
    let mut input = raw(&["go", "build", "-v"]);
    input.exclude = r"\.log$".to_string();
    input.delay_ms = 50;

    let settings = validate_with_fs(input, &fs).unwrap();

    assert_eq!(settings.display, DisplayMode::Interactive);
    assert_eq!(settings.delay, Duration::from_millis(50));
    assert_eq!(settings.root, p("proj"));
    assert_eq!(settings.command.program(), "go");
    assert_eq!(settings.command.args(), ["build".to_string(), "-v".to_string()]);
    assert!(settings.exclude.matches(Path::new("proj/x.log")));
}

#[test]
fn terminal_flag_selects_plain_output() {
    let fs = project();
    let mut input = raw(&["make"]);
    input.terminal_only = true;

    let settings = validate_with_fs(input, &fs).unwrap();
    assert_eq!(settings.display, DisplayMode::Terminal);
}

#[test]
fn missing_command_is_a_config_error() {
    let fs = project();
    assert!(matches!(
        validate_with_fs(raw(&[]), &fs),
        Err(WatchrunError::ConfigError(_))
    ));
    assert!(matches!(
        validate_with_fs(raw(&[""]), &fs),
        Err(WatchrunError::ConfigError(_))
    ));
}

#[test]
fn missing_root_is_a_config_error() {
    let fs = MockFileSystem::new();
    match validate_with_fs(raw(&["make"]), &fs) {
        Err(WatchrunError::ConfigError(msg)) => assert!(msg.contains("does not exist")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn unreadable_root_is_a_config_error() {
    let fs = project();
    fs.fail_stat("proj", io::ErrorKind::PermissionDenied);
    assert!(matches!(
        validate_with_fs(raw(&["make"]), &fs),
        Err(WatchrunError::ConfigError(_))
    ));
}

#[test]
fn empty_root_is_a_config_error() {
    let fs = project();
    let mut input = raw(&["make"]);
    input.root = p("");
    assert!(matches!(
        validate_with_fs(input, &fs),
        Err(WatchrunError::ConfigError(_))
    ));
}

#[test]
fn bad_exclude_pattern_fails_validation() {
    let fs = project();
    let mut input = raw(&["make"]);
    input.exclude = "[".to_string();
    assert!(matches!(
        validate_with_fs(input, &fs),
        Err(WatchrunError::InvalidExcludePattern { .. })
    ));
}

#[test]
fn command_line_displays_words_joined_by_spaces() {
    let cmd = CommandLine::from_args(&["go".into(), "test".into(), "./...".into()]).unwrap();
    assert_eq!(cmd.to_string(), "go test ./...");

    let bare = CommandLine::from_args(&["make".into()]).unwrap();
    assert_eq!(bare.to_string(), "make");
}

#[test]
fn cli_collects_trailing_command_with_its_flags() {
    let args = CliArgs::try_parse_from([
        "watchrun", "-t", "-x", "target", "-p", "src", "-d", "500", "cargo", "test", "--release",
    ])
    .unwrap();

    assert!(args.terminal);
    assert!(!args.verbose);
    assert_eq!(args.exclude, "target");
    assert_eq!(args.path, p("src"));
    assert_eq!(args.delay, 500);
    assert_eq!(args.command, ["cargo", "test", "--release"]);

    let settings = RawSettings::from(&args);
    assert!(settings.terminal_only);
    assert_eq!(settings.delay_ms, 500);
}

#[test]
fn cli_defaults() {
    let args = CliArgs::try_parse_from(["watchrun", "make"]).unwrap();
    assert_eq!(args.path, p("."));
    assert_eq!(args.exclude, "");
    assert_eq!(args.delay, 200);
    assert!(args.log_level.is_none());
}

#[test]
fn cli_requires_a_command() {
    assert!(CliArgs::try_parse_from(["watchrun", "-v"]).is_err());
}

#[test]
fn log_level_priority() {
    use tracing::Level;

    assert_eq!(resolve_level(None, false, None), Level::ERROR);
    assert_eq!(resolve_level(None, false, Some("warn")), Level::WARN);
    assert_eq!(resolve_level(None, false, Some("nonsense")), Level::ERROR);
    assert_eq!(resolve_level(None, true, Some("warn")), Level::DEBUG);
    assert_eq!(
        resolve_level(Some(LogLevel::Trace), true, Some("warn")),
        Level::TRACE
    );
    assert_eq!(resolve_level(Some(LogLevel::Info), false, None), Level::INFO);
}
