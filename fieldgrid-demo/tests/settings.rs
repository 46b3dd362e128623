use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use fieldgrid_demo::cli::Cli;
use fieldgrid_demo::settings::{DemoSettings, LogLevel, SettingsError};
use fieldgrid_demo::stories::Story;

#[test]
fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = DemoSettings::load_from(&dir.path().join("settings.json")).unwrap();

    assert_eq!(settings, DemoSettings::default());
    assert_eq!(settings.log_level, LogLevel::Debug);
    assert_eq!(settings.tick(), Duration::from_millis(80));
    assert_eq!(settings.story, Story::Demo);
}

#[test]
fn partial_file_fills_in_defaults() {
    let settings =
        DemoSettings::from_json(r#"{"story": "table-selectable", "unknown": 1}"#).unwrap();

    assert_eq!(settings.story, Story::TableSelectable);
    assert_eq!(settings.tick_ms, 80);
    assert_eq!(settings.data, None);
}

#[test]
fn malformed_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"tick_ms": "fast"}"#).unwrap();

    assert!(matches!(
        DemoSettings::load_from(&path),
        Err(SettingsError::Parse(_))
    ));
}

#[test]
fn tick_has_a_floor() {
    let settings = DemoSettings::from_json(r#"{"tick_ms": 0}"#).unwrap();
    assert_eq!(settings.tick(), Duration::from_millis(10));
}

#[test]
fn cli_flags_override_the_file() {
    let mut settings = DemoSettings::from_json(r#"{"log_level": "warn", "story": "field-basic"}"#)
        .unwrap();
    let cli = Cli::try_parse_from([
        "fieldgrid-demo",
        "--story",
        "table-empty",
        "--log-level",
        "trace",
        "--data",
        "users.json",
    ])
    .unwrap();

    settings.apply_cli(&cli);

    assert_eq!(settings.story, Story::TableEmpty);
    assert_eq!(settings.log_level, LogLevel::Trace);
    assert_eq!(settings.data, Some(PathBuf::from("users.json")));
}

#[test]
fn absent_flags_keep_the_file() {
    let mut settings = DemoSettings::from_json(r#"{"log_level": "warn"}"#).unwrap();
    settings.apply_cli(&Cli::try_parse_from(["fieldgrid-demo"]).unwrap());
    assert_eq!(settings.log_level, LogLevel::Warn);
}

#[test]
fn unknown_story_is_rejected() {
    assert!(Cli::try_parse_from(["fieldgrid-demo", "--story", "nope"]).is_err());
}
