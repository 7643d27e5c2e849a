use archivist::config::Config;
use archivist::plugins::PluginRegistry;
use archivist::retention::ArchiveStrategy;
use chrono::Weekday;

#[test]
fn minimal_entry_deserializes_with_defaults() {
    let toml = r#"
[[archives]]
name = "logs"
path = "/var/log/app"
strategy = "monthly"

[archives.archiver]
name = "zip"

[archives.storage]
name = "disk"
settings = { path = "/backups" }
"#;

    let parsed: Config = toml::from_str(toml).expect("minimal config should deserialize");

    assert_eq!(parsed.log_level, "info");
    assert_eq!(parsed.daemon.schedule, "0 0 2 * * *");
    let entry = &parsed.archives[0];
    assert_eq!(entry.strategy, ArchiveStrategy::Monthly);
    assert_eq!(entry.first_day_of_week, Weekday::Mon);
    assert_eq!(entry.file_pattern, "*");
    assert!(entry.file_regex.is_none());
    assert!(!entry.include_subfolders);
    assert!(!entry.delete_archived_files);
    assert!(entry.retention.is_empty());
    assert!(entry.archiver.settings.is_empty());
    assert_eq!(
        entry.storage.settings.get("path").and_then(toml::Value::as_str),
        Some("/backups")
    );
}

#[test]
fn full_entry_deserializes() {
    let toml = r#"
log_level = "debug"

[daemon]
schedule = "15 3 * * *"

[[archives]]
name = "app-logs"
path = "~/logs"
strategy = "Weekly"
first_day_of_week = "sunday"
file_pattern = "*.log"
file_regex = "app-\\d+"
include_subfolders = true
subfolder_pattern = "20*"
delete_archived_files = true
delete_empty_subfolders = true

[archives.retention]
month = "1"
day = "Last"

[archives.archiver]
name = "zip"
settings = { compression = "stored" }

[archives.storage]
name = "disk"
settings = { path = "/backups/{StartDate:yyyy}", file_name = "logs_{StartDate:yyyyMMdd}.zip" }
"#;

    let parsed: Config = toml::from_str(toml).expect("full config should deserialize");

    assert_eq!(parsed.log_level, "debug");
    assert_eq!(parsed.daemon.schedule, "15 3 * * *");
    let entry = parsed.archive("APP-LOGS").expect("entry by name");
    assert_eq!(entry.strategy, ArchiveStrategy::Weekly);
    assert_eq!(entry.first_day_of_week, Weekday::Sun);
    assert_eq!(entry.file_regex.as_deref(), Some(r"app-\d+"));
    assert_eq!(entry.subfolder_pattern.as_deref(), Some("20*"));
    assert_eq!(entry.retention.month.as_deref(), Some("1"));
    assert_eq!(entry.retention.day.as_deref(), Some("Last"));
    assert!(!entry.root().starts_with("~"));

    let registry = PluginRegistry::builtin();
    registry
        .create_archiver(&entry.archiver.name, &entry.archiver.settings)
        .expect("zip settings are valid");
    registry
        .create_storage(&entry.storage.name, &entry.storage.settings)
        .expect("disk settings are valid");
}

#[test]
fn unrecognized_strategy_becomes_unknown_and_fails_validation() {
    let dir = tempfile::TempDir::new().unwrap();
    let toml = format!(
        r#"
[[archives]]
name = "odd"
path = "{}"
strategy = "hourly"
archiver = {{ name = "zip" }}
storage = {{ name = "disk", settings = {{ path = "/backups" }} }}
"#,
        dir.path().display().to_string().replace('\\', "/")
    );

    let parsed: Config = toml::from_str(&toml).expect("config should deserialize");
    let entry = &parsed.archives[0];
    assert_eq!(entry.strategy, ArchiveStrategy::Unknown);

    let err = entry
        .validate(&PluginRegistry::builtin())
        .expect_err("unknown strategy must be rejected");
    assert!(err.to_string().contains("strategy"));
}

#[test]
fn unknown_plugin_setting_is_rejected() {
    let toml = r#"
[[archives]]
name = "logs"
path = "/tmp"
strategy = "daily"
archiver = { name = "zip", settings = { level = 9 } }
storage = { name = "disk", settings = { path = "/backups" } }
"#;

    let parsed: Config = toml::from_str(toml).expect("config should deserialize");
    let entry = &parsed.archives[0];
    assert!(
        PluginRegistry::builtin()
            .create_archiver(&entry.archiver.name, &entry.archiver.settings)
            .is_err()
    );
}
