use std::fs;

use planattr::config::ProjectConfig;

#[test]
fn test_load_reads_project_file() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    fs::write(
        dir.path().join("planattr.toml"),
        "time_format = \"%d.%m.%Y\"\nschedule_granularity = 900\n",
    )
    .unwrap();

    let config = ProjectConfig::load(vec![dir.path().to_path_buf()]).unwrap();
    assert_eq!(config.time_format, "%d.%m.%Y");
    assert_eq!(config.schedule_granularity, 900);
    assert_eq!(config.daily_working_hours, 8.0);
    assert_eq!(config.currency, "EUR");
}

#[test]
fn test_load_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let config = ProjectConfig::load(vec![dir.path().to_path_buf()]).unwrap();
    assert_eq!(config, ProjectConfig::default());
}
