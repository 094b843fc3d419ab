use std::fs;

use swarm_bench::config::Config;
use swarm_bench::error::{ConfigError, Error};

fn write_temp_config(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.yml");
    fs::write(&path, contents).expect("write temp config");
    path
}

const FULL: &str = r#"
digital_ocean_token: from-file
workers: 3
kv_store:
  size: 512mb
  region: fra1
  image: ubuntu-14-04-x64
worker:
  size: 8gb
  region: ams3
  image: ubuntu-14-04-x64
benchmark_target:
  size: 16gb
  region: fra1
  image: ubuntu-14-04-x64
tsung:
  duration_minutes: 30
provisioning:
  program: /usr/local/bin/docker-machine
  command_timeout_secs: 600
  launch_spacing_ms: 250
logging:
  level: debug
  format: json
"#;

#[test]
fn config_loads_every_section_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_temp_config(&dir, FULL);

    let config = Config::load(&path).expect("load");
    assert_eq!(config.workers, 3);
    assert_eq!(config.worker.region, "ams3");
    assert_eq!(config.load_test.duration_minutes, 30);
    assert_eq!(config.provisioning.program, "/usr/local/bin/docker-machine");
    assert_eq!(config.provisioning.launch_spacing().as_millis(), 250);
    assert_eq!(config.logging.format, "json");
}

#[test]
fn config_rejects_missing_workers() {
    let yaml = FULL.replace("workers: 3\n", "");
    assert!(matches!(
        Config::parse(&yaml, None),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn config_rejects_negative_workers() {
    let yaml = FULL.replace("workers: 3", "workers: -1");
    assert!(Config::parse(&yaml, None).is_err());
}

#[test]
fn config_rejects_target_without_machine_settings() {
    let yaml = FULL.replace("  size: 16gb\n", "");
    match Config::parse(&yaml, None) {
        Err(Error::Config(ConfigError::MissingField { field })) => {
            assert_eq!(field, "benchmark_target.size");
        }
        other => panic!("expected missing target size, got {other:?}"),
    }
}

#[test]
fn config_reports_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let result = Config::load(dir.path().join("absent.yml"));
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}

#[test]
fn env_token_satisfies_an_empty_file_token() {
    let yaml = FULL.replace("digital_ocean_token: from-file", "digital_ocean_token: \"\"");
    let config = Config::parse(&yaml, Some("from-env".into())).expect("parse");
    assert_eq!(config.digital_ocean_token, "from-env");
}

#[test]
fn example_config_parses_once_a_token_is_supplied() {
    let example = fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/config.yml.example"))
        .expect("read example");
    let config = Config::parse(&example, Some("token".into())).expect("parse example");
    assert_eq!(config.workers, 3);
    assert!(!config.benchmark_target.is_external());
}
