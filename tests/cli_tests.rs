use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn write_temp_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("config.yml");
    fs::write(&path, contents).expect("write temp config");
    path
}

fn valid_config(program: &str, target: &str) -> String {
    format!(
        r#"
digital_ocean_token: cli-test-token
workers: 2
kv_store: {{ size: 512mb, region: fra1, image: ubuntu-14-04-x64 }}
worker: {{ size: 2gb, region: fra1, image: ubuntu-14-04-x64 }}
benchmark_target: {target}
provisioning: {{ program: "{program}", launch_spacing_ms: 0, command_timeout_secs: 30 }}
"#
    )
}

fn swarm_bench(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("swarm-bench").expect("binary");
    cmd.current_dir(dir).env_remove("DO_TOKEN").env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_every_subcommand() {
    let dir = tempfile::tempdir().expect("tempdir");
    swarm_bench(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("up")
                .and(predicate::str::contains("down"))
                .and(predicate::str::contains("render"))
                .and(predicate::str::contains("info"))
                .and(predicate::str::contains("check")),
        );
}

#[test]
fn check_config_accepts_a_valid_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_temp_config(
        dir.path(),
        &valid_config("docker-machine", "{ ip: 1.2.3.4 }"),
    );

    swarm_bench(dir.path())
        .args(["check", "config", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file is valid"))
        .stdout(predicate::str::contains("cli-test-token").not());
}

#[test]
fn check_config_fails_on_missing_token() {
    let dir = tempfile::tempdir().expect("tempdir");
    let yaml = valid_config("docker-machine", "{ ip: 1.2.3.4 }")
        .replace("digital_ocean_token: cli-test-token", "");
    let path = write_temp_config(dir.path(), &yaml);

    swarm_bench(dir.path())
        .args(["check", "config", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("digital_ocean_token"));
}

#[test]
fn check_config_points_at_yaml_errors() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_temp_config(dir.path(), "workers: [3\n");

    swarm_bench(dir.path())
        .args(["check", "config", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config"));
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    swarm_bench(dir.path())
        .args(["check", "config", "--config", "absent.yml"])
        .assert()
        .failure();
}

#[test]
fn info_fails_when_the_master_cannot_be_resolved() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_temp_config(
        dir.path(),
        &valid_config("/nonexistent/docker-machine", "{ ip: 1.2.3.4 }"),
    );

    swarm_bench(dir.path())
        .args(["info", "--config"])
        .arg(&path)
        .assert()
        .failure();
}

#[test]
fn down_tolerates_a_failing_removal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_temp_config(
        dir.path(),
        &valid_config("/nonexistent/docker-machine", "{ ip: 1.2.3.4 }"),
    );

    swarm_bench(dir.path())
        .args(["down", "--yes", "--json", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""type":"teardown""#))
        .stdout(predicate::str::contains("bench-agent-2"));
}

#[cfg(unix)]
#[test]
fn render_writes_both_files_for_a_configured_target() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_temp_config(dir.path(), &valid_config("true", "{ ip: 1.2.3.4 }"));

    swarm_bench(dir.path())
        .args(["render", "--quiet", "--config"])
        .arg(&path)
        .arg("--output-dir")
        .arg(dir.path())
        .assert()
        .success();

    let scenario = fs::read_to_string(dir.path().join("tsung.xml")).expect("scenario");
    assert!(scenario.contains("1.2.3.4"));
    assert!(dir.path().join("docker-compose.yml").exists());
}

#[test]
fn down_in_json_mode_requires_yes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_temp_config(
        dir.path(),
        &valid_config("/nonexistent/docker-machine", "{ ip: 1.2.3.4 }"),
    );

    swarm_bench(dir.path())
        .args(["down", "--json", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("teardown").not())
        .stderr(predicate::str::contains("--yes"));
}
