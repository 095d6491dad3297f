use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_version_command() {
    let mut cmd = Command::cargo_bin("gridway-lcd").unwrap();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gridway-lcd"))
        .stdout(predicate::str::contains("build:"));
}

#[test]
fn test_init_command_writes_config() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("gridway-lcd").unwrap();

    cmd.arg("init")
        .arg("--home")
        .arg(temp_dir.path())
        .assert()
        .success();

    let config_file = temp_dir.path().join("config").join("config.toml");
    assert!(config_file.exists());

    let content = std::fs::read_to_string(config_file).unwrap();
    assert!(content.contains("listen_address = \"127.0.0.1:1317\""));
    assert!(content.contains("status_policy = \"legacy\""));
}

#[test]
fn test_config_validate_missing_file() {
    let mut cmd = Command::cargo_bin("gridway-lcd").unwrap();
    cmd.arg("config")
        .arg("validate")
        .arg("non_existent_config.toml")
        .assert()
        .failure();
}

#[test]
fn test_config_validate_rejects_bad_override() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("config.toml");
    std::fs::write(
        &config_file,
        r#"
        [[status_overrides]]
        endpoint = "validator_rewards"
        kind = "query"
        status = 204
        "#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("gridway-lcd").unwrap();
    cmd.arg("config")
        .arg("validate")
        .arg(&config_file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a 4xx or 5xx code"));
}

#[test]
fn test_config_validate_accepts_generated_file() {
    let temp_dir = TempDir::new().unwrap();

    let mut init_cmd = Command::cargo_bin("gridway-lcd").unwrap();
    init_cmd
        .arg("init")
        .arg("--home")
        .arg(temp_dir.path())
        .assert()
        .success();

    let mut cmd = Command::cargo_bin("gridway-lcd").unwrap();
    cmd.arg("config")
        .arg("validate")
        .arg(temp_dir.path().join("config").join("config.toml"))
        .assert()
        .success();
}

#[test]
fn test_config_show_with_home() {
    let temp_dir = TempDir::new().unwrap();

    // First initialize the gateway
    let mut init_cmd = Command::cargo_bin("gridway-lcd").unwrap();
    init_cmd
        .arg("init")
        .arg("--home")
        .arg(temp_dir.path())
        .assert()
        .success();

    // Then show the config
    let mut show_cmd = Command::cargo_bin("gridway-lcd").unwrap();
    show_cmd
        .arg("config")
        .arg("show")
        .arg("--home")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("node_url = \"http://localhost:1318\""));
}

#[test]
fn test_start_rejects_invalid_listen_address() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("gridway-lcd").unwrap();
    cmd.arg("start")
        .arg("--home")
        .arg(temp_dir.path())
        .arg("--listen")
        .arg("nowhere")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid listen address"));
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("gridway-lcd").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("distribution reward withdrawals"))
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn test_subcommand_help() {
    let mut cmd = Command::cargo_bin("gridway-lcd").unwrap();
    cmd.arg("start")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signing service endpoint"));
}
