use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    fs::write(&path, contents).expect("failed to write config");
    path
}

fn tiohelpers() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tiohelpers"));
    cmd.env_remove("ACCESS_KEY")
        .env_remove("SECRET_KEY")
        .env_remove("TIOHELPERS_CONFIG")
        .env_remove("TIOHELPERS_API_HOST");
    cmd
}

#[test]
fn version_prints_package_version() {
    tiohelpers()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "tiohelpers version {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn help_lists_helper_commands() {
    tiohelpers()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("agents-info"))
        .stdout(predicate::str::contains("po2tag"))
        .stdout(predicate::str::contains("fix-scan-permissions"));
}

#[test]
fn missing_access_key_fails_before_any_request() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = temp.path().join("absent.yaml");

    tiohelpers()
        .arg("list-networks")
        .arg("--config")
        .arg(&config_path)
        .env("TIOHELPERS_API_HOST", "http://127.0.0.1:9")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("ACCESS_KEY must be defined"));

    Ok(())
}

#[test]
fn missing_secret_key_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "access_key: from-file\n");

    tiohelpers()
        .arg("list-networks")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("SECRET_KEY must be defined"));

    Ok(())
}

#[test]
fn invalid_filter_fails_before_credentials_are_used() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "access_key: a\nsecret_key: s\n");

    tiohelpers()
        .args(["po2tag", "-c", "Cat", "-n", "Val", "-e", "x", "-f", "{not json"])
        .arg("--config")
        .arg(&config_path)
        .env("TIOHELPERS_API_HOST", "http://127.0.0.1:9")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unable to load JSON"));

    Ok(())
}

#[test]
fn fix_scan_permissions_requires_a_target() {
    tiohelpers()
        .args(["fix-scan-permissions", "-a", "acls.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--scan-id or --folder-id"));
}

#[test]
fn status_reads_custom_config_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "access_key: abcdef123456\n");

    tiohelpers()
        .arg("status")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains(config_path.to_string_lossy().to_string()))
        .stdout(predicate::str::contains("********3456"))
        .stdout(predicate::str::contains("Secret key not configured"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn list_networks_as_csv() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let _networks = server
        .mock("GET", "/networks")
        .match_query(mockito::Matcher::UrlEncoded(
            "includeDeleted".into(),
            "true".into(),
        ))
        .match_header("x-apikeys", "accessKey=ak;secretKey=sk;")
        .with_status(200)
        .with_body(
            r#"{
                "networks": [
                    {"uuid": "n-1", "name": "Default", "is_default": true, "scanner_count": 2},
                    {"uuid": "n-2", "name": "DMZ", "deleted": 1650000000000}
                ],
                "pagination": {"total": 2, "offset": 0, "limit": 100}
            }"#,
        )
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "access_key: ak\nsecret_key: sk\n");

    let assert = tiohelpers()
        .arg("list-networks")
        .arg("--format")
        .arg("csv")
        .arg("--config")
        .arg(&config_path)
        .env("TIOHELPERS_API_HOST", server.url())
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("\"name\",\"uuid\",\"assets_ttl_days\""));
    assert!(lines[1].starts_with("\"Default\",\"n-1\","));
    assert!(lines[2].contains("1650000000000"));

    Ok(())
}

#[cfg(unix)]
#[test]
fn ctrl_c_ends_commands_that_walk_no_pages() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::TcpListener;
    use std::process::Stdio;
    use std::thread::sleep;
    use std::time::{Duration, Instant};

    // Accepts connections into the backlog and never answers.
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let host = format!("http://{}", listener.local_addr()?);

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "access_key: ak\nsecret_key: sk\n");

    let mut child = tiohelpers()
        .args(["create-rg", "-n", "Q4", "-d", "desc", "-c", "{}"])
        .args(["-S", "2022-10-01", "-D", "2022-12-31"])
        .arg("--config")
        .arg(&config_path)
        .env("TIOHELPERS_API_HOST", &host)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    sleep(Duration::from_millis(500));
    Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()?;

    let deadline = Instant::now() + Duration::from_secs(10);
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break Some(status);
        }
        if Instant::now() > deadline {
            child.kill()?;
            break None;
        }
        sleep(Duration::from_millis(50));
    };

    let status = status.expect("create-rg kept running after SIGINT");
    assert!(!status.success());
    drop(listener);

    Ok(())
}
