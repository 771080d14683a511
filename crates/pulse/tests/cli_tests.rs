use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicU16, Ordering};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

// Helper function to get an available port with atomic counter to avoid conflicts
static PORT_COUNTER: AtomicU16 = AtomicU16::new(52000);

fn get_available_port() -> u16 {
    PORT_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Minimal HTTP mock routing GET requests by path prefix
fn start_mock_server(port: u16, routes: Vec<(&'static str, serde_json::Value)>) {
    thread::spawn(move || {
        let bind_addr = format!("127.0.0.1:{}", port);
        let listener = match TcpListener::bind(&bind_addr) {
            Ok(l) => l,
            Err(_) => return, // Port already in use, exit gracefully
        };

        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };

            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            if reader.read_line(&mut request_line).is_err() {
                continue;
            }
            // Drain the request headers before answering
            let mut header = String::new();
            while reader.read_line(&mut header).is_ok() {
                if header == "\r\n" || header == "\n" || header.is_empty() {
                    break;
                }
                header.clear();
            }

            let path = request_line.split_whitespace().nth(1).unwrap_or("/");
            let body = routes
                .iter()
                .find(|(prefix, _)| path.starts_with(prefix))
                .map(|(_, body)| body.to_string());

            let response = match body {
                Some(body) => format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nx-ratelimit-remaining: 57\r\nx-ratelimit-limit: 60\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                ),
                None => {
                    let body = r#"{"message": "Not Found"}"#;
                    format!(
                        "HTTP/1.1 404 Not Found\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    )
                }
            };
            let _ = stream.write_all(response.as_bytes());
        }
    });
}

fn create_temp_dir() -> std::path::PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    dir.push(format!("pulse-test-{}-{}", std::process::id(), nanos));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn mock_user(login: &str) -> serde_json::Value {
    json!({
        "login": login,
        "name": "Test User",
        "avatar_url": format!("https://avatars.example/{}", login),
        "html_url": format!("https://github.com/{}", login),
        "bio": "Testing",
        "location": null,
        "public_repos": 2,
        "followers": 3,
        "following": 1,
        "public_gists": 0
    })
}

fn mock_repos() -> serde_json::Value {
    json!([
        {
            "name": "alpha",
            "description": "First repo",
            "language": "Rust",
            "stargazers_count": 10,
            "forks_count": 2,
            "open_issues_count": 1,
            "size": 2048,
            "html_url": "https://github.com/testuser/alpha",
            "created_at": "2024-01-15T10:30:00Z",
            "updated_at": "2024-02-01T12:00:00Z",
            "topics": ["cli"],
            "private": false,
            "fork": false
        },
        {
            "name": "beta",
            "description": null,
            "language": "Go",
            "stargazers_count": 5,
            "forks_count": 1,
            "open_issues_count": 0,
            "size": 100,
            "html_url": "https://github.com/testuser/beta",
            "created_at": "2023-06-01T00:00:00Z",
            "updated_at": "2023-12-01T00:00:00Z",
            "topics": [],
            "private": false,
            "fork": true
        }
    ])
}

#[test]
fn test_help_command() {
    cargo_bin_cmd!("pulse")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "GitHub profile analytics from the command line",
        ));
}

#[test]
fn test_version() {
    cargo_bin_cmd!("pulse")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_profile_requires_username() {
    cargo_bin_cmd!("pulse")
        .args(["profile"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("USERNAME"));
}

#[test]
fn test_compare_requires_two_users() {
    cargo_bin_cmd!("pulse")
        .args(["compare", "only-one"])
        .assert()
        .failure();
}

#[test]
fn test_release_notes_subcommand_help() {
    cargo_bin_cmd!("pulse")
        .args(["release-notes", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("release notes"));
}

#[test]
fn test_history_empty() {
    let temp_dir = create_temp_dir();

    cargo_bin_cmd!("pulse")
        .args(["history"])
        .env("XDG_CONFIG_HOME", &temp_dir)
        .env_remove("PULSE_TOKEN")
        .assert()
        .success()
        .stdout(predicate::str::contains("No recent searches"));

    let _ = std::fs::remove_dir_all(&temp_dir);
}

#[test]
fn test_limits_against_mock_server() {
    let temp_dir = create_temp_dir();
    let port = get_available_port();
    let url = format!("http://127.0.0.1:{}", port);

    start_mock_server(
        port,
        vec![(
            "/rate_limit",
            json!({"rate": {"limit": 60, "remaining": 42, "reset": 1700000000, "used": 18}}),
        )],
    );
    thread::sleep(Duration::from_millis(200));

    let output = cargo_bin_cmd!("pulse")
        .args(["--format", "json", "limits"])
        .env("XDG_CONFIG_HOME", &temp_dir)
        .env("PULSE_API_URL", &url)
        .env_remove("PULSE_TOKEN")
        .timeout(Duration::from_secs(10))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed["remaining"], 42);
    assert_eq!(parsed["limit"], 60);

    let _ = std::fs::remove_dir_all(&temp_dir);
}

#[test]
fn test_profile_end_to_end_and_cache_reuse() {
    let temp_dir = create_temp_dir();
    let cache_dir = temp_dir.join("cache");
    std::fs::create_dir_all(&cache_dir).unwrap();
    let port = get_available_port();
    let url = format!("http://127.0.0.1:{}", port);

    start_mock_server(
        port,
        vec![
            ("/users/testuser/repos", mock_repos()),
            ("/users/testuser", mock_user("testuser")),
        ],
    );
    thread::sleep(Duration::from_millis(200));

    let output = cargo_bin_cmd!("pulse")
        .args(["--format", "json", "profile", "testuser"])
        .arg("--cache-dir")
        .arg(&cache_dir)
        .env("XDG_CONFIG_HOME", &temp_dir)
        .env("PULSE_API_URL", &url)
        .env_remove("PULSE_TOKEN")
        .timeout(Duration::from_secs(10))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["profile"]["login"], "testuser");
    assert_eq!(report["totals"]["stars"], 15);
    assert_eq!(report["totals"]["forks"], 3);
    // Default sort is stars-descending
    assert_eq!(report["repositories"][0]["name"], "alpha");

    // The bundle was cached; a second lookup works against a dead endpoint
    let dead_url = format!("http://127.0.0.1:{}", get_available_port());
    let output = cargo_bin_cmd!("pulse")
        .args(["--format", "json", "profile", "testuser"])
        .arg("--cache-dir")
        .arg(&cache_dir)
        .env("XDG_CONFIG_HOME", &temp_dir)
        .env("PULSE_API_URL", &dead_url)
        .env_remove("PULSE_TOKEN")
        .timeout(Duration::from_secs(10))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["profile"]["login"], "testuser");

    // And the lookup landed in search history
    cargo_bin_cmd!("pulse")
        .args(["--format", "json", "history"])
        .env("XDG_CONFIG_HOME", &temp_dir)
        .env_remove("PULSE_TOKEN")
        .assert()
        .success()
        .stdout(predicate::str::contains("testuser"));

    let _ = std::fs::remove_dir_all(&temp_dir);
}

#[test]
fn test_profile_user_not_found() {
    let temp_dir = create_temp_dir();
    let port = get_available_port();
    let url = format!("http://127.0.0.1:{}", port);

    // Server with no matching route answers 404
    start_mock_server(port, vec![]);
    thread::sleep(Duration::from_millis(200));

    cargo_bin_cmd!("pulse")
        .args(["profile", "ghost", "--no-cache"])
        .env("XDG_CONFIG_HOME", &temp_dir)
        .env("PULSE_API_URL", &url)
        .env_remove("PULSE_TOKEN")
        .timeout(Duration::from_secs(10))
        .assert()
        .failure()
        .stderr(predicate::str::contains("User not found"));

    let _ = std::fs::remove_dir_all(&temp_dir);
}
